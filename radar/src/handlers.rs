use clap::ArgMatches;
use colored::Colorize;
use radar_core::aggregate::{AggregateOptions, DEFAULT_REQUEST_DELAY};
use radar_core::detect::EntityDetector;
use radar_core::layout::DEFAULT_RADIUS;
use radar_core::patterns::PatternTable;
use radar_core::pipeline::{DEFAULT_MAX_RESULTS, RadarError, RadarOptions, RadarRun, execute_radar};
use radar_core::report::{ReportFormat, render_report, save_report};
use radar_scanner::{BingSearch, HttpFetcher, RequestHeaders};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::Level;

/// Arguments of the `search` subcommand, detached from clap.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchArgs {
    pub keyword: Option<String>,
    pub max_results: usize,
    pub timeout: Duration,
    pub delay: Duration,
    pub radius: f64,
    pub user_agent: Option<String>,
    pub format: ReportFormat,
    pub output: Option<PathBuf>,
    pub tui: bool,
    pub verbose: bool,
}

impl Default for SearchArgs {
    fn default() -> Self {
        Self {
            keyword: None,
            max_results: DEFAULT_MAX_RESULTS,
            timeout: Duration::from_secs(10),
            delay: DEFAULT_REQUEST_DELAY,
            radius: DEFAULT_RADIUS,
            user_agent: None,
            format: ReportFormat::Text,
            output: None,
            tui: false,
            verbose: false,
        }
    }
}

impl SearchArgs {
    pub fn from_matches(args: &ArgMatches) -> Self {
        let defaults = Self::default();
        Self {
            keyword: args.get_one::<String>("KEYWORD").cloned(),
            max_results: args
                .get_one::<usize>("max-results")
                .copied()
                .unwrap_or(defaults.max_results),
            timeout: args
                .get_one::<u64>("timeout")
                .map(|secs| Duration::from_secs(*secs))
                .unwrap_or(defaults.timeout),
            delay: args
                .get_one::<u64>("delay-ms")
                .map(|ms| Duration::from_millis(*ms))
                .unwrap_or(defaults.delay),
            radius: args.get_one::<f64>("radius").copied().unwrap_or(defaults.radius),
            user_agent: args.get_one::<String>("user-agent").cloned(),
            format: args
                .get_one::<String>("format")
                .and_then(|f| ReportFormat::from_str(f))
                .unwrap_or(defaults.format),
            output: args.get_one::<String>("output").map(|p| expand_path(p)),
            tui: args.get_flag("tui"),
            verbose: args.get_flag("verbose"),
        }
    }

    /// Reject values clap cannot rule out on its own.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_results == 0 {
            return Err("--max-results must be at least 1".to_string());
        }
        if self.timeout.is_zero() {
            return Err("--timeout must be at least 1 second".to_string());
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(format!("--radius must be a positive number, got {}", self.radius));
        }
        Ok(())
    }

    pub fn headers(&self) -> RequestHeaders {
        match &self.user_agent {
            Some(ua) => RequestHeaders::new(ua.clone()),
            None => RequestHeaders::random(),
        }
    }

    pub fn radar_options(&self, keyword: &str, show_progress_bar: bool) -> RadarOptions {
        RadarOptions {
            keyword: keyword.to_string(),
            max_results: self.max_results,
            radius: self.radius,
            aggregate: AggregateOptions {
                headers: self.headers(),
                delay: self.delay,
                show_progress_bar,
            },
        }
    }
}

/// Expand a leading `~` in a user-supplied path.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Report destination: a path without an extension gets the format's one.
pub fn report_path(path: &Path, format: ReportFormat) -> PathBuf {
    if path.extension().is_some() {
        return path.to_path_buf();
    }
    path.with_extension(format.extension())
}

/// Prompt on `output` and read one line from `input`. Returns the trimmed line.
pub fn read_keyword<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<String> {
    write!(output, "Enter search keyword: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Install the stderr log subscriber. Later calls are no-ops.
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    if let Err(e) = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
    {
        tracing::debug!("Log subscriber already installed: {}", e);
    }
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

fn fail(message: impl AsRef<str>) -> ! {
    eprintln!("{} {}", "✗".red().bold(), message.as_ref());
    std::process::exit(1);
}

/// One line per hit: position, title and the detected devices.
pub fn summarize_run(run: &RadarRun) -> String {
    let mut summary = String::new();
    for (idx, hit) in run.hits().iter().enumerate() {
        let devices = if !hit.is_accessible() {
            "not accessible".to_string()
        } else if hit.entities.is_empty() {
            "-".to_string()
        } else {
            hit.entities.categories().collect::<Vec<_>>().join(", ")
        };
        summary.push_str(&format!("{:>3}. {}  [{}]\n", idx + 1, hit.title, devices));
    }
    summary
}

pub async fn handle_search(sub_matches: &ArgMatches, quiet: bool) {
    let args = SearchArgs::from_matches(sub_matches);
    init_logging(args.verbose);

    if let Err(e) = args.validate() {
        fail(e);
    }

    let keyword = match &args.keyword {
        Some(keyword) => keyword.clone(),
        None => {
            let stdin = io::stdin();
            match read_keyword(&mut stdin.lock(), &mut io::stdout()) {
                Ok(keyword) => keyword,
                Err(e) => fail(format!("Failed to read keyword: {}", e)),
            }
        }
    };

    let executor = match BingSearch::new() {
        Ok(executor) => executor,
        Err(e) => fail(format!("Failed to set up search client: {}", e)),
    };
    let fetcher = match HttpFetcher::with_timeout(args.timeout) {
        Ok(fetcher) => fetcher,
        Err(e) => fail(format!("Failed to set up page fetcher: {}", e)),
    };
    let detector = EntityDetector::builtin();

    if !quiet {
        println!(
            "\n{} Searching for {} (up to {} results)\n",
            "→".blue(),
            keyword.bright_white().bold(),
            args.max_results
        );
    }

    let options = args.radar_options(&keyword, !quiet && !args.verbose);
    let run = match execute_radar(options, &executor, &fetcher, &detector, None).await {
        Ok(run) => run,
        Err(RadarError::EmptyQuery) => fail("No search keyword given."),
        Err(RadarError::SearchUnavailable { keyword }) => fail(format!(
            "No results found for '{}'. The search engine may be unreachable or blocking requests.",
            keyword
        )),
    };

    if !quiet {
        println!("\n{} Analysis complete!\n", "✓".green().bold());
        print!("{}", summarize_run(&run));
        println!();
    }

    if args.tui
        && let Err(e) = radar_tui::run(&run.scene, run.keyword())
    {
        fail(format!("Error running TUI: {}", e));
    }

    let report = match render_report(&run, args.format) {
        Ok(report) => report,
        Err(e) => fail(format!("Failed to render report: {}", e)),
    };

    match args.output.as_deref().map(|path| report_path(path, args.format)) {
        Some(path) => match save_report(&report, &path) {
            Ok(()) => println!(
                "{} Report saved: {}",
                "✓".green().bold(),
                path.display().to_string().bright_white()
            ),
            Err(e) => fail(format!("Failed to save report to {}: {}", path.display(), e)),
        },
        None if !args.tui => print!("{}", report),
        None => {}
    }
}

pub fn handle_patterns() {
    print_divider();
    println!("{}", "  DEVICE CATEGORIES".bright_white().bold());
    print_divider();
    println!();
    print!("{}", pattern_listing(PatternTable::builtin()));
    println!();
}

pub fn pattern_listing(table: &PatternTable) -> String {
    let mut listing = String::new();
    for pattern in table.iter() {
        listing.push_str(&format!(
            "  {:<12} {:<15} {}\n",
            pattern.category(),
            pattern.color(),
            pattern.pattern()
        ));
    }
    listing
}
