use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("radar")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("radar")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("search")
                .about(
                    "Search a keyword, scan every result page for device mentions and draw \
                the results as a star graph.",
                )
                .arg(
                    arg!([KEYWORD])
                        .required(false)
                        .help("The search keyword (prompted for when omitted)"),
                )
                .arg(
                    arg!(-n --"max-results" <NUM>)
                        .required(false)
                        .help("Maximum number of search results to analyze")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("10"),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Per-page request timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("10"),
                )
                .arg(
                    arg!(--"delay-ms" <MILLIS>)
                        .required(false)
                        .help("Pause between page fetches in milliseconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("1000"),
                )
                .arg(
                    arg!(--"radius" <RADIUS>)
                        .required(false)
                        .help("Radius of the circle the results are placed on")
                        .value_parser(clap::value_parser!(f64))
                        .default_value("3.5"),
                )
                .arg(
                    arg!(--"user-agent" <UA>)
                        .required(false)
                        .help("Send this User-Agent instead of a randomly chosen browser one"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json, dot")
                        .value_parser(["text", "json", "dot"])
                        .default_value("text"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)"),
                )
                .arg(
                    arg!(--"tui")
                        .required(false)
                        .help("Show the star graph in an interactive terminal view")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-v --"verbose")
                        .required(false)
                        .help("Log every fetch and detection step to stderr")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            command!("patterns").about("List the device categories, their colors and patterns"),
        )
}
