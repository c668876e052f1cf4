use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use radar_core::graph::NodeKind;
use radar_core::layout::{Scene, SceneNode};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, List, ListItem, Paragraph,
        canvas::{Canvas, Circle, Line as CanvasLine},
    },
};
use std::io;
use std::time::Duration;

/// Extra room around the outermost nodes so labels are not clipped.
const MARGIN: f64 = 1.5;

pub struct SceneView<'a> {
    scene: &'a Scene,
    title: String,
    zoom: f64,
    selected: Option<usize>,
    should_quit: bool,
}

impl<'a> SceneView<'a> {
    pub fn new(scene: &'a Scene, title: impl Into<String>) -> Self {
        Self {
            scene,
            title: title.into(),
            zoom: 1.0,
            selected: None,
            should_quit: false,
        }
    }

    /// Symmetric bounds covering every node, scaled by the zoom level.
    pub fn bounds(&self) -> [f64; 2] {
        let extent = self
            .scene
            .nodes
            .iter()
            .map(|node| node.position.x.abs().max(node.position.y.abs()))
            .fold(self.scene.radius, f64::max);
        let half = (extent + MARGIN) / self.zoom;
        [-half, half]
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * 1.25).min(8.0);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / 1.25).max(0.25);
    }

    pub fn select_next(&mut self) {
        let leaves = self.scene.leaves().count();
        if leaves == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(idx) if idx + 1 < leaves => idx + 1,
            _ => 0,
        });
    }

    pub fn select_previous(&mut self) {
        let leaves = self.scene.leaves().count();
        if leaves == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => leaves - 1,
            Some(idx) => idx - 1,
        });
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('+') | KeyCode::Char('=') => self.zoom_in(),
            KeyCode::Char('-') => self.zoom_out(),
            KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::BackTab | KeyCode::Char('k') => self.select_previous(),
            _ => {}
        }
    }
}

/// Map a named node color onto the closest terminal color.
pub fn terminal_color(name: &str) -> Color {
    match name.to_lowercase().as_str() {
        "skyblue" => Color::Rgb(135, 206, 235),
        "lightgray" | "lightgrey" => Color::Rgb(211, 211, 211),
        "lightcoral" => Color::Rgb(240, 128, 128),
        "mediumpurple" => Color::Rgb(147, 112, 219),
        "mediumseagreen" => Color::Rgb(60, 179, 113),
        "tomato" => Color::Rgb(255, 99, 71),
        "orange" => Color::Rgb(255, 165, 0),
        "lightskyblue" => Color::Rgb(135, 206, 250),
        "slategray" | "slategrey" => Color::Rgb(112, 128, 144),
        "palevioletred" => Color::Rgb(219, 112, 147),
        "khaki" => Color::Rgb(240, 230, 140),
        "gold" => Color::Rgb(255, 215, 0),
        "red" => Color::Red,
        "green" => Color::Green,
        "blue" => Color::Blue,
        "yellow" => Color::Yellow,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "black" => Color::Black,
        "gray" | "grey" => Color::Gray,
        hex if hex.starts_with('#') && hex.len() == 7 => parse_hex(&hex[1..]).unwrap_or(Color::Gray),
        _ => Color::Gray,
    }
}

fn parse_hex(digits: &str) -> Option<Color> {
    let r = u8::from_str_radix(digits.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(digits.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(digits.get(4..6)?, 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

/// Show the scene full-screen until the user quits.
pub fn run(scene: &Scene, title: &str) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut view = SceneView::new(scene, title);
    let result = run_app(&mut terminal, &mut view);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    view: &mut SceneView,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, view))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            view.handle_key(key.code);
        }

        if view.should_quit() {
            return Ok(());
        }
    }
}

fn ui(f: &mut Frame, view: &SceneView) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(1)])
        .split(f.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(rows[0]);

    render_graph(f, view, columns[0]);
    render_legend(f, view, columns[1]);

    let help = Paragraph::new(Line::from(vec![
        Span::styled(" q", Style::default().fg(Color::Cyan)),
        Span::raw(" quit  "),
        Span::styled("+/-", Style::default().fg(Color::Cyan)),
        Span::raw(" zoom  "),
        Span::styled("↑/↓", Style::default().fg(Color::Cyan)),
        Span::raw(" select"),
    ]));
    f.render_widget(help, rows[1]);
}

fn render_graph(f: &mut Frame, view: &SceneView, area: ratatui::layout::Rect) {
    let bounds = view.bounds();
    let scene = view.scene;
    let center = scene.center();
    let leaves: Vec<&SceneNode> = scene.leaves().collect();
    let selected = view.selected();

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", view.title)),
        )
        .marker(Marker::Braille)
        .x_bounds(bounds)
        .y_bounds(bounds)
        .paint(move |ctx| {
            if let Some(center) = center {
                for leaf in &leaves {
                    ctx.draw(&CanvasLine {
                        x1: center.position.x,
                        y1: center.position.y,
                        x2: leaf.position.x,
                        y2: leaf.position.y,
                        color: Color::DarkGray,
                    });
                }
            }

            ctx.layer();

            for (idx, leaf) in leaves.iter().enumerate() {
                let color = terminal_color(&leaf.color);
                ctx.draw(&Circle {
                    x: leaf.position.x,
                    y: leaf.position.y,
                    radius: 0.25,
                    color,
                });

                let mut style = Style::default().fg(color);
                if selected == Some(idx) {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                ctx.print(
                    leaf.position.x,
                    leaf.position.y,
                    Span::styled(leaf.label.clone(), style),
                );
            }

            if let Some(center) = center {
                ctx.draw(&Circle {
                    x: center.position.x,
                    y: center.position.y,
                    radius: 0.5,
                    color: terminal_color(&center.color),
                });
                ctx.print(
                    center.position.x,
                    center.position.y,
                    Span::styled(
                        center.label.clone(),
                        Style::default()
                            .fg(terminal_color(&center.color))
                            .add_modifier(Modifier::BOLD),
                    ),
                );
            }
        });

    f.render_widget(canvas, area);
}

fn render_legend(f: &mut Frame, view: &SceneView, area: ratatui::layout::Rect) {
    let items: Vec<ListItem> = view
        .scene
        .nodes
        .iter()
        .filter(|node| node.kind == NodeKind::Leaf)
        .enumerate()
        .map(|(idx, node)| {
            let mut style = Style::default().fg(terminal_color(&node.color));
            if view.selected() == Some(idx) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            ListItem::new(Line::from(vec![
                Span::styled("● ", Style::default().fg(terminal_color(&node.color))),
                Span::styled(node.label.clone(), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Results "));
    f.render_widget(list, area);
}
