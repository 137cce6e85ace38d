use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use minigrid_text_core::{
    Action, ActionParseError, Color as ObjectColor, DescribeConfig, DescribeMode, DoorState,
    ObjectKind, Orientation, Position, parse_action,
    summary::world_summary,
    world::{GridWorld, WorldObject, load_world_from_string},
};
use ratatui::{
    crossterm::{
        self,
        event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
    prelude::*,
    widgets::*,
};
use std::{
    io::{self, Stdout},
    path::{Path, PathBuf},
    time::Duration,
};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Plain,
    Room,
    FullGrid,
}

impl From<Mode> for DescribeMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Plain => DescribeMode::Plain,
            Mode::Room => DescribeMode::Room,
            Mode::FullGrid => DescribeMode::FullGrid,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Map file to load
    #[arg(short, long, value_name = "MAP_FILE")]
    map: Option<PathBuf>,

    /// Description preset
    #[arg(long, value_enum, default_value_t = Mode::Room)]
    mode: Mode,

    /// JSON description config; takes precedence over --mode
    #[arg(short, long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Print the description to stdout instead of opening the viewer
    #[arg(long)]
    print: bool,

    /// With --print, print the flat object listing instead
    #[arg(long, requires = "print")]
    summary: bool,

    /// With --print, parse these commands after the description
    #[arg(short, long = "action", value_name = "TEXT", requires = "print")]
    actions: Vec<String>,
}

/// A typed command and what it parsed to.
struct CommandEntry {
    text: String,
    outcome: Result<Action, ActionParseError>,
}

struct App {
    /// The loaded world snapshot.
    world: GridWorld,
    /// Active description config.
    config: DescribeConfig,
    /// Preset behind `config`; `None` for a config loaded from file.
    mode: Option<DescribeMode>,
    description: String,
    /// Command being typed.
    input: String,
    history: Vec<CommandEntry>,
    /// Flag to control the main loop.
    should_quit: bool,
}

impl App {
    fn new(world: GridWorld, config: DescribeConfig, mode: Option<DescribeMode>) -> Self {
        let mut app = App {
            world,
            config,
            mode,
            description: String::new(),
            input: String::new(),
            history: Vec::new(),
            should_quit: false,
        };
        app.refresh_description();
        app
    }

    fn refresh_description(&mut self) {
        self.description = match self.world.describe(&self.config) {
            Ok(text) => text,
            Err(err) => {
                tracing::error!(%err, "failed to describe scene");
                format!("Cannot describe the scene: {err}")
            }
        };
    }

    /// Switches to the next preset.
    fn cycle_mode(&mut self) {
        let next = match self.mode {
            Some(DescribeMode::Plain) => DescribeMode::Room,
            Some(DescribeMode::Room) => DescribeMode::FullGrid,
            Some(DescribeMode::FullGrid) | None => DescribeMode::Plain,
        };
        self.mode = Some(next);
        self.config = next.config();
        self.refresh_description();
    }

    /// Parses the typed command and records the outcome.
    fn submit(&mut self) {
        let text = std::mem::take(&mut self.input);
        if text.trim().is_empty() {
            return;
        }
        let outcome = parse_action(&text);
        if let Ok(action) = &outcome {
            tracing::info!(%action, id = action.id(), "parsed command");
        }
        self.history.push(CommandEntry { text, outcome });
    }

    fn mode_label(&self) -> &'static str {
        self.mode.as_ref().map_or("custom", DescribeMode::as_str)
    }

    /// Sets the quit flag.
    fn quit(&mut self) {
        self.should_quit = true;
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let map_file = args.map.unwrap_or(PathBuf::from("maps/two_rooms.txt"));
    if !map_file.exists() {
        return Err(anyhow::anyhow!(
            "Map file does not exist: {}",
            map_file.display()
        ));
    }
    let map_string = std::fs::read_to_string(&map_file)
        .with_context(|| format!("Failed to read map file {}", map_file.display()))?;
    let world = load_world_from_string(&map_string)
        .with_context(|| format!("Failed to load map {}", map_file.display()))?;

    let (mode, config) = match &args.config {
        Some(path) => (None, load_config(path)?),
        None => {
            let mode = DescribeMode::from(args.mode);
            (Some(mode), mode.config())
        }
    };

    if args.print {
        return print_report(&world, &config, args.summary, &args.actions);
    }

    let mut terminal = setup_terminal()?;
    let mut app = App::new(world, config, mode);
    let result = run_app(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;
    result
}

fn load_config(path: &Path) -> Result<DescribeConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config from {}", path.display()))
}

/// Writes the description (or summary) and the parsed commands to stdout.
fn print_report(
    world: &GridWorld,
    config: &DescribeConfig,
    summary: bool,
    actions: &[String],
) -> Result<()> {
    if summary {
        println!("{}", world_summary(world));
    } else {
        println!("{}", world.describe(config)?);
    }
    for text in actions {
        let action = parse_action(text)?;
        println!("{text:?} -> {action} ({})", action.id());
    }
    Ok(())
}

/// Configures the terminal for TUI interaction.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(Into::into)
}

/// Restores the terminal to its original state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Runs the main loop of the TUI application.
fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let poll_rate = Duration::from_millis(250);

    while !app.should_quit {
        terminal.draw(|f| ui(f, app))?;

        if crossterm::event::poll(poll_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Esc => app.quit(),
                    KeyCode::Tab => app.cycle_mode(),
                    KeyCode::Enter => app.submit(),
                    KeyCode::Backspace => {
                        app.input.pop();
                    }
                    KeyCode::Char(c) => app.input.push(c),
                    _ => {}
                }
            }
        }
    }
    Ok(())
}

/// Renders the user interface.
fn ui(frame: &mut Frame, app: &App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45), // Map
            Constraint::Min(6),         // Description and command history
            Constraint::Length(3),      // Command input
        ])
        .split(frame.area());

    render_map(frame, main_layout[0], &app.world);

    let text_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_layout[1]);

    let description = Paragraph::new(app.description.as_str())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(format!("Description ({})", app.mode_label()))
                .borders(Borders::ALL),
        );
    frame.render_widget(description, text_layout[0]);

    render_history(frame, text_layout[1], &app.history);

    let input = Paragraph::new(format!("> {}", app.input)).block(
        Block::default()
            .title("Command (Enter to parse, Tab to switch mode, Esc to quit)")
            .borders(Borders::ALL),
    );
    frame.render_widget(input, main_layout[2]);
}

/// Renders the parsed commands, newest first.
fn render_history(frame: &mut Frame, area: Rect, history: &[CommandEntry]) {
    let items: Vec<ListItem> = history
        .iter()
        .rev()
        .map(|entry| {
            let outcome = match &entry.outcome {
                Ok(action) => Span::styled(
                    format!("-> {action} ({})", action.id()),
                    Style::default().fg(Color::Green),
                ),
                Err(err) => Span::styled(err.to_string(), Style::default().fg(Color::Red)),
            };
            ListItem::from(Line::from(vec![
                Span::raw(format!("{} ", entry.text.trim())),
                outcome,
            ]))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Commands"));
    frame.render_widget(list, area);
}

fn object_color(color: ObjectColor) -> Color {
    match color {
        ObjectColor::Red => Color::Red,
        ObjectColor::Green => Color::Green,
        ObjectColor::Blue => Color::Blue,
        ObjectColor::Purple => Color::Magenta,
        ObjectColor::Yellow => Color::Yellow,
        ObjectColor::Grey => Color::DarkGray,
    }
}

fn object_glyph(object: &WorldObject) -> &'static str {
    match object.kind {
        ObjectKind::Unseen | ObjectKind::Empty => " ",
        ObjectKind::Wall => "#",
        ObjectKind::Floor => ".",
        ObjectKind::Door => match object.door_state() {
            Some(DoorState::Open) => "+",
            Some(DoorState::Locked) => "L",
            _ => "|",
        },
        ObjectKind::Key => "k",
        ObjectKind::Ball => "o",
        ObjectKind::Box => "x",
        ObjectKind::Goal => "G",
        ObjectKind::Lava => "~",
        ObjectKind::Agent => "@",
    }
}

fn agent_glyph(facing: Orientation) -> &'static str {
    match facing {
        Orientation::East => ">",
        Orientation::South => "v",
        Orientation::West => "<",
        Orientation::North => "^",
    }
}

/// Renders the world grid with the agent drawn over its cell.
fn render_map(frame: &mut Frame, area: Rect, world: &GridWorld) {
    let mut lines: Vec<Line> = Vec::with_capacity(world.height());

    for y in 0..world.height() {
        let mut spans: Vec<Span> = Vec::with_capacity(world.width());
        for x in 0..world.width() {
            let pos = Position::new(x, y);
            let span = if pos == world.agent_pos {
                Span::styled(
                    agent_glyph(world.agent_dir),
                    Style::default().fg(Color::Red).bold(),
                )
            } else {
                match world.object_at(pos) {
                    Some(object) => Span::styled(
                        object_glyph(object),
                        Style::default().fg(object_color(object.color)),
                    ),
                    None => Span::raw(" "),
                }
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    let carrying = world
        .carrying
        .as_ref()
        .map_or_else(|| "nothing".to_string(), |object| object.decoded().phrase());
    let map_paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(format!("Grid World (carrying: {carrying})"))
                .borders(Borders::ALL),
        )
        .alignment(Alignment::Center);

    frame.render_widget(map_paragraph, area);
}
