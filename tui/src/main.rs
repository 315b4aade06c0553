use anyhow::{Context, Result};
use clap::Parser;
use crossterm::ExecutableCommand;
use crossterm::cursor::Show;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use minesweep_core::{CellCount, Coord, DEFAULT_MINE_COUNT, Engine};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use app::{Action, App};

mod app;
mod theme;
mod ui;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board width in cells
    #[arg(long, default_value_t = 10)]
    width: Coord,

    /// Board height in cells
    #[arg(long, default_value_t = 10)]
    height: Coord,

    /// Mines on the first board, resets always place the default count
    #[arg(short, long, default_value_t = DEFAULT_MINE_COUNT)]
    mines: CellCount,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write logs to this file, the terminal is taken by the game
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let engine = new_engine(&args)?;
    log::debug!("App started");
    run_terminal(App::new(engine))
}

fn init_logging(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let Some(log_level) = args.verbose.log_level() else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Could not create log file {}", path.display()))?;
    env_logger::Builder::new()
        .filter_level(log_level.to_level_filter())
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("Error initializing logger")
}

fn new_engine(args: &Args) -> Result<Engine> {
    let mut engine = match args.seed {
        Some(seed) => Engine::with_seed(args.width, args.height, seed),
        None => Engine::new(args.width, args.height),
    }
    .with_context(|| format!("Invalid board size {}x{}", args.width, args.height))?;

    engine.place_random_mines(args.mines).with_context(|| {
        format!(
            "Cannot place {} mines on a {}x{} board",
            args.mines, args.width, args.height
        )
    })?;
    Ok(engine)
}

/// Puts the terminal back in cooked mode on the main screen when dropped,
/// whichever way the session ends.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Could not enable raw mode")?;
        let guard = TerminalGuard;
        io::stdout()
            .execute(EnterAlternateScreen)
            .context("Could not enter alternate screen")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = disable_raw_mode() {
            log::warn!("Could not disable raw mode: {err}");
        }
        if let Err(err) = io::stdout().execute(LeaveAlternateScreen) {
            log::warn!("Could not leave alternate screen: {err}");
        }
        if let Err(err) = io::stdout().execute(Show) {
            log::warn!("Could not show cursor: {err}");
        }
    }
}

fn run_terminal(mut app: App) -> Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.hide_cursor()?;

    run_loop(&mut terminal, &mut app)
}

fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while !app.should_quit() {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(action) = Action::from_key(key_event) {
                    app.apply(action);
                }
            }
        }
    }
    log::debug!("Quit");
    Ok(())
}
