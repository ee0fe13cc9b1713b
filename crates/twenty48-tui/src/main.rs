//! Terminal 2048.

mod app;
mod config;
mod input;
mod ui;

use std::fs::OpenOptions;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use twenty48_grid::Game;

use app::App;
use config::Config;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play 2048 in the terminal")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long, value_name = "FILE", value_parser = clap::value_parser!(PathBuf))]
    config: Option<PathBuf>,
    /// Seed for a reproducible game (overrides [game].seed)
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
    /// Tracing filter, e.g. "info", "debug" (overrides [log].filter)
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,
    /// Log file (overrides [log].file)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn apply(self, config: &mut Config) {
        if let Some(seed) = self.seed {
            config.game.seed = Some(seed);
        }
        if let Some(filter) = self.log {
            config.log.filter = filter;
        }
        if let Some(file) = self.log_file {
            config.log.file = file;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => Config::from_toml(path)?,
        None => Config::default(),
    };
    args.apply(&mut config);
    let palette = config.theme.palette()?;
    init_tracing(&config.log)?;

    let game = match config.game.seed {
        Some(seed) => Game::from_seed(seed),
        None => Game::new(),
    };
    info!(seed = ?config.game.seed, "starting twenty48");

    let mut terminal = setup_terminal()?;
    let res = run_app(&mut terminal, App::new(game, palette));
    settle(res, restore_terminal(&mut terminal))
}

/// The run error wins; a restore failure is only surfaced on a clean run.
fn settle(res: Result<()>, restored: Result<()>) -> Result<()> {
    match (res, restored) {
        (Err(err), Err(restore_err)) => {
            error!(error = %restore_err, "failed to restore terminal");
            Err(err)
        }
        (Err(err), Ok(())) => Err(err),
        (Ok(()), restored) => restored,
    }
}

fn init_tracing(log: &config::Log) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log.file)
        .with_context(|| format!("failed to open log file {}", log.file.display()))?;
    let filter = EnvFilter::try_new(&log.filter)
        .with_context(|| format!("invalid log filter {:?}", log.filter))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(err).context("failed to enter alternate screen");
    }

    // Leave raw mode before the panic message prints.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(panic);
    }));

    match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(terminal) => Ok(terminal),
        Err(err) => {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            Err(err).context("failed to create terminal")
        }
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// One event, one state transition, one redraw.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if let Event::Key(key) = event::read()? {
            if let Some(command) = input::map_key(key) {
                app.handle(command);
            }
        }
        if app.should_quit() {
            return Ok(());
        }
    }
}
