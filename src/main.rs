use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Parser;
use hungry_snake::config::GameConfig;
use hungry_snake::input::InputHandler;
use hungry_snake::renderer;
use hungry_snake::session::GameSession;
use hungry_snake::terminal_runtime::{TerminalSession, install_panic_hook};
use log::{info, warn};

/// Longest wait for input before the frame is redrawn.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON file with game parameters; flags below override it.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Side length of the square board, in cells.
    #[arg(long)]
    grid_size: Option<u16>,

    /// Starting tick interval in milliseconds.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Seed for reproducible food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = load_config(&cli)?;
    install_panic_hook();

    run(config, cli.seed)
}

fn run(config: GameConfig, seed: Option<u64>) -> io::Result<()> {
    let mut terminal_session = TerminalSession::enter()?;
    let mut input = InputHandler::new();
    let mut session = GameSession::new(config, seed);
    info!("hungry snake ready");

    loop {
        let snapshot = session.snapshot();
        let awaiting_start = session.is_awaiting_start();
        terminal_session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &snapshot, awaiting_start))?;

        let timeout = session
            .time_until_next_tick(Instant::now())
            .map_or(FRAME_INTERVAL, |until_tick| until_tick.min(FRAME_INTERVAL));
        if let Some(game_input) = input.poll_input(timeout)? {
            if !session.apply_input(game_input, Instant::now()) {
                break;
            }
        }

        if let Some(outcome) = session.tick(Instant::now()) {
            if outcome.ended {
                match serde_json::to_string(&session.snapshot()) {
                    Ok(json) => info!("final state: {json}"),
                    Err(error) => warn!("could not serialize final state: {error}"),
                }
            }
        }
    }

    info!("quit with score {}", session.state().score);
    Ok(())
}

fn load_config(cli: &Cli) -> io::Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };

    if let Some(grid_size) = cli.grid_size {
        config.grid_size = grid_size;
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.initial_tick_interval_ms = tick_ms;
    }

    if let Some(previous) = config.recentre_start() {
        warn!(
            "start cell ({}, {}) is off a {}x{} board, using ({}, {})",
            previous.col,
            previous.row,
            config.grid_size,
            config.grid_size,
            config.start.col,
            config.start.row
        );
    }

    config.validate()?;
    Ok(config)
}

fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));

    if let Some(path) = log_file {
        builder.target(env_logger::Target::Pipe(Box::new(File::create(path)?)));
    }

    builder.init();
    Ok(())
}
