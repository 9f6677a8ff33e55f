use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;
use std::time::Instant;

use clap::{ArgAction, Parser};
use tile_snake::config::FRAME_INTERVAL;
use tile_snake::game::GridMovementEngine;
use tile_snake::input::{GameInput, InputHandler};
use tile_snake::renderer;
use tile_snake::settings::{Settings, load_settings, settings_to_json};
use tile_snake::terminal_runtime::{TerminalSession, install_panic_hook};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tile-snake", version, about = "Snake on a tile grid, in the terminal")]
struct Cli {
    /// Settings file (defaults to the platform config directory).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Grid width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Milliseconds per one-cell move.
    #[arg(long = "step-ms", value_name = "MS")]
    step_ms: Option<u64>,

    /// Initial snake length.
    #[arg(long)]
    length: Option<usize>,

    /// Seed for apple placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the effective settings as JSON and exit.
    #[arg(long)]
    print_config: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Write logs to this file. The terminal is owned by the game, so
    /// nothing is logged without it.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> Settings {
        Settings {
            width: self.width,
            height: self.height,
            step_ms: self.step_ms,
            initial_length: self.length,
            seed: self.seed,
            ..Settings::default()
        }
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let settings = match load_settings(cli.config.as_deref()) {
        Ok(file) => file.merged_with(cli.overrides()),
        Err(err) => {
            error!(%err, "settings rejected");
            eprintln!("{err}");
            process::exit(2);
        }
    };

    if cli.print_config {
        let json = settings_to_json(&settings).map_err(io::Error::other)?;
        println!("{json}");
        return Ok(());
    }

    let engine = match settings
        .to_engine_config()
        .and_then(|config| GridMovementEngine::new(config).map_err(Into::into))
    {
        Ok(engine) => engine,
        Err(err) => {
            error!(%err, "settings rejected");
            eprintln!("{err}");
            process::exit(2);
        }
    };

    install_panic_hook();
    let mut session = TerminalSession::enter()?;
    let result = run(&mut session, engine);
    drop(session);
    result
}

fn run(session: &mut TerminalSession, mut engine: GridMovementEngine) -> io::Result<()> {
    let mut input = InputHandler::new(FRAME_INTERVAL);
    let mut last_frame = Instant::now();
    info!(grid = ?engine.grid(), "session started");

    loop {
        session.draw(|frame| renderer::render(frame, &engine))?;

        if let Some(game_input) = input.poll_input()? {
            if game_input == GameInput::Quit {
                break;
            }
            engine.apply_input(game_input);
        }

        let now = Instant::now();
        engine.tick(now.duration_since(last_frame));
        last_frame = now;
    }

    info!(high_score = engine.high_score(), "session ended");
    Ok(())
}

fn init_logging(verbose: u8, log_file: Option<&Path>) -> io::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}
