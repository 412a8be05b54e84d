use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::{DEFAULT_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS, THEME_CLASSIC};
use grid_snake::logging;
use grid_snake::replay::{load_actions, run_replay};
use grid_snake::session::{Flow, Session};
use grid_snake::terminal_runtime::{TerminalSession, cleanup_terminal_best_effort};
use log::{LevelFilter, info};

/// Upper bound on how long the loop waits for a key between redraws.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Seed for food and start positions; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Tick interval in milliseconds.
    #[arg(long = "tick-ms", default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    tick_ms: u64,

    /// Log file path. Defaults to the platform data directory.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Log every tick, not just session events.
    #[arg(long)]
    verbose: bool,

    /// Play a JSON action file headlessly and print the final state.
    #[arg(long)]
    replay: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(logging::default_log_path);
    let level = if cli.verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };
    if let Err(error) = logging::init(&log_path, level) {
        eprintln!("Logging disabled, cannot open {}: {error}", log_path.display());
    }

    if let Some(path) = cli.replay.as_deref() {
        return replay(path, cli.seed.unwrap_or_default());
    }

    install_panic_hook();
    run(&cli)
}

fn replay(path: &Path, seed: u64) -> io::Result<()> {
    let actions = load_actions(path).map_err(io::Error::other)?;
    let state = run_replay(&actions, seed).map_err(io::Error::other)?;

    let json = serde_json::to_string_pretty(&state).map_err(io::Error::other)?;
    println!("{json}");
    Ok(())
}

fn run(cli: &Cli) -> io::Result<()> {
    let tick_interval = tick_interval(cli.tick_ms);
    let mut session = match cli.seed {
        Some(seed) => Session::with_seed(seed, tick_interval),
        None => Session::new(tick_interval),
    };
    info!(
        "session starting: tick {}ms, seed {:?}",
        tick_interval.as_millis(),
        cli.seed
    );

    let mut terminal = TerminalSession::enter()?;
    session.begin(Instant::now());

    loop {
        terminal.draw(session.state(), &THEME_CLASSIC)?;

        let timeout = session
            .ticker()
            .time_until_next(Instant::now())
            .map_or(FRAME_INTERVAL, |remaining| remaining.min(FRAME_INTERVAL));

        if let Some(input) = terminal.poll_input(timeout)? {
            if session.handle_input(input, Instant::now()) == Flow::Quit {
                break;
            }
        }

        session.on_tick(Instant::now());
    }

    session.end();
    info!(
        "session ended after {} game(s), last score {}",
        session.games_played(),
        session.state().score
    );
    Ok(())
}

fn tick_interval(tick_ms: u64) -> Duration {
    Duration::from_millis(tick_ms.max(MIN_TICK_INTERVAL_MS))
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = cleanup_terminal_best_effort();
        default_hook(panic_info);
    }));
}
