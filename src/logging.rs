use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use log::{LevelFilter, info, warn};
use simplelog::{Config, WriteLogger};

use crate::game::GameState;

const APP_DIR_NAME: &str = "grid-snake";
const LOG_FILE_NAME: &str = "grid-snake.log";

/// Returns the platform-correct default log file path.
#[must_use]
pub fn default_log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(LOG_FILE_NAME);
    base
}

/// Installs a file logger, creating parent directories when needed.
///
/// The terminal belongs to the UI, so nothing is logged to stdout or stderr.
pub fn init(path: &Path, level: LevelFilter) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    WriteLogger::init(level, Config::default(), file)
        .map_err(|error| io::Error::new(io::ErrorKind::AlreadyExists, error))
}

/// Writes the full final state of a finished game as one JSON record.
pub fn log_final_state(state: &GameState) {
    match serde_json::to_string(state) {
        Ok(json) => info!("final state: {json}"),
        Err(error) => warn!("could not serialize final state: {error}"),
    }
}
