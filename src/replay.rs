use std::fs;
use std::io;
use std::path::Path;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::game::{GameError, GameState, RawAction, decide_tick};

/// Replay entry kind that runs the per-tick decision instead of a fixed action.
pub const TICK_KIND: &str = "tick";

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read replay file: {0}")]
    Io(#[from] io::Error),
    #[error("malformed replay file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("replay entry {index}: {source}")]
    Action {
        index: usize,
        #[source]
        source: GameError,
    },
}

/// Reads a JSON array of raw actions.
pub fn load_actions(path: &Path) -> Result<Vec<RawAction>, ReplayError> {
    let raw = fs::read_to_string(path)?;
    parse_actions(&raw)
}

pub fn parse_actions(raw: &str) -> Result<Vec<RawAction>, ReplayError> {
    Ok(serde_json::from_str(raw)?)
}

/// Plays `actions` against a fresh seeded game and returns the final state.
///
/// Entries after the game ends are skipped. An unknown kind aborts the replay.
pub fn run_replay(actions: &[RawAction], seed: u64) -> Result<GameState, ReplayError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = GameState::new(&mut rng);
    info!("replaying {} actions with seed {seed}", actions.len());

    for (index, raw) in actions.iter().enumerate() {
        if state.is_game_over() {
            debug!("game over after {index} entries, skipping the rest");
            break;
        }

        if raw.kind == TICK_KIND {
            let action = decide_tick(&state);
            state.apply(action, &mut rng);
            continue;
        }

        state
            .dispatch(raw, &mut rng)
            .map_err(|source| ReplayError::Action { index, source })?;
    }

    Ok(state)
}
