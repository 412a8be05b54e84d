use std::fmt;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Coordinate;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    #[serde(alias = "bottom")]
    Down,
    Right,
    Left,
}

impl Direction {
    /// Returns `coordinate` moved one cell in this direction.
    #[must_use]
    pub fn displace(self, coordinate: Coordinate) -> Coordinate {
        let Coordinate { x, y } = coordinate;
        match self {
            Self::Up => Coordinate { x, y: y - 1 },
            Self::Down => Coordinate { x, y: y + 1 },
            Self::Right => Coordinate { x: x + 1, y },
            Self::Left => Coordinate { x: x - 1, y },
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Right => "right",
            Self::Left => "left",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("unknown direction `{0}`")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Accepts the four names case-insensitively; `bottom` is an alias of `down`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" | "bottom" => Ok(Self::Down),
            "right" => Ok(Self::Right),
            "left" => Ok(Self::Left),
            _ => Err(ParseDirectionError(raw.to_owned())),
        }
    }
}

/// High-level input events consumed by the session loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Restart,
    Quit,
}

/// Maps a raw key event to a game input.
///
/// Arrow keys steer; every key without a binding yields `None`.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    match key.code {
        KeyCode::Up => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Down => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Right => Some(GameInput::Direction(Direction::Right)),
        KeyCode::Left => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Enter | KeyCode::Char('r' | 'R') => Some(GameInput::Restart),
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(GameInput::Quit),
        _ => None,
    }
}
