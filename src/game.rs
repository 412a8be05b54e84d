use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::GRID_SIZE;
use crate::geometry::{Coordinate, is_occupied_by_snake, is_same_position, random_coordinate};
use crate::input::{Direction, ParseDirectionError};

/// Buffered direction plus the terminal flag.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameStatus {
    pub direction: Direction,
    pub is_game_over: bool,
}

/// Complete game state for one session.
///
/// The snake body is ordered head first. It can only be built from an
/// explicit head, so it is never empty.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct GameState {
    pub status: GameStatus,
    snake: VecDeque<Coordinate>,
    pub food: Coordinate,
    pub score: u32,
}

/// The three state transitions.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Action {
    /// Replaces the buffered direction; the snake does not move.
    ChangeDirection(Direction),
    /// Advances the head one cell, growing when the head sits on food.
    Move,
    /// Freezes the game.
    GameOver,
}

impl Action {
    /// Returns the canonical kind name used by [`RawAction`].
    #[must_use]
    pub fn kind(self) -> &'static str {
        match self {
            Self::ChangeDirection(_) => "change-direction",
            Self::Move => "move",
            Self::GameOver => "game-over",
        }
    }
}

/// Untyped action envelope, as read from replay files.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RawAction {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
}

impl RawAction {
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            direction: None,
        }
    }

    #[must_use]
    pub fn change_direction(direction: impl Into<String>) -> Self {
        Self {
            kind: "change-direction".to_owned(),
            direction: Some(direction.into()),
        }
    }

    /// Resolves the envelope into a typed action.
    ///
    /// The upper-case tags `SNAKE_CHANGE_DIRECTION`, `SNAKE_MOVE` and
    /// `GAME_OVER` are accepted as synonyms.
    pub fn resolve(&self) -> Result<Action, GameError> {
        match self.kind.as_str() {
            "change-direction" | "SNAKE_CHANGE_DIRECTION" => {
                let raw = self
                    .direction
                    .as_deref()
                    .ok_or(GameError::MissingDirection)?;
                Ok(Action::ChangeDirection(raw.parse()?))
            }
            "move" | "SNAKE_MOVE" => Ok(Action::Move),
            "game-over" | "GAME_OVER" => Ok(Action::GameOver),
            other => Err(GameError::InvalidAction(other.to_owned())),
        }
    }
}

/// Failures of the untyped dispatch path. All typed transitions succeed.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum GameError {
    #[error("invalid action kind `{0}`")]
    InvalidAction(String),
    #[error("change-direction action carries no direction")]
    MissingDirection,
    #[error(transparent)]
    InvalidDirection(#[from] ParseDirectionError),
}

impl GameState {
    /// Starts a game with a random one-cell snake heading right and random food.
    #[must_use]
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let head = random_coordinate(rng);
        let food = random_coordinate(rng);
        Self::from_parts(head, [], Direction::Right, food, 0)
    }

    /// Builds a running state from a head and the segments behind it.
    #[must_use]
    pub fn from_parts(
        head: Coordinate,
        rest: impl IntoIterator<Item = Coordinate>,
        direction: Direction,
        food: Coordinate,
        score: u32,
    ) -> Self {
        let mut snake = VecDeque::from([head]);
        snake.extend(rest);

        Self {
            status: GameStatus {
                direction,
                is_game_over: false,
            },
            snake,
            food,
            score,
        }
    }

    #[must_use]
    pub fn head(&self) -> Coordinate {
        *self
            .snake
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Coordinate> {
        self.snake.iter()
    }

    /// Body without the head.
    pub fn tail(&self) -> impl Iterator<Item = &Coordinate> {
        self.snake.iter().skip(1)
    }

    #[must_use]
    pub fn snake_len(&self) -> usize {
        self.snake_len()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status.is_game_over
    }

    /// Applies one transition.
    ///
    /// No guard rejects a reversal into the neck, and `Move` is still honored
    /// after game over. Stopping the ticker is the owning session's job.
    pub fn apply<R: Rng + ?Sized>(&mut self, action: Action, rng: &mut R) {
        match action {
            Action::ChangeDirection(direction) => self.status.direction = direction,
            Action::Move => self.advance(rng),
            Action::GameOver => self.status.is_game_over = true,
        }
    }

    /// Resolves and applies an untyped action.
    ///
    /// The state is left untouched when resolution fails.
    pub fn dispatch<R: Rng + ?Sized>(
        &mut self,
        raw: &RawAction,
        rng: &mut R,
    ) -> Result<Action, GameError> {
        let action = raw.resolve()?;
        self.apply(action, rng);
        Ok(action)
    }

    fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let is_eating = self.is_snake_eating();
        let new_head = self.status.direction.displace(self.head());

        self.snake.push_front(new_head);
        if is_eating {
            self.food = random_coordinate(rng);
            self.score += 1;
        } else {
            let _ = self.snake.pop_back();
        }
    }

    /// True when the head currently sits on the food.
    #[must_use]
    pub fn is_snake_eating(&self) -> bool {
        let head = self.head();
        is_same_position(head.x, head.y, self.food.x, self.food.y)
    }

    /// True when the head sits on or past the border ring.
    #[must_use]
    pub fn is_snake_outside(&self) -> bool {
        let head = self.head();
        head.x >= GRID_SIZE || head.y >= GRID_SIZE || head.x <= 0 || head.y <= 0
    }

    #[must_use]
    pub fn does_snake_hit_itself(&self) -> bool {
        let head = self.head();
        is_occupied_by_snake(head.x, head.y, self.tail())
    }
}

/// Chooses the action for one tick from the current state.
///
/// Lethal conditions are checked against the head as it is now, not where it
/// is about to go, so a fatal cell is reported one tick after it is entered.
#[must_use]
pub fn decide_tick(state: &GameState) -> Action {
    if state.is_snake_outside() || state.does_snake_hit_itself() {
        Action::GameOver
    } else {
        Action::Move
    }
}
