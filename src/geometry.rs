use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GRID_SIZE;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Draws a coordinate strictly inside the border ring.
///
/// Both axes are uniform over `1..=GRID_SIZE - 1`.
#[must_use]
pub fn random_coordinate<R: Rng + ?Sized>(rng: &mut R) -> Coordinate {
    Coordinate {
        x: rng.gen_range(1..GRID_SIZE),
        y: rng.gen_range(1..GRID_SIZE),
    }
}

/// Returns true for cells on the outermost ring of the grid.
#[must_use]
pub fn is_border(x: i32, y: i32) -> bool {
    x == 0 || y == 0 || x == GRID_SIZE || y == GRID_SIZE
}

#[must_use]
pub fn is_same_position(x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
    x1 == x2 && y1 == y2
}

/// Returns true when any of `snake_coordinates` sits on `(x, y)`.
#[must_use]
pub fn is_occupied_by_snake<'a>(
    x: i32,
    y: i32,
    snake_coordinates: impl IntoIterator<Item = &'a Coordinate>,
) -> bool {
    snake_coordinates
        .into_iter()
        .any(|coordinate| is_same_position(coordinate.x, coordinate.y, x, y))
}

/// Visual classification of one grid cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CellKind {
    Border,
    Snake,
    Food,
    /// The head cell after the game has ended.
    Hit,
    Plain,
}

/// Classifies `(x, y)` for display. `snake` is ordered head first.
///
/// Several predicates can hold for the same cell; the most specific wins:
/// hit, then snake, then food, then border.
#[must_use]
pub fn classify_cell<'a>(
    x: i32,
    y: i32,
    snake: impl IntoIterator<Item = &'a Coordinate>,
    food: Coordinate,
    is_game_over: bool,
) -> CellKind {
    let mut segments = snake.into_iter().peekable();
    let is_hit = is_game_over
        && segments
            .peek()
            .is_some_and(|head| is_same_position(x, y, head.x, head.y));

    if is_hit {
        CellKind::Hit
    } else if is_occupied_by_snake(x, y, segments) {
        CellKind::Snake
    } else if is_same_position(x, y, food.x, food.y) {
        CellKind::Food
    } else if is_border(x, y) {
        CellKind::Border
    } else {
        CellKind::Plain
    }
}

/// Iterates every coordinate of the grid row by row, border included.
pub fn cells() -> impl Iterator<Item = Coordinate> {
    (0..=GRID_SIZE).flat_map(|y| (0..=GRID_SIZE).map(move |x| Coordinate { x, y }))
}
