use ratatui::style::Color;
use ratatui::symbols::border;

/// Largest coordinate on either axis. The grid spans `0..=GRID_SIZE`.
pub const GRID_SIZE: i32 = 50;

/// Number of cells along one side of the grid, border ring included.
pub const GRID_CELLS_PER_SIDE: u16 = GRID_SIZE as u16 + 1;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;

/// Minimum tick interval accepted from the command line.
pub const MIN_TICK_INTERVAL_MS: u64 = 60;

/// Colors applied to every visual element.
///
/// Cells are drawn as solid half blocks, so each cell field is the color of
/// one half of a terminal character.
#[derive(Debug)]
pub struct Theme {
    pub name: &'static str,
    pub border: Color,
    pub snake: Color,
    pub food: Color,
    /// Head cell once the game is over.
    pub hit: Color,
    pub plain: Color,
    pub frame_fg: Color,
    pub hud_score: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

pub const THEME_CLASSIC: Theme = Theme {
    name: "Classic",
    border: Color::DarkGray,
    snake: Color::Green,
    food: Color::Yellow,
    hit: Color::Red,
    plain: Color::Black,
    frame_fg: Color::White,
    hud_score: Color::White,
    menu_title: Color::Red,
    menu_footer: Color::DarkGray,
};

/// Plain frame around the play area; the grid draws its own border ring.
pub const FRAME_SET: border::Set = border::ROUNDED;

/// Upper half-block glyph for compositing two grid rows into one terminal row.
pub const GLYPH_HALF_UPPER: &str = "▀";
