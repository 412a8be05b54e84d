use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Block;

use crate::config::{FRAME_SET, GLYPH_HALF_UPPER, GRID_CELLS_PER_SIDE, Theme};
use crate::game::GameState;
use crate::geometry::{CellKind, Coordinate, cells, classify_cell};
use crate::ui::hud::render_hud;
use crate::ui::menu::render_game_over_menu;

/// Terminal rows needed for the grid; two grid rows share one terminal row.
const GRID_TERMINAL_ROWS: u16 = GRID_CELLS_PER_SIDE.div_ceil(2);

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, theme: &Theme) {
    let area = frame.area();
    let play_area = render_hud(frame, area, state, theme);

    let board = centered_board(play_area);
    let block = Block::bordered()
        .border_set(FRAME_SET)
        .border_style(Style::new().fg(theme.frame_fg));

    let inner = block.inner(board);
    frame.render_widget(block, board);

    render_grid(frame.buffer_mut(), inner, state, theme);

    if state.is_game_over() {
        render_game_over_menu(frame, play_area, state.score, theme);
    }
}

fn centered_board(area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(GRID_TERMINAL_ROWS + 2)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::horizontal([Constraint::Length(GRID_CELLS_PER_SIDE + 2)])
        .flex(Flex::Center)
        .areas(row);
    board
}

/// Paints every grid cell as half a terminal character.
///
/// Even grid rows take the upper half (glyph foreground) and odd rows the
/// lower half (background) of terminal row `y / 2`.
fn render_grid(buffer: &mut Buffer, inner: Rect, state: &GameState, theme: &Theme) {
    for cell in cells() {
        let (Ok(column), Ok(row)) = (u16::try_from(cell.x), u16::try_from(cell.y / 2)) else {
            continue;
        };
        let (Some(tx), Some(ty)) = (
            offset_within(inner.x, column, inner.right()),
            offset_within(inner.y, row, inner.bottom()),
        ) else {
            continue;
        };

        let color = cell_color(state, cell, theme);
        let target = &mut buffer[(tx, ty)];
        if cell.y % 2 == 0 {
            target.set_symbol(GLYPH_HALF_UPPER).set_fg(color);
        } else {
            target.set_bg(color);
        }
    }
}

fn offset_within(origin: u16, offset: u16, limit: u16) -> Option<u16> {
    let value = origin.saturating_add(offset);
    (value < limit).then_some(value)
}

fn cell_color(state: &GameState, cell: Coordinate, theme: &Theme) -> Color {
    let kind = classify_cell(
        cell.x,
        cell.y,
        state.segments(),
        state.food,
        state.is_game_over(),
    );
    kind_color(kind, theme)
}

fn kind_color(kind: CellKind, theme: &Theme) -> Color {
    match kind {
        CellKind::Border => theme.border,
        CellKind::Snake => theme.snake,
        CellKind::Food => theme.food,
        CellKind::Hit => theme.hit,
        CellKind::Plain => theme.plain,
    }
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::style::Color;

    use crate::config::{GLYPH_HALF_UPPER, GRID_CELLS_PER_SIDE, THEME_CLASSIC};
    use crate::game::GameState;
    use crate::geometry::Coordinate;
    use crate::input::Direction;

    use super::{render, render_grid};

    fn sample_state() -> GameState {
        GameState::from_parts(
            Coordinate::new(4, 2),
            [Coordinate::new(3, 2)],
            Direction::Right,
            Coordinate::new(6, 3),
            0,
        )
    }

    #[test]
    fn grid_composites_two_rows_per_terminal_row() {
        let area = Rect::new(0, 0, 60, 30);
        let mut buffer = Buffer::empty(area);
        let theme = &THEME_CLASSIC;

        render_grid(&mut buffer, area, &sample_state(), theme);

        let border_corner = &buffer[(0, 0)];
        assert_eq!(border_corner.symbol(), GLYPH_HALF_UPPER);
        assert_eq!(border_corner.fg, theme.border);
        assert_eq!(border_corner.bg, theme.border);

        // Grid rows 2 and 3 share terminal row 1.
        let head = &buffer[(4, 1)];
        assert_eq!(head.fg, theme.snake);
        assert_eq!(head.bg, theme.plain);

        let food = &buffer[(6, 1)];
        assert_eq!(food.fg, theme.plain);
        assert_eq!(food.bg, theme.food);
    }

    #[test]
    fn fatal_head_uses_hit_color_after_game_over() {
        let area = Rect::new(0, 0, 60, 30);
        let mut buffer = Buffer::empty(area);
        let mut state = sample_state();
        state.status.is_game_over = true;

        render_grid(&mut buffer, area, &state, &THEME_CLASSIC);

        assert_eq!(buffer[(4, 1)].fg, THEME_CLASSIC.hit);
        assert_eq!(buffer[(3, 1)].fg, THEME_CLASSIC.snake);
    }

    #[test]
    fn last_grid_row_has_no_lower_half() {
        let area = Rect::new(0, 0, 60, 30);
        let mut buffer = Buffer::empty(area);

        render_grid(&mut buffer, area, &sample_state(), &THEME_CLASSIC);

        let bottom = &buffer[(10, 25)];
        assert_eq!(bottom.fg, THEME_CLASSIC.border);
        assert_eq!(bottom.bg, Color::Reset);
    }

    #[test]
    fn every_terminal_cell_of_the_grid_is_painted() {
        let area = Rect::new(0, 0, 60, 30);
        let mut buffer = Buffer::empty(area);

        render_grid(&mut buffer, area, &sample_state(), &THEME_CLASSIC);

        for ty in 0..GRID_CELLS_PER_SIDE.div_ceil(2) {
            for tx in 0..GRID_CELLS_PER_SIDE {
                assert_eq!(buffer[(tx, ty)].symbol(), GLYPH_HALF_UPPER);
            }
        }
        assert_eq!(buffer[(GRID_CELLS_PER_SIDE, 0)].symbol(), " ");
    }

    #[test]
    fn full_frame_renders_without_panicking() {
        let backend = TestBackend::new(80, 40);
        let mut terminal = Terminal::new(backend).expect("test terminal should build");
        let mut state = sample_state();

        terminal
            .draw(|frame| render(frame, &state, &THEME_CLASSIC))
            .expect("running frame should draw");

        state.status.is_game_over = true;
        terminal
            .draw(|frame| render(frame, &state, &THEME_CLASSIC))
            .expect("game over frame should draw");
    }
}
