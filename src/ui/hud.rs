use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::game::GameState;

const HUD_MARGIN_X: u16 = 1;

/// Renders the two-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState, theme: &Theme) -> Rect {
    let [play_area, score_area, help_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(score_line(state.score, state.snake_len(), theme))
            .alignment(Alignment::Right),
        inset_horizontal(score_area, HUD_MARGIN_X),
    );

    frame.render_widget(
        Paragraph::new(Line::from("arrows steer  [Q] quit"))
            .alignment(Alignment::Left)
            .style(Style::default().fg(Color::DarkGray)),
        inset_horizontal(help_area, HUD_MARGIN_X),
    );

    play_area
}

fn score_line(score: u32, length: usize, theme: &Theme) -> Line<'static> {
    let muted = Style::default().fg(Color::DarkGray);
    let value = Style::default()
        .fg(theme.hud_score)
        .add_modifier(Modifier::BOLD);

    Line::from(vec![
        Span::styled("Length ", muted),
        Span::styled(length.to_string(), value),
        Span::styled("  Score ", muted),
        Span::styled(score.to_string(), value),
    ])
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let total_margin = margin.saturating_mul(2);
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(total_margin),
        height: area.height,
    }
}
