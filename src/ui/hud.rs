use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::game::Snapshot;
use crate::renderer::Theme;

/// Renders the one-line HUD and returns the remaining board area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot, theme: &Theme) -> Rect {
    let [board_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(hud_line(snapshot))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.hud)),
        hud_area,
    );

    board_area
}

fn hud_line(snapshot: &Snapshot) -> Line<'static> {
    let value = Style::default().add_modifier(Modifier::BOLD);

    Line::from(vec![
        Span::styled(format!("Score {}", snapshot.score), value),
        Span::raw("  "),
        Span::raw(format!("Length {}", snapshot.snake_cells.len())),
        Span::raw("  "),
        Span::raw(format!("Tick {} ms", snapshot.tick_interval.as_millis())),
    ])
}
