use std::borrow::Cow;

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType};
use unicode_width::UnicodeWidthStr;

use crate::game::Snapshot;
use crate::snake::Cell;
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_start_menu};

/// Terminal columns per board cell; two columns make cells roughly square.
pub const CELL_WIDTH: u16 = 2;

const GLYPH_SNAKE_HEAD: &str = "██";
const GLYPH_SNAKE_BODY: &str = "▓▓";
const GLYPH_EMPTY: &str = " ·";
const GLYPH_FOOD_FALLBACK: &str = "<>";

/// Colors used for every visual element.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub grid: Color,
    pub border: Color,
    pub hud: Color,
}

pub const THEME: Theme = Theme {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    food: Color::Red,
    grid: Color::DarkGray,
    border: Color::Blue,
    hud: Color::White,
};

/// Renders the full game frame from a state snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot, awaiting_start: bool) {
    let area = frame.area();
    let board_area = render_hud(frame, area, snapshot, &THEME);
    let board = centered_board(board_area, snapshot.grid_size);

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(THEME.border))
        .title(" hungry snake ");
    let inner = block.inner(board);
    frame.render_widget(block, board);

    render_grid(frame, inner, snapshot.grid_size);
    render_food(frame, inner, snapshot);
    render_snake(frame, inner, snapshot);

    if awaiting_start {
        render_start_menu(frame, board);
    } else if snapshot.is_game_over {
        render_game_over_menu(frame, board, snapshot.score, snapshot.victory);
    }
}

fn centered_board(area: Rect, grid_size: u16) -> Rect {
    let width = grid_size.saturating_mul(CELL_WIDTH).saturating_add(2);
    let height = grid_size.saturating_add(2);

    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);

    board
}

fn render_grid(frame: &mut Frame<'_>, inner: Rect, grid_size: u16) {
    let style = Style::new().fg(THEME.grid);
    let buffer = frame.buffer_mut();
    let side = i32::from(grid_size);

    for row in 0..side {
        for col in 0..side {
            if let Some((x, y)) = cell_to_terminal(inner, Cell::new(col, row)) {
                buffer.set_string(x, y, GLYPH_EMPTY, style);
            }
        }
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot) {
    let Some((x, y)) = cell_to_terminal(inner, snapshot.food_cell) else {
        return;
    };

    let glyph = fit_to_cell(snapshot.food_variant.glyph());
    frame
        .buffer_mut()
        .set_string(x, y, glyph, Style::new().fg(THEME.food));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot) {
    let buffer = frame.buffer_mut();
    let body_style = Style::new().fg(THEME.snake_body);
    let head_style = Style::new()
        .fg(THEME.snake_head)
        .add_modifier(Modifier::BOLD);

    for (index, cell) in snapshot.snake_cells.iter().enumerate() {
        let Some((x, y)) = cell_to_terminal(inner, *cell) else {
            continue;
        };

        if index == 0 {
            buffer.set_string(x, y, GLYPH_SNAKE_HEAD, head_style);
        } else {
            buffer.set_string(x, y, GLYPH_SNAKE_BODY, body_style);
        }
    }
}

/// Pads or replaces `glyph` so it spans exactly one board cell.
fn fit_to_cell(glyph: &str) -> Cow<'_, str> {
    let cell_width = usize::from(CELL_WIDTH);
    match glyph.width() {
        width if width == cell_width => Cow::Borrowed(glyph),
        width if width < cell_width => {
            Cow::Owned(format!("{glyph}{}", " ".repeat(cell_width - width)))
        }
        _ => Cow::Borrowed(GLYPH_FOOD_FALLBACK),
    }
}

fn cell_to_terminal(inner: Rect, cell: Cell) -> Option<(u16, u16)> {
    let col = u16::try_from(cell.col).ok()?;
    let row = u16::try_from(cell.row).ok()?;

    let x = inner.x.saturating_add(col.saturating_mul(CELL_WIDTH));
    let y = inner.y.saturating_add(row);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
