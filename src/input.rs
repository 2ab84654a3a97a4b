use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit `(col, row)` offset; rows grow downwards.
    #[must_use]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Confirm,
    Quit,
}

/// Minimum gesture length, in the caller's units, before a drag counts as a swipe.
pub const MIN_DRAG_DISTANCE: f32 = 10.0;

/// Minimum terminal mouse drag, measured in board cells.
const MIN_MOUSE_DRAG_CELLS: f32 = 1.0;

/// Terminal columns per board cell; horizontal mouse deltas are scaled by this.
const COLUMNS_PER_CELL: f32 = 2.0;

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Resolves a drag vector into one direction by axis dominance.
///
/// Drags shorter than `min_distance` resolve to nothing. Screen coordinates
/// are assumed, so a positive `dy` points down.
#[must_use]
pub fn direction_from_drag(dx: f32, dy: f32, min_distance: f32) -> Option<Direction> {
    if dx.hypot(dy) < min_distance || (dx == 0.0 && dy == 0.0) {
        return None;
    }

    if dx.abs() > dy.abs() {
        Some(if dx > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else {
        Some(if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        })
    }
}

/// Translates terminal events into [`GameInput`]s.
///
/// Mouse presses and releases are paired into one swipe per gesture.
#[derive(Debug, Default)]
pub struct InputHandler {
    drag_origin: Option<(u16, u16)>,
}

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits up to `timeout` for one terminal event and translates it.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        Ok(self.handle_event(event::read()?))
    }

    /// Translates one already-read terminal event.
    pub fn handle_event(&mut self, event: Event) -> Option<GameInput> {
        match event {
            Event::Key(key) => handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => None,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<GameInput> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag_origin = Some((mouse.column, mouse.row));
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let (start_col, start_row) = self.drag_origin.take()?;
                let dx = (f32::from(mouse.column) - f32::from(start_col)) / COLUMNS_PER_CELL;
                let dy = f32::from(mouse.row) - f32::from(start_row);
                direction_from_drag(dx, dy, MIN_MOUSE_DRAG_CELLS).map(GameInput::Direction)
            }
            _ => None,
        }
    }
}

fn handle_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => GameInput::Direction(Direction::Right),
        KeyCode::Enter | KeyCode::Char(' ') => GameInput::Confirm,
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}
