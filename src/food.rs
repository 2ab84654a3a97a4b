use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::config::GridSize;
use crate::snake::{Cell, Snake};

/// Random draws tried before falling back to enumerating free cells.
pub const MAX_SPAWN_ATTEMPTS: u32 = 256;

/// Cosmetic food appearance. Has no effect on the simulation.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodVariant {
    Steak,
    Banana,
    Taco,
    Mango,
    #[default]
    Rat,
}

impl FoodVariant {
    pub const ALL: [Self; 5] = [
        Self::Steak,
        Self::Banana,
        Self::Taco,
        Self::Mango,
        Self::Rat,
    ];

    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Steak => "🥩",
            Self::Banana => "🍌",
            Self::Taco => "🌮",
            Self::Mango => "🥭",
            Self::Rat => "🐀",
        }
    }

    #[must_use]
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL.choose(rng).copied().unwrap_or_default()
    }
}

/// The single food item on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub cell: Cell,
    pub variant: FoodVariant,
}

impl Food {
    /// Creates food at `cell` with the default variant.
    #[must_use]
    pub fn new(cell: Cell) -> Self {
        Self {
            cell,
            variant: FoodVariant::default(),
        }
    }

    /// Spawns food with a random variant in an unoccupied cell.
    ///
    /// Returns `None` when the snake covers the whole board.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, snake: &Snake) -> Option<Self> {
        let cell = spawn_cell(rng, bounds, snake)?;
        Some(Self {
            cell,
            variant: FoodVariant::random(rng),
        })
    }
}

/// Picks a uniformly random cell that the snake does not occupy.
///
/// Rejection sampling is tried first; a crowded board falls back to an
/// exhaustive scan so the call always terminates.
#[must_use]
pub fn spawn_cell<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, snake: &Snake) -> Option<Cell> {
    if snake.len() >= bounds.total_cells() {
        return None;
    }

    let side = i32::from(bounds.side);
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let cell = Cell::new(rng.gen_range(0..side), rng.gen_range(0..side));
        if !snake.occupies(cell) {
            return Some(cell);
        }
    }

    let free: Vec<Cell> = (0..side)
        .flat_map(|row| (0..side).map(move |col| Cell::new(col, row)))
        .filter(|cell| !snake.occupies(*cell))
        .collect();

    free.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{Food, FoodVariant, spawn_cell};
    use crate::config::GridSize;
    use crate::snake::{Cell, Snake};

    #[test]
    fn food_spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = Snake::from_segments(vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)]);

        for _ in 0..100 {
            let cell = spawn_cell(&mut rng, GridSize { side: 4 }, &snake)
                .expect("a 4x4 board has free cells");
            assert!(!snake.occupies(cell));
            assert!(cell.is_within_bounds(GridSize { side: 4 }));
        }
    }

    #[test]
    fn last_free_cell_is_found() {
        let mut rng = StdRng::seed_from_u64(11);
        let snake = Snake::from_segments(vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)]);

        let cell = spawn_cell(&mut rng, GridSize { side: 2 }, &snake);

        assert_eq!(cell, Some(Cell::new(0, 1)));
    }

    #[test]
    fn full_board_yields_no_food() {
        let mut rng = StdRng::seed_from_u64(13);
        let snake = Snake::from_segments(vec![
            Cell::new(0, 0),
            Cell::new(1, 0),
            Cell::new(1, 1),
            Cell::new(0, 1),
        ]);

        assert!(Food::spawn(&mut rng, GridSize { side: 2 }, &snake).is_none());
    }

    #[test]
    fn every_variant_has_a_glyph() {
        for variant in FoodVariant::ALL {
            assert!(!variant.glyph().is_empty());
        }
        assert_eq!(Food::new(Cell::new(2, 5)).variant, FoodVariant::Rat);
    }
}
