use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::snake::Cell;

/// Side length, in cells, of the square board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub side: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.side) * usize::from(self.side)
    }
}

/// Default board side length.
pub const DEFAULT_GRID_SIZE: u16 = 12;

/// Default head position for a new game.
pub const DEFAULT_START_CELL: Cell = Cell::new(5, 5);

/// Tick interval at game start, in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 500;

/// Floor for the tick interval, in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 20;

/// Multiplier applied to the tick interval on every growth event.
pub const SPEED_UP_FACTOR: f64 = 0.75;

/// Score awarded per food eaten.
pub const POINTS_PER_FOOD: u32 = 1;

/// Tunable parameters for one game.
///
/// Every field falls back to its default when absent from a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub grid_size: u16,
    pub start: Cell,
    pub initial_tick_interval_ms: u64,
    pub min_tick_interval_ms: u64,
    pub speed_up_factor: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            start: DEFAULT_START_CELL,
            initial_tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            min_tick_interval_ms: MIN_TICK_INTERVAL_MS,
            speed_up_factor: SPEED_UP_FACTOR,
        }
    }
}

impl GameConfig {
    /// Parses a JSON config file.
    ///
    /// The result is not validated, so later layers (CLI flags) can still
    /// adjust it; call [`GameConfig::validate`] on the final value.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Moves a start cell that lies off the board to the board centre.
    ///
    /// Returns the discarded start cell, if any. Grids below the minimum
    /// size are left for [`GameConfig::validate`] to reject.
    pub fn recentre_start(&mut self) -> Option<Cell> {
        if self.grid_size < 2 || self.start.is_within_bounds(self.bounds()) {
            return None;
        }

        let centre = i32::from(self.grid_size / 2);
        let previous = self.start;
        self.start = Cell::new(centre, centre);
        Some(previous)
    }

    /// Checks that the parameters describe a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 2 {
            return Err(ConfigError::GridTooSmall(self.grid_size));
        }

        if !self.start.is_within_bounds(self.bounds()) {
            return Err(ConfigError::StartOutOfBounds {
                col: self.start.col,
                row: self.start.row,
                grid_size: self.grid_size,
            });
        }

        if self.min_tick_interval_ms == 0 {
            return Err(ConfigError::ZeroMinimumInterval);
        }

        if self.initial_tick_interval_ms < self.min_tick_interval_ms {
            return Err(ConfigError::IntervalBelowMinimum {
                initial_ms: self.initial_tick_interval_ms,
                min_ms: self.min_tick_interval_ms,
            });
        }

        if !(self.speed_up_factor > 0.0 && self.speed_up_factor <= 1.0) {
            return Err(ConfigError::InvalidSpeedUpFactor(self.speed_up_factor));
        }

        Ok(())
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        GridSize {
            side: self.grid_size,
        }
    }

    #[must_use]
    pub fn initial_tick_interval(&self) -> Duration {
        Duration::from_millis(self.initial_tick_interval_ms)
    }

    #[must_use]
    pub fn min_tick_interval(&self) -> Duration {
        Duration::from_millis(self.min_tick_interval_ms)
    }

    /// Interval that follows `current` after one growth event.
    #[must_use]
    pub fn sped_up_interval(&self, current: Duration) -> Duration {
        current
            .mul_f64(self.speed_up_factor)
            .max(self.min_tick_interval())
    }
}
