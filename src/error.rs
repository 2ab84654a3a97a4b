use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reasons a [`GameConfig`](crate::config::GameConfig) cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid size must be at least 2, got {0}")]
    GridTooSmall(u16),

    #[error("start cell ({col}, {row}) lies outside a {grid_size}x{grid_size} grid")]
    StartOutOfBounds { col: i32, row: i32, grid_size: u16 },

    #[error("minimum tick interval must be at least 1 ms")]
    ZeroMinimumInterval,

    #[error("initial tick interval of {initial_ms} ms is below the minimum of {min_ms} ms")]
    IntervalBelowMinimum { initial_ms: u64, min_ms: u64 },

    #[error("speed-up factor must lie in (0, 1], got {0}")]
    InvalidSpeedUpFactor(f64),

    #[error("failed to read config file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<ConfigError> for io::Error {
    fn from(error: ConfigError) -> Self {
        let kind = match &error {
            ConfigError::Read { source, .. } => source.kind(),
            _ => io::ErrorKind::InvalidInput,
        };
        io::Error::new(kind, error)
    }
}
