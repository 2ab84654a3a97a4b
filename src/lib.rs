//! Grid snake with a fixed-tick simulation core.
//!
//! [`game::GameState`] holds the rules, [`clock::SimulationClock`] decides
//! when a tick is due, and [`session::GameSession`] wires the two together.
//! The terminal front-end (`renderer`, `ui`, `terminal_runtime`) only reads
//! [`game::Snapshot`]s.

pub mod clock;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod session;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
