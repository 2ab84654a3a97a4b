use std::time::Duration;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::config::{GameConfig, GridSize, POINTS_PER_FOOD};
use crate::food::{Food, FoodVariant};
use crate::input::{Direction, direction_change_is_valid};
use crate::snake::{Cell, Snake};

/// What ended a lost game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Current high-level gameplay state.
///
/// Both `GameOver` and `Victory` are terminal.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver(DeathReason),
    /// The snake covers every cell; no food can spawn.
    Victory,
}

/// Result of one call to [`GameState::advance`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct TickOutcome {
    /// The game reached a terminal status on this tick.
    pub ended: bool,
    /// The snake ate and grew on this tick.
    pub grew: bool,
    /// New tick interval after a growth event; the clock should reschedule.
    pub new_interval: Option<Duration>,
}

/// Renderer-facing copy of the state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub grid_size: u16,
    pub snake_cells: Vec<Cell>,
    pub food_cell: Cell,
    pub food_variant: FoodVariant,
    pub is_game_over: bool,
    pub victory: bool,
    pub score: u32,
    pub tick_interval: Duration,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub direction: Direction,
    pub score: u32,
    pub status: GameStatus,
    pub tick_count: u64,
    tick_interval: Duration,
    config: GameConfig,
    rng: StdRng,
}

impl GameState {
    /// Creates a fresh game seeded from OS entropy.
    ///
    /// `config` is expected to have passed [`GameConfig::validate`].
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let mut state = Self {
            snake: Snake::new(config.start),
            food: Food::new(config.start),
            direction: Direction::Right,
            score: 0,
            status: GameStatus::Playing,
            tick_count: 0,
            tick_interval: config.initial_tick_interval(),
            config,
            rng,
        };

        if !state.spawn_food() {
            state.status = GameStatus::Victory;
        }

        state
    }

    /// Changes heading unless `requested` would reverse the snake onto itself.
    ///
    /// Takes effect on the next tick. Ignored once the game is over.
    pub fn set_direction(&mut self, requested: Direction) {
        if self.is_game_over() || !direction_change_is_valid(self.direction, requested) {
            return;
        }

        self.direction = requested;
    }

    /// Advances simulation by one gameplay tick.
    pub fn advance(&mut self) -> TickOutcome {
        if self.is_game_over() {
            return TickOutcome::default();
        }

        self.tick_count += 1;
        let new_head = self.snake.next_head(self.direction);

        if !new_head.is_within_bounds(self.bounds()) {
            return self.lose(DeathReason::WallCollision);
        }

        // The tail has not moved yet, so stepping onto it is fatal too.
        if self.snake.occupies(new_head) {
            return self.lose(DeathReason::SelfCollision);
        }

        self.snake.push_head(new_head);
        if new_head != self.food.cell {
            self.snake.pop_tail();
            return TickOutcome::default();
        }

        self.score += POINTS_PER_FOOD;
        self.tick_interval = self.config.sped_up_interval(self.tick_interval);
        debug!(
            "ate food at ({}, {}): length {}, score {}, interval {:?}",
            new_head.col,
            new_head.row,
            self.snake.len(),
            self.score,
            self.tick_interval
        );

        let ended = !self.spawn_food();
        if ended {
            self.status = GameStatus::Victory;
            info!("board filled after {} ticks, score {}", self.tick_count, self.score);
        }

        TickOutcome {
            ended,
            grew: true,
            new_interval: Some(self.tick_interval),
        }
    }

    /// Moves food to a random cell off the snake.
    ///
    /// Returns `false`, leaving food untouched, when no free cell remains.
    pub fn spawn_food(&mut self) -> bool {
        let bounds = self.bounds();
        match Food::spawn(&mut self.rng, bounds, &self.snake) {
            Some(food) => {
                self.food = food;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status != GameStatus::Playing
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.config.bounds()
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid_size: self.config.grid_size,
            snake_cells: self.snake.segments().copied().collect(),
            food_cell: self.food.cell,
            food_variant: self.food.variant,
            is_game_over: self.is_game_over(),
            victory: self.status == GameStatus::Victory,
            score: self.score,
            tick_interval: self.tick_interval,
        }
    }

    fn lose(&mut self, reason: DeathReason) -> TickOutcome {
        self.status = GameStatus::GameOver(reason);
        info!(
            "game over ({reason:?}) after {} ticks, score {}",
            self.tick_count, self.score
        );

        TickOutcome {
            ended: true,
            ..TickOutcome::default()
        }
    }
}
