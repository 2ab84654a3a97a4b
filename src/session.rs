use std::time::{Duration, Instant};

use log::info;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::clock::SimulationClock;
use crate::config::GameConfig;
use crate::game::{GameState, Snapshot, TickOutcome};
use crate::input::{Direction, GameInput};

/// Owns one game and the clock that drives it.
///
/// The first game waits for a start confirmation; later games start as soon
/// as they are created by [`GameSession::restart`].
#[derive(Debug)]
pub struct GameSession {
    state: GameState,
    clock: SimulationClock,
    config: GameConfig,
    seeds: StdRng,
    games_started: u32,
}

impl GameSession {
    /// Creates a session; with `seed` every game it produces is reproducible.
    #[must_use]
    pub fn new(config: GameConfig, seed: Option<u64>) -> Self {
        let mut seeds = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let state = GameState::new_with_seed(config.clone(), seeds.next_u64());

        Self {
            state,
            clock: SimulationClock::new(),
            config,
            seeds,
            games_started: 0,
        }
    }

    /// Starts the clock for the current game if it has not run yet.
    pub fn start(&mut self, now: Instant) {
        if self.is_awaiting_start() {
            self.games_started += 1;
            self.clock.start(self.state.tick_interval(), now);
            info!(
                "game {} started on a {}x{} grid",
                self.games_started, self.config.grid_size, self.config.grid_size
            );
        }
    }

    /// Discards the current game and immediately starts a fresh one.
    pub fn restart(&mut self, now: Instant) {
        self.state = GameState::new_with_seed(self.config.clone(), self.seeds.next_u64());
        self.clock.stop();
        self.start(now);
    }

    /// Advances the game if the clock says a tick is due.
    ///
    /// Returns the tick outcome when a tick ran.
    pub fn tick(&mut self, now: Instant) -> Option<TickOutcome> {
        if !self.clock.poll(now) {
            return None;
        }

        let outcome = self.state.advance();
        if outcome.ended {
            self.clock.stop();
        } else if let Some(interval) = outcome.new_interval {
            self.clock.reschedule(interval, now);
        }

        Some(outcome)
    }

    /// Steers the snake. Ignored unless the clock is running.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.clock.is_running() {
            self.state.set_direction(direction);
        }
    }

    /// Applies one input event. Returns `false` when the player asked to quit.
    pub fn apply_input(&mut self, input: GameInput, now: Instant) -> bool {
        match input {
            GameInput::Quit => return false,
            GameInput::Confirm if self.is_awaiting_start() => self.start(now),
            GameInput::Confirm if self.state.is_game_over() => self.restart(now),
            GameInput::Confirm => {}
            GameInput::Direction(direction) => self.set_direction(direction),
        }

        true
    }

    /// True before the current game's first tick has been scheduled.
    #[must_use]
    pub fn is_awaiting_start(&self) -> bool {
        !self.clock.is_running() && !self.state.is_game_over() && self.state.tick_count == 0
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    #[must_use]
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.clock.time_until_next_tick(now)
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for scripted scenarios.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    #[must_use]
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::GameSession;
    use crate::config::GameConfig;
    use crate::food::Food;
    use crate::input::{Direction, GameInput};
    use crate::snake::{Cell, Snake};

    fn session() -> GameSession {
        GameSession::new(GameConfig::default(), Some(99))
    }

    #[test]
    fn nothing_ticks_before_start() {
        let mut session = session();
        let now = Instant::now();

        assert!(session.is_awaiting_start());
        assert_eq!(session.tick(now + Duration::from_secs(5)), None);
        assert_eq!(session.state().tick_count, 0);
    }

    #[test]
    fn direction_input_is_ignored_before_start() {
        let mut session = session();

        assert!(session.apply_input(GameInput::Direction(Direction::Up), Instant::now()));

        assert_eq!(session.state().direction, Direction::Right);
    }

    #[test]
    fn steering_takes_effect_only_while_running() {
        let mut session = session();
        let start = Instant::now();

        session.set_direction(Direction::Up);
        assert_eq!(session.state().direction, Direction::Right);

        session.start(start);
        session.set_direction(Direction::Up);
        assert_eq!(session.state().direction, Direction::Up);
    }

    #[test]
    fn growth_reschedules_the_clock() {
        let mut session = session();
        let start = Instant::now();
        session.state_mut().snake = Snake::new(Cell::new(5, 5));
        session.state_mut().food = Food::new(Cell::new(6, 5));
        session.apply_input(GameInput::Confirm, start);

        let tick_at = start + Duration::from_millis(500);
        let outcome = session.tick(tick_at).expect("tick should be due");

        assert!(outcome.grew);
        assert_eq!(session.clock().interval(), Some(Duration::from_millis(375)));
        assert_eq!(
            session.time_until_next_tick(tick_at),
            Some(Duration::from_millis(375))
        );
    }

    #[test]
    fn game_over_stops_the_clock_and_confirm_restarts() {
        let mut session = session();
        let start = Instant::now();
        session.state_mut().snake = Snake::new(Cell::new(11, 0));
        session.state_mut().food = Food::new(Cell::new(0, 11));
        session.start(start);

        let outcome = session
            .tick(start + Duration::from_millis(500))
            .expect("tick should be due");
        assert!(outcome.ended);
        assert!(!session.is_running());
        assert_eq!(session.tick(start + Duration::from_secs(10)), None);

        let later = start + Duration::from_secs(11);
        assert!(session.apply_input(GameInput::Confirm, later));
        assert!(session.is_running());
        assert!(!session.state().is_game_over());
        assert_eq!(session.state().snake.head(), Cell::new(5, 5));
        assert_eq!(
            session.clock().interval(),
            Some(Duration::from_millis(500))
        );
    }

    #[test]
    fn quit_is_reported() {
        let mut session = session();

        assert!(!session.apply_input(GameInput::Quit, Instant::now()));
    }

    #[test]
    fn seeded_sessions_are_reproducible() {
        let first = GameSession::new(GameConfig::default(), Some(5));
        let second = GameSession::new(GameConfig::default(), Some(5));

        assert_eq!(first.snapshot(), second.snapshot());
    }
}
