use std::time::{Duration, Instant};

use hungry_snake::config::GameConfig;
use hungry_snake::food::Food;
use hungry_snake::game::{DeathReason, GameState, GameStatus};
use hungry_snake::input::{Direction, GameInput};
use hungry_snake::session::GameSession;
use hungry_snake::snake::{Cell, Snake};

fn fresh_state(seed: u64) -> GameState {
    GameState::new_with_seed(GameConfig::default(), seed)
}

#[test]
fn eating_adjacent_food_grows_and_respawns() {
    let mut state = fresh_state(42);
    state.snake = Snake::new(Cell::new(5, 5));
    state.food = Food::new(Cell::new(6, 5));

    let outcome = state.advance();

    assert!(outcome.grew);
    assert!(!outcome.ended);
    assert!(!state.is_game_over());
    assert_eq!(state.score, 1);
    assert_eq!(state.snake.head(), Cell::new(6, 5));
    assert_eq!(
        state.snapshot().snake_cells,
        vec![Cell::new(6, 5), Cell::new(5, 5)]
    );
    assert_ne!(state.food.cell, Cell::new(6, 5));
    assert!(!state.snake.occupies(state.food.cell));
}

#[test]
fn moving_without_food_keeps_length() {
    let mut state = fresh_state(42);
    state.snake = Snake::new(Cell::new(5, 5));
    state.food = Food::new(Cell::new(2, 5));

    let outcome = state.advance();

    assert!(!outcome.grew);
    assert!(!state.is_game_over());
    assert_eq!(state.snapshot().snake_cells, vec![Cell::new(6, 5)]);
    assert_eq!(state.score, 0);
}

#[test]
fn left_wall_ends_game_and_freezes_state() {
    let mut state = fresh_state(7);
    state.snake = Snake::from_segments(vec![Cell::new(0, 4), Cell::new(0, 5)]);
    state.food = Food::new(Cell::new(9, 9));
    state.direction = Direction::Up;
    state.set_direction(Direction::Left);

    state.advance();
    assert_eq!(
        state.status,
        GameStatus::GameOver(DeathReason::WallCollision)
    );

    let frozen = state.snapshot();
    for _ in 0..5 {
        state.advance();
        state.set_direction(Direction::Down);
    }
    assert_eq!(state.snapshot(), frozen);
}

#[test]
fn stepwise_food_collection_and_wall_collision() {
    let config = GameConfig {
        grid_size: 6,
        start: Cell::new(1, 1),
        ..GameConfig::default()
    };
    let mut state = GameState::new_with_seed(config, 42);
    state.food = Food::new(Cell::new(2, 1));

    state.advance();
    assert_eq!(state.status, GameStatus::Playing);
    assert_eq!(state.score, 1);
    assert_eq!(state.snake.len(), 2);

    state.set_direction(Direction::Up);
    state.food = Food::new(Cell::new(5, 5));
    state.advance();
    assert_eq!(state.status, GameStatus::Playing);
    assert_eq!(state.snake.head(), Cell::new(2, 0));

    state.advance();
    assert_eq!(
        state.status,
        GameStatus::GameOver(DeathReason::WallCollision)
    );
}

#[test]
fn session_drives_game_to_completion_on_the_clock() {
    let config = GameConfig {
        grid_size: 4,
        start: Cell::new(0, 0),
        initial_tick_interval_ms: 100,
        ..GameConfig::default()
    };
    let mut session = GameSession::new(config, Some(3));
    session.state_mut().food = Food::new(Cell::new(3, 3));
    let start = Instant::now();
    session.apply_input(GameInput::Confirm, start);

    let mut now = start;
    let mut ticks = 0;
    while session.is_running() {
        now += Duration::from_millis(100);
        if session.tick(now).is_some() {
            ticks += 1;
        }
        assert!(ticks <= 4, "snake should hit the wall within four ticks");
    }

    assert_eq!(ticks, 4);
    assert!(session.snapshot().is_game_over);
    assert_eq!(session.tick(now + Duration::from_secs(1)), None);
}
