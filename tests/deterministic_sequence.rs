use std::time::Duration;

use tile_snake::config::EngineConfig;
use tile_snake::game::{GameEvent, GameStatus, GridMovementEngine, OverReason};
use tile_snake::input::{Direction, GameInput};
use tile_snake::snake::GridCell;

const STEP: Duration = Duration::from_millis(150);
const FRAME: Duration = Duration::from_millis(50);

fn engine() -> GridMovementEngine {
    let config = EngineConfig {
        step_duration: STEP,
        ..EngineConfig::default()
    };
    GridMovementEngine::with_seed(config, 42).expect("default config is valid")
}

#[test]
fn frame_driven_play_eats_turns_and_hits_wall() {
    let mut engine = engine();
    assert!(engine.is_waiting_for_first_move());

    // Nothing moves until a direction arrives.
    for _ in 0..10 {
        engine.tick(FRAME);
    }
    assert_eq!(engine.snake().head(), GridCell::new(5, 6));

    engine.apply_input(GameInput::Direction(Direction::Right));
    engine.place_apple(GridCell::new(7, 6));

    // Three frames make one step.
    let mut events = Vec::new();
    for _ in 0..6 {
        events.extend(engine.tick(FRAME).events);
    }
    assert_eq!(engine.snake().head(), GridCell::new(7, 6));
    assert_eq!(engine.score(), 1);
    assert!(events.contains(&GameEvent::AppleEaten {
        cell: GridCell::new(7, 6),
        score: 1,
    }));

    engine.place_apple(GridCell::new(1, 15));
    engine.apply_input(GameInput::Direction(Direction::Up));
    for _ in 0..3 {
        engine.tick(FRAME);
    }
    assert_eq!(engine.snake().head(), GridCell::new(7, 5));
    assert_eq!(engine.snake().len(), 5);

    let mut frames = 0;
    while engine.status() == GameStatus::Running {
        engine.tick(FRAME);
        frames += 1;
        assert!(frames < 100, "snake should reach the top wall");
    }

    assert_eq!(engine.over_reason(), Some(OverReason::WallCollision));
    assert_eq!(engine.snake().head(), GridCell::new(7, 0));
    assert_eq!(engine.high_score(), 1);

    engine.apply_input(GameInput::Restart);
    assert_eq!(engine.status(), GameStatus::Running);
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.high_score(), 1);
    assert_eq!(engine.snake().len(), 4);
    assert_eq!(engine.apple(), GridCell::new(14, 6));
}

#[test]
fn pause_input_freezes_the_board() {
    let mut engine = engine();
    engine.apply_input(GameInput::Direction(Direction::Down));
    engine.tick(STEP);
    let head = engine.snake().head();

    engine.apply_input(GameInput::Pause);
    engine.apply_input(GameInput::Direction(Direction::Left));
    for _ in 0..20 {
        assert_eq!(engine.tick(FRAME).steps, 0);
    }
    assert_eq!(engine.snake().head(), head);

    engine.apply_input(GameInput::Pause);
    engine.tick(STEP);
    assert_eq!(engine.snake().head(), head.stepped(Direction::Left));
}

#[test]
fn same_seed_places_apples_identically() {
    let play = |seed| {
        let config = EngineConfig {
            step_duration: STEP,
            start_direction: Direction::Right,
            ..EngineConfig::default()
        };
        let mut engine = GridMovementEngine::with_seed(config, seed).expect("valid config");
        engine.place_apple(GridCell::new(6, 6));
        engine.tick(STEP);
        engine.apple()
    };

    assert_eq!(play(9), play(9));
}
