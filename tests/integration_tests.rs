//! Integration tests for the game loop driven through the public API

use srs_tetris::core::GameState;
use srs_tetris::types::{GameAction, LockEvent, PieceKind, Rotation};

#[test]
fn test_seed_1_starts_with_j() {
    let state = GameState::new(1);
    assert_eq!(state.active().kind(), PieceKind::J);
    assert_eq!(state.active().rotation(), Rotation::North);
    assert_eq!(state.piece_id(), 1);
    assert!(!state.game_over());
}

#[test]
fn test_same_seed_same_game() {
    let actions = [
        GameAction::MoveLeft,
        GameAction::RotateCw,
        GameAction::HardDrop,
        GameAction::MoveRight,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::RotateCcw,
        GameAction::HardDrop,
        GameAction::HardDrop,
    ];

    let mut a = GameState::new(12345);
    let mut b = GameState::new(12345);
    for action in actions {
        assert_eq!(a.apply_action(action), b.apply_action(action));
        assert_eq!(a.snapshot(), b.snapshot());
    }
    assert_eq!(a.rng_state(), b.rng_state());
}

#[test]
fn test_slide_stops_at_walls() {
    let mut state = GameState::new(1);

    // J spans columns 3..=5.
    for _ in 0..3 {
        assert!(state.slide(true));
    }
    assert!(!state.slide(true));
    assert_eq!(state.active().cells().iter().map(|c| c.0).min(), Some(0));

    for _ in 0..7 {
        assert!(state.slide(false));
    }
    assert!(!state.slide(false));
    assert_eq!(state.active().cells().iter().map(|c| c.0).max(), Some(9));
}

#[test]
fn test_hard_drop_locks_on_floor_and_spawns_next() {
    let mut state = GameState::new(1);

    assert!(state.hard_drop());

    for (x, y) in [(3, 20), (3, 21), (4, 21), (5, 21)] {
        assert_eq!(state.board().get(x, y), Some(Some(PieceKind::J)));
    }
    assert_eq!(state.active().kind(), PieceKind::O);
    assert_eq!(state.piece_id(), 2);
    assert_eq!(
        state.take_last_event(),
        Some(LockEvent {
            kind: PieceKind::J,
            lines_cleared: 0,
            score: 0,
        })
    );
    assert_eq!(state.take_last_event(), None);
}

#[test]
fn test_line_clear_with_i_pieces_scores_one() {
    // Seed 0 never leaves the zero state, so every piece is an I.
    let mut state = GameState::new(0);

    // Columns 0..=3 on the floor.
    for _ in 0..3 {
        state.slide(true);
    }
    assert!(state.hard_drop());

    // Columns 6..=9.
    for _ in 0..3 {
        state.slide(false);
    }
    assert!(state.hard_drop());

    // Vertical in column 5, then column 4 completes the bottom row.
    assert!(state.rotate(false));
    assert!(state.hard_drop());
    assert!(state.rotate(true));
    assert_eq!(state.active().rotation(), Rotation::West);
    assert!(state.hard_drop());

    assert_eq!(state.score(), 1);
    assert_eq!(
        state.take_last_event(),
        Some(LockEvent {
            kind: PieceKind::I,
            lines_cleared: 1,
            score: 1,
        })
    );

    // The two vertical bars dropped by one row.
    for y in 19..22 {
        assert!(state.board().is_occupied(4, y));
        assert!(state.board().is_occupied(5, y));
    }
    assert!(!state.board().is_occupied(4, 18));
    assert!(!state.board().is_occupied(0, 21));
    assert!(!state.board().is_occupied(9, 21));
}

#[test]
fn test_stacking_in_the_middle_ends_the_game() {
    let mut state = GameState::new(7);

    let mut drops = 0;
    while state.apply_action(GameAction::HardDrop) {
        drops += 1;
        assert!(drops < 100, "stack never reached the hidden buffer");
    }

    assert!(state.game_over());
    let frozen = state.snapshot();
    assert!(frozen.game_over);

    // Everything is a no-op until a restart.
    assert!(!state.tick());
    assert!(!state.slide(true));
    assert!(!state.rotate(false));
    assert!(!state.hard_drop());
    assert_eq!(state.snapshot(), frozen);

    assert!(state.apply_action(GameAction::Restart));
    assert!(!state.game_over());
    assert_eq!(state.score(), 0);
    assert_eq!(state.piece_id(), 1);
    assert!(state.board().cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_tick_moves_down_one_row() {
    let mut state = GameState::new(1);
    let before = *state.active().cells();

    assert!(state.tick());

    let after = state.active().cells();
    for (a, b) in before.iter().zip(after.iter()) {
        assert_eq!((a.0, a.1 + 1), *b);
    }
    assert_eq!(state.piece_id(), 1);
}
