use srs_tetris::core::{GameSnapshot, GameState};
use srs_tetris::types::GameAction;

#[test]
fn snapshot_round_trips_through_json() {
    let mut state = GameState::new(99);
    state.apply_action(GameAction::RotateCw);
    state.apply_action(GameAction::HardDrop);
    let snap = state.snapshot();

    let json = serde_json::to_string(&snap).unwrap();
    let back: GameSnapshot = serde_json::from_str(&json).unwrap();

    assert_eq!(back, snap);
}

#[test]
fn snapshot_json_uses_kind_names() {
    let snap = GameState::new(1).snapshot();
    let value = serde_json::to_value(snap).unwrap();

    assert_eq!(value["active"]["kind"], "J");
    assert_eq!(value["active"]["rotation"], "North");
    assert_eq!(value["seed"], 1);
    assert_eq!(value["piece_id"], 1);
    assert_eq!(value["game_over"], false);
    assert_eq!(value["board"].as_array().unwrap().len(), 22);
}

#[test]
fn board_hash_tracks_board_contents() {
    let mut state = GameState::new(1);
    let empty = state.snapshot();
    assert_eq!(empty.board_hash, GameState::new(5).snapshot().board_hash);

    state.apply_action(GameAction::HardDrop);
    let after = state.snapshot();
    assert_ne!(after.board_hash, empty.board_hash);
}
