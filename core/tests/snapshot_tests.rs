// SPDX-License-Identifier: MIT OR Apache-2.0

//! Snapshot encoding and game resumption

use hexoust_core::board::CellState;
use hexoust_core::cbor::{self, GameSnapshot};
use hexoust_core::{Color, Game, GameConfig, Placement, TurnState};

fn game_in_capture_chain() -> Game {
    let mut game = Game::new();
    for index in [0, 8, 100, 120, 1] {
        game.submit_move(index).unwrap();
    }
    game
}

#[test]
fn cell_state_bytes() {
    assert_eq!(CellState::Empty as u8, 0);
    assert_eq!(CellState::Red as u8, 1);
    assert_eq!(CellState::Blue as u8, 2);
    assert_eq!(serde_json::to_string(&CellState::Blue).unwrap(), "2");
}

#[test]
fn cbor_snapshot_resumes_the_same_game() {
    let game = game_in_capture_chain();
    let bytes = cbor::serialize_snapshot(&game.snapshot());
    assert!(!bytes.is_empty());

    let snapshot = cbor::deserialize_snapshot(&bytes).expect("snapshot decodes");
    assert_eq!(snapshot.state, TurnState::ContinuingCapture(Color::Red));
    assert_eq!(snapshot.history.len(), 5);
    assert_eq!(snapshot.history[4].placement, Placement::Capturing);
    assert_eq!(snapshot.history[4].captured, vec![8]);

    let mut resumed = Game::restore(snapshot, GameConfig::default()).unwrap();
    assert_eq!(resumed.board(), game.board());
    assert_eq!(resumed.captures(Color::Red), 1);
    assert_eq!(resumed.mover(), Some(Color::Red));

    resumed.submit_move(60).unwrap();
    assert_eq!(resumed.state(), TurnState::ToMove(Color::Blue));
}

#[test]
fn json_snapshot_names_the_turn_state() {
    let game = game_in_capture_chain();
    let json = cbor::snapshot_to_json(&game.snapshot()).unwrap();
    assert!(json.contains("\"continuing_capture\""));
    assert!(json.contains("\"red\""));

    let parsed = cbor::snapshot_from_json(&json).unwrap();
    assert_eq!(parsed, game.snapshot());
}

#[test]
fn garbage_does_not_decode() {
    assert!(cbor::deserialize_snapshot(&[]).is_none());
    assert!(cbor::deserialize_snapshot(&[0xff, 0x00, 0x13]).is_none());
}

#[test]
fn restore_rejects_short_boards() {
    let snapshot = GameSnapshot {
        cells: vec![CellState::Empty; 10],
        state: TurnState::ToMove(Color::Red),
        history: Vec::new(),
    };
    let err = Game::restore(snapshot, GameConfig::default()).unwrap_err();
    assert!(err.to_string().contains("expected 127"));
}
