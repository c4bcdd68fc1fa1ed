// SPDX-License-Identifier: MIT OR Apache-2.0

//! CBOR serialization helpers for game snapshots
//!
//! A snapshot carries the board as one [`CellState`] byte per cell, the
//! turn state and the move history, which is all a collaborator needs to
//! persist a game or ship it elsewhere and resume it with
//! [`Game::restore`](crate::game::Game::restore).

use crate::board::CellState;
use crate::game::TurnState;
use crate::groups::Group;
use crate::rules::Placement;
use crate::Color;
use serde::{Deserialize, Serialize};

/// One committed placement
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Cell the stone went to
    pub index: usize,
    /// Color of the placed stone
    pub color: Color,
    /// Rule that admitted the placement
    pub placement: Placement,
    /// Opposing stones removed by the placement, ascending
    pub captured: Vec<usize>,
    /// Unix seconds
    pub ts: i64,
}

impl MoveRecord {
    /// Record a placement committed now
    pub fn new(index: usize, color: Color, placement: Placement, captured: &Group) -> Self {
        Self {
            index,
            color,
            placement,
            captured: captured.iter().copied().collect(),
            ts: chrono::Utc::now().timestamp(),
        }
    }
}

/// Full state of a game at one point in time
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Board cells in index order
    pub cells: Vec<CellState>,
    /// Whose turn it is, or who won
    pub state: TurnState,
    /// Committed moves, oldest first
    pub history: Vec<MoveRecord>,
}

/// Serialize a snapshot to CBOR
pub fn serialize_snapshot(snapshot: &GameSnapshot) -> Vec<u8> {
    match serde_cbor::to_vec(snapshot) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::error!("Failed to serialize game snapshot: {}", err);
            Vec::new()
        }
    }
}

/// Deserialize a snapshot from CBOR
pub fn deserialize_snapshot(data: &[u8]) -> Option<GameSnapshot> {
    if data.is_empty() {
        return None;
    }

    match serde_cbor::from_slice(data) {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            tracing::error!("Failed to deserialize game snapshot: {}", err);
            None
        }
    }
}

/// Render a snapshot as pretty JSON
pub fn snapshot_to_json(snapshot: &GameSnapshot) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snapshot)
}

/// Parse a snapshot from JSON
pub fn snapshot_from_json(json: &str) -> serde_json::Result<GameSnapshot> {
    serde_json::from_str(json)
}
