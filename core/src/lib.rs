// SPDX-License-Identifier: MIT OR Apache-2.0

//! HexOust Core - Board, Group and Placement Rules
//!
//! This crate provides the rule engine for HexOust:
//! - the 127-cell irregular hex board and its adjacency
//! - group discovery over same-colored stones
//! - non-capturing / capturing placement validation and capture resolution
//! - the turn state machine with continuing captures and game-over detection
//! - CBOR/JSON snapshots of a game in progress

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod board;
pub mod cbor;
pub mod config;
pub mod game;
pub mod groups;
pub mod rules;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stone color, each bound to one player for the whole game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Red player (moves first by default)
    Red,
    /// Blue player
    Blue,
}

impl Color {
    /// Returns the opposite color
    pub fn opposite(&self) -> Self {
        match self {
            Color::Red => Color::Blue,
            Color::Blue => Color::Red,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Red => f.write_str("red"),
            Color::Blue => f.write_str("blue"),
        }
    }
}

/// Board coordinate: row 0..13 from the top, column within that row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Row, 0 is the top edge
    pub row: u8,
    /// Column within the row, 0 is the leftmost cell
    pub col: u8,
}

impl Coord {
    /// Create a new coordinate
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Check if the coordinate names an existing cell
    pub fn is_valid(&self) -> bool {
        match board::row_length(self.row as usize) {
            Some(len) => (self.col as usize) < len,
            None => false,
        }
    }

    /// Shift by a signed (row, col) offset, `None` if the result leaves the board
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Coord> {
        let row = i16::from(self.row) + i16::from(d_row);
        let col = i16::from(self.col) + i16::from(d_col);
        if row < 0 || col < 0 {
            return None;
        }
        let coord = Coord::new(u8::try_from(row).ok()?, u8::try_from(col).ok()?);
        coord.is_valid().then_some(coord)
    }
}

/// Reasons a placement is refused
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameError {
    /// The index does not name a cell on the board
    #[error("Index {0} is outside the board")]
    OutOfRange(usize),

    /// The cell already holds a stone
    #[error("Cell {0} is already occupied")]
    CellOccupied(usize),

    /// Neither the non-capturing nor the capturing rule allows the placement
    #[error("Placement at {0} matches neither placement rule")]
    RuleMismatch(usize),

    /// No further moves are accepted once a winner is decided
    #[error("Game is already over")]
    GameAlreadyOver,

    /// Legality passed but the board refused the stone
    #[error("Board rejected a validated placement at {0}")]
    BoardDesync(usize),
}

// Re-export the types most callers need
pub use board::{Board, Cell, CellState, CELL_COUNT};
pub use cbor::{GameSnapshot, MoveRecord};
pub use config::{GameConfig, Player};
pub use game::{Game, GameListener, MoveOutcome, TurnState};
pub use rules::{MoveValidator, Placement};
