// SPDX-License-Identifier: MIT OR Apache-2.0

//! Placement rules and capture resolution
//!
//! A placement is legal under exactly one of two rules:
//!
//! - **Non-capturing placement (NCP)**: the cell is empty and none of its
//!   neighbours holds a stone of the placing color.
//! - **Capturing placement (CP)**: the cell is empty, touches at least one
//!   friendly stone, and the group formed by merging into those stones
//!   touches at least one opposing stone.
//!
//! A capturing placement removes every adjacent opposing group that is
//! strictly smaller than the merged group. Each opposing group is compared
//! on its own; equal sizes never capture.

use crate::board::{Board, CELL_COUNT};
use crate::groups::{group_of, Group};
use crate::{Color, GameError};
use serde::{Deserialize, Serialize};

/// Which rule admitted a placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// No friendly neighbour, nothing is captured
    NonCapturing,
    /// Merges into friendly stones next to an opposing group
    Capturing,
}

/// Validates placements against a board
pub struct MoveValidator<'a> {
    /// The board being checked
    board: &'a Board,
}

impl<'a> MoveValidator<'a> {
    /// Create a new validator over `board`
    pub fn new(board: &'a Board) -> Self {
        Self { board }
    }

    /// Check if the index names a cell
    pub fn is_in_range(index: usize) -> bool {
        index < CELL_COUNT
    }

    /// Check the non-capturing rule for `color` at `index`
    pub fn is_non_capturing_legal(&self, color: Color, index: usize) -> bool {
        if !self.board.is_empty(index) {
            return false;
        }

        self.board
            .adjacent_indices(index)
            .into_iter()
            .all(|neighbor| self.board.get(neighbor) != Some(color))
    }

    /// Check the capturing rule for `color` at `index`
    pub fn is_capturing_legal(&self, color: Color, index: usize) -> bool {
        match self.merged_group(color, index) {
            Some(merged) => !self.adjacent_opposing_groups(&merged, color).is_empty(),
            None => false,
        }
    }

    /// Stones that a placement of `color` at `index` would capture
    ///
    /// Empty for an invalid or occupied cell, for a placement with no
    /// friendly neighbour, or when no adjacent opposing group is strictly
    /// smaller than the merged group. All groups are measured against the
    /// current board, so one capture never influences another.
    pub fn capture_targets(&self, color: Color, index: usize) -> Group {
        let merged = match self.merged_group(color, index) {
            Some(merged) => merged,
            None => return Group::new(),
        };

        let mut captured = Group::new();
        for opposing in self.adjacent_opposing_groups(&merged, color) {
            if merged.len() > opposing.len() {
                tracing::trace!(
                    merged = merged.len(),
                    opposing = opposing.len(),
                    "Opposing group captured"
                );
                captured.extend(opposing);
            }
        }
        captured
    }

    /// Classify a candidate placement
    ///
    /// The non-capturing rule is tried first; the two rules are disjoint
    /// anyway, since the capturing rule needs a friendly neighbour.
    pub fn classify(&self, color: Color, index: usize) -> Result<Placement, GameError> {
        if !Self::is_in_range(index) {
            return Err(GameError::OutOfRange(index));
        }

        if !self.board.is_empty(index) {
            return Err(GameError::CellOccupied(index));
        }

        if self.is_non_capturing_legal(color, index) {
            Ok(Placement::NonCapturing)
        } else if self.is_capturing_legal(color, index) {
            Ok(Placement::Capturing)
        } else {
            Err(GameError::RuleMismatch(index))
        }
    }

    /// Every index where `color` may place a stone
    pub fn legal_moves(&self, color: Color) -> Vec<usize> {
        self.board
            .empty_cells()
            .filter(|&index| self.is_legal(color, index))
            .collect()
    }

    /// Check if `color` has at least one legal placement
    pub fn has_legal_move(&self, color: Color) -> bool {
        self.board
            .empty_cells()
            .any(|index| self.is_legal(color, index))
    }

    fn is_legal(&self, color: Color, index: usize) -> bool {
        self.is_non_capturing_legal(color, index) || self.is_capturing_legal(color, index)
    }

    /// The group `color` would form by placing at `index`, or `None` if the
    /// cell is unavailable or has no friendly neighbour to merge into
    fn merged_group(&self, color: Color, index: usize) -> Option<Group> {
        if !self.board.is_empty(index) {
            return None;
        }

        let friendly: Vec<usize> = self
            .board
            .adjacent_indices(index)
            .into_iter()
            .filter(|&neighbor| self.board.get(neighbor) == Some(color))
            .collect();

        if friendly.is_empty() {
            return None;
        }

        let mut merged = Group::from([index]);
        for neighbor in friendly {
            if !merged.contains(&neighbor) {
                merged.extend(group_of(self.board, neighbor));
            }
        }
        Some(merged)
    }

    /// Each distinct opposing group touching `group`, reported once even
    /// when it is reached from several cells
    fn adjacent_opposing_groups(&self, group: &Group, color: Color) -> Vec<Group> {
        let opponent = color.opposite();
        let mut seen = [false; CELL_COUNT];
        let mut groups = Vec::new();

        for &cell in group {
            for neighbor in self.board.adjacent_indices(cell) {
                if seen[neighbor] || self.board.get(neighbor) != Some(opponent) {
                    continue;
                }

                let opposing = group_of(self.board, neighbor);
                for &member in &opposing {
                    seen[member] = true;
                }
                groups.push(opposing);
            }
        }

        groups
    }
}
