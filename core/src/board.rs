// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board representation and manipulation
//!
//! The board is a hexagon of 13 rows whose lengths grow from 7 to 13 and
//! shrink back to 7. Cells are addressed either by a linear index in
//! `0..CELL_COUNT`, counted row by row from the top-left, or by a [`Coord`].

use crate::{Color, Coord};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Number of cells in each row, top to bottom
pub const ROW_LENGTHS: [usize; ROW_COUNT] = [7, 8, 9, 10, 11, 12, 13, 12, 11, 10, 9, 8, 7];

/// Number of rows
pub const ROW_COUNT: usize = 13;

/// The widest row, where the grid stops widening and starts narrowing
pub const WIDEST_ROW: usize = 6;

/// Total number of cells on the board
pub const CELL_COUNT: usize = 127;

/// Linear index of the first cell in each row
const ROW_STARTS: [usize; ROW_COUNT] = row_starts();

const fn row_starts() -> [usize; ROW_COUNT] {
    let mut starts = [0; ROW_COUNT];
    let mut row = 1;
    while row < ROW_COUNT {
        starts[row] = starts[row - 1] + ROW_LENGTHS[row - 1];
        row += 1;
    }
    starts
}

// Neighbour offsets as (d_row, d_col). Columns shear one way while rows
// widen, the other way while they narrow, and the widest row sees both.
const UPPER_OFFSETS: [(i8, i8); 6] = [(-1, 0), (-1, -1), (0, 1), (0, -1), (1, 1), (1, 0)];
const WIDEST_OFFSETS: [(i8, i8); 6] = [(-1, 0), (-1, -1), (1, -1), (0, -1), (0, 1), (1, 0)];
const LOWER_OFFSETS: [(i8, i8); 6] = [(-1, 0), (0, -1), (-1, 1), (1, -1), (0, 1), (1, 0)];

/// Length of a row, `None` past the last row
pub fn row_length(row: usize) -> Option<usize> {
    ROW_LENGTHS.get(row).copied()
}

/// Convert a coordinate to its linear index
pub fn index_of(coord: Coord) -> Option<usize> {
    if !coord.is_valid() {
        return None;
    }
    Some(ROW_STARTS[coord.row as usize] + coord.col as usize)
}

/// Convert a linear index to its coordinate
pub fn coord_of(index: usize) -> Option<Coord> {
    if index >= CELL_COUNT {
        return None;
    }
    let row = ROW_STARTS.iter().rposition(|&start| start <= index)?;
    Some(Coord::new(row as u8, (index - ROW_STARTS[row]) as u8))
}

/// Indices of the cells touching `index`; empty for an invalid index
pub fn adjacent_indices(index: usize) -> Vec<usize> {
    let coord = match coord_of(index) {
        Some(coord) => coord,
        None => return Vec::new(),
    };

    let offsets = match (coord.row as usize).cmp(&WIDEST_ROW) {
        std::cmp::Ordering::Less => &UPPER_OFFSETS,
        std::cmp::Ordering::Equal => &WIDEST_OFFSETS,
        std::cmp::Ordering::Greater => &LOWER_OFFSETS,
    };

    offsets
        .iter()
        .filter_map(|&(d_row, d_col)| coord.offset(d_row, d_col))
        .filter_map(index_of)
        .collect()
}

/// External per-cell representation, one byte per cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum CellState {
    Empty = 0,
    Red = 1,
    Blue = 2,
}

impl From<Option<Color>> for CellState {
    fn from(owner: Option<Color>) -> Self {
        match owner {
            None => CellState::Empty,
            Some(Color::Red) => CellState::Red,
            Some(Color::Blue) => CellState::Blue,
        }
    }
}

impl From<CellState> for Option<Color> {
    fn from(state: CellState) -> Self {
        match state {
            CellState::Empty => None,
            CellState::Red => Some(Color::Red),
            CellState::Blue => Some(Color::Blue),
        }
    }
}

/// A cell as seen by a query: where it is and who owns it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Linear index
    pub index: usize,
    /// Row and column
    pub coord: Coord,
    /// Stone on the cell, if any
    pub owner: Option<Color>,
}

impl Cell {
    /// Check if a stone sits on the cell
    pub fn is_occupied(&self) -> bool {
        self.owner.is_some()
    }
}

/// Represents the HexOust board with stones and empty cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Owner of each cell, indexed linearly
    positions: Vec<Option<Color>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            positions: vec![None; CELL_COUNT],
        }
    }

    /// Rebuild a board from its external representation
    ///
    /// Returns `None` unless exactly [`CELL_COUNT`] states are given.
    pub fn from_cells(cells: &[CellState]) -> Option<Self> {
        if cells.len() != CELL_COUNT {
            return None;
        }
        Some(Self {
            positions: cells.iter().map(|&state| state.into()).collect(),
        })
    }

    /// External representation, one state per cell in index order
    pub fn cells(&self) -> Vec<CellState> {
        self.positions.iter().map(|&owner| owner.into()).collect()
    }

    /// Get the stone at the specified index
    pub fn get(&self, index: usize) -> Option<Color> {
        self.positions.get(index).copied().flatten()
    }

    /// Look up a cell by coordinate
    pub fn cell_at(&self, coord: Coord) -> Option<Cell> {
        let index = index_of(coord)?;
        Some(Cell {
            index,
            coord,
            owner: self.positions[index],
        })
    }

    /// Look up a cell by linear index
    pub fn cell_at_index(&self, index: usize) -> Option<Cell> {
        let coord = coord_of(index)?;
        Some(Cell {
            index,
            coord,
            owner: self.positions[index],
        })
    }

    /// Check if the cell exists and holds no stone
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.positions.get(index), Some(None))
    }

    /// Indices of the cells touching `index`
    pub fn adjacent_indices(&self, index: usize) -> Vec<usize> {
        adjacent_indices(index)
    }

    /// Place a stone; fails without touching the board if the index is
    /// invalid or the cell is occupied
    pub fn place(&mut self, color: Color, index: usize) -> bool {
        match self.positions.get_mut(index) {
            Some(slot) if slot.is_none() => {
                *slot = Some(color);
                true
            }
            _ => false,
        }
    }

    /// Clear a cell; removing from an empty cell is a no-op that still succeeds
    pub fn remove(&mut self, index: usize) -> bool {
        match self.positions.get_mut(index) {
            Some(slot) => {
                *slot = None;
                true
            }
            None => false,
        }
    }

    /// Indices holding a stone of `color`
    pub fn stones(&self, color: Color) -> impl Iterator<Item = usize> + '_ {
        self.positions
            .iter()
            .enumerate()
            .filter(move |(_, owner)| **owner == Some(color))
            .map(|(index, _)| index)
    }

    /// Count stones of the specified color
    pub fn stone_count(&self, color: Color) -> usize {
        self.stones(color).count()
    }

    /// Indices of all empty cells
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.positions
            .iter()
            .enumerate()
            .filter(|(_, owner)| owner.is_none())
            .map(|(index, _)| index)
    }
}
