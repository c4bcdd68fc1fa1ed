// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connected groups of same-colored stones

use crate::board::{Board, CELL_COUNT};
use std::collections::{BTreeSet, VecDeque};

/// Set of cell indices forming one group
pub type Group = BTreeSet<usize>;

/// Find all stones connected to the stone at `index`
///
/// Returns an empty group when the index is invalid or the cell is empty.
/// Groups are recomputed on every call and never cached.
pub fn group_of(board: &Board, index: usize) -> Group {
    let target_color = match board.get(index) {
        Some(color) => color,
        None => return Group::new(),
    };

    let mut group = Group::new();
    let mut visited = [false; CELL_COUNT];
    let mut queue = VecDeque::from([index]);
    visited[index] = true;

    while let Some(current) = queue.pop_front() {
        group.insert(current);

        for neighbor in board.adjacent_indices(current) {
            if !visited[neighbor] && board.get(neighbor) == Some(target_color) {
                visited[neighbor] = true;
                queue.push_back(neighbor);
            }
        }
    }

    group
}
