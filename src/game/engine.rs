//! Slide-and-merge move computation.
//!
//! Every direction is handled by the same leftward collapse: the board is
//! rotated so the requested direction points left, each row is collapsed,
//! and the result is rotated back.

use super::board::{Board, Cell, MAX_TILE};
use super::direction::Direction;
use crate::error::BoardError;

/// Result of applying one direction to a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub board: Board,
    /// True iff at least one cell differs from the input board.
    pub moved: bool,
}

/// Value produced by merging `a` into `b`, if the two can merge.
///
/// Only equal tiles merge, and tiles of [`MAX_TILE`] stay put since their
/// sum does not fit in a cell.
pub(crate) fn merged_value(a: u32, b: u32) -> Option<u32> {
    if a == b {
        a.checked_mul(2)
    } else {
        None
    }
}

/// Slide one row to the left, merging equal neighbours pairwise.
///
/// Tiles produced by a merge never merge again within the same call, so
/// `[2, 2, 2, 2]` becomes `[4, 4, _, _]`. The returned flag is true iff
/// any position changed.
pub fn collapse_row(row: &[Cell]) -> (Vec<Cell>, bool) {
    let mut collapsed: Vec<Cell> = Vec::with_capacity(row.len());
    let mut pending: Cell = None;

    for value in row.iter().flatten().copied() {
        match pending {
            None => pending = Some(value),
            Some(held) => match merged_value(held, value) {
                Some(merged) => {
                    collapsed.push(Some(merged));
                    pending = None;
                }
                None => {
                    collapsed.push(Some(held));
                    pending = Some(value);
                }
            },
        }
    }
    if pending.is_some() {
        collapsed.push(pending);
    }
    collapsed.resize(row.len(), None);

    let moved = collapsed.iter().zip(row).any(|(after, before)| after != before);
    (collapsed, moved)
}

impl Board {
    /// Slide all tiles towards `direction`. The board itself is untouched.
    pub fn slide(&self, direction: Direction) -> MoveOutcome {
        let rotation = direction.rotation();
        let rotated = self.rotate(rotation);

        let mut moved = false;
        let rows = rotated
            .rows()
            .iter()
            .map(|row| {
                let (collapsed, row_moved) = collapse_row(row);
                moved |= row_moved;
                collapsed
            })
            .collect();

        MoveOutcome {
            board: Board::from_validated(rows).rotate(rotation.inverse()),
            moved,
        }
    }

    /// Directions that would change the board.
    pub fn legal_directions(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.slide(d).moved)
            .collect()
    }
}

/// Apply a move to a raw grid, validating its shape first.
///
/// Fails with [`BoardError`] when the rows are not all the same length or a
/// cell is not a power of two; no partial board is produced in that case.
pub fn move_grid(rows: &[Vec<Cell>], direction: Direction) -> Result<MoveOutcome, BoardError> {
    Board::validate(rows)?;
    Ok(Board::from_validated(rows.to_vec()).slide(direction))
}
