use std::fmt;

use super::direction::Rotation;
use crate::error::BoardError;

/// A single board cell: empty, or a power-of-two tile value.
pub type Cell = Option<u32>;

/// Largest tile a `u32` cell can hold. Two of these never merge.
pub const MAX_TILE: u32 = 1 << 31;

/// A rectangular grid of cells. Row 0 is the top.
///
/// A `Board` can only be built through [`Board::new`] (or [`Board::empty`]),
/// so every value of this type has at least one row, at least one column,
/// rows of equal length, and only power-of-two tiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: Vec<Vec<Cell>>,
}

impl Board {
    /// Build a board from raw rows, rejecting grids that are not N by M.
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Self, BoardError> {
        Self::validate(&rows)?;
        Ok(Board { rows })
    }

    /// Create an empty board of the given size
    pub fn empty(rows: usize, cols: usize) -> Result<Self, BoardError> {
        Self::new(vec![vec![None; cols]; rows])
    }

    /// Check that every row has the same length as the first one and that
    /// every occupied cell holds a power of two.
    pub fn validate(rows: &[Vec<Cell>]) -> Result<(), BoardError> {
        let expected = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(BoardError::Empty),
        };
        for (r, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(BoardError::Jagged {
                    row: r,
                    expected,
                    found: row.len(),
                });
            }
        }
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                match *cell {
                    Some(value) if !value.is_power_of_two() => {
                        return Err(BoardError::Tile {
                            row: r,
                            col: c,
                            value,
                        })
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Wrap rows already known to be rectangular.
    pub(crate) fn from_validated(rows: Vec<Vec<Cell>>) -> Self {
        debug_assert!(Self::validate(&rows).is_ok());
        Board { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.rows[0].len()
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.rows[row][col]
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Iterate over the values of all occupied cells, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = u32> + '_ {
        self.rows.iter().flatten().flatten().copied()
    }

    /// Positions of all empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut empty = Vec::new();
        for (r, row) in self.rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if cell.is_none() {
                    empty.push((r, c));
                }
            }
        }
        empty
    }

    /// Check if the board has no empty cell left
    pub fn is_full(&self) -> bool {
        self.rows.iter().flatten().all(Option::is_some)
    }

    pub fn max_tile(&self) -> Option<u32> {
        self.tiles().max()
    }

    /// Return a copy of this board with `value` placed at (row, col).
    pub(crate) fn with_cell(&self, row: usize, col: usize, value: Cell) -> Board {
        let mut rows = self.rows.clone();
        rows[row][col] = value;
        Board { rows }
    }

    /// Rotate counter-clockwise. 90 and 270 degrees swap the dimensions.
    pub fn rotate(&self, rotation: Rotation) -> Board {
        let rows = self.row_count();
        let cols = self.col_count();
        let src = &self.rows;

        let rotated = match rotation {
            Rotation::Deg0 => src.clone(),
            Rotation::Deg90 => (0..cols)
                .map(|c| (0..rows).map(|r| src[r][cols - c - 1]).collect())
                .collect(),
            Rotation::Deg180 => (0..rows)
                .map(|r| (0..cols).map(|c| src[rows - r - 1][cols - c - 1]).collect())
                .collect(),
            Rotation::Deg270 => (0..cols)
                .map(|c| (0..rows).map(|r| src[rows - r - 1][c]).collect())
                .collect(),
        };

        Board { rows: rotated }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .max_tile()
            .map(|v| v.to_string().len())
            .unwrap_or(1)
            .max(1);
        for row in &self.rows {
            let line: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    Some(v) => format!("{v:>width$}"),
                    None => format!("{:>width$}", "."),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
