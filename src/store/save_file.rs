use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::game::{Board, Cell, Snapshot};

/// On-disk form of a saved game, written as JSON. Empty cells are `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveFile {
    pub board: Vec<Vec<Cell>>,
    pub score: u64,
    /// Seconds since the Unix epoch when the file was written.
    #[serde(default)]
    pub saved_at: u64,
}

impl SaveFile {
    pub fn new(snapshot: &Snapshot, saved_at: u64) -> Self {
        SaveFile {
            board: snapshot.board.rows().to_vec(),
            score: snapshot.score,
            saved_at,
        }
    }

    /// Validate the stored grid (shape and tile values) and turn it back
    /// into a snapshot.
    pub fn into_snapshot(self) -> Result<Snapshot, BoardError> {
        Ok(Snapshot {
            board: Board::new(self.board)?,
            score: self.score,
        })
    }
}
