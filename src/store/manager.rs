use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info, warn};
use rand::Rng;

use crate::error::{BoardError, StoreError};
use crate::game::{Rules, Session, Snapshot};
use crate::store::save_file::SaveFile;

/// Configuration for the save store, the `[store]` table of the config file.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub save_path: PathBuf,
    /// Save after every committed move, undo and new game. An existing save
    /// is still loaded at startup when this is off.
    pub autosave: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            save_path: PathBuf::from("2048_save.json"),
            autosave: true,
        }
    }
}

/// Loads and saves the current game as a single JSON file.
pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SaveStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved game. Returns `Ok(None)` when nothing has been saved yet.
    pub fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        let file: SaveFile = serde_json::from_str(&json).map_err(|e| StoreError::Parse {
            path: self.path.clone(),
            source: e,
        })?;
        let snapshot = file.into_snapshot()?;
        debug!(
            "loaded {}x{} board (score {}) from {}",
            snapshot.board.row_count(),
            snapshot.board.col_count(),
            snapshot.score,
            self.path.display()
        );
        Ok(Some(snapshot))
    }

    /// Resume the saved game if it fits `rules`, otherwise start a new one.
    ///
    /// Unreadable saves and saves of another board size are logged and
    /// replaced by a new game rather than failing startup.
    pub fn resume_session<R: Rng>(
        &self,
        rules: Rules,
        history_limit: usize,
        rng: R,
    ) -> Result<Session<R>, BoardError> {
        let snapshot = match self.load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return Session::new(rules, history_limit, rng),
            Err(e) => {
                warn!("ignoring save file: {e}");
                return Session::new(rules, history_limit, rng);
            }
        };

        if !rules.fits(&snapshot.board) {
            warn!(
                "saved board is {}x{} but the game is configured for {}x{}, starting fresh",
                snapshot.board.row_count(),
                snapshot.board.col_count(),
                rules.rows,
                rules.cols
            );
            return Session::new(rules, history_limit, rng);
        }

        info!("resuming saved game with score {}", snapshot.score);
        Ok(Session::resume(snapshot, rules, history_limit, rng))
    }

    /// Save a snapshot, replacing any previous save.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let saved_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let json = serde_json::to_string_pretty(&SaveFile::new(snapshot, saved_at))?;

        // Write to a sibling temp file, then rename over the target
        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Delete the save file. Missing files are not an error.
    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
