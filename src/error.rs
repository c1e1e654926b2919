use std::path::PathBuf;

/// The board handed to the engine is not an N-by-M grid of tiles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid board shape: board has no cells")]
    Empty,

    #[error("invalid board shape: row {row} has {found} cells, expected {expected}")]
    Jagged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid tile {value} at row {row}, column {col}: tiles must be powers of two")]
    Tile { row: usize, col: usize, value: u32 },
}

/// Errors that can occur when loading or saving a game snapshot.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read save file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse save file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("saved board rejected: {0}")]
    Shape(#[from] BoardError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
