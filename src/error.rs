use std::path::PathBuf;

/// Errors raised by a `PersistenceAdapter`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A persisted snapshot that cannot be resumed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("board has no cells")]
    EmptyBoard,

    #[error("board row {row} has {found} cells, expected {expected}")]
    RaggedBoard {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid cell value {0} (expected -1, 0 or 1)")]
    InvalidCell(i8),

    #[error("board is {rows}x{cols}, configured for {expected_rows}x{expected_cols}")]
    DimensionMismatch {
        rows: usize,
        cols: usize,
        expected_rows: usize,
        expected_cols: usize,
    },

    #[error("token at row {row}, column {col} floats above an empty cell")]
    FloatingToken { row: usize, col: usize },

    #[error("board is full but the game is still in progress")]
    FullBoardInProgress,

    #[error("move count {move_count} does not match {filled} filled cells")]
    MoveCountMismatch { move_count: usize, filled: usize },

    #[error("status {status} is inconsistent with winner {winner:?} and turn {turn}")]
    WinnerMismatch {
        status: &'static str,
        winner: Option<bool>,
        turn: u8,
    },

    #[error("game id must be at least 1")]
    InvalidGameId,
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
