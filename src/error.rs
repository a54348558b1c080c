//! Crate error type
//!
//! The simulation itself never fails (game over is a phase, not an error);
//! these cover loading tuning files and leaderboard data.

/// Errors from configuration and leaderboard I/O
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid tuning value `{field}`: {reason}")]
    InvalidTuning { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
