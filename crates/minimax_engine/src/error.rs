//! Error types for the minimax engine
//!
//! Covers move and position parsing, opening-book loading, session misuse
//! and broken search invariants.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in the engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// Move string could not be parsed or is not legal in the position
    #[error("Invalid move '{uci}': {reason}")]
    InvalidMove { uci: String, reason: String },

    /// FEN string could not be parsed or describes an impossible position
    #[error("Invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    /// Opening book file could not be read
    #[error("Failed to read opening book {path:?}: {source}")]
    BookIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Opening book contents are not a sequence of 16-byte entries
    #[error("Malformed opening book: {message}")]
    BookFormat { message: String },

    /// The game has already ended
    #[error("Game is over")]
    GameOver,

    /// Search finished without producing a move
    #[error("No move available")]
    NoMoveAvailable,

    /// Nothing to unapply
    #[error("Move history is empty")]
    EmptyHistory,

    /// Position or key drifted across a search; the engine state is corrupt
    #[error("Search invariant violated: {message}")]
    InvariantViolation { message: String },
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
