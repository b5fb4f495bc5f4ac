//! Error types for notation and position parsing.

use thiserror::Error;

/// Reasons a move string could not be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty move string")]
    Empty,

    #[error("invalid square `{0}`")]
    BadSquare(String),

    #[error("invalid promotion suffix `{0}`")]
    BadPromotion(String),

    /// Piece-letter prefix that is not one of N, B, R, Q, K.
    #[error("invalid piece letter `{0}`")]
    BadPiece(char),

    #[error("unexpected trailing input `{0}`")]
    Trailing(String),
}

/// Reasons a FEN string could not be loaded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("expected at least 4 fields, found {0}")]
    FieldCount(usize),

    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),

    #[error("rank {rank} does not describe exactly 8 files")]
    RankWidth { rank: usize },

    #[error("invalid piece character `{0}`")]
    BadPiece(char),

    #[error("invalid side to move `{0}`")]
    SideToMove(String),

    #[error("invalid castling character `{0}`")]
    Castling(char),

    #[error("invalid en-passant square `{0}`")]
    EnPassant(String),

    #[error("invalid move counter `{0}`")]
    Counter(String),
}

pub type NotationResult<T> = Result<T, NotationError>;
