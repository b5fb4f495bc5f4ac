pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod catalog;
pub mod chess_move;
pub mod error;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod types;

// Re-export core game logic (not engine-specific)
pub use attacks::Direction;
pub use bitboard::*;
pub use board::*;
pub use catalog::MoveCatalog;
pub use chess_move::Move;
pub use error::*;
pub use movegen::*;
pub use perft::{divide, perft, perft_with};
pub use types::*;

// =============================================================================
// Engine trait: implemented by move selectors that search a BoardState
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best move found (None if no legal moves)
    pub best_move: Option<Move>,
    /// Evaluation score from the engine's perspective
    pub score: i32,
    /// Plies searched below the root
    pub depth: u8,
    /// Number of positions visited
    pub nodes: u64,
}

/// Trait that all ChessMate engines implement.
///
/// The search runs to a fixed depth chosen before the call; there is no
/// cancellation. Callers needing a wall-clock bound run it on a worker and
/// drop the result if it arrives too late.
pub trait Engine: Send {
    /// Search `board` for the side to move.
    ///
    /// # Arguments
    /// * `catalog` - Shared, read-only move catalog
    /// * `board` - The position to analyze; never mutated
    /// * `max_depth` - Plies to search
    fn search(&mut self, catalog: &MoveCatalog, board: &BoardState, max_depth: u8) -> SearchResult;

    /// Returns the engine's name
    fn name(&self) -> &str;

    /// Returns the engine's author
    fn author(&self) -> &str {
        "ChessMate"
    }
}
