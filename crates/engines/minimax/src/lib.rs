//! ChessMate Engine
//!
//! Fixed-depth minimax with alpha-beta pruning over copied boards, a
//! positional evaluator, and the per-game facade the session layer drives.

mod config;
mod eval;
mod game;
mod search;

use chessmate_core::{BoardState, Engine, MoveCatalog, SearchResult};

pub use config::{ConfigError, GameConfig, depth_for_difficulty};
pub use eval::{Evaluator, KING_VALUE, PIECE_VALUES};
pub use game::{ChessGame, GameError, StalemateCode};
pub use search::{INF, MoveSelector, SearchOptions};

impl Engine for MoveSelector {
    /// Searches for the side to move, re-targeting the evaluator if that is
    /// not the colour this selector was built for.
    fn search(&mut self, catalog: &MoveCatalog, board: &BoardState, max_depth: u8) -> SearchResult {
        if board.player_to_move() != self.engine_color() {
            *self = MoveSelector::with_options(board.player_to_move(), self.options());
        }
        self.get_best_move(catalog, board, max_depth)
    }

    fn name(&self) -> &str {
        "ChessMate Minimax v1.0"
    }
}
