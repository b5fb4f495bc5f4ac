//! One game between a player and the engine.
//!
//! [`ChessGame`] owns the board, validates the player's moves against the
//! generated list, runs the search for the engine's replies, and formats
//! each applied move as `"<notation> <code>"` for the session layer.

use std::fmt;

use chessmate_core::{BoardState, Color, Engine, Move, MoveCatalog, NotationError, ValidMoveSet};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{GameConfig, depth_for_difficulty};
use crate::search::MoveSelector;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Notation(#[from] NotationError),

    /// Readable, but not among the legal moves.
    #[error("illegal move `{0}`")]
    IllegalMove(String),

    #[error("no legal moves for {0}")]
    NoLegalMoves(Color),

    #[error("it is {0}'s turn")]
    WrongTurn(Color),
}

/// Second token of the move/stalemate reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum StalemateCode {
    None = 0,
    NoLegalMoves = 1,
    FiftyMoves = 2,
    Repetition = 3,
}

impl fmt::Display for StalemateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

pub struct ChessGame {
    catalog: &'static MoveCatalog,
    board: BoardState,
    config: GameConfig,
    selector: MoveSelector,
    max_depth: u8,
    depth_increased: bool,
}

impl ChessGame {
    /// A new game from the starting position. The engine searches
    /// `2 * difficulty + 1` plies.
    pub fn new(engine_color: Color, difficulty: u8, config: GameConfig) -> Self {
        Self::from_board(engine_color, difficulty, config, BoardState::new())
    }

    pub fn from_board(
        engine_color: Color,
        difficulty: u8,
        config: GameConfig,
        board: BoardState,
    ) -> Self {
        let max_depth = depth_for_difficulty(difficulty);
        info!(%engine_color, max_depth, "game created");
        Self {
            catalog: MoveCatalog::global(),
            board,
            config,
            selector: MoveSelector::with_options(engine_color, config.search_options()),
            max_depth,
            depth_increased: false,
        }
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn engine_color(&self) -> Color {
        self.selector.engine_color()
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    pub fn is_engine_turn(&self) -> bool {
        self.board.player_to_move() == self.engine_color()
    }

    fn legal_moves(&self) -> Vec<Move> {
        ValidMoveSet::generate_with(self.catalog, &self.board, self.config.generator_options())
            .into_my_moves()
    }

    /// Apply the player's move, given in long notation. Returns the reply
    /// string for the move as actually played.
    pub fn apply_player_move(&mut self, text: &str) -> Result<String, GameError> {
        let to_move = self.board.player_to_move();
        if to_move == self.engine_color() {
            return Err(GameError::WrongTurn(to_move));
        }
        let wanted = Move::parse_notation(text, to_move)?;

        let Some(mv) = self.legal_moves().into_iter().find(|m| matches_request(m, &wanted)) else {
            warn!(input = text, "rejected illegal move");
            return Err(GameError::IllegalMove(wanted.to_string()));
        };
        debug!(%mv, "player move");
        Ok(self.play(mv))
    }

    /// Search for and apply the engine's move.
    pub fn engine_move(&mut self) -> Result<String, GameError> {
        let to_move = self.board.player_to_move();
        if to_move != self.engine_color() {
            return Err(GameError::WrongTurn(to_move));
        }

        let result = self.selector.search(self.catalog, &self.board, self.max_depth);
        let mv = result.best_move.ok_or(GameError::NoLegalMoves(to_move))?;
        self.board.set_score(result.score);
        debug!(%mv, score = result.score, nodes = result.nodes, "engine move");
        let reply = self.play(mv);

        // Deeper searches start with the engine's next move
        if self.board.is_end_game()
            && self.config.increase_end_game_difficulty
            && !self.depth_increased
        {
            self.max_depth = self
                .max_depth
                .saturating_add(self.config.end_game_difficulty_increase);
            self.depth_increased = true;
            info!(max_depth = self.max_depth, "end game reached, searching deeper");
        }
        Ok(reply)
    }

    /// Apply a known-legal move and describe the resulting position.
    fn play(&mut self, mut mv: Move) -> String {
        self.board.make_move(mv);
        mv.check = self.board.in_check(self.board.player_to_move());

        let code = self.stalemate_code();
        if code == StalemateCode::None && mv.check && self.legal_moves().is_empty() {
            mv.checkmate = true;
        }
        format!("{mv} {code}")
    }

    /// Why the game is over for the side to move, if it is. Checkmate is
    /// reported on the move itself, not here.
    pub fn stalemate_code(&self) -> StalemateCode {
        if self.legal_moves().is_empty() {
            if self.board.in_check(self.board.player_to_move()) {
                StalemateCode::None
            } else {
                StalemateCode::NoLegalMoves
            }
        } else if self.board.is_stalemate_via_fifty_moves() {
            StalemateCode::FiftyMoves
        } else if self.board.is_stalemate_via_three_move_repetition() {
            StalemateCode::Repetition
        } else {
            StalemateCode::None
        }
    }
}

/// A bare pawn move onto the last rank stands for the queen promotion.
fn matches_request(generated: &Move, wanted: &Move) -> bool {
    if wanted.is_castle() {
        return generated.from == wanted.from && generated.to == wanted.to && generated.is_castle();
    }
    generated.same_squares(wanted)
        || (generated.from == wanted.from
            && generated.to == wanted.to
            && wanted.promo.is_none()
            && generated.promo == Some(chessmate_core::PieceKind::Queen))
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
