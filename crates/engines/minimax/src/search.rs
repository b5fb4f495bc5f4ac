//! Minimax search with alpha-beta pruning

use std::time::Instant;

use chessmate_core::{
    BoardState, Color, GeneratorOptions, Move, MoveCatalog, SearchResult, ValidMoveSet,
};
use tracing::{debug, trace};

use crate::eval::Evaluator;

/// Bound used for the initial (alpha, beta) window.
pub const INF: i32 = i32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Alpha-beta cutoffs. Off searches the full tree, for comparison.
    pub pruning: bool,
    pub generator: GeneratorOptions,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            pruning: true,
            generator: GeneratorOptions::default(),
        }
    }
}

/// Picks moves for one engine colour.
///
/// Every node works on its own copy of the board; the position handed to
/// [`MoveSelector::get_best_move`] is never touched.
#[derive(Debug, Clone)]
pub struct MoveSelector {
    evaluator: Evaluator,
    options: SearchOptions,
    nodes: u64,
}

impl MoveSelector {
    pub fn new(engine_color: Color) -> Self {
        Self::with_options(engine_color, SearchOptions::default())
    }

    pub fn with_options(engine_color: Color, options: SearchOptions) -> Self {
        Self {
            evaluator: Evaluator::new(engine_color),
            options,
            nodes: 0,
        }
    }

    pub fn engine_color(&self) -> Color {
        self.evaluator.engine_color()
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// Nodes visited by the last search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Search `max_depth` plies and return the best move for the engine,
    /// which must be the side to move.
    ///
    /// Every root move is searched. Among equally scored moves the first in
    /// generation order wins. `best_move` is `None` when the engine has no
    /// legal move; the score is then the static evaluation.
    pub fn get_best_move(
        &mut self,
        catalog: &MoveCatalog,
        board: &BoardState,
        max_depth: u8,
    ) -> SearchResult {
        let start = Instant::now();
        self.nodes = 1;

        let vms = ValidMoveSet::generate_with(catalog, board, self.options.generator);
        if !vms.has_moves() {
            let score = self.evaluator.score(board, &vms);
            debug!(score, "no legal moves at root");
            return SearchResult {
                best_move: None,
                score,
                depth: max_depth,
                nodes: self.nodes,
            };
        }

        let child_depth = max_depth.saturating_sub(1);
        let mut alpha = -INF;
        let mut best: Option<(Move, i32)> = None;

        for &mv in vms.my_moves() {
            let mut child = board.clone();
            child.make_move(mv);
            let value = self.min_value(catalog, &child, child_depth, alpha, INF);
            trace!(%mv, value, "root move");

            if best.is_none_or(|(_, s)| value > s) {
                best = Some((mv, value));
            }
            if self.options.pruning {
                alpha = alpha.max(value);
            }
        }

        let score = best.map_or(0, |(_, s)| s);
        debug!(
            depth = max_depth,
            nodes = self.nodes,
            score,
            best = %best.map_or_else(|| "(none)".to_string(), |(m, _)| m.to_string()),
            elapsed = ?start.elapsed(),
            "search finished"
        );

        SearchResult {
            best_move: best.map(|(m, _)| m),
            score,
            depth: max_depth,
            nodes: self.nodes,
        }
    }

    /// Value of `board` for the engine when the engine is to move.
    fn max_value(
        &mut self,
        catalog: &MoveCatalog,
        board: &BoardState,
        depth: u8,
        mut alpha: i32,
        beta: i32,
    ) -> i32 {
        self.nodes += 1;
        let vms = ValidMoveSet::generate_with(catalog, board, self.options.generator);
        if depth == 0 || !vms.has_moves() {
            return self.evaluator.score(board, &vms);
        }

        let mut v = -INF;
        for &mv in vms.my_moves() {
            let mut child = board.clone();
            child.make_move(mv);
            v = v.max(self.min_value(catalog, &child, depth - 1, alpha, beta));
            if self.options.pruning {
                if v >= beta {
                    return v;
                }
                alpha = alpha.max(v);
            }
        }
        v
    }

    /// Value of `board` for the engine when the opponent is to move.
    fn min_value(
        &mut self,
        catalog: &MoveCatalog,
        board: &BoardState,
        depth: u8,
        alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;
        let vms = ValidMoveSet::generate_with(catalog, board, self.options.generator);
        if depth == 0 || !vms.has_moves() {
            return self.evaluator.score(board, &vms);
        }

        let mut v = INF;
        for &mv in vms.my_moves() {
            let mut child = board.clone();
            child.make_move(mv);
            v = v.min(self.max_value(catalog, &child, depth - 1, alpha, beta));
            if self.options.pruning {
                if v <= alpha {
                    return v;
                }
                beta = beta.min(v);
            }
        }
        v
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
