use crate::{
    board::BoardState,
    catalog::MoveCatalog,
    movegen::{CheckPolicy, GeneratorOptions, PromotionPolicy, legal_moves},
};

/// Options perft counts are defined under: king-safe moves, every promotion.
pub const PERFT_OPTIONS: GeneratorOptions = GeneratorOptions {
    check_policy: CheckPolicy::Strict,
    promotion_policy: PromotionPolicy::AllPieces,
};

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`.
pub fn perft(board: &BoardState, depth: u8) -> u64 {
    perft_with(MoveCatalog::global(), board, depth, PERFT_OPTIONS)
}

/// Perft under explicit generator options. Each branch works on its own copy.
pub fn perft_with(
    catalog: &MoveCatalog,
    board: &BoardState,
    depth: u8,
    options: GeneratorOptions,
) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = legal_moves(catalog, board, options);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .into_iter()
        .map(|mv| {
            let mut child = board.clone();
            child.make_move(mv);
            perft_with(catalog, &child, depth - 1, options)
        })
        .sum()
}

/// Node count below each root move, in generation order.
pub fn divide(board: &BoardState, depth: u8) -> Vec<(String, u64)> {
    let catalog = MoveCatalog::global();
    legal_moves(catalog, board, PERFT_OPTIONS)
        .into_iter()
        .map(|mv| {
            let mut child = board.clone();
            child.make_move(mv);
            let nodes = perft_with(catalog, &child, depth.saturating_sub(1), PERFT_OPTIONS);
            (mv.to_string(), nodes)
        })
        .collect()
}
