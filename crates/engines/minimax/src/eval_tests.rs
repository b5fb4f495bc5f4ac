use super::*;
use chessmate_core::MoveCatalog;

fn scored(fen: &str, engine: Color) -> i32 {
    let board = BoardState::from_fen(fen).unwrap();
    let vms = ValidMoveSet::generate(MoveCatalog::global(), &board);
    Evaluator::new(engine).score(&board, &vms)
}

#[test]
fn test_startpos_is_tempo_only() {
    let board = BoardState::new();
    let vms = ValidMoveSet::generate(MoveCatalog::global(), &board);
    let white = Evaluator::new(Color::White).score(&board, &vms);
    let black = Evaluator::new(Color::Black).score(&board, &vms);
    assert_eq!(white, TEMPO);
    assert_eq!(black, -white);
}

#[test]
fn test_checkmate_scores_king_value() {
    // Fool's mate, white to move and mated
    let fen = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
    assert_eq!(scored(fen, Color::White), -KING_VALUE);
    assert_eq!(scored(fen, Color::Black), KING_VALUE);
}

#[test]
fn test_stalemate_scores_zero() {
    assert_eq!(scored("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1", Color::White), 0);
    assert_eq!(scored("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1", Color::Black), 0);
}

#[test]
fn test_fifty_move_draw_scores_zero() {
    assert_eq!(scored("4k3/8/8/8/8/8/8/Q3K3 w - - 50 90", Color::White), 0);
}

#[test]
fn test_material_advantage_is_relative_to_engine() {
    // White is a queen up
    let fen = "4k3/pppp4/8/8/8/8/PPPP4/3QK3 w - - 0 1";
    let white = scored(fen, Color::White);
    assert!(white > 800, "expected a large white advantage, got {white}");
    assert_eq!(scored(fen, Color::Black), -white);
}

#[test]
fn test_hanging_piece_is_penalised() {
    // Same material; in the second position the black knight on d5 is
    // attacked by the e4 pawn and undefended
    let safe = scored("4k3/8/8/8/n3P3/8/8/4K3 w - - 0 1", Color::White);
    let hanging = scored("4k3/8/8/3n4/4P3/8/8/4K3 w - - 0 1", Color::White);
    assert!(hanging > safe);
}

#[test]
fn test_castled_bonus() {
    let mut castled = BoardState::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    castled.make_move(chessmate_core::Move::castle(Color::White, true));
    castled.make_move(chessmate_core::Move::new(60, 59, PieceKind::King));
    let plain = BoardState::from_fen("3k4/8/8/8/8/8/8/5RK1 w - - 2 2").unwrap();

    let eval = Evaluator::new(Color::White);
    let score = |b: &BoardState| eval.score(b, &ValidMoveSet::generate(MoveCatalog::global(), b));
    // Castled bonus, and no penalty for the rook having left its corner
    assert_eq!(score(&castled) - score(&plain), CASTLED_BONUS + 10);
}

#[test]
fn test_repeated_calls_do_not_leak_state() {
    let board = BoardState::from_fen("4k3/pp6/8/8/8/8/PP1P4/2B1KB2 w - - 0 1").unwrap();
    let vms = ValidMoveSet::generate(MoveCatalog::global(), &board);
    let eval = Evaluator::new(Color::White);
    let first = eval.score(&board, &vms);
    for _ in 0..5 {
        assert_eq!(eval.score(&board, &vms), first);
    }
}
