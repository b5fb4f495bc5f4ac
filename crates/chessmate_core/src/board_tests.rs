use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::*;
use crate::catalog::MoveCatalog;
use crate::movegen::ValidMoveSet;

fn c(name: &str) -> u8 {
    coord_to_sq(name).unwrap()
}

fn play(board: &mut BoardState, moves: &[&str]) {
    for text in moves {
        let mv = Move::from_notation(text, board.player_to_move());
        assert!(mv.is_valid(), "bad test move {text}");
        board.make_move(mv);
    }
}

fn assert_invariants(b: &BoardState) {
    let mut union = Bitboard::EMPTY;
    for (i, &ka) in PieceKind::ALL.iter().enumerate() {
        for &kb in &PieceKind::ALL[i + 1..] {
            assert!((b.pieces(ka) & b.pieces(kb)).is_empty(), "{ka:?}/{kb:?} overlap");
        }
        union |= b.pieces(ka);
    }
    let white = b.color_mask(Color::White);
    let black = b.color_mask(Color::Black);
    assert!((white & black).is_empty());
    assert_eq!(union, white | black);

    for color in Color::ALL {
        let kings = b.pieces_of(color, PieceKind::King);
        assert!(kings.is_single());
        assert_eq!(b.king_square(color), kings.lsb());
    }
}

#[test]
fn test_startpos_layout() {
    let b = BoardState::new();
    assert_invariants(&b);
    assert_eq!(b.piece_count(), 32);
    assert!(b.is_rook(c("a1")) && b.is_white(c("a1")));
    assert!(b.is_queen(c("d8")) && b.is_black(c("d8")));
    assert!(b.is_empty(c("e4")));
    assert_eq!(b.king_square(Color::White), Some(c("e1")));
    assert_eq!(b.player_to_move(), Color::White);
    assert!(!b.is_end_game());
    assert_eq!(b, BoardState::from_fen(STARTPOS_FEN).unwrap());
}

#[test]
fn test_startpos_attacks() {
    let b = BoardState::new();
    assert!(b.is_under_attack(c("f3"), Color::White));
    assert!(b.is_under_attack(c("a6"), Color::Black));
    assert!(!b.is_under_attack(c("e4"), Color::White));
    // Own pieces are never in the attacked mask
    assert!(!b.is_under_attack(c("d2"), Color::White));
    assert!(!b.is_white_in_check() && !b.is_black_in_check());
}

#[test]
fn test_random_playouts_keep_invariants() {
    let catalog = MoveCatalog::global();
    let mut rng = StdRng::seed_from_u64(0xC4E55);
    for _ in 0..40 {
        let mut b = BoardState::new();
        for _ in 0..120 {
            let set = ValidMoveSet::generate(catalog, &b);
            let Some(&mv) = set.my_moves().choose(&mut rng) else {
                break;
            };
            b.make_move(mv);
            assert_invariants(&b);
            // Strict generation never leaves the mover in check
            assert!(!b.in_check(b.player_to_move().other()));
        }
    }
}

#[test]
fn test_make_move_is_deterministic() {
    let catalog = MoveCatalog::global();
    let mut rng = StdRng::seed_from_u64(7);
    let mut b = BoardState::new();
    for _ in 0..60 {
        let set = ValidMoveSet::generate(catalog, &b);
        let Some(&mv) = set.my_moves().choose(&mut rng) else {
            break;
        };
        let mut x = b.clone();
        let mut y = b.clone();
        x.make_move(mv);
        y.make_move(mv);
        assert_eq!(x, y);
        b = x;
    }
}

#[test]
fn test_fifty_move_counter() {
    let mut b = BoardState::new();
    play(&mut b, &["Ng1f3"]);
    assert_eq!(b.fifty_move_count(), 1);
    play(&mut b, &["Nb8c6", "Nf3g1"]);
    assert_eq!(b.fifty_move_count(), 3);
    play(&mut b, &["e7e5"]);
    assert_eq!(b.fifty_move_count(), 0);
    play(&mut b, &["Ng1f3", "Nc6d4", "Nf3xe5"]);
    assert_eq!(b.fifty_move_count(), 0);

    let mut b = BoardState::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 49 80").unwrap();
    assert!(!b.is_stalemate_via_fifty_moves());
    play(&mut b, &["Ra1a2"]);
    assert!(b.is_stalemate_via_fifty_moves());
}

#[test]
fn test_en_passant_set_and_cleared() {
    let mut b = BoardState::new();
    play(&mut b, &["e2e4"]);
    assert_eq!(b.en_passant_square(), Some(c("e3")));
    assert_eq!(b.en_passant_color(), Some(Color::White));
    play(&mut b, &["Ng8f6"]);
    assert_eq!(b.en_passant_square(), None);
}

#[test]
fn test_en_passant_capture_removes_pawn() {
    let mut b = BoardState::from_fen("4k3/8/8/3Pp3/8/8/8/4K3 w - e6 0 1").unwrap();
    play(&mut b, &["d5xe6ep"]);
    assert!(b.is_pawn(c("e6")) && b.is_white(c("e6")));
    assert!(b.is_empty(c("e5")));
    assert!(b.is_empty(c("d5")));
    assert_eq!(b.fifty_move_count(), 0);
    assert!(b.last_move().unwrap().en_passant);
    assert_invariants(&b);
}

#[test]
fn test_castling_moves_rook_and_sets_flags() {
    let mut b = BoardState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    play(&mut b, &["O-O"]);
    assert!(b.is_king(c("g1")));
    assert!(b.is_rook(c("f1")));
    assert!(b.is_empty(c("h1")));
    assert!(b.has_castled(Color::White));
    assert!(b.has_king_moved(Color::White));
    assert_eq!(b.king_square(Color::White), Some(c("g1")));

    play(&mut b, &["O-O-O"]);
    assert!(b.is_king(c("c8")));
    assert!(b.is_rook(c("d8")));
    assert!(b.is_empty(c("a8")));
    assert!(b.has_castled(Color::Black));
    assert_invariants(&b);
}

#[test]
fn test_rook_moves_and_captures_mark_flags() {
    let mut b = BoardState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    play(&mut b, &["Rh1h2"]);
    assert!(b.has_kingside_rook_moved(Color::White));
    assert!(!b.has_queenside_rook_moved(Color::White));
    assert!(!b.has_king_moved(Color::White));
    play(&mut b, &["Ra8xa1"]);
    assert!(b.has_queenside_rook_moved(Color::White));
    assert!(b.has_queenside_rook_moved(Color::Black));
}

#[test]
fn test_promotion_defaults_to_queen() {
    let mut b = BoardState::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
    play(&mut b, &["a7a8"]);
    assert!(b.is_queen(c("a8")));

    let mut b = BoardState::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
    play(&mut b, &["a7a8=N"]);
    assert!(b.is_knight(c("a8")));
    assert_eq!(b.pieces(PieceKind::Pawn), Bitboard::EMPTY);
}

#[test]
fn test_check_flags_follow_attacks() {
    let mut b = BoardState::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
    play(&mut b, &["Ra1a8"]);
    assert!(b.is_black_in_check());
    assert!(!b.is_white_in_check());
    assert!(b.in_check(b.player_to_move()));
}

#[test]
fn test_knight_shuffle_reaches_threefold() {
    let mut b = BoardState::new();
    let shuffle = ["Ng1f3", "Ng8f6", "Nf3g1", "Nf6g8"];
    play(&mut b, &shuffle);
    assert_eq!(b.repetition_count(), 2);
    assert!(!b.is_stalemate_via_three_move_repetition());
    play(&mut b, &shuffle[..3]);
    assert_eq!(b.repetition_count(), 2);
    play(&mut b, &shuffle[3..]);
    assert_eq!(b.repetition_count(), 3);
    assert!(b.is_stalemate_via_three_move_repetition());

    // A pawn move breaks the streak
    play(&mut b, &["e2e4"]);
    assert_eq!(b.repetition_count(), 1);
}

#[test]
fn test_repetition_ignores_lost_castling_rights() {
    let mut b = BoardState::from_fen("4k2r/8/8/8/8/8/8/4K2R w Kk - 0 1").unwrap();
    let shuffle = ["Rh1g1", "Rh8g8", "Rg1h1", "Rg8h8"];
    play(&mut b, &shuffle);
    play(&mut b, &shuffle);
    assert!(b.has_kingside_rook_moved(Color::White));
    assert!(b.has_kingside_rook_moved(Color::Black));
    // The first visit had castling rights, yet all three visits count
    assert_eq!(b.repetition_count(), 3);
}

#[test]
fn test_end_game_is_permanent() {
    let mut b = BoardState::from_fen("4k3/8/8/8/8/8/pppp4/4K3 w - - 0 1").unwrap();
    assert!(b.is_end_game());
    let mut fresh = BoardState::new();
    assert!(!fresh.is_end_game());
    fresh.set_end_game();
    assert!(fresh.is_end_game());
    play(&mut b, &["Ke1f2"]);
    assert!(b.is_end_game());
}

#[test]
fn test_cached_score() {
    let mut b = BoardState::new();
    assert_eq!(b.score(), 0);
    b.set_score(-42);
    assert_eq!(b.score(), -42);
}

#[test]
fn test_fen_errors() {
    assert_eq!(BoardState::from_fen("8/8 w"), Err(FenError::FieldCount(2)));
    assert_eq!(
        BoardState::from_fen("8/8/8 w - -"),
        Err(FenError::RankCount(3))
    );
    assert_eq!(
        BoardState::from_fen("8/8/8/8/8/8/8/7 w - -"),
        Err(FenError::RankWidth { rank: 1 })
    );
    assert_eq!(
        BoardState::from_fen("8/8/8/8/8/8/8/7x w - -"),
        Err(FenError::BadPiece('x'))
    );
    assert!(matches!(
        BoardState::from_fen("8/8/8/8/8/8/8/8 x - -"),
        Err(FenError::SideToMove(_))
    ));
    assert_eq!(
        BoardState::from_fen("8/8/8/8/8/8/8/8 w Z -"),
        Err(FenError::Castling('Z'))
    );
}

#[test]
fn test_display_renders_grid() {
    let text = BoardState::new().to_string();
    assert!(text.starts_with("8  r n b q k b n r"));
    assert!(text.contains("1  R N B Q K B N R"));
    assert!(text.ends_with("white to move"));
}
