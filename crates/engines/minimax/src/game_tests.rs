use rayon::prelude::*;

use super::*;

fn game_at(fen: &str, engine: Color, difficulty: u8) -> ChessGame {
    ChessGame::from_board(
        engine,
        difficulty,
        GameConfig::default(),
        BoardState::from_fen(fen).unwrap(),
    )
}

fn first_legal(game: &ChessGame) -> String {
    ValidMoveSet::generate(MoveCatalog::global(), game.board()).my_moves()[0].to_string()
}

fn play_all(board: &mut BoardState, moves: &[&str]) {
    for text in moves {
        board.make_move(Move::from_notation(text, board.player_to_move()));
    }
}

#[test]
fn test_new_game_depth() {
    let game = ChessGame::new(Color::Black, 2, GameConfig::default());
    assert_eq!(game.max_depth(), 5);
    assert_eq!(game.engine_color(), Color::Black);
    assert!(!game.is_engine_turn());
}

#[test]
fn test_player_move_reply_format() {
    let mut game = ChessGame::new(Color::Black, 0, GameConfig::default());
    assert_eq!(game.apply_player_move("e2e4").unwrap(), "e2e4 0");
    assert!(game.is_engine_turn());

    let reply = game.engine_move().unwrap();
    let tokens: Vec<&str> = reply.split(' ').collect();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[1], "0");
    assert!(Move::parse_notation(tokens[0], Color::Black).is_ok());
    assert_eq!(game.board().player_to_move(), Color::White);
}

#[test]
fn test_rejects_bad_moves() {
    let mut game = ChessGame::new(Color::Black, 0, GameConfig::default());
    assert_eq!(
        game.apply_player_move("e2e5"),
        Err(GameError::IllegalMove("e2e5".to_string()))
    );
    assert!(matches!(
        game.apply_player_move("hello"),
        Err(GameError::Notation(_))
    ));
    assert_eq!(game.engine_move(), Err(GameError::WrongTurn(Color::White)));
    // Nothing was applied
    assert_eq!(game.board(), &BoardState::new());
}

#[test]
fn test_checkmate_is_flagged_on_move() {
    let mut game = game_at("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1", Color::Black, 0);
    assert_eq!(game.apply_player_move("Qe1e8").unwrap(), "Qe1e8# 0");
    assert_eq!(game.engine_move(), Err(GameError::NoLegalMoves(Color::Black)));
}

#[test]
fn test_stalemate_code_no_moves() {
    let mut game = game_at("k7/8/8/2Q5/8/8/8/2K5 w - - 0 1", Color::Black, 0);
    assert_eq!(game.apply_player_move("Qc5b6").unwrap(), "Qc5b6 1");
    assert_eq!(game.stalemate_code(), StalemateCode::NoLegalMoves);
}

#[test]
fn test_stalemate_code_fifty_moves() {
    let mut game = game_at("4k3/8/8/8/8/8/8/R3K3 w - - 49 80", Color::Black, 0);
    assert_eq!(game.apply_player_move("Ra1a2").unwrap(), "Ra1a2 2");
}

#[test]
fn test_stalemate_code_repetition() {
    let mut board = BoardState::new();
    play_all(
        &mut board,
        &["Ng1f3", "Ng8f6", "Nf3g1", "Nf6g8", "Ng1f3", "Ng8f6", "Nf3g1"],
    );
    let mut game = ChessGame::from_board(Color::White, 0, GameConfig::default(), board);
    assert_eq!(game.apply_player_move("Nf6g8").unwrap(), "Nf6g8 3");
    assert_eq!(game.stalemate_code(), StalemateCode::Repetition);
}

#[test]
fn test_bare_promotion_means_queen() {
    let mut game = game_at("8/P6k/8/8/8/8/8/K7 w - - 0 1", Color::Black, 0);
    assert_eq!(game.apply_player_move("a7a8").unwrap(), "a7a8=Q 0");
    assert!(game.board().is_queen(56));
}

#[test]
fn test_player_castles() {
    let mut game = game_at("4k3/8/8/8/8/8/8/4K2R w K - 0 1", Color::Black, 0);
    assert_eq!(game.apply_player_move("O-O").unwrap(), "O-O 0");
    assert!(game.board().has_castled(Color::White));
}

#[test]
fn test_castle_with_check_is_undecorated() {
    // Rook lands on f1 facing the king on f8
    let mut game = game_at("5k2/8/8/8/8/8/8/4K2R w K - 0 1", Color::Black, 0);
    assert_eq!(game.apply_player_move("O-O").unwrap(), "O-O 0");
    assert!(game.board().in_check(Color::Black));
}

#[test]
fn test_end_game_increases_depth_once() {
    let mut game = game_at("4k3/8/8/8/8/8/8/R3K3 w - - 0 1", Color::White, 0);
    assert_eq!(game.max_depth(), 1);
    game.engine_move().unwrap();
    assert_eq!(game.max_depth(), 3);

    let reply = first_legal(&game);
    game.apply_player_move(&reply).unwrap();
    game.engine_move().unwrap();
    assert_eq!(game.max_depth(), 3);
}

#[test]
fn test_end_game_increase_follows_engine_move() {
    // Ten pieces; taking the rook starts the end game
    let mut game = game_at("4k3/ppp5/8/8/8/8/PPP1r3/R3K3 w - - 0 1", Color::Black, 0);
    assert!(!game.board().is_end_game());
    game.apply_player_move("Ke1xe2").unwrap();
    assert!(game.board().is_end_game());
    assert_eq!(game.max_depth(), 1);

    game.engine_move().unwrap();
    assert_eq!(game.max_depth(), 3);
}

#[test]
fn test_end_game_increase_can_be_disabled() {
    let config = GameConfig {
        increase_end_game_difficulty: false,
        ..GameConfig::default()
    };
    let board = BoardState::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
    let mut game = ChessGame::from_board(Color::White, 0, config, board);
    game.engine_move().unwrap();
    assert_eq!(game.max_depth(), 1);
}

#[test]
fn test_concurrent_games_share_catalog() {
    // Many games searching at once against the one global catalog
    let transcripts: Vec<Vec<String>> = (0..8)
        .into_par_iter()
        .map(|_| {
            let mut game = ChessGame::new(Color::White, 1, GameConfig::default());
            let mut out = Vec::new();
            for _ in 0..3 {
                out.push(game.engine_move().unwrap());
                let reply = first_legal(&game);
                out.push(game.apply_player_move(&reply).unwrap());
            }
            out
        })
        .collect();

    assert_eq!(transcripts[0].len(), 6);
    assert!(transcripts.iter().all(|t| t == &transcripts[0]));
}
