//! Static position evaluation.
//!
//! Scores are accumulated white-relative and flipped at the end for a black
//! engine, so positive always favours the engine.

use chessmate_core::{BoardState, Color, PieceKind, ValidMoveSet, file_of, mirror, rank_of};

/// Material values, indexed by `PieceKind::idx()`.
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
pub const PIECE_VALUES: [i32; 6] = [100, 320, 325, 500, 975, KING_VALUE];

/// Value of the king; also the magnitude of a checkmate score.
pub const KING_VALUE: i32 = 32767;

const CHECK_BONUS: i32 = 75;
const CHECK_BONUS_END_GAME: i32 = 95;
const TEMPO: i32 = 10;
const CASTLED_BONUS: i32 = 40;

// Tables go from index 0 = a1 to 63 = h8, from white's point of view.
#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  0,   0,   0,   0,   0,  0,  0,
     5, 10,  10, -25, -25,  10, 10,  5,
     5, -5, -10,   0,   0, -10, -5,  5,
     0,  0,   0,  25,  25,   0,  0,  0,
     5,  5,  10,  27,  27,  10,  5,  5,
    10, 10,  20,  30,  30,  20, 10, 10,
    50, 50,  50,  50,  50,  50, 50, 50,
     0,  0,   0,   0,   0,   0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50, -40, -20, -30, -30, -20, -40, -50,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    -20, -10, -40, -10, -10, -40, -10, -20,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const KING_TABLE: [i32; 64] = [
     20,  30,  10,   0,   0,  10,  30,  20,
     20,  20,   0,   0,   0,   0,  20,  20,
    -10, -20, -20, -20, -20, -20, -20, -10,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
];

#[rustfmt::skip]
const KING_TABLE_END_GAME: [i32; 64] = [
    -50, -30, -30, -30, -30, -30, -30, -50,
    -30, -30,   0,   0,   0,   0, -30, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -20, -10,   0,   0, -10, -20, -30,
    -50, -40, -30, -20, -20, -30, -40, -50,
];

/// Per-call scratch: pawn weight per file and bishops seen, per colour.
#[derive(Default)]
struct Tally {
    pawn_files: [[i32; 8]; 2],
    bishops: [u32; 2],
}

/// Scores positions for one engine colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluator {
    engine_color: Color,
}

impl Evaluator {
    pub fn new(engine_color: Color) -> Self {
        Self { engine_color }
    }

    pub fn engine_color(&self) -> Color {
        self.engine_color
    }

    /// Evaluate `board`, given the move set derived from it.
    ///
    /// Returns `±KING_VALUE` for checkmate and 0 for any drawn position.
    pub fn score(&self, board: &BoardState, vms: &ValidMoveSet) -> i32 {
        let white = white_score(board, vms);
        match self.engine_color {
            Color::White => white,
            Color::Black => -white,
        }
    }
}

fn sign(color: Color) -> i32 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}

fn white_score(board: &BoardState, vms: &ValidMoveSet) -> i32 {
    let to_move = board.player_to_move();
    if !vms.has_moves() {
        return if board.in_check(to_move) {
            -sign(to_move) * KING_VALUE
        } else {
            0
        };
    }
    if board.is_stalemate_via_fifty_moves() || board.is_stalemate_via_three_move_repetition() {
        return 0;
    }

    let mut score = 0;
    let check_bonus = if board.is_end_game() {
        CHECK_BONUS_END_GAME
    } else {
        CHECK_BONUS
    };
    if board.is_white_in_check() {
        score -= check_bonus;
    } else if board.is_black_in_check() {
        score += check_bonus;
    }

    score += sign(to_move) * TEMPO;
    for color in Color::ALL {
        if board.has_castled(color) {
            score += sign(color) * CASTLED_BONUS;
        }
    }

    // Moves available from each square, for whichever side owns it
    let mut mobility = [0i32; 64];
    for mv in vms.my_moves().iter().chain(vms.opp_moves()) {
        mobility[mv.from as usize] += 1;
    }

    let mut tally = Tally::default();
    for s in board.occupied() {
        let Some(piece) = board.piece_at(s) else {
            continue;
        };
        let value = piece_score(board, vms, &mobility, &mut tally, s, piece.color, piece.kind);
        score += sign(piece.color) * value;
    }

    score + pawn_structure(&tally)
}

fn piece_score(
    board: &BoardState,
    vms: &ValidMoveSet,
    mobility: &[i32; 64],
    tally: &mut Tally,
    s: u8,
    color: Color,
    kind: PieceKind,
) -> i32 {
    let loc = match color {
        Color::White => s as usize,
        Color::Black => mirror(s) as usize,
    };
    let file = file_of(s);
    let relative_rank = color.relative_rank(rank_of(s));
    let end_game = board.is_end_game();

    let (defended, attacked) = if color == board.player_to_move() {
        (vms.defend_value(s), vms.attack_value(s))
    } else {
        (vms.attack_value(s), vms.defend_value(s))
    };

    let mut score = defended - attacked;
    if defended < attacked {
        // Hanging
        score -= (attacked - defended) * 10;
    }
    score += mobility[s as usize];
    score += PIECE_VALUES[kind.idx()];

    match kind {
        PieceKind::Pawn => {
            score += PAWN_TABLE[loc];
            if file == 0 || file == 7 {
                score -= 15;
            }
            let files = &mut tally.pawn_files[color.idx()];
            let f = file as usize;
            if files[f] > 0 {
                // Doubled
                score -= 16;
            }
            if attacked == 0 {
                match relative_rank {
                    6 => files[f] += if defended > 0 { 250 } else { 200 },
                    5 => files[f] += if defended > 0 { 125 } else { 100 },
                    _ => {}
                }
            }
            files[f] += 10;
        }
        PieceKind::Knight => {
            score += KNIGHT_TABLE[loc];
            if end_game {
                score -= 10;
            }
        }
        PieceKind::Bishop => {
            score += BISHOP_TABLE[loc];
            if end_game {
                score += 10;
            }
            tally.bishops[color.idx()] += 1;
            if tally.bishops[color.idx()] >= 2 {
                score += 10;
            }
        }
        PieceKind::Rook => {
            let on_corner = relative_rank == 0 && (file == 0 || file == 7);
            if !board.has_castled(color) && !on_corner {
                score -= 10;
            }
        }
        PieceKind::Queen => {
            if board.has_queen_moved(color) && !end_game {
                score -= 10;
            }
        }
        PieceKind::King => {
            if mobility[s as usize] < 2 {
                score -= 5;
            }
            if end_game {
                score += KING_TABLE_END_GAME[loc];
            } else {
                score += KING_TABLE[loc];
                if board.has_king_moved(color) && !board.has_castled(color) {
                    score -= 30;
                }
            }
        }
    }
    score
}

/// Isolated-pawn penalties and passed-pawn bonuses from the file tallies.
fn pawn_structure(tally: &Tally) -> i32 {
    let mut score = 0;
    for color in Color::ALL {
        let own = &tally.pawn_files[color.idx()];
        let theirs = &tally.pawn_files[color.other().idx()];
        for f in 0..8 {
            if own[f] == 0 {
                continue;
            }
            let left_empty = f > 0 && own[f - 1] == 0;
            let right_empty = f < 7 && own[f + 1] == 0;
            if left_empty || right_empty {
                score -= sign(color) * 15;
            }
            if theirs[f] == 0 {
                score += sign(color) * own[f];
            }
        }
    }
    score
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
