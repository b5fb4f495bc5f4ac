//! Per-ply move derivation.
//!
//! [`ValidMoveSet::generate`] walks the [`MoveCatalog`] for every piece on the
//! board and produces the mover's move list, the opponent's move list, and
//! two per-square weight maps: how strongly the opponent attacks a square and
//! how strongly the mover defends it. Lists come out in catalog order, piece
//! by piece from a1 upwards.

use serde::{Deserialize, Serialize};

use crate::board::BoardState;
use crate::catalog::MoveCatalog;
use crate::chess_move::Move;
use crate::types::*;

/// Soft bound on moves in one list; used as the allocation hint and checked in
/// tests. Lists grow past it if a position ever needs more.
pub const MOVE_LIST_CAPACITY: usize = 218;

/// Whether the mover's list drops moves that leave its own king attacked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckPolicy {
    #[default]
    Strict,
    /// Pseudo-legal moves; king safety is left to the caller.
    Permissive,
}

/// Which pieces a promoting pawn may become in generated moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionPolicy {
    #[default]
    QueenOnly,
    AllPieces,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub check_policy: CheckPolicy,
    pub promotion_policy: PromotionPolicy,
}

/// Contribution of one covering piece to a square's attack or defend value.
pub const fn attack_weight(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 6,
        PieceKind::Knight | PieceKind::Bishop => 3,
        PieceKind::Rook => 2,
        PieceKind::Queen | PieceKind::King => 1,
    }
}

#[derive(Clone, Debug)]
pub struct ValidMoveSet {
    my_moves: Vec<Move>,
    opp_moves: Vec<Move>,
    attack: [i32; 64],
    defend: [i32; 64],
}

impl ValidMoveSet {
    pub fn generate(catalog: &MoveCatalog, board: &BoardState) -> Self {
        Self::generate_with(catalog, board, GeneratorOptions::default())
    }

    pub fn generate_with(
        catalog: &MoveCatalog,
        board: &BoardState,
        options: GeneratorOptions,
    ) -> Self {
        let mover = board.player_to_move();
        let mut defend = [0; 64];
        let mut attack = [0; 64];

        let mut my_moves = side_moves(catalog, board, mover, options, true, &mut defend);
        if options.check_policy == CheckPolicy::Strict {
            keep_king_safe(board, mover, &mut my_moves);
        }
        let opp_moves = side_moves(catalog, board, mover.other(), options, false, &mut attack);

        Self {
            my_moves,
            opp_moves,
            attack,
            defend,
        }
    }

    /// Legal moves for the side to move.
    pub fn my_moves(&self) -> &[Move] {
        &self.my_moves
    }

    pub fn into_my_moves(self) -> Vec<Move> {
        self.my_moves
    }

    /// The opponent's pseudo-legal replies, castling excluded.
    pub fn opp_moves(&self) -> &[Move] {
        &self.opp_moves
    }

    /// Weighted opponent coverage of `sq`.
    pub fn attack_value(&self, sq: u8) -> i32 {
        self.attack[sq as usize]
    }

    /// Weighted coverage of `sq` by the side to move.
    pub fn defend_value(&self, sq: u8) -> i32 {
        self.defend[sq as usize]
    }

    pub fn has_moves(&self) -> bool {
        !self.my_moves.is_empty()
    }
}

/// Moves for the side to move only, skipping the opponent list and the
/// weight maps.
pub fn legal_moves(catalog: &MoveCatalog, board: &BoardState, options: GeneratorOptions) -> Vec<Move> {
    let mover = board.player_to_move();
    let mut scratch = [0; 64];
    let mut moves = side_moves(catalog, board, mover, options, true, &mut scratch);
    if options.check_policy == CheckPolicy::Strict {
        keep_king_safe(board, mover, &mut moves);
    }
    moves
}

/// Drop moves that leave `mover` in check; flag the survivors that give check.
fn keep_king_safe(board: &BoardState, mover: Color, moves: &mut Vec<Move>) {
    moves.retain_mut(|mv| {
        let mut child = board.clone();
        child.make_move(*mv);
        mv.check = child.in_check(mover.other());
        !child.in_check(mover)
    });
}

fn side_moves(
    catalog: &MoveCatalog,
    board: &BoardState,
    color: Color,
    options: GeneratorOptions,
    castles: bool,
    cover: &mut [i32; 64],
) -> Vec<Move> {
    let mut out = Vec::with_capacity(MOVE_LIST_CAPACITY);
    for from in board.color_mask(color) {
        let Some(piece) = board.piece_at(from) else {
            continue;
        };
        let weight = attack_weight(piece.kind);
        match piece.kind {
            PieceKind::Pawn => gen_pawn(catalog, board, from, color, options, cover, &mut out),
            PieceKind::Knight => {
                for &to in catalog.knight_targets(from) {
                    cover[to as usize] += weight;
                    push_step(board, from, to, PieceKind::Knight, color, &mut out);
                }
            }
            PieceKind::King => {
                for &to in catalog.king_targets(from) {
                    if (file_of(to) - file_of(from)).abs() == 2 {
                        if castles {
                            gen_castle(board, from, to, color, &mut out);
                        }
                        continue;
                    }
                    cover[to as usize] += weight;
                    push_step(board, from, to, PieceKind::King, color, &mut out);
                }
            }
            kind => {
                for &dir in MoveCatalog::slider_directions(kind) {
                    for &to in catalog.ray(dir, from) {
                        cover[to as usize] += weight;
                        if board.is_color(to, color) {
                            break;
                        }
                        let capture = !board.is_empty(to);
                        let mut mv = Move::new(from, to, kind);
                        mv.capture = capture;
                        out.push(mv);
                        if capture {
                            break;
                        }
                    }
                }
            }
        }
    }
    out
}

fn push_step(board: &BoardState, from: u8, to: u8, kind: PieceKind, color: Color, out: &mut Vec<Move>) {
    if board.is_color(to, color) {
        return;
    }
    let mut mv = Move::new(from, to, kind);
    mv.capture = !board.is_empty(to);
    out.push(mv);
}

fn gen_pawn(
    catalog: &MoveCatalog,
    board: &BoardState,
    from: u8,
    color: Color,
    options: GeneratorOptions,
    cover: &mut [i32; 64],
    out: &mut Vec<Move>,
) {
    let weight = attack_weight(PieceKind::Pawn);
    let mut blocked = false;
    for &to in catalog.pawn_targets(color, from) {
        if file_of(to) != file_of(from) {
            cover[to as usize] += weight;
            if board.is_color(to, color.other()) {
                push_pawn(from, to, true, color, options, out);
            } else if board.en_passant_square() == Some(to)
                && board.en_passant_color() == Some(color.other())
            {
                let mut mv = Move::new(from, to, PieceKind::Pawn);
                mv.capture = true;
                mv.en_passant = true;
                out.push(mv);
            }
        } else {
            // Forward pushes; the double push follows the single one.
            if blocked || !board.is_empty(to) {
                blocked = true;
                continue;
            }
            push_pawn(from, to, false, color, options, out);
        }
    }
}

fn push_pawn(from: u8, to: u8, capture: bool, color: Color, options: GeneratorOptions, out: &mut Vec<Move>) {
    let mut mv = Move::new(from, to, PieceKind::Pawn);
    mv.capture = capture;
    if color.relative_rank(rank_of(to)) != 7 {
        out.push(mv);
        return;
    }
    match options.promotion_policy {
        PromotionPolicy::QueenOnly => out.push(mv.with_promo(PieceKind::Queen)),
        PromotionPolicy::AllPieces => {
            out.extend(PieceKind::PROMOTIONS.iter().map(|&p| mv.with_promo(p)));
        }
    }
}

/// King on its home square, king and rook unmoved, rook still on its corner,
/// every square between them empty, and the king neither in check nor passing
/// over or landing on an attacked square.
fn gen_castle(board: &BoardState, from: u8, to: u8, color: Color, out: &mut Vec<Move>) {
    let home = color.home_rank();
    if sq(4, home) != Some(from) || board.has_king_moved(color) || board.in_check(color) {
        return;
    }
    let kingside = file_of(to) > file_of(from);
    let (rook_file, between, transit): (i8, &[i8], [i8; 2]) = if kingside {
        if board.has_kingside_rook_moved(color) {
            return;
        }
        (7, &[5, 6], [5, 6])
    } else {
        if board.has_queenside_rook_moved(color) {
            return;
        }
        (0, &[1, 2, 3], [3, 2])
    };

    let rook_home = sq(rook_file, home);
    let rook_present = rook_home
        .and_then(|s| board.piece_at(s))
        .is_some_and(|p| p == Piece::new(color, PieceKind::Rook));
    if !rook_present {
        return;
    }
    let clear = between
        .iter()
        .filter_map(|&f| sq(f, home))
        .all(|s| board.is_empty(s));
    let safe = transit
        .iter()
        .filter_map(|&f| sq(f, home))
        .all(|s| !board.is_under_attack(s, color.other()));
    if clear && safe {
        out.push(Move::castle(color, kingside));
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
