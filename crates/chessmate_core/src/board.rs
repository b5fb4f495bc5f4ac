use std::fmt;

use crate::attacks::attacks_from;
use crate::bitboard::Bitboard;
use crate::chess_move::Move;
use crate::error::FenError;
use crate::types::*;

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// The end game starts once fewer than this many pieces remain.
pub const END_GAME_PIECES: u32 = 10;

/// Half-moves without a pawn move or capture before the game is drawn.
pub const FIFTY_MOVE_LIMIT: u32 = 50;

/// Bitboard position plus the scalar state the move generator and evaluator
/// read. Copied wholesale to explore a search branch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardState {
    pieces: [Bitboard; 6],
    colors: [Bitboard; 2],
    /// Squares each side attacks, own-occupied squares excluded.
    attacked: [Bitboard; 2],
    to_move: Color,
    king_sq: [Option<u8>; 2],
    king_moved: [bool; 2],
    queen_moved: [bool; 2],
    kingside_rook_moved: [bool; 2],
    queenside_rook_moved: [bool; 2],
    castled: [bool; 2],
    check: [bool; 2],
    end_game: bool,
    fifty_move_count: u32,
    repetition_streak: u32,
    en_passant: Option<(Color, u8)>, // colour of the pawn that advanced, square it passed
    last_move: Option<Move>,
    last_by: [Option<Move>; 2],
    score: i32,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    /// The standard starting position, white to move.
    pub fn new() -> Self {
        let mut b = Self::empty();
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            let f = f as u8;
            b.put_piece(f, Piece::new(Color::White, kind));
            b.put_piece(8 + f, Piece::new(Color::White, PieceKind::Pawn));
            b.put_piece(48 + f, Piece::new(Color::Black, PieceKind::Pawn));
            b.put_piece(56 + f, Piece::new(Color::Black, kind));
        }
        b.refresh();
        b
    }

    /// No pieces, white to move, nothing moved yet.
    pub fn empty() -> Self {
        Self {
            pieces: [Bitboard::EMPTY; 6],
            colors: [Bitboard::EMPTY; 2],
            attacked: [Bitboard::EMPTY; 2],
            to_move: Color::White,
            king_sq: [None; 2],
            king_moved: [false; 2],
            queen_moved: [false; 2],
            kingside_rook_moved: [false; 2],
            queenside_rook_moved: [false; 2],
            castled: [false; 2],
            check: [false; 2],
            end_game: false,
            fifty_move_count: 0,
            repetition_streak: 0,
            en_passant: None,
            last_move: None,
            last_by: [None; 2],
            score: 0,
        }
    }

    /// Load a position from Forsyth-Edwards Notation. The move counters are
    /// optional; castling availability maps onto the king/rook moved flags.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::FieldCount(parts.len()));
        }

        let mut b = Self::empty();

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            let mut file: i8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let kind = PieceKind::from_letter(ch).ok_or(FenError::BadPiece(ch))?;
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let s = sq(file, rank).ok_or(FenError::RankWidth { rank: 8 - rank_idx })?;
                    b.put_piece(s, Piece::new(color, kind));
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::RankWidth { rank: 8 - rank_idx });
                }
            }
            if file != 8 {
                return Err(FenError::RankWidth { rank: 8 - rank_idx });
            }
        }

        b.to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };

        let mut rights = [[false; 2]; 2]; // [colour][kingside, queenside]
        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => rights[0][0] = true,
                    'Q' => rights[0][1] = true,
                    'k' => rights[1][0] = true,
                    'q' => rights[1][1] = true,
                    _ => return Err(FenError::Castling(c)),
                }
            }
        }
        for color in Color::ALL {
            let [ks, qs] = rights[color.idx()];
            b.kingside_rook_moved[color.idx()] = !ks;
            b.queenside_rook_moved[color.idx()] = !qs;
            b.king_moved[color.idx()] = !ks && !qs;
        }

        if parts[3] != "-" {
            let s = coord_to_sq(parts[3]).ok_or_else(|| FenError::EnPassant(parts[3].to_string()))?;
            b.en_passant = Some((b.to_move.other(), s));
        }

        if let Some(half) = parts.get(4) {
            b.fifty_move_count = half
                .parse()
                .map_err(|_| FenError::Counter(half.to_string()))?;
        }
        if let Some(full) = parts.get(5) {
            full.parse::<u32>()
                .map_err(|_| FenError::Counter(full.to_string()))?;
        }

        b.refresh();
        Ok(b)
    }

    pub(crate) fn put_piece(&mut self, s: u8, piece: Piece) {
        self.remove_piece(s);
        self.pieces[piece.kind.idx()].set(s);
        self.colors[piece.color.idx()].set(s);
        if piece.kind == PieceKind::King {
            self.king_sq[piece.color.idx()] = Some(s);
        }
    }

    /// Clear whatever stands on `s`, returning it.
    fn remove_piece(&mut self, s: u8) -> Option<Piece> {
        let piece = self.piece_at(s)?;
        self.pieces[piece.kind.idx()].clear(s);
        self.colors[piece.color.idx()].clear(s);
        if piece.kind == PieceKind::King && self.king_sq[piece.color.idx()] == Some(s) {
            self.king_sq[piece.color.idx()] = None;
        }
        Some(piece)
    }

    /// Recompute attacked masks, check flags and the end-game phase.
    fn refresh(&mut self) {
        let occupied = self.occupied();
        for color in Color::ALL {
            let mut mask = Bitboard::EMPTY;
            for kind in PieceKind::ALL {
                let piece = Piece::new(color, kind);
                for s in self.pieces_of(color, kind) {
                    mask |= attacks_from(piece, s, occupied);
                }
            }
            self.attacked[color.idx()] = mask & !self.colors[color.idx()];
        }
        for color in Color::ALL {
            self.check[color.idx()] = match self.king_sq[color.idx()] {
                Some(k) => self.attacked[color.other().idx()].contains(k),
                None => false,
            };
        }
        if self.occupied().popcount() < END_GAME_PIECES {
            self.end_game = true;
        }
    }

    /// Apply `mv` for the side owning the piece on its origin square.
    ///
    /// No legality checking happens here: the move must come from the move
    /// generator (or be otherwise known legal) and both squares must be on
    /// the board.
    pub fn make_move(&mut self, mv: Move) {
        let (from, to) = (mv.from, mv.to);
        let piece = self
            .piece_at(from)
            .unwrap_or(Piece::new(self.to_move, mv.piece));
        let (color, kind) = (piece.color, piece.kind);
        let ci = color.idx();

        let ep_target = self.en_passant.map(|(_, s)| s);
        let is_ep = kind == PieceKind::Pawn
            && (mv.en_passant
                || (Some(to) == ep_target && file_of(from) != file_of(to) && self.is_empty(to)));

        let mut captured = self.remove_piece(to);
        if is_ep && let Some(victim) = sq(file_of(to), rank_of(from)) {
            captured = self.remove_piece(victim).or(captured);
        }
        if let Some(victim) = captured {
            self.note_rook_gone(victim, to);
        }

        self.remove_piece(from);
        let landed = match (kind, mv.promo) {
            (PieceKind::Pawn, promo) if color.relative_rank(rank_of(to)) == 7 => {
                promo.unwrap_or(PieceKind::Queen)
            }
            _ => kind,
        };
        self.put_piece(to, Piece::new(color, landed));

        match kind {
            PieceKind::King => {
                self.king_moved[ci] = true;
                let df = file_of(to) - file_of(from);
                if df.abs() == 2 {
                    let rank = rank_of(from);
                    let (rook_from, rook_to) = if df > 0 { (7, 5) } else { (0, 3) };
                    if let (Some(rf), Some(rt)) = (sq(rook_from, rank), sq(rook_to, rank))
                        && let Some(rook) = self.remove_piece(rf)
                    {
                        self.put_piece(rt, rook);
                    }
                    self.castled[ci] = true;
                    self.kingside_rook_moved[ci] |= df > 0;
                    self.queenside_rook_moved[ci] |= df < 0;
                }
            }
            PieceKind::Rook => self.note_rook_gone(piece, from),
            PieceKind::Queen => self.queen_moved[ci] = true,
            _ => {}
        }

        self.en_passant = if kind == PieceKind::Pawn && (rank_of(to) - rank_of(from)).abs() == 2 {
            sq(file_of(from), (rank_of(from) + rank_of(to)) / 2).map(|s| (color, s))
        } else {
            None
        };

        let capture = captured.is_some() || mv.capture || is_ep;
        if kind == PieceKind::Pawn || capture {
            self.fifty_move_count = 0;
        } else {
            self.fifty_move_count += 1;
        }

        let mut played = mv;
        played.piece = kind;
        played.capture = capture;
        played.en_passant = is_ep;

        let shuffle = |m: &Move| {
            m.piece != PieceKind::Pawn && !m.capture && m.promo.is_none() && !m.is_castle()
        };
        let undoes_previous = shuffle(&played)
            && self.last_by[ci]
                .is_some_and(|prev| shuffle(&prev) && prev.from == to && prev.to == from);
        self.repetition_streak = if undoes_previous {
            self.repetition_streak + 1
        } else {
            0
        };

        self.last_by[ci] = Some(played);
        self.last_move = Some(played);
        self.to_move = color.other();
        self.refresh();
    }

    /// Mark a rook that left (or was taken on) its starting corner.
    fn note_rook_gone(&mut self, piece: Piece, s: u8) {
        if piece.kind != PieceKind::Rook || rank_of(s) != piece.color.home_rank() {
            return;
        }
        match file_of(s) {
            0 => self.queenside_rook_moved[piece.color.idx()] = true,
            7 => self.kingside_rook_moved[piece.color.idx()] = true,
            _ => {}
        }
    }

    // Occupancy queries

    pub fn piece_at(&self, s: u8) -> Option<Piece> {
        let color = if self.colors[0].contains(s) {
            Color::White
        } else if self.colors[1].contains(s) {
            Color::Black
        } else {
            return None;
        };
        PieceKind::ALL
            .into_iter()
            .find(|k| self.pieces[k.idx()].contains(s))
            .map(|kind| Piece::new(color, kind))
    }

    pub fn is_pawn(&self, s: u8) -> bool {
        self.pieces[PieceKind::Pawn.idx()].contains(s)
    }
    pub fn is_knight(&self, s: u8) -> bool {
        self.pieces[PieceKind::Knight.idx()].contains(s)
    }
    pub fn is_bishop(&self, s: u8) -> bool {
        self.pieces[PieceKind::Bishop.idx()].contains(s)
    }
    pub fn is_rook(&self, s: u8) -> bool {
        self.pieces[PieceKind::Rook.idx()].contains(s)
    }
    pub fn is_queen(&self, s: u8) -> bool {
        self.pieces[PieceKind::Queen.idx()].contains(s)
    }
    pub fn is_king(&self, s: u8) -> bool {
        self.pieces[PieceKind::King.idx()].contains(s)
    }
    pub fn is_white(&self, s: u8) -> bool {
        self.colors[Color::White.idx()].contains(s)
    }
    pub fn is_black(&self, s: u8) -> bool {
        self.colors[Color::Black.idx()].contains(s)
    }
    pub fn is_color(&self, s: u8, color: Color) -> bool {
        self.colors[color.idx()].contains(s)
    }
    pub fn is_empty(&self, s: u8) -> bool {
        !self.occupied().contains(s)
    }

    /// True when a piece of colour `by` attacks `s`. Squares occupied by
    /// `by`'s own pieces never count.
    pub fn is_under_attack(&self, s: u8, by: Color) -> bool {
        self.attacked[by.idx()].contains(s)
    }

    pub fn attacked_squares(&self, by: Color) -> Bitboard {
        self.attacked[by.idx()]
    }

    pub fn pieces(&self, kind: PieceKind) -> Bitboard {
        self.pieces[kind.idx()]
    }
    pub fn color_mask(&self, color: Color) -> Bitboard {
        self.colors[color.idx()]
    }
    pub fn pieces_of(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.pieces[kind.idx()] & self.colors[color.idx()]
    }
    pub fn occupied(&self) -> Bitboard {
        self.colors[0] | self.colors[1]
    }
    pub fn piece_count(&self) -> u32 {
        self.occupied().popcount()
    }

    // Scalar state

    pub fn player_to_move(&self) -> Color {
        self.to_move
    }
    pub fn king_square(&self, color: Color) -> Option<u8> {
        self.king_sq[color.idx()]
    }

    pub fn in_check(&self, color: Color) -> bool {
        self.check[color.idx()]
    }
    pub fn is_white_in_check(&self) -> bool {
        self.in_check(Color::White)
    }
    pub fn is_black_in_check(&self) -> bool {
        self.in_check(Color::Black)
    }

    pub fn has_king_moved(&self, color: Color) -> bool {
        self.king_moved[color.idx()]
    }
    pub fn has_queen_moved(&self, color: Color) -> bool {
        self.queen_moved[color.idx()]
    }
    pub fn has_kingside_rook_moved(&self, color: Color) -> bool {
        self.kingside_rook_moved[color.idx()]
    }
    pub fn has_queenside_rook_moved(&self, color: Color) -> bool {
        self.queenside_rook_moved[color.idx()]
    }
    pub fn has_castled(&self, color: Color) -> bool {
        self.castled[color.idx()]
    }

    /// Square a pawn may capture onto en passant this ply.
    pub fn en_passant_square(&self) -> Option<u8> {
        self.en_passant.map(|(_, s)| s)
    }
    /// Colour of the pawn that just advanced two squares.
    pub fn en_passant_color(&self) -> Option<Color> {
        self.en_passant.map(|(c, _)| c)
    }

    pub fn is_end_game(&self) -> bool {
        self.end_game
    }
    /// The phase never reverts once entered.
    pub fn set_end_game(&mut self) {
        self.end_game = true;
    }

    pub fn fifty_move_count(&self) -> u32 {
        self.fifty_move_count
    }

    /// How many times the current position has occurred during an unbroken
    /// back-and-forth shuffle. 1 when the last plies did not undo each other.
    ///
    /// Only piece placement is compared: a shuffle that costs castling or
    /// en-passant rights still counts its first position as a repeat.
    pub fn repetition_count(&self) -> u32 {
        1 + (self.repetition_streak + 2) / 4
    }

    pub fn is_stalemate_via_fifty_moves(&self) -> bool {
        self.fifty_move_count >= FIFTY_MOVE_LIMIT
    }
    pub fn is_stalemate_via_three_move_repetition(&self) -> bool {
        self.repetition_count() >= 3
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Cached evaluation, written by whoever last scored this position.
    pub fn score(&self) -> i32 {
        self.score
    }
    pub fn set_score(&mut self, score: i32) {
        self.score = score;
    }
}

/// Rank 8 at the top, FEN letters, `.` for empty squares.
impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8i8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8i8 {
                let c = sq(file, rank)
                    .and_then(|s| self.piece_at(s))
                    .map_or('.', Piece::fen_char);
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")?;
        write!(f, "{} to move", self.to_move)?;
        if self.in_check(self.to_move) {
            write!(f, " (check)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
