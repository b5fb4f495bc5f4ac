use std::fmt;

use crate::types::*;

/// A single ply. Values are built by the move generator, by the notation
/// parser, or by hand, and are not changed once handed to a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: u8, // 0..63
    pub to: u8,   // 0..63
    pub piece: PieceKind,
    pub promo: Option<PieceKind>,
    pub capture: bool,
    pub check: bool,
    pub checkmate: bool,
    pub en_passant: bool,
    pub kingside_castle: bool,
    pub queenside_castle: bool,
}

impl Move {
    /// Sentinel returned for unreadable notation. Never valid.
    pub const INVALID: Move = Move {
        from: 64,
        to: 64,
        piece: PieceKind::Pawn,
        promo: None,
        capture: false,
        check: false,
        checkmate: false,
        en_passant: false,
        kingside_castle: false,
        queenside_castle: false,
    };

    pub fn new(from: u8, to: u8, piece: PieceKind) -> Self {
        Self {
            from,
            to,
            piece,
            ..Self::INVALID
        }
    }

    pub fn with_promo(mut self, promo: PieceKind) -> Self {
        self.promo = Some(promo);
        self
    }

    pub fn with_capture(mut self) -> Self {
        self.capture = true;
        self
    }

    /// The king's two-square castling move for `color`.
    pub fn castle(color: Color, kingside: bool) -> Self {
        let home = color.home_rank();
        let from = sq(4, home).unwrap_or(64);
        let to = sq(if kingside { 6 } else { 2 }, home).unwrap_or(64);
        Self {
            kingside_castle: kingside,
            queenside_castle: !kingside,
            ..Self::new(from, to, PieceKind::King)
        }
    }

    pub fn is_valid(&self) -> bool {
        self.from < 64 && self.to < 64 && self.from != self.to
    }

    pub fn is_castle(&self) -> bool {
        self.kingside_castle || self.queenside_castle
    }

    pub fn start_file(&self) -> i8 {
        file_of(self.from)
    }

    pub fn start_rank(&self) -> i8 {
        rank_of(self.from)
    }

    pub fn end_file(&self) -> i8 {
        file_of(self.to)
    }

    pub fn end_rank(&self) -> i8 {
        rank_of(self.to)
    }

    /// Same origin, destination and promotion; decoration flags are ignored.
    pub fn same_squares(&self, other: &Move) -> bool {
        self.from == other.from && self.to == other.to && self.promo == other.promo
    }
}

/// Long notation: `[NBRQK]<from>[x]<to>[=NBRQ][ep][+|#]`, or a bare `O-O` / `O-O-O`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return f.write_str("(none)");
        }
        // Castles are never decorated with check or mate
        if self.kingside_castle {
            return f.write_str("O-O");
        }
        if self.queenside_castle {
            return f.write_str("O-O-O");
        }
        if self.piece != PieceKind::Pawn {
            write!(f, "{}", self.piece.letter())?;
        }
        f.write_str(&sq_to_coord(self.from))?;
        if self.capture {
            f.write_str("x")?;
        }
        f.write_str(&sq_to_coord(self.to))?;
        if let Some(p) = self.promo {
            write!(f, "={}", p.letter())?;
        }
        if self.en_passant {
            f.write_str("ep")?;
        }
        if self.checkmate {
            f.write_str("#")
        } else if self.check {
            f.write_str("+")
        } else {
            Ok(())
        }
    }
}
