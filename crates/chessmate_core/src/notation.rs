//! Reading moves written in long notation.
//!
//! The grammar is the one `Move`'s `Display` produces:
//! `[NBRQK]<from>[x]<to>[=NBRQ][ep][+|#]`, or `O-O` / `O-O-O` for castling.
//! Castling strings carry no squares, so the mover's colour is needed.

use tracing::warn;

use crate::chess_move::Move;
use crate::error::{NotationError, NotationResult};
use crate::types::*;

impl Move {
    /// Parse long notation for a move by `color`.
    pub fn parse_notation(text: &str, color: Color) -> NotationResult<Move> {
        let text = text.trim();
        if text.is_empty() {
            return Err(NotationError::Empty);
        }

        let (body, check, checkmate) = if let Some(rest) = text.strip_suffix('#') {
            (rest, true, true)
        } else if let Some(rest) = text.strip_suffix('+') {
            (rest, true, false)
        } else {
            (text, false, false)
        };

        let mut mv = match body {
            "O-O" | "0-0" => Move::castle(color, true),
            "O-O-O" | "0-0-0" => Move::castle(color, false),
            _ => parse_body(body)?,
        };
        mv.check = check;
        mv.checkmate = checkmate;
        Ok(mv)
    }

    /// Like [`Move::parse_notation`], but malformed input yields
    /// [`Move::INVALID`] instead of an error.
    pub fn from_notation(text: &str, color: Color) -> Move {
        match Move::parse_notation(text, color) {
            Ok(mv) => mv,
            Err(err) => {
                warn!(input = text, %err, "unreadable move notation");
                Move::INVALID
            }
        }
    }
}

fn parse_body(body: &str) -> NotationResult<Move> {
    let mut rest = body;

    let piece = match rest.chars().next() {
        Some(c) if c.is_ascii_uppercase() => {
            let kind = PieceKind::from_letter(c)
                .filter(|k| *k != PieceKind::Pawn)
                .ok_or(NotationError::BadPiece(c))?;
            rest = &rest[1..];
            kind
        }
        _ => PieceKind::Pawn,
    };

    let from = take_square(&mut rest)?;
    let capture = match rest.strip_prefix('x') {
        Some(r) => {
            rest = r;
            true
        }
        None => false,
    };
    let to = take_square(&mut rest)?;

    let mut mv = Move::new(from, to, piece);
    mv.capture = capture;

    if let Some(r) = rest.strip_prefix('=') {
        let letter = r.chars().next();
        let promo = letter
            .and_then(PieceKind::from_letter)
            .filter(|k| PieceKind::PROMOTIONS.contains(k))
            .ok_or_else(|| NotationError::BadPromotion(r.to_string()))?;
        mv.promo = Some(promo);
        rest = &r[1..];
    }

    if let Some(r) = rest.strip_prefix("ep") {
        mv.en_passant = true;
        mv.capture = true;
        rest = r;
    }

    if !rest.is_empty() {
        return Err(NotationError::Trailing(rest.to_string()));
    }
    Ok(mv)
}

fn take_square(rest: &mut &str) -> NotationResult<u8> {
    let head = rest.get(..2).unwrap_or(rest);
    let sq = coord_to_sq(head).ok_or_else(|| NotationError::BadSquare(head.to_string()))?;
    *rest = &rest[2..];
    Ok(sq)
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
