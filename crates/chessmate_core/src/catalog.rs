//! Occupancy-independent target lists for every piece and origin square.
//!
//! Built once, then only read. Slider lists are split per direction and run
//! outward from the origin, so a consumer walks a list and stops at the first
//! occupied square.

use std::sync::OnceLock;

use crate::attacks::{Direction, KING_DELTAS, KNIGHT_DELTAS};
use crate::types::*;

type SquareLists = [Vec<u8>; 64];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveCatalog {
    pawn: [SquareLists; 2],
    knight: SquareLists,
    king: SquareLists,
    rays: [SquareLists; 8],
}

static CATALOG: OnceLock<MoveCatalog> = OnceLock::new();

impl MoveCatalog {
    /// Walk the board geometry from every square. Pure; repeated calls yield
    /// equal catalogs.
    pub fn build() -> Self {
        Self {
            pawn: [pawn_lists(Color::White), pawn_lists(Color::Black)],
            knight: leaper_lists(&KNIGHT_DELTAS),
            king: king_lists(),
            rays: Direction::ALL.map(ray_lists),
        }
    }

    /// Process-wide catalog, built on first use.
    pub fn global() -> &'static MoveCatalog {
        CATALOG.get_or_init(MoveCatalog::build)
    }

    /// Diagonal captures (east, then west), then the single and double push.
    #[inline]
    pub fn pawn_targets(&self, color: Color, sq: u8) -> &[u8] {
        &self.pawn[color.idx()][sq as usize]
    }

    #[inline]
    pub fn knight_targets(&self, sq: u8) -> &[u8] {
        &self.knight[sq as usize]
    }

    /// One-step targets, followed by the two castling targets on e1 and e8.
    #[inline]
    pub fn king_targets(&self, sq: u8) -> &[u8] {
        &self.king[sq as usize]
    }

    /// Squares along `dir`, nearest first.
    #[inline]
    pub fn ray(&self, dir: Direction, sq: u8) -> &[u8] {
        &self.rays[dir.idx()][sq as usize]
    }

    /// Directions a sliding piece moves in. Empty for non-sliders.
    pub fn slider_directions(kind: PieceKind) -> &'static [Direction] {
        match kind {
            PieceKind::Bishop => &Direction::DIAGONAL,
            PieceKind::Rook => &Direction::ORTHOGONAL,
            PieceKind::Queen => &Direction::ALL,
            _ => &[],
        }
    }
}

fn step(sq: u8, df: i8, dr: i8) -> Option<u8> {
    crate::types::sq(file_of(sq) + df, rank_of(sq) + dr)
}

fn pawn_lists(color: Color) -> SquareLists {
    let fwd = color.forward();
    std::array::from_fn(|i| {
        let origin = i as u8;
        let mut out = Vec::with_capacity(4);
        out.extend(step(origin, 1, fwd));
        out.extend(step(origin, -1, fwd));
        out.extend(step(origin, 0, fwd));
        if color.relative_rank(rank_of(origin)) == 1 {
            out.extend(step(origin, 0, 2 * fwd));
        }
        out
    })
}

fn leaper_lists(deltas: &[(i8, i8)]) -> SquareLists {
    std::array::from_fn(|i| {
        deltas
            .iter()
            .filter_map(|&(df, dr)| step(i as u8, df, dr))
            .collect()
    })
}

fn king_lists() -> SquareLists {
    let mut lists = leaper_lists(&KING_DELTAS);
    for color in Color::ALL {
        if let Some(home) = sq(4, color.home_rank()) {
            lists[home as usize].extend(step(home, 2, 0));
            lists[home as usize].extend(step(home, -2, 0));
        }
    }
    lists
}

fn ray_lists(dir: Direction) -> SquareLists {
    let (df, dr) = dir.delta();
    std::array::from_fn(|i| {
        let mut out = Vec::with_capacity(7);
        let mut cur = i as u8;
        while let Some(next) = step(cur, df, dr) {
            out.push(next);
            cur = next;
        }
        out
    })
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod catalog_tests;
