use super::*;

fn c(name: &str) -> u8 {
    coord_to_sq(name).unwrap()
}

#[test]
fn test_build_is_idempotent() {
    assert_eq!(MoveCatalog::build(), MoveCatalog::build());
    assert_eq!(MoveCatalog::global(), &MoveCatalog::build());
}

#[test]
fn test_pawn_targets_in_order() {
    let cat = MoveCatalog::build();
    assert_eq!(
        cat.pawn_targets(Color::White, c("e2")),
        &[c("f3"), c("d3"), c("e3"), c("e4")]
    );
    assert_eq!(
        cat.pawn_targets(Color::Black, c("a7")),
        &[c("b6"), c("a6"), c("a5")]
    );
    // No double push away from the starting rank
    assert_eq!(cat.pawn_targets(Color::White, c("h3")).len(), 2);
    // Nothing beyond the last rank
    assert!(cat.pawn_targets(Color::White, c("d8")).is_empty());
}

#[test]
fn test_knight_targets_respect_edges() {
    let cat = MoveCatalog::build();
    assert_eq!(cat.knight_targets(c("e4")).len(), 8);
    let corner = cat.knight_targets(c("a1"));
    assert_eq!(corner.len(), 2);
    assert!(corner.contains(&c("b3")) && corner.contains(&c("c2")));
}

#[test]
fn test_king_targets_include_castling_only_from_home() {
    let cat = MoveCatalog::build();
    let e1 = cat.king_targets(c("e1"));
    assert_eq!(e1.len(), 7);
    assert_eq!(&e1[5..], &[c("g1"), c("c1")]);

    let e8 = cat.king_targets(c("e8"));
    assert_eq!(&e8[5..], &[c("g8"), c("c8")]);

    assert_eq!(cat.king_targets(c("d4")).len(), 8);
    assert_eq!(cat.king_targets(c("h8")).len(), 3);
}

#[test]
fn test_rays_run_outward() {
    let cat = MoveCatalog::build();
    assert_eq!(
        cat.ray(Direction::North, c("d5")),
        &[c("d6"), c("d7"), c("d8")]
    );
    assert_eq!(
        cat.ray(Direction::SouthWest, c("d4")),
        &[c("c3"), c("b2"), c("a1")]
    );
    assert!(cat.ray(Direction::East, c("h2")).is_empty());
    assert_eq!(cat.ray(Direction::West, c("h1")).len(), 7);
}

#[test]
fn test_rays_match_attack_tables() {
    let cat = MoveCatalog::build();
    for dir in Direction::ALL {
        for s in 0..64u8 {
            let from_list = cat
                .ray(dir, s)
                .iter()
                .fold(0u64, |acc, &t| acc | (1u64 << t));
            assert_eq!(from_list, crate::attacks::RAYS[dir.idx()][s as usize].0);
        }
    }
}

#[test]
fn test_slider_directions() {
    assert_eq!(MoveCatalog::slider_directions(PieceKind::Queen).len(), 8);
    assert_eq!(
        MoveCatalog::slider_directions(PieceKind::Rook),
        &Direction::ORTHOGONAL
    );
    assert!(MoveCatalog::slider_directions(PieceKind::Knight).is_empty());
}
