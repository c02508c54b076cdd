use skak_core::{Board, Move};
use skak_engine::SeeCache;

fn see_of(fen: &str, mv: &str) -> i32 {
    let board = Board::from_fen(fen).unwrap();
    let mut see = SeeCache::new();
    see.see(&board, &Move::from_notation(mv).unwrap())
}

#[test]
fn capture_of_defended_rook() {
    // The knight wins a rook but is taken back by the pawn:
    // +500 - 300 = +200
    let score = see_of("4k3/8/4p3/3r4/8/2N5/8/4K3 w - - 0 1", "c3d5");
    assert_eq!(score, 200);
}

#[test]
fn queen_takes_defended_pawn() {
    // Taking a mere pawn with the queen loses her to the recapture
    let score = see_of("4k3/8/4p3/3p4/8/8/8/3QK3 w - - 0 1", "d1d5");
    assert_eq!(score, -800);
}

#[test]
fn equal_rook_trade() {
    let score = see_of("4k3/3r4/8/8/8/8/3R4/4K3 w - - 0 1", "d2d7");
    assert_eq!(score, 0);
}

#[test]
fn en_passant_wins_a_pawn() {
    let mut board = Board::default();
    for mv in ["e2e4", "a7a6", "e4e5", "d7d5"] {
        board = board.make_move(&Move::from_notation(mv).unwrap());
    }

    let mut see = SeeCache::new();
    let exd6 = Move::from_notation("e5d6").unwrap();
    assert_eq!(see.see(&board, &exd6), 100);
}

#[test]
fn non_capture_scores_zero() {
    let board = Board::default();
    let mut see = SeeCache::new();
    assert_eq!(see.see(&board, &Move::from_notation("e2e4").unwrap()), 0);
}

#[test]
fn equal_attackers_are_interchangeable() {
    // Two knights can start the same exchange; the outcome must not
    // depend on which one is picked
    let fen = "4k3/3n4/8/4p3/8/3N1N2/8/4K3 w - - 0 1";
    let first = see_of(fen, "d3e5");
    let second = see_of(fen, "f3e5");

    assert_eq!(first, second);
    assert_eq!(first, 100);
}

#[test]
fn pinned_defender_does_not_count() {
    // The c7 knight nominally defends d5, but capturing there would
    // expose its king to the g3 bishop
    let pinned = see_of("1k6/2n5/8/3p4/4P3/6B1/8/4K3 w - - 0 1", "e4d5");
    assert_eq!(pinned, 100);

    // With the king off the diagonal the knight recaptures freely
    let free = see_of("k7/2n5/8/3p4/4P3/6B1/8/4K3 w - - 0 1", "e4d5");
    assert_eq!(free, 0);
}
