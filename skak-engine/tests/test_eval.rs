use skak_core::Board;
use skak_engine::evaluate_position;

#[test]
fn starting_position_is_balanced() {
    let board = Board::default();
    assert_eq!(evaluate_position(&board).score(), 0);
}

#[test]
fn score_is_relative_to_the_side_to_move() {
    // The same position after 1. e4, seen from either side's clock,
    // must give opposite-but-equal judgements when mirrored
    let white_view = Board::from_fen("rnbqkbnr/pppp1ppp/8/4p3/8/8/PPPPPPPP/RNBQKBNR w KQkq e6 0 2").unwrap();
    let black_view = Board::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").unwrap();

    assert_eq!(evaluate_position(&white_view).score(), evaluate_position(&black_view).score());
}

#[test]
fn material_advantage_shows_up() {
    // Black is missing the queen
    let up = Board::from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
    assert!(evaluate_position(&up).score() > 500);

    // Same position from the other side's perspective
    let down = Board::from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1").unwrap();
    assert!(evaluate_position(&down).score() < -500);
}

#[test]
fn checkmate_scores_minus_mate() {
    let board = Board::from_fen("R5k1/5ppp/8/8/8/8/5PPP/6K1 b - - 0 1").unwrap();
    assert_eq!(evaluate_position(&board).score(), -100_000);
}

#[test]
fn stalemate_scores_zero() {
    let board = Board::from_fen("7k/5K2/6Q1/8/8/8/8/8 b - - 0 1").unwrap();
    assert_eq!(evaluate_position(&board).score(), 0);
}

#[test]
fn insufficient_material_scores_zero() {
    // Even though white's king is far better placed, a bare K vs KB
    // ending is dead drawn
    let board = Board::from_fen("8/8/3k4/8/3K4/8/8/7b w - - 0 1").unwrap();
    assert_eq!(evaluate_position(&board).score(), 0);
}

#[test]
fn passed_pawn_is_rewarded() {
    // Identical except for the blocking enemy pawn: the protected
    // passer on the 6th rank must raise white's score
    let passed = Board::from_fen("4k3/8/3P4/8/8/8/8/4K3 w - - 0 1").unwrap();
    let blocked = Board::from_fen("4k3/3p4/3P4/8/8/8/8/4K3 w - - 0 1").unwrap();

    assert!(evaluate_position(&passed).score() > evaluate_position(&blocked).score());
}
