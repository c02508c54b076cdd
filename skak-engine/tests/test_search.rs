use skak_core::{Board, Move};
use skak_engine::{Engine, EngineConfig, SearchOptions};

fn engine() -> Engine {
    // No book and a small table, so the tests stay deterministic and light
    Engine::new(EngineConfig {
        book_path: None,
        only_best_book_moves: true,
        tt_entries: 1 << 16,
    })
}

fn depth_options(depth: u8) -> SearchOptions {
    SearchOptions {
        max_depth: Some(depth),
        ..SearchOptions::default()
    }
}

fn search(fen: &str, depth: u8) -> (Option<Move>, skak_engine::Evaluation) {
    let board = Board::from_fen(fen).unwrap();
    let result = engine().find_best_move(&board, &[board.zobrist_key()], depth_options(depth));
    (result.best_move, result.score)
}

#[test]
fn finds_mate_in_one() {
    let (best, score) = search("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1", 4);
    assert_eq!(best, Some(Move::from_notation("a1a8").unwrap()));
    assert!(score.is_positive_mate());
}

#[test]
fn finds_mate_in_two() {
    let (best, _) = search("r1b1kbnr/pppp1ppp/2n5/4p3/2B1P3/5Q2/PPPP1PPP/RNB1K1NR w KQkq - 0 1", 4);
    assert_eq!(best, Some(Move::from_notation("f3f7").unwrap()));
}

#[test]
fn finds_the_fools_mate() {
    // Black mates on the spot with Qh4
    let (best, score) = search("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2", 4);
    assert_eq!(best, Some(Move::from_notation("d8h4").unwrap()));
    assert!(score.is_positive_mate());
}

#[test]
fn stalemate_yields_no_move() {
    let (best, score) = search("7k/5K2/6Q1/8/8/8/8/8 b - - 0 1", 4);
    assert_eq!(best, None);
    assert_eq!(score.score(), 0);
}

#[test]
fn startpos_at_depth_one_is_sane() {
    let board = Board::default();
    let result = engine().find_best_move(&board, &[board.zobrist_key()], depth_options(1));

    let best = result.best_move.expect("a legal move must be returned");
    assert!(board.legal_moves().contains(&best));
    assert!(result.score.score().abs() <= 100);
}

#[test]
fn prefers_the_winning_exchange() {
    // Capturing the defended rook nets +200; everything else is quiet
    let (best, _) = search("4k3/8/4p3/3r4/8/2N5/8/4K3 w - - 0 1", 3);
    assert_eq!(best, Some(Move::from_notation("c3d5").unwrap()));
}

#[test]
fn single_reply_is_played_immediately() {
    // Only Kxh7 is legal
    let board = Board::from_fen("7k/7Q/5K2/8/8/8/8/8 b - - 0 1").unwrap();
    let result = engine().find_best_move(&board, &[board.zobrist_key()], depth_options(6));

    assert_eq!(result.best_move, Some(Move::from_notation("h8h7").unwrap()));
}

#[test]
fn node_limit_is_respected() {
    let board = Board::default();
    let options = SearchOptions {
        max_nodes: Some(2_000),
        ..SearchOptions::default()
    };

    let result = engine().find_best_move(&board, &[board.zobrist_key()], options);
    let best = result.best_move.expect("a legal move must be returned even on a tiny budget");
    assert!(board.legal_moves().contains(&best));
}

#[test]
fn repeating_the_position_reads_as_a_draw() {
    // Shuffling rooks back and forth: the third occurrence of the
    // start state must be scored 0 by the repetition rule
    let mut board = Board::from_fen("4k3/8/8/8/8/8/R7/4K3 w - - 0 1").unwrap();
    let mut history = vec![board.zobrist_key()];

    for mv in ["a2a3", "e8d8", "a3a2", "d8e8", "a2a3", "e8d8", "a3a2", "d8e8"] {
        board = board.make_move(&Move::from_notation(mv).unwrap());
        history.push(board.zobrist_key());
    }

    assert!(skak_engine::is_draw_by_repetition(&board, 0, &history));
}
