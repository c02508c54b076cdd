use skak_core::{Board, Color::*, Move, PieceType::*, Square};

#[test]
fn checkmate_detection() {
    // Back-rank mate after Ra8
    let board = Board::from_fen("R5k1/5ppp/8/8/8/8/5PPP/6K1 b - - 0 1").unwrap();
    assert!(board.is_checkmate());
    assert!(!board.is_stalemate());
    assert!(board.legal_moves().is_empty());
}

#[test]
fn stalemate_detection() {
    let board = Board::from_fen("7k/5K2/6Q1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(board.is_stalemate());
    assert!(!board.is_checkmate());
    assert!(board.legal_moves().is_empty());
}

#[test]
fn insufficient_material() {
    for fen in [
        "8/8/4k3/8/8/3K4/8/8 w - - 0 1",       // K vs K
        "8/8/4k3/8/8/3KB3/8/8 w - - 0 1",      // KB vs K
        "8/8/4kn2/8/8/3K4/8/8 w - - 0 1",      // K vs KN
        "8/8/4kn2/8/8/3KB3/8/8 w - - 0 1",     // KB vs KN
    ] {
        assert!(Board::from_fen(fen).unwrap().is_draw_by_material(), "{}", fen);
    }

    for fen in [
        "8/8/4k3/8/8/3KR3/8/8 w - - 0 1",      // rook is enough to win
        "8/8/4k3/8/8/2NKB3/8/8 w - - 0 1",     // two minor pieces
        "8/8/4k3/8/4P3/3K4/8/8 w - - 0 1",     // a pawn can promote
    ] {
        assert!(!Board::from_fen(fen).unwrap().is_draw_by_material(), "{}", fen);
    }
}

#[test]
fn move_count_rules() {
    let board = Board::from_fen("8/8/4k3/8/8/3K4/8/R7 w - - 99 80").unwrap();
    assert!(!board.is_fifty_move_draw());

    let next = board.make_move(&Move::from_notation("a1a2").unwrap());
    assert!(next.is_fifty_move_draw());
    assert!(!next.is_seventyfive_move_draw());
}

#[test]
fn attackers_of_square() {
    // The d5 pawn is attacked by a knight, a pawn and a rook along the
    // open file, and defended by the c6 pawn
    let board = Board::from_fen("4k3/8/2p5/3p4/4P3/2N5/8/3RK3 w - - 0 1").unwrap();
    let d5 = Square::from_notation("d5").unwrap().square();

    let white_attackers = board.attackers_of(d5, White);
    let black_defenders = board.attackers_of(d5, Black);

    assert_eq!(white_attackers.count(), 3);
    assert_eq!(black_defenders.count(), 1);

    let squares: Vec<String> = white_attackers.piece_indices()
        .map(|sq| Square::new(sq).to_string())
        .collect();
    assert!(squares.contains(&"c3".to_owned()));
    assert!(squares.contains(&"e4".to_owned()));
    assert!(squares.contains(&"d1".to_owned()));
}

#[test]
fn null_move_flips_turn() {
    // White to move with exf6 e.p. available, so the e.p. square is
    // part of the zobrist key
    let board = Board::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3").unwrap();
    let null = board.make_null_move();

    assert_eq!(null.turn_color(), Black);
    assert!(null.ep_square().is_empty());
    assert_ne!(null.zobrist_key(), board.zobrist_key());

    // Two null moves in a row restore the turn, but not the e.p. square
    // nor its key contribution
    let back = null.make_null_move();
    assert_eq!(back.turn_color(), White);
    assert_ne!(back.zobrist_key(), board.zobrist_key());
}

#[test]
fn gives_check_and_captures() {
    let board = Board::from_fen("r1b1kbnr/pppp1ppp/2n5/4p3/2B1P3/5Q2/PPPP1PPP/RNB1K1NR w KQkq - 0 1").unwrap();
    let qxf7 = Move::from_notation("f3f7").unwrap();

    assert!(board.gives_check(&qxf7));
    assert!(qxf7.is_capture(&board));
    assert_eq!(qxf7.piece_captured(&board), Some(Pawn));
    assert_eq!(qxf7.piece_moving(&board), Queen);
}

#[test]
fn en_passant_capture() {
    let mut board = Board::default();
    for mv in ["e2e4", "a7a6", "e4e5", "d7d5"] {
        board = board.make_move(&Move::from_notation(mv).unwrap());
    }

    let exd6 = Move::from_notation("e5d6").unwrap();
    assert!(exd6.is_en_passant(&board));
    assert!(exd6.is_capture(&board));
    assert!(board.legal_moves().contains(&exd6));

    let after = board.make_move(&exd6);
    assert_eq!(after.fen(), "rnbqkbnr/1pp1pppp/p2P4/8/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 3");
}

#[test]
fn illegal_moves_rejected() {
    let board = Board::default();

    // Moving an empty square, moving into own piece, moving the wrong color
    for mv in ["e4e5", "a1a2", "e7e5"] {
        assert!(board.try_move(&Move::from_notation(mv).unwrap()).is_err(), "{}", mv);
    }

    // A pinned piece can't move: the e4 knight shields its king from
    // the e7 rook
    let pinned = Board::from_fen("4k3/4r3/8/8/4N3/8/8/4K3 w - - 0 1").unwrap();
    assert!(pinned.try_move(&Move::from_notation("e4c3").unwrap()).is_err());
}
