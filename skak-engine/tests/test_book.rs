use std::fs;
use std::path::PathBuf;

use skak_core::{Board, Move};
use skak_engine::{polyglot_key, OpeningBook};

// Builds a 16-byte polyglot record: key, move, weight and learn data,
// all big-endian
fn record(key: u64, mv: u16, weight: u16) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(16);
    bytes.extend_from_slice(&key.to_be_bytes());
    bytes.extend_from_slice(&mv.to_be_bytes());
    bytes.extend_from_slice(&weight.to_be_bytes());
    bytes.extend_from_slice(&0u32.to_be_bytes());
    bytes
}

// Encodes a move in the polyglot bit layout
fn encode(from_file: u16, from_rank: u16, to_file: u16, to_rank: u16, promotion: u16) -> u16 {
    promotion << 12 | from_rank << 9 | from_file << 6 | to_rank << 3 | to_file
}

fn write_book(name: &str, records: &[Vec<u8>]) -> PathBuf {
    let path = std::env::temp_dir().join(name);
    let bytes: Vec<u8> = records.iter().flatten().copied().collect();
    fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn probe_returns_the_best_weighted_move() {
    let board = Board::default();
    let key = polyglot_key(&board);

    // e2e4 with a heavy weight, d2d4 as a sideline
    let e2e4 = encode(4, 1, 4, 3, 0);
    let d2d4 = encode(3, 1, 3, 3, 0);

    let path = write_book("skak_book_best.bin", &[
        record(key, d2d4, 10),
        record(key, e2e4, 100),
        record(key ^ 0x1234, e2e4, 50), // some other position
    ]);

    let book = OpeningBook::open(&path).unwrap();
    assert_eq!(book.len(), 3);

    let mv = book.probe(&board, true).unwrap();
    assert_eq!(mv, Move::from_notation("e2e4").unwrap());

    fs::remove_file(path).ok();
}

#[test]
fn weighted_probe_stays_within_the_stored_moves() {
    let board = Board::default();
    let key = polyglot_key(&board);

    let e2e4 = encode(4, 1, 4, 3, 0);
    let d2d4 = encode(3, 1, 3, 3, 0);
    let path = write_book("skak_book_weighted.bin", &[
        record(key, e2e4, 3),
        record(key, d2d4, 1),
    ]);

    let book = OpeningBook::open(&path).unwrap();
    let expected = [
        Move::from_notation("e2e4").unwrap(),
        Move::from_notation("d2d4").unwrap(),
    ];

    for _ in 0..20 {
        let mv = book.probe(&board, false).unwrap();
        assert!(expected.contains(&mv));
    }

    fs::remove_file(path).ok();
}

#[test]
fn miss_on_unknown_position() {
    let board = Board::default();
    let path = write_book("skak_book_miss.bin", &[
        record(0x1111, encode(4, 1, 4, 3, 0), 1),
    ]);

    let book = OpeningBook::open(&path).unwrap();
    assert!(book.probe(&board, true).is_none());

    fs::remove_file(path).ok();
}

#[test]
fn castling_is_decoded_from_king_takes_rook() {
    let board = Board::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    let key = polyglot_key(&board);

    // White short castling is stored as e1h1
    let e1h1 = encode(4, 0, 7, 0, 0);
    let path = write_book("skak_book_castle.bin", &[record(key, e1h1, 1)]);

    let book = OpeningBook::open(&path).unwrap();
    assert_eq!(book.probe(&board, true), Some(Move::ShortCastle));

    fs::remove_file(path).ok();
}

#[test]
fn promotions_are_decoded() {
    let board = Board::from_fen("8/4P3/8/8/8/2k5/8/4K3 w - - 0 1").unwrap();
    let key = polyglot_key(&board);

    // e7e8 promoting to a queen (promotion code 4)
    let e7e8q = encode(4, 6, 4, 7, 4);
    let path = write_book("skak_book_promo.bin", &[record(key, e7e8q, 1)]);

    let book = OpeningBook::open(&path).unwrap();
    assert_eq!(book.probe(&board, true), Some(Move::from_notation("e7e8q").unwrap()));

    fs::remove_file(path).ok();
}

#[test]
fn malformed_books_are_rejected() {
    // Truncated record
    let path = std::env::temp_dir().join("skak_book_truncated.bin");
    fs::write(&path, [0u8; 20]).unwrap();
    assert!(OpeningBook::open(&path).is_err());
    fs::remove_file(&path).ok();

    // Missing file
    let missing = std::env::temp_dir().join("skak_book_that_does_not_exist.bin");
    assert!(OpeningBook::open(&missing).is_err());
}

#[test]
fn keys_depend_on_en_passant_capturability() {
    // Same placement; in the first position d4xe3 is a real e.p.
    // capture, in the second no black pawn can use the e.p. square
    let capturable = Board::from_fen("rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 2").unwrap();
    let not_capturable = Board::from_fen("rnbqkbnr/pppp1ppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").unwrap();
    let no_ep = Board::from_fen("rnbqkbnr/pppp1ppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1").unwrap();

    assert_ne!(polyglot_key(&capturable), polyglot_key(&not_capturable));
    assert_eq!(polyglot_key(&not_capturable), polyglot_key(&no_ep));
}
