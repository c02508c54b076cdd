use std::fs;
use std::path::Path;

use rand::distributions::WeightedIndex;
use rand::prelude::*;
use skak_core::{Board, Move, PieceType::*};

use super::keys::polyglot_key;

// The polyglot file format is a binary chunk of data where each entry
// is 16 bytes long, in big-endian byte order, sorted by key:
// - Bytes 0-7: position key
// - Bytes 8-9: move
// - Bytes 10-11: weight
// - Bytes 12-15: "learn" data, which we ignore
pub struct OpeningBook {
    entries: Vec<BookEntry>,
}

struct BookEntry {
    key: u64,
    mv: u16,
    weight: u16,
}

impl OpeningBook {
    pub fn open(path: &Path) -> Result<Self, String> {
        let bytes = fs::read(path)
            .map_err(|err| format!("Cannot read opening book '{}': {}", path.display(), err))?;

        if bytes.len() % 16 != 0 {
            return Err(format!("Malformed opening book '{}': truncated entry", path.display()));
        }

        let mut entries: Vec<BookEntry> = bytes.chunks_exact(16)
            .map(|record| BookEntry {
                key: u64::from_be_bytes(record[..8].try_into().unwrap()),
                mv: u16::from_be_bytes(record[8..10].try_into().unwrap()),
                weight: u16::from_be_bytes(record[10..12].try_into().unwrap()),
            })
            .collect();

        // Keys must be ordered for the binary search below
        entries.sort_unstable_by_key(|entry| entry.key);

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // Looks up the current position. With `only_best` the heaviest move
    // is returned, otherwise one is drawn at random with probability
    // proportional to its weight.
    pub fn probe(&self, board: &Board, only_best: bool) -> Option<Move> {
        let key = polyglot_key(board);

        // Binary-search the first record with this key, then walk the
        // run of equal keys
        let start = self.entries.partition_point(|entry| entry.key < key);
        let matching: Vec<&BookEntry> = self.entries[start..].iter()
            .take_while(|entry| entry.key == key)
            .collect();

        if matching.is_empty() {
            return None;
        }

        let index = if only_best {
            matching.iter()
                .enumerate()
                .max_by_key(|(_, entry)| entry.weight)
                .map(|(i, _)| i)
                .unwrap()
        } else {
            // Zero-weight entries stay reachable with a minimal chance
            let weights = matching.iter().map(|entry| entry.weight.max(1) as u32);
            WeightedIndex::new(weights).ok()?.sample(&mut thread_rng())
        };

        decode_move(matching[index].mv, board)
    }
}

/*
 Polyglot encodes moves in 16 bits, as follows:
    bits      meaning
    =========================
    0,1,2     to file
    3,4,5     to rank
    6,7,8     from file
    9,10,11   from rank
    12,13,14  promotion piece (0-4) = (none, N, B, R, Q)

 Castling is stored as the king capturing its own rook:
    white short      e1h1
    white long       e1a1
    black short      e8h8
    black long       e8a8
*/
fn decode_move(bits: u16, board: &Board) -> Option<Move> {
    let to_file = bits & 0x7;
    let to_rank = (bits >> 3) & 0x7;
    let from_file = (bits >> 6) & 0x7;
    let from_rank = (bits >> 9) & 0x7;
    let promotion = (bits >> 12) & 0x7;

    let from = (from_rank * 8 + from_file) as u8;
    let to = (to_rank * 8 + to_file) as u8;

    // The king-takes-own-rook encoding only means castling when there
    // actually is a king on the from square
    if board.piece_on(from) == &Some(King) {
        match (from, to) {
            (4, 7) | (60, 63) => return Some(Move::ShortCastle),
            (4, 0) | (60, 56) => return Some(Move::LongCastle),
            _ => {},
        }
    }

    match promotion {
        0 => Some(Move::Normal { from, to }),
        1 => Some(Move::PawnPromotion { from, to, promote_to: Knight }),
        2 => Some(Move::PawnPromotion { from, to, promote_to: Bishop }),
        3 => Some(Move::PawnPromotion { from, to, promote_to: Rook }),
        4 => Some(Move::PawnPromotion { from, to, promote_to: Queen }),
        _ => None,
    }
}
