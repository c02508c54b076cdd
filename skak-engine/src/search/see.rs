use rustc_hash::FxHashMap;
use skak_core::{Board, Color, Move, PieceType, PieceType::*};

use crate::evaluation::EvalScore;

// The SEE results are memoized per (position, move). When the map grows
// past this size it is simply emptied, which keeps it bounded without
// any bookkeeping.
const MAX_CACHE_ENTRIES: usize = 100_000;

// Piece values used for exchange evaluation. These are deliberately
// separate from the evaluation values: the king is worthless here
// because it can never be captured at the end of an exchange.
const fn see_value(piece: PieceType) -> EvalScore {
    match piece {
        Pawn => 100,
        Knight => 300,
        Bishop => 320,
        Rook => 500,
        Queen => 900,
        King => 0,
    }
}

pub struct SeeCache {
    cache: FxHashMap<(u64, Move), EvalScore>,
}

impl SeeCache {
    pub fn new() -> Self {
        Self { cache: FxHashMap::default() }
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    // Static exchange evaluation: the material balance, from the moving
    // side's point of view, of the best sequence of recaptures on the
    // target square after playing the given capture.
    pub fn see(&mut self, board: &Board, mv: &Move) -> EvalScore {
        if !mv.is_capture(board) {
            return 0;
        }

        let key = (board.zobrist_key(), *mv);
        if let Some(cached) = self.cache.get(&key) {
            return *cached;
        }

        let result = static_exchange(board, mv);

        if self.cache.len() >= MAX_CACHE_ENTRIES {
            self.cache.clear();
        }
        self.cache.insert(key, result);

        result
    }
}

impl Default for SeeCache {
    fn default() -> Self {
        Self::new()
    }
}

fn static_exchange(board: &Board, mv: &Move) -> EvalScore {
    // En passant is terminal for the exchange: the captured pawn is not
    // on the target square, so no recapture chain is attributed to it
    if mv.is_en_passant(board) {
        return see_value(Pawn);
    }

    let target = mv.to();
    let captured = match mv.piece_captured(board) {
        Some(piece) => piece,
        None => return 0,
    };

    // The running balance of the exchange: gains[i] is the best outcome
    // for the side making the i-th capture, assuming the chain stops there
    let mut gains = vec![see_value(captured)];
    let mut previous_value = see_value(mv.piece_moving(board));
    let mut current = board.make_move(mv);

    // Keep capturing with the least valuable legal attacker until one
    // side runs out of them
    while let Some((next_board, attacker_value)) = capture_with_least_valuable(&current, target) {
        let last = *gains.last().unwrap();
        gains.push(previous_value - last);
        previous_value = attacker_value;
        current = next_board;
    }

    // Fold the chain backwards: at every step, the opponent only
    // continues the exchange when that is better for them than standing
    // pat, which caps what the capture at that step can be worth
    for i in (0..gains.len() - 1).rev() {
        gains[i] = EvalScore::min(gains[i], -gains[i + 1]);
    }

    gains[0]
}

// Finds the least valuable piece of the side to move that can legally
// capture on `target`, and returns the board after that capture along
// with the attacker's exchange value. Pinned attackers don't count.
fn capture_with_least_valuable(board: &Board, target: u8) -> Option<(Board, EvalScore)> {
    let side = board.turn_color();
    let attackers = board.attackers_of(target, side);

    if attackers.is_empty() {
        return None;
    }

    for piece in [Pawn, Knight, Bishop, Rook, Queen, King] {
        let candidates = attackers & board.get_pieces(side).get_pieces_of_type(piece);

        for from in candidates.piece_indices() {
            let capture = recapture_move(piece, side, from, target);
            let next_board = board.make_move(&capture);

            if !next_board.is_check(side) {
                return Some((next_board, see_value(piece)));
            }
        }
    }

    None
}

// Recaptures are plain from-to moves, except for a pawn arriving at its
// promotion rank, which must promote to stay a legal move
fn recapture_move(piece: PieceType, side: Color, from: u8, to: u8) -> Move {
    let promotion_rank = match side {
        Color::White => to > 55,
        Color::Black => to < 8,
    };

    if piece == Pawn && promotion_rank {
        Move::PawnPromotion { from, to, promote_to: Queen }
    } else {
        Move::Normal { from, to }
    }
}
