use skak_core::{Board, Move, PieceType};

use super::history::HistoryTable;
use super::see::SeeCache;

// Heuristic values of different kinds of moves.
// The priorities and assigned score ranges are as follows:
// Move stored in the TT: Max
// Captures and promotions: a band around CAPTURE_BASE_VAL
// Primary and secondary killer moves: right below any capture
// History heuristics: rest
pub type MoveScore = i32;

const TT_MOVE: MoveScore = MoveScore::MAX;
const CAPTURE_BASE_VAL: MoveScore = 1_000_000;
const QUEEN_PROMOTION_BONUS: MoveScore = 30_000;
const PROMOTION_BONUS: MoveScore = 20_000;

// Losing captures are pushed down within the capture band, but never
// below the killers: the worst capture adjustment is bounded by the SEE
// value of a queen plus the flat penalty
const PRIMARY_KILLER: MoveScore = CAPTURE_BASE_VAL - 5_000;
const SECONDARY_KILLER: MoveScore = PRIMARY_KILLER - 1;
pub const MAX_HISTORY_VAL: MoveScore = SECONDARY_KILLER - 1;

// Struct to hold a pair of (Move, move heuristical value)
pub struct RatedMove {
    pub mv: Move,
    pub score: MoveScore,
}

// Receives the legal moves for the current position and, optionally, the
// best move stored in the transposition table for it. Returns the moves
// rated according to the heuristics above, best first.
pub fn order_moves(
    moves: Vec<Move>,
    board: &Board,
    tt_move: Option<Move>,
    killers: &[Move],
    history: &HistoryTable,
    see: &mut SeeCache,
) -> Vec<RatedMove> {
    let mut rated_moves: Vec<RatedMove> = moves.into_iter()
        .map(|mv| rate_move(mv, tt_move, board, killers, history, see))
        .collect();
    rated_moves.sort_unstable_by_key(|rm| std::cmp::Reverse(rm.score));
    rated_moves
}

// Takes a move by value and returns a struct with that move
// and its heuristic value according to the consts above
fn rate_move(
    mv: Move,
    tt_move: Option<Move>,
    board: &Board,
    killers: &[Move],
    history: &HistoryTable,
    see: &mut SeeCache,
) -> RatedMove {
    let score = if tt_move == Some(mv) {
        TT_MOVE
    } else if mv.is_capture(board) || matches!(mv, Move::PawnPromotion { .. }) {
        capture_score(&mv, board, see)
    } else if killers[0] == mv {
        PRIMARY_KILLER
    } else if killers[1] == mv {
        SECONDARY_KILLER
    } else {
        history.get_value(&mv, board.turn_color())
    };

    RatedMove { mv, score }
}

// Scores a capture or promotion move. Promotions take their flat bonus,
// whether they capture or not; captures start from their MVV-LVA value,
// and exchanges that give away material according to SEE are kept
// searchable but pushed towards the bottom of the band.
pub fn capture_score(mv: &Move, board: &Board, see: &mut SeeCache) -> MoveScore {
    let mut score = CAPTURE_BASE_VAL;

    if let Move::PawnPromotion { promote_to, .. } = mv {
        score += match promote_to {
            PieceType::Queen => QUEEN_PROMOTION_BONUS,
            _ => PROMOTION_BONUS,
        };
        return score;
    }

    if let Some(victim) = mv.piece_captured(board) {
        let attacker = mv.piece_moving(board);
        score += mvv_lva(victim, attacker);

        // MVV-LVA is enough when the exchange can't lose material; when
        // a higher-valued piece takes a lower-valued one, let SEE have
        // the last word
        if value_of_capture(victim) < value_of_attacker(attacker) && attacker != PieceType::Pawn {
            let exchange = see.see(board, mv);
            if exchange == 0 {
                score -= 50;
            } else if exchange < 0 {
                score += exchange - 200;
            }
        }
    }

    score
}

// Most Valuable Victim / Least Valuable Attacker: each victim gets its
// own band of scores, ordered within the band by how expendable the
// attacking piece is
fn mvv_lva(victim: PieceType, attacker: PieceType) -> MoveScore {
    100 * (victim.to_index() as MoveScore + 1) + 5 - attacker.to_index() as MoveScore
}

const fn value_of_attacker(piece: PieceType) -> MoveScore {
    match piece {
        PieceType::Pawn => 100,
        PieceType::Knight => 300,
        PieceType::Bishop => 320,
        PieceType::Rook => 500,
        PieceType::Queen => 900,
        PieceType::King => 9999,
    }
}

const fn value_of_capture(piece: PieceType) -> MoveScore {
    match piece {
        PieceType::Pawn => 100,
        PieceType::Knight => 300,
        PieceType::Bishop => 320,
        PieceType::Rook => 500,
        PieceType::Queen => 900,
        PieceType::King => 9999, // Doesn't happen since the king is never captured
    }
}
