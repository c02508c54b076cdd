use skak_core::{Board, Color, Color::*, Pieces};

use super::EvalScore;

// Granularity of the per-side game phase weight: a side with no pieces
// left beyond king and pawns is fully in the endgame (weight = PHASE_MAX)
pub const PHASE_MAX: EvalScore = 152;

// Auxiliary struct to store values that are used in different parts
// of the evaluation, to avoid calculating them multiple times
pub struct EvalData<'a> {
    pub board: &'a Board,
    pub white_pieces: &'a Pieces,
    pub black_pieces: &'a Pieces,

    // Count of pieces of a certain type for every side
    pub wp: EvalScore, pub wr: EvalScore, pub wb: EvalScore, pub wn: EvalScore, pub wq: EvalScore,
    pub bp: EvalScore, pub br: EvalScore, pub bb: EvalScore, pub bn: EvalScore, pub bq: EvalScore,

    // Endgame weight per side, in 1/PHASE_MAX units. The phase is
    // per-side on purpose: a side that has traded off its pieces plays
    // its king and pawns by endgame rules even when the opponent still
    // has the full army.
    white_endgame: EvalScore,
    black_endgame: EvalScore,

    white_score: EvalScore,
    black_score: EvalScore,
}

impl<'a> EvalData<'a> {
    pub fn new(board: &'a Board) -> Self {
        let black_pieces = board.get_pieces(Black);
        let bp = black_pieces.pawns.count() as EvalScore;
        let br = black_pieces.rooks.count() as EvalScore;
        let bn = black_pieces.knights.count() as EvalScore;
        let bb = black_pieces.bishops.count() as EvalScore;
        let bq = black_pieces.queens.count() as EvalScore;

        let white_pieces = board.get_pieces(White);
        let wp = white_pieces.pawns.count() as EvalScore;
        let wr = white_pieces.rooks.count() as EvalScore;
        let wn = white_pieces.knights.count() as EvalScore;
        let wb = white_pieces.bishops.count() as EvalScore;
        let wq = white_pieces.queens.count() as EvalScore;

        let white_endgame = endgame_weight(wq, wr, wb, wn);
        let black_endgame = endgame_weight(bq, br, bb, bn);

        Self {
            board, white_pieces, black_pieces,
            wp, wr, wb, wn, wq,
            bp, br, bb, bn, bq,
            white_endgame, black_endgame,
            white_score: 0, black_score: 0,
        }
    }

    pub fn add(&mut self, color: Color, amount: EvalScore) {
        match color {
            White => self.white_score += amount,
            Black => self.black_score += amount,
        }
    }

    // Interpolates between a middlegame and an endgame value using the
    // phase of the given side
    pub fn interp(&self, color: Color, midgame: EvalScore, endgame: EvalScore) -> EvalScore {
        let weight = match color {
            White => self.white_endgame,
            Black => self.black_endgame,
        };

        (midgame * (PHASE_MAX - weight) + endgame * weight) / PHASE_MAX
    }

    pub fn add_interp(&mut self, color: Color, midgame: EvalScore, endgame: EvalScore) {
        let amount = self.interp(color, midgame, endgame);
        self.add(color, amount);
    }

    pub fn get_pieces(&self, color: Color) -> &Pieces {
        match color {
            White => self.white_pieces,
            Black => self.black_pieces,
        }
    }

    // The final score, from the side to move's perspective
    pub fn score_difference(&self) -> EvalScore {
        (self.white_score - self.black_score) * self.board.turn_color().sign()
    }
}

fn endgame_weight(queens: EvalScore, rooks: EvalScore, bishops: EvalScore, knights: EvalScore) -> EvalScore {
    let material = 45 * queens + 20 * rooks + 10 * (bishops + knights);
    PHASE_MAX - material.min(PHASE_MAX)
}
