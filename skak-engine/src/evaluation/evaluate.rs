use std::fmt::{Display, Formatter};
use std::ops::{Add, Neg, Sub};

use skak_core::{attacks, Board, Color::*, PieceType::*};

use super::eval_data::EvalData;
use super::{masks, piece_tables};

pub type EvalScore = i32;

// Score of a checkmate against the side to move. Mate scores found by
// the search encode their distance to the mate as MATE - ply.
pub const MATE: EvalScore = 100_000;
pub const INF: EvalScore = 9_999_999;

// Bonus for a passed pawn, indexed by its distance to the promotion rank
const PASSED_PAWN_BONUS: [EvalScore; 8] = [0, 120, 80, 50, 30, 15, 15, 15];

// Penalty for having N isolated pawns in total
const ISOLATED_PAWN_PENALTY: [EvalScore; 9] = [0, -10, -25, -50, -75, -75, -75, -75, -75];

// Penalty per extra pawn stacked on a file
const DOUBLED_PAWN_PENALTY: EvalScore = -15;

// Represents the evaluation of a position. The goal of using a struct
// instead of an i32 directly is to implement Display, to be able to
// show the score in a much nicer way (for example, moves to checkmate
// instead of the raw score)
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Evaluation {
    score: EvalScore,
}

// Evaluate how favorable a position is for the current side to move.
// A positive score favors the current side, while a negative one
// favors the rival.
pub fn evaluate_position(board: &Board) -> Evaluation {
    // Terminal positions first, so that the score conventions hold
    // exactly: mate against the mover, draws are dead equal
    if board.is_draw_by_material() {
        return Evaluation::new(0);
    }

    if !board.has_legal_moves() {
        return if board.is_check(board.turn_color()) {
            Evaluation::new(-MATE)
        } else {
            Evaluation::new(0)
        };
    }

    let mut eval_data = EvalData::new(board);

    calc_material_score(&mut eval_data);
    calc_positional_score(&mut eval_data);
    calc_center_control(&mut eval_data);
    calc_mobility(&mut eval_data);
    calc_pawn_structure(&mut eval_data);
    calc_bishop_pair_bonus(&mut eval_data);
    calc_rook_files(&mut eval_data);
    calc_king_safety(&mut eval_data);

    Evaluation::new(eval_data.score_difference())
}

// Computes the total piece score of each side, using the normal piece scores
fn calc_material_score(eval_data: &mut EvalData) {
    let white = 100 * eval_data.wp + 320 * eval_data.wn + 330 * eval_data.wb
        + 500 * eval_data.wr + 900 * eval_data.wq;
    let black = 100 * eval_data.bp + 320 * eval_data.bn + 330 * eval_data.bb
        + 500 * eval_data.br + 900 * eval_data.bq;

    eval_data.add(White, white);
    eval_data.add(Black, black);
}

// Gives positional bonuses to each piece using the corresponding table,
// interpolated between the middlegame and endgame phases of its side
fn calc_positional_score(eval_data: &mut EvalData) {
    for color in [White, Black] {
        for piece in [Pawn, Knight, Bishop, Rook, Queen, King] {
            let bb = eval_data.get_pieces(color).get_pieces_of_type(piece);
            for square in bb.piece_indices() {
                let midgame = piece_tables::midgame_value(piece, color, square);
                let endgame = piece_tables::endgame_value(piece, color, square);
                eval_data.add_interp(color, midgame, endgame);
            }
        }
    }
}

// An extra bonus for each of the four central squares a side attacks
fn calc_center_control(eval_data: &mut EvalData) {
    for color in [White, Black] {
        let controlled = (eval_data.board.get_attack_bitboard(color) & masks::CENTER).count() as EvalScore;
        eval_data.add_interp(color, 8 * controlled, 4 * controlled);
    }
}

// One centipawn for each controlled square, two in the endgame
fn calc_mobility(eval_data: &mut EvalData) {
    for color in [White, Black] {
        let controlled = eval_data.board.get_attack_bitboard(color).count() as EvalScore;
        eval_data.add_interp(color, controlled, 2 * controlled);
    }
}

fn calc_pawn_structure(eval_data: &mut EvalData) {
    for color in [White, Black] {
        let own_pawns = eval_data.get_pieces(color).pawns;
        let enemy_pawns = eval_data.get_pieces(!color).pawns;
        let mut isolated = 0;

        for square in own_pawns.piece_indices() {
            let (file, rank) = (square % 8, square / 8);

            // Passed pawns are scored by how close they are to promoting
            if (masks::passed_pawn(color, square) & enemy_pawns).is_empty() {
                let to_promotion = match color {
                    White => 7 - rank,
                    Black => rank,
                };
                eval_data.add(color, PASSED_PAWN_BONUS[to_promotion as usize]);
            }

            if (masks::adjacent_files(file) & own_pawns).is_empty() {
                isolated += 1;
            }
        }

        eval_data.add(color, ISOLATED_PAWN_PENALTY[isolated.min(8)]);

        for file in 0..8u8 {
            let stacked = (masks::file(file) & own_pawns).count() as EvalScore;
            if stacked > 1 {
                eval_data.add(color, DOUBLED_PAWN_PENALTY * (stacked - 1));
            }
        }
    }
}

fn calc_bishop_pair_bonus(eval_data: &mut EvalData) {
    if eval_data.wb >= 2 {
        eval_data.add_interp(White, 20, 60);
    }

    if eval_data.bb >= 2 {
        eval_data.add_interp(Black, 20, 60);
    }
}

// Rooks love open files
fn calc_rook_files(eval_data: &mut EvalData) {
    for color in [White, Black] {
        let own_pawns = eval_data.get_pieces(color).pawns;
        let enemy_pawns = eval_data.get_pieces(!color).pawns;

        for square in eval_data.get_pieces(color).rooks.piece_indices() {
            let file = masks::file(square % 8);

            if (file & (own_pawns | enemy_pawns)).is_empty() {
                eval_data.add(color, 20);
            } else if (file & own_pawns).is_empty() {
                eval_data.add(color, 10);
            }
        }
    }
}

fn calc_king_safety(eval_data: &mut EvalData) {
    let occupancy = eval_data.board.get_all_bitboard();

    for color in [White, Black] {
        let king_square = eval_data.board.king_square(color);
        let (file, rank) = ((king_square % 8) as i8, (king_square / 8) as i8);
        let own_pawns = eval_data.get_pieces(color).pawns;

        // A king tucked away in a corner after castling is worth keeping
        // there while there are still pieces around
        let back_rank = match color {
            White => 0,
            Black => 7,
        };
        if rank == back_rank && (file >= 6 || file <= 2) {
            eval_data.add_interp(color, 30, 0);
        }

        // Pawn shield: the three squares in front of the king, with the
        // center one weighing the most
        let forward = match color {
            White => 1,
            Black => -1,
        };
        for (offset, penalty) in [(-1, 4), (0, 7), (1, 4)] {
            let (f, r) = (file + offset, rank + forward);
            if !(0..8).contains(&f) || !(0..8).contains(&r) {
                continue;
            }

            let shield_square = (r * 8 + f) as u8;
            if (skak_core::BitBoard::from_square(shield_square) & own_pawns).is_empty() {
                eval_data.add_interp(color, -penalty, 0);
            }
        }

        // Count the enemy pieces with eyes on the squares around the king
        let ring = masks::king_ring(king_square);
        let enemy = eval_data.get_pieces(!color);
        let mut attackers = 0;

        for sq in enemy.knights.piece_indices() {
            attackers += (attacks::knight_moves(sq as usize) & ring).is_not_empty() as EvalScore;
        }
        for sq in enemy.bishops.piece_indices() {
            attackers += (attacks::bishop_moves(sq as usize, occupancy) & ring).is_not_empty() as EvalScore;
        }
        for sq in enemy.rooks.piece_indices() {
            attackers += (attacks::rook_moves(sq as usize, occupancy) & ring).is_not_empty() as EvalScore;
        }
        for sq in enemy.queens.piece_indices() {
            attackers += (attacks::queen_moves(sq as usize, occupancy) & ring).is_not_empty() as EvalScore;
        }

        eval_data.add_interp(color, -10 * attackers, -4 * attackers);
    }
}

///////////////////////////////////////////////////////////////////////////////

impl Evaluation {
    pub const fn new(score: EvalScore) -> Self {
        Self { score }
    }

    pub const fn min_val() -> Self {
        Self::new(-INF)
    }

    pub const fn max_val() -> Self {
        Self::new(INF)
    }

    // The score of getting checkmated in `ply` halfmoves
    pub const fn mated_in(ply: u8) -> Self {
        Self::new(-MATE + ply as EvalScore)
    }

    pub const fn score(&self) -> EvalScore {
        self.score
    }

    pub fn is_mate(&self) -> bool {
        self.score.abs() > MATE - 1000
    }

    pub fn is_positive_mate(&self) -> bool {
        self.score > MATE - 1000
    }

    pub fn is_negative_mate(&self) -> bool {
        self.score < -MATE + 1000
    }

    // For mate scores, the distance in plies to the checkmate
    pub fn mate_distance(&self) -> EvalScore {
        MATE - self.score.abs()
    }
}

impl Neg for Evaluation {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.score)
    }
}

impl Sub<EvalScore> for Evaluation {
    type Output = Self;

    fn sub(self, rhs: EvalScore) -> Self::Output {
        Self::new(self.score - rhs)
    }
}

impl Add<EvalScore> for Evaluation {
    type Output = Self;

    fn add(self, rhs: EvalScore) -> Self::Output {
        Self::new(self.score + rhs)
    }
}

impl Sub<Self> for Evaluation {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.score - rhs.score)
    }
}

impl Add<Self> for Evaluation {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.score + rhs.score)
    }
}

impl PartialOrd<EvalScore> for Evaluation {
    fn partial_cmp(&self, other: &EvalScore) -> Option<std::cmp::Ordering> {
        self.score.partial_cmp(other)
    }
}

impl PartialEq<EvalScore> for Evaluation {
    fn eq(&self, other: &EvalScore) -> bool {
        self.score == *other
    }
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_positive_mate() {
            write!(f, "M{}", self.mate_distance())
        } else if self.is_negative_mate() {
            write!(f, "-M{}", self.mate_distance())
        } else {
            write!(f, "{:+.2}", self.score as f32 / 100.0)
        }
    }
}
