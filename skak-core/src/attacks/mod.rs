mod tables;

use crate::board::BitBoard;
use crate::game_elements::Color;
use tables::*;

pub fn rook_moves(pos: usize, blockers: BitBoard) -> BitBoard {
    let blockers = blockers.get_u64();
    let attacks = positive_ray(NORTH, pos, blockers)
        | positive_ray(EAST, pos, blockers)
        | negative_ray(SOUTH, pos, blockers)
        | negative_ray(WEST, pos, blockers);
    BitBoard::new(attacks)
}

pub fn bishop_moves(pos: usize, blockers: BitBoard) -> BitBoard {
    let blockers = blockers.get_u64();
    let attacks = positive_ray(NORTH_EAST, pos, blockers)
        | positive_ray(NORTH_WEST, pos, blockers)
        | negative_ray(SOUTH_EAST, pos, blockers)
        | negative_ray(SOUTH_WEST, pos, blockers);
    BitBoard::new(attacks)
}

pub fn queen_moves(pos: usize, blockers: BitBoard) -> BitBoard {
    rook_moves(pos, blockers) | bishop_moves(pos, blockers)
}

pub fn knight_moves(pos: usize) -> BitBoard {
    BitBoard::new(KNIGHT_MOVES[pos])
}

pub fn king_moves(pos: usize) -> BitBoard {
    BitBoard::new(KING_MOVES[pos])
}

pub fn pawn_attacks(pos: usize, color: Color) -> BitBoard {
    match color {
        Color::White => BitBoard::new(WHITE_PAWN_ATTACKS[pos]),
        Color::Black => BitBoard::new(BLACK_PAWN_ATTACKS[pos]),
    }
}

pub fn pawn_pushes(pos: usize, color: Color) -> BitBoard {
    match color {
        Color::White => BitBoard::new(WHITE_PAWN_PUSHES[pos]),
        Color::Black => BitBoard::new(BLACK_PAWN_PUSHES[pos]),
    }
}

pub fn ep_attackers(pos: usize) -> BitBoard {
    BitBoard::new(EP_ATTACKS[pos])
}

// A ray that grows towards higher square indices is cut at its lowest
// set blocker; the blocker square itself stays in the attack set.
fn positive_ray(dir: usize, pos: usize, blockers: u64) -> u64 {
    let ray = RAYS[dir][pos];
    let on_ray = ray & blockers;

    if on_ray == 0 {
        ray
    } else {
        let first = on_ray.trailing_zeros() as usize;
        ray ^ RAYS[dir][first]
    }
}

fn negative_ray(dir: usize, pos: usize, blockers: u64) -> u64 {
    let ray = RAYS[dir][pos];
    let on_ray = ray & blockers;

    if on_ray == 0 {
        ray
    } else {
        let first = 63 - on_ray.leading_zeros() as usize;
        ray ^ RAYS[dir][first]
    }
}
