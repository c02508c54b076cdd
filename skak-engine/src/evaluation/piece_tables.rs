use skak_core::{Color, PieceType};

use super::EvalScore;

// Positional bonus tables per piece and game phase. They are written
// down visually, with the top row being the 8th rank, so lookups for
// white flip the rank bits of the square index; black reads them as-is.

const PAWN_MIDGAME: [EvalScore; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

const PAWN_ENDGAME: [EvalScore; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    80, 80, 80, 80, 80, 80, 80, 80,
    50, 50, 50, 50, 50, 50, 50, 50,
    30, 30, 30, 30, 30, 30, 30, 30,
    20, 20, 20, 20, 20, 20, 20, 20,
    10, 10, 10, 10, 10, 10, 10, 10,
    10, 10, 10, 10, 10, 10, 10, 10,
     0,  0,  0,  0,  0,  0,  0,  0,
];

const KNIGHT: [EvalScore; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

const BISHOP: [EvalScore; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

const ROOK: [EvalScore; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

const QUEEN: [EvalScore; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

const KING_MIDGAME: [EvalScore; 64] = [
    -80,-70,-70,-70,-70,-70,-70,-80,
    -60,-60,-60,-60,-60,-60,-60,-60,
    -40,-50,-50,-60,-60,-50,-50,-40,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20, -5, -5, -5, -5, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];

const KING_ENDGAME: [EvalScore; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
     -5,  0,  5,  5,  5,  5,  0, -5,
    -10, -5, 20, 30, 30, 20, -5,-10,
    -15,-10, 35, 45, 45, 35,-10,-15,
    -20,-15, 30, 40, 40, 30,-15,-20,
    -25,-20, 20, 25, 25, 20,-20,-25,
    -30,-25,  0,  0,  0,  0,-25,-30,
    -50,-30,-30,-30,-30,-30,-30,-50,
];

// Each side reads the tables from its own perspective: the square index
// is mirrored vertically for white because of the visual table layout
const fn table_index(color: Color, square: u8) -> usize {
    match color {
        Color::White => (square ^ 56) as usize,
        Color::Black => square as usize,
    }
}

pub fn midgame_value(piece: PieceType, color: Color, square: u8) -> EvalScore {
    let i = table_index(color, square);
    match piece {
        PieceType::Pawn => PAWN_MIDGAME[i],
        PieceType::Knight => KNIGHT[i],
        PieceType::Bishop => BISHOP[i],
        PieceType::Rook => ROOK[i],
        PieceType::Queen => QUEEN[i],
        PieceType::King => KING_MIDGAME[i],
    }
}

pub fn endgame_value(piece: PieceType, color: Color, square: u8) -> EvalScore {
    let i = table_index(color, square);
    match piece {
        PieceType::Pawn => PAWN_ENDGAME[i],
        PieceType::Knight => KNIGHT[i],
        PieceType::Bishop => BISHOP[i],
        PieceType::Rook => ROOK[i],
        PieceType::Queen => QUEEN[i],
        PieceType::King => KING_ENDGAME[i],
    }
}
