use std::fmt::{Display, Formatter};

use super::{Color, PieceType, PieceType::*, Square};
use crate::board::{BitBoard, Board};

// Avoid clashes between the core Result and the formatter Result
type FmtResult = std::fmt::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Normal { from: u8, to: u8 },
    PawnPromotion { from: u8, to: u8, promote_to: PieceType },
    ShortCastle,
    LongCastle,
}

impl Move {
    pub fn empty() -> Self {
        // An invalid move, just to use as placeholder and avoid Options
        Self::Normal { from: 0, to: 0 }
    }

    pub fn to(&self) -> u8 {
        match self {
            Self::Normal { to, .. } => *to,
            Self::PawnPromotion { to, .. } => *to,
            _ => unimplemented!(),
        }
    }

    pub fn from(&self) -> u8 {
        match self {
            Self::Normal { from, .. } => *from,
            Self::PawnPromotion { from, .. } => *from,
            _ => unimplemented!(),
        }
    }

    // A move is a capture if the destination square is occupied by an
    // enemy piece, or if it is a pawn landing on the active e.p. square
    pub fn is_capture(&self, board: &Board) -> bool {
        match self {
            Self::Normal { to, .. } => {
                let to_bb = BitBoard::from_square(*to);
                (to_bb & board.get_all_bitboard()).is_not_empty() || self.is_en_passant(board)
            },
            Self::PawnPromotion { to, .. } => (BitBoard::from_square(*to) & board.get_all_bitboard()).is_not_empty(),
            _ => false,
        }
    }

    pub fn is_en_passant(&self, board: &Board) -> bool {
        match self {
            Self::Normal { from, to } => {
                BitBoard::from_square(*to) == board.ep_square()
                    && board.piece_on(*from) == &Some(Pawn)
            },
            _ => false,
        }
    }

    pub fn piece_moving(&self, board: &Board) -> PieceType {
        match self {
            Self::Normal { from, .. } => board.piece_on(*from).unwrap(),
            Self::PawnPromotion { .. } => Pawn,
            _ => King, // Castling
        }
    }

    pub fn piece_captured(&self, board: &Board) -> Option<PieceType> {
        match self {
            Self::Normal { .. } if self.is_en_passant(board) => Some(Pawn),
            Self::Normal { to, .. } => *board.piece_on(*to),
            Self::PawnPromotion { to, .. } => *board.piece_on(*to),
            _ => None, // Castling
        }
    }

    pub fn from_notation(pos: &str) -> Result<Self, String> {
        match pos {
            "O-O" | "0-0" => Ok(Self::ShortCastle),
            "O-O-O" | "0-0-0" => Ok(Self::LongCastle),
            _ if pos.len() >= 4 => {
                let from = Square::from_notation(&pos[0..2])?.square();
                let to = Square::from_notation(&pos[2..4])?.square();

                if pos.len() == 4 {
                    Ok(Self::Normal { from, to })
                } else {
                    let promote_to = match pos[4..].to_lowercase().as_str() {
                        "q" | "=q" => Queen,
                        "r" | "=r" => Rook,
                        "b" | "=b" => Bishop,
                        "n" | "=n" => Knight,
                        _ => return Err("Invalid move".to_owned()),
                    };

                    Ok(Self::PawnPromotion { from, to, promote_to })
                }
            },
            _ => Err("Invalid move".to_owned()),
        }
    }

    // Long algebraic notation, as used on the wire: e2e4, e7e8q, and
    // e1g1 / e8c8 for castling. Castling needs to know whose move it is,
    // since the enum variants don't carry the rank.
    pub fn to_uci(&self, color: Color) -> String {
        let back_rank = match color {
            Color::White => 0,
            Color::Black => 56,
        };

        match self {
            Self::Normal { from, to } => {
                format!("{}{}", Square::new(*from), Square::new(*to))
            },
            Self::PawnPromotion { from, to, promote_to } => {
                let piece = match promote_to {
                    Queen => 'q',
                    Rook => 'r',
                    Bishop => 'b',
                    Knight => 'n',
                    _ => unreachable!(),
                };
                format!("{}{}{}", Square::new(*from), Square::new(*to), piece)
            },
            Self::ShortCastle => {
                format!("{}{}", Square::new(back_rank + 4), Square::new(back_rank + 6))
            },
            Self::LongCastle => {
                format!("{}{}", Square::new(back_rank + 4), Square::new(back_rank + 2))
            },
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Normal { from, to } => write!(f, "{}{}", Square::new(*from), Square::new(*to)),
            Self::ShortCastle => write!(f, "O-O"),
            Self::LongCastle => write!(f, "O-O-O"),
            Self::PawnPromotion { from, to, promote_to } => write!(
                f,
                "{}{}{}",
                Square::new(*from),
                Square::new(*to),
                match promote_to {
                    Queen => "q",
                    Rook => "r",
                    Bishop => "b",
                    Knight => "n",
                    _ => unreachable!(),
                }
            ),
        }
    }
}
