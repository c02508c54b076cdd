mod board;
mod fen;
mod game_elements;
mod zobrist;

pub mod attacks;

pub use board::{BitBoard, Board, Pieces};
pub use fen::DEFAULT_FEN;
pub use game_elements::{CastlingRights, Color, Move, PieceType, Square};
