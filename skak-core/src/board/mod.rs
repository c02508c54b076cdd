mod bitboard;
mod chess_board;
mod movegen;
mod perft;

pub use bitboard::BitBoard;
pub use chess_board::{Board, Pieces};
