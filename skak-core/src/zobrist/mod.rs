mod zobrist_utils;

pub use zobrist_utils::{get_key_castling, get_key_ep_square, get_key_for_piece, get_key_white_turn};
