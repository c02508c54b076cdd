mod fen_utils;

pub use fen_utils::{read_fen, FENInfo, DEFAULT_FEN};
