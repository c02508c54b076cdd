mod eval_data;
mod evaluate;
mod masks;
mod piece_tables;

pub use evaluate::{evaluate_position, EvalScore, Evaluation, INF, MATE};
pub use eval_data::EvalData;
