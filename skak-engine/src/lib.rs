mod engine;
mod evaluation;
mod polyglot;
mod search;
mod time;
mod transposition;

// Exports
pub use engine::{Engine, EngineConfig};
pub use evaluation::{evaluate_position, Evaluation};
pub use polyglot::{polyglot_key, OpeningBook};
pub use search::{is_draw_by_repetition, order_moves, HistoryTable, RatedMove, SearchOptions, SearchResult, SeeCache};
pub use transposition::{NodeType, TTEntry, TTable};
