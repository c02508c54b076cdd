mod history;
mod move_ordering;
mod searching;
mod see;

pub use history::HistoryTable;
pub use move_ordering::{order_moves, MoveScore, RatedMove};
pub use searching::{empty_killers, is_draw_by_repetition, Killers, Search, SearchOptions, SearchResult, LIMIT_DEPTH};
pub use see::SeeCache;
