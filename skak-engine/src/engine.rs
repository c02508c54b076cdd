use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use skak_core::Board;

use crate::evaluation::Evaluation;
use crate::polyglot::OpeningBook;
use crate::search::{empty_killers, HistoryTable, Killers, Search, SearchOptions, SearchResult, SeeCache};
use crate::transposition::{TTable, DEFAULT_TT_SIZE};

pub struct EngineConfig {
    // Path of the polyglot opening book; None disables book probing.
    // A missing or unreadable file is not an error, just a miss.
    pub book_path: Option<PathBuf>,
    pub only_best_book_moves: bool,
    pub tt_entries: usize,
}

// The engine façade. It owns all state that outlives a single query:
// the transposition table, the killer and history tables, the SEE cache,
// the opening book and the cooperative stop flag.
pub struct Engine {
    tt: TTable,
    killers: Killers,
    history: HistoryTable,
    see: SeeCache,
    book: Option<OpeningBook>,
    stop_flag: Arc<AtomicBool>,
    only_best_book_moves: bool,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let book = config.book_path.as_deref().and_then(|path| {
            match OpeningBook::open(path) {
                Ok(book) => Some(book),
                Err(msg) => {
                    eprintln!("{}", msg);
                    None
                },
            }
        });

        Self {
            tt: TTable::new(config.tt_entries),
            killers: empty_killers(),
            history: HistoryTable::new(),
            see: SeeCache::new(),
            book,
            stop_flag: Arc::new(AtomicBool::new(false)),
            only_best_book_moves: config.only_best_book_moves,
        }
    }

    // Forgets everything learned during the current game. Calling it
    // twice in a row is the same as calling it once.
    pub fn new_game(&mut self) {
        self.tt.reset();
        self.history.reset();
        self.killers = empty_killers();
        self.see.clear();
    }

    // A handle that cancels an in-flight query when set to true. The
    // searcher polls it with acquire ordering, so a release store from
    // any thread is enough.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop_flag)
    }

    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::Release);
    }

    pub fn find_best_move(&mut self, board: &Board, past_positions: &[u64], options: SearchOptions) -> SearchResult {
        self.stop_flag.store(false, Ordering::Release);

        // Query the opening book first; this happens exactly once per
        // move, and any failure falls through to the search
        if let Some(book) = &self.book {
            if let Some(mv) = book.probe(board, self.only_best_book_moves) {
                if board.legal_moves().contains(&mv) {
                    println!("info string book move");
                    return SearchResult { score: Evaluation::new(0), best_move: Some(mv) };
                }

                // A hit whose move is not legal here means a key
                // collision with some other position
                eprintln!("book move for key collision is not legal, ignoring");
            }
        }

        // Otherwise, do a normal search for the best move
        let mut search = Search::new(
            &options,
            past_positions,
            &mut self.tt,
            &mut self.killers,
            &mut self.history,
            &mut self.see,
            Arc::clone(&self.stop_flag),
        );

        search.find_best(board)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            book_path: Some(PathBuf::from("baron30.bin")),
            only_best_book_moves: true,
            tt_entries: DEFAULT_TT_SIZE,
        }
    }
}
