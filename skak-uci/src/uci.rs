// This module implements the Universal Chess Interface (UCI): a
// line-oriented protocol on standard input and output. Searches run on
// a worker thread so that a "stop" command can land while one is in
// flight; the only state shared with the searcher is the stop flag.

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use skak_core::{Board, Move};
use skak_engine::{Engine, EngineConfig, SearchOptions};

const ENGINE_NAME: &str = "Skak";
const ENGINE_AUTHOR: &str = "the Skak developers";

pub struct Uci {
    engine: Arc<Mutex<Engine>>,
    stop_flag: Arc<AtomicBool>,
    board: Board,
    // Zobrist keys of every position of the game so far, the current
    // one included. The searcher uses them for repetition detection.
    past_positions: Vec<u64>,
}

impl Uci {
    pub fn new() -> Self {
        let engine = Engine::new(EngineConfig::default());
        let stop_flag = engine.stop_handle();
        let board = Board::default();
        let past_positions = vec![board.zobrist_key()];

        Self {
            engine: Arc::new(Mutex::new(engine)),
            stop_flag,
            board,
            past_positions,
        }
    }

    // The main UCI processing loop
    pub fn main_loop(&mut self) {
        let stdin = io::stdin();

        loop {
            let mut line = String::new();
            if stdin.read_line(&mut line).unwrap_or(0) == 0 {
                // EOF: behave as a quit
                break;
            }

            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }

            match tokens[0] {
                "uci" => self.uci_command(),
                "isready" => println!("readyok"),
                "ucinewgame" => self.ucinewgame_command(),
                "position" => self.position_command(&tokens),
                "go" => self.go_command(&tokens),
                "stop" => self.stop_flag.store(true, Ordering::Release),
                "quit" => break,
                // Unknown commands are silently ignored, as the
                // protocol requires
                _ => {},
            }
        }
    }

    fn uci_command(&self) {
        println!("id name {} {}", ENGINE_NAME, env!("CARGO_PKG_VERSION"));
        println!("id author {}", ENGINE_AUTHOR);
        println!("uciok");
    }

    fn ucinewgame_command(&mut self) {
        self.engine.lock().unwrap().new_game();
    }

    // position [startpos | fen <fen>] [moves <move>...]
    // The new state is built on the side and only committed when the
    // whole command parses; a malformed FEN or an illegal move leaves
    // the previous position untouched.
    fn position_command(&mut self, tokens: &[&str]) {
        if tokens.len() < 2 {
            return;
        }

        let moves_index = tokens.iter().position(|&t| t == "moves");

        let mut board = match tokens[1] {
            "startpos" => Board::default(),
            "fen" => {
                let fen_end = moves_index.unwrap_or(tokens.len());
                let fen = tokens[2..fen_end].join(" ");
                match Board::from_fen(&fen) {
                    Ok(board) => board,
                    Err(msg) => {
                        eprintln!("Ignoring position command: {}", msg);
                        return;
                    },
                }
            },
            _ => return,
        };

        let mut past_positions = vec![board.zobrist_key()];

        if let Some(index) = moves_index {
            for move_str in &tokens[index + 1..] {
                // Incoming moves are matched against the long algebraic
                // notation of the legal moves of the current position,
                // so castling arrives naturally as e1g1 and friends
                let legal: HashMap<String, Move> = board.legal_moves()
                    .into_iter()
                    .map(|mv| (mv.to_uci(board.turn_color()), mv))
                    .collect();

                match legal.get(&move_str.to_lowercase()) {
                    Some(mv) => {
                        board = board.make_move(mv);
                        past_positions.push(board.zobrist_key());
                    },
                    None => {
                        eprintln!("Ignoring position command: illegal move '{}'", move_str);
                        return;
                    },
                }
            }
        }

        self.board = board;
        self.past_positions = past_positions;
    }

    // go [wtime N] [btime N] [movestogo N] [movetime N] [depth N] [nodes N]
    // The search must run in a separate thread to keep UCI responsive.
    fn go_command(&mut self, tokens: &[&str]) {
        let mut wtime = None;
        let mut btime = None;
        let mut movestogo = None;
        let mut movetime = None;
        let mut depth = None;
        let mut nodes = None;

        let mut i = 1;
        while i < tokens.len() {
            let value = tokens.get(i + 1).and_then(|v| v.parse::<u64>().ok());
            let mut takes_value = true;

            match tokens[i] {
                "wtime" => wtime = value,
                "btime" => btime = value,
                "movestogo" => movestogo = value,
                "movetime" => movetime = value,
                "depth" => depth = value,
                "nodes" => nodes = value,
                // Flags like "infinite" carry no value of their own
                _ => takes_value = false,
            }

            i += if takes_value { 2 } else { 1 };
        }

        let options = SearchOptions {
            total_time_remaining: match self.board.turn_color() {
                skak_core::Color::White => wtime,
                skak_core::Color::Black => btime,
            },
            moves_until_control: movestogo,
            time_for_move: movetime,
            max_depth: depth.map(|d| d as u8),
            max_nodes: nodes,
        };

        let engine = Arc::clone(&self.engine);
        let board = self.board;
        let past_positions = self.past_positions.clone();

        thread::spawn(move || {
            let result = engine.lock().unwrap().find_best_move(&board, &past_positions, options);

            match result.best_move {
                Some(mv) => println!("bestmove {}", mv.to_uci(board.turn_color())),
                None => println!("bestmove 0000"),
            }
        });
    }
}
