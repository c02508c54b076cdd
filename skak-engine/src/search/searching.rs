use std::cmp::{max, min};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use skak_core::{Board, Move};

use super::history::HistoryTable;
use super::move_ordering::{capture_score, order_moves, MoveScore, RatedMove};
use super::see::SeeCache;
use crate::evaluation::{evaluate_position, EvalScore, Evaluation};
use crate::time::TimeManager;
use crate::transposition::{NodeType, TTEntry, TTable};

// The maximum depth that will be reached under any circumstances
pub const LIMIT_DEPTH: usize = 64;

// Number of killer moves to store in each ply
const MAX_KILLERS: usize = 2;

// Quiescence stops extending capture chains past this many extra plies
const MAX_QUIESCENCE_PLY: u8 = 8;

// Margin for delta pruning in quiescence, on top of a queen's value
const DELTA_MARGIN: EvalScore = 200;

// Futility pruning margin, scaling with depth
const FUTILITY_MARGIN: EvalScore = 90;

// Quiet moves whose history score drops below this (times depth) are
// skipped at non-PV nodes
const HISTORY_PRUNING_THRESHOLD: MoveScore = -8000;

// Timer updates are batched: wall-clock reads are only done once per
// this many visited nodes
const TIMER_UPDATE_MASK: u64 = 4095;

// Typedef for the killer moves table
pub type Killers = [[Move; MAX_KILLERS]; LIMIT_DEPTH + 2];

pub fn empty_killers() -> Killers {
    [[Move::empty(); MAX_KILLERS]; LIMIT_DEPTH + 2]
}

// Typedef for the pair (alpha, beta) of score bounds
pub type Bounds = (Evaluation, Evaluation);

// The SearchOptions struct contains a series of parameters for the search
pub struct SearchOptions {
    pub total_time_remaining: Option<u64>, // Milliseconds remaining in our clock
    pub moves_until_control: Option<u64>, // Moves remaining until the next time control stage
    pub time_for_move: Option<u64>, // Millis designated for this move, overrides the previous two
    pub max_depth: Option<u8>, // Maximum depth for the search
    pub max_nodes: Option<u64>, // Stop after visiting this many nodes
}

// A pair of evaluation and best move, so the front-end gets the current
// evaluation in addition to the move itself
pub struct SearchResult {
    pub score: Evaluation,
    pub best_move: Option<Move>,
}

// The Search struct drives one query: it owns the timer and the node
// bookkeeping, and borrows the persistent tables (transposition, killers,
// history, SEE cache) from the engine that spawned it. All search-related
// functions are implemented as methods of this struct.
pub struct Search<'a> {
    timer: TimeManager,
    max_depth: u8,
    max_nodes: u64,
    past_positions: Vec<u64>,
    tt: &'a mut TTable,
    killers: &'a mut Killers,
    history: &'a mut HistoryTable,
    see: &'a mut SeeCache,
    stop_flag: Arc<AtomicBool>,
    stopped: bool,
    node_count: u64,
    root_best_move: Option<Move>,
    static_evals: [EvalScore; LIMIT_DEPTH + 2],
    // Times a stored TT move turned out not to be legal in the position
    // that probed it. Always zero unless something is off.
    tt_move_rejects: u64,
}

impl<'a> Search<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        options: &SearchOptions,
        past_positions: &[u64],
        tt: &'a mut TTable,
        killers: &'a mut Killers,
        history: &'a mut HistoryTable,
        see: &'a mut SeeCache,
        stop_flag: Arc<AtomicBool>,
    ) -> Self {
        Self {
            timer: TimeManager::new(options),
            max_depth: min(options.max_depth.unwrap_or(LIMIT_DEPTH as u8), LIMIT_DEPTH as u8),
            max_nodes: options.max_nodes.unwrap_or(u64::MAX),
            past_positions: past_positions.to_vec(),
            tt,
            killers,
            history,
            see,
            stop_flag,
            stopped: false,
            node_count: 0,
            root_best_move: None,
            static_evals: [0; LIMIT_DEPTH + 2],
            tt_move_rejects: 0,
        }
    }

    // Iterative deepening wrapper over the negamax algorithm, returning
    // the best move along with the associated score.
    pub fn find_best(&mut self, board: &Board) -> SearchResult {
        let legal_moves = board.legal_moves();

        // Nothing to search in a terminal position
        if legal_moves.is_empty() {
            return SearchResult { score: evaluate_position(board), best_move: None };
        }

        // If there is only one legal move, return it immediately
        if legal_moves.len() == 1 {
            return SearchResult { score: Evaluation::new(0), best_move: Some(legal_moves[0]) };
        }

        let mut score = Evaluation::new(0);
        let mut best_move = None;

        // Iterative deepening: instead of diving directly into a search of
        // depth `max_depth`, increase the depth by 1 every time. This may
        // seem counter-intuitive, but it actually runs faster: the best
        // move from the previous iteration is tried first through the
        // transposition table, which makes the alpha-beta pruning remove
        // many more branches.
        let mut depth = 1;

        while depth <= self.max_depth && !self.check_stop() {
            let t_start = self.timer.elapsed_micros();
            let iteration_score = self.negamax(board, depth, 0, (Evaluation::min_val(), Evaluation::max_val()), true);
            let search_time = self.timer.elapsed_micros() - t_start;

            // If we ran out of time during the search, discard the
            // interrupted iteration and keep the previous result
            if self.stopped {
                break;
            }

            // The iteration completed: commit its result
            score = iteration_score;
            best_move = self.root_best_move;
            self.print_progress(board, depth, score);

            // If the current best score is a forced mate within the
            // horizon, either for us or for the opponent, there is no
            // point in looking deeper
            if score.is_mate() && score.mate_distance() <= depth as EvalScore {
                break;
            }

            // It is reasonable to assume that the search time increases
            // with depth. So, if the last iteration took more time than
            // what remains, and we are not given a hard per-move limit,
            // save time by not entering a search that will most likely
            // be interrupted.
            if !self.timer.hard_limit() && search_time > self.timer.remaining_micros() {
                break;
            }

            depth += 1;
        }

        // If no iteration completed at all, fall back to whatever the
        // interrupted first iteration saw at the root
        if best_move.is_none() {
            best_move = self.root_best_move.or_else(|| legal_moves.first().copied());
        }

        // Some closing stats, including the TT sanity register
        let total_micros = self.timer.elapsed_micros().max(1);
        let nps = self.node_count * 1_000_000 / total_micros;
        println!(
            "info string nodes {} nps {} tt_rejected_moves {}",
            self.node_count, nps, self.tt_move_rejects
        );

        SearchResult { score, best_move }
    }

    fn negamax(
        &mut self,
        board: &Board,
        depth: u8,
        ply: u8,
        (mut alpha, mut beta): Bounds,
        can_null: bool,
    ) -> Evaluation {
        self.node_count += 1;

        // Cooperative cancellation: the value returned after a stop is
        // never used, since interrupted iterations are discarded
        if self.check_stop() {
            return Evaluation::new(0);
        }

        // If, for some reason, we go past the limit depth, return the
        // static evaluation right away
        if ply as usize >= LIMIT_DEPTH {
            return evaluate_position(board);
        }

        // At the horizon, resolve pending captures before trusting the
        // static evaluation
        if depth == 0 {
            return self.quiescence(board, 0, alpha, beta);
        }

        let zobrist = board.zobrist_key();

        // Repetitions on the current search path or in the played game
        // are dead draws, as are positions with an expired clock
        if is_draw_by_repetition(board, ply, &self.past_positions) || board.is_fifty_move_draw() {
            return Evaluation::new(0);
        }

        // Check the transposition table. Entries from deep enough
        // searches can narrow the window or resolve the node outright;
        // shallower ones still donate their move to the ordering.
        let mut tt_move = None;
        if let Some(entry) = self.tt.probe(zobrist) {
            tt_move = entry.best_move();

            if entry.depth() >= depth {
                let tt_score = entry.score();
                match entry.node_type() {
                    NodeType::Exact => return tt_score,
                    NodeType::Lowerbound => alpha = max(alpha, tt_score),
                    NodeType::Upperbound => beta = min(beta, tt_score),
                };

                if alpha >= beta {
                    return tt_score;
                }
            }
        }

        let color = board.turn_color();
        let is_check = board.is_check(color);
        let is_pv = (beta - alpha) > 1;

        // Terminal positions: checkmates prefer the shortest path by
        // scoring with the distance from the root
        let moves = board.legal_moves();
        if moves.is_empty() {
            return if is_check {
                Evaluation::mated_in(ply)
            } else {
                Evaluation::new(0)
            };
        }

        if board.is_draw_by_material() {
            return Evaluation::new(0);
        }

        // Null move pruning: give the opponent a free shot with a
        // reduced window. If they can't even then bring the score below
        // beta, the position is good enough to cut. Unsound when in
        // check (passing would be illegal) and in positions with only
        // pawns, where zugzwang is common.
        if can_null && depth >= 3 && !is_check && board.has_non_pawn_material(color) {
            let reduction = if depth >= 6 { 3 } else { 2 };
            let null_board = board.make_null_move();
            let value = -self.negamax(&null_board, depth - 1 - reduction, ply + 1, (-beta, -beta + 1), false);

            if value >= beta && !value.is_mate() {
                return beta;
            }
        }

        // A TT move that is not legal here means a corrupted or
        // colliding entry; drop it and count the event
        if let Some(tm) = tt_move {
            if !moves.contains(&tm) {
                self.tt_move_rejects += 1;
                tt_move = None;
            }
        }

        let rated_moves = order_moves(moves, board, tt_move, &self.killers[ply as usize], self.history, self.see);

        // Static evaluation of this node, for the pruning heuristics.
        // "improving" compares against our previous move two plies ago:
        // prune less when the position is getting better for us.
        let static_eval = match self.tt.probe(zobrist) {
            Some(entry) => entry.score().score(),
            None => evaluate_position(board).score(),
        };
        let improving = !is_check && ply >= 2 && static_eval > self.static_evals[ply as usize - 2];
        self.static_evals[ply as usize] = static_eval;

        let mut best_val = Evaluation::min_val();
        let mut best_move = None;
        let mut move_count = 0usize;
        let alpha_entry = alpha;

        // Quiet moves tried before a beta cutoff, for the history maluses
        let mut analyzed_quiets: Vec<Move> = Vec::with_capacity(64);

        // The hash of this node stays on the path while its children are
        // searched, so they can detect repetitions against it
        self.past_positions.push(zobrist);

        for RatedMove { mv, .. } in rated_moves {
            if self.check_stop() {
                break;
            }

            let is_capture = mv.is_capture(board);
            let is_promotion = matches!(mv, Move::PawnPromotion { .. });
            let gives_check = board.gives_check(&mv);

            // SEE pruning: losing captures are skipped entirely at
            // non-PV nodes, except very close to the horizon where only
            // clearly losing ones go
            if depth >= 2 && is_capture && !is_pv && !gives_check {
                let exchange = self.see.see(board, &mv);
                if exchange < 0 && (depth >= 4 || exchange < -150) {
                    continue;
                }
            }

            let next_board = board.make_move(&mv);
            move_count += 1;

            let is_quiet = !is_capture && !is_promotion;
            let is_refutation = tt_move == Some(mv) || self.is_killer(&mv, ply);
            let history_score = self.history.get_value(&mv, color);

            // History pruning: quiet moves that keep failing everywhere
            // else aren't worth a look at non-PV nodes
            let mut do_prune = depth >= 2 && move_count > 1 && is_quiet && !is_pv
                && history_score < HISTORY_PRUNING_THRESHOLD * depth as MoveScore;

            // Late move pruning: at shallow depths, the tail of the
            // ordered quiet moves is skipped altogether
            if !do_prune && depth <= 8 && is_quiet && !is_pv
                && move_count >= 3 + (depth as usize * depth as usize) / 2 {
                do_prune = true;
            }

            // Futility pruning: close to the horizon, quiet moves can't
            // make up for a static eval far below alpha
            if !do_prune && depth <= 7 && is_quiet && !is_pv && !is_check && !gives_check
                && !alpha.is_mate()
                && static_eval + FUTILITY_MARGIN * depth as EvalScore <= alpha.score() {
                do_prune = true;
            }

            if do_prune {
                continue;
            }

            // Late move reduction: late quiet moves, and captures that
            // SEE doesn't like, get a shallower null-window look first
            let mut do_lmr = depth >= 3 && move_count > 2 + 2 * (is_pv as usize)
                && !is_check && !is_capture && !is_promotion;

            if !do_lmr && is_capture && depth >= 3 && move_count > 2 + (is_pv as usize)
                && self.see.see(board, &mv) <= 0 {
                do_lmr = true;
            }

            let mut val = Evaluation::new(0);
            let mut do_full_search = true;

            if do_lmr {
                let reduction = self.lmr_reduction(board, &mv, depth, move_count, is_pv, gives_check, improving, is_refutation, is_capture);
                val = -self.negamax(&next_board, depth - reduction, ply + 1, (-alpha - 1, -alpha), true);
                // If the reduced search fails low, the full-depth search
                // can be skipped
                do_full_search = val > alpha;
            }

            if !do_lmr || do_full_search {
                // Principal variation search: the first move gets the
                // full window; later ones must first beat a null window
                // before earning a re-search
                if move_count == 1 {
                    val = -self.negamax(&next_board, depth - 1, ply + 1, (-beta, -alpha), true);
                } else {
                    val = -self.negamax(&next_board, depth - 1, ply + 1, (-alpha - 1, -alpha), true);

                    if val > alpha && val < beta {
                        val = -self.negamax(&next_board, depth - 1, ply + 1, (-beta, -alpha), true);
                    }
                }
            }

            if self.stopped {
                break;
            }

            if val > best_val {
                best_val = val;
                best_move = Some(mv);
                if ply == 0 {
                    self.root_best_move = Some(mv);
                }
            }

            alpha = max(alpha, val);

            if alpha >= beta {
                // This move is "too good": the opponent can already
                // guarantee better elsewhere, so they will avoid this
                // node and the remaining moves don't matter
                if is_quiet {
                    self.store_killer(mv, ply);
                    let bonus = (depth as MoveScore) * (depth as MoveScore);
                    self.history.add_bonus(&mv, color, bonus);
                    for quiet in &analyzed_quiets {
                        self.history.add_bonus(quiet, color, -bonus);
                    }
                }
                break;
            }

            if is_quiet {
                analyzed_quiets.push(mv);
            }
        }

        self.past_positions.pop();

        // The value of an interrupted node is meaningless, don't let it
        // reach the table
        if self.stopped {
            return Evaluation::new(0);
        }

        // Every playable move may have been pruned away. The node then
        // fails low with its untouched alpha: there is neither a move
        // nor a score worth storing.
        let bm = match best_move {
            Some(bm) => bm,
            None => return alpha_entry,
        };

        let node_type = if best_val >= beta {
            NodeType::Lowerbound
        } else if best_val > alpha_entry {
            NodeType::Exact
        } else {
            NodeType::Upperbound
        };

        self.tt.store(TTEntry::new(zobrist, depth, best_val, node_type, Some(bm)));

        best_val
    }

    // The quiescence search is a simplified version of negamax that only
    // expands captures and promotions. It runs at the horizon nodes of
    // the standard search and mitigates the horizon effect, making sure
    // we don't misevaluate a position where a piece is left hanging.
    fn quiescence(&mut self, board: &Board, qply: u8, mut alpha: Evaluation, beta: Evaluation) -> Evaluation {
        self.node_count += 1;

        if self.check_stop() {
            return evaluate_position(board);
        }

        if is_draw_by_repetition(board, qply, &self.past_positions) {
            return Evaluation::new(0);
        }

        // Prevent explosions in wildly tactical positions
        if qply >= MAX_QUIESCENCE_PLY {
            return evaluate_position(board);
        }

        let color = board.turn_color();
        let in_check = board.is_check(color);
        let legal_moves = board.legal_moves();

        if legal_moves.is_empty() {
            return if in_check {
                Evaluation::mated_in(qply)
            } else {
                Evaluation::new(0)
            };
        }

        // Stand pat: the side to move can usually decline the pending
        // tactics, so the static score bounds the node from below
        let stand_pat = evaluate_position(board);

        if stand_pat >= beta {
            return beta;
        } else if stand_pat > alpha {
            alpha = stand_pat;
        }

        // Only captures and promotions are searched here. Captures that
        // lose material according to SEE aren't worth extending.
        let mut candidates: Vec<(Move, MoveScore)> = Vec::with_capacity(16);
        for mv in legal_moves {
            let is_capture = mv.is_capture(board);
            let is_promotion = matches!(mv, Move::PawnPromotion { .. });

            if !is_capture && !is_promotion {
                continue;
            }

            if is_capture && !is_promotion && self.see.see(board, &mv) < 0 {
                continue;
            }

            let score = capture_score(&mv, board, self.see);
            candidates.push((mv, score));
        }

        candidates.sort_unstable_by_key(|(_, score)| std::cmp::Reverse(*score));

        // Delta pruning: if not even winning a free queen would bring
        // the score back to alpha, give up on the whole node
        if !in_check && !candidates.is_empty() && stand_pat.score() + 900 + DELTA_MARGIN < alpha.score() {
            return alpha;
        }

        let zobrist = board.zobrist_key();
        let mut best_score = stand_pat;
        let mut best_move = None;

        for (mv, _) in candidates {
            if self.check_stop() {
                return best_score;
            }

            let next_board = board.make_move(&mv);
            let score = -self.quiescence(&next_board, qply + 1, -beta, -alpha);

            if score > best_score {
                best_score = score;
                best_move = Some(mv);

                if score > alpha {
                    alpha = score;
                    if alpha >= beta {
                        break;
                    }
                }
            }
        }

        // Store what was learned, bounded by how deep into the capture
        // chain this node sits
        let node_type = if best_score >= beta {
            NodeType::Lowerbound
        } else if best_score > stand_pat {
            NodeType::Exact
        } else {
            NodeType::Upperbound
        };
        self.tt.store(TTEntry::new(zobrist, qply, best_score, node_type, best_move));

        best_score
    }

    // The late move reduction amount for a move, bounded so the reduced
    // search neither drops straight into quiescence nor re-expands
    #[allow(clippy::too_many_arguments)]
    fn lmr_reduction(
        &mut self,
        board: &Board,
        mv: &Move,
        depth: u8,
        move_count: usize,
        is_pv: bool,
        gives_check: bool,
        improving: bool,
        is_refutation: bool,
        is_capture: bool,
    ) -> u8 {
        let mut reduction = if depth < 3 || move_count < 4 {
            0
        } else {
            (0.75 + (depth as f64).ln() * (move_count as f64).ln() / 2.25).round() as i32
        };

        reduction += !is_pv as i32;
        reduction += !gives_check as i32;
        reduction += !improving as i32;

        if is_refutation {
            reduction -= 2;
        }

        // Promising captures get reduced one ply less
        if is_capture && self.see.see(board, mv) > 0 {
            reduction = max(0, reduction - 1);
        }

        reduction.clamp(1, depth as i32 - 1) as u8
    }

    fn is_killer(&self, mv: &Move, ply: u8) -> bool {
        self.killers[ply as usize][0] == *mv || self.killers[ply as usize][1] == *mv
    }

    fn store_killer(&mut self, mv: Move, ply: u8) {
        let slot = &mut self.killers[ply as usize];
        if mv != slot[0] {
            slot[1] = slot[0];
            slot[0] = mv;
        }
    }

    // Polls the clock (at a reduced cadence), the node budget and the
    // external stop flag. Once any of them trips, the search stays
    // stopped and unwinds.
    fn check_stop(&mut self) -> bool {
        if !self.stopped {
            if self.node_count & TIMER_UPDATE_MASK == 0 {
                self.timer.update();
            }

            self.stopped = self.timer.times_up()
                || self.node_count >= self.max_nodes
                || self.stop_flag.load(Ordering::Acquire);
        }

        self.stopped
    }

    fn print_progress(&self, board: &Board, depth: u8, score: Evaluation) {
        let elapsed = self.timer.elapsed_micros();
        let nps = self.node_count * 1_000_000 / elapsed.max(1);

        // Mate scores are reported in full moves, from our perspective
        let score_str = if score.is_mate() {
            let mate_moves = (score.mate_distance() + 1) / 2;
            let sign = if score.is_positive_mate() { 1 } else { -1 };
            format!("mate {}", sign * mate_moves)
        } else {
            format!("cp {}", score.score())
        };

        let pv = self.root_best_move
            .map(|mv| mv.to_uci(board.turn_color()))
            .unwrap_or_default();

        println!(
            "info depth {} score {} nodes {} nps {} time {} pv {}",
            depth, score_str, self.node_count, nps, elapsed / 1000, pv
        );
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            total_time_remaining: None,
            moves_until_control: None,
            time_for_move: None,
            max_depth: None,
            max_nodes: None,
        }
    }
}

///////////////////////////////////////////////////////////////////////////////
// Some auxiliary functions:

// Determines if a given position is a draw by repetition considering the
// previous history. This function returns true if the current state is either:
// - The third repetition of a position, where the previous two have happened
//   during the moves that were actually played
// - The second repetition of a position that occurred entirely during the
//   search process
// This is because we assume that if a position has repeated twice during
// the search, it is likely that a third repetition will occur, so we save time.
pub fn is_draw_by_repetition(board: &Board, cur_depth: u8, history: &[u64]) -> bool {
    let current_zobrist = board.zobrist_key();
    let mut rep_count = 1;

    // We don't actually have to consider all past states. Moves which reset
    // the halfmove clock are irreversible, and thus no repetitions can occur
    // before them.
    let last_irr_move = board.current_ply().saturating_sub(board.halfmove_clock());

    // This board state may be several moves ahead of the actual game.
    // Determine the last ply that was actually played, so we know whether to
    // stop at 2 repetitions or 3 (see the comment above the function).
    let last_played_ply = board.current_ply().saturating_sub(cur_depth as u16);

    let prev_states = history.iter()
        .copied() // Copy the u64 references into this iter
        .enumerate() // Associate each board state with the (0-based) ply in which it occurred
        .skip(last_irr_move as usize) // Fast forward to the last irreversible state of the board
        .rev() // Start with the most recent move and go backwards
        .step_by(2) // We only need to consider every other state, since reps can only
                    // occur when the side to play is the same as the current one
        .skip(1); // We don't need to consider the current state

    for (ply, zobrist) in prev_states {
        if zobrist == current_zobrist { // We have a repetition!
            rep_count += 1;
            // Stop if we're still inside the search and it's the second rep,
            // or if it's the third one
            if rep_count == 2 && ply as u16 > last_played_ply || rep_count == 3 {
                return true;
            }
        }
    }

    false
}
