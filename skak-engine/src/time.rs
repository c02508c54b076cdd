use std::cmp::min;
use std::time::Instant;

use crate::search::SearchOptions;

// Offset in microseconds subtracted from the allocated time, so that
// the move is reported before the clock actually runs out
const OFFSET: u64 = 10_000;

// Never allocate less than this, no matter how short the clock is
const MIN_TIME: u64 = 1_000;

pub struct TimeManager {
    unlimited: bool, // Whether we have unlimited time to make a move
    time_for_this_move: u64, // Amount of µs that we have calculated
                             // we can spend on this move
    start: Instant, // Instant in which the time started counting
    finished: bool, // Whether the allocated time has passed
    hard_limit: bool, // Whether we are given a hard time limit for the move
}

impl TimeManager {
    pub fn new(options: &SearchOptions) -> Self {
        let mut time_for_this_move = 0;
        let mut unlimited = false;
        let mut hard_limit = false;

        if let Some(time) = options.time_for_move {
            // We are given a specific value *in millis* for the time we
            // have to make this move, use that value
            time_for_this_move = (time * 1000).saturating_sub(OFFSET).max(MIN_TIME);
            hard_limit = true;
        } else if let Some(remaining) = options.total_time_remaining {
            // We have a total clock remaining. If we also know the number
            // of moves until the next time control, spread the remaining
            // time over them; otherwise assume the game goes on for 40
            // more moves. Aim for 80% of that slice so some margin is
            // left on the clock.
            let total_remaining = remaining * 1000;
            let moves_remaining = options.moves_until_control.unwrap_or(40).max(1);

            time_for_this_move = (total_remaining / moves_remaining * 4 / 5)
                .saturating_sub(OFFSET)
                .max(MIN_TIME);

            // Regardless of the division above, never plan to spend more
            // than half of what is left on the clock
            time_for_this_move = min(time_for_this_move, total_remaining / 2);
        } else {
            // No clock at all, think until stopped or depth-limited
            unlimited = true;
        }

        Self { time_for_this_move, unlimited, hard_limit, start: Instant::now(), finished: false }
    }

    pub fn update(&mut self) {
        if !self.unlimited {
            self.finished = self.elapsed_micros() >= self.time_for_this_move;
        }
    }

    pub fn remaining_micros(&mut self) -> u64 {
        self.update();

        if self.times_up() {
            0
        } else if self.unlimited {
            u64::MAX
        } else {
            self.time_for_this_move.saturating_sub(self.elapsed_micros())
        }
    }

    pub fn elapsed_micros(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }

    pub fn times_up(&self) -> bool {
        self.finished
    }

    pub fn hard_limit(&self) -> bool {
        self.hard_limit
    }
}
