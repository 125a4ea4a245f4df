//! Per-side countdown clock.
//!
//! The clock is pure bookkeeping: the coordinator owns the actual
//! interval timer and feeds each firing through [`ClockState::tick`].
//! Every (re)arming bumps a generation counter, so a tick that was
//! already in flight when its timer was superseded identifies itself as
//! stale and does nothing.

use crate::domain::state::Side;

/// Outcome of one clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick came from a superseded timer, or the clock is stopped.
    Stale,
    /// Normal decrement; both sides' remaining time for broadcast.
    Running { white: u64, black: u64 },
    /// The running side just hit zero. The clock has stopped itself;
    /// the *other* side wins by timeout.
    Expired { winner: Side },
}

#[derive(Debug, Clone)]
pub struct ClockState {
    initial: u64,
    white_remaining: u64,
    black_remaining: u64,
    side_to_move: Side,
    running: bool,
    generation: u64,
}

impl ClockState {
    /// A fresh clock: full time both sides, stopped, White to move.
    pub fn new(initial: u64) -> Self {
        Self {
            initial,
            white_remaining: initial,
            black_remaining: initial,
            side_to_move: Side::White,
            running: false,
            generation: 0,
        }
    }

    /// Arm the countdown for `side`. Returns the generation the caller
    /// must attach to the interval it schedules.
    pub fn start(&mut self, side: Side) -> u64 {
        self.side_to_move = side;
        self.running = true;
        self.generation += 1;
        self.generation
    }

    /// Stop the previous side's countdown and start the other side from
    /// its stored remaining time.
    pub fn switch_side(&mut self) -> u64 {
        self.start(self.side_to_move.opponent())
    }

    /// Halt the countdown entirely (terminal condition).
    pub fn stop(&mut self) {
        self.running = false;
        self.generation += 1;
    }

    /// Restore full time both sides, stopped.
    pub fn reset(&mut self) {
        *self = Self::new(self.initial);
    }

    /// Apply one tick from the timer armed with `generation`.
    pub fn tick(&mut self, generation: u64) -> TickOutcome {
        if !self.running || generation != self.generation {
            return TickOutcome::Stale;
        }
        let remaining = match self.side_to_move {
            Side::White => &mut self.white_remaining,
            Side::Black => &mut self.black_remaining,
        };
        *remaining = remaining.saturating_sub(1);
        if *remaining == 0 {
            let winner = self.side_to_move.opponent();
            self.stop();
            TickOutcome::Expired { winner }
        } else {
            TickOutcome::Running {
                white: self.white_remaining,
                black: self.black_remaining,
            }
        }
    }

    pub fn remaining(&self, side: Side) -> u64 {
        match side {
            Side::White => self.white_remaining,
            Side::Black => self.black_remaining,
        }
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
