//! Time control for engines.
//!
//! This module provides the per-move deadline that searches poll while they
//! expand the tree, the cancellation flag a supervisor uses to wind an
//! abandoned search down, and the rolling per-round clock that decides how
//! much of the remaining time each move may spend.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Cancellation flag shared between a running search and whoever supervises it.
///
/// Cheap to clone; all clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct StopFlag {
    stopped: Arc<AtomicBool>,
}

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that every search observing this flag stop expanding.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// Fast atomic load, suitable for calling at every node.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }
}

/// Wall-clock deadline for a single move.
///
/// `expired()` is true once `budget` has elapsed since the deadline was
/// created, or as soon as the attached [`StopFlag`] is raised.
#[derive(Debug, Clone)]
pub struct Deadline {
    /// When the move computation started
    start: Instant,
    /// Time allowed for this move (None = infinite)
    budget: Option<Duration>,
    stop: StopFlag,
}

impl Deadline {
    /// Start a deadline now with its own private stop flag.
    pub fn new(budget: Option<Duration>) -> Self {
        Self::with_stop(budget, StopFlag::new())
    }

    /// Start a deadline now that also honours an externally owned stop flag.
    pub fn with_stop(budget: Option<Duration>, stop: StopFlag) -> Self {
        Self::starting_at(Instant::now(), budget, stop)
    }

    /// A deadline whose budget is counted from `start` rather than from now.
    pub fn starting_at(start: Instant, budget: Option<Duration>, stop: StopFlag) -> Self {
        Self {
            start,
            budget,
            stop,
        }
    }

    pub fn unlimited() -> Self {
        Self::new(None)
    }

    /// Same start and stop flag, but the wall clock is ignored.
    ///
    /// Used for the search pass that must always run to completion.
    pub fn ignoring_clock(&self) -> Deadline {
        Deadline {
            start: self.start,
            budget: None,
            stop: self.stop.clone(),
        }
    }

    #[inline]
    pub fn expired(&self) -> bool {
        if self.stop.is_stopped() {
            return true;
        }
        match self.budget {
            Some(budget) => self.start.elapsed() >= budget,
            None => false,
        }
    }

    /// True only if the stop flag was raised, regardless of the clock.
    pub fn is_cancelled(&self) -> bool {
        self.stop.is_stopped()
    }

    pub fn stop_flag(&self) -> &StopFlag {
        &self.stop
    }

    pub fn budget(&self) -> Option<Duration> {
        self.budget
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Get remaining time (None if no limit).
    pub fn remaining(&self) -> Option<Duration> {
        let budget = self.budget?;
        Some(budget.saturating_sub(self.elapsed()))
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::unlimited()
    }
}

/// Rolling time allocation over a round of `turns_per_round` moves.
///
/// Each move gets an equal share of what is left in the round, minus a fixed
/// safety margin that covers the bookkeeping between the last deadline check
/// and the move being handed back.
#[derive(Debug, Clone)]
pub struct RoundClock {
    time_per_round: Duration,
    turns_per_round: u32,
    time_remaining: Duration,
    turns_remaining: u32,
    safety_margin: Duration,
}

impl RoundClock {
    pub fn new(time_per_round: Duration, turns_per_round: u32, safety_margin: Duration) -> Self {
        let turns_per_round = turns_per_round.max(1);
        Self {
            time_per_round,
            turns_per_round,
            time_remaining: time_per_round,
            turns_remaining: turns_per_round,
            safety_margin,
        }
    }

    /// Budget for the next move.
    pub fn move_budget(&self) -> Duration {
        (self.time_remaining / self.turns_remaining).saturating_sub(self.safety_margin)
    }

    /// Charge a finished move against the round.
    ///
    /// The last turn of a round starts a fresh round instead.
    pub fn record_move(&mut self, elapsed: Duration) {
        if self.turns_remaining <= 1 {
            self.time_remaining = self.time_per_round;
            self.turns_remaining = self.turns_per_round;
        } else {
            self.turns_remaining -= 1;
            self.time_remaining = self.time_remaining.saturating_sub(elapsed);
        }
    }

    /// Back to a full round, e.g. for a new game.
    pub fn reset(&mut self) {
        self.time_remaining = self.time_per_round;
        self.turns_remaining = self.turns_per_round;
    }

    pub fn time_remaining(&self) -> Duration {
        self.time_remaining
    }

    pub fn turns_remaining(&self) -> u32 {
        self.turns_remaining
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
