//! Iterative deepening over the fixed-depth searches.

use reversi_core::{BOARD_SIZE, Cell, Deadline, GameState, Move};
use tracing::debug;

use crate::eval::Evaluator;
use crate::search::{CutoffValue, SearchAlgorithm, SearchContext, search};

/// Depth range and search flavour for one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeepeningLimits {
    pub algorithm: SearchAlgorithm,
    pub cutoff: CutoffValue,
    /// First pass; runs to completion whatever the clock says
    pub min_depth: u8,
    pub max_depth: u8,
}

impl Default for DeepeningLimits {
    fn default() -> Self {
        Self {
            algorithm: SearchAlgorithm::AlphaBeta,
            cutoff: CutoffValue::Bound,
            min_depth: 2,
            max_depth: 64,
        }
    }
}

/// Result of iterative deepening.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Best move of the deepest completed pass (None if no pass completed)
    pub best_move: Option<Move>,
    pub score: f64,
    /// Depth of the deepest completed pass
    pub depth: u8,
    /// Nodes over all passes, discarded ones included
    pub nodes: u64,
    /// True if a pass was thrown away because the deadline expired
    pub stopped: bool,
}

/// Searches at `min_depth`, `min_depth + 1`, ... until the deadline expires.
///
/// A pass that returns after the deadline has expired is discarded, since
/// it may have been computed from a truncated tree. The first pass ignores
/// the clock but still honours the deadline's stop flag.
pub fn iterative_deepening<S, E>(
    state: &S,
    evaluator: &E,
    deadline: &Deadline,
    limits: &DeepeningLimits,
) -> SearchOutcome
where
    S: GameState,
    E: Evaluator<S>,
{
    let mut outcome = SearchOutcome {
        best_move: None,
        score: 0.0,
        depth: 0,
        nodes: 0,
        stopped: false,
    };

    // No line can be longer than the number of empty cells.
    let empties = empty_cells(state);
    let floor = deadline.ignoring_clock();
    let min_depth = limits.min_depth.max(1);

    for depth in min_depth..=limits.max_depth.max(min_depth) {
        let pass_deadline = if depth == min_depth { &floor } else { deadline };
        let mut ctx = SearchContext::new(evaluator, pass_deadline).with_cutoff(limits.cutoff);
        let (score, best_move) = search(limits.algorithm, state, depth, &mut ctx);
        outcome.nodes += ctx.nodes;

        if pass_deadline.expired() {
            debug!(depth, nodes = ctx.nodes, "deadline expired, discarding pass");
            outcome.stopped = true;
            break;
        }

        let Some(mv) = best_move else {
            break; // No legal moves at the root
        };

        debug!(depth, score, best = %mv, nodes = ctx.nodes, "completed pass");
        outcome.best_move = Some(mv);
        outcome.score = score;
        outcome.depth = depth;

        // Every line ended before the horizon; deeper passes change nothing.
        if !ctx.hit_horizon || usize::from(depth) >= empties {
            break;
        }
    }

    outcome
}

fn empty_cells<S: GameState>(state: &S) -> usize {
    let size = BOARD_SIZE as u8;
    (0..size)
        .flat_map(|row| (0..size).map(move |col| (row, col)))
        .filter(|&(row, col)| state.cell(row, col) == Cell::Empty)
        .count()
}

#[cfg(test)]
#[path = "deepening_tests.rs"]
mod deepening_tests;
