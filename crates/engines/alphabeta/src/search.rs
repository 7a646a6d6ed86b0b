//! Minimax search, with and without alpha-beta pruning.
//!
//! Both searches poll the deadline before expanding each sibling. Once it has
//! expired they stop at every level and return the extremum gathered so far,
//! which may be computed from a truncated tree. Throwing such results away
//! is the iterative-deepening driver's job.

use reversi_core::{Deadline, GameState, Move};
use serde::{Deserialize, Serialize};

use crate::eval::{Evaluator, WIN_SCORE};

/// What a pruned node reports to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutoffValue {
    /// The running extremum at the moment of the cutoff
    #[default]
    Bound,
    /// ±WIN_SCORE, as the legacy player did; a pruned branch then looks like
    /// a forced win or loss to its parent
    Sentinel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchAlgorithm {
    #[default]
    AlphaBeta,
    Minimax,
}

/// Shared state of one search pass.
pub struct SearchContext<'a, E> {
    pub evaluator: &'a E,
    pub deadline: &'a Deadline,
    pub cutoff: CutoffValue,
    /// Nodes visited, leaves included
    pub nodes: u64,
    /// Set once some line may continue past the depth limit: a leaf was
    /// evaluated at depth zero, or siblings were pruned unexplored
    pub hit_horizon: bool,
}

impl<'a, E> SearchContext<'a, E> {
    pub fn new(evaluator: &'a E, deadline: &'a Deadline) -> Self {
        Self {
            evaluator,
            deadline,
            cutoff: CutoffValue::Bound,
            nodes: 0,
            hit_horizon: false,
        }
    }

    pub fn with_cutoff(mut self, cutoff: CutoffValue) -> Self {
        self.cutoff = cutoff;
        self
    }
}

/// Runs one pass of `algorithm` from the root, which is always a max node.
pub fn search<S, E>(
    algorithm: SearchAlgorithm,
    state: &S,
    depth: u8,
    ctx: &mut SearchContext<'_, E>,
) -> (f64, Option<Move>)
where
    S: GameState,
    E: Evaluator<S>,
{
    match algorithm {
        SearchAlgorithm::AlphaBeta => alpha_beta(state, depth, -WIN_SCORE, WIN_SCORE, true, ctx),
        SearchAlgorithm::Minimax => minimax(state, depth, true, ctx),
    }
}

/// Plain depth-limited minimax.
///
/// Returns the minimax value and the move reaching it. Ties keep the first
/// move in generation order.
pub fn minimax<S, E>(
    state: &S,
    depth: u8,
    maximizing: bool,
    ctx: &mut SearchContext<'_, E>,
) -> (f64, Option<Move>)
where
    S: GameState,
    E: Evaluator<S>,
{
    ctx.nodes += 1;

    if depth == 0 {
        ctx.hit_horizon = true;
        return (ctx.evaluator.evaluate(state), None);
    }

    let moves = state.possible_moves();
    let Some(&first) = moves.first() else {
        return (ctx.evaluator.evaluate(state), None);
    };

    let mut best = if maximizing { -WIN_SCORE } else { WIN_SCORE };
    let mut best_move = first;

    for &mv in &moves {
        if ctx.deadline.expired() {
            break;
        }

        let mut child = state.clone();
        child.perform_move(mv);
        let (value, _) = minimax(&child, depth - 1, !maximizing, ctx);

        let improves = if maximizing { value > best } else { value < best };
        if improves {
            best = value;
            best_move = mv;
        }
    }

    (best, Some(best_move))
}

/// Depth-limited minimax with alpha-beta pruning.
///
/// Requires `alpha < beta`. On a cutoff the value reported depends on
/// `ctx.cutoff`; with [`CutoffValue::Bound`] the root value always equals
/// the plain minimax value for a full-window call.
pub fn alpha_beta<S, E>(
    state: &S,
    depth: u8,
    mut alpha: f64,
    mut beta: f64,
    maximizing: bool,
    ctx: &mut SearchContext<'_, E>,
) -> (f64, Option<Move>)
where
    S: GameState,
    E: Evaluator<S>,
{
    ctx.nodes += 1;

    if depth == 0 {
        ctx.hit_horizon = true;
        return (ctx.evaluator.evaluate(state), None);
    }

    let moves = state.possible_moves();
    let Some(&first) = moves.first() else {
        return (ctx.evaluator.evaluate(state), None);
    };

    let mut best_move = first;

    if maximizing {
        let mut best = -WIN_SCORE;
        for &mv in &moves {
            if ctx.deadline.expired() {
                break;
            }

            let mut child = state.clone();
            child.perform_move(mv);
            let (value, _) = alpha_beta(&child, depth - 1, alpha, beta, false, ctx);

            if value > best {
                best = value;
                best_move = mv;
            }
            alpha = alpha.max(best);
            if best >= beta {
                ctx.hit_horizon = true;
                let reported = match ctx.cutoff {
                    CutoffValue::Bound => best,
                    CutoffValue::Sentinel => WIN_SCORE,
                };
                return (reported, Some(best_move)); // Beta cutoff
            }
        }
        (best, Some(best_move))
    } else {
        let mut best = WIN_SCORE;
        for &mv in &moves {
            if ctx.deadline.expired() {
                break;
            }

            let mut child = state.clone();
            child.perform_move(mv);
            let (value, _) = alpha_beta(&child, depth - 1, alpha, beta, true, ctx);

            if value < best {
                best = value;
                best_move = mv;
            }
            beta = beta.min(best);
            if best <= alpha {
                ctx.hit_horizon = true;
                let reported = match ctx.cutoff {
                    CutoffValue::Bound => best,
                    CutoffValue::Sentinel => -WIN_SCORE,
                };
                return (reported, Some(best_move)); // Alpha cutoff
            }
        }
        (best, Some(best_move))
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
