//! Alpha-Beta Reversi Engine
//!
//! Time-bounded minimax search for Reversi.
//!
//! This engine uses:
//! - Alpha-beta pruning (plain minimax selectable) over cloned board states
//! - Positional + frontier + edge-run static evaluation
//! - Iterative deepening that keeps only passes finished before the deadline
//! - An opening book for the first plies
//! - A supervisor that enforces a hard per-move time limit

mod book_data;

pub mod book;
pub mod config;
pub mod deepening;
pub mod error;
pub mod eval;
pub mod greedy;
pub mod search;
pub mod selector;
pub mod supervisor;

pub use book::{BookParams, OpeningBook, history_token, parse_token};
pub use config::EngineConfig;
pub use deepening::{DeepeningLimits, SearchOutcome, iterative_deepening};
pub use error::{EngineError, Result};
pub use eval::{
    Breakdown, CellCategory, DecaySettings, DiscCountEvaluator, EvalWeights, Evaluator,
    HeuristicEvaluator, ScorePair, WIN_SCORE, WeightTable,
};
pub use greedy::GreedyEngine;
pub use search::{CutoffValue, SearchAlgorithm, SearchContext, alpha_beta, minimax, search};
pub use selector::MoveSelector;
pub use supervisor::Supervisor;

/// The default engine: heuristic evaluation, built-in book, default config.
pub type AlphaBetaEngine = MoveSelector<HeuristicEvaluator>;
