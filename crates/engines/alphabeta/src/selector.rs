//! Move selection: forced move, opening book, then iterative deepening.

use std::time::{Duration, Instant};

use reversi_core::{
    Board, Color, Deadline, Engine, Move, MoveSource, RoundClock, SearchResult, StopFlag,
};
use tracing::{debug, info, warn};

use crate::book::OpeningBook;
use crate::config::EngineConfig;
use crate::deepening::iterative_deepening;
use crate::error::{EngineError, Result};
use crate::eval::{Evaluator, HeuristicEvaluator};

/// Where each move's time allowance comes from.
#[derive(Debug, Clone)]
enum TimeBudget {
    /// Equal share of what is left in the current round
    Round(RoundClock),
    /// The same allowance for every move
    PerMove(Duration),
}

/// Per-game decision engine for one colour.
///
/// Moves are budgeted by a round clock built from the config's
/// `time_per_round_ms` and `turns_per_round`, unless a fixed per-move
/// allowance replaces it.
pub struct MoveSelector<E> {
    color: Color,
    evaluator: E,
    book: Option<OpeningBook>,
    config: EngineConfig,
    budget: TimeBudget,
}

impl MoveSelector<HeuristicEvaluator> {
    /// Heuristic evaluator from `config` plus the built-in book.
    pub fn from_config(color: Color, config: EngineConfig) -> Self {
        let evaluator = config.evaluator(color);
        MoveSelector::new(color, evaluator, config).with_book(OpeningBook::builtin())
    }
}

impl<E: Evaluator<Board>> MoveSelector<E> {
    pub fn new(color: Color, evaluator: E, config: EngineConfig) -> Self {
        Self {
            color,
            evaluator,
            book: None,
            budget: TimeBudget::Round(config.round_clock()),
            config,
        }
    }

    pub fn with_book(mut self, book: OpeningBook) -> Self {
        self.book = Some(book);
        self
    }

    /// Budget each move from a round of `turns` moves lasting `time_per_round`.
    pub fn with_round(mut self, time_per_round: Duration, turns: u32) -> Self {
        self.budget = TimeBudget::Round(RoundClock::new(
            time_per_round,
            turns,
            self.config.safety_margin(),
        ));
        self
    }

    /// Give every move the same allowance, replacing the round clock.
    pub fn with_move_time(mut self, move_time: Duration) -> Self {
        self.budget = TimeBudget::PerMove(move_time);
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The round clock, unless a fixed per-move allowance is in use.
    pub fn clock(&self) -> Option<&RoundClock> {
        match &self.budget {
            TimeBudget::Round(clock) => Some(clock),
            TimeBudget::PerMove(_) => None,
        }
    }

    /// Budget the next move gets.
    pub fn move_budget(&self) -> Duration {
        match &self.budget {
            TimeBudget::Round(clock) => clock.move_budget(),
            TimeBudget::PerMove(move_time) => *move_time,
        }
    }

    /// Chooses a move from `legal_moves`, which the caller guarantees are the
    /// legal moves of `board`.
    ///
    /// Always returns one of `legal_moves` when there is at least one.
    pub fn select(
        &mut self,
        board: &Board,
        legal_moves: &[Move],
        stop: &StopFlag,
    ) -> Result<SearchResult> {
        let started = Instant::now();
        let Some(&first) = legal_moves.first() else {
            return Err(EngineError::NoLegalMoves);
        };

        let result = if legal_moves.len() == 1 {
            SearchResult::immediate(first, MoveSource::Forced)
        } else if let Some(mv) = self.book_move(board, legal_moves) {
            debug!(ply = board.moves_played().len(), %mv, "book move");
            SearchResult::immediate(mv, MoveSource::Book)
        } else {
            // The budget runs from the moment the move was requested.
            let deadline = Deadline::starting_at(started, Some(self.move_budget()), stop.clone());
            self.search(board, legal_moves, &deadline)
        };

        let elapsed = started.elapsed();
        if let TimeBudget::Round(clock) = &mut self.budget {
            clock.record_move(elapsed);
        }

        if let Some(mv) = result.best_move {
            info!(
                color = ?self.color,
                %mv,
                source = ?result.source,
                depth = result.depth,
                score = result.score,
                nodes = result.nodes,
                elapsed_ms = elapsed.as_millis() as u64,
                "chose move"
            );
        }
        Ok(result)
    }

    fn book_move(&self, board: &Board, legal_moves: &[Move]) -> Option<Move> {
        if board.moves_played().len() >= self.config.book_ply_limit {
            return None;
        }
        let mv = self.book.as_ref()?.lookup_history(board.moves_played())?;
        legal_moves.contains(&mv).then_some(mv)
    }

    fn search(&mut self, board: &Board, legal_moves: &[Move], deadline: &Deadline) -> SearchResult {
        self.evaluator.observe(board);

        let outcome = iterative_deepening(board, &self.evaluator, deadline, &self.config.limits());

        match outcome.best_move.filter(|mv| legal_moves.contains(mv)) {
            Some(mv) => SearchResult {
                best_move: Some(mv),
                score: outcome.score,
                depth: outcome.depth,
                nodes: outcome.nodes,
                stopped: outcome.stopped,
                source: MoveSource::Search,
            },
            None => {
                let fallback = legal_moves[0];
                warn!(
                    %fallback,
                    nodes = outcome.nodes,
                    "no search pass completed, playing first legal move"
                );
                SearchResult {
                    best_move: Some(fallback),
                    score: 0.0,
                    depth: 0,
                    nodes: outcome.nodes,
                    stopped: true,
                    source: MoveSource::Fallback,
                }
            }
        }
    }
}

impl<E: Evaluator<Board> + Send> Engine for MoveSelector<E> {
    fn choose_move(&mut self, board: &Board, legal_moves: &[Move]) -> SearchResult {
        self.choose_move_with_stop(board, legal_moves, &StopFlag::new())
    }

    fn choose_move_with_stop(
        &mut self,
        board: &Board,
        legal_moves: &[Move],
        stop: &StopFlag,
    ) -> SearchResult {
        match self.select(board, legal_moves, stop) {
            Ok(result) => result,
            Err(err) => {
                debug!(%err, "nothing to choose");
                SearchResult {
                    best_move: None,
                    score: 0.0,
                    depth: 0,
                    nodes: 0,
                    stopped: false,
                    source: MoveSource::Fallback,
                }
            }
        }
    }

    fn name(&self) -> &str {
        "AlphaBeta v1.0"
    }

    fn new_game(&mut self) {
        if let TimeBudget::Round(clock) = &mut self.budget {
            clock.reset();
        }
    }
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod selector_tests;
