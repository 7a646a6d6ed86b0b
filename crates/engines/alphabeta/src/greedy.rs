//! One-ply greedy player: plays the move whose successor evaluates best.
//!
//! Mostly useful as a sparring partner for the searching engine.

use reversi_core::{Board, Color, Engine, Move, MoveSource, SearchResult};
use tracing::debug;

use crate::book::OpeningBook;
use crate::config::EngineConfig;
use crate::eval::{Evaluator, HeuristicEvaluator};

pub struct GreedyEngine<E> {
    color: Color,
    evaluator: E,
    book: Option<OpeningBook>,
    book_ply_limit: usize,
}

impl GreedyEngine<HeuristicEvaluator> {
    pub fn from_config(color: Color, config: &EngineConfig) -> Self {
        GreedyEngine::new(color, config.evaluator(color))
            .with_book(OpeningBook::builtin(), config.book_ply_limit)
    }
}

impl<E: Evaluator<Board>> GreedyEngine<E> {
    pub fn new(color: Color, evaluator: E) -> Self {
        Self {
            color,
            evaluator,
            book: None,
            book_ply_limit: 0,
        }
    }

    pub fn with_book(mut self, book: OpeningBook, ply_limit: usize) -> Self {
        self.book = Some(book);
        self.book_ply_limit = ply_limit;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    fn book_move(&self, board: &Board, legal_moves: &[Move]) -> Option<Move> {
        if board.moves_played().len() >= self.book_ply_limit {
            return None;
        }
        let mv = self.book.as_ref()?.lookup_history(board.moves_played())?;
        legal_moves.contains(&mv).then_some(mv)
    }

    /// Best successor by static evaluation; ties keep the earlier move.
    fn best_successor(&self, board: &Board, legal_moves: &[Move]) -> Option<(Move, f64)> {
        let mut best: Option<(Move, f64)> = None;
        for &mv in legal_moves {
            let mut next = board.clone();
            next.perform_move(mv);
            let score = self.evaluator.evaluate(&next);
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((mv, score));
            }
        }
        best
    }
}

impl<E: Evaluator<Board> + Send> Engine for GreedyEngine<E> {
    fn choose_move(&mut self, board: &Board, legal_moves: &[Move]) -> SearchResult {
        let Some(&first) = legal_moves.first() else {
            return SearchResult {
                best_move: None,
                score: 0.0,
                depth: 0,
                nodes: 0,
                stopped: false,
                source: MoveSource::Fallback,
            };
        };

        if legal_moves.len() == 1 {
            return SearchResult::immediate(first, MoveSource::Forced);
        }
        if let Some(mv) = self.book_move(board, legal_moves) {
            debug!(%mv, "book move");
            return SearchResult::immediate(mv, MoveSource::Book);
        }

        self.evaluator.observe(board);
        let (mv, score) = self
            .best_successor(board, legal_moves)
            .unwrap_or((first, 0.0));
        SearchResult {
            best_move: Some(mv),
            score,
            depth: 1,
            nodes: legal_moves.len() as u64,
            stopped: false,
            source: MoveSource::Search,
        }
    }

    fn name(&self) -> &str {
        "Greedy v1.0"
    }
}

#[cfg(test)]
mod tests {
    use reversi_core::{Deadline, StopFlag};

    use super::*;
    use crate::eval::EvalWeights;
    use crate::search::{SearchAlgorithm, SearchContext, search};

    fn off_book() -> Board {
        let line = [(2, 4), (2, 3), (1, 2), (1, 3), (0, 2), (0, 1)];
        let moves: Vec<Move> = line.iter().map(|&(r, c)| Move::new(r, c)).collect();
        Board::from_moves(&moves).unwrap()
    }

    #[test]
    fn test_matches_one_ply_search() {
        let board = off_book();
        let color = board.side_to_move();
        let legal = board.possible_moves();
        let eval = HeuristicEvaluator::new(color, EvalWeights::default());
        let mut greedy = GreedyEngine::new(color, eval.clone());

        let deadline = Deadline::unlimited();
        let mut ctx = SearchContext::new(&eval, &deadline);
        let (score, best) = search(SearchAlgorithm::AlphaBeta, &board, 1, &mut ctx);

        let result = greedy.choose_move(&board, &legal);
        assert_eq!(result.best_move, best);
        assert_eq!(result.score, score);
        assert_eq!(result.source, MoveSource::Search);
    }

    #[test]
    fn test_grabs_the_corner() {
        let rows = [
            ".OX.....", "........", "........", "...XO...", "...OX...", "........", "........",
            "........",
        ];
        let board = Board::from_rows(&rows, Color::Black).unwrap();
        let legal = board.possible_moves();
        assert!(legal.len() > 1);

        let eval = HeuristicEvaluator::new(Color::Black, EvalWeights::default());
        let mut greedy = GreedyEngine::new(Color::Black, eval);
        let result = greedy.choose_move(&board, &legal);
        assert_eq!(result.best_move, Some(Move::new(0, 0)));
    }

    #[test]
    fn test_book_and_forced_moves() {
        let board = Board::startpos();
        let legal = board.possible_moves();
        let mut greedy = GreedyEngine::from_config(Color::Black, &EngineConfig::default());

        let result = greedy.choose_move(&board, &legal);
        assert_eq!(result.source, MoveSource::Book);
        assert_eq!(result.best_move, Some(Move::new(3, 5)));

        let result = greedy.choose_move_with_stop(&board, &legal[1..2], &StopFlag::new());
        assert_eq!(result.source, MoveSource::Forced);
        assert_eq!(result.best_move, Some(legal[1]));

        assert_eq!(greedy.choose_move(&board, &[]).best_move, None);
    }
}
