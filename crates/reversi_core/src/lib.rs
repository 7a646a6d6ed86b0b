//! Reversi board collaborator shared by all engines.
//!
//! Owns the board representation, legal-move enumeration, the move
//! application primitive and time control. Engines consume the board through
//! the [`GameState`] trait and expose themselves through [`Engine`].

pub mod board;
pub mod error;
pub mod perft;
pub mod symmetry;
pub mod time_control;
pub mod types;

pub use board::Board;
pub use error::BoardError;
pub use perft::perft;
pub use symmetry::Symmetry;
pub use time_control::*;
pub use types::*;

// =============================================================================
// GameState trait — the board interface the search is written against
// =============================================================================

/// What a search needs from a board.
///
/// Implementations must be cheap to clone: every recursive search step works
/// on its own copy, so sibling branches never observe each other's moves.
pub trait GameState: Clone {
    /// Legal moves for the side to move, in a stable generation order.
    fn possible_moves(&self) -> Vec<Move>;

    /// Apply a legal move in place. Destructive: callers copy first.
    fn perform_move(&mut self, mv: Move);

    fn cell(&self, row: u8, col: u8) -> Cell;

    fn side_to_move(&self) -> Color;

    /// Every move played so far, oldest first.
    fn moves_played(&self) -> &[Move];
}

impl GameState for Board {
    fn possible_moves(&self) -> Vec<Move> {
        Board::possible_moves(self)
    }

    fn perform_move(&mut self, mv: Move) {
        Board::perform_move(self, mv)
    }

    fn cell(&self, row: u8, col: u8) -> Cell {
        Board::cell(self, row, col)
    }

    fn side_to_move(&self) -> Color {
        Board::side_to_move(self)
    }

    fn moves_played(&self) -> &[Move] {
        Board::moves_played(self)
    }
}

// =============================================================================
// Engine trait — implemented by every player (alpha-beta, greedy, ...)
// =============================================================================

/// Where a chosen move came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    /// The only legal move; nothing was evaluated
    Forced,
    /// Opening book hit
    Book,
    /// Result of a completed search pass
    Search,
    /// No search pass completed; first legal move returned
    Fallback,
}

/// Result of choosing a move
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The chosen move (None only if there were no legal moves)
    pub best_move: Option<Move>,
    /// Evaluation from the engine's perspective (0 when nothing was evaluated)
    pub score: f64,
    /// Depth of the last completed search pass (0 for book/forced moves)
    pub depth: u8,
    /// Number of nodes searched
    pub nodes: u64,
    /// Whether the clock or a stop request cut the search short
    pub stopped: bool,
    pub source: MoveSource,
}

impl SearchResult {
    pub fn immediate(mv: Move, source: MoveSource) -> Self {
        Self {
            best_move: Some(mv),
            score: 0.0,
            depth: 0,
            nodes: 0,
            stopped: false,
            source,
        }
    }
}

/// Trait that all Reversi players implement.
pub trait Engine: Send {
    /// Pick a move for `board` from `legal_moves`.
    ///
    /// `legal_moves` is the harness's view of the legal moves and is trusted.
    fn choose_move(&mut self, board: &Board, legal_moves: &[Move]) -> SearchResult;

    /// Like [`Engine::choose_move`], but gives up early once `stop` is raised.
    fn choose_move_with_stop(
        &mut self,
        board: &Board,
        legal_moves: &[Move],
        _stop: &StopFlag,
    ) -> SearchResult {
        self.choose_move(board, legal_moves)
    }

    fn name(&self) -> &str;

    fn author(&self) -> &str {
        "reversi-lab"
    }

    /// Reset internal state for a new game.
    fn new_game(&mut self) {}
}
