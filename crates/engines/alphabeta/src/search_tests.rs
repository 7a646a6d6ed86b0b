use std::cell::Cell as Counter;
use std::rc::Rc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reversi_core::{Board, Cell, Color, Deadline, GameState, Move};

use super::*;
use crate::eval::{DiscCountEvaluator, EvalWeights, HeuristicEvaluator, ScorePair};

// =============================================================================
// Hand-built game trees
// =============================================================================

enum Tree {
    Leaf(f64),
    Node(Vec<Tree>),
}

use Tree::{Leaf, Node};

enum Flat {
    Leaf(f64),
    Inner(Vec<usize>),
}

/// A position in an arbitrary game tree; move `(0, i)` goes to child `i`.
#[derive(Clone)]
struct TreeState {
    nodes: Rc<Vec<Flat>>,
    at: usize,
    path: Vec<Move>,
}

impl TreeState {
    fn new(tree: Tree) -> Self {
        fn flatten(tree: Tree, out: &mut Vec<Flat>) -> usize {
            let index = out.len();
            match tree {
                Tree::Leaf(value) => out.push(Flat::Leaf(value)),
                Tree::Node(children) => {
                    out.push(Flat::Inner(Vec::new()));
                    let ids: Vec<usize> = children.into_iter().map(|c| flatten(c, out)).collect();
                    out[index] = Flat::Inner(ids);
                }
            }
            index
        }

        let mut nodes = Vec::new();
        flatten(tree, &mut nodes);
        Self {
            nodes: Rc::new(nodes),
            at: 0,
            path: Vec::new(),
        }
    }

    fn child(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.perform_move(Move::new(0, index as u8));
        next
    }
}

impl GameState for TreeState {
    fn possible_moves(&self) -> Vec<Move> {
        match &self.nodes[self.at] {
            Flat::Leaf(_) => Vec::new(),
            Flat::Inner(children) => (0..children.len()).map(|i| Move::new(0, i as u8)).collect(),
        }
    }

    fn perform_move(&mut self, mv: Move) {
        if let Flat::Inner(children) = &self.nodes[self.at] {
            self.at = children[mv.col as usize];
            self.path.push(mv);
        }
    }

    fn cell(&self, _row: u8, _col: u8) -> Cell {
        Cell::Empty
    }

    fn side_to_move(&self) -> Color {
        if self.path.len() % 2 == 0 { Color::Black } else { Color::White }
    }

    fn moves_played(&self) -> &[Move] {
        &self.path
    }
}

/// Scores leaves by their stored value and counts how often it is asked.
#[derive(Default)]
struct LeafValues {
    calls: Counter<u64>,
}

impl Evaluator<TreeState> for LeafValues {
    fn score_pair(&self, state: &TreeState) -> ScorePair {
        self.calls.set(self.calls.get() + 1);
        match state.nodes[state.at] {
            Flat::Leaf(value) => ScorePair::new(value, 0.0),
            Flat::Inner(_) => ScorePair::default(),
        }
    }
}

fn leaves(values: &[f64]) -> Tree {
    Node(values.iter().map(|&v| Leaf(v)).collect())
}

/// Max at the root, min below; the second branch gets pruned after its first leaf.
fn textbook_tree() -> TreeState {
    TreeState::new(Node(vec![
        leaves(&[3.0, 12.0, 8.0]),
        leaves(&[2.0, 4.0, 6.0]),
        leaves(&[14.0, 5.0, 2.0]),
    ]))
}

fn random_tree(rng: &mut StdRng, depth: u8) -> Tree {
    if depth == 0 || rng.gen_bool(0.1) {
        return Leaf(rng.gen_range(-50i32..50) as f64);
    }
    let width = rng.gen_range(1..=4usize);
    Node((0..width).map(|_| random_tree(rng, depth - 1)).collect())
}

// =============================================================================
// Minimax semantics
// =============================================================================

#[test]
fn test_minimax_textbook_value() {
    let tree = textbook_tree();
    let eval = LeafValues::default();
    let deadline = Deadline::unlimited();
    let mut ctx = SearchContext::new(&eval, &deadline);

    let (value, best) = minimax(&tree, 2, true, &mut ctx);
    assert_eq!(value, 3.0);
    assert_eq!(best, Some(Move::new(0, 0)));
    assert_eq!(eval.calls.get(), 9);
    assert_eq!(ctx.nodes, 13);
}

#[test]
fn test_alpha_beta_prunes_textbook_tree() {
    let tree = textbook_tree();
    let eval = LeafValues::default();
    let deadline = Deadline::unlimited();
    let mut ctx = SearchContext::new(&eval, &deadline);

    let (value, best) = alpha_beta(&tree, 2, -WIN_SCORE, WIN_SCORE, true, &mut ctx);
    assert_eq!(value, 3.0);
    assert_eq!(best, Some(Move::new(0, 0)));
    // 4 and 6 under the second branch are never looked at.
    assert_eq!(eval.calls.get(), 7);
}

#[test]
fn test_cutoff_reports_bound_or_sentinel() {
    let tree = textbook_tree();
    let pruned = tree.child(1);
    let eval = LeafValues::default();
    let deadline = Deadline::unlimited();

    let mut ctx = SearchContext::new(&eval, &deadline);
    let (value, best) = alpha_beta(&pruned, 1, 3.0, WIN_SCORE, false, &mut ctx);
    assert_eq!(value, 2.0);
    assert_eq!(best, Some(Move::new(0, 0)));

    let mut ctx = SearchContext::new(&eval, &deadline).with_cutoff(CutoffValue::Sentinel);
    let (value, _) = alpha_beta(&pruned, 1, 3.0, WIN_SCORE, false, &mut ctx);
    assert_eq!(value, -WIN_SCORE);

    // The legacy sentinel still loses to the real branch at the root.
    let mut ctx = SearchContext::new(&eval, &deadline).with_cutoff(CutoffValue::Sentinel);
    let (value, best) = alpha_beta(&tree, 2, -WIN_SCORE, WIN_SCORE, true, &mut ctx);
    assert_eq!(value, 3.0);
    assert_eq!(best, Some(Move::new(0, 0)));
}

#[test]
fn test_ties_keep_first_move() {
    let tree = TreeState::new(Node(vec![leaves(&[5.0]), leaves(&[5.0]), leaves(&[5.0])]));
    let eval = LeafValues::default();
    let deadline = Deadline::unlimited();

    for algorithm in [SearchAlgorithm::AlphaBeta, SearchAlgorithm::Minimax] {
        let mut ctx = SearchContext::new(&eval, &deadline);
        let (value, best) = search(algorithm, &tree, 2, &mut ctx);
        assert_eq!(value, 5.0);
        assert_eq!(best, Some(Move::new(0, 0)), "{:?}", algorithm);
    }
}

#[test]
fn test_min_node_tracks_its_own_move() {
    let tree = leaves(&[7.0, -1.0, 4.0]);
    let state = TreeState::new(tree);
    let eval = LeafValues::default();
    let deadline = Deadline::unlimited();

    let mut ctx = SearchContext::new(&eval, &deadline);
    let (value, best) = minimax(&state, 1, false, &mut ctx);
    assert_eq!(value, -1.0);
    assert_eq!(best, Some(Move::new(0, 1)));

    let mut ctx = SearchContext::new(&eval, &deadline);
    let (value, best) = alpha_beta(&state, 1, -WIN_SCORE, WIN_SCORE, false, &mut ctx);
    assert_eq!(value, -1.0);
    assert_eq!(best, Some(Move::new(0, 1)));
}

#[test]
fn test_depth_zero_and_terminal_nodes_evaluate() {
    let eval = LeafValues::default();
    let deadline = Deadline::unlimited();

    let leaf = TreeState::new(Leaf(9.0));
    let mut ctx = SearchContext::new(&eval, &deadline);
    assert_eq!(alpha_beta(&leaf, 4, -WIN_SCORE, WIN_SCORE, true, &mut ctx), (9.0, None));
    assert!(!ctx.hit_horizon);

    let tree = textbook_tree();
    let mut ctx = SearchContext::new(&eval, &deadline);
    assert_eq!(minimax(&tree, 0, true, &mut ctx), (0.0, None));
    assert!(ctx.hit_horizon);
}

#[test]
fn test_horizon_flag_only_when_depth_limits() {
    let tree = textbook_tree();
    let eval = LeafValues::default();
    let deadline = Deadline::unlimited();

    // Every leaf sits at depth 2, so a depth-3 pass reaches them all.
    let mut ctx = SearchContext::new(&eval, &deadline);
    search(SearchAlgorithm::Minimax, &tree, 3, &mut ctx);
    assert!(!ctx.hit_horizon);

    let mut ctx = SearchContext::new(&eval, &deadline);
    search(SearchAlgorithm::Minimax, &tree, 1, &mut ctx);
    assert!(ctx.hit_horizon);

    // Pruned siblings were never looked at, so they might go deeper.
    let mut ctx = SearchContext::new(&eval, &deadline);
    search(SearchAlgorithm::AlphaBeta, &tree, 3, &mut ctx);
    assert!(ctx.hit_horizon);

    let flat = TreeState::new(leaves(&[1.0, 2.0, 3.0]));
    let mut ctx = SearchContext::new(&eval, &deadline);
    search(SearchAlgorithm::AlphaBeta, &flat, 3, &mut ctx);
    assert!(!ctx.hit_horizon);
}

#[test]
fn test_pruning_matches_minimax_on_random_trees() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let eval = LeafValues::default();
    let deadline = Deadline::unlimited();

    for case in 0..200 {
        let tree = TreeState::new(random_tree(&mut rng, 5));
        for depth in 1..=5 {
            let mut plain = SearchContext::new(&eval, &deadline);
            let mut pruned = SearchContext::new(&eval, &deadline);
            let expected = minimax(&tree, depth, true, &mut plain);
            let got = alpha_beta(&tree, depth, -WIN_SCORE, WIN_SCORE, true, &mut pruned);

            assert_eq!(got.0, expected.0, "case {} depth {}", case, depth);
            assert!(pruned.nodes <= plain.nodes);
        }
    }
}

// =============================================================================
// Real positions
// =============================================================================

fn positions() -> Vec<Board> {
    let lines: [&[(u8, u8)]; 4] = [
        &[],
        &[(3, 5), (2, 3), (5, 2)],
        &[(3, 5), (2, 5), (2, 4), (4, 5), (3, 6), (2, 6)],
        &[(3, 5), (4, 5), (5, 4), (2, 5), (5, 3), (6, 4)],
    ];
    lines
        .iter()
        .map(|line| {
            let moves: Vec<Move> = line.iter().map(|&(r, c)| Move::new(r, c)).collect();
            Board::from_moves(&moves).unwrap()
        })
        .collect()
}

#[test]
fn test_pruning_matches_minimax_on_boards() {
    let deadline = Deadline::unlimited();

    for board in positions() {
        let me = board.side_to_move();
        let heuristic = HeuristicEvaluator::new(me, EvalWeights::default());
        let discs = DiscCountEvaluator::new(me);

        for depth in 1..=4 {
            let mut plain = SearchContext::new(&heuristic, &deadline);
            let mut pruned = SearchContext::new(&heuristic, &deadline);
            let expected = search(SearchAlgorithm::Minimax, &board, depth, &mut plain);
            let got = search(SearchAlgorithm::AlphaBeta, &board, depth, &mut pruned);
            assert_eq!(got.0, expected.0, "heuristic depth {}", depth);
            assert!(pruned.nodes <= plain.nodes);

            let mut plain = SearchContext::new(&discs, &deadline);
            let mut pruned = SearchContext::new(&discs, &deadline);
            let expected = search(SearchAlgorithm::Minimax, &board, depth, &mut plain);
            let got = search(SearchAlgorithm::AlphaBeta, &board, depth, &mut pruned);
            assert_eq!(got.0, expected.0, "disc count depth {}", depth);
        }
    }
}

#[test]
fn test_root_move_is_legal() {
    let deadline = Deadline::unlimited();
    for board in positions() {
        let eval = HeuristicEvaluator::new(board.side_to_move(), EvalWeights::default());
        let mut ctx = SearchContext::new(&eval, &deadline);
        let (_, best) = search(SearchAlgorithm::AlphaBeta, &board, 3, &mut ctx);
        let best = best.unwrap();
        assert!(board.possible_moves().contains(&best), "{} not legal", best);
    }
}

#[test]
fn test_expired_deadline_stops_at_once() {
    let board = Board::startpos();
    let eval = HeuristicEvaluator::new(Color::Black, EvalWeights::default());
    let deadline = Deadline::new(Some(Duration::ZERO));

    let mut ctx = SearchContext::new(&eval, &deadline);
    let (value, best) = alpha_beta(&board, 6, -WIN_SCORE, WIN_SCORE, true, &mut ctx);
    assert_eq!(best, Some(board.possible_moves()[0]));
    assert_eq!(value, -WIN_SCORE);
    assert_eq!(ctx.nodes, 1);

    let mut ctx = SearchContext::new(&eval, &deadline);
    minimax(&board, 6, true, &mut ctx);
    assert_eq!(ctx.nodes, 1);
}

#[test]
fn test_stop_flag_cancels_search() {
    let board = Board::startpos();
    let eval = HeuristicEvaluator::new(Color::Black, EvalWeights::default());
    let deadline = Deadline::unlimited();
    deadline.stop_flag().stop();

    let mut ctx = SearchContext::new(&eval, &deadline);
    search(SearchAlgorithm::AlphaBeta, &board, 8, &mut ctx);
    assert_eq!(ctx.nodes, 1);
}
