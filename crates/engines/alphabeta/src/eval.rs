//! Static position evaluation.
//!
//! The heuristic evaluator sums three cheap local signals, each computed as
//! an (own, opponent) pair:
//! - positional weight of every disc plus a flat per-disc bonus
//! - frontier exposure (discs touching an empty cell), penalised
//! - edge runs: same-coloured discs running along an edge from a corner

use std::ops::{Add, Range};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reversi_core::{BOARD_SIZE, Color, DIRECTIONS, GameState, on_board};
use serde::{Deserialize, Serialize};

/// Value of a forced win. Finite so that comparisons and arithmetic on
/// scores stay well-defined.
pub const WIN_SCORE: f64 = 6000.0;

const LAST: u8 = BOARD_SIZE as u8 - 1;
const CORNERS: [(u8, u8); 4] = [(0, 0), (0, LAST), (LAST, 0), (LAST, LAST)];

/// Aggregate score for the engine's own colour and for the opponent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScorePair {
    pub own: f64,
    pub opp: f64,
}

impl ScorePair {
    pub const fn new(own: f64, opp: f64) -> Self {
        Self { own, opp }
    }

    pub const WIN: ScorePair = ScorePair::new(WIN_SCORE, 0.0);
    pub const LOSS: ScorePair = ScorePair::new(0.0, WIN_SCORE);

    /// Scalar utility: own minus opponent.
    #[inline]
    pub fn utility(self) -> f64 {
        self.own - self.opp
    }

    pub fn swapped(self) -> Self {
        Self::new(self.opp, self.own)
    }

    fn credit(&mut self, owner: Color, me: Color, amount: f64) {
        if owner == me {
            self.own += amount;
        } else {
            self.opp += amount;
        }
    }
}

impl Add for ScorePair {
    type Output = ScorePair;

    fn add(self, rhs: ScorePair) -> ScorePair {
        ScorePair::new(self.own + rhs.own, self.opp + rhs.opp)
    }
}

/// The five cell classes of the weight table, closed under the board's
/// eight symmetries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellCategory {
    Corner,
    /// Edge or diagonal neighbour of a corner
    PerimeterCorner,
    Border,
    /// Second ring, away from the corners
    PerimeterBorder,
    Interior,
}

impl CellCategory {
    pub fn of(row: u8, col: u8) -> Self {
        // Fold into the top-left quadrant, then sort the two distances.
        let r = row.min(LAST - row);
        let c = col.min(LAST - col);
        match (r.min(c), r.max(c)) {
            (0, 0) => CellCategory::Corner,
            (0, 1) | (1, 1) => CellCategory::PerimeterCorner,
            (0, _) => CellCategory::Border,
            (1, _) => CellCategory::PerimeterBorder,
            _ => CellCategory::Interior,
        }
    }
}

/// Tunable weights of the heuristic evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    pub corner: f64,
    pub perimeter_corner: f64,
    pub border: f64,
    pub perimeter_border: f64,
    pub interior: f64,
    /// Flat bonus for every disc owned
    pub tile: f64,
    /// Added once per frontier disc; negative because exposure is bad
    pub frontier: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            corner: 10.0,
            perimeter_corner: -2.0,
            border: 3.0,
            perimeter_border: -1.0,
            interior: 0.0,
            tile: 1.5,
            frontier: -1.0,
        }
    }
}

impl EvalWeights {
    /// Weights drawn at random for parameter exploration.
    ///
    /// Deterministic in `seed`. The interior weight stays at zero.
    pub fn randomized(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self {
            corner: draw(&mut rng, 5..50),
            perimeter_corner: draw(&mut rng, -20..-2),
            border: draw(&mut rng, 1..30),
            perimeter_border: draw(&mut rng, -15..-1),
            interior: 0.0,
            tile: draw(&mut rng, 2..30),
            frontier: draw(&mut rng, -10..-1),
        }
    }

    pub fn category_weight(&self, category: CellCategory) -> f64 {
        match category {
            CellCategory::Corner => self.corner,
            CellCategory::PerimeterCorner => self.perimeter_corner,
            CellCategory::Border => self.border,
            CellCategory::PerimeterBorder => self.perimeter_border,
            CellCategory::Interior => self.interior,
        }
    }
}

fn draw(rng: &mut StdRng, range: Range<i32>) -> f64 {
    rng.gen_range(range) as f64
}

/// Per-cell static weights, built once from [`EvalWeights`].
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    cells: [[f64; BOARD_SIZE]; BOARD_SIZE],
}

impl WeightTable {
    pub fn new(weights: &EvalWeights) -> Self {
        let mut cells = [[0.0; BOARD_SIZE]; BOARD_SIZE];
        for (row, line) in cells.iter_mut().enumerate() {
            for (col, weight) in line.iter_mut().enumerate() {
                *weight = weights.category_weight(CellCategory::of(row as u8, col as u8));
            }
        }
        Self { cells }
    }

    #[inline]
    pub fn get(&self, row: u8, col: u8) -> f64 {
        self.cells[row as usize][col as usize]
    }
}

/// Settings of the decaying positional weight.
///
/// After each observed position the positional multiplier becomes
/// `initial - (own_positional + opp_positional) / factor`, so corner and edge
/// weights fade as the board fills up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecaySettings {
    pub initial: f64,
    pub factor: f64,
}

impl Default for DecaySettings {
    fn default() -> Self {
        Self {
            initial: 1.2,
            factor: 250.0,
        }
    }
}

/// Static evaluation used at the leaves of the search.
///
/// `score_pair` and `evaluate` must be pure. `observe` is the only place an
/// evaluator may update its own state, and the move selector calls it once
/// per move before searching.
pub trait Evaluator<S: GameState> {
    fn score_pair(&self, state: &S) -> ScorePair;

    #[inline]
    fn evaluate(&self, state: &S) -> f64 {
        self.score_pair(state).utility()
    }

    fn observe(&mut self, _state: &S) {}
}

/// Sentinel for a side to move without legal moves.
///
/// This approximates game-over detection: it looks only at who is stuck
/// right now, not at the final disc count.
pub fn stuck_side_score<S: GameState>(state: &S, me: Color) -> Option<ScorePair> {
    if !state.possible_moves().is_empty() {
        return None;
    }
    if state.side_to_move() == me {
        Some(ScorePair::LOSS)
    } else {
        Some(ScorePair::WIN)
    }
}

/// Per-signal diagnostic view of a heuristic evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Breakdown {
    pub positional: ScorePair,
    pub frontier: ScorePair,
    pub edges: ScorePair,
}

impl Breakdown {
    pub fn total(&self) -> ScorePair {
        self.positional + self.frontier + self.edges
    }
}

/// Positional + frontier + edge-run evaluator.
#[derive(Debug, Clone)]
pub struct HeuristicEvaluator {
    color: Color,
    weights: EvalWeights,
    table: WeightTable,
    decay_settings: Option<DecaySettings>,
    /// Multiplier on the positional table; 1.0 unless decay is enabled
    decay: f64,
}

impl HeuristicEvaluator {
    pub fn new(color: Color, weights: EvalWeights) -> Self {
        Self {
            color,
            table: WeightTable::new(&weights),
            weights,
            decay_settings: None,
            decay: 1.0,
        }
    }

    pub fn with_decay(mut self, settings: DecaySettings) -> Self {
        self.decay_settings = Some(settings);
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }

    pub fn table(&self) -> &WeightTable {
        &self.table
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }

    /// The three signals separately; ignores the stuck-side sentinel.
    pub fn breakdown<S: GameState>(&self, state: &S) -> Breakdown {
        Breakdown {
            positional: self.positional(state),
            frontier: self.frontier(state),
            edges: self.edge_runs(state),
        }
    }

    fn positional<S: GameState>(&self, state: &S) -> ScorePair {
        let mut pair = ScorePair::default();
        for row in 0..=LAST {
            for col in 0..=LAST {
                if let Some(owner) = state.cell(row, col).color() {
                    let value = self.decay * self.table.get(row, col) + self.weights.tile;
                    pair.credit(owner, self.color, value);
                }
            }
        }
        pair
    }

    fn frontier<S: GameState>(&self, state: &S) -> ScorePair {
        let mut pair = ScorePair::default();
        for row in 0..=LAST {
            for col in 0..=LAST {
                let Some(owner) = state.cell(row, col).color() else {
                    continue;
                };
                let exposed = DIRECTIONS.iter().any(|&(dr, dc)| {
                    let (r, c) = (row as i8 + dr, col as i8 + dc);
                    on_board(r, c) && state.cell(r as u8, c as u8).color().is_none()
                });
                if exposed {
                    pair.credit(owner, self.color, self.weights.frontier);
                }
            }
        }
        pair
    }

    /// Runs along both edges leaving each corner, eight runs in all.
    ///
    /// The legacy player walked only four: top and left from (0, 0), bottom
    /// and right from (7, 7). Discs anchored at (0, 7) or (7, 0) score here
    /// and did not there, so edge values differ from that player's.
    fn edge_runs<S: GameState>(&self, state: &S) -> ScorePair {
        let mut pair = ScorePair::default();
        for (row, col) in CORNERS {
            let corner = state.cell(row, col);
            let Some(owner) = corner.color() else {
                continue;
            };
            let dr: i8 = if row == 0 { 1 } else { -1 };
            let dc: i8 = if col == 0 { 1 } else { -1 };

            for (step_r, step_c) in [(0, dc), (dr, 0)] {
                let mut run = 0u32;
                let (mut r, mut c) = (row as i8, col as i8);
                while on_board(r, c) && state.cell(r as u8, c as u8) == corner {
                    run += 1;
                    r += step_r;
                    c += step_c;
                }
                pair.credit(owner, self.color, run as f64);
            }
        }
        pair
    }
}

impl<S: GameState> Evaluator<S> for HeuristicEvaluator {
    fn score_pair(&self, state: &S) -> ScorePair {
        if let Some(sentinel) = stuck_side_score(state, self.color) {
            return sentinel;
        }
        self.breakdown(state).total()
    }

    fn observe(&mut self, state: &S) {
        if let Some(settings) = self.decay_settings {
            let positional = self.positional(state);
            self.decay = settings.initial - (positional.own + positional.opp) / settings.factor;
        }
    }
}

/// Disc difference, with sentinels for a stuck side and for a wiped-out side.
#[derive(Debug, Clone, Copy)]
pub struct DiscCountEvaluator {
    color: Color,
}

impl DiscCountEvaluator {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl<S: GameState> Evaluator<S> for DiscCountEvaluator {
    fn score_pair(&self, state: &S) -> ScorePair {
        if let Some(sentinel) = stuck_side_score(state, self.color) {
            return sentinel;
        }

        let mut pair = ScorePair::default();
        for row in 0..=LAST {
            for col in 0..=LAST {
                if let Some(owner) = state.cell(row, col).color() {
                    pair.credit(owner, self.color, 1.0);
                }
            }
        }

        if pair.own == 0.0 {
            ScorePair::LOSS
        } else if pair.opp == 0.0 {
            ScorePair::WIN
        } else {
            pair
        }
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
