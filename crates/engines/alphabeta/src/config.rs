//! Per-session engine configuration, read from TOML.

use std::path::Path;
use std::time::Duration;

use reversi_core::{Color, RoundClock};
use serde::{Deserialize, Serialize};

use crate::deepening::DeepeningLimits;
use crate::error::{EngineError, Result};
use crate::eval::{DecaySettings, EvalWeights, HeuristicEvaluator};
use crate::search::{CutoffValue, SearchAlgorithm};

/// Engine settings. Every field is optional in the TOML file.
///
/// ```toml
/// algorithm = "alpha_beta"
/// max_depth = 12
/// time_per_round_ms = 20000
/// turns_per_round = 10
/// safety_margin_ms = 80
///
/// [weights]
/// corner = 25.0
///
/// [decay]
/// initial = 1.2
/// factor = 250.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub algorithm: SearchAlgorithm,
    pub cutoff: CutoffValue,
    pub min_depth: u8,
    pub max_depth: u8,
    /// Book moves are only played while fewer plies than this have been made
    pub book_ply_limit: usize,
    /// Time for a round of `turns_per_round` moves
    pub time_per_round_ms: u64,
    pub turns_per_round: u32,
    pub safety_margin_ms: u64,
    pub weights: EvalWeights,
    /// When set, replaces `weights` with [`EvalWeights::randomized`]
    pub weight_seed: Option<u64>,
    pub decay: Option<DecaySettings>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            algorithm: SearchAlgorithm::AlphaBeta,
            cutoff: CutoffValue::Bound,
            min_depth: 2,
            max_depth: 64,
            book_ply_limit: 20,
            time_per_round_ms: 10_000,
            turns_per_round: 5,
            safety_margin_ms: 50,
            weights: EvalWeights::default(),
            weight_seed: None,
            decay: None,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_depth < 1 {
            return Err(EngineError::InvalidConfig("min_depth must be at least 1".into()));
        }
        if self.max_depth < self.min_depth {
            return Err(EngineError::InvalidConfig(format!(
                "max_depth {} is below min_depth {}",
                self.max_depth, self.min_depth
            )));
        }
        if self.turns_per_round == 0 {
            return Err(EngineError::InvalidConfig("turns_per_round must be at least 1".into()));
        }
        if let Some(decay) = self.decay.filter(|d| d.factor.is_nan() || d.factor <= 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "decay factor must be positive, got {}",
                decay.factor
            )));
        }
        Ok(())
    }

    pub fn limits(&self) -> DeepeningLimits {
        DeepeningLimits {
            algorithm: self.algorithm,
            cutoff: self.cutoff,
            min_depth: self.min_depth,
            max_depth: self.max_depth,
        }
    }

    pub fn safety_margin(&self) -> Duration {
        Duration::from_millis(self.safety_margin_ms)
    }

    pub fn time_per_round(&self) -> Duration {
        Duration::from_millis(self.time_per_round_ms)
    }

    /// A fresh round clock for these settings.
    pub fn round_clock(&self) -> RoundClock {
        RoundClock::new(self.time_per_round(), self.turns_per_round, self.safety_margin())
    }

    /// Weights in effect after applying `weight_seed`.
    pub fn effective_weights(&self) -> EvalWeights {
        match self.weight_seed {
            Some(seed) => EvalWeights::randomized(seed),
            None => self.weights,
        }
    }

    /// Heuristic evaluator for `color` with these weights and decay.
    pub fn evaluator(&self, color: Color) -> HeuristicEvaluator {
        let evaluator = HeuristicEvaluator::new(color, self.effective_weights());
        match self.decay {
            Some(settings) => evaluator.with_decay(settings),
            None => evaluator,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
