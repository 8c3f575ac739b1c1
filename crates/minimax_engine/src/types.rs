//! Core types shared across the engine
//!
//! ## Type Organization
//!
//! - [`SearchBudget`] - how long the root driver may keep deepening
//! - [`Bound`] - how a cached score relates to the true minimax value
//! - [`SearchReport`] - what a root search produced and how much work it took
//! - [`EngineConfig`] - construction-time settings, loadable from JSON

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shakmaty::uci::UciMove;
use shakmaty::Move;

use crate::constants::{DEFAULT_BOOK_PATH, DEFAULT_DEPTH, DEFAULT_SEED};

/// Limit for one root search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBudget {
    /// Search every iteration up to and including this depth
    Depth(u32),
    /// Keep deepening until this much wall-clock time has elapsed.
    ///
    /// The clock is only consulted between iterations, so the last iteration
    /// may overrun.
    Time(Duration),
}

impl Default for SearchBudget {
    fn default() -> Self {
        SearchBudget::Depth(DEFAULT_DEPTH)
    }
}

/// Relationship between a stored score and the true value of the position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Score is the exact minimax value
    Exact,
    /// True value is at least the score (search failed high)
    Lower,
    /// True value is at most the score (search failed low)
    Upper,
}

impl Bound {
    /// Classify a node result against the window it was searched with
    pub fn classify(value: i32, alpha: i32, beta: i32) -> Self {
        if value <= alpha {
            Bound::Upper
        } else if value >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        }
    }
}

/// Where the chosen move came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveSource {
    Book,
    Search,
}

/// Outcome of a root search
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub best_move: Option<Move>,
    /// Absolute score of the best line, positive favours White
    pub score: i32,
    /// Deepest fully completed iteration
    pub depth: u32,
    pub nodes: u64,
    pub tt_hits: u64,
    pub cutoffs: u64,
    pub elapsed: Duration,
    pub source: MoveSource,
}

impl SearchReport {
    /// Report for a position with nothing to search
    pub fn empty(elapsed: Duration) -> Self {
        Self {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
            tt_hits: 0,
            cutoffs: 0,
            elapsed,
            source: MoveSource::Search,
        }
    }

    /// Best move in UCI notation
    pub fn best_move_uci(&self) -> Option<String> {
        self.best_move
            .map(|m| UciMove::from_standard(m).to_string())
    }
}

/// Which position-key scheme the game state maintains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashScheme {
    /// Polyglot-compatible key supplied by the rules library
    #[default]
    Rules,
    /// Engine-owned Zobrist tables drawn from [`EngineConfig::seed`]
    Seeded,
}

/// Engine construction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed search depth, used when `move_time_ms` is not set
    pub depth: u32,
    /// Wall-clock budget per move in milliseconds
    pub move_time_ms: Option<u64>,
    /// Polyglot opening book; `None` disables book lookups
    pub book_path: Option<PathBuf>,
    /// Seed for Zobrist tables and weighted book choices
    pub seed: u64,
    pub hash_scheme: HashScheme,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            move_time_ms: None,
            book_path: Some(PathBuf::from(DEFAULT_BOOK_PATH)),
            seed: DEFAULT_SEED,
            hash_scheme: HashScheme::Rules,
        }
    }
}

impl EngineConfig {
    /// Budget implied by the settings; a move time wins over a depth
    pub fn budget(&self) -> SearchBudget {
        match self.move_time_ms {
            Some(ms) => SearchBudget::Time(Duration::from_millis(ms)),
            None => SearchBudget::Depth(self.depth),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_classify() {
        assert_eq!(Bound::classify(-5, 0, 10), Bound::Upper);
        assert_eq!(Bound::classify(0, 0, 10), Bound::Upper);
        assert_eq!(Bound::classify(5, 0, 10), Bound::Exact);
        assert_eq!(Bound::classify(10, 0, 10), Bound::Lower);
    }

    #[test]
    fn test_config_budget_prefers_move_time() {
        let mut config = EngineConfig::default();
        assert_eq!(config.budget(), SearchBudget::Depth(DEFAULT_DEPTH));

        config.move_time_ms = Some(250);
        assert_eq!(
            config.budget(),
            SearchBudget::Time(Duration::from_millis(250))
        );
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "depth": 3, "hash_scheme": "seeded" }"#)
                .expect("partial config should parse");

        assert_eq!(config.depth, 3);
        assert_eq!(config.hash_scheme, HashScheme::Seeded);
        assert_eq!(config.seed, DEFAULT_SEED);
        assert_eq!(config.book_path, Some(PathBuf::from(DEFAULT_BOOK_PATH)));
    }
}
