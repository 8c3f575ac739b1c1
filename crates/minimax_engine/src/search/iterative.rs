//! Iterative deepening search
//!
//! Searches depth 1, 2, 3, ... until the budget runs out, keeping the result
//! of the deepest completed iteration. Each iteration starts from an empty
//! transposition table and tries the previous iteration's best move first.

use std::time::Instant;

use tracing::debug;

use super::alphabeta::Searcher;
use crate::board::GameState;
use crate::constants::{MATE_BOUND, MAX_DEPTH};
use crate::tt::TranspositionTable;
use crate::types::{MoveSource, SearchBudget, SearchReport};

/// Whether `score` encodes a forced mate for either side
#[inline]
pub fn is_mate_score(score: i32) -> bool {
    score.abs() > MATE_BOUND
}

/// Iterative deepening search from the position in `state`
///
/// A time budget is only checked after an iteration completes, so the result
/// always comes from a finished iteration. The search stops early once a
/// forced mate is proven, since deeper iterations cannot find a shorter one.
pub fn iterative_deepening(
    state: &mut GameState,
    budget: SearchBudget,
    tt: &mut TranspositionTable,
) -> SearchReport {
    let start = Instant::now();
    let max_depth = match budget {
        SearchBudget::Depth(depth) => depth.clamp(1, MAX_DEPTH),
        SearchBudget::Time(_) => MAX_DEPTH,
    };

    let mut report = SearchReport::empty(start.elapsed());
    let hits_before = tt.hits();

    for depth in 1..=max_depth {
        tt.clear();
        let mut searcher = Searcher::new(tt);
        let Some(result) = searcher.search_root(state, depth, report.best_move) else {
            break;
        };

        report.best_move = Some(result.best_move);
        report.score = result.score;
        report.depth = depth;
        report.nodes += searcher.stats.nodes;
        report.cutoffs += searcher.stats.cutoffs;

        debug!(
            "[SEARCH] depth {} score {} nodes {} best {:?}",
            depth,
            result.score,
            report.nodes,
            report.best_move_uci()
        );

        if is_mate_score(result.score) {
            break;
        }
        if let SearchBudget::Time(limit) = budget {
            if start.elapsed() >= limit {
                break;
            }
        }
    }

    report.tt_hits = tt.hits() - hits_before;
    report.elapsed = start.elapsed();
    report.source = MoveSource::Search;
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MATE_SCORE;
    use shakmaty::Position;
    use std::time::Duration;

    #[test]
    fn test_start_position_depth_one_returns_legal_move() {
        let mut state = GameState::startpos();
        let mut tt = TranspositionTable::new();

        let report = iterative_deepening(&mut state, SearchBudget::Depth(1), &mut tt);

        let best = report.best_move.expect("start position has moves");
        assert!(state.position().legal_moves().contains(&best));
        assert_eq!(report.depth, 1);
        assert!(report.nodes > 20, "root plus every reply should be visited");
    }

    #[test]
    fn test_depth_zero_is_treated_as_one() {
        let mut state = GameState::startpos();
        let mut tt = TranspositionTable::new();
        let report = iterative_deepening(&mut state, SearchBudget::Depth(0), &mut tt);
        assert_eq!(report.depth, 1);
        assert!(report.best_move.is_some());
    }

    #[test]
    fn test_time_budget_completes_at_least_one_iteration() {
        let mut state = GameState::startpos();
        let mut tt = TranspositionTable::new();
        let report = iterative_deepening(&mut state, SearchBudget::Time(Duration::ZERO), &mut tt);

        assert_eq!(report.depth, 1, "clock is only checked after an iteration");
        assert!(report.best_move.is_some());
    }

    #[test]
    fn test_stops_once_mate_is_found() {
        let mut state = GameState::from_fen(
            "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1",
            std::sync::Arc::new(crate::hash::RulesHasher),
        )
        .expect("valid fen");
        let mut tt = TranspositionTable::new();

        let report = iterative_deepening(&mut state, SearchBudget::Depth(6), &mut tt);

        assert_eq!(report.score, MATE_SCORE - 1);
        assert_eq!(report.depth, 1);
        assert_eq!(report.best_move_uci().as_deref(), Some("a1a8"));
    }

    #[test]
    fn test_mate_score_detection() {
        assert!(is_mate_score(MATE_SCORE - 3));
        assert!(is_mate_score(-(MATE_SCORE - 3)));
        assert!(!is_mate_score(2_000));
    }
}
