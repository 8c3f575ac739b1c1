//! Alpha-beta minimax over absolute scores
//!
//! White maximizes and Black minimizes, so a node's role follows from the side
//! to move. Leaves return the running score maintained through
//! [`evaluate_delta`]; there is no quiescence extension.
//!
//! Table entries are tagged with the bound they prove and keyed on the
//! position hash alone. Repetition counts and the halfmove clock are not part
//! of the key, so a fivefold or seventy-five-move draw score can transpose
//! onto the same position reached along another path.

use shakmaty::{Color, Move, Position};

use super::ordering::order_moves;
use crate::board::GameState;
use crate::constants::{DRAW_SCORE, INF, MATE_SCORE};
use crate::evaluation::{evaluate_delta, evaluate_full};
use crate::tt::{value_from_tt, value_to_tt, TranspositionTable};
use crate::types::Bound;

/// Score for the side to move being checkmated at `ply`
#[inline]
pub(crate) fn mated_score(loser: Color, ply: u32) -> i32 {
    let score = MATE_SCORE - ply as i32;
    match loser {
        Color::White => -score,
        Color::Black => score,
    }
}

/// Root value and move of a single fixed-depth search, without deepening
///
/// Uses `tt` as is; callers wanting a cold search clear it first.
pub fn search_fixed_depth(
    state: &mut GameState,
    depth: u32,
    tt: &mut TranspositionTable,
) -> Option<(Move, i32)> {
    Searcher::new(tt)
        .search_root(state, depth.max(1), None)
        .map(|result| (result.best_move, result.score))
}

/// Counters accumulated over one iteration
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
}

/// Best root move and its score for one completed iteration
#[derive(Debug, Clone, Copy)]
pub(crate) struct RootResult {
    pub best_move: Move,
    pub score: i32,
}

/// One fixed-depth search over a shared transposition table
pub(crate) struct Searcher<'a> {
    tt: &'a mut TranspositionTable,
    pub stats: SearchStats,
}

impl<'a> Searcher<'a> {
    pub fn new(tt: &'a mut TranspositionTable) -> Self {
        Self {
            tt,
            stats: SearchStats::default(),
        }
    }

    /// Search all root moves to `depth` and pick the best for the side to move
    ///
    /// `hint` is tried first when legal. Returns `None` when there is no legal
    /// move. `depth` must be at least 1.
    pub fn search_root(
        &mut self,
        state: &mut GameState,
        depth: u32,
        hint: Option<Move>,
    ) -> Option<RootResult> {
        let moves = state.legal_moves();
        if moves.is_empty() {
            return None;
        }

        self.stats.nodes += 1;
        let key = state.key();
        let maximizing = state.turn() == Color::White;
        let root_score = evaluate_full(state.position());
        let hint = hint.or_else(|| self.tt.hint(key));
        let ordered = order_moves(state.position(), &moves, hint);

        let mut alpha = -INF;
        let mut beta = INF;
        let mut best: Option<RootResult> = None;

        for mv in ordered {
            let next = evaluate_delta(state.position(), mv, root_score);
            let value = {
                let mut child = state.make(mv);
                self.alphabeta(&mut child, depth - 1, next, alpha, beta, 1)
            };

            let improves = match best {
                None => true,
                Some(current) if maximizing => value > current.score,
                Some(current) => value < current.score,
            };
            if improves {
                best = Some(RootResult {
                    best_move: mv,
                    score: value,
                });
            }
            if maximizing {
                alpha = alpha.max(value);
            } else {
                beta = beta.min(value);
            }
        }

        if let Some(result) = best {
            self.tt
                .store(key, depth, result.score, Bound::Exact, Some(result.best_move));
        }
        best
    }

    /// Value of the position in `state` searched `depth` plies deep
    ///
    /// `score` is the static evaluation of the position, maintained
    /// incrementally by the caller. `ply` is the distance from the root.
    pub fn alphabeta(
        &mut self,
        state: &mut GameState,
        depth: u32,
        score: i32,
        mut alpha: i32,
        mut beta: i32,
        ply: u32,
    ) -> i32 {
        self.stats.nodes += 1;

        let moves = state.legal_moves();
        if moves.is_empty() {
            return if state.position().is_check() {
                mated_score(state.turn(), ply)
            } else {
                DRAW_SCORE
            };
        }
        if state.draw_by_rule().is_some() {
            return DRAW_SCORE;
        }

        let key = state.key();
        if depth == 0 {
            self.tt.store(key, 0, score, Bound::Exact, None);
            return score;
        }

        if let Some(entry) = self.tt.probe(key, depth) {
            let value = value_from_tt(entry.value, ply);
            match entry.bound {
                Bound::Exact => return value,
                Bound::Lower if value >= beta => return value,
                Bound::Upper if value <= alpha => return value,
                _ => {}
            }
        }

        let maximizing = state.turn() == Color::White;
        let ordered = order_moves(state.position(), &moves, self.tt.hint(key));
        let (alpha_in, beta_in) = (alpha, beta);
        let mut best = if maximizing { -INF } else { INF };
        let mut best_move = None;

        for mv in ordered {
            let next = evaluate_delta(state.position(), mv, score);
            let value = {
                let mut child = state.make(mv);
                self.alphabeta(&mut child, depth - 1, next, alpha, beta, ply + 1)
            };

            if maximizing {
                if value > best {
                    best = value;
                    best_move = Some(mv);
                }
                alpha = alpha.max(best);
            } else {
                if value < best {
                    best = value;
                    best_move = Some(mv);
                }
                beta = beta.min(best);
            }

            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        let bound = Bound::classify(best, alpha_in, beta_in);
        self.tt
            .store(key, depth, value_to_tt(best, ply), bound, best_move);
        best
    }
}
