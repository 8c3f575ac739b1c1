//! Alpha-beta search with iterative deepening
//!
//! The core of the engine:
//! - Recursive alpha-beta minimax over absolute (White-positive) scores
//! - Iterative deepening under a depth or wall-clock budget
//! - Transposition table probes with bound-aware cutoffs
//! - Move ordering (cached best move, MVV-LVA captures, quiet moves)
//!
//! ## Module Organization
//!
//! - `alphabeta` - node search and root move selection
//! - `ordering` - move ordering heuristics
//! - `make_unmake` - scoped apply/unapply guard
//! - `iterative` - iterative deepening driver

mod alphabeta;
mod iterative;
mod make_unmake;
mod ordering;

pub use iterative::{is_mate_score, iterative_deepening};
pub use make_unmake::MoveGuard;

pub use alphabeta::search_fixed_depth;

pub(crate) use alphabeta::mated_score;
