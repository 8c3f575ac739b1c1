//! Static position evaluation
//!
//! Material plus piece-square bonuses, summed as an absolute score where
//! positive favours White. The search keeps a running score and updates it
//! per move through [`evaluate_delta`] instead of re-scanning the board.
//!
//! ## Module Organization
//!
//! - `position` - full board scan and per-piece contributions
//! - `delta` - O(1) incremental update for a single move

mod delta;
mod position;

pub use delta::{evaluate_delta, victim_square};
pub use position::{evaluate_full, piece_score, pst_index};
