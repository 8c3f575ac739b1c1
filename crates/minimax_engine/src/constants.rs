//! # Engine Constants - Evaluation Tables & Search Limits
//!
//! ## Overview
//!
//! Every fixed number the engine relies on lives here: material values in
//! centipawns, the piece-square tables that add a positional bonus per square,
//! the MVV-LVA capture-ordering table and the score bounds used by the
//! alpha-beta window.
//!
//! ## Centipawn Valuation
//!
//! - **Pawn**: 100
//! - **Knight**: 320
//! - **Bishop**: 330
//! - **Rook**: 500
//! - **Queen**: 900
//! - **King**: 0 (the king is never captured; losing it is scored as mate)
//!
//! The small knight/bishop split gives the engine a mild preference for
//! keeping the bishop pair without a dedicated evaluation term.
//!
//! ## Piece-Square Table Layout
//!
//! Tables are written the way a board diagram is read from White's side:
//! the first row is rank 8, the last row is rank 1, files a..h left to right.
//! A Black piece on square `sq` (a1 = 0) reads entry `sq` directly, which is
//! the same as reading its own side of the diagram upside down; a White piece
//! reads the vertically mirrored square. Both colours therefore see the
//! tables from their own point of view. See [`crate::evaluation::pst_index`].
//!
//! ## Score Bounds
//!
//! Scores are absolute: positive favours White. A side that is checkmated at
//! ply `p` scores `MATE_SCORE - p` for the winner, so shorter mates are worth
//! more. Any score whose magnitude exceeds [`MATE_BOUND`] is a forced mate.

use shakmaty::Role;

/// Material value of each role, indexed by `Role as usize` (index 0 unused)
pub const PIECE_VALUES: [i32; 7] = [0, 100, 320, 330, 500, 900, 0];

/// Score of an immediate checkmate at the root
pub const MATE_SCORE: i32 = 100_000;

/// Upper bound on any reachable score; used as the open alpha-beta window
pub const INF: i32 = 1_000_000;

/// Score of a drawn position
pub const DRAW_SCORE: i32 = 0;

/// Deepest iteration the iterative-deepening driver will start
pub const MAX_DEPTH: u32 = 64;

/// Scores beyond this magnitude encode a forced mate
pub const MATE_BOUND: i32 = MATE_SCORE - MAX_DEPTH as i32 * 2;

/// Default fixed search depth when no budget is configured
pub const DEFAULT_DEPTH: u32 = 5;

/// Default opening-book file name
pub const DEFAULT_BOOK_PATH: &str = "Perfect2023.bin";

/// Default seed for the engine's random number generator
pub const DEFAULT_SEED: u64 = 42;

#[rustfmt::skip]
pub const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    30, 30, 30, 40, 40, 30, 30, 30,
    20, 20, 20, 30, 30, 30, 20, 20,
    10, 10, 15, 25, 25, 15, 10, 10,
     5,  5,  5, 20, 20,  5,  5,  5,
     5,  0,  0,  5,  5,  0,  0,  5,
     5,  5,  5,-10,-10,  5,  5,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
pub const KNIGHT_TABLE: [i32; 64] = [
    -5, -5, -5, -5, -5, -5, -5, -5,
    -5,  0,  0, 10, 10,  0,  0, -5,
    -5,  5, 10, 10, 10, 10,  5, -5,
    -5,  5, 10, 15, 15, 10,  5, -5,
    -5,  5, 10, 15, 15, 10,  5, -5,
    -5,  5, 10, 10, 10, 10,  5, -5,
    -5,  0,  0,  5,  5,  0,  0, -5,
    -5,-10, -5, -5, -5, -5,-10, -5,
];

#[rustfmt::skip]
pub const BISHOP_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     0,  0,  0,  0,  0,  0,  0,  0,
     0,  0,  0,  0,  0,  0,  0,  0,
     0, 10,  0,  0,  0,  0, 10,  0,
     5,  0, 10,  0,  0, 10,  0,  5,
     0, 10,  0, 10, 10,  0, 10,  0,
     0, 10,  0, 10, 10,  0, 10,  0,
     0,  0,-10,  0,  0,-10,  0,  0,
];

#[rustfmt::skip]
pub const ROOK_TABLE: [i32; 64] = [
    10, 10, 10, 10, 10, 10, 10, 10,
    10, 10, 10, 10, 10, 10, 10, 10,
     0,  0,  0,  0,  0,  0,  0,  0,
     0,  0,  0,  0,  0,  0,  0,  0,
     0,  0,  0,  0,  0,  0,  0,  0,
     0,  0,  0,  0,  0,  0,  0,  0,
     0,  0,  0, 10, 10,  0,  0,  0,
     0,  0,  0, 10, 10,  5,  0,  0,
];

#[rustfmt::skip]
pub const QUEEN_TABLE: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
     -5,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10,  0,  0,-10,-10,-20,
];

#[rustfmt::skip]
pub const KING_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     0,  0,  0,  0,  0,  0,  0,  0,
     0,  0,  0,  0,  0,  0,  0,  0,
     0,  0,  0,  0,  0,  0,  0,  0,
     0,  0,  0,  0,  0,  0,  0,  0,
     0,  0,  0,  0,  0,  0,  0,  0,
     0,  0,  0, -5, -5, -5,  0,  0,
     0,  0, 10, -5, -5, -5, 10,  0,
];

/// Piece-square table for a role
pub const fn piece_table(role: Role) -> &'static [i32; 64] {
    match role {
        Role::Pawn => &PAWN_TABLE,
        Role::Knight => &KNIGHT_TABLE,
        Role::Bishop => &BISHOP_TABLE,
        Role::Rook => &ROOK_TABLE,
        Role::Queen => &QUEEN_TABLE,
        Role::King => &KING_TABLE,
    }
}

/// MVV-LVA capture score, `[victim][attacker]`, roles 1..=6
///
/// `10000 * victim - attacker`: any capture of a more valuable victim outranks
/// every capture of a cheaper one, ties broken by the cheaper attacker.
pub const MVV_LVA: [[i32; 7]; 7] = build_mvv_lva();

const fn build_mvv_lva() -> [[i32; 7]; 7] {
    let mut table = [[0; 7]; 7];
    let mut victim = 1;
    while victim < 7 {
        let mut attacker = 1;
        while attacker < 7 {
            table[victim][attacker] = 10_000 * victim as i32 - attacker as i32;
            attacker += 1;
        }
        victim += 1;
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mvv_lva_prefers_valuable_victim() {
        let pawn_takes_queen = MVV_LVA[Role::Queen as usize][Role::Pawn as usize];
        let queen_takes_rook = MVV_LVA[Role::Rook as usize][Role::Queen as usize];
        assert!(pawn_takes_queen > queen_takes_rook);
        assert_eq!(pawn_takes_queen, 49_999);
    }

    #[test]
    fn test_mvv_lva_breaks_ties_by_cheaper_attacker() {
        let by_pawn = MVV_LVA[Role::Knight as usize][Role::Pawn as usize];
        let by_queen = MVV_LVA[Role::Knight as usize][Role::Queen as usize];
        assert!(by_pawn > by_queen, "cheaper attacker should rank first");
    }

    #[test]
    fn test_unused_index_is_zero() {
        assert!(MVV_LVA[0].iter().all(|&v| v == 0));
        assert_eq!(PIECE_VALUES[0], 0);
    }

    #[test]
    fn test_mate_bound_below_mate_score() {
        assert!(MATE_BOUND < MATE_SCORE);
        assert!(MATE_SCORE < INF);
    }
}
