//! Incremental evaluation
//!
//! Applies the score change of a single move without touching the rest of the
//! board. Must agree exactly with [`evaluate_full`](super::evaluate_full) on
//! the resulting position.

use shakmaty::{Chess, Move, Position, Square};

use super::position::piece_score;

/// Square the captured piece actually stands on
///
/// Differs from the destination only for en passant, where the victim sits
/// beside the capturing pawn's origin, one rank behind the destination.
pub fn victim_square(mv: Move) -> Option<Square> {
    match mv {
        Move::Normal {
            capture: Some(_),
            to,
            ..
        } => Some(to),
        Move::EnPassant { from, to } => Some(Square::from_coords(to.file(), from.rank())),
        _ => None,
    }
}

/// Score after `mv`, given the score `current` of `before`
///
/// `before` is the position with `mv` not yet applied.
pub fn evaluate_delta(before: &Chess, mv: Move, current: i32) -> i32 {
    let us = before.turn();
    let mut score = current;

    // Captured piece first, read from the pre-move board.
    if let Some(square) = victim_square(mv) {
        if let Some(victim) = before.board().piece_at(square) {
            score -= piece_score(victim, square);
        }
    }

    match mv {
        Move::Normal {
            role,
            from,
            to,
            promotion,
            ..
        } => {
            score -= piece_score(role.of(us), from);
            score += piece_score(promotion.unwrap_or(role).of(us), to);
        }
        Move::EnPassant { from, to } => {
            let pawn = shakmaty::Role::Pawn.of(us);
            score -= piece_score(pawn, from);
            score += piece_score(pawn, to);
        }
        Move::Castle { king, rook } => {
            if let Some(side) = mv.castling_side() {
                let king_piece = shakmaty::Role::King.of(us);
                let rook_piece = shakmaty::Role::Rook.of(us);
                score -= piece_score(king_piece, king);
                score += piece_score(king_piece, side.king_to(us));
                score -= piece_score(rook_piece, rook);
                score += piece_score(rook_piece, side.rook_to(us));
            }
        }
        Move::Put { role, to } => {
            score += piece_score(role.of(us), to);
        }
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::evaluate_full;
    use shakmaty::fen::Fen;
    use shakmaty::uci::UciMove;
    use shakmaty::CastlingMode;

    fn position(fen: &str) -> Chess {
        fen.parse::<Fen>()
            .expect("valid fen")
            .into_position(CastlingMode::Standard)
            .expect("legal position")
    }

    /// Plays `uci` on `fen` and checks delta against a full rescan
    fn assert_delta_matches(fen: &str, uci: &str) {
        let before = position(fen);
        let mv = uci
            .parse::<UciMove>()
            .expect("valid uci")
            .to_move(&before)
            .expect("legal move");

        let delta = evaluate_delta(&before, mv, evaluate_full(&before));

        let mut after = before.clone();
        after.play_unchecked(mv);
        assert_eq!(
            delta,
            evaluate_full(&after),
            "delta evaluation diverged for {uci} in {fen}"
        );
    }

    #[test]
    fn test_delta_quiet_move() {
        assert_delta_matches(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "g1f3",
        );
        assert_delta_matches(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
            "e7e5",
        );
    }

    #[test]
    fn test_delta_capture() {
        assert_delta_matches(
            "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2",
            "e4d5",
        );
        assert_delta_matches(
            "rnb1kbnr/pppp1ppp/8/4p3/4P2q/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 3",
            "h4f2",
        );
    }

    #[test]
    fn test_delta_en_passant_both_colours() {
        assert_delta_matches(
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
            "e5f6",
        );
        assert_delta_matches(
            "rnbqkbnr/pppp1ppp/8/8/3Pp3/8/PPP1PPPP/RNBQKBNR b KQkq d3 0 3",
            "e4d3",
        );
    }

    #[test]
    fn test_delta_en_passant_removes_real_victim() {
        let before = position("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
        let mv = "e5f6"
            .parse::<UciMove>()
            .expect("valid uci")
            .to_move(&before)
            .expect("legal move");
        assert_eq!(victim_square(mv), Some(Square::F5));
    }

    #[test]
    fn test_delta_castling_both_sides() {
        let fen = "r3k2r/pppq1ppp/2npbn2/2b1p3/2B1P3/2NPBN2/PPPQ1PPP/R3K2R w KQkq - 4 8";
        assert_delta_matches(fen, "e1g1");
        assert_delta_matches(fen, "e1c1");

        let black = "r3k2r/pppq1ppp/2npbn2/2b1p3/2B1P3/2NPBN2/PPPQ1PPP/R4RK1 b kq - 5 8";
        assert_delta_matches(black, "e8g8");
        assert_delta_matches(black, "e8c8");
    }

    #[test]
    fn test_delta_promotions() {
        assert_delta_matches("8/P6k/8/8/8/8/8/K7 w - - 0 1", "a7a8q");
        assert_delta_matches("8/P6k/8/8/8/8/8/K7 w - - 0 1", "a7a8n");
        assert_delta_matches("1r5k/P7/8/8/8/8/8/K7 w - - 0 1", "a7b8q");
        assert_delta_matches("K7/8/8/8/8/8/p6k/8 b - - 0 1", "a2a1r");
    }
}
