//! Move ordering for alpha-beta pruning
//!
//! Tries the cached best move first, then captures by MVV-LVA, then quiet
//! moves in generation order. Good ordering is what makes the pruning pay off.

use shakmaty::{Chess, Move, Position, Role};

use crate::constants::MVV_LVA;
use crate::evaluation::victim_square;

/// MVV-LVA score of a capture; the victim defaults to a pawn if its square is empty
pub(crate) fn mvv_lva_score(pos: &Chess, mv: Move) -> i32 {
    let victim = victim_square(mv)
        .and_then(|sq| pos.board().piece_at(sq))
        .map_or(Role::Pawn, |piece| piece.role);
    MVV_LVA[victim as usize][mv.role() as usize]
}

/// Order `moves` for search
///
/// A `hint` that is not among `moves` (a stale or colliding cache entry) is
/// ignored.
pub(crate) fn order_moves(pos: &Chess, moves: &[Move], hint: Option<Move>) -> Vec<Move> {
    let mut ordered = Vec::with_capacity(moves.len());
    let mut captures = Vec::new();
    let mut quiets = Vec::new();

    for &mv in moves {
        if Some(mv) == hint {
            ordered.push(mv);
        } else if mv.is_capture() {
            captures.push((mvv_lva_score(pos, mv), mv));
        } else {
            quiets.push(mv);
        }
    }

    // Stable, so equal scores keep generation order.
    captures.sort_by(|a, b| b.0.cmp(&a.0));

    ordered.extend(captures.into_iter().map(|(_, mv)| mv));
    ordered.extend(quiets);
    ordered
}
