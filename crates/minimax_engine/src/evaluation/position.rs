//! Full-board evaluation

use shakmaty::{Chess, Color, Piece, Position, Square};

use crate::constants::{piece_table, PIECE_VALUES};

/// Index into a piece-square table for a piece of `color` on `square`
///
/// Tables are laid out rank 8 first, so White reads the mirrored square and
/// Black reads the square as is.
#[inline]
pub fn pst_index(color: Color, square: Square) -> usize {
    match color {
        Color::White => usize::from(square.flip_vertical()),
        Color::Black => usize::from(square),
    }
}

/// Signed contribution of one piece on one square
#[inline]
pub fn piece_score(piece: Piece, square: Square) -> i32 {
    let value = PIECE_VALUES[piece.role as usize]
        + piece_table(piece.role)[pst_index(piece.color, square)];
    match piece.color {
        Color::White => value,
        Color::Black => -value,
    }
}

/// Evaluate a position from scratch
pub fn evaluate_full(pos: &Chess) -> i32 {
    pos.board()
        .into_iter()
        .map(|(square, piece)| piece_score(piece, square))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::fen::Fen;
    use shakmaty::{CastlingMode, Role};

    fn position(fen: &str) -> Chess {
        fen.parse::<Fen>()
            .expect("valid fen")
            .into_position(CastlingMode::Standard)
            .expect("legal position")
    }

    #[test]
    fn test_starting_position_is_balanced() {
        assert_eq!(evaluate_full(&Chess::default()), 0);
    }

    #[test]
    fn test_extra_queen_favours_owner() {
        let white_up = position("4k3/8/8/8/8/8/8/3QK3 w - - 0 1");
        let black_up = position("3qk3/8/8/8/8/8/8/4K3 w - - 0 1");

        assert!(evaluate_full(&white_up) > 800);
        assert_eq!(evaluate_full(&white_up), -evaluate_full(&black_up));
    }

    #[test]
    fn test_pst_index_is_mirrored_for_white() {
        assert_eq!(pst_index(Color::White, Square::A1), 56);
        assert_eq!(pst_index(Color::Black, Square::A1), 0);
        assert_eq!(pst_index(Color::White, Square::E2), 52);
        assert_eq!(pst_index(Color::Black, Square::E7), 52);
    }

    #[test]
    fn test_piece_score_symmetry() {
        let white = piece_score(Role::Knight.of(Color::White), Square::F3);
        let black = piece_score(Role::Knight.of(Color::Black), Square::F6);
        assert_eq!(white, -black);
        assert_eq!(white, 320 + 10);
    }
}
