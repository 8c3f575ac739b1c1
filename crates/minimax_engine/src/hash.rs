//! Position keys for the transposition table
//!
//! Two interchangeable schemes sit behind [`PositionHasher`]:
//!
//! - [`RulesHasher`] uses the rules library's Polyglot-compatible Zobrist key
//!   and its incremental update, falling back to a rescan where the library
//!   declines to update incrementally.
//! - [`SeededZobrist`] owns its own tables drawn from an explicitly seeded
//!   generator and always updates incrementally.
//!
//! Both include side to move, castling rights and a capturable en-passant
//! file, so positions that differ only in those never share a key.

use std::fmt::Debug;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shakmaty::zobrist::Zobrist64;
use shakmaty::{CastlingSide, Chess, Color, EnPassantMode, Move, Piece, Position, Role, Square};

/// Computes and maintains 64-bit position keys
pub trait PositionHasher: Debug + Send + Sync {
    /// Key of `pos` computed from scratch
    fn full_key(&self, pos: &Chess) -> u64;

    /// Key of `after`, the result of playing `mv` on `before` whose key is `key`
    fn next_key(&self, before: &Chess, after: &Chess, key: u64, mv: Move) -> u64;
}

/// Polyglot key from the rules library
#[derive(Debug, Default, Clone, Copy)]
pub struct RulesHasher;

impl PositionHasher for RulesHasher {
    fn full_key(&self, pos: &Chess) -> u64 {
        pos.zobrist_hash::<Zobrist64>(EnPassantMode::Legal).0
    }

    fn next_key(&self, before: &Chess, after: &Chess, key: u64, mv: Move) -> u64 {
        before
            .update_zobrist_hash(Zobrist64(key), mv, EnPassantMode::Legal)
            .map(|z| z.0)
            .unwrap_or_else(|| self.full_key(after))
    }
}

/// Zobrist tables owned by the engine
#[derive(Debug, Clone)]
pub struct SeededZobrist {
    pieces: [[[u64; 64]; 2]; 6],
    white_to_move: u64,
    castling: [u64; 4],
    en_passant: [u64; 8],
}

impl SeededZobrist {
    /// Draw all tables from a generator seeded with `seed`
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pieces = [[[0u64; 64]; 2]; 6];
        for role in pieces.iter_mut() {
            for color in role.iter_mut() {
                for square in color.iter_mut() {
                    *square = rng.random();
                }
            }
        }
        let white_to_move = rng.random();
        let castling = std::array::from_fn(|_| rng.random());
        let en_passant = std::array::from_fn(|_| rng.random());

        Self {
            pieces,
            white_to_move,
            castling,
            en_passant,
        }
    }

    #[inline]
    fn piece(&self, piece: Piece, square: Square) -> u64 {
        self.pieces[piece.role as usize - 1][usize::from(piece.color)][usize::from(square)]
    }

    fn castling_component(&self, pos: &Chess) -> u64 {
        let mut key = 0;
        for (i, (color, side)) in Color::ALL
            .into_iter()
            .flat_map(|c| CastlingSide::ALL.into_iter().map(move |s| (c, s)))
            .enumerate()
        {
            if pos.castles().has(color, side) {
                key ^= self.castling[i];
            }
        }
        key
    }

    fn en_passant_component(&self, pos: &Chess) -> u64 {
        pos.ep_square(EnPassantMode::Legal)
            .map_or(0, |sq| self.en_passant[usize::from(sq.file())])
    }

    fn state_component(&self, pos: &Chess) -> u64 {
        let side = if pos.turn() == Color::White {
            self.white_to_move
        } else {
            0
        };
        side ^ self.castling_component(pos) ^ self.en_passant_component(pos)
    }
}

impl PositionHasher for SeededZobrist {
    fn full_key(&self, pos: &Chess) -> u64 {
        pos.board()
            .into_iter()
            .fold(self.state_component(pos), |key, (square, piece)| {
                key ^ self.piece(piece, square)
            })
    }

    fn next_key(&self, before: &Chess, after: &Chess, key: u64, mv: Move) -> u64 {
        let us = before.turn();
        let mut key = key ^ self.state_component(before) ^ self.state_component(after);

        match mv {
            Move::Normal {
                role,
                from,
                capture,
                to,
                promotion,
            } => {
                key ^= self.piece(role.of(us), from);
                key ^= self.piece(promotion.unwrap_or(role).of(us), to);
                if let Some(victim) = capture {
                    key ^= self.piece(victim.of(!us), to);
                }
            }
            Move::EnPassant { from, to } => {
                key ^= self.piece(Role::Pawn.of(us), from);
                key ^= self.piece(Role::Pawn.of(us), to);
                key ^= self.piece(
                    Role::Pawn.of(!us),
                    Square::from_coords(to.file(), from.rank()),
                );
            }
            Move::Castle { king, rook } => {
                if let Some(side) = mv.castling_side() {
                    key ^= self.piece(Role::King.of(us), king);
                    key ^= self.piece(Role::Rook.of(us), rook);
                    key ^= self.piece(Role::King.of(us), side.king_to(us));
                    key ^= self.piece(Role::Rook.of(us), side.rook_to(us));
                }
            }
            Move::Put { role, to } => {
                key ^= self.piece(role.of(us), to);
            }
        }

        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::fen::Fen;
    use shakmaty::uci::UciMove;
    use shakmaty::CastlingMode;

    fn position(fen: &str) -> Chess {
        fen.parse::<Fen>()
            .expect("valid fen")
            .into_position(CastlingMode::Standard)
            .expect("legal position")
    }

    /// Plays a UCI line and checks the incremental key against a rescan
    fn assert_incremental(hasher: &dyn PositionHasher, fen: &str, line: &[&str]) {
        let mut pos = position(fen);
        let mut key = hasher.full_key(&pos);
        for uci in line {
            let mv = uci
                .parse::<UciMove>()
                .expect("valid uci")
                .to_move(&pos)
                .expect("legal move");
            let before = pos.clone();
            pos.play_unchecked(mv);
            key = hasher.next_key(&before, &pos, key, mv);
            assert_eq!(key, hasher.full_key(&pos), "key drifted after {uci}");
        }
    }

    const LINE: &[&str] = &[
        "e2e4", "d7d5", "e4e5", "f7f5", "e5f6", "g8f6", "g1f3", "b8c6", "f1c4", "c8g4",
        "e1g1", "d8d6", "d2d4", "e8c8", "h2h4", "g7g5", "h4g5", "h8g8", "g5f6",
    ];

    #[test]
    fn test_rules_hasher_start_position_matches_polyglot() {
        assert_eq!(RulesHasher.full_key(&Chess::default()), 0x463b_9618_1691_fc9c);
    }

    #[test]
    fn test_rules_hasher_incremental_matches_full() {
        assert_incremental(&RulesHasher, "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", LINE);
    }

    #[test]
    fn test_seeded_incremental_matches_full() {
        let hasher = SeededZobrist::new(42);
        assert_incremental(&hasher, "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", LINE);
    }

    #[test]
    fn test_seeded_tables_are_reproducible() {
        let a = SeededZobrist::new(7);
        let b = SeededZobrist::new(7);
        let c = SeededZobrist::new(8);
        let pos = Chess::default();

        assert_eq!(a.full_key(&pos), b.full_key(&pos));
        assert_ne!(a.full_key(&pos), c.full_key(&pos));
    }

    #[test]
    fn test_castling_rights_change_key() {
        let with_rights = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let without = position("r3k2r/8/8/8/8/8/8/R3K2R w Kkq - 0 1");
        let seeded = SeededZobrist::new(1);

        assert_ne!(RulesHasher.full_key(&with_rights), RulesHasher.full_key(&without));
        assert_ne!(seeded.full_key(&with_rights), seeded.full_key(&without));
    }

    #[test]
    fn test_capturable_en_passant_changes_key() {
        let with_ep = position("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
        let without = position("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq - 0 3");
        let seeded = SeededZobrist::new(1);

        assert_ne!(RulesHasher.full_key(&with_ep), RulesHasher.full_key(&without));
        assert_ne!(seeded.full_key(&with_ep), seeded.full_key(&without));
    }

    #[test]
    fn test_side_to_move_changes_key() {
        let white = position("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        let black = position("4k3/8/8/8/8/8/8/4K3 b - - 0 1");
        let seeded = SeededZobrist::new(3);

        assert_ne!(seeded.full_key(&white), seeded.full_key(&black));
        assert_ne!(RulesHasher.full_key(&white), RulesHasher.full_key(&black));
    }
}
