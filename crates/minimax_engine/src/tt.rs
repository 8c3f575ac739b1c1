//! Transposition table
//!
//! Maps position keys to the result of the deepest search stored for them.
//! Entries are overwritten unconditionally and never evicted; the root driver
//! clears the table before each iteration.

use std::collections::HashMap;

use shakmaty::Move;

use crate::constants::MATE_BOUND;
use crate::types::Bound;

/// Cached search result for one position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtEntry {
    /// Remaining depth the value was searched to
    pub depth: u32,
    /// Stored value; mate scores are relative to the storing node
    pub value: i32,
    pub bound: Bound,
    /// Best move found, absent for leaves and nodes without a legal move
    pub best_move: Option<Move>,
}

/// Position-keyed search cache
#[derive(Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<u64, TtEntry>,
    hits: u64,
    stores: u64,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for `key`, only if it was searched at least `required_depth` deep
    pub fn probe(&mut self, key: u64, required_depth: u32) -> Option<TtEntry> {
        let entry = self
            .entries
            .get(&key)
            .filter(|entry| entry.depth >= required_depth)
            .copied();
        if entry.is_some() {
            self.hits += 1;
        }
        entry
    }

    /// Best move recorded for `key`, whatever its depth
    pub fn hint(&self, key: u64) -> Option<Move> {
        self.entries.get(&key).and_then(|entry| entry.best_move)
    }

    /// Record a result, replacing anything stored for `key`
    pub fn store(
        &mut self,
        key: u64,
        depth: u32,
        value: i32,
        bound: Bound,
        best_move: Option<Move>,
    ) {
        self.stores += 1;
        self.entries.insert(
            key,
            TtEntry {
                depth,
                value,
                bound,
                best_move,
            },
        );
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Successful depth-qualified probes since construction
    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn stores(&self) -> u64 {
        self.stores
    }
}

/// Convert a score at `ply` into a node-relative value for storage
#[inline]
pub(crate) fn value_to_tt(value: i32, ply: u32) -> i32 {
    let ply = ply as i32;
    if value > MATE_BOUND {
        value + ply
    } else if value < -MATE_BOUND {
        value - ply
    } else {
        value
    }
}

/// Inverse of [`value_to_tt`] for a node at `ply`
#[inline]
pub(crate) fn value_from_tt(value: i32, ply: u32) -> i32 {
    let ply = ply as i32;
    if value > MATE_BOUND {
        value - ply
    } else if value < -MATE_BOUND {
        value + ply
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MATE_SCORE;
    use shakmaty::{Role, Square};

    fn sample_move() -> Move {
        Move::Normal {
            role: Role::Knight,
            from: Square::G1,
            capture: None,
            to: Square::F3,
            promotion: None,
        }
    }

    #[test]
    fn test_probe_rejects_shallower_entry() {
        let mut tt = TranspositionTable::new();
        tt.store(0xABCD, 3, 42, Bound::Exact, None);

        assert!(tt.probe(0xABCD, 4).is_none(), "depth 3 entry must not satisfy depth 4");
        assert_eq!(tt.probe(0xABCD, 3).map(|e| e.value), Some(42));
        assert_eq!(tt.probe(0xABCD, 1).map(|e| e.value), Some(42));
        assert_eq!(tt.hits(), 2);
    }

    #[test]
    fn test_probe_missing_key() {
        let mut tt = TranspositionTable::new();
        assert!(tt.probe(1, 0).is_none());
        assert_eq!(tt.hits(), 0);
    }

    #[test]
    fn test_store_overwrites_unconditionally() {
        let mut tt = TranspositionTable::new();
        tt.store(7, 5, 100, Bound::Exact, Some(sample_move()));
        tt.store(7, 0, -3, Bound::Exact, None);

        let entry = tt.probe(7, 0).expect("entry stored");
        assert_eq!(entry.depth, 0);
        assert_eq!(entry.value, -3);
        assert!(tt.probe(7, 1).is_none());
        assert_eq!(tt.stores(), 2);
    }

    #[test]
    fn test_hint_ignores_depth() {
        let mut tt = TranspositionTable::new();
        tt.store(9, 1, 0, Bound::Lower, Some(sample_move()));

        assert_eq!(tt.hint(9), Some(sample_move()));
        assert!(tt.probe(9, 6).is_none());
        assert_eq!(tt.hint(10), None);
    }

    #[test]
    fn test_clear_empties_table() {
        let mut tt = TranspositionTable::new();
        tt.store(1, 1, 1, Bound::Exact, None);
        tt.store(2, 1, 1, Bound::Upper, None);
        assert_eq!(tt.len(), 2);

        tt.clear();
        assert!(tt.is_empty());
    }

    #[test]
    fn test_mate_values_round_trip_through_storage() {
        let found_at_ply_4 = MATE_SCORE - 6;
        let stored = value_to_tt(found_at_ply_4, 4);
        assert_eq!(stored, MATE_SCORE - 2, "stored relative to the node");
        assert_eq!(value_from_tt(stored, 2), MATE_SCORE - 4);
        assert_eq!(value_from_tt(value_to_tt(-found_at_ply_4, 4), 4), -found_at_ply_4);
        assert_eq!(value_to_tt(150, 9), 150);
    }
}
