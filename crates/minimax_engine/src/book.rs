//! Polyglot opening book
//!
//! A book file is a flat array of 16-byte big-endian records sorted by
//! position key:
//!
//! | bytes | field  | meaning                                   |
//! |-------|--------|-------------------------------------------|
//! | 0..8  | key    | Polyglot Zobrist key of the position      |
//! | 8..10 | move   | from/to squares and promotion, bit-packed |
//! | 10..12| weight | relative frequency of the move            |
//! | 12..16| learn  | unused                                    |
//!
//! Castling is recorded as the king capturing its own rook (`e1h1`).
//! A missing book is not an error for the engine: [`OpeningBook::open`]
//! logs a warning and returns a disabled book that never answers.

use std::path::{Path, PathBuf};

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;
use shakmaty::{Chess, File, Move, Position, Rank, Role, Square};
use tracing::{debug, info, warn};

use crate::error::{EngineError, EngineResult};
use crate::hash::{PositionHasher, RulesHasher};

const ENTRY_SIZE: usize = 16;

/// One raw book record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookEntry {
    pub key: u64,
    pub raw_move: u16,
    pub weight: u16,
    pub learn: u32,
}

impl BookEntry {
    /// Encode as the 16-byte on-disk record
    pub fn to_bytes(&self) -> [u8; ENTRY_SIZE] {
        let mut bytes = [0u8; ENTRY_SIZE];
        bytes[0..8].copy_from_slice(&self.key.to_be_bytes());
        bytes[8..10].copy_from_slice(&self.raw_move.to_be_bytes());
        bytes[10..12].copy_from_slice(&self.weight.to_be_bytes());
        bytes[12..16].copy_from_slice(&self.learn.to_be_bytes());
        bytes
    }

    fn from_bytes(chunk: &[u8]) -> Self {
        Self {
            key: be(&chunk[0..8]),
            raw_move: be(&chunk[8..10]) as u16,
            weight: be(&chunk[10..12]) as u16,
            learn: be(&chunk[12..16]) as u32,
        }
    }

    /// Origin, target and promotion encoded in `raw_move`
    fn squares(&self) -> (Square, Square, Option<Role>) {
        let m = u32::from(self.raw_move);
        let to = Square::from_coords(File::new(m & 7), Rank::new((m >> 3) & 7));
        let from = Square::from_coords(File::new((m >> 6) & 7), Rank::new((m >> 9) & 7));
        let promotion = match (m >> 12) & 7 {
            1 => Some(Role::Knight),
            2 => Some(Role::Bishop),
            3 => Some(Role::Rook),
            4 => Some(Role::Queen),
            _ => None,
        };
        (from, to, promotion)
    }
}

fn be(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0, |acc, &b| (acc << 8) | u64::from(b))
}

/// Legal book move with its recorded weight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookCandidate {
    pub mv: Move,
    pub weight: u16,
}

/// In-memory Polyglot book
#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    entries: Vec<BookEntry>,
    path: Option<PathBuf>,
}

impl OpeningBook {
    /// Book that never returns a move
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Load `path`, degrading to a disabled book if it cannot be read
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(book) => {
                info!("[BOOK] Loaded {} entries from {:?}", book.len(), path);
                book
            }
            Err(e) => {
                warn!("[BOOK] {}. Book moves disabled.", e);
                Self::disabled()
            }
        }
    }

    /// Load `path`, failing on I/O or format errors
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| EngineError::BookIo {
            path: path.to_path_buf(),
            source,
        })?;
        let mut book = Self::from_bytes(&bytes)?;
        book.path = Some(path.to_path_buf());
        Ok(book)
    }

    /// Parse raw book contents
    pub fn from_bytes(bytes: &[u8]) -> EngineResult<Self> {
        if bytes.len() % ENTRY_SIZE != 0 {
            return Err(EngineError::BookFormat {
                message: format!(
                    "{} bytes is not a whole number of {}-byte entries",
                    bytes.len(),
                    ENTRY_SIZE
                ),
            });
        }
        let mut entries: Vec<BookEntry> = bytes
            .chunks_exact(ENTRY_SIZE)
            .map(BookEntry::from_bytes)
            .collect();
        // Stable, so a well-formed file keeps its weight order per key.
        entries.sort_by_key(|entry| entry.key);

        Ok(Self {
            entries,
            path: None,
        })
    }

    pub fn is_enabled(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// File the book was loaded from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Raw records stored for `key`
    pub fn entries_for(&self, key: u64) -> &[BookEntry] {
        let start = self.entries.partition_point(|entry| entry.key < key);
        let end = self.entries.partition_point(|entry| entry.key <= key);
        &self.entries[start..end]
    }

    /// Legal continuations recorded for `pos`
    ///
    /// Records that do not decode to a legal move (key collisions, corrupt
    /// files) are skipped.
    pub fn candidates(&self, pos: &Chess) -> Vec<BookCandidate> {
        let records = self.entries_for(RulesHasher.full_key(pos));
        if records.is_empty() {
            return Vec::new();
        }

        let legal = pos.legal_moves();
        records
            .iter()
            .filter_map(|entry| {
                let (from, to, promotion) = entry.squares();
                let mv = legal
                    .iter()
                    .copied()
                    .find(|&mv| encodes(mv, from, to, promotion));
                if mv.is_none() {
                    debug!("[BOOK] Skipping undecodable entry {:#06x}", entry.raw_move);
                }
                mv.map(|mv| BookCandidate {
                    mv,
                    weight: entry.weight,
                })
            })
            .collect()
    }

    /// Pick a book move for `pos`, weighted by recorded frequency
    ///
    /// Falls back to a uniform choice when every weight is zero.
    pub fn probe<R: Rng>(&self, pos: &Chess, rng: &mut R) -> Option<Move> {
        if !self.is_enabled() {
            return None;
        }
        let candidates = self.candidates(pos);
        if candidates.is_empty() {
            return None;
        }

        let index = match WeightedIndex::new(candidates.iter().map(|c| u32::from(c.weight))) {
            Ok(dist) => dist.sample(rng),
            Err(_) => rng.random_range(0..candidates.len()),
        };
        Some(candidates[index].mv)
    }
}

fn encodes(mv: Move, from: Square, to: Square, promotion: Option<Role>) -> bool {
    match mv {
        Move::Castle { king, rook } => king == from && rook == to,
        _ => mv.from() == Some(from) && mv.to() == to && mv.promotion() == promotion,
    }
}

/// Pack a move in Polyglot format
pub fn encode_move(mv: Move) -> u16 {
    let (from, to) = match mv {
        Move::Castle { king, rook } => (king, rook),
        _ => (mv.from().unwrap_or(mv.to()), mv.to()),
    };
    let promotion = match mv.promotion() {
        Some(Role::Knight) => 1,
        Some(Role::Bishop) => 2,
        Some(Role::Rook) => 3,
        Some(Role::Queen) => 4,
        _ => 0,
    };
    let square = |sq: Square| u32::from(sq.rank()) * 8 + u32::from(sq.file());
    (promotion << 12 | square(from) << 6 | square(to)) as u16
}
