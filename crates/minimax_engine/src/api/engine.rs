//! Engine facade
//!
//! Owns the transposition table, the opening book and the seeded random
//! generator, and runs root searches against a caller-owned [`GameState`].

use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use shakmaty::{Chess, Move};
use tracing::{info, warn};

use crate::board::{GameState, Terminal};
use crate::book::OpeningBook;
use crate::constants::DRAW_SCORE;
use crate::error::{EngineError, EngineResult};
use crate::evaluation::evaluate_full;
use crate::hash::{PositionHasher, RulesHasher, SeededZobrist};
use crate::search::{iterative_deepening, mated_score};
use crate::tt::TranspositionTable;
use crate::types::{EngineConfig, HashScheme, MoveSource, SearchBudget, SearchReport};

/// Minimax chess engine
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    tt: TranspositionTable,
    book: OpeningBook,
    rng: StdRng,
    hasher: Arc<dyn PositionHasher>,
}

impl Engine {
    /// Build an engine, opening the configured book if there is one
    pub fn new(config: EngineConfig) -> Self {
        let book = match &config.book_path {
            Some(path) => OpeningBook::open(path),
            None => OpeningBook::disabled(),
        };
        Self::with_book(config, book)
    }

    /// Build an engine around an already loaded book
    pub fn with_book(config: EngineConfig, book: OpeningBook) -> Self {
        let hasher: Arc<dyn PositionHasher> = match config.hash_scheme {
            HashScheme::Rules => Arc::new(RulesHasher),
            HashScheme::Seeded => Arc::new(SeededZobrist::new(config.seed)),
        };
        Self {
            rng: StdRng::seed_from_u64(config.seed),
            tt: TranspositionTable::new(),
            book,
            hasher,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn book(&self) -> &OpeningBook {
        &self.book
    }

    /// Transposition table as left by the last search
    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    /// Hasher that game states created by this engine use
    pub fn hasher(&self) -> Arc<dyn PositionHasher> {
        Arc::clone(&self.hasher)
    }

    /// Game state for `position` keyed with this engine's hasher
    pub fn game(&self, position: Chess) -> GameState {
        GameState::new(position, self.hasher())
    }

    pub fn new_game(&self) -> GameState {
        self.game(Chess::default())
    }

    pub fn game_from_fen(&self, fen: &str) -> EngineResult<GameState> {
        GameState::from_fen(fen, self.hasher())
    }

    /// Static evaluation, positive favours White
    ///
    /// Finished games score as the result: zero for any draw, mate for
    /// checkmate.
    pub fn evaluate(&self, state: &GameState) -> i32 {
        match state.terminal() {
            Some(Terminal::Checkmate { .. }) => mated_score(state.turn(), 0),
            Some(_) => DRAW_SCORE,
            None => evaluate_full(state.position()),
        }
    }

    /// Best move for the side to move, or `None` if it has no legal move
    pub fn find_best_move(
        &mut self,
        state: &mut GameState,
        budget: SearchBudget,
    ) -> EngineResult<Option<Move>> {
        Ok(self.search(state, budget)?.best_move)
    }

    /// Book lookup, then iterative deepening, with statistics
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvariantViolation`] if the position or its key
    /// differ after the search from what they were before it.
    pub fn search(
        &mut self,
        state: &mut GameState,
        budget: SearchBudget,
    ) -> EngineResult<SearchReport> {
        let start = Instant::now();

        if let Some(mv) = self.book.probe(state.position(), &mut self.rng) {
            let mut report = SearchReport::empty(start.elapsed());
            report.best_move = Some(mv);
            report.source = MoveSource::Book;
            report.score = evaluate_full(state.position());
            info!("[ENGINE] Book move {:?}", report.best_move_uci());
            return Ok(report);
        }

        if state.legal_moves().is_empty() {
            info!("[ENGINE] No legal moves; nothing to search");
            return Ok(SearchReport::empty(start.elapsed()));
        }

        let key = state.key();
        let ply = state.ply();
        let fen = state.fen();

        let report = iterative_deepening(state, budget, &mut self.tt);

        if state.key() != key || state.ply() != ply || state.fen() != fen {
            warn!("[ENGINE] Position changed during search");
            return Err(EngineError::InvariantViolation {
                message: format!(
                    "position changed during search: key {:#018x} -> {:#018x}, ply {} -> {}",
                    key,
                    state.key(),
                    ply,
                    state.ply()
                ),
            });
        }
        if state.hasher().full_key(state.position()) != key {
            return Err(EngineError::InvariantViolation {
                message: format!("incremental key {key:#018x} does not match the position"),
            });
        }

        info!(
            "[ENGINE] Best move {:?} score {} depth {} nodes {} in {:?}",
            report.best_move_uci(),
            report.score,
            report.depth,
            report.nodes,
            report.elapsed
        );
        Ok(report)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
