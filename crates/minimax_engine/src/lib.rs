//! # Minimax Chess Engine
//!
//! Iterative-deepening alpha-beta search over positions supplied by the
//! `shakmaty` rules library.
//!
//! ## Overview
//!
//! For every root search the engine:
//!
//! 1. asks the Polyglot opening book for a move and returns it on a hit;
//! 2. otherwise searches depth 1, 2, 3, ... with a fresh transposition table
//!    per iteration until the depth or time budget is spent;
//! 3. returns the best move of the deepest completed iteration.
//!
//! Inside an iteration each node is keyed by an incrementally maintained
//! Zobrist hash, probed in the transposition table, its moves ordered (cached
//! best move, then MVV-LVA captures, then quiet moves) and its children
//! scored through an O(1) incremental evaluation.
//!
//! Scores are absolute: positive favours White, White maximizes, Black
//! minimizes.
//!
//! ## Module Organization
//!
//! - [`api`] - [`Engine`] facade and [`GameSession`] play loop support
//! - [`board`] - [`GameState`]: position, key and undo history
//! - [`book`] - Polyglot opening book reader
//! - [`constants`] - piece values, piece-square tables, score bounds
//! - [`evaluation`] - full and incremental static evaluation
//! - [`hash`] - position key schemes
//! - [`search`] - alpha-beta, move ordering, iterative deepening
//! - [`tt`] - transposition table
//! - [`types`] - budgets, bounds, reports, configuration
//!
//! ## Example
//!
//! ```no_run
//! use minimax_engine::{Engine, EngineConfig, SearchBudget};
//!
//! let mut engine = Engine::new(EngineConfig::default());
//! let mut game = engine.new_game();
//! let best = engine.find_best_move(&mut game, SearchBudget::Depth(4))?;
//! # Ok::<(), minimax_engine::EngineError>(())
//! ```

pub mod api;
pub mod board;
pub mod book;
pub mod constants;
pub mod error;
pub mod evaluation;
pub mod hash;
pub mod search;
pub mod tt;
pub mod types;

pub use api::{BoardSnapshot, Engine, EngineReply, GameSession};
pub use board::{GameState, Terminal};
pub use book::OpeningBook;
pub use error::{EngineError, EngineResult};
pub use hash::{PositionHasher, RulesHasher, SeededZobrist};
pub use tt::{TranspositionTable, TtEntry};
pub use types::{Bound, EngineConfig, HashScheme, MoveSource, SearchBudget, SearchReport};
