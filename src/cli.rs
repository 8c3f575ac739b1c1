//! Command-line interface

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use minimax_engine::{EngineConfig, HashScheme};
use shakmaty::Color;

/// Alpha-beta chess engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the best move for a position
    Bestmove(SearchArgs),
    /// Print the static evaluation of a position
    Eval {
        /// Position to evaluate (start position if omitted)
        #[arg(long)]
        fen: Option<String>,
    },
    /// Play a game against the engine on stdin/stdout
    Play {
        /// Side the engine plays
        #[arg(long, value_enum, default_value_t = Side::Black)]
        engine_color: Side,

        #[command(flatten)]
        overrides: EngineOverrides,
    },
    /// Show the effective settings, optionally writing them back
    Config {
        /// Save the effective settings to the settings file
        #[arg(long)]
        write: bool,

        #[command(flatten)]
        overrides: EngineOverrides,
    },
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Position to search (start position if omitted)
    #[arg(long)]
    pub fen: Option<String>,

    /// Print a JSON object instead of `bestmove <uci>`
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub overrides: EngineOverrides,
}

/// Flags that take precedence over the settings file
#[derive(Args, Debug, Default)]
pub struct EngineOverrides {
    /// Fixed search depth
    #[arg(long)]
    pub depth: Option<u32>,

    /// Time budget per move in milliseconds
    #[arg(long, conflicts_with = "depth")]
    pub movetime: Option<u64>,

    /// Polyglot opening book
    #[arg(long)]
    pub book: Option<PathBuf>,

    /// Disable the opening book
    #[arg(long, conflicts_with = "book")]
    pub no_book: bool,

    /// Seed for Zobrist tables and book choices
    #[arg(long)]
    pub seed: Option<u64>,

    /// Position key scheme
    #[arg(long, value_enum)]
    pub hash: Option<HashArg>,
}

impl EngineOverrides {
    pub fn apply(&self, config: &mut EngineConfig) {
        if let Some(depth) = self.depth {
            config.depth = depth;
            config.move_time_ms = None;
        }
        if let Some(ms) = self.movetime {
            config.move_time_ms = Some(ms);
        }
        if let Some(book) = &self.book {
            config.book_path = Some(book.clone());
        }
        if self.no_book {
            config.book_path = None;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(hash) = self.hash {
            config.hash_scheme = hash.into();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HashArg {
    Rules,
    Seeded,
}

impl From<HashArg> for HashScheme {
    fn from(arg: HashArg) -> Self {
        match arg {
            HashArg::Rules => HashScheme::Rules,
            HashArg::Seeded => HashScheme::Seeded,
        }
    }
}
