//! Command-line front end for the `minimax_engine` crate
//!
//! - [`cli`] - argument definitions and settings overrides
//! - [`core`] - errors, logging setup, settings persistence
//! - [`play`] - interactive game loop

pub mod cli;
pub mod core;
pub mod play;
