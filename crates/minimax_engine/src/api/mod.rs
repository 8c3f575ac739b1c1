//! Public engine API
//!
//! [`Engine`] answers "what is the best move here"; [`GameSession`] keeps a
//! game going between a human and the engine.

mod engine;
mod session;

pub use engine::Engine;
pub use session::{BoardSnapshot, EngineReply, GameSession};
