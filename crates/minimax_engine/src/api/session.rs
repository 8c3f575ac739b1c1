//! Human-versus-engine play session
//!
//! Wraps one game and one engine behind the operations a front end needs:
//! read the board, play a move, let the engine reply, start over, list moves.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shakmaty::uci::UciMove;
use shakmaty::{Color, Move, Position};
use tracing::info;

use super::engine::Engine;
use crate::board::{GameState, Terminal};
use crate::error::{EngineError, EngineResult};
use crate::types::SearchBudget;

/// Serializable view of the current game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Occupied squares, e.g. `"e1" -> "w_k"`
    pub board: BTreeMap<String, String>,
    pub turn: String,
    pub check: bool,
    pub game_over: bool,
    pub checkmate: bool,
    pub stalemate: bool,
    pub fen: String,
    /// Human-readable reason the game ended
    pub result: Option<String>,
}

impl BoardSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        let pos = state.position();
        let board = pos
            .board()
            .into_iter()
            .map(|(square, piece)| {
                let color = match piece.color {
                    Color::White => 'w',
                    Color::Black => 'b',
                };
                (square.to_string(), format!("{}_{}", color, piece.role.char()))
            })
            .collect();
        let terminal = state.terminal();

        Self {
            board,
            turn: match pos.turn() {
                Color::White => "white".to_string(),
                Color::Black => "black".to_string(),
            },
            check: pos.is_check(),
            game_over: terminal.is_some(),
            checkmate: matches!(terminal, Some(Terminal::Checkmate { .. })),
            stalemate: terminal == Some(Terminal::Stalemate),
            fen: state.fen(),
            result: terminal.map(|t| t.to_string()),
        }
    }
}

/// Engine reply with the board after it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineReply {
    #[serde(rename = "move")]
    pub uci: String,
    pub snapshot: BoardSnapshot,
}

/// One game against the engine
#[derive(Debug)]
pub struct GameSession {
    engine: Engine,
    state: GameState,
    budget: SearchBudget,
}

impl GameSession {
    /// New game from the starting position
    pub fn new(engine: Engine, budget: SearchBudget) -> Self {
        let state = engine.new_game();
        Self {
            engine,
            state,
            budget,
        }
    }

    /// Session continuing from an existing game state
    pub fn with_state(engine: Engine, state: GameState, budget: SearchBudget) -> Self {
        Self {
            engine,
            state,
            budget,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_state(&self.state)
    }

    /// Play a UCI move for the side to move
    ///
    /// # Errors
    ///
    /// [`EngineError::GameOver`] if the game has ended,
    /// [`EngineError::InvalidMove`] if the move is malformed or illegal. The
    /// game is unchanged on error.
    pub fn apply_move(&mut self, uci: &str) -> EngineResult<BoardSnapshot> {
        if self.state.is_game_over() {
            return Err(EngineError::GameOver);
        }
        let mv = self.state.apply_uci(uci)?;
        info!("[SESSION] Played {}", UciMove::from_standard(mv));
        Ok(self.snapshot())
    }

    /// Let the engine choose and play a move for the side to move
    pub fn engine_move(&mut self) -> EngineResult<EngineReply> {
        if self.state.is_game_over() {
            return Err(EngineError::GameOver);
        }
        let mv = self
            .engine
            .find_best_move(&mut self.state, self.budget)?
            .ok_or(EngineError::NoMoveAvailable)?;
        self.state.push(mv);

        let uci = UciMove::from_standard(mv).to_string();
        info!("[SESSION] Engine played {}", uci);
        Ok(EngineReply {
            uci,
            snapshot: self.snapshot(),
        })
    }

    /// Back to the starting position
    pub fn reset(&mut self) -> BoardSnapshot {
        self.state = self.engine.new_game();
        self.snapshot()
    }

    /// Take back the last move
    pub fn undo(&mut self) -> EngineResult<Move> {
        self.state.undo()
    }

    /// Legal moves for the side to move, in UCI notation
    pub fn legal_moves(&self) -> Vec<String> {
        self.state
            .legal_moves()
            .iter()
            .map(|&mv| UciMove::from_standard(mv).to_string())
            .collect()
    }
}
