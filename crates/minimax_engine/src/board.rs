//! Game state: a rules-library position plus its key and undo history
//!
//! The search mutates one [`GameState`] in place. Every applied move records
//! the previous position and key so that [`GameState::pop`] restores both
//! exactly, which keeps the incremental key honest and gives repetition
//! detection the positions it needs.

use std::fmt;
use std::sync::Arc;

use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, MoveList, Position};

use crate::error::{EngineError, EngineResult};
use crate::hash::{PositionHasher, RulesHasher};
use crate::search::MoveGuard;

/// Plies without capture or pawn move after which the game is drawn
const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;

/// Occurrences of one position after which the game is drawn
const FIVEFOLD: usize = 5;

/// Why a game has ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoveRule,
    FivefoldRepetition,
}

impl Terminal {
    pub fn is_draw(self) -> bool {
        !matches!(self, Terminal::Checkmate { .. })
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminal::Checkmate { winner } => write!(f, "checkmate, {winner:?} wins"),
            Terminal::Stalemate => write!(f, "stalemate"),
            Terminal::InsufficientMaterial => write!(f, "draw by insufficient material"),
            Terminal::SeventyFiveMoveRule => write!(f, "draw by seventy-five-move rule"),
            Terminal::FivefoldRepetition => write!(f, "draw by fivefold repetition"),
        }
    }
}

#[derive(Debug, Clone)]
struct Undo {
    position: Chess,
    key: u64,
    mv: Move,
}

/// Position with incremental key and undo stack
#[derive(Debug, Clone)]
pub struct GameState {
    position: Chess,
    key: u64,
    history: Vec<Undo>,
    hasher: Arc<dyn PositionHasher>,
}

impl GameState {
    pub fn new(position: Chess, hasher: Arc<dyn PositionHasher>) -> Self {
        let key = hasher.full_key(&position);
        Self {
            position,
            key,
            history: Vec::new(),
            hasher,
        }
    }

    /// Standard starting position keyed with the rules library's hasher
    pub fn startpos() -> Self {
        Self::new(Chess::default(), Arc::new(RulesHasher))
    }

    pub fn from_fen(fen: &str, hasher: Arc<dyn PositionHasher>) -> EngineResult<Self> {
        let invalid = |reason: String| EngineError::InvalidFen {
            fen: fen.to_string(),
            reason,
        };
        let parsed: Fen = fen.trim().parse().map_err(|e| invalid(format!("{e}")))?;
        let position: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| invalid(format!("{e}")))?;
        Ok(Self::new(position, hasher))
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }

    /// Incrementally maintained key of the current position
    pub fn key(&self) -> u64 {
        self.key
    }

    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    pub fn hasher(&self) -> &Arc<dyn PositionHasher> {
        &self.hasher
    }

    /// Number of moves applied since construction
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// Moves applied since construction, oldest first
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.history.iter().map(|undo| undo.mv)
    }

    pub fn legal_moves(&self) -> MoveList {
        self.position.legal_moves()
    }

    pub fn fen(&self) -> String {
        Fen::from_position(&self.position, EnPassantMode::Legal).to_string()
    }

    /// Apply a legal move
    pub fn push(&mut self, mv: Move) {
        let before = self.position.clone();
        self.position.play_unchecked(mv);
        let key = self.hasher.next_key(&before, &self.position, self.key, mv);
        self.history.push(Undo {
            position: before,
            key: self.key,
            mv,
        });
        self.key = key;
    }

    /// Restore the position before the last applied move
    pub fn pop(&mut self) -> Option<Move> {
        let undo = self.history.pop()?;
        self.position = undo.position;
        self.key = undo.key;
        Some(undo.mv)
    }

    /// Like [`pop`](Self::pop), but an empty history is an error
    pub fn undo(&mut self) -> EngineResult<Move> {
        self.pop().ok_or(EngineError::EmptyHistory)
    }

    /// Apply `mv` for the lifetime of the returned guard
    pub fn make(&mut self, mv: Move) -> MoveGuard<'_> {
        MoveGuard::new(self, mv)
    }

    /// Parse a UCI move and check it is legal here
    pub fn parse_uci(&self, text: &str) -> EngineResult<Move> {
        let text = text.trim();
        let uci: UciMove = text.parse().map_err(|_| EngineError::InvalidMove {
            uci: text.to_string(),
            reason: "not a UCI move".to_string(),
        })?;
        uci.to_move(&self.position)
            .map_err(|_| EngineError::InvalidMove {
                uci: text.to_string(),
                reason: "Illegal move".to_string(),
            })
    }

    /// Parse and apply a UCI move
    pub fn apply_uci(&mut self, text: &str) -> EngineResult<Move> {
        let mv = self.parse_uci(text)?;
        self.push(mv);
        Ok(mv)
    }

    /// How often the current position has occurred, counting itself
    pub fn repetition_count(&self) -> usize {
        let window = self.position.halfmoves() as usize;
        1 + self
            .history
            .iter()
            .rev()
            .take(window)
            .filter(|undo| undo.key == self.key && undo.position == self.position)
            .count()
    }

    /// Whether the current position has occurred at least `times` times
    pub fn is_repetition(&self, times: usize) -> bool {
        self.repetition_count() >= times
    }

    /// Draws that do not depend on the side to move having a legal move
    pub fn draw_by_rule(&self) -> Option<Terminal> {
        if self.position.is_insufficient_material() {
            Some(Terminal::InsufficientMaterial)
        } else if self.position.halfmoves() >= SEVENTY_FIVE_MOVE_PLIES {
            Some(Terminal::SeventyFiveMoveRule)
        } else if self.is_repetition(FIVEFOLD) {
            Some(Terminal::FivefoldRepetition)
        } else {
            None
        }
    }

    /// Why the game is over, or `None` while it is still in progress
    pub fn terminal(&self) -> Option<Terminal> {
        if self.position.legal_moves().is_empty() {
            if self.position.is_check() {
                return Some(Terminal::Checkmate {
                    winner: !self.position.turn(),
                });
            }
            return Some(Terminal::Stalemate);
        }
        self.draw_by_rule()
    }

    pub fn is_game_over(&self) -> bool {
        self.terminal().is_some()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::startpos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::SeededZobrist;

    #[test]
    fn test_push_pop_restores_key_and_position() {
        let mut state = GameState::startpos();
        let start_key = state.key();
        let start_fen = state.fen();

        for uci in ["e2e4", "e7e5", "g1f3"] {
            state.apply_uci(uci).expect("legal move");
        }
        assert_ne!(state.key(), start_key);

        while state.pop().is_some() {}
        assert_eq!(state.key(), start_key);
        assert_eq!(state.fen(), start_fen);
    }

    #[test]
    fn test_seeded_state_tracks_full_key() {
        let hasher: Arc<dyn PositionHasher> = Arc::new(SeededZobrist::new(11));
        let mut state = GameState::new(Chess::default(), hasher.clone());

        for uci in ["d2d4", "g8f6", "c2c4", "e7e6", "b1c3", "f8b4"] {
            state.apply_uci(uci).expect("legal move");
            assert_eq!(state.key(), hasher.full_key(state.position()));
        }
    }

    #[test]
    fn test_apply_uci_rejects_illegal_and_malformed() {
        let mut state = GameState::startpos();

        let illegal = state.apply_uci("e2e5").unwrap_err();
        assert!(matches!(illegal, EngineError::InvalidMove { .. }));
        assert!(illegal.to_string().contains("Illegal move"));

        let malformed = state.apply_uci("hello").unwrap_err();
        assert!(matches!(malformed, EngineError::InvalidMove { .. }));
        assert_eq!(state.ply(), 0, "rejected moves must not change the state");
    }

    #[test]
    fn test_from_fen_rejects_garbage() {
        let err = GameState::from_fen("not a fen", Arc::new(RulesHasher)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidFen { .. }));
    }

    #[test]
    fn test_undo_on_empty_history() {
        let mut state = GameState::startpos();
        assert!(matches!(state.undo(), Err(EngineError::EmptyHistory)));
    }

    #[test]
    fn test_terminal_checkmate_and_stalemate() {
        let mate = GameState::from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
            Arc::new(RulesHasher),
        )
        .expect("valid fen");
        assert_eq!(
            mate.terminal(),
            Some(Terminal::Checkmate {
                winner: Color::Black
            })
        );

        let stalemate = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", Arc::new(RulesHasher))
            .expect("valid fen");
        assert_eq!(stalemate.terminal(), Some(Terminal::Stalemate));
        assert!(stalemate.is_game_over());
    }

    #[test]
    fn test_fivefold_repetition() {
        let mut state = GameState::startpos();
        assert_eq!(state.repetition_count(), 1);

        for _ in 0..4 {
            for uci in ["g1f3", "g8f6", "f3g1", "f6g8"] {
                state.apply_uci(uci).expect("legal move");
            }
        }
        assert_eq!(state.repetition_count(), 5);
        assert!(state.is_repetition(3) && !state.is_repetition(6));
        assert_eq!(state.terminal(), Some(Terminal::FivefoldRepetition));
    }

    #[test]
    fn test_seventy_five_move_rule() {
        let state = GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 150 120", Arc::new(RulesHasher))
            .expect("valid fen");
        assert_eq!(state.terminal(), Some(Terminal::SeventyFiveMoveRule));
    }

    #[test]
    fn test_insufficient_material() {
        let state = GameState::from_fen("4k3/8/8/8/8/8/8/4KB2 w - - 0 1", Arc::new(RulesHasher))
            .expect("valid fen");
        assert_eq!(state.terminal(), Some(Terminal::InsufficientMaterial));
        assert!(Terminal::InsufficientMaterial.is_draw());
    }
}
