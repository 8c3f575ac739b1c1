//! Scoped move application for search
//!
//! A [`MoveGuard`] applies a move when created and unapplies it when dropped,
//! so every exit path out of a search node (normal return, cutoff, early
//! return on a cached value) leaves the position as it found it.

use std::ops::{Deref, DerefMut};

use shakmaty::Move;

use crate::board::GameState;

/// Applied move that is undone on drop
#[must_use = "the move is unapplied as soon as the guard is dropped"]
pub struct MoveGuard<'a> {
    state: &'a mut GameState,
}

impl<'a> MoveGuard<'a> {
    pub(crate) fn new(state: &'a mut GameState, mv: Move) -> Self {
        state.push(mv);
        Self { state }
    }
}

impl Deref for MoveGuard<'_> {
    type Target = GameState;

    fn deref(&self) -> &GameState {
        self.state
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut GameState {
        self.state
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        self.state.pop();
    }
}
