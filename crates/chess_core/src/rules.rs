//! Rules-engine interface consumed by the search.
//!
//! The search never owns a position. It borrows the live game through this
//! trait and explores it with apply/undo pairs, so every implementation must
//! restore the exact previous state on `undo_move`.

use std::fmt;
use std::hash::Hash;
use std::ops::{Deref, DerefMut};

/// A two-player game the search can explore in place.
pub trait Rules {
    /// Opaque move handle; the search only passes it back to `apply_move`.
    type Move: Copy + Eq + fmt::Debug;
    /// Identifies the player to move.
    type Side: Copy + Eq + fmt::Debug;
    /// Canonical identity of the current position, used as a cache key.
    type Key: Clone + Eq + Hash + fmt::Debug;

    fn side_to_move(&self) -> Self::Side;

    /// All fully legal moves for the side to move, in a stable order.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Plays `mv`, which must come from `legal_moves` of the current position.
    fn apply_move(&mut self, mv: Self::Move);

    /// Reverts the most recent `apply_move`. Returns `None` when there is
    /// nothing to undo.
    fn undo_move(&mut self) -> Option<Self::Move>;

    /// True on checkmate, stalemate or any other game-ending condition.
    fn is_terminal(&self) -> bool;

    fn position_key(&self) -> Self::Key;
}

/// Applies a move for the lifetime of the guard.
///
/// Dropping the guard undoes the move, so a search branch that breaks out of
/// its loop, returns early or unwinds still leaves the position as it found it.
/// The guard dereferences to the rules engine, which lets recursion continue on
/// the child position.
pub struct MoveGuard<'a, R: Rules + ?Sized> {
    rules: &'a mut R,
}

impl<'a, R: Rules + ?Sized> MoveGuard<'a, R> {
    pub fn new(rules: &'a mut R, mv: R::Move) -> Self {
        rules.apply_move(mv);
        Self { rules }
    }
}

impl<R: Rules + ?Sized> Deref for MoveGuard<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        self.rules
    }
}

impl<R: Rules + ?Sized> DerefMut for MoveGuard<'_, R> {
    fn deref_mut(&mut self) -> &mut R {
        self.rules
    }
}

impl<R: Rules + ?Sized> Drop for MoveGuard<'_, R> {
    fn drop(&mut self) {
        self.rules.undo_move();
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
