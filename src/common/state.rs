//! Global state machine.

use bevy::prelude::*;

/// Scene lifecycle. Pools are drained and scheduled work dropped on leaving
/// `InGame`; state-scoped entities despawn with it.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
    /// The encounter is over; pools are torn down.
    Ended,
}
