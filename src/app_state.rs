use bevy::prelude::*;

/// Phase of a chase session.
///
/// The `GameSession` resource owns the authoritative value; the Bevy
/// `State<SessionState>` mirrors it so plugins can hook `OnEnter`/`OnExit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, States)]
pub enum SessionState {
    #[default]
    Playing,
    GameOver,
}
