//! Session events triggered by the simulation and input systems, observed by
//! telemetry.

use bevy::prelude::*;

/// The enemy reached the player.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerCaught {
    /// Tick count including the catching frame.
    pub ticks: u64,
}

/// A retry key or pointer press restarted a finished session.
#[derive(Event, Debug, Clone, Copy)]
pub struct SessionRestarted;
