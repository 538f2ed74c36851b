//! Frame-level telemetry and the system ordering shared by all plugins.

use bevy::prelude::*;
use micromegas_tracing::prelude::{fmetric, imetric, info, span_scope};

use crate::events::{PlayerCaught, SessionRestarted};

/// Per-frame ordering: read input, advance the session, then draw.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSet {
    Input,
    Simulation,
    Presentation,
}

pub struct TelemetryPlugin;

impl Plugin for TelemetryPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (GameSet::Input, GameSet::Simulation, GameSet::Presentation).chain(),
        );
        app.add_systems(Last, frame_telemetry);
        app.add_observer(on_player_caught);
        app.add_observer(on_session_restarted);
    }
}

fn frame_telemetry(time: Res<Time>) {
    span_scope!("frame");
    let dt_ms = time.delta_secs_f64() * 1000.0;
    fmetric!("frame_time_ms", "ms", dt_ms);
}

fn on_player_caught(caught: On<PlayerCaught>) {
    let ticks = caught.event().ticks;
    info!("player caught after {ticks} ticks");
    imetric!("games_lost", "count", 1);
    imetric!("ticks_survived", "count", ticks);
}

fn on_session_restarted(_restarted: On<SessionRestarted>) {
    info!("session restarted");
    imetric!("sessions_restarted", "count", 1);
}
