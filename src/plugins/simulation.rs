//! Logical frame pacing, session stepping, and mirroring the session state
//! into Bevy's `State<SessionState>`.

use std::time::Duration;

use bevy::prelude::*;
use micromegas_tracing::prelude::{imetric, span_fn, span_scope};

use crate::app_state::SessionState;
use crate::events::PlayerCaught;
use crate::plugins::input::held_keys;
use crate::plugins::telemetry::GameSet;
use crate::session::{GameSession, StepOutcome};

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (advance_session, sync_session_state.after(advance_session))
                .in_set(GameSet::Simulation),
        );
    }
}

/// Gate between engine frames and logical frames.
#[derive(Resource, Debug)]
pub struct FramePacing {
    /// `None` steps on every engine frame.
    timer: Option<Timer>,
}

impl FramePacing {
    pub fn new(interval: Duration) -> Self {
        let timer = (!interval.is_zero()).then(|| Timer::new(interval, TimerMode::Repeating));
        Self { timer }
    }

    pub fn every_frame() -> Self {
        Self { timer: None }
    }

    /// Advance by `delta`; true when a logical frame is due.
    pub fn ready(&mut self, delta: Duration) -> bool {
        match &mut self.timer {
            Some(timer) => {
                timer.tick(delta);
                timer.just_finished()
            }
            None => true,
        }
    }
}

#[span_fn]
fn advance_session(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut pacing: ResMut<FramePacing>,
    mut session: ResMut<GameSession>,
    mut commands: Commands,
) {
    if !pacing.ready(time.delta()) {
        return;
    }

    match session.update(held_keys(&keyboard)) {
        StepOutcome::Frozen => {}
        StepOutcome::Advanced => {
            imetric!("enemy_distance", "cells", session.distance() as u64);
        }
        StepOutcome::Caught => commands.trigger(PlayerCaught {
            ticks: session.ticks(),
        }),
    }
}

/// Keep the Bevy state in step with the session so `OnEnter`/`OnExit` fire.
fn sync_session_state(
    session: Res<GameSession>,
    state: Res<State<SessionState>>,
    mut next_state: ResMut<NextState<SessionState>>,
) {
    if *state.get() != session.state() {
        next_state.set(session.state());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
