//! Keyboard and pointer input: discrete events (quit, retry, click) and the
//! held movement snapshot.

use bevy::prelude::*;
use micromegas_tracing::prelude::{info, span_fn, span_scope};

use crate::events::SessionRestarted;
use crate::plugins::telemetry::GameSet;
use crate::session::{DiscreteEvent, EventOutcome, GameSession, HeldKeys};

pub const QUIT_KEY: KeyCode = KeyCode::KeyQ;
pub const RETRY_KEYS: [KeyCode; 2] = [KeyCode::KeyR, KeyCode::Enter];

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, discrete_input.in_set(GameSet::Input));
    }
}

/// Discrete events pressed this frame, in a fixed order: quit, retry keys,
/// then pointer buttons.
pub fn pressed_events(
    keyboard: &ButtonInput<KeyCode>,
    mouse: &ButtonInput<MouseButton>,
) -> Vec<DiscreteEvent> {
    let mut events = Vec::new();
    if keyboard.just_pressed(QUIT_KEY) {
        events.push(DiscreteEvent::Quit);
    }
    for key in RETRY_KEYS {
        if keyboard.just_pressed(key) {
            events.push(DiscreteEvent::Retry);
        }
    }
    events.extend(mouse.get_just_pressed().map(|_| DiscreteEvent::PointerPress));
    events
}

/// Movement keys currently held. Arrow keys mirror WASD.
pub fn held_keys(keyboard: &ButtonInput<KeyCode>) -> HeldKeys {
    HeldKeys {
        up: keyboard.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]),
        down: keyboard.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]),
        left: keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]),
        right: keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]),
    }
}

#[span_fn]
fn discrete_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut session: ResMut<GameSession>,
    mut exit: MessageWriter<AppExit>,
    mut commands: Commands,
) {
    for event in pressed_events(&keyboard, &mouse) {
        match session.handle_discrete_event(event) {
            EventOutcome::Quit => {
                info!("quit requested after {} ticks", session.ticks());
                exit.write(AppExit::Success);
                return;
            }
            EventOutcome::Reset => commands.trigger(SessionRestarted),
            EventOutcome::Ignored => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
