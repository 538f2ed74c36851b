//! HUD strip: the status line with the tick count.

use bevy::prelude::*;
use micromegas_tracing::prelude::{span_fn, span_scope};

use crate::frame::TextLine;
use crate::plugins::font::{TextCapability, resolve_text_font};
use crate::plugins::telemetry::GameSet;
use crate::session::GameSession;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud.after(resolve_text_font));
        app.add_systems(Update, update_hud.in_set(GameSet::Presentation));
    }
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

#[derive(Component)]
pub struct StatusText;

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Absolutely positioned UI text whose top-left corner sits at `line.position`.
pub fn top_left_text(line: &TextLine, font: TextFont) -> impl Bundle {
    (
        Text::new(line.text.clone()),
        font,
        TextColor(line.color),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(line.position.x),
            top: Val::Px(line.position.y),
            ..default()
        },
    )
}

#[span_fn]
fn spawn_hud(mut commands: Commands, session: Res<GameSession>, capability: Res<TextCapability>) {
    let status = session.status_line();
    let Some(font) = capability.text_font(status.font_size) else {
        return;
    };
    commands.spawn((StatusText, top_left_text(&status, font)));
}

#[span_fn]
fn update_hud(session: Res<GameSession>, mut status_text: Query<&mut Text, With<StatusText>>) {
    if !session.is_changed() {
        return;
    }
    if let Ok(mut text) = status_text.single_mut() {
        **text = session.status_line().text;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
