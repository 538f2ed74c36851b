//! Board rendering: checkerboard cells and the two tokens, drawn as sprites
//! from the session's frame description.

use bevy::prelude::*;
use micromegas_tracing::prelude::{span_fn, span_scope};

use crate::components::{BoardCell, EnemyToken, PlayerToken};
use crate::frame::{BoardLayout, PixelRect};
use crate::plugins::telemetry::GameSet;
use crate::session::GameSession;

const CELL_Z: f32 = 0.0;
const TOKEN_Z: f32 = 10.0;

pub struct BoardPlugin;

impl Plugin for BoardPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_board);
        app.add_systems(Update, sync_tokens.in_set(GameSet::Presentation));
    }
}

fn sprite_bundle(layout: &BoardLayout, rect: &PixelRect, z: f32) -> (Sprite, Transform) {
    let center = layout.world_center(rect);
    (
        Sprite::from_color(rect.color, rect.size),
        Transform::from_xyz(center.x, center.y, z),
    )
}

/// Spawn the static grid and both tokens.
#[span_fn]
pub fn spawn_board(mut commands: Commands, session: Res<GameSession>) {
    let layout = session.layout();
    let frame = session.render();

    commands.insert_resource(ClearColor(frame.clear));

    for cell in &frame.cells {
        commands.spawn((BoardCell, sprite_bundle(layout, cell, CELL_Z)));
    }
    commands.spawn((PlayerToken, sprite_bundle(layout, &frame.player, TOKEN_Z)));
    commands.spawn((EnemyToken, sprite_bundle(layout, &frame.enemy, TOKEN_Z)));
}

/// Move token sprites to the session's current cells.
#[allow(clippy::type_complexity)]
#[span_fn]
fn sync_tokens(
    session: Res<GameSession>,
    mut players: Query<&mut Transform, (With<PlayerToken>, Without<EnemyToken>)>,
    mut enemies: Query<&mut Transform, (With<EnemyToken>, Without<PlayerToken>)>,
) {
    if !session.is_changed() {
        return;
    }
    let layout = session.layout();
    let player = layout.world_center(&session.player_rect());
    let enemy = layout.world_center(&session.enemy_rect());

    for mut transform in &mut players {
        transform.translation.x = player.x;
        transform.translation.y = player.y;
    }
    for mut transform in &mut enemies {
        transform.translation.x = enemy.x;
        transform.translation.y = enemy.y;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
