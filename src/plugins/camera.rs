use bevy::prelude::*;
use bevy::ui::UiScale;
use micromegas_tracing::prelude::*;

use super::telemetry::GameSet;
use crate::session::GameSession;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        // UiPlugin normally provides this; headless apps do not.
        app.init_resource::<UiScale>();
        app.add_systems(Startup, spawn_camera);
        app.add_systems(Update, fit_camera_to_board.in_set(GameSet::Presentation));
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Keep the board and HUD fully visible if the window ends up a different
/// size than requested. The board stays pinned to the window's top-left
/// corner, and `UiScale` follows the camera so the pixel-positioned HUD and
/// overlay stay on the grid.
#[span_fn]
fn fit_camera_to_board(
    session: Res<GameSession>,
    windows: Query<&Window>,
    mut cameras: Query<(&mut Projection, &mut Transform), With<Camera2d>>,
    mut ui_scale: ResMut<UiScale>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((mut projection, mut transform)) = cameras.single_mut() else {
        return;
    };

    // Minimized
    if window.width() <= 0.0 || window.height() <= 0.0 {
        return;
    }

    let wanted = session.layout().window_size();
    let scale = (wanted.x / window.width()).max(wanted.y / window.height());

    if let Projection::Orthographic(ref mut ortho) = *projection
        && ortho.scale != scale
    {
        ortho.scale = scale;
    }

    // Shift the view so its top-left corner meets the board's top-left corner.
    let visible = Vec2::new(window.width(), window.height()) * scale;
    let offset = Vec2::new(visible.x - wanted.x, wanted.y - visible.y) / 2.0;
    if transform.translation.truncate() != offset {
        transform.translation.x = offset.x;
        transform.translation.y = offset.y;
    }

    let ui = 1.0 / scale;
    if ui_scale.0 != ui {
        ui_scale.0 = ui;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
