//! Game Over overlay: a translucent panel over the grid with a centered title
//! and retry hint. The panel is drawn even when text is unavailable.

use bevy::prelude::*;
use micromegas_tracing::prelude::{span_fn, span_scope};

use crate::app_state::SessionState;
use crate::frame::TextLine;
use crate::plugins::font::TextCapability;
use crate::session::GameSession;

/// Line height used to turn a text center into a row top.
const LINE_HEIGHT_FACTOR: f32 = 1.2;

pub struct GameOverPlugin;

impl Plugin for GameOverPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(SessionState::GameOver), spawn_game_over);
        app.add_systems(OnExit(SessionState::GameOver), despawn_game_over);
    }
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

#[derive(Component)]
pub struct GameOverRoot;

#[derive(Component)]
pub struct GameOverTitle;

#[derive(Component)]
pub struct GameOverHint;

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// A full-width row, relative to the panel, centered vertically on
/// `line.position.y`. Its child text is centered horizontally by the layout.
fn centered_row(line: &TextLine, panel_top: f32) -> Node {
    let line_height = line.font_size * LINE_HEIGHT_FACTOR;
    Node {
        position_type: PositionType::Absolute,
        top: Val::Px(line.position.y - panel_top - line_height / 2.0),
        width: Val::Percent(100.0),
        height: Val::Px(line_height),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..default()
    }
}

fn line_text(line: &TextLine, font: TextFont) -> impl Bundle {
    (
        Text::new(line.text.clone()),
        font,
        TextColor(line.color),
    )
}

#[span_fn]
fn spawn_game_over(
    mut commands: Commands,
    session: Res<GameSession>,
    capability: Res<TextCapability>,
) {
    let Some(overlay) = session.render().overlay else {
        return;
    };
    let panel = &overlay.panel;

    let mut root = commands.spawn((
        GameOverRoot,
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(panel.origin.x),
            top: Val::Px(panel.origin.y),
            width: Val::Px(panel.size.x),
            height: Val::Px(panel.size.y),
            ..default()
        },
        BackgroundColor(panel.color),
        Outline::new(
            Val::Px(overlay.outline_thickness),
            Val::ZERO,
            overlay.outline,
        ),
    ));

    let title_font = capability.text_font(overlay.title.font_size);
    let hint_font = capability.text_font(overlay.hint.font_size);
    if let (Some(title_font), Some(hint_font)) = (title_font, hint_font) {
        root.with_children(|parent| {
            parent
                .spawn(centered_row(&overlay.title, panel.origin.y))
                .with_children(|row| {
                    row.spawn((GameOverTitle, line_text(&overlay.title, title_font)));
                });
            parent
                .spawn(centered_row(&overlay.hint, panel.origin.y))
                .with_children(|row| {
                    row.spawn((GameOverHint, line_text(&overlay.hint, hint_font)));
                });
        });
    }
}

fn despawn_game_over(mut commands: Commands, query: Query<Entity, With<GameOverRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::GridPosition;
    use crate::session::HeldKeys;
    use bevy::state::app::StatesPlugin;

    fn setup_app(capability: TextCapability) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(StatesPlugin);
        app.init_state::<SessionState>();
        app.insert_resource(GameSession::default());
        app.insert_resource(capability);
        app.add_plugins(GameOverPlugin);
        app
    }

    fn end_game(app: &mut App) {
        {
            let mut session = app.world_mut().resource_mut::<GameSession>();
            session.place(GridPosition::new(5, 5), GridPosition::new(6, 5));
            session.update(HeldKeys::default());
        }
        app.world_mut()
            .resource_mut::<NextState<SessionState>>()
            .set(SessionState::GameOver);
        for _ in 0..5 {
            app.update();
        }
    }

    fn count<T: Component>(app: &mut App) -> usize {
        app.world_mut().query::<&T>().iter(app.world()).count()
    }

    #[test]
    fn overlay_absent_while_playing() {
        let mut app = setup_app(TextCapability::Available(Handle::default()));
        app.update();
        assert_eq!(count::<GameOverRoot>(&mut app), 0);
    }

    #[test]
    fn overlay_spawns_with_texts() {
        let mut app = setup_app(TextCapability::Available(Handle::default()));
        end_game(&mut app);

        assert_eq!(count::<GameOverRoot>(&mut app), 1);
        let title = app
            .world_mut()
            .query_filtered::<&Text, With<GameOverTitle>>()
            .single(app.world())
            .unwrap();
        assert_eq!(title.0, "GAME OVER!!!");
        let hint = app
            .world_mut()
            .query_filtered::<&Text, With<GameOverHint>>()
            .single(app.world())
            .unwrap();
        assert_eq!(hint.0, "press 'r' to retry, 'q' to quit");
    }

    #[test]
    fn panel_without_text_when_font_missing() {
        let mut app = setup_app(TextCapability::Unavailable);
        end_game(&mut app);

        assert_eq!(count::<GameOverRoot>(&mut app), 1);
        assert_eq!(count::<GameOverTitle>(&mut app), 0);
        assert_eq!(count::<GameOverHint>(&mut app), 0);
    }

    #[test]
    fn overlay_despawns_on_reset() {
        let mut app = setup_app(TextCapability::Available(Handle::default()));
        end_game(&mut app);

        app.world_mut().resource_mut::<GameSession>().reset();
        app.world_mut()
            .resource_mut::<NextState<SessionState>>()
            .set(SessionState::Playing);
        for _ in 0..5 {
            app.update();
        }

        assert_eq!(count::<GameOverRoot>(&mut app), 0);
        assert_eq!(count::<GameOverTitle>(&mut app), 0);
    }
}
