pub mod ai;
pub mod app_state;
pub mod components;
pub mod config;
pub mod events;
pub mod frame;
pub mod plugins;
pub mod session;
pub mod tracing_bridge;

use anyhow::Result;
use bevy::prelude::*;
use micromegas_tracing::prelude::{info, span_fn, span_scope};

use app_state::SessionState;
use config::GameConfig;
use plugins::board::BoardPlugin;
use plugins::camera::CameraPlugin;
use plugins::font::FontPlugin;
use plugins::game_over::GameOverPlugin;
use plugins::hud::HudPlugin;
use plugins::input::ControlsPlugin;
use plugins::simulation::{FramePacing, SimulationPlugin};
use plugins::telemetry::TelemetryPlugin;
use session::GameSession;

/// The whole game: session resources, state machine and every plugin.
pub struct ChasePlugin {
    config: GameConfig,
}

impl ChasePlugin {
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

impl Default for ChasePlugin {
    fn default() -> Self {
        Self {
            config: GameConfig::default(),
        }
    }
}

impl Plugin for ChasePlugin {
    fn build(&self, app: &mut App) {
        // State machine (StatesPlugin comes from DefaultPlugins)
        app.init_state::<SessionState>();

        app.insert_resource(self.config.clone());
        app.insert_resource(GameSession::from_config(&self.config));
        app.insert_resource(FramePacing::new(self.config.step_interval()));
        app.add_systems(Startup, start_session);

        app.add_plugins(TelemetryPlugin);
        app.add_plugins(FontPlugin);
        app.add_plugins(CameraPlugin);
        app.add_plugins(BoardPlugin);
        app.add_plugins(HudPlugin);
        app.add_plugins(GameOverPlugin);
        app.add_plugins(ControlsPlugin);
        app.add_plugins(SimulationPlugin);
    }
}

#[span_fn]
fn start_session(session: Res<GameSession>) {
    let layout = session.layout();
    info!(
        "chase started on a {}x{} grid: player at ({}, {}), enemy at ({}, {})",
        layout.columns,
        layout.rows,
        session.player().x,
        session.player().y,
        session.enemy().x,
        session.enemy().y
    );
}
