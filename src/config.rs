//! Game configuration: reference constants with an optional JSON override.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail, ensure};
use bevy::prelude::*;
use micromegas_tracing::prelude::info;
use serde::Deserialize;

use crate::components::GridPosition;
use crate::frame::BoardLayout;

/// File looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "chase.json";

const MAX_GRID_CELLS: u32 = 256;
const MIN_CELL_SIZE: u32 = 4;

#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub grid_width: u32,
    pub grid_height: u32,
    /// Cell edge in pixels.
    pub cell_size: u32,
    /// Height of the status strip above the grid, in pixels.
    pub hud_height: u32,
    pub player_start: GridPosition,
    pub enemy_start: GridPosition,
    /// Delay between logical frames. Zero advances on every engine frame.
    pub step_interval_ms: u64,
    pub window_title: String,
    /// Candidate font files, tried in order.
    pub font_paths: Vec<String>,
    /// Use the engine's embedded font when no candidate loads.
    pub embedded_font_fallback: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            cell_size: 32,
            hud_height: 40,
            player_start: GridPosition::new(2, 2),
            enemy_start: GridPosition::new(15, 15),
            step_interval_ms: 90,
            window_title: "NPC Chase".to_string(),
            font_paths: vec![
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf".to_string(),
                "DejaVuSans.ttf".to_string(),
                "arial.ttf".to_string(),
            ],
            embedded_font_fallback: false,
        }
    }
}

impl GameConfig {
    pub fn parse(text: &str) -> Result<Self> {
        let config: GameConfig =
            serde_json::from_str(text).context("Failed to parse game config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            (1..=MAX_GRID_CELLS).contains(&self.grid_width)
                && (1..=MAX_GRID_CELLS).contains(&self.grid_height),
            "grid must be between 1x1 and {MAX_GRID_CELLS}x{MAX_GRID_CELLS}, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.cell_size >= MIN_CELL_SIZE,
            "cell_size must be at least {MIN_CELL_SIZE}, got {}",
            self.cell_size
        );

        let layout = self.layout();
        for (name, pos) in [
            ("player_start", self.player_start),
            ("enemy_start", self.enemy_start),
        ] {
            if !layout.contains(pos) {
                bail!(
                    "{name} ({}, {}) is outside the {}x{} grid",
                    pos.x,
                    pos.y,
                    self.grid_width,
                    self.grid_height
                );
            }
        }
        ensure!(
            self.player_start != self.enemy_start,
            "player and enemy cannot start on the same cell"
        );
        Ok(())
    }

    pub fn layout(&self) -> BoardLayout {
        BoardLayout {
            columns: self.grid_width as i32,
            rows: self.grid_height as i32,
            cell_size: self.cell_size as f32,
            hud_height: self.hud_height as f32,
        }
    }

    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }
}

/// Load the config at `path`, falling back to defaults when it doesn't exist.
pub fn load_config(path: &Path) -> Result<GameConfig> {
    if !path.exists() {
        info!("no config at {}; using defaults", path.display());
        return Ok(GameConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config = GameConfig::parse(&contents)
        .with_context(|| format!("Invalid config in {}", path.display()))?;
    info!("loaded config from {}", path.display());
    Ok(config)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = GameConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.layout(), BoardLayout::default());
        assert_eq!(cfg.step_interval(), Duration::from_millis(90));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = GameConfig::parse(r#"{ "step_interval_ms": 0, "window_title": "Chase" }"#)
            .unwrap();
        assert_eq!(cfg.step_interval_ms, 0);
        assert_eq!(cfg.window_title, "Chase");
        assert_eq!(cfg.grid_width, 20);
        assert_eq!(cfg.player_start, GridPosition::new(2, 2));
    }

    #[test]
    fn start_cells_parse_as_objects() {
        let cfg = GameConfig::parse(
            r#"{ "player_start": { "x": 0, "y": 0 }, "enemy_start": { "x": 19, "y": 19 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.player_start, GridPosition::new(0, 0));
        assert_eq!(cfg.enemy_start, GridPosition::new(19, 19));
    }

    #[test]
    fn start_outside_grid_rejected() {
        let err = GameConfig::parse(r#"{ "grid_width": 10, "grid_height": 10 }"#).unwrap_err();
        assert!(format!("{err:#}").contains("enemy_start"));
    }

    #[test]
    fn shared_start_cell_rejected() {
        let err = GameConfig::parse(r#"{ "enemy_start": { "x": 2, "y": 2 } }"#).unwrap_err();
        assert!(format!("{err:#}").contains("same cell"));
    }

    #[test]
    fn zero_grid_rejected() {
        assert!(GameConfig::parse(r#"{ "grid_width": 0 }"#).is_err());
        assert!(GameConfig::parse(r#"{ "cell_size": 2 }"#).is_err());
    }

    #[test]
    fn grid_size_upper_bound() {
        let largest = GameConfig::parse(r#"{ "grid_width": 256, "grid_height": 256 }"#).unwrap();
        assert_eq!(largest.layout().columns, 256);
        assert_eq!(largest.layout().rows, 256);

        let err = GameConfig::parse(r#"{ "grid_width": 257 }"#).unwrap_err();
        assert!(format!("{err:#}").contains("256x256"));
        assert!(GameConfig::parse(r#"{ "grid_height": 257 }"#).is_err());
    }

    #[test]
    fn unknown_field_rejected() {
        assert!(GameConfig::parse(r#"{ "lives": 3 }"#).is_err());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("npc-chase-no-such-config.json");
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg, GameConfig::default());
    }

    #[test]
    fn existing_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!(
            "npc-chase-valid-{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"{ "grid_width": 12, "grid_height": 9, "enemy_start": { "x": 11, "y": 8 }, "step_interval_ms": 120 }"#,
        )
        .unwrap();
        let result = load_config(&path);
        std::fs::remove_file(&path).unwrap();

        let cfg = result.unwrap();
        assert_eq!(cfg.grid_width, 12);
        assert_eq!(cfg.grid_height, 9);
        assert_eq!(cfg.enemy_start, GridPosition::new(11, 8));
        assert_eq!(cfg.step_interval(), Duration::from_millis(120));
        // Untouched fields keep their defaults.
        assert_eq!(cfg.player_start, GridPosition::new(2, 2));
        assert_eq!(cfg.window_title, "NPC Chase");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = std::env::temp_dir().join(format!(
            "npc-chase-malformed-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "{ not json").unwrap();
        let result = load_config(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }
}
