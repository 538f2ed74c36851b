//! Text capability: the HUD font is looked up once at startup. When no font
//! loads, every text element is skipped and the rest of the game runs as usual.

use std::path::Path;

use bevy::prelude::*;
use micromegas_tracing::prelude::{info, span_fn, span_scope, warn};

use crate::config::GameConfig;

pub struct FontPlugin;

impl Plugin for FontPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TextCapability>();
        app.add_systems(Startup, resolve_text_font);
    }
}

/// Whether text can be drawn, and with which font.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub enum TextCapability {
    Available(Handle<Font>),
    #[default]
    Unavailable,
}

impl TextCapability {
    pub fn font(&self) -> Option<&Handle<Font>> {
        match self {
            TextCapability::Available(handle) => Some(handle),
            TextCapability::Unavailable => None,
        }
    }

    /// A `TextFont` at `font_size`, or `None` when text is unavailable.
    pub fn text_font(&self, font_size: f32) -> Option<TextFont> {
        self.font().map(|font| TextFont {
            font: font.clone(),
            font_size,
            ..default()
        })
    }
}

/// Read and parse the first usable font among `paths`.
pub fn load_first_font(paths: &[String]) -> Option<(String, Font)> {
    for path in paths {
        let Ok(bytes) = std::fs::read(Path::new(path)) else {
            continue;
        };
        match Font::try_from_bytes(bytes) {
            Ok(font) => return Some((path.clone(), font)),
            Err(err) => warn!("ignoring unreadable font {path}: {err:?}"),
        }
    }
    None
}

#[span_fn]
pub fn resolve_text_font(
    config: Res<GameConfig>,
    fonts: Option<ResMut<Assets<Font>>>,
    mut capability: ResMut<TextCapability>,
) {
    let Some(mut fonts) = fonts else {
        warn!("no font asset storage; text disabled");
        *capability = TextCapability::Unavailable;
        return;
    };

    *capability = match load_first_font(&config.font_paths) {
        Some((path, font)) => {
            info!("using font {path}");
            TextCapability::Available(fonts.add(font))
        }
        None if config.embedded_font_fallback => {
            info!("no font file found; using the embedded font");
            TextCapability::Available(Handle::default())
        }
        None => {
            warn!("no usable font found; text disabled");
            TextCapability::Unavailable
        }
    };
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
