use std::path::Path;

use anyhow::{Context, Result};
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::tasks::{ComputeTaskPool, TaskPoolBuilder};
use bevy::window::WindowResolution;
use micromegas_telemetry_sink::TelemetryGuardBuilder;
use micromegas_telemetry_sink::tracing_interop::TracingCaptureLayer;
use micromegas_tracing::dispatch::{flush_thread_buffer, init_thread_stream, unregister_thread_stream};
use micromegas_tracing::levels::LevelFilter;
use micromegas_tracing::prelude::info;
use npc_chase::ChasePlugin;
use npc_chase::config::{CONFIG_FILE, load_config};
use npc_chase::tracing_bridge::ScopeBridgeLayer;
use tracing_subscriber::Registry;
use tracing_subscriber::layer::SubscriberExt;

fn main() -> Result<()> {
    // Spans need MICROMEGAS_ENABLE_CPU_TRACING=true; logs and metrics always flow.
    let _telemetry_guard = TelemetryGuardBuilder::default()
        .with_install_tracing_capture(false)
        .build()
        .context("Failed to initialize telemetry")?;

    // Bevy emits schedule spans through the global `tracing` subscriber, so
    // this must be installed before the app is built.
    let subscriber = Registry::default()
        .with(ScopeBridgeLayer::schedules())
        .with(TracingCaptureLayer {
            max_level: LevelFilter::Info,
        });
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let config = load_config(Path::new(CONFIG_FILE))?;
    let plugin = ChasePlugin::new(config).context("Invalid game config")?;
    let window_size = plugin.config().layout().window_size();
    info!(
        "NPC Chase starting: {}x{} window, {} ms per step",
        window_size.x,
        window_size.y,
        plugin.config().step_interval_ms
    );

    // The pool must exist before App::new() so TaskPoolPlugin keeps ours.
    ComputeTaskPool::get_or_init(|| {
        TaskPoolBuilder::new()
            .on_thread_spawn(init_thread_stream)
            .on_thread_destroy(|| {
                flush_thread_buffer();
                unregister_thread_stream();
            })
            .build()
    });

    let window = Window {
        title: plugin.config().window_title.clone(),
        resolution: WindowResolution::new(window_size.x as u32, window_size.y as u32),
        resizable: false,
        ..default()
    };

    App::new()
        .add_plugins(
            DefaultPlugins
                .build()
                .disable::<LogPlugin>()
                .set(WindowPlugin {
                    primary_window: Some(window),
                    ..default()
                }),
        )
        .add_plugins(plugin)
        .run();

    Ok(())
}
