// Two-body orbital scene: a spinning planet and an orbiting moon.

use anyhow::Context;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::window::{MonitorSelection, PresentMode, Window, WindowMode, WindowPlugin};

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

mod animation;
mod camera;
mod config;
mod core;
mod visualization;

use animation::AnimationPlugin;
use camera::CameraPlugin;
use config::{ConfigSource, SystemConfig};
use crate::core::SceneState;
use visualization::VisualizationPlugin;
use visualization::textures::{ASSET_DIR, asset_root, verify_texture_files};

fn log_config_source(source: Res<ConfigSource>, config: Res<SystemConfig>) {
    match &*source {
        ConfigSource::Defaults => info!("Using default configuration"),
        ConfigSource::File(path) => info!("Loaded configuration from {}", path.display()),
    }
    info!(
        "Self-rotation period {}s, revolution period {}s",
        config.animation.rotate_period_secs, config.animation.revolution_period_secs
    );
}

fn main() -> anyhow::Result<()> {
    let (config, source) = SystemConfig::load().context("failed to load configuration")?;

    let asset_root = asset_root();
    verify_texture_files(&config.textures, &asset_root)
        .with_context(|| format!("cannot start without textures in {}", asset_root.display()))?;

    let mode = if config.window.fullscreen {
        WindowMode::BorderlessFullscreen(MonitorSelection::Primary)
    } else {
        WindowMode::Windowed
    };

    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: config.window.title.clone(),
                    present_mode: PresentMode::AutoVsync,
                    mode,
                    ..default()
                }),
                ..default()
            })
            .set(AssetPlugin {
                file_path: ASSET_DIR.to_string(),
                ..default()
            })
            .set(LogPlugin {
                filter: config.log_filter.clone(),
                ..default()
            }),
    );

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    app.insert_resource(config)
        .insert_resource(source)
        .init_state::<SceneState>();

    app.add_plugins(AnimationPlugin);
    app.add_plugins(CameraPlugin);
    app.add_plugins(VisualizationPlugin);
    app.add_systems(Startup, log_config_source);

    match app.run() {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => anyhow::bail!("exited with error code {}", code),
    }
}
