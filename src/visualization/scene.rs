//! Scene assembly
//!
//! Waits in [`SceneState::Loading`] until every texture is loaded and the
//! viewport size is known, then lays out and spawns the bodies, the light
//! and the camera in one go and switches to [`SceneState::Running`].

use bevy::prelude::*;
use bevy::window::{Monitor, PrimaryMonitor, PrimaryWindow};

use crate::animation::AnimationClock;
use crate::camera::{CameraRig, spawn_main_camera};
use crate::config::SystemConfig;
use crate::core::{SceneLayout, SceneState};
use crate::visualization::bodies::{spawn_primary, spawn_satellite};
use crate::visualization::lighting::{background_color, spawn_sun_light};
use crate::visualization::textures::{TextureSet, TextureStatus};

/// Logical size of a monitor, matching window coordinates
pub fn monitor_logical_size(monitor: &Monitor) -> Vec2 {
    let physical = Vec2::new(monitor.physical_width as f32, monitor.physical_height as f32);
    physical / monitor.scale_factor as f32
}

/// Pick the viewport the layout is computed for.
///
/// Fullscreen windows take the primary monitor's size, since the window
/// itself may not have been resized yet. Empty sizes are not usable.
pub fn choose_viewport(
    monitor: Option<Vec2>,
    window: Option<Vec2>,
    fullscreen: bool,
) -> Option<Vec2> {
    let usable = |size: &Vec2| size.x > 0.0 && size.y > 0.0;
    let monitor = monitor.filter(usable);
    let window = window.filter(usable);
    if fullscreen {
        monitor.or(window)
    } else {
        window.or(monitor)
    }
}

#[allow(clippy::too_many_arguments)]
pub fn assemble_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    textures: Option<Res<TextureSet>>,
    status: Res<TextureStatus>,
    config: Res<SystemConfig>,
    clock: Res<AnimationClock>,
    rig: Res<CameraRig>,
    monitors: Query<&Monitor, With<PrimaryMonitor>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut next_state: ResMut<NextState<SceneState>>,
) -> Result {
    let Some(textures) = textures else {
        return Ok(());
    };
    if *status != TextureStatus::Ready {
        return Ok(());
    }

    let monitor = monitors.iter().next().map(monitor_logical_size);
    let window = windows
        .iter()
        .next()
        .map(|window| Vec2::new(window.width(), window.height()));
    let Some(viewport) = choose_viewport(monitor, window, config.window.fullscreen) else {
        return Ok(());
    };

    let layout = SceneLayout::new(
        viewport,
        &config.geometry,
        &config.lighting,
        &config.camera,
    );
    info!(
        "Viewport {}x{}: primary at {}, satellite at {}, pivot {}",
        viewport.x, viewport.y, layout.primary, layout.satellite, layout.pivot
    );

    spawn_primary(
        &mut commands,
        &mut meshes,
        &mut materials,
        &textures,
        &layout,
        &config,
        &clock.stop,
    )?;
    spawn_satellite(
        &mut commands,
        &mut meshes,
        &mut materials,
        &textures,
        &layout,
        &config,
        &clock.stop,
    )?;
    spawn_sun_light(&mut commands, &layout, &config.lighting);
    spawn_main_camera(
        &mut commands,
        &layout,
        &config.camera,
        &rig,
        background_color(&config.lighting),
    );

    commands.insert_resource(layout);
    next_state.set(SceneState::Running);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fullscreen_prefers_monitor() {
        let monitor = Some(Vec2::new(2560.0, 1440.0));
        let window = Some(Vec2::new(1280.0, 720.0));
        assert_eq!(choose_viewport(monitor, window, true), monitor);
        assert_eq!(choose_viewport(monitor, window, false), window);
    }

    #[test]
    fn test_falls_back_when_one_source_missing() {
        let window = Some(Vec2::new(1280.0, 720.0));
        assert_eq!(choose_viewport(None, window, true), window);
        assert_eq!(choose_viewport(window, None, false), window);
        assert_eq!(choose_viewport(None, None, true), None);
    }

    #[test]
    fn test_empty_sizes_are_skipped() {
        let empty = Some(Vec2::ZERO);
        let window = Some(Vec2::new(800.0, 600.0));
        assert_eq!(choose_viewport(empty, window, true), window);
        assert_eq!(choose_viewport(empty, empty, true), None);
    }
}
