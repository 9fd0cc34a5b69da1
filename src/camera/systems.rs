//! Camera spawning and zoom systems

use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;

use super::rig::{CameraRig, ZoomRequested, scroll_delta};
use crate::config::{CameraConfig, SystemConfig};
use crate::core::SceneLayout;
use crate::core::space::screen_to_bevy;

/// Marker component for the scene camera
#[derive(Component)]
pub struct MainCamera;

/// Apply configured depth limits before any input arrives
pub fn configure_camera_rig(config: Res<SystemConfig>, mut rig: ResMut<CameraRig>) {
    *rig = CameraRig::with_limits(config.camera.depth_limits);
    if let Some([min, max]) = rig.depth_limits {
        info!("Camera depth limited to [{}, {}]", min, max);
    }
}

pub fn spawn_main_camera(
    commands: &mut Commands,
    layout: &SceneLayout,
    config: &CameraConfig,
    rig: &CameraRig,
    background: Color,
) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: config.fov_degrees.to_radians(),
            near: config.near,
            far: config.far,
            ..default()
        }),
        Camera {
            order: 0,
            clear_color: ClearColorConfig::Custom(background),
            ..default()
        },
        Transform::from_translation(screen_to_bevy(layout.camera_eye(rig.depth))),
        MainCamera,
        Name::new("Main Camera"),
    ));
}

/// Turn raw wheel input into zoom requests
pub fn forward_mouse_wheel(
    mut wheel: MessageReader<MouseWheel>,
    config: Res<SystemConfig>,
    mut zoom: MessageWriter<ZoomRequested>,
) {
    for event in wheel.read() {
        let delta = scroll_delta(event.unit, event.y, config.camera.scroll_line_pixels);
        zoom.write(ZoomRequested(delta));
    }
}

pub fn apply_zoom(mut requests: MessageReader<ZoomRequested>, mut rig: ResMut<CameraRig>) {
    for ZoomRequested(delta) in requests.read() {
        if rig.on_zoom(*delta) {
            debug!("Camera depth {:.1} (delta {:.1})", rig.depth, delta);
        } else {
            debug!("Ignoring non-finite zoom delta {}", delta);
        }
    }
}

/// Move the camera eye to match the rig's depth
pub fn sync_camera_depth(
    rig: Res<CameraRig>,
    layout: Option<Res<SceneLayout>>,
    mut cameras: Query<&mut Transform, With<MainCamera>>,
) {
    let Some(layout) = layout else {
        return;
    };
    if !rig.is_changed() && !layout.is_changed() {
        return;
    }

    let eye = screen_to_bevy(layout.camera_eye(rig.depth));
    for mut transform in &mut cameras {
        transform.translation = eye;
    }
}
