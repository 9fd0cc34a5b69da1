//! Camera module
//!
//! Fixed perspective camera whose only motion is depth, driven by the
//! mouse wheel.

use bevy::prelude::*;

pub mod rig;
pub mod systems;

pub use rig::{CameraRig, ZoomRequested};
pub use systems::{
    apply_zoom, configure_camera_rig, forward_mouse_wheel, spawn_main_camera, sync_camera_depth,
};

/// Plugin for camera zoom handling
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraRig>()
            .add_message::<ZoomRequested>()
            .add_systems(Startup, configure_camera_rig)
            .add_systems(
                Update,
                (
                    forward_mouse_wheel,
                    apply_zoom.after(forward_mouse_wheel),
                    sync_camera_depth.after(apply_zoom),
                ),
            );
    }
}
