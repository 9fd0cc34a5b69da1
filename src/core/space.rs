//! Screen space and render space.
//!
//! Placement is authored in screen space: x right, y down, z away from the
//! viewer, origin at the top-left of the viewport, units in logical pixels.
//! Bevy renders with y up and the camera looking down -Z.

use bevy::prelude::*;

/// Canonical screen-space position of an entity, as laid out at scene build.
#[derive(Component, Copy, Clone, Debug, Deref, DerefMut)]
pub struct ScreenPos(pub Vec3);

/// Convert a screen-space vector to Bevy render space.
/// Mapping: Bevy (x,y,z) = (screen.x, -screen.y, -screen.z)
pub fn screen_to_bevy(screen: Vec3) -> Vec3 {
    Vec3::new(screen.x, -screen.y, -screen.z)
}

/// Convert a Bevy render-space vector back to screen space.
/// The mapping is its own inverse.
#[cfg(test)]
pub fn bevy_to_screen(bevy: Vec3) -> Vec3 {
    Vec3::new(bevy.x, -bevy.y, -bevy.z)
}

/// Rotation about the screen +Y axis by `degrees`, expressed in render space.
///
/// The axis flip is a half turn about X, which keeps handedness but
/// reverses the sense of rotation about Y.
pub fn screen_rotation_y(degrees: f64) -> Quat {
    Quat::from_rotation_y(-(degrees.to_radians() as f32))
}

/// Rotate `base` about a pivot given relative to the base translation.
///
/// The pivot lives in the node's local frame, so the node's center ends up
/// at `base + pivot - R * pivot` and the node itself turns by `R`.
pub fn rotate_about_pivot(base: Transform, pivot: Vec3, rotation: Quat) -> Transform {
    let mut transform = base;
    transform.rotate_around(base.translation + pivot, rotation);
    transform
}
