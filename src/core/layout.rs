//! Scene placement formulas.

use bevy::prelude::*;

use crate::config::{CameraConfig, GeometryConfig, LightingConfig};

/// Placement of every scene node, computed once from the viewport size.
///
/// All positions are screen space (see [`crate::core::space`]).
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct SceneLayout {
    pub viewport: Vec2,
    pub primary: Vec3,
    pub satellite: Vec3,
    pub light: Vec3,
    /// Satellite revolution center, relative to the satellite's own translation
    pub pivot: Vec3,
    /// Distance from the camera eye to the screen plane at zero depth
    pub eye_distance: f32,
}

impl SceneLayout {
    pub fn new(
        viewport: Vec2,
        geometry: &GeometryConfig,
        lighting: &LightingConfig,
        camera: &CameraConfig,
    ) -> Self {
        let center = viewport / 2.0;
        let primary = Vec3::new(center.x, center.y, geometry.primary_depth);
        let satellite = Vec3::new(
            primary.x + geometry.separation,
            center.y,
            geometry.satellite_depth,
        );
        let light = Vec3::new(lighting.light_x, center.y, lighting.light_depth);
        let half_fov = (camera.fov_degrees / 2.0).to_radians();

        Self {
            viewport,
            primary,
            satellite,
            light,
            pivot: primary - satellite,
            eye_distance: center.y / half_fov.tan(),
        }
    }

    /// Screen-space camera eye for a given camera depth.
    ///
    /// The camera translation stays at x = y = 0; the eye looks at the
    /// viewport center so that depth 0 maps the z = 0 plane onto the screen.
    pub fn camera_eye(&self, depth: f32) -> Vec3 {
        let center = self.viewport / 2.0;
        Vec3::new(center.x, center.y, depth - self.eye_distance)
    }
}
