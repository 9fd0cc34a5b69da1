//! Camera depth state and zoom input

use bevy::input::mouse::MouseScrollUnit;
use bevy::prelude::*;

/// Camera depth along the screen z axis. Positive moves into the scene.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub depth: f32,
    /// Optional `[min, max]` clamp. `None` keeps zoom unbounded.
    pub depth_limits: Option<[f32; 2]>,
}

impl CameraRig {
    pub fn with_limits(depth_limits: Option<[f32; 2]>) -> Self {
        Self {
            depth: 0.0,
            depth_limits,
        }
    }

    /// Apply one zoom delta. Returns false if the delta was ignored.
    pub fn on_zoom(&mut self, delta: f32) -> bool {
        if !delta.is_finite() {
            return false;
        }
        self.depth += delta;
        if let Some([min, max]) = self.depth_limits {
            self.depth = self.depth.clamp(min, max);
        }
        true
    }
}

/// Request to move the camera by a depth delta, applied on the next update
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct ZoomRequested(pub f32);

/// Convert a wheel reading to a depth delta in scene units.
/// Line-based wheels move `line_pixels` per notch.
pub fn scroll_delta(unit: MouseScrollUnit, y: f32, line_pixels: f32) -> f32 {
    match unit {
        MouseScrollUnit::Line => y * line_pixels,
        MouseScrollUnit::Pixel => y,
    }
}
