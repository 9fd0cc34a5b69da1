//! Animation module
//!
//! Periodic angle drivers for the primary's spin and the satellite's orbit,
//! the clock they share, and the systems that turn angles into transforms.

use bevy::prelude::*;

pub mod clock;
pub mod driver;
pub mod systems;

pub use clock::{AnimationClock, advance_animation_clock, restart_animation_clock};
pub use driver::{BasePlacement, PeriodicAngle, PeriodicDriver, RotationPivot, StopToken};
pub use systems::{apply_periodic_rotations, stop_on_exit_request};

use crate::core::SceneState;

/// Plugin for the animation clock and periodic drivers
pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AnimationClock>()
            .add_systems(OnEnter(SceneState::Running), restart_animation_clock)
            .add_systems(
                Update,
                (
                    advance_animation_clock,
                    apply_periodic_rotations.after(advance_animation_clock),
                )
                    .run_if(in_state(SceneState::Running)),
            )
            .add_systems(Update, stop_on_exit_request);
    }
}
