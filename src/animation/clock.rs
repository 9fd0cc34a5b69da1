//! Animation clock

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::Real;

use super::driver::StopToken;

/// Elapsed animation time, shared by every periodic driver.
///
/// Time is kept as a `Duration` so per-frame accumulation is exact integer
/// nanoseconds; angles are derived from the total, never from each other.
#[derive(Resource, Debug, Default)]
pub struct AnimationClock {
    elapsed: Duration,
    pub stop: StopToken,
}

impl AnimationClock {
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    pub fn is_running(&self) -> bool {
        !self.stop.is_cancelled()
    }

    /// Advance by one frame. No-op once stopped.
    pub fn tick(&mut self, delta: Duration) {
        if self.is_running() {
            self.elapsed = self.elapsed.saturating_add(delta);
        }
    }

    pub fn restart(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}

/// System to advance the animation clock by the real (uncapped) frame delta
pub fn advance_animation_clock(time: Res<Time<Real>>, mut clock: ResMut<AnimationClock>) {
    clock.tick(time.delta());
}

/// System to start the clock from zero when the scene begins running
pub fn restart_animation_clock(mut clock: ResMut<AnimationClock>) {
    clock.restart();
    info!("Animation clock started");
}
