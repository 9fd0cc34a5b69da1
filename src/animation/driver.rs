//! Periodic angle drivers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bevy::prelude::*;

/// Angle that sweeps linearly from `from` to `to` once per `period_secs`,
/// repeating forever.
///
/// Values are degrees. At an exact period boundary the angle wraps back to
/// `from`, which is the same orientation as `to` for a full turn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeriodicAngle {
    pub from: f64,
    pub to: f64,
    pub period_secs: f64,
}

impl PeriodicAngle {
    pub fn new(from: f64, to: f64, period_secs: f64) -> Self {
        debug_assert!(period_secs > 0.0, "period must be positive");
        Self {
            from,
            to,
            period_secs,
        }
    }

    /// Spin about the body's own axis: 360 down to 0.
    pub fn self_rotation(period_secs: f64) -> Self {
        Self::new(360.0, 0.0, period_secs)
    }

    /// Orbit about a pivot: 0 down to -360.
    pub fn revolution(period_secs: f64) -> Self {
        Self::new(0.0, -360.0, period_secs)
    }

    /// Fraction of the current cycle elapsed at `t`, in `[0, 1)`.
    pub fn phase(&self, t: f64) -> f64 {
        (clamp_time(t) / self.period_secs).fract()
    }

    /// Number of whole cycles completed at `t`.
    pub fn cycle(&self, t: f64) -> u64 {
        (clamp_time(t) / self.period_secs).floor() as u64
    }

    pub fn degrees_at(&self, t: f64) -> f64 {
        self.from + (self.to - self.from) * self.phase(t)
    }
}

// Negative or non-finite time means the clock has not started.
fn clamp_time(t: f64) -> f64 {
    if t.is_finite() && t > 0.0 { t } else { 0.0 }
}

/// Shared cancellation flag for periodic drivers.
///
/// Clones observe the same flag; cancelling any clone stops all of them.
#[derive(Clone, Debug, Default)]
pub struct StopToken(Arc<AtomicBool>);

impl StopToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Component driving an entity's rotation about screen +Y.
#[derive(Component, Clone, Debug)]
pub struct PeriodicDriver {
    pub name: &'static str,
    pub angle: PeriodicAngle,
    pub stop: StopToken,
    pub cycles_completed: u64,
}

impl PeriodicDriver {
    pub fn new(name: &'static str, angle: PeriodicAngle, stop: StopToken) -> Self {
        Self {
            name,
            angle,
            stop,
            cycles_completed: 0,
        }
    }
}

/// Rotation center relative to the entity's base translation, in render space.
/// Entities without it spin about their own center.
#[derive(Component, Clone, Copy, Debug, Deref)]
pub struct RotationPivot(pub Vec3);

/// Transform the entity had at scene build. Drivers always rotate from here.
#[derive(Component, Clone, Copy, Debug, Deref)]
pub struct BasePlacement(pub Transform);
