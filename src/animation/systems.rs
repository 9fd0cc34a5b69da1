//! Per-frame transform updates for periodic drivers

use bevy::prelude::*;
use bevy::window::WindowCloseRequested;

use super::clock::AnimationClock;
use super::driver::{BasePlacement, PeriodicDriver, RotationPivot};
use crate::core::space::{rotate_about_pivot, screen_rotation_y};

/// Recompute every driven entity's transform from its base placement.
///
/// Drivers are independent: each reads the shared clock and its own angle
/// law. Cancelled drivers keep their last pose.
pub fn apply_periodic_rotations(
    clock: Res<AnimationClock>,
    mut drivers: Query<(
        &mut PeriodicDriver,
        &BasePlacement,
        Option<&RotationPivot>,
        &mut Transform,
    )>,
) {
    let t = clock.elapsed_secs();

    for (mut driver, base, pivot, mut transform) in &mut drivers {
        if driver.stop.is_cancelled() {
            continue;
        }

        let cycle = driver.angle.cycle(t);
        if cycle != driver.cycles_completed {
            driver.cycles_completed = cycle;
            debug!("{} completed cycle {}", driver.name, cycle);
        }

        let rotation = screen_rotation_y(driver.angle.degrees_at(t));
        *transform = match pivot {
            Some(pivot) => rotate_about_pivot(**base, **pivot, rotation),
            None => Transform {
                rotation: rotation * base.rotation,
                ..**base
            },
        };
    }
}

/// Cancel the drivers on Escape or a window close request.
/// Escape also exits, since a fullscreen window has no close button.
pub fn stop_on_exit_request(
    keys: Res<ButtonInput<KeyCode>>,
    mut close_requests: MessageReader<WindowCloseRequested>,
    clock: Res<AnimationClock>,
    mut exit: MessageWriter<AppExit>,
) {
    let escape = keys.just_pressed(KeyCode::Escape);
    let closing = close_requests.read().count() > 0;
    if !escape && !closing {
        return;
    }

    if clock.is_running() {
        clock.stop.cancel();
        info!("Animation stopped after {:.2}s", clock.elapsed_secs());
    }

    if escape {
        exit.write(AppExit::Success);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::ecs::message::Messages;
    use bevy::ecs::system::RunSystemOnce;

    use super::*;
    use crate::animation::driver::{PeriodicAngle, StopToken};
    use crate::core::space::screen_to_bevy;

    const EPSILON: f32 = 1e-2;

    fn clock_at(secs: f64, stop: StopToken) -> AnimationClock {
        let mut clock = AnimationClock::default();
        clock.stop = stop;
        clock.tick(Duration::from_secs_f64(secs));
        clock
    }

    fn primary_base() -> Transform {
        Transform::from_translation(screen_to_bevy(Vec3::new(960.0, 540.0, 900.0)))
    }

    fn satellite_base() -> Transform {
        Transform::from_translation(screen_to_bevy(Vec3::new(1460.0, 540.0, 100.0)))
    }

    fn satellite_pivot() -> Vec3 {
        screen_to_bevy(Vec3::new(-500.0, 0.0, 800.0))
    }

    fn spawn_scene(world: &mut World, stop: &StopToken) -> (Entity, Entity) {
        let primary = world
            .spawn((
                primary_base(),
                BasePlacement(primary_base()),
                PeriodicDriver::new(
                    "self-rotation",
                    PeriodicAngle::self_rotation(3.0),
                    stop.clone(),
                ),
            ))
            .id();
        let satellite = world
            .spawn((
                satellite_base(),
                BasePlacement(satellite_base()),
                RotationPivot(satellite_pivot()),
                PeriodicDriver::new(
                    "revolution",
                    PeriodicAngle::revolution(10.0),
                    stop.clone(),
                ),
            ))
            .id();
        (primary, satellite)
    }

    fn run_at(secs: f64) -> (World, Entity, Entity) {
        let stop = StopToken::default();
        let mut world = World::new();
        world.insert_resource(clock_at(secs, stop.clone()));
        let (primary, satellite) = spawn_scene(&mut world, &stop);
        world
            .run_system_once(apply_periodic_rotations)
            .expect("system should run");
        (world, primary, satellite)
    }

    fn transform(world: &World, entity: Entity) -> Transform {
        *world.get::<Transform>(entity).expect("entity has a transform")
    }

    #[test]
    fn test_start_pose_matches_base() {
        let (world, primary, satellite) = run_at(0.0);
        let p = transform(&world, primary);
        let s = transform(&world, satellite);
        assert_eq!(p.translation, primary_base().translation);
        assert!(p.rotation.angle_between(Quat::IDENTITY) < EPSILON);
        assert!((s.translation - satellite_base().translation).length() < EPSILON);
    }

    #[test]
    fn test_primary_spins_in_place() {
        let (world, primary, _) = run_at(1.5);
        let p = transform(&world, primary);
        assert_eq!(p.translation, primary_base().translation);
        assert!(p.rotation.angle_between(screen_rotation_y(180.0)) < EPSILON);
    }

    #[test]
    fn test_satellite_orbits_primary_center() {
        let center = satellite_base().translation + satellite_pivot();
        let radius = satellite_pivot().length();
        for secs in [1.0, 2.5, 5.0, 7.5, 9.9] {
            let (world, _, satellite) = run_at(secs);
            let s = transform(&world, satellite);
            assert!(((s.translation - center).length() - radius).abs() < EPSILON);
        }

        // Half an orbit puts the satellite on the far side of the primary.
        let (world, _, satellite) = run_at(5.0);
        let s = transform(&world, satellite);
        let opposite = center + satellite_pivot();
        assert!((s.translation - opposite).length() < EPSILON);
    }

    #[test]
    fn test_period_boundary_has_no_jump() {
        let (start, _, s0) = run_at(0.0);
        let (end, _, s1) = run_at(10.0);
        let a = transform(&start, s0);
        let b = transform(&end, s1);
        assert!((a.translation - b.translation).length() < EPSILON);
        assert!(a.rotation.angle_between(b.rotation) < EPSILON);
    }

    #[test]
    fn test_repeated_application_does_not_accumulate() {
        let stop = StopToken::default();
        let mut world = World::new();
        world.insert_resource(clock_at(2.0, stop.clone()));
        let (primary, satellite) = spawn_scene(&mut world, &stop);

        world.run_system_once(apply_periodic_rotations).expect("system should run");
        let first = (transform(&world, primary), transform(&world, satellite));
        world.run_system_once(apply_periodic_rotations).expect("system should run");
        let second = (transform(&world, primary), transform(&world, satellite));

        assert_eq!(first, second);
    }

    #[test]
    fn test_cycle_counters_are_independent() {
        let (world, primary, satellite) = run_at(10.0);
        let spin = world.get::<PeriodicDriver>(primary).expect("driver");
        let orbit = world.get::<PeriodicDriver>(satellite).expect("driver");
        assert_eq!(spin.cycles_completed, 3);
        assert_eq!(orbit.cycles_completed, 1);
    }

    #[test]
    fn test_cancelled_drivers_freeze() {
        let stop = StopToken::default();
        let mut world = World::new();
        world.insert_resource(clock_at(1.0, stop.clone()));
        let (primary, _) = spawn_scene(&mut world, &stop);
        world.run_system_once(apply_periodic_rotations).expect("system should run");
        let frozen = transform(&world, primary);

        stop.cancel();
        world.resource_mut::<AnimationClock>().restart();
        world.run_system_once(apply_periodic_rotations).expect("system should run");
        assert_eq!(transform(&world, primary), frozen);
    }

    #[test]
    fn test_pivot_never_changes() {
        let stop = StopToken::default();
        let mut world = World::new();
        world.insert_resource(clock_at(0.0, stop.clone()));
        let (primary, satellite) = spawn_scene(&mut world, &stop);
        let center = primary_base().translation;

        // 25 s of 60 Hz frames: several full turns of both drivers.
        for _ in 0..1500 {
            world
                .resource_mut::<AnimationClock>()
                .tick(Duration::from_nanos(16_666_667));
            world.run_system_once(apply_periodic_rotations).expect("system should run");

            let pivot = world.get::<RotationPivot>(satellite).expect("pivot");
            assert_eq!(**pivot, satellite_pivot());
            let radius = (transform(&world, satellite).translation - center).length();
            assert!((radius - satellite_pivot().length()).abs() < EPSILON);
        }
        assert_eq!(transform(&world, primary).translation, center);
    }

    fn exit_request_world() -> World {
        let mut world = World::new();
        world.init_resource::<ButtonInput<KeyCode>>();
        world.init_resource::<Messages<WindowCloseRequested>>();
        world.init_resource::<Messages<AppExit>>();
        world.insert_resource(clock_at(1.0, StopToken::default()));
        world
    }

    #[test]
    fn test_escape_cancels_and_exits() {
        let mut world = exit_request_world();
        world
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Escape);

        world.run_system_once(stop_on_exit_request).expect("system should run");

        assert!(!world.resource::<AnimationClock>().is_running());
        assert_eq!(world.resource::<Messages<AppExit>>().len(), 1);
    }

    #[test]
    fn test_close_request_cancels_without_exit() {
        let mut world = exit_request_world();
        world.write_message(WindowCloseRequested {
            window: Entity::PLACEHOLDER,
        });

        world.run_system_once(stop_on_exit_request).expect("system should run");

        assert!(!world.resource::<AnimationClock>().is_running());
        assert!(world.resource::<Messages<AppExit>>().is_empty());
    }

    #[test]
    fn test_no_request_keeps_running() {
        let mut world = exit_request_world();
        world.run_system_once(stop_on_exit_request).expect("system should run");
        assert!(world.resource::<AnimationClock>().is_running());
        assert!(world.resource::<Messages<AppExit>>().is_empty());
    }
}
