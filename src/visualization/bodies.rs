//! Primary and satellite bodies: meshes, materials and drivers.

use bevy::prelude::*;

use crate::animation::{BasePlacement, PeriodicAngle, PeriodicDriver, RotationPivot, StopToken};
use crate::config::SystemConfig;
use crate::core::SceneLayout;
use crate::core::space::{ScreenPos, screen_to_bevy};
use crate::visualization::textures::TextureSet;

/// A textured sphere in the scene
#[derive(Component, Copy, Clone, Debug)]
pub struct Body {
    pub radius: f32,
}

/// Marker component for the spinning primary body.
#[derive(Component)]
pub struct Primary;

/// Marker component for the orbiting satellite body.
#[derive(Component)]
pub struct Satellite;

fn sphere_mesh(radius: f32, config: &SystemConfig) -> Result<Mesh> {
    let mut mesh = Sphere::new(radius)
        .mesh()
        .uv(config.geometry.mesh_sectors, config.geometry.mesh_stacks);
    // Normal maps need tangents.
    mesh.generate_tangents()?;
    Ok(mesh)
}

pub fn spawn_primary(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    textures: &TextureSet,
    layout: &SceneLayout,
    config: &SystemConfig,
    stop: &StopToken,
) -> Result<Entity> {
    let radius = config.geometry.primary_radius;
    let mesh = meshes.add(sphere_mesh(radius, config)?);
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        base_color_texture: Some(textures.primary_diffuse.clone()),
        normal_map_texture: Some(textures.primary_bump.clone()),
        // Specular map, inverted on load, drives roughness; metallic stays off.
        metallic_roughness_texture: Some(textures.primary_specular.clone()),
        perceptual_roughness: 1.0,
        metallic: 0.0,
        ..default()
    });
    let base = Transform::from_translation(screen_to_bevy(layout.primary));

    let entity = commands
        .spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            base,
            BasePlacement(base),
            ScreenPos(layout.primary),
            Body { radius },
            Primary,
            PeriodicDriver::new(
                "self-rotation",
                PeriodicAngle::self_rotation(config.animation.rotate_period_secs),
                stop.clone(),
            ),
            Name::new("Primary"),
        ))
        .id();
    Ok(entity)
}

pub fn spawn_satellite(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    textures: &TextureSet,
    layout: &SceneLayout,
    config: &SystemConfig,
    stop: &StopToken,
) -> Result<Entity> {
    let radius = config.geometry.satellite_radius;
    let mesh = meshes.add(sphere_mesh(radius, config)?);
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        base_color_texture: Some(textures.satellite_diffuse.clone()),
        perceptual_roughness: 1.0,
        metallic: 0.0,
        ..default()
    });
    let base = Transform::from_translation(screen_to_bevy(layout.satellite));

    let entity = commands
        .spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            base,
            BasePlacement(base),
            // Pivot is fixed at build; the driver rotates about it every frame.
            RotationPivot(screen_to_bevy(layout.pivot)),
            ScreenPos(layout.satellite),
            Body { radius },
            Satellite,
            PeriodicDriver::new(
                "revolution",
                PeriodicAngle::revolution(config.animation.revolution_period_secs),
                stop.clone(),
            ),
            Name::new("Satellite"),
        ))
        .id();
    Ok(entity)
}

/// Report where each body ended up once the scene is running
pub fn log_scene_bodies(bodies: Query<(&Name, &Body, &ScreenPos)>) {
    for (name, body, pos) in &bodies {
        info!(
            "{} radius {} at screen ({}, {}, {})",
            name, body.radius, pos.x, pos.y, pos.z
        );
    }
}
