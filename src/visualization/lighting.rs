//! Lighting setup

use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;

use crate::config::{LightingConfig, SystemConfig};
use crate::core::SceneLayout;
use crate::core::space::screen_to_bevy;

/// Marker component for the sun point light
#[derive(Component)]
pub struct SunLight;

/// Keep the night side faintly visible
pub fn insert_ambient_light(mut commands: Commands, config: Res<SystemConfig>) {
    commands.insert_resource(GlobalAmbientLight {
        brightness: config.lighting.ambient_brightness,
        ..default()
    });
}

pub fn spawn_sun_light(commands: &mut Commands, layout: &SceneLayout, config: &LightingConfig) {
    commands.spawn((
        PointLight {
            color: Color::WHITE,
            intensity: config.intensity,
            range: config.range,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(screen_to_bevy(layout.light)),
        SunLight,
        Name::new("Sun Light"),
    ));
}

pub fn background_color(config: &LightingConfig) -> Color {
    let [r, g, b] = config.background_rgb;
    Color::srgb_u8(r, g, b)
}
