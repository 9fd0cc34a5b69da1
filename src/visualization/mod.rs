//! Visualization module
//!
//! This module loads textures and assembles the renderable scene: the two
//! bodies, the sun light and the camera.

use bevy::prelude::*;

pub mod bodies;
pub mod lighting;
pub mod scene;
pub mod textures;

pub use bodies::log_scene_bodies;
pub use lighting::insert_ambient_light;
pub use scene::assemble_scene;
pub use textures::{TextureStatus, exit_on_texture_failure, load_textures, poll_texture_loads};

use crate::core::SceneState;

/// Plugin for scene assembly and texture loading
pub struct VisualizationPlugin;

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TextureStatus>()
            .add_systems(Startup, (load_textures, insert_ambient_light))
            .add_systems(
                Update,
                (
                    poll_texture_loads,
                    (exit_on_texture_failure, assemble_scene).after(poll_texture_loads),
                )
                    .run_if(in_state(SceneState::Loading)),
            )
            .add_systems(OnEnter(SceneState::Running), log_scene_bodies);
    }
}
