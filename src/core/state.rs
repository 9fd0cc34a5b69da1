//! Scene lifecycle state.

use bevy::prelude::*;

/// `Loading` waits for textures and a known viewport; `Running` animates.
#[derive(States, Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneState {
    #[default]
    Loading,
    Running,
}
