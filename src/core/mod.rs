//! Core module
//!
//! Coordinate spaces, placement formulas and the scene lifecycle state
//! shared by every other module.

pub mod layout;
pub mod space;
pub mod state;

pub use layout::SceneLayout;
pub use state::SceneState;
