/// Level data consumed by the hunter AI: platforms, bodies and the camera window.
///
/// The level itself (spawning, physics, collision) belongs to the game; this
/// module only defines the shapes the AI reads each tick.

mod types;
mod resources;
mod generation;

pub use types::{Platform, Body, PursuitTarget, PLATFORM_HEIGHT, find_platform_index_at_x};
pub use resources::{Platforms, CameraWindow};
pub use generation::{generate_platform_strip, StripParams};

use bevy::prelude::*;

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Platforms>();
        app.init_resource::<CameraWindow>();
    }
}
