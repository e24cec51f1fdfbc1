use bevy::prelude::*;

pub mod config;
pub mod fixed_math;
pub mod level;
pub mod pathfinding;
pub mod hunter;
pub mod simulation;
pub mod debug;
mod demo;

use config::GameConfigPlugin;
use level::LevelPlugin;
use pathfinding::PathfindingPlugin;
use hunter::HunterPlugin;
use simulation::SimulationPlugin;
use debug::DebugOverlayPlugin;

pub use demo::DemoPlugin;

/// The AI on its own: tick driver, level resources, planners and hunters.
/// Runs headless; insert `HunterSettings` to override the defaults.
pub struct HunterCorePlugin;

impl Plugin for HunterCorePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            SimulationPlugin,
            LevelPlugin,
            PathfindingPlugin,
            HunterPlugin,
        ));
    }
}

/// The AI plus config files and the diagnostics overlay. Needs the default
/// Bevy plugins (assets, input, gizmos, text).
pub struct HunterGamePlugin;

impl Plugin for HunterGamePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            HunterCorePlugin,
            GameConfigPlugin,
            DebugOverlayPlugin,
        ));
    }
}
