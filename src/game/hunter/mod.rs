/// Hunter agents: per-entity state, the behavior tree and the tick driver.
///
/// The decision layer only sets intent (state label, path requests). Paths
/// are planned in `pathfinding` and locomotion belongs to the embedding game.

mod components;
mod brain;
mod systems;

pub use components::{Hunter, HunterPath, HunterState, CachedTarget};
pub use brain::{HunterBlackboard, HunterTree, build_hunter_tree};

use bevy::prelude::*;
use crate::game::config::HunterSettings;
use crate::game::simulation::HunterSet;

pub struct HunterPlugin;

impl Plugin for HunterPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HunterSettings>();
        app.init_resource::<HunterTree>();
        app.add_systems(FixedUpdate, (
            systems::cache_targets,
            systems::tick_recalc_timers,
        ).chain().in_set(HunterSet::Sense));
        app.add_systems(FixedUpdate, systems::evaluate_behavior.in_set(HunterSet::Decide));
    }
}
