/// Fixed-tick driver for the hunter AI.
///
/// Every AI system runs in `FixedUpdate` inside one of the [`HunterSet`]
/// stages, which are chained so a tick always senses, indexes, decides and
/// plans in that order.

use bevy::prelude::*;

// System sets for organizing execution order
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum HunterSet {
    Sense,  // Tick counter, target caching, cooldowns
    Index,  // Grid rebuild and stale path invalidation
    Decide, // Behavior tree evaluation
    Plan,   // Path requests, waypoint pruning, movement hints
}

/// Number of fixed ticks simulated so far.
#[derive(Resource, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimTick(pub u64);

impl SimTick {
    pub fn increment(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimTick>();

        app.configure_sets(FixedUpdate, (
            HunterSet::Sense,
            HunterSet::Index,
            HunterSet::Decide,
            HunterSet::Plan,
        ).chain());

        app.add_systems(FixedUpdate, increment_sim_tick.in_set(HunterSet::Sense));
    }
}

pub fn increment_sim_tick(mut tick: ResMut<SimTick>) {
    tick.increment();
}
