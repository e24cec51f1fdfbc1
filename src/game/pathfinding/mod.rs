mod types;
mod cost;
mod grid;
mod search;
mod grid_path;
mod platform_graph;
mod steering;
mod systems;


// ============================================================================
// PUBLIC API
// ============================================================================

pub use types::{GridCell, CellState, PlannerKind, OpenSetKind, PlannerOptions, PathRequest};
pub use cost::{
    JumpProfile, EdgeCostParams, ASTAR_EDGE_COST, DIJKSTRA_EDGE_COST, NO_PLATFORM_GAP, WALK_STEP_COST,
    platform_gap, platform_gap_between, can_jump, can_traverse, platform_edge_cost,
    grid_jump_in_reach, can_grid_jump, grid_jump_cost,
};
pub use grid::{NavGrid, GridSettings};
pub use search::{SearchSpace, Neighbors, astar, dijkstra};
pub use grid_path::{GridSpace, find_grid_path, find_grid_path_cells};
pub use platform_graph::{PlatformGraph, find_platform_path, find_optimal_hunter_path, plan_platform_route};
pub use steering::{Heading, MoveHint, RouteOutcome, find_hunter_path};
pub use systems::plan_hunter_path;

use bevy::prelude::*;
use crate::game::simulation::HunterSet;

pub struct PathfindingPlugin;

impl Plugin for PathfindingPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PathRequest>();
        app.init_resource::<NavGrid>();
        app.add_systems(FixedUpdate, (
            systems::rebuild_nav_grid,
            systems::invalidate_stale_paths,
        ).chain().in_set(HunterSet::Index));
        app.add_systems(FixedUpdate, (
            systems::process_path_requests,
            systems::prune_reached_waypoints,
            systems::update_move_hints,
        ).chain().in_set(HunterSet::Plan));
    }
}
