/// Coarse routing over platforms treated as graph nodes.
///
/// Nodes are platform indices; `a` and `b` are connected when a jump between
/// them is feasible (see [`PlatformGraph::connects`]). Two planners share the
/// graph: A* ([`find_platform_path`]) and bounded Dijkstra
/// ([`find_optimal_hunter_path`]). They agree on reachability but use
/// slightly different edge weights, so the chosen routes may differ.

use bevy::prelude::*;
use crate::game::fixed_math::{cost, FixedNum};
use crate::game::level::Platform;
use super::cost::{can_jump, can_traverse, platform_edge_cost, EdgeCostParams, ASTAR_EDGE_COST, DIJKSTRA_EDGE_COST};
use super::search::{astar, dijkstra, Neighbors, SearchSpace};
use super::types::{PlannerKind, PlannerOptions};

/// Platform list viewed as a graph for one planner call.
pub struct PlatformGraph<'a> {
    pub platforms: &'a [Platform],
    pub options: &'a PlannerOptions,
    pub edge_cost: EdgeCostParams,
}

impl<'a> PlatformGraph<'a> {
    pub fn new(platforms: &'a [Platform], options: &'a PlannerOptions, edge_cost: EdgeCostParams) -> Self {
        Self { platforms, options, edge_cost }
    }

    /// Whether a hunter on `from` may move to `to`.
    ///
    /// By default the edge is undirected: `can_jump(from, to) || can_jump(to, from)`.
    /// With `directional_edges` the move must be executable from `from`,
    /// i.e. within both the drop and the rise limit.
    pub fn connects(&self, from: usize, to: usize) -> bool {
        let (Some(a), Some(b)) = (self.platforms.get(from), self.platforms.get(to)) else {
            return false;
        };
        let profile = &self.options.profile;
        if self.options.directional_edges {
            can_traverse(a, b, profile)
        } else {
            can_jump(a, b, profile) || can_jump(b, a, profile)
        }
    }
}

impl SearchSpace for PlatformGraph<'_> {
    type Node = usize;

    fn neighbors(&self, node: usize, out: &mut Neighbors<usize>) {
        let Some(from) = self.platforms.get(node) else { return };
        for (j, to) in self.platforms.iter().enumerate() {
            if j != node && self.connects(node, j) {
                out.push((j, cost(platform_edge_cost(from, to, &self.edge_cost))));
            }
        }
    }

    /// Euclidean distance between top-center points.
    fn heuristic(&self, node: usize, goal: usize) -> FixedNum {
        match (self.platforms.get(node), self.platforms.get(goal)) {
            (Some(a), Some(b)) => cost(a.top_center().distance(b.top_center())),
            _ => FixedNum::MAX,
        }
    }

    fn node_count(&self) -> usize {
        self.platforms.len()
    }
}

fn endpoints_valid(platforms: &[Platform], start: usize, target: usize) -> bool {
    if start >= platforms.len() || target >= platforms.len() {
        warn!(
            "[PATHFINDING] Platform index out of range: {} -> {} ({} platforms)",
            start,
            target,
            platforms.len()
        );
        return false;
    }
    true
}

/// A* platform route from `start` to `target`, both ends included.
///
/// `start == target` yields `[start]`; an out-of-range index or a disjoint
/// graph yields `None`.
pub fn find_platform_path(platforms: &[Platform], start: usize, target: usize, options: &PlannerOptions) -> Option<Vec<usize>> {
    if !endpoints_valid(platforms, start, target) {
        return None;
    }
    if start == target {
        return Some(vec![start]);
    }

    let graph = PlatformGraph::new(platforms, options, ASTAR_EDGE_COST);
    astar(&graph, start, target, options.open_set)
}

/// Dijkstra platform route with the same contract as [`find_platform_path`].
///
/// `jump_budget` is reserved for limiting the number of consecutive jumps a
/// route may require; it is accepted and logged but does not yet constrain
/// the search.
pub fn find_optimal_hunter_path(
    platforms: &[Platform],
    start: usize,
    target: usize,
    jump_budget: Option<u32>,
    options: &PlannerOptions,
) -> Option<Vec<usize>> {
    if !endpoints_valid(platforms, start, target) {
        return None;
    }
    if start == target {
        return Some(vec![start]);
    }
    if let Some(budget) = jump_budget {
        trace!("[PATHFINDING] Jump budget {} requested for {} -> {}", budget, start, target);
    }

    let graph = PlatformGraph::new(platforms, options, DIJKSTRA_EDGE_COST);
    dijkstra(&graph, start, target)
}

/// Routes with whichever planner `options.planner` selects.
pub fn plan_platform_route(platforms: &[Platform], start: usize, target: usize, options: &PlannerOptions) -> Option<Vec<usize>> {
    match options.planner {
        PlannerKind::AStar => find_platform_path(platforms, start, target, options),
        PlannerKind::Dijkstra => find_optimal_hunter_path(platforms, start, target, None, options),
    }
}
