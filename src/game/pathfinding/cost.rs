/// Jump feasibility and traversal costs.
///
/// Everything here is a pure function of its arguments. The constants come
/// from [`JumpProfile`], which systems read from `HunterSettings`; nothing in
/// this module looks at world state on its own.

use serde::{Deserialize, Serialize};
use crate::game::level::Platform;
use super::grid::NavGrid;
use super::types::GridCell;

/// Returned by [`platform_gap_between`] when either platform is missing.
pub const NO_PLATFORM_GAP: f32 = 9999.0;

/// Cost of one horizontal walking step on the grid.
pub const WALK_STEP_COST: f32 = 1.0;

/// Physical jump envelope of a hunter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct JumpProfile {
    /// Widest platform gap a single jump clears (world units).
    pub max_horizontal: f32,
    /// Largest downward displacement between platform tops (world units).
    pub max_drop: f32,
    /// Largest upward displacement, checked only for directional edges.
    pub max_rise: f32,
    /// Horizontal reach of a grid jump, in cells.
    pub grid_max_dx: i32,
    /// How many cells a grid jump may fall.
    pub grid_max_fall: i32,
    /// How many cells a grid jump may rise.
    pub grid_max_rise: i32,
}

impl Default for JumpProfile {
    fn default() -> Self {
        Self {
            max_horizontal: 240.0,
            max_drop: 160.0,
            max_rise: 160.0,
            grid_max_dx: 6,
            grid_max_fall: 6,
            grid_max_rise: 4,
        }
    }
}

/// Divisors for the platform edge cost `1 + gap/gap_divisor + climb/climb_divisor`.
///
/// `climb` is the upward displacement `from.y - to.y` (y grows downward);
/// drops are free.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeCostParams {
    pub gap_divisor: f32,
    pub climb_divisor: f32,
}

/// Edge weights used by the A* platform planner.
pub const ASTAR_EDGE_COST: EdgeCostParams = EdgeCostParams { gap_divisor: 120.0, climb_divisor: 180.0 };

/// Edge weights used by the Dijkstra platform planner.
pub const DIJKSTRA_EDGE_COST: EdgeCostParams = EdgeCostParams { gap_divisor: 100.0, climb_divisor: 150.0 };

// ============================================================================
// Platform Graph
// ============================================================================

/// Horizontal distance between the facing edges of two platforms, 0 when
/// their spans overlap on X.
pub fn platform_gap(a: &Platform, b: &Platform) -> f32 {
    let gap = if b.x > a.x { b.left() - a.right() } else { a.left() - b.right() };
    gap.max(0.0)
}

/// [`platform_gap`] by index, [`NO_PLATFORM_GAP`] if either index is out of range.
pub fn platform_gap_between(platforms: &[Platform], a: usize, b: usize) -> f32 {
    match (platforms.get(a), platforms.get(b)) {
        (Some(a), Some(b)) => platform_gap(a, b),
        _ => NO_PLATFORM_GAP,
    }
}

/// Whether a hunter on `from` can reach `to` in one jump.
///
/// Only the downward displacement is bounded. Callers that want an undirected
/// edge test both `can_jump(a, b)` and `can_jump(b, a)`.
pub fn can_jump(from: &Platform, to: &Platform, profile: &JumpProfile) -> bool {
    platform_gap(from, to) <= profile.max_horizontal && to.y - from.y <= profile.max_drop
}

/// [`can_jump`] with the rise bounded as well, so the move is executable in
/// the direction actually travelled.
pub fn can_traverse(from: &Platform, to: &Platform, profile: &JumpProfile) -> bool {
    can_jump(from, to, profile) && from.y - to.y <= profile.max_rise
}

/// Cost of moving from platform `from` to platform `to`. Penalizes the gap
/// and any climb, never a drop.
pub fn platform_edge_cost(from: &Platform, to: &Platform, params: &EdgeCostParams) -> f32 {
    let gap = platform_gap(from, to);
    let climb = (from.y - to.y).max(0.0);
    1.0 + gap / params.gap_divisor + climb / params.climb_divisor
}

// ============================================================================
// Grid
// ============================================================================

/// Whether a displacement of `(dx, dy)` cells lies inside the jump envelope.
/// Positive `dy` is a fall.
#[inline]
pub fn grid_jump_in_reach(dx: i32, dy: i32, profile: &JumpProfile) -> bool {
    dx.abs() <= profile.grid_max_dx && dy <= profile.grid_max_fall && dy >= -profile.grid_max_rise
}

/// Whether a hunter standing on `from` can jump onto `to`.
pub fn can_grid_jump(grid: &NavGrid, from: GridCell, to: GridCell, profile: &JumpProfile) -> bool {
    grid_jump_in_reach(to.x - from.x, to.y - from.y, profile) && grid.is_walkable(to)
}

/// Cost of a grid jump of `(dx, dy)` cells. Short, level and falling jumps
/// are cheapest; each cell of rise adds half a step.
#[inline]
pub fn grid_jump_cost(dx: i32, dy: i32) -> f32 {
    2.0 + 0.3 * dx.abs() as f32 + 0.5 * (-dy).max(0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> JumpProfile {
        JumpProfile::default()
    }

    #[test]
    fn gap_is_symmetric_and_zero_on_overlap() {
        let a = Platform::new(0.0, 300.0, 100.0);
        let b = Platform::new(150.0, 300.0, 100.0);
        let c = Platform::new(50.0, 200.0, 100.0);

        assert_eq!(platform_gap(&a, &b), 50.0);
        assert_eq!(platform_gap(&b, &a), 50.0);
        assert_eq!(platform_gap(&a, &c), 0.0);
        assert_eq!(platform_gap(&c, &a), 0.0);
    }

    #[test]
    fn gap_between_missing_platforms_is_sentinel() {
        let platforms = [Platform::new(0.0, 300.0, 100.0)];
        assert_eq!(platform_gap_between(&platforms, 0, 3), NO_PLATFORM_GAP);
        assert_eq!(platform_gap_between(&platforms, 9, 0), NO_PLATFORM_GAP);
        assert_eq!(platform_gap_between(&platforms, 0, 0), 0.0);
    }

    #[test]
    fn can_jump_bounds_gap_and_drop() {
        let p = profile();
        let from = Platform::new(0.0, 300.0, 100.0);

        assert!(can_jump(&from, &Platform::new(340.0, 300.0, 50.0), &p));
        assert!(!can_jump(&from, &Platform::new(341.0, 300.0, 50.0), &p));
        assert!(can_jump(&from, &Platform::new(150.0, 460.0, 50.0), &p));
        assert!(!can_jump(&from, &Platform::new(150.0, 461.0, 50.0), &p));
    }

    #[test]
    fn can_jump_is_asymmetric_on_height() {
        let p = profile();
        let high = Platform::new(0.0, 100.0, 100.0);
        let low = Platform::new(150.0, 400.0, 100.0);

        // Dropping 300 is too far, but "jumping" from low to high passes the
        // drop-only check.
        assert!(!can_jump(&high, &low, &p));
        assert!(can_jump(&low, &high, &p));
        assert!(!can_traverse(&low, &high, &p));
    }

    #[test]
    fn edge_cost_penalizes_gap_and_climb_only() {
        let a = Platform::new(0.0, 300.0, 100.0);
        let level = Platform::new(220.0, 300.0, 100.0);
        let lower = Platform::new(100.0, 480.0, 100.0);
        let higher = Platform::new(100.0, 120.0, 100.0);

        assert_eq!(platform_edge_cost(&a, &level, &ASTAR_EDGE_COST), 2.0);
        assert_eq!(platform_edge_cost(&a, &lower, &ASTAR_EDGE_COST), 1.0);
        assert_eq!(platform_edge_cost(&a, &higher, &ASTAR_EDGE_COST), 2.0);
        assert!((platform_edge_cost(&a, &level, &DIJKSTRA_EDGE_COST) - 2.2).abs() < 1e-5);
        assert!((platform_edge_cost(&a, &higher, &DIJKSTRA_EDGE_COST) - 2.2).abs() < 1e-5);
    }

    #[test]
    fn climbing_costs_more_than_dropping_over_the_same_gap() {
        let from = Platform::new(0.0, 300.0, 100.0);
        let up = Platform::new(200.0, 200.0, 100.0);
        let down = Platform::new(200.0, 400.0, 100.0);

        for params in [ASTAR_EDGE_COST, DIJKSTRA_EDGE_COST] {
            let climb = platform_edge_cost(&from, &up, &params);
            let drop = platform_edge_cost(&from, &down, &params);
            assert!(climb > drop, "climb {climb} should cost more than drop {drop}");
            assert!((drop - (1.0 + 100.0 / params.gap_divisor)).abs() < 1e-5);
        }
    }

    #[test]
    fn grid_envelope_limits() {
        let p = profile();
        assert!(grid_jump_in_reach(6, 6, &p));
        assert!(grid_jump_in_reach(-6, -4, &p));
        assert!(!grid_jump_in_reach(7, 0, &p));
        assert!(!grid_jump_in_reach(0, 7, &p));
        assert!(!grid_jump_in_reach(0, -5, &p));
    }

    #[test]
    fn grid_jump_cost_prefers_level_and_falling() {
        assert_eq!(grid_jump_cost(0, 0), 2.0);
        assert!((grid_jump_cost(2, 3) - 2.6).abs() < 1e-5);
        assert!((grid_jump_cost(-2, -4) - 4.6).abs() < 1e-5);
        assert!(grid_jump_cost(1, 2) < grid_jump_cost(1, -2));
    }
}
