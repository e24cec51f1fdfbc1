/// Cell-level A* over the navigation grid, including jump arcs.

use bevy::prelude::*;
use crate::game::fixed_math::{cost, FixedNum};
use super::cost::{can_grid_jump, grid_jump_cost, JumpProfile, WALK_STEP_COST};
use super::grid::NavGrid;
use super::search::{astar, Neighbors, SearchSpace};
use super::types::{GridCell, OpenSetKind};

/// The grid seen as a graph: walking steps to the left and right plus every
/// jump inside the envelope that lands on a Walkable cell.
pub struct GridSpace<'a> {
    pub grid: &'a NavGrid,
    pub profile: &'a JumpProfile,
}

impl SearchSpace for GridSpace<'_> {
    type Node = GridCell;

    fn neighbors(&self, node: GridCell, out: &mut Neighbors<GridCell>) {
        for dx in [-1, 1] {
            let next = node.offset(dx, 0);
            if self.grid.is_walkable(next) {
                out.push((next, cost(WALK_STEP_COST)));
            }
        }

        let p = self.profile;
        for dx in -p.grid_max_dx..=p.grid_max_dx {
            for dy in -p.grid_max_rise..=p.grid_max_fall {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let next = node.offset(dx, dy);
                if can_grid_jump(self.grid, node, next, p) {
                    out.push((next, cost(grid_jump_cost(dx, dy))));
                }
            }
        }
    }

    /// Manhattan distance in cells. Cheap jump edges can cover several cells
    /// for less than their Manhattan length, so this is not strictly
    /// admissible; routes are near-optimal rather than optimal.
    fn heuristic(&self, node: GridCell, goal: GridCell) -> FixedNum {
        FixedNum::from_num((node.x - goal.x).abs() + (node.y - goal.y).abs())
    }

    fn node_count(&self) -> usize {
        self.grid.cell_count()
    }
}

/// Grid path between two cells. Both must be Walkable; otherwise, or when
/// no route exists, returns `None`. The first cell of the result is `start`.
pub fn find_grid_path_cells(
    grid: &NavGrid,
    start: GridCell,
    goal: GridCell,
    profile: &JumpProfile,
    open_set: OpenSetKind,
) -> Option<Vec<GridCell>> {
    if !grid.is_built() {
        return None;
    }
    if !grid.is_walkable(start) || !grid.is_walkable(goal) {
        trace!("[PATHFINDING] Grid endpoints not walkable: {:?} -> {:?}", start, goal);
        return None;
    }

    let space = GridSpace { grid, profile };
    astar(&space, start, goal, open_set)
}

/// Grid path between two world positions (usually bodies' feet).
pub fn find_grid_path(
    grid: &NavGrid,
    start: Vec2,
    goal: Vec2,
    profile: &JumpProfile,
    open_set: OpenSetKind,
) -> Option<Vec<GridCell>> {
    find_grid_path_cells(grid, grid.world_to_grid(start), grid.world_to_grid(goal), profile, open_set)
}
