use bevy::prelude::*;
use serde::{Serialize, Deserialize};
use super::cost::JumpProfile;

/// A grid cell coordinate. Signed so jump offsets can be applied without
/// wrapping; anything outside the grid is simply not walkable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

impl GridCell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

/// Classification of a grid cell.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Hazard surface (spikes).
    Blocked = 0,
    /// Platform surface a hunter can stand on.
    Walkable = 1,
    /// Open space a hunter can jump through.
    #[default]
    Air = 2,
}

/// Which shortest-path routine plans platform routes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlannerKind {
    /// A* with a Euclidean heuristic and the 120/180 edge weights.
    #[default]
    AStar,
    /// Bounded-round Dijkstra with the 100/150 edge weights.
    Dijkstra,
}

/// Open set representation used by A*.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpenSetKind {
    /// Unordered list scanned for the minimum f-score. Ties go to the entry
    /// that has been in the list longest.
    #[default]
    Scan,
    /// Binary heap with lazy deletion. Ties go to the earliest push, which can
    /// differ from `Scan` when a node's score is improved while queued.
    Heap,
}

/// Everything a planner needs besides the geometry it searches.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlannerOptions {
    pub profile: JumpProfile,
    pub planner: PlannerKind,
    pub open_set: OpenSetKind,
    /// Validate platform edges against the direction of travel instead of
    /// accepting `can_jump(a, b) || can_jump(b, a)`.
    pub directional_edges: bool,
}

/// Asks the path request processor to replan for a hunter.
#[derive(Message, Debug, Clone, Copy)]
pub struct PathRequest {
    pub entity: Entity,
}
