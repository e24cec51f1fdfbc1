use bevy::prelude::*;
use crate::game::level::Body;
use crate::game::pathfinding::{GridCell, MoveHint};

/// Behavior state reported by the decision layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HunterState {
    #[default]
    Idle,
    Attacking,
    FollowingPath,
    CalculatingPath,
}

impl HunterState {
    /// Diagnostic label shown above the hunter.
    pub fn label(self) -> &'static str {
        match self {
            HunterState::Idle => "IDLE",
            HunterState::Attacking => "ATTACKING",
            HunterState::FollowingPath => "FOLLOWING_PATH",
            HunterState::CalculatingPath => "CALCULATING_PATH",
        }
    }
}

/// Route a hunter is following. The first waypoint is where the hunter
/// currently stands; the route is exhausted once only that one remains.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum HunterPath {
    #[default]
    None,
    /// Cells of the navigation grid, valid for one grid revision.
    Grid(Vec<GridCell>),
    /// Platform indices, valid for one platform list generation.
    Platforms(Vec<usize>),
}

impl HunterPath {
    pub fn waypoint_count(&self) -> usize {
        match self {
            HunterPath::None => 0,
            HunterPath::Grid(cells) => cells.len(),
            HunterPath::Platforms(indices) => indices.len(),
        }
    }

    pub fn is_grid(&self) -> bool {
        matches!(self, HunterPath::Grid(_))
    }

    pub fn is_platforms(&self) -> bool {
        matches!(self, HunterPath::Platforms(_))
    }
}

/// Snapshot of the pursued entity taken at the start of the tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CachedTarget {
    pub entity: Entity,
    pub body: Body,
}

/// Per-agent AI state. Each hunter owns its own path, cooldown and label;
/// hunters never read each other's state.
#[derive(Component, Clone, Debug, Default)]
#[require(Body, MoveHint)]
pub struct Hunter {
    pub cached_target: Option<CachedTarget>,
    /// Ticks left until the next replan is allowed.
    pub recalc_timer: u32,
    pub path: HunterPath,
    pub state: HunterState,
    /// World position of the next waypoint, for locomotion.
    pub current_target: Option<Vec2>,
}

impl Hunter {
    pub fn clear_path(&mut self) {
        self.path = HunterPath::None;
        self.current_target = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_diagnostic_strings() {
        assert_eq!(HunterState::Attacking.label(), "ATTACKING");
        assert_eq!(HunterState::FollowingPath.label(), "FOLLOWING_PATH");
        assert_eq!(HunterState::CalculatingPath.label(), "CALCULATING_PATH");
        assert_eq!(HunterState::default().label(), "IDLE");
    }

    #[test]
    fn waypoint_count_per_variant() {
        assert_eq!(HunterPath::None.waypoint_count(), 0);
        assert_eq!(HunterPath::Platforms(vec![3, 1]).waypoint_count(), 2);
        assert_eq!(HunterPath::Grid(vec![GridCell::new(0, 0)]).waypoint_count(), 1);
    }
}
