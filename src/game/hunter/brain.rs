/// The hunter behavior tree.
///
/// The tree is built once and stored in [`HunterTree`]. Each tick every
/// hunter copies what the leaves need into an owned [`HunterBlackboard`],
/// ticks the tree against it and writes the results back, so the tree never
/// borrows ECS data.

use bevy::prelude::*;
use behavior_tree::{Action, Behavior, Condition, Selector, Sequence, Status};
use crate::game::config::DecisionSettings;
use crate::game::level::Body;
use super::components::HunterState;

/// Per-hunter view the behavior tree reads and writes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HunterBlackboard {
    pub body: Body,
    pub target: Option<Body>,
    /// Waypoints left on the current path, the hunter's own cell or platform included.
    pub waypoints: usize,
    pub recalc_timer: u32,
    pub state: HunterState,
    pub decision: DecisionSettings,
    /// Set by the replan leaf; the caller turns it into a path request.
    pub replan_requested: bool,
}

impl HunterBlackboard {
    pub fn new(body: Body, decision: DecisionSettings) -> Self {
        Self {
            body,
            target: None,
            waypoints: 0,
            recalc_timer: 0,
            state: HunterState::Idle,
            decision,
            replan_requested: false,
        }
    }

    /// Target within the attack box, measured between the bodies' top-left corners.
    pub fn target_in_attack_range(&self) -> bool {
        self.target.is_some_and(|t| {
            (self.body.x - t.x).abs() < self.decision.attack_range_x
                && (self.body.y - t.y).abs() < self.decision.attack_range_y
        })
    }
}

type Node = Box<dyn Behavior<HunterBlackboard>>;

fn when(check: impl Fn(&HunterBlackboard) -> bool + Send + Sync + 'static) -> Node {
    Box::new(Condition::new(check))
}

fn set_state(state: HunterState) -> Node {
    Box::new(Action::new(move |bb: &mut HunterBlackboard| {
        bb.state = state;
        Status::Success
    }))
}

fn attack() -> Node {
    Box::new(Sequence::new(vec![
        when(HunterBlackboard::target_in_attack_range),
        set_state(HunterState::Attacking),
    ]))
}

fn follow_path() -> Node {
    Box::new(Sequence::new(vec![
        when(|bb| bb.waypoints > 1),
        set_state(HunterState::FollowingPath),
    ]))
}

fn replan() -> Node {
    Box::new(Sequence::new(vec![
        when(|bb| bb.target.is_some() && bb.recalc_timer == 0),
        Box::new(Action::new(|bb: &mut HunterBlackboard| {
            bb.state = HunterState::CalculatingPath;
            bb.recalc_timer = bb.decision.recalc_interval;
            bb.replan_requested = true;
            Status::Success
        })),
    ]))
}

/// Builds the four-branch priority tree:
/// attack, follow the current path, replan, idle.
pub fn build_hunter_tree() -> Selector<HunterBlackboard> {
    Selector::new(vec![
        attack(),
        follow_path(),
        replan(),
        set_state(HunterState::Idle),
    ])
}

/// Shared hunter behavior tree.
#[derive(Resource)]
pub struct HunterTree(pub Selector<HunterBlackboard>);

impl Default for HunterTree {
    fn default() -> Self {
        Self(build_hunter_tree())
    }
}

impl HunterTree {
    pub fn evaluate(&self, bb: &mut HunterBlackboard) -> Status {
        bb.replan_requested = false;
        self.0.tick(bb)
    }
}
