/// One-step movement hints for hunters.
///
/// [`find_hunter_path`] does not store anything; it resolves both bodies to
/// platforms, asks the platform planner for a route and reduces the result to
/// a horizontal heading plus an optional next platform.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use crate::game::level::{find_platform_index_at_x, Body, Platform};
use super::platform_graph::plan_platform_route;
use super::types::PlannerOptions;

/// Horizontal heading handed to locomotion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    Left,
    #[default]
    Idle,
    Right,
}

impl Heading {
    /// -1, 0 or 1.
    pub fn sign(self) -> i8 {
        match self {
            Heading::Left => -1,
            Heading::Idle => 0,
            Heading::Right => 1,
        }
    }

    /// Sign of `delta` as a heading: Idle when it is exactly zero (or NaN).
    pub fn toward(delta: f32) -> Self {
        if delta > 0.0 {
            Heading::Right
        } else if delta < 0.0 {
            Heading::Left
        } else {
            Heading::Idle
        }
    }
}

/// How a [`MoveHint`] was produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteOutcome {
    /// No platforms or no target: neutral hint.
    #[default]
    Neutral,
    /// Hunter and target stand on the same platform.
    SamePlatform,
    /// A multi-step platform route exists; `next` is its second node.
    Routed,
    /// Both bodies resolved to platforms but the graph has no route.
    Unreachable,
    /// At least one body is not above any platform.
    NoPlatform,
}

/// Result of [`find_hunter_path`].
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveHint {
    pub dir: Heading,
    /// Next platform on the route, if one was planned.
    pub next: Option<usize>,
    /// Whether the hunter should actively pursue. Always true when a route
    /// exists or the target shares the hunter's platform; otherwise true only
    /// inside the engage radius.
    pub engaged: bool,
    pub route: RouteOutcome,
}

/// Computes a movement hint for `hunter` chasing `target`.
///
/// When no route is found the heading still points at the target; callers
/// decide what to do with a disengaged hint.
pub fn find_hunter_path(
    hunter: &Body,
    target: &Body,
    platforms: &[Platform],
    options: &PlannerOptions,
    engage_radius: f32,
) -> MoveHint {
    if platforms.is_empty() {
        return MoveHint::default();
    }

    let dx = target.x - hunter.x;
    let dir = Heading::toward(dx);
    let hunter_idx = find_platform_index_at_x(platforms, hunter.x, hunter.w);
    let target_idx = find_platform_index_at_x(platforms, target.x, target.w);

    if let (Some(h), Some(t)) = (hunter_idx, target_idx) {
        if h == t {
            return MoveHint { dir, next: None, engaged: true, route: RouteOutcome::SamePlatform };
        }

        if let Some(path) = plan_platform_route(platforms, h, t, options) {
            if let Some(&next) = path.get(1) {
                let next_x = platforms[next].center_x();
                return MoveHint {
                    dir: Heading::toward(next_x - hunter.x),
                    next: Some(next),
                    engaged: true,
                    route: RouteOutcome::Routed,
                };
            }
        }
    }

    let route = if hunter_idx.is_none() || target_idx.is_none() {
        trace!(
            "[PATHFINDING] No containing platform (hunter {:?}, target {:?})",
            hunter_idx, target_idx
        );
        RouteOutcome::NoPlatform
    } else {
        debug!("[PATHFINDING] Target unreachable: {:?} -> {:?}", hunter_idx, target_idx);
        RouteOutcome::Unreachable
    };

    let dist = Vec2::new(hunter.x, hunter.y).distance(Vec2::new(target.x, target.y));
    MoveHint { dir, next: None, engaged: dist < engage_radius, route }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENGAGE: f32 = 420.0;

    fn body_on(platform: &Platform, center_x: f32) -> Body {
        Body::standing_on(platform, center_x, 20.0, 40.0)
    }

    #[test]
    fn heading_follows_sign_of_delta() {
        assert_eq!(Heading::toward(12.5), Heading::Right);
        assert_eq!(Heading::toward(-0.5), Heading::Left);
        assert_eq!(Heading::toward(0.0), Heading::Idle);
        assert_eq!(Heading::toward(f32::NAN), Heading::Idle);
        assert_eq!(Heading::toward(-3.0).sign(), -1);
    }

    #[test]
    fn same_platform_directly_above_target_is_idle() {
        let platforms = [Platform::new(0.0, 300.0, 400.0)];
        let hunter = body_on(&platforms[0], 200.0);
        let target = Body { y: hunter.y - 60.0, ..hunter };

        let hint = find_hunter_path(&hunter, &target, &platforms, &PlannerOptions::default(), ENGAGE);
        assert_eq!(hint.dir, Heading::Idle);
        assert_eq!(hint.dir.sign(), 0);
        assert_eq!(hint.route, RouteOutcome::SamePlatform);
        assert!(hint.engaged);
    }

    #[test]
    fn same_platform_points_at_target() {
        let platforms = [Platform::new(0.0, 300.0, 400.0)];
        let hunter = body_on(&platforms[0], 300.0);
        let target = body_on(&platforms[0], 50.0);

        let hint = find_hunter_path(&hunter, &target, &platforms, &PlannerOptions::default(), ENGAGE);
        assert_eq!(hint.dir, Heading::Left);
        assert_eq!(hint.next, None);
        assert_eq!(hint.route, RouteOutcome::SamePlatform);
        assert!(hint.engaged);
    }

    #[test]
    fn routed_hint_heads_for_next_platform_center() {
        // Target is right of the hunter, but the route climbs onto a ledge
        // whose center is behind the hunter. The last step rises 200 units.
        let platforms = [
            Platform::new(0.0, 400.0, 400.0),
            Platform::new(100.0, 250.0, 400.0),
            Platform::new(700.0, 50.0, 100.0),
        ];
        let hunter = body_on(&platforms[0], 350.0);
        let target = body_on(&platforms[2], 750.0);

        let directional = PlannerOptions { directional_edges: true, ..Default::default() };
        let hint = find_hunter_path(&hunter, &target, &platforms, &directional, ENGAGE);
        assert_eq!(hint.route, RouteOutcome::Unreachable);
        assert_eq!(hint.dir, Heading::Right);

        let hint = find_hunter_path(&hunter, &target, &platforms, &PlannerOptions::default(), ENGAGE);
        assert_eq!(hint.route, RouteOutcome::Routed);
        assert_eq!(hint.next, Some(1));
        assert_eq!(hint.dir, Heading::Left);
        assert!(hint.engaged);
    }

    #[test]
    fn unreachable_target_engages_only_when_close() {
        let platforms = [Platform::new(0.0, 300.0, 100.0), Platform::new(400.0, 300.0, 100.0)];
        let hunter = body_on(&platforms[0], 50.0);
        let near = body_on(&platforms[1], 450.0);

        let hint = find_hunter_path(&hunter, &near, &platforms, &PlannerOptions::default(), ENGAGE);
        assert_eq!(hint.route, RouteOutcome::Unreachable);
        assert_eq!(hint.dir, Heading::Right);
        assert_eq!(hint.next, None);
        assert!(hint.engaged);

        let hint = find_hunter_path(&hunter, &near, &platforms, &PlannerOptions::default(), 100.0);
        assert!(!hint.engaged);
        assert_eq!(hint.dir, Heading::Right);
    }

    #[test]
    fn body_over_a_gap_reports_missing_platform() {
        let platforms = [Platform::new(0.0, 300.0, 100.0), Platform::new(200.0, 300.0, 100.0)];
        let hunter = Body::new(140.0, 260.0, 20.0, 40.0);
        let target = body_on(&platforms[1], 250.0);

        let hint = find_hunter_path(&hunter, &target, &platforms, &PlannerOptions::default(), ENGAGE);
        assert_eq!(hint.route, RouteOutcome::NoPlatform);
        assert_eq!(hint.dir, Heading::Right);
    }

    #[test]
    fn empty_level_is_neutral() {
        let hunter = Body::new(0.0, 0.0, 20.0, 40.0);
        let hint = find_hunter_path(&hunter, &hunter, &[], &PlannerOptions::default(), ENGAGE);
        assert_eq!(hint, MoveHint::default());
        assert_eq!(hint.dir.sign(), 0);
    }
}
