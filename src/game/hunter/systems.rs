use bevy::prelude::*;
use crate::game::config::HunterSettings;
use crate::game::level::{Body, PursuitTarget};
use crate::game::pathfinding::PathRequest;
use crate::game::simulation::SimTick;
use super::brain::{HunterBlackboard, HunterTree};
use super::components::{CachedTarget, Hunter};

/// Snapshots the nearest pursuit target for every hunter.
pub(super) fn cache_targets(
    targets: Query<(Entity, &Body), With<PursuitTarget>>,
    mut hunters: Query<(&Body, &mut Hunter)>,
) {
    for (body, mut hunter) in hunters.iter_mut() {
        let here = body.center();
        let mut nearest: Option<(f32, CachedTarget)> = None;
        for (entity, target) in targets.iter() {
            let dist = here.distance_squared(target.center());
            if nearest.is_none_or(|(best, _)| dist < best) {
                nearest = Some((dist, CachedTarget { entity, body: *target }));
            }
        }
        hunter.cached_target = nearest.map(|(_, target)| target);
    }
}

pub(super) fn tick_recalc_timers(mut hunters: Query<&mut Hunter>) {
    for mut hunter in hunters.iter_mut() {
        if hunter.recalc_timer > 0 {
            hunter.recalc_timer -= 1;
        }
    }
}

/// Ticks the behavior tree once per hunter and asks for a path when the
/// replan branch fired.
pub(super) fn evaluate_behavior(
    tree: Res<HunterTree>,
    settings: Res<HunterSettings>,
    #[allow(unused_variables)] tick: Res<SimTick>,
    mut hunters: Query<(Entity, &Body, &mut Hunter)>,
    mut path_requests: MessageWriter<PathRequest>,
) {
    use crate::profile_log;

    let mut replans = 0;
    for (entity, body, mut hunter) in hunters.iter_mut() {
        let mut bb = HunterBlackboard {
            target: hunter.cached_target.map(|t| t.body),
            waypoints: hunter.path.waypoint_count(),
            recalc_timer: hunter.recalc_timer,
            state: hunter.state,
            ..HunterBlackboard::new(*body, settings.decision)
        };
        tree.evaluate(&mut bb);

        if bb.state != hunter.state {
            debug!("[HUNTER] {:?}: {} -> {}", entity, hunter.state.label(), bb.state.label());
            hunter.state = bb.state;
        }
        hunter.recalc_timer = bb.recalc_timer;

        if bb.replan_requested {
            path_requests.write(PathRequest { entity });
            replans += 1;
        }
    }

    profile_log!(tick, "[HUNTER] {} hunters evaluated, {} replans", hunters.iter().count(), replans);
}
