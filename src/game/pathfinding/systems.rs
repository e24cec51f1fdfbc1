use bevy::prelude::*;
use crate::game::config::HunterSettings;
use crate::game::hunter::{Hunter, HunterPath};
use crate::game::level::{find_platform_index_at_x, Body, CameraWindow, Platform, Platforms};
use crate::game::simulation::SimTick;
use super::grid::NavGrid;
use super::grid_path::find_grid_path;
use super::platform_graph::plan_platform_route;
use super::steering::{find_hunter_path, MoveHint};
use super::types::PathRequest;

/// Grid revision and platform generation the hunters' paths were last checked against.
#[derive(Default)]
pub(super) struct PathEpoch {
    grid_revision: u64,
    platforms_generation: u64,
}

pub(super) fn rebuild_nav_grid(
    mut grid: ResMut<NavGrid>,
    platforms: Res<Platforms>,
    window: Res<CameraWindow>,
    settings: Res<HunterSettings>,
) {
    if grid.rebuild_if_stale(&platforms, &window, &settings.grid) {
        debug!(
            "[GRID] Rebuilt {}x{} grid at offset {:.0} (revision {}, {} platforms)",
            grid.width,
            grid.height,
            grid.offset_x,
            grid.revision(),
            platforms.len()
        );
    }
}

/// Drops paths whose coordinates no longer mean what they did when planned:
/// grid paths after a grid rebuild, platform paths after the list changed.
pub(super) fn invalidate_stale_paths(
    grid: Res<NavGrid>,
    platforms: Res<Platforms>,
    mut epoch: Local<PathEpoch>,
    mut hunters: Query<&mut Hunter>,
) {
    let grid_changed = epoch.grid_revision != grid.revision();
    let platforms_changed = epoch.platforms_generation != platforms.generation();
    if !grid_changed && !platforms_changed {
        return;
    }
    epoch.grid_revision = grid.revision();
    epoch.platforms_generation = platforms.generation();

    let mut cleared = 0;
    for mut hunter in hunters.iter_mut() {
        let stale = (grid_changed && hunter.path.is_grid()) || (platforms_changed && hunter.path.is_platforms());
        if stale {
            hunter.clear_path();
            cleared += 1;
        }
    }
    if cleared > 0 {
        debug!("[PATHFINDING] Cleared {} stale paths", cleared);
    }
}

/// World position of the waypoint after the one the hunter stands on.
fn next_waypoint(path: &HunterPath, grid: &NavGrid, platforms: &[Platform]) -> Option<Vec2> {
    match path {
        HunterPath::None => None,
        HunterPath::Grid(cells) => cells.get(1).map(|&cell| grid.grid_to_world(cell)),
        HunterPath::Platforms(indices) => indices
            .get(1)
            .and_then(|&i| platforms.get(i))
            .map(Platform::top_center),
    }
}

/// Plans a fresh route: grid cells from feet to feet when both stand on
/// walkable cells and a grid route exists, otherwise platform indices.
pub fn plan_hunter_path(
    hunter: &Body,
    target: &Body,
    grid: &NavGrid,
    platforms: &[Platform],
    settings: &HunterSettings,
) -> HunterPath {
    let options = &settings.planner;
    if let Some(cells) = find_grid_path(grid, hunter.feet(), target.feet(), &options.profile, options.open_set) {
        return HunterPath::Grid(cells);
    }

    let start = find_platform_index_at_x(platforms, hunter.x, hunter.w);
    let goal = find_platform_index_at_x(platforms, target.x, target.w);
    match (start, goal) {
        (Some(start), Some(goal)) => plan_platform_route(platforms, start, goal, options)
            .map(HunterPath::Platforms)
            .unwrap_or_default(),
        _ => HunterPath::None,
    }
}

pub(super) fn process_path_requests(
    mut path_requests: MessageReader<PathRequest>,
    grid: Res<NavGrid>,
    platforms: Res<Platforms>,
    settings: Res<HunterSettings>,
    #[allow(unused_variables)] tick: Res<SimTick>,
    mut hunters: Query<(&Body, &mut Hunter)>,
) {
    use crate::profile_log;

    if path_requests.is_empty() {
        return;
    }

    let start_time = std::time::Instant::now();
    let request_count = path_requests.len();

    // Warn if too many pending requests (possible accumulation)
    if request_count > 64 {
        warn!("[PATHFINDING] High path request count: {} pending requests!", request_count);
    }

    let mut found = 0;
    for request in path_requests.read() {
        let Ok((body, mut hunter)) = hunters.get_mut(request.entity) else {
            trace!("[PATHFINDING] Path request for missing hunter {:?}", request.entity);
            continue;
        };
        let Some(target) = hunter.cached_target.map(|t| t.body) else {
            hunter.clear_path();
            continue;
        };

        let path = plan_hunter_path(body, &target, &grid, platforms.as_slice(), &settings);
        if path == HunterPath::None {
            debug!("[PATHFINDING] No path for hunter {:?}", request.entity);
        } else {
            found += 1;
        }
        hunter.current_target = next_waypoint(&path, &grid, platforms.as_slice());
        hunter.path = path;
    }

    profile_log!(tick, "[PATHFINDING] {} requests, {} paths found", request_count, found);

    let total_duration = start_time.elapsed();
    if total_duration.as_millis() > 16 {
        warn!("[PATHFINDING] Slow batch processing: {:?} for {} requests", total_duration, request_count);
    }
}

/// Drops the waypoints a hunter has already reached so its path starts at
/// the cell or platform it currently stands on.
pub(super) fn prune_reached_waypoints(
    grid: Res<NavGrid>,
    platforms: Res<Platforms>,
    mut hunters: Query<(&Body, &mut Hunter)>,
) {
    for (body, mut hunter) in hunters.iter_mut() {
        let reached = match &hunter.path {
            HunterPath::None => None,
            HunterPath::Grid(cells) => {
                let here = grid.world_to_grid(body.feet());
                cells.iter().position(|&c| c == here)
            }
            HunterPath::Platforms(indices) => find_platform_index_at_x(platforms.as_slice(), body.x, body.w)
                .and_then(|here| indices.iter().position(|&i| i == here)),
        };

        let Some(reached) = reached.filter(|&i| i > 0) else { continue };
        match &mut hunter.path {
            HunterPath::Grid(cells) => {
                cells.drain(..reached);
            }
            HunterPath::Platforms(indices) => {
                indices.drain(..reached);
            }
            HunterPath::None => {}
        }
        let next = next_waypoint(&hunter.path, &grid, platforms.as_slice());
        hunter.current_target = next;
    }
}

pub(super) fn update_move_hints(
    platforms: Res<Platforms>,
    settings: Res<HunterSettings>,
    mut hunters: Query<(&Body, &Hunter, &mut MoveHint)>,
) {
    for (body, hunter, mut hint) in hunters.iter_mut() {
        let next = match &hunter.cached_target {
            Some(target) => find_hunter_path(
                body,
                &target.body,
                platforms.as_slice(),
                &settings.planner,
                settings.decision.engage_radius,
            ),
            None => MoveHint::default(),
        };
        hint.set_if_neq(next);
    }
}
