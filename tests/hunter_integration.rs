use bevy::prelude::*;
use hunter_ai::game::HunterCorePlugin;
use hunter_ai::game::config::HunterSettings;
use hunter_ai::game::hunter::{Hunter, HunterPath, HunterState};
use hunter_ai::game::level::{Body, CameraWindow, Platform, Platforms, PursuitTarget};
use hunter_ai::game::pathfinding::{Heading, MoveHint, NavGrid, RouteOutcome};
use hunter_ai::game::simulation::SimTick;

fn ledge_level() -> Vec<Platform> {
    vec![
        Platform::new(0.0, 400.0, 200.0),
        Platform::new(300.0, 400.0, 200.0),
        Platform::new(520.0, 120.0, 200.0),
        Platform::new(2200.0, 400.0, 200.0),
    ]
}

fn test_app(platforms: Vec<Platform>) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(HunterCorePlugin);
    app.insert_resource(Platforms::new(platforms));
    app.insert_resource(CameraWindow::default());
    app.insert_resource(HunterSettings::default());
    app
}

fn tick(app: &mut App) {
    app.world_mut().run_schedule(FixedUpdate);
}

fn spawn_pair(app: &mut App, hunter: Body, target: Body) -> (Entity, Entity) {
    let hunter = app.world_mut().spawn((Hunter::default(), hunter)).id();
    let target = app.world_mut().spawn((target, PursuitTarget)).id();
    (hunter, target)
}

fn hunter(app: &App, entity: Entity) -> Hunter {
    app.world().get::<Hunter>(entity).cloned().expect("hunter entity")
}

#[test]
fn test_replan_then_follow() {
    let platforms = ledge_level();
    let mut app = test_app(platforms.clone());
    let (h, _) = spawn_pair(
        &mut app,
        Body::standing_on(&platforms[0], 100.0, 20.0, 40.0),
        Body::standing_on(&platforms[1], 400.0, 20.0, 40.0),
    );

    tick(&mut app);
    let first = hunter(&app, h);
    assert_eq!(first.state, HunterState::CalculatingPath);
    assert_eq!(first.recalc_timer, 30);
    assert!(matches!(first.path, HunterPath::Grid(ref cells) if cells.len() > 1));
    assert!(first.current_target.is_some());
    assert!(app.world().resource::<NavGrid>().is_built());

    tick(&mut app);
    let second = hunter(&app, h);
    assert_eq!(second.state, HunterState::FollowingPath);
    assert_eq!(second.recalc_timer, 29);
    assert_eq!(app.world().resource::<SimTick>().0, 2);
}

#[test]
fn test_attack_when_target_is_close() {
    let platforms = ledge_level();
    let mut app = test_app(platforms.clone());
    let (h, _) = spawn_pair(
        &mut app,
        Body::standing_on(&platforms[0], 100.0, 20.0, 40.0),
        Body::standing_on(&platforms[0], 130.0, 20.0, 40.0),
    );

    tick(&mut app);
    let state = hunter(&app, h);
    assert_eq!(state.state, HunterState::Attacking);
    assert_eq!(state.path, HunterPath::None);
    assert_eq!(state.recalc_timer, 0);

    let hint = *app.world().get::<MoveHint>(h).expect("required component");
    assert_eq!(hint.route, RouteOutcome::SamePlatform);
    assert!(hint.engaged);
}

#[test]
fn test_idle_without_target() {
    let platforms = ledge_level();
    let mut app = test_app(platforms.clone());
    let h = app
        .world_mut()
        .spawn((Hunter::default(), Body::standing_on(&platforms[0], 100.0, 20.0, 40.0)))
        .id();

    for _ in 0..3 {
        tick(&mut app);
    }
    let state = hunter(&app, h);
    assert_eq!(state.state, HunterState::Idle);
    assert!(state.cached_target.is_none());
    assert_eq!(*app.world().get::<MoveHint>(h).expect("required component"), MoveHint::default());
}

#[test]
fn test_unreachable_target_idles_between_replans() {
    let platforms = ledge_level();
    let mut app = test_app(platforms.clone());
    let (h, _) = spawn_pair(
        &mut app,
        Body::standing_on(&platforms[0], 100.0, 20.0, 40.0),
        Body::standing_on(&platforms[3], 2300.0, 20.0, 40.0),
    );

    tick(&mut app);
    assert_eq!(hunter(&app, h).state, HunterState::CalculatingPath);
    assert_eq!(hunter(&app, h).path, HunterPath::None);

    // Nothing to follow and the cooldown is running.
    tick(&mut app);
    assert_eq!(hunter(&app, h).state, HunterState::Idle);

    for _ in 0..29 {
        tick(&mut app);
    }
    let state = hunter(&app, h);
    assert_eq!(state.state, HunterState::CalculatingPath);
    assert_eq!(state.recalc_timer, 30);

    let hint = *app.world().get::<MoveHint>(h).expect("required component");
    assert_eq!(hint.route, RouteOutcome::Unreachable);
    assert_eq!(hint.dir, Heading::Right);
    assert!(!hint.engaged);
}

#[test]
fn test_platform_route_to_ledge() {
    let platforms = ledge_level();
    let mut app = test_app(platforms.clone());
    let (h, _) = spawn_pair(
        &mut app,
        Body::standing_on(&platforms[0], 100.0, 20.0, 40.0),
        Body::standing_on(&platforms[2], 610.0, 20.0, 40.0),
    );

    tick(&mut app);
    let state = hunter(&app, h);
    assert_eq!(state.path, HunterPath::Platforms(vec![0, 1, 2]));
    assert_eq!(state.current_target, Some(platforms[1].top_center()));
}

#[test]
fn test_walking_onto_next_platform_prunes_route() {
    let platforms = ledge_level();
    let mut app = test_app(platforms.clone());
    let (h, _) = spawn_pair(
        &mut app,
        Body::standing_on(&platforms[0], 100.0, 20.0, 40.0),
        Body::standing_on(&platforms[2], 610.0, 20.0, 40.0),
    );
    tick(&mut app);

    *app.world_mut().get_mut::<Body>(h).expect("hunter body") = Body::standing_on(&platforms[1], 400.0, 20.0, 40.0);
    tick(&mut app);

    let state = hunter(&app, h);
    assert_eq!(state.path, HunterPath::Platforms(vec![1, 2]));
    assert_eq!(state.current_target, Some(platforms[2].top_center()));
    assert_eq!(state.state, HunterState::FollowingPath);
}

#[test]
fn test_level_change_clears_paths() {
    let platforms = ledge_level();
    let mut app = test_app(platforms.clone());
    let (h, _) = spawn_pair(
        &mut app,
        Body::standing_on(&platforms[0], 100.0, 20.0, 40.0),
        Body::standing_on(&platforms[2], 610.0, 20.0, 40.0),
    );
    tick(&mut app);
    tick(&mut app);
    assert_eq!(hunter(&app, h).state, HunterState::FollowingPath);

    app.world_mut().resource_mut::<Platforms>().replace(platforms);
    tick(&mut app);

    let state = hunter(&app, h);
    assert_eq!(state.path, HunterPath::None);
    assert_eq!(state.current_target, None);
    // The cooldown still runs, so the hunter waits instead of replanning.
    assert_eq!(state.state, HunterState::Idle);
}

#[test]
fn test_camera_scroll_rebuilds_grid_and_drops_grid_paths() {
    let platforms = ledge_level();
    let mut app = test_app(platforms.clone());
    let (h, _) = spawn_pair(
        &mut app,
        Body::standing_on(&platforms[0], 100.0, 20.0, 40.0),
        Body::standing_on(&platforms[1], 400.0, 20.0, 40.0),
    );
    tick(&mut app);
    assert!(hunter(&app, h).path.is_grid());
    let revision = app.world().resource::<NavGrid>().revision();

    app.world_mut().resource_mut::<CameraWindow>().x = 40.0;
    tick(&mut app);

    assert!(app.world().resource::<NavGrid>().revision() > revision);
    assert_eq!(hunter(&app, h).path, HunterPath::None);
}

#[test]
fn test_hunter_picks_nearest_target() {
    let platforms = ledge_level();
    let mut app = test_app(platforms.clone());
    let (h, far) = spawn_pair(
        &mut app,
        Body::standing_on(&platforms[0], 100.0, 20.0, 40.0),
        Body::standing_on(&platforms[3], 2300.0, 20.0, 40.0),
    );
    let near = app
        .world_mut()
        .spawn((Body::standing_on(&platforms[1], 400.0, 20.0, 40.0), PursuitTarget))
        .id();

    tick(&mut app);
    let cached = hunter(&app, h).cached_target.expect("a target is in the level");
    assert_eq!(cached.entity, near);
    assert_ne!(cached.entity, far);
}
