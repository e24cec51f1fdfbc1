use bevy::prelude::*;
use hunter_ai::game::HunterCorePlugin;
use hunter_ai::game::config::HunterSettings;
use hunter_ai::game::hunter::{Hunter, HunterPath, HunterState};
use hunter_ai::game::level::{generate_platform_strip, Body, CameraWindow, Platform, Platforms, PursuitTarget, StripParams};
use hunter_ai::game::pathfinding::{MoveHint, OpenSetKind, PlannerKind};

/// Everything observable about one hunter after a run.
type Snapshot = (HunterState, HunterPath, u32, Option<Vec2>, MoveHint);

fn build_app(seed: u64, settings: HunterSettings) -> App {
    let platforms = generate_platform_strip(seed, &StripParams::default());

    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(HunterCorePlugin);
    app.insert_resource(settings);
    app.insert_resource(CameraWindow::default());

    let safe: Vec<&Platform> = platforms.iter().filter(|pl| !pl.hazard).collect();
    if let Some(pl) = safe.first() {
        app.world_mut().spawn((Body::standing_on(pl, pl.center_x(), 24.0, 40.0), PursuitTarget));
    }
    for pl in safe.iter().skip(2).step_by(2) {
        app.world_mut().spawn((Hunter::default(), Body::standing_on(pl, pl.center_x(), 24.0, 40.0)));
    }

    app.insert_resource(Platforms::new(platforms));
    app
}

/// Runs `ticks` fixed steps, walking the pursued body one unit to the right
/// each step so hunters keep replanning.
fn run(app: &mut App, ticks: usize) -> Vec<Snapshot> {
    for _ in 0..ticks {
        app.world_mut().run_schedule(FixedUpdate);
        let mut targets = app.world_mut().query_filtered::<&mut Body, With<PursuitTarget>>();
        for mut body in targets.iter_mut(app.world_mut()) {
            body.x += 1.0;
        }
    }

    let mut hunters = app.world_mut().query::<(Entity, &Hunter, &MoveHint)>();
    let mut snapshots: Vec<(Entity, Snapshot)> = hunters
        .iter(app.world())
        .map(|(entity, hunter, hint)| {
            (entity, (hunter.state, hunter.path.clone(), hunter.recalc_timer, hunter.current_target, *hint))
        })
        .collect();
    snapshots.sort_by_key(|(entity, _)| *entity);
    snapshots.into_iter().map(|(_, snapshot)| snapshot).collect()
}

#[test]
fn test_hunter_runs_are_deterministic() {
    for seed in [1, 7, 42] {
        let mut app1 = build_app(seed, HunterSettings::default());
        let mut app2 = build_app(seed, HunterSettings::default());

        let run1 = run(&mut app1, 120);
        let run2 = run(&mut app2, 120);

        assert!(!run1.is_empty(), "seed {} spawned no hunters", seed);
        assert_eq!(run1, run2, "seed {} diverged", seed);
    }
}

#[test]
fn test_planner_variants_are_deterministic() {
    let mut settings = HunterSettings::default();
    settings.planner.planner = PlannerKind::Dijkstra;
    settings.planner.open_set = OpenSetKind::Heap;
    settings.planner.directional_edges = true;

    let mut app1 = build_app(11, settings);
    let mut app2 = build_app(11, settings);
    assert_eq!(run(&mut app1, 90), run(&mut app2, 90));
}

#[test]
fn test_generated_levels_are_stable_per_seed() {
    let params = StripParams::default();
    assert_eq!(generate_platform_strip(3, &params), generate_platform_strip(3, &params));
    assert_ne!(generate_platform_strip(3, &params), generate_platform_strip(4, &params));
}
