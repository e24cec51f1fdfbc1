/// Playable demo: a generated platform strip, a keyboard-driven player and a
/// few hunters chasing it.
///
/// Locomotion and collision live here, outside the AI plugins. Hunters are
/// moved by reading their `MoveHint` and current waypoint; the AI itself never
/// moves a body.

use bevy::prelude::*;
use crate::game::config::{rgba, GameConfig, GameConfigHandle, InitialConfig};
use crate::game::debug::to_view;
use crate::game::hunter::{Hunter, HunterState};
use crate::game::level::{find_platform_index_at_x, generate_platform_strip, Body, CameraWindow, Platform, Platforms, PursuitTarget, StripParams};
use crate::game::pathfinding::MoveHint;
use crate::game::simulation::HunterSet;

const GRAVITY: f32 = 1800.0;
/// Apex height is `JUMP_SPEED^2 / (2 * GRAVITY)` = 144 units, under the rise limit.
const JUMP_SPEED: f32 = 720.0;
const PLAYER_SPEED: f32 = 260.0;
const HUNTER_SPEED: f32 = 180.0;
const FALL_LIMIT: f32 = 800.0;
const HUNTER_COUNT: usize = 3;

#[derive(Component, Default)]
pub struct Player;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Motion {
    pub velocity: Vec2,
    pub grounded: bool,
}

/// Keyboard state sampled in `Update` and consumed by the next fixed tick.
#[derive(Resource, Default)]
struct PlayerInput {
    axis: f32,
    jump: bool,
}

#[derive(Resource, Default)]
struct LevelSeed(u64);

pub struct DemoPlugin;

impl Plugin for DemoPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>();
        app.init_resource::<LevelSeed>();
        app.add_systems(PostStartup, setup_demo);
        app.add_systems(Update, (read_player_input, regenerate_level, draw_bodies));
        app.add_systems(FixedUpdate, (
            move_player,
            move_hunters,
            integrate_bodies,
            follow_camera,
        ).chain().after(HunterSet::Plan));
    }
}

fn spawn_point(platforms: &[Platform], index: usize) -> Option<Body> {
    let pl = platforms.iter().filter(|pl| !pl.hazard).nth(index)?;
    Some(Body::standing_on(pl, pl.center_x(), 24.0, 40.0))
}

fn setup_demo(
    mut commands: Commands,
    config: Option<Res<InitialConfig>>,
    mut platforms: ResMut<Platforms>,
    mut seed: ResMut<LevelSeed>,
) {
    let level_seed = config.map(|c| c.level_seed).unwrap_or_default();
    seed.0 = level_seed;
    platforms.replace(generate_platform_strip(level_seed, &StripParams::default()));
    info!("[HUNTER] Demo level generated: {} platforms (seed {})", platforms.len(), level_seed);

    commands.spawn(Camera2d);

    if let Some(body) = spawn_point(platforms.as_slice(), 0) {
        commands.spawn((Player, PursuitTarget, body, Motion::default()));
    }
    for i in 0..HUNTER_COUNT {
        if let Some(body) = spawn_point(platforms.as_slice(), 4 + i * 3) {
            commands.spawn((Hunter::default(), body, Motion::default()));
        }
    }
}

fn read_player_input(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<PlayerInput>) {
    let mut axis = 0.0;
    if keys.pressed(KeyCode::ArrowLeft) || keys.pressed(KeyCode::KeyA) {
        axis -= 1.0;
    }
    if keys.pressed(KeyCode::ArrowRight) || keys.pressed(KeyCode::KeyD) {
        axis += 1.0;
    }
    input.axis = axis;
    if keys.just_pressed(KeyCode::Space) || keys.just_pressed(KeyCode::ArrowUp) {
        input.jump = true;
    }
}

fn regenerate_level(
    keys: Res<ButtonInput<KeyCode>>,
    handle: Option<Res<GameConfigHandle>>,
    configs: Res<Assets<GameConfig>>,
    mut seed: ResMut<LevelSeed>,
    mut platforms: ResMut<Platforms>,
    mut bodies: Query<(&mut Body, &mut Motion, Has<Player>)>,
) {
    let key = handle
        .and_then(|h| configs.get(&h.0).map(|c| c.key_regenerate_level))
        .unwrap_or(GameConfig::default().key_regenerate_level);
    if !keys.just_pressed(key) {
        return;
    }

    seed.0 = seed.0.wrapping_add(1);
    platforms.replace(generate_platform_strip(seed.0, &StripParams::default()));
    info!("[HUNTER] Level regenerated (seed {})", seed.0);

    let mut hunter_slot = 4;
    for (mut body, mut motion, is_player) in bodies.iter_mut() {
        let slot = if is_player { 0 } else { hunter_slot };
        if !is_player {
            hunter_slot += 3;
        }
        if let Some(spawn) = spawn_point(platforms.as_slice(), slot) {
            *body = spawn;
            *motion = Motion::default();
        }
    }
}

fn move_player(
    mut input: ResMut<PlayerInput>,
    mut player: Query<&mut Motion, With<Player>>,
) {
    let Ok(mut motion) = player.single_mut() else { return };
    motion.velocity.x = input.axis * PLAYER_SPEED;
    if input.jump && motion.grounded {
        motion.velocity.y = -JUMP_SPEED;
        motion.grounded = false;
    }
    input.jump = false;
}

/// Walks hunters along their waypoints, jumping when the next waypoint is
/// higher up or the ground ends ahead.
fn move_hunters(
    platforms: Res<Platforms>,
    mut hunters: Query<(&Hunter, &MoveHint, &Body, &mut Motion)>,
) {
    for (hunter, hint, body, mut motion) in hunters.iter_mut() {
        let dir = match (hunter.state, hunter.current_target) {
            (HunterState::Attacking, _) => 0.0,
            (_, Some(target)) => (target.x - body.center_x()).signum(),
            (_, None) if hint.engaged => hint.dir.sign() as f32,
            _ => 0.0,
        };
        motion.velocity.x = dir * HUNTER_SPEED;

        if !motion.grounded || dir == 0.0 {
            continue;
        }
        let wants_up = hunter.current_target.is_some_and(|t| t.y < body.feet().y - 20.0);
        let ahead = body.x + dir * body.w;
        let edge_ahead = find_platform_index_at_x(platforms.as_slice(), ahead, body.w).is_none();
        if wants_up || edge_ahead {
            motion.velocity.y = -JUMP_SPEED;
            motion.grounded = false;
        }
    }
}

fn integrate_bodies(
    time: Res<Time>,
    platforms: Res<Platforms>,
    mut bodies: Query<(&mut Body, &mut Motion)>,
) {
    let dt = time.delta_secs();
    for (mut body, mut motion) in bodies.iter_mut() {
        let feet_before = body.feet().y;
        motion.velocity.y += GRAVITY * dt;
        body.x += motion.velocity.x * dt;
        body.y += motion.velocity.y * dt;

        motion.grounded = false;
        if motion.velocity.y >= 0.0 {
            let cx = body.center_x();
            let landing = platforms
                .as_slice()
                .iter()
                .find(|pl| pl.contains_x(cx) && feet_before <= pl.y && body.feet().y >= pl.y);
            if let Some(pl) = landing {
                body.y = pl.y - body.h;
                motion.velocity.y = 0.0;
                motion.grounded = true;
            }
        }

        if body.y > FALL_LIMIT {
            if let Some(spawn) = spawn_point(platforms.as_slice(), 0) {
                *body = spawn;
                *motion = Motion::default();
            }
        }
    }
}

fn follow_camera(
    player: Query<&Body, With<Player>>,
    mut window: ResMut<CameraWindow>,
) {
    let Ok(body) = player.single() else { return };
    // Snap to whole cells so the grid is not rebuilt every tick.
    let desired = ((body.center_x() - window.width / 3.0).max(0.0) / 40.0).floor() * 40.0;
    if desired != window.x {
        window.x = desired;
    }
}

fn draw_bodies(
    window: Res<CameraWindow>,
    handle: Option<Res<GameConfigHandle>>,
    configs: Res<Assets<GameConfig>>,
    bodies: Query<(&Body, Has<Player>)>,
    mut gizmos: Gizmos,
) {
    let config = handle
        .and_then(|h| configs.get(&h.0).cloned())
        .unwrap_or_default();
    for (body, is_player) in bodies.iter() {
        let center = Vec2::new(body.center_x() - window.x, body.y + body.h / 2.0);
        let color = if is_player { Color::srgb(0.3, 0.6, 1.0) } else { rgba(config.hazard_color) };
        gizmos.rect_2d(to_view(center, &window), Vec2::new(body.w, body.h), color);
    }
}
