use bevy::prelude::*;
use bevy_common_assets::ron::RonAssetPlugin;
use serde::{Deserialize, Serialize};
use crate::game::pathfinding::{GridSettings, JumpProfile, OpenSetKind, PlannerKind, PlannerOptions};

/// Static configuration loaded once at startup. These values define the jump
/// physics and planner behavior; changing them mid-run would invalidate every
/// cached path, so they are only read once.
#[derive(Resource, Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct InitialConfig {
    // Simulation
    pub tick_rate: f64,

    // Jump envelope and grid shape
    pub jump: JumpProfile,
    pub grid: GridSettings,

    // Decision layer
    pub decision: DecisionSettings,

    // Planner selection
    pub planner: PlannerKind,
    pub open_set: OpenSetKind,
    pub directional_edges: bool,

    // Demo level
    pub level_seed: u64,
}

impl Default for InitialConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            jump: JumpProfile::default(),
            grid: GridSettings::default(),
            decision: DecisionSettings::default(),
            planner: PlannerKind::AStar,
            open_set: OpenSetKind::Scan,
            directional_edges: false,
            level_seed: 7,
        }
    }
}

/// Thresholds used by the hunter behavior tree and movement hints.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq)]
pub struct DecisionSettings {
    /// Attack when the horizontal distance to the target is below this.
    pub attack_range_x: f32,
    /// ...and the vertical distance is below this.
    pub attack_range_y: f32,
    /// Ticks between two replans of the same hunter.
    pub recalc_interval: u32,
    /// Without a route, pursue directly only within this distance.
    pub engage_radius: f32,
}

impl Default for DecisionSettings {
    fn default() -> Self {
        Self {
            attack_range_x: 50.0,
            attack_range_y: 30.0,
            recalc_interval: 30,
            engage_radius: 420.0,
        }
    }
}

/// The subset of [`InitialConfig`] the hunter systems read every tick.
///
/// Kept separate so tests and embedding games can insert it directly without
/// going through the config file.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct HunterSettings {
    pub grid: GridSettings,
    pub decision: DecisionSettings,
    pub planner: PlannerOptions,
}

impl From<&InitialConfig> for HunterSettings {
    fn from(config: &InitialConfig) -> Self {
        Self {
            grid: config.grid,
            decision: config.decision,
            planner: PlannerOptions {
                profile: config.jump,
                planner: config.planner,
                open_set: config.open_set,
                directional_edges: config.directional_edges,
            },
        }
    }
}

/// Runtime configuration that can be hot-reloaded. Only the diagnostics
/// overlay reads it; nothing here affects AI decisions.
#[derive(Deserialize, Serialize, Asset, TypePath, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    // Controls
    pub key_toggle_overlay: KeyCode,
    pub key_toggle_grid: KeyCode,
    pub key_regenerate_level: KeyCode,

    // Overlay
    pub first_node_radius: f32,
    pub node_radius: f32,
    pub path_color: [f32; 4],
    pub target_line_color: [f32; 4],
    pub walkable_color: [f32; 4],
    pub blocked_color: [f32; 4],
    pub platform_color: [f32; 4],
    pub hazard_color: [f32; 4],
    pub label_font_size: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            key_toggle_overlay: KeyCode::F3,
            key_toggle_grid: KeyCode::F4,
            key_regenerate_level: KeyCode::F5,
            first_node_radius: 5.0,
            node_radius: 3.0,
            path_color: [0.13, 0.77, 0.37, 0.8],
            target_line_color: [0.98, 0.8, 0.08, 0.9],
            walkable_color: [0.2, 0.8, 0.3, 0.25],
            blocked_color: [0.9, 0.1, 0.1, 0.35],
            platform_color: [0.7, 0.7, 0.75, 1.0],
            hazard_color: [0.95, 0.2, 0.2, 1.0],
            label_font_size: 10.0,
        }
    }
}

/// Converts an `[r, g, b, a]` config entry to a color.
pub fn rgba(c: [f32; 4]) -> Color {
    Color::srgba(c[0], c[1], c[2], c[3])
}

#[derive(Resource)]
pub struct GameConfigHandle(pub Handle<GameConfig>);

pub struct GameConfigPlugin;

impl Plugin for GameConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<GameConfig>::new(&["hunter_debug.ron"]))
           .add_systems(Startup, (load_initial_config, apply_initial_config, setup_runtime_config).chain());
    }
}

const INITIAL_CONFIG_PATH: &str = "assets/initial_config.ron";

/// Parses an initial config, logging and falling back to defaults on error.
pub fn parse_initial_config(contents: &str) -> InitialConfig {
    match ron::from_str::<InitialConfig>(contents) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to parse initial config: {}", e);
            error!("Using default InitialConfig");
            InitialConfig::default()
        }
    }
}

/// Load static initial configuration synchronously at startup.
/// This must complete before the first fixed tick reads `HunterSettings`.
fn load_initial_config(mut commands: Commands) {
    match std::fs::read_to_string(INITIAL_CONFIG_PATH) {
        Ok(contents) => {
            let config = parse_initial_config(&contents);
            info!("Loaded initial config from {}", INITIAL_CONFIG_PATH);
            commands.insert_resource(config);
        }
        Err(e) => {
            error!("Failed to read {}: {}", INITIAL_CONFIG_PATH, e);
            error!("Using default InitialConfig");
            commands.insert_resource(InitialConfig::default());
        }
    }
}

fn apply_initial_config(
    mut commands: Commands,
    config: Res<InitialConfig>,
    mut fixed_time: ResMut<Time<Fixed>>,
) {
    fixed_time.set_timestep_hz(config.tick_rate);
    commands.insert_resource(HunterSettings::from(&*config));
    info!(
        "[HUNTER] Settings applied: {:?} planner, {:?} open set, directional edges {}, {} Hz",
        config.planner, config.open_set, config.directional_edges, config.tick_rate
    );
}

/// Load runtime configuration asynchronously (can be hot-reloaded).
fn setup_runtime_config(mut commands: Commands, asset_server: Res<AssetServer>) {
    let handle = asset_server.load("hunter_debug.ron");
    commands.insert_resource(GameConfigHandle(handle));
}
