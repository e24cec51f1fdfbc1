use bevy::prelude::*;
use rustc_hash::FxHashSet;
use crate::game::config::{rgba, GameConfig, GameConfigHandle};
use crate::game::hunter::Hunter;
use crate::game::level::{Body, CameraWindow, Platforms, PLATFORM_HEIGHT};
use crate::game::pathfinding::{CellState, NavGrid};
use super::overlay::{build_overlay, OverlayStyle};

/// Which diagnostics are currently visible.
#[derive(Resource, Clone, Copy, Debug)]
pub struct DebugOverlay {
    pub show_paths: bool,
    pub show_grid: bool,
}

impl Default for DebugOverlay {
    fn default() -> Self {
        Self { show_paths: true, show_grid: false }
    }
}

/// Text entity that mirrors a hunter's state label.
#[derive(Component, Clone, Copy, Debug)]
pub struct HunterLabel {
    pub owner: Entity,
}

/// Maps a screen-space point of the level (y down, camera offset removed) to
/// the 2D view, whose camera sits at the origin.
#[inline]
pub fn to_view(p: Vec2, window: &CameraWindow) -> Vec2 {
    Vec2::new(p.x - window.width / 2.0, window.height / 2.0 - p.y)
}

fn active_config(handle: Option<Res<GameConfigHandle>>, configs: &Assets<GameConfig>) -> GameConfig {
    handle
        .and_then(|h| configs.get(&h.0).cloned())
        .unwrap_or_default()
}

pub(super) fn toggle_overlay(
    keys: Res<ButtonInput<KeyCode>>,
    handle: Option<Res<GameConfigHandle>>,
    configs: Res<Assets<GameConfig>>,
    mut overlay: ResMut<DebugOverlay>,
) {
    let config = active_config(handle, &configs);
    if keys.just_pressed(config.key_toggle_overlay) {
        overlay.show_paths = !overlay.show_paths;
        info!("[HUNTER] Path overlay {}", if overlay.show_paths { "on" } else { "off" });
    }
    if keys.just_pressed(config.key_toggle_grid) {
        overlay.show_grid = !overlay.show_grid;
        info!("[GRID] Grid overlay {}", if overlay.show_grid { "on" } else { "off" });
    }
}

pub(super) fn draw_platforms(
    platforms: Res<Platforms>,
    window: Res<CameraWindow>,
    handle: Option<Res<GameConfigHandle>>,
    configs: Res<Assets<GameConfig>>,
    mut gizmos: Gizmos,
) {
    let config = active_config(handle, &configs);
    for pl in platforms.as_slice() {
        if pl.right() < window.x || pl.left() > window.x + window.width {
            continue;
        }
        let center = Vec2::new(pl.center_x() - window.x, pl.y + PLATFORM_HEIGHT / 2.0);
        let color = if pl.hazard { config.hazard_color } else { config.platform_color };
        gizmos.rect_2d(to_view(center, &window), Vec2::new(pl.width, PLATFORM_HEIGHT), rgba(color));
    }
}

pub(super) fn draw_grid(
    overlay: Res<DebugOverlay>,
    grid: Res<NavGrid>,
    window: Res<CameraWindow>,
    handle: Option<Res<GameConfigHandle>>,
    configs: Res<Assets<GameConfig>>,
    mut gizmos: Gizmos,
) {
    if !overlay.show_grid || !grid.is_built() {
        return;
    }
    let config = active_config(handle, &configs);
    let size = Vec2::splat(grid.cell_size - 2.0);

    for (cell, state) in grid.iter() {
        let color = match state {
            CellState::Walkable => config.walkable_color,
            CellState::Blocked => config.blocked_color,
            CellState::Air => continue,
        };
        let world = grid.grid_to_world(cell);
        let screen = Vec2::new(world.x - window.x, world.y);
        gizmos.rect_2d(to_view(screen, &window), size, rgba(color));
    }
}

pub(super) fn draw_hunter_overlays(
    overlay: Res<DebugOverlay>,
    grid: Res<NavGrid>,
    platforms: Res<Platforms>,
    window: Res<CameraWindow>,
    handle: Option<Res<GameConfigHandle>>,
    configs: Res<Assets<GameConfig>>,
    hunters: Query<(&Hunter, &Body)>,
    mut gizmos: Gizmos,
) {
    if !overlay.show_paths {
        return;
    }
    let config = active_config(handle, &configs);
    let style = OverlayStyle::from(&config);
    let path_color = rgba(config.path_color);
    let line_color = rgba(config.target_line_color);

    for (hunter, body) in hunters.iter() {
        let data = build_overlay(hunter, body, &grid, platforms.as_slice(), window.x, &style);

        if data.path.len() > 1 {
            gizmos.linestrip_2d(data.path.iter().map(|&p| to_view(p, &window)), path_color);
        }
        for &(center, radius) in &data.nodes {
            gizmos.circle_2d(to_view(center, &window), radius, path_color);
        }
        if let Some((from, to)) = data.target_line {
            gizmos.line_2d(to_view(from, &window), to_view(to, &window), line_color);
        }
    }
}

/// Keeps one label entity per hunter, positioned above it and showing its state.
pub(super) fn sync_state_labels(
    mut commands: Commands,
    overlay: Res<DebugOverlay>,
    grid: Res<NavGrid>,
    platforms: Res<Platforms>,
    window: Res<CameraWindow>,
    handle: Option<Res<GameConfigHandle>>,
    configs: Res<Assets<GameConfig>>,
    hunters: Query<(Entity, &Hunter, &Body)>,
    mut labels: Query<(Entity, &HunterLabel, &mut Text2d, &mut Transform, &mut Visibility)>,
) {
    let config = active_config(handle, &configs);
    let style = OverlayStyle::from(&config);
    let mut labelled = FxHashSet::default();

    for (label_entity, label, mut text, mut transform, mut visibility) in labels.iter_mut() {
        let Ok((_, hunter, body)) = hunters.get(label.owner) else {
            commands.entity(label_entity).despawn();
            continue;
        };
        labelled.insert(label.owner);

        let data = build_overlay(hunter, body, &grid, platforms.as_slice(), window.x, &style);
        if text.0 != data.label {
            text.0 = data.label.to_string();
        }
        let anchor = to_view(data.label_anchor, &window) + Vec2::Y * config.label_font_size / 2.0;
        transform.translation = anchor.extend(10.0);
        visibility.set_if_neq(if overlay.show_paths { Visibility::Inherited } else { Visibility::Hidden });
    }

    for (entity, hunter, _) in hunters.iter() {
        if labelled.contains(&entity) {
            continue;
        }
        commands.spawn((
            HunterLabel { owner: entity },
            Text2d::new(hunter.state.label()),
            TextFont { font_size: config.label_font_size, ..default() },
            Transform::default(),
            Visibility::Hidden,
        ));
    }
}
