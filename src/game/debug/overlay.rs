/// Screen-space diagnostics for one hunter.
///
/// [`build_overlay`] turns a hunter's read-only state into plain geometry;
/// the gizmo drawer only renders what it returns. Coordinates are in the
/// level's y-down space with the camera's horizontal offset removed.

use bevy::prelude::*;
use crate::game::config::GameConfig;
use crate::game::hunter::{Hunter, HunterPath};
use crate::game::level::{Body, Platform};
use crate::game::pathfinding::NavGrid;

/// Vertical gap between a hunter's top edge and its state label.
pub const LABEL_OFFSET: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayStyle {
    pub first_node_radius: f32,
    pub node_radius: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self::from(&GameConfig::default())
    }
}

impl From<&GameConfig> for OverlayStyle {
    fn from(config: &GameConfig) -> Self {
        Self {
            first_node_radius: config.first_node_radius,
            node_radius: config.node_radius,
        }
    }
}

/// Everything drawn for one hunter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HunterOverlay {
    /// Path polyline through every waypoint.
    pub path: Vec<Vec2>,
    /// One `(center, radius)` marker per waypoint; the first is larger.
    pub nodes: Vec<(Vec2, f32)>,
    /// Segment from the hunter's center to its current waypoint.
    pub target_line: Option<(Vec2, Vec2)>,
    pub label: &'static str,
    /// Bottom-center of the state label.
    pub label_anchor: Vec2,
}

/// Builds the overlay for `hunter` without touching any AI state.
pub fn build_overlay(
    hunter: &Hunter,
    body: &Body,
    grid: &NavGrid,
    platforms: &[Platform],
    camera_x: f32,
    style: &OverlayStyle,
) -> HunterOverlay {
    let to_screen = |p: Vec2| Vec2::new(p.x - camera_x, p.y);

    let path: Vec<Vec2> = match &hunter.path {
        HunterPath::None => Vec::new(),
        HunterPath::Grid(cells) => cells.iter().map(|&c| to_screen(grid.grid_to_world(c))).collect(),
        HunterPath::Platforms(indices) => indices
            .iter()
            .filter_map(|&i| platforms.get(i))
            .map(|pl| to_screen(pl.top_center()))
            .collect(),
    };

    let nodes = path
        .iter()
        .enumerate()
        .map(|(i, &p)| (p, if i == 0 { style.first_node_radius } else { style.node_radius }))
        .collect();

    let target_line = hunter
        .current_target
        .map(|target| (to_screen(body.center()), to_screen(target)));

    HunterOverlay {
        path,
        nodes,
        target_line,
        label: hunter.state.label(),
        label_anchor: Vec2::new(body.center_x() - camera_x, body.y - LABEL_OFFSET),
    }
}
