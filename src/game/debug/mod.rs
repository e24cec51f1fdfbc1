/// Diagnostics renderer: hunter paths, waypoint markers, target lines,
/// state labels and the navigation grid, drawn with gizmos.
///
/// Everything here only reads AI state. Requires the default Bevy render
/// plugins, so headless apps and tests leave this plugin out.

mod overlay;
mod draw;

pub use overlay::{build_overlay, HunterOverlay, OverlayStyle, LABEL_OFFSET};
pub use draw::{DebugOverlay, HunterLabel, to_view};

use bevy::prelude::*;

pub struct DebugOverlayPlugin;

impl Plugin for DebugOverlayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugOverlay>();
        app.add_systems(Update, draw::toggle_overlay);
        app.add_systems(Update, (
            draw::draw_platforms,
            draw::draw_grid,
            draw::draw_hunter_overlays,
            draw::sync_state_labels,
        ).after(draw::toggle_overlay));
    }
}
