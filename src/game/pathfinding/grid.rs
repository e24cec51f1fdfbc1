/// Discretized walkability map over the visible window of the level.
///
/// The grid covers `[camera_x - margin_left, camera_x + view_width + margin_right]`
/// horizontally and `[0, view_height]` vertically, at `cell_size` world units
/// per cell. It is rebuilt wholesale whenever its inputs change; there is no
/// incremental update.

use bevy::prelude::*;
use serde::{Serialize, Deserialize};
use crate::game::level::{CameraWindow, Platform, Platforms};
use super::types::{CellState, GridCell};

/// Shape parameters for the navigation grid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    pub cell_size: f32,
    /// World units covered to the left of the camera.
    pub margin_left: f32,
    /// World units covered to the right of the viewport.
    pub margin_right: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self { cell_size: 40.0, margin_left: 200.0, margin_right: 400.0 }
    }
}

/// What a grid was last built from. Rebuilding with identical inputs is a no-op.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridInputs {
    pub platforms_generation: u64,
    pub window: CameraWindow,
    pub settings: GridSettings,
}

/// Navigation grid resource. Row-major, `cells[y * width + x]`.
#[derive(Resource, Clone, Debug)]
pub struct NavGrid {
    pub width: usize,
    pub height: usize,
    pub cell_size: f32,
    /// World X of the left edge of column 0.
    pub offset_x: f32,
    cells: Vec<CellState>,
    built_from: Option<GridInputs>,
    revision: u64,
}

impl Default for NavGrid {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            cell_size: GridSettings::default().cell_size,
            offset_x: 0.0,
            cells: Vec::new(),
            built_from: None,
            revision: 0,
        }
    }
}

impl NavGrid {
    /// Rebuilds the grid from scratch.
    ///
    /// Returns `false` and leaves the grid untouched when `platforms` is
    /// empty. Otherwise every cell starts as Air, each platform marks its
    /// surface row Walkable (Blocked for hazards) across its span and clears
    /// the row above it to Air. Later platforms overwrite earlier ones on
    /// shared cells, except that a hazard surface is never turned Walkable.
    /// A final pass clears the cell above every Walkable cell, so a surface
    /// stacked directly on another one becomes headroom.
    pub fn rebuild(&mut self, platforms: &[Platform], window: &CameraWindow, settings: &GridSettings) -> bool {
        if platforms.is_empty() || settings.cell_size <= 0.0 {
            return false;
        }

        let cs = settings.cell_size;
        let min_x = window.x - settings.margin_left;
        let max_x = window.x + window.width + settings.margin_right;

        self.cell_size = cs;
        self.offset_x = min_x;
        self.width = ((max_x - min_x) / cs).ceil().max(0.0) as usize;
        self.height = (window.height / cs).ceil().max(0.0) as usize;
        self.cells.clear();
        self.cells.resize(self.width * self.height, CellState::Air);

        let width = self.width as i32;
        let height = self.height as i32;

        for pl in platforms {
            let gx1 = ((pl.left() - self.offset_x) / cs).floor() as i32;
            let gx2 = ((pl.right() - self.offset_x) / cs).ceil() as i32;
            let gy = (pl.y / cs).floor() as i32;
            if gy < 0 || gy >= height {
                continue;
            }

            for gx in gx1.max(0)..gx2.min(width) {
                let idx = self.index(gx, gy);
                self.cells[idx] = match (pl.hazard, self.cells[idx]) {
                    (true, _) => CellState::Blocked,
                    (false, CellState::Blocked) => CellState::Blocked,
                    (false, _) => CellState::Walkable,
                };
                if gy > 0 {
                    let above = self.index(gx, gy - 1);
                    self.cells[above] = CellState::Air;
                }
            }
        }

        for gy in 1..height {
            for gx in 0..width {
                if self.cells[self.index(gx, gy)] == CellState::Walkable {
                    let above = self.index(gx, gy - 1);
                    self.cells[above] = CellState::Air;
                }
            }
        }

        self.revision = self.revision.wrapping_add(1);
        true
    }

    /// Rebuilds only if the platform list, camera window or settings changed
    /// since the last successful build. Returns whether a rebuild happened.
    pub fn rebuild_if_stale(&mut self, platforms: &Platforms, window: &CameraWindow, settings: &GridSettings) -> bool {
        let inputs = GridInputs {
            platforms_generation: platforms.generation(),
            window: *window,
            settings: *settings,
        };
        if self.built_from == Some(inputs) {
            return false;
        }
        if !self.rebuild(platforms.as_slice(), window, settings) {
            return false;
        }
        self.built_from = Some(inputs);
        true
    }

    /// Increments on every successful rebuild. Grid paths computed against an
    /// older revision refer to shifted cells and must be discarded.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_built(&self) -> bool {
        !self.cells.is_empty()
    }

    #[inline]
    fn index(&self, gx: i32, gy: i32) -> usize {
        gy as usize * self.width + gx as usize
    }

    #[inline]
    pub fn in_bounds(&self, cell: GridCell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    /// State of `cell`, `None` outside the grid.
    pub fn cell(&self, cell: GridCell) -> Option<CellState> {
        if !self.in_bounds(cell) {
            return None;
        }
        self.cells.get(self.index(cell.x, cell.y)).copied()
    }

    /// True only for in-bounds Walkable cells.
    #[inline]
    pub fn is_walkable(&self, cell: GridCell) -> bool {
        self.cell(cell) == Some(CellState::Walkable)
    }

    /// Cell containing a world position. May be out of bounds.
    pub fn world_to_grid(&self, pos: Vec2) -> GridCell {
        GridCell {
            x: ((pos.x - self.offset_x) / self.cell_size).floor() as i32,
            y: (pos.y / self.cell_size).floor() as i32,
        }
    }

    /// World position of the center of `cell`.
    pub fn grid_to_world(&self, cell: GridCell) -> Vec2 {
        let half = self.cell_size / 2.0;
        Vec2::new(
            self.offset_x + cell.x as f32 * self.cell_size + half,
            cell.y as f32 * self.cell_size + half,
        )
    }

    /// Number of cells, the node count of the grid search space.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Iterates `(cell, state)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (GridCell, CellState)> + '_ {
        let width = self.width.max(1);
        self.cells.iter().enumerate().map(move |(i, state)| {
            (GridCell::new((i % width) as i32, (i / width) as i32), *state)
        })
    }
}
