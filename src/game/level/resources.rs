/// Level resources shared read-only by the AI systems.

use bevy::prelude::*;
use super::types::Platform;

/// Ordered platform list for the current level.
///
/// Indices are stable only until the list is replaced; [`Platforms::generation`]
/// changes on every replacement so dependents (grid, cached platform paths)
/// can tell when their indices went stale.
#[derive(Resource, Default, Clone, Debug)]
pub struct Platforms {
    list: Vec<Platform>,
    generation: u64,
}

impl Platforms {
    pub fn new(list: Vec<Platform>) -> Self {
        Self { list, generation: 1 }
    }

    /// Replaces the whole list and bumps the generation.
    pub fn replace(&mut self, list: Vec<Platform>) {
        self.list = list;
        self.generation = self.generation.wrapping_add(1);
    }

    #[inline]
    pub fn as_slice(&self) -> &[Platform] {
        &self.list
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Horizontal camera offset and viewport size, in world units.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct CameraWindow {
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for CameraWindow {
    fn default() -> Self {
        Self { x: 0.0, width: 960.0, height: 540.0 }
    }
}
