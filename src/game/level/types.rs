/// Level geometry and the bodies that move through it.
///
/// World space follows the screen convention: `x` grows to the right and `y`
/// grows downward, so a platform with a larger `y` sits lower on screen.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Implicit platform thickness, used only for drawing.
pub const PLATFORM_HEIGHT: f32 = 20.0;

/// A horizontal ground segment. `y` is the top (walkable) surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    /// Spikes: never walkable.
    #[serde(default)]
    pub hazard: bool,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32) -> Self {
        Self { x, y, width, hazard: false }
    }

    pub fn spikes(x: f32, y: f32, width: f32) -> Self {
        Self { x, y, width, hazard: true }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Midpoint of the top surface.
    pub fn top_center(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.y)
    }

    /// Inclusive horizontal membership test.
    #[inline]
    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.left() && x <= self.right()
    }
}

/// Axis-aligned bounds of a moving entity; `x`/`y` is the top-left corner.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Body {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Body of size `w`×`h` standing on `platform`, horizontally centered at `center_x`.
    pub fn standing_on(platform: &Platform, center_x: f32, w: f32, h: f32) -> Self {
        Self { x: center_x - w / 2.0, y: platform.y - h, w, h }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.y + self.h / 2.0)
    }

    /// Bottom-center point, the one that touches a platform surface.
    pub fn feet(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.y + self.h)
    }
}

/// Marks the entity hunters pursue (the player).
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct PursuitTarget;

/// Index of the first platform whose horizontal span contains the center of
/// a body at `x` with width `w`.
///
/// Hazard platforms are included: a hunter standing over spikes is still
/// "on" that platform for routing purposes.
pub fn find_platform_index_at_x(platforms: &[Platform], x: f32, w: f32) -> Option<usize> {
    let cx = x + w / 2.0;
    platforms.iter().position(|pl| pl.contains_x(cx))
}
