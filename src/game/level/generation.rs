/// Seeded platform strip generator for the demo and stress tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use super::types::Platform;

/// Shape parameters for [`generate_platform_strip`].
#[derive(Clone, Copy, Debug)]
pub struct StripParams {
    pub count: usize,
    pub start_x: f32,
    pub min_width: f32,
    pub max_width: f32,
    /// Gaps above the jump reach are deliberate: they split the level graph.
    pub min_gap: f32,
    pub max_gap: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub hazard_chance: f64,
}

impl Default for StripParams {
    fn default() -> Self {
        Self {
            count: 24,
            start_x: 0.0,
            min_width: 80.0,
            max_width: 240.0,
            min_gap: 20.0,
            max_gap: 260.0,
            min_y: 200.0,
            max_y: 480.0,
            hazard_chance: 0.15,
        }
    }
}

/// Left-to-right strip of platforms. The first platform is never a hazard so
/// there is always somewhere safe to spawn.
pub fn generate_platform_strip(seed: u64, params: &StripParams) -> Vec<Platform> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut platforms = Vec::with_capacity(params.count);
    let mut x = params.start_x;

    for i in 0..params.count {
        let width = rng.random_range(params.min_width..=params.max_width);
        let y = rng.random_range(params.min_y..=params.max_y);
        let hazard = i > 0 && rng.random_bool(params.hazard_chance);

        platforms.push(Platform { x, y, width, hazard });
        x += width + rng.random_range(params.min_gap..=params.max_gap);
    }

    platforms
}
