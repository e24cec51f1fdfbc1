//! Deterministic fixed-point numbers for search costs.
//!
//! Path costs are accumulated as fixed-point values so that comparisons and
//! tie-breaks inside the planners come out identical on every platform,
//! regardless of how the float inputs were rounded along the way.

use fixed::types::I48F16;

/// Fixed-point number used for g/f scores (48 integer bits, 16 fractional).
pub type FixedNum = I48F16;

/// Converts a float cost into a fixed-point cost.
///
/// Non-finite or negative inputs clamp to the representable range; the
/// planners never produce them, but a corrupt platform list must not panic.
#[inline]
pub fn cost(value: f32) -> FixedNum {
    if value.is_nan() {
        return FixedNum::MAX;
    }
    FixedNum::saturating_from_num(value.max(0.0))
}
