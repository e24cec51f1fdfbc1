pub mod game;

// ============================================================================
// Profiling Macros
// ============================================================================

/// Log a message every 100 simulation ticks when the `perf_stats` feature is on.
///
/// Without `perf_stats` this expands to an empty block and the arguments are
/// never evaluated.
///
/// ```ignore
/// profile_log!(tick, "[HUNTER] {} hunters evaluated", count);
/// ```
#[macro_export]
#[cfg(feature = "perf_stats")]
macro_rules! profile_log {
    ($tick:expr, $($arg:tt)*) => {
        if $tick.0 % 100 == 0 {
            bevy::prelude::info!($($arg)*);
        }
    };
}

#[macro_export]
#[cfg(not(feature = "perf_stats"))]
macro_rules! profile_log {
    ($tick:expr, $($arg:tt)*) => {};
}
