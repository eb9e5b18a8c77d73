//! Timing Constants
//!
//! Notification intervals for each operating mode, in milliseconds.

/// Interval between notifications in `Normal` mode.
pub const NOTIFY_INTERVAL_NORMAL_MS: u32 = 150;

/// Interval between notifications in `LowPower` mode.
///
/// Trades throughput for radio duty cycle.
pub const NOTIFY_INTERVAL_LOW_POWER_MS: u32 = 1000;

/// Interval between notifications in `Performance` mode.
pub const NOTIFY_INTERVAL_PERFORMANCE_MS: u32 = 200;

/// Optional pause between batches.
///
/// Not applied unless configured; by default the pause after a batch is
/// one notification interval.
pub const BATCH_INTERVAL_MS: u32 = 4000;
