//! Constants for the Streaming Core
//!
//! Every numeric value the scheduler relies on lives here, grouped by
//! domain, so firmware and host builds agree on the wire layout.
//!
//! ## Organization
//!
//! - **Stream**: sample layout, chunk and batch sizing
//! - **Timing**: notification intervals per operating mode
//! - **GATT**: ATT overhead, MTU bounds, service identity
//!
//! ## Usage Guidelines
//!
//! 1. Use these constants instead of magic numbers
//! 2. Include units in names (`_MS`, `_BYTES`)
//! 3. Keep the values aligned with the receiving application

/// Sample layout, chunk capacity and batch sizing.
pub mod stream;

/// Notification intervals and the optional inter-batch pause.
pub mod timing;

/// ATT framing limits and the advertised service identity.
pub mod gatt;

pub use stream::{
    CHANNELS_PER_SAMPLE, DEFAULT_BATCH_SIZE, DEFAULT_CHUNK_SCALARS,
    MAX_CHUNK_SCALARS, MAX_PAYLOAD_BYTES, RECORDING_SAMPLES_LONG,
    RECORDING_SAMPLES_SHORT, SAMPLES_PER_WINDOW,
};

pub use timing::{
    NOTIFY_INTERVAL_NORMAL_MS, NOTIFY_INTERVAL_LOW_POWER_MS,
    NOTIFY_INTERVAL_PERFORMANCE_MS, BATCH_INTERVAL_MS,
};

pub use gatt::{
    ATT_NOTIFY_OVERHEAD, CCC_INDICATE, CCC_NOTIFY, DEFAULT_ATT_MTU, MAX_ATT_MTU,
};
