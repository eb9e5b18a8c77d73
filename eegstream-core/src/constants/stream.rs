//! Stream Layout Constants
//!
//! Shapes of the recorded data and of the notification payloads built
//! from it.

use super::gatt::{ATT_NOTIFY_OVERHEAD, MAX_ATT_MTU};

// ===== SAMPLE LAYOUT =====

/// Channels per recorded sample.
///
/// The reference montage carries 18 bipolar EEG derivations; the
/// receiving application reassembles samples in groups of 18 scalars.
pub const CHANNELS_PER_SAMPLE: usize = 18;

/// Samples in the short baked-in recording (4 windows of 1024).
pub const RECORDING_SAMPLES_SHORT: usize = 4096;

/// Samples in the long baked-in recording (8 windows of 1024).
pub const RECORDING_SAMPLES_LONG: usize = 8192;

/// Samples per analysis window in the recording file format.
pub const SAMPLES_PER_WINDOW: usize = 1024;

// ===== CHUNKING =====

/// Default scalars per notification.
///
/// Four whole samples: 72 × 4 bytes = 288 bytes, which fits once the
/// central has negotiated an MTU of at least 291.
pub const DEFAULT_CHUNK_SCALARS: usize = CHANNELS_PER_SAMPLE * 4;

/// Hard upper bound on scalars per notification.
///
/// 128 × 4-byte scalars = 512 bytes, the largest payload the biggest
/// ATT MTU can carry.
pub const MAX_CHUNK_SCALARS: usize = 128;

/// Largest notification payload in bytes.
pub const MAX_PAYLOAD_BYTES: usize = MAX_ATT_MTU as usize - ATT_NOTIFY_OVERHEAD;

// ===== BATCHING =====

/// Whole samples emitted before an inter-batch pause.
///
/// Matches the receiver's inference window of 1024 samples.
pub const DEFAULT_BATCH_SIZE: usize = SAMPLES_PER_WINDOW;

const _: () = assert!(MAX_CHUNK_SCALARS * 4 <= MAX_PAYLOAD_BYTES);
const _: () = assert!(DEFAULT_CHUNK_SCALARS <= MAX_CHUNK_SCALARS);
