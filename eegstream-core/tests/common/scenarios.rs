//! Named stream configurations used across tests

use eegstream_core::constants::{CHANNELS_PER_SAMPLE, RECORDING_SAMPLES_LONG};
use eegstream_core::pacing::{Pacing, PacingPolicy};
use eegstream_core::StreamConfig;

use super::generators::PositionStore;

/// Long recording, 18 channels, firmware defaults
pub fn firmware_default() -> (PositionStore, StreamConfig) {
    (PositionStore::new(RECORDING_SAMPLES_LONG, CHANNELS_PER_SAMPLE), StreamConfig::default())
}

/// Short store with small chunks so wrap-around happens quickly
pub fn small_wrapping() -> (PositionStore, StreamConfig) {
    let config = StreamConfig::default()
        .with_batch_size(64)
        .with_policy(PacingPolicy::uniform(Pacing::new(20, 7)));
    (PositionStore::new(10, 4), config)
}
