//! Synthetic sample sources
//!
//! Every value identifies the slot it came from, so a delivered payload
//! can be checked for gaps, duplicates and ordering without a reference
//! copy of the data.

use eegstream_core::store::SampleStore;

/// Store where `get(s, c) == s * 100 + c`
///
/// Exact in `f32` for every index a test uses (below 2^24). Channels must
/// stay under 100 for `position_of` to invert the encoding.
#[derive(Debug, Clone, Copy)]
pub struct PositionStore {
    pub samples: usize,
    pub channels: usize,
}

impl PositionStore {
    pub fn new(samples: usize, channels: usize) -> Self {
        assert!(channels < 100);
        Self { samples, channels }
    }
}

impl SampleStore for PositionStore {
    type Scalar = f32;

    fn len(&self) -> usize {
        self.samples
    }

    fn channels(&self) -> usize {
        self.channels
    }

    fn get(&self, sample: usize, channel: usize) -> f32 {
        (sample * 100 + channel) as f32
    }
}

/// Invert the `PositionStore` encoding
pub fn position_of(value: f32) -> (usize, usize) {
    let raw = value as usize;
    (raw / 100, raw % 100)
}

/// Recording file bytes with `value = array * 1000 + sample * 100 + channel`
pub fn recording_bytes(arrays: i32, channels: i32, samples: i32, labels: Option<&[i32]>) -> Vec<u8> {
    let mut bytes = Vec::new();
    for field in [arrays, channels, samples, labels.is_some() as i32] {
        bytes.extend_from_slice(&field.to_le_bytes());
    }
    for a in 0..arrays {
        for s in 0..samples {
            for c in 0..channels {
                let value = (a * 1000 + s * 100 + c) as f32;
                bytes.extend_from_slice(&value.to_le_bytes());
            }
        }
    }
    for label in labels.unwrap_or(&[]) {
        bytes.extend_from_slice(&label.to_le_bytes());
    }
    bytes
}
