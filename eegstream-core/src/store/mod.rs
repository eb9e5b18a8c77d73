//! Read-only Sample Sources
//!
//! The scheduler reads recorded data through the [`SampleStore`] trait so
//! the firmware can point it at a baked-in array while tests substitute a
//! handful of synthetic samples.
//!
//! ## Module Organization
//!
//! - Core trait and slice adapters (this file)
//! - `recording` - Recording file loader (requires `std`)
//!
//! ## Contract
//!
//! - `get(sample, channel)` is defined for `sample < len()` and
//!   `channel < channels()`. Callers wrap the sample index themselves.
//! - Stores never change after construction. There is no error path:
//!   bounds are the scheduler's job.

use crate::codec::Scalar;
use crate::errors::{ConfigError, ConfigResult};

#[cfg(feature = "std")]
pub mod recording;

#[cfg(feature = "std")]
pub use recording::{RecordingOptions, RecordingStore};

/// Fixed, circular, read-only array of multi-channel samples
pub trait SampleStore {
    /// Value type of each channel reading
    type Scalar: Scalar;

    /// Number of samples (L)
    fn len(&self) -> usize;

    /// Channels per sample (C)
    fn channels(&self) -> usize;

    /// Reading of `channel` in sample `sample`
    fn get(&self, sample: usize, channel: usize) -> Self::Scalar;

    /// Whether the store holds no samples
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: SampleStore + ?Sized> SampleStore for &S {
    type Scalar = S::Scalar;

    fn len(&self) -> usize {
        (**self).len()
    }

    fn channels(&self) -> usize {
        (**self).channels()
    }

    fn get(&self, sample: usize, channel: usize) -> Self::Scalar {
        (**self).get(sample, channel)
    }
}

/// Store over a compiled-in array of fixed-width records
///
/// ```rust
/// use eegstream_core::store::{SampleStore, StaticStore};
///
/// static DATA: [[f32; 2]; 3] = [[0.0, 0.1], [1.0, 1.1], [2.0, 2.1]];
///
/// let store = StaticStore::new(&DATA);
/// assert_eq!(store.len(), 3);
/// assert_eq!(store.get(2, 1), 2.1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StaticStore<'a, T, const C: usize> {
    samples: &'a [[T; C]],
}

impl<'a, T, const C: usize> StaticStore<'a, T, C> {
    /// Wrap a slice of records
    pub const fn new(samples: &'a [[T; C]]) -> Self {
        Self { samples }
    }
}

impl<'a, T: Scalar, const C: usize> SampleStore for StaticStore<'a, T, C> {
    type Scalar = T;

    fn len(&self) -> usize {
        self.samples.len()
    }

    fn channels(&self) -> usize {
        C
    }

    fn get(&self, sample: usize, channel: usize) -> T {
        self.samples[sample][channel]
    }
}

/// Store over channel-interleaved values
///
/// Useful when the recording arrives as one flat buffer, e.g. straight
/// from a file.
#[derive(Debug, Clone, Copy)]
pub struct FlatStore<'a, T> {
    values: &'a [T],
    channels: usize,
}

impl<'a, T> FlatStore<'a, T> {
    /// Wrap `values` laid out as `[s0c0, s0c1, .., s1c0, ..]`
    pub fn new(values: &'a [T], channels: usize) -> ConfigResult<Self> {
        if channels == 0 {
            return Err(ConfigError::NoChannels);
        }
        if values.len() % channels != 0 {
            return Err(ConfigError::RaggedStore {
                values: values.len(),
                channels,
            });
        }
        Ok(Self { values, channels })
    }
}

impl<'a, T: Scalar> SampleStore for FlatStore<'a, T> {
    type Scalar = T;

    fn len(&self) -> usize {
        self.values.len() / self.channels
    }

    fn channels(&self) -> usize {
        self.channels
    }

    fn get(&self, sample: usize, channel: usize) -> T {
        self.values[sample * self.channels + channel]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_store_indexing() {
        let values = [0i16, 1, 2, 10, 11, 12];
        let store = FlatStore::new(&values, 3).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.channels(), 3);
        assert_eq!(store.get(1, 0), 10);
        assert_eq!(store.get(0, 2), 2);
    }

    #[test]
    fn flat_store_rejects_bad_shapes() {
        let values = [0.0f32; 7];
        assert_eq!(
            FlatStore::new(&values, 3).unwrap_err(),
            ConfigError::RaggedStore { values: 7, channels: 3 }
        );
        assert_eq!(FlatStore::new(&values, 0).unwrap_err(), ConfigError::NoChannels);
    }

    #[test]
    fn references_are_stores() {
        let records = [[1.0f32, 2.0], [3.0, 4.0]];
        let store = StaticStore::new(&records);

        fn last_value<S: SampleStore>(store: S) -> S::Scalar {
            store.get(store.len() - 1, store.channels() - 1)
        }

        assert_eq!(last_value(&store), 4.0);
        assert!(!store.is_empty());
    }
}
