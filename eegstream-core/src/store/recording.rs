//! Recording file loader
//!
//! Loads the binary recording format produced by the dataset export
//! tooling and exposes it as a [`SampleStore`] of `f32` readings.
//!
//! ## Format
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │ header: 4 × i32 LE                            │
//! │   arrays, channels, samples_per_array, labels │
//! ├───────────────────────────────────────────────┤
//! │ arrays × samples_per_array × channels × f32 LE│
//! │   ordered (array, sample, channel)            │
//! ├───────────────────────────────────────────────┤
//! │ arrays × i32 LE labels (only if labels == 1)  │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Selection
//!
//! Firmware images only have room for a slice of a recording. The loader
//! can cap the sample count and start a few arrays before the first
//! array labelled `1`, so the streamed slice contains the labelled event
//! with some lead-in.
//!
//! ```rust,no_run
//! use eegstream_core::store::{RecordingOptions, RecordingStore, SampleStore};
//!
//! let options = RecordingOptions::default()
//!     .with_max_samples(8192)
//!     .starting_at_first_label(5);
//! let store = RecordingStore::from_path("data.bin", &options)?;
//! println!("{} samples of {} channels", store.len(), store.channels());
//! # Ok::<(), eegstream_core::errors::RecordingError>(())
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::SampleStore;
use crate::constants::CHANNELS_PER_SAMPLE;
use crate::errors::RecordingError;

const HEADER_BYTES: usize = 16;
const NO_LABEL: i32 = -1;

/// Dimensions declared by a recording header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordingHeader {
    /// Number of arrays (analysis windows)
    pub arrays: usize,
    /// Channels per sample
    pub channels: usize,
    /// Samples in each array
    pub samples_per_array: usize,
    /// Whether a label section follows the data
    pub labels_present: bool,
}

/// How much of a recording to load
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RecordingOptions {
    /// Keep at most this many samples
    pub max_samples: Option<usize>,
    /// Start near the first array labelled `1`
    pub start_at_first_label: bool,
    /// Arrays of lead-in kept before the labelled array
    pub lead_arrays: usize,
    /// Reject files whose channel count differs
    pub expected_channels: Option<usize>,
}

impl Default for RecordingOptions {
    fn default() -> Self {
        Self {
            max_samples: None,
            start_at_first_label: false,
            lead_arrays: 5,
            expected_channels: Some(CHANNELS_PER_SAMPLE),
        }
    }
}

impl RecordingOptions {
    /// Cap the number of loaded samples
    pub fn with_max_samples(mut self, max: usize) -> Self {
        self.max_samples = Some(max);
        self
    }

    /// Start `lead_arrays` arrays before the first labelled array
    pub fn starting_at_first_label(mut self, lead_arrays: usize) -> Self {
        self.start_at_first_label = true;
        self.lead_arrays = lead_arrays;
        self
    }

    /// Accept any channel count (`None`) or require a specific one
    pub fn with_expected_channels(mut self, channels: Option<usize>) -> Self {
        self.expected_channels = channels;
        self
    }
}

/// Recording held in memory
#[derive(Debug, Clone)]
pub struct RecordingStore {
    header: RecordingHeader,
    values: Vec<f32>,
    labels: Vec<i32>,
    first_array: usize,
}

impl RecordingStore {
    /// Load a recording file
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        options: &RecordingOptions,
    ) -> Result<Self, RecordingError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), options)
    }

    /// Load a recording from any byte source
    pub fn from_reader<R: Read>(
        mut reader: R,
        options: &RecordingOptions,
    ) -> Result<Self, RecordingError> {
        let header = read_header(&mut reader)?;

        if let Some(expected) = options.expected_channels {
            if header.channels != expected {
                return Err(RecordingError::ChannelMismatch {
                    expected,
                    actual: header.channels,
                });
            }
        }

        let invalid = || RecordingError::InvalidDimensions {
            arrays: header.arrays as i32,
            samples: header.samples_per_array as i32,
            channels: header.channels as i32,
        };
        let data_bytes = header
            .arrays
            .checked_mul(header.samples_per_array)
            .and_then(|n| n.checked_mul(header.channels))
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(invalid)?;
        let label_bytes = header.arrays.checked_mul(4).ok_or_else(invalid)?;

        let data = read_section(&mut reader, data_bytes, "samples")?;

        let labels: Vec<i32> = if header.labels_present {
            read_section(&mut reader, label_bytes, "labels")?
                .chunks_exact(4)
                .map(|b| i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
                .collect()
        } else {
            vec![NO_LABEL; header.arrays]
        };

        let first_array = if options.start_at_first_label {
            if !header.labels_present {
                return Err(RecordingError::LabelsMissing);
            }
            let labelled = labels
                .iter()
                .position(|&label| label == 1)
                .ok_or(RecordingError::NoLabelledArray)?;
            labelled.saturating_sub(options.lead_arrays)
        } else {
            0
        };

        let arrays_wanted = match options.max_samples {
            Some(max) => max.div_ceil(header.samples_per_array),
            None => header.arrays,
        };
        let end_array = first_array.saturating_add(arrays_wanted).min(header.arrays);

        let mut samples = (end_array - first_array) * header.samples_per_array;
        if let Some(max) = options.max_samples {
            samples = samples.min(max);
        }
        if samples == 0 {
            return Err(RecordingError::Empty);
        }

        let first_value = first_array * header.samples_per_array * header.channels;
        let last_value = first_value + samples * header.channels;
        let values = data[first_value * 4..last_value * 4]
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();

        Ok(Self {
            header,
            values,
            labels: labels[first_array..end_array].to_vec(),
            first_array,
        })
    }

    /// Header of the source file
    pub fn header(&self) -> &RecordingHeader {
        &self.header
    }

    /// Index in the source file of the first loaded array
    pub fn first_array(&self) -> usize {
        self.first_array
    }

    /// Label of the array containing `sample`, if the file had labels
    pub fn label_of(&self, sample: usize) -> Option<i32> {
        if !self.header.labels_present {
            return None;
        }
        self.labels.get(sample / self.header.samples_per_array).copied()
    }
}

impl SampleStore for RecordingStore {
    type Scalar = f32;

    fn len(&self) -> usize {
        self.values.len() / self.header.channels
    }

    fn channels(&self) -> usize {
        self.header.channels
    }

    fn get(&self, sample: usize, channel: usize) -> f32 {
        self.values[sample * self.header.channels + channel]
    }
}

fn read_header<R: Read>(reader: &mut R) -> Result<RecordingHeader, RecordingError> {
    let mut raw = Vec::with_capacity(HEADER_BYTES);
    reader.by_ref().take(HEADER_BYTES as u64).read_to_end(&mut raw)?;
    if raw.len() < HEADER_BYTES {
        return Err(RecordingError::HeaderTooShort(raw.len()));
    }

    let field = |i: usize| i32::from_le_bytes([raw[i * 4], raw[i * 4 + 1], raw[i * 4 + 2], raw[i * 4 + 3]]);
    let (arrays, channels, samples, labels) = (field(0), field(1), field(2), field(3));

    if arrays <= 0 || channels <= 0 || samples <= 0 {
        return Err(RecordingError::InvalidDimensions { arrays, samples, channels });
    }

    Ok(RecordingHeader {
        arrays: arrays as usize,
        channels: channels as usize,
        samples_per_array: samples as usize,
        labels_present: labels == 1,
    })
}

fn read_section<R: Read>(
    reader: &mut R,
    len: usize,
    section: &'static str,
) -> Result<Vec<u8>, RecordingError> {
    // Grows with what is actually read; `len` comes from an untrusted header
    let mut buf = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut buf)?;
    if buf.len() < len {
        return Err(RecordingError::Truncated {
            section,
            expected: len,
            found: buf.len(),
        });
    }
    Ok(buf)
}
