//! JSON host configuration
//!
//! One file describes the stream pacing, the simulated link, and the
//! recording to replay. Every section is optional; missing fields take
//! the firmware defaults.
//!
//! ```json
//! {
//!   "stream": {
//!     "batch_size": 1024,
//!     "batch_pause_ms": 4000,
//!     "initial_mode": "low_power",
//!     "policy": {
//!       "normal":      { "interval_ms": 150,  "chunk_capacity": 72 },
//!       "low_power":   { "interval_ms": 1000, "chunk_capacity": 72 },
//!       "performance": { "interval_ms": 200,  "chunk_capacity": 72 }
//!     }
//!   },
//!   "link": { "queue_depth": 4, "drain_interval_ms": 50, "drain_per_interval": 1, "mtu": 247,
//!             "receive_capacity": 4096 },
//!   "recording": { "path": "data.bin", "options": { "max_samples": 8192 } }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use eegstream_core::constants::{DEFAULT_ATT_MTU, MAX_ATT_MTU};
use eegstream_core::{RecordingOptions, RecordingStore, SampleStore, StreamConfig};
use serde::{Deserialize, Serialize};

use crate::link::DEFAULT_RECEIVE_CAPACITY;
use crate::HostError;

/// Settings for the simulated notification link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Notifications the TX queue holds before reporting busy
    pub queue_depth: usize,
    /// How often the simulated radio releases queued packets
    pub drain_interval_ms: u64,
    /// Packets released per drain
    pub drain_per_interval: usize,
    /// MTU reported on connect
    pub mtu: u16,
    /// Delivered payloads kept for the central before the oldest is dropped
    pub receive_capacity: usize,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            queue_depth: 4,
            drain_interval_ms: 50,
            drain_per_interval: 1,
            mtu: MAX_ATT_MTU,
            receive_capacity: DEFAULT_RECEIVE_CAPACITY,
        }
    }
}

impl LinkConfig {
    fn validate(&self) -> Result<(), HostError> {
        if self.queue_depth == 0 {
            return Err(HostError::Link("queue_depth must be at least 1"));
        }
        if self.drain_interval_ms == 0 {
            return Err(HostError::Link("drain_interval_ms must be at least 1"));
        }
        if self.drain_per_interval == 0 {
            return Err(HostError::Link("drain_per_interval must be at least 1"));
        }
        if self.receive_capacity == 0 {
            return Err(HostError::Link("receive_capacity must be at least 1"));
        }
        if self.mtu < DEFAULT_ATT_MTU {
            return Err(HostError::Link("mtu must be at least 23"));
        }
        Ok(())
    }
}

/// Recording file to replay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingSource {
    /// Path to the recording, relative to the working directory
    pub path: PathBuf,
    /// Which part of the file to load
    #[serde(default)]
    pub options: RecordingOptions,
}

impl RecordingSource {
    /// Load the configured part of the recording
    pub fn open(&self) -> Result<RecordingStore, HostError> {
        let store = RecordingStore::from_path(&self.path, &self.options)?;
        log::info!(
            "Loaded {} samples from {} starting at array {}",
            store.len(),
            self.path.display(),
            store.first_array()
        );
        Ok(store)
    }
}

/// Complete host configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Scheduler settings
    pub stream: StreamConfig,
    /// Simulated link settings
    pub link: LinkConfig,
    /// Recording to replay; synthetic data when absent
    pub recording: Option<RecordingSource>,
}

impl HostConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, HostError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, HostError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check every section
    pub fn validate(&self) -> Result<(), HostError> {
        self.stream.validate()?;
        self.link.validate()
    }

    /// Serialize back to pretty JSON
    pub fn to_json_string(&self) -> Result<String, HostError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eegstream_core::{ConfigError, Mode};
    use std::io::Write;

    #[test]
    fn empty_document_uses_defaults() {
        let config = HostConfig::from_json_str("{}").unwrap();
        assert_eq!(config, HostConfig::default());
        assert_eq!(config.stream.policy.normal.interval_ms, 150);
        assert!(config.recording.is_none());
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let json = r#"{
            "stream": { "batch_size": 256, "initial_mode": "performance" },
            "link": { "mtu": 23 }
        }"#;
        let config = HostConfig::from_json_str(json).unwrap();

        assert_eq!(config.stream.batch_size, 256);
        assert_eq!(config.stream.initial_mode, Mode::Performance);
        assert_eq!(config.stream.batch_pause_ms, None);
        assert_eq!(config.link.mtu, 23);
        assert_eq!(config.link.queue_depth, 4);
    }

    #[test]
    fn recording_section() {
        let json = r#"{ "recording": { "path": "data.bin", "options": { "max_samples": 4096 } } }"#;
        let config = HostConfig::from_json_str(json).unwrap();
        let recording = config.recording.unwrap();

        assert_eq!(recording.path, PathBuf::from("data.bin"));
        assert_eq!(recording.options.max_samples, Some(4096));
        assert_eq!(recording.options.lead_arrays, 5);
    }

    #[test]
    fn invalid_values_rejected() {
        let err = HostConfig::from_json_str(r#"{ "stream": { "batch_size": 0 } }"#).unwrap_err();
        assert!(matches!(err, HostError::Invalid(ConfigError::ZeroBatchSize)));

        let err = HostConfig::from_json_str(r#"{ "link": { "queue_depth": 0 } }"#).unwrap_err();
        assert!(matches!(err, HostError::Link(_)));

        let err = HostConfig::from_json_str(r#"{ "link": { "receive_capacity": 0 } }"#).unwrap_err();
        assert!(matches!(err, HostError::Link(_)));

        let err = HostConfig::from_json_str(r#"{ "stream": "#).unwrap_err();
        assert!(matches!(err, HostError::Config(_)));
    }

    #[test]
    fn round_trips_through_a_file() {
        let config = HostConfig {
            stream: StreamConfig::default().with_batch_pause_ms(4000),
            ..HostConfig::default()
        };

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(config.to_json_string().unwrap().as_bytes()).unwrap();
        file.flush().unwrap();

        assert_eq!(HostConfig::from_file(file.path()).unwrap(), config);
    }
}
