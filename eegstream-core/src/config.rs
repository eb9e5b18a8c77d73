//! Scheduler configuration
//!
//! Everything the scheduler needs besides the sample store. Values are
//! validated once, when the scheduler is built.
//!
//! ```rust
//! use eegstream_core::config::StreamConfig;
//! use eegstream_core::pacing::{Mode, Pacing, PacingPolicy};
//!
//! let config = StreamConfig::default()
//!     .with_batch_size(256)
//!     .with_policy(PacingPolicy::uniform(Pacing::new(50, 18)))
//!     .with_initial_mode(Mode::Performance);
//! assert!(config.validate().is_ok());
//! ```

use fugit::MillisDurationU32;

use crate::constants::DEFAULT_BATCH_SIZE;
use crate::errors::{ConfigError, ConfigResult};
use crate::pacing::{Mode, PacingPolicy};

/// Runtime configuration of the streaming scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StreamConfig {
    /// Whole samples per batch before the inter-batch pause
    pub batch_size: usize,
    /// Pause after a batch; `None` pauses for one notification interval
    pub batch_pause_ms: Option<u32>,
    /// Mode → pacing table
    pub policy: PacingPolicy,
    /// Mode in effect before the central writes one
    pub initial_mode: Mode,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            batch_pause_ms: None,
            policy: PacingPolicy::default(),
            initial_mode: Mode::Normal,
        }
    }
}

impl StreamConfig {
    /// Set the batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set a fixed inter-batch pause
    pub fn with_batch_pause_ms(mut self, pause_ms: u32) -> Self {
        self.batch_pause_ms = Some(pause_ms);
        self
    }

    /// Replace the pacing table
    pub fn with_policy(mut self, policy: PacingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Mode used until the first mode write
    pub fn with_initial_mode(mut self, mode: Mode) -> Self {
        self.initial_mode = mode;
        self
    }

    /// Configured inter-batch pause, if any
    pub fn batch_pause(&self) -> Option<MillisDurationU32> {
        self.batch_pause_ms.map(MillisDurationU32::millis)
    }

    /// Check every value
    pub fn validate(&self) -> ConfigResult<()> {
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        if self.batch_pause_ms == Some(0) {
            return Err(ConfigError::ZeroInterval);
        }
        self.policy.validate()
    }
}
