//! Error Types for the Streaming Core
//!
//! ## Design Philosophy
//!
//! Errors are small and `Copy` so they can be returned from entry points
//! that run inside a timer callback without allocation:
//!
//! 1. **No Heap Allocation**: only inline integers, no `String`.
//! 2. **Copy Semantics**: errors are returned by value from hot paths.
//! 3. **Never Fatal**: nothing here stops the process. The worst outcome
//!    is a stalled stream that a fresh subscribe or reconnect recovers.
//!
//! ## Error Categories
//!
//! ### Configuration Errors (`ConfigError`)
//! Rejected at the boundary and reported synchronously to the caller.
//! They never reach scheduler state:
//! - `InvalidLength`: a mode write that is not exactly one byte
//! - `ChunkCapacity`: a pacing entry with zero or oversized capacity
//! - `MtuTooSmall`: a negotiated MTU that cannot carry one scalar
//!
//! ### Transport Errors (`TransportError`)
//! Recoverable. The scheduler rolls its cursor back and retries the same
//! chunk on the next tick. These are only ever logged.
//!
//! ```rust
//! use eegstream_core::errors::ConfigError;
//!
//! let err = ConfigError::InvalidLength { expected: 1, actual: 3 };
//! assert_eq!(
//!     format!("{}", err),
//!     "Write of 3 bytes rejected, expected 1"
//! );
//! ```

use thiserror_no_std::Error;

/// Result type for configuration-time operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors - rejected before they reach the scheduler
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A characteristic write had the wrong length
    #[error("Write of {actual} bytes rejected, expected {expected}")]
    InvalidLength {
        /// Length the characteristic accepts
        expected: usize,
        /// Length the client wrote
        actual: usize,
    },

    /// Chunk capacity is zero or above the payload limit
    #[error("Chunk capacity {capacity} outside [1, {max}]")]
    ChunkCapacity {
        /// Requested scalars per notification
        capacity: usize,
        /// Largest capacity the payload buffer holds
        max: usize,
    },

    /// Negotiated MTU leaves no room for a single scalar
    #[error("MTU {mtu} cannot carry a single scalar")]
    MtuTooSmall {
        /// The negotiated ATT MTU
        mtu: u16,
    },

    /// Notification interval of zero milliseconds
    #[error("Notification interval must be non-zero")]
    ZeroInterval,

    /// Batch size of zero samples
    #[error("Batch size must be non-zero")]
    ZeroBatchSize,

    /// Sample store holds no samples
    #[error("Sample store is empty")]
    EmptyStore,

    /// Sample store records have no channels
    #[error("Sample store has no channels")]
    NoChannels,

    /// Flat value slice is not a whole number of samples
    #[error("{values} values do not divide into samples of {channels} channels")]
    RaggedStore {
        /// Number of scalars supplied
        values: usize,
        /// Channels per sample
        channels: usize,
    },
}

/// Transient send failure reported by the transport layer
///
/// `code` is whatever the stack returned (negative errno on Zephyr).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Transport error code {code}")]
pub struct TransportError {
    /// Stack-specific error code
    pub code: i32,
}

impl TransportError {
    /// Wrap a raw error code
    pub const fn new(code: i32) -> Self {
        Self { code }
    }
}

/// Errors while loading a recording from disk
#[cfg(feature = "std")]
#[derive(Error, Debug)]
pub enum RecordingError {
    /// Underlying read failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Fewer than 16 header bytes
    #[error("Header too short: {0} bytes")]
    HeaderTooShort(usize),

    /// Header dimensions are non-positive or too large to address
    #[error("Invalid dimensions: {arrays} arrays x {samples} samples x {channels} channels")]
    InvalidDimensions {
        /// Arrays declared in the header
        arrays: i32,
        /// Samples per array declared in the header
        samples: i32,
        /// Channels per sample declared in the header
        channels: i32,
    },

    /// Channel count differs from the expected layout
    #[error("Unexpected channel count {actual}, expected {expected}")]
    ChannelMismatch {
        /// Channels the caller expects
        expected: usize,
        /// Channels found in the header
        actual: usize,
    },

    /// File ends before a section is complete
    #[error("Truncated {section}: expected {expected} bytes, found {found}")]
    Truncated {
        /// Which section was cut short
        section: &'static str,
        /// Bytes the header promised
        expected: usize,
        /// Bytes actually present
        found: usize,
    },

    /// Seeking to the first labelled array needs labels
    #[error("Recording carries no labels")]
    LabelsMissing,

    /// No array is labelled `1`
    #[error("No array labelled 1 found")]
    NoLabelledArray,

    /// Selection produced zero samples
    #[error("Recording contains no samples")]
    Empty,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidLength { expected, actual } =>
                defmt::write!(fmt, "Write of {} bytes, expected {}", actual, expected),
            Self::ChunkCapacity { capacity, max } =>
                defmt::write!(fmt, "Chunk capacity {} outside [1, {}]", capacity, max),
            Self::MtuTooSmall { mtu } =>
                defmt::write!(fmt, "MTU {} too small", mtu),
            Self::ZeroInterval =>
                defmt::write!(fmt, "Zero interval"),
            Self::ZeroBatchSize =>
                defmt::write!(fmt, "Zero batch size"),
            Self::EmptyStore =>
                defmt::write!(fmt, "Empty store"),
            Self::NoChannels =>
                defmt::write!(fmt, "No channels"),
            Self::RaggedStore { values, channels } =>
                defmt::write!(fmt, "{} values not divisible by {} channels", values, channels),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TransportError {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Transport error {}", self.code)
    }
}
