//! Pacing Policy
//!
//! Maps the operating mode selected by the central to a notification
//! interval and a chunk capacity. The mapping is a pure table lookup and
//! is total: any byte the central writes resolves to some entry, with
//! unknown codes falling back to `Normal` rather than halting the stream.
//!
//! | Byte | Mode          | Interval | Capacity |
//! |------|---------------|----------|----------|
//! | 0    | `Normal`      | 150 ms   | 72       |
//! | 1    | `LowPower`    | 1000 ms  | 72       |
//! | 2    | `Performance` | 200 ms   | 72       |
//! | *    | `Normal`      | 150 ms   | 72       |
//!
//! ```rust
//! use eegstream_core::pacing::{Mode, PacingPolicy};
//!
//! let policy = PacingPolicy::default();
//! assert_eq!(policy.resolve_byte(255), policy.resolve(Mode::Normal));
//! assert_eq!(policy.resolve(Mode::LowPower).interval_ms, 1000);
//! ```

use fugit::MillisDurationU32;

use crate::constants::{
    DEFAULT_CHUNK_SCALARS, MAX_CHUNK_SCALARS, NOTIFY_INTERVAL_LOW_POWER_MS,
    NOTIFY_INTERVAL_NORMAL_MS, NOTIFY_INTERVAL_PERFORMANCE_MS,
};
use crate::errors::{ConfigError, ConfigResult};

/// Operating mode selected through the configuration characteristic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Mode {
    /// Default pacing
    #[default]
    Normal = 0,
    /// Longest interval, least radio time
    LowPower = 1,
    /// Shorter interval than low power
    Performance = 2,
}

impl Mode {
    /// Every mode, in byte order
    pub const ALL: [Mode; 3] = [Mode::Normal, Mode::LowPower, Mode::Performance];

    /// Decode a mode byte; unknown values mean `Normal`
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            1 => Mode::LowPower,
            2 => Mode::Performance,
            _ => Mode::Normal,
        }
    }

    /// Byte the central writes to select this mode
    pub const fn as_byte(self) -> u8 {
        self as u8
    }
}

/// Interval and chunk capacity in effect for one mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pacing {
    /// Time between notifications in milliseconds
    pub interval_ms: u32,
    /// Scalars per notification before MTU clamping
    pub chunk_capacity: usize,
}

impl Pacing {
    /// New pacing entry
    pub const fn new(interval_ms: u32, chunk_capacity: usize) -> Self {
        Self { interval_ms, chunk_capacity }
    }

    /// Interval as a timer duration
    pub fn interval(&self) -> MillisDurationU32 {
        MillisDurationU32::millis(self.interval_ms)
    }

    /// Reject entries the scheduler cannot honour
    pub fn validate(&self) -> ConfigResult<()> {
        if self.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.chunk_capacity == 0 || self.chunk_capacity > MAX_CHUNK_SCALARS {
            return Err(ConfigError::ChunkCapacity {
                capacity: self.chunk_capacity,
                max: MAX_CHUNK_SCALARS,
            });
        }
        Ok(())
    }
}

/// Mode → pacing table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PacingPolicy {
    /// Entry for `Mode::Normal` and every unknown code
    pub normal: Pacing,
    /// Entry for `Mode::LowPower`
    pub low_power: Pacing,
    /// Entry for `Mode::Performance`
    pub performance: Pacing,
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self {
            normal: Pacing::new(NOTIFY_INTERVAL_NORMAL_MS, DEFAULT_CHUNK_SCALARS),
            low_power: Pacing::new(NOTIFY_INTERVAL_LOW_POWER_MS, DEFAULT_CHUNK_SCALARS),
            performance: Pacing::new(NOTIFY_INTERVAL_PERFORMANCE_MS, DEFAULT_CHUNK_SCALARS),
        }
    }
}

impl PacingPolicy {
    /// Same pacing for every mode
    pub const fn uniform(pacing: Pacing) -> Self {
        Self {
            normal: pacing,
            low_power: pacing,
            performance: pacing,
        }
    }

    /// Replace the entry for `mode`
    pub fn with_entry(mut self, mode: Mode, pacing: Pacing) -> Self {
        match mode {
            Mode::Normal => self.normal = pacing,
            Mode::LowPower => self.low_power = pacing,
            Mode::Performance => self.performance = pacing,
        }
        self
    }

    /// Pacing for `mode`
    pub fn resolve(&self, mode: Mode) -> Pacing {
        match mode {
            Mode::Normal => self.normal,
            Mode::LowPower => self.low_power,
            Mode::Performance => self.performance,
        }
    }

    /// Pacing for a raw mode byte
    pub fn resolve_byte(&self, byte: u8) -> Pacing {
        self.resolve(Mode::from_byte(byte))
    }

    /// Validate every entry
    pub fn validate(&self) -> ConfigResult<()> {
        Mode::ALL.iter().try_for_each(|mode| self.resolve(*mode).validate())
    }
}
