//! Paced streaming of recorded EEG over a notification channel
//!
//! Replays a fixed, multi-channel recording to a connected central in
//! MTU-sized chunks, at a rate the central picks through a one-byte mode
//! write. Runs on a microcontroller next to a radio stack; the same state
//! machine drives the host simulator.
//!
//! Key constraints:
//! - No heap allocation in the hot path
//! - No timer or radio dependency: every entry point returns what the
//!   event loop should do next
//! - A failed send never loses or duplicates data
//!
//! ```no_run
//! use eegstream_core::{ControlEvent, Scheduler, StreamConfig};
//! use eegstream_core::store::StaticStore;
//! # use eegstream_core::{errors::TransportError, transport::TransportSink};
//! # struct Radio;
//! # impl TransportSink for Radio {
//! #     fn try_send(&mut self, _: &[u8]) -> nb::Result<(), TransportError> { Ok(()) }
//! #     fn is_subscribed(&self) -> bool { true }
//! # }
//! # static RECORDING: [[f32; 18]; 4096] = [[0.0; 18]; 4096];
//!
//! let mut scheduler = Scheduler::new(StaticStore::new(&RECORDING), StreamConfig::default())?;
//! let mut radio = Radio;
//!
//! // Feed lifecycle events in order; arm the timer as told
//! let timer = scheduler.handle(ControlEvent::Connected { mtu: 517 }, &mut radio)?;
//! # Ok::<(), eegstream_core::ConfigError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod codec;
pub mod config;
pub mod constants;
pub mod controller;
pub mod errors;
pub mod pacing;
pub mod scheduler;
pub mod store;
pub mod transport;

// Public API
pub use config::StreamConfig;
pub use controller::ControlEvent;
pub use errors::{ConfigError, ConfigResult, TransportError};
pub use pacing::{Mode, Pacing, PacingPolicy};
pub use scheduler::{Cursor, Scheduler, StreamState, StreamStats, Tick, TickOutcome, TimerCommand};
pub use store::{FlatStore, SampleStore, StaticStore};
pub use transport::TransportSink;

#[cfg(feature = "std")]
pub use errors::RecordingError;
#[cfg(feature = "std")]
pub use store::{RecordingOptions, RecordingStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
