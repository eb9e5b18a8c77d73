//! Host Runtime for eegstream
//!
//! ## Overview
//!
//! Runs the streaming scheduler off-target: a tokio event loop owns the
//! scheduler and its timer, a simulated link plays the radio and the
//! central, and a JSON file supplies the configuration. Everything the
//! firmware does between a connect and a disconnect can be exercised
//! here, including back-pressure and injected send failures.
//!
//! ## Components
//!
//! | Module   | Role                                                    |
//! |----------|---------------------------------------------------------|
//! | `config` | `HostConfig` JSON: stream pacing, link, recording       |
//! | `link`   | `SimulatedLink`: bounded TX queue, MTU check, failures  |
//! | `driver` | `StreamDriver` task and its `DriverHandle`              |
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use eegstream_core::constants::CCC_NOTIFY;
//! use eegstream_host::{HostConfig, HostEvent, SimulatedLink, StreamDriver};
//!
//! # async fn demo() -> Result<(), eegstream_host::HostError> {
//! let config = HostConfig::from_file("stream.json")?;
//! let Some(source) = &config.recording else { return Ok(()) };
//! let store = source.open()?;
//!
//! let link = SimulatedLink::from_config(&config.link);
//! let handle = StreamDriver::from_config(&config, store, link.clone())?.spawn();
//!
//! handle.send(HostEvent::Connected { mtu: config.link.mtu }).await?;
//! link.set_subscribed(true);
//! handle.send(HostEvent::Subscription(CCC_NOTIFY)).await?;
//!
//! let stats = handle.shutdown().await?;
//! println!("{} chunks sent", stats.chunks_sent);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod driver;
pub mod link;

pub use config::{HostConfig, LinkConfig, RecordingSource};
pub use driver::{DriverHandle, DriverStatus, HostEvent, StreamDriver};
pub use link::{InjectedFailure, LinkStats, SimulatedLink};

use eegstream_core::{ConfigError, RecordingError};
use thiserror::Error;

/// Host runtime errors
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid stream settings: {0}")]
    Invalid(#[from] ConfigError),

    #[error("Invalid link settings: {0}")]
    Link(&'static str),

    #[error("Recording error: {0}")]
    Recording(#[from] RecordingError),

    #[error("Stream driver stopped")]
    DriverClosed,
}
