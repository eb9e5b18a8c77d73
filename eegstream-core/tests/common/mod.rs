//! Shared fixtures for scheduler integration tests
//!
//! This module provides:
//! - Synthetic stores whose values encode their own position
//! - A scripted transport sink with forced busy/error attempts
//! - Drivers that run a scheduler for a fixed number of ticks

#![allow(dead_code)]

pub mod generators;
pub mod harness;
pub mod scenarios;

pub use generators::{position_of, recording_bytes, PositionStore};
pub use harness::{run_ticks, streaming, ScriptedSink};
