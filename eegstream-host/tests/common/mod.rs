//! Shared fixtures for driver tests

#![allow(dead_code)]

use eegstream_core::constants::CCC_NOTIFY;
use eegstream_core::{SampleStore, StreamConfig};
use eegstream_host::{DriverHandle, HostEvent, SimulatedLink, StreamDriver};
use eegstream_core::Scheduler;

/// Store where `get(s, c) == s * 100 + c`
#[derive(Debug, Clone, Copy)]
pub struct RampStore {
    pub samples: usize,
    pub channels: usize,
}

impl SampleStore for RampStore {
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

pub fn position_of(value: f32) -> (usize, usize) {
    let raw = value as usize;
    (raw / 100, raw % 100)
}

/// Long 18-channel store
pub fn eeg_store() -> RampStore {
    RampStore { samples: 8192, channels: 18 }
}

/// Driver over `link`, not yet connected
pub fn spawn(store: RampStore, config: StreamConfig, link: &SimulatedLink) -> DriverHandle {
    let scheduler = Scheduler::new(store, config).unwrap();
    StreamDriver::new(scheduler, link.clone()).spawn()
}

/// Connect at the link's MTU and enable notifications
pub async fn connect_and_subscribe(handle: &DriverHandle, link: &SimulatedLink) {
    handle.send(HostEvent::Connected { mtu: link.mtu() }).await.unwrap();
    link.set_subscribed(true);
    handle.send(HostEvent::Subscription(CCC_NOTIFY)).await.unwrap();
}
