//! Simulated notification link
//!
//! Stands in for a radio stack on the host. Notifications go into a
//! bounded TX queue; a background task (or a test) drains the queue into
//! the central's receive buffer. A full queue reports busy, which is the
//! back-pressure signal the scheduler retries on.
//!
//! The link is cheap to clone. Every clone shares the same queue, so the
//! driver owns one clone as its sink while tests keep another to play
//! the central.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use eegstream_core::codec::{decode_payload, Scalar};
use eegstream_core::constants::ATT_NOTIFY_OVERHEAD;
use eegstream_core::{TransportError, TransportSink};
use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::config::LinkConfig;

/// Error code for a payload larger than the MTU allows (`-EMSGSIZE`)
pub const EMSGSIZE: i32 = -122;

/// Payloads the central keeps before the oldest unread one is dropped
pub const DEFAULT_RECEIVE_CAPACITY: usize = 4096;

/// One-shot failure for the next send attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectedFailure {
    /// Report busy
    Busy,
    /// Report an error code
    Error(i32),
}

/// Link counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Payloads accepted into the TX queue
    pub accepted: u64,
    /// Attempts rejected because the queue was full
    pub busy: u64,
    /// Attempts rejected with an error code
    pub errors: u64,
    /// Payloads handed to the central
    pub delivered: u64,
    /// Delivered payloads discarded unread because the central buffer was full
    pub overwritten: u64,
}

#[derive(Debug)]
struct LinkState {
    queue: VecDeque<Vec<u8>>,
    queue_depth: usize,
    mtu: u16,
    subscribed: bool,
    received: VecDeque<Vec<u8>>,
    receive_capacity: usize,
    pending_failure: Option<InjectedFailure>,
    stats: LinkStats,
}

/// Flow-controlled notification channel shared between sender and central
#[derive(Debug, Clone)]
pub struct SimulatedLink {
    state: Arc<Mutex<LinkState>>,
}

impl SimulatedLink {
    /// Link with a TX queue of `queue_depth` payloads
    pub fn new(queue_depth: usize, mtu: u16) -> Self {
        Self {
            state: Arc::new(Mutex::new(LinkState {
                queue: VecDeque::with_capacity(queue_depth),
                queue_depth,
                mtu,
                subscribed: false,
                received: VecDeque::new(),
                receive_capacity: DEFAULT_RECEIVE_CAPACITY,
                pending_failure: None,
                stats: LinkStats::default(),
            })),
        }
    }

    /// Link sized from configuration
    pub fn from_config(config: &LinkConfig) -> Self {
        Self::new(config.queue_depth, config.mtu).with_receive_capacity(config.receive_capacity)
    }

    /// Bound the central's receive buffer
    ///
    /// Once `capacity` payloads are waiting in [`take_received`], each new
    /// delivery drops the oldest one.
    ///
    /// [`take_received`]: SimulatedLink::take_received
    pub fn with_receive_capacity(self, capacity: usize) -> Self {
        self.state.lock().receive_capacity = capacity.max(1);
        self
    }

    /// Central toggles notifications
    pub fn set_subscribed(&self, subscribed: bool) {
        self.state.lock().subscribed = subscribed;
    }

    /// Renegotiate the MTU
    pub fn set_mtu(&self, mtu: u16) {
        self.state.lock().mtu = mtu;
    }

    /// Current MTU
    pub fn mtu(&self) -> u16 {
        self.state.lock().mtu
    }

    /// Fail the next send attempt
    pub fn inject(&self, failure: InjectedFailure) {
        self.state.lock().pending_failure = Some(failure);
    }

    /// Payloads waiting in the TX queue
    pub fn queued(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Release up to `n` queued payloads to the central
    ///
    /// Returns how many were released.
    pub fn drain(&self, n: usize) -> usize {
        let mut state = self.state.lock();
        let count = n.min(state.queue.len());
        for _ in 0..count {
            if let Some(payload) = state.queue.pop_front() {
                if state.received.len() >= state.receive_capacity {
                    state.received.pop_front();
                    state.stats.overwritten += 1;
                }
                state.received.push_back(payload);
            }
        }
        state.stats.delivered += count as u64;
        count
    }

    /// Release everything that is queued
    pub fn flush(&self) -> usize {
        self.drain(usize::MAX)
    }

    /// Payloads the central has received since the last call
    pub fn take_received(&self) -> Vec<Vec<u8>> {
        let received = std::mem::take(&mut self.state.lock().received);
        received.into()
    }

    /// Received payloads decoded as one scalar stream
    pub fn take_values<T: Scalar>(&self) -> Vec<T> {
        self.take_received()
            .iter()
            .flat_map(|payload| decode_payload::<T>(payload))
            .collect()
    }

    /// Counters so far
    pub fn stats(&self) -> LinkStats {
        self.state.lock().stats
    }

    /// Drain `per_tick` payloads every `every`, like a radio with a fixed
    /// connection interval
    ///
    /// Delivered payloads accumulate until the central takes them, up to
    /// the receive capacity.
    pub fn spawn_drain(&self, every: Duration, per_tick: usize) -> JoinHandle<()> {
        let link = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                link.drain(per_tick);
            }
        })
    }
}

impl TransportSink for SimulatedLink {
    fn try_send(&mut self, payload: &[u8]) -> nb::Result<(), TransportError> {
        let mut state = self.state.lock();

        match state.pending_failure.take() {
            Some(InjectedFailure::Busy) => {
                state.stats.busy += 1;
                return Err(nb::Error::WouldBlock);
            }
            Some(InjectedFailure::Error(code)) => {
                state.stats.errors += 1;
                return Err(nb::Error::Other(TransportError::new(code)));
            }
            None => {}
        }

        let limit = usize::from(state.mtu).saturating_sub(ATT_NOTIFY_OVERHEAD);
        if payload.len() > limit {
            state.stats.errors += 1;
            return Err(nb::Error::Other(TransportError::new(EMSGSIZE)));
        }
        if state.queue.len() >= state.queue_depth {
            state.stats.busy += 1;
            return Err(nb::Error::WouldBlock);
        }

        state.queue.push_back(payload.to_vec());
        state.stats.accepted += 1;
        Ok(())
    }

    fn is_subscribed(&self) -> bool {
        self.state.lock().subscribed
    }
}
