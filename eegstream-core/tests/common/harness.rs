//! Scripted transport and tick drivers

use eegstream_core::codec::decode_payload;
use eegstream_core::errors::TransportError;
use eegstream_core::scheduler::{Scheduler, Tick, TimerCommand};
use eegstream_core::store::SampleStore;
use eegstream_core::transport::TransportSink;
use eegstream_core::StreamConfig;

/// Sink that records accepted payloads
///
/// Attempts are numbered from 1. An attempt listed in `busy_on` reports
/// busy; one listed in `error_on` reports that error code.
#[derive(Debug)]
pub struct ScriptedSink {
    pub delivered: Vec<Vec<u8>>,
    pub attempts: usize,
    pub busy_on: Vec<usize>,
    pub error_on: Vec<(usize, i32)>,
    pub subscribed: bool,
}

impl Default for ScriptedSink {
    fn default() -> Self {
        Self {
            delivered: Vec::new(),
            attempts: 0,
            busy_on: Vec::new(),
            error_on: Vec::new(),
            subscribed: true,
        }
    }
}

impl ScriptedSink {
    pub fn busy_on(attempts: &[usize]) -> Self {
        Self {
            busy_on: attempts.to_vec(),
            ..Self::default()
        }
    }

    pub fn error_on(attempts: &[(usize, i32)]) -> Self {
        Self {
            error_on: attempts.to_vec(),
            ..Self::default()
        }
    }

    /// Every delivered value in order
    pub fn values(&self) -> Vec<f32> {
        self.delivered
            .iter()
            .flat_map(|payload| decode_payload::<f32>(payload))
            .collect()
    }
}

impl TransportSink for ScriptedSink {
    fn try_send(&mut self, payload: &[u8]) -> nb::Result<(), TransportError> {
        self.attempts += 1;
        if self.busy_on.contains(&self.attempts) {
            return Err(nb::Error::WouldBlock);
        }
        if let Some((_, code)) = self.error_on.iter().find(|(n, _)| *n == self.attempts) {
            return Err(nb::Error::Other(TransportError::new(*code)));
        }
        self.delivered.push(payload.to_vec());
        Ok(())
    }

    fn is_subscribed(&self) -> bool {
        self.subscribed
    }
}

/// Scheduler connected at the largest MTU and subscribed
pub fn streaming<S: SampleStore>(store: S, config: StreamConfig) -> Scheduler<S> {
    let mut scheduler = Scheduler::new(store, config).unwrap();
    scheduler.on_connect(517).unwrap();
    assert!(matches!(scheduler.on_subscribe(), TimerCommand::Arm(_)));
    scheduler
}

/// Fire `n` ticks and collect their results
pub fn run_ticks<S: SampleStore>(
    scheduler: &mut Scheduler<S>,
    sink: &mut ScriptedSink,
    n: usize,
) -> Vec<Tick> {
    (0..n).map(|_| scheduler.on_tick(sink)).collect()
}
