//! Streaming Scheduler
//!
//! ## Overview
//!
//! The scheduler walks a read-only [`SampleStore`], packs consecutive
//! channel readings into notification payloads, and hands each payload to
//! a [`TransportSink`]. It never owns a timer. Every entry point returns a
//! [`TimerCommand`] telling the event loop whether to arm, cancel, or leave
//! its single recurring timer alone, so the whole state machine runs in
//! unit tests without a clock.
//!
//! ## State Machine
//!
//! ```text
//!            subscribe                      batch counter ≥ batch size
//!   ┌──────┐ ─────────► ┌───────────┐ ─────────────────────────► ┌────────────┐
//!   │ Idle │            │ Streaming │                             │ BatchPause │
//!   └──────┘ ◄───────── └───────────┘ ◄───────────────────────── └────────────┘
//!      ▲   unsubscribe /   │  ▲  tick: send ok → re-arm            tick: resume
//!      │   disconnect      │  │  tick: busy   → rollback, re-arm   and emit
//!      │                   └──┘
//!      └──────────────── unsubscribe / disconnect from any state
//! ```
//!
//! ## Entry Points
//!
//! | Input              | Method                | Timer          |
//! |--------------------|-----------------------|----------------|
//! | connection up      | `on_connect`          | unchanged      |
//! | MTU exchange       | `on_mtu_updated`      | unchanged      |
//! | CCC notify enabled | `on_subscribe`        | arm(0)         |
//! | CCC disabled       | `on_unsubscribe`      | cancel         |
//! | connection down    | `on_disconnect`       | cancel         |
//! | mode byte written  | `on_mode_write`       | next re-arm    |
//! | timer expiry       | `on_tick`             | arm / unchanged|
//!
//! All of them take `&mut self`, so a caller that shares the scheduler
//! between threads has to serialise them behind one lock or queue.
//!
//! ## Failure Handling
//!
//! Before filling a chunk the scheduler snapshots its cursor and batch
//! counter. If the sink reports busy or an error, both are restored and
//! the identical chunk is rebuilt on the next tick. Retries continue at
//! the normal interval with no backoff.
//!
//! ## Example
//!
//! ```rust
//! use eegstream_core::config::StreamConfig;
//! use eegstream_core::errors::TransportError;
//! use eegstream_core::scheduler::{Scheduler, StreamState, TimerCommand};
//! use eegstream_core::store::StaticStore;
//! use eegstream_core::transport::TransportSink;
//!
//! struct Counter(usize);
//!
//! impl TransportSink for Counter {
//!     fn try_send(&mut self, payload: &[u8]) -> nb::Result<(), TransportError> {
//!         self.0 += payload.len();
//!         Ok(())
//!     }
//!     fn is_subscribed(&self) -> bool { true }
//! }
//!
//! static DATA: [[f32; 2]; 4] = [[0.0; 2]; 4];
//! let mut scheduler = Scheduler::new(StaticStore::new(&DATA), StreamConfig::default()).unwrap();
//! let mut sink = Counter(0);
//!
//! scheduler.on_connect(517).unwrap();
//! assert!(matches!(scheduler.on_subscribe(), TimerCommand::Arm(_)));
//! scheduler.on_tick(&mut sink);
//! assert_eq!(scheduler.state(), StreamState::Streaming);
//! assert_eq!(sink.0, 72 * 4);
//! ```

use fugit::MillisDurationU32;

use crate::codec::{ChunkEncoder, Scalar};
use crate::config::StreamConfig;
use crate::constants::{ATT_NOTIFY_OVERHEAD, MAX_ATT_MTU, MAX_PAYLOAD_BYTES};
use crate::errors::{ConfigError, ConfigResult, TransportError};
use crate::pacing::{Mode, Pacing};
use crate::store::SampleStore;
use crate::transport::TransportSink;

/// Lifecycle state of the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StreamState {
    /// Not subscribed, disconnected, or stopped; no timer armed
    Idle,
    /// Timer armed at the notification interval, emitting chunks
    Streaming,
    /// Timer armed with the inter-batch pause, nothing emitted
    BatchPause,
}

/// Next value to emit
///
/// `channel` is always below the store's channel count; reaching it wraps
/// to zero and advances `sample`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    /// Sample index in `[0, L)`
    pub sample: usize,
    /// Channel index in `[0, C)`
    pub channel: usize,
}

impl Cursor {
    /// Cursor at `(sample, channel)`
    pub const fn new(sample: usize, channel: usize) -> Self {
        Self { sample, channel }
    }
}

/// What the event loop should do with its timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// (Re-)arm to fire once after the duration
    Arm(MillisDurationU32),
    /// Cancel any pending expiry
    Cancel,
    /// Leave the timer as it is
    Unchanged,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Chunk accepted by the sink
    Sent {
        /// Scalars in the chunk
        scalars: usize,
        /// Whole samples completed by the chunk
        samples_completed: usize,
    },
    /// Sink was busy; cursor rolled back
    Busy,
    /// Sink reported an error; cursor rolled back
    Failed(TransportError),
    /// Batch finished; pausing
    BatchPaused,
    /// Scheduler idle; nothing to do
    Idle,
    /// No connection; scheduler dropped to idle
    NoConnection,
    /// Central not subscribed; scheduler dropped to idle
    NotSubscribed,
}

/// Outcome plus the timer command for the event loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// What happened
    pub outcome: TickOutcome,
    /// What to do with the timer
    pub timer: TimerCommand,
}

impl Tick {
    const fn new(outcome: TickOutcome, timer: TimerCommand) -> Self {
        Self { outcome, timer }
    }
}

/// Counters for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Ticks handled, including no-ops
    pub ticks: u32,
    /// Chunks accepted by the sink
    pub chunks_sent: u32,
    /// Scalars accepted by the sink
    pub scalars_sent: u64,
    /// Sends rejected as busy
    pub busy_retries: u32,
    /// Sends rejected with an error code
    pub send_errors: u32,
    /// Most recent transport error code
    pub last_error_code: Option<i32>,
    /// Batches completed
    pub batches_completed: u32,
    /// Ticks that found no connection or subscription
    pub idle_ticks: u32,
}

/// Paces a sample store over a notification channel
///
/// Owns every piece of mutable streaming state: cursor, batch counter,
/// captured pacing, connection MTU, and lifecycle state.
#[derive(Debug)]
pub struct Scheduler<S: SampleStore> {
    store: S,
    config: StreamConfig,
    state: StreamState,
    cursor: Cursor,
    batch_counter: usize,
    mode: Mode,
    pacing: Pacing,
    mtu: Option<u16>,
    chunk_capacity: usize,
    stats: StreamStats,
}

impl<S: SampleStore> Scheduler<S> {
    /// Build a scheduler positioned at `(0, 0)` in `Idle`
    pub fn new(store: S, config: StreamConfig) -> ConfigResult<Self> {
        config.validate()?;
        if store.is_empty() {
            return Err(ConfigError::EmptyStore);
        }
        if store.channels() == 0 {
            return Err(ConfigError::NoChannels);
        }

        let mode = config.initial_mode;
        let pacing = config.policy.resolve(mode);
        let chunk_capacity = Self::clamp_capacity(&pacing, None)?;

        Ok(Self {
            store,
            config,
            state: StreamState::Idle,
            cursor: Cursor::default(),
            batch_counter: 0,
            mode,
            pacing,
            mtu: None,
            chunk_capacity,
            stats: StreamStats::default(),
        })
    }

    /// Current lifecycle state
    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Next value to emit
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Whole samples emitted since the last batch boundary
    pub fn batch_counter(&self) -> usize {
        self.batch_counter
    }

    /// Active operating mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Pacing captured from the last mode write
    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Scalars per chunk after MTU clamping
    pub fn chunk_capacity(&self) -> usize {
        self.chunk_capacity
    }

    /// Negotiated MTU, if connected
    pub fn mtu(&self) -> Option<u16> {
        self.mtu
    }

    /// Diagnostic counters
    pub fn stats(&self) -> &StreamStats {
        &self.stats
    }

    /// Active configuration
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Underlying sample store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Connection established with an initial MTU
    ///
    /// Returns the clamped chunk capacity.
    pub fn on_connect(&mut self, mtu: u16) -> ConfigResult<usize> {
        self.apply_mtu(mtu)?;
        stream_info!("Connected, MTU {} ({} scalars per chunk)", mtu, self.chunk_capacity);
        Ok(self.chunk_capacity)
    }

    /// MTU exchange completed
    ///
    /// Returns the clamped chunk capacity. An MTU too small for a single
    /// scalar is rejected and leaves the previous capacity in place.
    pub fn on_mtu_updated(&mut self, mtu: u16) -> ConfigResult<usize> {
        self.apply_mtu(mtu)?;
        stream_info!("MTU updated to {} ({} scalars per chunk)", mtu, self.chunk_capacity);
        Ok(self.chunk_capacity)
    }

    /// Central enabled notifications
    pub fn on_subscribe(&mut self) -> TimerCommand {
        if self.mtu.is_none() {
            stream_warn!("Subscribe without a connection ignored");
            return TimerCommand::Unchanged;
        }

        match self.state {
            StreamState::Idle => {
                stream_info!("Notifications enabled at {:?}", self.cursor);
                self.state = StreamState::Streaming;
                TimerCommand::Arm(MillisDurationU32::millis(0))
            }
            StreamState::Streaming | StreamState::BatchPause => TimerCommand::Unchanged,
        }
    }

    /// Central disabled notifications
    ///
    /// Cursor and batch counter are kept so a later subscribe resumes
    /// where this one stopped.
    pub fn on_unsubscribe(&mut self) -> TimerCommand {
        stream_info!("Notifications disabled at {:?}", self.cursor);
        self.state = StreamState::Idle;
        TimerCommand::Cancel
    }

    /// Connection lost
    pub fn on_disconnect(&mut self, reason: u8) -> TimerCommand {
        stream_info!("Disconnected, reason {}", reason);
        self.mtu = None;
        self.state = StreamState::Idle;
        TimerCommand::Cancel
    }

    /// Mode byte written to the configuration characteristic
    ///
    /// Anything but a single byte is rejected before it reaches the
    /// pacing policy. Unknown mode values select `Normal`. The new
    /// interval applies from the next re-arm.
    pub fn on_mode_write(&mut self, bytes: &[u8]) -> ConfigResult<Mode> {
        let byte = match bytes {
            [byte] => *byte,
            _ => {
                stream_warn!("Config characteristic expects exactly 1 byte, got {}", bytes.len());
                return Err(ConfigError::InvalidLength {
                    expected: 1,
                    actual: bytes.len(),
                });
            }
        };

        let mode = Mode::from_byte(byte);
        let pacing = self.config.policy.resolve(mode);
        let chunk_capacity = Self::clamp_capacity(&pacing, self.mtu)?;

        self.mode = mode;
        self.pacing = pacing;
        self.chunk_capacity = chunk_capacity;
        stream_info!(
            "Mode {:?}: interval {} ms, {} scalars per chunk",
            mode,
            pacing.interval_ms,
            chunk_capacity
        );
        Ok(mode)
    }

    /// Timer expired
    pub fn on_tick<T: TransportSink + ?Sized>(&mut self, sink: &mut T) -> Tick {
        self.stats.ticks = self.stats.ticks.saturating_add(1);

        if self.state == StreamState::Idle {
            self.stats.idle_ticks = self.stats.idle_ticks.saturating_add(1);
            return Tick::new(TickOutcome::Idle, TimerCommand::Unchanged);
        }
        if self.mtu.is_none() {
            stream_warn!("No valid connection");
            return self.drop_to_idle(TickOutcome::NoConnection);
        }
        if !sink.is_subscribed() {
            stream_warn!("Device is not subscribed to characteristic");
            return self.drop_to_idle(TickOutcome::NotSubscribed);
        }

        if self.state == StreamState::Streaming && self.batch_counter >= self.config.batch_size {
            self.batch_counter = 0;
            self.state = StreamState::BatchPause;
            self.stats.batches_completed = self.stats.batches_completed.saturating_add(1);
            stream_info!("Batch complete at {:?}", self.cursor);
            let pause = self.config.batch_pause().unwrap_or_else(|| self.pacing.interval());
            return Tick::new(TickOutcome::BatchPaused, TimerCommand::Arm(pause));
        }

        // Leaving the pause emits on the same tick
        self.state = StreamState::Streaming;
        self.emit(sink)
    }

    fn emit<T: TransportSink + ?Sized>(&mut self, sink: &mut T) -> Tick {
        let start_cursor = self.cursor;
        let start_counter = self.batch_counter;
        let samples = self.store.len();
        let channels = self.store.channels();

        let mut chunk = ChunkEncoder::new();
        while chunk.scalars() < self.chunk_capacity && self.batch_counter < self.config.batch_size {
            let value = self.store.get(self.cursor.sample, self.cursor.channel);
            if chunk.push(value).is_err() {
                break;
            }
            self.cursor.channel += 1;
            if self.cursor.channel >= channels {
                self.cursor.channel = 0;
                self.cursor.sample = (self.cursor.sample + 1) % samples;
                self.batch_counter += 1;
            }
        }
        debug_assert!(!chunk.is_empty());

        let rearm = TimerCommand::Arm(self.pacing.interval());
        match sink.try_send(chunk.as_bytes()) {
            Ok(()) => {
                self.stats.chunks_sent = self.stats.chunks_sent.saturating_add(1);
                self.stats.scalars_sent = self.stats.scalars_sent.saturating_add(chunk.scalars() as u64);
                let outcome = TickOutcome::Sent {
                    scalars: chunk.scalars(),
                    samples_completed: self.batch_counter - start_counter,
                };
                Tick::new(outcome, rearm)
            }
            Err(nb::Error::WouldBlock) => {
                self.cursor = start_cursor;
                self.batch_counter = start_counter;
                self.stats.busy_retries = self.stats.busy_retries.saturating_add(1);
                stream_debug!("Notify busy; retrying from {:?}", self.cursor);
                Tick::new(TickOutcome::Busy, rearm)
            }
            Err(nb::Error::Other(err)) => {
                self.cursor = start_cursor;
                self.batch_counter = start_counter;
                self.stats.send_errors = self.stats.send_errors.saturating_add(1);
                self.stats.last_error_code = Some(err.code);
                stream_warn!(
                    "Failed to notify, err {}; batch counter {}",
                    err.code,
                    self.batch_counter
                );
                Tick::new(TickOutcome::Failed(err), rearm)
            }
        }
    }

    fn drop_to_idle(&mut self, outcome: TickOutcome) -> Tick {
        self.state = StreamState::Idle;
        self.stats.idle_ticks = self.stats.idle_ticks.saturating_add(1);
        Tick::new(outcome, TimerCommand::Unchanged)
    }

    fn apply_mtu(&mut self, mtu: u16) -> ConfigResult<()> {
        let chunk_capacity = Self::clamp_capacity(&self.pacing, Some(mtu))?;
        self.mtu = Some(mtu);
        self.chunk_capacity = chunk_capacity;
        Ok(())
    }

    /// Capacity that fits both the payload buffer and the MTU
    fn clamp_capacity(pacing: &Pacing, mtu: Option<u16>) -> ConfigResult<usize> {
        let width = <S::Scalar as Scalar>::WIDTH;
        let mut capacity = pacing.chunk_capacity.min(MAX_PAYLOAD_BYTES / width);

        if let Some(mtu) = mtu {
            let room = (mtu.min(MAX_ATT_MTU) as usize).saturating_sub(ATT_NOTIFY_OVERHEAD) / width;
            if room == 0 {
                return Err(ConfigError::MtuTooSmall { mtu });
            }
            capacity = capacity.min(room);
        }

        if capacity == 0 {
            return Err(ConfigError::ChunkCapacity {
                capacity: pacing.chunk_capacity,
                max: MAX_PAYLOAD_BYTES / width,
            });
        }
        Ok(capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_payload;
    use crate::pacing::PacingPolicy;
    use crate::store::FlatStore;

    /// Sink that records payloads and fails on scripted attempts
    #[derive(Default)]
    struct ScriptedSink {
        sent: Vec<Vec<u8>>,
        attempts: usize,
        busy_on: Vec<usize>,
        error_on: Vec<usize>,
        unsubscribed: bool,
    }

    impl TransportSink for ScriptedSink {
        fn try_send(&mut self, payload: &[u8]) -> nb::Result<(), TransportError> {
            self.attempts += 1;
            if self.busy_on.contains(&self.attempts) {
                return Err(nb::Error::WouldBlock);
            }
            if self.error_on.contains(&self.attempts) {
                return Err(nb::Error::Other(TransportError::new(-12)));
            }
            self.sent.push(payload.to_vec());
            Ok(())
        }

        fn is_subscribed(&self) -> bool {
            !self.unsubscribed
        }
    }

    /// 4 samples × 3 channels, value = sample * 10 + channel
    const VALUES: [i32; 12] = [0, 1, 2, 10, 11, 12, 20, 21, 22, 30, 31, 32];

    fn scheduler(capacity: usize, batch: usize) -> Scheduler<FlatStore<'static, i32>> {
        let config = StreamConfig::default()
            .with_batch_size(batch)
            .with_policy(PacingPolicy::uniform(Pacing::new(100, capacity)));
        let mut scheduler = Scheduler::new(FlatStore::new(&VALUES, 3).unwrap(), config).unwrap();
        scheduler.on_connect(247).unwrap();
        scheduler
    }

    fn values(payload: &[u8]) -> Vec<i32> {
        decode_payload(payload).collect()
    }

    #[test]
    fn subscribe_arms_immediately() {
        let mut s = scheduler(3, 100);
        assert_eq!(s.on_subscribe(), TimerCommand::Arm(MillisDurationU32::millis(0)));
        assert_eq!(s.state(), StreamState::Streaming);

        // Second subscribe does not re-arm
        assert_eq!(s.on_subscribe(), TimerCommand::Unchanged);
    }

    #[test]
    fn subscribe_without_connection_stays_idle() {
        let config = StreamConfig::default();
        let mut s = Scheduler::new(FlatStore::new(&VALUES, 3).unwrap(), config).unwrap();
        assert_eq!(s.on_subscribe(), TimerCommand::Unchanged);
        assert_eq!(s.state(), StreamState::Idle);
    }

    #[test]
    fn chunks_span_samples_and_wrap() {
        let mut s = scheduler(5, 100);
        let mut sink = ScriptedSink::default();
        s.on_subscribe();

        let tick = s.on_tick(&mut sink);
        assert_eq!(tick.outcome, TickOutcome::Sent { scalars: 5, samples_completed: 1 });
        assert_eq!(tick.timer, TimerCommand::Arm(MillisDurationU32::millis(100)));
        assert_eq!(values(&sink.sent[0]), vec![0, 1, 2, 10, 11]);
        assert_eq!(s.cursor(), Cursor::new(1, 2));

        s.on_tick(&mut sink);
        s.on_tick(&mut sink);
        assert_eq!(values(&sink.sent[2]), vec![31, 32, 0, 1, 2]);
        assert_eq!(s.cursor(), Cursor::new(1, 0));
        assert_eq!(s.batch_counter(), 5);
    }

    #[test]
    fn busy_restores_chunk_start() {
        let mut s = scheduler(5, 100);
        let mut sink = ScriptedSink { busy_on: vec![2], ..Default::default() };
        s.on_subscribe();

        s.on_tick(&mut sink);
        let before = (s.cursor(), s.batch_counter());

        let tick = s.on_tick(&mut sink);
        assert_eq!(tick.outcome, TickOutcome::Busy);
        assert_eq!(tick.timer, TimerCommand::Arm(MillisDurationU32::millis(100)));
        assert_eq!((s.cursor(), s.batch_counter()), before);

        s.on_tick(&mut sink);
        assert_eq!(values(&sink.sent[1]), vec![12, 20, 21, 22, 30]);
        assert_eq!(s.stats().busy_retries, 1);
    }

    #[test]
    fn error_restores_and_records_code() {
        let mut s = scheduler(3, 100);
        let mut sink = ScriptedSink { error_on: vec![1], ..Default::default() };
        s.on_subscribe();

        let tick = s.on_tick(&mut sink);
        assert_eq!(tick.outcome, TickOutcome::Failed(TransportError::new(-12)));
        assert_eq!(s.cursor(), Cursor::default());
        assert_eq!(s.batch_counter(), 0);
        assert_eq!(s.stats().last_error_code, Some(-12));
        assert_eq!(s.state(), StreamState::Streaming);
    }

    #[test]
    fn chunk_stops_at_batch_boundary() {
        let mut s = scheduler(5, 2);
        let mut sink = ScriptedSink::default();
        s.on_subscribe();

        s.on_tick(&mut sink);
        let tick = s.on_tick(&mut sink);
        // Only one scalar left before the second sample completes the batch
        assert_eq!(tick.outcome, TickOutcome::Sent { scalars: 1, samples_completed: 1 });
        assert_eq!(s.batch_counter(), 2);

        let tick = s.on_tick(&mut sink);
        assert_eq!(tick.outcome, TickOutcome::BatchPaused);
        assert_eq!(s.state(), StreamState::BatchPause);
        assert_eq!(s.batch_counter(), 0);
        assert_eq!(sink.sent.len(), 2);

        // Leaving the pause emits immediately
        let tick = s.on_tick(&mut sink);
        assert!(matches!(tick.outcome, TickOutcome::Sent { .. }));
        assert_eq!(s.state(), StreamState::Streaming);
    }

    #[test]
    fn configured_batch_pause() {
        let config = StreamConfig::default()
            .with_batch_size(1)
            .with_batch_pause_ms(4000)
            .with_policy(PacingPolicy::uniform(Pacing::new(100, 3)));
        let mut s = Scheduler::new(FlatStore::new(&VALUES, 3).unwrap(), config).unwrap();
        assert_eq!(*s.config(), config);
        let mut sink = ScriptedSink::default();
        s.on_connect(247).unwrap();
        s.on_subscribe();

        s.on_tick(&mut sink);
        let tick = s.on_tick(&mut sink);
        assert_eq!(tick.timer, TimerCommand::Arm(MillisDurationU32::millis(4000)));
    }

    #[test]
    fn unsubscribe_keeps_position() {
        let mut s = scheduler(4, 100);
        let mut sink = ScriptedSink::default();
        s.on_subscribe();
        s.on_tick(&mut sink);

        assert_eq!(s.on_unsubscribe(), TimerCommand::Cancel);
        let position = s.cursor();

        let tick = s.on_tick(&mut sink);
        assert_eq!(tick, Tick::new(TickOutcome::Idle, TimerCommand::Unchanged));
        assert_eq!(s.cursor(), position);

        s.on_subscribe();
        s.on_tick(&mut sink);
        assert_eq!(values(&sink.sent[1]), vec![11, 12, 20, 21]);
    }

    #[test]
    fn sink_not_subscribed_drops_to_idle() {
        let mut s = scheduler(3, 100);
        let mut sink = ScriptedSink { unsubscribed: true, ..Default::default() };
        s.on_subscribe();

        let tick = s.on_tick(&mut sink);
        assert_eq!(tick.outcome, TickOutcome::NotSubscribed);
        assert_eq!(tick.timer, TimerCommand::Unchanged);
        assert_eq!(s.state(), StreamState::Idle);
        assert_eq!(s.cursor(), Cursor::default());
        assert_eq!(sink.attempts, 0);
    }

    #[test]
    fn disconnect_cancels_and_forgets_mtu() {
        let mut s = scheduler(3, 100);
        s.on_subscribe();
        assert_eq!(s.on_disconnect(0x13), TimerCommand::Cancel);
        assert_eq!(s.mtu(), None);
        assert_eq!(s.state(), StreamState::Idle);
    }

    #[test]
    fn mode_write_validation() {
        let config = StreamConfig::default().with_policy(
            PacingPolicy::default().with_entry(Mode::LowPower, Pacing::new(1000, 18)),
        );
        let mut s = Scheduler::new(FlatStore::new(&VALUES, 3).unwrap(), config).unwrap();

        assert_eq!(
            s.on_mode_write(&[1, 0]),
            Err(ConfigError::InvalidLength { expected: 1, actual: 2 })
        );
        assert_eq!(s.on_mode_write(&[]), Err(ConfigError::InvalidLength { expected: 1, actual: 0 }));
        assert_eq!(s.mode(), Mode::Normal);

        assert_eq!(s.on_mode_write(&[1]), Ok(Mode::LowPower));
        assert_eq!(s.pacing(), Pacing::new(1000, 18));
        assert_eq!(s.chunk_capacity(), 18);

        assert_eq!(s.on_mode_write(&[0xFF]), Ok(Mode::Normal));
        assert_eq!(s.pacing().interval_ms, 150);
    }

    #[test]
    fn mtu_clamps_capacity() {
        let config = StreamConfig::default();
        let mut s = Scheduler::new(FlatStore::new(&VALUES, 3).unwrap(), config).unwrap();
        assert_eq!(s.chunk_capacity(), 72);

        // (23 - 3) / 4 bytes per i32
        assert_eq!(s.on_connect(23), Ok(5));
        assert_eq!(s.on_mtu_updated(247), Ok(61));
        assert_eq!(s.on_mtu_updated(517), Ok(72));

        assert_eq!(s.on_mtu_updated(6), Err(ConfigError::MtuTooSmall { mtu: 6 }));
        assert_eq!(s.chunk_capacity(), 72);
        assert_eq!(s.mtu(), Some(517));
    }

    #[test]
    fn rejects_unusable_stores() {
        let empty: [i32; 0] = [];
        assert_eq!(
            Scheduler::new(FlatStore::new(&empty, 3).unwrap(), StreamConfig::default()).unwrap_err(),
            ConfigError::EmptyStore
        );
    }
}
