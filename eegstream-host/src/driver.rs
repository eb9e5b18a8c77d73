//! Async event loop around the scheduler
//!
//! The scheduler itself is synchronous and clock-free. `StreamDriver`
//! gives it a home on tokio: one task owns the scheduler, its sink and
//! the single notification timer, and is the only consumer of the
//! command queue. Lifecycle events from any number of producers are
//! therefore applied one at a time, and a tick never overlaps an event.
//!
//! ```text
//!  DriverHandle ──mpsc──► ┌──────────────────────────┐
//!   (events, status,      │ StreamDriver task        │
//!    shutdown)            │  select! {               │
//!                         │    command  → handle()   │
//!                         │    deadline → on_tick()  │──► TransportSink
//!                         │  }                       │
//!                         └──────────────────────────┘
//! ```
//!
//! `TimerCommand::Arm` replaces the deadline, `Cancel` clears it, so a
//! cancelled timer can never deliver a stale tick.

use std::time::Duration;

use eegstream_core::{
    ConfigError, ControlEvent, Cursor, Mode, SampleStore, Scheduler, StreamState, StreamStats,
    TickOutcome, TimerCommand, TransportSink,
};
use log::{debug, info, trace, warn};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use crate::config::HostConfig;
use crate::HostError;

/// Commands queued ahead of the driver
pub const DEFAULT_COMMAND_QUEUE: usize = 32;

/// Owned lifecycle event, sendable across tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// Central connected with this MTU
    Connected {
        /// Negotiated MTU
        mtu: u16,
    },
    /// MTU exchange finished
    MtuUpdated {
        /// New MTU
        mtu: u16,
    },
    /// CCC descriptor written
    Subscription(u16),
    /// Bytes written to the configuration characteristic
    ModeWrite(Vec<u8>),
    /// Connection dropped
    Disconnected {
        /// HCI disconnect reason
        reason: u8,
    },
}

impl HostEvent {
    /// Borrowed form understood by the scheduler
    pub fn as_control(&self) -> ControlEvent<'_> {
        match self {
            HostEvent::Connected { mtu } => ControlEvent::Connected { mtu: *mtu },
            HostEvent::MtuUpdated { mtu } => ControlEvent::MtuUpdated { mtu: *mtu },
            HostEvent::Subscription(ccc) => ControlEvent::Subscription(*ccc),
            HostEvent::ModeWrite(bytes) => ControlEvent::ModeWrite(bytes),
            HostEvent::Disconnected { reason } => ControlEvent::Disconnected { reason: *reason },
        }
    }
}

/// Point-in-time view of the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverStatus {
    /// Lifecycle state
    pub state: StreamState,
    /// Next value to emit
    pub cursor: Cursor,
    /// Samples emitted in the current batch
    pub batch_counter: usize,
    /// Active mode
    pub mode: Mode,
    /// Scalars per chunk
    pub chunk_capacity: usize,
    /// Whether a tick is pending
    pub timer_armed: bool,
    /// Scheduler counters
    pub stats: StreamStats,
}

enum Command {
    Event(HostEvent, oneshot::Sender<Result<TimerCommand, ConfigError>>),
    Status(oneshot::Sender<DriverStatus>),
    Shutdown(oneshot::Sender<StreamStats>),
}

/// Scheduler, sink and timer, run as one task
pub struct StreamDriver<S: SampleStore, T: TransportSink> {
    scheduler: Scheduler<S>,
    sink: T,
    deadline: Option<Instant>,
}

impl<S, T> StreamDriver<S, T>
where
    S: SampleStore + Send + 'static,
    T: TransportSink + Send + 'static,
{
    /// Wrap a scheduler and the sink it sends through
    pub fn new(scheduler: Scheduler<S>, sink: T) -> Self {
        Self {
            scheduler,
            sink,
            deadline: None,
        }
    }

    /// Build the scheduler from host configuration
    pub fn from_config(config: &HostConfig, store: S, sink: T) -> Result<Self, HostError> {
        let scheduler = Scheduler::new(store, config.stream)?;
        Ok(Self::new(scheduler, sink))
    }

    /// Start the event loop on the current runtime
    pub fn spawn(self) -> DriverHandle {
        self.spawn_with_queue(DEFAULT_COMMAND_QUEUE)
    }

    /// Start the event loop with a custom command queue depth
    pub fn spawn_with_queue(self, depth: usize) -> DriverHandle {
        let (commands, receiver) = mpsc::channel(depth.max(1));
        let task = tokio::spawn(self.run(receiver));
        DriverHandle { commands, task }
    }

    async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        info!("Stream driver started");
        loop {
            let deadline = self.deadline;
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Event(event, reply)) => {
                        let result = self.handle(&event);
                        let _ = reply.send(result);
                    }
                    Some(Command::Status(reply)) => {
                        let _ = reply.send(self.status());
                    }
                    Some(Command::Shutdown(reply)) => {
                        let _ = reply.send(*self.scheduler.stats());
                        break;
                    }
                    None => break,
                },
                () = wait_for(deadline) => {
                    self.deadline = None;
                    self.tick();
                }
            }
        }
        info!("Stream driver stopped");
    }

    fn handle(&mut self, event: &HostEvent) -> Result<TimerCommand, ConfigError> {
        let result = self.scheduler.handle(event.as_control(), &mut self.sink);
        match result {
            Ok(timer) => self.apply(timer),
            Err(err) => warn!("Rejected {:?}: {}", event, err),
        }
        result
    }

    fn tick(&mut self) {
        let tick = self.scheduler.on_tick(&mut self.sink);
        match tick.outcome {
            TickOutcome::Sent { scalars, samples_completed } => {
                trace!("Sent {} scalars ({} samples)", scalars, samples_completed);
            }
            TickOutcome::Busy | TickOutcome::Failed(_) => {
                debug!("Send deferred at {:?}", self.scheduler.cursor());
            }
            TickOutcome::BatchPaused
            | TickOutcome::Idle
            | TickOutcome::NoConnection
            | TickOutcome::NotSubscribed => {}
        }
        self.apply(tick.timer);
    }

    fn apply(&mut self, timer: TimerCommand) {
        match timer {
            TimerCommand::Arm(delay) => {
                let delay = Duration::from_millis(u64::from(delay.to_millis()));
                self.deadline = Some(Instant::now() + delay);
            }
            TimerCommand::Cancel => self.deadline = None,
            TimerCommand::Unchanged => {}
        }
    }

    fn status(&self) -> DriverStatus {
        DriverStatus {
            state: self.scheduler.state(),
            cursor: self.scheduler.cursor(),
            batch_counter: self.scheduler.batch_counter(),
            mode: self.scheduler.mode(),
            chunk_capacity: self.scheduler.chunk_capacity(),
            timer_armed: self.deadline.is_some(),
            stats: *self.scheduler.stats(),
        }
    }
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Handle to a running driver
#[derive(Debug)]
pub struct DriverHandle {
    commands: mpsc::Sender<Command>,
    task: JoinHandle<()>,
}

impl DriverHandle {
    /// Apply one lifecycle event and wait until it has been handled
    ///
    /// Rejected writes come back as `HostError::Invalid`; the stream
    /// keeps running.
    pub async fn send(&self, event: HostEvent) -> Result<TimerCommand, HostError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::Event(event, reply))
            .await
            .map_err(|_| HostError::DriverClosed)?;
        let result = response.await.map_err(|_| HostError::DriverClosed)?;
        Ok(result?)
    }

    /// Snapshot of the scheduler
    pub async fn status(&self) -> Result<DriverStatus, HostError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::Status(reply))
            .await
            .map_err(|_| HostError::DriverClosed)?;
        response.await.map_err(|_| HostError::DriverClosed)
    }

    /// Stop the loop and return the final counters
    pub async fn shutdown(self) -> Result<StreamStats, HostError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::Shutdown(reply))
            .await
            .map_err(|_| HostError::DriverClosed)?;
        let stats = response.await.map_err(|_| HostError::DriverClosed)?;
        self.task.await.map_err(|_| HostError::DriverClosed)?;
        Ok(stats)
    }
}
