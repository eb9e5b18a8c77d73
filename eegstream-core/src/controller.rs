//! Lifecycle event dispatch
//!
//! Radio stacks report connection changes, descriptor writes and timer
//! expiries from different callbacks. Funnelling them into one
//! [`ControlEvent`] stream and one `&mut Scheduler` call keeps every
//! mutation of the cursor and batch counter on a single path.
//!
//! ```rust
//! use eegstream_core::constants::CCC_NOTIFY;
//! use eegstream_core::controller::ControlEvent;
//! use eegstream_core::errors::TransportError;
//! use eegstream_core::scheduler::{Scheduler, TimerCommand};
//! use eegstream_core::store::StaticStore;
//! use eegstream_core::transport::TransportSink;
//! use eegstream_core::StreamConfig;
//!
//! struct Discard;
//!
//! impl TransportSink for Discard {
//!     fn try_send(&mut self, _: &[u8]) -> nb::Result<(), TransportError> { Ok(()) }
//!     fn is_subscribed(&self) -> bool { true }
//! }
//!
//! static DATA: [[i16; 4]; 8] = [[0; 4]; 8];
//! let mut scheduler = Scheduler::new(StaticStore::new(&DATA), StreamConfig::default()).unwrap();
//!
//! scheduler.handle(ControlEvent::Connected { mtu: 185 }, &mut Discard).unwrap();
//! let timer = scheduler.handle(ControlEvent::Subscription(CCC_NOTIFY), &mut Discard).unwrap();
//! assert!(matches!(timer, TimerCommand::Arm(_)));
//!
//! assert!(scheduler.handle(ControlEvent::ModeWrite(&[1, 2]), &mut Discard).is_err());
//! ```

use crate::constants::CCC_NOTIFY;
use crate::errors::ConfigResult;
use crate::scheduler::{Scheduler, TimerCommand};
use crate::store::SampleStore;
use crate::transport::TransportSink;

/// Every input the scheduler reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent<'a> {
    /// Central connected with this ATT MTU
    Connected {
        /// Negotiated MTU
        mtu: u16,
    },
    /// MTU exchange finished
    MtuUpdated {
        /// New MTU
        mtu: u16,
    },
    /// Client characteristic configuration descriptor written
    Subscription(u16),
    /// Raw bytes written to the configuration characteristic
    ModeWrite(&'a [u8]),
    /// Connection dropped with an HCI reason code
    Disconnected {
        /// HCI disconnect reason
        reason: u8,
    },
    /// Notification timer fired
    Tick,
}

impl ControlEvent<'_> {
    /// Whether a CCC value turns notifications on
    ///
    /// Only the notify bit on its own counts. Indications and zero both
    /// stop the stream.
    pub const fn enables_notify(ccc: u16) -> bool {
        ccc == CCC_NOTIFY
    }
}

impl<S: SampleStore> Scheduler<S> {
    /// Dispatch one lifecycle event
    ///
    /// Rejected writes and unusable MTUs come back as errors and leave
    /// the scheduler untouched; everything else yields the timer command
    /// for the event loop.
    pub fn handle<T: TransportSink + ?Sized>(
        &mut self,
        event: ControlEvent<'_>,
        sink: &mut T,
    ) -> ConfigResult<TimerCommand> {
        match event {
            ControlEvent::Connected { mtu } => {
                self.on_connect(mtu)?;
                Ok(TimerCommand::Unchanged)
            }
            ControlEvent::MtuUpdated { mtu } => {
                self.on_mtu_updated(mtu)?;
                Ok(TimerCommand::Unchanged)
            }
            ControlEvent::Subscription(ccc) if ControlEvent::enables_notify(ccc) => {
                Ok(self.on_subscribe())
            }
            ControlEvent::Subscription(_) => Ok(self.on_unsubscribe()),
            ControlEvent::ModeWrite(bytes) => {
                self.on_mode_write(bytes)?;
                Ok(TimerCommand::Unchanged)
            }
            ControlEvent::Disconnected { reason } => Ok(self.on_disconnect(reason)),
            ControlEvent::Tick => Ok(self.on_tick(sink).timer),
        }
    }
}
