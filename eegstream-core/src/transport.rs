//! Transport Sink Contract
//!
//! The scheduler pushes each chunk through a [`TransportSink`]. The trait
//! follows the same non-blocking model as the rest of the crate: `nb`
//! results, no async runtime.
//!
//! ## Result Model
//!
//! - `Ok(())` - payload accepted for transmission. For asynchronous
//!   stacks "queued" counts as success; link-layer retransmission does
//!   the rest.
//! - `Err(nb::Error::WouldBlock)` - busy, typically the TX queue is full.
//!   The scheduler retries the same data on its next tick.
//! - `Err(nb::Error::Other(e))` - transient error with a stack code.
//!   Handled exactly like busy, but counted separately.
//!
//! ## Example Implementation
//!
//! ```rust
//! use eegstream_core::errors::TransportError;
//! use eegstream_core::transport::TransportSink;
//!
//! struct Loopback {
//!     subscribed: bool,
//!     sent: Vec<Vec<u8>>,
//! }
//!
//! impl TransportSink for Loopback {
//!     fn try_send(&mut self, payload: &[u8]) -> nb::Result<(), TransportError> {
//!         if self.sent.len() >= 8 {
//!             return Err(nb::Error::WouldBlock);
//!         }
//!         self.sent.push(payload.to_vec());
//!         Ok(())
//!     }
//!
//!     fn is_subscribed(&self) -> bool {
//!         self.subscribed
//!     }
//! }
//! ```

use crate::errors::TransportError;

/// Outbound notification channel
pub trait TransportSink {
    /// Attempt to queue one notification payload
    ///
    /// ## Contract
    ///
    /// - Must not block
    /// - `payload` never exceeds the negotiated MTU minus ATT overhead
    /// - A rejected payload must not be partially transmitted
    fn try_send(&mut self, payload: &[u8]) -> nb::Result<(), TransportError>;

    /// Whether the central has notifications enabled
    fn is_subscribed(&self) -> bool;
}

impl<T: TransportSink + ?Sized> TransportSink for &mut T {
    fn try_send(&mut self, payload: &[u8]) -> nb::Result<(), TransportError> {
        (**self).try_send(payload)
    }

    fn is_subscribed(&self) -> bool {
        (**self).is_subscribed()
    }
}
