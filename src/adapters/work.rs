//! Work-dispatch adapters.
//!
//! The production transport crate supplies the real [`WorkSink`] that feeds
//! the broker session. [`LogWorkSink`] here is the bring-up and simulation
//! adapter: it logs every hand-off and immediately reflects an
//! [`OutboundAcked`](crate::app::events::AppEvent::OutboundAcked) back
//! through the bridge, so the emission cadence can be observed end to end
//! without a broker.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{DispatchError, WorkSink};
use crate::bridge::EventBridge;

/// Logging sink that self-acknowledges through the bridge.
pub struct LogWorkSink<'a> {
    bridge: &'a EventBridge,
    submitted: u64,
}

impl<'a> LogWorkSink<'a> {
    pub fn new(bridge: &'a EventBridge) -> Self {
        Self {
            bridge,
            submitted: 0,
        }
    }

    /// Total payloads handed off so far.
    pub fn submitted(&self) -> u64 {
        self.submitted
    }
}

impl WorkSink for LogWorkSink<'_> {
    fn submit(&mut self, payload: &[u8]) -> Result<(), DispatchError> {
        self.submitted += 1;
        info!(
            "work: payload #{} ({} bytes) handed to transport",
            self.submitted,
            payload.len()
        );
        // Loop the ack straight back; a real transport acks on PUBACK.
        if self.bridge.enqueue(AppEvent::OutboundAcked).is_err() {
            warn!("work: bridge full, ack dropped");
        }
        Ok(())
    }

    fn message_consumed(&mut self) {
        info!("work: inbound message consumed");
    }
}
