//! Event queue bridge — producers to the application task.
//!
//! A bounded FIFO channel of [`AppEvent`]s built on an `embassy-sync`
//! channel. The connectivity and inbound-message layers enqueue from their
//! own execution contexts; the single application task consumes with a
//! bounded wait so its periodic check keeps running even when no events
//! arrive.
//!
//! ```text
//! ┌───────────────┐   AppEvent   ┌──────────────┐
//! │ Connectivity  │─────────────▶│              │
//! │ Inbound msgs  │─────────────▶│ EventBridge  │────▶ application task
//! │ Delivery acks │─────────────▶│  (bounded)   │      (timed dequeue)
//! └───────────────┘              └──────────────┘
//! ```
//!
//! Construction is `const`, so there is no fallible queue-creation path:
//! a bridge either exists as a `static` or lives inside a test fixture.

use core::fmt;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, with_timeout};

use crate::app::events::AppEvent;

/// Bridge capacity. Enqueue fails observably once this many events are
/// pending; producers log and drop rather than block.
pub const QUEUE_DEPTH: usize = 16;

/// How long the consumer waits for an event before running its periodic
/// check anyway. A deliberate trade-off: shorter means tighter emission
/// latency, longer means fewer idle wake-ups.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// The bridge is at capacity; the event was dropped by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull;

impl fmt::Display for QueueFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event queue full")
    }
}

/// Bounded multi-producer/single-consumer event channel.
pub struct EventBridge {
    channel: Channel<CriticalSectionRawMutex, AppEvent, QUEUE_DEPTH>,
}

impl EventBridge {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Non-blocking enqueue. Serializes concurrent producers internally;
    /// events from all producers come out in enqueue order.
    pub fn enqueue(&self, event: AppEvent) -> Result<(), QueueFull> {
        self.channel.try_send(event).map_err(|_| QueueFull)
    }

    /// Wait up to `timeout` for the next event. `None` on timeout.
    pub async fn dequeue(&self, timeout: Duration) -> Option<AppEvent> {
        with_timeout(timeout, self.channel.receive()).await.ok()
    }

    /// Non-blocking dequeue, for drains and tests.
    pub fn try_dequeue(&self) -> Option<AppEvent> {
        self.channel.try_receive().ok()
    }
}

impl Default for EventBridge {
    fn default() -> Self {
        Self::new()
    }
}
