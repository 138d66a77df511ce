//! Port traits — the boundary between the application core and the
//! transport / platform layers.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (work dispatch, clock, RNG) implement these traits. The
//! [`AppService`](super::service::AppService) consumes them via generics, so
//! the core never touches the network stack or hardware directly and runs
//! unchanged under host-side tests with mock adapters.

use core::fmt;

// ───────────────────────────────────────────────────────────────
// Work dispatch port (domain → outbound transport queue)
// ───────────────────────────────────────────────────────────────

/// Outbound work-dispatch collaborator.
///
/// The core calls [`submit`](WorkSink::submit) once per due emission and
/// [`message_consumed`](WorkSink::message_consumed) once per processed
/// inbound message. Neither call awaits a transport result; delivery
/// confirmation arrives later as an
/// [`OutboundAcked`](super::events::AppEvent::OutboundAcked) event.
pub trait WorkSink {
    /// Queue a telemetry payload for transmission.
    fn submit(&mut self, payload: &[u8]) -> Result<(), DispatchError>;

    /// Tell the transport layer an inbound message was fully processed so
    /// it can release its delivery backpressure.
    fn message_consumed(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Clock port (platform → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic time source, microsecond resolution.
pub trait ClockPort {
    /// Microseconds since boot (monotonic, wraps at `u64::MAX`).
    fn now_us(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Entropy port (platform → domain)
// ───────────────────────────────────────────────────────────────

/// Source of random bearings for the simulated position walk.
pub trait EntropyPort {
    /// A uniformly distributed bearing in `[0, 2π)` radians.
    fn next_bearing(&mut self) -> f64;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`WorkSink`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    /// The outbound work queue is full.
    QueueFull,
    /// The transport layer rejected the hand-off.
    Transport(&'static str),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueueFull => write!(f, "work queue full"),
            Self::Transport(msg) => write!(f, "transport: {msg}"),
        }
    }
}
