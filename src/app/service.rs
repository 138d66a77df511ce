//! Application service — the tracker's domain core.
//!
//! [`AppService`] owns the tracker state exclusively: connectivity and
//! in-flight flags, the running/suspended switch, the emission clock, and
//! the simulated position. All I/O flows through the port traits in
//! [`ports`](super::ports), so the whole service runs under host tests with
//! mock adapters.
//!
//! ```text
//!  AppEvent ──▶ ┌──────────────────────────┐ ──▶ WorkSink
//!               │        AppService         │
//!  ClockPort ──▶│  state machine · emitter  │◀── EntropyPort
//!               └──────────────────────────┘
//! ```

use log::{debug, info, warn};

use super::commands;
use super::events::AppEvent;
use super::payload::{self, PayloadBuf};
use super::ports::{EntropyPort, WorkSink};

/// Minimum interval between telemetry emissions, in microseconds.
///
/// The effective cadence also depends on the bridge poll interval: the
/// emission check runs once per task wake-up, so actual spacing is
/// `PERIOD + up-to-one-poll-interval`.
pub const EMISSION_PERIOD_US: u64 = 60_000_000;

/// Per-step distance of the simulated random walk, in degrees.
const WALK_STEP_DEG: f64 = 0.005;

// ───────────────────────────────────────────────────────────────
// Tracker state
// ───────────────────────────────────────────────────────────────

/// Mutable state owned by the application task, never shared.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerState {
    /// Broker session established. Set only by connectivity events.
    pub connected: bool,
    /// Telemetry enabled. Toggled only by recognized remote commands.
    pub running: bool,
    /// An emitted payload has not yet been acknowledged. Gates emission.
    pub message_in_flight: bool,
    /// Monotonic micros of the last emission; 0 until the first one.
    pub last_emission_us: u64,
    /// Simulated position, degrees.
    pub latitude: f64,
    /// Simulated position, degrees.
    pub longitude: f64,
}

impl TrackerState {
    /// Initial state: suspended-capable but running, disconnected, nothing
    /// in flight, position fixed on central London.
    pub fn new() -> Self {
        Self {
            connected: false,
            running: true,
            message_in_flight: false,
            last_emission_us: 0,
            latitude: 51.5081,
            longitude: -0.1248,
        }
    }
}

impl Default for TrackerState {
    fn default() -> Self {
        Self::new()
    }
}

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service: event application plus the periodic emitter.
pub struct AppService {
    state: TrackerState,
    /// Outbound payload buffer, reused across emissions. Single-writer:
    /// the in-flight gate guarantees no emission overlaps another.
    payload: PayloadBuf,
}

impl AppService {
    pub fn new() -> Self {
        Self {
            state: TrackerState::new(),
            payload: PayloadBuf::new(),
        }
    }

    // ── Event application ─────────────────────────────────────

    /// Apply one event to the tracker state.
    ///
    /// Called once per bridge dequeue, strictly in enqueue order. Every
    /// inbound message — recognized or not — is acknowledged upstream via
    /// [`WorkSink::message_consumed`] so the transport layer can release
    /// its delivery backpressure.
    pub fn handle_event(&mut self, event: AppEvent, work: &mut impl WorkSink) {
        match event {
            AppEvent::ConnectivityUp => {
                info!("broker session up");
                self.state.connected = true;
            }
            AppEvent::ConnectivityDown => {
                info!("broker session down");
                self.state.connected = false;
            }
            AppEvent::InboundMessage(msg) => {
                self.process_inbound(&msg.payload);
                work.message_consumed();
            }
            AppEvent::OutboundAcked => {
                self.state.message_in_flight = false;
            }
        }
    }

    /// Interpret one inbound payload against the command vocabulary.
    /// Unrecognized payloads are ignored silently — malformed remote input
    /// is not an error condition.
    fn process_inbound(&mut self, payload: &[u8]) {
        let matched = commands::interpret(payload);
        if matched.stop {
            info!("remote command: stop — suspending telemetry");
            self.state.running = false;
        }
        if matched.restart {
            info!("remote command: restart — resuming telemetry");
            self.state.running = true;
        }
        if matched.is_ignored() {
            debug!("ignoring unrecognized inbound payload ({} bytes)", payload.len());
        }
    }

    // ── Periodic emission ─────────────────────────────────────

    /// Evaluate the emission condition and emit if due.
    ///
    /// Runs once per task wake-up, whether or not an event arrived.
    /// Emission requires a live session, the running flag, no payload in
    /// flight, and a full period elapsed since the last emission.
    ///
    /// There is no retry and no in-flight timeout: if the transport never
    /// acknowledges, only `OutboundAcked` clears the gate. See DESIGN.md.
    pub fn poll(&mut self, now_us: u64, work: &mut impl WorkSink, entropy: &mut impl EntropyPort) {
        if !self.state.running || !self.state.connected || self.state.message_in_flight {
            return;
        }
        if now_us.wrapping_sub(self.state.last_emission_us) <= EMISSION_PERIOD_US {
            return;
        }

        // The in-flight gate and the clock are committed before the
        // hand-off: a failed submit still counts as this period's attempt.
        self.state.last_emission_us = now_us;
        self.state.message_in_flight = true;

        let bearing = entropy.next_bearing();
        self.state.latitude += WALK_STEP_DEG * bearing.sin();
        self.state.longitude += WALK_STEP_DEG * bearing.cos();

        match payload::format_location(&mut self.payload, self.state.latitude, self.state.longitude)
        {
            Ok(()) => {
                info!("sending: {}", self.payload.as_str());
                if let Err(e) = work.submit(self.payload.as_bytes()) {
                    warn!("telemetry hand-off failed: {e}");
                }
            }
            Err(e) => warn!("telemetry formatting failed: {e}"),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Read-only view of the tracker state.
    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    /// The last formatted payload (empty before the first emission).
    pub fn last_payload(&self) -> &str {
        self.payload.as_str()
    }
}

impl Default for AppService {
    fn default() -> Self {
        Self::new()
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::events::InboundMessage;
    use crate::app::ports::DispatchError;

    struct NullEntropy;
    impl EntropyPort for NullEntropy {
        fn next_bearing(&mut self) -> f64 {
            0.0
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        submissions: Vec<String>,
        consumed: usize,
        fail_next: bool,
    }
    impl WorkSink for RecordingSink {
        fn submit(&mut self, payload: &[u8]) -> Result<(), DispatchError> {
            if self.fail_next {
                self.fail_next = false;
                return Err(DispatchError::QueueFull);
            }
            self.submissions
                .push(String::from_utf8(payload.to_vec()).unwrap());
            Ok(())
        }
        fn message_consumed(&mut self) {
            self.consumed += 1;
        }
    }

    fn inbound(payload: &[u8]) -> AppEvent {
        AppEvent::InboundMessage(InboundMessage::from_slices(b"device/commands", payload).unwrap())
    }

    #[test]
    fn initial_state_matches_boot_contract() {
        let svc = AppService::new();
        let s = svc.state();
        assert!(!s.connected);
        assert!(s.running);
        assert!(!s.message_in_flight);
        assert_eq!(s.last_emission_us, 0);
        assert_eq!((s.latitude, s.longitude), (51.5081, -0.1248));
    }

    #[test]
    fn connectivity_events_toggle_connected() {
        let mut svc = AppService::new();
        let mut sink = RecordingSink::default();
        svc.handle_event(AppEvent::ConnectivityUp, &mut sink);
        assert!(svc.state().connected);
        svc.handle_event(AppEvent::ConnectivityDown, &mut sink);
        assert!(!svc.state().connected);
    }

    #[test]
    fn every_inbound_message_is_acknowledged() {
        let mut svc = AppService::new();
        let mut sink = RecordingSink::default();
        svc.handle_event(inbound(b"stop"), &mut sink);
        svc.handle_event(inbound(b"gibberish"), &mut sink);
        svc.handle_event(inbound(b""), &mut sink);
        assert_eq!(sink.consumed, 3);
    }

    #[test]
    fn stop_then_restart_round_trip() {
        let mut svc = AppService::new();
        let mut sink = RecordingSink::default();
        svc.handle_event(inbound(b"stop"), &mut sink);
        assert!(!svc.state().running);
        svc.handle_event(inbound(b"restart"), &mut sink);
        assert!(svc.state().running);
    }

    #[test]
    fn stopped_payload_does_not_suspend() {
        let mut svc = AppService::new();
        let mut sink = RecordingSink::default();
        svc.handle_event(inbound(b"stopped"), &mut sink);
        assert!(svc.state().running);
        assert_eq!(sink.consumed, 1);
    }

    #[test]
    fn no_emission_while_disconnected() {
        let mut svc = AppService::new();
        let mut sink = RecordingSink::default();
        svc.poll(EMISSION_PERIOD_US * 10, &mut sink, &mut NullEntropy);
        assert!(sink.submissions.is_empty());
        assert!(!svc.state().message_in_flight);
    }

    #[test]
    fn no_emission_while_suspended() {
        let mut svc = AppService::new();
        let mut sink = RecordingSink::default();
        svc.handle_event(AppEvent::ConnectivityUp, &mut sink);
        svc.handle_event(inbound(b"stop"), &mut sink);
        svc.poll(EMISSION_PERIOD_US * 10, &mut sink, &mut NullEntropy);
        assert!(sink.submissions.is_empty());
    }

    #[test]
    fn emission_requires_strictly_elapsed_period() {
        let mut svc = AppService::new();
        let mut sink = RecordingSink::default();
        svc.handle_event(AppEvent::ConnectivityUp, &mut sink);
        svc.poll(EMISSION_PERIOD_US, &mut sink, &mut NullEntropy);
        assert!(sink.submissions.is_empty());
        svc.poll(EMISSION_PERIOD_US + 1, &mut sink, &mut NullEntropy);
        assert_eq!(sink.submissions.len(), 1);
        assert!(svc.state().message_in_flight);
    }

    #[test]
    fn in_flight_gates_until_ack() {
        let mut svc = AppService::new();
        let mut sink = RecordingSink::default();
        svc.handle_event(AppEvent::ConnectivityUp, &mut sink);
        svc.poll(EMISSION_PERIOD_US + 1, &mut sink, &mut NullEntropy);
        assert_eq!(sink.submissions.len(), 1);

        // Far beyond another period, still gated.
        svc.poll(EMISSION_PERIOD_US * 5, &mut sink, &mut NullEntropy);
        assert_eq!(sink.submissions.len(), 1);

        svc.handle_event(AppEvent::OutboundAcked, &mut sink);
        assert!(!svc.state().message_in_flight);
        svc.poll(EMISSION_PERIOD_US * 5, &mut sink, &mut NullEntropy);
        assert_eq!(sink.submissions.len(), 2);
    }

    #[test]
    fn failed_submit_still_sets_in_flight() {
        // No retry by design: a lost hand-off waits for the ack path.
        let mut svc = AppService::new();
        let mut sink = RecordingSink {
            fail_next: true,
            ..Default::default()
        };
        svc.handle_event(AppEvent::ConnectivityUp, &mut sink);
        svc.poll(EMISSION_PERIOD_US + 1, &mut sink, &mut NullEntropy);
        assert!(sink.submissions.is_empty());
        assert!(svc.state().message_in_flight);
        assert_eq!(svc.state().last_emission_us, EMISSION_PERIOD_US + 1);
    }

    #[test]
    fn emission_advances_position_by_one_step() {
        let mut svc = AppService::new();
        let mut sink = RecordingSink::default();
        svc.handle_event(AppEvent::ConnectivityUp, &mut sink);
        svc.poll(EMISSION_PERIOD_US + 1, &mut sink, &mut NullEntropy);
        // Bearing 0 → sin 0, cos 1: latitude unchanged, longitude +0.005.
        let s = svc.state();
        assert!((s.latitude - 51.5081).abs() < 1e-12);
        assert!((s.longitude - (-0.1248 + 0.005)).abs() < 1e-12);
        assert_eq!(
            svc.last_payload(),
            "{\"data\":{\"location\":[51.50810000,-0.11980000]}}"
        );
    }
}
