//! The application task — single consumer of the event bridge.
//!
//! A cooperative loop with exactly one suspension point: the timed dequeue.
//! Each wake-up applies at most one event to the service, then runs the
//! periodic emission check. The bounded wait is what keeps emission latency
//! bounded when no events arrive — an unbounded receive would stall the
//! emitter until the next event.
//!
//! The loop has no cancellation path; it runs for the life of the process.

use log::info;

use crate::app::ports::{ClockPort, EntropyPort, WorkSink};
use crate::app::service::AppService;
use crate::bridge::{EventBridge, POLL_INTERVAL};

/// Drive the application service off the bridge. Never returns.
pub async fn run(
    bridge: &EventBridge,
    service: &mut AppService,
    work: &mut impl WorkSink,
    clock: &impl ClockPort,
    entropy: &mut impl EntropyPort,
) {
    info!(
        "application task started (poll interval {} ms)",
        POLL_INTERVAL.as_millis()
    );

    loop {
        if let Some(event) = bridge.dequeue(POLL_INTERVAL).await {
            service.handle_event(event, work);
        }
        // Runs after every event application and after every timeout, so
        // the emission check is never starved by a busy or an idle bridge.
        service.poll(clock.now_us(), work, entropy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::events::AppEvent;
    use crate::app::ports::DispatchError;
    use crate::app::service::EMISSION_PERIOD_US;
    use core::future::Future;
    use core::pin::pin;
    use core::task::{Context, Poll};

    struct ManualClock(u64);
    impl ClockPort for ManualClock {
        fn now_us(&self) -> u64 {
            self.0
        }
    }

    struct FixedBearing(f64);
    impl EntropyPort for FixedBearing {
        fn next_bearing(&mut self) -> f64 {
            self.0
        }
    }

    #[derive(Default)]
    struct CountingSink {
        submits: usize,
        consumed: usize,
    }
    impl WorkSink for CountingSink {
        fn submit(&mut self, _payload: &[u8]) -> Result<(), DispatchError> {
            self.submits += 1;
            Ok(())
        }
        fn message_consumed(&mut self) {
            self.consumed += 1;
        }
    }

    /// Poll the task future until the bridge is drained and one more
    /// periodic check has run. The future itself never completes.
    fn turn_task_until_idle(
        bridge: &EventBridge,
        service: &mut AppService,
        work: &mut CountingSink,
        clock: &ManualClock,
    ) {
        let mut entropy = FixedBearing(0.0);
        let fut = run(bridge, service, work, clock, &mut entropy);
        let mut fut = pin!(fut);
        // Drive with a noop waker; each poll makes progress while events
        // are pending and parks on the timed dequeue once idle.
        let noop = noop_waker();
        let mut cx = Context::from_waker(&noop);
        for _ in 0..32 {
            if let Poll::Ready(()) = fut.as_mut().poll(&mut cx) {
                unreachable!("task loop must never complete");
            }
        }
    }

    fn noop_waker() -> core::task::Waker {
        use core::task::{RawWaker, RawWakerVTable};
        fn clone(_: *const ()) -> RawWaker {
            RawWaker::new(core::ptr::null(), &VTABLE)
        }
        fn noop(_: *const ()) {}
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
        unsafe { core::task::Waker::from_raw(RawWaker::new(core::ptr::null(), &VTABLE)) }
    }

    #[test]
    fn events_then_periodic_check_in_one_turn() {
        let bridge = EventBridge::new();
        let mut service = AppService::new();
        let mut sink = CountingSink::default();
        let clock = ManualClock(EMISSION_PERIOD_US + 1);

        bridge.enqueue(AppEvent::ConnectivityUp).unwrap();
        turn_task_until_idle(&bridge, &mut service, &mut sink, &clock);

        assert!(service.state().connected);
        assert_eq!(sink.submits, 1, "one emission after the event applied");
        assert!(service.state().message_in_flight);
    }
}
