//! GeoBeacon firmware — main entry point.
//!
//! Boots the ESP-IDF runtime, wires the platform adapters to the
//! application core, and parks the main thread in the application task
//! loop. The broker transport lives in a separate crate; it attaches to
//! the same [`EventBridge`] and replaces the bring-up work sink.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 Adapters (outer ring)                │
//! │  TimeAdapter   EntropyAdapter   LogWorkSink          │
//! │  (ClockPort)   (EntropyPort)    (WorkSink)           │
//! │                                                      │
//! │  ────────────── Port Trait Boundary ──────────────   │
//! │                                                      │
//! │  ┌────────────────────────────────────────────────┐  │
//! │  │  AppService — state machine · periodic emitter │  │
//! │  └────────────────────────────────────────────────┘  │
//! │                        ▲                             │
//! │                 EventBridge (16)                     │
//! │        connectivity · inbound · delivery acks        │
//! └──────────────────────────────────────────────────────┘
//! ```

#![deny(unused_must_use)]

use anyhow::Result;
use log::{info, warn};

use geobeacon::adapters::entropy::EntropyAdapter;
use geobeacon::adapters::time::TimeAdapter;
use geobeacon::adapters::work::LogWorkSink;
use geobeacon::app::events::AppEvent;
use geobeacon::app::service::AppService;
use geobeacon::bridge::EventBridge;
use geobeacon::config::BrokerConfig;
use geobeacon::task;

/// Producers on other threads (transport callbacks) enqueue into this.
static BRIDGE: EventBridge = EventBridge::new();

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("GeoBeacon v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Broker configuration ───────────────────────────────
    // Provisioning delivery is handled by the transport crate; until it
    // attaches, the default (incomplete) config keeps the session offline.
    let broker = BrokerConfig::default();
    if broker.is_complete() {
        info!("broker config: {}:{}", broker.broker_host, broker.broker_port);
    } else {
        warn!("broker config incomplete — running in local bring-up mode");
        // Bring-up mode has no transport to raise the link, so raise it
        // here and let LogWorkSink loop delivery acks back.
        if BRIDGE.enqueue(AppEvent::ConnectivityUp).is_err() {
            warn!("bridge full at boot");
        }
    }

    // ── 3. Wire adapters to the application core ──────────────
    let clock = TimeAdapter::new();
    let mut entropy = EntropyAdapter::new();
    let mut work = LogWorkSink::new(&BRIDGE);
    let mut service = AppService::new();

    // ── 4. Park in the task loop (never returns) ──────────────
    futures_lite::future::block_on(task::run(
        &BRIDGE,
        &mut service,
        &mut work,
        &clock,
        &mut entropy,
    ));
    unreachable!("application task loop exited");
}
