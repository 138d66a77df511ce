//! GeoBeacon tracker firmware library.
//!
//! Exposes the application core, event bridge, and platform adapters for
//! integration testing and external inspection. All ESP-IDF-specific code
//! is guarded by `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod bridge;
pub mod config;
pub mod task;

mod esp_link_shims;
