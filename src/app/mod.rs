//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules of the tracker: the event-driven
//! state machine, the remote command vocabulary, the periodic telemetry
//! emitter, and the bounded payload formatter. All interaction with the
//! transport stack and the platform happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without a device.

pub mod commands;
pub mod events;
pub mod payload;
pub mod ports;
pub mod service;
