//! Platform adapters implementing the port traits in
//! [`crate::app::ports`].
//!
//! Each adapter compiles for both the ESP-IDF target and the host: the
//! target side wraps the IDF APIs, the host side substitutes `std`
//! equivalents so the same code paths run under tests and simulation.

pub mod entropy;
pub mod time;
pub mod work;
