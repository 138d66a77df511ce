//! Bounded telemetry payload formatter.
//!
//! The only externally observable byte format this core produces:
//! `{"data":{"location":[<lat>,<lon>]}}` with exactly 8 fractional digits
//! per coordinate, written into a reusable fixed-capacity buffer. The
//! capacity check is explicit — an overflow is a typed error, never a panic
//! and never a truncated payload.

use core::fmt::{self, Write as _};

use heapless::String;

/// Worst-case formatted length for the location payload.
pub const PAYLOAD_CAPACITY: usize = 128;

/// Reusable outbound payload buffer.
pub type PayloadBuf = String<PAYLOAD_CAPACITY>;

/// The formatted payload did not fit [`PAYLOAD_CAPACITY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadOverflow;

impl fmt::Display for PayloadOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "telemetry payload exceeds {PAYLOAD_CAPACITY} bytes")
    }
}

/// Clear `buf` and format a location payload into it.
pub fn format_location(
    buf: &mut PayloadBuf,
    latitude: f64,
    longitude: f64,
) -> Result<(), PayloadOverflow> {
    buf.clear();
    write!(
        buf,
        "{{\"data\":{{\"location\":[{latitude:.8},{longitude:.8}]}}}}"
    )
    .map_err(|_| PayloadOverflow)
}
