//! Remote command vocabulary carried on inbound message payloads.
//!
//! The device accepts two control words: `stop` suspends periodic telemetry,
//! `restart` resumes it. Matching reproduces the legacy device contract: a
//! payload matches a token when the payload bytes are a prefix of the token
//! (case-sensitive, no trimming). `"stop"` and `"sto"` both match `stop`;
//! `"stopped"` matches nothing. Both tokens are tested independently per
//! message, so a zero-length payload matches both and the `restart` effect
//! wins. Unrecognized payloads are ignored, never an error.

/// Token that suspends periodic emission.
pub const STOP_TOKEN: &[u8] = b"stop";

/// Token that resumes periodic emission.
pub const RESTART_TOKEN: &[u8] = b"restart";

/// Outcome of matching one payload against the command vocabulary.
///
/// Flags are independent; apply `stop` before `restart`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandMatch {
    pub stop: bool,
    pub restart: bool,
}

impl CommandMatch {
    /// True when the payload matched neither token.
    pub fn is_ignored(&self) -> bool {
        !self.stop && !self.restart
    }
}

/// Match `payload` against both command tokens.
pub fn interpret(payload: &[u8]) -> CommandMatch {
    CommandMatch {
        stop: matches_token(STOP_TOKEN, payload),
        restart: matches_token(RESTART_TOKEN, payload),
    }
}

fn matches_token(token: &[u8], payload: &[u8]) -> bool {
    payload.len() <= token.len() && token[..payload.len()] == *payload
}
