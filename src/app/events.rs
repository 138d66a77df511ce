//! Typed events consumed by the application task.
//!
//! Producers (the connectivity layer and the inbound-message layer) build
//! these and hand them to the [`EventBridge`](crate::bridge::EventBridge);
//! ownership moves producer → bridge → task. Events are never mutated after
//! enqueue.

use core::fmt;

use heapless::Vec;

/// Longest MQTT topic the inbound path will carry.
pub const MAX_TOPIC_LEN: usize = 64;

/// Longest inbound payload the inbound path will carry.
pub const MAX_INBOUND_PAYLOAD_LEN: usize = 128;

/// Events delivered to the application task through the bridge.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The transport layer established a broker session.
    ConnectivityUp,

    /// The broker session dropped.
    ConnectivityDown,

    /// A message arrived on a subscribed topic.
    InboundMessage(InboundMessage),

    /// The transport layer confirmed delivery of the last outbound message.
    OutboundAcked,
}

/// An inbound message captured into fixed-capacity buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub topic: Vec<u8, MAX_TOPIC_LEN>,
    pub payload: Vec<u8, MAX_INBOUND_PAYLOAD_LEN>,
}

impl InboundMessage {
    /// Copy `topic` and `payload` into owned buffers.
    ///
    /// Fails if either slice exceeds its fixed capacity; the caller is
    /// expected to log and drop the message rather than truncate it.
    pub fn from_slices(topic: &[u8], payload: &[u8]) -> Result<Self, MessageTooLarge> {
        let mut msg = Self {
            topic: Vec::new(),
            payload: Vec::new(),
        };
        msg.topic
            .extend_from_slice(topic)
            .map_err(|()| MessageTooLarge)?;
        msg.payload
            .extend_from_slice(payload)
            .map_err(|()| MessageTooLarge)?;
        Ok(msg)
    }
}

/// Topic or payload did not fit the fixed inbound buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageTooLarge;

impl fmt::Display for MessageTooLarge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "inbound message exceeds buffer capacity")
    }
}
