//! Broker connection configuration.
//!
//! The device fetches these values from its management channel at boot
//! (fetch transport lives outside this crate); this module only defines the
//! bounded shape the rest of the firmware consumes. Field capacities mirror
//! the device provisioning contract.

use heapless::String;
use serde::{Deserialize, Serialize};

/// Longest broker hostname accepted from provisioning.
pub const MAX_HOST_LEN: usize = 128;

/// MQTT client identifier capacity (device SID plus a discriminator).
pub const MAX_CLIENT_ID_LEN: usize = 34;

/// Capacity of each access credential.
pub const MAX_CREDENTIAL_LEN: usize = 128;

/// Broker connection parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerConfig {
    /// Broker hostname, no scheme.
    pub broker_host: String<MAX_HOST_LEN>,
    /// TLS MQTT port.
    pub broker_port: u16,
    /// Client identifier presented to the broker.
    pub client_id: String<MAX_CLIENT_ID_LEN>,
    /// Access key for the broker's credential scheme.
    pub access_key: String<MAX_CREDENTIAL_LEN>,
    /// Access secret for the broker's credential scheme.
    pub access_secret: String<MAX_CREDENTIAL_LEN>,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            broker_host: String::new(),
            broker_port: 8883,
            client_id: String::new(),
            access_key: String::new(),
            access_secret: String::new(),
        }
    }
}

impl BrokerConfig {
    /// Whether every field required to open a session is populated.
    /// An incomplete config keeps the transport layer idle; it is not an
    /// error at this layer.
    pub fn is_complete(&self) -> bool {
        !self.broker_host.is_empty()
            && !self.client_id.is_empty()
            && !self.access_key.is_empty()
            && !self.access_secret.is_empty()
    }
}
