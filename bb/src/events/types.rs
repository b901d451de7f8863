//! Payload types carried on the event sink channels

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Characteristic, ConnectionEvent, Descriptor, Peripheral, Service};
use crate::error::DriverError;

/// Outcome of a connection attempt: success when `error` is `None`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConnectionAttempt {
    pub peripheral: Peripheral,
    pub error: Option<DriverError>,
}

/// A peripheral disconnected
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Disconnection {
    pub peripheral: Peripheral,
    pub timestamp: DateTime<Utc>,
    /// Whether the driver intends to reconnect on its own
    pub is_reconnecting: bool,
    pub error: Option<DriverError>,
}

/// Peer-level connection event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeerEvent {
    pub peripheral: Peripheral,
    pub event: ConnectionEvent,
}

/// Characteristic value update, write confirmation, or notification-state
/// change, depending on the channel it arrives on
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharacteristicUpdate {
    pub characteristic: Characteristic,
    pub error: Option<DriverError>,
}

/// Descriptor value update or write confirmation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DescriptorUpdate {
    pub descriptor: Descriptor,
    pub error: Option<DriverError>,
}

/// Characteristics found within one service
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharacteristicDiscovery {
    pub service: Service,
    pub characteristics: Option<Vec<Characteristic>>,
}

/// Descriptors found within one characteristic
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DescriptorDiscovery {
    pub characteristic: Characteristic,
    pub descriptors: Option<Vec<Descriptor>>,
}

/// Signal-strength reading for the active connection
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RssiReading {
    pub rssi: i16,
    pub error: Option<DriverError>,
}
