//! Peripheral topology records: peripheral, service, characteristic, descriptor

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Handle to a remote peripheral
///
/// Identity is the driver-assigned UUID; the name may change over the lifetime
/// of a connection (see the name-update event channel).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peripheral {
    pub id: Uuid,
    pub name: Option<String>,
}

impl Peripheral {
    pub fn new(id: Uuid, name: Option<String>) -> Self {
        Self { id, name }
    }
}

/// A GATT service discovered on a peripheral
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub uuid: Uuid,
    pub is_primary: bool,
}

impl Service {
    pub fn new(uuid: Uuid, is_primary: bool) -> Self {
        Self { uuid, is_primary }
    }
}

/// Capability flags of a characteristic
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacteristicProperties {
    pub broadcast: bool,
    pub read: bool,
    pub write_without_response: bool,
    pub write: bool,
    pub notify: bool,
    pub indicate: bool,
}

/// A characteristic of a service
///
/// `value` is the latest snapshot the driver reported; value-update events on
/// the sink carry a fresh record each time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Characteristic {
    pub uuid: Uuid,
    /// UUID of the owning service
    pub service: Uuid,
    pub properties: CharacteristicProperties,
    pub value: Option<Vec<u8>>,
}

impl Characteristic {
    pub fn new(uuid: Uuid, service: Uuid, properties: CharacteristicProperties) -> Self {
        Self {
            uuid,
            service,
            properties,
            value: None,
        }
    }

    pub fn with_value(mut self, value: Vec<u8>) -> Self {
        self.value = Some(value);
        self
    }
}

/// A descriptor of a characteristic
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    pub uuid: Uuid,
    /// UUID of the owning characteristic
    pub characteristic: Uuid,
    pub value: Option<Vec<u8>>,
}

impl Descriptor {
    pub fn new(uuid: Uuid, characteristic: Uuid) -> Self {
        Self {
            uuid,
            characteristic,
            value: None,
        }
    }
}
