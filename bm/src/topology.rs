//! Declarative mock topology

use std::time::Duration;

use blebridge::domain::{
    ADV_IS_CONNECTABLE_KEY, ADV_LOCAL_NAME_KEY, AdvertisementData, Characteristic,
    CharacteristicProperties, Descriptor, Peripheral, Service,
};
use uuid::Uuid;

/// Default simulated callback latency
const DEFAULT_LATENCY: Duration = Duration::from_millis(5);

/// A simulated peripheral and everything it advertises and serves
#[derive(Clone, Debug)]
pub struct MockPeripheral {
    pub peripheral: Peripheral,
    pub rssi: i16,
    pub advertisement_data: AdvertisementData,
    pub services: Vec<MockService>,
    /// Delay between a request and its simulated callback
    pub latency: Duration,
}

impl MockPeripheral {
    pub fn new(name: &str) -> Self {
        let mut advertisement_data = AdvertisementData::new();
        advertisement_data.insert(ADV_LOCAL_NAME_KEY.to_string(), name.into());
        advertisement_data.insert(ADV_IS_CONNECTABLE_KEY.to_string(), true.into());
        Self {
            peripheral: Peripheral::new(Uuid::new_v4(), Some(name.to_string())),
            rssi: -60,
            advertisement_data,
            services: Vec::new(),
            latency: DEFAULT_LATENCY,
        }
    }

    pub fn with_rssi(mut self, rssi: i16) -> Self {
        self.rssi = rssi;
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_service(mut self, service: MockService) -> Self {
        self.services.push(service);
        self
    }
}

/// A simulated service with its characteristics
#[derive(Clone, Debug)]
pub struct MockService {
    pub service: Service,
    pub characteristics: Vec<MockCharacteristic>,
}

impl MockService {
    pub fn primary() -> Self {
        Self {
            service: Service::new(Uuid::new_v4(), true),
            characteristics: Vec::new(),
        }
    }

    pub fn secondary() -> Self {
        Self {
            service: Service::new(Uuid::new_v4(), false),
            characteristics: Vec::new(),
        }
    }

    pub fn with_characteristic(mut self, mut characteristic: MockCharacteristic) -> Self {
        characteristic.characteristic.service = self.service.uuid;
        self.characteristics.push(characteristic);
        self
    }
}

/// A simulated characteristic with its descriptors
#[derive(Clone, Debug)]
pub struct MockCharacteristic {
    pub characteristic: Characteristic,
    pub descriptors: Vec<Descriptor>,
}

impl MockCharacteristic {
    pub fn new(properties: CharacteristicProperties) -> Self {
        // The owning service UUID is patched in by MockService::with_characteristic
        Self {
            characteristic: Characteristic::new(Uuid::new_v4(), Uuid::nil(), properties),
            descriptors: Vec::new(),
        }
    }

    pub fn readable() -> Self {
        Self::new(CharacteristicProperties {
            read: true,
            ..Default::default()
        })
    }

    pub fn notifying() -> Self {
        Self::new(CharacteristicProperties {
            read: true,
            notify: true,
            ..Default::default()
        })
    }

    pub fn writable() -> Self {
        Self::new(CharacteristicProperties {
            write: true,
            write_without_response: true,
            ..Default::default()
        })
    }

    pub fn with_value(mut self, value: Vec<u8>) -> Self {
        self.characteristic.value = Some(value);
        self
    }

    pub fn with_descriptor(mut self) -> Self {
        self.descriptors
            .push(Descriptor::new(Uuid::new_v4(), self.characteristic.uuid));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_characteristic_adopts_service_uuid() {
        let service = MockService::primary().with_characteristic(MockCharacteristic::readable());
        assert_eq!(
            service.characteristics[0].characteristic.service,
            service.service.uuid
        );
    }

    #[test]
    fn test_peripheral_advertises_its_name() {
        let peripheral = MockPeripheral::new("Thermometer");
        assert_eq!(
            peripheral.advertisement_data[ADV_LOCAL_NAME_KEY],
            "Thermometer"
        );
        assert_eq!(peripheral.peripheral.name.as_deref(), Some("Thermometer"));
    }

    #[test]
    fn test_descriptor_points_at_characteristic() {
        let ch = MockCharacteristic::notifying().with_descriptor();
        assert_eq!(ch.descriptors[0].characteristic, ch.characteristic.uuid);
    }
}
