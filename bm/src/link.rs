//! Simulated per-connection driver surface

use std::sync::{Arc, Mutex, PoisonError};

use blebridge::bridge::PeripheralBridge;
use blebridge::domain::{Characteristic, Service};
use blebridge::error::DriverError;
use tracing::debug;
use uuid::Uuid;

use crate::topology::MockPeripheral;

/// Simulated connection to one peripheral
///
/// Each request enqueues on the bridge exactly like a real driver wrapper
/// would, then delivers the matching callback from a spawned task after the
/// peripheral's configured latency.
pub struct MockLink {
    bridge: Arc<PeripheralBridge>,
    topology: MockPeripheral,
    /// Error to attach to the next service-discovery callback
    next_service_error: Mutex<Option<DriverError>>,
}

impl MockLink {
    pub fn new(topology: MockPeripheral) -> Self {
        Self {
            bridge: Arc::new(PeripheralBridge::new()),
            topology,
            next_service_error: Mutex::new(None),
        }
    }

    /// The bridge this link delivers callbacks into
    pub fn bridge(&self) -> &Arc<PeripheralBridge> {
        &self.bridge
    }

    /// Make the next service discovery fail with `error`
    pub fn inject_service_error(&self, error: DriverError) {
        *self
            .next_service_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(error);
    }

    /// Issue a service-discovery request
    pub fn discover_services(&self) -> Uuid {
        let bridge = Arc::clone(&self.bridge);
        let services: Vec<Service> = self.topology.services.iter().map(|s| s.service).collect();
        let latency = self.topology.latency;
        let error = self
            .next_service_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        self.bridge.enqueue_service_discovery(move || {
            debug!("MockLink: driver accepted service discovery");
            tokio::spawn(async move {
                tokio::time::sleep(latency).await;
                match error {
                    Some(e) => bridge.did_discover_services(None, Some(e)),
                    None => bridge.did_discover_services(Some(services), None),
                }
            });
        })
    }

    /// Issue a characteristic-discovery request for one service
    pub fn discover_characteristics(&self, service: &Service) -> Uuid {
        let id = self.bridge.enqueue_characteristic_discovery();

        let bridge = Arc::clone(&self.bridge);
        let service = *service;
        let characteristics: Option<Vec<Characteristic>> = self
            .topology
            .services
            .iter()
            .find(|s| s.service.uuid == service.uuid)
            .map(|s| s.characteristics.iter().map(|c| c.characteristic.clone()).collect());
        let latency = self.topology.latency;

        tokio::spawn(async move {
            tokio::time::sleep(latency).await;
            bridge.did_discover_characteristics(service, characteristics, None);
        });
        id
    }

    /// Issue a descriptor-discovery request for one characteristic
    pub fn discover_descriptors(&self, characteristic: &Characteristic) -> Uuid {
        let id = self.bridge.enqueue_descriptor_discovery();

        let bridge = Arc::clone(&self.bridge);
        let characteristic = characteristic.clone();
        let descriptors = self.find_mock(characteristic.uuid).map(|c| c.descriptors.clone());
        let latency = self.topology.latency;

        tokio::spawn(async move {
            tokio::time::sleep(latency).await;
            bridge.did_discover_descriptors(characteristic, descriptors, None);
        });
        id
    }

    /// Read a characteristic value; the callback carries the topology's value
    pub fn read_characteristic(&self, characteristic: &Characteristic) {
        let bridge = Arc::clone(&self.bridge);
        let snapshot = self
            .find_mock(characteristic.uuid)
            .map(|c| c.characteristic.clone())
            .unwrap_or_else(|| characteristic.clone());
        let latency = self.topology.latency;

        tokio::spawn(async move {
            tokio::time::sleep(latency).await;
            bridge.did_update_characteristic_value(snapshot, None);
        });
    }

    /// Write a characteristic value and confirm it
    pub fn write_characteristic(&self, characteristic: &Characteristic, value: Vec<u8>) {
        let bridge = Arc::clone(&self.bridge);
        let written = characteristic.clone().with_value(value);
        let latency = self.topology.latency;

        tokio::spawn(async move {
            tokio::time::sleep(latency).await;
            bridge.did_write_characteristic_value(written, None);
            bridge.is_ready_to_send_without_response();
        });
    }

    /// Enable or disable notifications for a characteristic
    pub fn set_notifying(&self, characteristic: &Characteristic) {
        let bridge = Arc::clone(&self.bridge);
        let characteristic = characteristic.clone();
        let latency = self.topology.latency;

        tokio::spawn(async move {
            tokio::time::sleep(latency).await;
            bridge.did_update_notification_state(characteristic, None);
        });
    }

    /// Read the connection's signal strength
    pub fn read_rssi(&self) {
        let bridge = Arc::clone(&self.bridge);
        let rssi = self.topology.rssi;
        let latency = self.topology.latency;

        tokio::spawn(async move {
            tokio::time::sleep(latency).await;
            bridge.did_read_rssi(rssi, None);
        });
    }

    fn find_mock(&self, uuid: Uuid) -> Option<&crate::topology::MockCharacteristic> {
        self.topology
            .services
            .iter()
            .flat_map(|s| s.characteristics.iter())
            .find(|c| c.characteristic.uuid == uuid)
    }
}
