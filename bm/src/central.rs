//! Simulated central driver

use std::sync::Arc;

use blebridge::bridge::CentralBridge;
use blebridge::domain::{ManagerState, RestorationPayload};
use blebridge::error::DriverError;
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::link::MockLink;
use crate::topology::MockPeripheral;

/// Simulated central: drives a [`CentralBridge`] the way the real driver
/// would, delivering callbacks from spawned tasks
pub struct MockCentral {
    bridge: Arc<CentralBridge>,
    peripherals: Vec<MockPeripheral>,
}

impl MockCentral {
    pub fn new(peripherals: Vec<MockPeripheral>) -> Self {
        Self {
            bridge: Arc::new(CentralBridge::new()),
            peripherals,
        }
    }

    /// The bridge this central delivers callbacks into
    pub fn bridge(&self) -> &Arc<CentralBridge> {
        &self.bridge
    }

    /// The configured topology
    pub fn peripherals(&self) -> &[MockPeripheral] {
        &self.peripherals
    }

    /// Report the radio as powered on
    pub fn power_on(&self) {
        self.bridge.did_update_state(ManagerState::PoweredOn);
    }

    /// Report the radio as powered off
    pub fn power_off(&self) {
        self.bridge.did_update_state(ManagerState::PoweredOff);
    }

    /// Deliver one discovery callback per configured peripheral
    pub fn start_scan(&self) {
        debug!(count = self.peripherals.len(), "MockCentral::start_scan");
        for p in &self.peripherals {
            let bridge = Arc::clone(&self.bridge);
            let peripheral = p.peripheral.clone();
            let advertisement_data = p.advertisement_data.clone();
            let (rssi, latency) = (p.rssi, p.latency);
            tokio::spawn(async move {
                tokio::time::sleep(latency).await;
                bridge.did_discover(peripheral, advertisement_data, rssi);
            });
        }
    }

    /// Simulate a successful connection to the given peripheral
    pub fn connect(&self, id: Uuid) {
        let Some(p) = self.find(id) else { return };
        let bridge = Arc::clone(&self.bridge);
        let peripheral = p.peripheral.clone();
        let latency = p.latency;
        tokio::spawn(async move {
            tokio::time::sleep(latency).await;
            bridge.did_connect(peripheral);
        });
    }

    /// Simulate a failed connection attempt
    pub fn fail_to_connect(&self, id: Uuid, error: DriverError) {
        let Some(p) = self.find(id) else { return };
        let bridge = Arc::clone(&self.bridge);
        let peripheral = p.peripheral.clone();
        let latency = p.latency;
        tokio::spawn(async move {
            tokio::time::sleep(latency).await;
            bridge.did_fail_to_connect(peripheral, error);
        });
    }

    /// Simulate a disconnection
    pub fn disconnect(&self, id: Uuid, is_reconnecting: bool, error: Option<DriverError>) {
        let Some(p) = self.find(id) else { return };
        let bridge = Arc::clone(&self.bridge);
        let peripheral = p.peripheral.clone();
        let latency = p.latency;
        tokio::spawn(async move {
            tokio::time::sleep(latency).await;
            bridge.did_disconnect_at(peripheral, Utc::now(), is_reconnecting, error);
        });
    }

    /// Replay restored session state
    ///
    /// Delivered synchronously: the real driver raises this during its own
    /// initialization, typically before any subscriber exists.
    pub fn restore(&self, payload: RestorationPayload) {
        self.bridge.will_restore_state(payload);
    }

    /// Open a per-connection link for a connected peripheral
    pub fn link(&self, id: Uuid) -> Option<MockLink> {
        self.find(id).cloned().map(MockLink::new)
    }

    fn find(&self, id: Uuid) -> Option<&MockPeripheral> {
        self.peripherals.iter().find(|p| p.peripheral.id == id)
    }
}
