//! Central event bridge

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::BridgeConfig;
use crate::domain::{
    AdvertisementData, ConnectionEvent, ManagerState, Peripheral, RESTORED_PERIPHERALS_KEY,
    RESTORED_SCAN_OPTIONS_KEY, RESTORED_SCAN_SERVICES_KEY, RestorationPayload, ScanResult,
};
use crate::error::DriverError;
use crate::events::{CentralEvents, ConnectionAttempt, Disconnection, PeerEvent};
use crate::latch::RestorationLatch;

/// Bridge for manager-level driver callbacks
///
/// Owns the central event sink and the restoration latch. Callbacks may
/// arrive on any driver-internal thread; every method is `&self` and safe to
/// call concurrently.
pub struct CentralBridge {
    events: CentralEvents,
    latch: RestorationLatch,
}

impl CentralBridge {
    pub fn new() -> Self {
        Self::with_config(BridgeConfig::default())
    }

    pub fn with_config(config: BridgeConfig) -> Self {
        let events = CentralEvents::new(config.channel_capacity);
        let latch = RestorationLatch::new(events.restored_sender());
        Self { events, latch }
    }

    /// The event sink application code subscribes on
    pub fn events(&self) -> &CentralEvents {
        &self.events
    }

    // === Monitoring the manager's state ===

    pub fn did_update_state(&self, state: ManagerState) {
        info!(?state, "CentralBridge::did_update_state");
        self.events.publish_state(state);
    }

    // === Monitoring connections with peripherals ===

    pub fn did_connect(&self, peripheral: Peripheral) {
        debug!(peripheral = %peripheral.id, "CentralBridge::did_connect");
        self.events.publish_connection(ConnectionAttempt {
            peripheral,
            error: None,
        });
    }

    pub fn did_fail_to_connect(&self, peripheral: Peripheral, error: DriverError) {
        debug!(peripheral = %peripheral.id, %error, "CentralBridge::did_fail_to_connect");
        self.events.publish_connection(ConnectionAttempt {
            peripheral,
            error: Some(error),
        });
    }

    /// Disconnect callback without reconnect intent (older driver surface)
    pub fn did_disconnect(&self, peripheral: Peripheral, error: Option<DriverError>) {
        self.did_disconnect_at(peripheral, Utc::now(), false, error);
    }

    /// Disconnect callback with timestamp and reconnect intent
    pub fn did_disconnect_at(
        &self,
        peripheral: Peripheral,
        timestamp: DateTime<Utc>,
        is_reconnecting: bool,
        error: Option<DriverError>,
    ) {
        debug!(
            peripheral = %peripheral.id,
            is_reconnecting,
            "CentralBridge::did_disconnect_at"
        );
        self.events.publish_disconnection(Disconnection {
            peripheral,
            timestamp,
            is_reconnecting,
            error,
        });
    }

    pub fn connection_event_did_occur(&self, peripheral: Peripheral, event: ConnectionEvent) {
        debug!(peripheral = %peripheral.id, ?event, "CentralBridge::connection_event_did_occur");
        self.events.publish_peer_event(PeerEvent { peripheral, event });
    }

    // === Discovering peripherals ===

    pub fn did_discover(
        &self,
        peripheral: Peripheral,
        advertisement_data: AdvertisementData,
        rssi: i16,
    ) {
        debug!(peripheral = %peripheral.id, rssi, "CentralBridge::did_discover");
        self.events
            .publish_scan_result(ScanResult::new(peripheral, rssi, advertisement_data));
    }

    // === State restoration ===

    /// Driver replay of session state kept alive across a relaunch
    pub fn will_restore_state(&self, payload: RestorationPayload) {
        let mut keys: Vec<&str> = payload.keys().map(String::as_str).collect();
        keys.sort_unstable();
        info!(?keys, "CentralBridge::will_restore_state");

        if let Some(serde_json::Value::Array(peripherals)) = payload.get(RESTORED_PERIPHERALS_KEY)
        {
            info!(count = peripherals.len(), "CentralBridge: restoring peripherals");
        }
        if let Some(serde_json::Value::Array(services)) = payload.get(RESTORED_SCAN_SERVICES_KEY) {
            info!(count = services.len(), "CentralBridge: restoring scan services");
        }
        if payload.contains_key(RESTORED_SCAN_OPTIONS_KEY) {
            info!("CentralBridge: restoring scan options");
        }

        self.latch.on_restoration_event(payload);
    }

    /// Signal that all intended restoration subscribers have attached
    ///
    /// Called once during application startup; buffered restoration events
    /// flush on the first call and repeated calls are tolerated.
    pub fn mark_restoration_ready(&self) {
        self.latch.mark_ready();
    }

    /// Whether restoration readiness has been signaled
    pub fn restoration_ready(&self) -> bool {
        self.latch.is_ready()
    }
}

impl Default for CentralBridge {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn peripheral() -> Peripheral {
        Peripheral::new(Uuid::new_v4(), Some("Sensor".to_string()))
    }

    #[test]
    fn test_state_update_reaches_watch_channel() {
        let bridge = CentralBridge::new();
        bridge.did_update_state(ManagerState::PoweredOn);
        assert_eq!(bridge.events().current_state(), ManagerState::PoweredOn);
    }

    #[tokio::test]
    async fn test_connect_and_fail_share_a_channel() {
        let bridge = CentralBridge::new();
        let mut rx = bridge.events().subscribe_connections();

        let ok = peripheral();
        let failed = peripheral();
        bridge.did_connect(ok.clone());
        bridge.did_fail_to_connect(failed.clone(), DriverError::new(7, "connection timed out"));

        let first = rx.recv().await.unwrap();
        assert_eq!(first.peripheral, ok);
        assert!(first.error.is_none());

        let second = rx.recv().await.unwrap();
        assert_eq!(second.peripheral, failed);
        assert_eq!(second.error.unwrap().code, 7);
    }

    #[tokio::test]
    async fn test_legacy_disconnect_defaults() {
        let bridge = CentralBridge::new();
        let mut rx = bridge.events().subscribe_disconnections();

        bridge.did_disconnect(peripheral(), None);

        let disconnection = rx.recv().await.unwrap();
        assert!(!disconnection.is_reconnecting);
        assert!(disconnection.error.is_none());
    }

    #[tokio::test]
    async fn test_scan_callback_builds_scan_result() {
        let bridge = CentralBridge::new();
        let mut rx = bridge.events().subscribe_scan_results();

        let p = peripheral();
        let mut adv = AdvertisementData::new();
        adv.insert(crate::domain::ADV_LOCAL_NAME_KEY.to_string(), "HRM-42".into());
        bridge.did_discover(p.clone(), adv, -63);

        let result = rx.recv().await.unwrap();
        assert_eq!(result.peripheral, p);
        assert_eq!(result.rssi, -63);
        assert_eq!(result.local_name(), Some("HRM-42"));
    }

    #[tokio::test]
    async fn test_restoration_buffered_until_ready() {
        let bridge = CentralBridge::new();

        let mut payload = RestorationPayload::new();
        payload.insert(RESTORED_PERIPHERALS_KEY.to_string(), serde_json::json!([]));
        bridge.will_restore_state(payload);

        // Subscriber attaches after the driver event, before readiness
        let mut rx = bridge.events().subscribe_restored();
        assert!(rx.try_recv().is_err());

        bridge.mark_restoration_ready();
        let restored = rx.recv().await.unwrap();
        assert!(restored.contains_key(RESTORED_PERIPHERALS_KEY));
        assert!(bridge.restoration_ready());
    }

    #[tokio::test]
    async fn test_restoration_direct_after_ready() {
        let bridge = CentralBridge::new();
        bridge.mark_restoration_ready();

        let mut rx = bridge.events().subscribe_restored();
        bridge.will_restore_state(RestorationPayload::new());
        assert!(rx.recv().await.is_ok());
    }
}
