//! End-to-end flows: bridge driven by the mock driver across task boundaries

use std::time::Duration;

use blebridge::domain::{ManagerState, RESTORED_PERIPHERALS_KEY, RestorationPayload};
use blebridge::error::DriverError;
use blemock::{MockCentral, MockCharacteristic, MockPeripheral, MockService};

fn sensor() -> MockPeripheral {
    MockPeripheral::new("Sensor")
        .with_rssi(-58)
        .with_latency(Duration::from_millis(1))
        .with_service(
            MockService::primary().with_characteristic(
                MockCharacteristic::notifying()
                    .with_value(vec![0x3c])
                    .with_descriptor(),
            ),
        )
}

#[tokio::test]
async fn test_scan_connect_discover_flow() {
    let central = MockCentral::new(vec![sensor()]);
    let mut scans = central.bridge().events().subscribe_scan_results();
    let mut connections = central.bridge().events().subscribe_connections();

    central.power_on();
    assert_eq!(
        central.bridge().events().current_state(),
        ManagerState::PoweredOn
    );

    central.start_scan();
    let scan = scans.recv().await.unwrap();
    assert_eq!(scan.local_name(), Some("Sensor"));
    assert_eq!(scan.rssi, -58);

    central.connect(scan.peripheral.id);
    let attempt = connections.recv().await.unwrap();
    assert!(attempt.error.is_none());

    let link = central.link(attempt.peripheral.id).unwrap();
    let mut services = link.bridge().events().subscribe_services_discovered();
    let mut characteristics = link.bridge().events().subscribe_characteristics_discovered();
    let mut descriptors = link.bridge().events().subscribe_descriptors_discovered();

    let id = link.discover_services();
    let found = services.recv().await.unwrap();
    assert_eq!(found.id, id);
    let found = found.value.unwrap();
    assert_eq!(found.len(), 1);

    let id = link.discover_characteristics(&found[0]);
    let found = characteristics.recv().await.unwrap();
    assert_eq!(found.id, id);
    let chars = found.value.characteristics.unwrap();
    assert_eq!(chars.len(), 1);
    assert_eq!(chars[0].value, Some(vec![0x3c]));

    let id = link.discover_descriptors(&chars[0]);
    let found = descriptors.recv().await.unwrap();
    assert_eq!(found.id, id);
    assert_eq!(found.value.descriptors.unwrap().len(), 1);
}

#[tokio::test]
async fn test_queued_service_discoveries_complete_in_request_order() {
    let central = MockCentral::new(vec![sensor()]);
    let link = central.link(first_peripheral_id(&central)).unwrap();
    let mut results = link.bridge().events().subscribe_services_discovered();

    // Three overlapping requests; the serial queue admits one at a time and
    // pairs each callback with the request that triggered it
    let ids = [
        link.discover_services(),
        link.discover_services(),
        link.discover_services(),
    ];

    for expected in ids {
        assert_eq!(results.recv().await.unwrap().id, expected);
    }
}

#[tokio::test]
async fn test_service_discovery_error_releases_next_request() {
    let central = MockCentral::new(vec![sensor()]);
    let link = central.link(first_peripheral_id(&central)).unwrap();
    let mut results = link.bridge().events().subscribe_services_discovered();

    link.inject_service_error(DriverError::new(3, "discovery failed"));
    let failed = link.discover_services();
    let ok = link.discover_services();

    let first = results.recv().await.unwrap();
    assert_eq!(first.id, failed);
    assert!(first.is_err());
    assert!(first.value.is_none());

    let second = results.recv().await.unwrap();
    assert_eq!(second.id, ok);
    assert!(!second.is_err());
}

#[tokio::test]
async fn test_restoration_events_survive_late_subscription() {
    let central = MockCentral::new(Vec::new());

    // Driver init replays state before any subscriber exists
    let mut first = RestorationPayload::new();
    first.insert(RESTORED_PERIPHERALS_KEY.to_string(), serde_json::json!([]));
    central.restore(first);

    let mut second = RestorationPayload::new();
    second.insert("scan-state".to_string(), serde_json::json!("running"));
    central.restore(second);

    let mut restored = central.bridge().events().subscribe_restored();
    central.bridge().mark_restoration_ready();

    assert!(
        restored
            .recv()
            .await
            .unwrap()
            .contains_key(RESTORED_PERIPHERALS_KEY)
    );
    assert!(restored.recv().await.unwrap().contains_key("scan-state"));

    // After the flush, events pass straight through
    central.restore(RestorationPayload::new());
    assert!(restored.recv().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_write_confirmation_and_ready_to_send() {
    let central = MockCentral::new(vec![sensor()]);
    let link = central.link(first_peripheral_id(&central)).unwrap();
    let mut services = link.bridge().events().subscribe_services_discovered();
    let mut characteristics = link.bridge().events().subscribe_characteristics_discovered();
    let mut writes = link.bridge().events().subscribe_characteristic_writes();
    let mut ready = link.bridge().events().subscribe_ready_to_send();

    link.discover_services();
    let found = services.recv().await.unwrap().value.unwrap();
    link.discover_characteristics(&found[0]);
    let chars = characteristics.recv().await.unwrap().value.characteristics.unwrap();

    link.write_characteristic(&chars[0], vec![0x01]);

    let written = writes.recv().await.unwrap();
    assert_eq!(written.characteristic.value, Some(vec![0x01]));
    assert!(written.error.is_none());
    ready.recv().await.unwrap();
}

fn first_peripheral_id(central: &MockCentral) -> uuid::Uuid {
    central.peripherals()[0].peripheral.id
}
