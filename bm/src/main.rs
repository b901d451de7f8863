//! bm - demo run of blebridge against the mock driver
//!
//! Walks the full startup sequence an application would: wire subscribers,
//! flush restored state, power on, scan, connect, and discover the
//! peripheral's topology.

use eyre::Result;
use tracing_subscriber::EnvFilter;

use blebridge::domain::{RESTORED_PERIPHERALS_KEY, RestorationPayload};
use blemock::{MockCentral, MockCharacteristic, MockPeripheral, MockService};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let heart_rate = MockService::primary()
        .with_characteristic(
            MockCharacteristic::notifying()
                .with_value(vec![0x3c])
                .with_descriptor(),
        )
        .with_characteristic(MockCharacteristic::writable());
    let battery = MockService::secondary()
        .with_characteristic(MockCharacteristic::readable().with_value(vec![98]));
    let sensor = MockPeripheral::new("HRM-42")
        .with_rssi(-58)
        .with_service(heart_rate)
        .with_service(battery);

    let central = MockCentral::new(vec![sensor]);

    let mut states = central.bridge().events().subscribe_state();
    let mut scans = central.bridge().events().subscribe_scan_results();
    let mut connections = central.bridge().events().subscribe_connections();
    let mut restored = central.bridge().events().subscribe_restored();

    // The driver replays restored session state during its own init, before
    // readiness is signaled; the latch holds it for us
    let mut payload = RestorationPayload::new();
    payload.insert(RESTORED_PERIPHERALS_KEY.to_string(), serde_json::json!([]));
    central.restore(payload);

    central.bridge().mark_restoration_ready();
    let flushed = restored.recv().await?;
    println!("restored session state ({} keys)", flushed.len());

    central.power_on();
    states.changed().await?;
    println!("manager state: {:?}", *states.borrow_and_update());

    central.start_scan();
    let scan = scans.recv().await?;
    println!(
        "discovered {} (rssi {} dBm)",
        scan.local_name().unwrap_or("<unnamed>"),
        scan.rssi
    );

    central.connect(scan.peripheral.id);
    let attempt = connections.recv().await?;
    match &attempt.error {
        Some(e) => println!("connection failed: {e}"),
        None => println!("connected to {}", attempt.peripheral.id),
    }

    let link = central
        .link(attempt.peripheral.id)
        .ok_or_else(|| eyre::eyre!("no such peripheral"))?;
    let mut discoveries = link.bridge().events().subscribe_services_discovered();
    let mut characteristics = link.bridge().events().subscribe_characteristics_discovered();
    let mut rssi_readings = link.bridge().events().subscribe_rssi_readings();

    link.discover_services();
    let result = discoveries.recv().await?;
    let services = result.value.unwrap_or_default();
    println!("{} services", services.len());

    for service in &services {
        link.discover_characteristics(service);
    }
    for _ in &services {
        let found = characteristics.recv().await?;
        println!(
            "  service {}: {} characteristics",
            found.value.service.uuid,
            found.value.characteristics.map_or(0, |c| c.len())
        );
    }

    link.read_rssi();
    println!("rssi: {} dBm", rssi_readings.recv().await?.rssi);

    Ok(())
}
