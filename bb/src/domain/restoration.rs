//! State-restoration payloads
//!
//! After a process relaunch the driver can replay the session state it kept
//! alive on the application's behalf. The payload stays an open key-value map;
//! the bridge forwards it untouched and only inspects the well-known keys for
//! logging.

use std::collections::HashMap;

/// Peripherals the driver kept connected across the relaunch
pub const RESTORED_PERIPHERALS_KEY: &str = "restored-peripherals";
/// Service UUIDs of a scan the driver kept running
pub const RESTORED_SCAN_SERVICES_KEY: &str = "restored-scan-services";
/// Options of a scan the driver kept running
pub const RESTORED_SCAN_OPTIONS_KEY: &str = "restored-scan-options";

/// Raw restoration event payload
pub type RestorationPayload = HashMap<String, serde_json::Value>;
