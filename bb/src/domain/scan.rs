//! Scan results and advertisement payloads

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Peripheral;

/// Well-known advertisement payload keys
pub const ADV_LOCAL_NAME_KEY: &str = "local-name";
pub const ADV_MANUFACTURER_DATA_KEY: &str = "manufacturer-data";
pub const ADV_SERVICE_UUIDS_KEY: &str = "service-uuids";
pub const ADV_SERVICE_DATA_KEY: &str = "service-data";
pub const ADV_TX_POWER_KEY: &str = "tx-power-level";
pub const ADV_IS_CONNECTABLE_KEY: &str = "is-connectable";

/// Advertisement payload as delivered by the driver
///
/// Kept as an open key-value map: drivers are free to attach vendor keys
/// beyond the well-known ones above.
pub type AdvertisementData = HashMap<String, serde_json::Value>;

/// One discovery callback's worth of scan data
///
/// Created once per callback and never mutated; subscribers own their copy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub peripheral: Peripheral,
    /// Signal strength in dBm
    pub rssi: i16,
    pub advertisement_data: AdvertisementData,
}

impl ScanResult {
    pub fn new(peripheral: Peripheral, rssi: i16, advertisement_data: AdvertisementData) -> Self {
        Self {
            peripheral,
            rssi,
            advertisement_data,
        }
    }

    /// Advertised local name, if present
    pub fn local_name(&self) -> Option<&str> {
        self.advertisement_data
            .get(ADV_LOCAL_NAME_KEY)
            .and_then(|v| v.as_str())
    }
}
