//! Domain types shared across the bridge
//!
//! These are plain data records. The driver hands the bridge snapshots of its
//! internal objects; everything here is immutable once published and cheap to
//! clone into subscriber channels.

mod operation;
mod peripheral;
mod restoration;
mod scan;
mod state;

pub use operation::OperationResult;
pub use peripheral::{Characteristic, CharacteristicProperties, Descriptor, Peripheral, Service};
pub use restoration::{
    RESTORED_PERIPHERALS_KEY, RESTORED_SCAN_OPTIONS_KEY, RESTORED_SCAN_SERVICES_KEY,
    RestorationPayload,
};
pub use scan::{
    ADV_IS_CONNECTABLE_KEY, ADV_LOCAL_NAME_KEY, ADV_MANUFACTURER_DATA_KEY, ADV_SERVICE_DATA_KEY,
    ADV_SERVICE_UUIDS_KEY, ADV_TX_POWER_KEY, AdvertisementData, ScanResult,
};
pub use state::{ConnectionEvent, ManagerState};
