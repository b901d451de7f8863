//! blemock - a simulated BLE central driver for blebridge
//!
//! Exercises the bridge without hardware: callbacks are delivered from
//! spawned tokio tasks after a configurable latency, standing in for the real
//! driver's internal callback thread. Topology (peripherals, services,
//! characteristics, descriptors) is declared up front with small builders.
//!
//! ```rust,ignore
//! use blemock::{MockCentral, MockCharacteristic, MockPeripheral, MockService};
//!
//! let peripheral = MockPeripheral::new("HRM-42")
//!     .with_service(MockService::primary().with_characteristic(
//!         MockCharacteristic::readable().with_value(vec![0x3c]),
//!     ));
//! let central = MockCentral::new(vec![peripheral]);
//! central.power_on();
//! central.start_scan();
//! ```

mod central;
mod link;
mod topology;

pub use central::MockCentral;
pub use link::MockLink;
pub use topology::{MockCharacteristic, MockPeripheral, MockService};
