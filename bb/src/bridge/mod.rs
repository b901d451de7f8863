//! Device event bridges - the callback-receiving surface
//!
//! A bridge is the sole registered recipient of driver callbacks for its
//! scope. Each callback is translated into: a queue dequeue/advance when it
//! answers a correlated discovery request, or a direct publication on the
//! matching event sink channel when no correlation concept exists. Driver
//! errors are packaged into the published payload and never propagated as
//! process failures.

mod central;
mod peripheral;

pub use central::CentralBridge;
pub use peripheral::PeripheralBridge;
