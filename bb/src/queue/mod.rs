//! Operation queues for correlating driver callbacks with requests
//!
//! The driver offers no operation IDs: a callback cannot say which in-flight
//! request it answers. Correctness is reconstructed from queuing discipline:
//!
//! - [`SerialTaskQueue`] admits one operation at a time. While the head is in
//!   flight every later request waits, so the next callback of that category
//!   always belongs to the head. Used for service discovery.
//! - [`CorrelationQueue`] is a bare FIFO of identifiers with no admission
//!   control. Used where the driver already serializes calls per sub-resource
//!   (characteristic and descriptor discovery) and only the Nth-callback ↔
//!   Nth-request pairing is needed.
//!
//! The two are intentionally not unified: the bare FIFO allows concurrent
//! requests across different services to race, and callers rely on that.

mod correlation;
mod serial;

pub use correlation::CorrelationQueue;
pub use serial::SerialTaskQueue;
