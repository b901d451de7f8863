//! blebridge - ordered event streams over a callback-driven BLE driver
//!
//! The wireless driver delivers results through registered callbacks on an
//! arbitrary internal thread, one callback per logical operation, with no way
//! to tell which in-flight request a callback answers. This crate rebuilds
//! that correlation purely from queuing discipline and exposes the result as
//! per-category subscribable event channels.
//!
//! # Core Concepts
//!
//! - **Serial admission**: overlapping service-discovery requests go through a
//!   single-task queue, so the next callback always belongs to the head.
//! - **Order is correlation**: characteristic/descriptor callbacks pair with
//!   requests by strict arrival order - no IDs cross the driver boundary.
//! - **No startup drops**: restoration events buffer in a latch until the
//!   application signals that its subscribers are wired up.
//! - **Errors are data**: a driver failure is published next to its partial
//!   result; nothing here aborts, retries, or times out.
//!
//! # Modules
//!
//! - [`bridge`] - callback-receiving surface registered with the driver
//! - [`events`] - per-category broadcast/watch channels for subscribers
//! - [`queue`] - serial-admission and plain-FIFO correlation queues
//! - [`latch`] - restoration event buffering
//! - [`domain`] - peripheral topology and payload records

pub mod bridge;
pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod latch;
pub mod queue;

// Re-export commonly used types
pub use bridge::{CentralBridge, PeripheralBridge};
pub use config::BridgeConfig;
pub use domain::{
    AdvertisementData, Characteristic, CharacteristicProperties, ConnectionEvent, Descriptor,
    ManagerState, OperationResult, Peripheral, RestorationPayload, ScanResult, Service,
};
pub use error::DriverError;
pub use events::{
    CentralEvents, CharacteristicDiscovery, CharacteristicUpdate, ConnectionAttempt,
    DEFAULT_CHANNEL_CAPACITY, DescriptorDiscovery, DescriptorUpdate, Disconnection, PeerEvent,
    PeripheralEvents, RssiReading,
};
pub use latch::RestorationLatch;
pub use queue::{CorrelationQueue, SerialTaskQueue};
