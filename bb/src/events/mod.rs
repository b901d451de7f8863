//! Event sinks - per-category multicast channels
//!
//! Each event category gets its own channel with its own payload type.
//! Subscribers receive only events published after they subscribe, with one
//! exception: the manager-state channel has current-value semantics and
//! replays the latest state to every new subscriber.
//!
//! ```text
//!  driver callback thread(s)                      subscriber tasks
//!  ─────────────────────────                      ────────────────
//!   CentralBridge ──▶ CentralEvents    ──▶ state / scan / connections / ...
//!   PeripheralBridge ─▶ PeripheralEvents ─▶ discoveries / values / rssi / ...
//! ```
//!
//! Publishing with no subscribers is fine; the event is dropped. Slow
//! subscribers on broadcast channels lag per tokio semantics (oldest events
//! are overwritten once the channel is full).

mod central;
mod peripheral;
mod types;

pub use central::CentralEvents;
pub use peripheral::PeripheralEvents;
pub use types::{
    CharacteristicDiscovery, CharacteristicUpdate, ConnectionAttempt, DescriptorDiscovery,
    DescriptorUpdate, Disconnection, PeerEvent, RssiReading,
};

/// Default per-category channel capacity (events)
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;
