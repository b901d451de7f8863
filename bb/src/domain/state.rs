//! Manager and connection state enums

use serde::{Deserialize, Serialize};

/// Power/authorization state of the device manager
///
/// Mutated only by driver callbacks. The state channel has current-value
/// semantics: a new subscriber immediately observes the latest value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManagerState {
    /// State not yet reported by the driver
    #[default]
    Unknown,
    /// The connection with the driver was momentarily lost
    Resetting,
    /// The platform does not support the wireless stack
    Unsupported,
    /// The application is not authorized to use the wireless stack
    Unauthorized,
    /// The radio is powered off
    PoweredOff,
    /// The radio is powered on and usable
    PoweredOn,
}

impl ManagerState {
    /// Whether requests can be issued in this state
    pub fn is_powered_on(self) -> bool {
        self == ManagerState::PoweredOn
    }
}

/// Peer-level connection event reported by the driver
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionEvent {
    PeerConnected,
    PeerDisconnected,
}
