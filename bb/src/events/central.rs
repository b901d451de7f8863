//! Central-level event sink

use tokio::sync::{broadcast, watch};
use tracing::debug;

use crate::domain::{ManagerState, RestorationPayload, ScanResult};

use super::types::{ConnectionAttempt, Disconnection, PeerEvent};

/// Event channels for manager-level driver activity
///
/// One channel per category. All channels are fire-and-forget broadcasts
/// except `state`, which is a watch channel: new subscribers immediately see
/// the most recent [`ManagerState`].
pub struct CentralEvents {
    state_tx: watch::Sender<ManagerState>,
    scan_tx: broadcast::Sender<ScanResult>,
    connection_tx: broadcast::Sender<ConnectionAttempt>,
    disconnection_tx: broadcast::Sender<Disconnection>,
    peer_event_tx: broadcast::Sender<PeerEvent>,
    restored_tx: broadcast::Sender<RestorationPayload>,
}

impl CentralEvents {
    /// Create the sink with the given per-channel capacity
    pub fn new(capacity: usize) -> Self {
        debug!(capacity, "CentralEvents::new: creating channels");
        let (state_tx, _) = watch::channel(ManagerState::default());
        let (scan_tx, _) = broadcast::channel(capacity);
        let (connection_tx, _) = broadcast::channel(capacity);
        let (disconnection_tx, _) = broadcast::channel(capacity);
        let (peer_event_tx, _) = broadcast::channel(capacity);
        let (restored_tx, _) = broadcast::channel(capacity);
        Self {
            state_tx,
            scan_tx,
            connection_tx,
            disconnection_tx,
            peer_event_tx,
            restored_tx,
        }
    }

    // === Subscriptions ===

    /// Manager state; the receiver starts out holding the latest value
    pub fn subscribe_state(&self) -> watch::Receiver<ManagerState> {
        self.state_tx.subscribe()
    }

    /// Latest manager state without subscribing
    pub fn current_state(&self) -> ManagerState {
        *self.state_tx.borrow()
    }

    pub fn subscribe_scan_results(&self) -> broadcast::Receiver<ScanResult> {
        self.scan_tx.subscribe()
    }

    /// Connection attempts, successful and failed
    pub fn subscribe_connections(&self) -> broadcast::Receiver<ConnectionAttempt> {
        self.connection_tx.subscribe()
    }

    pub fn subscribe_disconnections(&self) -> broadcast::Receiver<Disconnection> {
        self.disconnection_tx.subscribe()
    }

    pub fn subscribe_peer_events(&self) -> broadcast::Receiver<PeerEvent> {
        self.peer_event_tx.subscribe()
    }

    /// Restoration payloads, flushed through the restoration latch
    pub fn subscribe_restored(&self) -> broadcast::Receiver<RestorationPayload> {
        self.restored_tx.subscribe()
    }

    // === Publication (bridge-internal) ===

    pub(crate) fn publish_state(&self, state: ManagerState) {
        // send_replace keeps current-value semantics even with no subscribers
        self.state_tx.send_replace(state);
    }

    pub(crate) fn publish_scan_result(&self, result: ScanResult) {
        let _ = self.scan_tx.send(result);
    }

    pub(crate) fn publish_connection(&self, attempt: ConnectionAttempt) {
        let _ = self.connection_tx.send(attempt);
    }

    pub(crate) fn publish_disconnection(&self, disconnection: Disconnection) {
        let _ = self.disconnection_tx.send(disconnection);
    }

    pub(crate) fn publish_peer_event(&self, event: PeerEvent) {
        let _ = self.peer_event_tx.send(event);
    }

    /// Sender handle for the restoration latch to publish through
    pub(crate) fn restored_sender(&self) -> broadcast::Sender<RestorationPayload> {
        self.restored_tx.clone()
    }
}
