//! Peripheral-level event sink

use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::{OperationResult, Service};

use super::types::{
    CharacteristicDiscovery, CharacteristicUpdate, DescriptorDiscovery, DescriptorUpdate,
    RssiReading,
};

/// Event channels for one device connection
///
/// Discovery channels carry [`OperationResult`]s whose `id` matches the value
/// returned at enqueue time; everything else is uncorrelated pass-through.
pub struct PeripheralEvents {
    services_tx: broadcast::Sender<OperationResult<Option<Vec<Service>>>>,
    characteristics_tx: broadcast::Sender<OperationResult<CharacteristicDiscovery>>,
    descriptors_tx: broadcast::Sender<OperationResult<DescriptorDiscovery>>,
    characteristic_update_tx: broadcast::Sender<CharacteristicUpdate>,
    characteristic_write_tx: broadcast::Sender<CharacteristicUpdate>,
    descriptor_update_tx: broadcast::Sender<DescriptorUpdate>,
    descriptor_write_tx: broadcast::Sender<DescriptorUpdate>,
    ready_to_send_tx: broadcast::Sender<()>,
    notification_state_tx: broadcast::Sender<CharacteristicUpdate>,
    name_update_tx: broadcast::Sender<Option<String>>,
    services_invalidated_tx: broadcast::Sender<Vec<Service>>,
    rssi_tx: broadcast::Sender<RssiReading>,
}

impl PeripheralEvents {
    pub fn new(capacity: usize) -> Self {
        debug!(capacity, "PeripheralEvents::new: creating channels");
        let (services_tx, _) = broadcast::channel(capacity);
        let (characteristics_tx, _) = broadcast::channel(capacity);
        let (descriptors_tx, _) = broadcast::channel(capacity);
        let (characteristic_update_tx, _) = broadcast::channel(capacity);
        let (characteristic_write_tx, _) = broadcast::channel(capacity);
        let (descriptor_update_tx, _) = broadcast::channel(capacity);
        let (descriptor_write_tx, _) = broadcast::channel(capacity);
        let (ready_to_send_tx, _) = broadcast::channel(capacity);
        let (notification_state_tx, _) = broadcast::channel(capacity);
        let (name_update_tx, _) = broadcast::channel(capacity);
        let (services_invalidated_tx, _) = broadcast::channel(capacity);
        let (rssi_tx, _) = broadcast::channel(capacity);
        Self {
            services_tx,
            characteristics_tx,
            descriptors_tx,
            characteristic_update_tx,
            characteristic_write_tx,
            descriptor_update_tx,
            descriptor_write_tx,
            ready_to_send_tx,
            notification_state_tx,
            name_update_tx,
            services_invalidated_tx,
            rssi_tx,
        }
    }

    // === Subscriptions ===

    pub fn subscribe_services_discovered(
        &self,
    ) -> broadcast::Receiver<OperationResult<Option<Vec<Service>>>> {
        self.services_tx.subscribe()
    }

    pub fn subscribe_characteristics_discovered(
        &self,
    ) -> broadcast::Receiver<OperationResult<CharacteristicDiscovery>> {
        self.characteristics_tx.subscribe()
    }

    pub fn subscribe_descriptors_discovered(
        &self,
    ) -> broadcast::Receiver<OperationResult<DescriptorDiscovery>> {
        self.descriptors_tx.subscribe()
    }

    pub fn subscribe_characteristic_updates(&self) -> broadcast::Receiver<CharacteristicUpdate> {
        self.characteristic_update_tx.subscribe()
    }

    pub fn subscribe_characteristic_writes(&self) -> broadcast::Receiver<CharacteristicUpdate> {
        self.characteristic_write_tx.subscribe()
    }

    pub fn subscribe_descriptor_updates(&self) -> broadcast::Receiver<DescriptorUpdate> {
        self.descriptor_update_tx.subscribe()
    }

    pub fn subscribe_descriptor_writes(&self) -> broadcast::Receiver<DescriptorUpdate> {
        self.descriptor_write_tx.subscribe()
    }

    /// Fires when the driver can accept another write-without-response
    pub fn subscribe_ready_to_send(&self) -> broadcast::Receiver<()> {
        self.ready_to_send_tx.subscribe()
    }

    pub fn subscribe_notification_states(&self) -> broadcast::Receiver<CharacteristicUpdate> {
        self.notification_state_tx.subscribe()
    }

    pub fn subscribe_name_updates(&self) -> broadcast::Receiver<Option<String>> {
        self.name_update_tx.subscribe()
    }

    pub fn subscribe_services_invalidated(&self) -> broadcast::Receiver<Vec<Service>> {
        self.services_invalidated_tx.subscribe()
    }

    pub fn subscribe_rssi_readings(&self) -> broadcast::Receiver<RssiReading> {
        self.rssi_tx.subscribe()
    }

    // === Publication (bridge-internal) ===

    pub(crate) fn publish_services_discovered(
        &self,
        result: OperationResult<Option<Vec<Service>>>,
    ) {
        let _ = self.services_tx.send(result);
    }

    pub(crate) fn publish_characteristics_discovered(
        &self,
        result: OperationResult<CharacteristicDiscovery>,
    ) {
        let _ = self.characteristics_tx.send(result);
    }

    pub(crate) fn publish_descriptors_discovered(
        &self,
        result: OperationResult<DescriptorDiscovery>,
    ) {
        let _ = self.descriptors_tx.send(result);
    }

    pub(crate) fn publish_characteristic_update(&self, update: CharacteristicUpdate) {
        let _ = self.characteristic_update_tx.send(update);
    }

    pub(crate) fn publish_characteristic_write(&self, update: CharacteristicUpdate) {
        let _ = self.characteristic_write_tx.send(update);
    }

    pub(crate) fn publish_descriptor_update(&self, update: DescriptorUpdate) {
        let _ = self.descriptor_update_tx.send(update);
    }

    pub(crate) fn publish_descriptor_write(&self, update: DescriptorUpdate) {
        let _ = self.descriptor_write_tx.send(update);
    }

    pub(crate) fn publish_ready_to_send(&self) {
        let _ = self.ready_to_send_tx.send(());
    }

    pub(crate) fn publish_notification_state(&self, update: CharacteristicUpdate) {
        let _ = self.notification_state_tx.send(update);
    }

    pub(crate) fn publish_name_update(&self, name: Option<String>) {
        let _ = self.name_update_tx.send(name);
    }

    pub(crate) fn publish_services_invalidated(&self, services: Vec<Service>) {
        let _ = self.services_invalidated_tx.send(services);
    }

    pub(crate) fn publish_rssi_reading(&self, reading: RssiReading) {
        let _ = self.rssi_tx.send(reading);
    }
}
