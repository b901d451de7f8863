//! Peripheral event bridge

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::BridgeConfig;
use crate::domain::{Characteristic, Descriptor, OperationResult, Service};
use crate::error::DriverError;
use crate::events::{
    CharacteristicDiscovery, CharacteristicUpdate, DescriptorDiscovery, DescriptorUpdate,
    PeripheralEvents, RssiReading,
};
use crate::queue::{CorrelationQueue, SerialTaskQueue};

/// Bridge for the driver callbacks of one device connection
///
/// Owns the connection's operation queues and event sink. Service discovery
/// goes through the serial queue (one in flight at a time); characteristic and
/// descriptor discovery only need correlation, since the driver serializes
/// those per sub-resource, so they use plain FIFO queues. The two disciplines
/// are deliberately different - see the queue module docs.
pub struct PeripheralBridge {
    events: PeripheralEvents,
    service_queue: SerialTaskQueue,
    characteristic_queue: CorrelationQueue,
    descriptor_queue: CorrelationQueue,
}

impl PeripheralBridge {
    pub fn new() -> Self {
        Self::with_config(BridgeConfig::default())
    }

    pub fn with_config(config: BridgeConfig) -> Self {
        Self {
            events: PeripheralEvents::new(config.channel_capacity),
            service_queue: SerialTaskQueue::new(),
            characteristic_queue: CorrelationQueue::new(),
            descriptor_queue: CorrelationQueue::new(),
        }
    }

    /// The event sink application code subscribes on
    pub fn events(&self) -> &PeripheralEvents {
        &self.events
    }

    // === Discovering services ===

    /// Queue a service-discovery operation
    ///
    /// `request` issues the actual driver call. It runs before this method
    /// returns iff no earlier discovery is in flight; otherwise it runs when
    /// the queue reaches it. Returns the operation id to filter results by.
    pub fn enqueue_service_discovery(&self, request: impl FnOnce() + Send + 'static) -> Uuid {
        let id = Uuid::new_v4();
        debug!(%id, "PeripheralBridge: queueing service discovery");
        self.service_queue.enqueue(id, request);
        id
    }

    /// Driver callback: service discovery finished (possibly with an error)
    ///
    /// Advances the serial queue either way, so a failed discovery never
    /// stalls the operations behind it.
    pub fn did_discover_services(
        &self,
        services: Option<Vec<Service>>,
        error: Option<DriverError>,
    ) {
        let Some(id) = self.service_queue.dequeue() else {
            warn!("PeripheralBridge::did_discover_services: no matching operation, dropping callback");
            return;
        };
        debug!(%id, error = ?error, "PeripheralBridge::did_discover_services");
        self.events
            .publish_services_discovered(OperationResult::new(services, error, id));
        self.service_queue.run_next();
    }

    // === Discovering characteristics and descriptors ===

    /// Register a characteristic-discovery request; the caller issues the
    /// driver call itself
    pub fn enqueue_characteristic_discovery(&self) -> Uuid {
        let id = Uuid::new_v4();
        debug!(%id, "PeripheralBridge: queueing characteristic discovery");
        self.characteristic_queue.enqueue(id);
        id
    }

    pub fn did_discover_characteristics(
        &self,
        service: Service,
        characteristics: Option<Vec<Characteristic>>,
        error: Option<DriverError>,
    ) {
        let Some(id) = self.characteristic_queue.dequeue() else {
            warn!("PeripheralBridge::did_discover_characteristics: no matching operation, dropping callback");
            return;
        };
        debug!(%id, service = %service.uuid, "PeripheralBridge::did_discover_characteristics");
        self.events.publish_characteristics_discovered(OperationResult::new(
            CharacteristicDiscovery {
                service,
                characteristics,
            },
            error,
            id,
        ));
    }

    /// Register a descriptor-discovery request; the caller issues the driver
    /// call itself
    pub fn enqueue_descriptor_discovery(&self) -> Uuid {
        let id = Uuid::new_v4();
        debug!(%id, "PeripheralBridge: queueing descriptor discovery");
        self.descriptor_queue.enqueue(id);
        id
    }

    pub fn did_discover_descriptors(
        &self,
        characteristic: Characteristic,
        descriptors: Option<Vec<Descriptor>>,
        error: Option<DriverError>,
    ) {
        let Some(id) = self.descriptor_queue.dequeue() else {
            warn!("PeripheralBridge::did_discover_descriptors: no matching operation, dropping callback");
            return;
        };
        debug!(%id, characteristic = %characteristic.uuid, "PeripheralBridge::did_discover_descriptors");
        self.events.publish_descriptors_discovered(OperationResult::new(
            DescriptorDiscovery {
                characteristic,
                descriptors,
            },
            error,
            id,
        ));
    }

    // === Retrieving and writing values (uncorrelated pass-through) ===

    pub fn did_update_characteristic_value(
        &self,
        characteristic: Characteristic,
        error: Option<DriverError>,
    ) {
        self.events.publish_characteristic_update(CharacteristicUpdate {
            characteristic,
            error,
        });
    }

    pub fn did_update_descriptor_value(
        &self,
        descriptor: Descriptor,
        error: Option<DriverError>,
    ) {
        self.events
            .publish_descriptor_update(DescriptorUpdate { descriptor, error });
    }

    pub fn did_write_characteristic_value(
        &self,
        characteristic: Characteristic,
        error: Option<DriverError>,
    ) {
        self.events.publish_characteristic_write(CharacteristicUpdate {
            characteristic,
            error,
        });
    }

    pub fn did_write_descriptor_value(
        &self,
        descriptor: Descriptor,
        error: Option<DriverError>,
    ) {
        self.events
            .publish_descriptor_write(DescriptorUpdate { descriptor, error });
    }

    pub fn is_ready_to_send_without_response(&self) {
        self.events.publish_ready_to_send();
    }

    pub fn did_update_notification_state(
        &self,
        characteristic: Characteristic,
        error: Option<DriverError>,
    ) {
        self.events.publish_notification_state(CharacteristicUpdate {
            characteristic,
            error,
        });
    }

    // === Name, topology, and signal strength ===

    pub fn did_update_name(&self, name: Option<String>) {
        debug!(?name, "PeripheralBridge::did_update_name");
        self.events.publish_name_update(name);
    }

    pub fn did_modify_services(&self, invalidated: Vec<Service>) {
        debug!(count = invalidated.len(), "PeripheralBridge::did_modify_services");
        self.events.publish_services_invalidated(invalidated);
    }

    pub fn did_read_rssi(&self, rssi: i16, error: Option<DriverError>) {
        self.events.publish_rssi_reading(RssiReading { rssi, error });
    }

    // === Error cleanup ===

    /// Drop the in-flight service discovery and release the next one
    ///
    /// For requests the driver rejected without ever producing a callback;
    /// without this the serial queue would stall permanently.
    pub fn cleanup_queue_on_error(&self) {
        info!("PeripheralBridge: dequeueing service discovery on error");
        self.service_queue.dequeue();
        self.service_queue.run_next();
    }
}

impl Default for PeripheralBridge {
    fn default() -> Self {
        Self::new()
    }
}
