use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use chrono::Utc;
use zacline_core::access::AccessControl;
use zacline_shared::Identity;

use crate::models::{Shipment, ShipmentDetails, ShipmentStatus};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TrackingError {
    #[error("Only escrow contract")]
    OnlyEscrow,

    #[error("Only admin")]
    OnlyAdmin,

    #[error("Shipment not found")]
    ShipmentNotFound,

    #[error("Invalid status")]
    InvalidStatus,

    #[error("Shipment already exists")]
    ShipmentExists,
}

/// Owns all shipment records and their status state machine.
///
/// Creation is reserved for the bound escrow caller; transitions are
/// reserved for admins. Each record sits behind its own mutex, so the
/// precondition check and the status write of a transition are one
/// atomic step, and transitions on different orders never contend.
pub struct ShipmentRegistry {
    access: Arc<AccessControl>,
    shipments: RwLock<HashMap<u64, Arc<Mutex<Shipment>>>>,
}

impl ShipmentRegistry {
    pub fn new(access: Arc<AccessControl>) -> Self {
        Self {
            access,
            shipments: RwLock::new(HashMap::new()),
        }
    }

    /// Record a new shipment for `order_id` with status NotCollected.
    /// Only the caller bound through the ledger may invoke this; a
    /// duplicate order id is refused even though the ledger's
    /// atomicity should make that impossible.
    pub fn create_shipment(
        &self,
        caller: &Identity,
        order_id: u64,
        details: ShipmentDetails,
    ) -> Result<(), TrackingError> {
        if !self.access.is_bound_caller(caller) {
            return Err(TrackingError::OnlyEscrow);
        }

        let mut shipments = self.shipments.write().expect("shipment table lock poisoned");
        if shipments.contains_key(&order_id) {
            return Err(TrackingError::ShipmentExists);
        }

        shipments.insert(order_id, Arc::new(Mutex::new(Shipment::new(order_id, details))));
        tracing::info!(order_id, "shipment created");
        Ok(())
    }

    /// Snapshot of a shipment record.
    pub fn get_shipment(&self, order_id: u64) -> Result<Shipment, TrackingError> {
        let record = self.record(order_id)?;
        let shipment = record.lock().expect("shipment record lock poisoned");
        Ok(shipment.clone())
    }

    /// NotCollected -> InTransit. Admin only.
    pub fn mark_collected(&self, caller: &Identity, order_id: u64) -> Result<(), TrackingError> {
        self.transition(
            caller,
            order_id,
            ShipmentStatus::NotCollected,
            ShipmentStatus::InTransit,
        )
    }

    /// InTransit -> Delivered. Admin only. Delivered is terminal.
    pub fn mark_delivered(&self, caller: &Identity, order_id: u64) -> Result<(), TrackingError> {
        self.transition(
            caller,
            order_id,
            ShipmentStatus::InTransit,
            ShipmentStatus::Delivered,
        )
    }

    fn transition(
        &self,
        caller: &Identity,
        order_id: u64,
        from: ShipmentStatus,
        to: ShipmentStatus,
    ) -> Result<(), TrackingError> {
        if !self.access.is_admin(caller) {
            return Err(TrackingError::OnlyAdmin);
        }

        let record = self.record(order_id)?;
        let mut shipment = record.lock().expect("shipment record lock poisoned");
        if shipment.status != from {
            return Err(TrackingError::InvalidStatus);
        }

        shipment.status = to;
        shipment.updated_at = Utc::now();
        tracing::info!(order_id, status = to.label(), admin = %caller, "shipment status advanced");
        Ok(())
    }

    fn record(&self, order_id: u64) -> Result<Arc<Mutex<Shipment>>, TrackingError> {
        self.shipments
            .read()
            .expect("shipment table lock poisoned")
            .get(&order_id)
            .cloned()
            .ok_or(TrackingError::ShipmentNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zacline_core::access::BindPolicy;
    use zacline_shared::Masked;

    fn setup() -> (Arc<AccessControl>, ShipmentRegistry) {
        let access = Arc::new(AccessControl::new(
            Identity::from("owner"),
            [Identity::from("admin")],
            BindPolicy::BindOnce,
        ));
        access
            .bind_caller(&Identity::from("owner"), Identity::from("escrow"))
            .unwrap();
        let registry = ShipmentRegistry::new(access.clone());
        (access, registry)
    }

    fn details() -> ShipmentDetails {
        ShipmentDetails {
            sender: Identity::from("buyer"),
            pickup_location: "Sydney".into(),
            dropoff_location: "Melbourne".into(),
            sender_name: "Alice".into(),
            sender_phone: Masked("0400000000".into()),
            receiver_name: "Bob".into(),
        }
    }

    #[test]
    fn creation_requires_bound_caller() {
        let (_, registry) = setup();
        let err = registry
            .create_shipment(&Identity::from("mallory"), 1, details())
            .unwrap_err();
        assert_eq!(err, TrackingError::OnlyEscrow);
        assert_eq!(err.to_string(), "Only escrow contract");
    }

    #[test]
    fn creation_rejects_duplicate_order_id() {
        let (_, registry) = setup();
        let escrow = Identity::from("escrow");
        registry.create_shipment(&escrow, 1, details()).unwrap();
        assert_eq!(
            registry.create_shipment(&escrow, 1, details()),
            Err(TrackingError::ShipmentExists)
        );
    }

    #[test]
    fn new_shipment_starts_not_collected() {
        let (_, registry) = setup();
        registry
            .create_shipment(&Identity::from("escrow"), 1, details())
            .unwrap();
        let shipment = registry.get_shipment(1).unwrap();
        assert_eq!(shipment.status, ShipmentStatus::NotCollected);
        assert_eq!(shipment.pickup_location, "Sydney");
        assert_eq!(shipment.receiver_name, "Bob");
    }

    #[test]
    fn missing_shipment_lookup_fails() {
        let (_, registry) = setup();
        let err = registry.get_shipment(999_999).unwrap_err();
        assert_eq!(err, TrackingError::ShipmentNotFound);
        assert_eq!(err.to_string(), "Shipment not found");
    }

    #[test]
    fn lifecycle_advances_in_order() {
        let (_, registry) = setup();
        let admin = Identity::from("admin");
        registry
            .create_shipment(&Identity::from("escrow"), 1, details())
            .unwrap();

        registry.mark_collected(&admin, 1).unwrap();
        assert_eq!(registry.get_shipment(1).unwrap().status, ShipmentStatus::InTransit);

        registry.mark_delivered(&admin, 1).unwrap();
        assert_eq!(registry.get_shipment(1).unwrap().status, ShipmentStatus::Delivered);
    }

    #[test]
    fn transitions_cannot_skip_or_repeat() {
        let (_, registry) = setup();
        let admin = Identity::from("admin");
        registry
            .create_shipment(&Identity::from("escrow"), 1, details())
            .unwrap();

        // deliver before collect
        assert_eq!(
            registry.mark_delivered(&admin, 1),
            Err(TrackingError::InvalidStatus)
        );

        registry.mark_collected(&admin, 1).unwrap();
        assert_eq!(
            registry.mark_collected(&admin, 1),
            Err(TrackingError::InvalidStatus)
        );

        registry.mark_delivered(&admin, 1).unwrap();
        assert_eq!(
            registry.mark_collected(&admin, 1),
            Err(TrackingError::InvalidStatus)
        );
        assert_eq!(
            registry.mark_delivered(&admin, 1),
            Err(TrackingError::InvalidStatus)
        );
    }

    #[test]
    fn transitions_require_admin() {
        let (_, registry) = setup();
        registry
            .create_shipment(&Identity::from("escrow"), 1, details())
            .unwrap();
        let err = registry
            .mark_collected(&Identity::from("mallory"), 1)
            .unwrap_err();
        assert_eq!(err, TrackingError::OnlyAdmin);
        assert_eq!(err.to_string(), "Only admin");
    }

    #[test]
    fn concurrent_collects_on_same_order_serialize() {
        let (_, registry) = setup();
        let registry = Arc::new(registry);
        registry
            .create_shipment(&Identity::from("escrow"), 1, details())
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..4 {
            let registry = registry.clone();
            handles.push(std::thread::spawn(move || {
                registry.mark_collected(&Identity::from("admin"), 1)
            }));
        }

        let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let wins = outcomes.iter().filter(|r| r.is_ok()).count();
        assert_eq!(wins, 1, "exactly one collector may observe NotCollected");
        assert_eq!(
            registry.get_shipment(1).unwrap().status,
            ShipmentStatus::InTransit
        );
    }
}
