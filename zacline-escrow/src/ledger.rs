use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use tokio::sync::broadcast;
use uuid::Uuid;

use zacline_core::access::{AccessControl, AccessError};
use zacline_core::events::OrderCreatedEvent;
use zacline_core::tracking_id;
use zacline_shared::{Amount, Identity, Masked};
use zacline_tracking::{ShipmentDetails, ShipmentRegistry, TrackingError};

use crate::models::Order;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EscrowError {
    #[error("Payment required")]
    PaymentRequired,

    #[error("Order not found")]
    OrderNotFound,

    #[error("Shipment registry not bound")]
    RegistryUnbound,

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Tracking(#[from] TrackingError),
}

/// Fields a buyer supplies when requesting a delivery. The shipment's
/// sender is the buyer, so it is not part of the request.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DeliveryRequest {
    pub pickup_location: String,
    pub dropoff_location: String,
    pub sender_name: String,
    pub sender_phone: Masked<String>,
    pub receiver_name: String,
}

struct OrderBook {
    orders: HashMap<u64, Order>,
    count: u64,
}

/// Owns order records and fund custody. Creating an order locks the
/// payment and creates the linked shipment in the registry as one
/// atomic unit: the order-book write lock is held across the registry
/// call, and a failed shipment creation rolls the tentative order
/// back, so no reader ever observes an order without its shipment or
/// a bumped count from a failed creation.
pub struct OrderLedger {
    identity: Identity,
    access: Arc<AccessControl>,
    registry: RwLock<Option<Arc<ShipmentRegistry>>>,
    book: RwLock<OrderBook>,
    events: broadcast::Sender<OrderCreatedEvent>,
}

impl OrderLedger {
    pub fn new(access: Arc<AccessControl>, event_capacity: usize) -> Self {
        let (events, _) = broadcast::channel(event_capacity);
        Self {
            identity: Identity::new(format!("escrow:{}", Uuid::new_v4())),
            access,
            registry: RwLock::new(None),
            book: RwLock::new(OrderBook {
                orders: HashMap::new(),
                count: 0,
            }),
            events,
        }
    }

    /// The identity this ledger presents when creating shipments. The
    /// owner binds it into access control via
    /// [`bind_shipment_registry`](Self::bind_shipment_registry).
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Attach the shipment registry and register this ledger as the
    /// trusted shipment creator. Owner only; honors the configured
    /// bind policy.
    pub fn bind_shipment_registry(
        &self,
        caller: &Identity,
        registry: Arc<ShipmentRegistry>,
    ) -> Result<(), EscrowError> {
        self.access.bind_caller(caller, self.identity.clone())?;
        *self.registry.write().expect("registry handle lock poisoned") = Some(registry);
        tracing::info!(ledger = %self.identity, "shipment registry bound");
        Ok(())
    }

    /// Lock payment for a delivery and record the order together with
    /// its shipment. Returns the new order id; the id is also carried
    /// on the broadcast event, but the return value is authoritative.
    pub fn create_order(
        &self,
        buyer: Identity,
        amount: Amount,
        request: DeliveryRequest,
    ) -> Result<u64, EscrowError> {
        if amount <= 0 {
            return Err(EscrowError::PaymentRequired);
        }

        let registry = self
            .registry
            .read()
            .expect("registry handle lock poisoned")
            .clone()
            .ok_or(EscrowError::RegistryUnbound)?;

        let mut book = self.book.write().expect("order book lock poisoned");
        let order_id = book.count + 1;
        book.orders
            .insert(order_id, Order::new(order_id, buyer.clone(), amount));

        let details = ShipmentDetails {
            sender: buyer.clone(),
            pickup_location: request.pickup_location,
            dropoff_location: request.dropoff_location,
            sender_name: request.sender_name,
            sender_phone: request.sender_phone,
            receiver_name: request.receiver_name,
        };
        if let Err(err) = registry.create_shipment(&self.identity, order_id, details) {
            book.orders.remove(&order_id);
            return Err(err.into());
        }
        book.count = order_id;
        drop(book);

        tracing::info!(order_id, buyer = %buyer, amount, "order created, payment locked");
        let _ = self.events.send(OrderCreatedEvent {
            event_id: Uuid::new_v4(),
            order_id,
            tracking_id: tracking_id::encode(order_id),
            buyer,
            amount_locked: amount,
            created_at: Utc::now(),
        });
        Ok(order_id)
    }

    pub fn get_order(&self, order_id: u64) -> Result<Order, EscrowError> {
        self.book
            .read()
            .expect("order book lock poisoned")
            .orders
            .get(&order_id)
            .cloned()
            .ok_or(EscrowError::OrderNotFound)
    }

    /// All orders in id order.
    pub fn list_orders(&self) -> Vec<Order> {
        let book = self.book.read().expect("order book lock poisoned");
        let mut orders: Vec<Order> = book.orders.values().cloned().collect();
        orders.sort_by_key(|order| order.id);
        orders
    }

    /// Highest assigned order id. Failed creations leave it unchanged.
    pub fn order_count(&self) -> u64 {
        self.book.read().expect("order book lock poisoned").count
    }

    /// Observer channel for successfully created orders.
    pub fn subscribe(&self) -> broadcast::Receiver<OrderCreatedEvent> {
        self.events.subscribe()
    }
}
