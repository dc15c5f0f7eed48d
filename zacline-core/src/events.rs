use chrono::{DateTime, Utc};
use uuid::Uuid;
use zacline_shared::{Amount, Identity};

/// Broadcast to observers after an order and its shipment have both
/// been committed. Informational only; the authoritative order id is
/// the synchronous return value of order creation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct OrderCreatedEvent {
    pub event_id: Uuid,
    pub order_id: u64,
    pub tracking_id: String,
    pub buyer: Identity,
    pub amount_locked: Amount,
    pub created_at: DateTime<Utc>,
}
