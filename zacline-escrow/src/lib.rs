pub mod ledger;
pub mod models;

pub use ledger::{DeliveryRequest, EscrowError, OrderLedger};
pub use models::Order;
