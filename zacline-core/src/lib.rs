pub mod access;
pub mod events;
pub mod tracking_id;

pub use access::{AccessControl, AccessError, BindPolicy};
pub use events::OrderCreatedEvent;
