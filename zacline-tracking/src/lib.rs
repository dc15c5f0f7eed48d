pub mod models;
pub mod registry;

pub use models::{Shipment, ShipmentDetails, ShipmentStatus};
pub use registry::{ShipmentRegistry, TrackingError};
