use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zacline_shared::{Identity, Masked};

/// Shipment status lifecycle. Moves strictly forward:
/// NotCollected -> InTransit -> Delivered, Delivered terminal.
///
/// Wire values are fixed at 0/1/2 for compatibility with existing
/// callers; anything else is a data-integrity fault and labels as
/// "Unknown".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipmentStatus {
    NotCollected,
    InTransit,
    Delivered,
}

impl ShipmentStatus {
    pub fn wire(self) -> u8 {
        match self {
            Self::NotCollected => 0,
            Self::InTransit => 1,
            Self::Delivered => 2,
        }
    }

    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::NotCollected),
            1 => Some(Self::InTransit),
            2 => Some(Self::Delivered),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        Self::label_for_wire(self.wire())
    }

    pub fn label_for_wire(value: u8) -> &'static str {
        match value {
            0 => "Not collected",
            1 => "Collected / On delivery",
            2 => "Delivered / Collected",
            _ => "Unknown",
        }
    }
}

impl Serialize for ShipmentStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.wire())
    }
}

impl<'de> Deserialize<'de> for ShipmentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        Self::from_wire(value)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown shipment status {value}")))
    }
}

/// Caller-supplied shipment fields, forwarded by the ledger when it
/// creates the linked shipment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentDetails {
    pub sender: Identity,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub sender_name: String,
    pub sender_phone: Masked<String>,
    pub receiver_name: String,
}

/// The physical-delivery record, linked 1:1 to an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shipment {
    pub order_id: u64,
    pub sender: Identity,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub sender_name: String,
    pub sender_phone: Masked<String>,
    pub receiver_name: String,
    pub status: ShipmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Shipment {
    pub fn new(order_id: u64, details: ShipmentDetails) -> Self {
        let now = Utc::now();
        Self {
            order_id,
            sender: details.sender,
            pickup_location: details.pickup_location,
            dropoff_location: details.dropoff_location,
            sender_name: details.sender_name,
            sender_phone: details.sender_phone,
            receiver_name: details.receiver_name,
            status: ShipmentStatus::NotCollected,
            created_at: now,
            updated_at: now,
        }
    }
}
