use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zacline_shared::{Amount, Identity};

/// A buyer's locked-payment record. Created exactly once per
/// successful order creation and immutable thereafter; releasing or
/// refunding custody is a separate settlement concern outside this
/// ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub buyer: Identity,
    pub amount_locked: Amount,
    pub paid: bool,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(id: u64, buyer: Identity, amount_locked: Amount) -> Self {
        Self {
            id,
            buyer,
            amount_locked,
            paid: true,
            created_at: Utc::now(),
        }
    }
}
