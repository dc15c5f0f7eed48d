use std::sync::Arc;

use zacline_core::access::AccessControl;
use zacline_escrow::OrderLedger;
use zacline_pricing::QuoteDebouncer;
use zacline_tracking::ShipmentRegistry;

#[derive(Clone)]
pub struct AppState {
    pub access: Arc<AccessControl>,
    pub ledger: Arc<OrderLedger>,
    pub registry: Arc<ShipmentRegistry>,
    pub quotes: Arc<QuoteDebouncer>,
}
