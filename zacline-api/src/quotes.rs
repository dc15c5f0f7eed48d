use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use zacline_shared::Amount;

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    pub pickup: String,
    pub dropoff: String,
}

/// `available: false` covers both a failed geocode and a request
/// superseded by a newer one for the same pair; either way the caller
/// supplies an amount by other means or retries.
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub available: bool,
    pub amount_cents: Option<Amount>,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/quotes", get(quote))
}

/// GET /v1/quotes?pickup=..&dropoff=..
///
/// Advisory pricing only; the ledger does not check the submitted
/// amount against it.
async fn quote(State(state): State<AppState>, Query(query): Query<QuoteQuery>) -> Json<QuoteResponse> {
    let receiver = state.quotes.request(&query.pickup, &query.dropoff);
    let amount_cents = receiver.await.ok().flatten();
    Json(QuoteResponse {
        available: amount_cents.is_some(),
        amount_cents,
    })
}
