use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use zacline_core::tracking_id;
use zacline_shared::Masked;
use zacline_tracking::Shipment;

use crate::auth::Caller;
use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct TrackingResponse {
    pub order_id: u64,
    pub tracking_id: String,
    pub sender_name: String,
    pub sender_phone: Masked<String>,
    pub receiver_name: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub status: u8,
    pub status_label: &'static str,
}

impl From<Shipment> for TrackingResponse {
    fn from(shipment: Shipment) -> Self {
        Self {
            tracking_id: tracking_id::encode(shipment.order_id),
            order_id: shipment.order_id,
            sender_name: shipment.sender_name,
            sender_phone: shipment.sender_phone,
            receiver_name: shipment.receiver_name,
            pickup_location: shipment.pickup_location,
            dropoff_location: shipment.dropoff_location,
            status: shipment.status.wire(),
            status_label: shipment.status.label(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ShipmentStatusResponse {
    pub order_id: u64,
    pub status: u8,
    pub status_label: &'static str,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/track/{tracking_id}", get(track))
        .route("/v1/shipments/{order_id}/collect", post(mark_collected))
        .route("/v1/shipments/{order_id}/deliver", post(mark_delivered))
}

/// GET /v1/track/{tracking_id}
///
/// Public lookup by the human-facing token printed on the parcel.
async fn track(
    State(state): State<AppState>,
    Path(tracking): Path<String>,
) -> Result<Json<TrackingResponse>, AppError> {
    let order_id = tracking_id::decode(&tracking)
        .ok_or_else(|| AppError::ValidationError("Invalid tracking id".to_string()))?;

    let shipment = state.registry.get_shipment(order_id)?;
    Ok(Json(shipment.into()))
}

/// POST /v1/shipments/{order_id}/collect
async fn mark_collected(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(order_id): Path<u64>,
) -> Result<Json<ShipmentStatusResponse>, AppError> {
    state.registry.mark_collected(&caller, order_id)?;
    status_response(&state, order_id)
}

/// POST /v1/shipments/{order_id}/deliver
async fn mark_delivered(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(order_id): Path<u64>,
) -> Result<Json<ShipmentStatusResponse>, AppError> {
    state.registry.mark_delivered(&caller, order_id)?;
    status_response(&state, order_id)
}

fn status_response(
    state: &AppState,
    order_id: u64,
) -> Result<Json<ShipmentStatusResponse>, AppError> {
    let shipment = state.registry.get_shipment(order_id)?;
    Ok(Json(ShipmentStatusResponse {
        order_id,
        status: shipment.status.wire(),
        status_label: shipment.status.label(),
    }))
}
