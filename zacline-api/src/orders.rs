use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use zacline_core::tracking_id;
use zacline_escrow::{DeliveryRequest, Order};
use zacline_shared::{Amount, Identity, Masked};

use crate::auth::Caller;
use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub amount_cents: Amount,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub sender_name: String,
    pub sender_phone: String,
    pub receiver_name: String,
}

#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub order_id: u64,
    pub tracking_id: String,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: u64,
    pub tracking_id: String,
    pub buyer: Identity,
    pub amount_locked_cents: Amount,
    pub paid: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            tracking_id: tracking_id::encode(order.id),
            id: order.id,
            buyer: order.buyer,
            amount_locked_cents: order.amount_locked,
            paid: order.paid,
            created_at: order.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderCountResponse {
    pub count: u64,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/orders", post(create_order).get(list_orders))
        .route("/v1/orders/count", get(order_count))
        .route("/v1/orders/{id}", get(get_order))
}

/// POST /v1/orders
async fn create_order(
    State(state): State<AppState>,
    Caller(buyer): Caller,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<CreateOrderResponse>), AppError> {
    let request = DeliveryRequest {
        pickup_location: req.pickup_location,
        dropoff_location: req.dropoff_location,
        sender_name: req.sender_name,
        sender_phone: Masked(req.sender_phone),
        receiver_name: req.receiver_name,
    };

    let order_id = state.ledger.create_order(buyer, req.amount_cents, request)?;
    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse {
            order_id,
            tracking_id: tracking_id::encode(order_id),
        }),
    ))
}

/// GET /v1/orders
async fn list_orders(State(state): State<AppState>) -> Json<Vec<OrderResponse>> {
    Json(
        state
            .ledger
            .list_orders()
            .into_iter()
            .map(OrderResponse::from)
            .collect(),
    )
}

/// GET /v1/orders/{id}
async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<OrderResponse>, AppError> {
    let order = state.ledger.get_order(id)?;
    Ok(Json(order.into()))
}

/// GET /v1/orders/count
async fn order_count(State(state): State<AppState>) -> Json<OrderCountResponse> {
    Json(OrderCountResponse {
        count: state.ledger.order_count(),
    })
}
