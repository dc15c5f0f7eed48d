use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use zacline_api::{app, AppState};
use zacline_core::access::{AccessControl, BindPolicy};
use zacline_escrow::OrderLedger;
use zacline_pricing::{
    Coordinates, GeocodeError, Geocoder, PricingConfig, PricingEngine, QuoteDebouncer,
};
use zacline_shared::Identity;
use zacline_tracking::ShipmentRegistry;

struct CityGeocoder;

#[async_trait]
impl Geocoder for CityGeocoder {
    async fn lookup(&self, query: &str) -> Result<Coordinates, GeocodeError> {
        match query.to_lowercase().as_str() {
            "sydney" => Ok(Coordinates {
                lat: -33.8688,
                lon: 151.2093,
            }),
            "melbourne" => Ok(Coordinates {
                lat: -37.8136,
                lon: 144.9631,
            }),
            _ => Err(GeocodeError::NoMatch),
        }
    }
}

fn test_app() -> Router {
    let owner = Identity::from("owner");
    let access = Arc::new(AccessControl::new(
        owner.clone(),
        [owner.clone(), Identity::from("admin")],
        BindPolicy::BindOnce,
    ));
    let registry = Arc::new(ShipmentRegistry::new(access.clone()));
    let ledger = Arc::new(OrderLedger::new(access.clone(), 16));
    ledger.bind_shipment_registry(&owner, registry.clone()).unwrap();

    let pricing = Arc::new(PricingEngine::new(
        Arc::new(CityGeocoder),
        PricingConfig::default(),
    ));
    let quotes = Arc::new(QuoteDebouncer::new(pricing, Duration::from_millis(10)));

    app(AppState {
        access,
        ledger,
        registry,
        quotes,
    })
}

fn create_order_request(account: Option<&str>, amount_cents: i64) -> Request<Body> {
    let body = json!({
        "amount_cents": amount_cents,
        "pickup_location": "Sydney",
        "dropoff_location": "Melbourne",
        "sender_name": "Alice",
        "sender_phone": "0400000000",
        "receiver_name": "Bob",
    });

    let mut builder = Request::builder()
        .method("POST")
        .uri("/v1/orders")
        .header("content-type", "application/json");
    if let Some(account) = account {
        builder = builder.header("x-zacline-account", account);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post(uri: &str, account: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("x-zacline-account", account)
        .body(Body::empty())
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn create_order_requires_an_account() {
    let app = test_app();
    let (status, _) = send(&app, create_order_request(None, 100)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_order_rejects_missing_payment() {
    let app = test_app();
    let (status, body) = send(&app, create_order_request(Some("buyer"), 0)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Payment required");

    let (_, body) = send(&app, get("/v1/orders/count")).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn delivery_lifecycle_over_http() {
    let app = test_app();

    let (status, body) = send(&app, create_order_request(Some("buyer"), 100)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["order_id"], 1);
    assert_eq!(body["tracking_id"], "ZAC001");

    // Public tracking lookup by token.
    let (status, body) = send(&app, get("/v1/track/zac001")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["order_id"], 1);
    assert_eq!(body["status"], 0);
    assert_eq!(body["status_label"], "Not collected");
    assert_eq!(body["sender_phone"], "0400000000");

    // Non-admin cannot advance the shipment.
    let (status, body) = send(&app, post("/v1/shipments/1/collect", "bystander")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Only admin");

    let (status, body) = send(&app, post("/v1/shipments/1/collect", "admin")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], 1);
    assert_eq!(body["status_label"], "Collected / On delivery");

    // Repeating a transition is a conflict, not a no-op.
    let (status, body) = send(&app, post("/v1/shipments/1/collect", "admin")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Invalid status");

    let (status, body) = send(&app, post("/v1/shipments/1/deliver", "admin")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], 2);
    assert_eq!(body["status_label"], "Delivered / Collected");
}

#[tokio::test]
async fn tracking_rejects_malformed_tokens() {
    let app = test_app();
    let (status, body) = send(&app, get("/v1/track/BOGUS42")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid tracking id");

    let (status, body) = send(&app, get("/v1/track/ZAC999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Shipment not found");
}

#[tokio::test]
async fn owner_manages_the_admin_allowlist() {
    let app = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/v1/admin/admins")
        .header("content-type", "application/json")
        .header("x-zacline-account", "mallory")
        .body(Body::from(
            json!({"account": "mallory", "enabled": true}).to_string(),
        ))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Only owner");

    let request = Request::builder()
        .method("POST")
        .uri("/v1/admin/admins")
        .header("content-type", "application/json")
        .header("x-zacline-account", "owner")
        .body(Body::from(
            json!({"account": "courier-7", "enabled": true}).to_string(),
        ))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_admin"], true);

    let (_, body) = send(&app, get("/v1/admin/admins/courier-7")).await;
    assert_eq!(body["is_admin"], true);
}

#[tokio::test]
async fn quotes_degrade_to_unavailable() {
    let app = test_app();

    let (status, body) = send(&app, get("/v1/quotes?pickup=Sydney&dropoff=Melbourne")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], true);
    assert!(body["amount_cents"].as_i64().unwrap() > 0);

    let (status, body) = send(&app, get("/v1/quotes?pickup=Sydney&dropoff=Atlantis")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], false);
    assert_eq!(body["amount_cents"], Value::Null);
}
