use axum::{
    http::{HeaderName, Method},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod admin;
pub mod app_config;
pub mod auth;
pub mod bootstrap;
pub mod error;
pub mod orders;
pub mod quotes;
pub mod state;
pub mod stream;
pub mod tracking;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
            HeaderName::from_static(auth::ACCOUNT_HEADER),
        ]);

    Router::new()
        .merge(orders::routes())
        .merge(tracking::routes())
        .merge(admin::routes())
        .merge(quotes::routes())
        .merge(stream::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
