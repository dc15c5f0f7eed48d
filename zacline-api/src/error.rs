use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use zacline_core::access::AccessError;
use zacline_escrow::EscrowError;
use zacline_tracking::TrackingError;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    AuthorizationError(String),
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    InternalServerError(String),
    Anyhow(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::AuthorizationError(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<TrackingError> for AppError {
    fn from(err: TrackingError) -> Self {
        let msg = err.to_string();
        match err {
            TrackingError::OnlyEscrow | TrackingError::OnlyAdmin => Self::AuthorizationError(msg),
            TrackingError::ShipmentNotFound => Self::NotFoundError(msg),
            TrackingError::InvalidStatus | TrackingError::ShipmentExists => {
                Self::ConflictError(msg)
            }
        }
    }
}

impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        let msg = err.to_string();
        match err {
            AccessError::OnlyOwner => Self::AuthorizationError(msg),
            AccessError::AlreadyBound => Self::ConflictError(msg),
        }
    }
}

impl From<EscrowError> for AppError {
    fn from(err: EscrowError) -> Self {
        match err {
            EscrowError::PaymentRequired => Self::ValidationError(err.to_string()),
            EscrowError::OrderNotFound => Self::NotFoundError(err.to_string()),
            EscrowError::RegistryUnbound => Self::InternalServerError(err.to_string()),
            EscrowError::Access(inner) => inner.into(),
            EscrowError::Tracking(inner) => inner.into(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Anyhow(err)
    }
}
