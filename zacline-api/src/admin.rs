use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use zacline_shared::Identity;

use crate::auth::Caller;
use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SetAdminRequest {
    pub account: String,
    pub enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct AdminStatusResponse {
    pub account: String,
    pub is_admin: bool,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/admin/admins", post(set_admin))
        .route("/v1/admin/admins/{account}", get(admin_status))
}

/// POST /v1/admin/admins — owner only.
async fn set_admin(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(req): Json<SetAdminRequest>,
) -> Result<Json<AdminStatusResponse>, AppError> {
    let account = Identity::from(req.account);
    if !account.is_plausible() {
        return Err(AppError::ValidationError("Invalid account identity".to_string()));
    }

    state.access.set_admin(&caller, account.clone(), req.enabled)?;
    Ok(Json(AdminStatusResponse {
        is_admin: state.access.is_admin(&account),
        account: account.to_string(),
    }))
}

/// GET /v1/admin/admins/{account} — public query, mirrors the ledger's
/// open admins lookup.
async fn admin_status(
    State(state): State<AppState>,
    Path(account): Path<String>,
) -> Json<AdminStatusResponse> {
    let account = Identity::from(account);
    Json(AdminStatusResponse {
        is_admin: state.access.is_admin(&account),
        account: account.to_string(),
    })
}
