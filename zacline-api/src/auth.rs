use axum::{extract::FromRequestParts, http::request::Parts};
use zacline_shared::Identity;

use crate::error::AppError;

/// Header carrying the caller's account identity. Wallet connection
/// and signature verification sit outside this service, so the
/// principal is supplied by the front end rather than proven here.
pub const ACCOUNT_HEADER: &str = "x-zacline-account";

/// Extracts the caller identity from the account header. Handlers for
/// mutating operations take a `Caller`; purely public reads do not.
pub struct Caller(pub Identity);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let account = parts
            .headers
            .get(ACCOUNT_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                AppError::AuthenticationError(format!("Missing {ACCOUNT_HEADER} header"))
            })?;

        Ok(Caller(Identity::from(account)))
    }
}
