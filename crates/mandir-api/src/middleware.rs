use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};

use mandir_types::api::Claims;

use crate::error::ApiError;
use crate::state::AppState;

/// Reject requests without a valid bearer token; stash the claims for handlers.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = bearer_claims(req.headers(), &state.jwt_secret)?
        .ok_or_else(|| ApiError::Unauthorized("Please sign in to continue.".into()))?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Claims from the Authorization header, if one was sent.
///
/// A missing header is `Ok(None)`; a malformed or expired token is an error
/// rather than a silent fallback to anonymous.
pub fn bearer_claims(headers: &HeaderMap, jwt_secret: &str) -> Result<Option<Claims>, ApiError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let token = value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::Unauthorized("Malformed Authorization header.".into()))?;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::Unauthorized("Your session has expired. Please sign in again.".into()))?;

    Ok(Some(token_data.claims))
}
