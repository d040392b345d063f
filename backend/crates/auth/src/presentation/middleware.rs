//! Auth Middleware
//!
//! Bearer token check for protected routes.

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use crate::application::TokenIssuer;
use crate::error::AuthError;

/// Extract the token from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Middleware that requires a valid bearer token
///
/// On success the decoded `AccessClaims` are inserted into the request
/// extensions. No database access is involved.
pub async fn require_bearer(
    State(tokens): State<Arc<TokenIssuer>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(req.headers()).ok_or(AuthError::InvalidToken)?;
    let claims = tokens.verify(token)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
