use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use crate::errors::ApiError;
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "X-API-Key";
pub const ADMIN_KEY_HEADER: &str = "X-Admin-Key";

fn header_matches(req: &Request, header: &str, expected: &str) -> bool {
    req.headers()
        .get(header)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected)
}

/// Middleware: require `X-API-Key` equal to the configured api key
pub async fn require_api_key(State(state): State<AppState>, req: Request, next: Next) -> Result<Response, ApiError> {
    if !header_matches(&req, API_KEY_HEADER, &state.keys.api_key) {
        warn!(path = %req.uri().path(), "rejected request without valid api key");
        return Err(ApiError::Forbidden);
    }
    Ok(next.run(req).await)
}

/// Middleware: require `X-Admin-Key` equal to the configured admin key
pub async fn require_admin_key(State(state): State<AppState>, req: Request, next: Next) -> Result<Response, ApiError> {
    if !header_matches(&req, ADMIN_KEY_HEADER, &state.keys.admin_key) {
        warn!(path = %req.uri().path(), "rejected request without valid admin key");
        return Err(ApiError::Forbidden);
    }
    Ok(next.run(req).await)
}
