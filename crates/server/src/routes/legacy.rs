//! Deprecated top-level aliases kept for older bot builds.

use axum::{extract::State, Json};
use service::ordering::domain::CreateOrderInput;
use service::registration::domain::RegisterInput;

use super::{orders, users};
use crate::errors::ApiError;
use crate::state::AppState;

/// Alias of `POST /users/register`.
#[utoipa::path(post, path = "/register", tag = "legacy", request_body = crate::openapi::RegisterRequestDoc, responses((status = 200, description = "Registered", body = crate::openapi::RegistrationResponseDoc)))]
pub async fn register(state: State<AppState>, body: Json<RegisterInput>) -> Result<Json<users::RegistrationResponse>, ApiError> {
    users::register(state, body).await
}

/// Alias of `POST /orders`.
#[utoipa::path(post, path = "/create_order", tag = "legacy", request_body = crate::openapi::CreateOrderDoc, responses((status = 200, description = "Created", body = crate::openapi::OrderCreatedDoc)))]
pub async fn create_order(state: State<AppState>, body: Json<CreateOrderInput>) -> Result<Json<orders::OrderCreatedResponse>, ApiError> {
    orders::create(state, body).await
}
