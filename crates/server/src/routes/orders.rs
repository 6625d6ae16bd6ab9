use axum::{extract::State, Json};
use serde::Serialize;
use service::ordering::domain::CreateOrderInput;

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct OrderCreatedResponse {
    pub status: &'static str,
    pub order_id: i32,
    pub message: &'static str,
}

#[utoipa::path(post, path = "/orders", tag = "orders", request_body = crate::openapi::CreateOrderDoc, responses((status = 200, description = "Created", body = crate::openapi::OrderCreatedDoc), (status = 400, description = "Payment failed"), (status = 404, description = "User or active service not found")))]
pub async fn create(State(state): State<AppState>, Json(input): Json<CreateOrderInput>) -> Result<Json<OrderCreatedResponse>, ApiError> {
    let order_id = state.ordering.create_order(input).await?;
    Ok(Json(OrderCreatedResponse { status: "ok", order_id, message: "Order created and payment processed" }))
}
