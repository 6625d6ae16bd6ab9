use axum::{
    extract::{Path, Query, State},
    Json,
};
use models::order::{self, OrderStatus};
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Serialize;
use service::admin::orders::{self as admin_orders, NewAdminOrder, OrderListQuery, OrderUpdate};

use common::types::StatusMessage;
use crate::errors::ApiError;
use crate::routes::users::UserResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AdminOrderResponse {
    pub id: i32,
    pub user_id: i32,
    pub service_id: Option<i32>,
    pub status: OrderStatus,
    pub total_amount: Option<Decimal>,
    pub address_text: Option<String>,
    pub scheduled_at: Option<DateTimeWithTimeZone>,
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<order::Model> for AdminOrderResponse {
    fn from(o: order::Model) -> Self {
        Self {
            id: o.id,
            user_id: o.user_id,
            service_id: o.service_id,
            status: o.status,
            total_amount: o.total_amount,
            address_text: o.address_text,
            scheduled_at: o.scheduled_at,
            notes: o.notes,
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdminOrderWithUserResponse {
    #[serde(flatten)]
    pub order: AdminOrderResponse,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct AdminOrderListResponse {
    pub orders: Vec<AdminOrderResponse>,
    pub total: u64,
}

#[utoipa::path(get, path = "/admin/orders", tag = "admin", params(
    ("skip" = Option<u64>, Query, description = "Rows to skip"),
    ("limit" = Option<u64>, Query, description = "Page size, 1..=500"),
    ("status" = Option<String>, Query, description = "pending | confirmed | in_progress | completed | cancelled"),
    ("user_id" = Option<i32>, Query, description = "Owner filter"),
    ("sort_by" = Option<String>, Query, description = "id | user_id | status | total_amount | address_text | scheduled_at | created_at | updated_at"),
    ("order" = Option<String>, Query, description = "asc | desc, default desc"),
    ("date_from" = Option<String>, Query, description = "RFC 3339, inclusive; offset must be Z or percent-encoded (%2B05:00)"),
    ("date_to" = Option<String>, Query, description = "RFC 3339, inclusive; offset must be Z or percent-encoded (%2B05:00)"),
), responses((status = 200, description = "OK", body = crate::openapi::AdminOrderListDoc)))]
pub async fn list(State(state): State<AppState>, Query(q): Query<OrderListQuery>) -> Result<Json<AdminOrderListResponse>, ApiError> {
    let page = admin_orders::list_orders(&state.db, q).await?;
    Ok(Json(AdminOrderListResponse { orders: page.items.into_iter().map(Into::into).collect(), total: page.total }))
}

#[utoipa::path(post, path = "/admin/orders", tag = "admin", request_body = crate::openapi::NewAdminOrderDoc, responses((status = 200, description = "Created", body = crate::openapi::AdminOrderDoc), (status = 404, description = "User or service not found")))]
pub async fn create(State(state): State<AppState>, Json(input): Json<NewAdminOrder>) -> Result<Json<AdminOrderResponse>, ApiError> {
    Ok(Json(admin_orders::create_order(&state.db, input).await?.into()))
}

#[utoipa::path(get, path = "/admin/orders/{id}", tag = "admin", params(("id" = i32, Path, description = "Order id")), responses((status = 200, description = "Order with its user", body = crate::openapi::AdminOrderWithUserDoc), (status = 404, description = "Not Found")))]
pub async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<AdminOrderWithUserResponse>, ApiError> {
    let (order, user) = admin_orders::get_order_with_user(&state.db, id).await?;
    Ok(Json(AdminOrderWithUserResponse { order: order.into(), user: user.into() }))
}

#[utoipa::path(patch, path = "/admin/orders/{id}", tag = "admin", params(("id" = i32, Path, description = "Order id")), request_body = crate::openapi::OrderUpdateDoc, responses((status = 200, description = "OK", body = crate::openapi::AdminOrderDoc), (status = 400, description = "Null status"), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(update): Json<OrderUpdate>,
) -> Result<Json<AdminOrderResponse>, ApiError> {
    Ok(Json(admin_orders::update_order(&state.db, id, update).await?.into()))
}

#[utoipa::path(delete, path = "/admin/orders/{id}", tag = "admin", params(("id" = i32, Path, description = "Order id")), responses((status = 200, description = "Deleted", body = crate::openapi::StatusMessageDoc), (status = 404, description = "Not Found")))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<StatusMessage>, ApiError> {
    admin_orders::delete_order(&state.db, id).await?;
    Ok(Json(StatusMessage::ok(format!("Order {id} deleted"))))
}
