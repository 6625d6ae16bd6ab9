use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use service::admin::services::{self as admin_services, NewService, ServiceListQuery, ServiceUpdate};

use crate::errors::ApiError;
use crate::routes::services::{ServiceListResponse, ServiceResponse};
use crate::state::AppState;

#[utoipa::path(get, path = "/admin/services", tag = "admin", params(
    ("skip" = Option<u64>, Query, description = "Rows to skip"),
    ("limit" = Option<u64>, Query, description = "Page size, 1..=500"),
    ("include_inactive" = Option<bool>, Query, description = "Default true"),
    ("sort_by" = Option<String>, Query, description = "id | name | base_price | is_active | created_at"),
    ("order" = Option<String>, Query, description = "asc | desc"),
    ("date_from" = Option<String>, Query, description = "RFC 3339, inclusive; offset must be Z or percent-encoded (%2B05:00)"),
    ("date_to" = Option<String>, Query, description = "RFC 3339, inclusive; offset must be Z or percent-encoded (%2B05:00)"),
), responses((status = 200, description = "OK", body = crate::openapi::ServiceListDoc)))]
pub async fn list(State(state): State<AppState>, Query(q): Query<ServiceListQuery>) -> Result<Json<ServiceListResponse>, ApiError> {
    let page = admin_services::list_services(&state.db, q).await?;
    Ok(Json(ServiceListResponse { services: page.items.into_iter().map(Into::into).collect(), total: page.total }))
}

#[utoipa::path(post, path = "/admin/services", tag = "admin", request_body = crate::openapi::NewServiceDoc, responses((status = 201, description = "Created", body = crate::openapi::ServiceDoc), (status = 400, description = "Invalid field")))]
pub async fn create(State(state): State<AppState>, Json(input): Json<NewService>) -> Result<(StatusCode, Json<ServiceResponse>), ApiError> {
    let created = admin_services::create_service(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(get, path = "/admin/services/{id}", tag = "admin", params(("id" = i32, Path, description = "Service id")), responses((status = 200, description = "OK", body = crate::openapi::ServiceDoc), (status = 404, description = "Not Found")))]
pub async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<ServiceResponse>, ApiError> {
    Ok(Json(admin_services::get_service(&state.db, id).await?.into()))
}

#[utoipa::path(patch, path = "/admin/services/{id}", tag = "admin", params(("id" = i32, Path, description = "Service id")), request_body = crate::openapi::ServiceUpdateDoc, responses((status = 200, description = "OK", body = crate::openapi::ServiceDoc), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(update): Json<ServiceUpdate>,
) -> Result<Json<ServiceResponse>, ApiError> {
    Ok(Json(admin_services::update_service(&state.db, id, update).await?.into()))
}

/// Soft delete: the service is deactivated, not removed.
#[utoipa::path(delete, path = "/admin/services/{id}", tag = "admin", params(("id" = i32, Path, description = "Service id")), responses((status = 204, description = "Deactivated"), (status = 404, description = "Not Found")))]
pub async fn deactivate(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, ApiError> {
    admin_services::deactivate_service(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
