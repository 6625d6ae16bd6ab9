use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use service::admin::users::{self as admin_users, NewUser, UserListQuery, UserUpdate};

use super::orders::AdminOrderResponse;
use crate::errors::ApiError;
use crate::routes::users::UserResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AdminUserListResponse {
    pub users: Vec<UserResponse>,
    pub total: u64,
}

#[derive(Debug, Serialize)]
pub struct UserDeletedResponse {
    pub status: &'static str,
    pub message: String,
    pub orders_deleted: u64,
}

#[utoipa::path(get, path = "/admin/users", tag = "admin", params(
    ("skip" = Option<u64>, Query, description = "Rows to skip"),
    ("limit" = Option<u64>, Query, description = "Page size, 1..=500"),
    ("sort_by" = Option<String>, Query, description = "id | phone_number | telegram_id | language_code | created_at | updated_at"),
    ("order" = Option<String>, Query, description = "asc | desc"),
    ("date_from" = Option<String>, Query, description = "RFC 3339, inclusive; offset must be Z or percent-encoded (%2B05:00)"),
    ("date_to" = Option<String>, Query, description = "RFC 3339, inclusive; offset must be Z or percent-encoded (%2B05:00)"),
    ("q" = Option<String>, Query, description = "Phone number substring"),
), responses((status = 200, description = "OK", body = crate::openapi::AdminUserListDoc)))]
pub async fn list(State(state): State<AppState>, Query(q): Query<UserListQuery>) -> Result<Json<AdminUserListResponse>, ApiError> {
    let page = admin_users::list_users(&state.db, q).await?;
    Ok(Json(AdminUserListResponse { users: page.items.into_iter().map(Into::into).collect(), total: page.total }))
}

#[utoipa::path(post, path = "/admin/users", tag = "admin", request_body = crate::openapi::NewUserDoc, responses((status = 200, description = "Created", body = crate::openapi::UserDoc), (status = 409, description = "Phone or telegram id taken")))]
pub async fn create(State(state): State<AppState>, Json(input): Json<NewUser>) -> Result<Json<UserResponse>, ApiError> {
    Ok(Json(admin_users::create_user(&state.db, input).await?.into()))
}

#[utoipa::path(get, path = "/admin/users/{id}", tag = "admin", params(("id" = i32, Path, description = "User id")), responses((status = 200, description = "OK", body = crate::openapi::UserDoc), (status = 404, description = "Not Found")))]
pub async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<UserResponse>, ApiError> {
    Ok(Json(admin_users::get_user(&state.db, id).await?.into()))
}

#[utoipa::path(patch, path = "/admin/users/{id}", tag = "admin", params(("id" = i32, Path, description = "User id")), request_body = crate::openapi::UserUpdateDoc, responses((status = 200, description = "OK", body = crate::openapi::UserDoc), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(update): Json<UserUpdate>,
) -> Result<Json<UserResponse>, ApiError> {
    Ok(Json(admin_users::update_user(&state.db, id, update).await?.into()))
}

#[utoipa::path(delete, path = "/admin/users/{id}", tag = "admin", params(("id" = i32, Path, description = "User id")), responses((status = 200, description = "Deleted with orders", body = crate::openapi::UserDeletedDoc), (status = 404, description = "Not Found")))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<UserDeletedResponse>, ApiError> {
    let orders_deleted = admin_users::delete_user(&state.db, id).await?;
    Ok(Json(UserDeletedResponse { status: "ok", message: format!("User {id} deleted"), orders_deleted }))
}

#[utoipa::path(get, path = "/admin/users/{id}/orders", tag = "admin", params(("id" = i32, Path, description = "User id")), responses((status = 200, description = "Newest first", body = [crate::openapi::AdminOrderDoc]), (status = 404, description = "Not Found")))]
pub async fn orders(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Vec<AdminOrderResponse>>, ApiError> {
    let orders = admin_users::list_user_orders(&state.db, id).await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Uri;

    fn parse(uri: &str) -> Option<UserListQuery> {
        let uri: Uri = uri.parse().ok()?;
        Query::<UserListQuery>::try_from_uri(&uri).ok().map(|Query(q)| q)
    }

    #[test]
    fn date_window_offsets_need_escaping() {
        let q = parse("/admin/users?date_from=2001-01-01T00:00:00Z").unwrap();
        assert_eq!(q.date_from.unwrap().offset().local_minus_utc(), 0);

        let q = parse("/admin/users?date_to=2001-01-01T00:00:00%2B05:00").unwrap();
        assert_eq!(q.date_to.unwrap().offset().local_minus_utc(), 5 * 3600);

        // a bare `+` decodes to a space
        assert!(parse("/admin/users?date_to=2001-01-01T00:00:00+05:00").is_none());
    }
}
