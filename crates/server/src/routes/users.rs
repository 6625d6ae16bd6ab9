use axum::{
    extract::{Path, State},
    Json,
};
use models::user;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use service::registration::domain::RegisterInput;

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub user_id: i32,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub phone_number: String,
    pub telegram_id: Option<i64>,
    pub language_code: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<user::Model> for UserResponse {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            phone_number: u.phone_number,
            telegram_id: u.telegram_id,
            language_code: u.language_code,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LanguageUpdate {
    pub language_code: String,
}

#[utoipa::path(post, path = "/users/register", tag = "users", request_body = crate::openapi::RegisterRequestDoc, responses((status = 200, description = "Registered", body = crate::openapi::RegistrationResponseDoc), (status = 400, description = "Invalid phone or language"), (status = 403, description = "Bad API key")))]
pub async fn register(State(state): State<AppState>, Json(input): Json<RegisterInput>) -> Result<Json<RegistrationResponse>, ApiError> {
    let user_id = state.registration.register(input).await?;
    Ok(Json(RegistrationResponse { status: "ok", message: "User registered successfully", user_id }))
}

#[utoipa::path(get, path = "/users/by-telegram/{telegram_id}", tag = "users", params(("telegram_id" = i64, Path, description = "Telegram account id")), responses((status = 200, description = "OK", body = crate::openapi::UserDoc), (status = 404, description = "Not Found")))]
pub async fn get_by_telegram_id(State(state): State<AppState>, Path(telegram_id): Path<i64>) -> Result<Json<UserResponse>, ApiError> {
    let found = state.registration.find_by_telegram_id(telegram_id).await?;
    Ok(Json(found.into()))
}

#[utoipa::path(patch, path = "/users/{id}/language", tag = "users", params(("id" = i32, Path, description = "User id")), request_body = crate::openapi::LanguageUpdateDoc, responses((status = 200, description = "OK", body = crate::openapi::UserDoc), (status = 400, description = "Invalid language code"), (status = 404, description = "Not Found")))]
pub async fn update_language(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<LanguageUpdate>,
) -> Result<Json<UserResponse>, ApiError> {
    let updated = state.registration.update_language(id, &body.language_code).await?;
    Ok(Json(updated.into()))
}
