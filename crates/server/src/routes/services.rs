use axum::{
    extract::{Path, Query, State},
    Json,
};
use models::service as catalog_entry;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use service::catalog;

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ServiceResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub base_price: Option<Decimal>,
    pub duration_minutes: Option<i32>,
    pub is_active: bool,
}

impl From<catalog_entry::Model> for ServiceResponse {
    fn from(s: catalog_entry::Model) -> Self {
        Self {
            id: s.id,
            name: s.name,
            description: s.description,
            base_price: s.base_price,
            duration_minutes: s.duration_minutes,
            is_active: s.is_active,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ServiceListResponse {
    pub services: Vec<ServiceResponse>,
    pub total: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

#[utoipa::path(get, path = "/services", tag = "services", params(("include_inactive" = Option<bool>, Query, description = "Include inactive services")), responses((status = 200, description = "OK", body = crate::openapi::ServiceListDoc)))]
pub async fn list(State(state): State<AppState>, Query(q): Query<CatalogQuery>) -> Result<Json<ServiceListResponse>, ApiError> {
    let services: Vec<ServiceResponse> = catalog::list_services(&state.db, q.include_inactive)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = services.len() as u64;
    Ok(Json(ServiceListResponse { services, total }))
}

#[utoipa::path(get, path = "/services/{id}", tag = "services", params(("id" = i32, Path, description = "Service id")), responses((status = 200, description = "OK", body = crate::openapi::ServiceDoc), (status = 404, description = "Not Found")))]
pub async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<ServiceResponse>, ApiError> {
    Ok(Json(catalog::get_service(&state.db, id).await?.into()))
}
