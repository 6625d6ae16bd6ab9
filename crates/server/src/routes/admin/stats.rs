use axum::{extract::State, Json};
use service::admin::stats::{self, Stats};

use crate::errors::ApiError;
use crate::state::AppState;

#[utoipa::path(get, path = "/admin/stats", tag = "admin", responses((status = 200, description = "Aggregate counts", body = crate::openapi::StatsDoc)))]
pub async fn get(State(state): State<AppState>) -> Result<Json<Stats>, ApiError> {
    Ok(Json(stats::collect(&state.db).await?))
}
