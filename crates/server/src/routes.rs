use axum::{
    middleware,
    routing::{get, patch, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::{Health, RootMessage};

use crate::auth;
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod users;
pub mod orders;
pub mod services;
pub mod legacy;
pub mod admin;

#[utoipa::path(get, path = "/", tag = "health", responses((status = 200, description = "Service is running")))]
pub async fn root() -> Json<RootMessage> {
    Json(RootMessage { message: "NoMus API is running" })
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: public liveness, API-key routes, admin-key routes
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    // Public routes
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    // Bot/client routes
    let api = Router::new()
        .route("/users/register", post(users::register))
        .route("/users/by-telegram/:telegram_id", get(users::get_by_telegram_id))
        .route("/users/:id/language", patch(users::update_language))
        .route("/orders", post(orders::create))
        .route("/services", get(services::list))
        .route("/services/:id", get(services::get))
        .route("/register", post(legacy::register))
        .route("/create_order", post(legacy::create_order))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_api_key));

    // Admin routes
    let admin_routes = Router::new().nest(
        "/admin",
        admin::router().route_layer(middleware::from_fn_with_state(state.clone(), auth::require_admin_key)),
    );

    // Compose
    public
        .merge(api)
        .merge(admin_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
