use axum::{routing::get, Router};

use crate::state::AppState;

pub mod users;
pub mod orders;
pub mod services;
pub mod stats;

/// Routes mounted under `/admin`; the caller adds the admin-key layer.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list).post(users::create))
        .route("/users/:id", get(users::get).patch(users::update).delete(users::delete))
        .route("/users/:id/orders", get(users::orders))
        .route("/orders", get(orders::list).post(orders::create))
        .route("/orders/:id", get(orders::get).patch(orders::update).delete(orders::delete))
        .route("/services", get(services::list).post(services::create))
        .route("/services/:id", get(services::get).patch(services::update).delete(services::deactivate))
        .route("/stats", get(stats::get))
}
