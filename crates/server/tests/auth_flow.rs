use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, RuntimeErr};
use serde_json::{json, Value};
use tower::ServiceExt;

use configs::AuthConfig;
use server::routes;
use server::state::AppState;
use service::integrations::Integrations;

const API_KEY: &str = "test_secret";
const ADMIN_KEY: &str = "admin_secret";

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

fn app_with(db: DatabaseConnection) -> Router {
    let keys = AuthConfig { api_key: API_KEY.into(), admin_key: ADMIN_KEY.into() };
    let state = AppState::new(db, keys, Integrations::stubs());
    routes::build_router(state, cors())
}

/// Router over a disconnected handle; only valid for requests that never reach storage.
fn build_app() -> Router {
    app_with(DatabaseConnection::default())
}

async fn send(req: Request<Body>) -> (StatusCode, Value) {
    send_to(build_app(), req).await
}

async fn send_to(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.expect("router call");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.expect("body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn json_request(method: &str, uri: &str, headers: &[(&str, &str)], body: Value) -> Request<Body> {
    let mut b = Request::builder().method(method).uri(uri).header("content-type", "application/json");
    for (k, v) in headers {
        b = b.header(*k, *v);
    }
    b.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, headers: &[(&str, &str)]) -> Request<Body> {
    let mut b = Request::builder().method("GET").uri(uri);
    for (k, v) in headers {
        b = b.header(*k, *v);
    }
    b.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn liveness_is_public() {
    let (status, body) = send(get("/", &[])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "NoMus API is running" }));

    let (status, body) = send(get("/health", &[])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn openapi_document_lists_routes() {
    let (status, body) = send(get("/api-docs/openapi.json", &[])).await;
    assert_eq!(status, StatusCode::OK);
    let paths = body["paths"].as_object().expect("paths object");
    assert!(paths.contains_key("/users/register"));
    assert!(paths.contains_key("/admin/stats"));
}

#[tokio::test]
async fn user_endpoints_reject_missing_or_wrong_api_key() {
    let body = json!({ "phone_number": "+998900000001" });
    for headers in [vec![], vec![("X-API-Key", "nope")], vec![("X-Admin-Key", ADMIN_KEY)], vec![("X-API-Key", ADMIN_KEY)]] {
        let (status, resp) = send(json_request("POST", "/users/register", &headers, body.clone())).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "headers: {headers:?}");
        assert_eq!(resp, json!({ "detail": "Could not validate credentials" }));
    }

    let (status, _) = send(get("/services", &[("X-Admin-Key", ADMIN_KEY)])).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(json_request("POST", "/create_order", &[], json!({ "user_id": 1, "service_id": 1 }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_endpoints_reject_api_key() {
    for uri in ["/admin/stats", "/admin/users", "/admin/orders", "/admin/services", "/admin/users/1/orders"] {
        let (status, resp) = send(get(uri, &[("X-API-Key", API_KEY)])).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "uri: {uri}");
        assert_eq!(resp["detail"], "Could not validate credentials");

        let (status, _) = send(get(uri, &[("X-Admin-Key", API_KEY)])).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "uri: {uri}");
    }
    let (status, _) = send(json_request("DELETE", "/admin/users/1", &[("X-API-Key", API_KEY)], json!({}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn malformed_bodies_are_unprocessable() {
    let (status, _) = send(json_request("POST", "/users/register", &[("X-API-Key", API_KEY)], json!({ "telegram_id": 5 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(json_request("POST", "/orders", &[("X-API-Key", API_KEY)], json!({ "user_id": "one" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(json_request("PATCH", "/admin/orders/1", &[("X-Admin-Key", ADMIN_KEY)], json!({ "status": "shipped" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn field_validation_is_bad_request() {
    let (status, resp) = send(json_request("POST", "/users/register", &[("X-API-Key", API_KEY)], json!({ "phone_number": "call me" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(resp["detail"].as_str().unwrap_or_default().contains("phone_number"));

    let (status, _) = send(json_request("PATCH", "/users/1/language", &[("X-API-Key", API_KEY)], json!({ "language_code": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(get("/admin/users?sort_by=password", &[("X-Admin-Key", ADMIN_KEY)])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn storage_failure_is_generic_server_error() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Query(RuntimeErr::Internal("connection reset by peer".into()))])
        .into_connection();
    let (status, resp) = send_to(app_with(db), get("/admin/stats", &[("X-Admin-Key", ADMIN_KEY)])).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp, json!({ "detail": "Internal server error" }));
    assert!(!resp.to_string().contains("connection reset"));
}
