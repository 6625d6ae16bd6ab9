mod crud_tests;

use configs::DatabaseConfig;
use sea_orm::DatabaseConnection;

/// Connect and migrate, or `None` when no database is configured for tests.
pub(crate) async fn setup_test_db() -> Option<DatabaseConnection> {
    let _ = dotenvy::dotenv();
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let url = std::env::var("DATABASE_URL").ok()?;
    let cfg = DatabaseConfig { url, max_connections: 5, min_connections: 1, ..Default::default() };
    let db = match crate::db::connect_with_config(&cfg).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {e}");
            return None;
        }
    };
    if let Err(e) = crate::db::migrate(&db).await {
        eprintln!("skip: migrate up failed: {e}");
        return None;
    }
    Some(db)
}

/// Phone number unlikely to collide across test runs.
pub(crate) fn unique_phone() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("+7{:012}", nanos % 1_000_000_000_000)
}
