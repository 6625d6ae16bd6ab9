#![cfg(test)]
use configs::DatabaseConfig;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use models::db::connect_with_config;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

fn test_config() -> Option<DatabaseConfig> {
    let _ = dotenvy::dotenv();
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let url = std::env::var("DATABASE_URL").ok()?;
    Some(DatabaseConfig { url, max_connections: 10, min_connections: 1, acquire_timeout_secs: 10, ..Default::default() })
}

/// A migrated database, or `None` when tests run without one.
pub async fn get_db() -> Result<Option<DatabaseConnection>, anyhow::Error> {
    let Some(cfg) = test_config() else { return Ok(None) };

    // Run migrations exactly once, with a throwaway connection
    let migrated = *MIGRATED
        .get_or_init(|| async {
            match connect_with_config(&cfg).await {
                Ok(db) => models::db::migrate(&db).await.is_ok(),
                Err(e) => {
                    eprintln!("skip: cannot connect to db: {e}");
                    false
                }
            }
        })
        .await;
    if !migrated {
        return Ok(None);
    }

    // Return a fresh connection for the current test's runtime
    Ok(Some(connect_with_config(&cfg).await?))
}

static SEQ: AtomicU64 = AtomicU64::new(0);

/// Distinct across calls within one process and unlikely to repeat across runs.
pub fn unique_phone() -> String {
    let micros = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or_default();
    let n = micros.wrapping_add(SEQ.fetch_add(1, Ordering::SeqCst)) % 1_000_000_000_000;
    format!("+9{:012}", n)
}
