//! SQLite persistence: one indexed table per record kind, keyed by `id`.

pub mod item_repo;
pub mod models;
pub mod settings_repo;
pub mod suggestion_repo;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;

/// Open (creating if missing) the closet database and run migrations.
pub async fn open_pool(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let opts = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await?;

    // Run standard sqlx migrations (compiled into the binary)
    sqlx::migrate!("./migrations").run(&pool).await?;

    log::info!("Closet database ready at {}", db_path.display());
    Ok(pool)
}
