//! Persisted settings: one JSON document per section key in `app_settings`.

use sqlx::{SqliteConnection, SqlitePool};
use std::collections::HashMap;

const UPSERT_SECTION: &str = "INSERT INTO app_settings (key, value) VALUES (?, ?)
     ON CONFLICT(key) DO UPDATE SET value = excluded.value";

pub async fn get_section(pool: &SqlitePool, key: &str) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT value FROM app_settings WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await
}

pub async fn put_section(pool: &SqlitePool, key: &str, json: &str) -> Result<(), sqlx::Error> {
    let mut conn = pool.acquire().await?;
    write_section(&mut *conn, key, json).await
}

/// Same as [`put_section`] but on a caller-held connection, so several
/// sections can share one transaction.
pub async fn write_section(
    conn: &mut SqliteConnection,
    key: &str,
    json: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(UPSERT_SECTION)
        .bind(key)
        .bind(json)
        .execute(conn)
        .await?;
    Ok(())
}

/// Section key to raw JSON.
pub async fn all_sections(pool: &SqlitePool) -> Result<HashMap<String, String>, sqlx::Error> {
    let rows: Vec<(String, String)> = sqlx::query_as("SELECT key, value FROM app_settings")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().collect())
}

/// Wipes items, suggestions and settings in one transaction.
pub async fn reset_all_data(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM outfit_suggestions")
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM clothing_items")
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM app_settings")
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/settings_repo_tests.rs"]
mod tests;
