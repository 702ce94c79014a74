use super::models::{OutfitSuggestion, OutfitSuggestionRow};
use sqlx::{SqliteConnection, SqlitePool};

/// Upsert by id; a recomputed suggestion with the same id supersedes the old row.
pub async fn upsert_suggestion(
    conn: &mut SqliteConnection,
    suggestion: &OutfitSuggestion,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT OR REPLACE INTO outfit_suggestions (id, top_id, bottom_id, score, match_reason, created_at)
         VALUES (?, ?, ?, ?, ?, CURRENT_TIMESTAMP)",
    )
    .bind(&suggestion.id)
    .bind(&suggestion.top_id)
    .bind(&suggestion.bottom_id)
    .bind(suggestion.score)
    .bind(&suggestion.match_reason)
    .execute(conn)
    .await?;
    Ok(())
}

/// All stored suggestions, best first. Rows that fail validation are skipped.
pub async fn list_suggestions(pool: &SqlitePool) -> Result<Vec<OutfitSuggestion>, sqlx::Error> {
    let rows = sqlx::query_as::<_, OutfitSuggestionRow>(
        "SELECT id, top_id, bottom_id, score, match_reason FROM outfit_suggestions ORDER BY score DESC, id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .filter_map(|row| match OutfitSuggestion::try_from(row) {
            Ok(suggestion) => Some(suggestion),
            Err(e) => {
                log::warn!("Skipping unreadable suggestion: {e}");
                None
            }
        })
        .collect())
}

pub async fn delete_by_item_id(pool: &SqlitePool, item_id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM outfit_suggestions WHERE top_id = ? OR bottom_id = ?")
        .bind(item_id)
        .bind(item_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete_suggestion(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM outfit_suggestions WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Replaces the whole suggestion set atomically.
pub async fn replace_all(
    pool: &SqlitePool,
    suggestions: &[OutfitSuggestion],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM outfit_suggestions")
        .execute(&mut *tx)
        .await?;

    for suggestion in suggestions {
        upsert_suggestion(&mut *tx, suggestion).await?;
    }

    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/suggestion_repo_test.rs"]
mod tests;
