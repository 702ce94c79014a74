use super::models::{ClothingItem, ClothingItemRow, ClothingType};
use chrono::SecondsFormat;
use sqlx::{SqliteConnection, SqlitePool};

const ITEM_COLUMNS: &str = "id, item_type, image_url, color, style, fabric, name, added";

/// Fixed-width timestamp so `ORDER BY added` sorts chronologically.
pub(crate) fn format_added(item: &ClothingItem) -> String {
    item.added.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub async fn insert_item(
    conn: &mut SqliteConnection,
    item: &ClothingItem,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO clothing_items (id, item_type, image_url, color, style, fabric, name, added)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&item.id)
    .bind(item.item_type.as_str())
    .bind(&item.image_url)
    .bind(&item.color)
    .bind(item.style.as_str())
    .bind(item.fabric.as_str())
    .bind(&item.name)
    .bind(format_added(item))
    .execute(conn)
    .await?;
    Ok(())
}

/// Items newest first. Rows that no longer decode are skipped with a warning.
pub async fn list_items(
    pool: &SqlitePool,
    item_type: Option<ClothingType>,
) -> Result<Vec<ClothingItem>, sqlx::Error> {
    let rows = match item_type {
        Some(kind) => {
            let sql = format!(
                "SELECT {ITEM_COLUMNS} FROM clothing_items WHERE item_type = ? ORDER BY added DESC, id"
            );
            sqlx::query_as::<_, ClothingItemRow>(&sql)
                .bind(kind.as_str())
                .fetch_all(pool)
                .await?
        }
        None => {
            let sql = format!("SELECT {ITEM_COLUMNS} FROM clothing_items ORDER BY added DESC, id");
            sqlx::query_as::<_, ClothingItemRow>(&sql)
                .fetch_all(pool)
                .await?
        }
    };

    Ok(rows
        .into_iter()
        .filter_map(|row| match ClothingItem::try_from(row) {
            Ok(item) => Some(item),
            Err(e) => {
                log::warn!("Skipping unreadable clothing item: {e}");
                None
            }
        })
        .collect())
}

pub async fn get_item(pool: &SqlitePool, id: &str) -> Result<Option<ClothingItem>, sqlx::Error> {
    let sql = format!("SELECT {ITEM_COLUMNS} FROM clothing_items WHERE id = ?");
    let row = sqlx::query_as::<_, ClothingItemRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.and_then(|row| match ClothingItem::try_from(row) {
        Ok(item) => Some(item),
        Err(e) => {
            log::warn!("Unreadable clothing item {id}: {e}");
            None
        }
    }))
}

pub async fn count_items(
    conn: &mut SqliteConnection,
    item_type: ClothingType,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM clothing_items WHERE item_type = ?")
        .bind(item_type.as_str())
        .fetch_one(conn)
        .await
}

/// Deletes the item and every suggestion that references it in one transaction.
/// Returns `(item_existed, suggestions_removed)`.
pub async fn delete_item_cascade(pool: &SqlitePool, id: &str) -> Result<(bool, u64), sqlx::Error> {
    let mut tx = pool.begin().await?;

    let removed_suggestions =
        sqlx::query("DELETE FROM outfit_suggestions WHERE top_id = ? OR bottom_id = ?")
            .bind(id)
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

    let removed_items = sqlx::query("DELETE FROM clothing_items WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;
    Ok((removed_items > 0, removed_suggestions))
}

#[cfg(test)]
#[path = "tests/item_repo_test.rs"]
mod tests;
