//! Storage seams for the closet service.
//!
//! Item and suggestion persistence sit behind two traits so the service can
//! run against SQLite in the app and an in-memory map in tests.

use crate::database::models::{ClothingItem, ClothingType, OutfitSuggestion};
use crate::database::{item_repo, suggestion_repo};
use crate::types::errors::ClosetError;
use sqlx::SqlitePool;

#[allow(async_fn_in_trait)]
pub trait ItemStore {
    /// Items newest first, optionally restricted to one slot.
    async fn list_items(
        &self,
        item_type: Option<ClothingType>,
    ) -> Result<Vec<ClothingItem>, ClosetError>;

    async fn get_item(&self, id: &str) -> Result<Option<ClothingItem>, ClosetError>;

    async fn count_items(&self, item_type: ClothingType) -> Result<usize, ClosetError>;

    /// Fails with `Duplicate` when the id is already taken.
    async fn insert_item(&self, item: &ClothingItem) -> Result<(), ClosetError>;

    /// Removes the item and every suggestion referencing it.
    /// Returns `false` when no such item existed.
    async fn delete_item(&self, id: &str) -> Result<bool, ClosetError>;
}

#[allow(async_fn_in_trait)]
pub trait SuggestionStore {
    /// Write failures surface as `StorageUnavailable`.
    async fn persist(&self, suggestion: &OutfitSuggestion) -> Result<(), ClosetError>;

    /// Best first. Unreadable storage yields an empty list, never an error.
    async fn load_all(&self) -> Vec<OutfitSuggestion>;

    async fn delete_by_item_id(&self, item_id: &str) -> Result<u64, ClosetError>;

    /// Supersedes the stored set with a fresh recomputation.
    async fn replace_all(&self, suggestions: &[OutfitSuggestion]) -> Result<(), ClosetError>;
}

/// Both halves of the closet in one place.
pub trait ClosetStore: ItemStore + SuggestionStore {}

impl<T: ItemStore + SuggestionStore> ClosetStore for T {}

fn unavailable(context: &str, error: sqlx::Error) -> ClosetError {
    log::error!("{context}: {error}");
    ClosetError::StorageUnavailable(format!("{context}: {error}"))
}

/// SQLite-backed store over the app database.
#[derive(Clone)]
pub struct SqliteClosetStore {
    pool: SqlitePool,
}

impl SqliteClosetStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl ItemStore for SqliteClosetStore {
    async fn list_items(
        &self,
        item_type: Option<ClothingType>,
    ) -> Result<Vec<ClothingItem>, ClosetError> {
        Ok(item_repo::list_items(&self.pool, item_type).await?)
    }

    async fn get_item(&self, id: &str) -> Result<Option<ClothingItem>, ClosetError> {
        Ok(item_repo::get_item(&self.pool, id).await?)
    }

    async fn count_items(&self, item_type: ClothingType) -> Result<usize, ClosetError> {
        let mut conn = self.pool.acquire().await?;
        let count = item_repo::count_items(&mut conn, item_type).await?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    async fn insert_item(&self, item: &ClothingItem) -> Result<(), ClosetError> {
        let mut conn = self.pool.acquire().await?;
        item_repo::insert_item(&mut conn, item).await?;
        Ok(())
    }

    async fn delete_item(&self, id: &str) -> Result<bool, ClosetError> {
        let (existed, cascaded) = item_repo::delete_item_cascade(&self.pool, id).await?;
        if cascaded > 0 {
            log::info!("Deleted item {id} and {cascaded} suggestion(s) referencing it");
        }
        Ok(existed)
    }
}

impl SuggestionStore for SqliteClosetStore {
    async fn persist(&self, suggestion: &OutfitSuggestion) -> Result<(), ClosetError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| unavailable("Failed to open suggestion store", e))?;
        suggestion_repo::upsert_suggestion(&mut conn, suggestion)
            .await
            .map_err(|e| unavailable("Failed to save suggestion", e))
    }

    async fn load_all(&self) -> Vec<OutfitSuggestion> {
        match suggestion_repo::list_suggestions(&self.pool).await {
            Ok(suggestions) => suggestions,
            Err(e) => {
                log::warn!("Suggestion store unreadable, starting from empty: {e}");
                Vec::new()
            }
        }
    }

    async fn delete_by_item_id(&self, item_id: &str) -> Result<u64, ClosetError> {
        suggestion_repo::delete_by_item_id(&self.pool, item_id)
            .await
            .map_err(|e| unavailable("Failed to delete suggestions", e))
    }

    async fn replace_all(&self, suggestions: &[OutfitSuggestion]) -> Result<(), ClosetError> {
        suggestion_repo::replace_all(&self.pool, suggestions)
            .await
            .map_err(|e| unavailable("Failed to replace suggestions", e))
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
