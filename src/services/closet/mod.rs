//! Application state for the wardrobe.
//!
//! `ClosetService` owns the store, the tagger and the matcher settings, and is
//! the only writer of items and suggestions. Reads always go through
//! [`exclude_dangling`] so a stale suggestion never reaches a caller.

pub mod memory;
pub mod store;

pub use memory::MemoryClosetStore;
pub use store::{ClosetStore, ItemStore, SqliteClosetStore, SuggestionStore};

use crate::database::models::{ClothingItem, ClothingType, OutfitSuggestion};
use crate::services::core::OperationLock;
use crate::services::matcher::{self, MatcherConfig};
use crate::services::ranking::{
    exclude_dangling, filter_by_search, item_matches, podium, resolve_outfits, top_k,
    ResolvedOutfit, SwipeSession,
};
use crate::services::tagger::{tag_or_neutral, AttributeTagger, TagSet};
use crate::types::errors::{ClosetError, CommandResult};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};

pub const MAX_ITEMS_PER_TYPE: usize = 30;

/// Upload payload. Color, style and fabric come from the tagger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItemInput {
    #[serde(rename = "type")]
    pub item_type: ClothingType,
    pub image_url: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Consistent read of the whole closet, dangling suggestions removed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosetSnapshot {
    pub tops: Vec<ClothingItem>,
    pub bottoms: Vec<ClothingItem>,
    pub suggestions: Vec<OutfitSuggestion>,
}

impl ClosetSnapshot {
    pub fn items(&self) -> Vec<ClothingItem> {
        self.tops.iter().chain(&self.bottoms).cloned().collect()
    }
}

pub struct ClosetService<S> {
    store: S,
    tagger: RwLock<Arc<dyn AttributeTagger>>,
    config: RwLock<MatcherConfig>,
    write_lock: OperationLock,
}

impl<S: ClosetStore> ClosetService<S> {
    pub fn new(store: S, tagger: Arc<dyn AttributeTagger>, config: MatcherConfig) -> Self {
        Self {
            store,
            tagger: RwLock::new(tagger),
            config: RwLock::new(config),
            write_lock: OperationLock::new(),
        }
    }

    pub fn with_lock(mut self, lock: OperationLock) -> Self {
        self.write_lock = lock;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> MatcherConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Applies to every later regeneration and podium read.
    pub fn set_config(&self, config: MatcherConfig) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
    }

    /// Swaps the tagger used by later uploads.
    pub fn set_tagger(&self, tagger: Arc<dyn AttributeTagger>) {
        *self.tagger.write().unwrap_or_else(PoisonError::into_inner) = tagger;
    }

    fn current_tagger(&self) -> Arc<dyn AttributeTagger> {
        Arc::clone(&self.tagger.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Tags the image and stores a new item.
    ///
    /// Tagging runs before the write lock is taken and falls back to the
    /// neutral set on failure. Each slot holds at most [`MAX_ITEMS_PER_TYPE`].
    pub async fn add_item(&self, input: NewItemInput) -> CommandResult<ClothingItem> {
        let image_url = input.image_url.trim().to_string();
        if image_url.is_empty() {
            return Err(ClosetError::Validation("image is required".into()));
        }

        let tags = self.tag_image(&image_url).await;

        let _guard = self.write_lock.acquire().await?;

        let existing = self.store.count_items(input.item_type).await?;
        if existing >= MAX_ITEMS_PER_TYPE {
            return Err(ClosetError::Validation(format!(
                "closet already holds {MAX_ITEMS_PER_TYPE} {}s",
                input.item_type
            )));
        }

        let item = ClothingItem {
            id: uuid::Uuid::new_v4().to_string(),
            item_type: input.item_type,
            image_url,
            color: tags.color,
            style: tags.style,
            fabric: tags.fabric,
            name: input
                .name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
            added: Utc::now(),
        };

        self.store.insert_item(&item).await?;
        log::info!(
            "Added {} {} ({} {} {})",
            item.item_type,
            item.id,
            item.color,
            item.style,
            item.fabric
        );
        Ok(item)
    }

    async fn tag_image(&self, image_url: &str) -> TagSet {
        let tagger = self.current_tagger();
        let url = image_url.to_string();
        match tokio::task::spawn_blocking(move || tag_or_neutral(tagger.as_ref(), &url)).await {
            Ok(tags) => tags,
            Err(e) => {
                log::warn!("Tagging task failed, using neutral tags: {e}");
                TagSet::neutral()
            }
        }
    }

    pub async fn list_items(
        &self,
        item_type: Option<ClothingType>,
    ) -> CommandResult<Vec<ClothingItem>> {
        self.store.list_items(item_type).await
    }

    pub async fn get_item(&self, id: &str) -> CommandResult<ClothingItem> {
        self.store
            .get_item(id)
            .await?
            .ok_or_else(|| ClosetError::NotFound(format!("item {id}")))
    }

    /// Deletes the item and cascades to its suggestions.
    pub async fn delete_item(&self, id: &str) -> CommandResult<()> {
        let _guard = self.write_lock.acquire().await?;
        if !self.store.delete_item(id).await? {
            return Err(ClosetError::NotFound(format!("item {id}")));
        }
        Ok(())
    }

    /// Scores every top against every bottom and replaces the stored set.
    pub async fn regenerate_suggestions(&self) -> CommandResult<Vec<OutfitSuggestion>> {
        let _guard = self.write_lock.acquire().await?;

        let tops = self.store.list_items(Some(ClothingType::Top)).await?;
        let bottoms = self.store.list_items(Some(ClothingType::Bottom)).await?;
        let config = self.config();
        let suggestions = matcher::match_all(&tops, &bottoms, &config)?;

        self.store.replace_all(&suggestions).await?;
        log::info!(
            "Regenerated {} suggestion(s) from {} tops and {} bottoms",
            suggestions.len(),
            tops.len(),
            bottoms.len()
        );
        Ok(suggestions)
    }

    /// Persists one suggestion. Failures reach the caller so the user can be told.
    pub async fn save_suggestion(&self, suggestion: &OutfitSuggestion) -> CommandResult<()> {
        if !suggestion.score.is_finite() || !(0.0..=1.0).contains(&suggestion.score) {
            return Err(ClosetError::Validation(format!(
                "score {} outside [0, 1]",
                suggestion.score
            )));
        }
        let _guard = self.write_lock.acquire().await?;
        self.store.persist(suggestion).await
    }

    pub async fn snapshot(&self) -> CommandResult<ClosetSnapshot> {
        let tops = self.store.list_items(Some(ClothingType::Top)).await?;
        let bottoms = self.store.list_items(Some(ClothingType::Bottom)).await?;
        let stored = self.store.load_all().await;

        let items: Vec<ClothingItem> = tops.iter().chain(&bottoms).cloned().collect();
        let suggestions = exclude_dangling(&stored, &items);

        Ok(ClosetSnapshot {
            tops,
            bottoms,
            suggestions,
        })
    }

    /// Live suggestions, best first.
    pub async fn suggestions(&self) -> CommandResult<Vec<OutfitSuggestion>> {
        Ok(self.snapshot().await?.suggestions)
    }

    pub async fn top_suggestions(&self, k: usize) -> CommandResult<Vec<ResolvedOutfit>> {
        let snapshot = self.snapshot().await?;
        let ranked = top_k(&snapshot.suggestions, k);
        Ok(resolve_outfits(&ranked, &snapshot.items()))
    }

    /// Best `podium_size` outfits in rank order.
    pub async fn podium(&self) -> CommandResult<Vec<ResolvedOutfit>> {
        let size = self.config().podium_size;
        let snapshot = self.snapshot().await?;
        let ranked = podium(&snapshot.suggestions, size);
        Ok(resolve_outfits(&ranked, &snapshot.items()))
    }

    /// Items whose name, style or fabric contains `query`, case-insensitively.
    pub async fn search_items(
        &self,
        query: &str,
        item_type: Option<ClothingType>,
    ) -> CommandResult<Vec<ClothingItem>> {
        let needle = query.to_lowercase();
        let items = self.store.list_items(item_type).await?;
        Ok(items
            .into_iter()
            .filter(|item| item_matches(item, &needle))
            .collect())
    }

    pub async fn search(&self, query: &str) -> CommandResult<Vec<ResolvedOutfit>> {
        let snapshot = self.snapshot().await?;
        let items = snapshot.items();
        let hits = filter_by_search(&snapshot.suggestions, &items, query);
        Ok(resolve_outfits(&hits, &items))
    }

    /// Swipe deck over the live outfits, best first unless a shuffle seed is given.
    pub async fn swipe_session(
        &self,
        seed: Option<u64>,
    ) -> CommandResult<SwipeSession<ResolvedOutfit>> {
        let snapshot = self.snapshot().await?;
        let deck = resolve_outfits(&snapshot.suggestions, &snapshot.items());
        Ok(match seed {
            Some(seed) => SwipeSession::shuffled(deck, seed),
            None => SwipeSession::new(deck),
        })
    }
}

#[cfg(test)]
#[path = "tests/closet_tests.rs"]
mod tests;
