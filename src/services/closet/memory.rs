//! In-memory closet store keyed by id.

use super::store::{ItemStore, SuggestionStore};
use crate::database::models::{ClothingItem, ClothingType, OutfitSuggestion};
use crate::services::ranking::sort_suggestions_deterministic;
use crate::types::errors::ClosetError;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct MemoryState {
    items: HashMap<String, ClothingItem>,
    suggestions: HashMap<String, OutfitSuggestion>,
}

#[derive(Default)]
pub struct MemoryClosetStore {
    state: Mutex<MemoryState>,
}

impl MemoryClosetStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ItemStore for MemoryClosetStore {
    async fn list_items(
        &self,
        item_type: Option<ClothingType>,
    ) -> Result<Vec<ClothingItem>, ClosetError> {
        let mut items: Vec<ClothingItem> = self
            .state()
            .items
            .values()
            .filter(|item| item_type.map_or(true, |kind| item.item_type == kind))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.added.cmp(&a.added).then_with(|| a.id.cmp(&b.id)));
        Ok(items)
    }

    async fn get_item(&self, id: &str) -> Result<Option<ClothingItem>, ClosetError> {
        Ok(self.state().items.get(id).cloned())
    }

    async fn count_items(&self, item_type: ClothingType) -> Result<usize, ClosetError> {
        Ok(self
            .state()
            .items
            .values()
            .filter(|item| item.item_type == item_type)
            .count())
    }

    async fn insert_item(&self, item: &ClothingItem) -> Result<(), ClosetError> {
        let mut state = self.state();
        if state.items.contains_key(&item.id) {
            return Err(ClosetError::Duplicate(format!("item {}", item.id)));
        }
        state.items.insert(item.id.clone(), item.clone());
        Ok(())
    }

    async fn delete_item(&self, id: &str) -> Result<bool, ClosetError> {
        let mut state = self.state();
        let existed = state.items.remove(id).is_some();
        state.suggestions.retain(|_, suggestion| !suggestion.references(id));
        Ok(existed)
    }
}

impl SuggestionStore for MemoryClosetStore {
    async fn persist(&self, suggestion: &OutfitSuggestion) -> Result<(), ClosetError> {
        self.state()
            .suggestions
            .insert(suggestion.id.clone(), suggestion.clone());
        Ok(())
    }

    async fn load_all(&self) -> Vec<OutfitSuggestion> {
        let mut suggestions: Vec<OutfitSuggestion> =
            self.state().suggestions.values().cloned().collect();
        sort_suggestions_deterministic(&mut suggestions);
        suggestions
    }

    async fn delete_by_item_id(&self, item_id: &str) -> Result<u64, ClosetError> {
        let mut state = self.state();
        let before = state.suggestions.len();
        state
            .suggestions
            .retain(|_, suggestion| !suggestion.references(item_id));
        Ok((before - state.suggestions.len()) as u64)
    }

    async fn replace_all(&self, suggestions: &[OutfitSuggestion]) -> Result<(), ClosetError> {
        let mut state = self.state();
        state.suggestions = suggestions
            .iter()
            .map(|suggestion| (suggestion.id.clone(), suggestion.clone()))
            .collect();
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/memory_tests.rs"]
mod tests;
