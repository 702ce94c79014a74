//! Wardrobe-aware styling assistant.
//!
//! Builds a text summary of the closet, sends it with the user's question to a
//! [`ChatProvider`], and decorates the reply with the items and outfits it
//! mentions. Provider failures never reach the user as errors.

pub mod context;
pub mod mentions;
pub mod prompt;
pub mod provider;

pub use context::{build_wardrobe_context, most_common, WardrobeStats};
pub use mentions::{identify_clothing_mentions, identify_outfit_reference, related_outfits};
pub use prompt::build_prompt;
pub use provider::{ChatProvider, GenerationOptions, HttpChatProvider};

use crate::database::models::ClothingItem;
use crate::services::closet::ClosetSnapshot;
use crate::services::config::ChatConfig;
use crate::services::ranking::{resolve_outfits, ResolvedOutfit};
use crate::types::errors::{ClosetError, CommandResult};
use serde::{Deserialize, Serialize};

pub const APOLOGY_REPLY: &str = "I'm sorry, I encountered an error while processing your request. \
Please check your internet connection and try again.";
pub const EMPTY_REPLY: &str = "I'm sorry, I couldn't generate a response. Please try again.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub content: String,
    pub clothing_mentions: Vec<ClothingItem>,
    pub outfits: Vec<ResolvedOutfit>,
    pub referenced_outfit: Option<ResolvedOutfit>,
    /// The provider failed and `content` is the stock apology.
    pub degraded: bool,
}

impl ChatReply {
    fn apology() -> Self {
        Self {
            content: APOLOGY_REPLY.to_string(),
            clothing_mentions: Vec::new(),
            outfits: Vec::new(),
            referenced_outfit: None,
            degraded: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Ok,
    Disabled,
    Error,
}

pub struct ChatAssistant<P> {
    provider: P,
    config: ChatConfig,
}

impl<P: ChatProvider> ChatAssistant<P> {
    pub fn new(provider: P, config: ChatConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn prompt_for(&self, snapshot: &ClosetSnapshot, query: &str) -> String {
        let context = build_wardrobe_context(snapshot, self.config.context_suggestion_limit);
        build_prompt(&context, query)
    }

    /// Answer `query` against the closet. Only an empty query is an error.
    pub async fn ask(&self, snapshot: &ClosetSnapshot, query: &str) -> CommandResult<ChatReply> {
        if query.trim().is_empty() {
            return Err(ClosetError::Validation("message is empty".into()));
        }
        if !self.config.enabled {
            return Err(ClosetError::Chat("assistant is disabled".into()));
        }

        let prompt = self.prompt_for(snapshot, query);
        let options = GenerationOptions::from(&self.config);

        let content = match self.provider.generate(&prompt, options).await {
            Ok(text) if text.trim().is_empty() => EMPTY_REPLY.to_string(),
            Ok(text) => text,
            Err(e) => {
                log::warn!("Chat provider failed: {e}");
                return Ok(ChatReply::apology());
            }
        };

        let items = snapshot.items();
        let outfits = resolve_outfits(&snapshot.suggestions, &items);

        Ok(ChatReply {
            clothing_mentions: identify_clothing_mentions(&content, &items),
            outfits: related_outfits(&content, &outfits),
            referenced_outfit: identify_outfit_reference(&content, &outfits),
            content,
            degraded: false,
        })
    }

    pub async fn check_connection(&self) -> ConnectionStatus {
        if !self.config.enabled {
            return ConnectionStatus::Disabled;
        }
        match self.provider.ping().await {
            Ok(()) => ConnectionStatus::Ok,
            Err(e) => {
                log::warn!("Chat connection check failed: {e}");
                ConnectionStatus::Error
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/chat_tests.rs"]
mod tests;
