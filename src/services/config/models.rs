use crate::services::matcher::MatcherConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CHAT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_CHAT_MODEL: &str = "gemini-1.5-flash";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ChatConfig {
    pub enabled: bool,
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub timeout_secs: u64,
    /// How many saved outfits are listed in the assistant's context.
    pub context_suggestion_limit: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: None,
            base_url: DEFAULT_CHAT_BASE_URL.into(),
            model: DEFAULT_CHAT_MODEL.into(),
            temperature: 0.7,
            max_output_tokens: 800,
            timeout_secs: 30,
            context_suggestion_limit: 10,
        }
    }
}

impl ChatConfig {
    /// Enabled and holding a non-empty key.
    pub fn is_usable(&self) -> bool {
        self.enabled && self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct TaggerConfig {
    /// Seed for the style/fabric heuristic. Same seed and image give the same tags.
    pub seed: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppSettings {
    pub matcher: MatcherConfig,
    pub chat: ChatConfig,
    pub tagger: TaggerConfig,
}
