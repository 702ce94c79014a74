pub mod models;

pub use models::*;

use crate::database::settings_repo;
use crate::types::errors::ClosetError;
use serde::de::DeserializeOwned;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::Mutex;

const MATCHER_KEY: &str = "matcher";
const CHAT_KEY: &str = "chat";
const TAGGER_KEY: &str = "tagger";

pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_CHAT_BASE_URL: &str = "CLOSET_CHAT_BASE_URL";
pub const ENV_CHAT_MODEL: &str = "CLOSET_CHAT_MODEL";

pub struct ConfigService {
    pool: SqlitePool,
    settings: Mutex<AppSettings>,
}

impl ConfigService {
    /// Load persisted settings and apply `.env` / process overrides.
    pub async fn load(pool: SqlitePool) -> Self {
        let mut settings = Self::load_from_db(&pool).await;

        let _ = dotenvy::dotenv(); // Try to load .env, ignore if missing
        apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

        Self {
            pool,
            settings: Mutex::new(settings),
        }
    }

    /// Persisted settings only, no environment lookups.
    pub async fn load_without_env(pool: SqlitePool) -> Self {
        let settings = Self::load_from_db(&pool).await;
        Self {
            pool,
            settings: Mutex::new(settings),
        }
    }

    async fn load_from_db(pool: &SqlitePool) -> AppSettings {
        let kv = match settings_repo::all_sections(pool).await {
            Ok(m) => m,
            Err(e) => {
                log::error!("Failed to load settings from DB: {e}");
                return AppSettings::default();
            }
        };

        AppSettings {
            matcher: read_section(&kv, MATCHER_KEY),
            chat: read_section(&kv, CHAT_KEY),
            tagger: read_section(&kv, TAGGER_KEY),
        }
    }

    pub(crate) async fn write_settings_to_db(
        pool: &SqlitePool,
        settings: &AppSettings,
    ) -> Result<(), ClosetError> {
        let sections = [
            (MATCHER_KEY, serde_json::to_string(&settings.matcher)),
            (CHAT_KEY, serde_json::to_string(&settings.chat)),
            (TAGGER_KEY, serde_json::to_string(&settings.tagger)),
        ];

        let mut tx = pool.begin().await?;
        for (key, json) in sections {
            let json = json.map_err(|e| ClosetError::Config(format!("{key}: {e}")))?;
            settings_repo::write_section(&mut *tx, key, &json).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    pub fn get_settings(&self) -> AppSettings {
        self.settings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub async fn save_settings(&self, new_settings: AppSettings) -> Result<(), ClosetError> {
        validate(&new_settings)?;
        Self::write_settings_to_db(&self.pool, &new_settings).await?;

        *self
            .settings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = new_settings;
        Ok(())
    }

    pub async fn set_chat_api_key(&self, api_key: Option<String>) -> Result<(), ClosetError> {
        let mut settings = self.get_settings();
        settings.chat.api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        self.save_settings(settings).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

// ── Helpers ──────────────────────────────────────────

fn read_section<T: DeserializeOwned + Default>(kv: &HashMap<String, String>, key: &str) -> T {
    match kv.get(key) {
        None => T::default(),
        Some(raw) => serde_json::from_str(raw).unwrap_or_else(|e| {
            log::warn!("Malformed '{key}' settings, using defaults: {e}");
            T::default()
        }),
    }
}

fn validate(settings: &AppSettings) -> Result<(), ClosetError> {
    let weights = &settings.matcher.weights;
    let all = [weights.color, weights.style, weights.fabric];
    if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(ClosetError::Config(
            "match weights must be finite and non-negative".into(),
        ));
    }
    if settings.matcher.podium_size == 0 {
        return Err(ClosetError::Config("podium size must be at least 1".into()));
    }
    if !(0.0..=2.0).contains(&settings.chat.temperature) {
        return Err(ClosetError::Config(format!(
            "temperature {} outside [0, 2]",
            settings.chat.temperature
        )));
    }
    if settings.chat.timeout_secs == 0 {
        return Err(ClosetError::Config("chat timeout must be non-zero".into()));
    }
    Ok(())
}

/// Overlay chat settings from the environment. Empty values are ignored.
pub fn apply_env_overrides<F>(settings: &mut AppSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    if let Some(key) = read(ENV_API_KEY) {
        settings.chat.api_key = Some(key);
    }
    if let Some(url) = read(ENV_CHAT_BASE_URL) {
        settings.chat.base_url = url;
    }
    if let Some(model) = read(ENV_CHAT_MODEL) {
        settings.chat.model = model;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
