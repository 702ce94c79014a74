//! Process-wide state: database pool, settings and the closet service.

use crate::database::{self, settings_repo};
use crate::services::chat::{ChatAssistant, HttpChatProvider};
use crate::services::closet::{ClosetService, SqliteClosetStore};
use crate::services::config::{AppSettings, ConfigService};
use crate::services::tagger::HeuristicTagger;
use crate::types::errors::{ClosetError, CommandResult};
use sqlx::SqlitePool;
use std::path::Path;
use std::sync::Arc;

pub const DB_FILE_NAME: &str = "closet.db";

pub struct AppState {
    pool: SqlitePool,
    config: ConfigService,
    closet: ClosetService<SqliteClosetStore>,
}

impl AppState {
    /// Open (or create) `closet.db` under `data_dir` and load settings.
    pub async fn open(data_dir: &Path) -> CommandResult<Self> {
        let pool = database::open_pool(&data_dir.join(DB_FILE_NAME)).await?;
        let config = ConfigService::load(pool.clone()).await;
        Ok(Self::assemble(pool, config))
    }

    /// Build on an already-migrated pool, ignoring the environment.
    pub async fn from_pool(pool: SqlitePool) -> Self {
        let config = ConfigService::load_without_env(pool.clone()).await;
        Self::assemble(pool, config)
    }

    fn assemble(pool: SqlitePool, config: ConfigService) -> Self {
        let settings = config.get_settings();
        let closet = ClosetService::new(
            SqliteClosetStore::new(pool.clone()),
            Arc::new(HeuristicTagger::new(settings.tagger.seed)),
            settings.matcher,
        );
        log::info!("Closet state ready");
        Self {
            pool,
            config,
            closet,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn config(&self) -> &ConfigService {
        &self.config
    }

    pub fn closet(&self) -> &ClosetService<SqliteClosetStore> {
        &self.closet
    }

    /// Validate, persist and apply settings. Matcher and tagger changes take
    /// effect on the next regeneration or upload.
    pub async fn save_settings(&self, settings: AppSettings) -> CommandResult<()> {
        self.config.save_settings(settings).await?;
        self.apply_settings();
        Ok(())
    }

    fn apply_settings(&self) {
        let settings = self.config.get_settings();
        self.closet
            .set_tagger(Arc::new(HeuristicTagger::new(settings.tagger.seed)));
        self.closet.set_config(settings.matcher);
        log::info!("Applied matcher and tagger settings");
    }

    /// Assistant over the configured HTTP provider. `Config` error when no key is set.
    pub fn chat_assistant(&self) -> CommandResult<ChatAssistant<HttpChatProvider>> {
        let chat = self.config.get_settings().chat;
        if !chat.enabled {
            return Err(ClosetError::Chat("assistant is disabled".into()));
        }
        let provider = HttpChatProvider::from_config(&chat)?;
        Ok(ChatAssistant::new(provider, chat))
    }

    /// Wipe items, suggestions and settings.
    pub async fn reset_all_data(&self) -> CommandResult<()> {
        settings_repo::reset_all_data(&self.pool).await?;
        log::warn!("All closet data was reset");
        Ok(())
    }
}
