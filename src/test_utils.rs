use crate::database::models::{ClothingItem, ClothingType, Fabric, OutfitSuggestion, Style};
use chrono::{TimeZone, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::sync::Once;

static LOGGER: Once = Once::new();

pub struct TestContext {
    pub pool: Pool<Sqlite>,
}

/// Migrated in-memory database. Capped at one connection because each
/// `sqlite::memory:` connection opens a separate database.
pub async fn init_test_db() -> TestContext {
    LOGGER.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("closet migrations");

    TestContext { pool }
}

/// Item fixture. `minute` orders `added` so newest-first listings are predictable.
pub fn item(
    id: &str,
    item_type: ClothingType,
    color: &str,
    style: Style,
    fabric: Fabric,
    minute: u32,
) -> ClothingItem {
    ClothingItem {
        id: id.to_string(),
        item_type,
        image_url: format!("data:image/png;base64,{id}"),
        color: color.to_string(),
        style,
        fabric,
        name: None,
        added: Utc
            .with_ymd_and_hms(2026, 3, 1, 12, minute, 0)
            .single()
            .expect("valid fixture timestamp"),
    }
}

pub fn top(id: &str, color: &str, style: Style, fabric: Fabric) -> ClothingItem {
    item(id, ClothingType::Top, color, style, fabric, 0)
}

pub fn bottom(id: &str, color: &str, style: Style, fabric: Fabric) -> ClothingItem {
    item(id, ClothingType::Bottom, color, style, fabric, 0)
}

pub fn suggestion(id: &str, top_id: &str, bottom_id: &str, score: f64) -> OutfitSuggestion {
    OutfitSuggestion {
        id: id.to_string(),
        top_id: top_id.to_string(),
        bottom_id: bottom_id.to_string(),
        score,
        match_reason: format!("fixture {id}"),
    }
}
