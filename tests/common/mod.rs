#![allow(dead_code)]

use base64::Engine;
use closet_fusion_lib::AppState;
use image::{ImageBuffer, ImageFormat, Rgba};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::io::Cursor;
use std::sync::Once;

static LOGGER: Once = Once::new();

pub struct TestContext {
    pub pool: Pool<Sqlite>,
    pub app: AppState,
}

/// Fresh closet app over a migrated in-memory database.
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

    let app = AppState::from_pool(pool.clone()).await;
    TestContext { pool, app }
}

/// 8x8 solid-color PNG as a `data:` URL.
pub fn solid_png_data_url(rgb: [u8; 3]) -> String {
    let img = ImageBuffer::from_pixel(8, 8, Rgba([rgb[0], rgb[1], rgb[2], 255]));
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png)
        .expect("encode fixture png");
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes.into_inner())
    )
}
