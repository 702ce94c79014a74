mod common;

use closet_fusion_lib::database::models::ClothingType;
use closet_fusion_lib::services::closet::NewItemInput;
use closet_fusion_lib::AppState;

#[tokio::test]
async fn test_closet_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let (top_id, suggestion_ids) = {
        let app = AppState::open(dir.path()).await.unwrap();
        let top = app
            .closet()
            .add_item(NewItemInput {
                item_type: ClothingType::Top,
                image_url: common::solid_png_data_url([250, 250, 250]),
                name: None,
            })
            .await
            .unwrap();
        app.closet()
            .add_item(NewItemInput {
                item_type: ClothingType::Bottom,
                image_url: common::solid_png_data_url([10, 20, 90]),
                name: Some("Dark jeans".into()),
            })
            .await
            .unwrap();

        let ids: Vec<String> = app
            .closet()
            .regenerate_suggestions()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();

        let mut settings = app.config().get_settings();
        settings.matcher.podium_size = 1;
        app.save_settings(settings).await.unwrap();

        app.pool().close().await;
        (top.id, ids)
    };

    let app = AppState::open(dir.path()).await.unwrap();
    assert_eq!(app.config().get_settings().matcher.podium_size, 1);

    let items = app.closet().list_items(None).await.unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().any(|i| i.id == top_id));

    let reloaded: Vec<String> = app
        .closet()
        .suggestions()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(reloaded, suggestion_ids);
    assert_eq!(app.closet().podium().await.unwrap().len(), 1);

    // Recomputation over the same closet yields the same ids.
    let again: Vec<String> = app
        .closet()
        .regenerate_suggestions()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(again, suggestion_ids);

    app.reset_all_data().await.unwrap();
    assert!(app.closet().list_items(None).await.unwrap().is_empty());
}
