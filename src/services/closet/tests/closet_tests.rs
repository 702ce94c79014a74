use super::*;
use crate::database::models::{Fabric, Style};
use crate::test_utils::{bottom, item, suggestion, top};
use std::time::Duration;

struct FixedTagger(TagSet);

impl AttributeTagger for FixedTagger {
    fn tag(&self, _image_url: &str) -> Result<TagSet, ClosetError> {
        Ok(self.0.clone())
    }
}

struct FailingTagger;

impl AttributeTagger for FailingTagger {
    fn tag(&self, _image_url: &str) -> Result<TagSet, ClosetError> {
        Err(ClosetError::Tagging("model offline".into()))
    }
}

fn service_with(tagger: Arc<dyn AttributeTagger>) -> ClosetService<MemoryClosetStore> {
    ClosetService::new(MemoryClosetStore::new(), tagger, MatcherConfig::default())
}

fn service() -> ClosetService<MemoryClosetStore> {
    service_with(Arc::new(FixedTagger(TagSet {
        color: "#1560bd".into(),
        style: Style::Streetwear,
        fabric: Fabric::Denim,
    })))
}

fn upload(item_type: ClothingType, name: Option<&str>) -> NewItemInput {
    NewItemInput {
        item_type,
        image_url: "data:image/png;base64,AAAA".into(),
        name: name.map(str::to_string),
    }
}

async fn seed(service: &ClosetService<MemoryClosetStore>, items: &[ClothingItem]) {
    for item in items {
        service.store().insert_item(item).await.unwrap();
    }
}

#[tokio::test]
async fn test_add_item_applies_tags() {
    let service = service();
    let added = service
        .add_item(upload(ClothingType::Bottom, Some("  Wide jeans ")))
        .await
        .unwrap();

    assert_eq!(added.item_type, ClothingType::Bottom);
    assert_eq!(added.color, "#1560bd");
    assert_eq!(added.style, Style::Streetwear);
    assert_eq!(added.fabric, Fabric::Denim);
    assert_eq!(added.name.as_deref(), Some("Wide jeans"));
    assert_eq!(service.get_item(&added.id).await.unwrap(), added);
}

#[tokio::test]
async fn test_add_item_falls_back_to_neutral_tags() {
    let service = service_with(Arc::new(FailingTagger));
    let added = service
        .add_item(upload(ClothingType::Top, Some("   ")))
        .await
        .unwrap();

    let neutral = TagSet::neutral();
    assert_eq!(added.color, neutral.color);
    assert_eq!(added.style, neutral.style);
    assert_eq!(added.fabric, neutral.fabric);
    assert!(added.name.is_none());
    assert_eq!(added.display_name(), "#808080 casual");
}

#[tokio::test]
async fn test_add_item_requires_image() {
    let service = service();
    let mut input = upload(ClothingType::Top, None);
    input.image_url = "  ".into();
    assert!(matches!(
        service.add_item(input).await,
        Err(ClosetError::Validation(_))
    ));
}

#[tokio::test]
async fn test_add_item_enforces_capacity_per_type() {
    let service = service();
    let tops: Vec<ClothingItem> = (0..MAX_ITEMS_PER_TYPE)
        .map(|i| top(&format!("t{i}"), "red", Style::Casual, Fabric::Cotton))
        .collect();
    seed(&service, &tops).await;

    let err = service
        .add_item(upload(ClothingType::Top, None))
        .await
        .unwrap_err();
    assert!(matches!(err, ClosetError::Validation(_)), "got {err:?}");

    // The other slot is unaffected.
    assert!(service.add_item(upload(ClothingType::Bottom, None)).await.is_ok());
}

#[tokio::test]
async fn test_regenerate_prefers_style_match() {
    let service = service();
    seed(
        &service,
        &[
            top("t1", "white", Style::Casual, Fabric::Cotton),
            bottom("b1", "navy", Style::Casual, Fabric::Denim),
            bottom("b2", "navy", Style::Formal, Fabric::Denim),
        ],
    )
    .await;

    let generated = service.regenerate_suggestions().await.unwrap();
    assert_eq!(generated.len(), 2);

    let stored = service.suggestions().await.unwrap();
    assert_eq!(stored, generated);

    let b1 = stored.iter().find(|s| s.bottom_id == "b1").unwrap();
    let b2 = stored.iter().find(|s| s.bottom_id == "b2").unwrap();
    assert!(b1.score >= b2.score);
    assert_eq!(stored[0].bottom_id, "b1");
}

#[tokio::test]
async fn test_regenerate_is_stable() {
    let service = service();
    seed(
        &service,
        &[
            top("t1", "white", Style::Casual, Fabric::Cotton),
            top("t2", "#c0392b", Style::Business, Fabric::Silk),
            bottom("b1", "navy", Style::Casual, Fabric::Denim),
        ],
    )
    .await;

    let first = service.regenerate_suggestions().await.unwrap();
    let second = service.regenerate_suggestions().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(service.suggestions().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_delete_item_cascades_and_reports_missing() {
    let service = service();
    seed(
        &service,
        &[
            top("t1", "white", Style::Casual, Fabric::Cotton),
            top("t2", "black", Style::Formal, Fabric::Wool),
            bottom("b1", "navy", Style::Casual, Fabric::Denim),
        ],
    )
    .await;
    service.regenerate_suggestions().await.unwrap();

    service.delete_item("t1").await.unwrap();
    let remaining = service.suggestions().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert!(remaining.iter().all(|s| s.top_id != "t1"));
    assert!(service.store().load_all().await.iter().all(|s| !s.references("t1")));

    assert!(matches!(
        service.delete_item("t1").await,
        Err(ClosetError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_reads_exclude_dangling_suggestions() {
    let service = service();
    seed(
        &service,
        &[
            top("t1", "white", Style::Casual, Fabric::Cotton),
            bottom("b1", "navy", Style::Casual, Fabric::Denim),
        ],
    )
    .await;
    service.save_suggestion(&suggestion("live", "t1", "b1", 0.6)).await.unwrap();
    service.save_suggestion(&suggestion("ghost", "t9", "b1", 0.99)).await.unwrap();

    let podium = service.podium().await.unwrap();
    assert_eq!(podium.len(), 1);
    assert_eq!(podium[0].suggestion.id, "live");
    assert_eq!(podium[0].top.id, "t1");
    assert_eq!(podium[0].bottom.id, "b1");
}

#[tokio::test]
async fn test_podium_is_capped_and_ranked() {
    let service = service();
    seed(
        &service,
        &[
            top("t1", "white", Style::Casual, Fabric::Cotton),
            top("t2", "black", Style::Formal, Fabric::Wool),
            bottom("b1", "navy", Style::Casual, Fabric::Denim),
            bottom("b2", "beige", Style::Business, Fabric::Linen),
        ],
    )
    .await;
    service.regenerate_suggestions().await.unwrap();

    let podium = service.podium().await.unwrap();
    assert_eq!(podium.len(), 3);
    assert!(podium
        .windows(2)
        .all(|w| w[0].suggestion.score >= w[1].suggestion.score));
}

#[tokio::test]
async fn test_search_matches_name_style_and_fabric() {
    let service = service();
    let mut named = item("t1", ClothingType::Top, "white", Style::Casual, Fabric::Cotton, 0);
    named.name = Some("Linen-look tee".into());
    seed(
        &service,
        &[
            named,
            top("t2", "black", Style::Formal, Fabric::Silk),
            bottom("b1", "navy", Style::Casual, Fabric::Denim),
        ],
    )
    .await;
    service.regenerate_suggestions().await.unwrap();

    let by_name = service.search("LINEN").await.unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].top.id, "t1");

    let by_fabric = service.search("silk").await.unwrap();
    assert_eq!(by_fabric.len(), 1);
    assert_eq!(by_fabric[0].top.id, "t2");

    assert_eq!(service.search("denim").await.unwrap().len(), 2);
    assert!(service.search("velvet").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_items_filters_by_text_and_type() {
    let service = service();
    let mut named = item("t1", ClothingType::Top, "white", Style::Casual, Fabric::Cotton, 0);
    named.name = Some("Linen-look tee".into());
    seed(
        &service,
        &[
            named,
            top("t2", "black", Style::Formal, Fabric::Silk),
            bottom("b1", "navy", Style::Casual, Fabric::Denim),
            bottom("b2", "beige", Style::Business, Fabric::Linen),
        ],
    )
    .await;

    let mut linen: Vec<String> = service
        .search_items("LINEN", None)
        .await
        .unwrap()
        .into_iter()
        .map(|item| item.id)
        .collect();
    linen.sort();
    assert_eq!(linen, vec!["b2", "t1"]);

    let linen_tops = service
        .search_items("linen", Some(ClothingType::Top))
        .await
        .unwrap();
    assert_eq!(linen_tops.len(), 1);
    assert_eq!(linen_tops[0].id, "t1");

    let casual_bottoms = service
        .search_items("Casual", Some(ClothingType::Bottom))
        .await
        .unwrap();
    assert_eq!(casual_bottoms.len(), 1);
    assert_eq!(casual_bottoms[0].id, "b1");

    assert_eq!(
        service
            .search_items("", Some(ClothingType::Top))
            .await
            .unwrap()
            .len(),
        2
    );
    assert!(service.search_items("velvet", None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_set_config_applies_to_next_regeneration() {
    let service = service();
    seed(
        &service,
        &[
            top("t1", "white", Style::Casual, Fabric::Cotton),
            top("t2", "black", Style::Formal, Fabric::Wool),
            bottom("b1", "navy", Style::Casual, Fabric::Denim),
            bottom("b2", "beige", Style::Business, Fabric::Linen),
        ],
    )
    .await;

    service.set_config(MatcherConfig {
        podium_size: 1,
        max_suggestions: 2,
        ..MatcherConfig::default()
    });

    assert_eq!(service.regenerate_suggestions().await.unwrap().len(), 2);
    assert_eq!(service.podium().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_set_tagger_applies_to_next_upload() {
    let service = service();
    service.set_tagger(Arc::new(FailingTagger));

    let added = service
        .add_item(upload(ClothingType::Top, None))
        .await
        .unwrap();
    assert_eq!(added.color, TagSet::neutral().color);
}

#[tokio::test]
async fn test_swipe_session_over_live_outfits() {
    let service = service();
    seed(
        &service,
        &[
            top("t1", "white", Style::Casual, Fabric::Cotton),
            bottom("b1", "navy", Style::Casual, Fabric::Denim),
            bottom("b2", "black", Style::Formal, Fabric::Wool),
        ],
    )
    .await;
    service.regenerate_suggestions().await.unwrap();

    let mut session = service.swipe_session(None).await.unwrap();
    assert_eq!(session.len(), 2);
    let best = session.current().unwrap().suggestion.id.clone();
    session.accept();
    session.reject();
    assert!(session.is_finished());
    assert_eq!(session.accepted().len(), 1);
    assert_eq!(session.accepted()[0].suggestion.id, best);

    let shuffled = service.swipe_session(Some(7)).await.unwrap();
    assert_eq!(shuffled.len(), 2);
}

#[tokio::test]
async fn test_save_suggestion_rejects_out_of_range_score() {
    let service = service();
    let err = service
        .save_suggestion(&suggestion("s1", "t1", "b1", 1.5))
        .await
        .unwrap_err();
    assert!(matches!(err, ClosetError::Validation(_)));
    assert!(service.store().load_all().await.is_empty());
}

#[tokio::test]
async fn test_writes_report_busy_while_lock_is_held() {
    let lock = OperationLock::with_timeout(Duration::from_millis(20));
    let service = service().with_lock(lock.clone());
    seed(&service, &[top("t1", "white", Style::Casual, Fabric::Cotton)]).await;

    let _held = lock.acquire().await.unwrap();
    assert!(matches!(
        service.delete_item("t1").await,
        Err(ClosetError::Busy)
    ));
    // Reads are not serialized.
    assert_eq!(service.list_items(None).await.unwrap().len(), 1);
}
