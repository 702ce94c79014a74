use super::*;
use crate::test_utils::top;

#[test]
fn test_vocabulary_parses_case_insensitively() {
    assert_eq!("TOP".parse::<ClothingType>(), Ok(ClothingType::Top));
    assert_eq!(" bottom ".parse::<ClothingType>(), Ok(ClothingType::Bottom));
    assert!("shoe".parse::<ClothingType>().is_err());

    assert_eq!("Streetwear".parse::<Style>(), Ok(Style::Streetwear));
    assert!("grunge".parse::<Style>().is_err());
    assert_eq!("LINEN".parse::<Fabric>(), Ok(Fabric::Linen));
    assert!("tweed".parse::<Fabric>().is_err());

    for style in Style::ALL {
        assert_eq!(style.as_str().parse::<Style>(), Ok(style));
    }
    for fabric in Fabric::ALL {
        assert_eq!(fabric.as_str().parse::<Fabric>(), Ok(fabric));
    }
}

#[test]
fn test_display_name_falls_back_to_color_and_style() {
    let mut item = top("t1", "navy", Style::Formal, Fabric::Wool);
    assert_eq!(item.display_name(), "navy formal");

    item.name = Some("  ".into());
    assert_eq!(item.display_name(), "navy formal");

    item.name = Some("Interview blazer".into());
    assert_eq!(item.display_name(), "Interview blazer");
}

#[test]
fn test_item_serializes_with_frontend_field_names() {
    let item = top("t1", "#ffffff", Style::Casual, Fabric::Cotton);
    let json = serde_json::to_value(&item).unwrap();

    assert_eq!(json["type"], "top");
    assert_eq!(json["style"], "casual");
    assert!(json.get("imageUrl").is_some());
    assert!(json.get("name").is_none());
}

#[test]
fn test_row_conversion_rejects_unknown_values() {
    let row = ClothingItemRow {
        id: "t1".into(),
        item_type: "top".into(),
        image_url: "x".into(),
        color: "red".into(),
        style: "casual".into(),
        fabric: "velvet".into(),
        name: None,
        added: "2026-03-01T12:00:00.000000Z".into(),
    };
    assert!(ClothingItem::try_from(row.clone()).is_err());

    let ok = ClothingItemRow {
        fabric: "silk".into(),
        ..row.clone()
    };
    assert_eq!(ClothingItem::try_from(ok).unwrap().fabric, Fabric::Silk);

    let bad_time = ClothingItemRow {
        fabric: "silk".into(),
        added: "yesterday".into(),
        ..row
    };
    assert!(ClothingItem::try_from(bad_time).is_err());
}

#[test]
fn test_suggestion_row_score_must_be_in_unit_range() {
    let row = |score: f64| OutfitSuggestionRow {
        id: "s1".into(),
        top_id: "t1".into(),
        bottom_id: "b1".into(),
        score,
        match_reason: "r".into(),
    };

    assert!(OutfitSuggestion::try_from(row(0.0)).is_ok());
    assert!(OutfitSuggestion::try_from(row(1.0)).is_ok());
    assert!(OutfitSuggestion::try_from(row(1.01)).is_err());
    assert!(OutfitSuggestion::try_from(row(-0.1)).is_err());
    assert!(OutfitSuggestion::try_from(row(f64::NAN)).is_err());
}

#[test]
fn test_suggestion_references_either_side() {
    let suggestion = crate::test_utils::suggestion("s1", "t1", "b1", 0.5);
    assert!(suggestion.references("t1"));
    assert!(suggestion.references("b1"));
    assert!(!suggestion.references("t2"));
}
