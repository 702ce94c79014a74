use super::heuristic::{dominant_color, load_image_bytes};
use super::*;
use base64::Engine;
use image::{ImageBuffer, ImageFormat, Rgba};
use std::io::Cursor;

fn png_bytes(width: u32, height: u32, paint: impl Fn(u32, u32) -> Rgba<u8>) -> Vec<u8> {
    let img = ImageBuffer::from_fn(width, height, paint);
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

fn data_url(bytes: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

struct FailingTagger;

impl AttributeTagger for FailingTagger {
    fn tag(&self, _image_url: &str) -> Result<TagSet, ClosetError> {
        Err(ClosetError::Tagging("model offline".into()))
    }
}

#[test]
fn test_dominant_color_of_solid_image() {
    let bytes = png_bytes(8, 8, |_, _| Rgba([200, 30, 30, 255]));
    let color = dominant_color(&bytes).unwrap();
    assert_eq!(color.to_hex(), "#c81e1e");
}

#[test]
fn test_dominant_color_prefers_majority_and_skips_transparent() {
    let bytes = png_bytes(16, 16, |x, _| {
        if x < 12 {
            Rgba([0, 0, 255, 255])
        } else {
            Rgba([255, 0, 0, 255])
        }
    });
    let color = dominant_color(&bytes).unwrap();
    assert!(color.b > 200 && color.r < 40, "got {}", color.to_hex());

    let mostly_clear = png_bytes(16, 16, |x, y| {
        if x < 4 && y < 4 {
            Rgba([0, 160, 0, 255])
        } else {
            Rgba([255, 255, 255, 0])
        }
    });
    let color = dominant_color(&mostly_clear).unwrap();
    assert!(color.g > 120 && color.r < 40, "got {}", color.to_hex());
}

#[test]
fn test_heuristic_tagger_is_deterministic_per_seed() {
    let url = data_url(&png_bytes(8, 8, |_, _| Rgba([20, 40, 160, 255])));

    let tagger = HeuristicTagger::new(7);
    let first = tagger.tag(&url).unwrap();
    assert_eq!(tagger.tag(&url).unwrap(), first);
    assert_eq!(HeuristicTagger::new(7).tag(&url).unwrap(), first);
    assert_eq!(first.color, "#1428a0");
}

#[test]
fn test_heuristic_tagger_reads_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shirt.png");
    std::fs::write(&path, png_bytes(4, 4, |_, _| Rgba([255, 255, 255, 255]))).unwrap();

    let tags = HeuristicTagger::default()
        .tag(path.to_str().unwrap())
        .unwrap();
    assert_eq!(tags.color, "#ffffff");
}

#[test]
fn test_load_image_bytes_rejects_bad_references() {
    assert!(load_image_bytes("").is_err());
    assert!(load_image_bytes("data:image/png,plain").is_err());
    assert!(load_image_bytes("data:image/png;base64").is_err());
    assert!(load_image_bytes("data:image/png;base64,@@@").is_err());
    assert!(load_image_bytes("/definitely/not/here.png").is_err());
}

#[test]
fn test_tagger_errors_surface_as_tagging_errors() {
    let err = HeuristicTagger::new(1)
        .tag("data:image/png;base64,AAAA")
        .unwrap_err();
    assert!(matches!(err, ClosetError::Tagging(_)));
}

#[test]
fn test_tag_or_neutral_falls_back() {
    assert_eq!(tag_or_neutral(&FailingTagger, "anything"), TagSet::neutral());

    let url = data_url(&png_bytes(2, 2, |_, _| Rgba([0, 0, 0, 255])));
    let tags = tag_or_neutral(&HeuristicTagger::new(3), &url);
    assert_eq!(tags.color, "#000000");
}
