// Host-side tests for the image-description request and reply handling.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
#[path = "../src/core/mod.rs"]
mod core;
mod describe {
    include!("../src/describe.rs");
}

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use describe::*;
use image::{Rgba, RgbaImage};
use serde_json::json;

fn reply_with_text(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" }
        }]
    })
}

#[test]
fn parses_structured_reply() {
    let reply = reply_with_text(r#"{"suggestion":"A red mug","isPerson":false}"#);
    let d = parse_reply(&reply).unwrap();
    assert_eq!(d.suggestion, "A red mug");
    assert!(!d.is_person);

    let reply = reply_with_text(r#"{"suggestion":"Woman waving","isPerson":true}"#);
    assert!(parse_reply(&reply).unwrap().is_person);
}

#[test]
fn missing_fields_take_defaults() {
    let d = parse_reply(&reply_with_text("{}")).unwrap();
    assert_eq!(d.suggestion, "Object identified");
    assert!(!d.is_person);

    let d = parse_reply(&reply_with_text(r#"{"suggestion":"","isPerson":true}"#)).unwrap();
    assert_eq!(d.suggestion, "Object identified");
    assert!(d.is_person);
}

#[test]
fn reply_without_text_reads_as_empty_object() {
    let d = parse_reply(&json!({ "candidates": [] })).unwrap();
    assert_eq!(d.suggestion, "Object identified");
    assert!(!d.is_person);
}

#[test]
fn garbage_text_is_rejected() {
    assert!(parse_reply(&reply_with_text("I think it's a cat")).is_none());
    assert!(parse_reply(&reply_with_text(r#"{"isPerson":"maybe"}"#)).is_none());
}

#[test]
fn fallback_reports_the_error() {
    let d = Description::fallback();
    assert_eq!(d.suggestion, "Error processing");
    assert!(!d.is_person);
}

#[test]
fn request_carries_image_and_schema() {
    let body = request_body("QUJD");
    let parts = &body["contents"][0]["parts"];
    assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
    assert_eq!(parts[0]["inlineData"]["data"], "QUJD");
    assert!(parts[1]["text"].as_str().unwrap().contains("person"));
    let config = &body["generationConfig"];
    assert_eq!(config["responseMimeType"], "application/json");
    assert_eq!(
        config["responseSchema"]["required"],
        json!(["suggestion", "isPerson"])
    );
}

#[test]
fn jpeg_payload_is_downscaled_base64() {
    let img = RgbaImage::from_pixel(1000, 500, Rgba([30, 60, 90, 255]));
    let payload = jpeg_payload(&img, 768, 80).unwrap();
    let bytes = STANDARD.decode(payload).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (768, 384));
}

#[test]
fn small_images_keep_their_size() {
    let img = RgbaImage::from_pixel(64, 48, Rgba([200, 10, 10, 255]));
    let bytes = STANDARD.decode(jpeg_payload(&img, 768, 80).unwrap()).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (64, 48));
}
