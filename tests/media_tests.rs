// Host-side tests for media records, ids and data URLs.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
#[path = "../src/core/mod.rs"]
mod core;

use crate::core::{
    data_url_payload, decode_data_url, encode_data_url, new_item_id, DataUrlError, IngestedFile,
    MediaKind, MediaSource,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

#[test]
fn mime_types_classify_media() {
    assert_eq!(MediaKind::from_mime("video/mp4"), MediaKind::Video);
    assert_eq!(MediaKind::from_mime("VIDEO/webm"), MediaKind::Video);
    assert_eq!(MediaKind::from_mime("image/png"), MediaKind::Image);
    assert_eq!(MediaKind::from_mime(""), MediaKind::Image);
    assert_eq!(MediaKind::from_mime("application/pdf"), MediaKind::Image);
}

#[test]
fn ids_are_short_base36_strings() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut seen = HashSet::new();
    for _ in 0..500 {
        let id = new_item_id(&mut rng);
        assert_eq!(id.len(), 9);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        seen.insert(id);
    }
    assert_eq!(seen.len(), 500);
}

#[test]
fn ids_follow_the_rng() {
    let a = new_item_id(&mut StdRng::seed_from_u64(42));
    let b = new_item_id(&mut StdRng::seed_from_u64(42));
    assert_eq!(a, b);
}

#[test]
fn data_urls_carry_type_and_bytes() {
    let url = encode_data_url("image/jpeg", &[0xff, 0xd8, 0x00, 0x01]);
    assert!(url.starts_with("data:image/jpeg;base64,"));
    let (mime, bytes) = decode_data_url(&url).unwrap();
    assert_eq!(mime, "image/jpeg");
    assert_eq!(bytes, vec![0xff, 0xd8, 0x00, 0x01]);
    assert_eq!(data_url_payload(&url), "/9gAAQ==");
}

#[test]
fn untyped_bytes_get_a_generic_type() {
    let url = encode_data_url("", b"abc");
    assert_eq!(url, "data:application/octet-stream;base64,YWJj");
}

#[test]
fn malformed_data_urls_are_reported() {
    assert_eq!(
        decode_data_url("blob:abc").unwrap_err(),
        DataUrlError::MissingScheme
    );
    assert_eq!(
        decode_data_url("data:image/png;base64").unwrap_err(),
        DataUrlError::MissingPayload
    );
    assert_eq!(
        decode_data_url("data:text/plain,hello").unwrap_err(),
        DataUrlError::NotBase64
    );
    assert!(matches!(
        decode_data_url("data:image/png;base64,@@@"),
        Err(DataUrlError::Base64(_))
    ));
}

#[test]
fn bare_payload_passes_through() {
    assert_eq!(data_url_payload("QUJD"), "QUJD");
    assert_eq!(data_url_payload("data:image/jpeg;base64,QUJD"), "QUJD");
}

#[test]
fn only_object_urls_need_release() {
    assert!(MediaSource::ObjectUrl("blob:x".into()).needs_release());
    assert!(!MediaSource::DataUrl("data:image/png;base64,".into()).needs_release());
    assert_eq!(MediaSource::ObjectUrl("blob:x".into()).as_str(), "blob:x");
}

#[test]
fn ingested_file_kind_follows_mime() {
    let file = IngestedFile {
        name: "photo.heic".into(),
        mime: String::new(),
        source: MediaSource::ObjectUrl("blob:p".into()),
    };
    assert_eq!(file.kind(), MediaKind::Image);
}
