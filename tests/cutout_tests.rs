// Host-side tests for the background cutout.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
#[path = "../src/core/mod.rs"]
mod core;

use crate::core::{
    cutout_data_url, cutout_image, cutout_rgba, decode_data_url, edge_alpha, encode_data_url,
    encode_png, CutoutError, DataUrlError,
};
use image::{Rgba, RgbaImage};

fn opaque(r: u8, g: u8, b: u8) -> Rgba<u8> {
    Rgba([r, g, b, 255])
}

#[test]
fn edge_alpha_ramps_from_half_threshold() {
    assert_eq!(edge_alpha(0.0), 0);
    assert_eq!(edge_alpha(22.5), 0);
    assert_eq!(edge_alpha(36.0), 30);
    assert_eq!(edge_alpha(44.9), 50);
}

#[test]
fn white_image_becomes_fully_transparent() {
    let mut img = RgbaImage::from_pixel(4, 3, opaque(255, 255, 255));
    cutout_rgba(&mut img);
    assert!(img.pixels().all(|p| p[3] == 0));
}

#[test]
fn uniform_colour_matches_its_own_corner() {
    let mut img = RgbaImage::from_pixel(5, 5, opaque(10, 120, 200));
    cutout_rgba(&mut img);
    assert!(img.pixels().all(|p| p[3] == 0));
}

#[test]
fn colours_far_from_the_corners_keep_their_alpha() {
    let mut img = RgbaImage::from_pixel(3, 3, opaque(200, 0, 0));
    img.put_pixel(1, 1, opaque(0, 0, 255));
    img.put_pixel(1, 2, Rgba([0, 200, 0, 77]));
    cutout_rgba(&mut img);
    assert_eq!(img.get_pixel(1, 1)[3], 255);
    assert_eq!(img.get_pixel(1, 2)[3], 77);
    assert_eq!(img.get_pixel(0, 0)[3], 0);
}

#[test]
fn near_white_needs_every_channel_above_the_level() {
    let mut img = RgbaImage::from_pixel(3, 2, opaque(0, 0, 0));
    img.put_pixel(0, 1, opaque(236, 250, 240));
    img.put_pixel(1, 1, opaque(235, 250, 250));
    cutout_rgba(&mut img);
    assert_eq!(img.get_pixel(0, 1)[3], 0);
    assert_eq!(img.get_pixel(1, 1)[3], 255);
}

#[test]
fn left_corner_takes_priority_over_right() {
    // left sample (100,100,100), right sample (140,100,100)
    let mut img = RgbaImage::new(3, 1);
    img.put_pixel(0, 0, opaque(100, 100, 100));
    img.put_pixel(1, 0, opaque(130, 100, 100));
    img.put_pixel(2, 0, opaque(140, 100, 100));
    cutout_rgba(&mut img);
    // distance 30 to the left sample wins over distance 10 to the right one
    assert_eq!(img.get_pixel(1, 0)[3], 17);
    // the right corner itself is 40 away from the left sample
    assert_eq!(img.get_pixel(2, 0)[3], 39);
    assert_eq!(img.get_pixel(0, 0)[3], 0);
}

#[test]
fn undecodable_bytes_are_a_decode_error() {
    let err = cutout_image(b"definitely not an image").unwrap_err();
    assert!(matches!(err, CutoutError::Decode(_)), "{err:?}");
}

#[test]
fn cutout_image_returns_png() {
    let mut img = RgbaImage::from_pixel(4, 4, opaque(255, 255, 255));
    img.put_pixel(2, 2, opaque(0, 0, 0));
    let png = encode_png(&img).unwrap();
    let out = cutout_image(&png).unwrap();
    let decoded = image::load_from_memory(&out).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (4, 4));
    assert_eq!(decoded.get_pixel(0, 0)[3], 0);
    assert_eq!(decoded.get_pixel(2, 2)[3], 255);
}

#[test]
fn data_url_in_png_data_url_out() {
    let img = RgbaImage::from_pixel(2, 2, opaque(40, 80, 160));
    let url = encode_data_url("image/png", &encode_png(&img).unwrap());
    let out = cutout_data_url(&url).unwrap();
    assert!(out.starts_with("data:image/png;base64,"));
    let (mime, bytes) = decode_data_url(&out).unwrap();
    assert_eq!(mime, "image/png");
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert!(decoded.pixels().all(|p| p[3] == 0));
}

#[test]
fn non_data_url_is_rejected() {
    let err = cutout_data_url("blob:https://example.test/1234").unwrap_err();
    assert!(matches!(
        err,
        CutoutError::DataUrl(DataUrlError::MissingScheme)
    ));
}
