//! Colour-keyed background cutout.
//!
//! A crude heuristic, not segmentation: the two top corners are assumed to be
//! background, and pixels close to either (or near-white pixels) are made
//! transparent with a soft edge.

use super::constants::{CUTOUT_BRIGHT_LEVEL, CUTOUT_DISTANCE};
use super::media::{decode_data_url, encode_data_url, DataUrlError};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CutoutError {
    #[error("could not decode source image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("could not encode cutout: {0}")]
    Encode(#[source] image::ImageError),
    #[error(transparent)]
    DataUrl(#[from] DataUrlError),
}

#[inline]
fn rgb_distance(a: &Rgba<u8>, b: [u8; 3]) -> f32 {
    let dr = a[0] as f32 - b[0] as f32;
    let dg = a[1] as f32 - b[1] as f32;
    let db = a[2] as f32 - b[2] as f32;
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Alpha for a pixel at `distance` from a background sample; closer is more
/// transparent.
#[inline]
pub fn edge_alpha(distance: f32) -> u8 {
    ((distance / CUTOUT_DISTANCE) * 100.0 - 50.0)
        .max(0.0)
        .round()
        .min(255.0) as u8
}

/// Apply the cutout in place.
pub fn cutout_rgba(image: &mut RgbaImage) {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    let corner = |p: &Rgba<u8>| [p[0], p[1], p[2]];
    let samples = [
        corner(image.get_pixel(0, 0)),
        corner(image.get_pixel(width - 1, 0)),
    ];
    for pixel in image.pixels_mut() {
        if pixel[0] > CUTOUT_BRIGHT_LEVEL
            && pixel[1] > CUTOUT_BRIGHT_LEVEL
            && pixel[2] > CUTOUT_BRIGHT_LEVEL
        {
            pixel[3] = 0;
            continue;
        }
        for sample in samples {
            let distance = rgb_distance(pixel, sample);
            if distance < CUTOUT_DISTANCE {
                pixel[3] = edge_alpha(distance);
                break;
            }
        }
    }
}

/// Encode an RGBA buffer as PNG.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, CutoutError> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .map_err(CutoutError::Encode)?;
    Ok(out.into_inner())
}

/// Decode `bytes`, cut out the background and return PNG bytes.
pub fn cutout_image(bytes: &[u8]) -> Result<Vec<u8>, CutoutError> {
    let mut rgba = image::load_from_memory(bytes)
        .map_err(CutoutError::Decode)?
        .to_rgba8();
    cutout_rgba(&mut rgba);
    encode_png(&rgba)
}

/// Same as [`cutout_image`] for an inline data URL; returns a PNG data URL.
pub fn cutout_data_url(url: &str) -> Result<String, CutoutError> {
    let (_mime, bytes) = decode_data_url(url)?;
    let png = cutout_image(&bytes)?;
    Ok(encode_data_url("image/png", &png))
}
