//! Decoded media behind each item: pixels for images, a playing `<video>`
//! element for videos. Keyed by item id, like the displayed-transform cache.

use crate::core::ItemStore;
use fnv::FnvHashMap;
use image::RgbaImage;
use web_sys as web;

// Larger textures than this are downscaled on decode
const MAX_TEXTURE_EDGE: u32 = 4096;

pub enum MediaHandle {
    /// `pixels` is `None` until decoding finishes. `revision` changes
    /// whenever the pixels are replaced so the renderer re-uploads.
    Image {
        pixels: Option<RgbaImage>,
        revision: u32,
    },
    Video(web::HtmlVideoElement),
}

#[derive(Default)]
pub struct MediaLibrary {
    entries: FnvHashMap<String, MediaHandle>,
}

impl MediaLibrary {
    pub fn get(&self, id: &str) -> Option<&MediaHandle> {
        self.entries.get(id)
    }

    pub fn insert_pending_image(&mut self, id: &str) {
        self.entries.insert(
            id.to_string(),
            MediaHandle::Image {
                pixels: None,
                revision: 0,
            },
        );
    }

    pub fn insert_video(&mut self, id: &str, video: web::HtmlVideoElement) {
        self.entries.insert(id.to_string(), MediaHandle::Video(video));
    }

    /// Store decoded pixels. Ignored when the item is already gone.
    pub fn set_pixels(&mut self, id: &str, image: RgbaImage) {
        if let Some(MediaHandle::Image { pixels, revision }) = self.entries.get_mut(id) {
            *pixels = Some(image);
            *revision = revision.wrapping_add(1);
        }
    }

    pub fn pixels(&self, id: &str) -> Option<&RgbaImage> {
        match self.entries.get(id) {
            Some(MediaHandle::Image { pixels, .. }) => pixels.as_ref(),
            _ => None,
        }
    }

    /// Drop media for items the store no longer has.
    pub fn retain_items(&mut self, store: &ItemStore) {
        self.entries.retain(|id, handle| {
            let keep = store.get(id).is_some();
            if !keep {
                if let MediaHandle::Video(video) = handle {
                    _ = video.pause();
                    video.remove_attribute("src").ok();
                    video.load();
                }
            }
            keep
        });
    }
}

/// Decode image bytes into an RGBA buffer small enough to upload.
pub fn decode_pixels(bytes: &[u8]) -> Result<RgbaImage, image::ImageError> {
    let decoded = image::load_from_memory(bytes)?;
    let decoded = if decoded.width() > MAX_TEXTURE_EDGE || decoded.height() > MAX_TEXTURE_EDGE {
        decoded.resize(
            MAX_TEXTURE_EDGE,
            MAX_TEXTURE_EDGE,
            image::imageops::FilterType::Triangle,
        )
    } else {
        decoded
    };
    Ok(decoded.to_rgba8())
}
