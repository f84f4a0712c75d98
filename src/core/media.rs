//! Media records: what an uploaded file turns into before it reaches the
//! store.

use super::constants::ITEM_ID_LEN;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rand::Rng;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify by declared content type: `video/*` is video, anything else
    /// (including an empty type) is treated as an image.
    pub fn from_mime(mime: &str) -> Self {
        let lower = mime.trim().to_ascii_lowercase();
        if lower.starts_with("video/") {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}

/// Where an item's bytes live. Object URLs are handles into the browser's
/// blob store and must be revoked; data URLs carry the bytes inline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaSource {
    ObjectUrl(String),
    DataUrl(String),
}

impl MediaSource {
    pub fn as_str(&self) -> &str {
        match self {
            MediaSource::ObjectUrl(u) | MediaSource::DataUrl(u) => u,
        }
    }

    /// Whether dropping this source leaks anything unless it is released.
    pub fn needs_release(&self) -> bool {
        matches!(self, MediaSource::ObjectUrl(_))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataUrlError {
    #[error("not a data url")]
    MissingScheme,
    #[error("data url has no payload separator")]
    MissingPayload,
    #[error("only base64 data urls are supported")]
    NotBase64,
    #[error("invalid base64 payload: {0}")]
    Base64(String),
}

/// Encode bytes as `data:<mime>;base64,<payload>`.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    let mime = if mime.is_empty() {
        "application/octet-stream"
    } else {
        mime
    };
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Split a base64 data URL into its MIME type and decoded bytes.
pub fn decode_data_url(url: &str) -> Result<(String, Vec<u8>), DataUrlError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or(DataUrlError::MissingScheme)?;
    let (header, payload) = rest.split_once(',').ok_or(DataUrlError::MissingPayload)?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or(DataUrlError::NotBase64)?;
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| DataUrlError::Base64(e.to_string()))?;
    Ok((mime.to_string(), bytes))
}

/// Base64 payload of a data URL, or the input unchanged when it has no
/// header.
#[inline]
pub fn data_url_payload(url: &str) -> &str {
    match url.split_once(',') {
        Some((_, payload)) if !payload.is_empty() => payload,
        _ => url,
    }
}

/// Short random id made of lowercase base-36 characters.
pub fn new_item_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    (0..ITEM_ID_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// A file that has been read far enough to be referenced by the scene.
#[derive(Clone, Debug)]
pub struct IngestedFile {
    pub name: String,
    pub mime: String,
    pub source: MediaSource,
}

impl IngestedFile {
    pub fn kind(&self) -> MediaKind {
        MediaKind::from_mime(&self.mime)
    }
}
