// Client for the external image-description model.
//
// Failures never reach the caller: any transport, status or parsing error
// yields [`Description::fallback`].

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::RgbaImage;
use serde::Deserialize;
use serde_json::{json, Value};

const MODEL: &str = "gemini-3-flash-preview";
const ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const PROMPT: &str = "Analyze this image. Is there a prominent person or object in the center? \
Provide a short description of the subject and confirm if it's a person.";

/// Compile-time API key, as with any other build-time configuration.
pub const API_KEY: Option<&str> = option_env!("GEMINI_API_KEY");

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Description {
    #[serde(default = "default_suggestion")]
    pub suggestion: String,
    #[serde(default, rename = "isPerson")]
    pub is_person: bool,
}

fn default_suggestion() -> String {
    "Object identified".to_string()
}

impl Description {
    pub fn fallback() -> Self {
        Self {
            suggestion: "Error processing".to_string(),
            is_person: false,
        }
    }
}

/// Request body for `generateContent` with a JSON response schema.
pub fn request_body(jpeg_base64: &str) -> Value {
    json!({
        "contents": [{
            "parts": [
                { "inlineData": { "mimeType": "image/jpeg", "data": jpeg_base64 } },
                { "text": PROMPT }
            ]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "suggestion": {
                        "type": "STRING",
                        "description": "A short description of the subject found in the image."
                    },
                    "isPerson": {
                        "type": "BOOLEAN",
                        "description": "Whether the subject is identified as a person."
                    }
                },
                "required": ["suggestion", "isPerson"]
            }
        }
    })
}

/// Pull the structured answer out of a `generateContent` reply. A reply
/// without text reads as an empty object; text that is not the expected
/// JSON is an error.
pub fn parse_reply(reply: &Value) -> Option<Description> {
    let text = reply
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .and_then(|parts| parts.iter().find_map(|p| p.get("text").and_then(Value::as_str)))
        .filter(|t| !t.trim().is_empty())
        .unwrap_or("{}");
    let mut parsed: Description = serde_json::from_str(text).ok()?;
    if parsed.suggestion.is_empty() {
        parsed.suggestion = default_suggestion();
    }
    Some(parsed)
}

/// Downscale and JPEG-encode pixels for upload; returns base64.
pub fn jpeg_payload(pixels: &RgbaImage, max_edge: u32, quality: u8) -> Option<String> {
    let image = image::DynamicImage::ImageRgba8(pixels.clone());
    let image = if image.width() > max_edge || image.height() > max_edge {
        image.resize(max_edge, max_edge, image::imageops::FilterType::Triangle)
    } else {
        image
    };
    let rgb = image.to_rgb8();
    let mut out = Vec::new();
    if let Err(e) = JpegEncoder::new_with_quality(&mut out, quality).encode_image(&rgb) {
        log::warn!("[describe] jpeg encode failed: {}", e);
        return None;
    }
    Some(STANDARD.encode(out))
}

async fn request(client: &reqwest::Client, api_key: &str, jpeg_base64: &str) -> anyhow::Result<Value> {
    let url = format!("{}/{}:generateContent", ENDPOINT, MODEL);
    let reply = client
        .post(url)
        .header("x-goog-api-key", api_key)
        .json(&request_body(jpeg_base64))
        .send()
        .await?
        .error_for_status()?
        .json::<Value>()
        .await?;
    Ok(reply)
}

/// Describe a JPEG (base64, with or without a data URL header).
pub async fn describe_jpeg(client: &reqwest::Client, api_key: Option<&str>, jpeg: &str) -> Description {
    let Some(api_key) = api_key.filter(|k| !k.is_empty()) else {
        log::warn!("[describe] GEMINI_API_KEY not set at build time");
        return Description::fallback();
    };
    let payload = crate::core::data_url_payload(jpeg);
    match request(client, api_key, payload).await {
        Ok(reply) => parse_reply(&reply).unwrap_or_else(|| {
            log::error!("[describe] unparsable reply");
            Description::fallback()
        }),
        Err(e) => {
            log::error!("[describe] request failed: {:?}", e);
            Description::fallback()
        }
    }
}
