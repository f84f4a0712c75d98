//! Rear camera feed shown behind the canvas.
//!
//! The stream is owned by a [`Passthrough`] guard; dropping the guard stops
//! every track and detaches the stream from the `<video>` element.

use anyhow::anyhow;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub struct Passthrough {
    stream: web::MediaStream,
    video: web::HtmlVideoElement,
}

fn video_constraints() -> Result<JsValue, JsValue> {
    let video = js_sys::Object::new();
    js_sys::Reflect::set(&video, &"facingMode".into(), &"environment".into())?;
    Ok(video.into())
}

impl Passthrough {
    /// Request the rear camera and attach it to `video`. Fails when the user
    /// denies permission or no camera exists.
    pub async fn acquire(video: web::HtmlVideoElement) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow!("no window"))?;
        let devices = window
            .navigator()
            .media_devices()
            .map_err(|e| anyhow!("mediaDevices unavailable: {:?}", e))?;

        let constraints = web::MediaStreamConstraints::new();
        constraints.set_video(&video_constraints().map_err(|e| anyhow!("{:?}", e))?);
        constraints.set_audio(&JsValue::FALSE);

        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(|e| anyhow!("getUserMedia rejected: {:?}", e))?;
        let stream: web::MediaStream = JsFuture::from(promise)
            .await
            .map_err(|e| anyhow!("camera access denied: {:?}", e))?
            .dyn_into()
            .map_err(|e| anyhow!("unexpected stream value: {:?}", e))?;

        video.set_muted(true);
        video.set_src_object(Some(&stream));
        if let Ok(play) = video.play() {
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = JsFuture::from(play).await {
                    log::warn!("[camera] autoplay blocked: {:?}", e);
                }
            });
        }
        log::info!("[camera] passthrough started");
        Ok(Self { stream, video })
    }
}

impl Drop for Passthrough {
    fn drop(&mut self) {
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
                track.stop();
            }
        }
        self.video.set_src_object(None);
        log::info!("[camera] passthrough released");
    }
}
