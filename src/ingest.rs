//! File inputs to scene items.
//!
//! With fixed placement each file is read in full and referenced through a
//! self-contained data URL. With ring placement an object URL is created up
//! front so the item appears immediately; pixels are decoded afterwards.

use crate::core::{encode_data_url, new_item_id, IngestedFile, MediaKind, MediaSource, Placement};
use crate::dom;
use crate::library::decode_pixels;
use crate::session::Session;
use anyhow::anyhow;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub const UPLOAD_INPUTS: [&str; 2] = ["upload-image", "upload-video"];
const GALLERY_INPUT: &str = "upload-gallery";
const GALLERY_LABEL: &str = "upload-gallery-label";

pub fn wire_uploads(session: &Session) {
    let gallery = session.store.borrow().placement().accepts_gallery();
    dom::set_visible(&session.document, GALLERY_LABEL, gallery);
    let inputs = UPLOAD_INPUTS
        .into_iter()
        .chain(gallery.then_some(GALLERY_INPUT));
    for id in inputs {
        let document = session.document.clone();
        let session = session.clone();
        dom::add_file_input_listener(&document, id, move |input| {
            let Some(files) = input.files() else {
                return;
            };
            log::info!("[ingest] {} file(s) from #{}", files.length(), input.id());
            for i in 0..files.length() {
                if let Some(file) = files.get(i) {
                    ingest_file(&session, file);
                }
            }
        });
    }
}

fn ingest_file(session: &Session, file: web::File) {
    let placement = session.store.borrow().placement();
    match placement {
        Placement::Fixed => {
            let session = session.clone();
            spawn_local(async move {
                if let Err(e) = ingest_inline(&session, &file).await {
                    log::error!("[ingest] {}: {:?}", file.name(), e);
                }
            });
        }
        Placement::Ring(_) => {
            if let Err(e) = ingest_by_reference(session, file) {
                log::error!("[ingest] {:?}", e);
            }
        }
    }
}

async fn read_bytes(file: &web::File) -> anyhow::Result<Vec<u8>> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| anyhow!("read failed: {:?}", e))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

async fn ingest_inline(session: &Session, file: &web::File) -> anyhow::Result<()> {
    let bytes = read_bytes(file).await?;
    let ingested = IngestedFile {
        name: file.name(),
        mime: file.type_(),
        source: MediaSource::DataUrl(encode_data_url(&file.type_(), &bytes)),
    };
    let id = new_item_id(&mut rand::thread_rng());
    add_with_media(session, &id, ingested, Some(&bytes))?;
    Ok(())
}

fn ingest_by_reference(session: &Session, file: web::File) -> anyhow::Result<()> {
    let url = web::Url::create_object_url_with_blob(&file)
        .map_err(|e| anyhow!("createObjectURL failed: {:?}", e))?;
    let ingested = IngestedFile {
        name: file.name(),
        mime: file.type_(),
        source: MediaSource::ObjectUrl(url),
    };
    let id = new_item_id(&mut rand::thread_rng());
    let kind = ingested.kind();
    if !add_with_media(session, &id, ingested, None)? {
        return Ok(());
    }

    if kind == MediaKind::Image {
        let session = session.clone();
        spawn_local(async move {
            match read_bytes(&file).await {
                Ok(bytes) => decode_into_library(&session, &id, &bytes),
                Err(e) => log::error!("[ingest] {}: {:?}", file.name(), e),
            }
        });
    }
    Ok(())
}

/// Add the item, then register its media. A rejected item never reaches the
/// library; a failed attach takes the item back out so its source is released.
fn add_with_media(
    session: &Session,
    id: &str,
    file: IngestedFile,
    bytes: Option<&[u8]>,
) -> anyhow::Result<bool> {
    let kind = file.kind();
    let source = file.source.clone();
    if !session.store.borrow_mut().add(file.into_item(id)) {
        return Ok(false);
    }
    if let Err(e) = attach_media(session, id, kind, &source, bytes) {
        session.store.borrow_mut().remove(id);
        return Err(e);
    }
    session.changed();
    Ok(true)
}

/// Register the media handle for an item. Images get decoded pixels when
/// `bytes` is available; videos get their own playing element.
fn attach_media(
    session: &Session,
    id: &str,
    kind: MediaKind,
    source: &MediaSource,
    bytes: Option<&[u8]>,
) -> anyhow::Result<()> {
    match kind {
        MediaKind::Image => {
            session.library.borrow_mut().insert_pending_image(id);
            if let Some(bytes) = bytes {
                decode_into_library(session, id, bytes);
            }
        }
        MediaKind::Video => {
            let video = create_video(&session.document, source.as_str())?;
            session.library.borrow_mut().insert_video(id, video);
        }
    }
    Ok(())
}

fn decode_into_library(session: &Session, id: &str, bytes: &[u8]) {
    match decode_pixels(bytes) {
        Ok(pixels) => {
            log::info!("[ingest] decoded {} ({}x{})", id, pixels.width(), pixels.height());
            session.library.borrow_mut().set_pixels(id, pixels);
        }
        Err(e) => log::warn!("[ingest] could not decode {}: {}", id, e),
    }
}

fn create_video(document: &web::Document, src: &str) -> anyhow::Result<web::HtmlVideoElement> {
    let video: web::HtmlVideoElement = document
        .create_element("video")
        .map_err(|e| anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow!("{:?}", e))?;
    video.set_cross_origin(Some("anonymous"));
    video.set_loop(true);
    video.set_muted(true);
    _ = video.set_attribute("playsinline", "");
    video.set_src(src);
    if let Ok(play) = video.play() {
        spawn_local(async move {
            if let Err(e) = JsFuture::from(play).await {
                log::warn!("[ingest] video autoplay blocked: {:?}", e);
            }
        });
    }
    Ok(video)
}
