use crate::commands::{apply_to_store, Command, BUTTONS};
use crate::constants::{DESCRIBE_JPEG_QUALITY, DESCRIBE_MAX_EDGE, ITEM_LIST_ID};
use crate::core::{
    cutout_data_url, cutout_rgba, decode_data_url, encode_data_url, encode_png, ItemPatch,
    MediaKind, MediaSource,
};
use crate::library::decode_pixels;
use crate::describe;
use crate::dom;
use crate::session::Session;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Everything a command may touch beyond the store.
#[derive(Clone)]
pub struct Actions {
    pub session: Session,
    pub http: reqwest::Client,
}

impl Actions {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            http: reqwest::Client::new(),
        }
    }
}

pub fn run_command(actions: &Actions, command: Command) {
    let session = &actions.session;
    let handled = apply_to_store(&mut session.store.borrow_mut(), command);
    match handled {
        Some(true) => session.changed(),
        Some(false) => {}
        None => match command {
            Command::Cutout => cutout_selected(session),
            Command::Describe => describe_selected(actions),
            Command::ToggleFullscreen => toggle_fullscreen(&session.document),
            _ => {}
        },
    }
}

pub fn wire_control_buttons(actions: &Actions) {
    for &(id, command) in BUTTONS {
        let document = actions.session.document.clone();
        let actions = actions.clone();
        dom::add_click_listener(&document, id, move || {
            run_command(&actions, command);
        });
    }
}

/// Clicking an entry in the item list selects it.
pub fn wire_item_list(session: &Session) {
    let Some(list) = session.document.get_element_by_id(ITEM_LIST_ID) else {
        log::warn!("[dom] missing #{}", ITEM_LIST_ID);
        return;
    };
    let session = session.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let id = ev
            .target()
            .and_then(|t| t.dyn_into::<web::Element>().ok())
            .and_then(|el| el.closest("[data-id]").ok().flatten())
            .and_then(|el| el.get_attribute("data-id"));
        if let Some(id) = id {
            session.store.borrow_mut().select(Some(&id));
            session.changed();
        }
    }) as Box<dyn FnMut(_)>);
    _ = list.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn selected_image(session: &Session) -> Option<String> {
    let store = session.store.borrow();
    let item = store.selected()?;
    (item.kind == MediaKind::Image).then(|| item.id.clone())
}

fn cutout_selected(session: &Session) {
    let Some(id) = selected_image(session) else {
        log::info!("[cutout] no image selected");
        return;
    };
    let Some(mut pixels) = session.library.borrow().pixels(&id).cloned() else {
        cutout_inline_source(session, id);
        return;
    };
    let session = session.clone();
    spawn_local(async move {
        cutout_rgba(&mut pixels);
        let png = match encode_png(&pixels) {
            Ok(png) => png,
            Err(e) => {
                log::warn!("[cutout] {}: {}", id, e);
                return;
            }
        };
        let patch = ItemPatch {
            source: Some(MediaSource::DataUrl(encode_data_url("image/png", &png))),
            ..Default::default()
        };
        if session.store.borrow_mut().update(&id, patch) {
            session.library.borrow_mut().set_pixels(&id, pixels);
            log::info!("[cutout] applied to {}", id);
            session.changed();
        }
    });
}

// Inline sources can be cut out straight from their bytes before the
// library has decoded them.
fn cutout_inline_source(session: &Session, id: String) {
    let url = match session.store.borrow().get(&id).map(|item| &item.source) {
        Some(MediaSource::DataUrl(url)) => url.clone(),
        _ => {
            log::warn!("[cutout] {} is not decoded yet", id);
            return;
        }
    };
    let session = session.clone();
    spawn_local(async move {
        let cut = match cutout_data_url(&url) {
            Ok(cut) => cut,
            Err(e) => {
                log::warn!("[cutout] {}: {}", id, e);
                return;
            }
        };
        let pixels = decode_data_url(&cut)
            .ok()
            .and_then(|(_, png)| decode_pixels(&png).ok());
        let patch = ItemPatch {
            source: Some(MediaSource::DataUrl(cut)),
            ..Default::default()
        };
        if session.store.borrow_mut().update(&id, patch) {
            if let Some(pixels) = pixels {
                session.library.borrow_mut().set_pixels(&id, pixels);
            }
            log::info!("[cutout] applied to {}", id);
            session.changed();
        }
    });
}

fn describe_selected(actions: &Actions) {
    let session = &actions.session;
    let Some(id) = selected_image(session) else {
        log::info!("[describe] no image selected");
        return;
    };
    let payload = match session.library.borrow().pixels(&id) {
        Some(pixels) => describe::jpeg_payload(pixels, DESCRIBE_MAX_EDGE, DESCRIBE_JPEG_QUALITY),
        None => None,
    };
    let Some(payload) = payload else {
        log::warn!("[describe] nothing to send for {}", id);
        return;
    };
    let actions = actions.clone();
    spawn_local(async move {
        let result = describe::describe_jpeg(&actions.http, describe::API_KEY, &payload).await;
        log::info!(
            "[describe] {}: {:?} (person: {})",
            id,
            result.suggestion,
            result.is_person
        );
        let session = &actions.session;
        let patch = ItemPatch {
            name: Some(result.suggestion),
            ..Default::default()
        };
        if session.store.borrow_mut().update(&id, patch) {
            session.changed();
        }
    });
}

fn toggle_fullscreen(document: &web::Document) {
    if document.fullscreen_element().is_some() {
        _ = document.exit_fullscreen();
    } else if let Some(root) = document.document_element() {
        _ = root.request_fullscreen();
    }
}
