#![cfg(target_arch = "wasm32")]
use crate::constants::{CANVAS_ID, PASSTHROUGH_ID};
use crate::core::Placement;
use instant::Instant;
use passthrough::Passthrough;
use session::Session;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod camera;
mod commands;
mod constants;
mod core;
mod describe;
mod dom;
mod events;
mod frame;
mod ingest;
mod input;
mod library;
mod overlay;
mod passthrough;
mod render;
mod session;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// Start the rear camera behind the canvas. The stream is released when the
/// page is hidden for good; a denied or missing camera is logged and the
/// backdrop stays empty.
fn start_passthrough(window: &web::Window, document: &web::Document) {
    let Some(video) = document
        .get_element_by_id(PASSTHROUGH_ID)
        .and_then(|el| el.dyn_into::<web::HtmlVideoElement>().ok())
    else {
        log::warn!("[camera] missing #{}", PASSTHROUGH_ID);
        return;
    };
    let slot: Rc<RefCell<Option<Passthrough>>> = Rc::new(RefCell::new(None));

    let slot_hide = slot.clone();
    let on_pagehide = Closure::wrap(Box::new(move || {
        slot_hide.borrow_mut().take();
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("pagehide", on_pagehide.as_ref().unchecked_ref());
    on_pagehide.forget();

    spawn_local(async move {
        match Passthrough::acquire(video).await {
            Ok(guard) => *slot.borrow_mut() = Some(guard),
            Err(e) => log::error!("[camera] {:?}", e),
        }
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("spatial-vision starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let search = window.location().search().unwrap_or_default();
    let placement = Placement::from_query(&search);
    log::info!("[store] placement {:?}", placement);

    let session = Session::new(document.clone(), placement);
    session.changed();

    start_passthrough(&window, &document);

    ingest::wire_uploads(&session);
    let actions = events::Actions::new(session.clone());
    events::wire_control_buttons(&actions);
    events::wire_item_list(&session);
    events::wire_global_keydown(actions);
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        session: session.clone(),
        drag_state: Rc::new(RefCell::new(input::DragState::default())),
    });

    let gpu: Option<render::GpuState> = frame::init_gpu(&canvas).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        session,
        canvas,
        gpu,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
