use crate::constants::{CLICK_DRAG_THRESHOLD_PX, ORBIT_RADIANS_PER_PX, WHEEL_ZOOM_PER_PIXEL};
use crate::core::Transform;
use crate::input;
use crate::render;
use crate::session::Session;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub session: Session,
    pub drag_state: Rc<RefCell<input::DragState>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_px(&ev, &w.canvas);
        let mut drag = w.drag_state.borrow_mut();
        if !drag.active {
            return;
        }
        let delta = drag.advance(pos);
        if !drag.is_click(CLICK_DRAG_THRESHOLD_PX) {
            w.session
                .orbit
                .borrow_mut()
                .rotate(-delta.x * ORBIT_RADIANS_PER_PX, delta.y * ORBIT_RADIANS_PER_PX);
        }
    }) as Box<dyn FnMut(_)>);

    _ = canvas_for_listener
        .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_px(&ev, &w.canvas);
        w.drag_state.borrow_mut().begin(pos);
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let was_click = {
            let mut drag = w.drag_state.borrow_mut();
            let click = drag.active && drag.is_click(CLICK_DRAG_THRESHOLD_PX);
            drag.active = false;
            click
        };
        _ = w.canvas.release_pointer_capture(ev.pointer_id());
        if was_click {
            let pos = input::pointer_canvas_px(&ev, &w.canvas);
            select_at(&w, pos.x, pos.y);
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);

    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        w.session
            .orbit
            .borrow_mut()
            .zoom(-(ev.delta_y() as f32) * WHEEL_ZOOM_PER_PIXEL);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);

    _ = canvas_for_listener.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Select the item under a canvas pixel. A miss keeps the current selection.
fn select_at(w: &InputWiring, sx: f32, sy: f32) {
    let (width, height) = (w.canvas.width() as f32, w.canvas.height() as f32);
    let camera = w.session.orbit.borrow().camera(width / height.max(1.0));
    let (ro, rd) = render::screen_to_world_ray(width, height, sx, sy, &camera);

    let hit = {
        let store = w.session.store.borrow();
        let motion = w.session.motion.borrow();
        let planes = store.items().iter().map(|item| {
            let shown = motion.get(&item.id).copied().unwrap_or(Transform {
                position: item.position,
                rotation: item.rotation,
                scale: item.scale,
            });
            (item.id.as_str(), shown)
        });
        input::pick_nearest(ro, rd, planes).map(str::to_owned)
    };
    if let Some(id) = hit {
        log::info!("[mouse] picked {}", id);
        w.session.store.borrow_mut().select(Some(&id));
        w.session.changed();
    }
}
