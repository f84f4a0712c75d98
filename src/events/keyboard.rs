use super::controls::{run_command, Actions};
use crate::commands::{command_for_key, keys_reach_scene, Command};
use wasm_bindgen::JsCast;
use web_sys as web;

fn target_reaches_scene(ev: &web::KeyboardEvent) -> bool {
    let Some(el) = ev.target().and_then(|t| t.dyn_into::<web::Element>().ok()) else {
        return true;
    };
    let input_type = el
        .dyn_ref::<web::HtmlInputElement>()
        .map(|input| input.type_());
    keys_reach_scene(&el.tag_name(), input_type.as_deref())
}

pub fn handle_global_keydown(ev: &web::KeyboardEvent, actions: &Actions) {
    if !target_reaches_scene(ev) {
        return;
    }
    let key = ev.key();
    let Some(command) = command_for_key(&key) else {
        return;
    };
    // Deselect has nothing to do without a selection; let the page see Escape
    if command != Command::ToggleFullscreen && actions.session.store.borrow().selected().is_none()
    {
        return;
    }
    log::debug!("[keys] {} -> {:?}", key, command);
    run_command(actions, command);
    ev.prevent_default();
}

pub fn wire_global_keydown(actions: Actions) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &actions);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
