use crate::render::{self, PlaneDraw};
use crate::session::Session;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub session: Session,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        let dt_sec = dt.as_secs_f32();

        self.session.orbit.borrow_mut().update();

        let store = self.session.store.borrow();
        self.session.library.borrow_mut().retain_items(&store);
        self.session.motion.borrow_mut().step(&store, dt_sec);

        let Some(g) = &mut self.gpu else {
            return;
        };
        let w = self.canvas.width();
        let h = self.canvas.height();
        g.resize_if_needed(w, h);

        let motion = self.session.motion.borrow();
        let draws: Vec<PlaneDraw> = store
            .items()
            .iter()
            .filter_map(|item| {
                motion.get(&item.id).map(|shown| PlaneDraw {
                    id: item.id.clone(),
                    model: shown.matrix(),
                    kind: item.kind,
                    selected: store.is_selected(&item.id),
                })
            })
            .collect();

        g.sync_textures(&store, &self.session.library.borrow());
        let camera = self
            .session
            .orbit
            .borrow()
            .camera(w as f32 / h.max(1) as f32);
        if let Err(e) = g.render(&camera, &draws) {
            log::error!("render error: {:?}", e);
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            if let Some(cb) = tick_clone.borrow().as_ref() {
                _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        if let Some(cb) = tick.borrow().as_ref() {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }
}
