use crate::core::Transform;
use glam::{Vec2, Vec3};
use web_sys as web;

/// Tracks a pointer press so release can tell a tap from an orbit drag.
#[derive(Default, Clone, Copy)]
pub struct DragState {
    pub active: bool,
    pub start: Vec2,
    pub last: Vec2,
    pub travelled: f32,
}

impl DragState {
    pub fn begin(&mut self, at: Vec2) {
        self.active = true;
        self.start = at;
        self.last = at;
        self.travelled = 0.0;
    }

    /// Record a move and return the delta since the previous one.
    pub fn advance(&mut self, to: Vec2) -> Vec2 {
        let delta = to - self.last;
        self.last = to;
        self.travelled += delta.length();
        delta
    }

    pub fn is_click(&self, threshold_px: f32) -> bool {
        self.travelled <= threshold_px
    }
}

/// Ray against the unit plane described by `transform` (local XY, facing +Z,
/// side length `scale`). Both faces count as hits.
#[inline]
pub fn ray_quad(ray_origin: Vec3, ray_dir: Vec3, transform: &Transform) -> Option<f32> {
    let rotation = transform.quat();
    let normal = rotation * Vec3::Z;
    let denom = normal.dot(ray_dir);
    if denom.abs() < 1e-6 {
        return None;
    }
    let t = normal.dot(transform.position - ray_origin) / denom;
    if t < 0.0 {
        return None;
    }
    let local = rotation.inverse() * (ray_origin + ray_dir * t - transform.position);
    let half = 0.5 * transform.scale;
    (local.x.abs() <= half && local.y.abs() <= half).then_some(t)
}

/// Id of the closest plane hit by the ray, if any.
pub fn pick_nearest<'a>(
    ray_origin: Vec3,
    ray_dir: Vec3,
    planes: impl IntoIterator<Item = (&'a str, Transform)>,
) -> Option<&'a str> {
    let mut best = None::<(&str, f32)>;
    for (id, transform) in planes {
        if let Some(t) = ray_quad(ray_origin, ray_dir, &transform) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((id, t)),
            }
        }
    }
    best.map(|(id, _)| id)
}

// ---------------- Pointer helpers ----------------
#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let w = (rect.width() as f32).max(1.0);
    let h = (rect.height() as f32).max(1.0);
    let sx = (x_css / w) * canvas.width() as f32;
    let sy = (y_css / h) * canvas.height() as f32;
    Vec2::new(sx, sy)
}
