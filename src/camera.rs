use crate::core::Camera;
use glam::{Vec3, Vec4};

#[inline]
/// Compute a world-space ray from screen-space canvas coordinates.
///
/// - `width`, `height`: canvas backing store size in pixels
/// - `sx`, `sy`: pixel coordinates in the canvas' backing store space
/// - `camera`: the camera the frame was rendered with
///
/// Returns `(ray_origin, ray_direction)` in world space.
pub fn screen_to_world_ray(
    width: f32,
    height: f32,
    sx: f32,
    sy: f32,
    camera: &Camera,
) -> (Vec3, Vec3) {
    let ndc_x = (2.0 * sx / width.max(1.0)) - 1.0;
    let ndc_y = 1.0 - (2.0 * sy / height.max(1.0));
    let inv = camera.view_projection().inverse();
    let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
    let p1: Vec3 = p_far.truncate() / p_far.w;
    let ro = camera.eye;
    let rd = (p1 - ro).normalize();
    (ro, rd)
}
