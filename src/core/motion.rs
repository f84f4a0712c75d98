//! Per-frame easing of displayed transforms toward the store's targets.

use super::constants::{
    MAX_FRAME_DT_SEC, POSITION_LERP, REFERENCE_FRAME_HZ, SCALE_LERP, SELECTED_SCALE_PULSE,
};
use super::store::ItemStore;
use fnv::FnvHashMap;
use glam::{EulerRot, Mat4, Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: 1.0,
    };

    #[inline]
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Model matrix of a unit plane with this transform.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.quat(), self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Blend factor for a frame of `dt_sec`, given a factor tuned for one
/// reference frame. Equal to `per_frame` at exactly one reference frame.
#[inline]
pub fn blend_factor(per_frame: f32, dt_sec: f32) -> f32 {
    let frames = dt_sec.clamp(0.0, MAX_FRAME_DT_SEC) * REFERENCE_FRAME_HZ;
    1.0 - (1.0 - per_frame).powf(frames)
}

/// One smoothing step for a single item.
pub fn smooth_step(displayed: &mut Transform, target: &Transform, selected: bool, dt_sec: f32) {
    displayed.position = displayed
        .position
        .lerp(target.position, blend_factor(POSITION_LERP, dt_sec));
    displayed.rotation = target.rotation;
    let target_scale = target.scale * if selected { SELECTED_SCALE_PULSE } else { 1.0 };
    displayed.scale += (target_scale - displayed.scale) * blend_factor(SCALE_LERP, dt_sec);
}

/// Displayed transforms keyed by item id, so easing state survives the
/// render layer re-deriving its node list from the store.
#[derive(Default)]
pub struct MotionState {
    displayed: FnvHashMap<String, Transform>,
}

impl MotionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Transform> {
        self.displayed.get(id)
    }

    /// Advance every item one frame. New items start at the identity
    /// transform and ease in; entries for removed items are dropped.
    pub fn step(&mut self, store: &ItemStore, dt_sec: f32) {
        self.displayed
            .retain(|id, _| store.items().iter().any(|item| &item.id == id));
        for item in store.items() {
            let target = Transform {
                position: item.position,
                rotation: item.rotation,
                scale: item.scale,
            };
            let displayed = self.displayed.entry(item.id.clone()).or_default();
            smooth_step(displayed, &target, store.is_selected(&item.id), dt_sec);
        }
    }
}
