//! Damped orbit controls and the camera description they produce.

use super::constants::{
    CAMERA_EYE, CAMERA_FOV_DEG, ORBIT_DAMPING, ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE,
};
use glam::{Mat4, Vec3};
use std::f32::consts::FRAC_PI_2;

const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Orbit around `target`. Input accumulates into pending deltas which are
/// applied a fraction at a time in [`OrbitControls::update`], giving the
/// same damped glide as a typical web orbit controller.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    pending_yaw: f32,
    pending_pitch: f32,
    pending_zoom: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::looking_from(Vec3::from(CAMERA_EYE), Vec3::ZERO)
    }
}

impl OrbitControls {
    pub fn looking_from(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset
            .length()
            .clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
        let yaw = offset.x.atan2(offset.z);
        let pitch = (offset.y / offset.length().max(1e-6))
            .clamp(-1.0, 1.0)
            .asin()
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
        Self {
            target,
            yaw,
            pitch,
            distance,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_zoom: 0.0,
        }
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn rotate(&mut self, d_yaw: f32, d_pitch: f32) {
        self.pending_yaw += d_yaw;
        self.pending_pitch += d_pitch;
    }

    /// Positive `amount` moves closer; expressed in log-distance units.
    pub fn zoom(&mut self, amount: f32) {
        self.pending_zoom += amount;
    }

    pub fn update(&mut self) {
        self.yaw += self.pending_yaw * ORBIT_DAMPING;
        self.pitch = (self.pitch + self.pending_pitch * ORBIT_DAMPING)
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.distance = (self.distance * (-self.pending_zoom * ORBIT_DAMPING).exp())
            .clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
        let decay = 1.0 - ORBIT_DAMPING;
        self.pending_yaw *= decay;
        self.pending_pitch *= decay;
        self.pending_zoom *= decay;
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(sy * cp, sp, cy * cp) * self.distance
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.eye(),
            target: self.target,
            up: Vec3::Y,
            aspect: aspect.max(1e-3),
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: 0.1,
            zfar: 100.0,
        }
    }
}
