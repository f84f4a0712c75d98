//! Ring layout: maps a linear item index to a spot on concentric circles
//! around the viewer.
//!
//! Each ring holds as many items as fit on its circumference; once a ring is
//! full the next one starts `height_step` metres higher. Slot 0 sits straight
//! ahead (-Z) and slots advance clockwise when seen from above.

use super::constants::{
    RING_BASE_HEIGHT, RING_GAP, RING_HEIGHT_STEP, RING_ITEM_WIDTH, RING_RADIUS,
};
use glam::Vec3;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    pub radius: f32,
    pub gap: f32,
    pub item_width: f32,
    pub height_step: f32,
    pub base_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            radius: RING_RADIUS,
            gap: RING_GAP,
            item_width: RING_ITEM_WIDTH,
            height_step: RING_HEIGHT_STEP,
            base_height: RING_BASE_HEIGHT,
        }
    }
}

/// Number of items that fit on one ring. Never less than one, so degenerate
/// configurations still produce a (vertical) stack instead of dividing by zero.
pub fn items_per_ring(config: &LayoutConfig) -> usize {
    let circumference = TAU * config.radius;
    let space_per_item = config.item_width + config.gap;
    let fit = (circumference / space_per_item).floor();
    if fit.is_finite() && fit >= 1.0 {
        fit as usize
    } else {
        1
    }
}

/// Returns `(ring, slot)` for an item index.
#[inline]
pub fn ring_slot(index: usize, config: &LayoutConfig) -> (usize, usize) {
    let per_ring = items_per_ring(config);
    (index / per_ring, index % per_ring)
}

/// World position of the item at `index`.
pub fn ring_position(index: usize, config: &LayoutConfig) -> Vec3 {
    let per_ring = items_per_ring(config);
    let (ring, slot) = ring_slot(index, config);
    let angle = (slot as f32 / per_ring as f32) * TAU;
    Vec3::new(
        angle.sin() * config.radius,
        config.base_height + ring as f32 * config.height_step,
        -angle.cos() * config.radius,
    )
}

/// Euler rotation turning a plane at `position` so its +Z face looks back at
/// the ring axis.
#[inline]
pub fn facing_rotation(position: Vec3) -> Vec3 {
    if position.x == 0.0 && position.z == 0.0 {
        return Vec3::ZERO;
    }
    Vec3::new(0.0, (-position.x).atan2(-position.z), 0.0)
}
