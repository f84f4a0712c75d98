// Host-side tests for per-frame easing of displayed transforms.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
#[path = "../src/core/mod.rs"]
mod core;

use crate::core::{
    blend_factor, smooth_step, ItemStore, LayoutConfig, MediaKind, MediaSource, MotionState,
    Placement, SpatialItem, Transform,
};
use glam::Vec3;

const FRAME: f32 = 1.0 / 60.0;

fn image(id: &str) -> SpatialItem {
    SpatialItem::new(id, MediaSource::ObjectUrl(format!("blob:{id}")), MediaKind::Image)
}

#[test]
fn blend_factor_matches_reference_frame() {
    assert!((blend_factor(0.15, FRAME) - 0.15).abs() < 1e-5);
    assert!((blend_factor(0.1, FRAME) - 0.1).abs() < 1e-5);
    assert_eq!(blend_factor(0.15, 0.0), 0.0);
}

#[test]
fn long_frames_are_clamped() {
    assert_eq!(blend_factor(0.15, 10.0), blend_factor(0.15, 0.25));
    assert_eq!(blend_factor(0.15, -1.0), 0.0);
}

#[test]
fn two_half_frames_equal_one_frame() {
    let target = Transform {
        position: Vec3::new(0.0, 1.5, -2.0),
        rotation: Vec3::ZERO,
        scale: 2.0,
    };
    let mut once = Transform::IDENTITY;
    smooth_step(&mut once, &target, false, FRAME);
    let mut twice = Transform::IDENTITY;
    smooth_step(&mut twice, &target, false, FRAME / 2.0);
    smooth_step(&mut twice, &target, false, FRAME / 2.0);
    assert!((once.position - twice.position).length() < 1e-4);
    assert!((once.scale - twice.scale).abs() < 1e-4);
}

#[test]
fn new_items_ease_in_from_the_origin() {
    let mut store = ItemStore::new(Placement::Fixed);
    store.add(image("a"));
    store.select(None);
    let mut motion = MotionState::new();
    motion.step(&store, FRAME);
    let shown = motion.get("a").unwrap();
    let expected = Vec3::new(0.0, 1.5, -2.0) * 0.15;
    assert!((shown.position - expected).length() < 1e-4, "{:?}", shown.position);
    assert!((shown.scale - 1.0).abs() < 1e-6);
}

#[test]
fn displayed_transform_converges_to_target() {
    let mut store = ItemStore::new(Placement::Fixed);
    store.add(image("a"));
    let mut motion = MotionState::new();
    for _ in 0..600 {
        motion.step(&store, FRAME);
    }
    let shown = motion.get("a").unwrap();
    assert!((shown.position - Vec3::new(0.0, 1.5, -2.0)).length() < 1e-3);
    // selected items settle slightly larger
    assert!((shown.scale - 1.05).abs() < 1e-3);

    store.select(None);
    for _ in 0..600 {
        motion.step(&store, FRAME);
    }
    assert!((motion.get("a").unwrap().scale - 1.0).abs() < 1e-3);
}

#[test]
fn rotation_snaps_immediately() {
    let mut store = ItemStore::new(Placement::Ring(LayoutConfig::default()));
    store.add(image("a"));
    store.add(image("b"));
    let mut motion = MotionState::new();
    motion.step(&store, FRAME);
    let target = store.get("b").unwrap().rotation;
    assert_ne!(target, Vec3::ZERO);
    assert_eq!(motion.get("b").unwrap().rotation, target);
}

#[test]
fn removed_items_are_forgotten() {
    let mut store = ItemStore::new(Placement::Fixed);
    store.add(image("a"));
    store.add(image("b"));
    let mut motion = MotionState::new();
    motion.step(&store, FRAME);
    assert!(motion.get("a").is_some() && motion.get("b").is_some());
    store.remove("a");
    motion.step(&store, FRAME);
    assert!(motion.get("a").is_none());
    assert!(motion.get("b").is_some());
    store.clear();
    motion.step(&store, FRAME);
    assert!(motion.get("b").is_none());
}

#[test]
fn model_matrix_places_the_plane() {
    let t = Transform {
        position: Vec3::new(1.0, 2.0, 3.0),
        rotation: Vec3::ZERO,
        scale: 2.0,
    };
    let corner = t.matrix().transform_point3(Vec3::new(0.5, 0.5, 0.0));
    assert!((corner - Vec3::new(2.0, 3.0, 3.0)).length() < 1e-6);
}
