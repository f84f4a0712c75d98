// Host-side tests for the ring layout.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
#[path = "../src/core/mod.rs"]
mod core;

use crate::core::{facing_rotation, items_per_ring, ring_position, ring_slot, LayoutConfig};
use glam::{Quat, Vec3};

const EPS: f32 = 1e-4;

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < EPS
}

#[test]
fn default_ring_holds_ten_items() {
    // 2π·4 / (0.8 + 1.524) = 10.8
    assert_eq!(items_per_ring(&LayoutConfig::default()), 10);
}

#[test]
fn first_item_sits_straight_ahead() {
    let p = ring_position(0, &LayoutConfig::default());
    assert!(approx(p, Vec3::new(0.0, 1.5, -4.0)), "{p:?}");
}

#[test]
fn slots_are_evenly_spaced_by_angle() {
    let config = LayoutConfig::default();
    for (index, degrees) in [(0usize, 0.0f32), (1, 36.0), (2, 72.0), (5, 180.0)] {
        let angle = degrees.to_radians();
        let expected = Vec3::new(angle.sin() * 4.0, 1.5, -angle.cos() * 4.0);
        let p = ring_position(index, &config);
        assert!(approx(p, expected), "index {index}: {p:?} != {expected:?}");
    }
}

#[test]
fn every_item_lies_on_the_circle() {
    let config = LayoutConfig::default();
    for index in 0..35 {
        let p = ring_position(index, &config);
        let r = (p.x * p.x + p.z * p.z).sqrt();
        assert!((r - config.radius).abs() < EPS, "index {index} radius {r}");
    }
}

#[test]
fn full_ring_moves_up_one_step() {
    let config = LayoutConfig::default();
    assert_eq!(ring_slot(9, &config), (0, 9));
    assert_eq!(ring_slot(10, &config), (1, 0));
    assert!(approx(ring_position(10, &config), Vec3::new(0.0, 2.5, -4.0)));
    assert_eq!(ring_slot(25, &config), (2, 5));
    let p = ring_position(25, &config);
    assert!((p.y - 3.5).abs() < EPS);
    assert!(approx(p, Vec3::new(0.0, 3.5, 4.0)), "{p:?}");
}

#[test]
fn layout_is_deterministic() {
    let config = LayoutConfig {
        radius: 2.5,
        gap: 0.3,
        item_width: 0.5,
        height_step: 0.7,
        base_height: 1.0,
    };
    for index in 0..50 {
        assert_eq!(ring_position(index, &config), ring_position(index, &config));
    }
}

#[test]
fn zero_radius_stacks_vertically() {
    let config = LayoutConfig {
        radius: 0.0,
        ..LayoutConfig::default()
    };
    assert_eq!(items_per_ring(&config), 1);
    let p = ring_position(3, &config);
    assert!(p.is_finite());
    assert!((p.y - (1.5 + 3.0)).abs() < EPS);
    assert!(p.x.abs() < EPS && p.z.abs() < EPS);
}

#[test]
fn zero_spacing_does_not_divide_by_zero() {
    let config = LayoutConfig {
        gap: 0.0,
        item_width: 0.0,
        ..LayoutConfig::default()
    };
    assert_eq!(items_per_ring(&config), 1);
    assert!(ring_position(7, &config).is_finite());
}

#[test]
fn ring_items_face_the_axis() {
    let config = LayoutConfig::default();
    for index in 0..10 {
        let p = ring_position(index, &config);
        let rotation = facing_rotation(p);
        assert_eq!(rotation.x, 0.0);
        assert_eq!(rotation.z, 0.0);
        let normal = Quat::from_rotation_y(rotation.y) * Vec3::Z;
        let inward = Vec3::new(-p.x, 0.0, -p.z).normalize();
        assert!(approx(normal, inward), "index {index}: {normal:?} vs {inward:?}");
    }
}

#[test]
fn facing_rotation_on_the_axis_is_identity() {
    assert_eq!(facing_rotation(Vec3::new(0.0, 2.0, 0.0)), Vec3::ZERO);
}

#[test]
fn next_ring_differs_only_in_height() {
    let config = LayoutConfig::default();
    let per_ring = items_per_ring(&config);
    for index in 0..per_ring * 2 {
        let a = ring_position(index, &config);
        let b = ring_position(index + per_ring, &config);
        assert_eq!(a.x, b.x);
        assert_eq!(a.z, b.z);
        assert!((b.y - a.y - config.height_step).abs() < EPS);
    }
}

#[test]
fn oversized_items_get_a_ring_each() {
    let config = LayoutConfig {
        item_width: 100.0,
        ..LayoutConfig::default()
    };
    assert_eq!(items_per_ring(&config), 1);
    assert_eq!(ring_slot(4, &config), (4, 0));
}
