// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
#[path = "../src/core/mod.rs"]
mod core;
mod input {
    include!("../src/input.rs");
}
mod camera {
    include!("../src/camera.rs");
}

use crate::core::{OrbitControls, Transform};
use camera::screen_to_world_ray;
use glam::{Vec2, Vec3};
use input::*;

fn plane_at(position: Vec3) -> Transform {
    Transform {
        position,
        ..Transform::IDENTITY
    }
}

#[test]
fn ray_hits_plane_head_on() {
    let t = ray_quad(Vec3::ZERO, Vec3::NEG_Z, &plane_at(Vec3::new(0.0, 0.0, -2.0)));
    assert!((t.unwrap() - 2.0).abs() < 1e-6);
}

#[test]
fn ray_outside_half_extent_misses() {
    let plane = plane_at(Vec3::new(0.0, 0.0, -2.0));
    assert!(ray_quad(Vec3::new(0.6, 0.0, 0.0), Vec3::NEG_Z, &plane).is_none());

    let bigger = Transform {
        scale: 2.0,
        ..plane
    };
    assert!(ray_quad(Vec3::new(0.6, 0.0, 0.0), Vec3::NEG_Z, &bigger).is_some());
}

#[test]
fn back_faces_count_as_hits() {
    let plane = plane_at(Vec3::new(0.0, 0.0, -2.0));
    let t = ray_quad(Vec3::new(0.0, 0.0, -4.0), Vec3::Z, &plane);
    assert!((t.unwrap() - 2.0).abs() < 1e-6);
}

#[test]
fn parallel_or_behind_rays_miss() {
    let plane = plane_at(Vec3::new(0.0, 0.0, -2.0));
    assert!(ray_quad(Vec3::ZERO, Vec3::X, &plane).is_none());
    assert!(ray_quad(Vec3::ZERO, Vec3::Z, &plane).is_none());
}

#[test]
fn rotated_plane_is_tested_in_its_own_frame() {
    let plane = Transform {
        position: Vec3::ZERO,
        rotation: Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
        scale: 1.0,
    };
    let t = ray_quad(Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_X, &plane);
    assert!((t.unwrap() - 5.0).abs() < 1e-5);
    // edge-on from the old facing direction
    assert!(ray_quad(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, &plane).is_none());
}

#[test]
fn nearest_plane_wins() {
    let near = plane_at(Vec3::new(0.0, 0.0, -2.0));
    let far = plane_at(Vec3::new(0.0, 0.0, -5.0));
    let hit = pick_nearest(Vec3::ZERO, Vec3::NEG_Z, [("far", far), ("near", near)]);
    assert_eq!(hit, Some("near"));
    let hit = pick_nearest(Vec3::ZERO, Vec3::NEG_Z, [("near", near), ("far", far)]);
    assert_eq!(hit, Some("near"));
}

#[test]
fn empty_space_picks_nothing() {
    let plane = plane_at(Vec3::new(3.0, 0.0, -2.0));
    assert_eq!(pick_nearest(Vec3::ZERO, Vec3::NEG_Z, [("a", plane)]), None);
    assert_eq!(
        pick_nearest(Vec3::ZERO, Vec3::NEG_Z, std::iter::empty::<(&str, Transform)>()),
        None
    );
}

#[test]
fn drag_distinguishes_taps_from_orbits() {
    let mut drag = DragState::default();
    drag.begin(Vec2::new(10.0, 10.0));
    let d = drag.advance(Vec2::new(13.0, 14.0));
    assert_eq!(d, Vec2::new(3.0, 4.0));
    assert!(drag.is_click(6.0));
    drag.advance(Vec2::new(13.0, 24.0));
    assert!((drag.travelled - 15.0).abs() < 1e-6);
    assert!(!drag.is_click(6.0));

    drag.begin(Vec2::ZERO);
    assert_eq!(drag.travelled, 0.0);
    assert!(drag.active);
}

#[test]
fn screen_centre_ray_points_at_target() {
    let camera = OrbitControls::default().camera(800.0 / 600.0);
    let (ro, rd) = screen_to_world_ray(800.0, 600.0, 400.0, 300.0, &camera);
    assert!((ro - camera.eye).length() < 1e-5);
    let forward = (camera.target - camera.eye).normalize();
    assert!((rd - forward).length() < 1e-3, "{rd:?} vs {forward:?}");
}

#[test]
fn clicking_the_default_placement_hits_it() {
    let camera = OrbitControls::default().camera(1.0);
    let placed = plane_at(Vec3::new(0.0, 1.5, -2.0));
    let projected = camera.view_projection().project_point3(placed.position);
    let sx = (projected.x + 1.0) * 0.5 * 500.0;
    let sy = (1.0 - projected.y) * 0.5 * 500.0;
    let (ro, rd) = screen_to_world_ray(500.0, 500.0, sx, sy, &camera);
    assert_eq!(pick_nearest(ro, rd, [("poster", placed)]), Some("poster"));
}
