// Tests for the SDF scene: distance-function signs, smooth-minimum blend
// tolerance, hit-test ordering, exact drag-follow, and resize anchoring.

use fx_core::constants::*;
use fx_core::sdf::{
    rotate, scene_distance, sd_box, sd_circle, sd_equilateral_triangle, shape_uv, smin_blend,
    ShapeSet,
};
use glam::Vec2;

#[test]
fn circle_distance_has_correct_signs() {
    assert!(sd_circle(Vec2::ZERO, 0.12) < 0.0);
    assert!((sd_circle(Vec2::new(0.12, 0.0), 0.12)).abs() < 1e-6);
    assert!((sd_circle(Vec2::new(0.5, 0.0), 0.12) - 0.38).abs() < 1e-6);
}

#[test]
fn box_distance_has_correct_signs() {
    let b = Vec2::splat(0.1);
    assert!(sd_box(Vec2::ZERO, b) < 0.0);
    assert!(sd_box(Vec2::new(0.1, 0.0), b).abs() < 1e-6);
    // Outside along a diagonal: corner distance.
    let d = sd_box(Vec2::new(0.2, 0.2), b);
    assert!((d - (2.0_f32).sqrt() * 0.1).abs() < 1e-5);
}

#[test]
fn triangle_distance_is_negative_inside() {
    // The sdf encloses the origin for the unit equilateral triangle.
    assert!(sd_equilateral_triangle(Vec2::ZERO) < 0.0);
    assert!(sd_equilateral_triangle(Vec2::new(0.0, 3.0)) > 0.0);
    assert!(sd_equilateral_triangle(Vec2::new(3.0, 0.0)) > 0.0);
}

#[test]
fn rotate_preserves_length_and_inverts() {
    let p = Vec2::new(0.3, -0.7);
    let q = rotate(p, 1.234);
    assert!((q.length() - p.length()).abs() < 1e-6);
    let back = rotate(q, -1.234);
    assert!((back - p).length() < 1e-5);
}

#[test]
fn smin_reduces_to_plain_min_when_far_apart() {
    let k = SDF_BLEND_K;
    // d2 - d1 > k: fully d1, no rounding term.
    let (d, h) = smin_blend(0.1, 0.1 + 2.0 * k, k);
    assert_eq!(h, 1.0);
    assert!((d - 0.1).abs() < 1e-6);
    // Symmetric case.
    let (d, h) = smin_blend(0.5, 0.5, k);
    assert!((h - 0.5).abs() < 1e-6);
    assert!(d < 0.5, "equal inputs blend below either distance");
}

#[test]
fn blended_field_matches_isolated_shape_near_it() {
    // Shapes far apart in uv space; sample right next to the circle.
    let shapes = [
        Vec2::new(-0.8, -0.4),
        Vec2::new(0.8, 0.0),
        Vec2::new(-0.8, 0.4),
    ];
    let probe = shapes[0] + Vec2::new(0.05, 0.0);
    let blended = scene_distance(probe, shapes, 0.0);
    let isolated = sd_circle(probe - shapes[0], SDF_CIRCLE_RADIUS);
    assert!(
        (blended - isolated).abs() <= SDF_BLEND_K,
        "blend deviates more than the blend radius: {blended} vs {isolated}"
    );
}

#[test]
fn scene_distance_is_continuous_across_time() {
    let shapes = [
        Vec2::new(-0.5, 0.0),
        Vec2::new(0.5, 0.0),
        Vec2::new(0.0, 0.4),
    ];
    let p = Vec2::new(0.45, 0.05);
    let a = scene_distance(p, shapes, 1.0);
    let b = scene_distance(p, shapes, 1.001);
    assert!((a - b).abs() < 1e-3, "spin step caused a jump");
}

#[test]
fn shape_uv_centers_and_scales_by_height() {
    let res = Vec2::new(1920.0, 1080.0);
    let center = shape_uv(0.5 * res, res);
    assert!(center.length() < 1e-6);
    let corner = shape_uv(Vec2::new(1920.0, 1080.0), res);
    assert!((corner.y - 0.5).abs() < 1e-6);
    assert!((corner.x - 960.0 / 1080.0).abs() < 1e-5);
}

#[test]
fn hit_test_uses_radius_and_index_order() {
    let mut shapes = ShapeSet::new();
    shapes.resize(1000.0, 1000.0);
    // Shape 0 sits at (50, 50).
    assert_eq!(shapes.hit_test(Vec2::new(50.0, 50.0)), Some(0));
    assert_eq!(
        shapes.hit_test(Vec2::new(50.0 + SDF_HIT_RADIUS - 1.0, 50.0)),
        Some(0)
    );
    assert_eq!(
        shapes.hit_test(Vec2::new(50.0 + SDF_HIT_RADIUS + 1.0, 50.0)),
        None
    );

    // Overlap two shapes: the lower index wins.
    shapes.shapes[1].pos = shapes.shapes[0].pos;
    assert_eq!(shapes.hit_test(shapes.shapes[0].pos), Some(0));
}

#[test]
fn drag_follows_pointer_exactly() {
    let mut shapes = ShapeSet::new();
    shapes.resize(1000.0, 800.0);
    assert_eq!(shapes.begin_drag(Vec2::new(50.0, 40.0)), Some(0));

    let path = [
        Vec2::new(120.0, 300.0),
        Vec2::new(480.0, 90.0),
        Vec2::new(700.0, 650.0),
    ];
    for p in path {
        shapes.drag_to(p);
    }
    // No easing: the final position is the last move, bit-exact.
    assert_eq!(shapes.shapes[0].pos, path[2]);
    shapes.end_drag();
    assert_eq!(shapes.dragged(), None);
}

#[test]
fn dragged_fraction_survives_resize() {
    let mut shapes = ShapeSet::new();
    shapes.resize(1000.0, 800.0);
    shapes.begin_drag(Vec2::new(50.0, 40.0));
    shapes.drag_to(Vec2::new(500.0, 400.0));
    shapes.end_drag();

    // Dead center before the resize, dead center after.
    shapes.resize(2000.0, 1000.0);
    assert!((shapes.shapes[0].pos - Vec2::new(1000.0, 500.0)).length() < 1e-3);
}

#[test]
fn miss_does_not_start_a_drag() {
    let mut shapes = ShapeSet::new();
    shapes.resize(1000.0, 800.0);
    assert_eq!(shapes.begin_drag(Vec2::new(500.0, 400.0)), None);
    let before = shapes.shapes[0].pos;
    shapes.drag_to(Vec2::new(10.0, 10.0));
    assert_eq!(shapes.shapes[0].pos, before);
}
