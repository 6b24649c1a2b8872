#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

/// Solver tolerance: the bisection resolves the scale to well under a
/// canvas pixel over its 20 iterations.
const SOLVER_TOLERANCE: f64 = 0.05;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn rect(cx: f64, cy: f64, hw: f64, hh: f64, rotation: f64) -> ResourceBounds {
    ResourceBounds {
        shape: TableShape::Rect,
        center_x: cx,
        center_y: cy,
        half_width: hw,
        half_height: hh,
        rotation,
    }
}

fn ellipse(cx: f64, cy: f64, hw: f64, hh: f64, rotation: f64) -> ResourceBounds {
    ResourceBounds { shape: TableShape::Ellipse, ..rect(cx, cy, hw, hh, rotation) }
}

// =============================================================
// clamp_center_to_canvas
// =============================================================

#[test]
fn center_in_bounds_is_unchanged() {
    let center = clamp_center_to_canvas(&rect(600.0, 400.0, 40.0, 40.0, 0.0));
    assert_eq!(center, Point::new(600.0, 400.0));
}

#[test]
fn center_clamp_is_idempotent() {
    let first = clamp_center_to_canvas(&rect(5.0, 5.0, 40.0, 40.0, 0.0));
    let again = clamp_center_to_canvas(&rect(first.x, first.y, 40.0, 40.0, 0.0));
    assert_eq!(first, again);
}

#[test]
fn center_pushed_off_left_lands_on_extent() {
    let center = clamp_center_to_canvas(&rect(-100.0, 400.0, 40.0, 40.0, 0.0));
    assert!(approx_eq(center.x, 40.0));
    assert!(approx_eq(center.y, 400.0));
}

#[test]
fn center_pushed_off_bottom_right_lands_on_extent() {
    let center = clamp_center_to_canvas(&rect(2000.0, 1000.0, 40.0, 30.0, 0.0));
    assert!(approx_eq(center.x, CANVAS_WIDTH - 40.0));
    assert!(approx_eq(center.y, CANVAS_HEIGHT - 30.0));
}

#[test]
fn center_clamp_uses_rotated_extents() {
    // At 45 degrees the square's silhouette widens to 40 * sqrt(2).
    let spread = 40.0 * 2.0_f64.sqrt();
    let center = clamp_center_to_canvas(&rect(0.0, 400.0, 40.0, 40.0, 45.0));
    assert!(approx_eq(center.x, spread));
}

#[test]
fn rotated_circle_clamps_like_unrotated() {
    let plain = clamp_center_to_canvas(&ellipse(-10.0, -10.0, 50.0, 50.0, 0.0));
    let turned = clamp_center_to_canvas(&ellipse(-10.0, -10.0, 50.0, 50.0, 45.0));
    assert!(approx_eq(plain.x, turned.x));
    assert!(approx_eq(plain.y, turned.y));
}

#[test]
fn oversized_shape_pins_to_far_edge() {
    // Wider than the canvas: the far-edge rule is applied last and wins.
    let center = clamp_center_to_canvas(&rect(600.0, 400.0, 700.0, 40.0, 0.0));
    assert!(approx_eq(center.x, CANVAS_WIDTH - 700.0));
}

// =============================================================
// clamp_delta_for_group
// =============================================================

#[test]
fn empty_group_passes_delta_through() {
    assert_eq!(clamp_delta_for_group(&[], -250.0, 75.0), (-250.0, 75.0));
}

#[test]
fn unconstrained_delta_is_unchanged() {
    let group = [rect(600.0, 400.0, 40.0, 40.0, 0.0)];
    assert_eq!(clamp_delta_for_group(&group, 30.0, -20.0), (30.0, -20.0));
}

#[test]
fn left_overflow_is_subtracted_not_zeroed() {
    // Tables at x=100 and x=300, half-width 40: group min_x is 60, so the
    // group can travel 60 of the requested 100.
    let group = [rect(100.0, 400.0, 40.0, 40.0, 0.0), rect(300.0, 400.0, 40.0, 40.0, 0.0)];
    let (dx, dy) = clamp_delta_for_group(&group, -100.0, 0.0);
    assert!(approx_eq(dx, -60.0));
    assert!(approx_eq(dy, 0.0));
}

#[test]
fn right_overflow_is_subtracted() {
    let group = [rect(1100.0, 400.0, 40.0, 40.0, 0.0)];
    let (dx, _) = clamp_delta_for_group(&group, 200.0, 0.0);
    assert!(approx_eq(dx, 60.0));
}

#[test]
fn vertical_overflow_is_clamped_independently() {
    let group = [rect(600.0, 100.0, 40.0, 40.0, 0.0)];
    let (dx, dy) = clamp_delta_for_group(&group, 10.0, -500.0);
    assert!(approx_eq(dx, 10.0));
    assert!(approx_eq(dy, -60.0));
}

#[test]
fn clamped_delta_preserves_relative_offsets() {
    let a = rect(100.0, 400.0, 40.0, 40.0, 0.0);
    let b = rect(300.0, 250.0, 40.0, 40.0, 0.0);
    let (dx, dy) = clamp_delta_for_group(&[a, b], -500.0, -500.0);
    // One shared delta: pairwise spacing is untouched by construction.
    let moved_a = (a.center_x + dx, a.center_y + dy);
    let moved_b = (b.center_x + dx, b.center_y + dy);
    assert!(approx_eq(moved_b.0 - moved_a.0, 200.0));
    assert!(approx_eq(moved_b.1 - moved_a.1, -150.0));
}

#[test]
fn clamped_group_stays_on_canvas() {
    let group = [rect(100.0, 100.0, 40.0, 40.0, 30.0), ellipse(300.0, 200.0, 50.0, 25.0, 60.0)];
    let (dx, dy) = clamp_delta_for_group(&group, -400.0, -400.0);
    let moved: Vec<ResourceBounds> = group
        .iter()
        .map(|b| ResourceBounds { center_x: b.center_x + dx, center_y: b.center_y + dy, ..*b })
        .collect();
    let bbox = combined_bounding_box(&moved);
    assert!(bbox.min_x >= -EPSILON);
    assert!(bbox.min_y >= -EPSILON);
}

#[test]
fn rotated_group_clamps_by_silhouette() {
    // The 45-degree square reaches 40 * sqrt(2) from its center.
    let spread = 40.0 * 2.0_f64.sqrt();
    let group = [rect(100.0, 400.0, 40.0, 40.0, 45.0)];
    let (dx, _) = clamp_delta_for_group(&group, -100.0, 0.0);
    assert!(approx_eq(dx, -(100.0 - spread)));
}

// =============================================================
// clamp_resize_dimensions
// =============================================================

#[test]
fn fitting_proposal_is_unchanged() {
    let (w, h) = clamp_resize_dimensions(&rect(600.0, 400.0, 40.0, 40.0, 0.0), 80.0, 60.0);
    assert_eq!((w, h), (80.0, 60.0));
}

#[test]
fn result_never_drops_below_minimum() {
    let (w, h) = clamp_resize_dimensions(&rect(600.0, 400.0, 40.0, 40.0, 0.0), 5.0, -10.0);
    assert_eq!((w, h), (MIN_HALF_EXTENT, MIN_HALF_EXTENT));
}

#[test]
fn rect_near_wall_scales_both_axes() {
    // 50 units of room to the right wall; requesting 100 halves the scale,
    // dragging the untouched axis down with it.
    let (w, h) =
        clamp_resize_dimensions(&rect(CANVAS_WIDTH - 50.0, 400.0, 40.0, 40.0, 0.0), 100.0, 40.0);
    assert!(approx_eq(w, 50.0));
    assert!(approx_eq(h, 20.0));
}

#[test]
fn rect_clamp_respects_rotation() {
    // At 45 degrees a square proposal of 100 spreads to 100 * sqrt(2), so
    // the scale is 50 / (100 * sqrt(2)).
    let (w, h) =
        clamp_resize_dimensions(&rect(CANVAS_WIDTH - 50.0, 400.0, 40.0, 40.0, 45.0), 100.0, 100.0);
    let expected = 100.0 * 50.0 / (100.0 * 2.0_f64.sqrt());
    assert!(approx_eq(w, expected));
    assert!(approx_eq(h, expected));
}

#[test]
fn ellipse_near_wall_converges_to_fit() {
    // A circle's silhouette equals its radius at any rotation, so the
    // solver should land on half-extents of 50.
    let (w, h) = clamp_resize_dimensions(
        &ellipse(CANVAS_WIDTH - 50.0, 400.0, 40.0, 40.0, 45.0),
        100.0,
        100.0,
    );
    assert!((w - 50.0).abs() < SOLVER_TOLERANCE);
    assert!((h - 50.0).abs() < SOLVER_TOLERANCE);
}

#[test]
fn ellipse_allows_more_than_rect_at_equal_inputs() {
    let at = |shape: &ResourceBounds| clamp_resize_dimensions(shape, 100.0, 100.0);
    let (rect_w, _) = at(&rect(CANVAS_WIDTH - 50.0, 400.0, 40.0, 40.0, 45.0));
    let (ellipse_w, _) = at(&ellipse(CANVAS_WIDTH - 50.0, 400.0, 40.0, 40.0, 45.0));
    assert!(
        ellipse_w > rect_w + 1.0,
        "ellipse clamp ({ellipse_w}) should beat rect clamp ({rect_w})"
    );
}

#[test]
fn ellipse_clamp_never_grows_the_proposal() {
    // The axis-aligned proposal overflows the right wall, but the rotated
    // silhouette just fits: the capped scale returns the proposal rather
    // than growing it toward the solver's upper bound.
    let (w, h) =
        clamp_resize_dimensions(&ellipse(CANVAS_WIDTH - 50.0, 400.0, 40.0, 40.0, 60.0), 85.0, 30.0);
    assert!(approx_eq(w, 85.0));
    assert!(approx_eq(h, 30.0));
}

#[test]
fn clamp_is_deterministic() {
    let bounds = ellipse(1150.0, 100.0, 40.0, 40.0, 30.0);
    let first = clamp_resize_dimensions(&bounds, 120.0, 80.0);
    let second = clamp_resize_dimensions(&bounds, 120.0, 80.0);
    assert_eq!(first, second);
}

#[test]
fn clamped_rect_silhouette_fits_the_canvas() {
    let bounds = rect(1150.0, 100.0, 40.0, 40.0, 30.0);
    let (w, h) = clamp_resize_dimensions(&bounds, 300.0, 200.0);
    let resized = ResourceBounds { half_width: w, half_height: h, ..bounds };
    let bbox = rotated_bounding_box(&resized);
    assert!(bbox.min_x >= -EPSILON);
    assert!(bbox.max_x <= CANVAS_WIDTH + EPSILON);
    assert!(bbox.min_y >= -EPSILON);
    assert!(bbox.max_y <= CANVAS_HEIGHT + EPSILON);
}
