//! Boundary clamping: keeps every shape's bounding box inside the canvas.
//!
//! Three operations, all pure and total: nearest valid center for one
//! resource, largest feasible shared delta for a multi-selection, and
//! clamped half-extents for a resize proposal. Invalid requests degrade to
//! the nearest valid value; nothing here fails.

#[cfg(test)]
#[path = "clamp_test.rs"]
mod clamp_test;

use crate::bounds::{combined_bounding_box, rotated_bounding_box};
use crate::consts::{
    CANVAS_HEIGHT, CANVAS_WIDTH, MIN_HALF_EXTENT, RESIZE_SOLVER_ITERATIONS,
};
use crate::floor::{ResourceBounds, TableShape};
use crate::viewport::Point;

/// Nearest center that keeps the resource's bounding box on the canvas.
///
/// The proposed center is read from `bounds` itself. A resource already
/// fully inside the canvas comes back unchanged.
#[must_use]
pub fn clamp_center_to_canvas(bounds: &ResourceBounds) -> Point {
    let bbox = rotated_bounding_box(bounds);
    // Distances from the center to each box edge.
    let left = bounds.center_x - bbox.min_x;
    let right = bbox.max_x - bounds.center_x;
    let top = bounds.center_y - bbox.min_y;
    let bottom = bbox.max_y - bounds.center_y;

    let mut x = bounds.center_x;
    if x - left < 0.0 {
        x = left;
    }
    if x + right > CANVAS_WIDTH {
        x = CANVAS_WIDTH - right;
    }

    let mut y = bounds.center_y;
    if y - top < 0.0 {
        y = top;
    }
    if y + bottom > CANVAS_HEIGHT {
        y = CANVAS_HEIGHT - bottom;
    }

    Point::new(x, y)
}

/// Largest share of `(dx, dy)` that keeps the whole group on the canvas.
///
/// One shared delta is applied to every member, so relative layout is
/// preserved exactly. Each violated canvas side pulls its delta axis back by
/// the overflow amount rather than zeroing it. Empty groups pass the delta
/// through.
#[must_use]
pub fn clamp_delta_for_group(resources: &[ResourceBounds], dx: f64, dy: f64) -> (f64, f64) {
    if resources.is_empty() {
        return (dx, dy);
    }
    let group = combined_bounding_box(resources);

    let moved_min_x = group.min_x + dx;
    let moved_max_x = group.max_x + dx;
    let mut out_dx = dx;
    if moved_min_x < 0.0 {
        out_dx -= moved_min_x;
    }
    if moved_max_x > CANVAS_WIDTH {
        out_dx -= moved_max_x - CANVAS_WIDTH;
    }

    let moved_min_y = group.min_y + dy;
    let moved_max_y = group.max_y + dy;
    let mut out_dy = dy;
    if moved_min_y < 0.0 {
        out_dy -= moved_min_y;
    }
    if moved_max_y > CANVAS_HEIGHT {
        out_dy -= moved_max_y - CANVAS_HEIGHT;
    }

    (out_dx, out_dy)
}

/// Clamped half-extents for a resize at the snapshot's center and rotation.
///
/// The snapshot supplies center, rotation, and shape; its stored
/// half-extents are ignored in favor of the proposal. Both outputs are
/// floored at [`MIN_HALF_EXTENT`]. A single uniform scale is applied to
/// both axes, so resizing one axis near a diagonal boundary shrinks both.
#[must_use]
pub fn clamp_resize_dimensions(
    bounds: &ResourceBounds,
    proposed_w: f64,
    proposed_h: f64,
) -> (f64, f64) {
    let cx = bounds.center_x;
    let cy = bounds.center_y;

    // Fast path: the proposal fits without accounting for rotation.
    if cx - proposed_w >= 0.0
        && cx + proposed_w <= CANVAS_WIDTH
        && cy - proposed_h >= 0.0
        && cy + proposed_h <= CANVAS_HEIGHT
    {
        return (proposed_w.max(MIN_HALF_EXTENT), proposed_h.max(MIN_HALF_EXTENT));
    }

    // Largest rotated half-extents allowed at this center: nearest wall per
    // axis.
    let max_horiz = cx.min(CANVAS_WIDTH - cx);
    let max_vert = cy.min(CANVAS_HEIGHT - cy);

    let scale = match bounds.shape {
        TableShape::Rect => {
            let theta = bounds.rotation.to_radians();
            let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
            let horiz = proposed_w * cos + proposed_h * sin;
            let vert = proposed_w * sin + proposed_h * cos;
            let mut scale: f64 = 1.0;
            if horiz > 0.0 {
                scale = scale.min(max_horiz / horiz);
            }
            if vert > 0.0 {
                scale = scale.min(max_vert / vert);
            }
            scale.max(0.0)
        }
        TableShape::Ellipse => {
            ellipse_fit_scale(bounds, proposed_w, proposed_h, max_horiz, max_vert)
        }
    };

    (
        (proposed_w * scale).max(MIN_HALF_EXTENT),
        (proposed_h * scale).max(MIN_HALF_EXTENT),
    )
}

/// Largest uniform scale whose rotated-ellipse silhouette fits the allowed
/// extents.
///
/// The rotated-ellipse box has no closed-form inverse back to semi-axes
/// when the axes differ, so this bisects a scale factor over the proposal
/// range, evaluating the silhouette at each probe. The converged scale is
/// capped at 1: a clamp can only ever shrink a proposal.
fn ellipse_fit_scale(
    bounds: &ResourceBounds,
    proposed_w: f64,
    proposed_h: f64,
    max_horiz: f64,
    max_vert: f64,
) -> f64 {
    let fits = |s: f64| {
        let probe = ResourceBounds {
            half_width: proposed_w * s,
            half_height: proposed_h * s,
            ..*bounds
        };
        let bbox = rotated_bounding_box(&probe);
        bbox.width() / 2.0 <= max_horiz && bbox.height() / 2.0 <= max_vert
    };

    let mut lo: f64 = 0.0;
    let mut hi = proposed_w.max(proposed_h);
    for _ in 0..RESIZE_SOLVER_ITERATIONS {
        let mid = (lo + hi) / 2.0;
        if fits(mid) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo.min(1.0)
}
