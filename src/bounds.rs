//! Axis-aligned bounding boxes for rotated table shapes.
//!
//! The silhouette math lives here: a rectangle's rotated box comes from
//! rotating its four corners, an ellipse's from the analytic rotated-ellipse
//! formula. The ellipse box is never wider than the rectangle box at equal
//! inputs; the resize clamp relies on that difference.

#[cfg(test)]
#[path = "bounds_test.rs"]
mod bounds_test;

use crate::floor::{ResourceBounds, TableShape};

/// Smallest axis-aligned rectangle fully containing a shape or group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// The zero-size box at the origin, used for empty groups.
    pub const EMPTY: Self = Self { min_x: 0.0, min_y: 0.0, max_x: 0.0, max_y: 0.0 };

    /// Full width of the box.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Full height of the box.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Coordinate-wise union of two boxes.
    #[must_use]
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// Axis-aligned bounding box of one possibly-rotated resource.
#[must_use]
pub fn rotated_bounding_box(bounds: &ResourceBounds) -> BoundingBox {
    let theta = bounds.rotation.to_radians();
    let (sin, cos) = theta.sin_cos();
    let (half_w, half_h) = match bounds.shape {
        TableShape::Rect => {
            let corners = [
                (bounds.half_width, bounds.half_height),
                (-bounds.half_width, bounds.half_height),
                (bounds.half_width, -bounds.half_height),
                (-bounds.half_width, -bounds.half_height),
            ];
            let mut min_x = f64::INFINITY;
            let mut max_x = f64::NEG_INFINITY;
            let mut min_y = f64::INFINITY;
            let mut max_y = f64::NEG_INFINITY;
            for (x, y) in corners {
                let rx = x * cos - y * sin;
                let ry = x * sin + y * cos;
                min_x = min_x.min(rx);
                max_x = max_x.max(rx);
                min_y = min_y.min(ry);
                max_y = max_y.max(ry);
            }
            ((max_x - min_x) / 2.0, (max_y - min_y) / 2.0)
        }
        TableShape::Ellipse => {
            // Rotated-ellipse silhouette, tighter than the corner rectangle.
            let a = bounds.half_width;
            let b = bounds.half_height;
            let half_w = (a * a * cos * cos + b * b * sin * sin).sqrt();
            let half_h = (a * a * sin * sin + b * b * cos * cos).sqrt();
            (half_w, half_h)
        }
    };
    BoundingBox {
        min_x: bounds.center_x - half_w,
        min_y: bounds.center_y - half_h,
        max_x: bounds.center_x + half_w,
        max_y: bounds.center_y + half_h,
    }
}

/// Combined bounding box of a group of resources.
///
/// Empty input yields [`BoundingBox::EMPTY`]; a single element is identical
/// to calling [`rotated_bounding_box`] directly.
#[must_use]
pub fn combined_bounding_box(resources: &[ResourceBounds]) -> BoundingBox {
    let mut iter = resources.iter();
    let Some(first) = iter.next() else {
        return BoundingBox::EMPTY;
    };
    let mut combined = rotated_bounding_box(first);
    for bounds in iter {
        combined = combined.union(&rotated_bounding_box(bounds));
    }
    combined
}
