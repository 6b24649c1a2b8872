//! Viewport: the visible window onto the canvas and pixel-to-unit
//! conversion.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, MIN_VIEWPORT_EXTENT};

/// A point in either screen-pixel or canvas-unit space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The sub-rectangle of canvas-unit space currently mapped onto the screen.
///
/// `width` and `height` shrink as the user zooms in. `Default` shows the
/// whole canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, width: CANVAS_WIDTH, height: CANVAS_HEIGHT }
    }
}

impl Viewport {
    /// Canvas units per screen pixel on each axis.
    ///
    /// Degenerate screen dimensions fall back to a neutral scale of 1.
    #[must_use]
    pub fn scale(&self, screen_width: f64, screen_height: f64) -> (f64, f64) {
        let sx = if screen_width > 0.0 { self.width / screen_width } else { 1.0 };
        let sy = if screen_height > 0.0 { self.height / screen_height } else { 1.0 };
        (sx, sy)
    }

    /// Convert a screen-pixel delta to canvas units.
    #[must_use]
    pub fn screen_delta_to_canvas(
        &self,
        dx_px: f64,
        dy_px: f64,
        screen_width: f64,
        screen_height: f64,
    ) -> (f64, f64) {
        let (sx, sy) = self.scale(screen_width, screen_height);
        (dx_px * sx, dy_px * sy)
    }

    /// Pan by a screen-pixel delta: dragging the content right moves the
    /// window left.
    #[must_use]
    pub fn pan_by_screen(
        &self,
        dx_px: f64,
        dy_px: f64,
        screen_width: f64,
        screen_height: f64,
    ) -> Viewport {
        let (dx, dy) = self.screen_delta_to_canvas(dx_px, dy_px, screen_width, screen_height);
        Viewport { x: self.x - dx, y: self.y - dy, ..*self }
    }

    /// Zoom toward the cursor by `factor` (below 1 zooms in).
    ///
    /// The canvas point under the cursor stays under the cursor. Requests
    /// that would leave the window larger than the canvas or smaller than
    /// [`MIN_VIEWPORT_EXTENT`] on either axis are no-ops returning the
    /// viewport unchanged.
    #[must_use]
    pub fn zoom_by(
        &self,
        factor: f64,
        cursor: Point,
        screen_width: f64,
        screen_height: f64,
    ) -> Viewport {
        let new_width = self.width * factor;
        let new_height = self.height * factor;
        if new_width > CANVAS_WIDTH || new_height > CANVAS_HEIGHT {
            return *self;
        }
        if new_width < MIN_VIEWPORT_EXTENT || new_height < MIN_VIEWPORT_EXTENT {
            return *self;
        }

        // Canvas point currently under the cursor.
        let (sx, sy) = self.scale(screen_width, screen_height);
        let anchor_x = self.x + cursor.x * sx;
        let anchor_y = self.y + cursor.y * sy;

        let next = Viewport { width: new_width, height: new_height, ..*self };
        let (nsx, nsy) = next.scale(screen_width, screen_height);
        Viewport {
            x: anchor_x - cursor.x * nsx,
            y: anchor_y - cursor.y * nsy,
            width: new_width,
            height: new_height,
        }
    }
}
