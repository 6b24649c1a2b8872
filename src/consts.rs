//! Shared numeric constants for the floor-plan engine.

// ── Canvas ──────────────────────────────────────────────────────

/// Canvas width in canvas units. Origin is top-left, y grows downward.
pub const CANVAS_WIDTH: f64 = 1200.0;

/// Canvas height in canvas units.
pub const CANVAS_HEIGHT: f64 = 800.0;

// ── Editing ─────────────────────────────────────────────────────

/// Default grid pitch that move deltas snap to, in canvas units.
pub const GRID_SIZE: f64 = 20.0;

/// Smallest half-extent a resize clamp will ever return.
pub const MIN_HALF_EXTENT: f64 = 20.0;

/// Half-extent of a quick-added table.
pub const QUICK_ADD_HALF_EXTENT: f64 = 40.0;

// ── Viewport ────────────────────────────────────────────────────

/// Smallest visible extent the viewport may zoom down to, in canvas units.
pub const MIN_VIEWPORT_EXTENT: f64 = 100.0;

// ── Solvers ─────────────────────────────────────────────────────

/// Bisection count for the rotated-ellipse resize solver. Sized for
/// canvas-pixel precision over the proposal range.
pub const RESIZE_SOLVER_ITERATIONS: u32 = 20;
