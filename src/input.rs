//! Drag input: resize handles, pointer frames, and the gesture state
//! machine.
//!
//! The host's drag source delivers raw screen-pixel deltas plus a symbolic
//! handle id when the gesture grabbed a resize handle. `DragFrame` is that
//! per-event payload; `DragState` is the active gesture being tracked
//! between drag start and release, carrying the start snapshots every frame
//! recomputes from.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::GRID_SIZE;
use crate::floor::{ResourceBounds, ResourceId};

/// Anchor position of a resize handle on the selection outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeHandle {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeHandle {
    /// Parse the host drag source's symbolic handle id.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "t" => Some(Self::N),
            "tr" => Some(Self::Ne),
            "r" => Some(Self::E),
            "br" => Some(Self::Se),
            "b" => Some(Self::S),
            "bl" => Some(Self::Sw),
            "l" => Some(Self::W),
            "tl" => Some(Self::Nw),
            _ => None,
        }
    }

    /// The symbolic id the host uses for this handle.
    #[must_use]
    pub fn as_id(self) -> &'static str {
        match self {
            Self::N => "t",
            Self::Ne => "tr",
            Self::E => "r",
            Self::Se => "br",
            Self::S => "b",
            Self::Sw => "bl",
            Self::W => "l",
            Self::Nw => "tl",
        }
    }

    /// Per-axis sign of the half-extent change for a positive pointer
    /// delta.
    ///
    /// Edge handles move one axis, corner handles both. Dragging the right
    /// or bottom edge outward grows the shape; the left or top edge grows
    /// it when dragged outward, i.e. toward negative deltas.
    #[must_use]
    pub fn delta_factors(self) -> (f64, f64) {
        match self {
            Self::N => (0.0, -1.0),
            Self::Ne => (1.0, -1.0),
            Self::E => (1.0, 0.0),
            Self::Se => (1.0, 1.0),
            Self::S => (0.0, 1.0),
            Self::Sw => (-1.0, 1.0),
            Self::W => (-1.0, 0.0),
            Self::Nw => (-1.0, -1.0),
        }
    }
}

/// One pointer event from the host drag source.
///
/// Deltas are cumulative screen pixels since the gesture started; the same
/// frame shape is delivered for every move and for the release.
#[derive(Debug, Clone, Copy)]
pub struct DragFrame {
    /// The resource under the pointer when the gesture started.
    pub resource: ResourceId,
    /// Present when the gesture grabbed a resize handle instead of the
    /// body.
    pub handle: Option<ResizeHandle>,
    /// Cumulative horizontal pointer travel in screen pixels.
    pub delta_x_px: f64,
    /// Cumulative vertical pointer travel in screen pixels.
    pub delta_y_px: f64,
}

/// The active gesture, if any.
///
/// Start snapshots are captured once on drag start; every subsequent frame
/// recomputes its proposal from them, so frame delivery is stateless apart
/// from the snapshots themselves.
#[derive(Debug, Clone, Default)]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Moving the whole selection by one shared delta.
    Moving {
        /// Selected resources with their bounds at drag start.
        start: Vec<(ResourceId, ResourceBounds)>,
    },
    /// Resizing one resource by a handle.
    Resizing {
        /// Id of the resource being resized.
        id: ResourceId,
        /// Which handle is being dragged.
        handle: ResizeHandle,
        /// Bounds at drag start; center and rotation stay fixed.
        start: ResourceBounds,
    },
}

/// Selection and editor-surface settings the engine reads each gesture.
#[derive(Debug, Clone)]
pub struct UiState {
    /// Selected resource ids, in selection order.
    pub selected: Vec<ResourceId>,
    /// Move-snap grid pitch in canvas units.
    pub grid_size: f64,
}

impl Default for UiState {
    fn default() -> Self {
        Self { selected: Vec::new(), grid_size: GRID_SIZE }
    }
}
