//! The layout engine: gesture interpretation and the mutation vocabulary.
//!
//! `LayoutEngine` owns the floor model, viewport, selection, and the drag
//! state machine. The host wires pointer events in and reacts to what comes
//! back: previews are uncommitted rendering feedback, commits have already
//! been applied to the local store and must be persisted. A drag that ends
//! where it started commits nothing, so undo history never records null
//! moves.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use uuid::Uuid;

use crate::clamp::{clamp_center_to_canvas, clamp_delta_for_group, clamp_resize_dimensions};
use crate::consts::QUICK_ADD_HALF_EXTENT;
use crate::floor::{FloorStore, PartialResource, Resource, ResourceBounds, ResourceId, TableShape};
use crate::input::{DragFrame, DragState, ResizeHandle, UiState};
use crate::viewport::{Point, Viewport};

/// Mutations returned to the host for persistence.
///
/// Committed gestures are applied to the local store before the action is
/// returned; the host's job is to write the same change to its backing
/// store and undo history.
#[derive(Debug, Clone)]
pub enum Action {
    ResourceCreated(Resource),
    ResourceUpdated { id: ResourceId, fields: PartialResource },
    ResourceDeleted { id: ResourceId },
    ResourcesMoved { ids: Vec<ResourceId>, dx: f64, dy: f64 },
    ResourcesRotated { ids: Vec<ResourceId>, degrees: f64 },
}

/// Result of feeding one drag frame to the engine.
#[derive(Debug, Clone)]
pub enum DragUpdate {
    /// Nothing to do: no gesture in progress, or a fully clamped no-op
    /// release.
    None,
    /// Live uncommitted value, for rendering feedback only.
    Preview(DragPreview),
    /// A mutation that has been applied locally and must be persisted.
    Commit(Action),
}

/// Live feedback value during a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragPreview {
    /// Clamped, grid-snapped translation of the whole selection.
    Move { dx: f64, dy: f64 },
    /// Clamped half-extents of the resource under the handle.
    Resize { id: ResourceId, half_width: f64, half_height: f64 },
}

/// Headless core of the layout editor.
pub struct LayoutEngine {
    /// The floor model.
    pub floor: FloorStore,
    /// Pan/zoom window onto the canvas.
    pub viewport: Viewport,
    /// Selection and grid settings.
    pub ui: UiState,
    /// The active gesture.
    pub drag: DragState,
    /// Pixel width of the host canvas element.
    pub screen_width: f64,
    /// Pixel height of the host canvas element.
    pub screen_height: f64,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self {
            floor: FloorStore::new(),
            viewport: Viewport::default(),
            ui: UiState::default(),
            drag: DragState::Idle,
            screen_width: 0.0,
            screen_height: 0.0,
        }
    }
}

impl LayoutEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Hydrate the floor from a persisted snapshot. Selection entries that
    /// no longer resolve are dropped.
    pub fn load_snapshot(&mut self, resources: Vec<Resource>) {
        self.floor.load_snapshot(resources);
        let floor = &self.floor;
        self.ui.selected.retain(|id| floor.get(id).is_some());
    }

    /// Apply a host-side write: resource created.
    pub fn apply_create(&mut self, resource: Resource) {
        self.floor.insert(resource);
    }

    /// Apply a host-side write: resource updated.
    pub fn apply_update(&mut self, id: &ResourceId, fields: &PartialResource) {
        self.floor.apply_partial(id, fields);
    }

    /// Apply a host-side write: resource deleted. A deleted resource leaves
    /// the selection too.
    pub fn apply_delete(&mut self, id: &ResourceId) {
        self.floor.remove(id);
        self.ui.selected.retain(|selected| selected != id);
    }

    // --- Selection ---

    /// Replace the selection. Ids that don't resolve are dropped.
    pub fn set_selection(&mut self, ids: Vec<ResourceId>) {
        let floor = &self.floor;
        self.ui.selected = ids.into_iter().filter(|id| floor.get(id).is_some()).collect();
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) {
        self.ui.selected.clear();
    }

    /// Currently selected ids, in selection order.
    #[must_use]
    pub fn selection(&self) -> &[ResourceId] {
        &self.ui.selected
    }

    // --- Screen binding ---

    /// Record the host canvas element's pixel size, consumed by every
    /// pixel-to-unit conversion.
    pub fn set_screen_size(&mut self, width: f64, height: f64) {
        self.screen_width = width;
        self.screen_height = height;
    }

    // --- Viewport ---

    /// Pan the viewport by a screen-pixel delta.
    pub fn pan_by(&mut self, dx_px: f64, dy_px: f64) {
        self.viewport =
            self.viewport.pan_by_screen(dx_px, dy_px, self.screen_width, self.screen_height);
    }

    /// Zoom toward a cursor position. Out-of-range factors leave the
    /// viewport unchanged.
    pub fn zoom_by(&mut self, factor: f64, cursor: Point) {
        self.viewport =
            self.viewport.zoom_by(factor, cursor, self.screen_width, self.screen_height);
    }

    // --- Drag gesture ---

    /// Begin a gesture on `frame.resource`.
    ///
    /// Grabbing a resource outside the current selection retargets the
    /// selection to that single resource first, so the gesture always acts
    /// on a sensible set. Unknown ids leave the machine idle.
    pub fn on_drag_start(&mut self, frame: &DragFrame) {
        let Some(resource) = self.floor.get(&frame.resource) else {
            return;
        };
        let grabbed = resource.bounds();

        if !self.ui.selected.contains(&frame.resource) {
            self.ui.selected = vec![frame.resource];
        }

        self.drag = match frame.handle {
            Some(handle) => DragState::Resizing { id: frame.resource, handle, start: grabbed },
            None => DragState::Moving { start: self.selection_bounds() },
        };
        tracing::debug!(resource = %frame.resource, handle = ?frame.handle, "drag started");
    }

    /// Interpret one drag frame into a live preview.
    #[must_use]
    pub fn on_drag_move(&self, frame: &DragFrame) -> DragUpdate {
        match &self.drag {
            DragState::Idle => DragUpdate::None,
            DragState::Resizing { id, handle, start } => {
                let (half_width, half_height) = self.resize_proposal(frame, *handle, start);
                DragUpdate::Preview(DragPreview::Resize { id: *id, half_width, half_height })
            }
            DragState::Moving { start } => {
                let (dx, dy) = self.move_proposal(frame, start);
                DragUpdate::Preview(DragPreview::Move { dx, dy })
            }
        }
    }

    /// Finish the gesture: re-run the clamp on the final frame and commit.
    ///
    /// A release whose clamped value matches the start state commits
    /// nothing.
    pub fn on_drag_end(&mut self, frame: &DragFrame) -> DragUpdate {
        let drag = std::mem::take(&mut self.drag);
        match drag {
            DragState::Idle => DragUpdate::None,
            DragState::Resizing { id, handle, start } => {
                let (half_width, half_height) = self.resize_proposal(frame, handle, &start);
                if (half_width - start.half_width).abs() < f64::EPSILON
                    && (half_height - start.half_height).abs() < f64::EPSILON
                {
                    return DragUpdate::None;
                }
                let fields = PartialResource {
                    half_width: Some(half_width),
                    half_height: Some(half_height),
                    ..Default::default()
                };
                self.floor.apply_partial(&id, &fields);
                tracing::debug!(%id, half_width, half_height, "resize committed");
                DragUpdate::Commit(Action::ResourceUpdated { id, fields })
            }
            DragState::Moving { start } => {
                let (dx, dy) = self.move_proposal(frame, &start);
                if dx.abs() < f64::EPSILON && dy.abs() < f64::EPSILON {
                    return DragUpdate::None;
                }
                let ids: Vec<ResourceId> = start.iter().map(|(id, _)| *id).collect();
                for (id, bounds) in &start {
                    let fields = PartialResource {
                        center_x: Some(bounds.center_x + dx),
                        center_y: Some(bounds.center_y + dy),
                        ..Default::default()
                    };
                    self.floor.apply_partial(id, &fields);
                }
                tracing::debug!(count = ids.len(), dx, dy, "move committed");
                DragUpdate::Commit(Action::ResourcesMoved { ids, dx, dy })
            }
        }
    }

    /// Abandon the gesture without committing.
    pub fn cancel_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Whether a gesture is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        !matches!(self.drag, DragState::Idle)
    }

    // --- Rotation ---

    /// Rotate the selection by a degree delta, normalizing each resource
    /// into `[0, 360)`. Returns `None` on an empty selection.
    pub fn rotate_selection(&mut self, degrees: f64) -> Option<Action> {
        if self.ui.selected.is_empty() {
            return None;
        }
        let ids = self.ui.selected.clone();
        for id in &ids {
            if let Some(resource) = self.floor.get(id) {
                let normalized = (resource.rotation + degrees).rem_euclid(360.0);
                let fields =
                    PartialResource { rotation: Some(normalized), ..Default::default() };
                self.floor.apply_partial(id, &fields);
            }
        }
        Some(Action::ResourcesRotated { ids, degrees })
    }

    // --- Creation / deletion ---

    /// Quick-add a table at the default size, clamping the requested center
    /// onto the canvas. The new table becomes the selection.
    pub fn add_table(&mut self, shape: TableShape, floor_id: ResourceId, center: Point) -> Action {
        let requested = ResourceBounds {
            shape,
            center_x: center.x,
            center_y: center.y,
            half_width: QUICK_ADD_HALF_EXTENT,
            half_height: QUICK_ADD_HALF_EXTENT,
            rotation: 0.0,
        };
        let clamped = clamp_center_to_canvas(&requested);
        let resource = Resource {
            id: Uuid::new_v4(),
            floor_id,
            shape,
            center_x: clamped.x,
            center_y: clamped.y,
            half_width: QUICK_ADD_HALF_EXTENT,
            half_height: QUICK_ADD_HALF_EXTENT,
            rotation: 0.0,
            props: serde_json::json!({}),
            version: 1,
        };
        self.floor.insert(resource.clone());
        self.ui.selected = vec![resource.id];
        tracing::debug!(id = %resource.id, "table added");
        Action::ResourceCreated(resource)
    }

    /// Delete every selected resource, returning one action per removal.
    pub fn delete_selection(&mut self) -> Vec<Action> {
        let ids = std::mem::take(&mut self.ui.selected);
        let mut actions = Vec::new();
        for id in ids {
            if self.floor.remove(&id).is_some() {
                actions.push(Action::ResourceDeleted { id });
            }
        }
        actions
    }

    // --- Queries ---

    /// Look up a resource by id.
    #[must_use]
    pub fn resource(&self, id: &ResourceId) -> Option<&Resource> {
        self.floor.get(id)
    }

    // --- Proposal math ---

    fn resize_proposal(
        &self,
        frame: &DragFrame,
        handle: ResizeHandle,
        start: &ResourceBounds,
    ) -> (f64, f64) {
        let (dx, dy) = self.viewport.screen_delta_to_canvas(
            frame.delta_x_px,
            frame.delta_y_px,
            self.screen_width,
            self.screen_height,
        );
        let (fx, fy) = handle.delta_factors();
        // Moving one edge by d changes the half-extent by d/2.
        let proposed_w = start.half_width + fx * dx / 2.0;
        let proposed_h = start.half_height + fy * dy / 2.0;
        clamp_resize_dimensions(start, proposed_w, proposed_h)
    }

    fn move_proposal(
        &self,
        frame: &DragFrame,
        start: &[(ResourceId, ResourceBounds)],
    ) -> (f64, f64) {
        let (dx, dy) = self.viewport.screen_delta_to_canvas(
            frame.delta_x_px,
            frame.delta_y_px,
            self.screen_width,
            self.screen_height,
        );
        let dx = snap_to_grid(dx, self.ui.grid_size);
        let dy = snap_to_grid(dy, self.ui.grid_size);
        let group: Vec<ResourceBounds> = start.iter().map(|(_, bounds)| *bounds).collect();
        clamp_delta_for_group(&group, dx, dy)
    }

    fn selection_bounds(&self) -> Vec<(ResourceId, ResourceBounds)> {
        self.ui
            .selected
            .iter()
            .filter_map(|id| self.floor.get(id).map(|resource| (*id, resource.bounds())))
            .collect()
    }
}

/// Snap a canvas-unit value to the grid. Non-positive pitches disable
/// snapping.
fn snap_to_grid(value: f64, grid: f64) -> f64 {
    if grid > 0.0 { (value / grid).round() * grid } else { value }
}
