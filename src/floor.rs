//! Floor model: table resources, their geometric footprint, and the
//! in-memory store.
//!
//! A `Resource` is one table on the floor plan: a rectangle or ellipse with
//! a center, half-extents, and a free-running rotation. `PartialResource`
//! carries sparse edits (only present fields are applied), and `FloorStore`
//! owns the live resources for one floor. Data flows into this layer from
//! the host's persistence (snapshot hydration) and from the drag engine
//! (committed mutations); the host reads it back when rendering.

#[cfg(test)]
#[path = "floor_test.rs"]
mod floor_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a resource or a floor.
pub type ResourceId = Uuid;

/// Geometric silhouette of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableShape {
    /// Axis-aligned rectangle before rotation.
    Rect,
    /// Ellipse whose semi-axes are the half-extents.
    Ellipse,
}

/// Geometric snapshot of one resource.
///
/// Half-extents measure from the center: half-width/half-height for a
/// rectangle, semi-axis lengths for an ellipse. `rotation` is clockwise
/// degrees and may hold any real value; commit paths normalize it to
/// `[0, 360)`. The geometry layer works exclusively on these snapshots and
/// never holds them across calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceBounds {
    /// Rectangle or ellipse.
    pub shape: TableShape,
    /// Center x in canvas units.
    pub center_x: f64,
    /// Center y in canvas units.
    pub center_y: f64,
    /// Half-extent along the shape's local x axis.
    pub half_width: f64,
    /// Half-extent along the shape's local y axis.
    pub half_height: f64,
    /// Clockwise rotation in degrees around the center.
    pub rotation: f64,
}

/// A table resource as stored on a floor and on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Unique identifier for this resource.
    pub id: ResourceId,
    /// The floor this resource belongs to. Opaque here; floor membership
    /// bookkeeping lives in the host.
    pub floor_id: ResourceId,
    /// Rectangle or ellipse.
    pub shape: TableShape,
    /// Center x in canvas units.
    pub center_x: f64,
    /// Center y in canvas units.
    pub center_y: f64,
    /// Half-extent along the shape's local x axis.
    pub half_width: f64,
    /// Half-extent along the shape's local y axis.
    pub half_height: f64,
    /// Clockwise rotation in degrees around the center.
    pub rotation: f64,
    /// Open-ended host-owned properties (label, seat count, colors, etc.).
    /// Stored and merged here, never interpreted.
    pub props: serde_json::Value,
    /// Monotonically increasing edit counter used for conflict detection.
    pub version: i64,
}

impl Resource {
    /// The geometric footprint of this resource.
    #[must_use]
    pub fn bounds(&self) -> ResourceBounds {
        ResourceBounds {
            shape: self.shape,
            center_x: self.center_x,
            center_y: self.center_y,
            half_width: self.half_width,
            half_height: self.half_height,
            rotation: self.rotation,
        }
    }
}

/// Sparse update for a resource. Only present fields are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartialResource {
    /// New center x, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_x: Option<f64>,
    /// New center y, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_y: Option<f64>,
    /// New half-width, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub half_width: Option<f64>,
    /// New half-height, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub half_height: Option<f64>,
    /// New rotation in degrees, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Props keys to merge or remove (null values delete keys).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<serde_json::Value>,
    /// New version counter, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

/// In-memory store of the resources on one floor.
pub struct FloorStore {
    resources: HashMap<ResourceId, Resource>,
}

impl FloorStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { resources: HashMap::new() }
    }

    /// Insert or replace a resource. An existing resource with the same
    /// `id` is overwritten.
    pub fn insert(&mut self, resource: Resource) {
        self.resources.insert(resource.id, resource);
    }

    /// Remove a resource by id, returning it if it was present.
    pub fn remove(&mut self, id: &ResourceId) -> Option<Resource> {
        self.resources.remove(id)
    }

    /// Return a reference to a resource by id.
    #[must_use]
    pub fn get(&self, id: &ResourceId) -> Option<&Resource> {
        self.resources.get(id)
    }

    /// Apply a partial update to an existing resource. Returns false if the
    /// resource doesn't exist or the props payload is not a JSON object.
    pub fn apply_partial(&mut self, id: &ResourceId, partial: &PartialResource) -> bool {
        let Some(resource) = self.resources.get_mut(id) else {
            return false;
        };
        if let Some(x) = partial.center_x {
            resource.center_x = x;
        }
        if let Some(y) = partial.center_y {
            resource.center_y = y;
        }
        if let Some(w) = partial.half_width {
            resource.half_width = w;
        }
        if let Some(h) = partial.half_height {
            resource.half_height = h;
        }
        if let Some(r) = partial.rotation {
            resource.rotation = r;
        }
        if let Some(v) = partial.version {
            resource.version = v;
        }
        if let Some(ref props) = partial.props {
            let Some(incoming) = props.as_object() else {
                return false;
            };

            if !resource.props.is_object() {
                resource.props = serde_json::json!({});
            }

            if let Some(existing) = resource.props.as_object_mut() {
                for (k, v) in incoming {
                    if v.is_null() {
                        existing.remove(k);
                    } else {
                        existing.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        true
    }

    /// Replace all resources with a full snapshot.
    pub fn load_snapshot(&mut self, resources: Vec<Resource>) {
        self.resources.clear();
        for resource in resources {
            self.resources.insert(resource.id, resource);
        }
    }

    /// Return all resources in ascending id order, for deterministic host
    /// iteration.
    #[must_use]
    pub fn sorted_resources(&self) -> Vec<&Resource> {
        let mut resources: Vec<&Resource> = self.resources.values().collect();
        resources.sort_by_key(|r| r.id);
        resources
    }

    /// Number of resources currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns `true` if the store contains no resources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl Default for FloorStore {
    fn default() -> Self {
        Self::new()
    }
}
