//! Per-sector metadata: bounds and the two optional geometry payloads.

use strata_view::Aabb;

/// Identifier of a sector, unique within its model.
pub type SectorId = u32;

/// Full-detail geometry of a sector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailedPayload {
    /// Geometry file to fetch.
    pub file_name: String,
    /// Bytes downloaded to show the sector in full detail.
    pub download_size: u64,
    /// Estimated number of draw calls once loaded.
    pub estimated_draw_calls: u64,
}

/// Coarse stand-in geometry of a sector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimplePayload {
    /// Geometry file to fetch.
    pub file_name: String,
    /// Bytes downloaded to show the sector simplified.
    pub download_size: u64,
}

/// Input describing one sector when building a scene.
#[derive(Clone, Debug, PartialEq)]
pub struct SectorDescriptor {
    pub id: SectorId,
    pub bounds: Aabb,
    pub detailed: Option<DetailedPayload>,
    pub simple: Option<SimplePayload>,
}

impl SectorDescriptor {
    /// A sector without any payload.
    pub fn new(id: SectorId, bounds: Aabb) -> Self {
        Self {
            id,
            bounds,
            detailed: None,
            simple: None,
        }
    }

    pub fn with_detailed(mut self, payload: DetailedPayload) -> Self {
        self.detailed = Some(payload);
        self
    }

    pub fn with_simple(mut self, payload: SimplePayload) -> Self {
        self.simple = Some(payload);
        self
    }
}

/// A node of the sector hierarchy.
#[derive(Clone, Debug, PartialEq)]
pub struct SectorMetadata {
    /// Sector id, unique within the model.
    pub id: SectorId,
    /// Slash-delimited position in the hierarchy, e.g. `"0/1/"`.
    pub path: String,
    /// Distance from the root (root is 0).
    pub depth: u32,
    /// Model-space bounds.
    pub bounds: Aabb,
    pub detailed: Option<DetailedPayload>,
    pub simple: Option<SimplePayload>,
    pub(crate) index: usize,
    pub(crate) parent: Option<usize>,
    pub(crate) children: Vec<usize>,
}

impl SectorMetadata {
    /// Position in the owning scene's arena. Parents always come before
    /// their children; the root is 0.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Arena index of the parent, `None` for the root.
    pub fn parent_index(&self) -> Option<usize> {
        self.parent
    }

    /// Arena indices of the children, in insertion order.
    pub fn child_indices(&self) -> &[usize] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn has_simple(&self) -> bool {
        self.simple.is_some()
    }

    pub fn has_detailed(&self) -> bool {
        self.detailed.is_some()
    }
}
