//! Arena-backed sector hierarchy and its builder.

use glam::Mat4;
use rustc_hash::FxHashMap;
use strata_index::IndexSet;
use strata_view::{Aabb, Frustum};

use crate::{SceneError, SectorDescriptor, SectorId, SectorMetadata};

/// The immutable sector hierarchy of one model.
///
/// Sectors live in a flat arena; parent and child links are arena indices.
/// Lookups by [`SectorId`] go through a hash index.
#[derive(Clone, Debug)]
pub struct SectorScene {
    sectors: Vec<SectorMetadata>,
    index_of: FxHashMap<SectorId, usize>,
}

impl SectorScene {
    /// Start building a scene from its root sector.
    pub fn builder(root: SectorDescriptor) -> SectorSceneBuilder {
        SectorSceneBuilder::new(root)
    }

    pub fn root(&self) -> &SectorMetadata {
        &self.sectors[0]
    }

    /// Model-space bounds of the whole scene.
    pub fn bounds(&self) -> Aabb {
        self.root().bounds
    }

    /// Total number of sectors. Never zero.
    pub fn sector_count(&self) -> usize {
        self.sectors.len()
    }

    /// All sectors in arena order (parents before children).
    pub fn sectors(&self) -> &[SectorMetadata] {
        &self.sectors
    }

    pub fn get(&self, id: SectorId) -> Option<&SectorMetadata> {
        self.index_of(id).map(|index| &self.sectors[index])
    }

    /// Arena index of the sector with the given id.
    pub fn index_of(&self, id: SectorId) -> Option<usize> {
        self.index_of.get(&id).copied()
    }

    /// Sector at an arena index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= sector_count()`.
    pub fn sector_at(&self, index: usize) -> &SectorMetadata {
        &self.sectors[index]
    }

    pub fn parent(&self, sector: &SectorMetadata) -> Option<&SectorMetadata> {
        sector.parent.map(|index| &self.sectors[index])
    }

    pub fn children<'a>(
        &'a self,
        sector: &'a SectorMetadata,
    ) -> impl Iterator<Item = &'a SectorMetadata> + 'a {
        sector.children.iter().map(|&index| &self.sectors[index])
    }

    /// Ids of every sector in the scene.
    pub fn sector_ids(&self) -> IndexSet {
        self.sectors.iter().map(|s| s.id).collect()
    }

    /// Pre-order depth-first traversal, visiting children in insertion order.
    pub fn depth_first(&self) -> impl Iterator<Item = &SectorMetadata> + '_ {
        let mut stack = vec![0usize];
        std::iter::from_fn(move || {
            let index = stack.pop()?;
            let sector = &self.sectors[index];
            stack.extend(sector.children.iter().rev());
            Some(sector)
        })
    }

    /// Sectors whose model-space bounds intersect the frustum of
    /// `projection * view`.
    ///
    /// `view` should include the model transform so that the test runs in
    /// model space. A sector whose bounds miss the frustum prunes its whole
    /// subtree; child bounds are contained in their parent's.
    pub fn sectors_intersecting_frustum(
        &self,
        projection: &Mat4,
        view: &Mat4,
    ) -> Vec<&SectorMetadata> {
        let frustum = Frustum::from_projection_and_view(projection, view);
        let mut intersecting = Vec::new();
        let mut stack = vec![0usize];
        while let Some(index) = stack.pop() {
            let sector = &self.sectors[index];
            if !frustum.intersects_aabb(&sector.bounds) {
                continue;
            }
            intersecting.push(sector);
            stack.extend(sector.children.iter().rev());
        }
        intersecting
    }
}

/// Incrementally assembles a [`SectorScene`].
#[derive(Debug)]
pub struct SectorSceneBuilder {
    sectors: Vec<SectorMetadata>,
    index_of: FxHashMap<SectorId, usize>,
}

impl SectorSceneBuilder {
    /// Start a scene with the given root sector, which gets path `"0/"`.
    pub fn new(root: SectorDescriptor) -> Self {
        let mut index_of = FxHashMap::default();
        index_of.insert(root.id, 0);
        let root = SectorMetadata {
            id: root.id,
            path: "0/".to_string(),
            depth: 0,
            bounds: root.bounds,
            detailed: root.detailed,
            simple: root.simple,
            index: 0,
            parent: None,
            children: Vec::new(),
        };
        Self {
            sectors: vec![root],
            index_of,
        }
    }

    /// Attach `child` under the sector with id `parent`.
    ///
    /// The child's path is the parent's path followed by its position among
    /// the parent's children, e.g. the second child of `"0/"` is `"0/1/"`.
    pub fn add_child(
        &mut self,
        parent: SectorId,
        child: SectorDescriptor,
    ) -> Result<&mut Self, SceneError> {
        let parent_index = *self
            .index_of
            .get(&parent)
            .ok_or(SceneError::UnknownParent(parent))?;
        if self.index_of.contains_key(&child.id) {
            return Err(SceneError::DuplicateSectorId(child.id));
        }

        self.attach(parent_index, child);
        Ok(self)
    }

    /// Attach a child whose id is known to be fresh under an existing
    /// parent index. Returns the child's arena index.
    pub(crate) fn attach(&mut self, parent_index: usize, child: SectorDescriptor) -> usize {
        let index = self.sectors.len();
        let parent_sector = &mut self.sectors[parent_index];
        let path = format!("{}{}/", parent_sector.path, parent_sector.children.len());
        let depth = parent_sector.depth + 1;
        parent_sector.children.push(index);

        self.index_of.insert(child.id, index);
        self.sectors.push(SectorMetadata {
            id: child.id,
            path,
            depth,
            bounds: child.bounds,
            detailed: child.detailed,
            simple: child.simple,
            index,
            parent: Some(parent_index),
            children: Vec::new(),
        });
        index
    }

    pub fn build(self) -> SectorScene {
        SectorScene {
            sectors: self.sectors,
            index_of: self.index_of,
        }
    }
}
