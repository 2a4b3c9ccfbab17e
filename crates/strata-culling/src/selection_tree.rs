//! Per-model level-of-detail overlay on a sector hierarchy.

use std::sync::Arc;

use strata_index::IndexSet;
use strata_scene::{ModelKey, ModelMetadata, SectorId, SectorMetadata, SectorScene};

use crate::{CullingError, LevelOfDetail, PrioritizedWantedSector, SectorCost, SectorCostFn};

/// Priority of sectors that were never ranked themselves: the root, simple
/// children of detailed sectors and ancestors promoted on a descendant's
/// behalf.
pub const UNPRIORITIZED: f64 = -1.0;

#[derive(Clone, Copy, Debug)]
struct NodeState {
    lod: LevelOfDetail,
    priority: f64,
    /// Cost at the resolved level of detail, already in the tree total.
    cost: SectorCost,
}

/// Which sectors of one model are shown, and at which level of detail.
///
/// The selection depends only on the set of sectors marked detailed:
/// - marked sectors and all their ancestors are [`LevelOfDetail::Detailed`],
/// - the root and every other child of a detailed sector is
///   [`LevelOfDetail::Simple`], or [`LevelOfDetail::Discarded`] if it has no
///   simple payload,
/// - everything else is discarded.
///
/// The total cost is maintained incrementally and is O(1) to query.
#[derive(Clone)]
pub struct SectorSelectionTree {
    model: ModelKey,
    scene: Arc<SectorScene>,
    cost_fn: SectorCostFn,
    nodes: Vec<NodeState>,
    total_cost: SectorCost,
}

impl SectorSelectionTree {
    /// Start a selection for `model` where only the root is shown simplified.
    pub fn new(model: &ModelMetadata, cost_fn: SectorCostFn) -> Result<Self, CullingError> {
        let discarded = NodeState {
            lod: LevelOfDetail::Discarded,
            priority: UNPRIORITIZED,
            cost: SectorCost::ZERO,
        };
        let mut tree = Self {
            model: model.key.clone(),
            scene: Arc::clone(&model.scene),
            cost_fn,
            nodes: vec![discarded; model.scene.sector_count()],
            total_cost: SectorCost::ZERO,
        };
        tree.set_state(0, LevelOfDetail::Simple, UNPRIORITIZED)?;
        Ok(tree)
    }

    #[must_use]
    pub fn model_key(&self) -> &ModelKey {
        &self.model
    }

    /// Show `sector` in full detail, together with all of its ancestors.
    ///
    /// Marking a sector that is already detailed only raises its priority.
    pub fn mark_sector_detailed(
        &mut self,
        sector: SectorId,
        priority: f64,
    ) -> Result<(), CullingError> {
        let index = self
            .scene
            .index_of(sector)
            .ok_or_else(|| CullingError::UnknownSector {
                model: self.model.clone(),
                sector,
            })?;

        let state = &mut self.nodes[index];
        if state.lod == LevelOfDetail::Detailed {
            state.priority = state.priority.max(priority);
            return Ok(());
        }
        self.promote(index, priority)?;

        let mut parent = self.scene.sector_at(index).parent_index();
        while let Some(index) = parent {
            // A detailed ancestor implies the rest of the path is detailed.
            if self.nodes[index].lod == LevelOfDetail::Detailed {
                break;
            }
            self.promote(index, UNPRIORITIZED)?;
            parent = self.scene.sector_at(index).parent_index();
        }
        Ok(())
    }

    /// One entry per sector of the model, in hierarchy order, including
    /// discarded sectors.
    pub fn to_wanted_sectors(&self) -> Vec<PrioritizedWantedSector> {
        self.resolved()
            .map(|(sector, lod, state)| {
                PrioritizedWantedSector::new(
                    self.model.clone(),
                    Arc::clone(&self.scene),
                    sector.index(),
                    lod,
                    state.priority,
                )
            })
            .collect()
    }

    /// Number of sectors that are not discarded.
    #[must_use]
    pub fn determine_wanted_sector_count(&self) -> usize {
        self.resolved()
            .filter(|(_, lod, _)| *lod != LevelOfDetail::Discarded)
            .count()
    }

    /// Combined cost of every shown sector.
    #[must_use]
    pub fn total_cost(&self) -> SectorCost {
        self.total_cost
    }

    /// Resolved level of detail of a sector, `None` if it is not in the model.
    #[must_use]
    pub fn level_of_detail(&self, sector: SectorId) -> Option<LevelOfDetail> {
        let index = self.scene.index_of(sector)?;
        Some(resolve(self.scene.sector_at(index), self.nodes[index].lod))
    }

    #[must_use]
    pub fn priority(&self, sector: SectorId) -> Option<f64> {
        self.scene
            .index_of(sector)
            .map(|index| self.nodes[index].priority)
    }

    /// Ids of every detailed sector.
    pub fn detailed_sector_ids(&self) -> IndexSet {
        self.resolved()
            .filter(|(_, lod, _)| *lod == LevelOfDetail::Detailed)
            .map(|(sector, _, _)| sector.id)
            .collect()
    }

    fn resolved(&self) -> impl Iterator<Item = (&SectorMetadata, LevelOfDetail, &NodeState)> {
        self.scene
            .sectors()
            .iter()
            .zip(&self.nodes)
            .map(|(sector, state)| (sector, resolve(sector, state.lod), state))
    }

    fn promote(&mut self, index: usize, priority: f64) -> Result<(), CullingError> {
        self.set_state(index, LevelOfDetail::Detailed, priority)?;
        let scene = Arc::clone(&self.scene);
        for &child in scene.sector_at(index).child_indices() {
            if self.nodes[child].lod == LevelOfDetail::Discarded {
                self.set_state(child, LevelOfDetail::Simple, UNPRIORITIZED)?;
            }
        }
        Ok(())
    }

    fn set_state(
        &mut self,
        index: usize,
        lod: LevelOfDetail,
        priority: f64,
    ) -> Result<(), CullingError> {
        let sector = self.scene.sector_at(index);
        let resolved = resolve(sector, lod);
        let cost = match resolved {
            LevelOfDetail::Discarded => SectorCost::ZERO,
            _ => (self.cost_fn)(sector, resolved)?,
        };

        let state = &mut self.nodes[index];
        self.total_cost -= state.cost;
        self.total_cost += cost;
        *state = NodeState {
            lod,
            priority,
            cost,
        };
        Ok(())
    }
}

impl std::fmt::Debug for SectorSelectionTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectorSelectionTree")
            .field("model", &self.model)
            .field("sector_count", &self.nodes.len())
            .field("total_cost", &self.total_cost)
            .finish_non_exhaustive()
    }
}

/// A sector without a simple payload cannot be shown simplified.
fn resolve(sector: &SectorMetadata, lod: LevelOfDetail) -> LevelOfDetail {
    match lod {
        LevelOfDetail::Simple if !sector.has_simple() => LevelOfDetail::Discarded,
        lod => lod,
    }
}
