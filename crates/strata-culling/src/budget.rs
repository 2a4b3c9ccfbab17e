//! Resource budget and the per-update tracker of selected sectors.
//!
//! Provides [`SectorBudget`] limits and [`ModelBudgetTracker`], which owns one
//! [`SectorSelectionTree`] per model and reports whether the combined
//! selection still fits the budget.

use rustc_hash::FxHashMap;
use strata_config::BudgetConfig;
use strata_index::IndexSet;
use strata_scene::{ModelKey, ModelMetadata, SectorId};

use crate::{
    CullingError, PrioritizedWantedSector, SectorCost, SectorCostFn, SectorSelectionTree,
};

/// Limits on what a single update may select.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectorBudget {
    /// Upper bound (exclusive) on bytes downloaded. Default: 35 MiB.
    pub geometry_download_size_bytes: u64,
    /// Upper bound (exclusive) on draw calls. Default: 2000.
    pub max_draw_calls: u64,
    /// Sectors closer to the camera than this are always shown in full
    /// detail, whatever the budget. Default: 10 world units.
    pub high_detail_proximity_threshold: f32,
}

impl Default for SectorBudget {
    fn default() -> Self {
        Self::from(&BudgetConfig::default())
    }
}

impl SectorBudget {
    /// Budget for constrained devices.
    #[must_use]
    pub fn low() -> Self {
        Self::from(&BudgetConfig::low())
    }

    /// Budget for high-end systems.
    #[must_use]
    pub fn high() -> Self {
        Self::from(&BudgetConfig::high())
    }
}

impl From<&BudgetConfig> for SectorBudget {
    fn from(config: &BudgetConfig) -> Self {
        Self {
            geometry_download_size_bytes: config.geometry_download_size_bytes,
            max_draw_calls: config.max_draw_calls,
            high_detail_proximity_threshold: config.high_detail_proximity_threshold,
        }
    }
}

/// Selection state of every model in the current update.
///
/// Models are kept in initialization order so that collected sectors with
/// equal priority come out in a stable order.
pub struct ModelBudgetTracker {
    cost_fn: SectorCostFn,
    trees: Vec<SectorSelectionTree>,
    tree_of: FxHashMap<ModelKey, usize>,
}

impl ModelBudgetTracker {
    #[must_use]
    pub fn new(cost_fn: SectorCostFn) -> Self {
        Self {
            cost_fn,
            trees: Vec::new(),
            tree_of: FxHashMap::default(),
        }
    }

    /// Start a fresh selection for `model`, replacing any previous one.
    pub fn initialize_scene(&mut self, model: &ModelMetadata) -> Result<(), CullingError> {
        let tree = SectorSelectionTree::new(model, self.cost_fn.clone())?;
        match self.tree_of.get(&model.key) {
            Some(&index) => self.trees[index] = tree,
            None => {
                self.tree_of.insert(model.key.clone(), self.trees.len());
                self.trees.push(tree);
            }
        }
        Ok(())
    }

    pub fn mark_sector_detailed(
        &mut self,
        model: &ModelKey,
        sector: SectorId,
        priority: f64,
    ) -> Result<(), CullingError> {
        let index = self.index_of(model)?;
        self.trees[index].mark_sector_detailed(sector, priority)
    }

    /// Combined cost of every model's selection.
    #[must_use]
    pub fn total_cost(&self) -> SectorCost {
        self.trees.iter().map(SectorSelectionTree::total_cost).sum()
    }

    /// Whether both the download size and the draw calls are strictly below
    /// the budget.
    #[must_use]
    pub fn is_within_budget(&self, budget: &SectorBudget) -> bool {
        let cost = self.total_cost();
        cost.download_size < budget.geometry_download_size_bytes
            && cost.draw_calls < budget.max_draw_calls
    }

    /// Every sector of every model, sorted by descending priority.
    pub fn collect_wanted_sectors(&self) -> Vec<PrioritizedWantedSector> {
        let mut wanted: Vec<_> = self
            .trees
            .iter()
            .flat_map(SectorSelectionTree::to_wanted_sectors)
            .collect();
        wanted.sort_by(|a, b| b.priority.total_cmp(&a.priority));
        wanted
    }

    /// Number of sectors shown across all models.
    #[must_use]
    pub fn wanted_sector_count(&self) -> usize {
        self.trees
            .iter()
            .map(SectorSelectionTree::determine_wanted_sector_count)
            .sum()
    }

    pub fn detailed_sector_ids(&self, model: &ModelKey) -> Result<IndexSet, CullingError> {
        let index = self.index_of(model)?;
        Ok(self.trees[index].detailed_sector_ids())
    }

    #[must_use]
    pub fn tree(&self, model: &ModelKey) -> Option<&SectorSelectionTree> {
        self.tree_of.get(model).map(|&index| &self.trees[index])
    }

    #[must_use]
    pub fn model_count(&self) -> usize {
        self.trees.len()
    }

    /// Drop every model's selection.
    pub fn clear(&mut self) {
        self.trees.clear();
        self.tree_of.clear();
    }

    fn index_of(&self, model: &ModelKey) -> Result<usize, CullingError> {
        self.tree_of
            .get(model)
            .copied()
            .ok_or_else(|| CullingError::UnknownModel(model.clone()))
    }
}

impl std::fmt::Debug for ModelBudgetTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelBudgetTracker")
            .field("trees", &self.trees)
            .finish_non_exhaustive()
    }
}
