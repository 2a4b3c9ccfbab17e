//! Budget-constrained sector selection for streamed CAD models.
//!
//! Each update the [`VisibilityBudgetCuller`] rebuilds a [`ModelBudgetTracker`]
//! holding one [`SectorSelectionTree`] per model, forces full detail for the
//! sectors right around the camera, and then promotes ranked candidates to
//! [`LevelOfDetail::Detailed`] for as long as the [`SectorBudget`] allows.

mod budget;
mod capabilities;
mod cost;
mod culler;
mod error;
mod lod;
mod selection_tree;
mod wanted;

pub use budget::{ModelBudgetTracker, SectorBudget};
pub use capabilities::{
    OcclusionFilter, PassThroughOcclusion, PrioritizedSectorCandidate, ProjectedAreaRanker,
    VisibilityRanker,
};
pub use cost::{SectorCost, SectorCostFn, default_cost_fn, default_sector_cost};
pub use culler::{
    DetermineSectorsInput, DeterminedSectors, SectorLoadingSpendage, VisibilityBudgetCuller,
};
pub use error::{CapabilityError, CullingError};
pub use lod::LevelOfDetail;
pub use selection_tree::{SectorSelectionTree, UNPRIORITIZED};
pub use wanted::PrioritizedWantedSector;
