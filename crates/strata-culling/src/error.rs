use strata_scene::{ModelKey, SectorId};
use thiserror::Error;

use crate::LevelOfDetail;

/// Failure reported by an injected ranking or occlusion capability.
pub type CapabilityError = Box<dyn std::error::Error + Send + Sync>;

/// Errors produced while selecting sectors.
///
/// The first three variants mean the selection state and the static sector
/// hierarchy disagree and are not recoverable within an update.
#[derive(Debug, Error)]
pub enum CullingError {
    #[error("sector {sector} is not part of model {model}")]
    UnknownSector { model: ModelKey, sector: SectorId },
    #[error("model {0} has not been initialized for this update")]
    UnknownModel(ModelKey),
    #[error("cannot compute a sector cost for level of detail {0}")]
    UnsupportedLevelOfDetail(LevelOfDetail),
    #[error("visibility ranking failed")]
    Ranking(#[source] CapabilityError),
    #[error("occlusion filtering failed")]
    Occlusion(#[source] CapabilityError),
}
