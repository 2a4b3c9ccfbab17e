use std::sync::Arc;

use strata_scene::{ModelKey, SectorId, SectorMetadata, SectorScene};

use crate::LevelOfDetail;

/// A sector the loading side should hold at the given level of detail.
#[derive(Clone, Debug)]
pub struct PrioritizedWantedSector {
    pub model: ModelKey,
    pub level_of_detail: LevelOfDetail,
    /// Priority that justified the last promotion. `+inf` for sectors
    /// forced near the camera, negative for sectors never ranked.
    pub priority: f64,
    scene: Arc<SectorScene>,
    sector_index: usize,
}

impl PrioritizedWantedSector {
    pub(crate) fn new(
        model: ModelKey,
        scene: Arc<SectorScene>,
        sector_index: usize,
        level_of_detail: LevelOfDetail,
        priority: f64,
    ) -> Self {
        Self {
            model,
            level_of_detail,
            priority,
            scene,
            sector_index,
        }
    }

    #[must_use]
    pub fn metadata(&self) -> &SectorMetadata {
        self.scene.sector_at(self.sector_index)
    }

    #[must_use]
    pub fn sector_id(&self) -> SectorId {
        self.metadata().id
    }

    /// Whether the loading side needs to fetch anything for this sector.
    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.level_of_detail != LevelOfDetail::Discarded
    }
}
