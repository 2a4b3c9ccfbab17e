//! Injected capabilities: visibility ranking and occlusion filtering.

use std::future::{self, Future};

use glam::Mat4;
use strata_scene::{ModelKey, ModelMetadata, SectorId};
use strata_view::{Aabb, Camera, ClippingPlanes, ndc_area_of_box};

use crate::{CapabilityError, PrioritizedWantedSector};

/// A sector proposed for full detail, with its visibility priority.
#[derive(Clone, Debug, PartialEq)]
pub struct PrioritizedSectorCandidate {
    pub model: ModelKey,
    pub sector_id: SectorId,
    pub priority: f64,
}

/// Orders sectors by how much they contribute to the current view.
///
/// Candidates are consumed in the returned order, so the list should be
/// sorted by descending priority. Sectors with equal priority keep the
/// order the ranker gives them.
pub trait VisibilityRanker {
    fn rank(
        &mut self,
        camera: &Camera,
        models: &[ModelMetadata],
        clipping: &ClippingPlanes,
    ) -> Result<Vec<PrioritizedSectorCandidate>, CapabilityError>;
}

/// Removes wanted sectors hidden behind other geometry.
///
/// May complete at any later time, e.g. after a GPU readback.
pub trait OcclusionFilter {
    fn filter(
        &self,
        camera: &Camera,
        wanted: Vec<PrioritizedWantedSector>,
    ) -> impl Future<Output = Result<Vec<PrioritizedWantedSector>, CapabilityError>> + Send;
}

/// Occlusion filter that keeps every sector.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassThroughOcclusion;

impl OcclusionFilter for PassThroughOcclusion {
    fn filter(
        &self,
        _camera: &Camera,
        wanted: Vec<PrioritizedWantedSector>,
    ) -> impl Future<Output = Result<Vec<PrioritizedWantedSector>, CapabilityError>> + Send {
        future::ready(Ok(wanted))
    }
}

/// CPU ranker using the screen area covered by each sector's world bounds.
///
/// Only sectors with a detailed payload are ranked. Sectors outside the view,
/// or removed by the clipping planes, are left out.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProjectedAreaRanker;

impl VisibilityRanker for ProjectedAreaRanker {
    fn rank(
        &mut self,
        camera: &Camera,
        models: &[ModelMetadata],
        clipping: &ClippingPlanes,
    ) -> Result<Vec<PrioritizedSectorCandidate>, CapabilityError> {
        let mut candidates = Vec::new();
        for model in models {
            for sector in model.scene.sectors() {
                if !sector.has_detailed()
                    || !passes_clipping(clipping, &model.model_matrix, &sector.bounds)
                {
                    continue;
                }
                let area = ndc_area_of_box(camera, &sector.bounds.transformed(&model.model_matrix));
                if area > 0.0 {
                    candidates.push(PrioritizedSectorCandidate {
                        model: model.key.clone(),
                        sector_id: sector.id,
                        priority: f64::from(area),
                    });
                }
            }
        }
        candidates.sort_by(|a, b| b.priority.total_cmp(&a.priority));
        Ok(candidates)
    }
}

/// Whether a model-space box survives the clipping planes once placed in the
/// world by `model_matrix`.
pub(crate) fn passes_clipping(clipping: &ClippingPlanes, model_matrix: &Mat4, bounds: &Aabb) -> bool {
    if !clipping.is_active() {
        return true;
    }
    let corners = bounds.corners().map(|c| model_matrix.transform_point3(c));
    clipping.accepts_corners(&corners)
}
