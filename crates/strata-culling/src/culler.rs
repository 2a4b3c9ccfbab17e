//! The per-update sector selection algorithm.

use strata_scene::ModelMetadata;
use strata_view::{Camera, ClippingPlanes};

use crate::capabilities::passes_clipping;
use crate::{
    CullingError, LevelOfDetail, ModelBudgetTracker, OcclusionFilter, PassThroughOcclusion,
    PrioritizedWantedSector, SectorBudget, SectorCostFn, VisibilityRanker, default_cost_fn,
};

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// Everything one update needs to know about the view.
#[derive(Clone, Copy, Debug)]
pub struct DetermineSectorsInput<'a> {
    pub camera: &'a Camera,
    pub models: &'a [ModelMetadata],
    pub clipping: &'a ClippingPlanes,
    pub budget: &'a SectorBudget,
}

/// What an update selected, for statistics and tuning.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SectorLoadingSpendage {
    pub download_size: u64,
    pub draw_calls: u64,
    /// Sectors in all models of the update.
    pub total_sector_count: usize,
    /// Shown sectors forced to full detail near the camera.
    pub forced_detailed_sector_count: usize,
    /// Shown sectors, simple or detailed.
    pub loaded_sector_count: usize,
    pub simple_sector_count: usize,
    pub detailed_sector_count: usize,
    /// Sum of the finite, positive priorities of shown sectors.
    pub accumulated_priority: f64,
}

/// Result of [`VisibilityBudgetCuller::determine_sectors`].
#[derive(Clone, Debug)]
pub struct DeterminedSectors {
    /// Every sector of every model, by descending priority. Discarded
    /// sectors are included so the loading side can drop them.
    pub wanted_sectors: Vec<PrioritizedWantedSector>,
    pub spendage: SectorLoadingSpendage,
}

/// Picks which sectors to show, and at which level of detail, within a
/// resource budget.
///
/// Each update starts from scratch:
/// 1. every model starts with only its root shown simplified,
/// 2. the ranker orders candidate sectors by visibility,
/// 3. sectors within the budget's proximity threshold of the camera are
///    forced to full detail with infinite priority,
/// 4. ranked candidates are promoted in order while the selection is still
///    within budget.
pub struct VisibilityBudgetCuller<R, O = PassThroughOcclusion> {
    ranker: R,
    occlusion: O,
    cost_fn: SectorCostFn,
}

impl<R: VisibilityRanker> VisibilityBudgetCuller<R> {
    /// Culler with the default cost policy and no occlusion culling.
    pub fn new(ranker: R) -> Self {
        Self::with_occlusion(ranker, PassThroughOcclusion)
    }
}

impl<R: VisibilityRanker, O: OcclusionFilter> VisibilityBudgetCuller<R, O> {
    pub fn with_occlusion(ranker: R, occlusion: O) -> Self {
        Self {
            ranker,
            occlusion,
            cost_fn: default_cost_fn(),
        }
    }

    /// Replace the cost policy.
    #[must_use]
    pub fn with_cost_fn(mut self, cost_fn: SectorCostFn) -> Self {
        self.cost_fn = cost_fn;
        self
    }

    pub fn ranker_mut(&mut self) -> &mut R {
        &mut self.ranker
    }

    /// Select the sectors to show for this view.
    pub fn determine_sectors(
        &mut self,
        input: &DetermineSectorsInput<'_>,
    ) -> Result<DeterminedSectors, CullingError> {
        let tracker = self.update(input)?;
        let wanted_sectors = tracker.collect_wanted_sectors();
        let total_cost = tracker.total_cost();

        let mut spendage = SectorLoadingSpendage {
            download_size: total_cost.download_size,
            draw_calls: total_cost.draw_calls,
            total_sector_count: input.models.iter().map(ModelMetadata::sector_count).sum(),
            ..SectorLoadingSpendage::default()
        };
        for sector in wanted_sectors.iter().filter(|w| w.is_shown()) {
            spendage.loaded_sector_count += 1;
            match sector.level_of_detail {
                LevelOfDetail::Simple => spendage.simple_sector_count += 1,
                _ => spendage.detailed_sector_count += 1,
            }
            if sector.priority.is_infinite() {
                spendage.forced_detailed_sector_count += 1;
            } else if sector.priority.is_finite() && sector.priority > 0.0 {
                spendage.accumulated_priority += sector.priority;
            }
        }

        if spendage.total_sector_count > 0 {
            let total = spendage.total_sector_count as f64;
            tracing::debug!(
                "Scene: {} ({} required, {} sectors, {:.3}% of all sectors - {:.3}% detailed)",
                spendage.loaded_sector_count,
                spendage.forced_detailed_sector_count,
                spendage.total_sector_count,
                100.0 * spendage.loaded_sector_count as f64 / total,
                100.0 * spendage.detailed_sector_count as f64 / total,
            );
        }

        Ok(DeterminedSectors {
            wanted_sectors,
            spendage,
        })
    }

    /// Run the wanted sectors through the occlusion filter.
    pub async fn filter_sectors_to_load(
        &self,
        camera: &Camera,
        wanted: Vec<PrioritizedWantedSector>,
    ) -> Result<Vec<PrioritizedWantedSector>, CullingError> {
        self.occlusion
            .filter(camera, wanted)
            .await
            .map_err(CullingError::Occlusion)
    }

    fn update(&mut self, input: &DetermineSectorsInput<'_>) -> Result<ModelBudgetTracker, CullingError> {
        let mut tracker = ModelBudgetTracker::new(self.cost_fn.clone());
        for model in input.models {
            tracker.initialize_scene(model)?;
        }

        let prioritized = self
            .ranker
            .rank(input.camera, input.models, input.clipping)
            .map_err(CullingError::Ranking)?;

        add_high_details_for_near_sectors(input, &mut tracker)?;

        let mut consumed = 0usize;
        let mut accumulated_priority = 0.0;
        for candidate in &prioritized {
            if !tracker.is_within_budget(input.budget) {
                break;
            }
            tracker.mark_sector_detailed(&candidate.model, candidate.sector_id, candidate.priority)?;
            accumulated_priority += candidate.priority;
            consumed += 1;
        }

        tracing::trace!(
            "Retrieving {} of {} (last: {:?})",
            consumed,
            prioritized.len(),
            consumed.checked_sub(1).map(|last| &prioritized[last]),
        );
        let cost = tracker.total_cost();
        tracing::debug!(
            "Total scheduled: {} of {} (cost: {:.2}/{:.2} MiB, drawCalls: {}/{}, priority: {})",
            tracker.wanted_sector_count(),
            prioritized.len(),
            cost.download_size as f64 / BYTES_PER_MIB,
            input.budget.geometry_download_size_bytes as f64 / BYTES_PER_MIB,
            cost.draw_calls,
            input.budget.max_draw_calls,
            accumulated_priority,
        );

        Ok(tracker)
    }
}

/// Force full detail for every sector within the proximity threshold of the
/// camera that survives the clipping planes.
fn add_high_details_for_near_sectors(
    input: &DetermineSectorsInput<'_>,
    tracker: &mut ModelBudgetTracker,
) -> Result<(), CullingError> {
    let near_camera = input
        .camera
        .with_far(input.budget.high_detail_proximity_threshold);
    let projection = near_camera.projection_matrix();
    let view = near_camera.view_matrix();

    for model in input.models {
        let model_view = view * model.model_matrix;
        let mut sectors = model
            .scene
            .sectors_intersecting_frustum(&projection, &model_view);
        sectors.retain(|sector| passes_clipping(input.clipping, &model.model_matrix, &sector.bounds));

        tracing::trace!("{}: {} sectors near camera", model.key, sectors.len());
        for sector in sectors {
            tracker.mark_sector_detailed(&model.key, sector.id, f64::INFINITY)?;
        }
    }
    Ok(())
}
