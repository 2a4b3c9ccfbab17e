//! Resource cost of showing a sector and the pluggable cost policy.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::sync::Arc;

use strata_scene::SectorMetadata;

use crate::{CullingError, LevelOfDetail};

/// Bytes to download and draw calls to issue for a set of sectors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SectorCost {
    pub download_size: u64,
    pub draw_calls: u64,
}

impl SectorCost {
    pub const ZERO: Self = Self {
        download_size: 0,
        draw_calls: 0,
    };

    #[must_use]
    pub fn new(download_size: u64, draw_calls: u64) -> Self {
        Self {
            download_size,
            draw_calls,
        }
    }
}

impl Add for SectorCost {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            download_size: self.download_size + rhs.download_size,
            draw_calls: self.draw_calls + rhs.draw_calls,
        }
    }
}

impl AddAssign for SectorCost {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for SectorCost {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            download_size: self.download_size - rhs.download_size,
            draw_calls: self.draw_calls - rhs.draw_calls,
        }
    }
}

impl SubAssign for SectorCost {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Sum for SectorCost {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Prices a sector at a level of detail.
///
/// Only called with [`LevelOfDetail::Simple`] or [`LevelOfDetail::Detailed`]
/// for sectors that are actually shown.
pub type SectorCostFn =
    Arc<dyn Fn(&SectorMetadata, LevelOfDetail) -> Result<SectorCost, CullingError> + Send + Sync>;

/// Default policy: the payload's download size, the estimated draw calls for
/// detailed geometry and a single draw call for simple geometry.
///
/// A missing payload costs nothing. [`LevelOfDetail::Discarded`] has no cost
/// and is rejected.
pub fn default_sector_cost(
    sector: &SectorMetadata,
    lod: LevelOfDetail,
) -> Result<SectorCost, CullingError> {
    match lod {
        LevelOfDetail::Detailed => Ok(sector
            .detailed
            .as_ref()
            .map_or(SectorCost::ZERO, |payload| {
                SectorCost::new(payload.download_size, payload.estimated_draw_calls)
            })),
        LevelOfDetail::Simple => Ok(sector
            .simple
            .as_ref()
            .map_or(SectorCost::ZERO, |payload| {
                SectorCost::new(payload.download_size, 1)
            })),
        LevelOfDetail::Discarded => Err(CullingError::UnsupportedLevelOfDetail(lod)),
    }
}

/// [`default_sector_cost`] as a shareable [`SectorCostFn`].
pub fn default_cost_fn() -> SectorCostFn {
    Arc::new(default_sector_cost)
}
