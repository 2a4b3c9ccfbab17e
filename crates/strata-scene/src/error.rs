//! Sector scene construction errors.

use thiserror::Error;

use crate::SectorId;

/// Errors that can occur while building a [`SectorScene`](crate::SectorScene).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    /// Two sectors were given the same id.
    #[error("duplicate sector id: {0}")]
    DuplicateSectorId(SectorId),
    /// A child was attached to a parent that has not been added.
    #[error("unknown parent sector id: {0}")]
    UnknownParent(SectorId),
}
