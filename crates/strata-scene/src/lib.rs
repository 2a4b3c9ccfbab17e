//! Static sector hierarchy of a streamed CAD model.
//!
//! A [`SectorScene`] is an immutable arena of [`SectorMetadata`] nodes where
//! parent/child links are indices into the arena. A [`ModelMetadata`] pairs a
//! scene with the model's key and world transform.

mod error;
mod model;
mod scene;
mod sector;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

pub use error::SceneError;
pub use model::{ModelKey, ModelMetadata};
pub use scene::{SectorScene, SectorSceneBuilder};
pub use sector::{DetailedPayload, SectorDescriptor, SectorId, SectorMetadata, SimplePayload};
