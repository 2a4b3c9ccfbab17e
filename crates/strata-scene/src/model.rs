//! A model: key, world transform and sector scene.

use std::fmt;
use std::sync::Arc;

use glam::Mat4;
use strata_view::Aabb;

use crate::SectorScene;

/// Identifies a model across culling calls.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelKey(String);

impl ModelKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModelKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for ModelKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// A loaded model. The scene is shared, so cloning is cheap.
#[derive(Clone, Debug)]
pub struct ModelMetadata {
    pub key: ModelKey,
    /// Model-to-world transform.
    pub model_matrix: Mat4,
    pub scene: Arc<SectorScene>,
}

impl ModelMetadata {
    /// A model placed at the world origin.
    pub fn new(key: impl Into<ModelKey>, scene: SectorScene) -> Self {
        Self {
            key: key.into(),
            model_matrix: Mat4::IDENTITY,
            scene: Arc::new(scene),
        }
    }

    #[must_use]
    pub fn with_transform(mut self, model_matrix: Mat4) -> Self {
        self.model_matrix = model_matrix;
        self
    }

    #[must_use]
    pub fn sector_count(&self) -> usize {
        self.scene.sector_count()
    }

    /// World-space bounds of the whole model.
    #[must_use]
    pub fn world_bounds(&self) -> Aabb {
        self.scene.bounds().transformed(&self.model_matrix)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::testkit::generate_sector_tree;

    #[test]
    fn test_model_key_display() {
        let key = ModelKey::from("pump-house");
        assert_eq!(key.to_string(), "pump-house");
        assert_eq!(key.as_str(), "pump-house");
        assert_eq!(key, ModelKey::new(String::from("pump-house")));
    }

    #[test]
    fn test_world_bounds_follow_transform() {
        let model = ModelMetadata::new("a", generate_sector_tree(2, 2))
            .with_transform(Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)));
        let bounds = model.world_bounds();
        assert_eq!(bounds.min, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(11.0, 1.0, 1.0));
        assert_eq!(model.sector_count(), 3);
    }
}
