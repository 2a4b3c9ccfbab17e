//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const MIB: u64 = 1024 * 1024;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Per-update resource budget.
    pub budget: BudgetConfig,
    /// Camera used by the demo fly-through.
    pub camera: CameraConfig,
    /// Synthetic models generated by the demo.
    pub scene: SceneConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Resource budget for one culling update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BudgetConfig {
    /// Maximum bytes of geometry to download. Default: 35 MiB.
    pub geometry_download_size_bytes: u64,
    /// Maximum number of draw calls. Default: 2000.
    pub max_draw_calls: u64,
    /// Distance from the camera within which sectors are always loaded in
    /// full detail. Default: 10.0.
    pub high_detail_proximity_threshold: f32,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            geometry_download_size_bytes: 35 * MIB,
            max_draw_calls: 2000,
            high_detail_proximity_threshold: 10.0,
        }
    }
}

impl BudgetConfig {
    /// Budget for constrained devices (e.g., mobile or integrated GPU).
    #[must_use]
    pub fn low() -> Self {
        Self {
            geometry_download_size_bytes: 15 * MIB,
            max_draw_calls: 700,
            high_detail_proximity_threshold: 5.0,
        }
    }

    /// Budget for high-end systems.
    #[must_use]
    pub fn high() -> Self {
        Self {
            geometry_download_size_bytes: 100 * MIB,
            max_draw_calls: 5000,
            high_detail_proximity_threshold: 20.0,
        }
    }
}

/// Perspective camera settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            aspect_ratio: 16.0 / 9.0,
            near: 0.1,
            far: 10_000.0,
        }
    }
}

/// Synthetic sector trees used by the demo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Number of models placed side by side.
    pub model_count: u32,
    /// Levels in each model's sector tree (1 = root only).
    pub depth: u32,
    /// Children of every inner sector.
    pub children_per_sector: u32,
    /// Seed for payload sizes and placement.
    pub seed: u64,
    /// Edge length of each model's bounding cube in world units.
    pub extent: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            model_count: 3,
            depth: 5,
            children_per_sector: 4,
            seed: 42,
            extent: 200.0,
        }
    }
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("max_draw_calls: 2000"));
        assert!(ron_str.contains("geometry_download_size_bytes: 36700160"));
        assert!(ron_str.contains("log_level: \"info\""));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.budget = BudgetConfig::low();
        config.scene.seed = 7;
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(budget: (max_draw_calls: 10), debug: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.budget.max_draw_calls, 10);
        assert_eq!(
            config.budget.geometry_download_size_bytes,
            BudgetConfig::default().geometry_download_size_bytes
        );
        assert_eq!(config.scene, SceneConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(occlusion_culling: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_budget_presets_are_ordered() {
        let (low, default, high) = (BudgetConfig::low(), BudgetConfig::default(), BudgetConfig::high());
        assert!(low.geometry_download_size_bytes < default.geometry_download_size_bytes);
        assert!(default.geometry_download_size_bytes < high.geometry_download_size_bytes);
        assert!(low.max_draw_calls < default.max_draw_calls);
        assert!(default.max_draw_calls < high.max_draw_calls);
        assert!(low.high_detail_proximity_threshold < high.high_detail_proximity_threshold);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.budget.max_draw_calls = 150;
        config.camera.fov_y_degrees = 60.0;
        config.debug.log_level = "trace".to_string();

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("strata");
        let config = Config::load_or_create(&nested).unwrap();
        assert_eq!(config, Config::default());
        assert!(nested.join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.budget.high_detail_proximity_threshold = 25.0;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(
            result.map(|c| c.budget.high_detail_proximity_threshold),
            Some(25.0)
        );
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_ron_comments_accepted() {
        let ron_str = "// Budget tuned for the plant model\n(\n  // nothing else\n)";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config, Config::default());
    }
}
