//! Per-user directories for configuration and logs.

use std::path::{Path, PathBuf};

use crate::ConfigError;

const APP_NAME: &str = "strata";

/// Where the engine keeps `config.ron` and its log files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppDirs {
    pub config_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl AppDirs {
    /// Resolve the platform directories without creating them.
    pub fn resolve() -> Result<Self, ConfigError> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::resolve_with_root(&base))
    }

    /// Directories rooted under `root` instead of the OS location.
    pub fn resolve_with_root(root: &Path) -> Self {
        let app_dir = root.join(APP_NAME);
        Self {
            config_dir: app_dir.join("config"),
            log_dir: app_dir.join("logs"),
        }
    }

    /// Create both directories on disk.
    pub fn create(&self) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.config_dir).map_err(ConfigError::WriteError)?;
        std::fs::create_dir_all(&self.log_dir).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_with_root() {
        let root = tempfile::tempdir().unwrap();
        let dirs = AppDirs::resolve_with_root(root.path());
        assert!(dirs.config_dir.starts_with(root.path()));
        assert!(dirs.config_dir.ends_with("strata/config"));
        assert!(dirs.log_dir.ends_with("strata/logs"));

        dirs.create().unwrap();
        assert!(dirs.config_dir.is_dir());
        assert!(dirs.log_dir.is_dir());
    }
}
