//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

const MIB: f64 = 1024.0 * 1024.0;

/// Strata command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "strata", about = "Sector visibility and budget culling demo")]
pub struct CliArgs {
    /// Geometry download budget in MiB.
    #[arg(long)]
    pub download_budget_mb: Option<f64>,

    /// Maximum number of draw calls.
    #[arg(long)]
    pub max_draw_calls: Option<u64>,

    /// Distance within which sectors are always loaded in full detail.
    #[arg(long)]
    pub proximity: Option<f32>,

    /// Number of synthetic models.
    #[arg(long)]
    pub models: Option<u32>,

    /// Levels in each synthetic sector tree.
    #[arg(long)]
    pub depth: Option<u32>,

    /// Seed for the synthetic scene.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(mb) = args.download_budget_mb {
            self.budget.geometry_download_size_bytes = (mb.max(0.0) * MIB) as u64;
        }
        if let Some(draw_calls) = args.max_draw_calls {
            self.budget.max_draw_calls = draw_calls;
        }
        if let Some(proximity) = args.proximity {
            self.budget.high_detail_proximity_threshold = proximity;
        }
        if let Some(models) = args.models {
            self.scene.model_count = models;
        }
        if let Some(depth) = args.depth {
            self.scene.depth = depth;
        }
        if let Some(seed) = args.seed {
            self.scene.seed = seed;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            download_budget_mb: Some(2.5),
            seed: Some(9),
            log_level: Some("debug".to_string()),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.budget.geometry_download_size_bytes, 2_621_440);
        assert_eq!(config.scene.seed, 9);
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults
        assert_eq!(config.budget.max_draw_calls, 2000);
        assert_eq!(config.scene.model_count, 3);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::try_parse_from([
            "strata",
            "--max-draw-calls",
            "300",
            "--proximity",
            "2.5",
            "--models",
            "5",
        ])
        .unwrap();
        assert_eq!(args.max_draw_calls, Some(300));
        assert_eq!(args.proximity, Some(2.5));
        assert_eq!(args.models, Some(5));
        assert!(args.config.is_none());
    }
}
