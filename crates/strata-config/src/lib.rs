//! Configuration for the Strata sector streaming engine.
//!
//! Settings persist to disk as RON, can be overridden from the command line
//! via clap, and support hot-reload detection. Unknown fields are ignored and
//! missing fields fall back to their defaults.

mod app_dirs;
mod cli;
mod config;
mod error;

pub use app_dirs::AppDirs;
pub use cli::CliArgs;
pub use config::{BudgetConfig, CameraConfig, Config, DebugConfig, SceneConfig};
pub use error::ConfigError;
