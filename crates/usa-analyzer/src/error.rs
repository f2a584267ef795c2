//! Error types for the scene collection analyzer
//!
//! - Configuration errors are fatal and stop the run before any scene is read
//! - Analyzer errors belong to a single scene and are reported per scene

use std::path::PathBuf;
use usa_scene::SceneError;

/// Startup configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Input directory missing or blank
    #[error("input directory is not set")]
    MissingInputDir,

    /// Output directory missing or blank
    #[error("output directory is not set")]
    MissingOutputDir,

    /// Configured path does not name an existing directory
    #[error("directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// Config file could not be read
    #[error("io error reading config {path}: {source}")]
    Io {
        /// Config file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid YAML for `AnalyzerConfig`
    #[error("invalid config: {0}")]
    Format(#[from] serde_yaml::Error),
}

impl ConfigError {
    /// Create IO error for config path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Per-scene processing errors
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    /// Scene read or dump write failed
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),

    /// Parse/render task panicked or was cancelled
    #[error("scene task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Scene task ended without reporting a result
    #[error("scene task aborted before completion")]
    Aborted,
}

/// Result type alias for scene processing
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;
