//! Analyzer configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Scene file extension (without dot)
pub const DEFAULT_EXTENSION: &str = "unity";

/// Suffix appended to a scene file name to form its dump name
pub const DEFAULT_DUMP_SUFFIX: &str = ".dump";

/// How scenes are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// One scene at a time, sorted by file stem
    #[default]
    Sequential,
    /// All reads at once, per-scene work spawned as reads complete
    Concurrent,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => f.write_str("sequential"),
            Self::Concurrent => f.write_str("concurrent"),
        }
    }
}

impl FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" | "sync" => Ok(Self::Sequential),
            "concurrent" | "async" => Ok(Self::Concurrent),
            other => Err(format!(
                "unknown execution mode '{other}' (expected 'sequential' or 'concurrent')"
            )),
        }
    }
}

/// Analyzer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Directory scanned recursively for scene files
    pub input_dir: PathBuf,
    /// Directory receiving the dumps
    pub output_dir: PathBuf,
    /// Scene file extension (without dot)
    pub extension: String,
    /// Suffix appended to the scene file name
    pub dump_suffix: String,
    /// Scheduling mode
    pub mode: ExecutionMode,
}

impl AnalyzerConfig {
    /// Create configuration for input and output directories
    #[inline]
    #[must_use]
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// With scheduling mode
    #[inline]
    #[must_use]
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// With scene file extension
    #[inline]
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// With dump suffix
    #[inline]
    #[must_use]
    pub fn with_dump_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.dump_suffix = suffix.into();
        self
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    /// - `ConfigError::Format` if the text is not a valid configuration
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// - `ConfigError::Io` if the file cannot be read
    /// - `ConfigError::Format` if the file is not a valid configuration
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        Self::from_yaml_str(&text)
    }

    /// Check that both directories are set and exist
    ///
    /// # Errors
    /// - `ConfigError::MissingInputDir` / `MissingOutputDir` for blank paths
    /// - `ConfigError::DirectoryNotFound` for paths that are not directories
    pub fn validate(&self) -> Result<(), ConfigError> {
        if is_blank(&self.input_dir) {
            return Err(ConfigError::MissingInputDir);
        }
        if is_blank(&self.output_dir) {
            return Err(ConfigError::MissingOutputDir);
        }
        for dir in [&self.input_dir, &self.output_dir] {
            if !dir.is_dir() {
                return Err(ConfigError::DirectoryNotFound(dir.clone()));
            }
        }
        Ok(())
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::new(),
            output_dir: PathBuf::new(),
            extension: DEFAULT_EXTENSION.to_string(),
            dump_suffix: DEFAULT_DUMP_SUFFIX.to_string(),
            mode: ExecutionMode::default(),
        }
    }
}

fn is_blank(path: &Path) -> bool {
    path.to_string_lossy().trim().is_empty()
}
