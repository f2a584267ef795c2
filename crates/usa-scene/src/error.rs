//! Error types for scene parsing
//!
//! Two levels of failure exist:
//! - Record errors: a single malformed record, dropped by the parser
//! - Scene errors: I/O around a whole scene file, propagated to the caller

use std::path::PathBuf;

/// Reasons a single record is dropped from the registry
///
/// These never escape [`RecordParser::parse`](crate::parser::RecordParser::parse);
/// they are logged and the record is skipped.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// Record has fewer lines than header + class line + body
    #[error("record has {lines} line(s), expected at least {min}")]
    TooFewLines {
        /// Lines found
        lines: usize,
        /// Lines required
        min: usize,
    },

    /// Header line lacks a tag or an identity token
    #[error("malformed record header: '{0}'")]
    MalformedHeader(String),

    /// Identity token is not a decimal integer
    #[error("invalid record identity: '{0}'")]
    InvalidIdentity(String),

    /// Record body is not valid YAML
    #[error("record body error: {0}")]
    Body(#[from] serde_yaml::Error),
}

/// Errors reading or writing a scene's files
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// IO error during scene read
    #[error("io error reading {path}: {source}")]
    Read {
        /// Scene file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// IO error during dump write
    #[error("io error writing {path}: {source}")]
    Write {
        /// Dump file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl SceneError {
    /// Create read error for path
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Create write error for path
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Path of the file the failed operation touched
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } => path,
        }
    }
}

/// Result type alias for scene I/O
pub type SceneResult<T> = Result<T, SceneError>;
