//! USA Analyzer - scene collection orchestrator
//!
//! Finds every scene file under an input directory, parses it, and writes
//! its Transform hierarchy to `<scene file name>.dump` in an output
//! directory. Scenes that share a file name are qualified with their
//! relative directory so no two scenes write the same dump.
//!
//! Two execution modes produce identical dumps:
//! - **Sequential**: one scene after another, ordered by file stem
//! - **Concurrent**: all reads in flight at once; each completed read spawns
//!   its own parse/render/write task, and the run joins them all at the end
//!
//! # Example
//!
//! ```rust,ignore
//! use usa_analyzer::{AnalyzerConfig, ExecutionMode, SceneCollectionAnalyzer};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AnalyzerConfig::new("Assets/Scenes", "Dumps")
//!     .with_mode(ExecutionMode::Concurrent);
//! let analyzer = SceneCollectionAnalyzer::new(config)?;
//!
//! let report = analyzer.run().await;
//! println!("dumped {} scene(s) in {} ms", report.dumped.len(), report.elapsed_ms());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

// Core modules
pub mod collection;
pub mod config;
pub mod error;
pub mod pipeline;

// Re-exports for convenience
pub use collection::{assign_dump_paths, discover_scenes, RunReport, SceneCollectionAnalyzer, SceneFailure, SceneId};
pub use config::{AnalyzerConfig, ExecutionMode};
pub use error::{AnalyzerError, AnalyzerResult, ConfigError};
pub use pipeline::dump_file_name;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
