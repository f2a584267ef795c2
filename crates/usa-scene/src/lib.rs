//! USA Scene Model
//!
//! Parses Unity scene files into an identity-keyed object registry and
//! rebuilds the Transform hierarchy from the cross-references inside it.
//!
//! # Architecture
//!
//! ```text
//! scene text → RecordParser → ObjectRegistry → Hierarchy → indented dump
//!                  ↑
//!              serde_yaml (record bodies → PropertyStore)
//! ```
//!
//! # Example
//!
//! ```rust
//! use usa_scene::Scene;
//!
//! let text = "\
//! --- !u!1 &300
//! GameObject:
//!   m_Name: Player
//! --- !u!4 &200
//! Transform:
//!   m_GameObject: {fileID: 300}
//!   m_Children: []
//! ";
//!
//! let scene = Scene::from_text("Player.unity", text);
//! assert_eq!(scene.render_hierarchy(), "Player\n");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod error;
pub mod hierarchy;
pub mod object;
pub mod parser;
pub mod property;
pub mod registry;
pub mod scene;

// Re-exports for convenience
pub use error::{RecordError, SceneError, SceneResult};
pub use hierarchy::{Hierarchy, HierarchyEntry, UNNAMED};
pub use object::{ClassId, ObjectId, SceneObject};
pub use parser::RecordParser;
pub use property::{PropertyStore, PropertyValue, Scalar};
pub use registry::ObjectRegistry;
pub use scene::{read_source, read_source_async, Scene};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with parsed scenes
    pub use crate::hierarchy::{Hierarchy, HierarchyEntry};
    pub use crate::object::{ClassId, ObjectId, SceneObject};
    pub use crate::property::{PropertyStore, PropertyValue};
    pub use crate::scene::Scene;
}
