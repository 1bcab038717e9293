//! Parsing and serialization for project and catalog files.
//!
//! Projects and catalogs are JSON documents. String keys such as `"A1"` or
//! `"doubleMirror"` are converted to typed values here and nowhere else.

pub mod catalog;
pub mod project;

// Re-export commonly used functions
pub use catalog::{parse_catalog, parse_handles};
pub use project::{parse_project, parse_project_str, save_project, ProjectFile};
