//! Project file format.
//!
//! A project bundles the wardrobe parameters, the persisted per-compartment
//! configuration, and optionally an inline catalog:
//!
//! ```json
//! {
//!   "name": "Hallway",
//!   "wardrobe": { "width_cm": 210.0, "height_cm": 240.0, "depth_cm": 60.0, "material_id": "oak" },
//!   "configuration": { "door_groups": [] }
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::models::{Catalog, Wardrobe, WardrobeConfig};

/// On-disk project document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    /// Project name
    #[serde(default)]
    pub name: String,
    /// Wardrobe parameters
    pub wardrobe: Wardrobe,
    /// Persisted per-compartment configuration
    #[serde(default)]
    pub configuration: WardrobeConfig,
    /// Inline catalog, used before any configured catalog file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<Catalog>,
}

impl ProjectFile {
    /// Creates a project without an inline catalog.
    pub fn new(name: impl Into<String>, wardrobe: Wardrobe, configuration: WardrobeConfig) -> Self {
        Self {
            name: name.into(),
            wardrobe,
            configuration,
            catalog: None,
        }
    }

    /// Attaches an inline catalog.
    #[must_use]
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }
}

/// Parses a project from JSON text.
///
/// # Errors
///
/// Returns an error for malformed JSON, unknown compartment keys, or unknown
/// door type names.
pub fn parse_project_str(content: &str) -> Result<ProjectFile> {
    serde_json::from_str(content).context("Failed to parse project JSON")
}

/// Reads and parses a project file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn parse_project(path: &Path) -> Result<ProjectFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read project file: {}", path.display()))?;

    parse_project_str(&content).with_context(|| format!("Invalid project file: {}", path.display()))
}

/// Writes a project file using a temp file + rename.
///
/// # Errors
///
/// Returns an error if serialization or any file operation fails.
pub fn save_project(project: &ProjectFile, path: &Path) -> Result<()> {
    let mut json =
        serde_json::to_string_pretty(project).context("Failed to serialize project to JSON")?;
    json.push('\n');
    atomic_write(path, &json)
}

fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("json.tmp");

    fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write to temporary file: {}", temp_path.display()))?;

    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temporary file to: {}", path.display()))?;

    Ok(())
}
