//! Project file I/O service.
//!
//! Centralizes loading and saving project files and resolving which catalog
//! prices a project.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use crate::config::Config;
use crate::models::Catalog;
use crate::parser::{self, ProjectFile};

/// Service for project file operations.
pub struct ProjectService;

impl ProjectService {
    /// Loads a project and checks its configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, malformed, or holds an
    /// element config whose per-section lists do not match its column count.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use wardrobe_cutlist::services::ProjectService;
    ///
    /// let project = ProjectService::load(Path::new("hallway.json"))?;
    /// println!("{}", project.name);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(path: &Path) -> Result<ProjectFile> {
        let project = parser::parse_project(path)
            .with_context(|| format!("Failed to load project from {}", path.display()))?;

        project
            .configuration
            .validate()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;

        Ok(project)
    }

    /// Saves a project with an atomic write.
    ///
    /// # Errors
    ///
    /// Returns an error on serialization or file system failure.
    pub fn save(project: &ProjectFile, path: &Path) -> Result<()> {
        parser::save_project(project, path)
            .with_context(|| format!("Failed to save project to {}", path.display()))
    }

    /// Resolves the catalog used to price a project.
    ///
    /// Precedence, per list: explicit file argument, then the project's
    /// inline catalog, then the catalog files named in the user config.
    /// Missing sources leave the list empty, which yields an empty cut list.
    ///
    /// # Errors
    ///
    /// Returns an error if a named catalog file cannot be read.
    pub fn resolve_catalog(
        project: &ProjectFile,
        config: &Config,
        catalog_override: Option<&Path>,
        handles_override: Option<&Path>,
    ) -> Result<Catalog> {
        let inline = project.catalog.clone().unwrap_or_default();

        let catalog_path = match catalog_override {
            Some(path) => Some(path),
            None if inline.materials.is_empty() => config.paths.material_catalog.as_deref(),
            None => None,
        };
        let file = match catalog_path {
            Some(path) => {
                debug!("Loading catalog from {}", path.display());
                Some(parser::parse_catalog(path)?)
            }
            None => None,
        };

        let handles_path = match handles_override {
            Some(path) => Some(path),
            None if inline.handles.is_empty() => config.paths.handle_catalog.as_deref(),
            None => None,
        };
        let handles = match (handles_path, &file) {
            (Some(path), _) => {
                debug!("Loading handles from {}", path.display());
                parser::parse_handles(path)?
            }
            (None, Some(file)) if !file.handles.is_empty() => file.handles.clone(),
            (None, _) => inline.handles,
        };

        let materials = file.map_or(inline.materials, |file| file.materials);

        Ok(Catalog::new(materials, handles))
    }
}
