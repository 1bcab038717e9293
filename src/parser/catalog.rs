//! Material and handle catalog files.
//!
//! A catalog file is `{ "materials": [...], "handles": [...] }`; either list
//! may be omitted. A handle file may also be a bare array of handles.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::models::{Catalog, Handle};

/// Accepted shapes of a handle file.
#[derive(Deserialize)]
#[serde(untagged)]
enum HandleFile {
    List(Vec<Handle>),
    Document {
        #[serde(default)]
        handles: Vec<Handle>,
    },
}

/// Reads a catalog file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid catalog.
pub fn parse_catalog(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog: {}", path.display()))?;

    let catalog: Catalog = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse catalog: {}", path.display()))?;

    for material in &catalog.materials {
        if !material.price.is_finite() || material.price < 0.0 {
            anyhow::bail!(
                "Material '{}' in {} has an invalid price: {}",
                material.id,
                path.display(),
                material.price
            );
        }
    }

    Ok(catalog)
}

/// Reads a handle catalog file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn parse_handles(path: &Path) -> Result<Vec<Handle>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read handle catalog: {}", path.display()))?;

    let file: HandleFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse handle catalog: {}", path.display()))?;

    Ok(match file {
        HandleFile::List(handles) | HandleFile::Document { handles } => handles,
    })
}
