//! Wardrobe parameters and the caller-owned configuration state.
//!
//! [`Structure`] is the geometry every component reads. [`Wardrobe`] adds
//! depth, materials, and door/handle settings for pricing. [`WardrobeConfig`]
//! holds the persisted per-compartment maps that the reconciler prunes after
//! structural edits.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::compartment::{ColumnId, CompartmentId, CompartmentKey};
use super::door::{DoorGroup, DoorSettingsMode, DoorType};
use super::element::{CompartmentExtras, ElementConfig};
use super::geometry::FloorY;

/// Per-column structural settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnStructure {
    /// Height override in meters (falls back to the wardrobe height)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Shelf centerlines in the bottom (or only) module
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shelves: Vec<FloorY>,
    /// Boundary between bottom and top module
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_boundary: Option<FloorY>,
    /// Shelf centerlines in the top module
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_shelves: Vec<FloorY>,
}

impl ColumnStructure {
    /// Sets the column height override (meters).
    #[must_use]
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Sets the bottom-module shelves (floor-origin meters).
    #[must_use]
    pub fn with_shelves(mut self, shelves: impl IntoIterator<Item = f64>) -> Self {
        self.shelves = shelves.into_iter().map(FloorY).collect();
        self
    }

    /// Sets the module boundary (floor-origin meters).
    #[must_use]
    pub fn with_module_boundary(mut self, boundary: f64) -> Self {
        self.module_boundary = Some(FloorY(boundary));
        self
    }

    /// Sets the top-module shelves (floor-origin meters).
    #[must_use]
    pub fn with_top_shelves(mut self, shelves: impl IntoIterator<Item = f64>) -> Self {
        self.top_shelves = shelves.into_iter().map(FloorY).collect();
        self
    }
}

/// Structural geometry of the carcass.
///
/// Outer dimensions are in centimeters as entered by the user. Seams are
/// interior column boundaries in centered meters (0 = horizontal center).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    /// Outer width (cm)
    pub width_cm: f64,
    /// Outer height (cm)
    pub height_cm: f64,
    /// Whether the carcass stands on a base
    #[serde(default)]
    pub has_base: bool,
    /// Base height (cm), used only when `has_base`
    #[serde(default)]
    pub base_height_cm: f64,
    /// Interior column boundaries (centered meters, ascending)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub seams: Vec<f64>,
    /// Per-column settings keyed by column letter
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub columns: BTreeMap<ColumnId, ColumnStructure>,
}

impl Structure {
    /// Creates a structure with no seams, base, or column settings.
    #[must_use]
    pub fn new(width_cm: f64, height_cm: f64) -> Self {
        Self {
            width_cm,
            height_cm,
            has_base: false,
            base_height_cm: 0.0,
            seams: Vec::new(),
            columns: BTreeMap::new(),
        }
    }

    /// Sets explicit seam positions (centered meters).
    #[must_use]
    pub fn with_seams(mut self, seams: impl IntoIterator<Item = f64>) -> Self {
        self.seams = seams.into_iter().collect();
        self
    }

    /// Enables the base with the given height (cm).
    #[must_use]
    pub fn with_base(mut self, base_height_cm: f64) -> Self {
        self.has_base = true;
        self.base_height_cm = base_height_cm;
        self
    }

    /// Sets the structure of one column.
    #[must_use]
    pub fn with_column(mut self, column: u32, structure: ColumnStructure) -> Self {
        self.columns.insert(ColumnId(column), structure);
        self
    }

    /// Outer width in meters.
    #[must_use]
    pub fn width_m(&self) -> f64 {
        self.width_cm / 100.0
    }

    /// Outer height in meters.
    #[must_use]
    pub fn height_m(&self) -> f64 {
        self.height_cm / 100.0
    }

    /// Effective base height in meters (0 without a base).
    #[must_use]
    pub fn base_height_m(&self) -> f64 {
        if self.has_base && self.base_height_cm.is_finite() && self.base_height_cm > 0.0 {
            self.base_height_cm / 100.0
        } else {
            0.0
        }
    }

    /// Stored settings for a column, if any.
    #[must_use]
    pub fn column(&self, column: ColumnId) -> Option<&ColumnStructure> {
        self.columns.get(&column)
    }

    /// Effective height of a column in meters.
    ///
    /// Uses the column override when it is a positive finite number.
    #[must_use]
    pub fn column_height_m(&self, column: ColumnId) -> f64 {
        self.column(column)
            .and_then(|c| c.height)
            .filter(|h| h.is_finite() && *h > 0.0)
            .unwrap_or_else(|| self.height_m())
    }
}

/// Full wardrobe parameters for pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wardrobe {
    /// Carcass geometry
    #[serde(flatten)]
    pub structure: Structure,
    /// Outer depth (cm)
    pub depth_cm: f64,
    /// Carcass material id
    pub material_id: String,
    /// Door and drawer front material id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_material_id: Option<String>,
    /// Back panel material id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_material_id: Option<String>,
    /// Whether door groups may override material and handle
    #[serde(default)]
    pub door_settings_mode: DoorSettingsMode,
    /// Wardrobe-wide handle id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle_id: Option<String>,
    /// Wardrobe-wide handle finish id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle_finish: Option<String>,
}

impl Wardrobe {
    /// Creates wardrobe parameters with the given structure, depth and carcass material.
    pub fn new(structure: Structure, depth_cm: f64, material_id: impl Into<String>) -> Self {
        Self {
            structure,
            depth_cm,
            material_id: material_id.into(),
            front_material_id: None,
            back_material_id: None,
            door_settings_mode: DoorSettingsMode::Global,
            handle_id: None,
            handle_finish: None,
        }
    }

    /// Sets the front material.
    #[must_use]
    pub fn with_front_material(mut self, id: impl Into<String>) -> Self {
        self.front_material_id = Some(id.into());
        self
    }

    /// Sets the back material.
    #[must_use]
    pub fn with_back_material(mut self, id: impl Into<String>) -> Self {
        self.back_material_id = Some(id.into());
        self
    }

    /// Sets the wardrobe-wide handle and finish.
    #[must_use]
    pub fn with_handle(mut self, handle_id: impl Into<String>, finish: impl Into<String>) -> Self {
        self.handle_id = Some(handle_id.into());
        self.handle_finish = Some(finish.into());
        self
    }

    /// Outer depth in meters.
    #[must_use]
    pub fn depth_m(&self) -> f64 {
        self.depth_cm / 100.0
    }
}

/// Persisted per-compartment configuration, owned by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WardrobeConfig {
    /// Inner subdivisions
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub element_configs: BTreeMap<CompartmentId, ElementConfig>,
    /// Extras
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub compartment_extras: BTreeMap<CompartmentId, CompartmentExtras>,
    /// Door groups
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub door_groups: Vec<DoorGroup>,
    /// Legacy single-compartment door selections
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub door_selections: BTreeMap<CompartmentKey, DoorType>,
}

impl WardrobeConfig {
    /// Checks the element config invariants of every entry.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending compartment.
    pub fn validate(&self) -> Result<()> {
        for (id, config) in &self.element_configs {
            config
                .validate()
                .with_context(|| format!("Invalid element config for compartment {id}"))?;
        }
        Ok(())
    }

    /// Door groups with at least one key inside `compartment`, in stored order.
    #[must_use]
    pub fn door_groups_for(&self, compartment: CompartmentId) -> Vec<&DoorGroup> {
        self.door_groups
            .iter()
            .filter(|group| group.references(compartment))
            .collect()
    }
}
