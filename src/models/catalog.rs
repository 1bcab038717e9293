//! Material and handle catalogs supplied by the caller.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Price category a panel is billed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialCategory {
    /// Carcass: sides, boards, shelves, dividers
    Korpus,
    /// Doors and drawer fronts
    Front,
    /// Back panels
    Back,
    /// Door handles
    Handles,
}

impl MaterialCategory {
    /// All categories in breakdown order.
    pub const ALL: [Self; 4] = [Self::Korpus, Self::Front, Self::Back, Self::Handles];

    /// Prefix used for cut-list item codes.
    #[must_use]
    pub const fn code_prefix(self) -> char {
        match self {
            Self::Korpus => 'K',
            Self::Front => 'F',
            Self::Back => 'B',
            Self::Handles => 'H',
        }
    }
}

impl fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Korpus => write!(f, "korpus"),
            Self::Front => write!(f, "front"),
            Self::Back => write!(f, "back"),
            Self::Handles => write!(f, "handles"),
        }
    }
}

/// A sheet material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Catalog id
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Price per square meter
    pub price: f64,
    /// Sheet thickness in millimeters
    pub thickness: f64,
    /// Categories this material may be used for
    #[serde(default)]
    pub categories: Vec<MaterialCategory>,
}

/// A finish variant of a handle, which carries the price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandleFinish {
    /// Finish id
    pub id: String,
    /// Id used by older configurations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Price per handle
    pub price: f64,
}

/// A handle model with its available finishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Handle {
    /// Handle id
    pub id: String,
    /// Id used by older configurations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Available finishes
    #[serde(default)]
    pub finishes: Vec<HandleFinish>,
}

impl Handle {
    /// Finds a finish by id or legacy id.
    #[must_use]
    pub fn finish(&self, finish_id: &str) -> Option<&HandleFinish> {
        self.finishes
            .iter()
            .find(|f| f.id == finish_id || f.legacy_id.as_deref() == Some(finish_id))
    }
}

/// Keyed lookup over materials and handles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Sheet materials
    #[serde(default)]
    pub materials: Vec<Material>,
    /// Handles
    #[serde(default)]
    pub handles: Vec<Handle>,
}

impl Catalog {
    /// Creates a catalog from materials and handles.
    #[must_use]
    pub fn new(materials: Vec<Material>, handles: Vec<Handle>) -> Self {
        Self { materials, handles }
    }

    /// Finds a material by id.
    #[must_use]
    pub fn material(&self, id: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.id == id)
    }

    /// Finds a handle by id or legacy id.
    #[must_use]
    pub fn handle(&self, id: &str) -> Option<&Handle> {
        self.handles
            .iter()
            .find(|h| h.id == id || h.legacy_id.as_deref() == Some(id))
    }

    /// Price of one handle in the given finish; 0 when either lookup fails.
    #[must_use]
    pub fn handle_price(&self, handle_id: Option<&str>, finish_id: Option<&str>) -> f64 {
        let (Some(handle_id), Some(finish_id)) = (handle_id, finish_id) else {
            return 0.0;
        };

        self.handle(handle_id)
            .and_then(|handle| handle.finish(finish_id))
            .map_or(0.0, |finish| finish.price)
    }

    /// Display name of a handle and finish, if both resolve.
    #[must_use]
    pub fn handle_name(&self, handle_id: &str, finish_id: &str) -> Option<String> {
        let handle = self.handle(handle_id)?;
        let finish = handle.finish(finish_id)?;
        Some(format!("{} ({})", handle.name, finish.name))
    }
}
