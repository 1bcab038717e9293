//! Cut-list output types.

use serde::{Deserialize, Serialize};

use super::catalog::MaterialCategory;

/// One physical panel to cut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    /// Sequential code within its category (`K1`, `F3`, ...)
    pub code: String,
    /// What the panel is
    pub description: String,
    /// Owning element label used for grouping
    pub element: String,
    /// Width (cm)
    pub width_cm: f64,
    /// Height or length (cm)
    pub height_cm: f64,
    /// Sheet thickness (mm)
    pub thickness_mm: f64,
    /// Area (m²)
    pub area_m2: f64,
    /// `area_m2 × unit price`
    pub cost: f64,
    /// Price category
    pub category: MaterialCategory,
    /// Material the panel is cut from
    pub material_id: String,
}

/// Countable hardware (handles).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareItem {
    /// Sequential code (`H1`, ...)
    pub code: String,
    /// What the item is
    pub description: String,
    /// Owning element label
    pub element: String,
    /// Number of pieces
    pub quantity: u32,
    /// Price per piece
    pub unit_price: f64,
    /// `quantity × unit_price`
    pub total: f64,
}

/// Panels that belong to one element label, in emission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementGroup {
    /// Element label
    pub element: String,
    /// Panels owned by the element
    pub items: Vec<Panel>,
}

/// Area and rounded price of one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Total area (m²); 0 for handles
    pub area: f64,
    /// Rounded price
    pub price: f64,
}

/// Per-category totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Carcass panels
    pub korpus: CategoryTotal,
    /// Doors and drawer fronts
    pub front: CategoryTotal,
    /// Back panels
    pub back: CategoryTotal,
    /// Handles
    pub handles: CategoryTotal,
}

impl PriceBreakdown {
    /// Totals for one category.
    #[must_use]
    pub const fn get(&self, category: MaterialCategory) -> &CategoryTotal {
        match category {
            MaterialCategory::Korpus => &self.korpus,
            MaterialCategory::Front => &self.front,
            MaterialCategory::Back => &self.back,
            MaterialCategory::Handles => &self.handles,
        }
    }

    /// Sum of the rounded category prices.
    #[must_use]
    pub fn total_price(&self) -> f64 {
        self.korpus.price + self.front.price + self.back.price + self.handles.price
    }
}

/// Result of a cut-list pass.
///
/// An empty cut list (no items, zero totals) means the wardrobe cannot be
/// priced yet, which is different from a wardrobe that prices at zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CutList {
    /// Panels in emission order
    pub items: Vec<Panel>,
    /// Panels grouped by element label, in first-seen order
    pub grouped_by_element: Vec<ElementGroup>,
    /// Handles
    pub hardware: Vec<HardwareItem>,
    /// Sum of panel areas (m²)
    pub total_area: f64,
    /// Panel cost plus handle cost
    pub total_cost: f64,
    /// Unit price of the carcass material
    pub price_per_m2: f64,
    /// Per-category totals
    pub price_breakdown: PriceBreakdown,
}

impl CutList {
    /// Returns true for the "cannot price yet" result.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.hardware.is_empty()
    }

    /// Panels owned by an element label.
    #[must_use]
    pub fn items_for(&self, element: &str) -> Vec<&Panel> {
        self.items.iter().filter(|p| p.element == element).collect()
    }

    /// Panels of one category.
    #[must_use]
    pub fn items_in(&self, category: MaterialCategory) -> Vec<&Panel> {
        self.items.iter().filter(|p| p.category == category).collect()
    }

    /// Total handle count.
    #[must_use]
    pub fn handle_count(&self) -> u32 {
        self.hardware.iter().map(|h| h.quantity).sum()
    }
}
