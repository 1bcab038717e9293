//! Per-compartment subdivision and extras configuration.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Inner subdivision of a compartment.
///
/// A compartment is split into `columns` inner sections by `columns - 1`
/// inner dividers. Each section carries its own inner shelf count and,
/// optionally, a drawer stack.
///
/// # Invariants
///
/// - `columns >= 1`
/// - `row_counts.len() == columns`
/// - `drawer_counts.len() == columns` when present
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementConfig {
    /// Number of inner vertical sections
    pub columns: u32,
    /// Inner shelf count per section
    pub row_counts: Vec<u32>,
    /// Configured drawer count per section
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawer_counts: Option<Vec<u32>>,
    /// Whether each section's drawers are external (front-mounted)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawers_external: Option<Vec<bool>>,
}

impl ElementConfig {
    /// Creates a config with `columns` sections and no inner shelves.
    #[must_use]
    pub fn new(columns: u32) -> Self {
        let columns = columns.max(1);
        Self {
            columns,
            row_counts: vec![0; columns as usize],
            drawer_counts: None,
            drawers_external: None,
        }
    }

    /// Sets per-section inner shelf counts.
    #[must_use]
    pub fn with_row_counts(mut self, row_counts: Vec<u32>) -> Self {
        self.row_counts = row_counts;
        self
    }

    /// Sets per-section drawer counts.
    #[must_use]
    pub fn with_drawer_counts(mut self, drawer_counts: Vec<u32>) -> Self {
        self.drawer_counts = Some(drawer_counts);
        self
    }

    /// Sets per-section external drawer flags.
    #[must_use]
    pub fn with_drawers_external(mut self, drawers_external: Vec<bool>) -> Self {
        self.drawers_external = Some(drawers_external);
        self
    }

    /// Inner shelf count for a section (0 when out of range).
    #[must_use]
    pub fn row_count(&self, section: usize) -> u32 {
        self.row_counts.get(section).copied().unwrap_or(0)
    }

    /// Configured drawer count for a section (0 when unset).
    #[must_use]
    pub fn drawer_count(&self, section: usize) -> u32 {
        self.drawer_counts
            .as_ref()
            .and_then(|counts| counts.get(section).copied())
            .unwrap_or(0)
    }

    /// Whether a section's drawers are external.
    #[must_use]
    pub fn is_drawer_external(&self, section: usize) -> bool {
        self.drawers_external
            .as_ref()
            .and_then(|flags| flags.get(section).copied())
            .unwrap_or(false)
    }

    /// Checks the length invariants.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first violated invariant.
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            anyhow::bail!("Element config must have at least one column");
        }

        let columns = self.columns as usize;
        if self.row_counts.len() != columns {
            anyhow::bail!(
                "Element config has {} row counts for {} columns",
                self.row_counts.len(),
                columns
            );
        }

        if let Some(drawer_counts) = &self.drawer_counts {
            if drawer_counts.len() != columns {
                anyhow::bail!(
                    "Element config has {} drawer counts for {} columns",
                    drawer_counts.len(),
                    columns
                );
            }
        }

        Ok(())
    }
}

impl Default for ElementConfig {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Optional per-compartment extras.
///
/// These flags are independent of each other inside the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompartmentExtras {
    /// Free-standing vertical divider (only meaningful for single-section compartments)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_divider: Option<bool>,
    /// Drawer stack without an element config
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawers: Option<bool>,
    /// Requested drawer count for `drawers`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawers_count: Option<u32>,
    /// Clothes rail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rod: Option<bool>,
    /// LED strip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub led: Option<bool>,
}

impl CompartmentExtras {
    /// Returns true if the vertical divider extra is enabled.
    #[must_use]
    pub fn has_vertical_divider(&self) -> bool {
        self.vertical_divider.unwrap_or(false)
    }

    /// Requested drawer count; 0 unless the drawers extra is enabled.
    #[must_use]
    pub fn requested_drawers(&self) -> u32 {
        if self.drawers.unwrap_or(false) {
            self.drawers_count.unwrap_or(0)
        } else {
            0
        }
    }
}
