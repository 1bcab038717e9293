//! Compartment enumerator.
//!
//! This is the single authority on which compartments exist. Every other
//! component asks [`enumerate_columns`] or [`compartment_heights`] instead of
//! deciding existence on its own.
//!
//! Per column:
//! 1. Height is the column override or the wardrobe height.
//! 2. A stored module boundary is active only if the column is taller than
//!    2.0 m, so shrinking a column silently disables its split.
//! 3. The bottom module spans `[t + base, boundary - t]` (split) or
//!    `[t + base, height - t]` (no split).
//! 4. Sorted shelves cut the module into `N + 1` compartments numbered from 1.
//! 5. With a split, the top module spans `[boundary + t, height - t]` and its
//!    compartments continue the numbering.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::constants::{MODULE_SPLIT_THRESHOLD, PANEL_THICKNESS};
use crate::models::{ColumnId, CompartmentId, FloorY, LinearBlock, ModuleLabel, Structure};
use crate::services::partition::build_blocks_x;

/// One edge of a compartment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// Surface of a full panel (bottom/top board or module-boundary board)
    Surface(FloorY),
    /// Centerline of a shelf
    Shelf(FloorY),
}

impl Bound {
    /// Position of the edge.
    #[must_use]
    pub const fn y(self) -> FloorY {
        match self {
            Self::Surface(y) | Self::Shelf(y) => y,
        }
    }

    /// Returns true if the edge is a shelf centerline.
    #[must_use]
    pub const fn is_shelf(self) -> bool {
        matches!(self, Self::Shelf(_))
    }

    /// Material of the bounding panel that sits inside the centerline span.
    ///
    /// Half a shelf lies on each side of its centerline; a panel surface
    /// takes nothing away.
    #[must_use]
    pub fn deduction(self) -> f64 {
        if self.is_shelf() {
            PANEL_THICKNESS / 2.0
        } else {
            0.0
        }
    }
}

/// Geometry of a single compartment.
#[derive(Debug, Clone, PartialEq)]
pub struct CompartmentLayout {
    /// Compartment id
    pub id: CompartmentId,
    /// Module the compartment sits in
    pub module: ModuleLabel,
    /// Lower edge
    pub lower: Bound,
    /// Upper edge
    pub upper: Bound,
}

impl CompartmentLayout {
    /// Span between the two edges in meters (shelf centerlines included).
    #[must_use]
    pub fn height_m(&self) -> f64 {
        self.upper.y().meters() - self.lower.y().meters()
    }

    /// Span in centimeters; this is the `heightCm` of the validity map.
    #[must_use]
    pub fn height_cm(&self) -> f64 {
        self.height_m() * 100.0
    }

    /// Free vertical clearance in meters.
    ///
    /// Each shelf edge gives up half a panel thickness; each panel-surface
    /// edge gives up nothing. The two edges are evaluated independently.
    #[must_use]
    pub fn clear_height_m(&self) -> f64 {
        self.height_m() - self.lower.deduction() - self.upper.deduction()
    }
}

/// Usable range and shelves of one module in a column.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleLayout {
    /// Module label
    pub label: ModuleLabel,
    /// Lower usable edge (top surface of the board below)
    pub lower: FloorY,
    /// Upper usable edge (bottom surface of the board above)
    pub upper: FloorY,
    /// Shelf centerlines, ascending
    pub shelves: Vec<FloorY>,
}

/// Resolved geometry of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    /// Column id
    pub column: ColumnId,
    /// Horizontal extent (centered meters)
    pub block: LinearBlock,
    /// Effective column height (meters)
    pub height: f64,
    /// Active module boundary, if the column is split
    pub module_boundary: Option<FloorY>,
    /// One or two modules, bottom first
    pub modules: Vec<ModuleLayout>,
    /// Compartments in numbering order
    pub compartments: Vec<CompartmentLayout>,
}

impl ColumnLayout {
    /// Width between the two side or seam panels bounding the column.
    #[must_use]
    pub fn inner_width(&self) -> f64 {
        self.block.width - 2.0 * PANEL_THICKNESS
    }

    /// Returns true if the column has an active module split.
    #[must_use]
    pub fn has_module_split(&self) -> bool {
        self.module_boundary.is_some()
    }

    /// Looks up a compartment in this column.
    #[must_use]
    pub fn compartment(&self, id: CompartmentId) -> Option<&CompartmentLayout> {
        self.compartments.iter().find(|c| c.id == id)
    }
}

/// Entry of the validity map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompartmentInfo {
    /// Centerline-to-centerline height in centimeters
    pub height_cm: f64,
}

/// Validity map: every existing compartment with its height.
pub type CompartmentMap = BTreeMap<CompartmentId, CompartmentInfo>;

/// Resolves the layout of every column, left to right.
#[must_use]
pub fn enumerate_columns(structure: &Structure) -> Vec<ColumnLayout> {
    let blocks = build_blocks_x(structure.width_m(), &structure.seams);
    let base = structure.base_height_m();

    blocks
        .into_iter()
        .enumerate()
        .map(|(index, block)| {
            let column = ColumnId(index as u32);
            layout_column(structure, column, block, base)
        })
        .collect()
}

fn layout_column(
    structure: &Structure,
    column: ColumnId,
    block: LinearBlock,
    base: f64,
) -> ColumnLayout {
    let height = structure.column_height_m(column);
    let settings = structure.column(column).cloned().unwrap_or_default();

    let module_boundary = match settings.module_boundary {
        Some(boundary) if height > MODULE_SPLIT_THRESHOLD => Some(boundary),
        Some(boundary) => {
            debug!(
                "Column {column}: module boundary at {boundary} ignored, height {height:.3} m is not above threshold"
            );
            None
        }
        None => None,
    };

    let t = PANEL_THICKNESS;
    let mut modules = Vec::with_capacity(2);

    let bottom_label = if module_boundary.is_some() {
        ModuleLabel::BottomModule
    } else {
        ModuleLabel::SingleModule
    };
    let bottom_upper = module_boundary.map_or(height - t, |b| b.meters() - t);
    modules.push(ModuleLayout {
        label: bottom_label,
        lower: FloorY(t + base),
        upper: FloorY(bottom_upper),
        shelves: sorted(&settings.shelves),
    });

    if let Some(boundary) = module_boundary {
        modules.push(ModuleLayout {
            label: ModuleLabel::TopModule,
            lower: FloorY(boundary.meters() + t),
            upper: FloorY(height - t),
            shelves: sorted(&settings.top_shelves),
        });
    }

    let mut compartments = Vec::new();
    let mut next_index = 1u32;
    for module in &modules {
        let mut edges = Vec::with_capacity(module.shelves.len() + 2);
        edges.push(Bound::Surface(module.lower));
        edges.extend(module.shelves.iter().copied().map(Bound::Shelf));
        edges.push(Bound::Surface(module.upper));

        for pair in edges.windows(2) {
            compartments.push(CompartmentLayout {
                id: CompartmentId {
                    column,
                    index: next_index,
                },
                module: module.label,
                lower: pair[0],
                upper: pair[1],
            });
            next_index += 1;
        }
    }

    ColumnLayout {
        column,
        block,
        height,
        module_boundary,
        modules,
        compartments,
    }
}

fn sorted(shelves: &[FloorY]) -> Vec<FloorY> {
    let mut shelves = shelves.to_vec();
    shelves.sort_by(|a, b| a.meters().total_cmp(&b.meters()));
    shelves
}

/// Computes the validity map for the current geometry.
///
/// # Examples
///
/// ```
/// use wardrobe_cutlist::models::{CompartmentId, Structure};
/// use wardrobe_cutlist::services::compartments::compartment_heights;
///
/// let structure = Structure::new(210.0, 180.0).with_seams([0.0]);
/// let map = compartment_heights(&structure);
///
/// assert_eq!(map.len(), 2);
/// let a1 = map[&CompartmentId::new(0, 1)];
/// assert!((a1.height_cm - 176.4).abs() < 1e-9);
/// ```
#[must_use]
pub fn compartment_heights(structure: &Structure) -> CompartmentMap {
    enumerate_columns(structure)
        .iter()
        .flat_map(|column| column.compartments.iter())
        .map(|c| {
            (
                c.id,
                CompartmentInfo {
                    height_cm: c.height_cm(),
                },
            )
        })
        .collect()
}
