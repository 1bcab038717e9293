//! Partition builder: splits the width and height axes into blocks.
//!
//! Widths use centered X coordinates (0 = horizontal center). Modules are
//! returned in [`CenteredY`]; callers that work in floor-origin meters convert
//! with [`CenteredY::to_floor`].

use crate::constants::{
    GEOMETRY_EPSILON, MAX_SEGMENT_X, MIN_TOP_MODULE_HEIGHT, MODULE_SPLIT_THRESHOLD,
};
use crate::models::{CenteredY, FloorY, LinearBlock, Module, ModuleLabel};

/// Splits `total_width` (meters) into contiguous column blocks.
///
/// With explicit boundaries the blocks run from `-total_width/2` through each
/// boundary to `+total_width/2`. Boundaries are sorted on a copy; any that
/// are not finite or fall outside the open extent are ignored so the blocks
/// always cover the extent exactly.
///
/// Without usable boundaries the width is auto-segmented into
/// `max(1, ceil(total_width / 1.2))` equal blocks.
///
/// # Examples
///
/// ```
/// use wardrobe_cutlist::services::partition::build_blocks_x;
///
/// let blocks = build_blocks_x(2.1, &[0.0]);
/// assert_eq!(blocks.len(), 2);
/// assert!((blocks[0].start + 1.05).abs() < 1e-9);
/// assert!((blocks[1].end - 1.05).abs() < 1e-9);
///
/// assert_eq!(build_blocks_x(3.0, &[]).len(), 3);
/// ```
#[must_use]
pub fn build_blocks_x(total_width: f64, explicit_boundaries: &[f64]) -> Vec<LinearBlock> {
    let half = total_width / 2.0;

    let mut boundaries: Vec<f64> = explicit_boundaries
        .iter()
        .copied()
        .filter(|x| x.is_finite() && *x > -half + GEOMETRY_EPSILON && *x < half - GEOMETRY_EPSILON)
        .collect();
    boundaries.sort_by(f64::total_cmp);
    boundaries.dedup_by(|a, b| (*a - *b).abs() < GEOMETRY_EPSILON);

    if !boundaries.is_empty() {
        let mut edges = Vec::with_capacity(boundaries.len() + 2);
        edges.push(-half);
        edges.extend(boundaries);
        edges.push(half);

        return edges
            .windows(2)
            .map(|pair| LinearBlock::new(pair[0], pair[1]))
            .collect();
    }

    let count = auto_segment_count(total_width);
    let width = total_width / count as f64;

    (0..count)
        .map(|i| {
            let start = -half + width * i as f64;
            // Pin the last edge so rounding never leaves a sliver
            let end = if i + 1 == count { half } else { start + width };
            LinearBlock::new(start, end)
        })
        .collect()
}

/// Number of equal columns the auto-segmentation rule produces.
#[must_use]
pub fn auto_segment_count(total_width: f64) -> usize {
    if !total_width.is_finite() || total_width <= 0.0 {
        return 1;
    }
    ((total_width / MAX_SEGMENT_X - GEOMETRY_EPSILON).ceil() as usize).max(1)
}

/// Splits `total_height` (meters) into one or two vertical modules.
///
/// Heights up to the threshold (2.0 m unless overridden) give one
/// `SingleModule`. Taller heights give a 2.0 m `BottomModule` and a
/// `TopModule` with the remainder, except that the bottom shrinks to
/// `total_height - 0.10` when the top would otherwise be under 0.10 m.
///
/// # Examples
///
/// ```
/// use wardrobe_cutlist::models::ModuleLabel;
/// use wardrobe_cutlist::services::partition::build_modules_y;
///
/// let modules = build_modules_y(2.4, None);
/// assert_eq!(modules.len(), 2);
/// assert_eq!(modules[0].label, ModuleLabel::BottomModule);
/// assert!((modules[0].height - 2.0).abs() < 1e-9);
///
/// let modules = build_modules_y(2.05, None);
/// assert!((modules[1].height - 0.10).abs() < 1e-9);
/// ```
#[must_use]
pub fn build_modules_y(total_height: f64, split_threshold_override: Option<f64>) -> Vec<Module> {
    let threshold = split_threshold_override.unwrap_or(MODULE_SPLIT_THRESHOLD);
    let bottom_edge = CenteredY(-total_height / 2.0);
    let top_edge = CenteredY(total_height / 2.0);

    if total_height <= threshold {
        return vec![Module::new(bottom_edge, top_edge, ModuleLabel::SingleModule)];
    }

    let bottom_height = default_bottom_module_height(total_height, threshold);
    let split = CenteredY(bottom_edge.0 + bottom_height);

    vec![
        Module::new(bottom_edge, split, ModuleLabel::BottomModule),
        Module::new(split, top_edge, ModuleLabel::TopModule),
    ]
}

/// Bottom module height for a split column of `total_height` meters.
fn default_bottom_module_height(total_height: f64, threshold: f64) -> f64 {
    if total_height - threshold < MIN_TOP_MODULE_HEIGHT {
        total_height - MIN_TOP_MODULE_HEIGHT
    } else {
        threshold
    }
}

/// Floor-origin position of the default module split for a column height.
///
/// Returns `None` when the column is not tall enough to split.
#[must_use]
pub fn default_module_boundary(column_height: f64) -> Option<FloorY> {
    let modules = build_modules_y(column_height, None);
    match modules.as_slice() {
        [bottom, _top] => Some(bottom.y_end.to_floor(column_height)),
        _ => None,
    }
}
