//! Application-wide constants.
//!
//! This module defines the binary name and the fixed dimensions the
//! structural engine works with. All lengths are in meters unless the name
//! says otherwise.

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "wardrobe-cutlist";

/// Directory name used under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "WardrobeCutlist";

/// Environment variable that replaces the config directory (used by tests).
pub const CONFIG_DIR_ENV: &str = "WARDROBE_CUTLIST_CONFIG_DIR";

/// Carcass panel thickness (18 mm board).
pub const PANEL_THICKNESS: f64 = 0.018;

/// Maximum width of an auto-segmented column.
pub const MAX_SEGMENT_X: f64 = 1.2;

/// Column height above which a column is split into bottom and top modules.
pub const MODULE_SPLIT_THRESHOLD: f64 = 2.0;

/// Smallest height a top module may have.
pub const MIN_TOP_MODULE_HEIGHT: f64 = 0.10;

/// Height of a single drawer front.
pub const DRAWER_HEIGHT: f64 = 0.10;

/// Vertical gap between stacked drawers.
pub const DRAWER_GAP: f64 = 0.01;

/// Minimum drawer slot in centimeters, used when clamping persisted drawer counts.
pub const MIN_DRAWER_SLOT_CM: f64 = 10.0;

/// Clearance taken off a single door leaf or drawer-style front.
pub const DOOR_CLEARANCE: f64 = 0.001;

/// Clearance taken off the pair of leaves in a double door.
pub const DOUBLE_DOOR_CLEARANCE: f64 = 0.003;

/// Clearance taken off each axis of a back panel.
pub const BACK_PANEL_CLEARANCE: f64 = 0.002;

/// Back panel thickness used when the back material is not in the catalog.
pub const DEFAULT_BACK_THICKNESS_MM: f64 = 3.0;

/// Reported front thickness when the front material is not in the catalog.
pub const DEFAULT_FRONT_THICKNESS_MM: f64 = 18.0;

/// Tolerance for floating-point comparisons on geometry.
pub const GEOMETRY_EPSILON: f64 = 1e-9;
