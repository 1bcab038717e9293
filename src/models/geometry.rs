//! Linear extents and vertical coordinate systems.
//!
//! Two vertical coordinate systems are in play:
//!
//! - [`FloorY`] measures meters upward from the floor. Stored shelf positions
//!   and module boundaries use it.
//! - [`CenteredY`] measures meters from the vertical center of the carcass.
//!   The partition builder and panel placement use it.
//!
//! The two never mix implicitly; conversion always goes through
//! [`FloorY::to_centered`] / [`CenteredY::to_floor`] with the carcass height.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Height above the floor, in meters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloorY(pub f64);

/// Height relative to the vertical center of the carcass, in meters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CenteredY(pub f64);

impl FloorY {
    /// Raw value in meters.
    #[must_use]
    pub const fn meters(self) -> f64 {
        self.0
    }

    /// Converts to the centered system for a carcass of `total_height` meters.
    #[must_use]
    pub fn to_centered(self, total_height: f64) -> CenteredY {
        CenteredY(self.0 - total_height / 2.0)
    }

    /// Returns true if the position is a finite number.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl CenteredY {
    /// Raw value in meters.
    #[must_use]
    pub const fn meters(self) -> f64 {
        self.0
    }

    /// Converts to the floor-origin system for a carcass of `total_height` meters.
    #[must_use]
    pub fn to_floor(self, total_height: f64) -> FloorY {
        FloorY(self.0 + total_height / 2.0)
    }
}

impl fmt::Display for FloorY {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} m (floor)", self.0)
    }
}

impl fmt::Display for CenteredY {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+.3} m (centered)", self.0)
    }
}

/// A contiguous sub-extent of the width axis (centered coordinates, meters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearBlock {
    /// Left edge
    pub start: f64,
    /// Right edge
    pub end: f64,
    /// `end - start`
    pub width: f64,
}

impl LinearBlock {
    /// Creates a block spanning `start..end`.
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            width: end - start,
        }
    }

    /// Horizontal center of the block.
    #[must_use]
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Which vertical band of a column a module is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleLabel {
    /// Column is not split
    SingleModule,
    /// Lower band of a split column
    BottomModule,
    /// Upper band of a split column
    TopModule,
}

impl fmt::Display for ModuleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingleModule => write!(f, "SingleModule"),
            Self::BottomModule => write!(f, "BottomModule"),
            Self::TopModule => write!(f, "TopModule"),
        }
    }
}

/// A vertical band of the wardrobe in centered coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// Lower edge
    pub y_start: CenteredY,
    /// Upper edge
    pub y_end: CenteredY,
    /// `y_end - y_start` in meters
    pub height: f64,
    /// Band label
    pub label: ModuleLabel,
}

impl Module {
    /// Creates a module spanning `y_start..y_end`.
    #[must_use]
    pub fn new(y_start: CenteredY, y_end: CenteredY, label: ModuleLabel) -> Self {
        Self {
            y_start,
            y_end,
            height: y_end.0 - y_start.0,
            label,
        }
    }
}
