//! Door types, door groups, and door settings.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::compartment::{CompartmentId, CompartmentKey};

/// Hinge side of a single-leaf door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoorSide {
    /// Hinged on the left
    Left,
    /// Hinged on the right
    Right,
}

/// Door assembly type.
///
/// Serialized as the flat names `none`, `left`, `right`, `double`,
/// `leftMirror`, `rightMirror`, `doubleMirror`, `drawerStyle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DoorType {
    /// No door
    #[default]
    None,
    /// One hinged leaf
    Single {
        /// Hinge side
        side: DoorSide,
        /// Mirror front
        mirror: bool,
    },
    /// Two leaves meeting in the middle
    Double {
        /// Mirror fronts
        mirror: bool,
    },
    /// Flat push-open front styled like a drawer
    DrawerStyle,
}

impl DoorType {
    /// Number of door leaves this type produces.
    #[must_use]
    pub const fn leaf_count(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Single { .. } | Self::DrawerStyle => 1,
            Self::Double { .. } => 2,
        }
    }

    /// Number of handles this type needs. Drawer-style fronts are push-open.
    #[must_use]
    pub const fn handle_count(self) -> u32 {
        match self {
            Self::None | Self::DrawerStyle => 0,
            Self::Single { .. } => 1,
            Self::Double { .. } => 2,
        }
    }

    /// Flat serialized name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Single {
                side: DoorSide::Left,
                mirror: false,
            } => "left",
            Self::Single {
                side: DoorSide::Right,
                mirror: false,
            } => "right",
            Self::Single {
                side: DoorSide::Left,
                mirror: true,
            } => "leftMirror",
            Self::Single {
                side: DoorSide::Right,
                mirror: true,
            } => "rightMirror",
            Self::Double { mirror: false } => "double",
            Self::Double { mirror: true } => "doubleMirror",
            Self::DrawerStyle => "drawerStyle",
        }
    }

    /// Human-readable description used in cut-list rows.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::None => "No door",
            Self::Single {
                side: DoorSide::Left,
                mirror: false,
            } => "Left door",
            Self::Single {
                side: DoorSide::Right,
                mirror: false,
            } => "Right door",
            Self::Single {
                side: DoorSide::Left,
                mirror: true,
            } => "Left mirror door",
            Self::Single {
                side: DoorSide::Right,
                mirror: true,
            } => "Right mirror door",
            Self::Double { mirror: false } => "Double door",
            Self::Double { mirror: true } => "Double mirror door",
            Self::DrawerStyle => "Drawer-style front",
        }
    }
}

impl fmt::Display for DoorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DoorType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let door = match s.trim() {
            "none" => Self::None,
            "left" => Self::Single {
                side: DoorSide::Left,
                mirror: false,
            },
            "right" => Self::Single {
                side: DoorSide::Right,
                mirror: false,
            },
            "leftMirror" => Self::Single {
                side: DoorSide::Left,
                mirror: true,
            },
            "rightMirror" => Self::Single {
                side: DoorSide::Right,
                mirror: true,
            },
            "double" => Self::Double { mirror: false },
            "doubleMirror" => Self::Double { mirror: true },
            "drawerStyle" => Self::DrawerStyle,
            other => anyhow::bail!(
                "Unknown door type '{other}'. Expected one of: none, left, right, double, \
                 leftMirror, rightMirror, doubleMirror, drawerStyle"
            ),
        };
        Ok(door)
    }
}

impl TryFrom<String> for DoorType {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<DoorType> for String {
    fn from(door: DoorType) -> Self {
        door.as_str().to_string()
    }
}

/// Where door material and handle choices come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DoorSettingsMode {
    /// Every door uses the wardrobe-wide front material and handle
    #[default]
    Global,
    /// Door groups may override material and handle
    PerDoor,
}

/// One logical door assembly spanning one or more (sub-)compartments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorGroup {
    /// Group identifier
    pub id: String,
    /// Door type
    #[serde(rename = "type")]
    pub door_type: DoorType,
    /// Covered compartments. A group without this list is invalid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compartments: Option<Vec<CompartmentKey>>,
    /// Column letter the group was created in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// Per-door front material override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_id: Option<String>,
    /// Per-door handle override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle_id: Option<String>,
    /// Per-door handle finish override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle_finish: Option<String>,
}

impl DoorGroup {
    /// Creates a group covering the given keys.
    pub fn new(
        id: impl Into<String>,
        door_type: DoorType,
        compartments: impl IntoIterator<Item = CompartmentKey>,
    ) -> Self {
        Self {
            id: id.into(),
            door_type,
            compartments: Some(compartments.into_iter().collect()),
            column: None,
            material_id: None,
            handle_id: None,
            handle_finish: None,
        }
    }

    /// Covered keys, or an empty slice when the list is missing.
    #[must_use]
    pub fn keys(&self) -> &[CompartmentKey] {
        self.compartments.as_deref().unwrap_or(&[])
    }

    /// Returns true if any covered key lives in `compartment`.
    #[must_use]
    pub fn references(&self, compartment: CompartmentId) -> bool {
        self.keys().iter().any(|key| key.base() == compartment)
    }

    /// Distinct base compartments in first-seen order.
    #[must_use]
    pub fn base_compartments(&self) -> Vec<CompartmentId> {
        let mut bases: Vec<CompartmentId> = Vec::new();
        for key in self.keys() {
            let base = key.base();
            if !bases.contains(&base) {
                bases.push(base);
            }
        }
        bases
    }
}
