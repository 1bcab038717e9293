//! Data models for wardrobe geometry, configuration, catalogs, and cut lists.
//!
//! This module contains the core data structures used throughout the crate.
//! Models are plain data with serde support; the algorithms that operate on
//! them live in [`crate::services`].

pub mod catalog;
pub mod compartment;
pub mod cut_list;
pub mod door;
pub mod element;
pub mod geometry;
pub mod wardrobe;

// Re-export all model types
pub use catalog::{Catalog, Handle, HandleFinish, Material, MaterialCategory};
pub use compartment::{ColumnId, CompartmentId, CompartmentKey, SubCompartmentId};
pub use cut_list::{CategoryTotal, CutList, ElementGroup, HardwareItem, Panel, PriceBreakdown};
pub use door::{DoorGroup, DoorSettingsMode, DoorSide, DoorType};
pub use element::{CompartmentExtras, ElementConfig};
pub use geometry::{CenteredY, FloorY, LinearBlock, Module, ModuleLabel};
pub use wardrobe::{ColumnStructure, Structure, Wardrobe, WardrobeConfig};
