//! Shared test fixtures for engine and CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;
use wardrobe_cutlist::models::{
    Catalog, ColumnStructure, CompartmentId, CompartmentKey, DoorGroup, DoorType, ElementConfig,
    Handle, HandleFinish, Material, MaterialCategory, Structure, Wardrobe, WardrobeConfig,
};
use wardrobe_cutlist::parser::{save_project, ProjectFile};

/// Path to the wardrobe-cutlist binary.
pub fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_wardrobe-cutlist")
}

/// Runs the binary with an isolated, empty config directory.
pub fn run(args: &[&str], config_dir: &Path) -> Output {
    Command::new(bin())
        .env("WARDROBE_CUTLIST_CONFIG_DIR", config_dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Parses stdout as JSON.
pub fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("Invalid JSON ({e}): {stdout}"))
}

pub fn id(s: &str) -> CompartmentId {
    s.parse().expect("valid compartment id")
}

pub fn key(s: &str) -> CompartmentKey {
    s.parse().expect("valid compartment key")
}

fn material(id: &str, price: f64, thickness: f64, category: MaterialCategory) -> Material {
    Material {
        id: id.to_string(),
        name: id.to_uppercase(),
        price,
        thickness,
        categories: vec![category],
    }
}

/// Oak carcass, white front, HDF back, one bar handle in two finishes.
pub fn test_catalog() -> Catalog {
    Catalog::new(
        vec![
            material("oak", 40.0, 18.0, MaterialCategory::Korpus),
            material("white", 60.0, 18.0, MaterialCategory::Front),
            material("walnut", 90.0, 19.0, MaterialCategory::Front),
            material("hdf", 8.0, 3.0, MaterialCategory::Back),
        ],
        vec![Handle {
            id: "bar".to_string(),
            legacy_id: Some("bar-v1".to_string()),
            name: "Bar".to_string(),
            finishes: vec![
                HandleFinish {
                    id: "chrome".to_string(),
                    legacy_id: None,
                    name: "Chrome".to_string(),
                    price: 6.5,
                },
                HandleFinish {
                    id: "black".to_string(),
                    legacy_id: Some("blk".to_string()),
                    name: "Black".to_string(),
                    price: 9.0,
                },
            ],
        }],
    )
}

/// Single-column wardrobe without shelves.
pub fn simple_wardrobe(width_cm: f64, height_cm: f64) -> Wardrobe {
    Wardrobe::new(Structure::new(width_cm, height_cm), 60.0, "oak")
        .with_front_material("white")
        .with_back_material("hdf")
}

/// Two 105 cm columns, 240 cm tall, on a 10 cm base.
///
/// Column A has a shelf at 1.0 m and both columns split at 2.0 m, giving
/// A1, A2, A3 (top) and B1, B2 (top).
pub fn standard_wardrobe() -> Wardrobe {
    let structure = Structure::new(210.0, 240.0)
        .with_seams([0.0])
        .with_base(10.0)
        .with_column(
            0,
            ColumnStructure::default()
                .with_shelves([1.0])
                .with_module_boundary(2.0),
        )
        .with_column(1, ColumnStructure::default().with_module_boundary(2.0));

    Wardrobe::new(structure, 60.0, "oak")
        .with_front_material("white")
        .with_back_material("hdf")
        .with_handle("bar", "chrome")
}

/// Configuration for [`standard_wardrobe`]: split drawers in A1, a double
/// door on A2, and a legacy left door on B1.
pub fn standard_config() -> WardrobeConfig {
    let mut config = WardrobeConfig::default();
    config.element_configs.insert(
        id("A1"),
        ElementConfig::new(2)
            .with_row_counts(vec![1, 0])
            .with_drawer_counts(vec![0, 2]),
    );
    config.door_groups.push(DoorGroup::new(
        "a2",
        DoorType::Double { mirror: false },
        [key("A2")],
    ));
    config.door_selections.insert(key("B1"), "left".parse().expect("door type"));
    config
}

/// Writes a project file into `dir` and returns its path.
pub fn write_project(dir: &TempDir, name: &str, project: &ProjectFile) -> PathBuf {
    let path = dir.path().join(format!("{name}.json"));
    save_project(project, &path).expect("Failed to write project");
    path
}

/// Standard project with the catalog inline.
pub fn standard_project() -> ProjectFile {
    ProjectFile::new("Standard", standard_wardrobe(), standard_config())
        .with_catalog(test_catalog())
}

/// Writes a catalog file into `dir` and returns its path.
pub fn write_catalog(dir: &TempDir, catalog: &Catalog) -> PathBuf {
    let path = dir.path().join("catalog.json");
    fs::write(&path, serde_json::to_string_pretty(catalog).expect("serialize"))
        .expect("Failed to write catalog");
    path
}
