//! End-to-end tests for `wardrobe-cutlist reconcile`.

mod fixtures;
use fixtures::*;

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use wardrobe_cutlist::models::{
    ColumnStructure, CompartmentExtras, DoorGroup, DoorType, ElementConfig,
};
use wardrobe_cutlist::parser::{parse_project, ProjectFile};

/// Standard project plus four entries for a column C that does not exist.
fn stale_project() -> ProjectFile {
    let mut project = standard_project();
    let config = &mut project.configuration;

    config
        .element_configs
        .insert(id("C1"), ElementConfig::new(1));
    config
        .compartment_extras
        .insert(id("C1"), CompartmentExtras::default());
    config.door_groups.push(DoorGroup::new(
        "ghost",
        DoorType::DrawerStyle,
        [key("A1"), key("C1")],
    ));
    config.door_selections.insert(key("C1"), DoorType::DrawerStyle);

    project
}

fn reconcile(project: &Path, extra: &[&str], config_dir: &Path) -> std::process::Output {
    let mut args = vec!["reconcile", "--project", project.to_str().unwrap()];
    args.extend_from_slice(extra);
    run(&args, config_dir)
}

#[test]
fn test_reconcile_clean_project() {
    let dir = TempDir::new().unwrap();
    let project = write_project(&dir, "standard", &standard_project());

    let output = reconcile(&project, &["--check"], dir.path());
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓ Configuration matches the current geometry"));
}

#[test]
fn test_reconcile_reports_without_writing() {
    let dir = TempDir::new().unwrap();
    let project = write_project(&dir, "stale", &stale_project());
    let before = fs::read_to_string(&project).unwrap();

    let output = reconcile(&project, &["--json"], dir.path());
    assert_eq!(output.status.code(), Some(0));

    let result = stdout_json(&output);
    assert_eq!(result["clean"], false);
    assert_eq!(result["changes"], 4);
    assert_eq!(result["written"], false);
    assert_eq!(result["report"]["dropped_element_configs"][0], "C1");
    assert_eq!(result["report"]["dropped_door_groups"][0], "ghost");
    assert_eq!(result["report"]["dropped_door_selections"][0], "C1");

    assert_eq!(fs::read_to_string(&project).unwrap(), before);
}

#[test]
fn test_reconcile_text_lists_changes() {
    let dir = TempDir::new().unwrap();
    let project = write_project(&dir, "stale", &stale_project());

    let output = reconcile(&project, &[], dir.path());
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✗ 4 stale configuration entries"));
    assert!(stdout.contains("door group ghost"));
}

#[test]
fn test_reconcile_check_fails_when_stale() {
    let dir = TempDir::new().unwrap();
    let project = write_project(&dir, "stale", &stale_project());

    let output = reconcile(&project, &["--check"], dir.path());
    assert_eq!(output.status.code(), Some(3));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("4 configuration entries are stale"), "stderr: {stderr}");
}

#[test]
fn test_reconcile_write_persists() {
    let dir = TempDir::new().unwrap();
    let project = write_project(&dir, "stale", &stale_project());

    let output = reconcile(&project, &["--write"], dir.path());
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Project updated."));

    let saved = parse_project(&project).unwrap();
    assert_eq!(saved.configuration, standard_config());
    assert_eq!(saved.catalog, Some(test_catalog()));
    assert_eq!(saved.name, "Standard");

    let again = reconcile(&project, &["--check"], dir.path());
    assert_eq!(again.status.code(), Some(0));
}

#[test]
fn test_reconcile_clamps_drawers_after_shrink() {
    let dir = TempDir::new().unwrap();
    let mut project = standard_project();
    // A1 drops from 88.2 cm to 28.2 cm: room for two drawer slots
    project.wardrobe.structure = project.wardrobe.structure.clone().with_column(
        0,
        ColumnStructure::default()
            .with_shelves([0.4])
            .with_module_boundary(2.0),
    );
    project.configuration.element_configs.insert(
        id("A1"),
        ElementConfig::new(2)
            .with_row_counts(vec![1, 0])
            .with_drawer_counts(vec![0, 5])
            .with_drawers_external(vec![false, true]),
    );
    let path = write_project(&dir, "shrunk", &project);

    let output = reconcile(&path, &["--write", "--json"], dir.path());
    assert_eq!(output.status.code(), Some(0));

    let result = stdout_json(&output);
    let clamp = &result["report"]["clamped_drawers"][0];
    assert_eq!(clamp["compartment"], "A1");
    assert_eq!(clamp["after"], serde_json::json!([0, 2]));
    assert_eq!(clamp["cleared_external"], false);

    let saved = parse_project(&path).unwrap();
    let a1 = &saved.configuration.element_configs[&id("A1")];
    assert_eq!(a1.drawer_counts, Some(vec![0, 2]));
    assert_eq!(a1.drawers_external, Some(vec![false, true]));
}

#[test]
fn test_reconcile_write_conflicts_with_check() {
    let dir = TempDir::new().unwrap();
    let project = write_project(&dir, "standard", &standard_project());

    let output = reconcile(&project, &["--write", "--check"], dir.path());
    assert_eq!(output.status.code(), Some(2));
}
