//! End-to-end tests of the structural engine through the public library API.

mod fixtures;

use fixtures::*;
use wardrobe_cutlist::constants::PANEL_THICKNESS;
use wardrobe_cutlist::models::{
    Catalog, ColumnStructure, CompartmentExtras, DoorGroup, DoorSettingsMode, DoorType,
    ElementConfig, FloorY, MaterialCategory, Structure, Wardrobe, WardrobeConfig,
};
use wardrobe_cutlist::services::compartments::{compartment_heights, enumerate_columns};
use wardrobe_cutlist::services::{generate_cut_list, reconcile};

fn ids(structure: &Structure) -> Vec<String> {
    compartment_heights(structure)
        .keys()
        .map(ToString::to_string)
        .collect()
}

// ============================================================================
// Reference scenarios
// ============================================================================

#[test]
fn test_two_columns_without_shelves() {
    let structure = Structure::new(210.0, 180.0).with_seams([0.0]);
    let map = compartment_heights(&structure);

    assert_eq!(ids(&structure), vec!["A1", "B1"]);
    for info in map.values() {
        assert!((info.height_cm - 176.4).abs() < 1e-9);
    }
}

#[test]
fn test_module_boundary_doubles_compartments() {
    let structure = Structure::new(210.0, 240.0)
        .with_seams([0.0])
        .with_column(0, ColumnStructure::default().with_module_boundary(2.0))
        .with_column(1, ColumnStructure::default().with_module_boundary(2.0));

    assert_eq!(ids(&structure), vec!["A1", "A2", "B1", "B2"]);
}

#[test]
fn test_drawer_clamp_on_base() {
    let structure = Structure::new(100.0, 50.0).with_base(20.0);
    let map = compartment_heights(&structure);
    assert!((map[&id("A1")].height_cm - 26.4).abs() < 1e-9);

    let mut config = WardrobeConfig::default();
    config
        .element_configs
        .insert(id("A1"), ElementConfig::new(1).with_drawer_counts(vec![5]));

    let result = reconcile(&structure, &config);
    assert_eq!(
        result.config.element_configs[&id("A1")].drawer_counts,
        Some(vec![2])
    );
}

#[test]
fn test_auto_segmentation_three_columns() {
    let structure = Structure::new(300.0, 200.0);
    assert_eq!(ids(&structure), vec!["A1", "B1", "C1"]);

    let columns = enumerate_columns(&structure);
    for column in &columns {
        assert!((column.block.width - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_door_group_with_missing_compartment_is_dropped() {
    let structure =
        Structure::new(100.0, 200.0).with_column(0, ColumnStructure::default().with_shelves([1.0]));
    assert_eq!(ids(&structure), vec!["A1", "A2"]);

    let mut config = WardrobeConfig::default();
    config.door_groups.push(DoorGroup::new(
        "tall",
        DoorType::Double { mirror: false },
        [key("A1"), key("A3")],
    ));

    let result = reconcile(&structure, &config);
    assert!(result.config.door_groups.is_empty());
    assert_eq!(result.report.dropped_door_groups, vec!["tall".to_string()]);
}

#[test]
fn test_total_cost_matches_breakdown() {
    let cut_list = generate_cut_list(&standard_wardrobe(), &standard_config(), &test_catalog());

    let breakdown = cut_list.price_breakdown;
    assert!((cut_list.total_cost - breakdown.total_price()).abs() <= 1.0);
    assert_eq!(breakdown.korpus.price, 500.0);
    assert_eq!(breakdown.front.price, 179.0);
    assert_eq!(breakdown.back.price, 40.0);
    assert_eq!(breakdown.handles.price, 20.0);
    assert!((cut_list.total_cost - 738.434_768).abs() < 1e-6);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_compartments_cover_column_height() {
    let structure = Structure::new(240.0, 190.0)
        .with_seams([0.3])
        .with_base(8.0)
        .with_column(0, ColumnStructure::default().with_shelves([0.4, 1.2, 0.9]))
        .with_column(1, ColumnStructure::default().with_height(1.5).with_shelves([0.7]));

    for column in enumerate_columns(&structure) {
        let sum: f64 = column.compartments.iter().map(|c| c.height_m()).sum();
        let usable = column.height - 2.0 * PANEL_THICKNESS - 0.08;
        assert!(
            (sum - usable).abs() < 1e-9,
            "column {} sums to {sum}, expected {usable}",
            column.column
        );
    }
}

#[test]
fn test_shelf_order_does_not_matter() {
    let shuffled = Structure::new(100.0, 200.0)
        .with_column(0, ColumnStructure::default().with_shelves([1.5, 0.5, 1.0]));
    let sorted = Structure::new(100.0, 200.0)
        .with_column(0, ColumnStructure::default().with_shelves([0.5, 1.0, 1.5]));

    assert_eq!(compartment_heights(&shuffled), compartment_heights(&sorted));
}

#[test]
fn test_reconcile_is_idempotent() {
    let structure = Structure::new(100.0, 120.0).with_base(10.0);
    let mut config = standard_config();
    config.compartment_extras.insert(
        id("A1"),
        CompartmentExtras {
            rod: Some(true),
            ..Default::default()
        },
    );
    config.element_configs.insert(
        id("A1"),
        ElementConfig::new(1)
            .with_drawer_counts(vec![30])
            .with_drawers_external(vec![true]),
    );

    let once = reconcile(&structure, &config);
    assert!(!once.report.is_clean());

    let twice = reconcile(&structure, &once.config);
    assert_eq!(twice.config, once.config);
    assert!(twice.report.is_clean());
}

#[test]
fn test_shrinking_to_one_column_prunes_only_removed_columns() {
    let wide = Structure::new(300.0, 200.0);
    let mut config = WardrobeConfig::default();
    for column in ["A1", "B1", "C1"] {
        config.element_configs.insert(id(column), ElementConfig::new(1));
        config
            .compartment_extras
            .insert(id(column), CompartmentExtras::default());
        config
            .door_selections
            .insert(key(&format!("{column}.0.0")), DoorType::DrawerStyle);
    }
    config
        .door_groups
        .push(DoorGroup::new("a", DoorType::DrawerStyle, [key("A1")]));
    config
        .door_groups
        .push(DoorGroup::new("ab", DoorType::DrawerStyle, [key("A1"), key("B1")]));

    assert!(reconcile(&wide, &config).report.is_clean());

    let narrow = Structure::new(100.0, 200.0);
    let result = reconcile(&narrow, &config).config;

    assert_eq!(result.element_configs.keys().copied().collect::<Vec<_>>(), vec![id("A1")]);
    assert_eq!(result.compartment_extras.len(), 1);
    assert_eq!(result.door_selections.len(), 1);
    assert!(result.door_selections.contains_key(&key("A1.0.0")));
    assert_eq!(result.door_groups.len(), 1);
    assert_eq!(result.door_groups[0].id, "a");
}

#[test]
fn test_drawer_clamp_is_monotonic() {
    for height_cm in [30.0, 45.0, 80.0, 150.0, 200.0] {
        let structure = Structure::new(100.0, height_cm);
        let limit = (compartment_heights(&structure)[&id("A1")].height_cm / 10.0).floor() as u32;

        for configured in [0, 1, 3, 7, 20] {
            let mut config = WardrobeConfig::default();
            config.element_configs.insert(
                id("A1"),
                ElementConfig::new(1)
                    .with_drawer_counts(vec![configured])
                    .with_drawers_external(vec![true]),
            );

            let entry = &reconcile(&structure, &config).config.element_configs[&id("A1")];
            let clamped = entry.drawer_counts.as_ref().unwrap()[0];
            assert!(clamped <= configured);
            assert!(clamped <= limit);
            if clamped == 0 && configured > 0 {
                assert_eq!(entry.drawers_external, None);
            }
        }
    }
}

#[test]
fn test_module_split_follows_column_height() {
    // Wardrobe is 240 cm but column B is cut down to 190 cm
    let structure = Structure::new(210.0, 240.0)
        .with_seams([0.0])
        .with_column(0, ColumnStructure::default().with_module_boundary(2.0))
        .with_column(
            1,
            ColumnStructure::default()
                .with_height(1.9)
                .with_module_boundary(1.5),
        );
    assert_eq!(ids(&structure), vec!["A1", "A2", "B1"]);

    // And a 180 cm wardrobe with one 220 cm column
    let structure = Structure::new(210.0, 180.0)
        .with_seams([0.0])
        .with_column(
            1,
            ColumnStructure::default()
                .with_height(2.2)
                .with_module_boundary(2.0),
        );
    assert_eq!(ids(&structure), vec!["A1", "B1", "B2"]);
}

// ============================================================================
// Cut-list generation
// ============================================================================

#[test]
fn test_standard_cut_list_counts() {
    let cut_list = generate_cut_list(&standard_wardrobe(), &standard_config(), &test_catalog());

    assert_eq!(cut_list.items_in(MaterialCategory::Korpus).len(), 18);
    assert_eq!(cut_list.items_in(MaterialCategory::Front).len(), 5);
    assert_eq!(cut_list.items_in(MaterialCategory::Back).len(), 4);
    assert_eq!(cut_list.handle_count(), 3);
    assert!((cut_list.total_area - 20.500_665).abs() < 1e-6);
    assert_eq!(cut_list.price_per_m2, 40.0);
}

#[test]
fn test_emission_order_and_codes() {
    let cut_list = generate_cut_list(&standard_wardrobe(), &standard_config(), &test_catalog());

    let first = &cut_list.items[0];
    assert_eq!(first.code, "K1");
    assert_eq!(first.element, "Sides");
    assert_eq!(cut_list.items[1].description, "Right side");
    assert_eq!(cut_list.items[2].element, "Seam A|B");

    let last = cut_list.items.last().unwrap();
    assert_eq!(last.category, MaterialCategory::Back);
    assert_eq!(last.code, "B4");
    assert_eq!(last.element, "Back B");

    let fronts: Vec<&str> = cut_list
        .items_in(MaterialCategory::Front)
        .iter()
        .map(|p| p.code.as_str())
        .collect();
    assert_eq!(fronts, vec!["F1", "F2", "F3", "F4", "F5"]);

    let codes: Vec<&str> = cut_list.hardware.iter().map(|h| h.code.as_str()).collect();
    assert_eq!(codes, vec!["H1", "H2"]);

    let groups: Vec<&str> = cut_list
        .grouped_by_element
        .iter()
        .map(|g| g.element.as_str())
        .collect();
    assert_eq!(
        groups,
        vec![
            "Sides", "Seam A|B", "Column A", "Column B", "A1", "A2", "B1", "Back A", "Back B"
        ]
    );
}

#[test]
fn test_compartment_structure_panels() {
    let cut_list = generate_cut_list(&standard_wardrobe(), &standard_config(), &test_catalog());
    let a1 = cut_list.items_for("A1");

    let descriptions: Vec<&str> = a1.iter().map(|p| p.description.as_str()).collect();
    assert_eq!(
        descriptions,
        vec![
            "Inner divider",
            "Inner shelf (section 1)",
            "Drawer front",
            "Drawer front",
            "Shelf above drawers (section 2)",
        ]
    );

    // Divider stands like a side: carcass depth by clear height, 88.2 cm
    // less half the shelf above
    assert!((a1[0].width_cm - cut_list.items[0].width_cm).abs() < 1e-9);
    assert!((a1[0].height_cm - 87.3).abs() < 1e-9);
    // Sections share 101.4 cm minus one divider
    assert!((a1[1].width_cm - 49.8).abs() < 1e-9);
    assert!((a1[2].height_cm - 10.0).abs() < 1e-9);
    assert_eq!(a1[2].material_id, "white");
}

#[test]
fn test_doors_and_handles() {
    let cut_list = generate_cut_list(&standard_wardrobe(), &standard_config(), &test_catalog());

    let a2 = cut_list.items_for("A2");
    assert_eq!(a2.len(), 2);
    for leaf in &a2 {
        assert!((leaf.width_cm - 50.55).abs() < 1e-9);
        assert!((leaf.height_cm - 98.2).abs() < 1e-9);
    }

    let b1 = cut_list.items_for("B1");
    assert_eq!(b1.len(), 1);
    assert!((b1[0].width_cm - 101.3).abs() < 1e-9);
    assert!((b1[0].height_cm - 186.4).abs() < 1e-9);

    assert_eq!(cut_list.hardware[0].quantity, 2);
    assert_eq!(cut_list.hardware[0].element, "A2");
    assert_eq!(cut_list.hardware[0].description, "Bar (Chrome)");
    assert_eq!(cut_list.hardware[1].quantity, 1);
    assert_eq!(cut_list.hardware[1].total, 6.5);
}

#[test]
fn test_door_group_spanning_compartments_renders_once() {
    let structure =
        Structure::new(100.0, 200.0).with_column(0, ColumnStructure::default().with_shelves([1.0]));
    let wardrobe = Wardrobe::new(structure, 60.0, "oak").with_front_material("white");

    let mut config = WardrobeConfig::default();
    config.door_groups.push(DoorGroup::new(
        "full",
        "right".parse().unwrap(),
        [key("A1"), key("A2")],
    ));

    let cut_list = generate_cut_list(&wardrobe, &config, &test_catalog());
    let fronts = cut_list.items_in(MaterialCategory::Front);
    assert_eq!(fronts.len(), 1);
    assert_eq!(fronts[0].element, "A1");

    // A1 spans 1.8 to 100 cm, A2 100 to 198.2 cm
    assert!((fronts[0].height_cm - 196.4).abs() < 1e-9);
    // No handle configured: counted, priced at zero
    assert_eq!(cut_list.handle_count(), 1);
    assert_eq!(cut_list.hardware[0].total, 0.0);
}

#[test]
fn test_drawer_style_has_no_handle() {
    let mut config = WardrobeConfig::default();
    config
        .door_selections
        .insert(key("A1"), DoorType::DrawerStyle);

    let wardrobe = simple_wardrobe(80.0, 200.0).with_handle("bar", "chrome");
    let cut_list = generate_cut_list(&wardrobe, &config, &test_catalog());

    assert_eq!(cut_list.items_in(MaterialCategory::Front).len(), 1);
    assert!(cut_list.hardware.is_empty());
}

#[test]
fn test_per_door_overrides() {
    let mut wardrobe = simple_wardrobe(80.0, 200.0).with_handle("bar", "chrome");
    let mut group = DoorGroup::new("d", "leftMirror".parse().unwrap(), [key("A1")]);
    group.material_id = Some("walnut".to_string());
    group.handle_id = Some("bar-v1".to_string());
    group.handle_finish = Some("blk".to_string());

    let mut config = WardrobeConfig::default();
    config.door_groups.push(group);

    // Global mode ignores the group's choices
    let cut_list = generate_cut_list(&wardrobe, &config, &test_catalog());
    assert_eq!(cut_list.items_in(MaterialCategory::Front)[0].material_id, "white");
    assert_eq!(cut_list.hardware[0].unit_price, 6.5);

    wardrobe.door_settings_mode = DoorSettingsMode::PerDoor;
    let cut_list = generate_cut_list(&wardrobe, &config, &test_catalog());
    let door = cut_list.items_in(MaterialCategory::Front)[0];
    assert_eq!(door.material_id, "walnut");
    assert_eq!(door.thickness_mm, 19.0);
    assert_eq!(cut_list.hardware[0].unit_price, 9.0);
}

#[test]
fn test_sub_compartment_door_uses_section_width() {
    let mut config = WardrobeConfig::default();
    config.element_configs.insert(id("A1"), ElementConfig::new(2));
    config.door_groups.push(DoorGroup::new(
        "half",
        "left".parse().unwrap(),
        [key("A1.1.0")],
    ));

    let cut_list = generate_cut_list(&simple_wardrobe(103.6, 200.0), &config, &test_catalog());
    let door = cut_list.items_in(MaterialCategory::Front)[0];

    // Inner width 100 cm, two sections of 49.1 cm, minus 0.1 cm clearance
    assert!((door.width_cm - 49.0).abs() < 1e-9);
}

#[test]
fn test_extras_divider_and_drawers() {
    let mut config = WardrobeConfig::default();
    config.compartment_extras.insert(
        id("A1"),
        CompartmentExtras {
            vertical_divider: Some(true),
            drawers: Some(true),
            drawers_count: Some(3),
            ..Default::default()
        },
    );

    let cut_list = generate_cut_list(&simple_wardrobe(80.0, 200.0), &config, &test_catalog());
    let a1: Vec<&str> = cut_list
        .items_for("A1")
        .iter()
        .map(|p| p.description.as_str())
        .collect();

    assert_eq!(
        a1,
        vec![
            "Vertical divider",
            "Drawer front",
            "Drawer front",
            "Drawer front",
            "Shelf above drawers (section 1)",
        ]
    );
}

#[test]
fn test_drawers_capped_by_space() {
    let mut config = WardrobeConfig::default();
    config
        .element_configs
        .insert(id("A1"), ElementConfig::new(1).with_drawer_counts(vec![9]));

    // 50 cm on a 20 cm base leaves 26.4 cm: two drawers and a shelf above
    let wardrobe = Wardrobe::new(Structure::new(80.0, 50.0).with_base(20.0), 60.0, "oak");
    let cut_list = generate_cut_list(&wardrobe, &config, &test_catalog());

    let a1 = cut_list.items_for("A1");
    assert_eq!(a1.len(), 3);
    assert_eq!(a1[2].description, "Shelf above drawers (section 1)");
    assert_eq!(cut_list.items_in(MaterialCategory::Front).len(), 2);
}

#[test]
fn test_drawers_below_inner_shelf_fill_compartment() {
    let mut config = WardrobeConfig::default();
    config.element_configs.insert(
        id("A1"),
        ElementConfig::new(1)
            .with_row_counts(vec![1])
            .with_drawer_counts(vec![5]),
    );

    // 60 cm column: 56.4 cm clear holds five drawers with 2.4 cm to spare
    let cut_list = generate_cut_list(&simple_wardrobe(80.0, 60.0), &config, &test_catalog());
    let a1: Vec<&str> = cut_list
        .items_for("A1")
        .iter()
        .map(|p| p.description.as_str())
        .collect();

    assert_eq!(
        a1,
        vec![
            "Inner shelf (section 1)",
            "Drawer front",
            "Drawer front",
            "Drawer front",
            "Drawer front",
            "Drawer front",
            "Shelf above drawers (section 1)",
        ]
    );
}

#[test]
fn test_legacy_selection_renders_one_door_per_compartment() {
    let mut config = WardrobeConfig::default();
    config.element_configs.insert(id("A1"), ElementConfig::new(2));
    config
        .door_selections
        .insert(key("A1.1.0"), "right".parse().unwrap());
    config
        .door_selections
        .insert(key("A1.0.0"), "left".parse().unwrap());

    let wardrobe = simple_wardrobe(103.6, 200.0);
    let cut_list = generate_cut_list(&wardrobe, &config, &test_catalog());
    let fronts = cut_list.items_in(MaterialCategory::Front);

    assert_eq!(fronts.len(), 1);
    assert_eq!(fronts[0].description, "Door A1.0.0: Left door");
    assert!((fronts[0].width_cm - 49.0).abs() < 1e-9);
    assert_eq!(cut_list.handle_count(), 1);

    // A whole-compartment selection wins over its sub-keys
    config
        .door_selections
        .insert(key("A1"), DoorType::Double { mirror: false });
    let cut_list = generate_cut_list(&wardrobe, &config, &test_catalog());
    let fronts = cut_list.items_in(MaterialCategory::Front);
    assert_eq!(fronts.len(), 2);
    assert!(fronts[0].description.starts_with("Door A1:"));
}

#[test]
fn test_top_module_shelves() {
    let column = ColumnStructure::default()
        .with_shelves([1.0])
        .with_module_boundary(2.0)
        .with_top_shelves([2.3, 2.15]);
    let wardrobe = Wardrobe::new(
        Structure::new(100.0, 240.0).with_column(0, column),
        60.0,
        "oak",
    );

    let cut_list = generate_cut_list(&wardrobe, &WardrobeConfig::default(), &test_catalog());
    let boards = cut_list.items_for("Column A");
    let descriptions: Vec<&str> = boards.iter().map(|p| p.description.as_str()).collect();

    assert_eq!(
        descriptions,
        vec![
            "Bottom board",
            "Top board",
            "Module boundary board (lower)",
            "Module boundary board (upper)",
            "Shelf",
            "Top module shelf",
            "Top module shelf",
        ]
    );
    for board in &boards {
        assert!((board.width_cm - 96.4).abs() < 1e-9);
    }
    assert_eq!(ids(&wardrobe.structure), vec!["A1", "A2", "A3", "A4", "A5"]);
}

#[test]
fn test_non_finite_module_boundary_in_cut_list() {
    let mut column = ColumnStructure::default();
    column.module_boundary = Some(FloorY(f64::NAN));
    let wardrobe = Wardrobe::new(
        Structure::new(100.0, 240.0).with_column(0, column),
        60.0,
        "oak",
    )
    .with_front_material("white")
    .with_back_material("hdf");

    let mut config = WardrobeConfig::default();
    config
        .element_configs
        .insert(id("A1"), ElementConfig::new(1).with_drawer_counts(vec![3]));
    config.door_selections.insert(key("A1"), "left".parse().unwrap());

    let cut_list = generate_cut_list(&wardrobe, &config, &test_catalog());

    assert!(!cut_list.is_empty());
    assert!(cut_list.items.iter().all(|p| p.area_m2.is_finite()));
    assert!(cut_list.total_cost.is_finite());
    assert!(cut_list.items_in(MaterialCategory::Front).is_empty());
    assert!(cut_list.hardware.is_empty());

    // Back splits at the default boundary of a 240 cm column: 2.0 m
    let backs = cut_list.items_in(MaterialCategory::Back);
    assert_eq!(backs.len(), 2);
    assert!((backs[0].height_cm - 199.8).abs() < 1e-9);
    assert!((backs[1].height_cm - 39.8).abs() < 1e-9);
}

#[test]
fn test_uncomputable_inputs_give_empty_cut_list() {
    let config = standard_config();

    let empty = generate_cut_list(&standard_wardrobe(), &config, &Catalog::default());
    assert!(empty.is_empty());
    assert_eq!(empty.total_cost, 0.0);

    let mut unknown = standard_wardrobe();
    unknown.material_id = "pine".to_string();
    assert!(generate_cut_list(&unknown, &config, &test_catalog()).is_empty());

    let mut nan = standard_wardrobe();
    nan.structure.width_cm = f64::NAN;
    assert!(generate_cut_list(&nan, &config, &test_catalog()).is_empty());

    let mut flat = standard_wardrobe();
    flat.depth_cm = 0.0;
    assert!(generate_cut_list(&flat, &config, &test_catalog()).is_empty());
}

#[test]
fn test_short_column_back_panel_is_not_split() {
    let cut_list = generate_cut_list(&simple_wardrobe(100.0, 200.0), &WardrobeConfig::default(), &test_catalog());
    let backs = cut_list.items_in(MaterialCategory::Back);

    assert_eq!(backs.len(), 1);
    assert!((backs[0].width_cm - 99.8).abs() < 1e-9);
    assert!((backs[0].height_cm - 199.8).abs() < 1e-9);
    assert_eq!(backs[0].thickness_mm, 3.0);
}

#[test]
fn test_tall_column_without_boundary_splits_back_only() {
    let cut_list = generate_cut_list(&simple_wardrobe(100.0, 205.0), &WardrobeConfig::default(), &test_catalog());

    // No stored boundary: one compartment, but the back splits at 1.95 m
    assert_eq!(cut_list.items_for("Column A").len(), 4);
    let backs = cut_list.items_in(MaterialCategory::Back);
    assert_eq!(backs.len(), 2);
    assert!((backs[0].height_cm - 194.8).abs() < 1e-9);
    assert!((backs[1].height_cm - 9.8).abs() < 1e-9);
}
