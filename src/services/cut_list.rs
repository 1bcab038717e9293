//! Cut-list generator.
//!
//! Walks the enumerated geometry plus the per-compartment configuration and
//! emits every physical panel with its material, area, and cost. Panels are
//! appended in a fixed order because display code groups them by element:
//!
//! 1. Outer sides
//! 2. Seam panels (two per interior boundary)
//! 3. Bottom, top, base-front, and module-boundary boards per column
//! 4. Main shelves per column (bottom module, then top module)
//! 5. Per compartment: inner dividers, inner shelves, divider extra,
//!    drawers with the derived shelf above them, doors
//! 6. Back panels
//!
//! Geometry is in meters internally; panel sizes are reported in centimeters
//! and thickness in millimeters.

use std::ptr;
use tracing::debug;

use crate::constants::{
    BACK_PANEL_CLEARANCE, DEFAULT_BACK_THICKNESS_MM, DEFAULT_FRONT_THICKNESS_MM, DOOR_CLEARANCE,
    DOUBLE_DOOR_CLEARANCE, DRAWER_GAP, DRAWER_HEIGHT, GEOMETRY_EPSILON, MODULE_SPLIT_THRESHOLD,
    PANEL_THICKNESS,
};
use crate::models::{
    Catalog, CategoryTotal, CompartmentExtras, CompartmentId, CompartmentKey, CutList, DoorGroup,
    DoorSettingsMode, DoorType, ElementConfig, ElementGroup, HardwareItem, MaterialCategory, Panel,
    PriceBreakdown, Wardrobe, WardrobeConfig,
};
use crate::services::compartments::{enumerate_columns, ColumnLayout, CompartmentLayout};
use crate::services::partition::default_module_boundary;

/// Material as priced on a panel.
#[derive(Debug, Clone, PartialEq)]
struct PricedMaterial {
    id: String,
    price: f64,
    thickness_mm: f64,
}

impl PricedMaterial {
    fn resolve(catalog: &Catalog, id: &str, fallback_thickness_mm: f64) -> Self {
        catalog.material(id).map_or_else(
            || Self {
                id: id.to_string(),
                price: 0.0,
                thickness_mm: fallback_thickness_mm,
            },
            |m| Self {
                id: m.id.clone(),
                price: m.price,
                thickness_mm: m.thickness,
            },
        )
    }
}

/// Inputs resolved once per pass.
struct PricingContext<'a> {
    wardrobe: &'a Wardrobe,
    catalog: &'a Catalog,
    carcass: PricedMaterial,
    front: PricedMaterial,
    back: PricedMaterial,
    /// Depth of carcass panels: outer depth minus back panel thickness
    carcass_depth: f64,
}

impl<'a> PricingContext<'a> {
    /// Resolves materials, or `None` when the wardrobe cannot be priced yet.
    fn resolve(wardrobe: &'a Wardrobe, catalog: &'a Catalog) -> Option<Self> {
        if catalog.materials.is_empty() {
            debug!("Cut list skipped: material catalog is empty");
            return None;
        }

        let dims = [
            wardrobe.structure.width_cm,
            wardrobe.structure.height_cm,
            wardrobe.depth_cm,
        ];
        if dims.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            debug!("Cut list skipped: invalid dimensions {dims:?}");
            return None;
        }

        let Some(carcass) = catalog.material(&wardrobe.material_id) else {
            debug!(
                "Cut list skipped: carcass material '{}' not in catalog",
                wardrobe.material_id
            );
            return None;
        };
        let carcass = PricedMaterial {
            id: carcass.id.clone(),
            price: carcass.price,
            thickness_mm: carcass.thickness,
        };

        let front = wardrobe
            .front_material_id
            .as_deref()
            .map_or_else(
                || carcass.clone(),
                |id| PricedMaterial::resolve(catalog, id, DEFAULT_FRONT_THICKNESS_MM),
            );

        let back = wardrobe.back_material_id.as_deref().map_or_else(
            || PricedMaterial {
                id: String::new(),
                price: 0.0,
                thickness_mm: DEFAULT_BACK_THICKNESS_MM,
            },
            |id| PricedMaterial::resolve(catalog, id, DEFAULT_BACK_THICKNESS_MM),
        );

        let carcass_depth = wardrobe.depth_m() - back.thickness_mm / 1000.0;

        Some(Self {
            wardrobe,
            catalog,
            carcass,
            front,
            back,
            carcass_depth,
        })
    }

    /// Front material for a door group, honoring per-door overrides.
    fn door_material(&self, group: Option<&DoorGroup>) -> PricedMaterial {
        if self.wardrobe.door_settings_mode == DoorSettingsMode::PerDoor {
            if let Some(material) = group
                .and_then(|g| g.material_id.as_deref())
                .and_then(|id| self.catalog.material(id))
            {
                return PricedMaterial {
                    id: material.id.clone(),
                    price: material.price,
                    thickness_mm: material.thickness,
                };
            }
        }
        self.front.clone()
    }

    /// Handle id and finish for a door group, honoring per-door overrides.
    fn door_handle<'g>(
        &'g self,
        group: Option<&'g DoorGroup>,
    ) -> (Option<&'g str>, Option<&'g str>) {
        match group {
            Some(group)
                if self.wardrobe.door_settings_mode == DoorSettingsMode::PerDoor
                    && group.handle_id.is_some() =>
            {
                (group.handle_id.as_deref(), group.handle_finish.as_deref())
            }
            _ => (
                self.wardrobe.handle_id.as_deref(),
                self.wardrobe.handle_finish.as_deref(),
            ),
        }
    }
}

/// Accumulates panels and hardware in emission order.
struct CutListBuilder<'a> {
    ctx: PricingContext<'a>,
    items: Vec<Panel>,
    hardware: Vec<HardwareItem>,
    counters: [u32; 4],
}

impl<'a> CutListBuilder<'a> {
    fn new(ctx: PricingContext<'a>) -> Self {
        Self {
            ctx,
            items: Vec::new(),
            hardware: Vec::new(),
            counters: [0; 4],
        }
    }

    fn next_code(&mut self, category: MaterialCategory) -> String {
        let slot = match category {
            MaterialCategory::Korpus => 0,
            MaterialCategory::Front => 1,
            MaterialCategory::Back => 2,
            MaterialCategory::Handles => 3,
        };
        self.counters[slot] += 1;
        format!("{}{}", category.code_prefix(), self.counters[slot])
    }

    fn push_panel(
        &mut self,
        category: MaterialCategory,
        material: &PricedMaterial,
        element: impl Into<String>,
        description: impl Into<String>,
        width: f64,
        height: f64,
    ) {
        let area = width * height;
        let code = self.next_code(category);
        self.items.push(Panel {
            code,
            description: description.into(),
            element: element.into(),
            width_cm: width * 100.0,
            height_cm: height * 100.0,
            thickness_mm: material.thickness_mm,
            area_m2: area,
            cost: area * material.price,
            category,
            material_id: material.id.clone(),
        });
    }

    fn push_carcass(
        &mut self,
        element: impl Into<String>,
        description: impl Into<String>,
        width: f64,
        height: f64,
    ) {
        let material = self.ctx.carcass.clone();
        self.push_panel(
            MaterialCategory::Korpus,
            &material,
            element,
            description,
            width,
            height,
        );
    }

    fn push_handles(&mut self, element: &str, count: u32, group: Option<&DoorGroup>) {
        if count == 0 {
            return;
        }

        let (handle_id, finish_id) = self.ctx.door_handle(group);
        let unit_price = self.ctx.catalog.handle_price(handle_id, finish_id);
        let description = match (handle_id, finish_id) {
            (Some(h), Some(f)) => self
                .ctx
                .catalog
                .handle_name(h, f)
                .unwrap_or_else(|| format!("Handle {h}/{f}")),
            _ => "Handle".to_string(),
        };

        let code = self.next_code(MaterialCategory::Handles);
        self.hardware.push(HardwareItem {
            code,
            description,
            element: element.to_string(),
            quantity: count,
            unit_price,
            total: unit_price * f64::from(count),
        });
    }

    // Step 1
    fn outer_sides(&mut self, columns: &[ColumnLayout]) {
        let (Some(first), Some(last)) = (columns.first(), columns.last()) else {
            return;
        };
        let depth = self.ctx.carcass_depth;
        self.push_carcass("Sides", "Left side", depth, first.height);
        self.push_carcass("Sides", "Right side", depth, last.height);
    }

    // Step 2
    fn seams(&mut self, columns: &[ColumnLayout]) {
        let depth = self.ctx.carcass_depth;
        for pair in columns.windows(2) {
            let (left, right) = (&pair[0], &pair[1]);
            let element = format!("Seam {}|{}", left.column, right.column);
            self.push_carcass(
                element.clone(),
                format!("Seam panel (column {} face)", left.column),
                depth,
                left.height,
            );
            self.push_carcass(
                element,
                format!("Seam panel (column {} face)", right.column),
                depth,
                right.height,
            );
        }
    }

    // Step 3
    fn boards(&mut self, columns: &[ColumnLayout]) {
        let depth = self.ctx.carcass_depth;
        let base = self.ctx.wardrobe.structure.base_height_m();

        for column in columns {
            let element = format!("Column {}", column.column);
            let width = column.inner_width();

            self.push_carcass(element.clone(), "Bottom board", width, depth);
            self.push_carcass(element.clone(), "Top board", width, depth);

            if base > 0.0 {
                self.push_carcass(element.clone(), "Base front", width, base);
            }

            if column.height > MODULE_SPLIT_THRESHOLD {
                self.push_carcass(element.clone(), "Module boundary board (lower)", width, depth);
                self.push_carcass(element, "Module boundary board (upper)", width, depth);
            }
        }
    }

    // Step 4
    fn main_shelves(&mut self, columns: &[ColumnLayout]) {
        let depth = self.ctx.carcass_depth;

        for column in columns {
            let element = format!("Column {}", column.column);
            let width = column.inner_width();

            for (module_index, module) in column.modules.iter().enumerate() {
                let description = if module_index == 0 {
                    "Shelf"
                } else {
                    "Top module shelf"
                };
                for _ in &module.shelves {
                    self.push_carcass(element.clone(), description, width, depth);
                }
            }
        }
    }

    // Step 5
    fn compartments(&mut self, columns: &[ColumnLayout], config: &WardrobeConfig) {
        let mut rendered_groups: Vec<&DoorGroup> = Vec::new();

        for column in columns {
            for compartment in &column.compartments {
                if !compartment.height_m().is_finite() {
                    debug!("{}: non-finite height, no inner panels", compartment.id);
                    continue;
                }
                let element_config = config.element_configs.get(&compartment.id);
                let extras = config.compartment_extras.get(&compartment.id);
                let sections = Sections::new(column, element_config);

                self.inner_dividers(compartment, &sections);
                self.inner_shelves(compartment, &sections, element_config);
                self.divider_extra(compartment, &sections, extras);
                let stacks = self.drawers(compartment, &sections, element_config, extras);
                self.shelves_above_drawers(compartment, &sections, &stacks);
                self.doors(columns, compartment, config, &mut rendered_groups);
            }
        }
    }

    // Step 5a
    fn inner_dividers(&mut self, compartment: &CompartmentLayout, sections: &Sections) {
        let depth = self.ctx.carcass_depth;
        for _ in 1..sections.count {
            self.push_carcass(
                compartment.id.to_string(),
                "Inner divider",
                depth,
                compartment.clear_height_m(),
            );
        }
    }

    // Step 5b
    fn inner_shelves(
        &mut self,
        compartment: &CompartmentLayout,
        sections: &Sections,
        element_config: Option<&ElementConfig>,
    ) {
        let Some(element_config) = element_config else {
            return;
        };
        let depth = self.ctx.carcass_depth;

        for section in 0..sections.count {
            for _ in 0..element_config.row_count(section as usize) {
                self.push_carcass(
                    compartment.id.to_string(),
                    format!("Inner shelf (section {})", section + 1),
                    sections.width,
                    depth,
                );
            }
        }
    }

    // Step 5c
    fn divider_extra(
        &mut self,
        compartment: &CompartmentLayout,
        sections: &Sections,
        extras: Option<&CompartmentExtras>,
    ) {
        if sections.count != 1 || !extras.is_some_and(CompartmentExtras::has_vertical_divider) {
            return;
        }
        self.push_carcass(
            compartment.id.to_string(),
            "Vertical divider",
            self.ctx.carcass_depth,
            compartment.clear_height_m(),
        );
    }

    // Step 5d
    fn drawers(
        &mut self,
        compartment: &CompartmentLayout,
        sections: &Sections,
        element_config: Option<&ElementConfig>,
        extras: Option<&CompartmentExtras>,
    ) -> Vec<DrawerStack> {
        let clear = compartment.clear_height_m();
        let mut stacks = Vec::new();

        for section in 0..sections.count {
            let index = section as usize;
            let configured = match element_config {
                Some(c) if c.drawer_counts.is_some() => c.drawer_count(index),
                _ if sections.count == 1 => {
                    extras.map_or(0, CompartmentExtras::requested_drawers)
                }
                _ => 0,
            };
            if configured == 0 {
                continue;
            }

            let stack = DrawerStack::fit(section, configured, clear);
            if stack.count < configured {
                debug!(
                    "{}: section {} drawer count capped from {} to {}",
                    compartment.id,
                    section + 1,
                    configured,
                    stack.count
                );
            }

            let external = element_config.is_some_and(|c| c.is_drawer_external(index));
            let description = if external {
                "External drawer front"
            } else {
                "Drawer front"
            };
            let front = self.ctx.front.clone();
            for _ in 0..stack.count {
                self.push_panel(
                    MaterialCategory::Front,
                    &front,
                    compartment.id.to_string(),
                    description,
                    sections.width,
                    DRAWER_HEIGHT,
                );
            }

            stacks.push(stack);
        }

        stacks
    }

    /// Derived shelves closing drawer stacks that leave room above them.
    fn shelves_above_drawers(
        &mut self,
        compartment: &CompartmentLayout,
        sections: &Sections,
        stacks: &[DrawerStack],
    ) {
        for stack in stacks.iter().filter(|s| s.needs_shelf_above()) {
            self.push_carcass(
                compartment.id.to_string(),
                format!("Shelf above drawers (section {})", stack.section + 1),
                sections.width,
                self.ctx.carcass_depth,
            );
        }
    }

    // Step 5e
    fn doors<'c>(
        &mut self,
        columns: &[ColumnLayout],
        compartment: &CompartmentLayout,
        config: &'c WardrobeConfig,
        rendered_groups: &mut Vec<&'c DoorGroup>,
    ) {
        let groups = config.door_groups_for(compartment.id);
        if !groups.is_empty() {
            // A group spanning several compartments renders at its first one
            for group in groups {
                if !rendered_groups.iter().any(|seen| ptr::eq(*seen, group)) {
                    rendered_groups.push(group);
                    self.door_group(columns, compartment, config, group);
                }
            }
            return;
        }

        // One legacy door per compartment: the plain key sorts before sub-keys
        if let Some((key, door)) = config
            .door_selections
            .iter()
            .find(|(key, _)| key.base() == compartment.id)
        {
            let Some(column) = column_of(columns, compartment.id) else {
                return;
            };
            let width = door_width(column, *key, config.element_configs.get(&compartment.id));
            self.door_leaves(
                &compartment.id.to_string(),
                &format!("Door {key}"),
                *door,
                width,
                compartment.height_m(),
                None,
            );
        }
    }

    fn door_group(
        &mut self,
        columns: &[ColumnLayout],
        compartment: &CompartmentLayout,
        config: &WardrobeConfig,
        group: &DoorGroup,
    ) {
        // Sub-compartments of one base compartment count its height once
        let height: f64 = group
            .base_compartments()
            .into_iter()
            .filter_map(|id| column_of(columns, id).and_then(|c| c.compartment(id)))
            .map(CompartmentLayout::height_m)
            .sum();

        let Some(first_key) = group.keys().first().copied() else {
            return;
        };
        let Some(column) = column_of(columns, first_key.base()) else {
            return;
        };
        let width = door_width(
            column,
            first_key,
            config.element_configs.get(&first_key.base()),
        );

        self.door_leaves(
            &compartment.id.to_string(),
            &format!("Door group {}", group.id),
            group.door_type,
            width,
            height,
            Some(group),
        );
    }

    fn door_leaves(
        &mut self,
        element: &str,
        label: &str,
        door: DoorType,
        width: f64,
        height: f64,
        group: Option<&DoorGroup>,
    ) {
        let leaves = door.leaf_count();
        if leaves == 0 || !height.is_finite() {
            return;
        }
        let material = self.ctx.door_material(group);
        let name = door.display_name();

        // Paired leaves share the opening minus the centre gap
        let leaf_width = if leaves > 1 {
            (width - DOUBLE_DOOR_CLEARANCE) / f64::from(leaves)
        } else {
            width - DOOR_CLEARANCE
        };

        for leaf in 0..leaves {
            let description = match (leaves, leaf) {
                (1, _) => format!("{label}: {name}"),
                (_, 0) => format!("{label}: {name}, left leaf"),
                _ => format!("{label}: {name}, right leaf"),
            };
            self.push_panel(
                MaterialCategory::Front,
                &material,
                element,
                description,
                leaf_width,
                height,
            );
        }

        self.push_handles(element, door.handle_count(), group);
    }

    // Step 6
    fn back_panels(&mut self, columns: &[ColumnLayout]) {
        let back = self.ctx.back.clone();

        for column in columns {
            let element = format!("Back {}", column.column);
            let width = column.block.width - BACK_PANEL_CLEARANCE;

            let split = if column.height > MODULE_SPLIT_THRESHOLD {
                column
                    .module_boundary
                    .filter(|b| b.is_finite())
                    .or_else(|| default_module_boundary(column.height))
            } else {
                None
            };

            match split {
                Some(boundary) => {
                    let lower = boundary.meters();
                    self.push_panel(
                        MaterialCategory::Back,
                        &back,
                        element.clone(),
                        "Back panel (bottom module)",
                        width,
                        lower - BACK_PANEL_CLEARANCE,
                    );
                    self.push_panel(
                        MaterialCategory::Back,
                        &back,
                        element,
                        "Back panel (top module)",
                        width,
                        column.height - lower - BACK_PANEL_CLEARANCE,
                    );
                }
                None => {
                    self.push_panel(
                        MaterialCategory::Back,
                        &back,
                        element,
                        "Back panel",
                        width,
                        column.height - BACK_PANEL_CLEARANCE,
                    );
                }
            }
        }
    }

    fn finish(self) -> CutList {
        let mut breakdown = PriceBreakdown::default();
        let mut total_area = 0.0;
        let mut material_cost = 0.0;

        for item in &self.items {
            total_area += item.area_m2;
            material_cost += item.cost;
            let slot = match item.category {
                MaterialCategory::Korpus => &mut breakdown.korpus,
                MaterialCategory::Front => &mut breakdown.front,
                MaterialCategory::Back => &mut breakdown.back,
                MaterialCategory::Handles => &mut breakdown.handles,
            };
            slot.area += item.area_m2;
            slot.price += item.cost;
        }

        let handle_cost: f64 = self.hardware.iter().map(|h| h.total).sum();
        breakdown.handles.price += handle_cost;

        for total in [
            &mut breakdown.korpus,
            &mut breakdown.front,
            &mut breakdown.back,
            &mut breakdown.handles,
        ] {
            *total = CategoryTotal {
                area: total.area,
                price: total.price.round(),
            };
        }

        let grouped_by_element = group_by_element(&self.items);
        let total_cost = material_cost + handle_cost;

        debug!(
            "Cut list: {} panels, {} handle items, {:.3} m², total {:.2}",
            self.items.len(),
            self.hardware.len(),
            total_area,
            total_cost
        );

        CutList {
            items: self.items,
            grouped_by_element,
            hardware: self.hardware,
            total_area,
            total_cost,
            price_per_m2: self.ctx.carcass.price,
            price_breakdown: breakdown,
        }
    }
}

/// Inner sections of one compartment.
struct Sections {
    count: u32,
    width: f64,
}

impl Sections {
    fn new(column: &ColumnLayout, element_config: Option<&ElementConfig>) -> Self {
        let count = element_config.map_or(1, |c| c.columns.max(1));
        Self {
            count,
            width: section_width(column.inner_width(), count),
        }
    }
}

/// Drawers stacked from the bottom of one inner section.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DrawerStack {
    section: u32,
    count: u32,
    /// Clear height of the compartment (m)
    clear: f64,
}

impl DrawerStack {
    fn fit(section: u32, configured: u32, clear: f64) -> Self {
        Self {
            section,
            count: configured.min(drawers_that_fit(clear)),
            clear,
        }
    }

    fn needs_shelf_above(&self) -> bool {
        self.count > 0
            && self.clear - drawer_stack_height(self.count) + GEOMETRY_EPSILON >= PANEL_THICKNESS
    }
}

/// Width of one inner section when `count` sections share `inner_width`.
fn section_width(inner_width: f64, count: u32) -> f64 {
    let count = count.max(1);
    (inner_width - f64::from(count - 1) * PANEL_THICKNESS) / f64::from(count)
}

/// Number of drawers that physically fit in `height` meters.
fn drawers_that_fit(height: f64) -> u32 {
    if !height.is_finite() || height <= 0.0 {
        return 0;
    }
    ((height + DRAWER_GAP) / (DRAWER_HEIGHT + DRAWER_GAP) + GEOMETRY_EPSILON).floor() as u32
}

/// Height of `count` stacked drawers including the gaps between them.
fn drawer_stack_height(count: u32) -> f64 {
    if count == 0 {
        return 0.0;
    }
    f64::from(count) * DRAWER_HEIGHT + f64::from(count - 1) * DRAWER_GAP
}

fn column_of(columns: &[ColumnLayout], id: CompartmentId) -> Option<&ColumnLayout> {
    columns.get(id.column.index())
}

/// Door width for a key: the section width for sub-keys, else the column inner width.
fn door_width(
    column: &ColumnLayout,
    key: CompartmentKey,
    element_config: Option<&ElementConfig>,
) -> f64 {
    match (key.section(), element_config) {
        (Some(_), Some(config)) if config.columns > 1 => {
            section_width(column.inner_width(), config.columns)
        }
        _ => column.inner_width(),
    }
}

fn group_by_element(items: &[Panel]) -> Vec<ElementGroup> {
    let mut groups: Vec<ElementGroup> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|g| g.element == item.element) {
            Some(group) => group.items.push(item.clone()),
            None => groups.push(ElementGroup {
                element: item.element.clone(),
                items: vec![item.clone()],
            }),
        }
    }
    groups
}

/// Generates the priced cut list for a wardrobe.
///
/// Returns an empty [`CutList`] when the material catalog is empty, the
/// carcass material is unknown, or any outer dimension is non-finite or not
/// positive. The configuration is assumed to be reconciled against the
/// current geometry; stale keys are skipped, not reported.
#[must_use]
pub fn generate_cut_list(wardrobe: &Wardrobe, config: &WardrobeConfig, catalog: &Catalog) -> CutList {
    let Some(ctx) = PricingContext::resolve(wardrobe, catalog) else {
        return CutList::default();
    };

    let columns = enumerate_columns(&wardrobe.structure);
    let mut builder = CutListBuilder::new(ctx);

    builder.outer_sides(&columns);
    builder.seams(&columns);
    builder.boards(&columns);
    builder.main_shelves(&columns);
    builder.compartments(&columns, config);
    builder.back_panels(&columns);

    builder.finish()
}
