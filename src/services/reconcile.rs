//! State reconciler: prunes and clamps persisted configuration after a
//! structural edit.
//!
//! Callers run this after every resize, re-seam, shelf move, module boundary
//! change, or base toggle, then replace their stored configuration with the
//! returned copy. The input is never mutated.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::constants::MIN_DRAWER_SLOT_CM;
use crate::models::{CompartmentId, CompartmentKey, ElementConfig, Structure, WardrobeConfig};
use crate::services::compartments::{compartment_heights, CompartmentMap};

/// A drawer clamp applied to one compartment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawerClamp {
    /// Compartment whose drawer counts changed
    pub compartment: CompartmentId,
    /// Counts before the clamp
    pub before: Vec<u32>,
    /// Counts after the clamp
    pub after: Vec<u32>,
    /// Whether the external-drawer flags were cleared
    pub cleared_external: bool,
}

/// What a reconciliation pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Element configs whose compartment no longer exists
    pub dropped_element_configs: Vec<CompartmentId>,
    /// Extras whose compartment no longer exists
    pub dropped_extras: Vec<CompartmentId>,
    /// Door groups dropped, by group id
    pub dropped_door_groups: Vec<String>,
    /// Legacy door selections whose compartment no longer exists
    pub dropped_door_selections: Vec<CompartmentKey>,
    /// Drawer counts reduced to fit the new geometry
    pub clamped_drawers: Vec<DrawerClamp>,
}

impl ReconcileReport {
    /// True when the pass changed nothing.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.dropped_element_configs.is_empty()
            && self.dropped_extras.is_empty()
            && self.dropped_door_groups.is_empty()
            && self.dropped_door_selections.is_empty()
            && self.clamped_drawers.is_empty()
    }

    /// Number of individual changes.
    #[must_use]
    pub fn change_count(&self) -> usize {
        self.dropped_element_configs.len()
            + self.dropped_extras.len()
            + self.dropped_door_groups.len()
            + self.dropped_door_selections.len()
            + self.clamped_drawers.len()
    }
}

/// Reconciled configuration plus a record of what changed.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// The configuration to store
    pub config: WardrobeConfig,
    /// What was dropped or clamped
    pub report: ReconcileReport,
}

/// Reconciles `config` against the current `structure`.
///
/// - Element configs and extras for missing compartments are dropped.
/// - Drawer counts are clamped to `floor(height_cm / 10)`. When every count
///   ends at 0 after a change, the external flags go too.
/// - A door group is dropped when any referenced compartment is missing or
///   when it has no compartment list at all. A group with an empty list
///   survives.
/// - Legacy door selections for missing compartments are dropped.
///
/// Reconciling the output again changes nothing.
#[must_use]
pub fn reconcile(structure: &Structure, config: &WardrobeConfig) -> Reconciliation {
    let valid = compartment_heights(structure);
    let mut report = ReconcileReport::default();

    let element_configs = reconcile_element_configs(&valid, &config.element_configs, &mut report);

    let mut compartment_extras = BTreeMap::new();
    for (id, extras) in &config.compartment_extras {
        if valid.contains_key(id) {
            compartment_extras.insert(*id, extras.clone());
        } else {
            debug!("Dropping extras for missing compartment {id}");
            report.dropped_extras.push(*id);
        }
    }

    let mut door_groups = Vec::with_capacity(config.door_groups.len());
    for group in &config.door_groups {
        let keep = group
            .compartments
            .as_ref()
            .is_some_and(|keys| keys.iter().all(|key| valid.contains_key(&key.base())));
        if keep {
            door_groups.push(group.clone());
        } else {
            debug!("Dropping door group '{}'", group.id);
            report.dropped_door_groups.push(group.id.clone());
        }
    }

    let mut door_selections = BTreeMap::new();
    for (key, door) in &config.door_selections {
        if valid.contains_key(&key.base()) {
            door_selections.insert(*key, *door);
        } else {
            debug!("Dropping door selection for missing compartment {key}");
            report.dropped_door_selections.push(*key);
        }
    }

    Reconciliation {
        config: WardrobeConfig {
            element_configs,
            compartment_extras,
            door_groups,
            door_selections,
        },
        report,
    }
}

fn reconcile_element_configs(
    valid: &CompartmentMap,
    element_configs: &BTreeMap<CompartmentId, ElementConfig>,
    report: &mut ReconcileReport,
) -> BTreeMap<CompartmentId, ElementConfig> {
    let mut result = BTreeMap::new();

    for (id, element_config) in element_configs {
        let Some(info) = valid.get(id) else {
            debug!("Dropping element config for missing compartment {id}");
            report.dropped_element_configs.push(*id);
            continue;
        };

        match clamp_drawers(element_config, info.height_cm) {
            Some((clamped, cleared_external)) => {
                debug!(
                    "{id}: drawer counts clamped to fit {:.1} cm",
                    info.height_cm
                );
                report.clamped_drawers.push(DrawerClamp {
                    compartment: *id,
                    before: element_config.drawer_counts.clone().unwrap_or_default(),
                    after: clamped.drawer_counts.clone().unwrap_or_default(),
                    cleared_external,
                });
                result.insert(*id, clamped);
            }
            None => {
                result.insert(*id, element_config.clone());
            }
        }
    }

    result
}

/// Maximum drawers a compartment of `height_cm` can hold, or `None` when the
/// height is not a usable number.
#[must_use]
pub fn max_drawers_for_height(height_cm: f64) -> Option<u32> {
    if !height_cm.is_finite() {
        return None;
    }
    Some((height_cm / MIN_DRAWER_SLOT_CM).floor().max(0.0) as u32)
}

/// Clamps drawer counts to the compartment height.
///
/// Returns `None` when nothing changes, otherwise the new config and whether
/// the external flags were cleared.
fn clamp_drawers(config: &ElementConfig, height_cm: f64) -> Option<(ElementConfig, bool)> {
    let counts = config.drawer_counts.as_ref()?;
    let limit = max_drawers_for_height(height_cm)?;

    if counts.iter().all(|&count| count <= limit) {
        return None;
    }

    let clamped: Vec<u32> = counts.iter().map(|&count| count.min(limit)).collect();
    let all_zero = clamped.iter().all(|&count| count == 0);

    let mut next = config.clone();
    next.drawer_counts = Some(clamped);
    let cleared_external = all_zero && next.drawers_external.take().is_some();

    Some((next, cleared_external))
}
