//! Service layer: the geometry engine and project I/O.
//!
//! Each engine stage depends only on the ones before it:
//! partition → compartments → cut list / reconcile.

pub mod compartments;
pub mod cut_list;
pub mod partition;
pub mod project;
pub mod reconcile;

// Re-export commonly used types and functions
pub use compartments::{compartment_heights, enumerate_columns, CompartmentMap};
pub use cut_list::generate_cut_list;
pub use project::ProjectService;
pub use reconcile::{reconcile, ReconcileReport, Reconciliation};
