//! Annotation bookkeeping on in-memory objects

mod last_applied;
mod ownership;

pub use last_applied::{last_applied_snapshot, LAST_APPLIED_CONFIG_ANNOTATION};
pub use ownership::{owning_inventory, update_owning_inventory, OWNING_INVENTORY_ANNOTATION};
