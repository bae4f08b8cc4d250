//! Owning-inventory annotation transfer

use kube::core::DynamicObject;
use tracing::debug;

use super::last_applied::{
    encode_snapshot, last_applied_snapshot, set_snapshot_annotations, LAST_APPLIED_CONFIG_ANNOTATION,
};
use crate::metrics::prometheus::OWNERSHIP_UPDATES;
use crate::Result;

/// Annotation naming the inventory that manages an object
pub const OWNING_INVENTORY_ANNOTATION: &str = "config.k8s.io/owning-inventory";

/// Current owning inventory ID, if any
pub fn owning_inventory(obj: &DynamicObject) -> Option<&str> {
    obj.metadata
        .annotations
        .as_ref()?
        .get(OWNING_INVENTORY_ANNOTATION)
        .map(String::as_str)
}

/// Move ownership of `obj` from `old_id` to `new_id`.
///
/// Only applies when the object has no owner yet or is owned by `old_id`;
/// an object owned by anyone else is left alone and `Ok(false)` returned.
/// When a last-applied snapshot is embedded, its annotations are rewritten
/// to match so later three-way diffs see the same owner.
///
/// The snapshot is re-encoded before anything is written back, so an
/// encoding error leaves `obj` untouched.
pub fn update_owning_inventory(obj: &mut DynamicObject, old_id: &str, new_id: &str) -> Result<bool> {
    let mut annotations = obj.metadata.annotations.clone().unwrap_or_default();

    if let Some(current) = annotations.get(OWNING_INVENTORY_ANNOTATION) {
        if current != old_id {
            debug!(current = %current, old_id, new_id, "Owned by another inventory, not transferring");
            OWNERSHIP_UPDATES.with_label_values(&["refused"]).inc();
            return Ok(false);
        }
    }

    annotations.insert(OWNING_INVENTORY_ANNOTATION.to_string(), new_id.to_string());

    if let Some(mut snapshot) = last_applied_snapshot(obj) {
        set_snapshot_annotations(&mut snapshot, &annotations);
        let encoded = encode_snapshot(&snapshot).inspect_err(|_| {
            OWNERSHIP_UPDATES.with_label_values(&["failed"]).inc();
        })?;
        annotations.insert(LAST_APPLIED_CONFIG_ANNOTATION.to_string(), encoded);
    }

    obj.metadata.annotations = Some(annotations);
    debug!(old_id, new_id, "Transferred owning inventory");
    OWNERSHIP_UPDATES.with_label_values(&["transferred"]).inc();
    Ok(true)
}
