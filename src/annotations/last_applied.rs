//! The kubectl last-applied-configuration snapshot

use kube::core::DynamicObject;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::{Error, Result};

/// Annotation holding the previous desired state as JSON
pub const LAST_APPLIED_CONFIG_ANNOTATION: &str = "kubectl.kubernetes.io/last-applied-configuration";

/// Decode the embedded snapshot.
///
/// Absent, malformed, or wrongly shaped snapshots all read as `None`. A
/// usable snapshot is an object with a non-empty string `kind` and a
/// `metadata` that is absent, null or an object.
pub fn last_applied_snapshot(obj: &DynamicObject) -> Option<Map<String, Value>> {
    let raw = obj
        .metadata
        .annotations
        .as_ref()?
        .get(LAST_APPLIED_CONFIG_ANNOTATION)?;
    let Ok(Value::Object(snapshot)) = serde_json::from_str::<Value>(raw) else {
        return None;
    };
    let has_kind = matches!(snapshot.get("kind"), Some(Value::String(kind)) if !kind.is_empty());
    let metadata_ok = matches!(
        snapshot.get("metadata"),
        None | Some(Value::Null) | Some(Value::Object(_))
    );
    (has_kind && metadata_ok).then_some(snapshot)
}

/// Replace the snapshot's annotations, leaving out the snapshot key itself
pub(crate) fn set_snapshot_annotations(
    snapshot: &mut Map<String, Value>,
    annotations: &BTreeMap<String, String>,
) {
    let annotations: Map<String, Value> = annotations
        .iter()
        .filter(|(key, _)| key.as_str() != LAST_APPLIED_CONFIG_ANNOTATION)
        .map(|(key, value)| (key.clone(), Value::String(value.clone())))
        .collect();

    let metadata = snapshot
        .entry("metadata")
        .or_insert_with(|| Value::Object(Map::new()));
    if metadata.is_null() {
        *metadata = Value::Object(Map::new());
    }
    if let Value::Object(metadata) = metadata {
        if annotations.is_empty() {
            metadata.remove("annotations");
        } else {
            metadata.insert("annotations".to_string(), Value::Object(annotations));
        }
    }
}

/// Encode a snapshot the way kubectl writes it: compact JSON with keys in
/// sorted order, plus a newline
pub(crate) fn encode_snapshot(snapshot: &Map<String, Value>) -> Result<String> {
    let mut encoded = serde_json::to_string(snapshot).map_err(Error::SnapshotEncodeError)?;
    encoded.push('\n');
    Ok(encoded)
}
