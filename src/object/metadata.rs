//! Identity of a single remote object

use kube::core::DynamicObject;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::GroupKind;
use crate::{Error, Result};

const FIELD_SEPARATOR: char = '_';
// RBAC names may contain ':', which is written as a doubled separator
const COLON_TRANSLATOR: &str = "__";

/// Namespace, name and group-kind of a remote object
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjMetadata {
    /// Empty for cluster-scoped objects
    pub namespace: String,
    pub name: String,
    pub group_kind: GroupKind,
}

impl ObjMetadata {
    pub fn new(namespace: &str, name: &str, group_kind: GroupKind) -> Self {
        Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
            group_kind,
        }
    }

    /// Identity of an in-memory object, from its type and metadata
    pub fn from_dynamic(obj: &DynamicObject) -> Result<Self> {
        let types = obj
            .types
            .as_ref()
            .ok_or_else(|| Error::InvalidObjMetadata("object has no apiVersion/kind".to_string()))?;
        if types.kind.is_empty() {
            return Err(Error::InvalidObjMetadata("object has an empty kind".to_string()));
        }
        let name = obj
            .metadata
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| Error::InvalidObjMetadata("object has no metadata.name".to_string()))?;

        Ok(Self::new(
            obj.metadata.namespace.as_deref().unwrap_or_default(),
            name,
            GroupKind::from_api_version(&types.api_version, &types.kind),
        ))
    }
}

/// Inventory string form: `<namespace>_<name>_<group>_<kind>`
impl fmt::Display for ObjMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.replace(':', COLON_TRANSLATOR);
        write!(
            f,
            "{ns}{sep}{name}{sep}{group}{sep}{kind}",
            ns = self.namespace,
            sep = FIELD_SEPARATOR,
            name = name,
            group = self.group_kind.group,
            kind = self.group_kind.kind,
        )
    }
}

impl FromStr for ObjMetadata {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidObjMetadata(format!("unable to parse stored object metadata: {}", s));

        let (namespace, rest) = s.split_once(FIELD_SEPARATOR).ok_or_else(invalid)?;
        let (rest, kind) = rest.rsplit_once(FIELD_SEPARATOR).ok_or_else(invalid)?;
        let (name, group) = rest.rsplit_once(FIELD_SEPARATOR).ok_or_else(invalid)?;

        let name = name.replace(COLON_TRANSLATOR, ":");
        if name.is_empty() || kind.is_empty() || name.contains(FIELD_SEPARATOR) {
            return Err(invalid());
        }

        Ok(Self::new(namespace, &name, GroupKind::new(group, kind)))
    }
}
