//! Group-kind to REST resource resolution

use kube::core::{ApiResource, GroupVersionKind};
use kube::discovery::{Discovery, Scope};
use std::collections::HashMap;
use std::sync::Arc;

use crate::object::GroupKind;
use crate::{Error, Result};

/// Resolved REST endpoint description for a kind
#[derive(Clone, Debug)]
pub struct RestMapping {
    /// Versioned, pluralized resource
    pub resource: ApiResource,
    /// Informational; the caller's namespace is passed through either way
    pub namespaced: bool,
}

/// Maps a group-kind to the resource serving it.
///
/// Unknown kinds fail with [`Error::NoKindMatch`]; there is no fallback guessing.
pub trait RestMapper: Send + Sync {
    fn rest_mapping(&self, group_kind: &GroupKind) -> Result<RestMapping>;
}

impl<M: RestMapper + ?Sized> RestMapper for Arc<M> {
    fn rest_mapping(&self, group_kind: &GroupKind) -> Result<RestMapping> {
        (**self).rest_mapping(group_kind)
    }
}

/// Uses the recommended version of each kind from a discovery run
impl RestMapper for Discovery {
    fn rest_mapping(&self, group_kind: &GroupKind) -> Result<RestMapping> {
        let (resource, caps) = self
            .get(&group_kind.group)
            .and_then(|group| group.recommended_kind(&group_kind.kind))
            .ok_or_else(|| Error::NoKindMatch(group_kind.clone()))?;
        Ok(RestMapping {
            resource,
            namespaced: matches!(caps.scope, Scope::Namespaced),
        })
    }
}

/// Fixed in-memory mapping table
#[derive(Clone, Debug, Default)]
pub struct StaticMapper {
    mappings: HashMap<GroupKind, RestMapping>,
}

impl StaticMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a kind; a later entry for the same group-kind replaces the earlier one
    pub fn with_kind(mut self, gvk: &GroupVersionKind, plural: &str, namespaced: bool) -> Self {
        self.mappings.insert(
            GroupKind::from(gvk),
            RestMapping {
                resource: ApiResource::from_gvk_with_plural(gvk, plural),
                namespaced,
            },
        );
        self
    }

    /// Common built-in kinds
    pub fn builtin() -> Self {
        Self::new()
            .with_kind(&GroupVersionKind::gvk("", "v1", "ConfigMap"), "configmaps", true)
            .with_kind(&GroupVersionKind::gvk("", "v1", "Secret"), "secrets", true)
            .with_kind(&GroupVersionKind::gvk("", "v1", "Service"), "services", true)
            .with_kind(&GroupVersionKind::gvk("", "v1", "Namespace"), "namespaces", false)
            .with_kind(&GroupVersionKind::gvk("apps", "v1", "Deployment"), "deployments", true)
            .with_kind(&GroupVersionKind::gvk("apps", "v1", "StatefulSet"), "statefulsets", true)
    }
}

impl RestMapper for StaticMapper {
    fn rest_mapping(&self, group_kind: &GroupKind) -> Result<RestMapping> {
        self.mappings
            .get(group_kind)
            .cloned()
            .ok_or_else(|| Error::NoKindMatch(group_kind.clone()))
    }
}
