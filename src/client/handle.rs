//! Per-resource remote handles

use kube::api::{Api, PostParams};
use kube::core::{ApiResource, DynamicObject};
use std::future::Future;

use crate::{Error, Result};

/// Remote operations on one resource type within one namespace
pub trait ResourceHandle: Send + Sync {
    /// Fetch an object by name
    fn get(&self, name: &str) -> impl Future<Output = Result<DynamicObject>> + Send;

    /// Replace an object wholesale; the target is the object's own name,
    /// which must be set
    fn update(
        &self,
        obj: &DynamicObject,
        params: &PostParams,
    ) -> impl Future<Output = Result<DynamicObject>> + Send;
}

/// Factory for [`ResourceHandle`]s keyed on a resolved resource
pub trait DynamicClient: Send + Sync {
    type Handle: ResourceHandle;

    /// Handle for `resource` in `namespace`; an empty namespace addresses the cluster scope
    fn resource(&self, resource: &ApiResource, namespace: &str) -> Self::Handle;
}

impl DynamicClient for kube::Client {
    type Handle = Api<DynamicObject>;

    fn resource(&self, resource: &ApiResource, namespace: &str) -> Api<DynamicObject> {
        if namespace.is_empty() {
            Api::all_with(self.clone(), resource)
        } else {
            Api::namespaced_with(self.clone(), namespace, resource)
        }
    }
}

impl ResourceHandle for Api<DynamicObject> {
    async fn get(&self, name: &str) -> Result<DynamicObject> {
        Ok(Api::get(self, name).await?)
    }

    async fn update(&self, obj: &DynamicObject, params: &PostParams) -> Result<DynamicObject> {
        let name = obj
            .metadata
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::InvalidObjMetadata("name is required".to_string()))?;
        Ok(self.replace(name, params, obj).await?)
    }
}
