//! Generic get/update of arbitrary resources through the dynamic API

mod handle;
mod mapper;

pub use handle::{DynamicClient, ResourceHandle};
pub use mapper::{RestMapper, RestMapping, StaticMapper};

use kube::api::PostParams;
use kube::core::DynamicObject;
use kube::discovery::Discovery;
use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::metrics::prometheus::{REMOTE_CALLS, REMOTE_CALL_ERRORS};
use crate::object::ObjMetadata;
use crate::{Error, Result};

/// Reads and replaces objects of any kind.
///
/// Each call resolves the kind through the mapper and issues exactly one
/// remote request. Errors are returned unchanged and never retried.
/// Cancellation is dropping the returned future.
#[derive(Clone, Debug)]
pub struct ObjectClient<C, M> {
    client: C,
    mapper: M,
}

impl ObjectClient<kube::Client, Discovery> {
    /// Connect to the configured cluster and run API discovery once
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        let kube_config = config.kube_config().await?;
        let client = kube::Client::try_from(kube_config)?;
        let discovery = Discovery::new(client.clone())
            .run()
            .await
            .map_err(Error::DiscoveryError)?;
        debug!(groups = discovery.groups().count(), "API discovery complete");
        Ok(Self::new(client, discovery))
    }
}

impl<C, M> ObjectClient<C, M>
where
    C: DynamicClient,
    M: RestMapper,
{
    pub fn new(client: C, mapper: M) -> Self {
        Self { client, mapper }
    }

    /// Fetch the object identified by `id`
    #[instrument(skip(self, id), fields(object = %id))]
    pub async fn get(&self, id: &ObjMetadata) -> Result<DynamicObject> {
        let handle = self.resource_handle(id)?;
        let kind = id.group_kind.to_string();
        REMOTE_CALLS.with_label_values(&["get", &kind]).inc();

        let result = handle.get(&id.name).await;
        if result.is_err() {
            REMOTE_CALL_ERRORS.with_label_values(&["get", &kind]).inc();
        }
        result
    }

    /// Replace the object identified by `id` with `obj`.
    ///
    /// `None` params mean `PostParams::default()`. Conflicts are propagated,
    /// not retried.
    #[instrument(skip(self, id, obj, params), fields(object = %id))]
    pub async fn update(
        &self,
        id: &ObjMetadata,
        obj: &DynamicObject,
        params: Option<&PostParams>,
    ) -> Result<()> {
        let handle = self.resource_handle(id)?;
        let params = params.cloned().unwrap_or_default();
        let kind = id.group_kind.to_string();
        REMOTE_CALLS.with_label_values(&["update", &kind]).inc();

        match handle.update(obj, &params).await {
            Ok(_) => Ok(()),
            Err(e) => {
                REMOTE_CALL_ERRORS.with_label_values(&["update", &kind]).inc();
                Err(e)
            }
        }
    }

    fn resource_handle(&self, id: &ObjMetadata) -> Result<C::Handle> {
        let mapping = self.mapper.rest_mapping(&id.group_kind).inspect_err(|_| {
            REMOTE_CALL_ERRORS
                .with_label_values(&["resolve", &id.group_kind.to_string()])
                .inc();
        })?;
        debug!(
            resource = %mapping.resource.plural,
            api_version = %mapping.resource.api_version,
            namespaced = mapping.namespaced,
            namespace = %id.namespace,
            "Resolved resource"
        );
        Ok(self.client.resource(&mapping.resource, &id.namespace))
    }
}
