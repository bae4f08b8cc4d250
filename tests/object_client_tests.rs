//! Integration tests for the object client
//!
//! A recording fake stands in for the dynamic client so each test can check
//! exactly which resolutions and remote calls were made.

use std::sync::{Arc, Mutex};

use inventory_client::client::{DynamicClient, ResourceHandle, StaticMapper};
use inventory_client::{Error, GroupKind, ObjMetadata, ObjectClient, Result};
use kube::api::PostParams;
use kube::core::{ApiResource, DynamicObject, GroupVersionKind};
use kube::ResourceExt;

// ============================================================================
// Test Helpers
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Resource {
        plural: String,
        namespace: String,
    },
    Get {
        name: String,
    },
    Update {
        name: String,
        dry_run: bool,
        field_manager: Option<String>,
    },
}

#[derive(Clone, Default)]
struct RecordingClient {
    calls: Arc<Mutex<Vec<Call>>>,
    fail_with_conflict: bool,
}

impl RecordingClient {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

struct RecordingHandle {
    calls: Arc<Mutex<Vec<Call>>>,
    resource: ApiResource,
    namespace: String,
    fail_with_conflict: bool,
}

impl DynamicClient for RecordingClient {
    type Handle = RecordingHandle;

    fn resource(&self, resource: &ApiResource, namespace: &str) -> RecordingHandle {
        self.calls.lock().unwrap().push(Call::Resource {
            plural: resource.plural.clone(),
            namespace: namespace.to_string(),
        });
        RecordingHandle {
            calls: self.calls.clone(),
            resource: resource.clone(),
            namespace: namespace.to_string(),
            fail_with_conflict: self.fail_with_conflict,
        }
    }
}

impl ResourceHandle for RecordingHandle {
    async fn get(&self, name: &str) -> Result<DynamicObject> {
        self.calls.lock().unwrap().push(Call::Get {
            name: name.to_string(),
        });
        Ok(DynamicObject::new(name, &self.resource).within(&self.namespace))
    }

    async fn update(&self, obj: &DynamicObject, params: &PostParams) -> Result<DynamicObject> {
        self.calls.lock().unwrap().push(Call::Update {
            name: obj.name_any(),
            dry_run: params.dry_run,
            field_manager: params.field_manager.clone(),
        });
        if self.fail_with_conflict {
            return Err(Error::KubeError(kube::Error::Api(kube::core::ErrorResponse {
                status: "Failure".to_string(),
                message: "the object has been modified".to_string(),
                reason: "Conflict".to_string(),
                code: 409,
            })));
        }
        Ok(obj.clone())
    }
}

fn mapper() -> StaticMapper {
    StaticMapper::builtin().with_kind(
        &GroupVersionKind::gvk("example.com", "v1", "Widget"),
        "widgets",
        true,
    )
}

fn deployment_id() -> ObjMetadata {
    ObjMetadata::new("default", "web", GroupKind::new("apps", "Deployment"))
}

fn deployment() -> DynamicObject {
    let resource = ApiResource::from_gvk_with_plural(
        &GroupVersionKind::gvk("apps", "v1", "Deployment"),
        "deployments",
    );
    DynamicObject::new("web", &resource).within("default")
}

// ============================================================================
// Get Tests
// ============================================================================

#[tokio::test]
async fn get_resolves_once_and_fetches_once() {
    let client = RecordingClient::default();
    let objects = ObjectClient::new(client.clone(), mapper());

    let obj = objects.get(&deployment_id()).await.unwrap();

    assert_eq!(obj.name_any(), "web");
    assert_eq!(obj.namespace().as_deref(), Some("default"));
    assert_eq!(
        client.calls(),
        vec![
            Call::Resource {
                plural: "deployments".to_string(),
                namespace: "default".to_string(),
            },
            Call::Get {
                name: "web".to_string()
            },
        ]
    );
}

#[tokio::test]
async fn get_unknown_kind_makes_no_remote_call() {
    let client = RecordingClient::default();
    let objects = ObjectClient::new(client.clone(), mapper());
    let id = ObjMetadata::new("default", "thing", GroupKind::new("example.com", "Gadget"));

    let err = objects.get(&id).await.unwrap_err();

    assert!(matches!(err, Error::NoKindMatch(ref gk) if gk.kind == "Gadget"));
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn get_custom_kind_uses_its_plural() {
    let client = RecordingClient::default();
    let objects = ObjectClient::new(client.clone(), mapper());
    let id = ObjMetadata::new("team-a", "w1", GroupKind::new("example.com", "Widget"));

    objects.get(&id).await.unwrap();

    assert_eq!(
        client.calls()[0],
        Call::Resource {
            plural: "widgets".to_string(),
            namespace: "team-a".to_string(),
        }
    );
}

#[tokio::test]
async fn cluster_scoped_identity_passes_empty_namespace() {
    let client = RecordingClient::default();
    let objects = ObjectClient::new(client.clone(), mapper());
    let id = ObjMetadata::new("", "kube-system", GroupKind::new("", "Namespace"));

    objects.get(&id).await.unwrap();

    assert_eq!(
        client.calls()[0],
        Call::Resource {
            plural: "namespaces".to_string(),
            namespace: String::new(),
        }
    );
}

#[tokio::test]
async fn namespace_is_passed_through_for_cluster_scoped_kind() {
    let client = RecordingClient::default();
    let objects = ObjectClient::new(client.clone(), mapper());
    let id = ObjMetadata::new("default", "kube-system", GroupKind::new("", "Namespace"));

    objects.get(&id).await.unwrap();

    assert_eq!(
        client.calls()[0],
        Call::Resource {
            plural: "namespaces".to_string(),
            namespace: "default".to_string(),
        }
    );
}

// ============================================================================
// Update Tests
// ============================================================================

#[tokio::test]
async fn update_without_params_uses_defaults() {
    let without = RecordingClient::default();
    ObjectClient::new(without.clone(), mapper())
        .update(&deployment_id(), &deployment(), None)
        .await
        .unwrap();

    let with_defaults = RecordingClient::default();
    ObjectClient::new(with_defaults.clone(), mapper())
        .update(&deployment_id(), &deployment(), Some(&PostParams::default()))
        .await
        .unwrap();

    assert_eq!(without.calls(), with_defaults.calls());
    assert_eq!(
        without.calls()[1],
        Call::Update {
            name: "web".to_string(),
            dry_run: false,
            field_manager: None,
        }
    );
}

#[tokio::test]
async fn update_passes_params_through() {
    let client = RecordingClient::default();
    let params = PostParams {
        dry_run: true,
        field_manager: Some("inventory".to_string()),
    };

    ObjectClient::new(client.clone(), mapper())
        .update(&deployment_id(), &deployment(), Some(&params))
        .await
        .unwrap();

    assert_eq!(
        client.calls()[1],
        Call::Update {
            name: "web".to_string(),
            dry_run: true,
            field_manager: Some("inventory".to_string()),
        }
    );
}

#[tokio::test]
async fn update_conflict_is_returned_unchanged() {
    let client = RecordingClient {
        fail_with_conflict: true,
        ..Default::default()
    };
    let objects = ObjectClient::new(client.clone(), mapper());

    let err = objects
        .update(&deployment_id(), &deployment(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::KubeError(kube::Error::Api(ref ae)) if ae.code == 409));
    // one attempt, no retry
    assert_eq!(client.calls().len(), 2);
}

#[tokio::test]
async fn update_unknown_kind_makes_no_remote_call() {
    let client = RecordingClient::default();
    let id = ObjMetadata::new("default", "w", GroupKind::new("extensions", "Deployment"));

    let err = ObjectClient::new(client.clone(), mapper())
        .update(&id, &deployment(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NoKindMatch(_)));
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn shared_client_serves_concurrent_callers() {
    let client = RecordingClient::default();
    let objects = Arc::new(ObjectClient::new(client.clone(), Arc::new(mapper())));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let objects = objects.clone();
            tokio::spawn(async move {
                let id = ObjMetadata::new("default", &format!("cfg-{}", i), GroupKind::new("", "ConfigMap"));
                objects.get(&id).await.map(|o| o.name_any())
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.await.unwrap().unwrap(), format!("cfg-{}", i));
    }
    assert_eq!(client.calls().len(), 16);
}
