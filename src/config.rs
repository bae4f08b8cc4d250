//! Connection configuration for the inventory client

use kube::config::KubeConfigOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::{Error, Result};

/// Environment variable selecting the kubeconfig context
pub const CONTEXT_ENV: &str = "INVENTORY_CLIENT_CONTEXT";
/// Environment variable selecting the kubeconfig cluster
pub const CLUSTER_ENV: &str = "INVENTORY_CLIENT_CLUSTER";
/// Environment variable selecting the kubeconfig user
pub const USER_ENV: &str = "INVENTORY_CLIENT_USER";

/// Which cluster to talk to.
///
/// All fields are optional. When none is set the configuration is inferred
/// (in-cluster service account first, then the default kubeconfig).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// Kubeconfig context to use
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Kubeconfig cluster override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,

    /// Kubeconfig user override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl ClientConfig {
    /// Parse a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::ConfigError(format!("Invalid client configuration: {}", e)))
    }

    /// Read a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&yaml)
    }

    /// Read overrides from `INVENTORY_CLIENT_*` variables; empty values are ignored
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            context: get(CONTEXT_ENV),
            cluster: get(CLUSTER_ENV),
            user: get(USER_ENV),
        }
    }

    fn is_inferred(&self) -> bool {
        self.context.is_none() && self.cluster.is_none() && self.user.is_none()
    }

    fn kubeconfig_options(&self) -> KubeConfigOptions {
        KubeConfigOptions {
            context: self.context.clone(),
            cluster: self.cluster.clone(),
            user: self.user.clone(),
        }
    }

    /// Resolve into a `kube::Config`
    pub async fn kube_config(&self) -> Result<kube::Config> {
        if self.is_inferred() {
            debug!("Inferring Kubernetes configuration");
            return Ok(kube::Config::infer().await?);
        }
        debug!(context = ?self.context, cluster = ?self.cluster, user = ?self.user, "Loading kubeconfig");
        Ok(kube::Config::from_kubeconfig(&self.kubeconfig_options()).await?)
    }
}
