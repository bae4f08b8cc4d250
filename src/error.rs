//! Error types for the inventory client

use thiserror::Error;

use crate::object::GroupKind;

/// Result type for the inventory client
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the inventory client
#[derive(Debug, Error)]
pub enum Error {
    /// The group-kind has no REST mapping
    #[error("no matches for kind \"{0}\"")]
    NoKindMatch(GroupKind),

    /// API discovery failed while building a mapper
    #[error("API discovery failed: {0}")]
    DiscoveryError(#[source] kube::Error),

    /// Kubernetes API error, carried unchanged
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    /// The last-applied snapshot could not be re-encoded
    #[error("failed to encode last-applied configuration: {0}")]
    SnapshotEncodeError(#[source] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Kubeconfig could not be loaded
    #[error("Kubeconfig error: {0}")]
    KubeconfigError(#[from] kube::config::KubeconfigError),

    /// Neither in-cluster nor local configuration was usable
    #[error("Unable to infer Kubernetes configuration: {0}")]
    InferConfigError(#[from] kube::config::InferConfigError),

    /// Metrics could not be rendered
    #[error("Metrics error: {0}")]
    MetricsError(String),

    /// Object identity missing or malformed
    #[error("invalid object metadata: {0}")]
    InvalidObjMetadata(String),
}
