//! Inventory client
//!
//! Thin adapter for reading and replacing arbitrary Kubernetes resources
//! through the dynamic API, plus the owning-inventory annotation helper
//! used to track which inventory object manages a resource.

pub mod annotations;
pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod object;

pub use annotations::{update_owning_inventory, OWNING_INVENTORY_ANNOTATION};
pub use client::ObjectClient;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use object::{GroupKind, ObjMetadata};
