//! Prometheus metrics definitions

use prometheus::{register_counter_vec, CounterVec, Encoder, TextEncoder};

use crate::{Error, Result};

lazy_static::lazy_static! {
    /// Remote calls issued, by verb and group-kind
    pub static ref REMOTE_CALLS: CounterVec = register_counter_vec!(
        "inventory_client_remote_calls_total",
        "Total number of remote get/update calls",
        &["verb", "kind"]
    ).unwrap();

    /// Failed remote calls and failed resolutions (verb = "resolve")
    pub static ref REMOTE_CALL_ERRORS: CounterVec = register_counter_vec!(
        "inventory_client_remote_call_errors_total",
        "Total number of failed remote calls and kind resolutions",
        &["verb", "kind"]
    ).unwrap();

    /// Owning-inventory annotation updates by outcome
    pub static ref OWNERSHIP_UPDATES: CounterVec = register_counter_vec!(
        "inventory_client_ownership_updates_total",
        "Owning-inventory annotation updates by outcome",
        &["outcome"]
    ).unwrap();
}

/// Render the default registry in the text exposition format
pub fn encode_metrics() -> Result<String> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&prometheus::gather(), &mut buffer)
        .map_err(|e| Error::MetricsError(format!("Failed to encode metrics: {}", e)))?;
    String::from_utf8(buffer)
        .map_err(|e| Error::MetricsError(format!("Metrics are not valid UTF-8: {}", e)))
}
