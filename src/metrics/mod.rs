//! Prometheus metrics for the inventory client
//!
//! Counters are registered in the default registry; embedders serve them
//! alongside their own metrics.

pub mod prometheus;

pub use self::prometheus::*;
