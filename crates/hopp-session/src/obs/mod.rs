//! Observability (metrics registry).

pub mod metrics;

pub use metrics::SessionMetrics;
