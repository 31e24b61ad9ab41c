//! Trace and log correlation for the observability view
//!
//! Generates abnormal log records and distributed-trace call trees, then
//! attaches trace ids to a share of the logs.

pub mod generator;
pub mod sampler;
pub mod snapshot;
pub mod tree;
pub mod types;

pub use generator::{generate_abnormal_logs, CallLeg, TraceGenerator};
pub use sampler::LogCorrelator;
pub use snapshot::{load_snapshot, ObservabilitySnapshot};
pub use tree::TraceTree;
pub use types::{LogEntry, LogLevel, SpanStatus, TraceDetail, TraceSpan, TraceStatus, TraceSummary};

use serde::{Deserialize, Serialize};

/// Trace/log generation and correlation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TraceConfig {
    /// Probability that an ERROR log carries a trace id
    pub error_log_correlation: f64,
    /// Probability that a WARN log carries a trace id
    pub warn_log_correlation: f64,
    /// Share of generated traces with one failing call leg
    pub failing_trace_ratio: f64,
    /// Artificial delay before a snapshot resolves
    pub simulated_latency_ms: u64,
    pub log_count: usize,
    pub trace_count: usize,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            error_log_correlation: 0.7,
            warn_log_correlation: 0.3,
            failing_trace_ratio: 0.3,
            simulated_latency_ms: 0,
            log_count: 120,
            trace_count: 40,
        }
    }
}
