//! One observability snapshot: abnormal logs, traces and their correlation

use super::generator::{generate_abnormal_logs, TraceGenerator};
use super::sampler::LogCorrelator;
use super::types::{LogEntry, TraceDetail, TraceSummary};
use super::TraceConfig;
use crate::random::CosmeticRandom;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservabilitySnapshot {
    pub logs: Vec<LogEntry>,
    pub traces: Vec<TraceDetail>,
    /// Logs that carry a trace id
    pub correlated_logs: usize,
}

impl ObservabilitySnapshot {
    pub fn generate<R: Rng>(config: &TraceConfig, anchor: DateTime<Utc>, rng: &mut CosmeticRandom<R>) -> Self {
        let traces = TraceGenerator::from_config(config).generate_many(config.trace_count, anchor, rng);
        let summaries: Vec<TraceSummary> = traces.iter().map(|t| t.summary.clone()).collect();

        let mut logs = generate_abnormal_logs(config.log_count, anchor, rng);
        let correlated_logs = LogCorrelator::from_config(config).correlate(&mut logs, &summaries, rng);

        ObservabilitySnapshot {
            logs,
            traces,
            correlated_logs,
        }
    }

    pub fn summaries(&self) -> Vec<&TraceSummary> {
        self.traces.iter().map(|t| &t.summary).collect()
    }

    pub fn trace(&self, trace_id: &str) -> Option<&TraceDetail> {
        self.traces.iter().find(|t| t.summary.trace_id == trace_id)
    }

    pub fn logs_for_trace(&self, trace_id: &str) -> Vec<&LogEntry> {
        self.logs
            .iter()
            .filter(|l| l.trace_id.as_deref() == Some(trace_id))
            .collect()
    }
}

/// Generate a snapshot after the configured artificial delay.
///
/// The delay only exists to drive loading indicators; with the default of zero
/// the snapshot resolves immediately.
pub async fn load_snapshot(config: &TraceConfig, anchor: DateTime<Utc>) -> ObservabilitySnapshot {
    if config.simulated_latency_ms > 0 {
        debug!(latency_ms = config.simulated_latency_ms, "simulating snapshot latency");
        tokio::time::sleep(Duration::from_millis(config.simulated_latency_ms)).await;
    }
    let mut rng = CosmeticRandom::new();
    ObservabilitySnapshot::generate(config, anchor, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_snapshot_links_resolve() {
        let config = TraceConfig::default();
        let mut rng = CosmeticRandom::seeded(17);
        let snapshot = ObservabilitySnapshot::generate(&config, anchor(), &mut rng);

        assert_eq!(snapshot.logs.len(), config.log_count);
        assert_eq!(snapshot.traces.len(), config.trace_count);
        assert_eq!(
            snapshot.correlated_logs,
            snapshot.logs.iter().filter(|l| l.trace_id.is_some()).count()
        );

        for log in &snapshot.logs {
            if let Some(id) = &log.trace_id {
                assert!(snapshot.trace(id).is_some());
                assert!(snapshot.logs_for_trace(id).iter().any(|l| l.id == log.id));
            }
        }
    }

    #[tokio::test]
    async fn test_load_snapshot_with_latency() {
        let config = TraceConfig {
            simulated_latency_ms: 10,
            log_count: 5,
            trace_count: 3,
            ..Default::default()
        };
        let started = std::time::Instant::now();
        let snapshot = load_snapshot(&config, anchor()).await;
        assert!(started.elapsed() >= Duration::from_millis(10));
        assert_eq!(snapshot.logs.len(), 5);
        assert_eq!(snapshot.summaries().len(), 3);
    }
}
