//! Probabilistic attachment of trace ids to log records

use super::types::{LogEntry, LogLevel, TraceStatus, TraceSummary};
use super::TraceConfig;
use crate::random::CosmeticRandom;
use rand::Rng;
use tracing::info;

#[derive(Debug, Clone)]
pub struct LogCorrelator {
    error_probability: f64,
    warn_probability: f64,
}

impl LogCorrelator {
    pub fn new(error_probability: f64, warn_probability: f64) -> Self {
        Self {
            error_probability,
            warn_probability,
        }
    }

    pub fn from_config(config: &TraceConfig) -> Self {
        Self::new(config.error_log_correlation, config.warn_log_correlation)
    }

    /// Chance that a log of `level` carries a trace id
    pub fn probability(&self, level: LogLevel) -> f64 {
        match level {
            LogLevel::Error => self.error_probability,
            LogLevel::Warn => self.warn_probability,
            LogLevel::Info => 0.0,
        }
    }

    /// Pick a trace, preferring the ones that failed
    pub fn pick_trace<'a, R: Rng>(
        &self,
        traces: &'a [TraceSummary],
        rng: &mut CosmeticRandom<R>,
    ) -> Option<&'a TraceSummary> {
        let failed: Vec<&TraceSummary> = traces.iter().filter(|t| t.status == TraceStatus::Error).collect();
        if failed.is_empty() {
            rng.pick(traces)
        } else {
            rng.pick(&failed).copied()
        }
    }

    /// Attach trace ids to `logs` in place; returns how many were attached
    pub fn correlate<R: Rng>(
        &self,
        logs: &mut [LogEntry],
        traces: &[TraceSummary],
        rng: &mut CosmeticRandom<R>,
    ) -> usize {
        if traces.is_empty() {
            return 0;
        }

        let mut attached = 0;
        for log in logs.iter_mut() {
            if !rng.chance(self.probability(log.level)) {
                continue;
            }
            if let Some(trace) = self.pick_trace(traces, rng) {
                log.trace_id = Some(trace.trace_id.clone());
                attached += 1;
            }
        }

        info!(logs = logs.len(), traces = traces.len(), attached, "correlated logs with traces");
        attached
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn summary(id: &str, status: TraceStatus) -> TraceSummary {
        TraceSummary {
            trace_id: id.to_string(),
            root_service: "api-gateway".to_string(),
            operation: "GET /".to_string(),
            start_time: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            duration_ms: 10,
            span_count: 1,
            error_count: usize::from(status == TraceStatus::Error),
            status,
        }
    }

    fn log(level: LogLevel) -> LogEntry {
        LogEntry {
            id: "log".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            level,
            service: "api-gateway".to_string(),
            message: "boom".to_string(),
            trace_id: None,
        }
    }

    #[test]
    fn test_prefers_failed_traces() {
        let traces = vec![
            summary("ok-1", TraceStatus::Ok),
            summary("err-1", TraceStatus::Error),
            summary("ok-2", TraceStatus::Ok),
        ];
        let correlator = LogCorrelator::new(1.0, 1.0);
        let mut rng = CosmeticRandom::seeded(8);
        for _ in 0..50 {
            assert_eq!(correlator.pick_trace(&traces, &mut rng).unwrap().trace_id, "err-1");
        }
    }

    #[test]
    fn test_falls_back_to_any_trace() {
        let traces = vec![summary("ok-1", TraceStatus::Ok), summary("ok-2", TraceStatus::Ok)];
        let correlator = LogCorrelator::new(1.0, 1.0);
        let mut rng = CosmeticRandom::seeded(8);
        assert!(correlator.pick_trace(&traces, &mut rng).is_some());
    }

    #[test]
    fn test_correlation_rates() {
        let traces = vec![summary("err-1", TraceStatus::Error)];
        let correlator = LogCorrelator::new(0.7, 0.3);
        let mut rng = CosmeticRandom::seeded(21);

        let mut errors: Vec<LogEntry> = (0..4000).map(|_| log(LogLevel::Error)).collect();
        let mut warns: Vec<LogEntry> = (0..4000).map(|_| log(LogLevel::Warn)).collect();
        let mut infos: Vec<LogEntry> = (0..100).map(|_| log(LogLevel::Info)).collect();

        let e = correlator.correlate(&mut errors, &traces, &mut rng) as f64 / 4000.0;
        let w = correlator.correlate(&mut warns, &traces, &mut rng) as f64 / 4000.0;
        let i = correlator.correlate(&mut infos, &traces, &mut rng);

        assert!((e - 0.7).abs() < 0.05, "error correlation rate {}", e);
        assert!((w - 0.3).abs() < 0.05, "warn correlation rate {}", w);
        assert_eq!(i, 0);
        assert!(errors.iter().filter_map(|l| l.trace_id.as_deref()).all(|id| id == "err-1"));
    }

    #[test]
    fn test_no_traces_no_correlation() {
        let mut logs = vec![log(LogLevel::Error)];
        let mut rng = CosmeticRandom::seeded(1);
        assert_eq!(LogCorrelator::new(1.0, 1.0).correlate(&mut logs, &[], &mut rng), 0);
        assert!(logs[0].trace_id.is_none());
    }
}
