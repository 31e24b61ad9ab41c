//! Synthetic trace and abnormal-log generation
//!
//! Every trace models the same order-placement call tree:
//!
//! ```text
//! api-gateway  POST /api/orders
//! ├── order-service  createOrder
//! │   ├── mysql  INSERT orders
//! │   └── payment-service  processPayment
//! └── inventory-service  reserveStock
//! ```
//!
//! The trace duration is the gateway's own time plus the slower of its two
//! downstream branches. At most one of four designated legs fails per trace.

use super::types::{LogEntry, LogLevel, SpanStatus, TraceDetail, TraceSpan, TraceStatus, TraceSummary};
use super::TraceConfig;
use crate::random::CosmeticRandom;
use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The call legs that may be chosen to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallLeg {
    Gateway,
    Order,
    Database,
    Payment,
}

impl CallLeg {
    pub const ALL: [CallLeg; 4] = [CallLeg::Gateway, CallLeg::Order, CallLeg::Database, CallLeg::Payment];

    pub fn service(self) -> &'static str {
        match self {
            CallLeg::Gateway => "api-gateway",
            CallLeg::Order => "order-service",
            CallLeg::Database => "mysql",
            CallLeg::Payment => "payment-service",
        }
    }

    fn stack_trace(self) -> &'static str {
        match self {
            CallLeg::Gateway => {
                "GatewayTimeoutError: upstream order-service did not respond within 3000ms\n    \
                 at proxy.forward (gateway/proxy.rs:214)\n    \
                 at router.dispatch (gateway/router.rs:88)"
            }
            CallLeg::Order => {
                "OrderValidationError: order total does not match line items\n    \
                 at order.validate (order/service.rs:132)\n    \
                 at order.create (order/service.rs:61)"
            }
            CallLeg::Database => {
                "DatabaseError: Lock wait timeout exceeded; try restarting transaction\n    \
                 at pool.execute (db/pool.rs:377)\n    \
                 at orders.insert (order/repository.rs:45)"
            }
            CallLeg::Payment => {
                "PaymentDeclinedError: payment provider returned 502 Bad Gateway\n    \
                 at provider.charge (payment/provider.rs:203)\n    \
                 at payment.process (payment/service.rs:77)"
            }
        }
    }
}

const LOG_SERVICES: [&str; 6] = [
    "api-gateway",
    "order-service",
    "payment-service",
    "inventory-service",
    "user-service",
    "mysql",
];

const ERROR_MESSAGES: [&str; 5] = [
    "Request failed with status 500",
    "Database connection refused",
    "Payment provider returned 502",
    "NullPointerException in request handler",
    "Upstream call timed out after 3000ms",
];

const WARN_MESSAGES: [&str; 5] = [
    "Slow query took 1840ms",
    "Retrying upstream call (attempt 2/3)",
    "Connection pool usage above 80%",
    "Response time above 1000ms threshold",
    "Deprecated API version requested",
];

/// Generates trace call trees
#[derive(Debug, Clone)]
pub struct TraceGenerator {
    failing_trace_ratio: f64,
}

impl TraceGenerator {
    pub fn new(failing_trace_ratio: f64) -> Self {
        Self { failing_trace_ratio }
    }

    pub fn from_config(config: &TraceConfig) -> Self {
        Self::new(config.failing_trace_ratio)
    }

    /// One random index among the four legs, or none
    pub fn pick_failing_leg<R: Rng>(&self, rng: &mut CosmeticRandom<R>) -> Option<CallLeg> {
        if rng.chance(self.failing_trace_ratio) {
            Some(CallLeg::ALL[rng.below(CallLeg::ALL.len())])
        } else {
            None
        }
    }

    pub fn generate<R: Rng>(&self, start_time: DateTime<Utc>, rng: &mut CosmeticRandom<R>) -> TraceDetail {
        let failing = self.pick_failing_leg(rng);
        self.generate_with_failure(start_time, failing, rng)
    }

    pub fn generate_with_failure<R: Rng>(
        &self,
        start_time: DateTime<Utc>,
        failing: Option<CallLeg>,
        rng: &mut CosmeticRandom<R>,
    ) -> TraceDetail {
        let trace_id = uuid::Builder::from_random_bytes(rng.rng_mut().gen())
            .into_uuid()
            .simple()
            .to_string();

        let gateway_self = rng.range(5, 20);
        let order_self = rng.range(10, 40);
        let db = rng.range(5, 80);
        let payment = rng.range(30, 200);
        let inventory = rng.range(10, 60);

        let order_total = order_self + db + payment;
        let duration = gateway_self + order_total.max(inventory);

        let mut builder = SpanBuilder {
            trace_id: &trace_id,
            spans: Vec::with_capacity(5),
            failing,
        };

        let root = builder.push(rng, SpanSpec {
            parent: None,
            leg: Some(CallLeg::Gateway),
            service: "api-gateway",
            operation: "POST /api/orders",
            start_offset_ms: 0,
            duration_ms: duration,
            tags: &[("http.method", "POST"), ("http.url", "/api/orders")],
        });
        let order = builder.push(rng, SpanSpec {
            parent: Some(root.as_str()),
            leg: Some(CallLeg::Order),
            service: "order-service",
            operation: "createOrder",
            start_offset_ms: gateway_self,
            duration_ms: order_total,
            tags: &[("component", "grpc")],
        });
        builder.push(rng, SpanSpec {
            parent: Some(order.as_str()),
            leg: Some(CallLeg::Database),
            service: "mysql",
            operation: "INSERT orders",
            start_offset_ms: gateway_self + order_self,
            duration_ms: db,
            tags: &[("db.system", "mysql"), ("db.statement", "INSERT INTO orders (...) VALUES (...)")],
        });
        builder.push(rng, SpanSpec {
            parent: Some(order.as_str()),
            leg: Some(CallLeg::Payment),
            service: "payment-service",
            operation: "processPayment",
            start_offset_ms: gateway_self + order_self + db,
            duration_ms: payment,
            tags: &[("peer.service", "payment-provider")],
        });
        builder.push(rng, SpanSpec {
            parent: Some(root.as_str()),
            leg: None,
            service: "inventory-service",
            operation: "reserveStock",
            start_offset_ms: gateway_self,
            duration_ms: inventory,
            tags: &[("component", "grpc")],
        });

        let spans = builder.spans;
        let error_count = spans.iter().filter(|s| s.status == SpanStatus::Error).count();

        TraceDetail {
            summary: TraceSummary {
                trace_id,
                root_service: "api-gateway".to_string(),
                operation: "POST /api/orders".to_string(),
                start_time,
                duration_ms: duration,
                span_count: spans.len(),
                error_count,
                status: if error_count > 0 { TraceStatus::Error } else { TraceStatus::Ok },
            },
            spans,
        }
    }

    /// `count` traces started within the hour before `anchor`, newest first
    pub fn generate_many<R: Rng>(&self, count: usize, anchor: DateTime<Utc>, rng: &mut CosmeticRandom<R>) -> Vec<TraceDetail> {
        let mut traces: Vec<TraceDetail> = (0..count)
            .map(|_| {
                let start = anchor - Duration::seconds(rng.range(0, 3_600) as i64);
                self.generate(start, rng)
            })
            .collect();
        traces.sort_by(|a, b| b.summary.start_time.cmp(&a.summary.start_time));
        traces
    }
}

struct SpanSpec<'s> {
    parent: Option<&'s str>,
    leg: Option<CallLeg>,
    service: &'s str,
    operation: &'s str,
    start_offset_ms: u64,
    duration_ms: u64,
    tags: &'s [(&'s str, &'s str)],
}

struct SpanBuilder<'a> {
    trace_id: &'a str,
    spans: Vec<TraceSpan>,
    failing: Option<CallLeg>,
}

impl SpanBuilder<'_> {
    /// Append a span and return its id
    fn push<R: Rng>(&mut self, rng: &mut CosmeticRandom<R>, spec: SpanSpec<'_>) -> String {
        let span_id = format!("{:016x}", rng.rng_mut().gen::<u64>());
        let failed = spec.leg.is_some() && spec.leg == self.failing;

        self.spans.push(TraceSpan {
            trace_id: self.trace_id.to_string(),
            span_id: span_id.clone(),
            parent_span_id: spec.parent.map(str::to_string),
            service: spec.service.to_string(),
            operation: spec.operation.to_string(),
            start_offset_ms: spec.start_offset_ms,
            duration_ms: spec.duration_ms,
            status: if failed { SpanStatus::Error } else { SpanStatus::Ok },
            stack_trace: spec.leg.filter(|_| failed).map(|l| l.stack_trace().to_string()),
            tags: spec.tags.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        });
        span_id
    }
}

/// ERROR and WARN log records from the last hour before `anchor`, newest first
pub fn generate_abnormal_logs<R: Rng>(count: usize, anchor: DateTime<Utc>, rng: &mut CosmeticRandom<R>) -> Vec<LogEntry> {
    let mut logs: Vec<LogEntry> = (0..count)
        .map(|i| {
            let level = if rng.chance(0.45) { LogLevel::Error } else { LogLevel::Warn };
            let messages = match level {
                LogLevel::Error => &ERROR_MESSAGES,
                _ => &WARN_MESSAGES,
            };
            LogEntry {
                id: format!("log-{:06}", i + 1),
                timestamp: anchor - Duration::seconds(rng.range(0, 3_600) as i64),
                level,
                service: rng.pick(&LOG_SERVICES).copied().unwrap_or("api-gateway").to_string(),
                message: rng.pick(messages).copied().unwrap_or("Unexpected error").to_string(),
                trace_id: None,
            }
        })
        .collect();
    logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    logs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::tree::TraceTree;
    use chrono::TimeZone;

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_healthy_trace_has_no_errors() {
        let mut rng = CosmeticRandom::seeded(5);
        let trace = TraceGenerator::new(0.0).generate(anchor(), &mut rng);
        assert_eq!(trace.summary.error_count, 0);
        assert_eq!(trace.summary.status, TraceStatus::Ok);
        assert!(trace.spans.iter().all(|s| s.stack_trace.is_none()));
    }

    #[test]
    fn test_each_leg_fails_alone() {
        let generator = TraceGenerator::new(0.0);
        for leg in CallLeg::ALL {
            let mut rng = CosmeticRandom::seeded(11);
            let trace = generator.generate_with_failure(anchor(), Some(leg), &mut rng);

            let failed: Vec<&TraceSpan> = trace.spans.iter().filter(|s| s.status == SpanStatus::Error).collect();
            assert_eq!(failed.len(), 1);
            assert_eq!(failed[0].service, leg.service());
            assert!(failed[0].stack_trace.is_some());
            assert_eq!(trace.summary.error_count, 1);
            assert_eq!(trace.summary.status, TraceStatus::Error);
        }
    }

    #[test]
    fn test_tree_integrity_over_many_traces() {
        let mut rng = CosmeticRandom::seeded(99);
        let traces = TraceGenerator::new(0.5).generate_many(200, anchor(), &mut rng);
        assert_eq!(traces.len(), 200);

        for trace in &traces {
            let roots = trace.spans.iter().filter(|s| s.parent_span_id.is_none()).count();
            assert_eq!(roots, 1);

            let errors = trace.spans.iter().filter(|s| s.status == SpanStatus::Error).count();
            assert_eq!(trace.summary.error_count, errors);
            assert!(errors <= 1);

            let max_child = trace.spans.iter().filter(|s| !s.is_root()).map(|s| s.duration_ms).max().unwrap();
            assert!(trace.summary.duration_ms >= max_child);

            let tree = TraceTree::build(&trace.spans);
            assert_eq!(tree.critical_path_ms(), trace.summary.duration_ms);
            assert!(trace.spans.iter().all(|s| s.trace_id == trace.summary.trace_id));
        }

        for pair in traces.windows(2) {
            assert!(pair[0].summary.start_time >= pair[1].summary.start_time);
        }
    }

    #[test]
    fn test_abnormal_logs() {
        let mut rng = CosmeticRandom::seeded(4);
        let logs = generate_abnormal_logs(100, anchor(), &mut rng);
        assert_eq!(logs.len(), 100);
        assert!(logs.iter().all(|l| matches!(l.level, LogLevel::Error | LogLevel::Warn)));
        assert!(logs.iter().all(|l| l.trace_id.is_none()));
        assert!(logs.iter().all(|l| l.timestamp <= anchor()));
    }
}
