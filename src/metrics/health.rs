//! Health score calculator
//!
//! Starts at 100 and deducts one penalty per raw counter. Every penalty except
//! availability is capped; the availability penalty grows without bound below
//! 99% and the final score is clamped into `[0, 100]`.

use crate::catalog::MetricCounters;
use serde::{Deserialize, Serialize};

const ERROR_RATE_CAP: f64 = 20.0;
const RESPONSE_TIME_FLOOR_MS: f64 = 200.0;
const RESPONSE_TIME_CAP: f64 = 20.0;
const AVAILABILITY_FLOOR: f64 = 99.0;
const ALERT_CAP: f64 = 10.0;
const VULNERABILITY_CAP: f64 = 15.0;

/// Individual penalty terms of a health score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthBreakdown {
    pub error_rate: f64,
    pub response_time: f64,
    pub availability: f64,
    pub alerts: f64,
    pub vulnerabilities: f64,
}

impl HealthBreakdown {
    pub fn from_counters(c: &MetricCounters) -> Self {
        let error_rate = ((c.error_rate / 0.5) * 2.0).min(ERROR_RATE_CAP);

        let response_time = if c.response_time > RESPONSE_TIME_FLOOR_MS {
            (((c.response_time - RESPONSE_TIME_FLOOR_MS) / 100.0) * 5.0).min(RESPONSE_TIME_CAP)
        } else {
            0.0
        };

        // Uncapped on purpose: a system at 80% availability scores 0
        let availability = if c.availability < AVAILABILITY_FLOOR {
            (AVAILABILITY_FLOOR - c.availability) * 10.0
        } else {
            0.0
        };

        let alerts = (c.alert_count as f64 * 2.0).min(ALERT_CAP);
        let vulnerabilities = (c.vulnerability_count as f64 * 3.0).min(VULNERABILITY_CAP);

        HealthBreakdown {
            error_rate,
            response_time,
            availability,
            alerts,
            vulnerabilities,
        }
    }

    pub fn total(&self) -> f64 {
        self.error_rate + self.response_time + self.availability + self.alerts + self.vulnerabilities
    }

    pub fn score(&self) -> u8 {
        let raw = 100.0 - self.total();
        if raw.is_nan() {
            return 0;
        }
        raw.clamp(0.0, 100.0).round() as u8
    }
}

/// Health score in `[0, 100]`
pub fn compute_health_score(counters: &MetricCounters) -> u8 {
    HealthBreakdown::from_counters(counters).score()
}
