//! Builds the unified monitoring bundle for one business system

use super::records::{synthesize_alerts, synthesize_vulnerabilities, Alert, Vulnerability};
use super::topology::TopologyGraph;
use crate::catalog::{BusinessSystem, HealthStatus};
use crate::metrics::activity::{activity_for, ActivityFigures};
use crate::metrics::hash::seed_of;
use crate::metrics::health::{compute_health_score, HealthBreakdown};
use crate::metrics::series::{generate_series, SeriesConfig, SeriesPoint, TimeWindow};
use crate::random::DeterministicSeeded;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Seed shift per performance series, in field order
pub const SERIES_SEED_OFFSETS: [u64; 6] = [0, 100, 200, 300, 400, 500];

/// Headline numbers for a system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    pub health_score: u8,
    pub health_status: HealthStatus,
    pub penalties: HealthBreakdown,
    pub availability: f64,
    pub response_time: f64,
    pub error_rate: f64,
    /// Requests per minute
    pub throughput: f64,
    pub asset_count: u32,
    pub alert_count: u32,
    pub vulnerability_count: u32,
    pub activity: ActivityFigures,
}

/// Six correlated but distinct series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSeries {
    pub cpu_usage: Vec<SeriesPoint>,
    pub memory_usage: Vec<SeriesPoint>,
    pub response_time: Vec<SeriesPoint>,
    pub error_rate: Vec<SeriesPoint>,
    pub throughput: Vec<SeriesPoint>,
    pub network_traffic: Vec<SeriesPoint>,
}

impl PerformanceSeries {
    /// `(name, series)` pairs in seed-offset order
    pub fn named(&self) -> [(&'static str, &[SeriesPoint]); 6] {
        [
            ("cpuUsage", self.cpu_usage.as_slice()),
            ("memoryUsage", self.memory_usage.as_slice()),
            ("responseTime", self.response_time.as_slice()),
            ("errorRate", self.error_rate.as_slice()),
            ("throughput", self.throughput.as_slice()),
            ("networkTraffic", self.network_traffic.as_slice()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monitoring {
    pub kpis: Kpis,
    pub alerts: Vec<Alert>,
    pub vulnerabilities: Vec<Vulnerability>,
    pub topology: TopologyGraph,
    pub performance: PerformanceSeries,
}

/// A system together with everything derived from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedBusinessData {
    pub system: BusinessSystem,
    pub monitoring: Monitoring,
}

/// Derives [`UnifiedBusinessData`] from catalog entries.
///
/// The anchor fixes "now" for every timestamp so that rebuilding produces
/// bit-identical bundles.
#[derive(Debug, Clone)]
pub struct UnifiedDataBuilder {
    series: SeriesConfig,
    anchor: DateTime<Utc>,
}

impl UnifiedDataBuilder {
    pub fn new(series: SeriesConfig, anchor: DateTime<Utc>) -> Self {
        Self { series, anchor }
    }

    pub fn anchor(&self) -> DateTime<Utc> {
        self.anchor
    }

    pub fn build(&self, system: &BusinessSystem) -> UnifiedBusinessData {
        let seeded = DeterministicSeeded::from_id(&system.id);
        let c = &system.counters;

        let health_score = compute_health_score(c);
        let throughput = (seeded.range(17, 200.0, 2_000.0)).round();

        let kpis = Kpis {
            health_score,
            health_status: system.health_status,
            penalties: HealthBreakdown::from_counters(c),
            availability: c.availability,
            response_time: c.response_time,
            error_rate: c.error_rate,
            throughput,
            asset_count: system.asset_count,
            alert_count: c.alert_count,
            vulnerability_count: c.vulnerability_count,
            activity: activity_for(&system.id),
        };

        let monitoring = Monitoring {
            alerts: synthesize_alerts(system, self.anchor),
            vulnerabilities: synthesize_vulnerabilities(system, self.anchor),
            topology: TopologyGraph::from_assets(&system.assets, seeded.offset(3_000)),
            performance: self.performance(system, seeded, throughput),
            kpis,
        };

        UnifiedBusinessData {
            system: system.clone(),
            monitoring,
        }
    }

    fn performance(&self, system: &BusinessSystem, seeded: DeterministicSeeded, throughput: f64) -> PerformanceSeries {
        let base_seed = seed_of(&system.id);
        let window = TimeWindow::last_hours(self.anchor, self.series.window_hours);
        let points = self.series.points;
        let c = &system.counters;

        let cpu_base = seeded.range(11, 20.0, 70.0);
        let memory_base = seeded.range(12, 30.0, 80.0);
        let network_base = seeded.range(13, 50.0, 250.0);

        let series = |slot: usize, base: f64, variance: f64| {
            generate_series(points, base, variance, base_seed + SERIES_SEED_OFFSETS[slot], &window)
        };

        PerformanceSeries {
            cpu_usage: series(0, cpu_base, 10.0),
            memory_usage: series(1, memory_base, 8.0),
            response_time: series(2, c.response_time, (c.response_time * 0.2).max(5.0)),
            error_rate: series(3, c.error_rate, (c.error_rate * 0.5).max(0.1)),
            throughput: series(4, throughput, throughput * 0.15),
            network_traffic: series(5, network_base, 20.0),
        }
    }
}
