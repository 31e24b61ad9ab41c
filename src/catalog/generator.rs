//! Seed-driven mock catalog generator
//!
//! Produces the session catalog without a backend. The same config always
//! yields the same catalog.

use super::types::{Asset, BusinessSystem, HealthStatus, ImportanceLevel, MetricCounters};
use super::Catalog;
use crate::metrics::health::compute_health_score;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// `(department id, department name)`
pub const DEPARTMENTS: [(&str, &str); 8] = [
    ("D01", "Public Security Bureau"),
    ("D02", "Finance Bureau"),
    ("D03", "Health Commission"),
    ("D04", "Education Bureau"),
    ("D05", "Transport Bureau"),
    ("D06", "Civil Affairs Bureau"),
    ("D07", "Natural Resources Bureau"),
    ("D08", "Market Regulation Bureau"),
];

const SYSTEM_KINDS: [&str; 10] = [
    "Data Exchange Platform",
    "Case Management System",
    "Online Service Portal",
    "Payment Gateway",
    "Records Archive",
    "Approval Workflow",
    "Monitoring Center",
    "Citizen Hotline",
    "Licensing System",
    "Statistics Warehouse",
];

/// `(asset type, name prefix)`
const ASSET_TYPES: [(&str, &str); 8] = [
    ("server", "srv"),
    ("database", "db"),
    ("network-device", "net"),
    ("storage-device", "sto"),
    ("security-device", "fw"),
    ("middleware", "mw"),
    ("application-service", "app"),
    ("application-service", "api"),
];

/// Catalog generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub system_count: usize,
    pub seed: u64,
    /// Upper bound of assets per system (lower bound is 3)
    pub max_assets_per_system: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            system_count: 24,
            seed: 20240601,
            max_assets_per_system: 36,
        }
    }
}

pub struct CatalogGenerator {
    config: CatalogConfig,
}

impl CatalogGenerator {
    pub fn new(config: CatalogConfig) -> Self {
        Self { config }
    }

    pub fn generate(&self) -> Catalog {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let systems: Vec<BusinessSystem> = (0..self.config.system_count)
            .map(|i| self.generate_system(&mut rng, i))
            .collect();

        debug!(
            systems = systems.len(),
            seed = self.config.seed,
            "generated business-system catalog"
        );
        Catalog::new(systems)
    }

    fn generate_system(&self, rng: &mut StdRng, index: usize) -> BusinessSystem {
        let (department_id, department) = DEPARTMENTS[rng.gen_range(0..DEPARTMENTS.len())];
        let kind = SYSTEM_KINDS[rng.gen_range(0..SYSTEM_KINDS.len())];
        let id = format!("SYS-{:03}", index + 1);

        let importance = match rng.gen_range(0..10) {
            0..=1 => ImportanceLevel::Critical,
            2..=4 => ImportanceLevel::High,
            5..=7 => ImportanceLevel::Medium,
            _ => ImportanceLevel::Low,
        };

        let counters = random_counters(rng);
        let health_status = HealthStatus::from_score(compute_health_score(&counters));

        let max_assets = self.config.max_assets_per_system.max(3);
        let asset_count = rng.gen_range(3..=max_assets);
        let assets = (0..asset_count)
            .map(|j| generate_asset(rng, &id, j, importance, &counters))
            .collect();

        BusinessSystem {
            name: format!("{} {}", department.trim_end_matches(" Bureau"), kind),
            id,
            department: department.to_string(),
            department_id: department_id.to_string(),
            importance,
            asset_count: asset_count as u32,
            counters,
            health_status,
            assets,
        }
    }
}

fn round_to(v: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (v * factor).round() / factor
}

/// Mostly healthy, some degraded, a few failing
fn random_counters(rng: &mut StdRng) -> MetricCounters {
    let tier = rng.gen_range(0..10);
    let (error_rate, response_time, availability, alerts, vulns) = match tier {
        0..=6 => (
            rng.gen_range(0.0..1.0),
            rng.gen_range(40.0..260.0),
            rng.gen_range(99.3..99.99),
            rng.gen_range(0..=3),
            rng.gen_range(0..=2),
        ),
        7..=8 => (
            rng.gen_range(1.0..3.0),
            rng.gen_range(200.0..600.0),
            rng.gen_range(98.0..99.5),
            rng.gen_range(2..=8),
            rng.gen_range(1..=5),
        ),
        _ => (
            rng.gen_range(3.0..8.0),
            rng.gen_range(500.0..1500.0),
            rng.gen_range(94.0..98.5),
            rng.gen_range(6..=15),
            rng.gen_range(3..=12),
        ),
    };

    MetricCounters {
        error_rate: round_to(error_rate, 2),
        response_time: round_to(response_time, 0),
        availability: round_to(availability, 2),
        alert_count: alerts,
        vulnerability_count: vulns,
    }
}

fn generate_asset(
    rng: &mut StdRng,
    system_id: &str,
    index: usize,
    importance: ImportanceLevel,
    system: &MetricCounters,
) -> Asset {
    let (asset_type, prefix) = ASSET_TYPES[rng.gen_range(0..ASSET_TYPES.len())];

    let metrics = MetricCounters {
        error_rate: round_to(system.error_rate * rng.gen_range(0.5..1.5), 2),
        response_time: round_to(system.response_time * rng.gen_range(0.6..1.4), 0),
        availability: round_to((system.availability + rng.gen_range(-0.5..0.3)).min(100.0), 2),
        alert_count: rng.gen_range(0..=system.alert_count.min(4)),
        vulnerability_count: rng.gen_range(0..=system.vulnerability_count.min(3)),
    };

    // A few assets stop reporting
    let health_status = if rng.gen_bool(0.05) {
        HealthStatus::Unknown
    } else {
        HealthStatus::from_score(compute_health_score(&metrics))
    };

    Asset {
        id: format!("{}-AST-{:03}", system_id, index + 1),
        name: format!("{}-{:02}", prefix, index + 1),
        system_id: system_id.to_string(),
        asset_type: asset_type.to_string(),
        health_status,
        importance,
        metrics,
    }
}
