//! Business-system catalog
//!
//! The catalog is the raw input of the engine: systems, their assets and the
//! counters every derived metric starts from.

pub mod generator;
pub mod types;

pub use generator::{CatalogConfig, CatalogGenerator, DEPARTMENTS};
pub use types::{Asset, BusinessSystem, HealthStatus, ImportanceLevel, MetricCounters};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An immutable set of business systems for one session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    systems: Vec<BusinessSystem>,
}

impl Catalog {
    pub fn new(systems: Vec<BusinessSystem>) -> Self {
        Self { systems }
    }

    pub fn systems(&self) -> &[BusinessSystem] {
        &self.systems
    }

    pub fn get(&self, system_id: &str) -> Option<&BusinessSystem> {
        self.systems.iter().find(|s| s.id == system_id)
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Department names, sorted
    pub fn departments(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.systems.iter().map(|s| s.department.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    pub fn summary(&self) -> CatalogSummary {
        let mut summary = CatalogSummary {
            total_systems: self.systems.len(),
            ..Default::default()
        };
        for status in HealthStatus::ALL {
            summary.by_health.insert(status, 0);
        }
        for level in ImportanceLevel::ALL {
            summary.by_importance.insert(level, 0);
        }

        for system in &self.systems {
            summary.total_assets += system.assets.len();
            *summary.by_health.entry(system.health_status).or_insert(0) += 1;
            *summary.by_importance.entry(system.importance).or_insert(0) += 1;
            *summary.by_department.entry(system.department.clone()).or_insert(0) += 1;
        }
        summary.by_department.sort_keys();
        summary
    }
}

/// Aggregate counts over a catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    pub total_systems: usize,
    pub total_assets: usize,
    pub by_health: IndexMap<HealthStatus, usize>,
    pub by_importance: IndexMap<ImportanceLevel, usize>,
    pub by_department: IndexMap<String, usize>,
}
