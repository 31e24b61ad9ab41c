//! Catalog data model

use crate::metrics::health::compute_health_score;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Business importance of a system, most important first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportanceLevel {
    Critical,
    High,
    Medium,
    Low,
}

impl ImportanceLevel {
    /// Top-to-bottom row order of the matrix
    pub const ALL: [ImportanceLevel; 4] = [
        ImportanceLevel::Critical,
        ImportanceLevel::High,
        ImportanceLevel::Medium,
        ImportanceLevel::Low,
    ];

    pub fn rank(self) -> usize {
        match self {
            ImportanceLevel::Critical => 0,
            ImportanceLevel::High => 1,
            ImportanceLevel::Medium => 2,
            ImportanceLevel::Low => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ImportanceLevel::Critical => "CRITICAL",
            ImportanceLevel::High => "HIGH",
            ImportanceLevel::Medium => "MEDIUM",
            ImportanceLevel::Low => "LOW",
        }
    }
}

impl fmt::Display for ImportanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived health of a system or asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
    Unknown,
}

impl HealthStatus {
    pub const ALL: [HealthStatus; 4] = [
        HealthStatus::Healthy,
        HealthStatus::Warning,
        HealthStatus::Critical,
        HealthStatus::Unknown,
    ];

    /// >= 80 healthy, >= 60 warning, otherwise critical
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => HealthStatus::Healthy,
            60..=79 => HealthStatus::Warning,
            _ => HealthStatus::Critical,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HealthStatus::Healthy => "HEALTHY",
            HealthStatus::Warning => "WARNING",
            HealthStatus::Critical => "CRITICAL",
            HealthStatus::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw counters shared by systems and assets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricCounters {
    /// Percent of failed requests
    pub error_rate: f64,
    /// Milliseconds
    pub response_time: f64,
    /// Percent
    pub availability: f64,
    pub alert_count: u32,
    pub vulnerability_count: u32,
}

/// An IT asset owned by exactly one business system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub system_id: String,
    /// Free-form type, e.g. `server`, `database`, `middleware`, `application-service`
    #[serde(rename = "type")]
    pub asset_type: String,
    pub health_status: HealthStatus,
    pub importance: ImportanceLevel,
    #[serde(flatten)]
    pub metrics: MetricCounters,
}

impl Asset {
    pub fn health_score(&self) -> u8 {
        compute_health_score(&self.metrics)
    }
}

/// A government business system and the assets it owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessSystem {
    pub id: String,
    pub name: String,
    pub department: String,
    pub department_id: String,
    pub importance: ImportanceLevel,
    pub asset_count: u32,
    #[serde(flatten)]
    pub counters: MetricCounters,
    pub health_status: HealthStatus,
    pub assets: Vec<Asset>,
}

impl BusinessSystem {
    pub fn health_score(&self) -> u8 {
        compute_health_score(&self.counters)
    }

    /// Stand-in for a system the catalog does not know about
    pub fn placeholder(system_id: &str) -> Self {
        BusinessSystem {
            id: system_id.to_string(),
            name: "Unknown system".to_string(),
            department: "Unassigned".to_string(),
            department_id: "D00".to_string(),
            importance: ImportanceLevel::Low,
            asset_count: 0,
            counters: MetricCounters {
                availability: 100.0,
                ..Default::default()
            },
            health_status: HealthStatus::Unknown,
            assets: Vec::new(),
        }
    }
}
