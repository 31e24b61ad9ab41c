//! Bizpulse
//!
//! Deterministic derived-metrics and layout engine behind the business-system
//! operations dashboard.
//!
//! # Components
//!
//! - [`metrics`]: identifier hashing, synthetic time series, health score, activity figures
//! - [`unified`]: per-system bundle of KPIs, alerts, vulnerabilities, topology and
//!   performance series, memoized in a [`UnifiedDataStore`]
//! - [`layout`]: department × importance bubble matrix and per-system asset honeycomb
//! - [`trace`]: abnormal-log / trace correlation and call-tree generation
//!
//! ## Example Usage
//!
//! ```rust
//! use bizpulse::{Dashboard, DashboardConfig, CosmeticRandom};
//!
//! let mut dashboard = Dashboard::new(DashboardConfig::default());
//!
//! // Unified data is built for every system on first lookup
//! let data = dashboard.unified("SYS-001").unwrap();
//! assert_eq!(data.monitoring.alerts.len(), data.system.counters.alert_count as usize);
//!
//! // Unknown systems are not an error at this boundary
//! assert!(dashboard.unified("SYS-404").is_none());
//!
//! // Lay out the matrix view
//! let bubbles = dashboard.matrix(&mut CosmeticRandom::new()).unwrap();
//! assert_eq!(bubbles.len(), dashboard.catalog().len());
//! ```

#![warn(clippy::all)]

pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod layout;
pub mod metrics;
pub mod random;
pub mod trace;
pub mod unified;

// Re-export main types for convenience
pub use catalog::{Asset, BusinessSystem, Catalog, CatalogConfig, CatalogGenerator, HealthStatus, ImportanceLevel, MetricCounters};
pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use error::{DashboardError, DashboardResult};
pub use layout::{HoneycombCell, MatrixBubble};
pub use metrics::{compute_health_score, generate_series, hash_id, HealthBreakdown, SeriesPoint};
pub use random::{CosmeticRandom, DeterministicSeeded};
pub use trace::{LogCorrelator, ObservabilitySnapshot, TraceConfig, TraceDetail, TraceGenerator, TraceTree};
pub use unified::{UnifiedBusinessData, UnifiedDataBuilder, UnifiedDataStore};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the crate version
pub fn version() -> &'static str {
    VERSION
}
