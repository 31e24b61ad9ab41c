//! Unified business data
//!
//! Combines the catalog with the derived metrics into one cached bundle per system:
//! KPIs, alerts, vulnerabilities, topology and performance series.

pub mod builder;
pub mod records;
pub mod store;
pub mod topology;

pub use builder::{Kpis, Monitoring, PerformanceSeries, UnifiedBusinessData, UnifiedDataBuilder, SERIES_SEED_OFFSETS};
pub use records::{
    Alert, AlertLevel, AlertStatus, AssetRef, Cyclic, RoundRobin, Severity, Vulnerability, VulnerabilityStatus,
};
pub use store::UnifiedDataStore;
pub use topology::{TopologyGraph, TopologyLink, TopologyNode, TopologyNodeKind, MAX_TOPOLOGY_NODES};
