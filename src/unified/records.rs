//! Synthetic alert and vulnerability records
//!
//! Levels, severities, statuses and titles are assigned by explicit round-robin
//! cycles over fixed orders, and affected assets cycle through the owning
//! system's asset list.

use crate::catalog::{Asset, BusinessSystem};
use crate::random::DeterministicSeeded;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Endless round-robin over a slice; yields nothing for an empty slice
#[derive(Debug, Clone)]
pub struct RoundRobin<'a, T> {
    items: &'a [T],
    position: usize,
}

impl<'a, T> RoundRobin<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        Self { items, position: 0 }
    }
}

impl<'a, T> Iterator for RoundRobin<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.items.is_empty() {
            return None;
        }
        let item = &self.items[self.position % self.items.len()];
        self.position += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.items.is_empty() {
            (0, Some(0))
        } else {
            (usize::MAX, None)
        }
    }
}

/// Enumerations with a fixed cycling order
pub trait Cyclic: Copy + 'static {
    const ORDER: &'static [Self];

    fn cycle() -> std::iter::Copied<RoundRobin<'static, Self>> {
        RoundRobin::new(Self::ORDER).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Critical,
    Major,
    Minor,
    Warning,
}

impl Cyclic for AlertLevel {
    const ORDER: &'static [Self] = &[AlertLevel::Critical, AlertLevel::Major, AlertLevel::Minor, AlertLevel::Warning];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Active,
    Acknowledged,
    Resolved,
}

impl Cyclic for AlertStatus {
    const ORDER: &'static [Self] = &[AlertStatus::Active, AlertStatus::Acknowledged, AlertStatus::Resolved];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// CVSS v3 band `[lo, hi]` for the severity
    pub fn cvss_band(self) -> (f64, f64) {
        match self {
            Severity::Critical => (9.0, 10.0),
            Severity::High => (7.0, 8.9),
            Severity::Medium => (4.0, 6.9),
            Severity::Low => (0.1, 3.9),
        }
    }
}

impl Cyclic for Severity {
    const ORDER: &'static [Self] = &[Severity::Critical, Severity::High, Severity::Medium, Severity::Low];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VulnerabilityStatus {
    Open,
    InProgress,
    Fixed,
}

impl Cyclic for VulnerabilityStatus {
    const ORDER: &'static [Self] = &[VulnerabilityStatus::Open, VulnerabilityStatus::InProgress, VulnerabilityStatus::Fixed];
}

const ALERT_TITLES: [&str; 6] = [
    "CPU usage above threshold",
    "Response time degraded",
    "Error rate spike",
    "Disk space running low",
    "Connection pool exhausted",
    "Certificate expiring soon",
];

const VULNERABILITY_TITLES: [&str; 6] = [
    "Outdated OpenSSL library",
    "SQL injection in search endpoint",
    "Weak TLS cipher suites enabled",
    "Default administrator credentials",
    "Unpatched kernel privilege escalation",
    "Directory listing enabled",
];

/// Reference to an asset of the owning system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRef {
    pub id: String,
    pub name: String,
}

impl From<&Asset> for AssetRef {
    fn from(asset: &Asset) -> Self {
        AssetRef {
            id: asset.id.clone(),
            name: asset.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub system_id: String,
    pub level: AlertLevel,
    pub status: AlertStatus,
    pub title: String,
    pub description: String,
    /// `None` only when the system owns no assets
    pub affected_asset: Option<AssetRef>,
    pub triggered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vulnerability {
    pub id: String,
    pub system_id: String,
    pub cve_id: String,
    pub severity: Severity,
    pub status: VulnerabilityStatus,
    pub title: String,
    pub cvss_score: f64,
    pub affected_asset: Option<AssetRef>,
    pub discovered_at: DateTime<Utc>,
}

/// Exactly `system.counters.alert_count` alerts
pub fn synthesize_alerts(system: &BusinessSystem, anchor: DateTime<Utc>) -> Vec<Alert> {
    let seeded = DeterministicSeeded::from_id(&system.id).offset(1_000);
    let mut assets = RoundRobin::new(&system.assets);
    let mut titles = RoundRobin::new(&ALERT_TITLES);

    AlertLevel::cycle()
        .zip(AlertStatus::cycle())
        .take(system.counters.alert_count as usize)
        .enumerate()
        .map(|(i, (level, status))| {
            let asset = assets.next().map(AssetRef::from);
            let title = titles.next().copied().unwrap_or(ALERT_TITLES[0]);
            let target = asset.as_ref().map_or(system.name.as_str(), |a| a.name.as_str());

            Alert {
                id: format!("{}-ALERT-{:03}", system.id, i + 1),
                system_id: system.id.clone(),
                level,
                status,
                title: title.to_string(),
                description: format!("{} on {}", title, target),
                affected_asset: asset,
                triggered_at: anchor - Duration::minutes(seeded.int_range(i as u64, 1, 24 * 60) as i64),
            }
        })
        .collect()
}

/// Exactly `system.counters.vulnerability_count` vulnerabilities
pub fn synthesize_vulnerabilities(system: &BusinessSystem, anchor: DateTime<Utc>) -> Vec<Vulnerability> {
    let seeded = DeterministicSeeded::from_id(&system.id).offset(2_000);
    let mut assets = RoundRobin::new(&system.assets);
    let mut titles = RoundRobin::new(&VULNERABILITY_TITLES);

    Severity::cycle()
        .zip(VulnerabilityStatus::cycle())
        .take(system.counters.vulnerability_count as usize)
        .enumerate()
        .map(|(i, (severity, status))| {
            let idx = i as u64 * 4;
            let (lo, hi) = severity.cvss_band();
            let cvss_score = (seeded.range(idx, lo, hi) * 10.0).round() / 10.0;
            let year = 2020 + seeded.int_range(idx + 1, 0, 4);
            let number = seeded.int_range(idx + 2, 1_000, 49_999);

            Vulnerability {
                id: format!("{}-VULN-{:03}", system.id, i + 1),
                system_id: system.id.clone(),
                cve_id: format!("CVE-{}-{}", year, number),
                severity,
                status,
                title: titles.next().copied().unwrap_or(VULNERABILITY_TITLES[0]).to_string(),
                cvss_score,
                affected_asset: assets.next().map(AssetRef::from),
                discovered_at: anchor - Duration::days(seeded.int_range(idx + 3, 1, 90) as i64),
            }
        })
        .collect()
}
