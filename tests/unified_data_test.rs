use bizpulse::catalog::{CatalogConfig, CatalogGenerator};
use bizpulse::{BusinessSystem, Dashboard, DashboardConfig, DashboardError, UnifiedDataBuilder, UnifiedDataStore};
use chrono::{TimeZone, Utc};
use std::sync::Arc;

fn dashboard() -> Dashboard {
    let anchor = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    Dashboard::with_anchor(DashboardConfig::default(), anchor)
}

#[test]
fn test_build_is_deterministic_across_invalidate() {
    let mut dashboard = dashboard();
    let ids: Vec<String> = dashboard.catalog().systems().iter().map(|s| s.id.clone()).collect();

    let before: Vec<_> = ids.iter().map(|id| dashboard.unified(id).cloned().unwrap()).collect();
    dashboard.invalidate();
    assert!(!dashboard.unified_store().is_warm());
    let after: Vec<_> = ids.iter().map(|id| dashboard.unified(id).cloned().unwrap()).collect();

    assert_eq!(before, after);
}

#[test]
fn test_independent_stores_agree() {
    let anchor = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let catalog = Arc::new(CatalogGenerator::new(CatalogConfig::default()).generate());

    let mut a = UnifiedDataStore::new(Arc::clone(&catalog), UnifiedDataBuilder::new(Default::default(), anchor));
    let mut b = UnifiedDataStore::new(Arc::clone(&catalog), UnifiedDataBuilder::new(Default::default(), anchor));

    for system in catalog.systems() {
        assert_eq!(a.get(&system.id), b.get(&system.id));
    }
}

#[test]
fn test_first_lookup_warms_every_system() {
    let mut dashboard = dashboard();
    assert!(!dashboard.unified_store().is_warm());

    let first = dashboard.catalog().systems()[0].id.clone();
    assert!(dashboard.unified(&first).is_some());
    assert!(dashboard.unified_store().is_warm());
    let expected = dashboard.catalog().len();
    let built = dashboard.unified_store().all().len();
    assert_eq!(built, expected);
}

#[test]
fn test_record_cardinality_matches_counters() {
    let mut dashboard = dashboard();
    for data in dashboard.unified_store().all() {
        let counters = &data.system.counters;
        assert_eq!(data.monitoring.alerts.len(), counters.alert_count as usize, "{}", data.system.id);
        assert_eq!(
            data.monitoring.vulnerabilities.len(),
            counters.vulnerability_count as usize,
            "{}",
            data.system.id
        );
    }
}

#[test]
fn test_affected_assets_belong_to_system() {
    let mut dashboard = dashboard();
    for data in dashboard.unified_store().all() {
        let owns = |id: &str| data.system.assets.iter().any(|a| a.id == id);
        for alert in &data.monitoring.alerts {
            if let Some(asset) = &alert.affected_asset {
                assert!(owns(&asset.id));
            }
        }
        for vuln in &data.monitoring.vulnerabilities {
            if let Some(asset) = &vuln.affected_asset {
                assert!(owns(&asset.id));
            }
        }
    }
}

#[test]
fn test_topology_shape() {
    let mut dashboard = dashboard();
    for data in dashboard.unified_store().all() {
        let topology = &data.monitoring.topology;
        let expected_nodes = data.system.assets.len().min(10);
        assert_eq!(topology.nodes.len(), expected_nodes);
        assert_eq!(topology.links.len(), expected_nodes / 2);
        for link in &topology.links {
            assert!(topology.node(&link.source).is_some());
            assert!(topology.node(&link.target).is_some());
        }
    }
}

#[test]
fn test_kpis_follow_health_score() {
    let mut dashboard = dashboard();
    for data in dashboard.unified_store().all() {
        let kpis = &data.monitoring.kpis;
        assert_eq!(kpis.health_score, data.system.health_score());
        assert!(kpis.health_score <= 100);
        assert_eq!(kpis.alert_count, data.system.counters.alert_count);
    }
}

#[test]
fn test_performance_series_are_distinct() {
    let mut dashboard = dashboard();
    let data = dashboard.unified("SYS-001").unwrap();
    let named = data.monitoring.performance.named();

    for (name, series) in named.iter() {
        assert_eq!(series.len(), 24, "{}", name);
        assert!(series.iter().all(|p| p.value >= 0.0), "{}", name);
    }
    assert_ne!(named[0].1, named[1].1);
}

#[test]
fn test_unknown_system() {
    let mut dashboard = dashboard();
    assert!(dashboard.unified("SYS-404").is_none());

    let fallback = dashboard.unified_store().get_or_default("SYS-404");
    assert_eq!(fallback.system, BusinessSystem::placeholder("SYS-404"));
    assert!(fallback.monitoring.alerts.is_empty());

    let err = dashboard.unified_store().require("SYS-404").unwrap_err();
    assert!(matches!(err, DashboardError::UnknownSystem(ref id) if id == "SYS-404"));
    assert_eq!(err.to_string(), "Business system SYS-404 not found");
}

#[test]
fn test_oversized_series_window_does_not_panic() {
    let anchor = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let catalog = Arc::new(CatalogGenerator::new(CatalogConfig::default()).generate());
    let series = bizpulse::metrics::SeriesConfig {
        points: 24,
        window_hours: 10_000_000_000,
    };
    let mut store = UnifiedDataStore::new(catalog, UnifiedDataBuilder::new(series, anchor));

    let data = store.get("SYS-001").unwrap();
    let cpu = &data.monitoring.performance.cpu_usage;
    assert_eq!(cpu.len(), 24);
    assert_eq!(cpu[23].timestamp, anchor);
}
