//! Memoized unified data, owned by the dashboard context
//!
//! The first lookup builds bundles for every system of the catalog in one
//! pass; later lookups are hash-map hits until [`UnifiedDataStore::invalidate`].

use super::builder::{UnifiedBusinessData, UnifiedDataBuilder};
use crate::catalog::{BusinessSystem, Catalog};
use crate::error::{DashboardError, DashboardResult};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

pub struct UnifiedDataStore {
    catalog: Arc<Catalog>,
    builder: UnifiedDataBuilder,
    cache: Option<FxHashMap<String, UnifiedBusinessData>>,
}

impl UnifiedDataStore {
    pub fn new(catalog: Arc<Catalog>, builder: UnifiedDataBuilder) -> Self {
        Self {
            catalog,
            builder,
            cache: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Whether the cache currently holds built bundles
    pub fn is_warm(&self) -> bool {
        self.cache.is_some()
    }

    /// Drop every cached bundle; the next lookup rebuilds from scratch
    pub fn invalidate(&mut self) {
        if self.cache.take().is_some() {
            info!("unified business data cache invalidated");
        }
    }

    fn ensure_built(&mut self) -> &FxHashMap<String, UnifiedBusinessData> {
        if self.cache.is_none() {
            let started = Instant::now();
            let systems = self.catalog.systems();
            let mut map = FxHashMap::with_capacity_and_hasher(systems.len(), Default::default());
            for system in systems {
                map.insert(system.id.clone(), self.builder.build(system));
            }
            info!(
                systems = map.len(),
                elapsed_us = started.elapsed().as_micros() as u64,
                "built unified business data"
            );
            self.cache = Some(map);
        }
        // Populated just above
        self.cache.get_or_insert_with(FxHashMap::default)
    }

    /// Bundle for `system_id`, or `None` for an unknown system
    pub fn get(&mut self, system_id: &str) -> Option<&UnifiedBusinessData> {
        let found = self.ensure_built().get(system_id);
        if found.is_none() {
            debug!(system_id, "unified data requested for unknown system");
        }
        found
    }

    /// Like [`get`](Self::get) but reports an unknown system as an error
    pub fn require(&mut self, system_id: &str) -> DashboardResult<&UnifiedBusinessData> {
        self.get(system_id)
            .ok_or_else(|| DashboardError::UnknownSystem(system_id.to_string()))
    }

    /// Bundle for `system_id`, falling back to a placeholder bundle
    pub fn get_or_default(&mut self, system_id: &str) -> UnifiedBusinessData {
        match self.get(system_id) {
            Some(data) => data.clone(),
            None => self.builder.build(&BusinessSystem::placeholder(system_id)),
        }
    }

    /// All bundles in catalog order
    pub fn all(&mut self) -> Vec<&UnifiedBusinessData> {
        let catalog = Arc::clone(&self.catalog);
        let cache = self.ensure_built();
        catalog
            .systems()
            .iter()
            .filter_map(|s| cache.get(&s.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogConfig, CatalogGenerator};
    use crate::metrics::SeriesConfig;
    use chrono::{TimeZone, Utc};

    fn store() -> UnifiedDataStore {
        let catalog = Arc::new(CatalogGenerator::new(CatalogConfig::default()).generate());
        let anchor = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        UnifiedDataStore::new(catalog, UnifiedDataBuilder::new(SeriesConfig::default(), anchor))
    }

    #[test]
    fn test_lazy_build_covers_all_systems() {
        let mut store = store();
        assert!(!store.is_warm());
        assert!(store.get("SYS-001").is_some());
        assert!(store.is_warm());
        assert_eq!(store.all().len(), store.catalog().len());
    }

    #[test]
    fn test_unknown_system() {
        let mut store = store();
        assert!(store.get("SYS-404").is_none());
        assert!(matches!(
            store.require("SYS-404"),
            Err(DashboardError::UnknownSystem(id)) if id == "SYS-404"
        ));

        let fallback = store.get_or_default("SYS-404");
        assert_eq!(fallback.system.id, "SYS-404");
        assert!(fallback.monitoring.alerts.is_empty());
    }

    #[test]
    fn test_invalidate_rebuilds_identically() {
        let mut store = store();
        let before = store.get("SYS-003").cloned();
        store.invalidate();
        assert!(!store.is_warm());
        let after = store.get("SYS-003").cloned();
        assert!(before.is_some());
        assert_eq!(before, after);
    }
}
