//! Application-root context
//!
//! Owns the session catalog and the unified data cache and hands both to
//! whatever composes the dashboard views.

use crate::catalog::{BusinessSystem, Catalog, CatalogGenerator, CatalogSummary};
use crate::config::DashboardConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::layout::{layout_assets, layout_systems, HoneycombCell, MatrixBubble};
use crate::random::CosmeticRandom;
use crate::trace::{load_snapshot, ObservabilitySnapshot};
use crate::unified::{UnifiedBusinessData, UnifiedDataBuilder, UnifiedDataStore};
use chrono::{DateTime, Utc};
use rand::Rng;
use std::sync::Arc;
use tracing::info;

pub struct Dashboard {
    config: DashboardConfig,
    catalog: Arc<Catalog>,
    store: UnifiedDataStore,
    anchor: DateTime<Utc>,
}

impl Dashboard {
    /// Generate the session catalog; "now" is fixed at construction time
    pub fn new(config: DashboardConfig) -> Self {
        Self::with_anchor(config, Utc::now())
    }

    pub fn with_anchor(config: DashboardConfig, anchor: DateTime<Utc>) -> Self {
        let catalog = CatalogGenerator::new(config.catalog.clone()).generate();
        Self::with_catalog(config, catalog, anchor)
    }

    pub fn with_catalog(config: DashboardConfig, catalog: Catalog, anchor: DateTime<Utc>) -> Self {
        let catalog = Arc::new(catalog);
        let builder = UnifiedDataBuilder::new(config.series.clone(), anchor);
        let store = UnifiedDataStore::new(Arc::clone(&catalog), builder);

        info!(
            name = %config.display_name,
            systems = catalog.len(),
            "dashboard context ready"
        );

        Dashboard {
            config,
            catalog,
            store,
            anchor,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn anchor(&self) -> DateTime<Utc> {
        self.anchor
    }

    pub fn summary(&self) -> CatalogSummary {
        self.catalog.summary()
    }

    pub fn system(&self, system_id: &str) -> DashboardResult<&BusinessSystem> {
        self.catalog
            .get(system_id)
            .ok_or_else(|| DashboardError::UnknownSystem(system_id.to_string()))
    }

    pub fn unified(&mut self, system_id: &str) -> Option<&UnifiedBusinessData> {
        self.store.get(system_id)
    }

    pub fn unified_store(&mut self) -> &mut UnifiedDataStore {
        &mut self.store
    }

    pub fn invalidate(&mut self) {
        self.store.invalidate();
    }

    pub fn matrix<R: Rng>(&self, rng: &mut CosmeticRandom<R>) -> DashboardResult<Vec<MatrixBubble>> {
        layout_systems(self.catalog.systems(), &self.config.matrix, rng)
    }

    pub fn honeycomb(&self, system_id: &str) -> DashboardResult<Vec<HoneycombCell>> {
        layout_assets(self.system(system_id)?, &self.config.honeycomb)
    }

    pub async fn observability(&self) -> ObservabilitySnapshot {
        load_snapshot(&self.config.trace, self.anchor).await
    }
}
