//! Dashboard configuration
//!
//! Every section has defaults; a YAML file only needs the keys it overrides.

use crate::catalog::CatalogConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::layout::{HoneycombConfig, MatrixConfig};
use crate::metrics::SeriesConfig;
use crate::trace::TraceConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Longest series window accepted from configuration (100 years)
pub const MAX_WINDOW_HOURS: i64 = 100 * 365 * 24;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Title shown in the dashboard header
    pub display_name: String,
    pub catalog: CatalogConfig,
    pub series: SeriesConfig,
    pub matrix: MatrixConfig,
    pub honeycomb: HoneycombConfig,
    pub trace: TraceConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            display_name: "Business System Operations".to_string(),
            catalog: CatalogConfig::default(),
            series: SeriesConfig::default(),
            matrix: MatrixConfig::default(),
            honeycomb: HoneycombConfig::default(),
            trace: TraceConfig::default(),
        }
    }
}

fn check_probability(name: &str, p: f64) -> DashboardResult<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(DashboardError::Config(format!("{} must be within [0, 1], got {}", name, p)))
    }
}

impl DashboardConfig {
    pub fn from_yaml_str(yaml: &str) -> DashboardResult<Self> {
        let config: DashboardConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> DashboardResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&raw)?;
        info!(path = %path.display(), "loaded dashboard configuration");
        Ok(config)
    }

    pub fn to_yaml(&self) -> DashboardResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> DashboardResult<()> {
        if self.series.points == 0 {
            return Err(DashboardError::Config("series.points must be positive".to_string()));
        }
        if self.series.window_hours <= 0 || self.series.window_hours > MAX_WINDOW_HOURS {
            return Err(DashboardError::Config(format!(
                "series.window_hours must be within 1..={}, got {}",
                MAX_WINDOW_HOURS, self.series.window_hours
            )));
        }
        if self.matrix.min_radius > self.matrix.max_radius {
            return Err(DashboardError::Config(format!(
                "matrix.min_radius ({}) exceeds matrix.max_radius ({})",
                self.matrix.min_radius, self.matrix.max_radius
            )));
        }
        if self.honeycomb.hex_spacing <= 0.0 || self.honeycomb.hex_radius <= 0.0 {
            return Err(DashboardError::Config("honeycomb hexagon size must be positive".to_string()));
        }
        check_probability("trace.error_log_correlation", self.trace.error_log_correlation)?;
        check_probability("trace.warn_log_correlation", self.trace.warn_log_correlation)?;
        check_probability("trace.failing_trace_ratio", self.trace.failing_trace_ratio)?;
        Ok(())
    }
}
