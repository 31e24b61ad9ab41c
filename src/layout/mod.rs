//! Layout adapters
//!
//! The geometry engines live in the `bizpulse-layout` crate and work on projected
//! views keyed by integer ids. This module projects catalog entries into those
//! views and maps placements back onto systems and assets.

pub mod palette;

use crate::catalog::{BusinessSystem, HealthStatus, ImportanceLevel};
use crate::error::{check_viewport, DashboardResult};
use crate::random::CosmeticRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use bizpulse_layout::{
    hexagon_path, hexagon_vertices, layout_honeycomb, layout_matrix, BandSummary, HexBand, HexItem,
    HexPlacement, HoneycombConfig, HoneycombLayout, Margin, MatrixConfig, MatrixLayout, MatrixView, Point,
};
pub use palette::{health_color, importance_legend};

/// A positioned system bubble
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixBubble {
    pub system_id: String,
    pub name: String,
    pub department: String,
    pub importance: ImportanceLevel,
    pub health_status: HealthStatus,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: String,
    /// Horizontal offset applied to separate bubbles sharing a cell
    pub spread_offset: f64,
}

/// A positioned asset hexagon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoneycombCell {
    pub asset_id: String,
    pub name: String,
    pub asset_type: String,
    pub band: HexBand,
    pub health_status: HealthStatus,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: String,
    /// Closed SVG path of the hexagon outline
    pub path: String,
}

/// Project systems onto the department × importance grid.
///
/// Keys are indices into `systems`.
pub fn build_matrix_view(systems: &[BusinessSystem]) -> MatrixView {
    MatrixView::new(
        ImportanceLevel::ALL.len(),
        systems.iter().enumerate().map(|(idx, s)| {
            (idx as u64, s.department.as_str(), s.importance.rank(), s.asset_count as f64)
        }),
    )
}

/// Matrix bubbles for every system, in input order
pub fn layout_systems<R: Rng>(
    systems: &[BusinessSystem],
    config: &MatrixConfig,
    rng: &mut CosmeticRandom<R>,
) -> DashboardResult<Vec<MatrixBubble>> {
    check_viewport(config.width, config.height)?;

    let view = build_matrix_view(systems);
    let layout = layout_matrix(&view, config, rng.rng_mut());
    debug!(
        systems = systems.len(),
        columns = view.columns.len(),
        collision_groups = layout.collision_groups,
        "matrix layout computed"
    );

    Ok(layout
        .placements
        .into_iter()
        .map(|p| {
            let system = &systems[p.key as usize];
            MatrixBubble {
                system_id: system.id.clone(),
                name: system.name.clone(),
                department: system.department.clone(),
                importance: system.importance,
                health_status: system.health_status,
                x: p.x,
                y: p.y,
                radius: p.radius,
                color: health_color(system.health_status).to_string(),
                spread_offset: p.spread_offset,
            }
        })
        .collect())
}

/// Honeycomb cells for the assets of one system
pub fn layout_assets(system: &BusinessSystem, config: &HoneycombConfig) -> DashboardResult<Vec<HoneycombCell>> {
    // Rows are centered on vertical_offset, so the plot is twice as tall
    check_viewport(config.width, config.vertical_offset * 2.0)?;

    let items: Vec<HexItem> = system
        .assets
        .iter()
        .enumerate()
        .map(|(idx, a)| HexItem::new(idx as u64, &a.asset_type))
        .collect();

    let layout = layout_honeycomb(&items, config);
    debug!(
        system_id = %system.id,
        assets = items.len(),
        "honeycomb layout computed"
    );

    Ok(layout
        .placements
        .iter()
        .map(|p| {
            let asset = &system.assets[p.key as usize];
            HoneycombCell {
                asset_id: asset.id.clone(),
                name: asset.name.clone(),
                asset_type: asset.asset_type.clone(),
                band: p.band,
                health_status: asset.health_status,
                x: p.center.x,
                y: p.center.y,
                radius: p.radius,
                color: health_color(asset.health_status).to_string(),
                path: p.svg_path(),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogConfig, CatalogGenerator};
    use crate::error::DashboardError;

    #[test]
    fn test_matrix_view_projection() {
        let catalog = CatalogGenerator::new(CatalogConfig::default()).generate();
        let view = build_matrix_view(catalog.systems());
        assert_eq!(view.row_count, 4);
        assert_eq!(view.points.len(), catalog.len());
        assert_eq!(view.columns, catalog.departments());
    }

    #[test]
    fn test_layout_systems_colors_by_health() {
        let catalog = CatalogGenerator::new(CatalogConfig::default()).generate();
        let mut rng = CosmeticRandom::seeded(3);
        let bubbles = layout_systems(catalog.systems(), &MatrixConfig::default(), &mut rng).unwrap();

        assert_eq!(bubbles.len(), catalog.len());
        for (bubble, system) in bubbles.iter().zip(catalog.systems()) {
            assert_eq!(bubble.system_id, system.id);
            assert_eq!(bubble.color, health_color(system.health_status));
        }
    }

    #[test]
    fn test_invalid_viewport_rejected() {
        let catalog = CatalogGenerator::new(CatalogConfig::default()).generate();
        let config = MatrixConfig {
            width: 0.0,
            ..Default::default()
        };
        let mut rng = CosmeticRandom::seeded(3);
        assert!(matches!(
            layout_systems(catalog.systems(), &config, &mut rng),
            Err(DashboardError::InvalidViewport { .. })
        ));
    }

    #[test]
    fn test_layout_assets_covers_every_asset() {
        let catalog = CatalogGenerator::new(CatalogConfig::default()).generate();
        for system in catalog.systems() {
            let cells = layout_assets(system, &HoneycombConfig::default()).unwrap();
            assert_eq!(cells.len(), system.assets.len());
            assert!(cells.iter().all(|c| c.path.ends_with('Z')));
        }
    }

    #[test]
    fn test_layout_assets_empty_system() {
        let cells = layout_assets(&BusinessSystem::placeholder("SYS-0"), &HoneycombConfig::default()).unwrap();
        assert!(cells.is_empty());
    }
}
