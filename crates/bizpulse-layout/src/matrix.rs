//! Matrix bubble layout
//!
//! Positions items on a categorical column × row grid. Column bands are keyed
//! by label and sorted alphabetically; row bands are given by index, top to bottom.
//! Items sharing a cell are spread horizontally around the cell center so that
//! no two bubbles sit on the same x.

use super::common::{BandScale, ItemKey, Margin, SqrtScale};
use indexmap::IndexMap;
use rand::Rng;

/// Projected view of the items to place
#[derive(Debug, Clone, Default)]
pub struct MatrixView {
    /// Column labels in band order (sorted)
    pub columns: Vec<String>,
    /// Number of row bands
    pub row_count: usize,
    pub points: Vec<MatrixPoint>,
}

/// A single item, already resolved to its cell
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixPoint {
    pub key: ItemKey,
    pub column: usize,
    pub row: usize,
    /// Drives the radius (e.g. asset count)
    pub weight: f64,
}

impl MatrixView {
    /// Build a view from `(key, column label, row index, weight)` tuples.
    ///
    /// Rows outside `0..row_count` are pinned to the last row band.
    pub fn new<'a, I>(row_count: usize, items: I) -> Self
    where
        I: IntoIterator<Item = (ItemKey, &'a str, usize, f64)>,
    {
        let row_count = row_count.max(1);
        let items: Vec<_> = items.into_iter().collect();

        let mut columns: Vec<String> = items.iter().map(|(_, c, _, _)| c.to_string()).collect();
        columns.sort();
        columns.dedup();

        let points = items
            .into_iter()
            .map(|(key, column, row, weight)| MatrixPoint {
                key,
                // Present by construction
                column: columns.binary_search_by(|c| c.as_str().cmp(column)).unwrap_or(0),
                row: row.min(row_count - 1),
                weight,
            })
            .collect();

        MatrixView {
            columns,
            row_count,
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Matrix layout configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct MatrixConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub min_radius: f64,
    pub max_radius: f64,
    /// Band padding as a fraction of the band step
    pub band_padding: f64,
    /// Colliding bubbles never spread wider than this share of the column band
    pub spread_ratio: f64,
    /// Horizontal room granted per colliding bubble
    pub spread_per_item: f64,
    /// Max vertical jitter (±) applied to colliding bubbles
    pub cluster_jitter: f64,
    /// Max jitter (±) in both axes applied to a lone bubble
    pub solo_jitter: f64,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 520.0,
            margin: Margin::default(),
            min_radius: 8.0,
            max_radius: 36.0,
            band_padding: 0.1,
            spread_ratio: 0.8,
            spread_per_item: 40.0,
            cluster_jitter: 5.0,
            solo_jitter: 7.5,
        }
    }
}

impl MatrixConfig {
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }
}

/// Placement of one bubble
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BubblePlacement {
    pub key: ItemKey,
    pub column: usize,
    pub row: usize,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// Deterministic horizontal offset from the cell center (0 for a lone bubble)
    pub spread_offset: f64,
    /// Number of bubbles sharing the cell
    pub cell_size: usize,
}

/// Result of a matrix layout pass
#[derive(Debug, Clone)]
pub struct MatrixLayout {
    pub placements: Vec<BubblePlacement>,
    pub x_scale: BandScale,
    pub y_scale: BandScale,
    /// Number of cells holding more than one bubble
    pub collision_groups: usize,
}

impl MatrixLayout {
    /// Absolute center of column band `idx`
    pub fn column_center(&self, config: &MatrixConfig, idx: usize) -> f64 {
        config.margin.left + self.x_scale.center(idx)
    }

    /// Absolute center of row band `idx`
    pub fn row_center(&self, config: &MatrixConfig, idx: usize) -> f64 {
        config.margin.top + self.y_scale.center(idx)
    }
}

/// Horizontal offsets for `count` bubbles sharing one cell of width `bandwidth`.
///
/// `spread = min(bandwidth * ratio, count * per_item)`, offsets evenly spaced
/// across the spread and centered on zero.
pub fn spread_offsets(count: usize, bandwidth: f64, ratio: f64, per_item: f64) -> Vec<f64> {
    if count <= 1 {
        return vec![0.0; count];
    }
    let spread = (bandwidth.max(1.0) * ratio).min(count as f64 * per_item);
    // Degenerate config (ratio or per_item <= 0) still has to separate bubbles
    let spread = if spread > 0.0 { spread } else { count as f64 };
    let gap = spread / (count - 1) as f64;
    let mid = (count - 1) as f64 / 2.0;

    (0..count).map(|i| (i as f64 - mid) * gap).collect()
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, amplitude: f64) -> f64 {
    let a = amplitude.abs();
    if a == 0.0 {
        0.0
    } else {
        rng.gen_range(-a..=a)
    }
}

/// Lay out every point of `view`.
///
/// Placements are returned in the same order as `view.points`. The jitter is
/// cosmetic and drawn from `rng`; `spread_offset` is fully determined by the
/// input order within each cell.
pub fn layout_matrix<R: Rng + ?Sized>(view: &MatrixView, config: &MatrixConfig, rng: &mut R) -> MatrixLayout {
    let x_scale = BandScale::new(view.columns.len(), (0.0, config.inner_width()), config.band_padding);
    let y_scale = BandScale::new(view.row_count, (0.0, config.inner_height()), config.band_padding);

    let max_weight = view.points.iter().map(|p| p.weight).fold(0.0_f64, f64::max);
    let radius = SqrtScale::new(max_weight, (config.min_radius, config.max_radius));

    // 1. Group points by cell, keeping input order within the cell
    let mut cells: IndexMap<(usize, usize), Vec<usize>> = IndexMap::new();
    for (idx, point) in view.points.iter().enumerate() {
        cells.entry((point.column, point.row)).or_default().push(idx);
    }

    // 2. Place each cell
    let mut placements: Vec<Option<BubblePlacement>> = vec![None; view.points.len()];
    let mut collision_groups = 0;

    for (&(column, row), members) in &cells {
        let cx = config.margin.left + x_scale.center(column);
        let cy = config.margin.top + y_scale.center(row);
        let count = members.len();

        if count > 1 {
            collision_groups += 1;
        }

        let offsets = spread_offsets(count, x_scale.bandwidth(), config.spread_ratio, config.spread_per_item);

        for (&idx, &offset) in members.iter().zip(offsets.iter()) {
            let point = &view.points[idx];
            let (dx, dy) = if count > 1 {
                (0.0, jitter(rng, config.cluster_jitter))
            } else {
                (jitter(rng, config.solo_jitter), jitter(rng, config.solo_jitter))
            };

            placements[idx] = Some(BubblePlacement {
                key: point.key,
                column,
                row,
                x: cx + offset + dx,
                y: cy + dy,
                radius: radius.scale(point.weight),
                spread_offset: offset,
                cell_size: count,
            });
        }
    }

    MatrixLayout {
        placements: placements.into_iter().flatten().collect(),
        x_scale,
        y_scale,
        collision_groups,
    }
}
