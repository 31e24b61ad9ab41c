//! Honeycomb layout
//!
//! Places one hexagon per asset into three vertical bands (infrastructure,
//! middleware, application). Each band arranges its assets in a near-square
//! grid whose odd columns are shifted down half a cell.

use super::common::{ItemKey, Point};
use super::hexagon::{hexagon_path, hexagon_vertices};

/// The three fixed bands, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HexBand {
    Infrastructure,
    Middleware,
    Application,
}

const INFRASTRUCTURE_MARKERS: [&str; 5] = ["server", "database", "network", "storage", "security"];

impl HexBand {
    pub const ALL: [HexBand; 3] = [HexBand::Infrastructure, HexBand::Middleware, HexBand::Application];

    /// Classify an asset type string by substring.
    ///
    /// Anything that is neither infrastructure nor middleware lands in the
    /// application band.
    pub fn classify(asset_type: &str) -> HexBand {
        let t = asset_type.to_ascii_lowercase();
        if INFRASTRUCTURE_MARKERS.iter().any(|m| t.contains(m)) {
            HexBand::Infrastructure
        } else if t.contains("middleware") {
            HexBand::Middleware
        } else {
            HexBand::Application
        }
    }

    pub fn index(self) -> usize {
        match self {
            HexBand::Infrastructure => 0,
            HexBand::Middleware => 1,
            HexBand::Application => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HexBand::Infrastructure => "Infrastructure",
            HexBand::Middleware => "Middleware",
            HexBand::Application => "Application Services",
        }
    }
}

/// One asset to place
#[derive(Debug, Clone, PartialEq)]
pub struct HexItem {
    pub key: ItemKey,
    pub band: HexBand,
}

impl HexItem {
    pub fn new(key: ItemKey, asset_type: &str) -> Self {
        Self {
            key,
            band: HexBand::classify(asset_type),
        }
    }
}

/// Honeycomb layout configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct HoneycombConfig {
    pub width: f64,
    pub hex_radius: f64,
    /// Distance between adjacent cell centers in one column
    pub hex_spacing: f64,
    /// Y of the grid center
    pub vertical_offset: f64,
}

impl Default for HoneycombConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            hex_radius: 18.0,
            hex_spacing: 36.0,
            vertical_offset: 160.0,
        }
    }
}

/// Placement of one hexagon
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexPlacement {
    pub key: ItemKey,
    pub band: HexBand,
    pub col: usize,
    pub row: usize,
    pub center: Point,
    pub radius: f64,
}

impl HexPlacement {
    pub fn vertices(&self) -> [Point; 6] {
        hexagon_vertices(self.center, self.radius)
    }

    pub fn svg_path(&self) -> String {
        hexagon_path(self.center, self.radius)
    }
}

/// Per-band grid metrics
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BandSummary {
    pub band: HexBand,
    pub count: usize,
    pub cols: usize,
    pub rows: usize,
    pub center_x: f64,
    /// Horizontal extent `[start, end)` reserved for the band
    pub x_range: (f64, f64),
    /// Spacing actually used (shrunk when the grid would overflow the band)
    pub spacing: f64,
}

/// Result of a honeycomb layout pass
#[derive(Debug, Clone)]
pub struct HoneycombLayout {
    pub placements: Vec<HexPlacement>,
    pub section_width: f64,
    pub bands: Vec<BandSummary>,
}

impl HoneycombLayout {
    pub fn band_of(&self, x: f64) -> Option<HexBand> {
        self.bands
            .iter()
            .find(|b| x >= b.x_range.0 && x < b.x_range.1)
            .map(|b| b.band)
    }
}

/// Near-square grid dimensions for `n` cells: `cols = ceil(sqrt(n))`, `rows = ceil(n / cols)`
pub fn grid_dimensions(n: usize) -> (usize, usize) {
    if n == 0 {
        return (0, 0);
    }
    let cols = (n as f64).sqrt().ceil() as usize;
    let rows = n.div_ceil(cols);
    (cols, rows)
}

/// Lay out `items`. Placements come back grouped by band, each band in input order.
pub fn layout_honeycomb(items: &[HexItem], config: &HoneycombConfig) -> HoneycombLayout {
    let section_width = config.width.max(0.0) / HexBand::ALL.len() as f64;
    let mut placements = Vec::with_capacity(items.len());
    let mut bands = Vec::with_capacity(HexBand::ALL.len());

    for band in HexBand::ALL {
        let members: Vec<&HexItem> = items.iter().filter(|i| i.band == band).collect();
        let n = members.len();
        let (cols, rows) = grid_dimensions(n);

        let center_x = section_width * (band.index() as f64 + 0.5);
        let x_range = (section_width * band.index() as f64, section_width * (band.index() + 1) as f64);

        // Keep every center strictly inside the band
        let spacing = if cols > 1 {
            let fit = section_width / ((cols - 1) as f64 * 0.75 + 1.0);
            config.hex_spacing.min(fit)
        } else {
            config.hex_spacing
        };

        bands.push(BandSummary {
            band,
            count: n,
            cols,
            rows,
            center_x,
            x_range,
            spacing,
        });

        if n == 0 {
            continue;
        }

        let col_mid = (cols - 1) as f64 / 2.0;
        let row_mid = (rows - 1) as f64 / 2.0;

        for (i, item) in members.into_iter().enumerate() {
            let col = i % cols;
            let row = i / cols;

            let x = center_x + (col as f64 - col_mid) * spacing * 0.75;
            let y = config.vertical_offset
                + (row as f64 - row_mid) * spacing
                + (col % 2) as f64 * spacing * 0.5;

            placements.push(HexPlacement {
                key: item.key,
                band,
                col,
                row,
                center: Point::new(x, y),
                radius: config.hex_radius,
            });
        }
    }

    HoneycombLayout {
        placements,
        section_width,
        bands,
    }
}
