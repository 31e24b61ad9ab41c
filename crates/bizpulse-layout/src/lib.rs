pub mod common;
pub mod hexagon;
pub mod honeycomb;
pub mod matrix;

pub use common::{BandScale, ItemKey, Margin, Point, SqrtScale};
pub use hexagon::{hexagon_path, hexagon_vertices};
pub use honeycomb::{layout_honeycomb, BandSummary, HexBand, HexItem, HexPlacement, HoneycombConfig, HoneycombLayout};
pub use matrix::{layout_matrix, BubblePlacement, MatrixConfig, MatrixLayout, MatrixPoint, MatrixView};
