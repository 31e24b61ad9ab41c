//! Hexagon geometry
//!
//! Flat-topped hexagons: vertex `i` sits at `i * 60°` around the center.

use super::common::Point;
use std::f64::consts::PI;

/// The six vertices of a hexagon, starting at angle 0 and turning clockwise in
/// screen coordinates.
pub fn hexagon_vertices(center: Point, radius: f64) -> [Point; 6] {
    let mut vertices = [Point::default(); 6];
    for (i, vertex) in vertices.iter_mut().enumerate() {
        let angle = PI / 3.0 * i as f64;
        *vertex = Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin());
    }
    vertices
}

/// Closed SVG path for a hexagon (`M x,y L ... Z`)
pub fn hexagon_path(center: Point, radius: f64) -> String {
    let vertices = hexagon_vertices(center, radius);
    let mut path = String::with_capacity(96);
    for (i, p) in vertices.iter().enumerate() {
        path.push(if i == 0 { 'M' } else { 'L' });
        path.push_str(&format!("{:.2},{:.2}", p.x, p.y));
    }
    path.push('Z');
    path
}
