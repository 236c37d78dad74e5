use serde::{Deserialize, Serialize};
use std::fmt;

/// Pixel position in graph-band coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Cubic Bézier segment: start, two control points, end
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicPath {
    pub start: Point,
    pub c1: Point,
    pub c2: Point,
    pub end: Point,
}

impl CubicPath {
    pub fn new(start: Point, c1: Point, c2: Point, end: Point) -> Self {
        Self { start, c1, c2, end }
    }

    /// SVG path data (`M x,y C x,y x,y x,y`)
    pub fn to_svg_path(&self) -> String {
        format!("M{} C{} {} {}", self.start, self.c1, self.c2, self.end)
    }
}

/// Nodes sharing a column, in enumeration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub column: usize,
    pub nodes: Vec<String>,
}

/// Drawing surface dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    /// Offset of the graph band from the top of the canvas
    pub graph_top: f64,
    pub graph_height: f64,
    /// Shared horizontal centerline of every layer, in graph-band coordinates
    pub centerline: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_path_format() {
        let path = CubicPath::new(
            Point::new(65.0, 178.0),
            Point::new(65.0, 165.0),
            Point::new(755.0, 165.0),
            Point::new(755.0, 178.0),
        );
        assert_eq!(path.to_svg_path(), "M65,178 C65,165 755,165 755,178");
    }

    #[test]
    fn test_fractional_coordinates() {
        assert_eq!(Point::new(410.5, -2.25).to_string(), "410.5,-2.25");
    }
}
