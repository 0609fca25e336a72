//! Hexagon outlines for a layout and size, and their SVG-style points encoding.
//!
//! Everything here is relative to the hex center; the engine positions centers
//! separately.

use bevy::math::DVec2;
use hexx::HexOrientation;

use crate::layout::OffsetLayout;
use crate::math;

/// Size and outline shared by every hex of one layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct HexShape {
    /// Center-to-vertex distance.
    pub radius: f64,
    /// Flat-side-to-flat-side distance (`radius * sqrt(3)`).
    pub width: f64,
    /// Vertex offsets from the center, clockwise.
    pub vertices: [DVec2; 6],
    /// `vertices` encoded as `"dx,dy dx,dy ..."`.
    pub points: String,
}

impl HexShape {
    /// Builds the shape for a layout at the given radius.
    pub fn new(layout: OffsetLayout, radius: f64) -> Self {
        let width = math::hex_width(radius);
        let vertices = vertices(layout, width, radius);
        let points = encode_points(&vertices);
        Self {
            radius,
            width,
            vertices,
            points,
        }
    }

    /// Absolute outline around `center`.
    pub fn outline(&self, center: DVec2) -> [DVec2; 6] {
        self.vertices.map(|v| center + v)
    }
}

/// Vertex offsets of one hex, centered on the origin.
///
/// Pointy-top outlines (row layouts) start at the topmost vertex, flat-top
/// outlines (column layouts) at the leftmost; both go clockwise in pixel space
/// (y down).
pub fn vertices(layout: OffsetLayout, hex_width: f64, hex_radius: f64) -> [DVec2; 6] {
    let half_w = hex_width * 0.5;
    let half_r = hex_radius * 0.5;
    match layout.orientation() {
        HexOrientation::Pointy => [
            DVec2::new(0.0, 0.0 - hex_radius),
            DVec2::new(0.0 + half_w, 0.0 - half_r),
            DVec2::new(0.0 + half_w, 0.0 + half_r),
            DVec2::new(0.0, 0.0 + hex_radius),
            DVec2::new(0.0 - half_w, 0.0 + half_r),
            DVec2::new(0.0 - half_w, 0.0 - half_r),
        ],
        HexOrientation::Flat => [
            DVec2::new(0.0 - hex_radius, 0.0),
            DVec2::new(0.0 - half_r, 0.0 - half_w),
            DVec2::new(0.0 + half_r, 0.0 - half_w),
            DVec2::new(0.0 + hex_radius, 0.0),
            DVec2::new(0.0 + half_r, 0.0 + half_w),
            DVec2::new(0.0 - half_r, 0.0 + half_w),
        ],
    }
}

/// Encodes vertices as a polygon `points` attribute: `"x,y"` pairs separated
/// by single spaces.
///
/// # Examples
/// ```
/// # use bevy::math::DVec2;
/// # use hexjson::geometry::encode_points;
/// let pts = encode_points(&[DVec2::new(0.0, -2.0), DVec2::new(1.5, 0.25)]);
/// assert_eq!(pts, "0,-2 1.5,0.25");
/// ```
pub fn encode_points(vertices: &[DVec2]) -> String {
    vertices
        .iter()
        // `+ 0.0` turns -0.0 into 0.0
        .map(|v| format!("{},{}", v.x + 0.0, v.y + 0.0))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses a `points` string back into vertices.
///
/// Returns `None` if any pair is not two comma-separated numbers.
pub fn parse_points(points: &str) -> Option<Vec<DVec2>> {
    points
        .split_whitespace()
        .map(|pair| {
            let (x, y) = pair.split_once(',')?;
            Some(DVec2::new(x.parse().ok()?, y.parse().ok()?))
        })
        .collect()
}
