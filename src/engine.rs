//! The layout engine: fits a dataset to a canvas and positions every hex.
//!
//! Output records borrow the dataset's hexes rather than copying or mutating
//! them, so one dataset can be laid out at several sizes at once.

use bevy::log::{debug, warn};
use bevy::math::DVec2;
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::dataset::{HexCell, HexJson};
use crate::error::Result;
use crate::extent::Extent;
use crate::geometry::HexShape;
use crate::layout::OffsetLayout;
use crate::math;

/// Names the engine writes onto each output record; input attributes with the
/// same name are shadowed.
const COMPUTED_FIELDS: [&str; 9] = ["key", "q", "r", "qc", "rc", "x", "y", "vertices", "points"];

/// A hex placed on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedHex<'a> {
    /// The source hex.
    pub cell: &'a HexCell,
    /// Zero-based column (`q - qmin`).
    pub qc: u32,
    /// Zero-based row from the top (`rmax - r`).
    pub rc: u32,
    /// Pixel center x.
    pub x: f64,
    /// Pixel center y (down is positive).
    pub y: f64,
}

impl<'a> PositionedHex<'a> {
    /// The hex's key.
    pub fn key(&self) -> &'a str {
        &self.cell.key
    }

    /// Original `q`.
    pub fn q(&self) -> i32 {
        self.cell.q
    }

    /// Original `r`.
    pub fn r(&self) -> i32 {
        self.cell.r
    }

    /// Pass-through attributes.
    pub fn attributes(&self) -> &'a Map<String, Value> {
        &self.cell.attributes
    }

    /// Pixel center.
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Absolute outline of this hex for the pass's shape.
    pub fn outline(&self, shape: &HexShape) -> [DVec2; 6] {
        shape.outline(self.center())
    }
}

/// Result of one layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedHexes<'a> {
    layout: OffsetLayout,
    extent: Extent,
    shape: HexShape,
    hexes: Vec<PositionedHex<'a>>,
}

impl<'a> RenderedHexes<'a> {
    /// The dataset's layout.
    pub fn layout(&self) -> OffsetLayout {
        self.layout
    }

    /// The extent the pass was sized against.
    pub fn extent(&self) -> &Extent {
        &self.extent
    }

    /// Radius, width, vertices and points shared by every hex.
    pub fn shape(&self) -> &HexShape {
        &self.shape
    }

    /// Positioned hexes in dataset order.
    pub fn hexes(&self) -> &[PositionedHex<'a>] {
        &self.hexes
    }

    /// Iterates positioned hexes in dataset order.
    pub fn iter(&self) -> std::slice::Iter<'_, PositionedHex<'a>> {
        self.hexes.iter()
    }

    /// Number of positioned hexes.
    pub fn len(&self) -> usize {
        self.hexes.len()
    }

    /// Whether nothing was positioned.
    pub fn is_empty(&self) -> bool {
        self.hexes.is_empty()
    }

    /// Pretty-printed JSON array of the positioned hexes.
    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<'r, 'a> IntoIterator for &'r RenderedHexes<'a> {
    type Item = &'r PositionedHex<'a>;
    type IntoIter = std::slice::Iter<'r, PositionedHex<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lays out every hex of `data` so the whole grid fits `width x height`.
///
/// Fails with [`crate::Error::EmptyDataset`] when `data` has no hexes. A
/// non-positive size yields a zero radius; callers should skip drawing then.
///
/// # Examples
/// ```
/// # use hexjson::{HexCell, HexJson, OffsetLayout, render_hexjson};
/// let mut data = HexJson::new(OffsetLayout::OddR);
/// data.extend([HexCell::new("A", 0, 0), HexCell::new("B", 1, 0)]);
/// let out = render_hexjson(&data, 100.0, 100.0)?;
/// let (a, b) = (out.hexes()[0], out.hexes()[1]);
/// assert_eq!(a.y, b.y);
/// assert!((b.x - a.x - out.shape().width).abs() < 1e-9);
/// # Ok::<(), hexjson::Error>(())
/// ```
pub fn render_hexjson(data: &HexJson, width: f64, height: f64) -> Result<RenderedHexes<'_>> {
    let layout = data.layout();
    let extent = data.extent()?;
    let radius = math::max_radius(layout, &extent, width, height);
    if radius == 0.0 {
        warn!(width, height, "hexjson layout degenerated to a zero radius");
    }
    let shape = HexShape::new(layout, radius);

    let hexes = data
        .iter()
        .map(|cell| {
            let qc = extent.column(cell.q);
            let rc = extent.row(cell.r);
            let center = math::project(layout, shape.width, shape.radius, qc, rc);
            PositionedHex {
                cell,
                qc,
                rc,
                x: center.x,
                y: center.y,
            }
        })
        .collect::<Vec<_>>();

    debug!(
        layout = %layout,
        hexes = hexes.len(),
        qnum = extent.qnum(),
        rnum = extent.rnum(),
        radius,
        "laid out hexjson"
    );

    Ok(RenderedHexes {
        layout,
        extent,
        shape,
        hexes,
    })
}

// ── Serialization ──────────────────────────────────────────────────

#[derive(Serialize)]
struct Vertex {
    x: f64,
    y: f64,
}

struct Record<'r, 'a> {
    hex: &'r PositionedHex<'a>,
    shape: &'r HexShape,
}

impl Serialize for Record<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let Record { hex, shape } = self;
        let mut map = serializer.serialize_map(None)?;
        for (name, value) in hex.attributes() {
            if !COMPUTED_FIELDS.contains(&name.as_str()) {
                map.serialize_entry(name, value)?;
            }
        }
        let vertices: Vec<Vertex> = shape
            .vertices
            .iter()
            .map(|v| Vertex { x: v.x, y: v.y })
            .collect();
        map.serialize_entry("key", hex.key())?;
        map.serialize_entry("q", &hex.q())?;
        map.serialize_entry("r", &hex.r())?;
        map.serialize_entry("qc", &hex.qc)?;
        map.serialize_entry("rc", &hex.rc)?;
        map.serialize_entry("x", &hex.x)?;
        map.serialize_entry("y", &hex.y)?;
        map.serialize_entry("vertices", &vertices)?;
        map.serialize_entry("points", &shape.points)?;
        map.end()
    }
}

impl Serialize for RenderedHexes<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.hexes.len()))?;
        for hex in &self.hexes {
            seq.serialize_element(&Record {
                hex,
                shape: &self.shape,
            })?;
        }
        seq.end()
    }
}
