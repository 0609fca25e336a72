//! Typed HexJSON documents: parsing, validation and serialization.
//!
//! A HexJSON document looks like
//!
//! ```json
//! { "layout": "odd-r",
//!   "hexes": { "A": { "q": 0, "r": 0, "name": "Alpha" }, "B": { "q": 1, "r": 0 } } }
//! ```
//!
//! Coordinates may be integers, integral floats or numeric strings. Every other
//! field of a hex is kept verbatim as an attribute.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use bevy::log::debug;
use bevy::platform::collections::HashMap;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::engine::{self, RenderedHexes};
use crate::error::{Error, Result};
use crate::extent::Extent;
use crate::grid;
use crate::layout::{Axis, OffsetLayout};

/// One hex of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct HexCell {
    /// Unique identifier within the dataset.
    pub key: String,
    /// Column-like offset coordinate.
    pub q: i32,
    /// Row-like offset coordinate.
    pub r: i32,
    /// Every other field of the hex, untouched.
    pub attributes: Map<String, Value>,
}

impl HexCell {
    /// A hex with no attributes.
    pub fn new(key: impl Into<String>, q: i32, r: i32) -> Self {
        Self {
            key: key.into(),
            q,
            r,
            attributes: Map::new(),
        }
    }

    /// Adds an attribute, builder style.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

/// A HexJSON dataset: one layout and a keyed, ordered set of hexes.
#[derive(Debug, Clone)]
pub struct HexJson {
    layout: OffsetLayout,
    hexes: Vec<HexCell>,
    index: HashMap<String, usize>,
}

#[derive(Deserialize)]
struct RawHexJson {
    layout: String,
    hexes: Map<String, Value>,
}

impl HexJson {
    /// An empty dataset.
    pub fn new(layout: OffsetLayout) -> Self {
        Self {
            layout,
            hexes: Vec::new(),
            index: HashMap::new(),
        }
    }

    // ── Loading ────────────────────────────────────────────────────

    /// Parses a HexJSON document.
    ///
    /// # Examples
    /// ```
    /// # use hexjson::{HexJson, OffsetLayout};
    /// let data = HexJson::from_json_str(r#"{"layout":"odd-q","hexes":{"A":{"q":"2","r":1}}}"#)?;
    /// assert_eq!(data.layout(), OffsetLayout::OddQ);
    /// assert_eq!(data.get("A").map(|h| h.q), Some(2));
    /// # Ok::<(), hexjson::Error>(())
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_raw(serde_json::from_str(json)?)
    }

    /// Parses a HexJSON document from a reader.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Self::from_raw(serde_json::from_reader(reader)?)
    }

    /// Reads and parses a HexJSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Converts an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        Self::from_raw(serde_json::from_value(value)?)
    }

    fn from_raw(raw: RawHexJson) -> Result<Self> {
        let layout: OffsetLayout = raw.layout.parse()?;
        let mut data = Self::new(layout);
        for (key, value) in raw.hexes {
            let Value::Object(mut attributes) = value else {
                return Err(Error::MalformedHex { key });
            };
            let q = coordinate(&key, Axis::Q, attributes.shift_remove(Axis::Q.field()))?;
            let r = coordinate(&key, Axis::R, attributes.shift_remove(Axis::R.field()))?;
            data.insert(HexCell {
                key,
                q,
                r,
                attributes,
            });
        }
        debug!(layout = %layout, hexes = data.len(), "parsed hexjson");
        Ok(data)
    }

    // ── Saving ─────────────────────────────────────────────────────

    /// The dataset as a HexJSON value.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// The dataset as pretty-printed HexJSON text.
    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // ── Access ─────────────────────────────────────────────────────

    /// The dataset's offset layout.
    pub fn layout(&self) -> OffsetLayout {
        self.layout
    }

    /// Inserts a hex, replacing (in place) any hex with the same key.
    pub fn insert(&mut self, cell: HexCell) -> Option<HexCell> {
        if let Some(&i) = self.index.get(&cell.key) {
            return Some(std::mem::replace(&mut self.hexes[i], cell));
        }
        self.index.insert(cell.key.clone(), self.hexes.len());
        self.hexes.push(cell);
        None
    }

    /// Looks a hex up by key.
    pub fn get(&self, key: &str) -> Option<&HexCell> {
        self.index.get(key).map(|&i| &self.hexes[i])
    }

    /// Number of hexes.
    pub fn len(&self) -> usize {
        self.hexes.len()
    }

    /// Whether the dataset has no hexes.
    pub fn is_empty(&self) -> bool {
        self.hexes.is_empty()
    }

    /// Hexes in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, HexCell> {
        self.hexes.iter()
    }

    // ── Layout ─────────────────────────────────────────────────────

    /// Bounding box of all hexes.
    pub fn extent(&self) -> Result<Extent> {
        Extent::from_coords(self.hexes.iter().map(|h| (h.q, h.r)))
    }

    /// Lays the dataset out to fit `width x height` pixels.
    pub fn render(&self, width: f64, height: f64) -> Result<RenderedHexes<'_>> {
        engine::render_hexjson(self, width, height)
    }

    /// The full rectangular grid covering this dataset's extent.
    pub fn grid(&self) -> Result<HexJson> {
        grid::grid_for_hexjson(self)
    }
}

impl PartialEq for HexJson {
    fn eq(&self, other: &Self) -> bool {
        self.layout == other.layout && self.hexes == other.hexes
    }
}

impl Extend<HexCell> for HexJson {
    fn extend<T: IntoIterator<Item = HexCell>>(&mut self, iter: T) {
        for cell in iter {
            self.insert(cell);
        }
    }
}

impl<'a> IntoIterator for &'a HexJson {
    type Item = &'a HexCell;
    type IntoIter = std::slice::Iter<'a, HexCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Reads a `q`/`r` value the way loosely-typed HexJSON producers write them.
fn coordinate(key: &str, axis: Axis, value: Option<Value>) -> Result<i32> {
    let Some(value) = value else {
        return Err(Error::InvalidCoordinate {
            key: key.to_owned(),
            axis,
            value: "missing".to_owned(),
        });
    };
    let integral = |v: f64| (v.is_finite() && v.fract() == 0.0).then_some(v as i64);
    let parsed = match &value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    };
    parsed
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| Error::InvalidCoordinate {
            key: key.to_owned(),
            axis,
            value: value.to_string(),
        })
}

// ── Serialization ──────────────────────────────────────────────────

struct CellFields<'a>(&'a HexCell);

impl Serialize for CellFields<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let cell = self.0;
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("q", &cell.q)?;
        map.serialize_entry("r", &cell.r)?;
        for (name, value) in &cell.attributes {
            if name != "q" && name != "r" {
                map.serialize_entry(name, value)?;
            }
        }
        map.end()
    }
}

struct Hexes<'a>(&'a [HexCell]);

impl Serialize for Hexes<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for cell in self.0 {
            map.serialize_entry(&cell.key, &CellFields(cell))?;
        }
        map.end()
    }
}

impl Serialize for HexJson {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("layout", &self.layout)?;
        map.serialize_entry("hexes", &Hexes(&self.hexes))?;
        map.end()
    }
}
