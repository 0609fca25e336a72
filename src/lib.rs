#![warn(missing_docs)]
//! HexJSON layout engine.
//!
//! Takes a HexJSON dataset (hexes keyed by name, placed on one of the four
//! offset layouts `odd-r`, `even-r`, `odd-q`, `even-q`) and computes, for a
//! target canvas size, the largest hex radius that fits, the shared hexagon
//! outline, and every hex's pixel center. [`grid_for_hexjson`] builds the
//! complete background grid for a dataset's bounding box, laid out with the
//! same engine.
//!
//! Pixel space has its origin at the top-left corner with y pointing down.

pub mod dataset;
pub mod engine;
pub mod error;
pub mod extent;
pub mod geometry;
pub mod grid;
pub mod layout;
pub mod math;

pub use dataset::{HexCell, HexJson};
pub use engine::{PositionedHex, RenderedHexes, render_hexjson};
pub use error::{Error, Result};
pub use extent::Extent;
pub use geometry::{HexShape, encode_points, parse_points, vertices};
pub use grid::{grid_for_hexjson, grid_key};
pub use layout::OffsetLayout;
