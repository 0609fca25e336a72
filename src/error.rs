//! Crate-wide error type.

use thiserror::Error;

use crate::layout::Axis;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while loading or laying out a HexJSON document.
#[derive(Debug, Error)]
pub enum Error {
    /// The dataset has no hexes, so no extent (and no radius) exists.
    #[error("hexjson dataset is empty: no extent can be computed")]
    EmptyDataset,

    /// The `layout` field is not one of `odd-r`, `even-r`, `odd-q`, `even-q`.
    #[error("unsupported hexjson layout `{layout}`")]
    UnsupportedLayout {
        /// The layout code as it appeared in the input.
        layout: String,
    },

    /// A `q` or `r` value is missing, non-numeric, fractional or out of range.
    #[error("hex `{key}` has an invalid {axis} coordinate: {value}")]
    InvalidCoordinate {
        /// Key of the offending hex.
        key: String,
        /// Which coordinate failed.
        axis: Axis,
        /// The raw JSON value (or `missing`).
        value: String,
    },

    /// A hex entry is not a JSON object.
    #[error("hex `{key}` is not a JSON object")]
    MalformedHex {
        /// Key of the offending hex.
        key: String,
    },

    /// The document is not valid JSON or lacks `layout`/`hexes`.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading the document failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
