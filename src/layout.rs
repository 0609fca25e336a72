//! The four HexJSON offset layouts and the metadata each one implies.
//!
//! `*-r` layouts are pointy-top with every other **row** shifted by half a hex;
//! `*-q` layouts are flat-top with every other **column** shifted.

use std::fmt;
use std::str::FromStr;

use hexx::HexOrientation;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Offset coordinate convention of a HexJSON dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OffsetLayout {
    /// Pointy-top, odd rows shoved right.
    OddR,
    /// Pointy-top, even rows shoved right.
    EvenR,
    /// Flat-top, odd columns shoved down.
    OddQ,
    /// Flat-top, even columns shoved down.
    EvenQ,
}

/// Which axis alternates its half-hex offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetAxis {
    /// Rows are offset horizontally.
    Rows,
    /// Columns are offset vertically.
    Columns,
}

/// Which normalized rows/columns get the full-width offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    /// Odd indices.
    Odd,
    /// Even indices.
    Even,
}

impl Parity {
    /// Whether `index` has this parity.
    pub fn matches(self, index: u32) -> bool {
        match self {
            Self::Odd => index % 2 == 1,
            Self::Even => index % 2 == 0,
        }
    }
}

/// A coordinate axis, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Column-like axis.
    Q,
    /// Row-like axis.
    R,
}

impl Axis {
    /// Field name in a HexJSON hex object.
    pub fn field(self) -> &'static str {
        match self {
            Self::Q => "q",
            Self::R => "r",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

impl OffsetLayout {
    /// All four layouts.
    pub const ALL: [Self; 4] = [Self::OddR, Self::EvenR, Self::OddQ, Self::EvenQ];

    /// The HexJSON layout code.
    pub fn code(self) -> &'static str {
        match self {
            Self::OddR => "odd-r",
            Self::EvenR => "even-r",
            Self::OddQ => "odd-q",
            Self::EvenQ => "even-q",
        }
    }

    /// Pointy-top for row layouts, flat-top for column layouts.
    pub fn orientation(self) -> HexOrientation {
        match self.offset_axis() {
            OffsetAxis::Rows => HexOrientation::Pointy,
            OffsetAxis::Columns => HexOrientation::Flat,
        }
    }

    /// The axis that alternates.
    pub fn offset_axis(self) -> OffsetAxis {
        match self {
            Self::OddR | Self::EvenR => OffsetAxis::Rows,
            Self::OddQ | Self::EvenQ => OffsetAxis::Columns,
        }
    }

    /// The parity whose rows/columns sit a full hex width in.
    pub fn parity(self) -> Parity {
        match self {
            Self::OddR | Self::OddQ => Parity::Odd,
            Self::EvenR | Self::EvenQ => Parity::Even,
        }
    }
}

impl fmt::Display for OffsetLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for OffsetLayout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|layout| layout.code() == s)
            .ok_or_else(|| Error::UnsupportedLayout {
                layout: s.to_owned(),
            })
    }
}
