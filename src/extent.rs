//! Bounding rectangle of a dataset's offset coordinates.

use crate::error::{Error, Result};

/// Min/max of `q` and `r` over a set of hexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    /// Smallest `q`.
    pub qmin: i32,
    /// Largest `q`.
    pub qmax: i32,
    /// Smallest `r`.
    pub rmin: i32,
    /// Largest `r`.
    pub rmax: i32,
}

impl Extent {
    /// Single pass over `(q, r)` pairs.
    ///
    /// Fails with [`Error::EmptyDataset`] when the iterator is empty.
    pub fn from_coords(coords: impl IntoIterator<Item = (i32, i32)>) -> Result<Self> {
        let mut coords = coords.into_iter();
        let (q, r) = coords.next().ok_or(Error::EmptyDataset)?;
        let first = Self {
            qmin: q,
            qmax: q,
            rmin: r,
            rmax: r,
        };
        Ok(coords.fold(first, |e, (q, r)| Self {
            qmin: e.qmin.min(q),
            qmax: e.qmax.max(q),
            rmin: e.rmin.min(r),
            rmax: e.rmax.max(r),
        }))
    }

    /// Number of columns spanned.
    pub fn qnum(&self) -> u64 {
        (i64::from(self.qmax) - i64::from(self.qmin) + 1) as u64
    }

    /// Number of rows spanned.
    pub fn rnum(&self) -> u64 {
        (i64::from(self.rmax) - i64::from(self.rmin) + 1) as u64
    }

    /// Zero-based column: `q - qmin`.
    pub fn column(&self, q: i32) -> u32 {
        (i64::from(q) - i64::from(self.qmin)) as u32
    }

    /// Zero-based row, counted down from the top: `rmax - r`.
    ///
    /// The row axis is inverted so that larger `r` is drawn higher up.
    pub fn row(&self, r: i32) -> u32 {
        (i64::from(self.rmax) - i64::from(r)) as u32
    }

    /// Whether `(q, r)` lies inside the box.
    pub fn contains(&self, q: i32, r: i32) -> bool {
        (self.qmin..=self.qmax).contains(&q) && (self.rmin..=self.rmax).contains(&r)
    }

    /// Every `(q, r)` in the box, `q` outer and `r` inner.
    pub fn coords(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let (rmin, rmax) = (self.rmin, self.rmax);
        (self.qmin..=self.qmax).flat_map(move |q| (rmin..=rmax).map(move |r| (q, r)))
    }
}
