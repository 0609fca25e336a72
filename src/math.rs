//! Pure sizing and projection helpers.
//!
//! Everything in this module works on plain numbers so the packing formulas
//! can be unit-tested without a dataset.

use bevy::math::DVec2;

use crate::extent::Extent;
use crate::layout::{OffsetAxis, OffsetLayout};

/// `sqrt(3)`, the ratio of hex width to hex radius.
pub const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Flat-to-flat width of a hex with the given radius.
pub fn hex_width(radius: f64) -> f64 {
    radius * SQRT_3
}

/// Largest hex radius for which the whole `qnum x rnum` grid fits `width x height`.
///
/// Row layouts need `qnum + 0.5` hex widths across (alternate rows are shoved
/// half a hex) and `rnum + 1/3` row pitches of `1.5 R` down; column layouts
/// swap the roles. The tighter axis wins. Non-positive or NaN results clamp to
/// zero.
///
/// # Examples
/// ```
/// # use hexjson::extent::Extent;
/// # use hexjson::layout::OffsetLayout;
/// # use hexjson::math::max_radius;
/// let extent = Extent { qmin: 0, qmax: 1, rmin: 0, rmax: 0 };
/// let r = max_radius(OffsetLayout::OddR, &extent, 100.0, 100.0);
/// assert!((r - 23.094).abs() < 1e-3);
/// ```
pub fn max_radius(layout: OffsetLayout, extent: &Extent, width: f64, height: f64) -> f64 {
    let qnum = extent.qnum() as f64;
    let rnum = extent.rnum() as f64;
    let radius = match layout.offset_axis() {
        OffsetAxis::Rows => f64::min(
            width / ((qnum + 0.5) * SQRT_3),
            height / ((rnum + 1.0 / 3.0) * 1.5),
        ),
        OffsetAxis::Columns => f64::min(
            height / ((rnum + 0.5) * SQRT_3),
            width / ((qnum + 1.0 / 3.0) * 1.5),
        ),
    };
    if radius > 0.0 { radius } else { 0.0 }
}

/// Pixel center of the hex at normalized column `qc`, row `rc`.
///
/// Pixel space has its origin at the top-left of the canvas with y pointing
/// down. Rows (row layouts) or columns (column layouts) matching the layout's
/// parity sit a full hex width in; the others half a width.
pub fn project(layout: OffsetLayout, hex_width: f64, hex_radius: f64, qc: u32, rc: u32) -> DVec2 {
    let pitch = hex_radius * 1.5;
    let offset = |index: u32| {
        if layout.parity().matches(index) {
            hex_width
        } else {
            hex_width / 2.0
        }
    };
    match layout.offset_axis() {
        OffsetAxis::Rows => DVec2::new(
            qc as f64 * hex_width + offset(rc),
            rc as f64 * pitch + hex_radius,
        ),
        OffsetAxis::Columns => DVec2::new(
            qc as f64 * pitch + hex_radius,
            rc as f64 * hex_width + offset(qc),
        ),
    }
}
