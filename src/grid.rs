//! Background grid: every coordinate in a dataset's bounding box.

use bevy::log::debug;

use crate::dataset::{HexCell, HexJson};
use crate::error::Result;

/// Key of a synthesized grid hex, e.g. `Q3R-1`.
pub fn grid_key(q: i32, r: i32) -> String {
    format!("Q{q}R{r}")
}

/// Builds a dataset with the same layout as `data` holding one attribute-less
/// hex per `(q, r)` in its extent, including coordinates `data` leaves empty.
///
/// Laying the result out at the same size as `data` lines the two up exactly,
/// since they share layout and extent.
///
/// # Examples
/// ```
/// # use hexjson::{HexCell, HexJson, OffsetLayout, grid_for_hexjson};
/// let mut data = HexJson::new(OffsetLayout::EvenQ);
/// data.extend([HexCell::new("A", 0, 0), HexCell::new("B", 2, 1)]);
/// let grid = grid_for_hexjson(&data)?;
/// assert_eq!(grid.len(), 6);
/// assert!(grid.get("Q1R0").is_some());
/// # Ok::<(), hexjson::Error>(())
/// ```
pub fn grid_for_hexjson(data: &HexJson) -> Result<HexJson> {
    let extent = data.extent()?;
    let mut grid = HexJson::new(data.layout());
    grid.extend(
        extent
            .coords()
            .map(|(q, r)| HexCell::new(grid_key(q, r), q, r)),
    );
    debug_assert!(data.iter().all(|cell| extent.contains(cell.q, cell.r)));
    debug!(
        source = data.len(),
        grid = grid.len(),
        "synthesized background grid"
    );
    Ok(grid)
}
