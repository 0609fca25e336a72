use bevy::prelude::*;
use hexjson::HexJson;

use super::map_layout::{Canvas, PlacedHex};

/// The dataset being shown. Its background grid is synthesized on demand by
/// the layout pass, only while the grid is switched on.
#[derive(Resource)]
pub struct HexMap {
    /// Data hexes.
    pub data: HexJson,
}

impl HexMap {
    /// Wraps a dataset; fails if it is empty.
    pub fn new(data: HexJson) -> hexjson::Result<Self> {
        data.extent()?;
        Ok(Self { data })
    }
}

/// World-space result of the latest layout pass.
#[derive(Resource, Default)]
pub struct PlacedMap {
    /// Canvas the pass was fitted to.
    pub canvas: Canvas,
    /// Whether the grid was placed.
    pub show_grid: bool,
    /// Hex radius in pixels.
    pub radius: f32,
    /// Outline relative to a hex center, world orientation (y up).
    pub outline: [Vec2; 6],
    /// Background grid hexes (empty when the grid is off).
    pub grid: Vec<PlacedHex>,
    /// Data hexes.
    pub data: Vec<PlacedHex>,
}

/// A spawned hex tile.
#[derive(Component, Reflect)]
pub struct HexTile {
    /// Key of the hex this tile fills.
    pub key: String,
    /// Whether the tile belongs to the background grid.
    pub background: bool,
}

/// Marker for the map camera.
#[derive(Component)]
pub struct MapCamera;

/// Fill materials for data and grid tiles.
#[derive(Resource)]
pub struct TileMaterials {
    /// Data hex fill.
    pub hex: Handle<StandardMaterial>,
    /// Grid hex fill.
    pub grid: Handle<StandardMaterial>,
}
