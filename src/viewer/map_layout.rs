use bevy::asset::RenderAssetUsages;
use bevy::math::DVec2;
use bevy::mesh::Indices;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;
use hexjson::RenderedHexes;

use super::CanvasSettings;
use super::entities::{HexMap, PlacedMap};

/// Screen rectangle the engine lays hexes out in, expressed in world units.
///
/// Pixel space has its origin at the canvas' top-left with y down; world space
/// is centered on the camera with y up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Canvas {
    /// World x of the canvas' left edge.
    pub left: f32,
    /// World y of the canvas' top edge.
    pub top: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Canvas {
    /// Canvas for the given window size, centered on the origin.
    pub fn fit(window: Vec2, settings: &CanvasSettings) -> Self {
        let (width, height) = if settings.fit_window {
            (
                (window.x - 2.0 * settings.margin).max(0.0),
                (window.y - 2.0 * settings.margin).max(0.0),
            )
        } else {
            (settings.width, settings.height)
        };
        Self {
            left: -width / 2.0,
            top: height / 2.0,
            width,
            height,
        }
    }

    /// Maps a pixel-space point to world space.
    pub fn to_world(&self, p: DVec2) -> Vec2 {
        Vec2::new(self.left + p.x as f32, self.top - p.y as f32)
    }
}

/// One hex ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedHex {
    /// Hex key.
    pub key: String,
    /// World-space center.
    pub center: Vec2,
    /// World-space outline, closed by repeating the first vertex when drawn.
    pub outline: [Vec2; 6],
}

/// Lays out the data (and the grid, if `show_grid`) against `canvas`.
///
/// The grid covers the data's whole bounding box, so it is only synthesized
/// when it will be drawn.
pub fn place_map(map: &HexMap, canvas: Canvas, show_grid: bool) -> hexjson::Result<PlacedMap> {
    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    let data = map.data.render(w, h)?;
    let grid = if show_grid {
        let grid = map.data.grid()?;
        place(&grid.render(w, h)?, &canvas)
    } else {
        Vec::new()
    };
    let shape = data.shape();
    Ok(PlacedMap {
        canvas,
        show_grid,
        radius: shape.radius as f32,
        outline: shape.vertices.map(|v| Vec2::new(v.x as f32, -v.y as f32)),
        grid,
        data: place(&data, &canvas),
    })
}

fn place(rendered: &RenderedHexes<'_>, canvas: &Canvas) -> Vec<PlacedHex> {
    rendered
        .iter()
        .map(|hex| PlacedHex {
            key: hex.key().to_owned(),
            center: canvas.to_world(hex.center()),
            outline: hex.outline(rendered.shape()).map(|v| canvas.to_world(v)),
        })
        .collect()
}

/// Triangle-fan mesh of one hex centered on the origin, facing +z.
pub fn hex_mesh(outline: &[Vec2; 6]) -> Mesh {
    let extent = outline
        .iter()
        .fold(Vec2::ZERO, |acc, v| acc.max(v.abs()))
        .max(Vec2::splat(f32::EPSILON));

    let mut positions = vec![[0.0, 0.0, 0.0]];
    let mut uvs = vec![[0.5, 0.5]];
    for v in outline {
        positions.push([v.x, v.y, 0.0]);
        let uv = Vec2::new(0.5, 0.5) + Vec2::new(v.x, -v.y) / extent * 0.5;
        uvs.push(uv.to_array());
    }
    let normals = vec![[0.0_f32, 0.0, 1.0]; positions.len()];

    let mut indices = Vec::with_capacity(18);
    for i in 0..6u16 {
        indices.extend([0, i + 1, (i + 1) % 6 + 1]);
    }

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U16(indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexjson::{HexCell, HexJson, OffsetLayout};

    fn settings(fit_window: bool) -> CanvasSettings {
        CanvasSettings {
            width: 480.0,
            height: 400.0,
            margin: 10.0,
            fit_window,
        }
    }

    fn sample_map() -> HexMap {
        let mut data = HexJson::new(OffsetLayout::OddR);
        data.extend([
            HexCell::new("A", 0, 0),
            HexCell::new("B", 2, 0),
            HexCell::new("C", 1, 2),
        ]);
        HexMap::new(data).unwrap()
    }

    // ── Canvas ──────────────────────────────────────────────────────

    #[test]
    fn fixed_canvas_ignores_window() {
        let canvas = Canvas::fit(Vec2::new(1280.0, 720.0), &settings(false));
        assert_eq!((canvas.width, canvas.height), (480.0, 400.0));
        assert_eq!((canvas.left, canvas.top), (-240.0, 200.0));
    }

    #[test]
    fn fitted_canvas_subtracts_margins() {
        let canvas = Canvas::fit(Vec2::new(800.0, 600.0), &settings(true));
        assert_eq!((canvas.width, canvas.height), (780.0, 580.0));
        assert_eq!(canvas.left, -390.0);
    }

    #[test]
    fn tiny_window_gives_empty_canvas() {
        let canvas = Canvas::fit(Vec2::new(12.0, 5.0), &settings(true));
        assert_eq!((canvas.width, canvas.height), (0.0, 0.0));
    }

    #[test]
    fn pixel_corners_map_to_canvas_corners() {
        let canvas = Canvas::fit(Vec2::ZERO, &settings(false));
        assert_eq!(canvas.to_world(DVec2::ZERO), Vec2::new(-240.0, 200.0));
        assert_eq!(
            canvas.to_world(DVec2::new(480.0, 400.0)),
            Vec2::new(240.0, -200.0)
        );
    }

    // ── place_map ───────────────────────────────────────────────────

    #[test]
    fn grid_is_only_placed_when_asked() {
        let map = sample_map();
        let canvas = Canvas::fit(Vec2::ZERO, &settings(false));
        let without = place_map(&map, canvas, false).unwrap();
        let with = place_map(&map, canvas, true).unwrap();
        assert!(without.grid.is_empty());
        assert_eq!(with.grid.len(), 3 * 3);
        assert_eq!(without.data, with.data);
        assert!(with.show_grid && !without.show_grid);
    }

    #[test]
    fn wide_sparse_map_skips_the_grid_when_hidden() {
        // A full grid here would be billions of hexes.
        let mut data = HexJson::new(OffsetLayout::EvenQ);
        data.extend([
            HexCell::new("W", -100_000, -100_000),
            HexCell::new("E", 100_000, 100_000),
        ]);
        let map = HexMap::new(data).unwrap();
        let placed = place_map(&map, Canvas::fit(Vec2::ZERO, &settings(false)), false).unwrap();
        assert!(placed.grid.is_empty());
        assert_eq!(placed.data.len(), 2);
    }

    #[test]
    fn empty_dataset_is_not_a_map() {
        assert!(HexMap::new(HexJson::new(OffsetLayout::OddR)).is_err());
    }

    #[test]
    fn placed_hexes_stay_on_canvas() {
        let map = sample_map();
        let canvas = Canvas::fit(Vec2::ZERO, &settings(false));
        let placed = place_map(&map, canvas, true).unwrap();
        for hex in placed.grid.iter().chain(&placed.data) {
            for v in hex.outline {
                assert!(v.x >= canvas.left - 1e-3 && v.x <= -canvas.left + 1e-3);
                assert!(v.y <= canvas.top + 1e-3 && v.y >= -canvas.top - 1e-3);
            }
        }
    }

    #[test]
    fn outline_is_flipped_to_world() {
        let map = sample_map();
        let placed = place_map(&map, Canvas::fit(Vec2::ZERO, &settings(false)), false).unwrap();
        // Pointy-top: first vertex is the top one, so positive y in world space.
        assert!((placed.outline[0] - Vec2::new(0.0, placed.radius)).length() < 1e-4);
    }

    // ── hex_mesh ────────────────────────────────────────────────────

    #[test]
    fn mesh_is_a_six_triangle_fan() {
        let outline = std::array::from_fn(|i| {
            let a = i as f32 * std::f32::consts::FRAC_PI_3;
            Vec2::new(a.cos(), a.sin())
        });
        let mesh = hex_mesh(&outline);
        assert_eq!(mesh.count_vertices(), 7);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(18));
    }
}
