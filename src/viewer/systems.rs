use bevy::log::warn_once;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::egui;

use super::ViewerConfig;
use super::entities::{HexMap, HexTile, MapCamera, PlacedMap, TileMaterials};
use super::map_layout::{Canvas, hex_mesh, place_map};

/// Depth of grid tiles; data tiles and outlines stack above.
const GRID_Z: f32 = 0.0;
const DATA_Z: f32 = 1.0;
const OUTLINE_Z: f32 = 2.0;

// ── Startup ─────────────────────────────────────────────────────────

/// Spawns the orthographic map camera and the tile materials.
pub fn setup_scene(
    mut commands: Commands,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<ViewerConfig>,
) {
    // One world unit per pixel, looking down -z at the canvas.
    commands.spawn((
        Camera3d::default(),
        Projection::Orthographic(OrthographicProjection::default_3d()),
        Transform::from_xyz(0.0, 0.0, 100.0).looking_at(Vec3::ZERO, Vec3::Y),
        MapCamera,
    ));

    let hex = materials.add(StandardMaterial {
        base_color: cfg.style.hex_color,
        unlit: true,
        cull_mode: None,
        ..default()
    });
    let grid = materials.add(StandardMaterial {
        base_color: cfg.style.grid_color,
        unlit: true,
        cull_mode: None,
        ..default()
    });
    commands.insert_resource(TileMaterials { hex, grid });
}

// ── Update: input ───────────────────────────────────────────────────

/// `G` toggles the background grid, `L` toggles labels.
pub fn toggle_display(keys: Res<ButtonInput<KeyCode>>, mut cfg: ResMut<ViewerConfig>) {
    if keys.just_pressed(KeyCode::KeyG) {
        cfg.show_grid = !cfg.show_grid;
    }
    if keys.just_pressed(KeyCode::KeyL) {
        cfg.style.show_labels = !cfg.style.show_labels;
    }
}

// ── Update: layout ──────────────────────────────────────────────────

/// Re-runs the layout engine when the canvas, the grid flag or the data
/// changed, and respawns the hex tiles.
#[allow(clippy::too_many_arguments)]
pub fn relayout(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut placed: ResMut<PlacedMap>,
    map: Res<HexMap>,
    cfg: Res<ViewerConfig>,
    materials: Option<Res<TileMaterials>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    tiles: Query<Entity, With<HexTile>>,
) {
    let Some(materials) = materials else { return };
    let Ok(window) = windows.single() else {
        return;
    };

    let canvas = Canvas::fit(window.size(), &cfg.canvas);
    let up_to_date = placed.canvas == canvas
        && placed.show_grid == cfg.show_grid
        && !map.is_changed()
        && !placed.data.is_empty();
    if up_to_date {
        return;
    }

    let next = match place_map(&map, canvas, cfg.show_grid) {
        Ok(next) => next,
        Err(err) => {
            warn_once!("hexjson layout failed: {err}");
            return;
        }
    };

    for entity in &tiles {
        commands.entity(entity).despawn();
    }

    if next.radius > 0.0 {
        let mesh = meshes.add(hex_mesh(&next.outline));
        let layers = [
            (&next.grid, &materials.grid, GRID_Z, true),
            (&next.data, &materials.hex, DATA_Z, false),
        ];
        for (hexes, material, z, background) in layers {
            for hex in hexes {
                commands.spawn((
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material.clone()),
                    Transform::from_xyz(hex.center.x, hex.center.y, z),
                    HexTile {
                        key: hex.key.clone(),
                        background,
                    },
                    Name::new(hex.key.clone()),
                ));
            }
        }
    }

    info!(
        width = canvas.width,
        height = canvas.height,
        radius = next.radius,
        hexes = next.data.len(),
        grid = next.grid.len(),
        "laid out hex map"
    );
    *placed = next;
}

// ── Update: drawing ─────────────────────────────────────────────────

/// Strokes every hex outline, grid first.
pub fn draw_outlines(mut gizmos: Gizmos, placed: Res<PlacedMap>, cfg: Res<ViewerConfig>) {
    if placed.radius <= 0.0 {
        return;
    }
    for hex in placed.grid.iter().chain(&placed.data) {
        let closed = hex.outline.iter().chain(hex.outline.first());
        gizmos.linestrip(
            closed.map(|v| v.extend(OUTLINE_Z)),
            cfg.style.stroke_color,
        );
    }
}

/// Paints each data tile's key at its center.
pub fn draw_hex_labels(
    mut egui_ctx: Query<&mut bevy_egui::EguiContext>,
    camera_q: Query<(&Camera, &GlobalTransform), With<MapCamera>>,
    tiles: Query<(&HexTile, &Transform)>,
    placed: Res<PlacedMap>,
    cfg: Res<ViewerConfig>,
    mut ready: Local<bool>,
) {
    if !*ready {
        *ready = true;
        return;
    }
    if !labels_visible(&cfg, &placed) {
        return;
    }
    let Ok((camera, cam_gt)) = camera_q.single() else {
        return;
    };
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };

    let painter = ctx.get_mut().layer_painter(egui::LayerId::background());
    let [r, g, b] = cfg.style.label_color;

    for (tile, transform) in &tiles {
        if tile.background {
            continue;
        }
        let center = transform.translation.truncate().extend(OUTLINE_Z);
        if let Ok(viewport) = camera.world_to_viewport(cam_gt, center) {
            painter.text(
                egui::pos2(viewport.x, viewport.y),
                egui::Align2::CENTER_CENTER,
                &tile.key,
                egui::FontId::proportional(cfg.style.label_size),
                egui::Color32::from_rgb(r, g, b),
            );
        }
    }
}

/// Whether labels should be painted this frame. At radius zero every center
/// collapses onto the canvas origin, so nothing is labelled.
pub fn labels_visible(cfg: &ViewerConfig, placed: &PlacedMap) -> bool {
    cfg.style.show_labels && placed.radius > 0.0
}
