//! HexJSON map drawing: filled hex tiles, gizmo outlines and key labels.
//!
//! The dataset and its background grid are laid out against the current
//! canvas whenever the canvas size, the grid flag or the data changes; the
//! grid is drawn first, then the data hexes, then labels.

mod entities;
mod map_layout;
mod systems;

pub use entities::HexMap;

use bevy::prelude::*;

/// Top-level viewer configuration.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct ViewerConfig {
    /// Where on screen the map is fitted.
    pub canvas: CanvasSettings,
    /// Colours and labels.
    pub style: StyleSettings,
    /// Draw the full background grid beneath the data hexes.
    pub show_grid: bool,
    /// Background clear color.
    pub clear_color: Color,
}

/// Target area the layout engine sizes hexes against.
#[derive(Clone, Debug, Reflect)]
pub struct CanvasSettings {
    /// Canvas width in pixels (ignored when `fit_window` is set).
    pub width: f32,
    /// Canvas height in pixels (ignored when `fit_window` is set).
    pub height: f32,
    /// Space kept free around the canvas when fitting the window.
    pub margin: f32,
    /// Follow the window size instead of the fixed `width`/`height`.
    pub fit_window: bool,
}

/// Drawing style for tiles, outlines and labels.
#[derive(Clone, Debug, Reflect)]
pub struct StyleSettings {
    /// Fill of data hexes.
    pub hex_color: Color,
    /// Fill of background grid hexes.
    pub grid_color: Color,
    /// Outline drawn around every hex.
    pub stroke_color: Color,
    /// Draw each data hex's key at its center.
    pub show_labels: bool,
    /// Label font size in points.
    pub label_size: f32,
    /// Label colour as sRGB bytes.
    pub label_color: [u8; 3],
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasSettings {
                width: 480.0,
                height: 400.0,
                margin: 10.0,
                fit_window: false,
            },
            style: StyleSettings {
                hex_color: Color::srgb_u8(0xb0, 0xe8, 0xf0),
                grid_color: Color::srgb_u8(0xee, 0xee, 0xee),
                stroke_color: Color::WHITE,
                show_labels: true,
                label_size: 11.0,
                label_color: [0x10, 0x10, 0x10],
            },
            show_grid: false,
            clear_color: Color::srgb(0.78, 0.8, 0.82),
        }
    }
}

/// Viewer plugin: camera, materials, relayout and drawing systems.
pub struct ViewerPlugin(pub ViewerConfig);

impl Plugin for ViewerPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ViewerConfig>()
            .register_type::<entities::HexTile>()
            .insert_resource(self.0.clone())
            .insert_resource(ClearColor(self.0.clear_color))
            .init_resource::<entities::PlacedMap>()
            .add_systems(Startup, systems::setup_scene)
            .add_systems(Update, systems::toggle_display)
            .add_systems(
                Update,
                systems::relayout
                    .after(systems::toggle_display)
                    .run_if(resource_exists::<HexMap>),
            )
            .add_systems(Update, systems::draw_outlines.after(systems::relayout))
            .add_systems(
                Update,
                systems::draw_hex_labels
                    .after(systems::relayout)
                    .run_if(|cfg: Res<ViewerConfig>| cfg.style.show_labels),
            );
    }
}
