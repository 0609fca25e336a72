#![warn(missing_docs)]
//! HexJSON map viewer.
//!
//! Loads a HexJSON file (or a bundled sample), fits it to a canvas with the
//! `hexjson` layout engine and draws the background grid, the hexes and their
//! keys. `--dump` and `--emit-grid` print JSON instead of opening a window.

mod viewer;

use bevy::app::AppExit;
use bevy::prelude::*;
#[cfg(feature = "native")]
use bevy::remote::{RemotePlugin, http::RemoteHttpPlugin};
use bevy_inspector_egui::quick::WorldInspectorPlugin;
#[cfg(feature = "native")]
use clap::Parser;
use hexjson::HexJson;

use viewer::{HexMap, ViewerConfig, ViewerPlugin};

/// Shown when no file is given.
const SAMPLE_HEXJSON: &str = include_str!("../assets/sample.hexjson");

/// Application state, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum ViewerState {
    /// Map on screen.
    #[default]
    Running,
    /// World inspector open (Tab to toggle).
    Debugging,
}

/// Command-line options.
#[cfg(feature = "native")]
#[derive(Parser, Debug)]
#[command(name = "hexjson-viewer", version, about = "Draws a HexJSON hex map")]
struct Cli {
    /// HexJSON file to draw; a bundled sample is used when omitted.
    file: Option<std::path::PathBuf>,
    /// Canvas width in pixels.
    #[arg(long)]
    width: Option<f32>,
    /// Canvas height in pixels.
    #[arg(long)]
    height: Option<f32>,
    /// Margin around the canvas when fitting the window.
    #[arg(long)]
    margin: Option<f32>,
    /// Fit the map to the window instead of a fixed canvas.
    #[arg(long)]
    fit_window: bool,
    /// Draw the full background grid.
    #[arg(long)]
    grid: bool,
    /// Hide hex key labels.
    #[arg(long)]
    no_labels: bool,
    /// Print the laid-out hexes as JSON and exit.
    #[arg(long, conflicts_with = "emit_grid")]
    dump: bool,
    /// Print the synthesized background grid as HexJSON and exit.
    #[arg(long)]
    emit_grid: bool,
}

/// What to do once the dataset is loaded.
enum Mode {
    Window,
    #[cfg(feature = "native")]
    Dump,
    #[cfg(feature = "native")]
    EmitGrid,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> hexjson::Result<()> {
    let (data, config, mode) = options()?;
    match mode {
        #[cfg(feature = "native")]
        Mode::Dump => {
            let (w, h) = (config.canvas.width, config.canvas.height);
            let rendered = data.render(f64::from(w), f64::from(h))?;
            println!("{}", rendered.to_json_string_pretty()?);
        }
        #[cfg(feature = "native")]
        Mode::EmitGrid => println!("{}", data.grid()?.to_json_string_pretty()?),
        Mode::Window => run_app(HexMap::new(data)?, config),
    }
    Ok(())
}

#[cfg(feature = "native")]
fn options() -> hexjson::Result<(HexJson, ViewerConfig, Mode)> {
    let cli = Cli::parse();
    let data = match &cli.file {
        Some(path) => HexJson::from_path(path)?,
        None => HexJson::from_json_str(SAMPLE_HEXJSON)?,
    };

    let mut config = ViewerConfig::default();
    if let Some(width) = cli.width {
        config.canvas.width = width;
    }
    if let Some(height) = cli.height {
        config.canvas.height = height;
    }
    if let Some(margin) = cli.margin {
        config.canvas.margin = margin;
    }
    config.canvas.fit_window |= cli.fit_window;
    config.show_grid |= cli.grid;
    config.style.show_labels &= !cli.no_labels;

    let mode = if cli.dump {
        Mode::Dump
    } else if cli.emit_grid {
        Mode::EmitGrid
    } else {
        Mode::Window
    };
    Ok((data, config, mode))
}

#[cfg(not(feature = "native"))]
fn options() -> hexjson::Result<(HexJson, ViewerConfig, Mode)> {
    let mut config = ViewerConfig::default();
    config.canvas.fit_window = true;
    config.show_grid = true;
    Ok((HexJson::from_json_str(SAMPLE_HEXJSON)?, config, Mode::Window))
}

fn run_app(map: HexMap, config: ViewerConfig) {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "HexJSON".into(),
            ..default()
        }),
        ..default()
    }))
    .register_type::<ViewerState>()
    .init_state::<ViewerState>()
    .insert_resource(map)
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(ViewerPlugin(config))
    .add_systems(Update, exit_on_esc)
    .add_systems(Update, toggle_inspector)
    .add_plugins(WorldInspectorPlugin::new().run_if(in_state(ViewerState::Debugging)));

    #[cfg(feature = "native")]
    app.add_plugins(RemotePlugin::default())
        .add_plugins(RemoteHttpPlugin::default());

    app.run();
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<ViewerState>>,
    mut next: ResMut<NextState<ViewerState>>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        next.set(match state.get() {
            ViewerState::Running => ViewerState::Debugging,
            ViewerState::Debugging => ViewerState::Running,
        });
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
