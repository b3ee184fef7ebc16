//! Standalone chunk map viewer
//!
//! Run with: chunkmap_viewer

use bevy::prelude::*;
use bevy::window::WindowResolution;
use chunkmap_viewer::ViewerPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Chunk Map Viewer".to_string(),
                // Screen positions are logical pixels; keep them equal to egui points
                resolution: WindowResolution::new(1600, 900).with_scale_factor_override(1.0),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(ViewerPlugin::default())
        .run();
}
