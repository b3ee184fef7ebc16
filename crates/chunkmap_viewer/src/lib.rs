//! chunkmap_viewer - Bevy front end for chunk-aligned area selection
//!
//! Puts the [`chunkmap_core`] selection subsystem on a 2D camera:
//! - Pan with a left, middle or right drag, zoom with the wheel
//! - Box and polygon area selection with Simba snippet output
//! - Hover readout, "go to" coordinate lookup and click-to-copy
//! - Plane switching and an optional chunk grid
//!
//! # Usage
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use chunkmap_viewer::ViewerPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(ViewerPlugin::new().with_chunk_grid(false))
//!         .run();
//! }
//! ```

pub mod commands;
pub mod preferences;
pub mod render;
pub mod tools;
pub mod ui;
pub mod view;

pub use chunkmap_core;

use bevy::prelude::*;
use bevy_egui::{egui, EguiPlugin};
use chunkmap_core::{
    resolve_destination, CoordinateError, Destination, MapConfig, PositionReadout,
    SelectionController, WorldPos, CROSSHAIR_LIFETIME,
};
use std::time::Duration;

use commands::handle_keyboard_shortcuts;
use preferences::ViewerPreferences;
use render::MapRenderPlugin;
use tools::ViewerToolsPlugin;
use ui::ViewerUiPlugin;
use view::ViewportSnapshot;

/// How long a status message stays in the status bar
const STATUS_DURATION: Duration = Duration::from_secs(3);

/// Overrides applied on top of the saved preferences
#[derive(Clone, Debug, Default)]
pub struct ViewerStateConfig {
    pub show_chunk_grid: Option<bool>,
    /// Start position and plane, ignoring the remembered view
    pub start: Option<(WorldPos, u8)>,
    pub start_zoom: Option<f64>,
}

/// Main viewer plugin
///
/// # Example
///
/// ```rust,ignore
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(
///         ViewerPlugin::new()
///             .with_start(WorldPos::new(3222.0, 3218.0), 0)
///             .with_initial_zoom(4.0)
///     )
///     .run();
/// ```
pub struct ViewerPlugin {
    pub initial_state: ViewerStateConfig,
    /// Read and write the preferences file. Default: true
    pub persist_preferences: bool,
}

impl Default for ViewerPlugin {
    fn default() -> Self {
        Self {
            initial_state: ViewerStateConfig::default(),
            persist_preferences: true,
        }
    }
}

impl ViewerPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chunk_grid(mut self, show: bool) -> Self {
        self.initial_state.show_chunk_grid = Some(show);
        self
    }

    /// Open at `center` on `plane` instead of the remembered view
    pub fn with_start(mut self, center: WorldPos, plane: u8) -> Self {
        self.initial_state.start = Some((center, plane));
        self
    }

    pub fn with_initial_zoom(mut self, zoom: f64) -> Self {
        self.initial_state.start_zoom = Some(zoom);
        self
    }

    /// Run with default preferences and never save them
    pub fn without_preferences(mut self) -> Self {
        self.persist_preferences = false;
        self
    }
}

impl Plugin for ViewerPlugin {
    fn build(&self, app: &mut App) {
        let preferences = if self.persist_preferences {
            ViewerPreferences::load()
        } else {
            ViewerPreferences::default()
        };
        bevy::log::info!("Loaded viewer preferences");

        let mut viewer_state = ViewerState::from_preferences(&preferences);
        if let Some(show) = self.initial_state.show_chunk_grid {
            viewer_state.show_chunk_grid = show;
        }
        if let Some((center, plane)) = self.initial_state.start {
            viewer_state.view.center = center;
            viewer_state.view.plane = viewer_state.config.clamp_plane(plane as i32);
        }
        if let Some(zoom) = self.initial_state.start_zoom {
            viewer_state.view.zoom = viewer_state.config.clamp_zoom(zoom);
        }

        app.add_plugins(EguiPlugin::default())
            .add_plugins(ViewerUiPlugin)
            .add_plugins(MapRenderPlugin)
            .add_plugins(ViewerToolsPlugin)
            .insert_resource(viewer_state)
            .insert_resource(preferences)
            .insert_resource(PersistPreferences(self.persist_preferences))
            .init_resource::<SelectionState>()
            .add_systems(Startup, setup_viewer_camera)
            .add_systems(Update, (handle_keyboard_shortcuts, tick_viewer_timers))
            .add_systems(Last, save_preferences_on_exit);
    }
}

#[derive(Resource)]
struct PersistPreferences(bool);

/// The area selection controller as a Bevy resource
#[derive(Resource, Default, Deref, DerefMut)]
pub struct SelectionState(pub SelectionController);

/// A transient line of text in the status bar
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub timer: Timer,
}

/// Crosshair left at the last "go to" destination
#[derive(Debug, Clone)]
pub struct DestinationMarker {
    pub pos: WorldPos,
    pub timer: Timer,
}

/// Global viewer state
#[derive(Resource, Debug, Clone)]
pub struct ViewerState {
    pub view: ViewportSnapshot,
    pub config: MapConfig,
    pub show_chunk_grid: bool,
    /// Readout for the tile under the pointer
    pub hover: Option<PositionReadout>,
    pub status: Option<StatusMessage>,
    pub marker: Option<DestinationMarker>,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::from_preferences(&ViewerPreferences::default())
    }
}

impl ViewerState {
    pub fn from_preferences(preferences: &ViewerPreferences) -> Self {
        Self {
            view: preferences.initial_view(),
            config: preferences.map.clone(),
            show_chunk_grid: preferences.show_chunk_grid,
            hover: None,
            status: None,
            marker: None,
        }
    }

    /// Switch planes, clamped to the configured range. Returns true when the
    /// plane changed.
    pub fn set_plane(&mut self, plane: i32, selection: &mut SelectionController) -> bool {
        let plane = self.config.clamp_plane(plane);
        if plane == self.view.plane {
            return false;
        }
        self.view.plane = plane;
        if let Some(hover) = self.hover.as_mut() {
            *hover = PositionReadout::at(hover.tile.into(), plane);
        }
        selection.plane_changed(&self.view);
        bevy::log::info!("Switched to plane {}", plane);
        true
    }

    /// Keep the camera inside the map bounds
    pub fn clamp_view(&mut self) {
        self.view.clamp_center(&self.config.bounds);
    }

    /// Fly to the coordinate typed into the "go to" field
    pub fn go_to(
        &mut self,
        text: &str,
        selection: &mut SelectionController,
    ) -> Result<Destination, CoordinateError> {
        let destination = resolve_destination(text, self.view.plane, &self.config.bounds)?;
        self.set_plane(destination.plane as i32, selection);
        self.view.center = destination.marker;
        self.view.zoom = self.config.clamp_zoom(destination.zoom);
        self.marker = Some(DestinationMarker {
            pos: destination.marker,
            timer: Timer::new(CROSSHAIR_LIFETIME, TimerMode::Once),
        });
        selection.view_changed();
        Ok(destination)
    }

    pub fn show_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            timer: Timer::new(STATUS_DURATION, TimerMode::Once),
        });
    }

    /// Put `text` on the clipboard and say so in the status bar
    pub fn copy_to_clipboard(&mut self, ctx: &egui::Context, text: &str) {
        ctx.copy_text(text.to_string());
        bevy::log::info!("Copied to clipboard: {}", text);
        self.show_status(format!("Copied to clipboard: {}", text));
    }

    /// Advance the status and marker timers, dropping finished ones
    pub fn tick(&mut self, delta: Duration) {
        if let Some(status) = self.status.as_mut() {
            if status.timer.tick(delta).remaining().is_zero() {
                self.status = None;
            }
        }
        if let Some(marker) = self.marker.as_mut() {
            if marker.timer.tick(delta).remaining().is_zero() {
                self.marker = None;
            }
        }
    }
}

fn tick_viewer_timers(time: Res<Time>, mut viewer: ResMut<ViewerState>) {
    if viewer.status.is_some() || viewer.marker.is_some() {
        viewer.tick(time.delta());
    }
}

/// Spawns the viewer camera if one doesn't exist
fn setup_viewer_camera(mut commands: Commands, camera_query: Query<&Camera2d>) {
    if camera_query.is_empty() {
        commands.spawn(Camera2d);
    }
}

/// Remember the view and grid setting when the app exits
#[allow(deprecated)] // EventReader is deprecated but still works in Bevy 0.17
fn save_preferences_on_exit(
    mut exit_events: bevy::ecs::event::EventReader<AppExit>,
    persist: Res<PersistPreferences>,
    viewer: Res<ViewerState>,
    mut preferences: ResMut<ViewerPreferences>,
) {
    if exit_events.read().next().is_none() || !persist.0 {
        return;
    }
    preferences.show_chunk_grid = viewer.show_chunk_grid;
    preferences.remember_view(&viewer.view);
    if let Err(e) = preferences.save() {
        bevy::log::error!("Failed to save preferences: {}", e);
    }
}
