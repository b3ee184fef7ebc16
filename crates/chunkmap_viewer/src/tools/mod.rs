//! Viewport input - selection pointer events, panning, zoom and click-to-copy

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::{egui, EguiContexts};
use chunkmap_core::{click_copy_text, MapView, PositionReadout, ScreenPos, SelectionController};

use std::ops::DerefMut;

use crate::{SelectionState, ViewerState};

/// A press and release closer than this counts as a click
const CLICK_SLOP_PX: f32 = 4.0;
/// Zoom levels per wheel notch
const ZOOM_STEP: f64 = 0.5;
/// Pixel-unit scroll deltas per wheel notch
const PIXELS_PER_NOTCH: f64 = 100.0;

/// Plugin for viewport input
pub struct ViewerToolsPlugin;

impl Plugin for ViewerToolsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewportInputState>()
            .add_systems(Update, (handle_viewport_input, handle_zoom_input).chain());
    }
}

/// A primary button press on the map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPress {
    pub pos: Vec2,
    /// The selection shape took the press, so it must not pan
    pub taken: bool,
    /// Moved past the click slop; the release will not be a click
    pub moved: bool,
}

/// State for viewport input handling
#[derive(Resource, Default)]
pub struct ViewportInputState {
    pub last_cursor: Option<Vec2>,
    pub is_panning: bool,
    pub pan_start_pos: Option<Vec2>,
    pub press: Option<PointerPress>,
    /// The pointer is over the map rather than a panel
    pub hovering: bool,
}

impl ViewportInputState {
    fn stop_panning(&mut self) {
        self.is_panning = false;
        self.pan_start_pos = None;
    }
}

/// System to feed pointer input to the selection controller and pan the map
fn handle_viewport_input(
    mut contexts: EguiContexts,
    mut viewer: ResMut<ViewerState>,
    mut selection: ResMut<SelectionState>,
    mut input_state: ResMut<ViewportInputState>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };
    let Ok(window) = windows.single() else { return };

    if sync_viewport_size(&mut viewer, window.width(), window.height()) {
        selection.view_changed();
    }

    let released = mouse_buttons.just_released(MouseButton::Left);

    let Some(cursor) = window.cursor_position() else {
        // Drags end on release even when it happens outside the window
        if released {
            selection.pointer_up();
            input_state.press = None;
        }
        if input_state.hovering {
            leave_map(&mut viewer, &mut selection, &mut input_state);
        }
        input_state.stop_panning();
        return;
    };
    let pos = ScreenPos::new(cursor.x, cursor.y);

    // Panels own the pointer unless a drag on the map is already under way
    let egui_wants_pointer = ctx.is_pointer_over_area() || ctx.is_using_pointer();
    let map_busy = selection.is_dragging() || input_state.press.is_some() || input_state.is_panning;
    if egui_wants_pointer && !map_busy {
        if released {
            selection.pointer_up();
        }
        if input_state.hovering {
            leave_map(&mut viewer, &mut selection, &mut input_state);
        }
        return;
    }

    if let Some(press) = input_state.press.as_mut() {
        if !press.moved && press.pos.distance(cursor) > CLICK_SLOP_PX {
            press.moved = true;
        }
    }

    // Middle or right drag always pans; a left drag pans when the shape did not take it
    let left_pan = input_state.press.is_some_and(|p| !p.taken && p.moved);
    let mut panned = false;
    if left_pan || mouse_buttons.pressed(MouseButton::Middle) || mouse_buttons.pressed(MouseButton::Right) {
        if let Some(start_pos) = input_state.pan_start_pos {
            let delta = cursor - start_pos;
            if delta != Vec2::ZERO {
                viewer.view.pan_by(delta.x, delta.y);
                viewer.clamp_view();
                selection.view_changed();
                panned = true;
            }
        }
        input_state.is_panning = true;
        input_state.pan_start_pos = Some(cursor);
    } else if input_state.press.is_none() {
        input_state.stop_panning();
    }

    if panned || !input_state.hovering || input_state.last_cursor != Some(cursor) {
        selection.pointer_move(&viewer.view, pos);
        let world = viewer.view.screen_to_world(pos);
        viewer.hover = Some(PositionReadout::at(world, viewer.view.plane()));
        input_state.last_cursor = Some(cursor);
        input_state.hovering = true;
    }

    if mouse_buttons.just_pressed(MouseButton::Left) && input_state.press.is_none() {
        let taken = selection.pointer_down(&viewer.view, pos);
        input_state.press = Some(PointerPress {
            pos: cursor,
            taken,
            moved: false,
        });
        if !taken {
            input_state.pan_start_pos = Some(cursor);
        }
    }

    if released {
        selection.pointer_up();
        if let Some(press) = input_state.press.take() {
            if !press.taken && !press.moved {
                handle_map_click(ctx, &mut viewer, &mut selection, pos);
            }
        }
        input_state.stop_panning();
    }
}

/// Track the window size. Only writes through `viewer` when the size differs,
/// so the resource is not flagged as changed every frame.
fn sync_viewport_size(
    viewer: &mut impl DerefMut<Target = ViewerState>,
    width: f32,
    height: f32,
) -> bool {
    if viewer.view.size == (width, height) {
        return false;
    }
    viewer.view.resize(width, height)
}

/// The pointer went over a panel or out of the window
fn leave_map(
    viewer: &mut ViewerState,
    selection: &mut SelectionController,
    input_state: &mut ViewportInputState,
) {
    if input_state.hovering {
        selection.pointer_left();
        viewer.hover = None;
        input_state.hovering = false;
        input_state.last_cursor = None;
    }
}

/// A plain click: the draw workflow gets it first, then click-to-copy
fn handle_map_click(
    ctx: &egui::Context,
    viewer: &mut ViewerState,
    selection: &mut SelectionController,
    pos: ScreenPos,
) {
    if selection.click(&viewer.view, pos) {
        return;
    }
    if selection.click_copy_enabled() {
        let text = click_copy_text(viewer.view.screen_to_world(pos));
        viewer.copy_to_clipboard(ctx, &text);
    }
}

/// Zoom level change for one wheel event
fn scroll_zoom_delta(event: &MouseWheel) -> f64 {
    match event.unit {
        MouseScrollUnit::Line => event.y as f64 * ZOOM_STEP,
        MouseScrollUnit::Pixel => event.y as f64 / PIXELS_PER_NOTCH * ZOOM_STEP,
    }
}

/// System to handle zoom input
#[allow(deprecated)] // EventReader is deprecated but still works in Bevy 0.17
fn handle_zoom_input(
    mut contexts: EguiContexts,
    mut viewer: ResMut<ViewerState>,
    mut selection: ResMut<SelectionState>,
    mut scroll_events: bevy::ecs::event::EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };
    let Ok(window) = windows.single() else { return };

    // Scroll areas in the panels get the wheel while the pointer is over them
    let over_ui = ctx.is_pointer_over_area() || ctx.is_using_pointer();
    let anchor = window
        .cursor_position()
        .map(|c| ScreenPos::new(c.x, c.y))
        .unwrap_or(ScreenPos::new(window.width() / 2.0, window.height() / 2.0));

    for event in scroll_events.read() {
        if over_ui {
            continue;
        }
        let zoom = viewer.config.clamp_zoom(viewer.view.zoom + scroll_zoom_delta(event));
        if zoom == viewer.view.zoom {
            continue;
        }
        viewer.view.zoom_around(zoom, anchor);
        viewer.clamp_view();
        selection.view_changed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::entity::Entity;

    fn wheel(unit: MouseScrollUnit, y: f32) -> MouseWheel {
        MouseWheel {
            unit,
            x: 0.0,
            y,
            window: Entity::PLACEHOLDER,
        }
    }

    #[test]
    fn test_same_window_size_leaves_viewer_unchanged() {
        let mut world = World::new();
        world.insert_resource(ViewerState::default());
        let (width, height) = world.resource::<ViewerState>().view.size;
        world.clear_trackers();

        assert!(!sync_viewport_size(&mut world.resource_mut::<ViewerState>(), width, height));
        assert!(!world.is_resource_changed::<ViewerState>());

        assert!(sync_viewport_size(&mut world.resource_mut::<ViewerState>(), 1600.0, 900.0));
        assert!(world.is_resource_changed::<ViewerState>());
        assert_eq!(world.resource::<ViewerState>().view.size, (1600.0, 900.0));
    }

    #[test]
    fn test_scroll_zoom_delta() {
        assert_eq!(scroll_zoom_delta(&wheel(MouseScrollUnit::Line, 1.0)), 0.5);
        assert_eq!(scroll_zoom_delta(&wheel(MouseScrollUnit::Line, -2.0)), -1.0);
        assert_eq!(scroll_zoom_delta(&wheel(MouseScrollUnit::Pixel, 100.0)), 0.5);
    }

    #[test]
    fn test_click_copies_only_while_collapsed() {
        let ctx = egui::Context::default();
        let mut viewer = ViewerState::default();
        let mut selection = SelectionController::new();
        let center = viewer.view.world_to_screen(viewer.view.center);

        handle_map_click(&ctx, &mut viewer, &mut selection, center);
        let status = viewer.status.as_ref().map(|s| s.text.clone());
        assert_eq!(status.as_deref(), Some("Copied to clipboard: [3200, 3200]"));

        viewer.status = None;
        selection.expand(&viewer.view);
        handle_map_click(&ctx, &mut viewer, &mut selection, center);
        assert!(viewer.status.is_none());
    }

    #[test]
    fn test_click_feeds_draw_workflow() {
        let ctx = egui::Context::default();
        let mut viewer = ViewerState::default();
        let mut selection = SelectionController::new();
        selection.expand(&viewer.view);
        selection.press_new(&viewer.view);

        handle_map_click(&ctx, &mut viewer, &mut selection, ScreenPos::new(100.0, 100.0));
        handle_map_click(&ctx, &mut viewer, &mut selection, ScreenPos::new(300.0, 260.0));
        assert!(!selection.draw_state().is_drawing());
        let shape = selection.box_shape().unwrap();
        assert_eq!(shape.width(), 50);
        assert_eq!(shape.height(), 40);
    }
}
