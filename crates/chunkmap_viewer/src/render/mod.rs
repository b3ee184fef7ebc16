//! Map rendering: camera sync plus the egui overlays drawn over the map
//!
//! The overlays are painted on egui's background layer so every panel stays
//! on top of them.

mod overlay;

pub use overlay::{chunk_grid_lines, cursor_icon, shape_fill, tile_class_color};

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};
use chunkmap_core::{MapView, SelectionMode};

use crate::{SelectionState, ViewerState};

/// Plugin for map rendering
pub struct MapRenderPlugin;

impl Plugin for MapRenderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb(0.07, 0.08, 0.1)))
            .add_systems(Update, update_camera_from_view)
            .add_systems(EguiPrimaryContextPass, paint_map_overlay);
    }
}

/// System to update camera based on the viewport snapshot
fn update_camera_from_view(
    viewer: Res<ViewerState>,
    mut camera_query: Query<(&mut Transform, &mut Projection), With<Camera2d>>,
) {
    if !viewer.is_changed() {
        return;
    }
    for (mut transform, mut projection) in camera_query.iter_mut() {
        transform.translation.x = viewer.view.center.x as f32;
        transform.translation.y = viewer.view.center.y as f32;

        if let Projection::Orthographic(ref mut ortho) = *projection {
            ortho.scale = (1.0 / viewer.view.pixels_per_unit()) as f32;
        }
    }
}

/// System to paint grid, selection and position overlays
fn paint_map_overlay(
    mut contexts: EguiContexts,
    viewer: Res<ViewerState>,
    mut selection: ResMut<SelectionState>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };
    let painter = ctx.layer_painter(egui::LayerId::background());
    let view = &viewer.view;

    if viewer.show_chunk_grid {
        overlay::draw_chunk_grid(&painter, view);
    }
    overlay::draw_map_border(&painter, view, &viewer.config.bounds);

    overlay::draw_highlight(&painter, selection.highlight_quads(view));
    let filled = selection.mode() == SelectionMode::Box;
    if let Some(shape) = selection.active_shape() {
        overlay::draw_shape(&painter, view, shape, filled);
    }
    if let Some(preview) = selection.draw_preview() {
        overlay::draw_preview(&painter, view, &preview);
    }
    if let Some(pos) = selection.insertion_preview(view) {
        overlay::draw_insertion_preview(&painter, pos);
    }

    if let Some(readout) = viewer.hover {
        if !selection.hides_position_rect(view) {
            overlay::draw_world_rect(&painter, view, &readout.hover_rect(), overlay::HOVER_STROKE);
        }
    }
    if let Some(marker) = &viewer.marker {
        overlay::draw_crosshair(&painter, view.world_to_screen(marker.pos));
    }

    if viewer.hover.is_some() && !ctx.is_pointer_over_area() {
        ctx.set_cursor_icon(cursor_icon(selection.cursor_hint(view)));
    }
}
