//! Top toolbar: plane selector and view toggles

use bevy_egui::egui;
use chunkmap_core::SelectionController;

use crate::ViewerState;

pub fn render_toolbar(
    ctx: &egui::Context,
    viewer: &mut ViewerState,
    selection: &mut SelectionController,
) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label("Plane");
            let current = viewer.view.plane;
            for plane in viewer.config.min_plane..=viewer.config.max_plane {
                if ui
                    .selectable_label(current == plane, plane.to_string())
                    .on_hover_text("PageUp / PageDown")
                    .clicked()
                {
                    viewer.set_plane(plane as i32, selection);
                }
            }

            ui.separator();

            ui.checkbox(&mut viewer.show_chunk_grid, "Chunk grid")
                .on_hover_text("Toggle chunk grid (G)");

            ui.separator();

            if ui.button("Reset view").clicked() {
                viewer.view.center = viewer.config.start;
                viewer.view.zoom = viewer.config.clamp_zoom(viewer.config.start_zoom);
                selection.view_changed();
            }
        });
    });
}
