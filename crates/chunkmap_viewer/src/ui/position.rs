//! "Go to" panel and the status bar with the pointer readout

use bevy_egui::egui;
use chunkmap_core::SelectionController;

use super::{UiState, ViewerTheme};
use crate::ViewerState;

pub fn render_goto_panel(
    ui: &mut egui::Ui,
    ui_state: &mut UiState,
    viewer: &mut ViewerState,
    selection: &mut SelectionController,
) {
    let mut submit = false;
    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut ui_state.goto_text)
                .hint_text("plane, x, y or packed id")
                .desired_width(ui.available_width() - 40.0),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            submit = true;
        }
        if ui.button("Go").clicked() {
            submit = true;
        }
    });

    if submit {
        submit_goto(ui_state, viewer, selection);
    }

    if let Some(error) = &ui_state.goto_error {
        ui.label(egui::RichText::new(error).color(ViewerTheme::ERROR));
    }
}

/// Resolve the typed coordinate and move the view there
fn submit_goto(ui_state: &mut UiState, viewer: &mut ViewerState, selection: &mut SelectionController) {
    match viewer.go_to(&ui_state.goto_text, selection) {
        Ok(destination) => {
            ui_state.goto_error = None;
            viewer.show_status(format!(
                "Moved to [{}, {}] on plane {}",
                destination.coordinate.x, destination.coordinate.y, destination.plane
            ));
        }
        Err(e) => {
            bevy::log::warn!("Go to failed: {}", e);
            ui_state.goto_error = Some(e.to_string());
        }
    }
}

pub fn render_status_bar(ctx: &egui::Context, viewer: &ViewerState) {
    egui::TopBottomPanel::bottom("status_bar")
        .exact_height(22.0)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(readout_text(viewer));
                ui.separator();
                ui.label(
                    egui::RichText::new(format!("Zoom {:.1}", viewer.view.zoom))
                        .color(ViewerTheme::TEXT_MUTED),
                );
                if let Some(status) = &viewer.status {
                    ui.separator();
                    ui.label(egui::RichText::new(&status.text).color(ViewerTheme::ACCENT_BLUE));
                }
            });
        });
}

fn readout_text(viewer: &ViewerState) -> String {
    match &viewer.hover {
        Some(readout) => format!("{}  {}", readout.chunk_text(), readout.game_text()),
        None => format!("Plane {}", viewer.view.plane),
    }
}
