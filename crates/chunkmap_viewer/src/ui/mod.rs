//! Viewer UI using bevy_egui
//!
//! A toolbar on top, the collapsible panels on the right and a status bar at
//! the bottom. The map itself has no egui panel; it shows through everywhere
//! else.

mod area_panel;
mod position;
mod theme;
mod toolbar;

pub use area_panel::render_area_panel;
pub use position::{render_goto_panel, render_status_bar};
pub use theme::ViewerTheme;
pub use toolbar::render_toolbar;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};
use chunkmap_core::{MapView, PanelId, PanelRegistry, SelectionController};

use crate::{SelectionState, ViewerState};

/// Main UI plugin
pub struct ViewerUiPlugin;

impl Plugin for ViewerUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiState>()
            .init_resource::<ViewerPanels>()
            .add_systems(EguiPrimaryContextPass, render_ui);
    }
}

/// UI state that is not part of the map or the selection
#[derive(Resource)]
pub struct UiState {
    pub panel_width: f32,
    pub goto_text: String,
    /// Why the last "go to" was rejected
    pub goto_error: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            panel_width: 320.0,
            goto_text: String::new(),
            goto_error: None,
        }
    }
}

/// The collapsible panels; at most one is open
#[derive(Resource)]
pub struct ViewerPanels {
    pub registry: PanelRegistry,
    pub area: PanelId,
    pub goto: PanelId,
}

impl Default for ViewerPanels {
    fn default() -> Self {
        let mut registry = PanelRegistry::new();
        let area = registry.register("Area Selection");
        let goto = registry.register("Go to");
        Self {
            registry,
            area,
            goto,
        }
    }
}

impl ViewerPanels {
    /// Open or close a panel and bring the selection controller in line
    pub fn toggle(&mut self, id: PanelId, selection: &mut SelectionController, view: &dyn MapView) {
        for other in self.registry.toggle(id) {
            bevy::log::debug!("Collapsed {:?}", self.registry.title(other));
        }
        self.sync_selection(selection, view);
    }

    /// The selection is live exactly while the area panel is open
    pub fn sync_selection(&self, selection: &mut SelectionController, view: &dyn MapView) {
        if self.registry.is_expanded(self.area) {
            selection.expand(view);
        } else {
            selection.collapse();
        }
    }
}

/// A collapsing header driven by the registry. Returns true when the header
/// was clicked.
fn registry_panel(
    ui: &mut egui::Ui,
    registry: &PanelRegistry,
    id: PanelId,
    add_contents: impl FnOnce(&mut egui::Ui),
) -> bool {
    let title = registry.title(id).unwrap_or_default();
    egui::CollapsingHeader::new(egui::RichText::new(title).strong())
        .id_salt(id)
        .open(Some(registry.is_expanded(id)))
        .show(ui, add_contents)
        .header_response
        .clicked()
}

fn render_ui(
    mut contexts: EguiContexts,
    mut ui_state: ResMut<UiState>,
    mut panels: ResMut<ViewerPanels>,
    mut viewer: ResMut<ViewerState>,
    mut selection: ResMut<SelectionState>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    ViewerTheme::apply(ctx);

    render_toolbar(ctx, &mut viewer, &mut selection);
    render_status_bar(ctx, &viewer);

    let mut clicked = None;
    egui::SidePanel::right("panels")
        .resizable(true)
        .default_width(ui_state.panel_width)
        .show(ctx, |ui| {
            ui_state.panel_width = ui.available_width();
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let area = panels.area;
                    if registry_panel(ui, &panels.registry, area, |ui| {
                        render_area_panel(ui, &mut viewer, &mut selection)
                    }) {
                        clicked = Some(area);
                    }

                    let goto = panels.goto;
                    if registry_panel(ui, &panels.registry, goto, |ui| {
                        render_goto_panel(ui, &mut ui_state, &mut viewer, &mut selection)
                    }) {
                        clicked = Some(goto);
                    }
                });
        });

    if let Some(id) = clicked {
        panels.toggle(id, &mut selection, &viewer.view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ViewportSnapshot;

    #[test]
    fn test_area_panel_drives_selection() {
        let mut panels = ViewerPanels::default();
        let mut selection = SelectionController::new();
        let view = ViewportSnapshot::default();

        panels.toggle(panels.area, &mut selection, &view);
        assert!(selection.is_expanded());
        assert!(selection.output().is_some());

        panels.toggle(panels.area, &mut selection, &view);
        assert!(!selection.is_expanded());
    }

    #[test]
    fn test_opening_goto_collapses_area() {
        let mut panels = ViewerPanels::default();
        let mut selection = SelectionController::new();
        let view = ViewportSnapshot::default();

        panels.toggle(panels.area, &mut selection, &view);
        panels.toggle(panels.goto, &mut selection, &view);
        assert!(panels.registry.is_expanded(panels.goto));
        assert!(!panels.registry.is_expanded(panels.area));
        assert!(!selection.is_expanded());
        // The shape is cached while collapsed
        assert!(selection.box_shape().is_some());
    }
}
