//! Area selection panel: snippets, mode toggle, shape fields and tile list

use bevy_egui::egui;
use chunkmap_core::{
    Axis, BoxField, BoxFields, DrawState, GamePoint, SelectionController, SelectionMode,
    SelectionOutput,
};

use super::ViewerTheme;
use crate::ViewerState;

/// The coordinate list scrolls past this height
const TILE_LIST_MAX_HEIGHT: f32 = 160.0;

pub fn render_area_panel(
    ui: &mut egui::Ui,
    viewer: &mut ViewerState,
    selection: &mut SelectionController,
) {
    ui.horizontal(|ui| {
        for mode in [SelectionMode::Box, SelectionMode::Polygon] {
            if ui
                .selectable_label(selection.mode() == mode, mode.label())
                .on_hover_text(match mode {
                    SelectionMode::Box => "Box selection (B)",
                    SelectionMode::Polygon => "Polygon selection (P)",
                })
                .clicked()
            {
                selection.switch_mode(mode, &viewer.view);
            }
        }

        ui.separator();

        let drawing = selection.draw_state().is_drawing();
        let label = if drawing { "Cancel" } else { "New" };
        if ui.button(label).on_hover_text("Draw a new shape (N)").clicked() {
            selection.press_new(&viewer.view);
        }
    });

    if let Some(hint) = draw_hint(selection.draw_state()) {
        ui.label(egui::RichText::new(hint).color(ViewerTheme::WARNING));
        return;
    }

    let Some(output) = selection.output().cloned() else {
        ui.label("No area selected");
        return;
    };

    ui.separator();
    snippet_row(ui, viewer, "Simba 1.4", &output.setup_chunk_snippet());
    snippet_row(ui, viewer, "Simba 2.0", &output.setup_snippet());
    ui.separator();

    match (selection.mode(), output.box_fields) {
        (SelectionMode::Box, Some(fields)) => {
            ui.label(egui::RichText::new(fields.label()).monospace());
            if let Some((field, value)) = box_field_grid(ui, &fields) {
                selection.edit_box_field(&viewer.view, field, value);
            }
        }
        _ => {
            if let Some((index, axis, value)) = vertex_rows(ui, &output.vertices) {
                selection.edit_vertex_field(&viewer.view, index, axis, value);
            }
        }
    }

    ui.separator();
    let text = coordinate_list_text(&output);
    ui.horizontal(|ui| {
        ui.label("Coordinates");
        if ui.small_button("Copy").clicked() {
            viewer.copy_to_clipboard(ui.ctx(), &text);
        }
    });
    egui::ScrollArea::vertical()
        .id_salt("coordinate_list")
        .max_height(TILE_LIST_MAX_HEIGHT)
        .show(ui, |ui| {
            let mut shown = text.as_str();
            ui.add(
                egui::TextEdit::multiline(&mut shown)
                    .font(egui::TextStyle::Monospace)
                    .desired_rows(4)
                    .desired_width(f32::INFINITY),
            );
        });
}

/// Full JSON tile list (or the "too large" message), shown and copied as is
fn coordinate_list_text(output: &SelectionOutput) -> String {
    output.tiles_text()
}

/// Instruction shown while a new shape is being placed
fn draw_hint(state: &DrawState) -> Option<&'static str> {
    match state {
        DrawState::Idle => None,
        DrawState::PlacingFirstCorner => Some("Click the first corner"),
        DrawState::PlacingSecondCorner { .. } => Some("Click the opposite corner"),
        DrawState::PlacingFirstVertex { .. } => Some("Click to place the first vertex"),
        DrawState::PlacingVertices { points, .. } if points.len() >= 3 => {
            Some("Click the first vertex to close the outline")
        }
        DrawState::PlacingVertices { .. } => Some("Click to add a vertex"),
    }
}

fn snippet_row(ui: &mut egui::Ui, viewer: &mut ViewerState, label: &str, snippet: &str) {
    ui.label(egui::RichText::new(label).small());
    ui.horizontal(|ui| {
        let mut text = snippet;
        ui.add(
            egui::TextEdit::singleline(&mut text)
                .font(egui::TextStyle::Monospace)
                .desired_width(ui.available_width() - 48.0),
        );
        if ui.small_button("Copy").clicked() {
            viewer.copy_to_clipboard(ui.ctx(), snippet);
        }
    });
}

fn int_field(ui: &mut egui::Ui, label: &str, value: i32) -> Option<i32> {
    ui.label(label);
    let mut edited = value;
    let changed = ui.add(egui::DragValue::new(&mut edited).speed(1.0)).changed();
    (changed && edited != value).then_some(edited)
}

/// Width/height and both corners in game coordinates. Returns the edited field.
fn box_field_grid(ui: &mut egui::Ui, fields: &BoxFields) -> Option<(BoxField, i32)> {
    let mut edit = None;
    egui::Grid::new("box_fields")
        .num_columns(4)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            let rows = [
                [("Width", BoxField::Width, fields.width), ("Height", BoxField::Height, fields.height)],
                [("X1", BoxField::X1, fields.x1), ("Y1", BoxField::Y1, fields.y1)],
                [("X2", BoxField::X2, fields.x2), ("Y2", BoxField::Y2, fields.y2)],
            ];
            for row in rows {
                for (label, field, value) in row {
                    if let Some(value) = int_field(ui, label, value) {
                        edit = Some((field, value));
                    }
                }
                ui.end_row();
            }
        });
    edit
}

/// One X/Y row per polygon vertex. Returns the edited coordinate.
fn vertex_rows(ui: &mut egui::Ui, vertices: &[GamePoint]) -> Option<(usize, Axis, i32)> {
    let mut edit = None;
    egui::Grid::new("polygon_vertices")
        .num_columns(5)
        .striped(true)
        .show(ui, |ui| {
            for (index, vertex) in vertices.iter().enumerate() {
                ui.label(format!("#{}", index + 1));
                if let Some(value) = int_field(ui, "X", vertex.x) {
                    edit = Some((index, Axis::X, value));
                }
                if let Some(value) = int_field(ui, "Y", vertex.y) {
                    edit = Some((index, Axis::Y, value));
                }
                ui.end_row();
            }
        });
    edit
}

#[cfg(test)]
mod tests {
    use super::*;
    use chunkmap_core::{BoxShape, TilePos};

    #[test]
    fn test_draw_hints_follow_workflow() {
        assert_eq!(draw_hint(&DrawState::Idle), None);
        assert_eq!(
            draw_hint(&DrawState::PlacingFirstCorner),
            Some("Click the first corner")
        );
        let two = DrawState::PlacingVertices {
            points: vec![TilePos::new(0, 0), TilePos::new(4, 0)],
            cursor: None,
        };
        assert_eq!(draw_hint(&two), Some("Click to add a vertex"));
        let three = DrawState::PlacingVertices {
            points: vec![TilePos::new(0, 0), TilePos::new(4, 0), TilePos::new(4, 4)],
            cursor: None,
        };
        assert_eq!(draw_hint(&three), Some("Click the first vertex to close the outline"));
    }

    #[test]
    fn test_long_coordinate_list_is_whole_json() {
        // 100 x 100 world units is 10 000 tiles, far past a screenful of text
        let shape = BoxShape::new(TilePos::new(3200, 3200), TilePos::new(3300, 3300));
        let output = SelectionOutput::for_box(&shape, 1);
        let text = coordinate_list_text(&output);
        assert!(text.len() > 4000);

        let tiles: Vec<[i32; 2]> = serde_json::from_str(&text).unwrap();
        assert!(tiles.len() >= 10_000);
        assert_eq!(text, output.tiles_text());
    }
}
