//! Keyboard shortcut handling

use bevy::prelude::*;
use bevy_egui::EguiContexts;
use chunkmap_core::{SelectionController, SelectionMode};

use crate::{SelectionState, ViewerState};

/// Viewer actions bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    CancelDrawing,
    NewShape,
    BoxMode,
    PolygonMode,
    ToggleChunkGrid,
    PlaneUp,
    PlaneDown,
}

impl Shortcut {
    const BINDINGS: [(KeyCode, Shortcut); 7] = [
        (KeyCode::Escape, Shortcut::CancelDrawing),
        (KeyCode::KeyN, Shortcut::NewShape),
        (KeyCode::KeyB, Shortcut::BoxMode),
        (KeyCode::KeyP, Shortcut::PolygonMode),
        (KeyCode::KeyG, Shortcut::ToggleChunkGrid),
        (KeyCode::PageUp, Shortcut::PlaneUp),
        (KeyCode::PageDown, Shortcut::PlaneDown),
    ];

    /// Shortcuts whose key went down this frame
    pub fn just_pressed(keyboard: &ButtonInput<KeyCode>) -> impl Iterator<Item = Shortcut> + '_ {
        Self::BINDINGS
            .iter()
            .filter(|(key, _)| keyboard.just_pressed(*key))
            .map(|(_, shortcut)| *shortcut)
    }

    pub fn apply(self, viewer: &mut ViewerState, selection: &mut SelectionController) {
        match self {
            Shortcut::CancelDrawing => selection.cancel(&viewer.view),
            Shortcut::NewShape => selection.press_new(&viewer.view),
            Shortcut::BoxMode => selection.switch_mode(SelectionMode::Box, &viewer.view),
            Shortcut::PolygonMode => selection.switch_mode(SelectionMode::Polygon, &viewer.view),
            Shortcut::ToggleChunkGrid => viewer.show_chunk_grid = !viewer.show_chunk_grid,
            Shortcut::PlaneUp => {
                let plane = viewer.view.plane as i32 + 1;
                viewer.set_plane(plane, selection);
            }
            Shortcut::PlaneDown => {
                let plane = viewer.view.plane as i32 - 1;
                viewer.set_plane(plane, selection);
            }
        }
    }
}

/// Handle keyboard shortcuts
pub fn handle_keyboard_shortcuts(
    mut contexts: EguiContexts,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut viewer: ResMut<ViewerState>,
    mut selection: ResMut<SelectionState>,
) {
    // Only when not typing in text fields
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_keyboard_input() {
            return;
        }
    }

    for shortcut in Shortcut::just_pressed(&keyboard) {
        shortcut.apply(&mut viewer, &mut selection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chunkmap_core::DrawState;

    #[test]
    fn test_bindings_follow_key_presses() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyN);
        keyboard.press(KeyCode::PageUp);
        let pressed: Vec<_> = Shortcut::just_pressed(&keyboard).collect();
        assert_eq!(pressed, vec![Shortcut::NewShape, Shortcut::PlaneUp]);
    }

    #[test]
    fn test_escape_cancels_new_shape() {
        let mut viewer = ViewerState::default();
        let mut selection = SelectionController::new();
        selection.expand(&viewer.view);

        Shortcut::NewShape.apply(&mut viewer, &mut selection);
        assert_eq!(*selection.draw_state(), DrawState::PlacingFirstCorner);
        Shortcut::CancelDrawing.apply(&mut viewer, &mut selection);
        assert_eq!(*selection.draw_state(), DrawState::Idle);
        assert!(selection.output().is_some());
    }

    #[test]
    fn test_plane_keys_stay_in_range() {
        let mut viewer = ViewerState::default();
        let mut selection = SelectionController::new();
        Shortcut::PlaneDown.apply(&mut viewer, &mut selection);
        assert_eq!(viewer.view.plane, 0);
        for _ in 0..5 {
            Shortcut::PlaneUp.apply(&mut viewer, &mut selection);
        }
        assert_eq!(viewer.view.plane, 3);
    }

    #[test]
    fn test_grid_toggle() {
        let mut viewer = ViewerState::default();
        let mut selection = SelectionController::new();
        let before = viewer.show_chunk_grid;
        Shortcut::ToggleChunkGrid.apply(&mut viewer, &mut selection);
        assert_eq!(viewer.show_chunk_grid, !before);
    }
}
