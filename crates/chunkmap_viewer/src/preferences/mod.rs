//! Viewer preferences persisted between sessions

mod file;

pub use file::PreferencesError;

use bevy::prelude::*;
use chunkmap_core::{MapConfig, WorldPos};
use serde::{Deserialize, Serialize};

use crate::view::ViewportSnapshot;

/// Camera position saved on exit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavedView {
    pub center: WorldPos,
    pub zoom: f64,
    pub plane: u8,
}

/// User preferences stored as JSON in the platform config directory
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerPreferences {
    /// Map bounds, start position and zoom limits
    pub map: MapConfig,
    pub show_chunk_grid: bool,
    /// Reopen at the last view instead of the configured start
    pub remember_last_view: bool,
    pub last_view: Option<SavedView>,
}

impl Default for ViewerPreferences {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            show_chunk_grid: true,
            remember_last_view: true,
            last_view: None,
        }
    }
}

impl ViewerPreferences {
    /// Camera to open with: the remembered view when it is still valid,
    /// otherwise the configured start
    pub fn initial_view(&self) -> ViewportSnapshot {
        let map = &self.map;
        let saved = self
            .last_view
            .filter(|_| self.remember_last_view)
            .filter(|v| map.bounds.contains(v.center))
            .filter(|v| (map.min_plane..=map.max_plane).contains(&v.plane));

        match saved {
            Some(view) => ViewportSnapshot::new(view.center, map.clamp_zoom(view.zoom), view.plane),
            None => ViewportSnapshot::new(
                map.start,
                map.clamp_zoom(map.start_zoom),
                map.clamp_plane(map.start_plane as i32),
            ),
        }
    }

    pub fn remember_view(&mut self, view: &ViewportSnapshot) {
        if self.remember_last_view {
            self.last_view = Some(SavedView {
                center: view.center,
                zoom: view.zoom,
                plane: view.plane,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preferences_start_at_configured_view() {
        let prefs = ViewerPreferences::default();
        let view = prefs.initial_view();
        assert_eq!(view.center, WorldPos::new(3200.0, 3200.0));
        assert_eq!(view.zoom, 2.0);
        assert_eq!(view.plane, 0);
    }

    #[test]
    fn test_remembered_view_is_restored() {
        let mut prefs = ViewerPreferences::default();
        let view = ViewportSnapshot::new(WorldPos::new(2900.5, 3400.0), 5.0, 2);
        prefs.remember_view(&view);
        let restored = prefs.initial_view();
        assert_eq!(restored.center, view.center);
        assert_eq!(restored.zoom, 5.0);
        assert_eq!(restored.plane, 2);
    }

    #[test]
    fn test_invalid_saved_view_falls_back() {
        let mut prefs = ViewerPreferences::default();
        prefs.last_view = Some(SavedView {
            center: WorldPos::new(50000.0, 0.0),
            zoom: 3.0,
            plane: 1,
        });
        assert_eq!(prefs.initial_view().center, prefs.map.start);

        prefs.last_view = Some(SavedView {
            center: WorldPos::new(3000.0, 3000.0),
            zoom: 40.0,
            plane: 9,
        });
        assert_eq!(prefs.initial_view().plane, 0);

        prefs.last_view = Some(SavedView {
            center: WorldPos::new(3000.0, 3000.0),
            zoom: 40.0,
            plane: 1,
        });
        assert_eq!(prefs.initial_view().zoom, prefs.map.max_zoom);
    }

    #[test]
    fn test_forgetting_views() {
        let mut prefs = ViewerPreferences {
            remember_last_view: false,
            ..Default::default()
        };
        prefs.remember_view(&ViewportSnapshot::default());
        assert_eq!(prefs.last_view, None);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let prefs: ViewerPreferences = serde_json::from_str(r#"{"show_chunk_grid": false}"#).unwrap();
        assert!(!prefs.show_chunk_grid);
        assert!(prefs.remember_last_view);
        assert_eq!(prefs.map, MapConfig::default());
    }

    #[test]
    fn test_preferences_serialization() {
        let mut prefs = ViewerPreferences::default();
        prefs.remember_view(&ViewportSnapshot::new(WorldPos::new(1.5, 2.5), 3.0, 1));
        let json = serde_json::to_string_pretty(&prefs).unwrap();
        let parsed: ViewerPreferences = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, prefs);
    }
}
