//! Static map configuration

use crate::coords::{WorldPos, WorldRect, MAX_PLANE};
use serde::{Deserialize, Serialize};

/// Fixed properties of the map being viewed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Region the view and any "go to" destination must stay inside
    pub bounds: WorldRect,
    /// Initial view centre in world tiles
    pub start: WorldPos,
    /// Initial plane
    pub start_plane: u8,
    pub min_plane: u8,
    pub max_plane: u8,
    /// Zoom limits as log2 of screen pixels per world unit
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub start_zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            bounds: WorldRect::from_corners(
                WorldPos::new(-1000.0, -1000.0),
                WorldPos::new(12800.0 + 1000.0, 12800.0 + 1000.0),
            ),
            start: WorldPos::new(3200.0, 3200.0),
            start_plane: 0,
            min_plane: 0,
            max_plane: MAX_PLANE,
            min_zoom: -4.0,
            max_zoom: 8.0,
            start_zoom: 2.0,
        }
    }
}

impl MapConfig {
    /// Clamp a plane index into the configured range
    pub fn clamp_plane(&self, plane: i32) -> u8 {
        plane.clamp(self.min_plane as i32, self.max_plane as i32) as u8
    }

    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_config_default() {
        let config = MapConfig::default();
        assert_eq!(config.start, WorldPos::new(3200.0, 3200.0));
        assert_eq!(config.max_plane, 3);
        assert!(config.bounds.contains(WorldPos::new(-1000.0, 13800.0)));
        assert!(!config.bounds.contains(WorldPos::new(-1001.0, 0.0)));
    }

    #[test]
    fn test_clamp_plane_and_zoom() {
        let config = MapConfig::default();
        assert_eq!(config.clamp_plane(7), 3);
        assert_eq!(config.clamp_plane(-2), 0);
        assert_eq!(config.clamp_zoom(12.0), 8.0);
        assert_eq!(config.clamp_zoom(-9.0), -4.0);
    }
}
