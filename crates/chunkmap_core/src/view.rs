//! The map engine seen from the selection subsystem

use crate::coords::{WorldPos, WorldRect};
use serde::{Deserialize, Serialize};

/// A position in screen pixels, origin top-left, Y pointing down
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPos {
    pub x: f32,
    pub y: f32,
}

impl ScreenPos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: ScreenPos) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Primitives the selection subsystem needs from whatever renders the map
pub trait MapView {
    /// World-space rectangle currently visible
    fn view_bounds(&self) -> WorldRect;

    /// Pan and zoom so that `bounds` is visible
    fn set_view_bounds(&mut self, bounds: WorldRect);

    fn screen_to_world(&self, pos: ScreenPos) -> WorldPos;

    fn world_to_screen(&self, pos: WorldPos) -> ScreenPos;

    fn plane(&self) -> u8;

    fn set_plane(&mut self, plane: u8);

    /// Zoom level as log2 of screen pixels per world unit
    fn zoom(&self) -> f64;

    fn center(&self) -> WorldPos {
        self.view_bounds().center()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Fixed-scale view used by the unit tests of this crate

    use super::*;

    /// Axis-aligned view with a fixed number of pixels per world unit
    #[derive(Debug, Clone)]
    pub struct FixedView {
        pub origin: WorldPos,
        pub pixels_per_unit: f64,
        pub size: (f32, f32),
        pub plane: u8,
    }

    impl FixedView {
        /// 800x600 view at one pixel per world unit with world (0, 600) at the top-left
        pub fn new() -> Self {
            Self {
                origin: WorldPos::new(0.0, 600.0),
                pixels_per_unit: 1.0,
                size: (800.0, 600.0),
                plane: 0,
            }
        }

        pub fn scaled(pixels_per_unit: f64) -> Self {
            Self {
                pixels_per_unit,
                origin: WorldPos::new(0.0, 600.0 / pixels_per_unit),
                ..Self::new()
            }
        }
    }

    impl MapView for FixedView {
        fn view_bounds(&self) -> WorldRect {
            let w = self.size.0 as f64 / self.pixels_per_unit;
            let h = self.size.1 as f64 / self.pixels_per_unit;
            WorldRect::from_corners(
                WorldPos::new(self.origin.x, self.origin.y - h),
                WorldPos::new(self.origin.x + w, self.origin.y),
            )
        }

        fn set_view_bounds(&mut self, bounds: WorldRect) {
            self.origin = WorldPos::new(bounds.min.x, bounds.max.y);
        }

        fn screen_to_world(&self, pos: ScreenPos) -> WorldPos {
            WorldPos::new(
                self.origin.x + pos.x as f64 / self.pixels_per_unit,
                self.origin.y - pos.y as f64 / self.pixels_per_unit,
            )
        }

        fn world_to_screen(&self, pos: WorldPos) -> ScreenPos {
            ScreenPos::new(
                ((pos.x - self.origin.x) * self.pixels_per_unit) as f32,
                ((self.origin.y - pos.y) * self.pixels_per_unit) as f32,
            )
        }

        fn plane(&self) -> u8 {
            self.plane
        }

        fn set_plane(&mut self, plane: u8) {
            self.plane = plane;
        }

        fn zoom(&self) -> f64 {
            self.pixels_per_unit.log2()
        }
    }

    #[test]
    fn test_fixed_view_projection() {
        let view = FixedView::new();
        let world = view.screen_to_world(ScreenPos::new(100.0, 100.0));
        assert_eq!(world, WorldPos::new(100.0, 500.0));
        assert_eq!(view.world_to_screen(world), ScreenPos::new(100.0, 100.0));
        assert_eq!(view.center(), WorldPos::new(400.0, 300.0));
    }
}
