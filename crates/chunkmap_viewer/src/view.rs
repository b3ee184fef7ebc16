//! Viewport projection backing the [`MapView`] the selection code talks to
//!
//! The snapshot mirrors the 2D camera: its centre is the camera translation and
//! `2^zoom` screen pixels cover one world unit. Screen Y points down, world Y up.

use chunkmap_core::{MapView, ScreenPos, WorldPos, WorldRect};
use serde::{Deserialize, Serialize};

/// Pure camera state, kept in sync with the Bevy camera every frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSnapshot {
    pub center: WorldPos,
    /// log2 of screen pixels per world unit
    pub zoom: f64,
    /// Viewport size in logical pixels
    pub size: (f32, f32),
    pub plane: u8,
}

impl Default for ViewportSnapshot {
    fn default() -> Self {
        Self {
            center: WorldPos::new(3200.0, 3200.0),
            zoom: 2.0,
            size: (1280.0, 720.0),
            plane: 0,
        }
    }
}

impl ViewportSnapshot {
    pub fn new(center: WorldPos, zoom: f64, plane: u8) -> Self {
        Self {
            center,
            zoom,
            plane,
            ..Default::default()
        }
    }

    pub fn pixels_per_unit(&self) -> f64 {
        2f64.powf(self.zoom)
    }

    /// Track the window size. Returns true when it changed.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if self.size == (width, height) {
            return false;
        }
        self.size = (width, height);
        true
    }

    /// Move the view by a screen-space drag delta
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        let ppu = self.pixels_per_unit();
        self.center.x -= dx as f64 / ppu;
        self.center.y += dy as f64 / ppu;
    }

    /// Change the zoom level keeping the world point under `anchor` in place
    pub fn zoom_around(&mut self, zoom: f64, anchor: ScreenPos) {
        let before = self.screen_to_world(anchor);
        self.zoom = zoom;
        let after = self.screen_to_world(anchor);
        self.center.x += before.x - after.x;
        self.center.y += before.y - after.y;
    }

    /// Keep the view centre inside `bounds`
    pub fn clamp_center(&mut self, bounds: &WorldRect) {
        self.center.x = self.center.x.clamp(bounds.min.x, bounds.max.x);
        self.center.y = self.center.y.clamp(bounds.min.y, bounds.max.y);
    }

    fn half_extent(&self) -> (f64, f64) {
        let ppu = self.pixels_per_unit();
        (
            self.size.0 as f64 / ppu / 2.0,
            self.size.1 as f64 / ppu / 2.0,
        )
    }
}

impl MapView for ViewportSnapshot {
    fn view_bounds(&self) -> WorldRect {
        let (half_w, half_h) = self.half_extent();
        WorldRect::from_corners(
            WorldPos::new(self.center.x - half_w, self.center.y - half_h),
            WorldPos::new(self.center.x + half_w, self.center.y + half_h),
        )
    }

    fn set_view_bounds(&mut self, bounds: WorldRect) {
        self.center = bounds.center();
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return;
        }
        let fit_x = self.size.0 as f64 / bounds.width();
        let fit_y = self.size.1 as f64 / bounds.height();
        let fit = fit_x.min(fit_y);
        if fit > 0.0 {
            self.zoom = fit.log2();
        }
    }

    fn screen_to_world(&self, pos: ScreenPos) -> WorldPos {
        let ppu = self.pixels_per_unit();
        WorldPos::new(
            self.center.x + (pos.x - self.size.0 / 2.0) as f64 / ppu,
            self.center.y - (pos.y - self.size.1 / 2.0) as f64 / ppu,
        )
    }

    fn world_to_screen(&self, pos: WorldPos) -> ScreenPos {
        let ppu = self.pixels_per_unit();
        ScreenPos::new(
            ((pos.x - self.center.x) * ppu) as f32 + self.size.0 / 2.0,
            ((self.center.y - pos.y) * ppu) as f32 + self.size.1 / 2.0,
        )
    }

    fn plane(&self) -> u8 {
        self.plane
    }

    fn set_plane(&mut self, plane: u8) {
        self.plane = plane;
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn center(&self) -> WorldPos {
        self.center
    }
}
