//! Editable selection shapes
//!
//! Both shapes keep their vertices on the integer world grid and expose the
//! same handle model: a vertex, an edge or the body can be grabbed. Hit testing
//! happens in screen pixels so handle sizes stay constant across zoom levels.

mod box_shape;
mod polygon;

pub use box_shape::{BoxEdge, BoxShape};
pub use polygon::PolygonShape;

use crate::coords::{TilePos, WorldPos};
use crate::view::{MapView, ScreenPos};

/// Half the size of a vertex marker
pub const VERTEX_RADIUS_PX: f32 = 7.0;
/// Half the width of an invisible box edge handle
pub const BOX_EDGE_HALF_WIDTH_PX: f32 = 6.0;
/// Half the width of an invisible polygon edge handle
pub const POLYGON_EDGE_HALF_WIDTH_PX: f32 = 18.0;
/// Edge insertion is suppressed this close to an existing vertex
pub const NEAR_VERTEX_PX: f32 = 16.0;

/// Which part of a shape the pointer is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Vertex(usize),
    Edge(usize),
    Body,
}

/// An in-progress drag.
///
/// The anchor is the raw pointer position at the last applied step; deltas
/// are the difference of the truncated positions, so sub-unit motion
/// accumulates until it crosses a grid line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub handle: Handle,
    pub anchor: WorldPos,
}

impl DragSession {
    pub fn new(handle: Handle, anchor: WorldPos) -> Self {
        Self { handle, anchor }
    }

    /// Integer delta from the anchor to `pos`; `None` when nothing changed
    pub fn delta_to(&self, pos: WorldPos) -> Option<(i32, i32)> {
        let from = self.anchor.trunc();
        let to = pos.trunc();
        let delta = (to.x - from.x, to.y - from.y);
        (delta != (0, 0)).then_some(delta)
    }
}

/// Shared editing contract of the box and polygon shapes
pub trait EditableShape {
    /// Vertices in drawing order
    fn vertices(&self) -> Vec<TilePos>;

    /// The handle under a screen position, if any
    fn hit_test(&self, view: &dyn MapView, pos: ScreenPos) -> Option<Handle>;

    /// Continue `session` to the pointer position `pos`.
    /// Returns true when the shape changed. The session's handle and anchor
    /// are updated to follow the shape.
    fn apply_drag(&mut self, session: &mut DragSession, pos: WorldPos) -> bool;

    /// Move every vertex by the same integer delta
    fn translate(&mut self, dx: i32, dy: i32);

    /// Integer world-space bounding box as (min, max)
    fn bounds(&self) -> (TilePos, TilePos) {
        let vertices = self.vertices();
        let mut min = TilePos::new(i32::MAX, i32::MAX);
        let mut max = TilePos::new(i32::MIN, i32::MIN);
        for v in &vertices {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
        }
        (min, max)
    }
}

/// Body drag shared by both shapes
pub(crate) fn drag_body(shape: &mut impl EditableShape, session: &mut DragSession, pos: WorldPos) -> bool {
    match session.delta_to(pos) {
        Some((dx, dy)) => {
            shape.translate(dx, dy);
            session.anchor = pos;
            true
        }
        None => false,
    }
}

/// Screen-space positions of a list of world vertices
pub(crate) fn project_vertices(view: &dyn MapView, vertices: &[TilePos]) -> Vec<ScreenPos> {
    vertices
        .iter()
        .map(|v| view.world_to_screen(WorldPos::from(*v)))
        .collect()
}

/// Index of the first vertex within `radius` pixels of `pos`
pub(crate) fn vertex_under(screen: &[ScreenPos], pos: ScreenPos, radius: f32) -> Option<usize> {
    screen.iter().position(|p| p.distance(pos) <= radius)
}

/// Distance in pixels from `pos` to the screen segment `a`-`b`
pub(crate) fn segment_distance(pos: ScreenPos, a: ScreenPos, b: ScreenPos) -> f32 {
    crate::geometry::distance_to_segment(
        (pos.x as f64, pos.y as f64),
        (a.x as f64, a.y as f64),
        (b.x as f64, b.y as f64),
    ) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_delta_truncates() {
        let session = DragSession::new(Handle::Body, WorldPos::new(10.9, 10.1));
        assert_eq!(session.delta_to(WorldPos::new(10.2, 10.8)), None);
        assert_eq!(session.delta_to(WorldPos::new(11.0, 9.5)), Some((1, -1)));
    }

    #[test]
    fn test_shape_bounds() {
        let shape = PolygonShape::new(vec![
            TilePos::new(5, 1),
            TilePos::new(9, 4),
            TilePos::new(-2, 7),
        ]);
        assert_eq!(shape.bounds(), (TilePos::new(-2, 1), TilePos::new(9, 7)));
    }
}
