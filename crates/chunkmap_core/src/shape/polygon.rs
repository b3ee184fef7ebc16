use super::{
    drag_body, project_vertices, segment_distance, vertex_under, DragSession, EditableShape,
    Handle, NEAR_VERTEX_PX, POLYGON_EDGE_HALF_WIDTH_PX, VERTEX_RADIUS_PX,
};
use crate::coords::{TilePos, WorldPos};
use crate::geometry::{point_in_polygon, project_on_segment};
use crate::view::{MapView, ScreenPos};
use serde::{Deserialize, Serialize};

/// Closed outline with integer vertices.
///
/// Vertices are kept in insertion order; the outline may be concave or
/// self-intersecting. Vertices can be added on an edge but never removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolygonShape {
    vertices: Vec<TilePos>,
}

impl PolygonShape {
    pub fn new(vertices: Vec<TilePos>) -> Self {
        Self { vertices }
    }

    /// Regular polygon around `center`, first vertex straight up
    pub fn regular(center: WorldPos, radius: f64, sides: usize) -> Self {
        let vertices = (0..sides)
            .map(|i| {
                let angle = std::f64::consts::FRAC_PI_2
                    + std::f64::consts::TAU * i as f64 / sides as f64;
                WorldPos::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                )
                .trunc()
            })
            .collect();
        Self { vertices }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn as_slice(&self) -> &[TilePos] {
        &self.vertices
    }

    /// Replace one vertex. Returns false for an unknown index or no change.
    pub fn set_vertex(&mut self, index: usize, pos: TilePos) -> bool {
        match self.vertices.get_mut(index) {
            Some(v) if *v != pos => {
                *v = pos;
                true
            }
            _ => false,
        }
    }

    /// Insert a vertex right after the start of edge `edge`, truncated onto the grid.
    /// Returns the new vertex index.
    pub fn insert_vertex(&mut self, edge: usize, pos: WorldPos) -> Option<usize> {
        if edge >= self.vertices.len() {
            return None;
        }
        let index = edge + 1;
        self.vertices.insert(index, pos.trunc());
        Some(index)
    }

    fn edge_endpoints(&self, edge: usize) -> (usize, usize) {
        (edge, (edge + 1) % self.vertices.len())
    }

    fn near_vertex(screen: &[ScreenPos], pos: ScreenPos) -> bool {
        screen.iter().any(|v| v.distance(pos) < NEAR_VERTEX_PX)
    }

    /// Where a click on an edge would insert a vertex, in screen space.
    /// `None` unless the pointer is over an edge handle and clear of every vertex.
    pub fn insertion_preview(&self, view: &dyn MapView, pos: ScreenPos) -> Option<(usize, ScreenPos)> {
        let Some(Handle::Edge(edge)) = self.hit_test(view, pos) else {
            return None;
        };
        let screen = project_vertices(view, &self.vertices);
        let (a, b) = self.edge_endpoints(edge);
        let (x, y) = project_on_segment(
            (pos.x as f64, pos.y as f64),
            (screen[a].x as f64, screen[a].y as f64),
            (screen[b].x as f64, screen[b].y as f64),
        );
        Some((edge, ScreenPos::new(x as f32, y as f32)))
    }

    fn outline(&self) -> Vec<(f64, f64)> {
        self.vertices.iter().map(|v| (v.x as f64, v.y as f64)).collect()
    }
}

impl EditableShape for PolygonShape {
    fn vertices(&self) -> Vec<TilePos> {
        self.vertices.clone()
    }

    fn hit_test(&self, view: &dyn MapView, pos: ScreenPos) -> Option<Handle> {
        if self.vertices.is_empty() {
            return None;
        }
        let screen = project_vertices(view, &self.vertices);
        if let Some(index) = vertex_under(&screen, pos, VERTEX_RADIUS_PX) {
            return Some(Handle::Vertex(index));
        }
        if !Self::near_vertex(&screen, pos) {
            for edge in 0..self.vertices.len() {
                let (a, b) = self.edge_endpoints(edge);
                if segment_distance(pos, screen[a], screen[b]) <= POLYGON_EDGE_HALF_WIDTH_PX {
                    return Some(Handle::Edge(edge));
                }
            }
        }
        let world = view.screen_to_world(pos);
        point_in_polygon(world.x, world.y, &self.outline()).then_some(Handle::Body)
    }

    fn apply_drag(&mut self, session: &mut DragSession, pos: WorldPos) -> bool {
        match session.handle {
            Handle::Vertex(index) => {
                let changed = self.set_vertex(index, pos.trunc());
                if changed {
                    session.anchor = pos;
                }
                changed
            }
            // Edges insert on click; they are not draggable
            Handle::Edge(_) => false,
            Handle::Body => drag_body(self, session, pos),
        }
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        for v in &mut self.vertices {
            *v = v.offset(dx, dy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::testing::FixedView;

    fn square() -> PolygonShape {
        PolygonShape::new(vec![
            TilePos::new(100, 300),
            TilePos::new(300, 300),
            TilePos::new(300, 500),
            TilePos::new(100, 500),
        ])
    }

    #[test]
    fn test_regular_pentagon() {
        let pentagon = PolygonShape::regular(WorldPos::new(3200.0, 3200.0), 20.0, 5);
        assert_eq!(pentagon.len(), 5);
        assert_eq!(pentagon.as_slice()[0], TilePos::new(3200, 3220));
        // cos(162deg) * 20 = -19.02, sin(162deg) * 20 = 6.18
        assert_eq!(pentagon.as_slice()[1], TilePos::new(3180, 3206));
    }

    #[test]
    fn test_insert_vertex_after_edge_start() {
        let mut poly = square();
        assert_eq!(poly.insert_vertex(3, WorldPos::new(99.7, 401.2)), Some(4));
        assert_eq!(poly.as_slice()[4], TilePos::new(99, 401));
        assert_eq!(poly.insert_vertex(1, WorldPos::new(300.0, 400.0)), Some(2));
        assert_eq!(poly.len(), 6);
        assert_eq!(poly.as_slice()[2], TilePos::new(300, 400));
        assert_eq!(poly.insert_vertex(6, WorldPos::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_vertex_drag_truncates() {
        let mut poly = square();
        let mut session = DragSession::new(Handle::Vertex(2), WorldPos::new(300.0, 500.0));
        assert!(poly.apply_drag(&mut session, WorldPos::new(350.9, 520.4)));
        assert_eq!(poly.as_slice()[2], TilePos::new(350, 520));
        assert!(!poly.apply_drag(&mut session, WorldPos::new(350.1, 520.8)));
    }

    #[test]
    fn test_body_drag_moves_every_vertex() {
        let mut poly = square();
        let mut session = DragSession::new(Handle::Body, WorldPos::new(200.0, 400.0));
        assert!(poly.apply_drag(&mut session, WorldPos::new(190.0, 402.0)));
        assert_eq!(poly.as_slice()[0], TilePos::new(90, 302));
        assert_eq!(poly.as_slice()[3], TilePos::new(90, 502));
    }

    #[test]
    fn test_hit_test_edges_and_body() {
        let view = FixedView::new();
        let poly = square();
        let at = |x: f64, y: f64| view.world_to_screen(WorldPos::new(x, y));

        assert_eq!(poly.hit_test(&view, at(104.0, 304.0)), Some(Handle::Vertex(0)));
        // wide edge handle reaches well outside the outline
        assert_eq!(poly.hit_test(&view, at(200.0, 285.0)), Some(Handle::Edge(0)));
        // near a vertex but outside its marker: no edge, and outside the body
        assert_eq!(poly.hit_test(&view, at(300.0, 288.0)), None);
        // near a vertex inside the body falls through to the body
        assert_eq!(poly.hit_test(&view, at(290.0, 310.0)), Some(Handle::Body));
        assert_eq!(poly.hit_test(&view, at(200.0, 400.0)), Some(Handle::Body));
    }

    #[test]
    fn test_insertion_preview_projects_onto_edge() {
        let view = FixedView::new();
        let poly = square();
        let pointer = view.world_to_screen(WorldPos::new(200.0, 290.0));
        let (edge, preview) = poly.insertion_preview(&view, pointer).unwrap();
        assert_eq!(edge, 0);
        assert_eq!(preview, view.world_to_screen(WorldPos::new(200.0, 300.0)));

        let near_corner = view.world_to_screen(WorldPos::new(110.0, 300.0));
        assert!(poly.insertion_preview(&view, near_corner).is_none());
    }
}
