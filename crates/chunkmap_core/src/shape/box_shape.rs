use super::{
    drag_body, project_vertices, segment_distance, vertex_under, DragSession, EditableShape,
    Handle, BOX_EDGE_HALF_WIDTH_PX, VERTEX_RADIUS_PX,
};
use crate::coords::{TilePos, WorldPos, WorldRect};
use crate::view::{MapView, ScreenPos};
use serde::{Deserialize, Serialize};

/// Vertex order of a box: SW, NW, NE, SE
const SW: usize = 0;
const NW: usize = 1;
const NE: usize = 2;
const SE: usize = 3;

/// Sides of a box, in handle order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxEdge {
    South,
    West,
    North,
    East,
}

impl BoxEdge {
    pub const ALL: [BoxEdge; 4] = [BoxEdge::South, BoxEdge::West, BoxEdge::North, BoxEdge::East];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// The two vertex indices on this side
    pub fn vertices(self) -> [usize; 2] {
        match self {
            BoxEdge::South => [SW, SE],
            BoxEdge::West => [SW, NW],
            BoxEdge::North => [NW, NE],
            BoxEdge::East => [NE, SE],
        }
    }

    /// South and north edges move vertically
    pub fn is_horizontal(self) -> bool {
        matches!(self, BoxEdge::South | BoxEdge::North)
    }

    fn opposite(self) -> Self {
        match self {
            BoxEdge::South => BoxEdge::North,
            BoxEdge::West => BoxEdge::East,
            BoxEdge::North => BoxEdge::South,
            BoxEdge::East => BoxEdge::West,
        }
    }
}

/// Axis-aligned rectangle with integer corners and non-zero extent on both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxShape {
    min: TilePos,
    max: TilePos,
}

impl BoxShape {
    /// Box spanned by two opposite corners.
    /// A zero extent on either axis is widened to one unit.
    pub fn new(a: TilePos, b: TilePos) -> Self {
        let min = TilePos::new(a.x.min(b.x), a.y.min(b.y));
        let mut max = TilePos::new(a.x.max(b.x), a.y.max(b.y));
        if max.x == min.x {
            max.x += 1;
        }
        if max.y == min.y {
            max.y += 1;
        }
        Self { min, max }
    }

    /// Box spanned by two opposite corners, or `None` if they share an axis
    pub fn try_new(a: TilePos, b: TilePos) -> Option<Self> {
        (a.x != b.x && a.y != b.y).then(|| Self::new(a, b))
    }

    /// Box covering a fractional world rectangle, corners truncated
    pub fn from_world_rect(rect: &WorldRect) -> Self {
        Self::new(rect.min.trunc(), rect.max.trunc())
    }

    pub fn min(&self) -> TilePos {
        self.min
    }

    pub fn max(&self) -> TilePos {
        self.max
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    pub fn vertex(&self, index: usize) -> TilePos {
        match index & 0x3 {
            SW => self.min,
            NW => TilePos::new(self.min.x, self.max.y),
            NE => self.max,
            _ => TilePos::new(self.max.x, self.min.y),
        }
    }

    pub fn to_world_rect(&self) -> WorldRect {
        WorldRect::from_corners(self.min.into(), self.max.into())
    }

    fn corner_index(corner: TilePos, opposite: TilePos) -> usize {
        match (corner.x < opposite.x, corner.y < opposite.y) {
            (true, true) => SW,
            (true, false) => NW,
            (false, false) => NE,
            (false, true) => SE,
        }
    }

    /// Move one corner, keeping the diagonally opposite corner fixed.
    /// Returns the index the moved corner ends up at, or `None` when the move
    /// would collapse the box or changes nothing.
    pub fn move_corner(&mut self, index: usize, to: TilePos) -> Option<usize> {
        let opposite = self.vertex(index + 2);
        if to == self.vertex(index) || to.x == opposite.x || to.y == opposite.y {
            return None;
        }
        *self = Self::new(opposite, to);
        Some(Self::corner_index(to, opposite))
    }

    /// Move one side along its axis. Returns the side the moved edge ends up
    /// as (sides swap when dragged past each other), or `None` when rejected.
    pub fn move_edge(&mut self, edge: BoxEdge, delta: i32) -> Option<BoxEdge> {
        if delta == 0 {
            return None;
        }
        let (moved, fixed) = match edge {
            BoxEdge::South => (self.min.y + delta, self.max.y),
            BoxEdge::North => (self.max.y + delta, self.min.y),
            BoxEdge::West => (self.min.x + delta, self.max.x),
            BoxEdge::East => (self.max.x + delta, self.min.x),
        };
        if moved == fixed {
            return None;
        }
        let (lo, hi) = (moved.min(fixed), moved.max(fixed));
        if edge.is_horizontal() {
            self.min.y = lo;
            self.max.y = hi;
        } else {
            self.min.x = lo;
            self.max.x = hi;
        }
        let crossed = match edge {
            BoxEdge::South | BoxEdge::West => moved > fixed,
            BoxEdge::North | BoxEdge::East => moved < fixed,
        };
        Some(if crossed { edge.opposite() } else { edge })
    }
}

impl EditableShape for BoxShape {
    fn vertices(&self) -> Vec<TilePos> {
        (0..4).map(|i| self.vertex(i)).collect()
    }

    fn hit_test(&self, view: &dyn MapView, pos: ScreenPos) -> Option<Handle> {
        let screen = project_vertices(view, &self.vertices());
        if let Some(index) = vertex_under(&screen, pos, VERTEX_RADIUS_PX) {
            return Some(Handle::Vertex(index));
        }
        for edge in BoxEdge::ALL {
            let [a, b] = edge.vertices();
            if segment_distance(pos, screen[a], screen[b]) <= BOX_EDGE_HALF_WIDTH_PX {
                return Some(Handle::Edge(edge.index()));
            }
        }
        self.to_world_rect()
            .contains(view.screen_to_world(pos))
            .then_some(Handle::Body)
    }

    fn apply_drag(&mut self, session: &mut DragSession, pos: WorldPos) -> bool {
        match session.handle {
            Handle::Vertex(index) => match self.move_corner(index, pos.trunc()) {
                Some(moved) => {
                    session.handle = Handle::Vertex(moved);
                    session.anchor = pos;
                    true
                }
                None => false,
            },
            Handle::Edge(index) => {
                let (Some(edge), Some((dx, dy))) = (BoxEdge::from_index(index), session.delta_to(pos))
                else {
                    return false;
                };
                let delta = if edge.is_horizontal() { dy } else { dx };
                match self.move_edge(edge, delta) {
                    Some(moved) => {
                        session.handle = Handle::Edge(moved.index());
                        session.anchor = pos;
                        true
                    }
                    None => false,
                }
            }
            Handle::Body => drag_body(self, session, pos),
        }
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.min = self.min.offset(dx, dy);
        self.max = self.max.offset(dx, dy);
    }

    fn bounds(&self) -> (TilePos, TilePos) {
        (self.min, self.max)
    }
}
