//! Selection controller
//!
//! Owns one cached shape per mode, the draw-new-shape workflow and the
//! derived output. Every input arrives as a method call with the current
//! [`MapView`]; previews are derived from the draw state, so leaving a draw
//! never leaves anything behind.

use crate::coords::{world_to_game, TilePos, WorldPos};
use crate::highlight::{HighlightQuad, TileHighlight};
use crate::output::{vertex_from_game, BoxField, BoxFields, SelectionOutput};
use crate::shape::{
    BoxEdge, BoxShape, DragSession, EditableShape, Handle, PolygonShape,
};
use crate::tiler::{TileCoverage, MAX_TILES};
use crate::view::{MapView, ScreenPos};
use tracing::{debug, info, warn};

/// A click this close to the first vertex closes the polygon being drawn
pub const CLOSE_DISTANCE_PX: f32 = 10.0;
/// Fraction of the shorter view side used for the default box
const DEFAULT_BOX_RATIO: f64 = 0.4;
const PENTAGON_SIDES: usize = 5;

/// Shape kind the selection panel edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    Box,
    Polygon,
}

impl SelectionMode {
    pub fn label(self) -> &'static str {
        match self {
            SelectionMode::Box => "Box",
            SelectionMode::Polygon => "Polygon",
        }
    }
}

/// Axis of a polygon vertex field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Where the draw-new-shape workflow is
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DrawState {
    #[default]
    Idle,
    PlacingFirstCorner,
    PlacingSecondCorner {
        first: TilePos,
        cursor: TilePos,
    },
    PlacingFirstVertex {
        cursor: Option<TilePos>,
    },
    PlacingVertices {
        points: Vec<TilePos>,
        cursor: Option<TilePos>,
    },
}

impl DrawState {
    pub fn is_drawing(&self) -> bool {
        !matches!(self, DrawState::Idle)
    }
}

/// Temporary geometry shown while drawing
#[derive(Debug, Clone, PartialEq)]
pub enum DrawPreview {
    /// Rubber-band box between the first corner and the pointer
    Rect { a: TilePos, b: TilePos },
    /// Dashed line through the placed vertices to the pointer
    Path {
        points: Vec<TilePos>,
        cursor: Option<TilePos>,
        /// First vertex, once enough vertices exist to close the outline
        close_indicator: Option<TilePos>,
    },
}

/// Pointer cursor the map should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    Crosshair,
    Move,
    ResizeNs,
    ResizeEw,
    ResizeDiagonal,
    /// Hidden; the insertion preview stands in for it
    None,
}

/// Area selection state machine
#[derive(Debug, Default)]
pub struct SelectionController {
    mode: SelectionMode,
    expanded: bool,
    box_shape: Option<BoxShape>,
    polygon: Option<PolygonShape>,
    draw: DrawState,
    drag: Option<DragSession>,
    hover: Option<ScreenPos>,
    highlight: TileHighlight,
    output: Option<SelectionOutput>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn draw_state(&self) -> &DrawState {
        &self.draw
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn output(&self) -> Option<&SelectionOutput> {
        self.output.as_ref()
    }

    /// Cached box, shown or not
    pub fn box_shape(&self) -> Option<&BoxShape> {
        self.box_shape.as_ref()
    }

    /// Cached polygon, shown or not
    pub fn polygon(&self) -> Option<&PolygonShape> {
        self.polygon.as_ref()
    }

    /// The shape on the map: the current mode's shape while expanded and not drawing
    pub fn active_shape(&self) -> Option<&dyn EditableShape> {
        if !self.expanded || self.draw.is_drawing() {
            return None;
        }
        match self.mode {
            SelectionMode::Box => self.box_shape.as_ref().map(|s| s as &dyn EditableShape),
            SelectionMode::Polygon => self.polygon.as_ref().map(|s| s as &dyn EditableShape),
        }
    }

    fn active_shape_mut(&mut self) -> Option<&mut dyn EditableShape> {
        if !self.expanded || self.draw.is_drawing() {
            return None;
        }
        match self.mode {
            SelectionMode::Box => self.box_shape.as_mut().map(|s| s as &mut dyn EditableShape),
            SelectionMode::Polygon => self.polygon.as_mut().map(|s| s as &mut dyn EditableShape),
        }
    }

    /// Plain map clicks copy coordinates only while the selection panel is closed
    pub fn click_copy_enabled(&self) -> bool {
        !self.expanded
    }

    /// Panel opened: show the cached shape or seed a default one
    pub fn expand(&mut self, view: &dyn MapView) {
        if self.expanded {
            return;
        }
        self.expanded = true;
        self.ensure_shape(view);
        self.recompute(view);
        debug!("Area selection expanded in {} mode", self.mode.label());
    }

    /// Panel closed: drawing is abandoned and the shapes stay cached
    pub fn collapse(&mut self) {
        if !self.expanded {
            return;
        }
        self.cancel_drawing();
        self.drag = None;
        self.hover = None;
        self.expanded = false;
        self.highlight.clear();
        debug!("Area selection collapsed");
    }

    pub fn switch_mode(&mut self, mode: SelectionMode, view: &dyn MapView) {
        if mode == self.mode {
            return;
        }
        self.cancel_drawing();
        self.drag = None;
        self.mode = mode;
        if self.expanded {
            self.ensure_shape(view);
            self.recompute(view);
        }
        debug!("Switched to {} mode", mode.label());
    }

    /// The "New" button: start drawing, or cancel a draw in progress
    pub fn press_new(&mut self, view: &dyn MapView) {
        if !self.expanded {
            return;
        }
        if self.draw.is_drawing() {
            self.cancel_drawing();
            self.recompute(view);
            return;
        }
        self.drag = None;
        self.draw = match self.mode {
            SelectionMode::Box => DrawState::PlacingFirstCorner,
            SelectionMode::Polygon => DrawState::PlacingFirstVertex { cursor: None },
        };
        self.highlight.clear();
        info!("Drawing a new {}", self.mode.label().to_lowercase());
    }

    /// Abandon a draw in progress; the previous shape becomes active again
    fn cancel_drawing(&mut self) -> bool {
        if !self.draw.is_drawing() {
            return false;
        }
        self.draw = DrawState::Idle;
        info!("Drawing cancelled");
        true
    }

    /// Escape key: cancel drawing and restore the previous shape's overlay
    pub fn cancel(&mut self, view: &dyn MapView) {
        if self.cancel_drawing() {
            self.recompute(view);
        }
    }

    /// Primary button pressed on the map. Returns true when the press was
    /// taken by the shape and must not pan the map.
    pub fn pointer_down(&mut self, view: &dyn MapView, pos: ScreenPos) -> bool {
        if self.drag.is_some() {
            return true;
        }
        let Some(handle) = self.active_shape().and_then(|s| s.hit_test(view, pos)) else {
            return false;
        };
        let world = view.screen_to_world(pos);
        match (self.mode, handle) {
            (SelectionMode::Polygon, Handle::Edge(edge)) => {
                let inserted = self
                    .polygon
                    .as_mut()
                    .and_then(|p| p.insert_vertex(edge, world));
                if let Some(index) = inserted {
                    debug!("Inserted polygon vertex {}", index);
                    self.recompute(view);
                }
            }
            _ => self.drag = Some(DragSession::new(handle, world)),
        }
        true
    }

    /// Pointer moved over the map. Returns true when the shape changed.
    pub fn pointer_move(&mut self, view: &dyn MapView, pos: ScreenPos) -> bool {
        self.hover = Some(pos);
        let world = view.screen_to_world(pos);
        let tile = world.trunc();

        match &mut self.draw {
            DrawState::Idle | DrawState::PlacingFirstCorner => {}
            DrawState::PlacingSecondCorner { cursor, .. } => *cursor = tile,
            DrawState::PlacingFirstVertex { cursor } | DrawState::PlacingVertices { cursor, .. } => {
                *cursor = Some(tile)
            }
        }

        let Some(mut session) = self.drag else {
            return false;
        };
        let changed = self
            .active_shape_mut()
            .map(|shape| shape.apply_drag(&mut session, world))
            .unwrap_or(false);
        self.drag = Some(session);
        if changed {
            self.recompute(view);
        }
        changed
    }

    /// Pointer left the map surface
    pub fn pointer_left(&mut self) {
        self.hover = None;
    }

    /// Button released anywhere, inside the map or not
    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// A click on the map. Returns true when it was used by the draw workflow.
    pub fn click(&mut self, view: &dyn MapView, pos: ScreenPos) -> bool {
        if !self.expanded || !self.draw.is_drawing() {
            return false;
        }
        let tile = view.screen_to_world(pos).trunc();
        match std::mem::take(&mut self.draw) {
            DrawState::Idle => {}
            DrawState::PlacingFirstCorner => {
                self.draw = DrawState::PlacingSecondCorner {
                    first: tile,
                    cursor: tile,
                };
            }
            DrawState::PlacingSecondCorner { first, .. } => {
                let shape = BoxShape::new(first, tile);
                info!("Box drawn from {:?} to {:?}", shape.min(), shape.max());
                self.box_shape = Some(shape);
                self.recompute(view);
            }
            DrawState::PlacingFirstVertex { .. } => {
                self.draw = DrawState::PlacingVertices {
                    points: vec![tile],
                    cursor: Some(tile),
                };
            }
            DrawState::PlacingVertices { mut points, .. } => {
                let closes = points.len() >= 3
                    && points.first().is_some_and(|first| {
                        let a = view.world_to_screen(WorldPos::from(*first));
                        let b = view.world_to_screen(WorldPos::from(tile));
                        a.distance(b) <= CLOSE_DISTANCE_PX
                    });
                if closes {
                    info!("Polygon drawn with {} vertices", points.len());
                    self.polygon = Some(PolygonShape::new(points));
                    self.recompute(view);
                } else {
                    points.push(tile);
                    self.draw = DrawState::PlacingVertices {
                        points,
                        cursor: Some(tile),
                    };
                }
            }
        }
        true
    }

    /// Apply a typed value to one of the box form fields
    pub fn edit_box_field(&mut self, view: &dyn MapView, field: BoxField, value: i32) -> bool {
        if self.mode != SelectionMode::Box || self.draw.is_drawing() {
            return false;
        }
        let plane = view.plane();
        let Some(shape) = &self.box_shape else {
            return false;
        };
        match BoxFields::from_box(shape, plane).apply_edit(field, value).to_box(plane) {
            Some(shape) => {
                self.box_shape = Some(shape);
                self.recompute(view);
                true
            }
            None => {
                warn!("Ignoring {:?} = {}: the box would have no area", field, value);
                false
            }
        }
    }

    /// Apply a typed game coordinate to one polygon vertex
    pub fn edit_vertex_field(&mut self, view: &dyn MapView, index: usize, axis: Axis, value: i32) -> bool {
        if self.mode != SelectionMode::Polygon || self.draw.is_drawing() {
            return false;
        }
        let plane = view.plane();
        let Some(polygon) = self.polygon.as_mut() else {
            return false;
        };
        let Some(vertex) = polygon.as_slice().get(index).copied() else {
            return false;
        };
        let mut game = world_to_game(vertex, plane);
        match axis {
            Axis::X => game.x = value,
            Axis::Y => game.y = value,
        }
        let changed = polygon.set_vertex(index, vertex_from_game(game, plane));
        if changed {
            self.recompute(view);
        }
        changed
    }

    /// Pan or zoom happened
    pub fn view_changed(&mut self) {
        self.highlight.view_changed();
    }

    /// The map switched planes; snippets and tile offsets depend on it
    pub fn plane_changed(&mut self, view: &dyn MapView) {
        if self.expanded {
            self.recompute(view);
        }
    }

    /// Highlight quads for the current view
    pub fn highlight_quads(&mut self, view: &dyn MapView) -> &[HighlightQuad] {
        self.highlight.repaint(view)
    }

    pub fn highlight(&self) -> &TileHighlight {
        &self.highlight
    }

    pub fn draw_preview(&self) -> Option<DrawPreview> {
        match &self.draw {
            DrawState::Idle | DrawState::PlacingFirstCorner => None,
            DrawState::PlacingSecondCorner { first, cursor } => Some(DrawPreview::Rect {
                a: *first,
                b: *cursor,
            }),
            DrawState::PlacingFirstVertex { cursor } => Some(DrawPreview::Path {
                points: Vec::new(),
                cursor: *cursor,
                close_indicator: None,
            }),
            DrawState::PlacingVertices { points, cursor } => Some(DrawPreview::Path {
                points: points.clone(),
                cursor: *cursor,
                close_indicator: (points.len() >= 3).then(|| points[0]),
            }),
        }
    }

    /// Screen point where clicking would insert a polygon vertex
    pub fn insertion_preview(&self, view: &dyn MapView) -> Option<ScreenPos> {
        if self.mode != SelectionMode::Polygon || self.drag.is_some() || self.active_shape().is_none() {
            return None;
        }
        let hover = self.hover?;
        self.polygon
            .as_ref()?
            .insertion_preview(view, hover)
            .map(|(_, pos)| pos)
    }

    /// The hovered-tile outline is hidden while an insertion preview is shown
    pub fn hides_position_rect(&self, view: &dyn MapView) -> bool {
        self.insertion_preview(view).is_some()
    }

    pub fn cursor_hint(&self, view: &dyn MapView) -> CursorHint {
        if self.expanded && self.draw.is_drawing() {
            return CursorHint::Crosshair;
        }
        let handle = match (self.drag, self.hover) {
            (Some(session), _) => Some(session.handle),
            (None, Some(hover)) => self.active_shape().and_then(|s| s.hit_test(view, hover)),
            (None, None) => None,
        };
        match (self.mode, handle) {
            (_, None) => CursorHint::Default,
            (_, Some(Handle::Body)) => CursorHint::Move,
            (SelectionMode::Polygon, Some(Handle::Vertex(_))) => CursorHint::Move,
            (SelectionMode::Polygon, Some(Handle::Edge(_))) => CursorHint::None,
            (SelectionMode::Box, Some(Handle::Vertex(_))) => CursorHint::ResizeDiagonal,
            (SelectionMode::Box, Some(Handle::Edge(index))) => match BoxEdge::from_index(index) {
                Some(edge) if edge.is_horizontal() => CursorHint::ResizeNs,
                _ => CursorHint::ResizeEw,
            },
        }
    }

    fn ensure_shape(&mut self, view: &dyn MapView) {
        match self.mode {
            SelectionMode::Box if self.box_shape.is_none() => {
                self.box_shape = Some(default_box(view));
            }
            SelectionMode::Polygon if self.polygon.is_none() => {
                self.polygon = Some(default_pentagon(view));
            }
            _ => {}
        }
    }

    /// Rebuild output and highlight for the active shape
    fn recompute(&mut self, view: &dyn MapView) {
        if !self.expanded || self.draw.is_drawing() {
            self.highlight.clear();
            return;
        }
        let plane = view.plane();
        match self.mode {
            SelectionMode::Box => {
                self.highlight.clear();
                if let Some(shape) = &self.box_shape {
                    self.output = Some(SelectionOutput::for_box(shape, plane));
                }
            }
            SelectionMode::Polygon => {
                let Some(shape) = &self.polygon else {
                    self.highlight.clear();
                    return;
                };
                let (output, coverage) = SelectionOutput::for_polygon(shape, plane);
                match coverage {
                    TileCoverage::Tiles { selected, border } => {
                        self.highlight.set_tiles(selected, border)
                    }
                    TileCoverage::Overflow { candidates } => {
                        warn!(
                            "Polygon spans {} candidate tiles, more than {}",
                            candidates, MAX_TILES
                        );
                        self.highlight.clear();
                    }
                }
                self.output = Some(output);
            }
        }
    }
}

/// Centred square covering part of the view
pub fn default_box(view: &dyn MapView) -> BoxShape {
    let bounds = view.view_bounds();
    let center = bounds.center();
    let half = bounds.width().min(bounds.height()) * DEFAULT_BOX_RATIO / 2.0;
    BoxShape::new(
        WorldPos::new(center.x - half, center.y - half).trunc(),
        WorldPos::new(center.x + half, center.y + half).trunc(),
    )
}

/// Regular pentagon around the view centre, sized for the zoom level
pub fn default_pentagon(view: &dyn MapView) -> PolygonShape {
    let radius = (80.0 / 2f64.powf(view.zoom() - 2.0)).max(8.0) * (2.0 / 3.0);
    PolygonShape::regular(view.center(), radius, PENTAGON_SIDES)
}
