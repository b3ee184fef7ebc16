//! Painting helpers for the map overlays

use bevy_egui::egui::{self, Color32, CursorIcon, Pos2, Stroke};
use chunkmap_core::{
    CursorHint, DrawPreview, EditableShape, HighlightQuad, MapView, ScreenPos, TileClass,
    TilePos, WorldPos, WorldRect, CHUNK_SHIFT, CLOSE_DISTANCE_PX, VERTEX_RADIUS_PX,
};

use crate::ui::ViewerTheme;
use crate::view::ViewportSnapshot;

/// Chunk grid is skipped when chunks get smaller than this on screen
const MIN_CHUNK_PX: f64 = 12.0;
/// Upper bound on grid lines per axis
const MAX_GRID_LINES: i64 = 400;
const CROSSHAIR_ARM_PX: f32 = 12.0;
const INSERTION_RADIUS_PX: f32 = 5.0;

pub(crate) const HOVER_STROKE: Stroke = Stroke {
    width: 1.0,
    color: ViewerTheme::HOVER_TILE,
};

fn to_pos(pos: ScreenPos) -> Pos2 {
    egui::pos2(pos.x, pos.y)
}

fn tile_to_pos(view: &dyn MapView, tile: TilePos) -> Pos2 {
    to_pos(view.world_to_screen(WorldPos::from(tile)))
}

pub fn tile_class_color(class: TileClass) -> Color32 {
    let [r, g, b, a] = class.color();
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

pub fn cursor_icon(hint: CursorHint) -> CursorIcon {
    match hint {
        CursorHint::Default => CursorIcon::Default,
        CursorHint::Crosshair => CursorIcon::Crosshair,
        CursorHint::Move => CursorIcon::Move,
        CursorHint::ResizeNs => CursorIcon::ResizeVertical,
        CursorHint::ResizeEw => CursorIcon::ResizeHorizontal,
        CursorHint::ResizeDiagonal => CursorIcon::ResizeNeSw,
        CursorHint::None => CursorIcon::None,
    }
}

/// Screen X of vertical and screen Y of horizontal chunk boundaries in view,
/// or `None` when chunks are too small to draw
pub fn chunk_grid_lines(view: &ViewportSnapshot) -> Option<(Vec<f32>, Vec<f32>)> {
    let chunk = (1i64 << CHUNK_SHIFT) as f64;
    if chunk * view.pixels_per_unit() < MIN_CHUNK_PX {
        return None;
    }
    let bounds = view.view_bounds();
    let range = |min: f64, max: f64| {
        let first = (min / chunk).ceil() as i64;
        let last = (max / chunk).floor() as i64;
        first..=last.min(first + MAX_GRID_LINES)
    };

    let xs = range(bounds.min.x, bounds.max.x)
        .map(|i| view.world_to_screen(WorldPos::new(i as f64 * chunk, bounds.min.y)).x)
        .collect();
    let ys = range(bounds.min.y, bounds.max.y)
        .map(|i| view.world_to_screen(WorldPos::new(bounds.min.x, i as f64 * chunk)).y)
        .collect();
    Some((xs, ys))
}

pub(crate) fn draw_chunk_grid(painter: &egui::Painter, view: &ViewportSnapshot) {
    let Some((xs, ys)) = chunk_grid_lines(view) else {
        return;
    };
    let (width, height) = view.size;
    let stroke = Stroke::new(1.0, ViewerTheme::CHUNK_GRID);
    for x in xs {
        painter.line_segment([egui::pos2(x, 0.0), egui::pos2(x, height)], stroke);
    }
    for y in ys {
        painter.line_segment([egui::pos2(0.0, y), egui::pos2(width, y)], stroke);
    }
}

pub(crate) fn draw_world_rect(painter: &egui::Painter, view: &dyn MapView, rect: &WorldRect, stroke: Stroke) {
    let a = to_pos(view.world_to_screen(rect.min));
    let b = to_pos(view.world_to_screen(rect.max));
    painter.rect_stroke(egui::Rect::from_two_pos(a, b), 0.0, stroke, egui::StrokeKind::Middle);
}

pub(crate) fn draw_map_border(painter: &egui::Painter, view: &dyn MapView, bounds: &WorldRect) {
    draw_world_rect(painter, view, bounds, Stroke::new(2.0, ViewerTheme::MAP_BORDER));
}

/// Border quads first so selected tiles paint over them
pub(crate) fn draw_highlight(painter: &egui::Painter, quads: &[HighlightQuad]) {
    for quad in quads {
        let rect = egui::Rect::from_two_pos(to_pos(quad.min), to_pos(quad.max));
        painter.rect_filled(rect, 0.0, tile_class_color(quad.class));
    }
}

fn draw_vertex_handle(painter: &egui::Painter, center: Pos2) {
    let rect = egui::Rect::from_center_size(center, egui::vec2(VERTEX_RADIUS_PX * 2.0, VERTEX_RADIUS_PX * 2.0));
    painter.rect_filled(rect, 1.0, ViewerTheme::HANDLE_FILL);
    painter.rect_stroke(rect, 1.0, Stroke::new(1.0, ViewerTheme::SHAPE_STROKE), egui::StrokeKind::Inside);
}

/// Translucent tint inside the box outline
pub fn shape_fill() -> Color32 {
    ViewerTheme::SHAPE_STROKE.gamma_multiply(0.15)
}

/// Outline and handles. `filled` tints the inside; only the box asks for it
/// since its outline is always an axis-aligned rectangle.
pub(crate) fn draw_shape(
    painter: &egui::Painter,
    view: &dyn MapView,
    shape: &dyn EditableShape,
    filled: bool,
) {
    let points: Vec<Pos2> = shape.vertices().into_iter().map(|v| tile_to_pos(view, v)).collect();
    if filled {
        painter.rect_filled(egui::Rect::from_points(&points), 0.0, shape_fill());
    }
    painter.add(egui::Shape::closed_line(
        points.clone(),
        Stroke::new(2.0, ViewerTheme::SHAPE_STROKE),
    ));
    for point in points {
        draw_vertex_handle(painter, point);
    }
}

pub(crate) fn draw_preview(painter: &egui::Painter, view: &dyn MapView, preview: &DrawPreview) {
    let stroke = Stroke::new(2.0, ViewerTheme::PREVIEW_STROKE);
    match preview {
        DrawPreview::Rect { a, b } => {
            let rect = egui::Rect::from_two_pos(tile_to_pos(view, *a), tile_to_pos(view, *b));
            painter.rect_stroke(rect, 0.0, stroke, egui::StrokeKind::Middle);
        }
        DrawPreview::Path {
            points,
            cursor,
            close_indicator,
        } => {
            let mut path: Vec<Pos2> = points.iter().map(|p| tile_to_pos(view, *p)).collect();
            for point in &path {
                draw_vertex_handle(painter, *point);
            }
            if let Some(cursor) = cursor {
                path.push(tile_to_pos(view, *cursor));
            }
            if path.len() >= 2 {
                painter.extend(egui::Shape::dashed_line(&path, stroke, 6.0, 4.0));
            }
            if let Some(first) = close_indicator {
                painter.circle_stroke(
                    tile_to_pos(view, *first),
                    CLOSE_DISTANCE_PX,
                    Stroke::new(1.5, ViewerTheme::PREVIEW_STROKE),
                );
            }
        }
    }
}

pub(crate) fn draw_insertion_preview(painter: &egui::Painter, pos: ScreenPos) {
    painter.circle(
        to_pos(pos),
        INSERTION_RADIUS_PX,
        ViewerTheme::HANDLE_FILL,
        Stroke::new(1.5, ViewerTheme::SHAPE_STROKE),
    );
}

pub(crate) fn draw_crosshair(painter: &egui::Painter, pos: ScreenPos) {
    let center = to_pos(pos);
    let stroke = Stroke::new(2.0, ViewerTheme::MARKER);
    painter.line_segment(
        [center - egui::vec2(CROSSHAIR_ARM_PX, 0.0), center + egui::vec2(CROSSHAIR_ARM_PX, 0.0)],
        stroke,
    );
    painter.line_segment(
        [center - egui::vec2(0.0, CROSSHAIR_ARM_PX), center + egui::vec2(0.0, CROSSHAIR_ARM_PX)],
        stroke,
    );
}
