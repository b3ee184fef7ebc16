//! Area selection and coordinate transforms for chunked game maps
//!
//! This crate holds everything that does not depend on a renderer:
//! - `coords` - world, chunk and game coordinate spaces and "go to" parsing
//! - `tiler` - which 4x4 game tiles an outline selects
//! - `shape` - the editable box and polygon with their drag handles
//! - `highlight` - culled screen quads for the selected tiles
//! - `controller` - the selection state machine and its derived output
//! - `panel` - collapsible panel registry
//! - `position` - pointer readout, destinations and click-to-copy
//!
//! The map itself is reached through the [`MapView`] trait.

mod config;
mod controller;
mod coords;
mod error;
mod geometry;
mod highlight;
mod output;
mod panel;
mod position;
mod shape;
mod tiler;
mod view;

pub use config::MapConfig;
pub use controller::{
    default_box, default_pentagon, Axis, CursorHint, DrawPreview, DrawState, SelectionController,
    SelectionMode, CLOSE_DISTANCE_PX,
};
pub use coords::{
    format_coordinate, game_to_world, parse_freeform_coordinate, plane_offset, world_to_chunk,
    world_to_game, ChunkPos, ChunkRect, Coordinate, GamePoint, TilePos, WorldPos, WorldRect,
    CHUNK_SHIFT, MAX_PLANE, PLANE_OFFSET, TILE_SIZE,
};
pub use error::CoordinateError;
pub use highlight::{HighlightQuad, TileClass, TileHighlight};
pub use output::{vertex_from_game, BoxField, BoxFields, SelectionOutput, TileList};
pub use panel::{PanelId, PanelRegistry};
pub use position::{
    click_copy_text, resolve_destination, validate_coordinate, Destination, PositionReadout,
    CROSSHAIR_LIFETIME, DESTINATION_ZOOM,
};
pub use shape::{
    BoxEdge, BoxShape, DragSession, EditableShape, Handle, PolygonShape, BOX_EDGE_HALF_WIDTH_PX,
    NEAR_VERTEX_PX, POLYGON_EDGE_HALF_WIDTH_PX, VERTEX_RADIUS_PX,
};
pub use tiler::{tile_box, tile_polygon, Tile, TileCoverage, TileGrid, MAX_TILES, TOO_LARGE_MESSAGE};
pub use view::{MapView, ScreenPos};
