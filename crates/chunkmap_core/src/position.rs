//! Pointer readout, "go to" destinations and click-to-copy text

use crate::coords::{
    format_coordinate, parse_freeform_coordinate, world_to_chunk, world_to_game, ChunkPos,
    Coordinate, GamePoint, TilePos, WorldPos, WorldRect, MAX_PLANE,
};
use crate::error::CoordinateError;
use std::time::Duration;
use tracing::{info, warn};

/// Zoom level a successful "go to" flies to
pub const DESTINATION_ZOOM: f64 = 3.0;
/// How long the destination marker stays on the map
pub const CROSSHAIR_LIFETIME: Duration = Duration::from_secs(50);

/// What the position readout shows for the tile under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionReadout {
    pub tile: TilePos,
    pub chunk: ChunkPos,
    pub plane: u8,
    pub game: GamePoint,
}

impl PositionReadout {
    pub fn at(pos: WorldPos, plane: u8) -> Self {
        let tile = pos.trunc();
        Self {
            tile,
            chunk: world_to_chunk(tile),
            plane,
            game: world_to_game(tile, plane),
        }
    }

    /// `Chunk(cx, cy, plane)`
    pub fn chunk_text(&self) -> String {
        format!("Chunk({}, {}, {})", self.chunk.x, self.chunk.y, self.plane)
    }

    /// `[gameX, gameY]`
    pub fn game_text(&self) -> String {
        format!("[{}, {}]", self.game.x, self.game.y)
    }

    /// Outline of the hovered world tile
    pub fn hover_rect(&self) -> WorldRect {
        let min = WorldPos::from(self.tile);
        WorldRect::from_corners(min, WorldPos::new(min.x + 1.0, min.y + 1.0))
    }
}

/// Where the view goes after a successful "go to"
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Destination {
    pub coordinate: Coordinate,
    pub plane: u8,
    /// Centre of the destination tile, where the marker is placed
    pub marker: WorldPos,
    pub zoom: f64,
}

/// Check that a parsed coordinate is on a real plane and inside the map
pub fn validate_coordinate(coord: Coordinate, bounds: &WorldRect) -> Result<Coordinate, CoordinateError> {
    let input = format_coordinate(&coord);
    if !(0..=MAX_PLANE as i32).contains(&coord.plane) {
        return Err(CoordinateError::InvalidPlane {
            input,
            parsed: coord,
        });
    }
    if !bounds.contains(WorldPos::from(coord.tile())) {
        return Err(CoordinateError::OutOfBounds {
            input,
            parsed: coord,
        });
    }
    Ok(coord)
}

/// Parse and validate "go to" text
pub fn resolve_destination(
    text: &str,
    current_plane: u8,
    bounds: &WorldRect,
) -> Result<Destination, CoordinateError> {
    let result = parse_freeform_coordinate(text, current_plane)
        .ok_or_else(|| CoordinateError::NoNumbers(text.to_string()))
        .and_then(|coord| validate_coordinate(coord, bounds))
        .map_err(|e| e.with_input(text));

    match result {
        Ok(coordinate) => {
            info!("Going to {}", format_coordinate(&coordinate));
            Ok(Destination {
                coordinate,
                plane: coordinate.plane as u8,
                marker: WorldPos::new(coordinate.x as f64 + 0.5, coordinate.y as f64 + 0.5),
                zoom: DESTINATION_ZOOM,
            })
        }
        Err(e) => {
            warn!("{}", e);
            Err(e)
        }
    }
}

/// Text copied when the map is clicked: floored world coordinates
pub fn click_copy_text(pos: WorldPos) -> String {
    let tile = pos.floor();
    format!("[{}, {}]", tile.x, tile.y)
}
