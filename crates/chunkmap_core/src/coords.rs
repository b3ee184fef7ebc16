//! Coordinate spaces and the conversions between them
//!
//! Three coincident systems are in play:
//! - world space: the map projection, one unit per game tile, Y pointing north
//! - chunk space: world coordinates shifted right by 6 (64 world units per chunk)
//! - game space: what automation scripts consume, Y pointing south, planes offset on X

use serde::{Deserialize, Serialize};

/// X offset in game space between consecutive planes
pub const PLANE_OFFSET: i32 = 13056;
/// Shift turning a world coordinate into a chunk coordinate
pub const CHUNK_SHIFT: u32 = 6;
/// Size of one tile in game units
pub const TILE_SIZE: i32 = 4;
/// Highest valid plane index
pub const MAX_PLANE: u8 = 3;

const GAME_X_ORIGIN: i32 = 4096;
const GAME_Y_ORIGIN: i32 = 50430;

/// A raw (fractional) position in world space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f64,
    pub y: f64,
}

impl WorldPos {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Truncate toward zero onto the integer world grid
    pub fn trunc(self) -> TilePos {
        TilePos::new(self.x.trunc() as i32, self.y.trunc() as i32)
    }

    /// Round down onto the integer world grid
    pub fn floor(self) -> TilePos {
        TilePos::new(self.x.floor() as i32, self.y.floor() as i32)
    }
}

impl From<TilePos> for WorldPos {
    fn from(pos: TilePos) -> Self {
        Self::new(pos.x as f64, pos.y as f64)
    }
}

/// An integer position in world space. Every shape vertex is one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A position in game space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GamePoint {
    pub x: i32,
    pub y: i32,
}

impl GamePoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A chunk index pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ChunkPos {
    pub x: i32,
    pub y: i32,
}

/// Chunk-aligned bounds of a selection: x1 = west, y1 = north, x2 = east, y2 = south
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChunkRect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl ChunkRect {
    /// Chunk rectangle covering the world-space box spanned by `min` and `max`
    pub fn from_world_bounds(min: TilePos, max: TilePos) -> Self {
        Self {
            x1: min.x >> CHUNK_SHIFT,
            y1: max.y >> CHUNK_SHIFT,
            x2: max.x >> CHUNK_SHIFT,
            y2: min.y >> CHUNK_SHIFT,
        }
    }
}

/// Axis-aligned rectangle in world space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldRect {
    pub min: WorldPos,
    pub max: WorldPos,
}

impl WorldRect {
    /// Build from two arbitrary corners
    pub fn from_corners(a: WorldPos, b: WorldPos) -> Self {
        Self {
            min: WorldPos::new(a.x.min(b.x), a.y.min(b.y)),
            max: WorldPos::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> WorldPos {
        WorldPos::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Grow (positive ratio) or shrink (negative ratio) every side by `ratio` of the extent
    pub fn pad(&self, ratio: f64) -> Self {
        let dx = self.width().abs() * ratio;
        let dy = self.height().abs() * ratio;
        Self {
            min: WorldPos::new(self.min.x - dx, self.min.y - dy),
            max: WorldPos::new(self.max.x + dx, self.max.y + dy),
        }
    }

    pub fn contains(&self, pos: WorldPos) -> bool {
        pos.x >= self.min.x && pos.x <= self.max.x && pos.y >= self.min.y && pos.y <= self.max.y
    }

    pub fn intersects(&self, other: &WorldRect) -> bool {
        other.max.x >= self.min.x
            && other.min.x <= self.max.x
            && other.max.y >= self.min.y
            && other.min.y <= self.max.y
    }
}

/// A destination on the map: plane plus world tile coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub plane: i32,
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub fn tile(&self) -> TilePos {
        TilePos::new(self.x, self.y)
    }
}

/// Game-space X offset of a plane
#[inline]
pub fn plane_offset(plane: u8) -> i32 {
    PLANE_OFFSET * plane as i32
}

/// Convert an integer world position to game space on the given plane
pub fn world_to_game(pos: TilePos, plane: u8) -> GamePoint {
    GamePoint::new(
        pos.x * TILE_SIZE - GAME_X_ORIGIN + plane_offset(plane),
        GAME_Y_ORIGIN - pos.y * TILE_SIZE,
    )
}

/// Convert a game-space point back to world space.
///
/// Points that are not on a tile corner land inside a world unit; callers
/// truncate the result when they need a vertex.
pub fn game_to_world(point: GamePoint, plane: u8) -> WorldPos {
    WorldPos::new(
        (point.x - plane_offset(plane) + GAME_X_ORIGIN) as f64 / TILE_SIZE as f64,
        (GAME_Y_ORIGIN - point.y) as f64 / TILE_SIZE as f64,
    )
}

/// Chunk containing a world position (floor division by 64)
pub fn world_to_chunk(pos: TilePos) -> ChunkPos {
    ChunkPos {
        x: pos.x >> CHUNK_SHIFT,
        y: pos.y >> CHUNK_SHIFT,
    }
}

/// Pull every run of ASCII digits out of `text`.
/// Values wrap like the 32-bit integer operations applied to them afterwards.
fn extract_numbers(text: &str) -> Vec<u64> {
    let mut numbers = Vec::new();
    let mut current: Option<u64> = None;
    for c in text.chars() {
        if let Some(digit) = c.to_digit(10) {
            let value = current.unwrap_or(0);
            current = Some(value.wrapping_mul(10).wrapping_add(digit as u64));
        } else if let Some(value) = current.take() {
            numbers.push(value);
        }
    }
    if let Some(value) = current {
        numbers.push(value);
    }
    numbers
}

#[inline]
fn to_int32(value: u64) -> i32 {
    value as u32 as i32
}

/// Interpret free text as a map coordinate.
///
/// - one number: packed `plane << 28 | x << 14 | y`
/// - two or more: `[plane,] x, y` as world tiles when either exceeds 200,
///   otherwise `[plane,] chunkX, chunkY[, localX, localY]`
///
/// When the first number is not a plane index the current plane is used.
/// Returns `None` when the text contains no digits.
pub fn parse_freeform_coordinate(text: &str, current_plane: u8) -> Option<Coordinate> {
    let mut numbers = extract_numbers(text);
    match numbers.len() {
        0 => None,
        1 => {
            let packed = to_int32(numbers[0]);
            Some(Coordinate {
                plane: packed >> 28,
                x: (packed >> 14) & 0x3fff,
                y: packed & 0x3fff,
            })
        }
        _ => {
            numbers.extend([0, 0, 0]);
            if numbers[0] > MAX_PLANE as u64 {
                numbers.insert(0, current_plane as u64);
            }
            let plane = to_int32(numbers[0]);
            if numbers[1] > 200 || numbers[2] > 200 {
                Some(Coordinate {
                    plane,
                    x: to_int32(numbers[1]),
                    y: to_int32(numbers[2]),
                })
            } else {
                Some(Coordinate {
                    plane,
                    x: (to_int32(numbers[1]) << CHUNK_SHIFT) | to_int32(numbers[3]),
                    y: (to_int32(numbers[2]) << CHUNK_SHIFT) | to_int32(numbers[4]),
                })
            }
        }
    }
}

/// Render a coordinate as `plane, x, y`
pub fn format_coordinate(coord: &Coordinate) -> String {
    format!("{}, {}, {}", coord.plane, coord.x, coord.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_game_round_trip() {
        for plane in 0..=MAX_PLANE {
            for &(x, y) in &[(0, 0), (3200, 3200), (-17, 12799), (1023, -1000), (12800, 6400)] {
                let tile = TilePos::new(x, y);
                let game = world_to_game(tile, plane);
                let back = game_to_world(game, plane);
                assert_eq!(back, WorldPos::from(tile));
                assert_eq!(back.trunc(), tile);
            }
        }
    }

    #[test]
    fn test_world_to_game_values() {
        let game = world_to_game(TilePos::new(3200, 3200), 0);
        assert_eq!(game, GamePoint::new(8704, 37630));

        let upstairs = world_to_game(TilePos::new(3200, 3200), 2);
        assert_eq!(upstairs, GamePoint::new(8704 + 2 * 13056, 37630));
    }

    #[test]
    fn test_game_to_world_inside_tile() {
        // 2 game units past a tile corner is half a world unit
        let world = game_to_world(GamePoint::new(8706, 37628), 0);
        assert_eq!(world, WorldPos::new(3200.5, 3200.5));
        assert_eq!(world.trunc(), TilePos::new(3200, 3200));
    }

    #[test]
    fn test_world_to_chunk_floors_negative() {
        assert_eq!(world_to_chunk(TilePos::new(3200, 3263)), ChunkPos { x: 50, y: 50 });
        assert_eq!(world_to_chunk(TilePos::new(-1, -64)), ChunkPos { x: -1, y: -1 });
        assert_eq!(world_to_chunk(TilePos::new(-65, 63)), ChunkPos { x: -2, y: 0 });
    }

    #[test]
    fn test_chunk_rect_orientation() {
        let rect = ChunkRect::from_world_bounds(TilePos::new(3200, 3136), TilePos::new(3300, 3264));
        assert_eq!(
            rect,
            ChunkRect {
                x1: 50,
                y1: 51,
                x2: 51,
                y2: 49
            }
        );
    }

    #[test]
    fn test_world_rect_pad_shrinks() {
        let rect = WorldRect::from_corners(WorldPos::new(100.0, 0.0), WorldPos::new(0.0, 100.0));
        let padded = rect.pad(-0.3);
        assert_eq!(padded.min, WorldPos::new(30.0, 30.0));
        assert_eq!(padded.max, WorldPos::new(70.0, 70.0));
        assert!(padded.contains(WorldPos::new(50.0, 50.0)));
        assert!(!padded.contains(WorldPos::new(10.0, 50.0)));
    }

    #[test]
    fn test_parse_no_numbers() {
        assert_eq!(parse_freeform_coordinate("lumbridge", 0), None);
        assert_eq!(parse_freeform_coordinate("", 2), None);
    }

    #[test]
    fn test_parse_packed() {
        let packed = (1u32 << 28) | (3222 << 14) | 3218;
        let coord = parse_freeform_coordinate(&packed.to_string(), 0).unwrap();
        assert_eq!(
            coord,
            Coordinate {
                plane: 1,
                x: 3222,
                y: 3218
            }
        );
    }

    #[test]
    fn test_parse_global_injects_plane() {
        let coord = parse_freeform_coordinate("[3222, 3218]", 2).unwrap();
        assert_eq!(
            coord,
            Coordinate {
                plane: 2,
                x: 3222,
                y: 3218
            }
        );
    }

    #[test]
    fn test_parse_global_with_plane() {
        let coord = parse_freeform_coordinate("1, 3222, 3218", 0).unwrap();
        assert_eq!(
            coord,
            Coordinate {
                plane: 1,
                x: 3222,
                y: 3218
            }
        );
    }

    #[test]
    fn test_parse_chunk_and_local() {
        // plane 0, chunk (50, 50), local (22, 18)
        let coord = parse_freeform_coordinate("0_50_50_22_18", 3).unwrap();
        assert_eq!(
            coord,
            Coordinate {
                plane: 0,
                x: 50 * 64 + 22,
                y: 50 * 64 + 18
            }
        );
    }

    #[test]
    fn test_parse_chunk_without_local() {
        let coord = parse_freeform_coordinate("Chunk(50, 49)", 1).unwrap();
        // 50 is not a plane, so plane 1 is injected and the pair is a chunk
        assert_eq!(
            coord,
            Coordinate {
                plane: 1,
                x: 3200,
                y: 49 * 64
            }
        );
    }

    #[test]
    fn test_format_coordinate() {
        let coord = Coordinate {
            plane: 0,
            x: 3200,
            y: 3201,
        };
        assert_eq!(format_coordinate(&coord), "0, 3200, 3201");
    }
}
