//! Values derived from the active shape for display and copy-paste

use crate::coords::{
    game_to_world, plane_offset, world_to_game, ChunkRect, GamePoint, TilePos,
};
use crate::shape::{BoxShape, EditableShape, PolygonShape};
use crate::tiler::{tile_box, tile_polygon, Tile, TileCoverage, TOO_LARGE_MESSAGE};
use serde::{Deserialize, Serialize};

/// Y offset applied to tile origins in emitted tile lists
const TILE_OUTPUT_Y_OFFSET: i32 = 4;

/// An editable numeric field of the box form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxField {
    Width,
    Height,
    X1,
    Y1,
    X2,
    Y2,
}

/// The box in game coordinates.
///
/// x1/x2 are the west/east sides, y1/y2 the north/south sides. Game Y grows
/// southward, so `height = y1 - y2` is negative for any real box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoxFields {
    pub width: i32,
    pub height: i32,
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoxFields {
    pub fn from_box(shape: &BoxShape, plane: u8) -> Self {
        let (min, max) = shape.bounds();
        let south_west = world_to_game(min, plane);
        let north_east = world_to_game(max, plane);
        Self::from_sides(south_west.x, north_east.y, north_east.x, south_west.y)
    }

    fn from_sides(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            width: x2 - x1,
            height: y1 - y2,
            x1,
            y1,
            x2,
            y2,
        }
    }

    /// Fields after the user typed `value` into `field`.
    /// Width and height keep x1 and y2 fixed and move x2 and y1.
    pub fn apply_edit(&self, field: BoxField, value: i32) -> Self {
        let mut next = *self;
        match field {
            BoxField::Width => next.width = value,
            BoxField::Height => next.height = value,
            BoxField::X1 => next.x1 = value,
            BoxField::Y1 => next.y1 = value,
            BoxField::X2 => next.x2 = value,
            BoxField::Y2 => next.y2 = value,
        }
        if matches!(field, BoxField::Width | BoxField::Height) {
            next.x2 = next.x1 + next.width;
            next.y1 = next.y2 + next.height;
        }
        Self::from_sides(next.x1, next.y1, next.x2, next.y2)
    }

    /// World-space box described by these fields, `None` if it has no area
    pub fn to_box(&self, plane: u8) -> Option<BoxShape> {
        let a = game_to_world(GamePoint::new(self.x1, self.y1), plane).trunc();
        let b = game_to_world(GamePoint::new(self.x2, self.y2), plane).trunc();
        BoxShape::try_new(a, b)
    }

    /// `Box(x1,y1,x2,y2)`
    pub fn label(&self) -> String {
        format!("Box({},{},{},{})", self.x1, self.y1, self.x2, self.y2)
    }
}

/// Tile list handed to automation scripts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TileList {
    Tiles(Vec<[i32; 2]>),
    TooLarge,
}

impl TileList {
    /// Convert plane-local tiles into emitted `[x + planeOffset, y + 4]` pairs
    pub fn from_tiles(tiles: &[Tile], plane: u8) -> Self {
        let offset = plane_offset(plane);
        TileList::Tiles(
            tiles
                .iter()
                .map(|t| [t.x + offset, t.y + TILE_OUTPUT_Y_OFFSET])
                .collect(),
        )
    }

    /// JSON array of pairs, or the "too large" message
    pub fn text(&self) -> String {
        match self {
            TileList::Tiles(tiles) => {
                serde_json::to_string(tiles).unwrap_or_else(|_| String::from("[]"))
            }
            TileList::TooLarge => TOO_LARGE_MESSAGE.to_string(),
        }
    }
}

/// Everything shown in the selection panel for the current shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionOutput {
    pub plane: u8,
    pub chunk: ChunkRect,
    /// Present in box mode
    pub box_fields: Option<BoxFields>,
    /// Per-vertex game coordinates including the plane offset, polygon mode only
    pub vertices: Vec<GamePoint>,
    pub tiles: TileList,
}

impl SelectionOutput {
    pub fn for_box(shape: &BoxShape, plane: u8) -> Self {
        let (min, max) = shape.bounds();
        let tiles = match tile_box(world_to_game(min, 0), world_to_game(max, 0)) {
            TileCoverage::Tiles { selected, .. } => TileList::from_tiles(&selected, plane),
            TileCoverage::Overflow { .. } => TileList::TooLarge,
        };
        Self {
            plane,
            chunk: ChunkRect::from_world_bounds(min, max),
            box_fields: Some(BoxFields::from_box(shape, plane)),
            vertices: Vec::new(),
            tiles,
        }
    }

    /// Output for a polygon together with its plane-local tile coverage
    pub fn for_polygon(shape: &PolygonShape, plane: u8) -> (Self, TileCoverage) {
        let (min, max) = shape.bounds();
        let local: Vec<GamePoint> = shape.as_slice().iter().map(|v| world_to_game(*v, 0)).collect();
        let coverage = tile_polygon(&local);
        let tiles = match &coverage {
            TileCoverage::Tiles { selected, .. } => TileList::from_tiles(selected, plane),
            TileCoverage::Overflow { .. } => TileList::TooLarge,
        };
        let output = Self {
            plane,
            chunk: ChunkRect::from_world_bounds(min, max),
            box_fields: None,
            vertices: shape
                .as_slice()
                .iter()
                .map(|v| world_to_game(*v, plane))
                .collect(),
            tiles,
        };
        (output, coverage)
    }

    /// Snippet for the Simba 1.4 map API
    pub fn setup_chunk_snippet(&self) -> String {
        let c = &self.chunk;
        format!(
            "Map.SetupChunk(Chunk([{},{},{},{}], {}));",
            c.x1, c.y1, c.x2, c.y2, self.plane
        )
    }

    /// Snippet for the Simba 2.0 map API
    pub fn setup_snippet(&self) -> String {
        let c = &self.chunk;
        format!(
            "Map.Setup([Chunk(Box({},{},{},{}), {})]);",
            c.x1, c.y1, c.x2, c.y2, self.plane
        )
    }

    pub fn tiles_text(&self) -> String {
        self.tiles.text()
    }
}

/// World vertex for a polygon row edited in game coordinates
pub fn vertex_from_game(point: GamePoint, plane: u8) -> TilePos {
    game_to_world(point, plane).trunc()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_edit_holds_x1_and_y2() {
        let fields = BoxFields::from_sides(100, 70, 140, 50);
        assert_eq!(fields.height, 20);

        let edited = fields.apply_edit(BoxField::Width, 64);
        assert_eq!(edited.x1, 100);
        assert_eq!(edited.x2, 164);
        assert_eq!(edited.y2, 50);
        assert_eq!(edited.y1, 70);
        assert_eq!(edited.width, 64);
    }

    #[test]
    fn test_corner_edit_is_direct() {
        let fields = BoxFields::from_sides(100, 70, 140, 50);
        let edited = fields.apply_edit(BoxField::X2, 200);
        assert_eq!((edited.x1, edited.y1, edited.x2, edited.y2), (100, 70, 200, 50));
        assert_eq!(edited.width, 100);
    }

    #[test]
    fn test_box_fields_round_trip_through_world() {
        let shape = BoxShape::new(TilePos::new(3200, 3136), TilePos::new(3264, 3200));
        for plane in 0..=3 {
            let fields = BoxFields::from_box(&shape, plane);
            assert_eq!(fields.to_box(plane), Some(shape));
        }
        let fields = BoxFields::from_box(&shape, 0);
        assert_eq!(fields.x1, 3200 * 4 - 4096);
        assert_eq!(fields.y1, 50430 - 3200 * 4);
        assert_eq!(fields.label(), "Box(8704,37630,8960,37886)");
    }

    #[test]
    fn test_collapsed_fields_are_rejected() {
        let fields = BoxFields::from_sides(100, 70, 100, 50);
        assert_eq!(fields.to_box(0), None);
    }

    #[test]
    fn test_snippets() {
        let shape = BoxShape::new(TilePos::new(3200, 3136), TilePos::new(3300, 3264));
        let output = SelectionOutput::for_box(&shape, 1);
        assert_eq!(
            output.setup_chunk_snippet(),
            "Map.SetupChunk(Chunk([50,51,51,49], 1));"
        );
        assert_eq!(
            output.setup_snippet(),
            "Map.Setup([Chunk(Box(50,51,51,49), 1)]);"
        );
    }

    #[test]
    fn test_box_tile_list_offsets() {
        // world (0, 12600)-(2, 12602) spans game x -4096..-4088 and y 22..30
        let shape = BoxShape::new(TilePos::new(0, 12600), TilePos::new(2, 12602));
        let output = SelectionOutput::for_box(&shape, 1);
        let offset = 13056;
        assert_eq!(
            output.tiles,
            TileList::Tiles(vec![
                [-4096 + offset, 26],
                [-4092 + offset, 26],
                [-4096 + offset, 30],
                [-4092 + offset, 30],
            ])
        );
    }

    #[test]
    fn test_huge_box_reports_too_large() {
        let shape = BoxShape::new(TilePos::new(0, 0), TilePos::new(1000, 1000));
        let output = SelectionOutput::for_box(&shape, 0);
        assert_eq!(output.tiles, TileList::TooLarge);
        assert_eq!(output.tiles_text(), "Area too large (>50,000 tiles)");
    }

    #[test]
    fn test_polygon_output_lists_selected_tiles_only() {
        // Right triangle in world space covering a few whole tiles
        let shape = PolygonShape::new(vec![
            TilePos::new(3200, 3200),
            TilePos::new(3210, 3200),
            TilePos::new(3200, 3210),
        ]);
        let (output, coverage) = SelectionOutput::for_polygon(&shape, 2);
        let TileCoverage::Tiles { selected, border } = coverage else {
            panic!("Expected tiles");
        };
        assert!(!selected.is_empty());
        assert!(!border.is_empty());
        let TileList::Tiles(emitted) = &output.tiles else {
            panic!("Expected tile list");
        };
        assert_eq!(emitted.len(), selected.len());
        assert_eq!(emitted[0], [selected[0].x + 2 * 13056, selected[0].y + 4]);
        assert_eq!(output.vertices[0], GamePoint::new(8704 + 2 * 13056, 37630));
        assert!(output.tiles_text().starts_with("[["));
    }

    #[test]
    fn test_vertex_from_game() {
        assert_eq!(
            vertex_from_game(GamePoint::new(8704 + 13056, 37630), 1),
            TilePos::new(3200, 3200)
        );
    }
}
