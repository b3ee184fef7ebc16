//! Screen-space overlay of the tiles under the polygon selection

use crate::coords::{game_to_world, GamePoint, TILE_SIZE};
use crate::tiler::Tile;
use crate::view::{MapView, ScreenPos};

/// How a highlighted tile relates to the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileClass {
    Border,
    Selected,
}

impl TileClass {
    /// Fill colour as RGBA bytes
    pub fn color(self) -> [u8; 4] {
        match self {
            TileClass::Border => [255, 120, 0, 38],
            TileClass::Selected => [0, 212, 255, 38],
        }
    }
}

/// One filled rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightQuad {
    pub min: ScreenPos,
    pub max: ScreenPos,
    pub class: TileClass,
}

/// Keeps the tile sets and the quads last painted for them.
///
/// Quads are only rebuilt after the tiles or the view changed, and only
/// tiles intersecting the visible bounds produce a quad. Border quads come
/// first so selected tiles paint over them.
#[derive(Debug, Default)]
pub struct TileHighlight {
    selected: Vec<Tile>,
    border: Vec<Tile>,
    quads: Vec<HighlightQuad>,
    dirty: bool,
}

impl TileHighlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tiles are plane-local game tiles
    pub fn set_tiles(&mut self, selected: Vec<Tile>, border: Vec<Tile>) {
        self.selected = selected;
        self.border = border;
        self.dirty = true;
    }

    pub fn clear(&mut self) {
        self.set_tiles(Vec::new(), Vec::new());
    }

    /// Call on every pan or zoom
    pub fn view_changed(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty() && self.border.is_empty()
    }

    pub fn selected(&self) -> &[Tile] {
        &self.selected
    }

    pub fn border(&self) -> &[Tile] {
        &self.border
    }

    /// Quads for the current view, rebuilt if anything changed since the last call
    pub fn repaint(&mut self, view: &dyn MapView) -> &[HighlightQuad] {
        if self.dirty {
            self.quads.clear();
            let bounds = view.view_bounds();
            let passes = [(&self.border, TileClass::Border), (&self.selected, TileClass::Selected)];
            for (tiles, class) in passes {
                for tile in tiles.iter() {
                    let north_west = game_to_world(GamePoint::new(tile.x, tile.y), 0);
                    let south_east =
                        game_to_world(GamePoint::new(tile.x + TILE_SIZE, tile.y + TILE_SIZE), 0);
                    if south_east.x < bounds.min.x
                        || north_west.x > bounds.max.x
                        || south_east.y > bounds.max.y
                        || north_west.y < bounds.min.y
                    {
                        continue;
                    }
                    let a = view.world_to_screen(north_west);
                    let b = view.world_to_screen(south_east);
                    self.quads.push(HighlightQuad {
                        min: ScreenPos::new(a.x.min(b.x), a.y.min(b.y)),
                        max: ScreenPos::new(a.x.max(b.x), a.y.max(b.y)),
                        class,
                    });
                }
            }
            self.dirty = false;
        }
        &self.quads
    }

    /// Quads from the last repaint
    pub fn quads(&self) -> &[HighlightQuad] {
        &self.quads
    }
}
