use crate::core::Rect;
use glam::{IVec2, Vec2};
use std::collections::HashSet;

/// Read-only view of the solid tiles of a level
///
/// The physics layer only ever asks for the solid rectangles in the
/// neighbourhood of a position, or whether a single point is inside a solid
/// tile. Storage and parsing of the map belong to the implementor.
pub trait TileQuery {
    /// All solid rectangles that could overlap an entity (up to one tile in
    /// size) whose top-left corner is at `position`
    fn solid_rects_near(&self, position: Vec2) -> Vec<Rect>;

    /// Point-in-solid-tile test (projectiles, probes)
    fn is_solid_point(&self, point: Vec2) -> bool;
}

/// Tile offsets scanned around the tile containing a position
const NEIGHBOR_OFFSETS: [IVec2; 9] = [
    IVec2::new(-1, -1),
    IVec2::new(0, -1),
    IVec2::new(1, -1),
    IVec2::new(-1, 0),
    IVec2::new(0, 0),
    IVec2::new(1, 0),
    IVec2::new(-1, 1),
    IVec2::new(0, 1),
    IVec2::new(1, 1),
];

/// Sparse grid of solid square tiles
#[derive(Debug, Clone, Default)]
pub struct TileGrid {
    tile_size: f32,
    solid: HashSet<IVec2>,
}

impl TileGrid {
    /// Create an empty grid with the given tile edge length in pixels
    pub fn new(tile_size: f32) -> Self {
        Self {
            tile_size,
            solid: HashSet::new(),
        }
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Mark the tile at grid coordinates `tile` as solid
    pub fn insert(&mut self, tile: IVec2) {
        self.solid.insert(tile);
    }

    /// Fill a horizontal run of tiles, inclusive on both ends
    pub fn fill_row(&mut self, y: i32, x_start: i32, x_end: i32) {
        for x in x_start..=x_end {
            self.insert(IVec2::new(x, y));
        }
    }

    pub fn is_solid(&self, tile: IVec2) -> bool {
        self.solid.contains(&tile)
    }

    pub fn len(&self) -> usize {
        self.solid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solid.is_empty()
    }

    /// Grid coordinates of the tile containing a world position
    pub fn tile_at(&self, position: Vec2) -> IVec2 {
        (position / self.tile_size).floor().as_ivec2()
    }

    /// World rectangles of every solid tile, in no particular order
    pub fn solid_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.solid.iter().map(|tile| self.tile_rect(*tile))
    }

    fn tile_rect(&self, tile: IVec2) -> Rect {
        Rect::new(
            tile.x as f32 * self.tile_size,
            tile.y as f32 * self.tile_size,
            self.tile_size,
            self.tile_size,
        )
    }
}

impl TileQuery for TileGrid {
    fn solid_rects_near(&self, position: Vec2) -> Vec<Rect> {
        let origin = self.tile_at(position);
        NEIGHBOR_OFFSETS
            .iter()
            .map(|offset| origin + *offset)
            .filter(|tile| self.is_solid(*tile))
            .map(|tile| self.tile_rect(tile))
            .collect()
    }

    fn is_solid_point(&self, point: Vec2) -> bool {
        self.is_solid(self.tile_at(point))
    }
}
