//! Tileset header data

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Header fields of a tileset definition: atlas image, tile geometry, count
///
/// One tileset maps to one atlas image; the tile ids used throughout the
/// crate are local to the tileset (a map loader adds its firstgid offset
/// before and after calling into this library).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tileset {
    pub id: Uuid,
    pub name: String,
    /// Path to the atlas image, relative to the asset root
    pub image_path: String,
    /// Tile width in pixels
    pub tile_width: u32,
    /// Tile height in pixels
    pub tile_height: u32,
    /// Tiles per atlas row
    pub columns: u32,
    /// Total tiles in the atlas
    pub tile_count: u32,
}

impl Tileset {
    pub fn new(
        name: impl Into<String>,
        image_path: impl Into<String>,
        tile_width: u32,
        tile_height: u32,
        columns: u32,
        tile_count: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            image_path: image_path.into(),
            tile_width,
            tile_height,
            columns,
            tile_count,
        }
    }

    pub fn contains(&self, tile_id: u32) -> bool {
        tile_id < self.tile_count
    }

    /// Atlas rows, rounded up for a ragged final row
    pub fn rows(&self) -> u32 {
        if self.columns == 0 {
            return 0;
        }
        self.tile_count.div_ceil(self.columns)
    }

    /// Atlas grid position of a tile, or `None` when out of range
    pub fn grid_position(&self, tile_id: u32) -> Option<(u32, u32)> {
        if !self.contains(tile_id) || self.columns == 0 {
            return None;
        }
        Some((tile_id % self.columns, tile_id / self.columns))
    }

    /// Pixel offset of a tile's top-left corner within the atlas image
    pub fn pixel_offset(&self, tile_id: u32) -> Option<(u32, u32)> {
        let (col, row) = self.grid_position(tile_id)?;
        Some((col * self.tile_width, row * self.tile_height))
    }
}
