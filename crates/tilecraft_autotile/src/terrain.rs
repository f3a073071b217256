//! Terrain palette and per-tile corner assignments

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

/// Error type for inconsistent wang set data
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WangSetError {
    #[error(
        "tile {tile_id} references terrain color {color} but the palette has {palette_len} colors"
    )]
    ColorOutOfRange {
        tile_id: u32,
        color: usize,
        palette_len: usize,
    },
}

/// One color of a wang set's palette (e.g. "regular grass", "cliffs", "ocean")
///
/// Palette position doubles as precedence: when cells of different terrains
/// meet at a corner, the later-declared terrain owns it. Palettes therefore
/// list base ground first and overlays (water, cliffs) after, matching how
/// the source tilesets order their colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terrain {
    pub id: Uuid,
    /// Tag used by terrain grids ("water", "plain", ...)
    pub name: String,
    /// Display color as a #rrggbb hex string, straight from the tileset
    #[serde(default)]
    pub color: String,
    /// Representative tile for editor palettes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_tile: Option<u32>,
}

impl Terrain {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color: String::new(),
            icon_tile: None,
        }
    }
}

/// The four corners of a tile, in `CornerColors` slot order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(usize)]
pub enum Corner {
    NorthWest = 0,
    NorthEast = 1,
    SouthEast = 2,
    SouthWest = 3,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::NorthWest,
        Corner::NorthEast,
        Corner::SouthEast,
        Corner::SouthWest,
    ];
}

/// Palette indices at a tile's four corners (NW, NE, SE, SW)
///
/// Doubles as the corner signature the resolver derives for a grid cell;
/// a tile matches a cell exactly when the two are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CornerColors(pub [usize; 4]);

impl CornerColors {
    pub const fn new(nw: usize, ne: usize, se: usize, sw: usize) -> Self {
        Self([nw, ne, se, sw])
    }

    /// All four corners the same color
    pub const fn uniform(color: usize) -> Self {
        Self([color; 4])
    }

    pub fn get(&self, corner: Corner) -> usize {
        self.0[corner as usize]
    }

    /// `Some(color)` when all four corners agree (a fully-interior tile)
    pub fn as_uniform(&self) -> Option<usize> {
        let [nw, ne, se, sw] = self.0;
        (nw == ne && ne == se && se == sw).then_some(nw)
    }

    /// Extract the corner colors from a Tiled 8-slot wangid
    ///
    /// Tiled stores eight alternating edge/corner values clockwise from the
    /// top edge; corners sit at the odd slots (1 = top-right, 3 =
    /// bottom-right, 5 = bottom-left, 7 = top-left) and colors are 1-based
    /// with 0 meaning unset. Corner-type wangsets leave the edge slots at
    /// zero. Returns `None` when any corner slot is unset, since a partial
    /// assignment can never match a derived signature.
    pub fn from_tiled_wangid(wangid: [u32; 8]) -> Option<Self> {
        let corner = |slot: usize| -> Option<usize> {
            match wangid[slot] {
                0 => None,
                color => Some(color as usize - 1),
            }
        };
        Some(Self([corner(7)?, corner(1)?, corner(3)?, corner(5)?]))
    }
}

/// A corner-type wang set: terrain palette plus per-tile corner colors
///
/// The direct counterpart of a tsx `<wangset type="corner">` block. Edge and
/// mixed wangsets are not modeled; none of the supported tilesets use them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WangSet {
    pub id: Uuid,
    pub name: String,
    /// Tileset this set belongs to
    pub tileset_id: Uuid,
    /// Color palette; order is precedence (later overlays earlier)
    pub terrains: Vec<Terrain>,
    /// tile id -> corner assignment
    pub tile_corners: HashMap<u32, CornerColors>,
}

impl WangSet {
    pub fn new(name: impl Into<String>, tileset_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            tileset_id,
            terrains: Vec::new(),
            tile_corners: HashMap::new(),
        }
    }

    /// Append a terrain color; returns its palette index
    pub fn add_terrain(&mut self, name: impl Into<String>) -> usize {
        self.terrains.push(Terrain::new(name));
        self.terrains.len() - 1
    }

    /// Palette index of a terrain tag
    pub fn terrain_index(&self, name: &str) -> Option<usize> {
        self.terrains.iter().position(|t| t.name == name)
    }

    /// Assign corner colors to a tile
    pub fn set_tile_corners(&mut self, tile_id: u32, corners: CornerColors) {
        self.tile_corners.insert(tile_id, corners);
    }

    pub fn tile_corners(&self, tile_id: u32) -> Option<CornerColors> {
        self.tile_corners.get(&tile_id).copied()
    }

    /// Every corner color must exist in the palette
    pub fn validate(&self) -> Result<(), WangSetError> {
        let palette_len = self.terrains.len();
        for (&tile_id, corners) in &self.tile_corners {
            for corner in Corner::ALL {
                let color = corners.get(corner);
                if color >= palette_len {
                    return Err(WangSetError::ColorOutOfRange {
                        tile_id,
                        color,
                        palette_len,
                    });
                }
            }
        }
        Ok(())
    }

    /// Tiles whose four corners all carry `terrain` (fill tiles)
    pub fn uniform_tiles(&self, terrain: usize) -> Vec<u32> {
        let mut tiles: Vec<u32> = self
            .tile_corners
            .iter()
            .filter(|(_, corners)| corners.as_uniform() == Some(terrain))
            .map(|(&tile_id, _)| tile_id)
            .collect();
        tiles.sort_unstable();
        tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wangid_corner_slots_map_to_compass_corners() {
        // tsx wangid "0,1,0,2,0,3,0,4": TR=1, BR=2, BL=3, TL=4 (1-based)
        let corners = CornerColors::from_tiled_wangid([0, 1, 0, 2, 0, 3, 0, 4]).unwrap();
        assert_eq!(corners, CornerColors::new(3, 0, 1, 2));
    }

    #[test]
    fn wangid_with_unset_corner_is_rejected() {
        assert_eq!(CornerColors::from_tiled_wangid([0, 1, 0, 0, 0, 1, 0, 1]), None);
    }

    #[test]
    fn wangid_uniform_set() {
        let corners = CornerColors::from_tiled_wangid([0, 1, 0, 1, 0, 1, 0, 1]).unwrap();
        assert_eq!(corners.as_uniform(), Some(0));
    }

    #[test]
    fn validate_rejects_color_outside_palette() {
        let mut set = WangSet::new("Ground", Uuid::new_v4());
        set.add_terrain("plain");
        set.set_tile_corners(5, CornerColors::new(0, 0, 1, 0));

        assert_eq!(
            set.validate(),
            Err(WangSetError::ColorOutOfRange {
                tile_id: 5,
                color: 1,
                palette_len: 1,
            })
        );
    }

    #[test]
    fn uniform_tiles_finds_fill_tiles_only() {
        let mut set = WangSet::new("Ground", Uuid::new_v4());
        let plain = set.add_terrain("plain");
        let water = set.add_terrain("water");
        set.set_tile_corners(0, CornerColors::uniform(plain));
        set.set_tile_corners(1, CornerColors::uniform(plain));
        set.set_tile_corners(2, CornerColors::new(plain, plain, water, plain));

        assert_eq!(set.uniform_tiles(plain), vec![0, 1]);
        assert!(set.uniform_tiles(water).is_empty());
    }
}
