//! Wang-corner terrain autotiling for tilecraft
//!
//! Takes a logical terrain grid ("water", "plain", "cliff" per cell) and
//! picks the concrete tile for every cell by matching each cell's four
//! corner colors against the tileset's Wang-corner assignments, the way
//! Tiled's corner-type wangsets define them.
//!
//! # Example
//!
//! ```rust,ignore
//! use tilecraft_autotile::{CornerColors, CornerResolver, WangSet};
//! use tilecraft_core::TileCatalog;
//!
//! let mut wang_set = WangSet::new("Overworld", tileset_id);
//! let plain = wang_set.add_terrain("plain");
//! let water = wang_set.add_terrain("water");
//! wang_set.set_tile_corners(0, CornerColors::uniform(plain));
//! wang_set.set_tile_corners(15, CornerColors::uniform(water));
//! // ... transition tiles ...
//!
//! let resolver = CornerResolver::new(&wang_set, &catalog)?;
//! let tiles = resolver.resolve_grid(&cells, width, height, &mut rng)?;
//! ```

mod resolve;
mod terrain;

pub use resolve::{corner_signature, CornerResolver, ResolveError};
pub use terrain::{Corner, CornerColors, Terrain, WangSet, WangSetError};

// Re-export tilecraft_core
pub use tilecraft_core;
