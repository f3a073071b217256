//! tilecraft - Wang-corner autotiling and tile animation for Tiled-style tilesets
//!
//! Single import for the whole runtime:
//! - `tilecraft_core` - tile catalog, tileset metadata, weighted variant
//!   sampling
//! - `tilecraft_autotile` - terrain palette, corner signatures, grid
//!   resolution
//! - `tilecraft_animation` - cyclic frame sequences and the scheduler
//!
//! The library starts where a tileset parser ends and stops where a
//! renderer begins: it never touches XML, images, or the screen.

pub use tilecraft_animation;
pub use tilecraft_autotile;
pub use tilecraft_core;

pub use tilecraft_animation::{Animation, AnimationError, AnimationState, Frame};
pub use tilecraft_autotile::{
    corner_signature, Corner, CornerColors, CornerResolver, ResolveError, Terrain, WangSet,
    WangSetError,
};
pub use tilecraft_core::{CatalogError, TileCatalog, TileDefinition, Tileset};
