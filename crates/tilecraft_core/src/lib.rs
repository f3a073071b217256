//! Core tile data for tilecraft
//!
//! This crate provides the read-only tile catalog a game builds once at
//! startup from its parsed tileset definitions:
//! - `TileDefinition` - per-tile metadata (terrain tag, spawn weight, animation)
//! - `TileCatalog` - id lookup and weighted variant sampling
//! - `Tileset` - tileset header data (image, tile size, columns)
//!
//! Reading the tileset files themselves (tsx XML) is the caller's job; this
//! crate starts where the parser ends.

mod catalog;
mod tile;
mod tileset;

pub use catalog::{CatalogError, TileCatalog};
pub use tile::TileDefinition;
pub use tileset::Tileset;
