//! Tile catalog: id lookup and weighted variant sampling

use crate::tile::TileDefinition;
use log::warn;
use rand::Rng;
use std::collections::HashMap;
use thiserror::Error;

/// Error type for catalog misses
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("tile id {0} is not in the catalog")]
    UnknownTileId(u32),
    #[error("no catalog tile carries the terrain tag \"{0}\"")]
    UnknownTerrainTag(String),
}

/// Read-only index over a tileset's tile definitions
///
/// Built once at startup, then shared freely; every accessor takes `&self`
/// and returns the same data on every call. The terrain index is derived
/// from the definitions and kept in sync by `insert`.
#[derive(Debug, Clone, Default)]
pub struct TileCatalog {
    tiles: HashMap<u32, TileDefinition>,
    /// terrain tag -> ids of tiles carrying it
    by_terrain: HashMap<String, Vec<u32>>,
}

impl TileCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from parsed tile definitions
    pub fn from_definitions(definitions: impl IntoIterator<Item = TileDefinition>) -> Self {
        let mut catalog = Self::new();
        for definition in definitions {
            catalog.insert(definition);
        }
        catalog
    }

    /// Add one tile definition, replacing any previous entry for its id
    pub fn insert(&mut self, definition: TileDefinition) {
        let id = definition.id;
        if let Some(previous) = self.tiles.insert(id, definition) {
            warn!("tile {id} defined twice; keeping the later definition");
            if let Some(tag) = previous.terrain_type {
                if let Some(ids) = self.by_terrain.get_mut(&tag) {
                    ids.retain(|&other| other != id);
                    if ids.is_empty() {
                        self.by_terrain.remove(&tag);
                    }
                }
            }
        }
        if let Some(tag) = self.tiles[&id].terrain_type.clone() {
            self.by_terrain.entry(tag).or_default().push(id);
        }
    }

    /// Look up a tile definition by id
    pub fn lookup(&self, tile_id: u32) -> Result<&TileDefinition, CatalogError> {
        self.tiles
            .get(&tile_id)
            .ok_or(CatalogError::UnknownTileId(tile_id))
    }

    pub fn get(&self, tile_id: u32) -> Option<&TileDefinition> {
        self.tiles.get(&tile_id)
    }

    pub fn contains(&self, tile_id: u32) -> bool {
        self.tiles.contains_key(&tile_id)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn definitions(&self) -> impl Iterator<Item = &TileDefinition> {
        self.tiles.values()
    }

    /// Ids of all tiles tagged with `terrain_type` (unordered; empty when
    /// the tag is unknown)
    pub fn tiles_with_terrain(&self, terrain_type: &str) -> &[u32] {
        self.by_terrain
            .get(terrain_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Pick one tile among those tagged `terrain_type`, spawn weight as
    /// relative probability
    ///
    /// Fails with `UnknownTerrainTag` when no tile carries the tag.
    pub fn sample_variant(
        &self,
        terrain_type: &str,
        rng: &mut impl Rng,
    ) -> Result<u32, CatalogError> {
        let candidates = self.tiles_with_terrain(terrain_type);
        self.sample_among(candidates, rng)
            .ok_or_else(|| CatalogError::UnknownTerrainTag(terrain_type.to_string()))
    }

    /// Weighted pick among explicit candidate ids
    ///
    /// Ids without a catalog entry weigh 1.0 (the tileset default). When
    /// every candidate weighs zero the pick falls back to uniform - a
    /// zero-weight tile that is the only match must still be usable.
    /// Returns `None` only for an empty candidate list.
    pub fn sample_among(&self, candidates: &[u32], rng: &mut impl Rng) -> Option<u32> {
        if candidates.is_empty() {
            return None;
        }
        if candidates.len() == 1 {
            return Some(candidates[0]);
        }

        let weight_of = |id: u32| -> f64 {
            self.get(id)
                .map(|def| f64::from(def.spawn_weight).max(0.0))
                .unwrap_or(1.0)
        };

        let total: f64 = candidates.iter().map(|&id| weight_of(id)).sum();
        if total <= 0.0 {
            return Some(candidates[rng.gen_range(0..candidates.len())]);
        }

        let mut pick = rng.gen::<f64>() * total;
        for &id in candidates {
            let weight = weight_of(id);
            if pick < weight {
                return Some(id);
            }
            pick -= weight;
        }

        // Float accumulation can land exactly on the total; take the tail.
        Some(candidates[candidates.len() - 1])
    }
}
