//! Corner-signature derivation and grid resolution

use crate::terrain::{CornerColors, WangSet, WangSetError};
use log::debug;
use rand::Rng;
use std::collections::HashMap;
use thiserror::Error;
use tilecraft_core::TileCatalog;

/// Error type for terrain resolution failures
///
/// All variants are recoverable at the call site; a consumer typically
/// substitutes a placeholder tile and logs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("terrain tag \"{0}\" is not in the wang set palette")]
    UnknownTerrainTag(String),
    #[error("terrain index {index} is outside the {palette_len}-color palette")]
    TerrainOutOfRange { index: usize, palette_len: usize },
    #[error("no tile matches corner signature {signature:?} at cell ({x}, {y})")]
    NoMatchingTile {
        signature: CornerColors,
        x: u32,
        y: u32,
    },
    #[error("terrain grid of {width}x{height} cells needs {expected} entries, got {actual}")]
    GridSizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    CellOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    #[error(transparent)]
    InvalidWangSet(#[from] WangSetError),
}

/// Offsets of the 2x2 cell block sharing each corner, in `CornerColors`
/// slot order (NW, NE, SE, SW). Row 0 is north; +y goes south, as in the
/// map formats this data comes from.
const CORNER_BLOCKS: [[(i32, i32); 4]; 4] = [
    [(-1, -1), (0, -1), (-1, 0), (0, 0)], // NW
    [(0, -1), (1, -1), (0, 0), (1, 0)],   // NE
    [(0, 0), (1, 0), (0, 1), (1, 1)],     // SE
    [(-1, 0), (0, 0), (-1, 1), (0, 1)],   // SW
];

/// The corner signature wanted at `(x, y)` of a terrain-index grid
///
/// Each corner takes the terrain dominating the 2x2 block of cells sharing
/// it, where domination is palette precedence (highest palette index
/// present wins). Out-of-grid block members inherit the cell's own terrain,
/// so border cells never need special border tiles.
pub fn corner_signature(cells: &[usize], width: u32, height: u32, x: u32, y: u32) -> CornerColors {
    let own = cells[y as usize * width as usize + x as usize];
    let cell_at = |cx: i64, cy: i64| -> usize {
        if cx < 0 || cy < 0 || cx >= i64::from(width) || cy >= i64::from(height) {
            own
        } else {
            cells[(cy * i64::from(width) + cx) as usize]
        }
    };

    let mut colors = [0usize; 4];
    for (slot, block) in CORNER_BLOCKS.iter().enumerate() {
        colors[slot] = block
            .iter()
            .map(|&(dx, dy)| cell_at(i64::from(x) + i64::from(dx), i64::from(y) + i64::from(dy)))
            .fold(own, usize::max);
    }
    CornerColors(colors)
}

/// Resolves a terrain grid to concrete tile ids by exact corner matching
///
/// Construction validates the wang set and indexes its assignments by
/// corner signature, so lookup per cell is a single hash probe. The
/// resolver borrows its inputs and is itself read-only; share it freely.
pub struct CornerResolver<'a> {
    wang_set: &'a WangSet,
    catalog: &'a TileCatalog,
    /// signature -> matching tile ids, sorted for deterministic tie-break
    by_signature: HashMap<CornerColors, Vec<u32>>,
}

impl<'a> CornerResolver<'a> {
    pub fn new(wang_set: &'a WangSet, catalog: &'a TileCatalog) -> Result<Self, ResolveError> {
        wang_set.validate()?;

        let mut by_signature: HashMap<CornerColors, Vec<u32>> = HashMap::new();
        for (&tile_id, &corners) in &wang_set.tile_corners {
            by_signature.entry(corners).or_default().push(tile_id);
        }
        for variants in by_signature.values_mut() {
            variants.sort_unstable();
        }
        debug!(
            "indexed {} wang tiles across {} corner signatures",
            wang_set.tile_corners.len(),
            by_signature.len()
        );

        Ok(Self {
            wang_set,
            catalog,
            by_signature,
        })
    }

    /// Tiles assigned exactly `signature`, sorted by id
    pub fn variants(&self, signature: CornerColors) -> &[u32] {
        self.by_signature
            .get(&signature)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Resolve a single cell of a terrain-index grid
    ///
    /// Useful for incremental updates: after editing one cell, re-resolve
    /// it and its eight neighbors instead of the whole grid.
    pub fn resolve_cell(
        &self,
        cells: &[usize],
        width: u32,
        height: u32,
        x: u32,
        y: u32,
        rng: &mut impl Rng,
    ) -> Result<u32, ResolveError> {
        let expected = width as usize * height as usize;
        if cells.len() != expected {
            return Err(ResolveError::GridSizeMismatch {
                width,
                height,
                expected,
                actual: cells.len(),
            });
        }
        if x >= width || y >= height {
            return Err(ResolveError::CellOutOfBounds {
                x,
                y,
                width,
                height,
            });
        }
        self.resolve_cell_unchecked(cells, width, height, x, y, rng)
    }

    /// Resolve every cell of a terrain-index grid (row-major)
    pub fn resolve_grid(
        &self,
        cells: &[usize],
        width: u32,
        height: u32,
        rng: &mut impl Rng,
    ) -> Result<Vec<u32>, ResolveError> {
        let expected = width as usize * height as usize;
        if cells.len() != expected {
            return Err(ResolveError::GridSizeMismatch {
                width,
                height,
                expected,
                actual: cells.len(),
            });
        }

        let mut tiles = Vec::with_capacity(expected);
        for y in 0..height {
            for x in 0..width {
                tiles.push(self.resolve_cell_unchecked(cells, width, height, x, y, rng)?);
            }
        }
        Ok(tiles)
    }

    /// Resolve a grid of terrain tags, mapping each through the palette
    pub fn resolve_tag_grid<S: AsRef<str>>(
        &self,
        tags: &[S],
        width: u32,
        height: u32,
        rng: &mut impl Rng,
    ) -> Result<Vec<u32>, ResolveError> {
        let cells = tags
            .iter()
            .map(|tag| {
                let tag = tag.as_ref();
                self.wang_set
                    .terrain_index(tag)
                    .ok_or_else(|| ResolveError::UnknownTerrainTag(tag.to_string()))
            })
            .collect::<Result<Vec<usize>, ResolveError>>()?;
        self.resolve_grid(&cells, width, height, rng)
    }

    fn resolve_cell_unchecked(
        &self,
        cells: &[usize],
        width: u32,
        height: u32,
        x: u32,
        y: u32,
        rng: &mut impl Rng,
    ) -> Result<u32, ResolveError> {
        let signature = corner_signature(cells, width, height, x, y);

        // An out-of-palette cell value always surfaces here: it outranks
        // every valid color, so domination carries it into the signature.
        let palette_len = self.wang_set.terrains.len();
        for &color in &signature.0 {
            if color >= palette_len {
                return Err(ResolveError::TerrainOutOfRange { index: color, palette_len });
            }
        }

        let Some(variants) = self.by_signature.get(&signature) else {
            return Err(ResolveError::NoMatchingTile { signature, x, y });
        };
        match self.catalog.sample_among(variants, rng) {
            Some(tile_id) => Ok(tile_id),
            None => Err(ResolveError::NoMatchingTile { signature, x, y }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use tilecraft_core::TileDefinition;
    use uuid::Uuid;

    fn seeded_rng() -> SmallRng {
        SmallRng::seed_from_u64(0)
    }

    /// Full 16-tile corner set over plain/water; tile id encodes its water
    /// corners as a bitmask (nw=8, ne=4, se=2, sw=1).
    fn overworld_set() -> WangSet {
        let mut set = WangSet::new("Overworld", Uuid::new_v4());
        let plain = set.add_terrain("plain");
        let water = set.add_terrain("water");
        for id in 0u32..16 {
            let color = |bit: u32| if (id >> bit) & 1 == 1 { water } else { plain };
            set.set_tile_corners(id, CornerColors::new(color(3), color(2), color(1), color(0)));
        }
        set
    }

    #[test]
    fn uniform_grid_resolves_to_interior_tiles() {
        let set = overworld_set();
        let catalog = TileCatalog::new();
        let resolver = CornerResolver::new(&set, &catalog).unwrap();
        let mut rng = seeded_rng();

        let plain_grid = vec![0usize; 16];
        assert_eq!(
            resolver.resolve_grid(&plain_grid, 4, 4, &mut rng).unwrap(),
            vec![0u32; 16]
        );

        let water_grid = vec![1usize; 16];
        assert_eq!(
            resolver.resolve_grid(&water_grid, 4, 4, &mut rng).unwrap(),
            vec![15u32; 16]
        );
    }

    #[test]
    fn single_cell_grid_inherits_its_own_terrain_past_the_border() {
        let set = overworld_set();
        let catalog = TileCatalog::new();
        let resolver = CornerResolver::new(&set, &catalog).unwrap();
        let mut rng = seeded_rng();

        assert_eq!(resolver.resolve_grid(&[1], 1, 1, &mut rng).unwrap(), vec![15]);
    }

    #[test]
    fn lone_water_cell_yields_island_transitions() {
        let set = overworld_set();
        let catalog = TileCatalog::new();
        let resolver = CornerResolver::new(&set, &catalog).unwrap();
        let mut rng = seeded_rng();

        // plain everywhere, water in the middle
        let mut cells = vec![0usize; 9];
        cells[4] = 1;

        // Water owns every corner it touches, so the center becomes the
        // full water tile and each neighbor picks up the matching
        // water-corner transition (diagonals get exactly one wet corner).
        let tiles = resolver.resolve_tag_grid(
            &[
                "plain", "plain", "plain", //
                "plain", "water", "plain", //
                "plain", "plain", "plain",
            ],
            3,
            3,
            &mut rng,
        )
        .unwrap();
        assert_eq!(tiles, vec![2, 3, 1, 6, 15, 9, 4, 12, 8]);

        // Index grid entry point agrees with the tag entry point.
        assert_eq!(resolver.resolve_grid(&cells, 3, 3, &mut rng).unwrap(), tiles);
    }

    #[test]
    fn missing_transition_tile_reports_the_signature() {
        let mut set = WangSet::new("Fills only", Uuid::new_v4());
        let plain = set.add_terrain("plain");
        let water = set.add_terrain("water");
        set.set_tile_corners(0, CornerColors::uniform(plain));
        set.set_tile_corners(15, CornerColors::uniform(water));

        let catalog = TileCatalog::new();
        let resolver = CornerResolver::new(&set, &catalog).unwrap();
        let mut rng = seeded_rng();

        let err = resolver.resolve_grid(&[0, 1], 2, 1, &mut rng).unwrap_err();
        assert_eq!(
            err,
            ResolveError::NoMatchingTile {
                signature: CornerColors::new(0, 1, 1, 0),
                x: 0,
                y: 0,
            }
        );
    }

    #[test]
    fn unknown_tag_is_rejected_before_resolution() {
        let set = overworld_set();
        let catalog = TileCatalog::new();
        let resolver = CornerResolver::new(&set, &catalog).unwrap();
        let mut rng = seeded_rng();

        let err = resolver
            .resolve_tag_grid(&["plain", "lava"], 2, 1, &mut rng)
            .unwrap_err();
        assert_eq!(err, ResolveError::UnknownTerrainTag("lava".to_string()));
    }

    #[test]
    fn tie_break_uses_catalog_spawn_weights() {
        let mut set = overworld_set();
        // A second all-plain variant that should never win at weight zero.
        set.set_tile_corners(100, CornerColors::uniform(0));

        let catalog = TileCatalog::from_definitions(vec![
            TileDefinition::new(100)
                .with_terrain_type("plain")
                .with_spawn_weight(0.0),
        ]);
        let resolver = CornerResolver::new(&set, &catalog).unwrap();
        let mut rng = seeded_rng();

        for _ in 0..50 {
            assert_eq!(resolver.resolve_grid(&[0], 1, 1, &mut rng).unwrap(), vec![0]);
        }
    }

    #[test]
    fn tie_break_reaches_every_equal_weight_variant() {
        let mut set = overworld_set();
        set.set_tile_corners(100, CornerColors::uniform(0));

        let catalog = TileCatalog::new();
        let resolver = CornerResolver::new(&set, &catalog).unwrap();
        let mut rng = seeded_rng();

        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(resolver.resolve_cell(&[0], 1, 1, 0, 0, &mut rng).unwrap());
        }
        assert_eq!(seen, [0u32, 100].into_iter().collect());
    }

    #[test]
    fn grid_size_mismatch_is_rejected() {
        let set = overworld_set();
        let catalog = TileCatalog::new();
        let resolver = CornerResolver::new(&set, &catalog).unwrap();
        let mut rng = seeded_rng();

        let err = resolver.resolve_grid(&[0, 0, 0], 2, 2, &mut rng).unwrap_err();
        assert_eq!(
            err,
            ResolveError::GridSizeMismatch {
                width: 2,
                height: 2,
                expected: 4,
                actual: 3,
            }
        );
    }

    #[test]
    fn out_of_palette_terrain_index_is_reported() {
        let set = overworld_set();
        let catalog = TileCatalog::new();
        let resolver = CornerResolver::new(&set, &catalog).unwrap();
        let mut rng = seeded_rng();

        let err = resolver.resolve_grid(&[5], 1, 1, &mut rng).unwrap_err();
        assert_eq!(
            err,
            ResolveError::TerrainOutOfRange {
                index: 5,
                palette_len: 2,
            }
        );
    }

    #[test]
    fn resolve_cell_checks_bounds() {
        let set = overworld_set();
        let catalog = TileCatalog::new();
        let resolver = CornerResolver::new(&set, &catalog).unwrap();
        let mut rng = seeded_rng();

        let err = resolver.resolve_cell(&[0], 1, 1, 1, 0, &mut rng).unwrap_err();
        assert_eq!(
            err,
            ResolveError::CellOutOfBounds {
                x: 1,
                y: 0,
                width: 1,
                height: 1,
            }
        );
    }
}
