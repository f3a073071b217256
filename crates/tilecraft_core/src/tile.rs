//! Per-tile metadata

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tilecraft_animation::Animation;

fn default_spawn_weight() -> f32 {
    1.0
}

/// Everything a tileset says about one tile
///
/// Immutable once loaded into a catalog. Tiles without an explicit
/// probability get a spawn weight of 1.0; decorative variants use small
/// weights (a cracked floor at 0.03 shows up occasionally instead of
/// uniformly).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileDefinition {
    /// Local tile id within the tileset (before any firstgid offset)
    pub id: u32,
    /// Terrain classification tag ("water", "plain", "cliff"); untagged
    /// tiles carry `None`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terrain_type: Option<String>,
    /// Relative weight for variant sampling, 0.0..=1.0
    #[serde(default = "default_spawn_weight")]
    pub spawn_weight: f32,
    /// Cyclic frame sequence, if the tile is animated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
    /// Remaining custom properties from the tileset definition
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub custom: HashMap<String, serde_json::Value>,
}

impl TileDefinition {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            terrain_type: None,
            spawn_weight: default_spawn_weight(),
            animation: None,
            custom: HashMap::new(),
        }
    }

    /// Set the terrain tag
    pub fn with_terrain_type(mut self, tag: impl Into<String>) -> Self {
        self.terrain_type = Some(tag.into());
        self
    }

    /// Set the spawn weight
    pub fn with_spawn_weight(mut self, weight: f32) -> Self {
        self.spawn_weight = weight;
        self
    }

    /// Attach an animation sequence
    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.animation = Some(animation);
        self
    }

    /// Set a custom property
    pub fn with_custom(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.custom.insert(key.into(), value);
        self
    }

    pub fn is_animated(&self) -> bool {
        self.animation.is_some()
    }

    /// Get a custom property
    pub fn get_custom(&self, key: &str) -> Option<&serde_json::Value> {
        self.custom.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_weight_defaults_to_one() {
        let def: TileDefinition = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert_eq!(def.spawn_weight, 1.0);
        assert_eq!(def.terrain_type, None);
        assert!(!def.is_animated());
    }

    #[test]
    fn builders_compose() {
        let def = TileDefinition::new(8)
            .with_terrain_type("water")
            .with_spawn_weight(0.03)
            .with_custom("passable", serde_json::Value::Bool(false));

        assert_eq!(def.terrain_type.as_deref(), Some("water"));
        assert_eq!(def.spawn_weight, 0.03);
        assert_eq!(
            def.get_custom("passable"),
            Some(&serde_json::Value::Bool(false))
        );
    }
}
