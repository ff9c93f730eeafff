//! Project manifest (pokedex.yaml) parsing.
//!
//! The manifest points the extractor at a game project and says where the
//! JSON documents go. Every input location has a default matching the
//! standard game-project layout, so an empty manifest is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PokedexError, Result};

/// Number of generation-split species and learnset files.
pub const GENERATIONS: u32 = 9;

/// Project manifest loaded from pokedex.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Game project root. Input paths are relative to it.
    pub root: PathBuf,

    /// Output directory for the JSON documents.
    pub output: PathBuf,

    /// Directory of per-species overlay documents.
    pub custom_data: PathBuf,

    /// Input locations relative to `root`.
    pub paths: SourcePaths,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output: PathBuf::from("data"),
            custom_data: PathBuf::from("custom-data/pokemon"),
            paths: SourcePaths::default(),
        }
    }
}

/// Relative locations of every input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcePaths {
    pub species_constants: PathBuf,
    pub move_constants: PathBuf,
    pub ability_constants: PathBuf,
    pub item_constants: PathBuf,
    pub trainer_constants: PathBuf,

    pub abilities: PathBuf,
    pub items: PathBuf,
    pub moves: PathBuf,

    /// Species tables, one per generation.
    pub species: Vec<PathBuf>,
    /// Level-up learnset tables, one per generation.
    pub level_up_learnsets: Vec<PathBuf>,
    pub teachable_learnsets: PathBuf,
    pub egg_moves: PathBuf,

    pub trainer_parties: PathBuf,
    pub wild_encounters: PathBuf,
    /// Directory holding one subdirectory per map.
    pub maps: PathBuf,
}

impl Default for SourcePaths {
    fn default() -> Self {
        let per_generation = |dir: &str, stem: &str| {
            (1..=GENERATIONS)
                .map(|gen| PathBuf::from(format!("{dir}/gen_{gen}{stem}.h")))
                .collect()
        };

        Self {
            species_constants: "include/constants/species.h".into(),
            move_constants: "include/constants/moves.h".into(),
            ability_constants: "include/constants/abilities.h".into(),
            item_constants: "include/constants/items.h".into(),
            trainer_constants: "include/constants/opponents.h".into(),
            abilities: "src/data/abilities.h".into(),
            items: "src/data/items.h".into(),
            moves: "src/data/moves_info.h".into(),
            species: per_generation("src/data/pokemon/species_info", "_families"),
            level_up_learnsets: per_generation("src/data/pokemon/level_up_learnsets", ""),
            teachable_learnsets: "src/data/pokemon/teachable_learnsets.h".into(),
            egg_moves: "src/data/pokemon/egg_moves.h".into(),
            trainer_parties: "src/data/trainers.party".into(),
            wild_encounters: "src/data/wild_encounters.json".into(),
            maps: "data/maps".into(),
        }
    }
}

impl Manifest {
    /// Load manifest from a pokedex.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PokedexError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| PokedexError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check pokedex.yaml syntax".to_string()),
        })
    }

    /// Serialize to YAML, as written by `pokedex init`.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| PokedexError::Build {
            message: format!("Failed to serialize manifest: {}", e),
            help: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_manifest() {
        let manifest = Manifest::parse("output: site/data").unwrap();

        assert_eq!(manifest.output, PathBuf::from("site/data"));
        assert_eq!(manifest.root, PathBuf::from("."));
        assert_eq!(manifest.paths, SourcePaths::default());
    }

    #[test]
    fn test_parse_path_override() {
        let yaml = r#"
root: ../pokeemerald-expansion
paths:
  moves: src/data/battle_moves.h
  species:
    - src/data/species.h
"#;
        let manifest = Manifest::parse(yaml).unwrap();

        assert_eq!(manifest.root, PathBuf::from("../pokeemerald-expansion"));
        assert_eq!(manifest.paths.moves, PathBuf::from("src/data/battle_moves.h"));
        assert_eq!(manifest.paths.species, vec![PathBuf::from("src/data/species.h")]);
        // Untouched paths keep their defaults.
        assert_eq!(manifest.paths.items, PathBuf::from("src/data/items.h"));
    }

    #[test]
    fn test_default_generation_files() {
        let paths = SourcePaths::default();

        assert_eq!(paths.species.len(), GENERATIONS as usize);
        assert_eq!(
            paths.species[0],
            PathBuf::from("src/data/pokemon/species_info/gen_1_families.h")
        );
        assert_eq!(
            paths.level_up_learnsets[8],
            PathBuf::from("src/data/pokemon/level_up_learnsets/gen_9.h")
        );
    }

    #[test]
    fn test_parse_empty_manifest() {
        let manifest = Manifest::parse("").unwrap();
        assert_eq!(manifest, Manifest::default());
    }

    #[test]
    fn test_malformed_manifest_is_error() {
        let result = Manifest::parse("output: [unclosed");
        assert!(matches!(result, Err(PokedexError::Parse { .. })));
    }

    #[test]
    fn test_yaml_round_trip() {
        let manifest = Manifest::default();
        let yaml = manifest.to_yaml().unwrap();
        assert_eq!(Manifest::parse(&yaml).unwrap(), manifest);
    }
}
