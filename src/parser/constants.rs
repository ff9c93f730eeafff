//! Constant header loading.
//!
//! Reads `#define NAME 123` lines from a header and builds a name → id
//! table for one namespace (`SPECIES_`, `MOVE_`, ...). Later duplicate
//! definitions overwrite earlier ones.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::{PokedexError, Result};

use super::text::title_case_constant;

/// Constant families with several spellings for the same id.
///
/// Any constant containing the family fragment other than the canonical
/// spelling is discarded so that derived display names do not collide.
const CANONICAL_ALIASES: &[(&str, &str)] = &[
    ("DOUBLE_SLAP", "MOVE_DOUBLE_SLAP"),
    ("THUNDER_PUNCH", "MOVE_THUNDER_PUNCH"),
    ("VISE_GRIP", "MOVE_VISE_GRIP"),
];

/// A name → id table for one constant namespace.
#[derive(Debug, Clone, Default)]
pub struct ConstantTable {
    prefix: String,
    ids: HashMap<String, u32>,
}

impl ConstantTable {
    /// Parse every `#define <prefix>NAME <int>` line in `source`.
    pub fn parse(source: &str, prefix: &str) -> Self {
        let pattern = format!(r"#define\s+({}\w+)\s+(\d+)", regex::escape(prefix));
        let define = Regex::new(&pattern).expect("escaped constant prefix is a valid pattern");

        let mut ids = HashMap::new();
        for caps in define.captures_iter(source) {
            let name = &caps[1];
            if is_discarded_alias(name) {
                continue;
            }
            if let Ok(id) = caps[2].parse::<u32>() {
                ids.insert(name.to_string(), id);
            }
        }

        Self {
            prefix: prefix.to_string(),
            ids,
        }
    }

    /// Read and parse a header file. A missing header is fatal.
    pub fn load(path: &Path, prefix: &str) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| PokedexError::read(path, e))?;
        Ok(Self::parse(&source, prefix))
    }

    /// The namespace prefix, e.g. `SPECIES_`.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Resolve a constant to its id.
    pub fn id(&self, name: &str) -> Option<u32> {
        self.ids.get(name).copied()
    }

    /// Resolve a constant to its id, treating the sentinel (id 0) as absent.
    pub fn entity_id(&self, name: &str) -> Option<u32> {
        self.id(name).filter(|&id| id != 0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    /// Whether `name` is the namespace's `NONE` sentinel.
    pub fn is_sentinel(&self, name: &str) -> bool {
        name.strip_prefix(self.prefix.as_str()) == Some("NONE")
    }

    /// Display name for a known constant: prefix stripped, title-cased.
    pub fn display_name(&self, name: &str) -> Option<String> {
        if !self.contains(name) || self.is_sentinel(name) {
            return None;
        }
        let bare = name.strip_prefix(self.prefix.as_str()).unwrap_or(name);
        Some(title_case_constant(bare))
    }

    /// Display names for every constant except the sentinel.
    pub fn display_names(&self) -> HashMap<String, String> {
        self.ids
            .keys()
            .filter_map(|name| self.display_name(name).map(|d| (name.clone(), d)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

fn is_discarded_alias(name: &str) -> bool {
    CANONICAL_ALIASES
        .iter()
        .any(|(family, canonical)| name.contains(family) && name != *canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOVES_HEADER: &str = "\
#define MOVE_NONE 0
#define MOVE_POUND 1
#define MOVE_KARATE_CHOP 2
#define MOVE_DOUBLE_SLAP 3
#define MOVE_DOUBLESLAP_OLD_DOUBLE_SLAP 3
#define MOVE_THUNDER_PUNCH 9
#define MOVE_THUNDER_PUNCH_ALIAS 9
#define MOVE_COUNT MOVES_COUNT
";

    #[test]
    fn test_parse_ids() {
        let table = ConstantTable::parse(MOVES_HEADER, "MOVE_");
        assert_eq!(table.id("MOVE_POUND"), Some(1));
        assert_eq!(table.id("MOVE_KARATE_CHOP"), Some(2));
        assert_eq!(table.id("MOVE_NONE"), Some(0));
    }

    #[test]
    fn test_non_numeric_defines_ignored() {
        let table = ConstantTable::parse(MOVES_HEADER, "MOVE_");
        assert_eq!(table.id("MOVE_COUNT"), None);
    }

    #[test]
    fn test_alias_families_keep_canonical() {
        let table = ConstantTable::parse(MOVES_HEADER, "MOVE_");
        assert_eq!(table.id("MOVE_DOUBLE_SLAP"), Some(3));
        assert_eq!(table.id("MOVE_DOUBLESLAP_OLD_DOUBLE_SLAP"), None);
        assert_eq!(table.id("MOVE_THUNDER_PUNCH_ALIAS"), None);
    }

    #[test]
    fn test_later_definition_wins() {
        let table = ConstantTable::parse(
            "#define ITEM_POTION 13\n#define ITEM_POTION 17\n",
            "ITEM_",
        );
        assert_eq!(table.id("ITEM_POTION"), Some(17));
    }

    #[test]
    fn test_prefix_scopes_namespace() {
        let source = "#define SPECIES_BULBASAUR 1\n#define MOVE_POUND 1\n";
        let table = ConstantTable::parse(source, "SPECIES_");
        assert_eq!(table.len(), 1);
        assert!(!table.contains("MOVE_POUND"));
    }

    #[test]
    fn test_display_names_exclude_sentinel() {
        let table = ConstantTable::parse(MOVES_HEADER, "MOVE_");
        let names = table.display_names();
        assert_eq!(names.get("MOVE_KARATE_CHOP").map(String::as_str), Some("Karate Chop"));
        assert!(!names.contains_key("MOVE_NONE"));
        assert_eq!(table.display_name("MOVE_NONE"), None);
        assert_eq!(table.display_name("MOVE_MISSING"), None);
    }

    #[test]
    fn test_entity_id_skips_sentinel() {
        let table = ConstantTable::parse(MOVES_HEADER, "MOVE_");
        assert_eq!(table.entity_id("MOVE_NONE"), None);
        assert_eq!(table.entity_id("MOVE_POUND"), Some(1));
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let result = ConstantTable::load(Path::new("/nonexistent/species.h"), "SPECIES_");
        assert!(result.is_err());
    }
}
