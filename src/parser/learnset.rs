//! Learnset tables.
//!
//! Three auxiliary tables attach moves to species, each keyed by the
//! species' variable name (`sBulbasaurLevelUpLearnset` → `BULBASAUR`):
//! level-up moves with their level, teachable moves, and egg moves.

use std::collections::HashMap;

use regex::Regex;

use crate::types::LevelUpMove;

use super::constants::ConstantTable;
use super::text::sanitize_key;

/// Moves that never appear in a learnset.
const EXCLUDED_MOVES: &[&str] = &["MOVE_NONE", "MOVE_UNAVAILABLE"];

/// Learnsets keyed by sanitized species variable name.
pub type LearnsetTable<T> = HashMap<String, Vec<T>>;

/// Parser for the three learnset table formats.
pub struct LearnsetParser<'a> {
    moves: &'a ConstantTable,
    level_up_table: Regex,
    level_up_entry: Regex,
    teachable_table: Regex,
    egg_table: Regex,
    move_token: Regex,
}

impl<'a> LearnsetParser<'a> {
    pub fn new(moves: &'a ConstantTable) -> Self {
        Self {
            moves,
            level_up_table: Regex::new(
                r"static const struct LevelUpMove s(\w+)LevelUpLearnset\[\]\s*=\s*\{([^}]+)\}",
            )
            .expect("literal pattern is valid"),
            level_up_entry: Regex::new(r"LEVEL_UP_MOVE\(\s*(\d+)\s*,\s*(MOVE_\w+)\s*\)")
                .expect("literal pattern is valid"),
            teachable_table: Regex::new(
                r"static const u16 s(\w+)TeachableLearnset\[\]\s*=\s*\{([^}]+)\}",
            )
            .expect("literal pattern is valid"),
            egg_table: Regex::new(r"static const u16 s(\w+)EggMoveLearnset\[\]\s*=\s*\{([^}]+)\}")
                .expect("literal pattern is valid"),
            move_token: Regex::new(r"MOVE_\w+").expect("literal pattern is valid"),
        }
    }

    /// Parse level-up learnsets, keeping source order within each species.
    ///
    /// Entries are merged into `table`; a species defined again replaces the
    /// earlier definition.
    pub fn parse_level_up(&self, source: &str, table: &mut LearnsetTable<LevelUpMove>) {
        for caps in self.level_up_table.captures_iter(source) {
            let moves: Vec<LevelUpMove> = self
                .level_up_entry
                .captures_iter(&caps[2])
                .filter_map(|entry| {
                    let level = entry[1].parse().ok()?;
                    let name = self.resolve(&entry[2])?;
                    Some(LevelUpMove { level, name })
                })
                .collect();

            if !moves.is_empty() {
                table.insert(sanitize_key(&caps[1]), moves);
            }
        }
    }

    /// Parse teachable learnsets into `table`.
    pub fn parse_teachable(&self, source: &str, table: &mut LearnsetTable<String>) {
        self.parse_move_lists(&self.teachable_table, source, table);
    }

    /// Parse egg-move learnsets into `table`.
    pub fn parse_egg_moves(&self, source: &str, table: &mut LearnsetTable<String>) {
        self.parse_move_lists(&self.egg_table, source, table);
    }

    fn parse_move_lists(&self, pattern: &Regex, source: &str, table: &mut LearnsetTable<String>) {
        for caps in pattern.captures_iter(source) {
            let moves: Vec<String> = self
                .move_token
                .find_iter(&caps[2])
                .filter_map(|m| self.resolve(m.as_str()))
                .collect();

            if !moves.is_empty() {
                table.insert(sanitize_key(&caps[1]), moves);
            }
        }
    }

    fn resolve(&self, constant: &str) -> Option<String> {
        if EXCLUDED_MOVES.contains(&constant) {
            return None;
        }
        self.moves.display_name(constant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn moves() -> ConstantTable {
        ConstantTable::parse(
            "\
#define MOVE_NONE 0
#define MOVE_TACKLE 33
#define MOVE_GROWL 45
#define MOVE_VINE_WHIP 22
#define MOVE_UNAVAILABLE 65535
",
            "MOVE_",
        )
    }

    #[test]
    fn test_level_up_keeps_source_order() {
        let moves = moves();
        let parser = LearnsetParser::new(&moves);
        let source = "\
static const struct LevelUpMove sBulbasaurLevelUpLearnset[] = {
    LEVEL_UP_MOVE( 1, MOVE_TACKLE),
    LEVEL_UP_MOVE( 1, MOVE_GROWL),
    LEVEL_UP_MOVE( 3, MOVE_VINE_WHIP),
    LEVEL_UP_MOVE( 1, MOVE_NONE),
    LEVEL_UP_END
};
";
        let mut table = LearnsetTable::new();
        parser.parse_level_up(source, &mut table);

        let learnset = &table["BULBASAUR"];
        let got: Vec<(u32, &str)> = learnset.iter().map(|m| (m.level, m.name.as_str())).collect();
        assert_eq!(got, vec![(1, "Tackle"), (1, "Growl"), (3, "Vine Whip")]);
    }

    #[test]
    fn test_teachable_excludes_sentinels() {
        let moves = moves();
        let parser = LearnsetParser::new(&moves);
        let source = "\
static const u16 sBulbasaurTeachableLearnset[] = {
    MOVE_VINE_WHIP,
    MOVE_TACKLE,
    MOVE_UNAVAILABLE,
};
";
        let mut table = LearnsetTable::new();
        parser.parse_teachable(source, &mut table);
        assert_eq!(table["BULBASAUR"], vec!["Vine Whip", "Tackle"]);
    }

    #[test]
    fn test_egg_moves() {
        let moves = moves();
        let parser = LearnsetParser::new(&moves);
        let source = "static const u16 sMrMimeEggMoveLearnset[] = {\n    MOVE_GROWL,\n    MOVE_UNAVAILABLE,\n};\n";
        let mut table = LearnsetTable::new();
        parser.parse_egg_moves(source, &mut table);
        assert_eq!(table["MRMIME"], vec!["Growl"]);
    }

    #[test]
    fn test_empty_learnset_not_recorded() {
        let moves = moves();
        let parser = LearnsetParser::new(&moves);
        let mut table = LearnsetTable::new();
        parser.parse_teachable(
            "static const u16 sDittoTeachableLearnset[] = {\n    MOVE_UNAVAILABLE,\n};\n",
            &mut table,
        );
        assert!(!table.contains_key("DITTO"));
    }

    #[test]
    fn test_later_file_replaces_species() {
        let moves = moves();
        let parser = LearnsetParser::new(&moves);
        let mut table = LearnsetTable::new();
        parser.parse_teachable(
            "static const u16 sPikachuTeachableLearnset[] = { MOVE_TACKLE, };",
            &mut table,
        );
        parser.parse_teachable(
            "static const u16 sPikachuTeachableLearnset[] = { MOVE_GROWL, };",
            &mut table,
        );
        assert_eq!(table["PIKACHU"], vec!["Growl"]);
    }
}
