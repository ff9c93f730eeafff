//! Species table extraction.
//!
//! Species are spread across one table per generation. Each record pulls
//! its three learnsets from the learnset tables by sanitized species name,
//! and finally picks up an optional overlay from the custom data directory.

use std::collections::HashMap;

use regex::Regex;

use crate::error::Result;
use crate::output::plural;
use crate::parser::fields::display;
use crate::parser::text::{humanize, sanitize_key, title_case_constant};
use crate::parser::{
    key_pattern, scan_blocks, ConstantTable, LearnsetParser, LearnsetTable, NumericField,
    StringField, TokenField,
};
use crate::types::{BaseStats, LevelUpMove, Species};

use super::{overlay, Sources};

const GROWTH_RATES: &[(&str, &str)] = &[
    ("GROWTH_MEDIUM_FAST", "Medium Fast"),
    ("GROWTH_ERRATIC", "Erratic"),
    ("GROWTH_FLUCTUATING", "Fluctuating"),
    ("GROWTH_MEDIUM_SLOW", "Medium Slow"),
    ("GROWTH_FAST", "Fast"),
    ("GROWTH_SLOW", "Slow"),
];

const BODY_COLORS: &[(&str, &str)] = &[
    ("BODY_COLOR_RED", "Red"),
    ("BODY_COLOR_BLUE", "Blue"),
    ("BODY_COLOR_YELLOW", "Yellow"),
    ("BODY_COLOR_GREEN", "Green"),
    ("BODY_COLOR_BLACK", "Black"),
    ("BODY_COLOR_BROWN", "Brown"),
    ("BODY_COLOR_PURPLE", "Purple"),
    ("BODY_COLOR_GRAY", "Gray"),
    ("BODY_COLOR_WHITE", "White"),
    ("BODY_COLOR_PINK", "Pink"),
];

const GENDER_TOKENS: &[(&str, &str)] = &[
    ("MON_MALE", "Male Only"),
    ("MON_FEMALE", "Female Only"),
    ("MON_GENDERLESS", "Genderless"),
];

const STANDARD_FRIENDSHIP: u32 = 70;

const UNKNOWN: &str = "Unknown";

/// The three learnset tables, keyed by sanitized species name.
#[derive(Debug, Default)]
pub struct Learnsets {
    pub level_up: LearnsetTable<LevelUpMove>,
    pub teachable: LearnsetTable<String>,
    pub egg_moves: LearnsetTable<String>,
}

impl Learnsets {
    /// Parse every available learnset source. Level-up files are applied in
    /// order, so a species defined in a later file replaces the earlier one.
    pub fn parse<'s>(
        moves: &ConstantTable,
        level_up: impl IntoIterator<Item = &'s str>,
        teachable: Option<&str>,
        egg_moves: Option<&str>,
    ) -> Self {
        let parser = LearnsetParser::new(moves);
        let mut learnsets = Self::default();

        for source in level_up {
            parser.parse_level_up(source, &mut learnsets.level_up);
        }
        if let Some(source) = teachable {
            parser.parse_teachable(source, &mut learnsets.teachable);
        }
        if let Some(source) = egg_moves {
            parser.parse_egg_moves(source, &mut learnsets.egg_moves);
        }
        learnsets
    }
}

/// Species block parser with its lookup tables and compiled field readers.
pub struct SpeciesParser<'a> {
    ids: &'a ConstantTable,
    ability_names: HashMap<String, String>,
    learnsets: &'a Learnsets,
    key: Regex,
    name: StringField,
    category_name: StringField,
    description: StringField,
    nat_dex: Regex,
    types: Regex,
    abilities: Regex,
    egg_groups: Regex,
    gender_ratio: Regex,
    ability_token: Regex,
    stats: [NumericField; 6],
    height: NumericField,
    weight: NumericField,
    catch_rate: NumericField,
    exp_yield: NumericField,
    egg_cycles: NumericField,
    friendship: TokenField,
    growth_rate: TokenField,
    body_color: TokenField,
}

impl<'a> SpeciesParser<'a> {
    pub fn new(ids: &'a ConstantTable, abilities: &ConstantTable, learnsets: &'a Learnsets) -> Self {
        Self {
            ids,
            ability_names: abilities.display_names(),
            learnsets,
            key: key_pattern(ids.prefix()),
            name: StringField::new("speciesName", &["_"]),
            category_name: StringField::new("categoryName", &["_"]),
            description: StringField::new("description", &["COMPOUND_STRING"]),
            nat_dex: Regex::new(r"\.natDexNum\s*=\s*NATIONAL_DEX_(\w+)")
                .expect("literal pattern is valid"),
            types: Regex::new(r"\.types\s*=\s*MON_TYPES\(\s*(TYPE_\w+)(?:\s*,\s*(TYPE_\w+))?\s*\)")
                .expect("literal pattern is valid"),
            abilities: Regex::new(r"\.abilities\s*=\s*\{([^}]*)\}")
                .expect("literal pattern is valid"),
            egg_groups: Regex::new(
                r"\.eggGroups\s*=\s*MON_EGG_GROUPS\(\s*(EGG_GROUP_\w+)(?:\s*,\s*(EGG_GROUP_\w+))?\s*\)",
            )
            .expect("literal pattern is valid"),
            gender_ratio: Regex::new(
                r"\.genderRatio\s*=\s*(?:PERCENT_FEMALE\(\s*([\d.]+)\s*\)|(\w+))",
            )
            .expect("literal pattern is valid"),
            ability_token: Regex::new(r"ABILITY_\w+").expect("literal pattern is valid"),
            stats: [
                NumericField::new("baseHP"),
                NumericField::new("baseAttack"),
                NumericField::new("baseDefense"),
                NumericField::new("baseSpeed"),
                NumericField::new("baseSpAttack"),
                NumericField::new("baseSpDefense"),
            ],
            height: NumericField::new("height"),
            weight: NumericField::new("weight"),
            catch_rate: NumericField::new("catchRate"),
            exp_yield: NumericField::new("expYield"),
            egg_cycles: NumericField::new("eggCycles"),
            friendship: TokenField::new("friendship"),
            growth_rate: TokenField::new("growthRate"),
            body_color: TokenField::new("bodyColor"),
        }
    }

    /// Parse one species table, in source order.
    pub fn parse(&self, source: &str) -> Vec<Species> {
        scan_blocks(source, &self.key)
            .filter_map(|block| self.read(self.ids.entity_id(block.key)?, block.body))
            .collect()
    }

    fn read(&self, id: u32, body: &str) -> Option<Species> {
        let name = self.name.read(body)?;

        let [hp, attack, defense, speed, sp_attack, sp_defense] =
            self.stats.each_ref().map(|f| f.read_u32(body).unwrap_or(0));

        let key = sanitize_key(&name);
        let level_up_learnset = self.learnsets.level_up.get(&key).cloned().unwrap_or_default();
        let teachable_learnset = self.learnsets.teachable.get(&key).cloned().unwrap_or_default();
        let egg_move_learnset = self.learnsets.egg_moves.get(&key).cloned().unwrap_or_default();

        Some(Species {
            id,
            nat_dex_num: self.nat_dex_num(body).unwrap_or(id),
            types: self.pair(&self.types, body, "TYPE_"),
            base_stats: BaseStats::new(hp, attack, defense, speed, sp_attack, sp_defense),
            abilities: self.abilities(body),
            height: self.height.read_u32(body).unwrap_or(0),
            weight: self.weight.read_u32(body).unwrap_or(0),
            description: self.description.read(body).unwrap_or_default(),
            category_name: self.category_name.read(body).unwrap_or_default(),
            catch_rate: self.catch_rate.read_u32(body).unwrap_or(0),
            exp_yield: self.exp_yield.read_u32(body).unwrap_or(0),
            gender_ratio: self.gender_ratio(body),
            egg_cycles: self.egg_cycles.read_u32(body).unwrap_or(0),
            friendship: self.friendship(body),
            growth_rate: self
                .growth_rate
                .read(body)
                .map(|t| display(GROWTH_RATES, t))
                .unwrap_or_else(|| UNKNOWN.to_string()),
            egg_groups: self.pair(&self.egg_groups, body, "EGG_GROUP_"),
            body_color: self
                .body_color
                .read(body)
                .map(|t| display(BODY_COLORS, t))
                .unwrap_or_else(|| UNKNOWN.to_string()),
            level_up_learnset,
            teachable_learnset,
            egg_move_learnset,
            name,
            modifications: None,
        })
    }

    /// The dex slot of the species named by `NATIONAL_DEX_X`.
    fn nat_dex_num(&self, body: &str) -> Option<u32> {
        let caps = self.nat_dex.captures(body)?;
        self.ids.entity_id(&format!("SPECIES_{}", &caps[1]))
    }

    /// One or two humanized tokens from a two-argument macro; the second is
    /// dropped when it repeats the first.
    fn pair(&self, pattern: &Regex, body: &str, prefix: &str) -> Vec<String> {
        let Some(caps) = pattern.captures(body) else {
            return Vec::new();
        };
        let first = &caps[1];
        let mut out = vec![title_case_constant(first.strip_prefix(prefix).unwrap_or(first))];
        if let Some(second) = caps.get(2).map(|m| m.as_str()) {
            if second != first {
                out.push(title_case_constant(second.strip_prefix(prefix).unwrap_or(second)));
            }
        }
        out
    }

    fn abilities(&self, body: &str) -> Vec<String> {
        let Some(caps) = self.abilities.captures(body) else {
            return Vec::new();
        };
        let tokens: Vec<&str> = self
            .ability_token
            .find_iter(&caps[1])
            .map(|m| m.as_str())
            .take(3)
            .collect();

        tokens
            .iter()
            .enumerate()
            .filter(|&(i, token)| *token != "ABILITY_NONE" && !(i == 1 && *token == tokens[0]))
            .map(|(_, token)| {
                self.ability_names
                    .get(*token)
                    .cloned()
                    .unwrap_or_else(|| token.to_string())
            })
            .collect()
    }

    fn gender_ratio(&self, body: &str) -> String {
        let Some(caps) = self.gender_ratio.captures(body) else {
            return UNKNOWN.to_string();
        };
        match (caps.get(1), caps.get(2)) {
            (Some(percent), _) => format!("{}% Female", percent.as_str()),
            (None, Some(token)) => display(GENDER_TOKENS, token.as_str()),
            (None, None) => UNKNOWN.to_string(),
        }
    }

    fn friendship(&self, body: &str) -> u32 {
        match self.friendship.read(body) {
            Some(token) => token.parse().unwrap_or(STANDARD_FRIENDSHIP),
            None => STANDARD_FRIENDSHIP,
        }
    }
}

/// Order species by dex number, keeping source order among equals.
pub fn sort_species(species: &mut [Species]) {
    species.sort_by_key(|s| s.nat_dex_num);
}

/// Read every species input, parse, sort and merge overlays.
pub fn extract(sources: &Sources) -> Result<Vec<Species>> {
    let paths = sources.project().paths();
    let printer = sources.printer();

    let ids = sources.constants(&paths.species_constants, "SPECIES_")?;
    let abilities = sources.constants(&paths.ability_constants, "ABILITY_")?;
    let moves = sources.constants(&paths.move_constants, "MOVE_")?;

    let level_up: Vec<String> = paths
        .level_up_learnsets
        .iter()
        .filter_map(|path| sources.optional(path))
        .collect();
    let teachable = sources.optional(&paths.teachable_learnsets);
    let egg_moves = sources.optional(&paths.egg_moves);

    let learnsets = Learnsets::parse(
        &moves,
        level_up.iter().map(String::as_str),
        teachable.as_deref(),
        egg_moves.as_deref(),
    );

    let parser = SpeciesParser::new(&ids, &abilities, &learnsets);
    let mut species: Vec<Species> = paths
        .species
        .iter()
        .filter_map(|path| sources.optional(path))
        .flat_map(|source| parser.parse(&source))
        .collect();
    sort_species(&mut species);

    printer.info("Parsed", &plural(species.len(), "species", "species"));

    let merged = overlay::merge_overlays(&mut species, sources.project().custom_data_dir(), printer);
    if merged > 0 {
        printer.info("Merged", &plural(merged, "overlay", "overlays"));
    }

    Ok(species)
}
