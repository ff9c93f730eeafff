//! Move table extraction.

use regex::Regex;

use crate::error::Result;
use crate::output::plural;
use crate::parser::fields::display;
use crate::parser::text::humanize;
use crate::parser::{has_flag, key_pattern, scan_blocks, ConstantTable, NumericField, StringField, TokenField};
use crate::types::{AdditionalEffect, Move, MoveFlags};

use super::Sources;

const CATEGORIES: &[(&str, &str)] = &[
    ("DAMAGE_CATEGORY_PHYSICAL", "Physical"),
    ("DAMAGE_CATEGORY_SPECIAL", "Special"),
    ("DAMAGE_CATEGORY_STATUS", "Status"),
];

const TARGETS: &[(&str, &str)] = &[
    ("MOVE_TARGET_SELECTED", "Single Target"),
    ("MOVE_TARGET_DEPENDS", "Varies"),
    ("MOVE_TARGET_USER_OR_SELECTED", "User or Ally"),
    ("MOVE_TARGET_RANDOM", "Random"),
    ("MOVE_TARGET_BOTH", "Both Foes"),
    ("MOVE_TARGET_USER", "User"),
    ("MOVE_TARGET_FOES_AND_ALLY", "All Adjacent"),
    ("MOVE_TARGET_OPPONENTS_FIELD", "Opponent's Field"),
    ("MOVE_TARGET_ALL_BATTLERS", "All Battlers"),
    ("MOVE_TARGET_USER_AND_ALLIES", "User and Allies"),
    ("MOVE_TARGET_ALLY", "Ally"),
    ("MOVE_TARGET_ALLIES", "All Allies"),
];

/// Compiled field readers for move blocks.
struct MoveFields {
    name: StringField,
    description: StringField,
    move_type: TokenField,
    category: TokenField,
    target: TokenField,
    effect: TokenField,
    power: NumericField,
    accuracy: NumericField,
    pp: NumericField,
    priority: NumericField,
    chance: NumericField,
    move_effect: TokenField,
    effect_group: Regex,
}

impl MoveFields {
    fn new() -> Self {
        Self {
            name: StringField::new("name", &["COMPOUND_STRING"]),
            description: StringField::new("description", &["COMPOUND_STRING"]),
            move_type: TokenField::new("type"),
            category: TokenField::new("category"),
            target: TokenField::new("target"),
            effect: TokenField::new("effect"),
            power: NumericField::new("power"),
            accuracy: NumericField::new("accuracy"),
            pp: NumericField::new("pp"),
            priority: NumericField::new("priority"),
            chance: NumericField::new("chance"),
            move_effect: TokenField::new("moveEffect"),
            effect_group: Regex::new(r"\{([^{}]*)\}").expect("literal pattern is valid"),
        }
    }

    fn read(&self, id: u32, body: &str) -> Option<Move> {
        Some(Move {
            id,
            name: self.name.read(body)?,
            description: self.description.read(body).unwrap_or_default(),
            move_type: self
                .move_type
                .read(body)
                .map(|t| humanize(t, "TYPE_"))
                .unwrap_or_else(|| "Normal".to_string()),
            category: self
                .category
                .read(body)
                .map(|t| display(CATEGORIES, t))
                .unwrap_or_else(|| "Physical".to_string()),
            power: self.power.read_u32(body).unwrap_or(0),
            accuracy: self.accuracy.read_u32(body).unwrap_or(0),
            pp: self.pp.read_u32(body).unwrap_or(0),
            priority: self.priority.read_i32(body).unwrap_or(0),
            target: self
                .target
                .read(body)
                .map(|t| display(TARGETS, t))
                .unwrap_or_else(|| "Single Target".to_string()),
            effect: self
                .effect
                .read(body)
                .map(|t| humanize(t, "EFFECT_"))
                .unwrap_or_default(),
            additional_effects: self.additional_effects(body),
            flags: MoveFlags {
                makes_contact: has_flag(body, "makesContact"),
                ignores_protect: has_flag(body, "ignoresProtect"),
                magic_coat_affected: has_flag(body, "magicCoatAffected"),
                snatch_affected: has_flag(body, "snatchAffected"),
                mirror_move_banned: has_flag(body, "mirrorMoveBanned"),
                kings_rock_affected: has_flag(body, "kingsRockAffected"),
                high_crit_ratio: has_flag(body, "highCritRatio"),
                sound_move: has_flag(body, "soundMove"),
                punch_move: has_flag(body, "punchingMove"),
                biting_move: has_flag(body, "bitingMove"),
                slicing_move: has_flag(body, "slicingMove"),
                ball_bomb_move: has_flag(body, "ballBombMove"),
                wind_move: has_flag(body, "windMove"),
                dance_move: has_flag(body, "danceMove"),
            },
        })
    }

    /// Every `{ .moveEffect = ... }` group inside `ADDITIONAL_EFFECTS(...)`.
    fn additional_effects(&self, body: &str) -> Option<Vec<AdditionalEffect>> {
        let args = macro_arguments(body, "ADDITIONAL_EFFECTS")?;
        let effects: Vec<AdditionalEffect> = self
            .effect_group
            .captures_iter(args)
            .filter_map(|caps| {
                let group = caps.get(1)?.as_str();
                Some(AdditionalEffect {
                    move_effect: self.move_effect.read(group)?.to_string(),
                    chance: self.chance.read_u32(group).unwrap_or(100),
                    affects_user: has_flag(group, "self"),
                })
            })
            .collect();

        (!effects.is_empty()).then_some(effects)
    }
}

/// Text between `NAME(` and its matching `)`.
fn macro_arguments<'a>(body: &'a str, name: &str) -> Option<&'a str> {
    let start = body.find(&format!("{name}("))? + name.len() + 1;
    let mut depth = 1usize;
    for (i, c) in body[start..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 1 => return Some(&body[start..start + i]),
            ')' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Parse the move table, sorted by id. Moves without a name are skipped.
pub fn parse_moves(source: &str, ids: &ConstantTable) -> Vec<Move> {
    let pattern = key_pattern(ids.prefix());
    let fields = MoveFields::new();

    let mut moves: Vec<Move> = scan_blocks(source, &pattern)
        .filter_map(|block| fields.read(ids.entity_id(block.key)?, block.body))
        .collect();

    moves.sort_by_key(|m| m.id);
    moves
}

/// Read the move header and table and parse them.
pub fn extract(sources: &Sources) -> Result<Vec<Move>> {
    let paths = sources.project().paths();
    let ids = sources.constants(&paths.move_constants, "MOVE_")?;
    let source = sources.required(&paths.moves)?;

    let moves = parse_moves(&source, &ids);
    sources
        .printer()
        .info("Parsed", &plural(moves.len(), "move", "moves"));
    Ok(moves)
}
