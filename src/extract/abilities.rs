//! Ability table extraction.

use crate::error::Result;
use crate::output::plural;
use crate::parser::{has_flag, key_pattern, scan_blocks, ConstantTable, NumericField, StringField};
use crate::types::{Ability, AbilityFlags};

use super::Sources;

/// Parse the ability table. Blocks without a name or description, and keys
/// missing from the constant header, are skipped.
pub fn parse_abilities(source: &str, ids: &ConstantTable) -> Vec<Ability> {
    let pattern = key_pattern(ids.prefix());
    let name = StringField::new("name", &["_", "COMPOUND_STRING"]);
    let description = StringField::new("description", &["COMPOUND_STRING", "_"]);
    let ai_rating = NumericField::new("aiRating");

    let mut abilities: Vec<Ability> = scan_blocks(source, &pattern)
        .filter_map(|block| {
            let id = ids.entity_id(block.key)?;
            let body = block.body;
            Some(Ability {
                id,
                name: name.read(body)?,
                description: description.read(body)?,
                ai_rating: ai_rating.read_i32(body).unwrap_or(0),
                flags: AbilityFlags {
                    breakable: has_flag(body, "breakable"),
                    cant_be_swapped: has_flag(body, "cantBeSwapped"),
                    cant_be_traced: has_flag(body, "cantBeTraced"),
                    cant_be_suppressed: has_flag(body, "cantBeSuppressed"),
                    cant_be_overwritten: has_flag(body, "cantBeOverwritten"),
                    fails_on_max_guard: has_flag(body, "failsOnMaxGuard"),
                },
            })
        })
        .collect();

    abilities.sort_by_key(|a| a.id);
    abilities
}

/// Read the ability header and table and parse them.
pub fn extract(sources: &Sources) -> Result<Vec<Ability>> {
    let paths = sources.project().paths();
    let ids = sources.constants(&paths.ability_constants, "ABILITY_")?;
    let source = sources.required(&paths.abilities)?;

    let abilities = parse_abilities(&source, &ids);
    sources
        .printer()
        .info("Parsed", &plural(abilities.len(), "ability", "abilities"));
    Ok(abilities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "\
#define ABILITY_NONE 0
#define ABILITY_STENCH 1
#define ABILITY_DRIZZLE 2
#define ABILITY_SPEED_BOOST 3
";

    const TABLE: &str = r#"
const struct Ability gAbilitiesInfo[ABILITIES_COUNT] =
{
    [ABILITY_NONE] =
    {
        .name = _("-------"),
        .description = COMPOUND_STRING("No special ability."),
        .aiRating = 0,
    },

    [ABILITY_SPEED_BOOST] =
    {
        .name = _("Speed Boost"),
        .description = COMPOUND_STRING("Gradually boosts Speed."),
        .aiRating = 9,
    },

    [ABILITY_STENCH] =
    {
        .name = _("Stench"),
        .description = COMPOUND_STRING("May cause a foe to flinch."),
        .aiRating = 1,
        .cantBeSwapped = TRUE,
    },

    [ABILITY_DRIZZLE] =
    {
        .name = _("Drizzle"),
        .aiRating = 9,
    },
};
"#;

    fn parse() -> Vec<Ability> {
        parse_abilities(TABLE, &ConstantTable::parse(HEADER, "ABILITY_"))
    }

    #[test]
    fn test_sorted_by_id_without_sentinel() {
        let ids: Vec<u32> = parse().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_fields() {
        let abilities = parse();
        let stench = &abilities[0];

        assert_eq!(stench.name, "Stench");
        assert_eq!(stench.description, "May cause a foe to flinch.");
        assert_eq!(stench.ai_rating, 1);
        assert!(stench.flags.cant_be_swapped);
        assert!(!stench.flags.breakable);
    }

    #[test]
    fn test_missing_description_skipped() {
        assert!(parse().iter().all(|a| a.name != "Drizzle"));
    }

    #[test]
    fn test_ai_rating_defaults_to_zero() {
        let source = r#"[ABILITY_STENCH] = { .name = _("Stench"), .description = COMPOUND_STRING("x"), },"#;
        let abilities = parse_abilities(source, &ConstantTable::parse(HEADER, "ABILITY_"));
        assert_eq!(abilities[0].ai_rating, 0);
    }

    #[test]
    fn test_emitted_shape() {
        let abilities = parse();
        insta::assert_json_snapshot!(abilities[0], @r###"
        {
          "id": 1,
          "name": "Stench",
          "description": "May cause a foe to flinch.",
          "aiRating": 1,
          "flags": {
            "cantBeSwapped": true
          }
        }
        "###);
    }
}
