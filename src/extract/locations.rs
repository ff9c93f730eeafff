//! Map script scanning.
//!
//! Trainer locations come from the map whose `scripts.inc` mentions the
//! trainer constant; route items come from each map's `events.inc`.

use std::collections::HashMap;
use std::fs;
use std::sync::OnceLock;

use regex::Regex;

use crate::discovery::{MapDir, ScanResult};
use crate::parser::text::{collapse_whitespace, title_case_constant};
use crate::types::RouteItem;

use super::Sources;

const HIDDEN_ITEM: &str = "Common_EventScript_HiddenItem";

fn trainer_token() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\bTRAINER_\w+").expect("literal pattern is valid"))
}

fn route_number() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\bRoute(\d+)").expect("literal pattern is valid"))
}

fn item_event() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\bITEM_(\w+).*?(Common_EventScript_FindItem|Common_EventScript_HiddenItem)")
            .expect("literal pattern is valid")
    })
}

/// Humanize a map directory name.
///
/// `PetalburgCity_Gym` → `Petalburg City - Gym`, `Route103` → `Route 103`,
/// `MtChimney` → `Mt. Chimney`.
pub fn format_location(map: &str) -> String {
    let mut spaced = String::with_capacity(map.len() + 8);
    let mut prev: Option<char> = None;
    for c in map.chars() {
        if c == '_' {
            spaced.push(' ');
        } else {
            if c.is_ascii_uppercase() && prev.is_some_and(|p| p.is_ascii_lowercase()) {
                spaced.push(' ');
            }
            spaced.push(c);
        }
        prev = Some(c);
    }

    let collapsed = collapse_whitespace(&spaced);
    route_number()
        .replace_all(&collapsed, "Route $1")
        .replace("Mt ", "Mt. ")
        .replace("City ", "City - ")
        .replace("Town ", "Town - ")
}

/// Every trainer constant mentioned in a script, in source order.
pub fn trainer_constants(script: &str) -> impl Iterator<Item = &str> {
    trainer_token().find_iter(script).map(|m| m.as_str())
}

/// Map trainer constants to locations.
///
/// `scripts` yields `(map directory name, script text)`; when a trainer
/// appears in several maps, the last map wins.
pub fn build_location_map<'a>(
    scripts: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> HashMap<String, String> {
    let mut locations = HashMap::new();
    for (map, script) in scripts {
        let location = format_location(map);
        for constant in trainer_constants(script) {
            locations.insert(constant.to_string(), location.clone());
        }
    }
    locations
}

/// Item pickups in an event script, one per line that names both an
/// `ITEM_` constant and a pickup script.
pub fn parse_map_items(events: &str) -> Vec<RouteItem> {
    events
        .lines()
        .filter_map(|line| {
            let caps = item_event().captures(line)?;
            Some(RouteItem {
                item: title_case_constant(&caps[1]),
                hidden: &caps[2] == HIDDEN_ITEM,
            })
        })
        .collect()
}

/// Scan every map's scripts for trainer locations.
///
/// A map without a script file is reported and skipped.
pub fn load_trainer_locations(sources: &Sources, maps: &ScanResult) -> HashMap<String, String> {
    let scripts: Vec<(&str, String)> = maps
        .maps
        .iter()
        .filter_map(|map| {
            let script = sources.read_optional(&map.scripts())?;
            Some((map.name.as_str(), script))
        })
        .collect();

    build_location_map(scripts.iter().map(|(name, script)| (*name, script.as_str())))
}

/// Read a map's event script, if it has one. Most maps don't.
pub fn load_map_items(map: &MapDir) -> Vec<RouteItem> {
    fs::read_to_string(map.events())
        .map(|events| parse_map_items(&events))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_location() {
        assert_eq!(format_location("Route103"), "Route 103");
        assert_eq!(format_location("PetalburgCity_Gym"), "Petalburg City - Gym");
        assert_eq!(format_location("MtChimney"), "Mt. Chimney");
        assert_eq!(format_location("LittlerootTown_BrendansHouse_1F"), "Littleroot Town - Brendans House 1F");
        assert_eq!(format_location("Route110_TrickHouseEntrance"), "Route 110 Trick House Entrance");
        assert_eq!(format_location("PetalburgCity"), "Petalburg City");
    }

    #[test]
    fn test_location_map_last_map_wins() {
        let locations = build_location_map([
            ("Route102", "trainerbattle_single TRAINER_CALVIN_1, Route102_Text_CalvinIntro"),
            ("Route103", "trainerbattle_single TRAINER_DAISY, x\nTRAINER_CALVIN_1"),
        ]);

        assert_eq!(locations["TRAINER_CALVIN_1"], "Route 103");
        assert_eq!(locations["TRAINER_DAISY"], "Route 103");
    }

    #[test]
    fn test_trainer_constants_in_order() {
        let script = "trainerbattle_double TRAINER_TATE_AND_LIZA_1, a\n\tcall TRAINER_BRAWLY_1\n";
        let found: Vec<_> = trainer_constants(script).collect();
        assert_eq!(found, vec!["TRAINER_TATE_AND_LIZA_1", "TRAINER_BRAWLY_1"]);
    }

    #[test]
    fn test_parse_map_items() {
        let events = "\
\tobject_event 1, OBJ_EVENT_GFX_ITEM_BALL, 0, ITEM_POTION, Common_EventScript_FindItem
\tbg_event ITEM_HEART_SCALE, Common_EventScript_HiddenItem
\tobject_event 2, OBJ_EVENT_GFX_BOY_1, 0, Route103_EventScript_Boy
";
        assert_eq!(
            parse_map_items(events),
            vec![
                RouteItem { item: "Potion".into(), hidden: false },
                RouteItem { item: "Heart Scale".into(), hidden: true },
            ]
        );
    }

    #[test]
    fn test_item_without_pickup_script_ignored() {
        assert!(parse_map_items("setvar VAR_TEMP_1, ITEM_POTION\n").is_empty());
    }
}
