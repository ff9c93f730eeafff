//! Checks over emitted documents.
//!
//! Each check takes the loaded records and returns a `ValidationResult`.

use std::collections::{HashMap, HashSet};

use crate::extract::routes::is_route;
use crate::pipeline::{GYM_LEADERS_FILE, POKEMON_FILE, ROUTES_FILE, TRAINERS_FILE};
use crate::types::{RouteData, Species, Trainer};

use super::warning::{Diagnostic, ValidationResult};

/// Error for every record whose sort key is smaller than its predecessor's.
pub fn check_order<T, K: PartialOrd>(
    document: &str,
    records: &[T],
    key: impl Fn(&T) -> K,
    label: impl Fn(&T) -> String,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    for pair in records.windows(2) {
        if key(&pair[1]) < key(&pair[0]) {
            result.push(
                Diagnostic::error(
                    "pokedex::validate::unsorted",
                    document,
                    format!("{} sorts before {}", label(&pair[1]), label(&pair[0])),
                )
                .with_help("Regenerate the document; records are sorted on write"),
            );
        }
    }

    result
}

/// Error for any record carrying the id 0, which is reserved for `NONE`.
pub fn check_zero_ids<T>(document: &str, records: &[T], id: impl Fn(&T) -> u32) -> ValidationResult {
    let mut result = ValidationResult::new();
    let count = records.iter().filter(|r| id(r) == 0).count();
    if count > 0 {
        result.push(Diagnostic::error(
            "pokedex::validate::zero-id",
            document,
            format!("{} record(s) with id 0", count),
        ));
    }
    result
}

/// Warning for each id used by more than one record.
pub fn check_duplicate_ids<T>(document: &str, records: &[T], id: impl Fn(&T) -> u32) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();

    for record in records {
        let id = id(record);
        if !seen.insert(id) && reported.insert(id) {
            result.push(Diagnostic::warning(
                "pokedex::validate::duplicate-id",
                document,
                format!("id {} appears more than once", id),
            ));
        }
    }
    result
}

/// Every species' base-stat total must equal the sum of its six stats.
pub fn check_stat_totals(species: &[Species]) -> ValidationResult {
    let mut result = ValidationResult::new();

    for mon in species {
        let sum = mon.base_stats.component_sum();
        if mon.base_stats.total != sum {
            result.push(Diagnostic::error(
                "pokedex::validate::stat-total",
                POKEMON_FILE,
                format!("{}: total is {} but the stats add up to {}", mon.name, mon.base_stats.total, sum),
            ));
        }
    }

    result
}

/// Second type, ability and egg group must differ from the first.
pub fn check_repeated_entries(species: &[Species]) -> ValidationResult {
    let mut result = ValidationResult::new();

    for mon in species {
        let lists = [
            ("types", &mon.types),
            ("abilities", &mon.abilities),
            ("egg groups", &mon.egg_groups),
        ];
        for (what, list) in lists {
            if list.len() > 1 && list[0] == list[1] {
                result.push(Diagnostic::warning(
                    "pokedex::validate::repeated-entry",
                    POKEMON_FILE,
                    format!("{}: {} repeat '{}'", mon.name, what, list[0]),
                ));
            }
        }
    }

    result
}

/// Trainers need a name and at least one party member.
pub fn check_parties(trainers: &[Trainer]) -> ValidationResult {
    let mut result = ValidationResult::new();

    for trainer in trainers {
        if trainer.party.is_empty() {
            result.push(Diagnostic::error(
                "pokedex::validate::empty-party",
                TRAINERS_FILE,
                format!("{} has no party", trainer.constant_name),
            ));
        }
        if trainer.name.is_empty() {
            result.push(Diagnostic::error(
                "pokedex::validate::unnamed-trainer",
                TRAINERS_FILE,
                format!("{} has no name", trainer.constant_name),
            ));
        }
    }

    result
}

/// Every gym leader record must be present, unchanged, in the trainer list.
pub fn check_gym_leaders(gym_leaders: &[Trainer], trainers: &[Trainer]) -> ValidationResult {
    let mut result = ValidationResult::new();
    let by_id: HashMap<u32, &Trainer> = trainers.iter().map(|t| (t.id, t)).collect();

    for leader in gym_leaders {
        match by_id.get(&leader.id) {
            None => result.push(
                Diagnostic::error(
                    "pokedex::validate::unknown-gym-leader",
                    GYM_LEADERS_FILE,
                    format!("{} (id {}) is not in {}", leader.constant_name, leader.id, TRAINERS_FILE),
                )
                .with_help("Regenerate both documents with `pokedex trainers`"),
            ),
            Some(trainer) if *trainer != leader => result.push(Diagnostic::error(
                "pokedex::validate::stale-gym-leader",
                GYM_LEADERS_FILE,
                format!("{} differs from its {} record", leader.constant_name, TRAINERS_FILE),
            )),
            Some(_) => {}
        }
    }

    result
}

/// Routes must pass the route/cave/forest filter.
pub fn check_route_names(routes: &[RouteData]) -> ValidationResult {
    let mut result = ValidationResult::new();
    for route in routes.iter().filter(|r| !is_route(&r.name)) {
        result.push(Diagnostic::error(
            "pokedex::validate::not-a-route",
            ROUTES_FILE,
            format!("{} is not a route, cave or forest", route.name),
        ));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::routes::route_order;
    use crate::types::{BaseStats, TrainerMon, WildEncounters};
    use pretty_assertions::assert_eq;

    fn trainer(id: u32, constant: &str) -> Trainer {
        Trainer {
            id,
            constant_name: constant.to_string(),
            name: "ROXANNE".to_string(),
            trainer_class: "Leader".to_string(),
            pic: String::new(),
            gender: String::new(),
            music: String::new(),
            items: None,
            double_battle: false,
            ai_flags: vec![],
            party: vec![TrainerMon::new("Geodude")],
            location: None,
        }
    }

    fn route(name: &str) -> RouteData {
        RouteData {
            name: name.to_string(),
            display_name: name.to_string(),
            trainers: vec![],
            items: vec![],
            wild_encounters: WildEncounters::default(),
        }
    }

    #[test]
    fn test_order_reports_inversions() {
        let ids = [1u32, 3, 2, 4];
        let result = check_order("moves.json", &ids, |id| *id, |id| format!("id {}", id));
        assert_eq!(result.error_count(), 1);
        assert!(result.iter().next().unwrap().message.contains("id 2 sorts before id 3"));
    }

    #[test]
    fn test_order_allows_ties() {
        let ids = [1u32, 1, 2];
        assert!(check_order("pokemon.json", &ids, |id| *id, |id| id.to_string()).is_ok());
    }

    #[test]
    fn test_route_order_puts_unnumbered_last() {
        let routes = [route("ROUTE101"), route("ROUTE120"), route("GRANITE_CAVE")];
        assert!(check_order(ROUTES_FILE, &routes, route_order, |r| r.name.clone()).is_ok());

        let routes = [route("GRANITE_CAVE"), route("ROUTE101")];
        assert!(check_order(ROUTES_FILE, &routes, route_order, |r| r.name.clone()).has_errors());
    }

    #[test]
    fn test_zero_and_duplicate_ids() {
        let ids = [0u32, 5, 5, 5];
        assert!(check_zero_ids("items.json", &ids, |id| *id).has_errors());

        let dupes = check_duplicate_ids("items.json", &ids, |id| *id);
        assert_eq!(dupes.warning_count(), 1);
    }

    #[test]
    fn test_stat_totals() {
        let stats = BaseStats::new(45, 49, 49, 45, 65, 65);
        assert_eq!(stats.total, 318);

        let mut broken = stats;
        broken.total = 300;

        let species = |stats| Species {
            id: 1,
            name: "Bulbasaur".into(),
            nat_dex_num: 1,
            types: vec!["Grass".into(), "Grass".into()],
            base_stats: stats,
            abilities: vec![],
            height: 7,
            weight: 69,
            description: String::new(),
            category_name: String::new(),
            catch_rate: 45,
            exp_yield: 64,
            gender_ratio: "Unknown".into(),
            egg_cycles: 20,
            friendship: 70,
            growth_rate: "Medium Slow".into(),
            egg_groups: vec![],
            body_color: "Green".into(),
            level_up_learnset: vec![],
            teachable_learnset: vec![],
            egg_move_learnset: vec![],
            modifications: None,
        };

        assert!(check_stat_totals(&[species(stats)]).is_ok());
        assert!(check_stat_totals(&[species(broken)]).has_errors());
        assert_eq!(check_repeated_entries(&[species(stats)]).warning_count(), 1);
    }

    #[test]
    fn test_parties() {
        let mut empty = trainer(2, "TRAINER_EMPTY");
        empty.party.clear();
        let result = check_parties(&[trainer(1, "TRAINER_ROXANNE_1"), empty]);
        assert_eq!(result.with_code("pokedex::validate::empty-party").count(), 1);
    }

    #[test]
    fn test_gym_leaders_subset() {
        let trainers = vec![trainer(265, "TRAINER_ROXANNE_1")];
        assert!(check_gym_leaders(&trainers, &trainers).is_ok());

        let missing = vec![trainer(266, "TRAINER_BRAWLY_1")];
        let result = check_gym_leaders(&missing, &trainers);
        assert_eq!(result.with_code("pokedex::validate::unknown-gym-leader").count(), 1);

        let mut stale = trainer(265, "TRAINER_ROXANNE_1");
        stale.name = "ROXY".into();
        let result = check_gym_leaders(&[stale], &trainers);
        assert_eq!(result.with_code("pokedex::validate::stale-gym-leader").count(), 1);
    }

    #[test]
    fn test_route_names() {
        let result = check_route_names(&[route("ROUTE101"), route("PETALBURG_CITY")]);
        assert_eq!(result.error_count(), 1);
    }
}
