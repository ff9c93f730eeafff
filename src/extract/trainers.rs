//! Trainer extraction and the gym-leader roster.

use std::collections::HashMap;

use crate::error::Result;
use crate::output::plural;
use crate::parser::{ConstantTable, PartyParser, SpeciesLookup};
use crate::types::{Species, Trainer};

use super::{locations, Sources};

/// Constant-name fragments of the eight gym leaders.
pub const GYM_LEADERS: &[&str] = &[
    "ROXANNE",
    "BRAWLY",
    "WATTSON",
    "FLANNERY",
    "NORMAN",
    "WINONA",
    "TATE_AND_LIZA",
    "JUAN",
];

/// Constant-name fragments of the Elite Four and the Champion.
pub const ELITE_FOUR: &[&str] = &["SIDNEY", "PHOEBE", "GLACIA", "DRAKE", "WALLACE"];

/// Trainers plus the gym-leader subset, both sorted by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainerOutput {
    pub trainers: Vec<Trainer>,
    pub gym_leaders: Vec<Trainer>,
}

/// Whether a trainer constant belongs to a gym leader, Elite Four member or
/// the Champion. Rematch variants match too.
pub fn is_gym_leader(constant_name: &str) -> bool {
    GYM_LEADERS
        .iter()
        .chain(ELITE_FOUR)
        .any(|fragment| constant_name.contains(fragment))
}

/// Parse a party file, attach locations and split out the gym leaders.
pub fn parse_trainers(
    source: &str,
    ids: &ConstantTable,
    species: &SpeciesLookup,
    locations: &HashMap<String, String>,
) -> TrainerOutput {
    let mut trainers = PartyParser::new(ids, species).parse(source);
    for trainer in &mut trainers {
        trainer.location = locations.get(&trainer.constant_name).cloned();
    }
    trainers.sort_by_key(|t| t.id);

    let gym_leaders = trainers
        .iter()
        .filter(|t| is_gym_leader(&t.constant_name))
        .cloned()
        .collect();

    TrainerOutput {
        trainers,
        gym_leaders,
    }
}

/// Read the party file and its lookups. `species` are the emitted species
/// records used for ability-slot resolution; an empty slice is allowed.
pub fn extract(sources: &Sources, species: &[Species]) -> Result<TrainerOutput> {
    let project = sources.project();
    let paths = project.paths();
    let printer = sources.printer();

    let ids = sources.constants(&paths.trainer_constants, "TRAINER_")?;
    let species_ids = sources.constants(&paths.species_constants, "SPECIES_")?;
    let lookup = SpeciesLookup::new()
        .with_constants(&species_ids)
        .with_species(species);

    let maps = project.scan_maps();
    printer.status("Scanning", &plural(maps.total(), "map", "maps"));
    let locations = locations::load_trainer_locations(sources, &maps);

    let source = sources.required(&paths.trainer_parties)?;
    let output = parse_trainers(&source, &ids, &lookup, &locations);

    printer.info("Parsed", &plural(output.trainers.len(), "trainer", "trainers"));
    printer.info(
        "Parsed",
        &plural(output.gym_leaders.len(), "gym leader", "gym leaders"),
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "\
#define TRAINER_NONE 0
#define TRAINER_ROXANNE_1 265
#define TRAINER_ROXANNE_2 769
#define TRAINER_CALVIN_1 318
#define TRAINER_SIDNEY 261
";

    const PARTIES: &str = "\
=== TRAINER_CALVIN_1 ===
Name: CALVIN
Class: Youngster

Poochyena
Level: 5

=== TRAINER_ROXANNE_2 ===
Name: ROXANNE
Class: Leader

Nosepass
Level: 37

=== TRAINER_ROXANNE_1 ===
Name: ROXANNE
Class: Leader

Geodude
Level: 12

=== TRAINER_SIDNEY ===
Name: SIDNEY
Class: Elite Four

Mightyena
Level: 46
";

    fn parse() -> TrainerOutput {
        let ids = ConstantTable::parse(HEADER, "TRAINER_");
        let locations = HashMap::from([
            ("TRAINER_CALVIN_1".to_string(), "Route 102".to_string()),
            ("TRAINER_ROXANNE_1".to_string(), "Rustboro City - Gym".to_string()),
        ]);
        parse_trainers(PARTIES, &ids, &SpeciesLookup::new(), &locations)
    }

    #[test]
    fn test_sorted_by_id() {
        let ids: Vec<u32> = parse().trainers.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![261, 265, 318, 769]);
    }

    #[test]
    fn test_gym_leaders_include_rematches() {
        let output = parse();
        let names: Vec<&str> = output
            .gym_leaders
            .iter()
            .map(|t| t.constant_name.as_str())
            .collect();
        assert_eq!(names, vec!["TRAINER_SIDNEY", "TRAINER_ROXANNE_1", "TRAINER_ROXANNE_2"]);
    }

    #[test]
    fn test_gym_leaders_are_subset() {
        let output = parse();
        for leader in &output.gym_leaders {
            assert!(output.trainers.contains(leader));
        }
    }

    #[test]
    fn test_locations_attached() {
        let output = parse();
        let calvin = output.trainers.iter().find(|t| t.id == 318).unwrap();
        assert_eq!(calvin.location.as_deref(), Some("Route 102"));

        let sidney = output.trainers.iter().find(|t| t.id == 261).unwrap();
        assert_eq!(sidney.location, None);
    }

    #[test]
    fn test_is_gym_leader() {
        assert!(is_gym_leader("TRAINER_TATE_AND_LIZA_1"));
        assert!(is_gym_leader("TRAINER_WALLACE"));
        assert!(!is_gym_leader("TRAINER_CALVIN_1"));
    }

    #[test]
    fn test_emitted_shape() {
        let output = parse();
        let calvin = output.trainers.iter().find(|t| t.id == 318).unwrap();
        insta::assert_json_snapshot!(calvin, @r###"
        {
          "id": 318,
          "constantName": "TRAINER_CALVIN_1",
          "name": "CALVIN",
          "trainerClass": "Youngster",
          "pic": "",
          "gender": "",
          "music": "",
          "doubleBattle": false,
          "aiFlags": [],
          "party": [
            {
              "species": "Poochyena",
              "level": 5
            }
          ],
          "location": "Route 102"
        }
        "###);
    }
}
