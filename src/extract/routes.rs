//! Per-route grouping of wild encounters, trainers and items.
//!
//! Routes are seeded from two places: encounter groups that target real maps
//! (`for_maps`), and map directories whose name passes [`is_route`]. Both
//! are keyed by [`sanitize_key`], so `MAP_GRANITE_CAVE_1F` and the
//! `GraniteCave_1F` directory land on the same record.

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::discovery::ScanResult;
use crate::error::{PokedexError, Result};
use crate::output::plural;
use crate::parser::text::{first_number, sanitize_key, title_case_constant};
use crate::parser::ConstantTable;
use crate::types::{Fishing, RouteData, RouteTrainer, Trainer, WildEncounters, WildMon};

use super::{locations, Sources};

const OLD_ROD: std::ops::Range<usize> = 0..2;
const GOOD_ROD: std::ops::Range<usize> = 2..5;
const SUPER_ROD: std::ops::Range<usize> = 5..10;

#[derive(Debug, Deserialize)]
struct EncounterFile {
    wild_encounter_groups: Vec<EncounterGroup>,
}

#[derive(Debug, Deserialize)]
struct EncounterGroup {
    #[serde(default)]
    for_maps: bool,
    #[serde(default)]
    encounters: Vec<Encounter>,
}

#[derive(Debug, Deserialize)]
struct Encounter {
    map: Option<String>,
    land_mons: Option<MonTable>,
    water_mons: Option<MonTable>,
    fishing_mons: Option<MonTable>,
    rock_smash_mons: Option<MonTable>,
}

#[derive(Debug, Deserialize)]
struct MonTable {
    #[serde(default)]
    mons: Vec<RawMon>,
}

#[derive(Debug, Deserialize)]
struct RawMon {
    species: String,
    min_level: u32,
    max_level: u32,
}

fn route_prefix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^ROUTE(\d+)").expect("literal pattern is valid"))
}

/// Whether a constant-style map name is a route, cave or forest.
pub fn is_route(name: &str) -> bool {
    name.starts_with("ROUTE") || name.contains("CAVE") || name.contains("FOREST")
}

/// `ROUTE103` → `Route 103`, `GRANITE_CAVE_1F` → `Granite Cave 1F`.
///
/// Words carrying a digit are floor or area codes and keep their case.
pub fn display_name(name: &str) -> String {
    route_prefix()
        .replace(name, "ROUTE_$1")
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            if word.chars().any(|c| c.is_ascii_digit()) {
                word.to_string()
            } else {
                title_case_constant(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Constant-style name for a map directory: `PetalburgWoods` →
/// `PETALBURG_WOODS`, `Route103` → `ROUTE103`.
pub fn map_constant(dir_name: &str) -> String {
    let mut name = String::with_capacity(dir_name.len() + 4);
    let mut prev: Option<char> = None;
    for c in dir_name.chars() {
        if c.is_ascii_uppercase() && prev.is_some_and(|p| p.is_ascii_lowercase()) {
            name.push('_');
        }
        name.push(c.to_ascii_uppercase());
        prev = Some(c);
    }
    name
}

/// Route sort key: the first number in the name, unnumbered areas last.
pub fn route_order(route: &RouteData) -> (bool, Option<u32>) {
    let number = first_number(&route.name);
    (number.is_none(), number)
}

/// Collapse repeated species into one entry covering every listed level.
/// First-appearance order is kept.
fn dedupe(mons: impl IntoIterator<Item = WildMon>) -> Vec<WildMon> {
    let mut merged: Vec<WildMon> = Vec::new();
    for mon in mons {
        match merged.iter_mut().find(|m| m.species == mon.species) {
            Some(existing) => {
                existing.min_level = existing.min_level.min(mon.min_level);
                existing.max_level = existing.max_level.max(mon.max_level);
            }
            None => merged.push(mon),
        }
    }
    merged
}

/// Grouping state for one run.
pub struct RouteBuilder<'a> {
    species: &'a HashMap<String, String>,
    routes: BTreeMap<String, RouteData>,
}

impl<'a> RouteBuilder<'a> {
    /// `species` maps `SPECIES_` constants to display names; unmapped
    /// species keep their constant.
    pub fn new(species: &'a HashMap<String, String>) -> Self {
        Self {
            species,
            routes: BTreeMap::new(),
        }
    }

    fn entry(&mut self, name: &str) -> &mut RouteData {
        self.routes
            .entry(sanitize_key(name))
            .or_insert_with(|| RouteData {
                name: name.to_string(),
                display_name: display_name(name),
                trainers: Vec::new(),
                items: Vec::new(),
                wild_encounters: WildEncounters::default(),
            })
    }

    /// Seed a route from a map directory, if the name passes the filter.
    pub fn add_map(&mut self, dir_name: &str) -> bool {
        let name = map_constant(dir_name);
        if !is_route(&name) {
            return false;
        }
        self.entry(&name);
        true
    }

    /// Fold an encounter document into the routes.
    ///
    /// Only groups flagged `for_maps` are read. A later encounter for the
    /// same map replaces the tables it defines.
    pub fn add_encounters(&mut self, json: &str) -> Result<()> {
        let file: EncounterFile = serde_json::from_str(json).map_err(|e| PokedexError::Parse {
            message: format!("malformed wild encounter table: {}", e),
            help: Some("expected wild_encounter_groups[].encounters[] objects".into()),
        })?;

        for encounter in file
            .wild_encounter_groups
            .iter()
            .filter(|g| g.for_maps)
            .flat_map(|g| &g.encounters)
        {
            let Some(map) = encounter.map.as_deref() else {
                continue;
            };
            let name = map.strip_prefix("MAP_").unwrap_or(map);
            if !is_route(name) {
                continue;
            }

            let land = encounter.land_mons.as_ref().map(|t| self.wild(&t.mons));
            let water = encounter.water_mons.as_ref().map(|t| self.wild(&t.mons));
            let rock_smash = encounter.rock_smash_mons.as_ref().map(|t| self.wild(&t.mons));
            let fishing = encounter.fishing_mons.as_ref().map(|t| self.fishing(&t.mons));

            let wild = &mut self.entry(name).wild_encounters;
            if land.is_some() {
                wild.land = land;
            }
            if water.is_some() {
                wild.water = water;
            }
            if fishing.is_some() {
                wild.fishing = fishing;
            }
            if rock_smash.is_some() {
                wild.rock_smash = rock_smash;
            }
        }
        Ok(())
    }

    fn resolve(&self, mon: &RawMon) -> WildMon {
        WildMon {
            species: self
                .species
                .get(&mon.species)
                .cloned()
                .unwrap_or_else(|| mon.species.clone()),
            min_level: mon.min_level,
            max_level: mon.max_level,
        }
    }

    fn wild(&self, mons: &[RawMon]) -> Vec<WildMon> {
        dedupe(mons.iter().map(|mon| self.resolve(mon)))
    }

    /// Rod tiers are fixed slot ranges; repeats within a tier are kept.
    fn fishing(&self, mons: &[RawMon]) -> Fishing {
        let slice = |range: std::ops::Range<usize>| {
            let end = range.end.min(mons.len());
            let start = range.start.min(end);
            mons[start..end].iter().map(|mon| self.resolve(mon)).collect()
        };
        Fishing {
            old_rod: Some(slice(OLD_ROD)),
            good_rod: Some(slice(GOOD_ROD)),
            super_rod: Some(slice(SUPER_ROD)),
        }
    }

    /// Attach trainers whose location matches a route, in id order.
    pub fn add_trainers(&mut self, trainers: &[Trainer]) {
        let mut sorted: Vec<&Trainer> = trainers.iter().collect();
        sorted.sort_by_key(|t| t.id);

        for trainer in sorted {
            let Some(location) = trainer.location.as_deref() else {
                continue;
            };
            if let Some(route) = self.routes.get_mut(&sanitize_key(location)) {
                route.trainers.push(RouteTrainer {
                    id: trainer.id,
                    name: trainer.name.clone(),
                    trainer_class: trainer.trainer_class.clone(),
                    constant_name: trainer.constant_name.clone(),
                });
            }
        }
    }

    /// Attach each known route's items from its map directory.
    pub fn add_items(&mut self, maps: &ScanResult) {
        for map in &maps.maps {
            if let Some(route) = self.routes.get_mut(&sanitize_key(&map.name)) {
                route.items.extend(locations::load_map_items(map));
            }
        }
    }

    /// Routes sorted by the first number in their name; unnumbered areas
    /// go last, in key order.
    pub fn finish(self) -> Vec<RouteData> {
        let mut routes: Vec<RouteData> = self.routes.into_values().collect();
        routes.sort_by_key(route_order);
        routes
    }
}

/// Build the routes document. `trainers` are the emitted trainer records;
/// an empty slice leaves every route without trainers.
pub fn extract(sources: &Sources, trainers: &[Trainer]) -> Result<Vec<RouteData>> {
    let project = sources.project();
    let paths = project.paths();
    let printer = sources.printer();

    let species_ids: ConstantTable = sources.constants(&paths.species_constants, "SPECIES_")?;
    let species = species_ids.display_names();

    let maps = project.scan_maps();
    printer.status("Scanning", &plural(maps.total(), "map", "maps"));

    let mut builder = RouteBuilder::new(&species);
    for map in &maps.maps {
        builder.add_map(&map.name);
    }
    let encounters = sources.required(&paths.wild_encounters)?;
    builder.add_encounters(&encounters)?;
    builder.add_trainers(trainers);
    builder.add_items(&maps);

    let routes = builder.finish();
    printer.info("Parsed", &plural(routes.len(), "route", "routes"));
    Ok(routes)
}
