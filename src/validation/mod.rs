//! Validation of emitted documents.
//!
//! Re-reads the JSON documents in the output directory and checks the
//! properties every run must guarantee: sort order, no `NONE` records,
//! stat totals, non-empty parties and a consistent gym-leader subset.
//! Used by `pokedex validate`.

mod checks;
mod warning;

pub use checks::{
    check_duplicate_ids, check_gym_leaders, check_order, check_parties, check_repeated_entries,
    check_route_names, check_stat_totals, check_zero_ids,
};
pub use warning::{Diagnostic, Severity, ValidationResult};

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::PokedexError;
use crate::extract::routes::route_order;
use crate::output::Printer;
use crate::pipeline::{
    read_json, ABILITIES_FILE, GYM_LEADERS_FILE, ITEMS_FILE, MOVES_FILE, POKEMON_FILE,
    ROUTES_FILE, TRAINERS_FILE,
};
use crate::types::{Ability, Item, Move, RouteData, Species, Trainer};

/// The documents found in an output directory. Absent documents are `None`.
#[derive(Debug, Default)]
pub struct Documents {
    pub abilities: Option<Vec<Ability>>,
    pub items: Option<Vec<Item>>,
    pub moves: Option<Vec<Move>>,
    pub pokemon: Option<Vec<Species>>,
    pub trainers: Option<Vec<Trainer>>,
    pub gym_leaders: Option<Vec<Trainer>>,
    pub routes: Option<Vec<RouteData>>,
}

impl Documents {
    /// Load every document from `dir`. Missing documents become warnings,
    /// malformed ones errors.
    pub fn load(dir: &Path) -> (Self, ValidationResult) {
        let mut result = ValidationResult::new();
        let documents = Self {
            abilities: load(dir, ABILITIES_FILE, &mut result),
            items: load(dir, ITEMS_FILE, &mut result),
            moves: load(dir, MOVES_FILE, &mut result),
            pokemon: load(dir, POKEMON_FILE, &mut result),
            trainers: load(dir, TRAINERS_FILE, &mut result),
            gym_leaders: load(dir, GYM_LEADERS_FILE, &mut result),
            routes: load(dir, ROUTES_FILE, &mut result),
        };
        (documents, result)
    }
}

fn load<T: DeserializeOwned>(dir: &Path, file_name: &str, result: &mut ValidationResult) -> Option<Vec<T>> {
    let path = dir.join(file_name);
    if !path.exists() {
        result.push(
            Diagnostic::warning("pokedex::validate::missing", file_name, "document not found")
                .with_help("Run `pokedex all` to generate every document"),
        );
        return None;
    }

    match read_json(&path) {
        Ok(records) => Some(records),
        Err(PokedexError::Parse { message, .. }) => {
            result.push(Diagnostic::error("pokedex::validate::malformed", file_name, message));
            None
        }
        Err(e) => {
            result.push(Diagnostic::error("pokedex::validate::unreadable", file_name, e.to_string()));
            None
        }
    }
}

/// Run every check against the loaded documents.
pub fn validate_documents(documents: &Documents) -> ValidationResult {
    let mut result = ValidationResult::new();

    if let Some(abilities) = &documents.abilities {
        result.merge(check_order(ABILITIES_FILE, abilities, |a| a.id, |a| a.name.clone()));
        result.merge(check_zero_ids(ABILITIES_FILE, abilities, |a| a.id));
        result.merge(check_duplicate_ids(ABILITIES_FILE, abilities, |a| a.id));
    }

    if let Some(items) = &documents.items {
        result.merge(check_order(ITEMS_FILE, items, |i| (i.pocket, i.id), |i| i.name.clone()));
        result.merge(check_zero_ids(ITEMS_FILE, items, |i| i.id));
        result.merge(check_duplicate_ids(ITEMS_FILE, items, |i| i.id));
    }

    if let Some(moves) = &documents.moves {
        result.merge(check_order(MOVES_FILE, moves, |m| m.id, |m| m.name.clone()));
        result.merge(check_zero_ids(MOVES_FILE, moves, |m| m.id));
        result.merge(check_duplicate_ids(MOVES_FILE, moves, |m| m.id));
    }

    if let Some(pokemon) = &documents.pokemon {
        result.merge(check_order(POKEMON_FILE, pokemon, |s| s.nat_dex_num, |s| s.name.clone()));
        result.merge(check_zero_ids(POKEMON_FILE, pokemon, |s| s.id));
        result.merge(check_duplicate_ids(POKEMON_FILE, pokemon, |s| s.id));
        result.merge(check_stat_totals(pokemon));
        result.merge(check_repeated_entries(pokemon));
    }

    if let Some(trainers) = &documents.trainers {
        result.merge(check_order(TRAINERS_FILE, trainers, |t| t.id, |t| t.constant_name.clone()));
        result.merge(check_zero_ids(TRAINERS_FILE, trainers, |t| t.id));
        result.merge(check_parties(trainers));
    }

    if let Some(gym_leaders) = &documents.gym_leaders {
        result.merge(check_order(GYM_LEADERS_FILE, gym_leaders, |t| t.id, |t| t.constant_name.clone()));
        if let Some(trainers) = &documents.trainers {
            result.merge(check_gym_leaders(gym_leaders, trainers));
        }
    }

    if let Some(routes) = &documents.routes {
        result.merge(check_order(ROUTES_FILE, routes, route_order, |r| r.name.clone()));
        result.merge(check_route_names(routes));
    }

    result
}

/// Print diagnostics to stderr.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        eprintln!(
            "{}[{}]: {}: {}",
            printer.severity(&d.severity.to_string(), d.is_error()),
            d.code,
            d.document,
            d.message
        );
        if let Some(help) = &d.help {
            eprintln!("  {} {}", printer.dim("help:"), help);
        }
    }

    let errors = result.error_count();
    let warnings = result.warning_count();

    if errors > 0 {
        printer.error(
            "Failed",
            &format!("validation: {} error(s), {} warning(s)", errors, warnings),
        );
    } else if warnings > 0 {
        printer.warning("Finished", &format!("validation passed ({} warning(s))", warnings));
    } else {
        printer.success("Finished", "validation passed");
    }
}
