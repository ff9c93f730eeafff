//! pokedex - Game data extractor
//!
//! Turns a decompiled game project's C tables, party files, encounter JSON
//! and map scripts into the JSON documents served by the Pokédex
//! front-end: abilities, items, moves, pokemon, trainers, gym leaders and
//! routes.

pub mod cli;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod types;
pub mod validation;

pub use discovery::{discover, discover_manifest, Manifest, Project, ScanResult, SourcePaths};
pub use error::{PokedexError, Result};
pub use extract::Sources;
pub use parser::{ConstantTable, LearnsetParser, PartyParser, SpeciesLookup};
pub use pipeline::{Pipeline, Stage, StageGraph, StageReport};
pub use types::{
    Ability, AbilityFlags, AdditionalEffect, BaseStats, Item, LevelUpMove, Move, MoveFlags, Pocket,
    RouteData, Species, Trainer, TrainerMon, WildEncounters, WildMon,
};
pub use validation::{validate_documents, Diagnostic, Documents, Severity, ValidationResult};
