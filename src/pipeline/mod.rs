//! Stage orchestration.
//!
//! A [`Pipeline`] runs extraction stages against one project and writes
//! their documents. Stages that run in the same pipeline hand their records
//! to later stages in memory; a stage run on its own reads its soft
//! dependency back from the output directory instead.

mod emit;
mod graph;

pub use emit::{read_json, write_json};
pub use graph::{CycleError, StageGraph};

use std::fmt;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::discovery::Project;
use crate::error::{PokedexError, Result};
use crate::extract::{self, Sources};
use crate::output::{display_path, plural, Printer};
use crate::types::{Species, Trainer};

pub const ABILITIES_FILE: &str = "abilities.json";
pub const ITEMS_FILE: &str = "items.json";
pub const MOVES_FILE: &str = "moves.json";
pub const POKEMON_FILE: &str = "pokemon.json";
pub const TRAINERS_FILE: &str = "trainers.json";
pub const GYM_LEADERS_FILE: &str = "gym-leaders.json";
pub const ROUTES_FILE: &str = "routes.json";

/// One extraction stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Abilities,
    Items,
    Moves,
    Pokemon,
    Trainers,
    Routes,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Abilities,
        Stage::Items,
        Stage::Moves,
        Stage::Pokemon,
        Stage::Trainers,
        Stage::Routes,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Abilities => "abilities",
            Stage::Items => "items",
            Stage::Moves => "moves",
            Stage::Pokemon => "pokemon",
            Stage::Trainers => "trainers",
            Stage::Routes => "routes",
        }
    }

    /// Stages whose output this stage consumes.
    pub fn dependencies(self) -> &'static [Stage] {
        match self {
            Stage::Trainers => &[Stage::Pokemon],
            Stage::Routes => &[Stage::Trainers],
            _ => &[],
        }
    }

    /// Documents this stage writes, primary first.
    pub fn outputs(self) -> &'static [&'static str] {
        match self {
            Stage::Abilities => &[ABILITIES_FILE],
            Stage::Items => &[ITEMS_FILE],
            Stage::Moves => &[MOVES_FILE],
            Stage::Pokemon => &[POKEMON_FILE],
            Stage::Trainers => &[TRAINERS_FILE, GYM_LEADERS_FILE],
            Stage::Routes => &[ROUTES_FILE],
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What one stage produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub stage: Stage,
    /// Records in the stage's primary document.
    pub records: usize,
    pub written: Vec<PathBuf>,
}

/// Runs stages for one project.
pub struct Pipeline<'a> {
    project: &'a Project,
    printer: &'a Printer,
    species: Option<Vec<Species>>,
    trainers: Option<Vec<Trainer>>,
}

impl<'a> Pipeline<'a> {
    pub fn new(project: &'a Project, printer: &'a Printer) -> Self {
        Self {
            project,
            printer,
            species: None,
            trainers: None,
        }
    }

    /// Run every stage in dependency order.
    pub fn run_all(&mut self) -> Result<Vec<StageReport>> {
        let order = StageGraph::standard()
            .topological_sort()
            .map_err(|e| PokedexError::Build {
                message: e.to_string(),
                help: None,
            })?;

        order.into_iter().map(|stage| self.run(stage)).collect()
    }

    /// Run one stage and write its documents.
    pub fn run(&mut self, stage: Stage) -> Result<StageReport> {
        let sources = Sources::new(self.project, self.printer);

        let (records, written) = match stage {
            Stage::Abilities => {
                let abilities = extract::abilities::extract(&sources)?;
                (abilities.len(), vec![self.emit(ABILITIES_FILE, &abilities)?])
            }
            Stage::Items => {
                let items = extract::items::extract(&sources)?;
                (items.len(), vec![self.emit(ITEMS_FILE, &items)?])
            }
            Stage::Moves => {
                let moves = extract::moves::extract(&sources)?;
                (moves.len(), vec![self.emit(MOVES_FILE, &moves)?])
            }
            Stage::Pokemon => {
                let species = extract::species::extract(&sources)?;
                let written = vec![self.emit(POKEMON_FILE, &species)?];
                let count = species.len();
                self.species = Some(species);
                (count, written)
            }
            Stage::Trainers => {
                let loaded;
                let species: &[Species] = match &self.species {
                    Some(species) => species,
                    None => {
                        loaded = self.load_previous::<Species>(POKEMON_FILE);
                        &loaded
                    }
                };
                let output = extract::trainers::extract(&sources, species)?;
                let written = vec![
                    self.emit(TRAINERS_FILE, &output.trainers)?,
                    self.emit(GYM_LEADERS_FILE, &output.gym_leaders)?,
                ];
                let count = output.trainers.len();
                self.trainers = Some(output.trainers);
                (count, written)
            }
            Stage::Routes => {
                let loaded;
                let trainers: &[Trainer] = match &self.trainers {
                    Some(trainers) => trainers,
                    None => {
                        loaded = self.load_previous::<Trainer>(TRAINERS_FILE);
                        &loaded
                    }
                };
                let routes = extract::routes::extract(&sources, trainers)?;
                (routes.len(), vec![self.emit(ROUTES_FILE, &routes)?])
            }
        };

        Ok(StageReport {
            stage,
            records,
            written,
        })
    }

    fn emit<T: Serialize>(&self, file_name: &str, records: &[T]) -> Result<PathBuf> {
        let path = self.project.output_file(file_name);
        write_json(&path, records)?;
        self.printer.success(
            "Wrote",
            &format!(
                "{} {}",
                display_path(&path),
                self.printer.dim(&format!("({})", plural(records.len(), "record", "records")))
            ),
        );
        Ok(path)
    }

    /// Read an earlier run's document. Missing or unreadable documents are
    /// reported and treated as empty.
    fn load_previous<T: DeserializeOwned>(&self, file_name: &str) -> Vec<T> {
        let path = self.project.output_file(file_name);
        match read_json(&path) {
            Ok(records) => {
                self.printer.status("Reading", &display_path(&path));
                records
            }
            Err(e) => {
                self.printer
                    .warning("Missing", &format!("{} ({})", display_path(&path), e));
                Vec::new()
            }
        }
    }
}
