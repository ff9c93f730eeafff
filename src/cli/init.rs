//! Init command implementation.
//!
//! Writes a `pokedex.yaml` manifest holding every default location, ready
//! to be edited.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::discovery::{Manifest, MANIFEST_FILENAME};
use crate::error::{PokedexError, Result};
use crate::output::{display_path, plural, Printer};

/// Initialize a pokedex project by generating a pokedex.yaml manifest
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing pokedex.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(PokedexError::Build {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    let manifest = Manifest::default();

    // Report which default inputs are already in place.
    let root = args.path.join(&manifest.root);
    let paths = &manifest.paths;
    let required = [
        &paths.species_constants,
        &paths.move_constants,
        &paths.ability_constants,
        &paths.item_constants,
        &paths.trainer_constants,
        &paths.abilities,
        &paths.items,
        &paths.moves,
        &paths.trainer_parties,
        &paths.wild_encounters,
    ];
    let missing: Vec<&PathBuf> = required
        .into_iter()
        .filter(|p| !root.join(p).is_file())
        .collect();

    if missing.is_empty() {
        printer.info("Found", &format!("game project at {}", display_path(&root)));
    } else {
        printer.warning(
            "Missing",
            &format!(
                "{} under {}; edit `root` or `paths` in {}",
                plural(missing.len(), "input", "inputs"),
                display_path(&root),
                MANIFEST_FILENAME
            ),
        );
    }

    let yaml = manifest.to_yaml()?;
    fs::write(&manifest_path, yaml).map_err(|e| PokedexError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write manifest: {}", e),
    })?;

    printer.success("Created", &display_path(&manifest_path));
    Ok(())
}
