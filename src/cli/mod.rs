pub mod completions;
pub mod extract;
pub mod init;
pub mod list;
pub mod validate;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::discovery::{discover, discover_manifest, Project};
use crate::error::Result;
use crate::output::Printer;

/// pokedex - Game data extractor for the Pokédex front-end
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub project: ProjectArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options that locate the game project and the output directory.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Manifest to load (default: ./pokedex.yaml when present)
    #[arg(long, global = true)]
    pub manifest: Option<PathBuf>,

    /// Game project root, overriding the manifest
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Output directory, overriding the manifest
    #[arg(long, short, global = true)]
    pub output: Option<PathBuf>,

    /// Only print warnings and errors
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

impl ProjectArgs {
    /// Resolve the project: manifest first, then flag overrides.
    pub fn load(&self) -> Result<Project> {
        let mut project = match &self.manifest {
            Some(path) => discover_manifest(path)?,
            None => discover(".")?,
        };
        if let Some(root) = &self.root {
            project = project.with_root(root);
        }
        if let Some(output) = &self.output {
            project = project.with_output(output);
        }
        Ok(project)
    }

    pub fn printer(&self) -> Printer {
        if self.quiet {
            Printer::quiet()
        } else {
            Printer::new()
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract abilities (abilities.json)
    Abilities,

    /// Extract items (items.json)
    Items,

    /// Extract moves (moves.json)
    Moves,

    /// Extract species with learnsets and overlays (pokemon.json)
    Pokemon,

    /// Extract trainers and gym leaders (trainers.json, gym-leaders.json)
    Trainers,

    /// Group encounters, trainers and items by route (routes.json)
    Routes,

    /// Run every stage in dependency order
    All,

    /// List stages in run order
    List(list::ListArgs),

    /// Check the emitted documents
    Validate,

    /// Initialize a project (generates pokedex.yaml)
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["pokedex", "trainers", "--root", "game", "-o", "site/data"]).unwrap();
        assert!(matches!(cli.command, Commands::Trainers));
        assert_eq!(cli.project.root, Some(PathBuf::from("game")));
        assert_eq!(cli.project.output, Some(PathBuf::from("site/data")));
    }

    #[test]
    fn test_overrides_apply() {
        let dir = tempfile::tempdir().unwrap();
        let args = ProjectArgs {
            manifest: None,
            root: Some(dir.path().join("game")),
            output: Some(dir.path().join("out")),
            quiet: true,
        };
        let project = args.load().unwrap();
        assert_eq!(project.root(), dir.path().join("game"));
        assert_eq!(project.output_dir(), dir.path().join("out"));
    }

    #[test]
    fn test_missing_manifest_is_error() {
        let args = ProjectArgs {
            manifest: Some(PathBuf::from("/nonexistent/pokedex.yaml")),
            ..Default::default()
        };
        assert!(args.load().is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
