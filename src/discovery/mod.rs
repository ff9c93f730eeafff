//! Project discovery for pokedex runs.
//!
//! This module finds the `pokedex.yaml` manifest, resolves every input and
//! output location against it, and lists the game project's map
//! directories.
//!
//! # Example
//!
//! ```ignore
//! use pokedex::discovery::discover;
//!
//! let project = discover(".")?;
//! println!("Reading game data from {}", project.root().display());
//! ```

mod manifest;
mod scanner;

use std::path::{Path, PathBuf};

use crate::error::{PokedexError, Result};

pub use manifest::{Manifest, SourcePaths, GENERATIONS};
pub use scanner::{scan_maps, MapDir, ScanResult, EVENTS_FILENAME, SCRIPTS_FILENAME};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "pokedex.yaml";

/// A resolved project: manifest plus absolute-or-cwd-relative locations.
#[derive(Debug, Clone)]
pub struct Project {
    /// The loaded manifest (default if no pokedex.yaml was found).
    pub manifest: Manifest,

    /// Whether a pokedex.yaml manifest was found.
    pub has_manifest: bool,

    root: PathBuf,
    output: PathBuf,
    custom_data: PathBuf,
}

impl Project {
    /// Resolve a manifest's locations against `base`, the manifest's directory.
    pub fn from_manifest(manifest: Manifest, base: &Path, has_manifest: bool) -> Self {
        Self {
            root: base.join(&manifest.root),
            output: base.join(&manifest.output),
            custom_data: base.join(&manifest.custom_data),
            manifest,
            has_manifest,
        }
    }

    /// Override the game project root.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Override the output directory.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn output_dir(&self) -> &Path {
        &self.output
    }

    pub fn custom_data_dir(&self) -> &Path {
        &self.custom_data
    }

    pub fn paths(&self) -> &SourcePaths {
        &self.manifest.paths
    }

    /// Resolve an input path relative to the game project root.
    pub fn input(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    /// Path of one emitted document.
    pub fn output_file(&self, file_name: &str) -> PathBuf {
        self.output.join(file_name)
    }

    /// List the game project's map directories.
    pub fn scan_maps(&self) -> ScanResult {
        scan_maps(&self.input(&self.manifest.paths.maps))
    }
}

/// Discover a project in a directory.
///
/// Looks for a `pokedex.yaml` manifest in `dir`. If none exists, the
/// defaults apply with `dir` as the base for every location.
pub fn discover(dir: impl AsRef<Path>) -> Result<Project> {
    let dir = dir.as_ref();

    let manifest_path = dir.join(MANIFEST_FILENAME);
    if manifest_path.exists() {
        let manifest = Manifest::load(&manifest_path)?;
        Ok(Project::from_manifest(manifest, dir, true))
    } else {
        Ok(Project::from_manifest(Manifest::default(), dir, false))
    }
}

/// Load a project from an explicit manifest path, which must exist.
pub fn discover_manifest(path: &Path) -> Result<Project> {
    if !path.is_file() {
        return Err(PokedexError::Io {
            path: path.to_path_buf(),
            message: "Manifest not found".to_string(),
        });
    }
    let manifest = Manifest::load(path)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(Project::from_manifest(manifest, base, true))
}
