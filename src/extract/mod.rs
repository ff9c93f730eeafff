//! Extraction stages.
//!
//! Each stage module exposes a pure `parse_*` function over source text and
//! an `extract` function that reads the stage's inputs through [`Sources`].
//! Required inputs abort the stage with an error; optional inputs that are
//! missing are reported as warnings and contribute nothing.

pub mod abilities;
pub mod items;
pub mod locations;
pub mod moves;
pub mod overlay;
pub mod routes;
pub mod species;
pub mod trainers;

use std::fs;
use std::path::Path;

use crate::discovery::Project;
use crate::error::{PokedexError, Result};
use crate::output::{display_path, Printer};
use crate::parser::ConstantTable;

/// Input reader bound to one project and printer.
pub struct Sources<'a> {
    project: &'a Project,
    printer: &'a Printer,
}

impl<'a> Sources<'a> {
    pub fn new(project: &'a Project, printer: &'a Printer) -> Self {
        Self { project, printer }
    }

    pub fn project(&self) -> &'a Project {
        self.project
    }

    pub fn printer(&self) -> &'a Printer {
        self.printer
    }

    /// Read a required input relative to the game root.
    pub fn required(&self, relative: &Path) -> Result<String> {
        let path = self.project.input(relative);
        self.printer.status("Reading", &display_path(&path));
        fs::read_to_string(&path).map_err(|e| PokedexError::read(&path, e))
    }

    /// Read an optional input relative to the game root.
    pub fn optional(&self, relative: &Path) -> Option<String> {
        let path = self.project.input(relative);
        self.read_optional(&path)
    }

    /// Read an optional file at an already-resolved path.
    pub fn read_optional(&self, path: &Path) -> Option<String> {
        match fs::read_to_string(path) {
            Ok(source) => {
                self.printer.status("Reading", &display_path(path));
                Some(source)
            }
            Err(e) => {
                self.printer
                    .warning("Skipping", &format!("{} ({})", display_path(path), e));
                None
            }
        }
    }

    /// Load a required constant header.
    pub fn constants(&self, relative: &Path, prefix: &str) -> Result<ConstantTable> {
        let source = self.required(relative)?;
        let table = ConstantTable::parse(&source, prefix);
        self.printer
            .info("Parsed", &format!("{} {}* constants", table.len(), prefix));
        Ok(table)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Shared fixtures for stage tests.

    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use crate::discovery::{discover, Project};

    /// A throwaway game project with the given files written under its root.
    pub fn project_with(files: &[(&str, &str)]) -> (TempDir, Project) {
        let dir = tempfile::tempdir().unwrap();
        for (relative, content) in files {
            write(dir.path(), relative, content);
        }
        let project = discover(dir.path()).unwrap();
        (dir, project)
    }

    pub fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::project_with;
    use super::*;

    #[test]
    fn test_required_missing_is_error() {
        let (_dir, project) = project_with(&[]);
        let printer = Printer::quiet();
        let sources = Sources::new(&project, &printer);

        let result = sources.required(Path::new("src/data/items.h"));
        assert!(matches!(result, Err(PokedexError::Io { .. })));
    }

    #[test]
    fn test_optional_missing_is_none() {
        let (_dir, project) = project_with(&[]);
        let printer = Printer::quiet();
        let sources = Sources::new(&project, &printer);

        assert_eq!(sources.optional(Path::new("src/data/pokemon/egg_moves.h")), None);
    }

    #[test]
    fn test_constants_loaded() {
        let (_dir, project) = project_with(&[(
            "include/constants/items.h",
            "#define ITEM_NONE 0\n#define ITEM_POTION 13\n",
        )]);
        let printer = Printer::quiet();
        let sources = Sources::new(&project, &printer);

        let table = sources
            .constants(Path::new("include/constants/items.h"), "ITEM_")
            .unwrap();
        assert_eq!(table.id("ITEM_POTION"), Some(13));
    }
}
