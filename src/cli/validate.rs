//! Validate command implementation.

use crate::discovery::Project;
use crate::error::{PokedexError, Result};
use crate::output::{display_path, Printer};
use crate::validation::{print_diagnostics, validate_documents, Documents};

/// Check every document in the project's output directory.
///
/// Fails when any error-level diagnostic is produced.
pub fn run(project: &Project, printer: &Printer) -> Result<()> {
    let dir = project.output_dir();
    printer.status("Checking", &display_path(dir));

    let (documents, mut result) = Documents::load(dir);
    result.merge(validate_documents(&documents));
    print_diagnostics(&result, printer);

    if result.has_errors() {
        return Err(PokedexError::Validation {
            message: format!("{} error(s) in {}", result.error_count(), display_path(dir)),
            help: Some("Re-run `pokedex all` to regenerate the documents".to_string()),
        });
    }
    Ok(())
}
