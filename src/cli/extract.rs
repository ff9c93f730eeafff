//! Extraction commands.
//!
//! One subcommand per stage plus `all`, which runs them in dependency order
//! and hands each stage's records to the next in memory.

use std::time::Instant;

use crate::discovery::Project;
use crate::error::Result;
use crate::output::{plural, Printer};
use crate::pipeline::{Pipeline, Stage, StageReport};

/// Run a single stage.
pub fn run(stage: Stage, project: &Project, printer: &Printer) -> Result<()> {
    let started = Instant::now();
    let report = Pipeline::new(project, printer).run(stage)?;
    finish(&[report], started, printer);
    Ok(())
}

/// Run every stage.
pub fn run_all(project: &Project, printer: &Printer) -> Result<()> {
    let started = Instant::now();
    let reports = Pipeline::new(project, printer).run_all()?;
    finish(&reports, started, printer);
    Ok(())
}

fn finish(reports: &[StageReport], started: Instant, printer: &Printer) {
    let documents: usize = reports.iter().map(|r| r.written.len()).sum();
    let summary = match reports {
        [report] => format!("{} {}", report.stage, plural(report.records, "record", "records")),
        _ => plural(reports.len(), "stage", "stages"),
    };
    printer.success(
        "Finished",
        &format!(
            "{}, {} in {:.2}s",
            summary,
            plural(documents, "document", "documents"),
            started.elapsed().as_secs_f64()
        ),
    );
}
