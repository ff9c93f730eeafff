//! List command implementation.
//!
//! Prints the extraction stages in run order with the documents they write.

use clap::Args;

use crate::error::{PokedexError, Result};
use crate::output::Printer;
use crate::pipeline::{Stage, StageGraph};

/// List stages in run order
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show which stages each stage reads from
    #[arg(long)]
    pub deps: bool,
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let graph = StageGraph::standard();
    let order = graph.topological_sort().map_err(|e| PokedexError::Build {
        message: e.to_string(),
        help: None,
    })?;

    for stage in order {
        let outputs = stage.outputs().join(", ");
        let deps: Vec<&str> = graph.dependencies_of(stage).map(Stage::name).collect();

        if args.deps && !deps.is_empty() {
            printer.info(
                stage.name(),
                &format!("{} {} {}", outputs, printer.dim("<-"), deps.join(", ")),
            );
        } else {
            printer.info(stage.name(), &outputs);
        }
    }

    Ok(())
}
