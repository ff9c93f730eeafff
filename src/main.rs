use clap::Parser;
use miette::Result;
use pokedex::cli::{self, Cli, Commands};
use pokedex::pipeline::Stage;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = cli.project.printer();

    let stage = match cli.command {
        Commands::Abilities => Some(Stage::Abilities),
        Commands::Items => Some(Stage::Items),
        Commands::Moves => Some(Stage::Moves),
        Commands::Pokemon => Some(Stage::Pokemon),
        Commands::Trainers => Some(Stage::Trainers),
        Commands::Routes => Some(Stage::Routes),
        Commands::All => {
            cli::extract::run_all(&cli.project.load()?, &printer)?;
            None
        }
        Commands::List(args) => {
            cli::list::run(args, &printer)?;
            None
        }
        Commands::Validate => {
            cli::validate::run(&cli.project.load()?, &printer)?;
            None
        }
        Commands::Init(args) => {
            cli::init::run(args, &printer)?;
            None
        }
        Commands::Completions(args) => {
            cli::completions::run(args)?;
            None
        }
    };

    if let Some(stage) = stage {
        cli::extract::run(stage, &cli.project.load()?, &printer)?;
    }

    Ok(())
}
