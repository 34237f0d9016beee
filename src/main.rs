use clap::Parser;
use zerovault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Register => zerovault::cli::commands::register::execute(&cli),
        Commands::Add { ref kind } => zerovault::cli::commands::add::execute(&cli, kind),
        Commands::List {
            ref view,
            ref category,
        } => zerovault::cli::commands::list::execute(&cli, view, category),
        Commands::Show { ref id } => zerovault::cli::commands::show::execute(&cli, id),
        Commands::Favorite { ref id } => zerovault::cli::commands::favorite::execute(&cli, id),
        Commands::Trash { ref id } => zerovault::cli::commands::trash::execute(&cli, id),
        Commands::Restore { ref id } => zerovault::cli::commands::restore::execute(&cli, id),
        Commands::Purge { ref id, force } => {
            zerovault::cli::commands::purge::execute(&cli, id, force)
        }
        Commands::Completions { ref shell } => {
            zerovault::cli::commands::completions::execute(shell)
        }
    };

    if let Err(e) = result {
        zerovault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
