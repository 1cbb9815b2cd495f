//! Life expectancy CLI - clean the Eurostat life expectancy extract.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Clean(args) => commands::clean::run(args, cli.verbose),

        Commands::Regions {
            countries_only,
            json,
        } => commands::regions::run(countries_only, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
