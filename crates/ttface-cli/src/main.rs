//! ttface CLI - look inside font files through the ttface façade

mod cli;
mod commands;

use clap::Parser;

use crate::cli::{Cli, Commands};

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let result = match &cli.command {
        Commands::Dump(args) => commands::dump::run(args),
        Commands::Count(args) => commands::count::run(args),
    };

    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
