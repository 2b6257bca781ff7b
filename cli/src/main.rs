mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{convert, parties};

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    match &cli.command {
        Commands::Convert(args) => convert::run(&cli, args),
        Commands::Parties(args) => parties::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
