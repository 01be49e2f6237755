//! Pesadas - vehicle weighing record keeper
//!
//! A CLI tool to register gross/empty weight readings and keep the list of
//! weighings on disk.

mod cli;
mod commands;
mod output;
mod terminal;

use clap::Parser;
use cli::Cli;
use pesadas_app::logging::init_logging;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = commands::execute(cli) {
        // Record errors were already shown as notices
        if e.as_record().is_none() {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}
