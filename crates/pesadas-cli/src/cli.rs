//! CLI definition using clap

use clap::{Parser, Subcommand};
use pesadas_types::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pesadas")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Vehicle weighing records: tara, bruto and neto per plate")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory override. Uses config value if not specified.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a new weighing
    Add {
        /// Vehicle identifier (plate)
        identifier: String,

        /// Empty weight (tara)
        #[arg(long, short = 't', allow_hyphen_values = true)]
        tara: String,

        /// Gross weight (bruto)
        #[arg(long, short = 'b', allow_hyphen_values = true)]
        bruto: String,
    },

    /// Show all weighings
    List,

    /// Edit a weighing; omitted fields keep their current value
    Edit {
        /// Row number as shown by `list` (1-based)
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        number: u64,

        /// New vehicle identifier
        #[arg(long, short = 'i')]
        identifier: Option<String>,

        /// New empty weight (tara)
        #[arg(long, short = 't', allow_hyphen_values = true)]
        tara: Option<String>,

        /// New gross weight (bruto)
        #[arg(long, short = 'b', allow_hyphen_values = true)]
        bruto: Option<String>,
    },

    /// Delete one weighing
    Delete {
        /// Row number as shown by `list` (1-based)
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        number: u64,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Delete every weighing
    Clear {
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Show weighings with net weight at or above a minimum
    Filter {
        /// Minimum net weight (neto)
        #[arg(long, allow_hyphen_values = true)]
        min_net: String,
    },

    /// Show weighings whose identifier contains the text
    Search {
        /// Text to look for (case-insensitive)
        text: String,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set data directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set timestamp format for new records (chrono syntax)
        #[arg(long)]
        set_timestamp_format: Option<String>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
