//! Command handlers

use crate::cli::{Cli, Commands};
use crate::output::output_table;
use crate::terminal::TerminalSurface;
use pesadas_app::config::Config;
use pesadas_app::repository::open_controller;
use pesadas_app::view::ViewController;
use pesadas_domain::service::Clock;
use pesadas_domain::KeyValueStorage;
use pesadas_types::{OutputFormat, Result};
use std::path::PathBuf;
use tracing::debug;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if cli.data_dir.is_some() {
        config.data_dir = cli.data_dir.clone();
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Config {
            show,
            set_data_dir,
            set_output,
            set_timestamp_format,
            reset,
        } => cmd_config(show, set_data_dir, set_output, set_timestamp_format, reset),

        command => {
            let mut controller = open_controller(&config)?;
            let mut surface = TerminalSurface::new(assumes_yes(&command));
            run_record_command(&mut controller, &mut surface, command)?;
            output_table(output_format, surface.table())
        }
    }
}

fn assumes_yes(command: &Commands) -> bool {
    matches!(
        command,
        Commands::Delete { yes: true, .. } | Commands::Clear { yes: true }
    )
}

/// Row numbers on screen are 1-based
fn row_index(number: u64) -> usize {
    usize::try_from(number.saturating_sub(1)).unwrap_or(usize::MAX)
}

fn run_record_command<S: KeyValueStorage, C: Clock>(
    controller: &mut ViewController<S, C>,
    surface: &mut TerminalSurface,
    command: Commands,
) -> Result<()> {
    match command {
        Commands::Add {
            identifier,
            tara,
            bruto,
        } => controller.submit_new_record(surface, &identifier, &tara, &bruto),

        Commands::List => {
            controller.render(surface);
            Ok(())
        }

        Commands::Edit {
            number,
            identifier,
            tara,
            bruto,
        } => {
            let index = row_index(number);
            controller.open_edit(surface, index)?;
            let Some(draft) = surface.take_edit_draft() else {
                return Ok(());
            };

            let identifier = identifier.unwrap_or(draft.identifier);
            let tara = tara.unwrap_or(draft.empty_weight);
            let bruto = bruto.unwrap_or(draft.gross_weight);
            controller.request_edit(surface, index, &identifier, &tara, &bruto)
        }

        Commands::Delete { number, .. } => {
            controller.request_delete(surface, row_index(number))?;
            resolve(controller, surface)
        }

        Commands::Clear { .. } => {
            controller.request_clear_all(surface);
            resolve(controller, surface)
        }

        Commands::Filter { min_net } => controller.filter_min_net(surface, &min_net).map(|_| ()),

        Commands::Search { text } => {
            controller.search(surface, &text);
            Ok(())
        }

        // Handled in `execute` without opening the store
        Commands::Config { .. } => Ok(()),
    }
}

/// Deliver the terminal's answer to the pending confirmation
fn resolve<S: KeyValueStorage, C: Clock>(
    controller: &mut ViewController<S, C>,
    surface: &mut TerminalSurface,
) -> Result<()> {
    match surface.take_answer() {
        Some(confirmed) => {
            debug!("Confirmation answered: {}", confirmed);
            let result = controller.resolve_confirmation(surface, confirmed);
            if !confirmed {
                controller.render(surface);
            }
            result
        }
        None => Ok(()),
    }
}

fn cmd_config(
    show: bool,
    set_data_dir: Option<PathBuf>,
    set_output: Option<OutputFormat>,
    set_timestamp_format: Option<String>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut changed = false;

    if let Some(dir) = set_data_dir {
        config.data_dir = Some(dir);
        changed = true;
    }

    if let Some(format) = set_output {
        config.output_format = format;
        changed = true;
    }

    if let Some(format) = set_timestamp_format {
        config.timestamp_format = format;
        changed = true;
    }

    if changed {
        config.save()?;
        println!("Configuration saved");
    }

    if show || !changed {
        println!("{}", config);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_index() {
        assert_eq!(row_index(1), 0);
        assert_eq!(row_index(3), 2);
    }

    #[test]
    fn test_assumes_yes() {
        assert!(assumes_yes(&Commands::Clear { yes: true }));
        assert!(!assumes_yes(&Commands::Clear { yes: false }));
        assert!(assumes_yes(&Commands::Delete { number: 1, yes: true }));
        assert!(!assumes_yes(&Commands::List));
    }
}
