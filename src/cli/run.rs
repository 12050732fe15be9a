//! Run command implementation.

use super::output::{format_text, JsonRoundResult};
use super::{CliError, OutputFormat};
use cadence::{run_scenario, Scenario};
use std::path::PathBuf;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the scenario cannot be loaded or its programs are invalid.
pub(crate) fn execute(
    scenario_path: PathBuf,
    format: OutputFormat,
    diagnostics: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let mut scenario = Scenario::load(&scenario_path)?;
    if diagnostics {
        scenario.config.diagnostics = true;
    }

    if !quiet && format == OutputFormat::Text {
        println!("Resolving {}...", scenario_path.display());
        let names: Vec<&str> = scenario.players.iter().map(|p| p.id.as_str()).collect();
        println!("Players: {}", names.join(", "));
        println!();
    }

    let report = run_scenario(&scenario)?;

    match format {
        OutputFormat::Text => {
            print!("{}", format_text(&report, quiet));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonRoundResult::from_report(&report))?;
            println!("{json}");
        }
    }

    Ok(())
}
