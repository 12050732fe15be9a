//! Scenario validation command implementation.

use super::CliError;
use cadence::Scenario;
use std::path::PathBuf;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the scenario cannot be loaded or any program breaks a rule.
pub(crate) fn execute(scenario_path: PathBuf) -> Result<(), CliError> {
    println!("Validating: {}", scenario_path.display());
    println!();

    let scenario = Scenario::load(&scenario_path)?;
    print_check("Scenario JSON", true);

    let catalog = scenario.catalog()?;
    print_check(&format!("Card catalog ({} cards)", catalog.len()), true);

    let programs = scenario.build_programs(&catalog)?;
    print_check(&format!("Programs built ({})", programs.len()), true);

    let violations = scenario.violations()?;
    print_check("Program rules", violations.is_empty());
    for v in &violations {
        println!("      {}: {}", v.player_id, v.violation);
    }

    if !violations.is_empty() {
        return Err(CliError::new(format!(
            "{} rule violation(s) found",
            violations.len()
        )));
    }

    println!();
    println!("Validation successful!");

    Ok(())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
