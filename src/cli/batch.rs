//! Batch command implementation.

use super::output::JsonBatchEntry;
use super::{CliError, OutputFormat};
use cadence::{run_scenario, Scenario, ScenarioError};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Execute the batch command.
///
/// # Errors
///
/// Returns an error if any scenario fails to resolve.
pub(crate) fn execute(
    scenarios: Vec<PathBuf>,
    threads: Option<usize>,
    format: OutputFormat,
    progress: bool,
) -> Result<(), CliError> {
    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let pb = if progress {
        let pb = ProgressBar::new(scenarios.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} scenarios")
            .map_err(|e| CliError::new(e.to_string()))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Each worker owns its scenario and state values; results keep input order.
    let entries: Vec<JsonBatchEntry> = scenarios
        .par_iter()
        .map(|path| {
            let entry = resolve_one(path);
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            entry
        })
        .collect();

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    let failed = entries.iter().filter(|e| e.error.is_some()).count();

    match format {
        OutputFormat::Text => {
            for entry in &entries {
                match &entry.error {
                    Some(error) => println!("  {:<32} FAILED: {error}", entry.path),
                    None => println!(
                        "  {:<32} {:>4} steps  order: {}",
                        entry.path,
                        entry.steps,
                        entry.order.join(" > ")
                    ),
                }
            }
            println!();
            println!(
                "Resolved {}/{} scenarios in {:.2}s",
                entries.len() - failed,
                entries.len(),
                duration.as_secs_f64()
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }

    if failed > 0 {
        return Err(CliError::new(format!("{failed} scenario(s) failed")));
    }
    Ok(())
}

fn resolve_one(path: &Path) -> JsonBatchEntry {
    let result = Scenario::load(path).and_then(|scenario| {
        let report = run_scenario(&scenario)?;
        Ok::<_, ScenarioError>((scenario.id, report))
    });

    let path = path.display().to_string();
    match result {
        Ok((id, report)) => JsonBatchEntry {
            path,
            scenario: Some(id),
            order: report.order,
            steps: report.steps_confirmed,
            error: None,
        },
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "scenario failed");
            JsonBatchEntry {
                path,
                scenario: None,
                order: Vec::new(),
                steps: 0,
                error: Some(e.to_string()),
            }
        }
    }
}
