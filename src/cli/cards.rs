//! Cards command implementation.

use super::output::format_card;
use super::CliError;
use cadence::CardCatalog;
use std::path::PathBuf;

/// Execute the cards command.
///
/// # Errors
///
/// Returns an error if the catalog file cannot be loaded or breaks the
/// card schema.
pub(crate) fn execute(catalog: Option<PathBuf>, radius: u32) -> Result<(), CliError> {
    let catalog = match catalog {
        Some(path) => CardCatalog::load(&path)?,
        None => CardCatalog::sample(),
    };

    for card in catalog.iter() {
        print!("{}", format_card(card, radius));
    }
    println!();
    println!("{} cards", catalog.len());

    Ok(())
}
