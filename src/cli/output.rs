//! Output formatting utilities for CLI.

use cadence::game::{GameEvent, ResolutionLogEntry};
use cadence::engine::{card_reach, Piece};
use cadence::hex::{Axial, Direction};
use cadence::{CardDef, GameState, RoundReport};
use serde::Serialize;
use std::fmt::Write;

/// JSON-serializable round result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct JsonRoundResult<'a> {
    /// Scenario id.
    pub(super) scenario: &'a str,
    /// Initiative order.
    pub(super) order: &'a [String],
    /// Confirmed step count.
    pub(super) steps: usize,
    /// Resolution log.
    pub(super) log: &'a [ResolutionLogEntry],
    /// Every emitted event.
    pub(super) events: &'a [GameEvent],
}

impl<'a> JsonRoundResult<'a> {
    /// Create from a round report.
    pub(super) fn from_report(report: &'a RoundReport) -> Self {
        Self {
            scenario: &report.scenario_id,
            order: &report.order,
            steps: report.steps_confirmed,
            log: &report.state.log,
            events: &report.events,
        }
    }
}

/// One batch entry, either resolved or failed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct JsonBatchEntry {
    /// Scenario file.
    pub(super) path: String,
    /// Scenario id, when the file loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) scenario: Option<String>,
    /// Initiative order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(super) order: Vec<String>,
    /// Confirmed step count.
    pub(super) steps: usize,
    /// Error message, when the scenario failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) error: Option<String>,
}

/// Display name of a player, falling back to the id.
fn player_label<'a>(state: &'a GameState, id: &'a str) -> &'a str {
    state.player(id).map_or(id, |p| p.label())
}

/// Format a round report as human-readable text.
pub(super) fn format_text(report: &RoundReport, quiet: bool) -> String {
    let mut output = String::new();
    let state = &report.state;

    let _ = writeln!(output, "Round Result ({})", report.scenario_id);
    let order: Vec<&str> = report
        .order
        .iter()
        .map(|id| player_label(state, id))
        .collect();
    let _ = writeln!(output, "  Initiative: {}", order.join(" > "));
    let _ = writeln!(output, "  Steps confirmed: {}", report.steps_confirmed);
    output.push('\n');

    let mut frame = None;
    for entry in &state.log {
        if frame != Some(entry.frame_index) {
            let _ = writeln!(output, "  Frame {}", entry.frame_index);
            frame = Some(entry.frame_index);
        }
        let _ = writeln!(
            output,
            "    {:<12} {}",
            player_label(state, &entry.player_id),
            entry.symbol_ids.join(" ")
        );
    }

    if !quiet {
        output.push('\n');
        output.push_str("  Events:\n");
        for event in &report.events {
            let _ = writeln!(output, "    {event}");
        }
    }

    output
}

/// Format a card's frame timeline, one line per frame, followed by what the
/// card offers a piece at the center of a board of `board_radius` facing E.
pub(super) fn format_card(card: &CardDef, board_radius: u32) -> String {
    let mut output = String::new();
    let _ = write!(
        output,
        "{} [{}] {} (initiative {}, rotate {})",
        card.id, card.kind, card.name, card.priority, card.rotation_allowance
    );
    if let (Some(damage), Some(knockback)) = (card.damage, card.knockback_factor) {
        let _ = write!(output, " damage {damage} x{knockback}");
    }
    output.push('\n');
    for frame in &card.frames {
        let symbols: Vec<String> = frame.symbols.iter().map(|s| s.describe()).collect();
        let _ = writeln!(output, "  f{:<3} {}", frame.index, symbols.join(", "));
    }

    let reach = card_reach(card, Piece::new(Axial::ORIGIN, Direction::E), None, board_radius);
    let facings: Vec<String> = reach.facings.iter().map(ToString::to_string).collect();
    let _ = write!(output, "  reach  face {}", facings.join(" "));
    if !reach.destinations.is_empty() {
        let hexes: Vec<String> = reach.destinations.iter().map(ToString::to_string).collect();
        let _ = write!(output, "; move to {}", hexes.join(" "));
    }
    output.push('\n');
    output
}
