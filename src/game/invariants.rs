//! Round invariants - sanity checks that detect bugs.
//!
//! No sequence of intents should ever produce a state that fails these
//! checks. They are bug detectors, used by tests and the fuzz target.

use crate::game::{GameState, RoundStatus};

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

fn violation(message: String) -> InvariantViolation {
    InvariantViolation { message }
}

/// Check all round invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let round = &state.round;

    if round.frame_index == 0 {
        violations.push(violation("Round frame index is 0".to_string()));
    }

    match round.status {
        RoundStatus::Planning => {
            if !state.log.is_empty() {
                violations.push(violation(format!(
                    "Planning round has {} log entries",
                    state.log.len()
                )));
            }
            if !round.resolved_steps.is_empty() || round.active_step.is_some() {
                violations.push(violation("Planning round has resolved steps".to_string()));
            }
        }
        RoundStatus::Resolving => {
            if round.resolved_steps.is_empty() {
                violations.push(violation("Resolving round has an empty step batch".to_string()));
            } else if round.step_cursor >= round.resolved_steps.len() {
                violations.push(violation(format!(
                    "Step cursor {} out of range for {} steps",
                    round.step_cursor,
                    round.resolved_steps.len()
                )));
            }

            match &round.active_step {
                None => violations.push(violation("Resolving round has no active step".to_string())),
                Some(active) => {
                    let at_cursor = round
                        .resolved_steps
                        .get(round.step_cursor)
                        .is_some_and(|step| step.matches(active));
                    if !at_cursor {
                        violations.push(violation(format!(
                            "Active step {}@{} is not at the step cursor",
                            active.player_id, active.frame_index
                        )));
                    }
                }
            }

            if let Some(step) = round
                .resolved_steps
                .iter()
                .find(|s| s.frame_index != round.frame_index)
            {
                violations.push(violation(format!(
                    "Step for {} at frame {} queued while resolving frame {}",
                    step.player_id, step.frame_index, round.frame_index
                )));
            }

            if round.resolved_steps.iter().any(|s| s.symbols.is_empty()) {
                violations.push(violation("Queued step has no symbols".to_string()));
            }
        }
        RoundStatus::Ended => {
            if round.active_step.is_some() {
                violations.push(violation("Ended round still has an active step".to_string()));
            }
        }
    }

    for entry in &state.log {
        if entry.frame_index == 0 {
            violations.push(violation(format!(
                "Log entry for {} has frame index 0",
                entry.player_id
            )));
        }
    }

    let mut last = 0;
    for entry in &state.log {
        if entry.frame_index < last {
            violations.push(violation(format!(
                "Log entry at frame {} follows frame {last}",
                entry.frame_index
            )));
        }
        last = entry.frame_index;
    }

    violations
}

/// Assert all round invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Round invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState) {}
