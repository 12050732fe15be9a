//! Scenario files: seated players, a card catalog and each player's choices.
//!
//! A scenario is enough to play one round end to end without a UI:
//!
//! ```json
//! {
//!   "id": "demo",
//!   "players": [{"id": "p1", "name": "Ada"}, {"id": "p2", "name": "Brann"}],
//!   "programs": {"p1": {"movement": "movement-advance"}}
//! }
//! ```
//!
//! Without a `cards` list the sample catalog is used.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cards::{CardCatalog, CardDef};
use crate::engine::{Clock, EngineConfig, Reducer, SystemClock, Transition};
use crate::error::{ProgramError, ScenarioError};
use crate::game::{
    validate_program, GameEvent, GameIntent, GameState, PlannedProgram, PlayerId, PlayerState,
    ProgramChoice, ProgramViolation,
};

/// A seated player in a scenario file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioPlayer {
    /// Player id.
    pub id: PlayerId,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// A parsed scenario file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Scenario id, used as the game id.
    pub id: String,
    /// Players in seat order.
    pub players: Vec<ScenarioPlayer>,
    /// Card catalog; the sample set when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cards: Option<Vec<CardDef>>,
    /// Card choices per player. Players without an entry submit nothing.
    #[serde(default)]
    pub programs: BTreeMap<PlayerId, ProgramChoice>,
    /// Engine options.
    #[serde(default)]
    pub config: EngineConfig,
}

/// A rule violation found in one player's program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerViolation {
    /// Player whose program breaks the rule.
    pub player_id: PlayerId,
    /// The broken rule.
    pub violation: ProgramViolation,
}

impl Scenario {
    /// Parse a scenario from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Json`] if the text is not a valid scenario.
    pub fn from_json_str(json: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a scenario file.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Io`] if the file cannot be read, or
    /// [`ScenarioError::Json`] if it is not a valid scenario.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario = Self::from_json_str(&text)?;
        debug!(path = %path.display(), id = %scenario.id, "scenario loaded");
        Ok(scenario)
    }

    /// Card catalog the programs are built from.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Catalog`] if the embedded cards repeat an id.
    pub fn catalog(&self) -> Result<CardCatalog, ScenarioError> {
        match &self.cards {
            Some(cards) => Ok(CardCatalog::from_cards(cards.clone())?),
            None => Ok(CardCatalog::sample()),
        }
    }

    /// A fresh game with the scenario's players seated, in planning.
    #[must_use]
    pub fn initial_state(&self) -> GameState {
        let players = self
            .players
            .iter()
            .map(|p| PlayerState::new(p.id.clone(), p.name.clone()))
            .collect();
        GameState::new(self.id.clone(), players)
    }

    /// Build every player's program, in seat order, without checking rules.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::NoPlayers`] for an empty table,
    /// [`ScenarioError::UnknownPlayer`] for choices given to a player that is
    /// not seated, or [`ScenarioError::Program`] for an unknown card id.
    pub fn build_programs(&self, catalog: &CardCatalog) -> Result<Vec<PlannedProgram>, ScenarioError> {
        if self.players.is_empty() {
            return Err(ScenarioError::NoPlayers);
        }
        if let Some(stray) = self
            .programs
            .keys()
            .find(|id| !self.players.iter().any(|p| &p.id == *id))
        {
            return Err(ScenarioError::UnknownPlayer(stray.clone()));
        }

        let mut programs = Vec::new();
        for player in &self.players {
            if let Some(choice) = self.programs.get(&player.id) {
                programs.push(PlannedProgram::from_choices(player.id.clone(), choice, catalog)?);
            }
        }
        Ok(programs)
    }

    /// Every rule violation across all programs.
    ///
    /// # Errors
    ///
    /// Fails like [`Scenario::build_programs`], or if the catalog is invalid.
    pub fn violations(&self) -> Result<Vec<PlayerViolation>, ScenarioError> {
        let catalog = self.catalog()?;
        let programs = self.build_programs(&catalog)?;
        Ok(programs
            .iter()
            .flat_map(|program| {
                validate_program(program, &catalog)
                    .into_iter()
                    .map(|violation| PlayerViolation {
                        player_id: program.player_id.clone(),
                        violation,
                    })
            })
            .collect())
    }

    /// Seat the players and submit every program, ready for `START_ROUND`.
    ///
    /// # Errors
    ///
    /// Fails like [`Scenario::build_programs`], or with
    /// [`ProgramError::Rejected`] if a program breaks a rule.
    pub fn planned<C: Clock>(&self, reducer: &Reducer<C>) -> Result<Transition, ScenarioError> {
        let catalog = self.catalog()?;
        let programs = self.build_programs(&catalog)?;

        let mut intents = Vec::with_capacity(programs.len());
        for program in programs {
            let violations = validate_program(&program, &catalog);
            if !violations.is_empty() {
                return Err(ProgramError::Rejected {
                    player: program.player_id,
                    violations,
                }
                .into());
            }
            intents.push(GameIntent::SubmitProgram {
                player_id: program.player_id.clone(),
                program,
            });
        }

        Ok(reducer.apply_all(&self.initial_state(), &intents))
    }
}

/// Outcome of playing a scenario's round to the end.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundReport {
    /// Scenario id.
    pub scenario_id: String,
    /// Initiative order the round was resolved in.
    pub order: Vec<PlayerId>,
    /// Number of confirmed steps.
    pub steps_confirmed: usize,
    /// Every event, from the first submission to `ROUND_ENDED`.
    pub events: Vec<GameEvent>,
    /// Final state.
    pub state: GameState,
}

/// Play a scenario's round to completion with wall clock timestamps.
///
/// # Errors
///
/// Fails if the scenario's catalog or programs are invalid.
pub fn run_scenario(scenario: &Scenario) -> Result<RoundReport, ScenarioError> {
    let reducer = Reducer::<SystemClock>::new().with_config(scenario.config);
    run_scenario_with(scenario, &reducer)
}

/// Play a scenario's round to completion with the given reducer.
///
/// # Errors
///
/// Fails if the scenario's catalog or programs are invalid.
pub fn run_scenario_with<C: Clock>(
    scenario: &Scenario,
    reducer: &Reducer<C>,
) -> Result<RoundReport, ScenarioError> {
    let Transition { mut state, mut events } = scenario.planned(reducer)?;

    let started = reducer.apply(&state, &GameIntent::StartRound);
    state = started.state;
    events.extend(started.events);

    while state.round.is_resolving() {
        let step = reducer.apply(&state, &GameIntent::ContinueResolution);
        // An ignored continue means the round cannot move; stop rather than spin.
        if step.state == state {
            break;
        }
        state = step.state;
        events.extend(step.events);
    }

    info!(
        scenario = %scenario.id,
        steps = state.log.len(),
        "scenario resolved"
    );

    Ok(RoundReport {
        scenario_id: scenario.id.clone(),
        order: state.round.order.clone(),
        steps_confirmed: state.log.len(),
        events,
        state,
    })
}
