//! The intent reducer: `(state, intent) -> (state', events)`.
//!
//! Every transition is total. An intent that does not apply in the current
//! round status leaves the state untouched and, unless diagnostics are on,
//! emits nothing.

use tracing::{debug, info};

use crate::engine::clock::{Clock, SystemClock};
use crate::engine::config::EngineConfig;
use crate::engine::resolver::{compute_initiative_order, next_frame_steps, FrameBatch};
use crate::game::{
    GameEvent, GameIntent, GameState, PlannedProgram, PlayerId, ResolutionLogEntry, RoundState,
    RoundStatus,
};

/// Result of applying one intent.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// The new state.
    pub state: GameState,
    /// Events emitted by the transition, in order.
    pub events: Vec<GameEvent>,
}

impl Transition {
    fn quiet(state: GameState) -> Self {
        Self {
            state,
            events: Vec::new(),
        }
    }
}

/// Applies intents to game states.
///
/// The reducer owns no game state. It carries the clock used to stamp log
/// entries and the engine configuration.
#[derive(Debug, Clone, Default)]
pub struct Reducer<C: Clock = SystemClock> {
    clock: C,
    config: EngineConfig,
}

impl Reducer<SystemClock> {
    /// Reducer stamping log entries with wall clock time.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> Reducer<C> {
    /// Reducer stamping log entries with `clock`.
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            config: EngineConfig::default(),
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Apply one intent.
    ///
    /// The input state is never modified.
    #[must_use]
    pub fn apply(&self, state: &GameState, intent: &GameIntent) -> Transition {
        match intent {
            GameIntent::SelectHex { hex, .. } => {
                let mut next = state.clone();
                next.selection.selected_hex = *hex;
                Transition::quiet(next)
            }
            GameIntent::SelectCard { card_id, .. } => {
                let mut next = state.clone();
                next.selection.selected_card_id = card_id.clone();
                next.selection.selected_frame_index = None;
                Transition::quiet(next)
            }
            GameIntent::SelectFrame { frame_index, .. } => {
                let mut next = state.clone();
                next.selection.selected_frame_index = *frame_index;
                Transition::quiet(next)
            }
            GameIntent::SubmitProgram { player_id, program } => {
                self.submit_program(state, intent, player_id, program)
            }
            GameIntent::StartRound => self.start_round(state, intent),
            GameIntent::ContinueResolution => self.continue_resolution(state, intent),
            GameIntent::EndRound => self.end_round(state, intent),
            GameIntent::ResetRound => reset_round(state),
            GameIntent::EndTurn { .. } => self.ignore(state, intent, "reserved"),
        }
    }

    /// Apply intents in order, collecting every event.
    #[must_use]
    pub fn apply_all<'a>(
        &self,
        state: &GameState,
        intents: impl IntoIterator<Item = &'a GameIntent>,
    ) -> Transition {
        let mut current = Transition::quiet(state.clone());
        for intent in intents {
            let Transition { state, events } = self.apply(&current.state, intent);
            current.state = state;
            current.events.extend(events);
        }
        current
    }

    fn ignore(&self, state: &GameState, intent: &GameIntent, reason: &str) -> Transition {
        debug!(
            intent = intent.name(),
            status = ?state.round.status,
            reason,
            "intent ignored"
        );
        let mut transition = Transition::quiet(state.clone());
        if self.config.diagnostics {
            transition.events.push(GameEvent::Info {
                msg: Some(format!("{} ignored: {reason}", intent.name())),
                at: Some(state.round.frame_index),
            });
        }
        transition
    }

    fn submit_program(
        &self,
        state: &GameState,
        intent: &GameIntent,
        player_id: &PlayerId,
        program: &PlannedProgram,
    ) -> Transition {
        if state.round.status != RoundStatus::Planning {
            return self.ignore(state, intent, "programs are locked outside planning");
        }

        let mut next = state.clone();
        next.programs_by_player
            .insert(player_id.clone(), program.clone());
        debug!(player = %player_id, "program stored");

        Transition {
            state: next,
            events: vec![GameEvent::ProgramSubmitted {
                player_id: player_id.clone(),
            }],
        }
    }

    fn start_round(&self, state: &GameState, intent: &GameIntent) -> Transition {
        if state.round.status != RoundStatus::Planning {
            return self.ignore(state, intent, "round already started");
        }

        let mut next = state.clone();
        next.round.order = compute_initiative_order(&state.players, &state.programs_by_player);
        let mut events = vec![GameEvent::RoundStarted { frame_index: 1 }];

        match next_frame_steps(state, 1) {
            Some(batch) => {
                info!(
                    order = ?next.round.order,
                    frame = batch.frame_index,
                    steps = batch.steps.len(),
                    "round started"
                );
                load_batch(&mut next.round, batch);
                next.round.status = RoundStatus::Resolving;
            }
            None => {
                info!("round started with nothing to resolve");
                next.round.status = RoundStatus::Ended;
                events.push(GameEvent::RoundEnded);
            }
        }

        Transition {
            state: next,
            events,
        }
    }

    fn continue_resolution(&self, state: &GameState, intent: &GameIntent) -> Transition {
        if !state.round.is_resolving() {
            return self.ignore(state, intent, "round is not resolving");
        }
        let Some(index) = state.round.pending_index() else {
            return self.ignore(state, intent, "no pending step");
        };

        let mut next = state.clone();
        let step = &state.round.resolved_steps[index];
        next.log
            .push(ResolutionLogEntry::confirmed(step, self.clock.now_millis()));
        debug!(
            frame = step.frame_index,
            player = %step.player_id,
            symbols = step.symbols.len(),
            "step confirmed"
        );
        let mut events = vec![GameEvent::StepConfirmed {
            frame_index: step.frame_index,
            player_id: step.player_id.clone(),
        }];

        if let Some(following) = state.round.resolved_steps.get(index + 1) {
            next.round.step_cursor = index + 1;
            next.round.active_step = Some(following.key());
        } else {
            let following_frame = state
                .round
                .frame_index
                .checked_add(1)
                .and_then(|start| next_frame_steps(state, start));
            match following_frame {
                Some(batch) => {
                    let frame_index = batch.frame_index;
                    debug!(frame = frame_index, steps = batch.steps.len(), "frame advanced");
                    load_batch(&mut next.round, batch);
                    events.push(GameEvent::FrameAdvanced { frame_index });
                }
                None => {
                    info!(confirmed = next.log.len(), "round resolved");
                    next.round.status = RoundStatus::Ended;
                    next.round.active_step = None;
                    next.round.resolved_steps.clear();
                    next.round.step_cursor = 0;
                    events.push(GameEvent::RoundEnded);
                }
            }
        }

        Transition {
            state: next,
            events,
        }
    }

    fn end_round(&self, state: &GameState, intent: &GameIntent) -> Transition {
        if state.round.status == RoundStatus::Ended {
            return self.ignore(state, intent, "round already ended");
        }

        let mut next = state.clone();
        next.round.status = RoundStatus::Ended;
        next.round.active_step = None;
        info!(confirmed = next.log.len(), "round ended early");

        Transition {
            state: next,
            events: vec![GameEvent::RoundEnded],
        }
    }
}

fn load_batch(round: &mut RoundState, batch: FrameBatch) {
    round.frame_index = batch.frame_index;
    round.step_cursor = 0;
    round.active_step = batch.steps.first().map(|s| s.key());
    round.resolved_steps = batch.steps;
}

fn reset_round(state: &GameState) -> Transition {
    let mut next = state.clone();
    next.programs_by_player.clear();
    next.log.clear();
    next.round = RoundState::new();
    debug!("round reset");
    Transition::quiet(next)
}
