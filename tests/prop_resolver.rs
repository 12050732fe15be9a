//! Property-based tests for initiative ordering and round resolution.
//!
//! Run with: cargo test --release prop_resolver

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use cadence::cards::{Frame, SymbolInstance, SymbolKind};
use cadence::engine::{
    compute_initiative_order, frame_symbols, initiative_score, max_frame_index, next_frame_steps,
    FixedClock, Reducer,
};
use cadence::game::{
    check_invariants, GameEvent, GameIntent, GameState, PlannedProgram, PlayerState,
    ProgramCardRef, ProgramCards, RoundStatus, Slot,
};

fn symbol_kind() -> impl Strategy<Value = SymbolKind> {
    prop::sample::select(SymbolKind::ALL.to_vec())
}

fn frame(card_id: String) -> impl Strategy<Value = Frame> {
    (0u32..8, prop::collection::vec(symbol_kind(), 0..3)).prop_map(move |(index, kinds)| {
        Frame::new(
            format!("{card_id}-f{index}"),
            index,
            kinds.into_iter().map(SymbolInstance::new).collect(),
        )
    })
}

fn card_ref(card_id: &'static str) -> impl Strategy<Value = ProgramCardRef> {
    (-5i32..10, prop::collection::vec(frame(card_id.to_string()), 0..4)).prop_map(
        move |(initiative, frames)| ProgramCardRef {
            card_id: card_id.into(),
            initiative,
            frames,
        },
    )
}

fn program_cards() -> impl Strategy<Value = ProgramCards> {
    (
        prop::option::of(card_ref("rot")),
        prop::option::of(card_ref("mov")),
        prop::option::of(card_ref("abl")),
    )
        .prop_map(|(rotation, movement, ability)| ProgramCards {
            rotation,
            movement,
            ability,
        })
}

/// A planning game with 1-5 seated players, each possibly with a program.
fn planned_game() -> impl Strategy<Value = GameState> {
    prop::collection::vec(prop::option::of(program_cards()), 1..6).prop_map(|seats| {
        let players = (0..seats.len())
            .map(|i| PlayerState::new(format!("p{i}"), ""))
            .collect();
        let mut game = GameState::new("prop", players);
        for (i, cards) in seats.into_iter().enumerate() {
            if let Some(cards) = cards {
                let player_id = format!("p{i}");
                game.programs_by_player
                    .insert(player_id.clone(), PlannedProgram { player_id, cards });
            }
        }
        game
    })
}

/// Number of (player, frame) pairs with at least one symbol, frames 1..=max.
fn acting_pairs(game: &GameState) -> usize {
    let max = max_frame_index(&game.programs_by_player);
    game.programs_by_player
        .values()
        .map(|program| {
            (1..=max)
                .filter(|&f| !frame_symbols(program, f).is_empty())
                .count()
        })
        .sum()
}

fn run_round(r: &Reducer<FixedClock>, game: &GameState) -> (GameState, Vec<GameEvent>) {
    let t = r.apply(game, &GameIntent::StartRound);
    let mut state = t.state;
    let mut events = t.events;
    while state.round.is_resolving() {
        let t = r.apply(&state, &GameIntent::ContinueResolution);
        state = t.state;
        events.extend(t.events);
    }
    (state, events)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Order is a permutation of the seats, sorted by score, seats breaking ties.
    #[test]
    fn prop_initiative_order_is_deterministic(game in planned_game()) {
        let order = compute_initiative_order(&game.players, &game.programs_by_player);
        let again = compute_initiative_order(&game.players, &game.programs_by_player);
        prop_assert_eq!(&order, &again);
        prop_assert_eq!(order.len(), game.players.len());

        for pair in order.windows(2) {
            let a = initiative_score(game.program(&pair[0]));
            let b = initiative_score(game.program(&pair[1]));
            prop_assert!(a >= b);
            if a == b {
                prop_assert!(game.seat_of(&pair[0]) < game.seat_of(&pair[1]));
            }
        }
    }

    /// Frame symbols are always rotation ++ movement ++ ability.
    #[test]
    fn prop_slot_precedence(cards in program_cards(), frame_index in 0u32..8) {
        let program = PlannedProgram { player_id: "p".into(), cards };
        let mut expected = Vec::new();
        for slot in Slot::ORDER {
            if let Some(card) = program.cards.get(slot) {
                for f in card.frames_at(frame_index) {
                    expected.extend(f.symbols.iter().cloned());
                }
            }
        }
        prop_assert_eq!(frame_symbols(&program, frame_index), expected);
    }

    /// Frame batches are never empty and never exceed the last frame.
    #[test]
    fn prop_next_frame_never_empty(game in planned_game(), start in 0u32..10) {
        let max = max_frame_index(&game.programs_by_player);
        match next_frame_steps(&game, start) {
            Some(batch) => {
                prop_assert!(!batch.steps.is_empty());
                prop_assert!(batch.frame_index >= start);
                prop_assert!(batch.frame_index <= max);
                prop_assert!(batch.steps.iter().all(|s| s.frame_index == batch.frame_index));
            }
            None => {
                for f in start..=max {
                    for program in game.programs_by_player.values() {
                        prop_assert!(frame_symbols(program, f).is_empty());
                    }
                }
            }
        }
    }

    /// A full round confirms exactly one step per acting (player, frame) pair.
    #[test]
    fn prop_step_count_conservation(game in planned_game()) {
        let r = Reducer::with_clock(FixedClock(0));
        let (state, events) = run_round(&r, &game);

        prop_assert_eq!(state.round.status, RoundStatus::Ended);
        prop_assert_eq!(state.log.len(), acting_pairs(&game));
        let ended = events.iter().filter(|e| **e == GameEvent::RoundEnded).count();
        prop_assert_eq!(ended, 1);
        prop_assert!(check_invariants(&state).is_empty());
    }

    /// CONTINUE outside resolving leaves the state alone and says nothing.
    #[test]
    fn prop_continue_noop_outside_resolving(game in planned_game(), end_first in any::<bool>()) {
        let r = Reducer::with_clock(FixedClock(0));
        let state = if end_first {
            r.apply(&game, &GameIntent::EndRound).state
        } else {
            game
        };
        let t = r.apply(&state, &GameIntent::ContinueResolution);
        prop_assert!(t.events.is_empty());
        prop_assert_eq!(t.state, state);
    }

    /// RESET always lands in a clean planning round.
    #[test]
    fn prop_reset_returns_to_planning(game in planned_game(), confirms in 0usize..6) {
        let r = Reducer::with_clock(FixedClock(0));
        let mut state = r.apply(&game, &GameIntent::StartRound).state;
        for _ in 0..confirms {
            state = r.apply(&state, &GameIntent::ContinueResolution).state;
        }
        let t = r.apply(&state, &GameIntent::ResetRound);
        prop_assert!(t.events.is_empty());
        prop_assert!(t.state.programs_by_player.is_empty());
        prop_assert!(t.state.log.is_empty());
        prop_assert_eq!(t.state.round.status, RoundStatus::Planning);
        prop_assert!(check_invariants(&t.state).is_empty());
    }
}
