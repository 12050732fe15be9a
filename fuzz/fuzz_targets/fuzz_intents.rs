#![no_main]

//! Intent sequence fuzzer.
//!
//! Applies arbitrary intent sequences to a table of seated players and checks
//! after every transition that:
//! 1. The round invariants hold
//! 2. The input state was not modified
//! 3. Ignored intents leave the state unchanged and emit nothing

use arbitrary::Arbitrary;
use cadence::cards::{Frame, SymbolInstance, SymbolKind};
use cadence::engine::{FixedClock, Reducer};
use cadence::game::{
    check_invariants, GameIntent, GameState, PlannedProgram, PlayerState, ProgramCardRef, Slot,
};
use cadence::hex::Axial;
use libfuzzer_sys::fuzz_target;

/// A fuzzer-generated card.
#[derive(Arbitrary, Debug, Clone)]
struct FuzzCard {
    initiative: i8,
    /// (frame index, symbol kind indices)
    frames: Vec<(u8, Vec<u8>)>,
}

/// A fuzzer-generated intent.
#[derive(Arbitrary, Debug, Clone)]
enum FuzzIntent {
    SelectHex { seat: u8, q: i8, r: i8, clear: bool },
    SelectCard { seat: u8, card: Option<u8> },
    SelectFrame { seat: u8, frame: Option<u8> },
    Submit { seat: u8, cards: [Option<FuzzCard>; 3] },
    Start,
    Continue,
    End,
    Reset,
    EndTurn { seat: u8 },
}

/// Structured input for intent fuzzing.
#[derive(Arbitrary, Debug)]
struct IntentInput {
    /// Number of seated players.
    seats: u8,
    /// Intents to apply, in order.
    intents: Vec<FuzzIntent>,
}

fn card_ref(slot: Slot, card: &FuzzCard) -> ProgramCardRef {
    let card_id = format!("fuzz-{slot}");
    ProgramCardRef {
        card_id: card_id.clone(),
        initiative: i32::from(card.initiative),
        frames: card
            .frames
            .iter()
            .take(8)
            .map(|(index, kinds)| {
                let index = u32::from(*index % 12);
                let symbols = kinds
                    .iter()
                    .take(4)
                    .map(|k| SymbolInstance::new(SymbolKind::ALL[usize::from(*k) % SymbolKind::ALL.len()]))
                    .collect();
                Frame::new(format!("{card_id}-f{index}"), index, symbols)
            })
            .collect(),
    }
}

fn player_id(seat: u8, seats: u8) -> String {
    // One seat past the table exercises submissions from unseated players.
    format!("p{}", seat % (seats + 1))
}

fn to_intent(intent: &FuzzIntent, seats: u8) -> GameIntent {
    match intent {
        FuzzIntent::SelectHex { seat, q, r, clear } => GameIntent::SelectHex {
            player_id: player_id(*seat, seats),
            hex: (!clear).then(|| Axial::new(i32::from(*q), i32::from(*r))),
        },
        FuzzIntent::SelectCard { seat, card } => GameIntent::SelectCard {
            player_id: player_id(*seat, seats),
            card_id: card.map(|c| format!("card-{c}")),
        },
        FuzzIntent::SelectFrame { seat, frame } => GameIntent::SelectFrame {
            player_id: player_id(*seat, seats),
            frame_index: frame.map(u32::from),
        },
        FuzzIntent::Submit { seat, cards } => {
            let id = player_id(*seat, seats);
            let mut program = PlannedProgram::empty(id.clone());
            for (slot, card) in Slot::ORDER.into_iter().zip(cards) {
                program.cards.set(slot, card.as_ref().map(|c| card_ref(slot, c)));
            }
            GameIntent::SubmitProgram {
                player_id: id,
                program,
            }
        }
        FuzzIntent::Start => GameIntent::StartRound,
        FuzzIntent::Continue => GameIntent::ContinueResolution,
        FuzzIntent::End => GameIntent::EndRound,
        FuzzIntent::Reset => GameIntent::ResetRound,
        FuzzIntent::EndTurn { seat } => GameIntent::EndTurn {
            player_id: player_id(*seat, seats),
        },
    }
}

fuzz_target!(|input: IntentInput| {
    // Cap values to avoid excessive runtime
    let seats = (input.seats % 6).max(1);
    let players = (0..seats).map(|i| PlayerState::new(format!("p{i}"), "")).collect();
    let mut state = GameState::new("fuzz", players);
    let reducer = Reducer::with_clock(FixedClock(0));

    for fuzz_intent in input.intents.iter().take(256) {
        let intent = to_intent(fuzz_intent, seats);
        let before = state.clone();
        let t = reducer.apply(&state, &intent);

        assert_eq!(state, before, "input state modified by {}", intent.name());

        let violations = check_invariants(&t.state);
        assert!(
            violations.is_empty(),
            "invariants broken after {}: {violations:?}",
            intent.name()
        );

        if matches!(intent, GameIntent::ContinueResolution) && !state.round.is_resolving() {
            assert!(t.events.is_empty());
            assert_eq!(t.state, state);
        }

        state = t.state;
    }
});
