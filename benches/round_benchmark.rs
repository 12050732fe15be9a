//! Benchmarks for resolving complete rounds.
//!
//! The hot path is `next_frame_steps`, which rescans programs on every frame
//! advance.

#![allow(missing_docs)]

use std::hint::black_box;

use cadence::cards::CardCatalog;
use cadence::engine::{compute_initiative_order, next_frame_steps, FixedClock, Reducer};
use cadence::game::{GameIntent, GameState, PlayerState, ProgramBuilder};
use criterion::{Criterion, criterion_group, criterion_main};

/// A planning game with `seats` players cycling through the sample cards.
fn planned_game(seats: usize) -> GameState {
    let catalog = CardCatalog::sample();
    let rotations = ["rotation-pivot", "rotation-about-face"];
    let movements = ["movement-veilstep", "movement-advance"];
    let abilities = ["ability-frostline", "ability-pivot-spiral", "ability-bastion"];

    let players = (0..seats)
        .map(|i| PlayerState::new(format!("p{i}"), format!("Player {i}")))
        .collect();
    let mut game = GameState::new("bench", players);

    for i in 0..seats {
        let mut builder = ProgramBuilder::new(format!("p{i}"));
        if let Some(card) = catalog.get(rotations[i % rotations.len()]) {
            builder = builder.rotation(card);
        }
        if let Some(card) = catalog.get(movements[i % movements.len()]) {
            builder = builder.movement(card);
        }
        if let Some(card) = catalog.get(abilities[i % abilities.len()]) {
            builder = builder.ability(card);
        }
        let program = builder.build();
        game.programs_by_player.insert(program.player_id.clone(), program);
    }
    game
}

fn resolve_round(reducer: &Reducer<FixedClock>, game: &GameState) -> GameState {
    let mut state = reducer.apply(game, &GameIntent::StartRound).state;
    while state.round.is_resolving() {
        state = reducer.apply(&state, &GameIntent::ContinueResolution).state;
    }
    state
}

fn bench_round_2p(c: &mut Criterion) {
    let reducer = Reducer::with_clock(FixedClock(0));
    let game = planned_game(2);

    c.bench_function("round_2p", |b| {
        b.iter(|| black_box(resolve_round(&reducer, black_box(&game))));
    });
}

fn bench_round_8p(c: &mut Criterion) {
    let reducer = Reducer::with_clock(FixedClock(0));
    let game = planned_game(8);

    c.bench_function("round_8p", |b| {
        b.iter(|| black_box(resolve_round(&reducer, black_box(&game))));
    });
}

fn bench_initiative_order(c: &mut Criterion) {
    let game = planned_game(8);

    c.bench_function("initiative_order_8p", |b| {
        b.iter(|| {
            black_box(compute_initiative_order(
                black_box(&game.players),
                black_box(&game.programs_by_player),
            ))
        });
    });
}

fn bench_frame_scan(c: &mut Criterion) {
    let game = planned_game(8);

    c.bench_function("next_frame_steps_from_4", |b| {
        b.iter(|| black_box(next_frame_steps(black_box(&game), black_box(4))));
    });
}

criterion_group!(
    benches,
    bench_round_2p,
    bench_round_8p,
    bench_initiative_order,
    bench_frame_scan
);
criterion_main!(benches);
