//! Pure resolution functions: initiative, frame symbols, frame batches.
//!
//! Nothing here mutates state. The reducer calls these to decide what the
//! next batch of steps is; hosts may call them directly for previews.

use std::collections::BTreeSet;

use crate::cards::SymbolInstance;
use crate::game::{
    GameState, PlannedProgram, PlayerId, PlayerState, ProgramsByPlayer, ResolvedFrameStep,
    SourceCardIds,
};

/// The steps of the next frame that has any action.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBatch {
    /// Frame the steps fire at.
    pub frame_index: u32,
    /// Steps in initiative order, never empty.
    pub steps: Vec<ResolvedFrameStep>,
}

/// Total initiative of a program; a missing program or slot counts as 0.
#[must_use]
pub fn initiative_score(program: Option<&PlannedProgram>) -> i64 {
    program.map_or(0, |p| {
        p.cards
            .iter()
            .map(|(_, card)| i64::from(card.initiative))
            .sum()
    })
}

/// Order players by descending initiative score.
///
/// Equal scores keep seat order (position in `players`), so the result only
/// depends on the inputs, never on map iteration order.
#[must_use]
pub fn compute_initiative_order(players: &[PlayerState], programs: &ProgramsByPlayer) -> Vec<PlayerId> {
    let mut scored: Vec<(i64, &PlayerId)> = players
        .iter()
        .map(|p| (initiative_score(programs.get(&p.id)), &p.id))
        .collect();

    // Stable sort: ties stay in seat order.
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored.into_iter().map(|(_, id)| id.clone()).collect()
}

/// Symbols a program fires at `frame_index`.
///
/// Slots are visited rotation, movement, ability. Within a slot every frame
/// with a matching index contributes, in declaration order.
#[must_use]
pub fn frame_symbols(program: &PlannedProgram, frame_index: u32) -> Vec<SymbolInstance> {
    program
        .cards
        .iter()
        .flat_map(|(_, card)| card.frames_at(frame_index))
        .flat_map(|frame| frame.symbols.iter().cloned())
        .collect()
}

/// Cards of a program that contribute at least one symbol at `frame_index`.
#[must_use]
pub fn frame_source_cards(program: &PlannedProgram, frame_index: u32) -> SourceCardIds {
    let mut sources = SourceCardIds::default();
    for (slot, card) in program.cards.iter() {
        if card.frames_at(frame_index).any(|f| !f.symbols.is_empty()) {
            sources.set(slot, card.card_id.clone());
        }
    }
    sources
}

fn resolve_frame_in_order(
    order: &[PlayerId],
    programs: &ProgramsByPlayer,
    frame_index: u32,
) -> Vec<ResolvedFrameStep> {
    order
        .iter()
        .filter_map(|player_id| {
            let program = programs.get(player_id)?;
            let symbols = frame_symbols(program, frame_index);
            if symbols.is_empty() {
                return None;
            }
            Some(ResolvedFrameStep {
                frame_index,
                player_id: player_id.clone(),
                source_card_ids: frame_source_cards(program, frame_index),
                symbols,
            })
        })
        .collect()
}

/// Steps of every acting player at `frame_index`, in initiative order.
///
/// Players without symbols at this frame contribute no step, so the result
/// may be empty.
#[must_use]
pub fn resolve_frame(
    players: &[PlayerState],
    programs: &ProgramsByPlayer,
    frame_index: u32,
) -> Vec<ResolvedFrameStep> {
    let order = compute_initiative_order(players, programs);
    resolve_frame_in_order(&order, programs, frame_index)
}

/// Highest frame index across every submitted card, or 0.
#[must_use]
pub fn max_frame_index(programs: &ProgramsByPlayer) -> u32 {
    programs
        .values()
        .flat_map(|p| p.cards.iter())
        .map(|(_, card)| card.max_frame_index())
        .max()
        .unwrap_or(0)
}

/// Distinct indices of frames that carry at least one symbol.
#[must_use]
pub fn acting_frame_indices(programs: &ProgramsByPlayer) -> BTreeSet<u32> {
    programs
        .values()
        .flat_map(|p| p.cards.iter())
        .flat_map(|(_, card)| card.frames.iter())
        .filter(|frame| !frame.symbols.is_empty())
        .map(|frame| frame.index)
        .collect()
}

/// First frame at or after `start_frame_index` where anyone acts.
///
/// Only indices that some submitted frame declares are visited, so sparse
/// timelines cost nothing for the gaps. Returns `None` once no declared
/// frame remains.
#[must_use]
pub fn next_frame_steps(state: &GameState, start_frame_index: u32) -> Option<FrameBatch> {
    let indices = acting_frame_indices(&state.programs_by_player);
    let order = compute_initiative_order(&state.players, &state.programs_by_player);

    indices.range(start_frame_index..).find_map(|&frame_index| {
        let steps = resolve_frame_in_order(&order, &state.programs_by_player, frame_index);
        (!steps.is_empty()).then_some(FrameBatch { frame_index, steps })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Frame, SymbolKind};
    use crate::game::{ProgramBuilder, ProgramCardRef, Slot};

    fn card(id: &str, initiative: i32, frames: &[(u32, &[SymbolKind])]) -> ProgramCardRef {
        ProgramCardRef {
            card_id: id.into(),
            initiative,
            frames: frames
                .iter()
                .map(|(index, kinds)| {
                    Frame::new(
                        format!("{id}-f{index}"),
                        *index,
                        kinds.iter().map(|k| SymbolInstance::new(*k)).collect(),
                    )
                })
                .collect(),
        }
    }

    fn players(ids: &[&str]) -> Vec<PlayerState> {
        ids.iter().map(|id| PlayerState::new(*id, "")).collect()
    }

    fn kinds(symbols: &[SymbolInstance]) -> Vec<SymbolKind> {
        symbols.iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_score_counts_missing_as_zero() {
        assert_eq!(initiative_score(None), 0);
        let program = ProgramBuilder::new("p")
            .card(Slot::Movement, card("m", 3, &[]))
            .card(Slot::Ability, card("a", 2, &[]))
            .build();
        assert_eq!(initiative_score(Some(&program)), 5);
    }

    #[test]
    fn test_order_by_descending_score() {
        let mut programs = ProgramsByPlayer::new();
        programs.insert(
            "b".into(),
            ProgramBuilder::new("b").card(Slot::Ability, card("x", 4, &[])).build(),
        );
        let order = compute_initiative_order(&players(&["a", "b"]), &programs);
        assert_eq!(order, vec!["b", "a"]);
    }

    #[test]
    fn test_ties_keep_seat_order() {
        let mut programs = ProgramsByPlayer::new();
        // "a" sorts first in the map, but "z" is seated first.
        for id in ["a", "z"] {
            programs.insert(
                id.into(),
                ProgramBuilder::new(id).card(Slot::Movement, card("m", 4, &[])).build(),
            );
        }
        let order = compute_initiative_order(&players(&["z", "a"]), &programs);
        assert_eq!(order, vec!["z", "a"]);
    }

    #[test]
    fn test_negative_initiative_sorts_last() {
        let mut programs = ProgramsByPlayer::new();
        programs.insert(
            "a".into(),
            ProgramBuilder::new("a").card(Slot::Rotation, card("r", -1, &[])).build(),
        );
        let order = compute_initiative_order(&players(&["a", "b"]), &programs);
        assert_eq!(order, vec!["b", "a"]);
    }

    #[test]
    fn test_frame_symbols_slot_precedence() {
        // Built ability-first; resolution order must still be rotation first.
        let program = ProgramBuilder::new("p")
            .card(Slot::Ability, card("a", 0, &[(1, &[SymbolKind::Attack])]))
            .card(Slot::Movement, card("m", 0, &[(1, &[SymbolKind::Move])]))
            .card(Slot::Rotation, card("r", 0, &[(1, &[SymbolKind::Rotate])]))
            .build();
        assert_eq!(
            kinds(&frame_symbols(&program, 1)),
            vec![SymbolKind::Rotate, SymbolKind::Move, SymbolKind::Attack]
        );
    }

    #[test]
    fn test_frame_symbols_concatenates_duplicate_frames() {
        let program = ProgramBuilder::new("p")
            .card(
                Slot::Movement,
                card(
                    "m",
                    0,
                    &[
                        (2, &[SymbolKind::Jump]),
                        (1, &[SymbolKind::Wait]),
                        (2, &[SymbolKind::Move, SymbolKind::Combo]),
                    ],
                ),
            )
            .build();
        assert_eq!(
            kinds(&frame_symbols(&program, 2)),
            vec![SymbolKind::Jump, SymbolKind::Move, SymbolKind::Combo]
        );
        assert!(frame_symbols(&program, 7).is_empty());
    }

    #[test]
    fn test_source_cards_only_list_contributors() {
        let program = ProgramBuilder::new("p")
            .card(Slot::Rotation, card("r", 0, &[(2, &[SymbolKind::Rotate])]))
            .card(Slot::Movement, card("m", 0, &[(1, &[SymbolKind::Move])]))
            .build();
        let sources = frame_source_cards(&program, 1);
        assert_eq!(sources.movement.as_deref(), Some("m"));
        assert!(sources.rotation.is_none());
        assert!(sources.ability.is_none());
    }

    #[test]
    fn test_resolve_frame_skips_idle_players() {
        let mut programs = ProgramsByPlayer::new();
        programs.insert(
            "a".into(),
            ProgramBuilder::new("a")
                .card(Slot::Movement, card("m", 1, &[(1, &[SymbolKind::Move])]))
                .build(),
        );
        programs.insert(
            "b".into(),
            ProgramBuilder::new("b")
                .card(Slot::Movement, card("m", 9, &[(2, &[SymbolKind::Move])]))
                .build(),
        );
        let steps = resolve_frame(&players(&["a", "b", "c"]), &programs, 1);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].player_id, "a");
        assert!(resolve_frame(&players(&["a", "b"]), &programs, 3).is_empty());
    }

    #[test]
    fn test_next_frame_steps_skips_dead_frames() {
        let mut state = GameState::new("g", players(&["a", "b"]));
        state.programs_by_player.insert(
            "a".into(),
            ProgramBuilder::new("a")
                .card(Slot::Ability, card("x", 0, &[(5, &[SymbolKind::Block])]))
                .build(),
        );
        state.programs_by_player.insert(
            "b".into(),
            ProgramBuilder::new("b")
                .card(
                    Slot::Movement,
                    card("m", 0, &[(1, &[SymbolKind::Move]), (2, &[SymbolKind::Wait])]),
                )
                .build(),
        );

        assert_eq!(max_frame_index(&state.programs_by_player), 5);
        assert_eq!(next_frame_steps(&state, 1).unwrap().frame_index, 1);
        assert_eq!(next_frame_steps(&state, 2).unwrap().frame_index, 2);
        let batch = next_frame_steps(&state, 3).unwrap();
        assert_eq!(batch.frame_index, 5);
        assert_eq!(batch.steps[0].player_id, "a");
        assert!(next_frame_steps(&state, 6).is_none());
    }

    #[test]
    fn test_next_frame_steps_without_programs() {
        let state = GameState::new("g", players(&["a"]));
        assert_eq!(max_frame_index(&state.programs_by_player), 0);
        assert!(next_frame_steps(&state, 1).is_none());
    }

    #[test]
    fn test_frames_with_empty_symbol_lists_are_dead() {
        let mut state = GameState::new("g", players(&["a"]));
        state.programs_by_player.insert(
            "a".into(),
            ProgramBuilder::new("a")
                .card(Slot::Movement, card("m", 0, &[(1, &[]), (3, &[SymbolKind::Move])]))
                .build(),
        );
        assert_eq!(next_frame_steps(&state, 1).unwrap().frame_index, 3);
    }

    #[test]
    fn test_next_frame_steps_jumps_large_gaps() {
        let mut state = GameState::new("g", players(&["a"]));
        state.programs_by_player.insert(
            "a".into(),
            ProgramBuilder::new("a")
                .card(
                    Slot::Movement,
                    card("m", 0, &[(1, &[SymbolKind::Move]), (20_000_000, &[SymbolKind::Wait])]),
                )
                .build(),
        );
        assert_eq!(next_frame_steps(&state, 2).unwrap().frame_index, 20_000_000);
        assert!(next_frame_steps(&state, 20_000_001).is_none());
    }

    #[test]
    fn test_next_frame_steps_reaches_last_index() {
        let mut state = GameState::new("g", players(&["a"]));
        state.programs_by_player.insert(
            "a".into(),
            ProgramBuilder::new("a")
                .card(Slot::Ability, card("x", 0, &[(1, &[SymbolKind::Block]), (u32::MAX, &[SymbolKind::Refresh])]))
                .build(),
        );
        let indices = acting_frame_indices(&state.programs_by_player);
        assert_eq!(indices.into_iter().collect::<Vec<_>>(), vec![1, u32::MAX]);
        assert_eq!(next_frame_steps(&state, 2).unwrap().frame_index, u32::MAX);
    }
}
