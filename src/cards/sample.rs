//! Built-in sample cards, used when a scenario ships no catalog.

use crate::cards::{CardDef, CardKind, Frame, SymbolInstance, SymbolKind};

fn sym(kind: SymbolKind) -> SymbolInstance {
    SymbolInstance::new(kind)
}

fn movement(kind: SymbolKind, direction: &str, distance: i32) -> SymbolInstance {
    SymbolInstance::new(kind)
        .with_param("direction", direction)
        .with_param("distance", distance)
}

fn frame(card: &str, index: u32, symbols: Vec<SymbolInstance>) -> Frame {
    Frame::new(format!("{card}-f{index}"), index, symbols)
}

/// The sample card set: two rotations, two movements, three abilities and a
/// utility card, including one sparse timeline.
#[must_use]
pub fn sample_cards() -> Vec<CardDef> {
    let mut frostline = CardDef::new(
        "ability-frostline",
        "Frostline Lunge",
        CardKind::Ability,
        5,
        vec![
            frame(
                "ability-frostline",
                1,
                vec![movement(SymbolKind::Move, "F", 2), sym(SymbolKind::TextActive)],
            ),
            frame(
                "ability-frostline",
                2,
                vec![
                    SymbolInstance::new(SymbolKind::Attack)
                        .with_param("pattern", "frontArc")
                        .with_param("power", 2),
                ],
            ),
            frame(
                "ability-frostline",
                3,
                vec![
                    SymbolInstance::new(SymbolKind::WithText)
                        .with_param("inner", "BLOCK")
                        .with_param("kind", "passive"),
                    sym(SymbolKind::TextPassive),
                ],
            ),
        ],
    )
    .with_rotation_allowance(1)
    .with_damage(3, 2.0);
    frostline.active_text = Some("After moving, you may rotate 60 deg toward a target.".into());
    frostline.passive_text = Some("If the attack hits, gain 1 guard.".into());

    let mut veilstep = CardDef::new(
        "movement-veilstep",
        "Veil Step",
        CardKind::Movement,
        3,
        vec![
            frame(
                "movement-veilstep",
                1,
                vec![
                    movement(SymbolKind::Jump, "FR", 1),
                    movement(SymbolKind::Move, "F", 1),
                ],
            ),
            frame("movement-veilstep", 2, vec![sym(SymbolKind::Wait)]),
            frame("movement-veilstep", 3, vec![sym(SymbolKind::TextActive)]),
        ],
    )
    .with_rotation_allowance(2);
    veilstep.active_text = Some("If you jump over a foe, draw a card.".into());

    vec![
        CardDef::new(
            "rotation-pivot",
            "Pivot",
            CardKind::Rotation,
            1,
            vec![frame(
                "rotation-pivot",
                1,
                vec![SymbolInstance::new(SymbolKind::Rotate).with_param("steps", 1)],
            )],
        )
        .with_rotation_allowance(1),
        CardDef::new(
            "rotation-about-face",
            "About Face",
            CardKind::Rotation,
            0,
            vec![
                frame(
                    "rotation-about-face",
                    1,
                    vec![SymbolInstance::new(SymbolKind::Rotate).with_param("steps", 3)],
                ),
                frame("rotation-about-face", 2, vec![sym(SymbolKind::Wait)]),
            ],
        )
        .with_rotation_allowance(3),
        veilstep,
        CardDef::new(
            "movement-advance",
            "Advance",
            CardKind::Movement,
            2,
            vec![frame(
                "movement-advance",
                1,
                vec![movement(SymbolKind::Move, "F", 2)],
            )],
        )
        .with_rotation_allowance(1),
        frostline,
        CardDef::new(
            "ability-pivot-spiral",
            "Pivot Spiral",
            CardKind::Ability,
            2,
            vec![
                frame(
                    "ability-pivot-spiral",
                    1,
                    vec![sym(SymbolKind::Concentration), sym(SymbolKind::Combo)],
                ),
                frame(
                    "ability-pivot-spiral",
                    2,
                    vec![SymbolInstance::new(SymbolKind::Charge).with_param("pattern", "adjacent")],
                ),
                frame("ability-pivot-spiral", 3, vec![sym(SymbolKind::Refresh)]),
            ],
        )
        .with_rotation_allowance(2)
        .with_damage(2, 1.0),
        CardDef::new(
            "ability-bastion",
            "Bastion",
            CardKind::Ability,
            1,
            vec![
                frame(
                    "ability-bastion",
                    2,
                    vec![SymbolInstance::new(SymbolKind::Block).with_param("edge", "F")],
                ),
                frame("ability-bastion", 5, vec![sym(SymbolKind::Refresh)]),
            ],
        )
        .with_damage(0, 0.0),
        CardDef::new(
            "utility-breather",
            "Breather",
            CardKind::Utility,
            0,
            vec![frame("utility-breather", 4, vec![sym(SymbolKind::Wait)])],
        ),
    ]
}
