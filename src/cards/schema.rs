//! Per-card schema checks that serde's typed decoding cannot express.
//!
//! Symbol parameters are a free-form map on the wire, so which keys each
//! symbol kind needs is checked here. Every problem is collected; nothing
//! stops at the first one.

use std::fmt;

use crate::cards::{CardDef, CardKind, Primitive, SymbolInstance, SymbolKind};
use crate::game::CardId;
use crate::hex::RelativeDirection;

const DIRECTIONS: &str = "F | FL | FR | B | BL | BR";
const ATTACK_PATTERNS: [&str; 3] = ["frontArc", "adjacent", "custom"];

/// One schema problem, addressed by a path into the card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Card the problem was found on.
    pub card_id: CardId,
    /// Location inside the card, e.g. `frames[0].symbols[1].params.distance`.
    pub path: String,
    /// What the location should hold.
    pub expected: String,
    /// JSON type found there, `undefined` when missing.
    pub received: &'static str,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} expected {}, got {}",
            self.card_id, self.path, self.expected, self.received
        )
    }
}

fn type_name(value: Option<&Primitive>) -> &'static str {
    match value {
        None => "undefined",
        Some(Primitive::Bool(_)) => "boolean",
        Some(Primitive::Int(_) | Primitive::Float(_)) => "number",
        Some(Primitive::Text(_)) => "string",
    }
}

fn is_number(value: Option<&Primitive>) -> bool {
    match value {
        Some(Primitive::Int(_)) => true,
        Some(Primitive::Float(x)) => x.is_finite(),
        _ => false,
    }
}

fn text(value: Option<&Primitive>) -> Option<&str> {
    match value {
        Some(Primitive::Text(s)) => Some(s),
        _ => None,
    }
}

fn is_direction(value: Option<&Primitive>) -> bool {
    text(value).and_then(RelativeDirection::parse).is_some()
}

/// Collects violations for one card.
struct Checker<'a> {
    card_id: &'a str,
    violations: Vec<SchemaViolation>,
}

impl Checker<'_> {
    fn report(&mut self, path: String, expected: impl Into<String>, received: &'static str) {
        self.violations.push(SchemaViolation {
            card_id: self.card_id.to_string(),
            path,
            expected: expected.into(),
            received,
        });
    }

    fn require(&mut self, symbol: &SymbolInstance, path: &str, key: &str, ok: bool, expected: &str) {
        if !ok {
            let received = type_name(symbol.param(key));
            self.report(format!("{path}.params.{key}"), expected, received);
        }
    }

    fn check_symbol(&mut self, symbol: &SymbolInstance, path: &str) {
        let param = |key: &str| symbol.param(key);
        match symbol.id {
            SymbolKind::Wait
            | SymbolKind::TextActive
            | SymbolKind::TextPassive
            | SymbolKind::Concentration
            | SymbolKind::Combo
            | SymbolKind::Refresh => {
                if !symbol.params.is_empty() {
                    self.report(format!("{path}.params"), "no params", "object");
                }
            }
            SymbolKind::Move | SymbolKind::Jump => {
                self.require(symbol, path, "direction", is_direction(param("direction")), DIRECTIONS);
                self.require(symbol, path, "distance", is_number(param("distance")), "number");
            }
            SymbolKind::Attack | SymbolKind::Charge => {
                let ok = text(param("pattern")).is_some_and(|p| ATTACK_PATTERNS.contains(&p));
                self.require(symbol, path, "pattern", ok, "frontArc | adjacent | custom");
            }
            SymbolKind::Block => {
                self.require(symbol, path, "edge", is_direction(param("edge")), DIRECTIONS);
            }
            SymbolKind::Rotate => {
                let steps = param("steps");
                self.require(symbol, path, "steps", steps.is_none() || is_number(steps), "number");
            }
            SymbolKind::WithText => {
                let kind_ok = matches!(text(param("kind")), Some("active" | "passive"));
                self.require(symbol, path, "kind", kind_ok, "active | passive");
                let inner_ok = text(param("inner"))
                    .and_then(|id| id.parse::<SymbolKind>().ok())
                    .is_some_and(|inner| inner != SymbolKind::WithText);
                self.require(symbol, path, "inner", inner_ok, "symbol id other than WITH_TEXT");
            }
        }
    }
}

/// Check one card, returning every violation found.
///
/// Ability cards must carry `damage` and `knockbackFactor`; symbol
/// parameters must match their kind. Paths index frames in declaration
/// order.
#[must_use]
pub fn validate_card(card: &CardDef) -> Vec<SchemaViolation> {
    let mut checker = Checker {
        card_id: &card.id,
        violations: Vec::new(),
    };

    if card.kind == CardKind::Ability {
        if card.damage.is_none() {
            checker.report("damage".into(), "number", "undefined");
        }
        if card.knockback_factor.is_none() {
            checker.report("knockbackFactor".into(), "number", "undefined");
        }
    }

    for (i, frame) in card.frames.iter().enumerate() {
        for (j, symbol) in frame.symbols.iter().enumerate() {
            checker.check_symbol(symbol, &format!("frames[{i}].symbols[{j}]"));
        }
    }

    checker.violations
}

/// Check every card, concatenating violations in card order.
#[must_use]
pub fn validate_cards(cards: &[CardDef]) -> Vec<SchemaViolation> {
    cards.iter().flat_map(validate_card).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{sample_cards, Frame};

    fn card(kind: CardKind, symbols: Vec<SymbolInstance>) -> CardDef {
        CardDef::new("c", "C", kind, 0, vec![Frame::new("c-f1", 1, symbols)])
    }

    fn paths(violations: &[SchemaViolation]) -> Vec<&str> {
        violations.iter().map(|v| v.path.as_str()).collect()
    }

    #[test]
    fn test_sample_cards_are_valid() {
        assert_eq!(validate_cards(&sample_cards()), vec![]);
    }

    #[test]
    fn test_move_without_params() {
        let violations = validate_card(&card(CardKind::Movement, vec![SymbolInstance::new(SymbolKind::Move)]));
        assert_eq!(
            paths(&violations),
            vec!["frames[0].symbols[0].params.direction", "frames[0].symbols[0].params.distance"]
        );
        assert_eq!(
            violations[0].to_string(),
            "[c] frames[0].symbols[0].params.direction expected F | FL | FR | B | BL | BR, got undefined"
        );
    }

    #[test]
    fn test_wrong_param_types() {
        let symbols = vec![
            SymbolInstance::new(SymbolKind::Jump)
                .with_param("direction", "NORTH")
                .with_param("distance", "far"),
            SymbolInstance::new(SymbolKind::Block).with_param("edge", true),
        ];
        let violations = validate_card(&card(CardKind::Movement, symbols));
        let rendered: Vec<String> = violations.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "[c] frames[0].symbols[0].params.direction expected F | FL | FR | B | BL | BR, got string",
                "[c] frames[0].symbols[0].params.distance expected number, got string",
                "[c] frames[0].symbols[1].params.edge expected F | FL | FR | B | BL | BR, got boolean",
            ]
        );
    }

    #[test]
    fn test_attack_pattern() {
        let ok = SymbolInstance::new(SymbolKind::Charge).with_param("pattern", "custom");
        let bad = SymbolInstance::new(SymbolKind::Attack).with_param("power", 2);
        let mut c = card(CardKind::Ability, vec![ok, bad]);
        c = c.with_damage(1, 1.0);
        assert_eq!(paths(&validate_card(&c)), vec!["frames[0].symbols[1].params.pattern"]);
    }

    #[test]
    fn test_markers_take_no_params() {
        let symbols = vec![
            SymbolInstance::new(SymbolKind::Wait),
            SymbolInstance::new(SymbolKind::Refresh).with_param("amount", 1),
        ];
        let violations = validate_card(&card(CardKind::Utility, symbols));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "frames[0].symbols[1].params");
        assert_eq!(violations[0].expected, "no params");
    }

    #[test]
    fn test_with_text_inner() {
        let nested = SymbolInstance::new(SymbolKind::WithText)
            .with_param("inner", "WITH_TEXT")
            .with_param("kind", "hidden");
        assert_eq!(
            paths(&validate_card(&card(CardKind::Movement, vec![nested]))),
            vec!["frames[0].symbols[0].params.kind", "frames[0].symbols[0].params.inner"]
        );
    }

    #[test]
    fn test_rotate_steps_optional() {
        let bare = card(CardKind::Rotation, vec![SymbolInstance::new(SymbolKind::Rotate)]);
        assert!(validate_card(&bare).is_empty());
        let bad = card(
            CardKind::Rotation,
            vec![SymbolInstance::new(SymbolKind::Rotate).with_param("steps", "two")],
        );
        assert_eq!(validate_card(&bad).len(), 1);
    }

    #[test]
    fn test_ability_needs_damage_fields() {
        let violations = validate_card(&card(CardKind::Ability, vec![]));
        assert_eq!(paths(&violations), vec!["damage", "knockbackFactor"]);
        assert!(validate_card(&card(CardKind::Movement, vec![])).is_empty());
    }

    #[test]
    fn test_violations_across_cards_are_all_kept() {
        let a = card(CardKind::Ability, vec![SymbolInstance::new(SymbolKind::Move)]);
        let b = card(CardKind::Movement, vec![SymbolInstance::new(SymbolKind::Block)]);
        assert_eq!(validate_cards(&[a, b]).len(), 5);
    }
}
