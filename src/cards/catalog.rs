//! Card catalog: the lookup table programs are built from.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::cards::{sample_cards, validate_cards, CardDef, Frame};
use crate::error::CatalogError;

/// Sort frames by index and fill in missing frame ids.
///
/// The sort is stable, so frames sharing an index keep their declaration
/// order. Duplicate indices are reported but kept.
#[must_use]
pub fn normalize_frames(card_id: &str, frames: &[Frame]) -> Vec<Frame> {
    let mut ordered = frames.to_vec();
    ordered.sort_by_key(|frame| frame.index);

    let mut seen = HashSet::new();
    for frame in &mut ordered {
        if !seen.insert(frame.index) {
            warn!(card = card_id, index = frame.index, "duplicate frame index");
        }
        if frame.id.is_empty() {
            frame.id = format!("{card_id}-f{}", frame.index);
        }
    }

    ordered
}

/// A set of cards indexed by id, in load order.
#[derive(Debug, Clone, Default)]
pub struct CardCatalog {
    cards: Vec<CardDef>,
    by_id: HashMap<String, usize>,
}

impl CardCatalog {
    /// Build a catalog, normalizing each card's frames.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Schema`] with every violation if any card
    /// breaks the card schema, or [`CatalogError::DuplicateCard`] if two
    /// cards share an id.
    pub fn from_cards(cards: Vec<CardDef>) -> Result<Self, CatalogError> {
        let violations = validate_cards(&cards);
        if !violations.is_empty() {
            warn!(violations = violations.len(), "card schema check failed");
            return Err(CatalogError::Schema(violations));
        }

        let mut catalog = Self::default();
        for mut card in cards {
            if catalog.by_id.contains_key(&card.id) {
                return Err(CatalogError::DuplicateCard(card.id));
            }
            card.frames = normalize_frames(&card.id, &card.frames);
            catalog.by_id.insert(card.id.clone(), catalog.cards.len());
            catalog.cards.push(card);
        }
        debug!(cards = catalog.cards.len(), "catalog built");
        Ok(catalog)
    }

    /// The built-in sample card set.
    #[must_use]
    pub fn sample() -> Self {
        let cards = sample_cards();
        let mut by_id = HashMap::with_capacity(cards.len());
        let cards: Vec<CardDef> = cards
            .into_iter()
            .enumerate()
            .map(|(i, mut card)| {
                card.frames = normalize_frames(&card.id, &card.frames);
                by_id.insert(card.id.clone(), i);
                card
            })
            .collect();
        Self { cards, by_id }
    }

    /// Parse a JSON array of cards.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, a card breaks the schema,
    /// or ids collide.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let cards: Vec<CardDef> = serde_json::from_str(json)?;
        Self::from_cards(cards)
    }

    /// Load a JSON card file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Look up a card.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CardDef> {
        self.by_id.get(id).map(|&i| &self.cards[i])
    }

    /// Check whether a card id is known.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Cards in load order.
    pub fn iter(&self) -> impl Iterator<Item = &CardDef> {
        self.cards.iter()
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardKind, SymbolInstance, SymbolKind};
    use std::io::Write;

    fn frame(index: u32, kind: SymbolKind) -> Frame {
        Frame::new("", index, vec![SymbolInstance::new(kind)])
    }

    #[test]
    fn test_normalize_sorts_and_names_frames() {
        let frames = vec![frame(3, SymbolKind::Wait), frame(1, SymbolKind::Move)];
        let normalized = normalize_frames("dash", &frames);
        assert_eq!(normalized[0].index, 1);
        assert_eq!(normalized[0].id, "dash-f1");
        assert_eq!(normalized[1].id, "dash-f3");
    }

    #[test]
    fn test_normalize_keeps_duplicate_order() {
        let frames = vec![
            frame(2, SymbolKind::Attack),
            frame(1, SymbolKind::Move),
            frame(2, SymbolKind::Block),
        ];
        let normalized = normalize_frames("x", &frames);
        assert_eq!(normalized.len(), 3);
        assert_eq!(normalized[1].symbols[0].id, SymbolKind::Attack);
        assert_eq!(normalized[2].symbols[0].id, SymbolKind::Block);
    }

    #[test]
    fn test_duplicate_card_rejected() {
        let card = CardDef::new("a", "A", CardKind::Movement, 0, vec![]);
        let err = CardCatalog::from_cards(vec![card.clone(), card]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCard(id) if id == "a"));
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"[
            {"id": "step", "name": "Step", "kind": "movement", "priority": 2,
             "frames": [{"index": 1, "symbols": [{"id": "MOVE", "params": {"direction": "F", "distance": 1}}]}]},
            {"id": "turn", "name": "Turn", "cardType": "rotation", "rotationAllowance": 2,
             "frames": [{"index": 1, "symbols": [{"id": "ROTATE"}]}]},
            {"id": "jab", "name": "Jab", "kind": "ability", "damage": 2, "knockbackFactor": 0.5,
             "frames": [{"index": 2, "symbols": [{"id": "ATTACK", "params": {"pattern": "adjacent"}}]}]}
        ]"#;
        let catalog = CardCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("step").unwrap().priority, 2);
        assert_eq!(catalog.get("step").unwrap().rotation_allowance, 0);
        assert_eq!(catalog.get("turn").unwrap().rotation_allowance, 2);
        assert_eq!(catalog.get("jab").unwrap().damage, Some(2));
        assert_eq!(catalog.get("jab").unwrap().knockback_factor, Some(0.5));
        assert_eq!(catalog.get("turn").unwrap().kind, CardKind::Rotation);
        assert_eq!(catalog.get("turn").unwrap().priority, 0);
        assert_eq!(catalog.get("step").unwrap().frames[0].id, "step-f1");
    }

    #[test]
    fn test_unknown_symbol_in_json_rejected() {
        let json = r#"[{"id": "x", "name": "X", "kind": "ability",
            "frames": [{"index": 1, "symbols": [{"id": "TELEPORT"}]}]}]"#;
        assert!(matches!(
            CardCatalog::from_json_str(json),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn test_bad_params_reported_together() {
        let json = r#"[
            {"id": "slide", "name": "Slide", "kind": "movement",
             "frames": [{"index": 1, "symbols": [{"id": "MOVE"}]}]},
            {"id": "smash", "name": "Smash", "kind": "ability",
             "frames": [{"index": 1, "symbols": [{"id": "ATTACK", "params": {"pattern": "ring"}}]}]}
        ]"#;
        let Err(CatalogError::Schema(violations)) = CardCatalog::from_json_str(json) else {
            panic!("expected a schema error");
        };
        let lines: Vec<String> = violations.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "[slide] frames[0].symbols[0].params.direction expected F | FL | FR | B | BL | BR, got undefined",
                "[slide] frames[0].symbols[0].params.distance expected number, got undefined",
                "[smash] damage expected number, got undefined",
                "[smash] knockbackFactor expected number, got undefined",
                "[smash] frames[0].symbols[0].params.pattern expected frontArc | adjacent | custom, got string",
            ]
        );

        let message = CardCatalog::from_json_str(json).unwrap_err().to_string();
        assert!(message.starts_with("invalid card data:\n[slide]"));
        assert_eq!(message.lines().count(), 6);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": "w", "name": "Wait", "kind": "utility", "frames": []}}]"#).unwrap();
        let catalog = CardCatalog::load(file.path()).unwrap();
        assert!(catalog.contains("w"));
        assert!(!catalog.contains("z"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = CardCatalog::load(Path::new("/nonexistent/cards.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_sample_catalog_lookup() {
        let catalog = CardCatalog::sample();
        assert!(!catalog.is_empty());
        for card in catalog.iter() {
            assert_eq!(catalog.get(&card.id), Some(card));
        }
    }
}
