//! Symbol kinds and their static metadata.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownSymbol;

/// Every effect a frame can carry.
///
/// Adding a kind forces every `match` over it (metadata, renderers) to be
/// updated, so the set of known ids is fixed at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SymbolKind {
    /// Do nothing this frame.
    Wait,
    /// Turn the piece's facing.
    Rotate,
    /// Move relative to facing.
    Move,
    /// Move ignoring blockers.
    Jump,
    /// Attack using a pattern.
    Attack,
    /// Attack, then move into the target hex.
    Charge,
    /// Block attacks from an edge.
    Block,
    /// Marker pointing at the card's active text.
    TextActive,
    /// Marker pointing at the card's passive text.
    TextPassive,
    /// A symbol that resolves together with a text marker.
    WithText,
    /// Move the card to the concentration area.
    Concentration,
    /// Optional chain into another combo card.
    Combo,
    /// Refresh if on land.
    Refresh,
}

/// Broad grouping used by renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolCategory {
    /// Something the piece does.
    Action,
    /// Refers to card text.
    Text,
    /// Bookkeeping effect.
    Utility,
}

/// How a renderer should draw the symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RenderMode {
    /// Plain icon.
    Standard,
    /// Text marker badge.
    TextMarker,
    /// Inner symbol drawn over a text marker.
    WithText,
}

/// Static description of a symbol kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolMeta {
    /// Short display label.
    pub label: &'static str,
    /// One-line rules reminder.
    pub description: &'static str,
    /// Grouping.
    pub category: SymbolCategory,
    /// Icon lookup key.
    pub icon_key: &'static str,
    /// Draw style.
    pub render_mode: RenderMode,
}

impl SymbolKind {
    /// All kinds, in declaration order.
    pub const ALL: [SymbolKind; 13] = [
        SymbolKind::Wait,
        SymbolKind::Rotate,
        SymbolKind::Move,
        SymbolKind::Jump,
        SymbolKind::Attack,
        SymbolKind::Charge,
        SymbolKind::Block,
        SymbolKind::TextActive,
        SymbolKind::TextPassive,
        SymbolKind::WithText,
        SymbolKind::Concentration,
        SymbolKind::Combo,
        SymbolKind::Refresh,
    ];

    /// Wire id, e.g. `"TEXT_ACTIVE"`.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            SymbolKind::Wait => "WAIT",
            SymbolKind::Rotate => "ROTATE",
            SymbolKind::Move => "MOVE",
            SymbolKind::Jump => "JUMP",
            SymbolKind::Attack => "ATTACK",
            SymbolKind::Charge => "CHARGE",
            SymbolKind::Block => "BLOCK",
            SymbolKind::TextActive => "TEXT_ACTIVE",
            SymbolKind::TextPassive => "TEXT_PASSIVE",
            SymbolKind::WithText => "WITH_TEXT",
            SymbolKind::Concentration => "CONCENTRATION",
            SymbolKind::Combo => "COMBO",
            SymbolKind::Refresh => "REFRESH",
        }
    }

    /// Render and rules metadata for this kind.
    #[must_use]
    pub const fn meta(self) -> SymbolMeta {
        use RenderMode::{Standard, TextMarker, WithText};
        use SymbolCategory::{Action, Text, Utility};

        let (label, description, category, icon_key, render_mode) = match self {
            SymbolKind::Wait => ("Wait", "Do nothing this frame.", Action, "wait", Standard),
            SymbolKind::Rotate => (
                "Rotate",
                "Rotate the facing up to the allowance.",
                Action,
                "rotate",
                Standard,
            ),
            SymbolKind::Move => ("Move", "Move relative to facing.", Action, "move", Standard),
            SymbolKind::Jump => ("Jump", "Jump ignoring blocking.", Action, "jump", Standard),
            SymbolKind::Attack => ("Attack", "Attack using a pattern.", Action, "attack", Standard),
            SymbolKind::Charge => (
                "Charge",
                "Attack then move into the target hex.",
                Action,
                "charge",
                Standard,
            ),
            SymbolKind::Block => ("Block", "Block attacks from an edge.", Utility, "block", Standard),
            SymbolKind::TextActive => (
                "Active Text",
                "Read the active text for this frame.",
                Text,
                "textActive",
                TextMarker,
            ),
            SymbolKind::TextPassive => (
                "Passive Text",
                "Read the passive text for this frame.",
                Text,
                "textPassive",
                TextMarker,
            ),
            SymbolKind::WithText => (
                "Text Behind",
                "Symbol resolves alongside its text marker.",
                Text,
                "unknown",
                WithText,
            ),
            SymbolKind::Concentration => (
                "Concentration",
                "Move card to concentration area.",
                Utility,
                "concentration",
                Standard,
            ),
            SymbolKind::Combo => (
                "Combo",
                "Optional chain into another combo card.",
                Utility,
                "combo",
                Standard,
            ),
            SymbolKind::Refresh => ("Refresh", "Refresh if on land.", Utility, "refresh", Standard),
        };

        SymbolMeta {
            label,
            description,
            category,
            icon_key,
            render_mode,
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SymbolKind {
    type Err = UnknownSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| UnknownSymbol(s.to_string()))
    }
}

/// A scalar symbol parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Primitive {
    /// Boolean flag.
    Bool(bool),
    /// Whole number.
    Int(i64),
    /// Fractional number.
    Float(f64),
    /// Free-form string.
    Text(String),
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Bool(b) => write!(f, "{b}"),
            Primitive::Int(n) => write!(f, "{n}"),
            Primitive::Float(x) => write!(f, "{x}"),
            Primitive::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Primitive {
    fn from(value: bool) -> Self {
        Primitive::Bool(value)
    }
}

impl From<i32> for Primitive {
    fn from(value: i32) -> Self {
        Primitive::Int(i64::from(value))
    }
}

impl From<f64> for Primitive {
    fn from(value: f64) -> Self {
        Primitive::Float(value)
    }
}

impl From<&str> for Primitive {
    fn from(value: &str) -> Self {
        Primitive::Text(value.to_string())
    }
}

/// One symbol on a frame, with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolInstance {
    /// Which effect this is.
    pub id: SymbolKind,
    /// Effect parameters (direction, distance, pattern, ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, Primitive>,
}

impl SymbolInstance {
    /// Create a symbol without parameters.
    #[must_use]
    pub fn new(id: SymbolKind) -> Self {
        Self {
            id,
            params: BTreeMap::new(),
        }
    }

    /// Add a parameter.
    #[must_use]
    pub fn with_param(mut self, key: &str, value: impl Into<Primitive>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Look up a parameter.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&Primitive> {
        self.params.get(key)
    }

    /// Compact label like `MOVE(direction=F, distance=2)`.
    #[must_use]
    pub fn describe(&self) -> String {
        if self.params.is_empty() {
            return self.id.id().to_string();
        }
        let params: Vec<String> = self.params.iter().map(|(k, v)| format!("{k}={v}")).collect();
        format!("{}({})", self.id, params.join(", "))
    }
}
