//! Contextual board highlights for the selection.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::game::Selection;
use crate::hex::{Axial, HexKey};

/// Hexes a renderer should highlight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Preview {
    /// Highlighted hex keys, `"q,r"`.
    pub highlighted: BTreeSet<HexKey>,
}

impl Preview {
    /// Preview for the current selection.
    #[must_use]
    pub fn from_selection(selection: &Selection) -> Self {
        preview(selection.selected_hex, selection.selected_frame_index)
    }

    /// Check whether `hex` is highlighted.
    #[must_use]
    pub fn is_highlighted(&self, hex: Axial) -> bool {
        self.highlighted.contains(&hex.key())
    }

    /// Check whether nothing is highlighted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.highlighted.is_empty()
    }
}

/// The neighbors of the selected hex, once a frame is also selected.
///
/// Either selection missing gives an empty preview. The selected hex itself
/// is never highlighted. Neighbors past the `i32` coordinate range are left
/// out rather than wrapped.
#[must_use]
pub fn preview(selected_hex: Option<Axial>, selected_frame_index: Option<u32>) -> Preview {
    match (selected_hex, selected_frame_index) {
        (Some(hex), Some(_)) => Preview {
            highlighted: hex.neighbors().into_iter().map(Axial::key).collect(),
        },
        _ => Preview::default(),
    }
}
