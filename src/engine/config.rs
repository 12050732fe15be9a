//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Options that change what the engine reports, never what it decides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Emit an `INFO` event for every ignored intent (default: false).
    ///
    /// The state is left unchanged either way.
    pub diagnostics: bool,
}

impl EngineConfig {
    /// Configuration with diagnostics turned on.
    #[must_use]
    pub const fn with_diagnostics() -> Self {
        Self { diagnostics: true }
    }
}
