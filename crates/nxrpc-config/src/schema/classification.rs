//! Display-name based activity classification rules.

use nxrpc_common::ActivityKind;
use serde::{Deserialize, Serialize};

/// One `(pattern, kind)` pair. Patterns match as case-insensitive substrings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRule {
    pub pattern: String,
    pub kind: ActivityKind,
}

impl ClassificationRule {
    pub fn new(pattern: impl Into<String>, kind: ActivityKind) -> Self {
        Self {
            pattern: pattern.into(),
            kind,
        }
    }
}

/// Media apps shown as "Watching"; everything else falls back to "Playing".
pub fn default_classification() -> Vec<ClassificationRule> {
    ["YouTube", "Switchfin", "Crunchyroll"]
        .into_iter()
        .map(|app| ClassificationRule::new(app, ActivityKind::Watching))
        .collect()
}
