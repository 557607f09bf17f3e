//! User decisions requested by the core.

use crate::model::note::Note;
use crate::transfer::{ImportDecision, ImportSummary};

/// Presentation-side dialogs the service calls into.
pub trait UserPrompt {
    /// Asks whether `note` should be deleted.
    fn confirm_delete(&self, note: &Note) -> bool;
    /// Asks whether all `count` notes should be deleted.
    fn confirm_delete_all(&self, count: usize) -> bool;
    /// Asks how a validated import should be applied.
    fn choose_import(&self, summary: &ImportSummary) -> ImportDecision;
}

/// Prompt answering every question with preset values.
///
/// Used by non-interactive front ends (`--yes`, `--merge`) and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetPrompt {
    pub confirm: bool,
    pub import: ImportDecision,
}

impl PresetPrompt {
    pub fn new(confirm: bool, import: ImportDecision) -> Self {
        Self { confirm, import }
    }

    /// Declines deletes and cancels imports.
    pub fn decline() -> Self {
        Self::new(false, ImportDecision::Cancel)
    }
}

impl UserPrompt for PresetPrompt {
    fn confirm_delete(&self, _note: &Note) -> bool {
        self.confirm
    }

    fn confirm_delete_all(&self, _count: usize) -> bool {
        self.confirm
    }

    fn choose_import(&self, _summary: &ImportSummary) -> ImportDecision {
        self.import
    }
}
