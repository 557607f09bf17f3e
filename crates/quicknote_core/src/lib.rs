//! Core note store for QuickNote.
//! Owns the note collection, its persistence, querying and import/export.

pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod store;
pub mod tags;
pub mod transfer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{generate_note_id, Note, NoteId, NoteValidationError};
pub use model::settings::Settings;
pub use repo::note_repo::NoteRepository;
pub use repo::settings_repo::SettingsRepository;
pub use repo::{RepoError, RepoResult};
pub use search::filter::TagFilter;
pub use search::query::{filter_notes, NoteQuery, QueryResult};
pub use service::note_service::{DeleteOutcome, NoteService, NoteServiceError};
pub use service::prompt::{PresetPrompt, UserPrompt};
pub use store::{MemoryStore, SqliteKvStore, StoreAdapter, StoreError, StoreResult};
pub use tags::autocomplete::{suggest_tags, TagDraft, TagSuggestion};
pub use tags::index::TagIndex;
pub use transfer::export::{
    export_json, parse_import, ExportEnvelope, ImportError, ParsedImport, EXPORT_FILE_NAME,
    EXPORT_FORMAT_VERSION,
};
pub use transfer::merge::{merge, replace, MergeStats};
pub use transfer::payload::{check_payload, validate, PayloadError};
pub use transfer::{ImportDecision, ImportOutcome, ImportSummary};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
