//! Note use-case service.
//!
//! # Responsibility
//! - Combine the note and settings repositories behind use-case APIs.
//! - Apply the default secrecy setting to new notes.
//! - Gate destructive actions and imports on user decisions.
//!
//! # Invariants
//! - Invalid import payloads never reach the decision prompt.
//! - Declined or cancelled actions leave the collection untouched.

use super::prompt::UserPrompt;
use crate::clock::{Clock, SystemClock};
use crate::model::note::Note;
use crate::model::settings::Settings;
use crate::repo::note_repo::NoteRepository;
use crate::repo::settings_repo::SettingsRepository;
use crate::repo::RepoError;
use crate::search::query::{filter_notes, NoteQuery, QueryResult};
use crate::store::StoreAdapter;
use crate::tags::index::TagIndex;
use crate::transfer::export::{export_json, parse_import, ImportError, ParsedImport};
use crate::transfer::merge::{collapse_duplicate_ids, count_collisions};
use crate::transfer::{ImportDecision, ImportOutcome, ImportSummary};
use chrono::Utc;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Repository rejected the operation.
    Repo(RepoError),
    /// Import payload could not be parsed or validated.
    Import(ImportError),
    /// Clipboard text was empty or whitespace-only.
    EmptyClipboard,
    /// Export document could not be rendered.
    Export(serde_json::Error),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Import(err) => write!(f, "{err}"),
            Self::EmptyClipboard => write!(f, "clipboard is empty or contains no text"),
            Self::Export(err) => write!(f, "failed to render export: {err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Import(err) => Some(err),
            Self::Export(err) => Some(err),
            Self::EmptyClipboard => None,
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ImportError> for NoteServiceError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

/// Result of a confirmed-delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined; nothing changed.
    Declined,
    /// No note has the requested id.
    Missing,
}

/// Note service facade over the repositories.
pub struct NoteService<S, C = SystemClock> {
    notes: NoteRepository<S, C>,
    settings: SettingsRepository<S>,
}

impl<S: StoreAdapter + Clone> NoteService<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: StoreAdapter + Clone, C: Clock> NoteService<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            notes: NoteRepository::with_clock(store.clone(), clock),
            settings: SettingsRepository::new(store),
        }
    }

    /// Loads notes and settings from the store.
    pub fn load(&mut self) -> &[Note] {
        self.settings.load();
        self.notes.load()
    }

    pub fn notes(&self) -> &[Note] {
        self.notes.notes()
    }

    pub fn get_note(&self, id: &str) -> Option<&Note> {
        self.notes.get(id)
    }

    pub fn tag_index(&self) -> &TagIndex {
        self.notes.tag_index()
    }

    pub fn settings(&self) -> Settings {
        self.settings.settings()
    }

    pub fn set_default_secret(&mut self, value: bool) {
        self.settings.set_default_secret(value);
    }

    /// Creates a note; `is_secret = None` applies the default setting.
    pub fn create_note(
        &mut self,
        content: &str,
        tags: Vec<String>,
        is_secret: Option<bool>,
    ) -> Result<Note, NoteServiceError> {
        let is_secret = is_secret.unwrap_or_else(|| self.settings.default_secret());
        Ok(self.notes.create(content, tags, is_secret)?)
    }

    /// Captures clipboard text as an untagged note with default secrecy.
    pub fn add_from_clipboard(&mut self, text: &str) -> Result<Note, NoteServiceError> {
        if text.trim().is_empty() {
            return Err(NoteServiceError::EmptyClipboard);
        }
        self.create_note(text, Vec::new(), None)
    }

    pub fn update_note(
        &mut self,
        id: &str,
        content: &str,
        tags: Vec<String>,
        is_secret: bool,
    ) -> Result<Note, NoteServiceError> {
        Ok(self.notes.update(id, content, tags, is_secret)?)
    }

    /// Real content of a note for the clipboard, secret or not.
    pub fn copy_content(&self, id: &str) -> Option<&str> {
        self.notes.get(id).map(|note| note.content.as_str())
    }

    /// Deletes one note after the user confirms.
    pub fn delete_note(&mut self, id: &str, prompt: &dyn UserPrompt) -> DeleteOutcome {
        let Some(note) = self.notes.get(id) else {
            return DeleteOutcome::Missing;
        };
        if !prompt.confirm_delete(note) {
            return DeleteOutcome::Declined;
        }
        self.notes.delete(id);
        DeleteOutcome::Deleted
    }

    /// Deletes every note after the user confirms.
    ///
    /// Returns whether the collection was cleared.
    pub fn delete_all(&mut self, prompt: &dyn UserPrompt) -> bool {
        if !prompt.confirm_delete_all(self.notes.len()) {
            return false;
        }
        self.notes.delete_all();
        true
    }

    /// Filters the collection for display.
    pub fn search(&self, query: &NoteQuery) -> QueryResult<'_> {
        filter_notes(self.notes.notes(), query)
    }

    /// Renders the collection as an export document stamped with now.
    pub fn export_json(&self) -> Result<String, NoteServiceError> {
        let rendered =
            export_json(self.notes.notes(), Utc::now()).map_err(NoteServiceError::Export)?;
        info!(
            "event=notes_export module=service status=ok count={}",
            self.notes.len()
        );
        Ok(rendered)
    }

    /// Validates `text`, asks the user how to apply it, then applies it.
    ///
    /// # Errors
    /// - [`NoteServiceError::Import`] when the text is not JSON or fails the
    ///   import schema; the prompt is not consulted.
    pub fn import_json(
        &mut self,
        text: &str,
        prompt: &dyn UserPrompt,
    ) -> Result<ImportOutcome, NoteServiceError> {
        let parsed = parse_import(text).map_err(|err| {
            warn!("event=notes_import module=service status=rejected error={err}");
            err
        })?;
        let summary = self.summarize(&parsed);
        let decision = prompt.choose_import(&summary);
        self.apply_import(&parsed, decision)
    }

    /// Facts shown to the user before the import decision.
    pub fn summarize(&self, parsed: &ParsedImport) -> ImportSummary {
        ImportSummary {
            incoming: collapse_duplicate_ids(&parsed.notes).len(),
            colliding: count_collisions(self.notes.notes(), &parsed.notes),
            existing: self.notes.len(),
            version: parsed.version.clone(),
        }
    }

    /// Applies an already validated import according to `decision`.
    pub fn apply_import(
        &mut self,
        parsed: &ParsedImport,
        decision: ImportDecision,
    ) -> Result<ImportOutcome, NoteServiceError> {
        let outcome = match decision {
            ImportDecision::Cancel => ImportOutcome::Cancelled,
            ImportDecision::Replace => {
                self.notes.replace_all(&parsed.notes)?;
                ImportOutcome::Replaced {
                    count: self.notes.len(),
                }
            }
            ImportDecision::Merge => {
                let stats = self.notes.merge_in(&parsed.notes)?;
                ImportOutcome::Merged {
                    added: stats.added,
                    overwritten: stats.overwritten,
                }
            }
        };
        info!("event=notes_import module=service status=ok outcome={outcome:?}");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::{DeleteOutcome, NoteService, NoteServiceError};
    use crate::service::prompt::PresetPrompt;
    use crate::store::MemoryStore;
    use crate::transfer::ImportDecision;

    #[test]
    fn create_uses_default_secret_when_unspecified() {
        let store = MemoryStore::new();
        let mut service = NoteService::new(&store);
        service.set_default_secret(true);

        let defaulted = service.create_note("hidden", vec![], None).unwrap();
        let explicit = service.create_note("shown", vec![], Some(false)).unwrap();
        assert!(defaulted.is_secret);
        assert!(!explicit.is_secret);
    }

    #[test]
    fn clipboard_capture_trims_and_rejects_blank() {
        let store = MemoryStore::new();
        let mut service = NoteService::new(&store);

        let err = service.add_from_clipboard("  \n").unwrap_err();
        assert!(matches!(err, NoteServiceError::EmptyClipboard));

        let note = service.add_from_clipboard("  pasted text \n").unwrap();
        assert_eq!(note.content, "pasted text");
        assert!(note.tags.is_empty());
    }

    #[test]
    fn declined_delete_keeps_note() {
        let store = MemoryStore::new();
        let mut service = NoteService::new(&store);
        let note = service.create_note("keep me", vec![], None).unwrap();

        let decline = PresetPrompt::decline();
        assert_eq!(service.delete_note(&note.id, &decline), DeleteOutcome::Declined);
        assert_eq!(service.delete_note("missing", &decline), DeleteOutcome::Missing);
        assert!(!service.delete_all(&decline));
        assert_eq!(service.notes().len(), 1);

        let accept = PresetPrompt::new(true, ImportDecision::Cancel);
        assert_eq!(service.delete_note(&note.id, &accept), DeleteOutcome::Deleted);
        assert!(service.notes().is_empty());
    }
}
