//! Note domain model.
//!
//! # Responsibility
//! - Define the single persisted record of the note store.
//! - Provide id generation and write-path normalization helpers.
//!
//! # Invariants
//! - `id` is stable and never reassigned after creation.
//! - `content` is non-empty for every stored note.
//! - `tags` holds no duplicate values.
//! - `updated_at >= created_at` for notes created or updated locally.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque note identifier.
///
/// Kept as a plain string because imported collections may carry ids
/// produced by other tools.
pub type NoteId = String;

/// Validation failures for note write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Content is empty (or whitespace-only on create/update).
    EmptyContent,
    /// Id is an empty string.
    EmptyId,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "note content cannot be empty"),
            Self::EmptyId => write!(f, "note id cannot be empty"),
        }
    }
}

impl Error for NoteValidationError {}

/// A single tagged text record.
///
/// Field names serialize in camelCase to match the export file format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    /// Real body text; secret notes are only redacted at display time.
    pub content: String,
    pub tags: Vec<String>,
    pub is_secret: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds, bumped on every mutation.
    pub updated_at: i64,
}

impl Note {
    /// Builds a fresh note with both timestamps set to `now_ms`.
    ///
    /// Callers are expected to pass content through [`normalize_content`]
    /// and tags through [`normalize_tags`] first.
    pub fn new(
        id: NoteId,
        content: impl Into<String>,
        tags: Vec<String>,
        is_secret: bool,
        now_ms: i64,
    ) -> Self {
        Self {
            id,
            content: content.into(),
            tags,
            is_secret,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    /// Checks the shape contract shared by local writes and imports.
    ///
    /// # Errors
    /// - [`NoteValidationError::EmptyId`] when `id` is empty.
    /// - [`NoteValidationError::EmptyContent`] when `content` is empty.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.id.is_empty() {
            return Err(NoteValidationError::EmptyId);
        }
        if self.content.is_empty() {
            return Err(NoteValidationError::EmptyContent);
        }
        Ok(())
    }

    /// Returns whether this note carries `tag` (exact, case-sensitive).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|value| value == tag)
    }
}

/// Generates a fresh note id.
///
/// UUIDv7 gives a millisecond time prefix followed by random bits, rendered
/// as 32 lowercase hex chars.
pub fn generate_note_id() -> NoteId {
    Uuid::now_v7().simple().to_string()
}

/// Trims content and rejects whitespace-only input.
pub fn normalize_content(content: &str) -> Result<String, NoteValidationError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(NoteValidationError::EmptyContent);
    }
    Ok(trimmed.to_string())
}

/// Trims tags, drops blanks and collapses exact duplicates.
///
/// First occurrence wins, so caller ordering is preserved.
pub fn normalize_tags<I, T>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let mut unique: Vec<String> = Vec::new();
    for tag in tags {
        let trimmed = tag.as_ref().trim();
        if trimmed.is_empty() || unique.iter().any(|value| value == trimmed) {
            continue;
        }
        unique.push(trimmed.to_string());
    }
    unique
}

/// Collapses exact duplicate tags, keeping first-occurrence order.
///
/// Unlike [`normalize_tags`], values are kept byte-for-byte.
pub fn dedupe_tags<I, T>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let mut unique: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref();
        if !unique.iter().any(|value| value == tag) {
            unique.push(tag.to_string());
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::{
        dedupe_tags, generate_note_id, normalize_content, normalize_tags, Note, NoteValidationError,
    };

    #[test]
    fn new_note_starts_with_equal_timestamps() {
        let note = Note::new("n1".to_string(), "body", vec![], false, 42);
        assert_eq!(note.created_at, 42);
        assert_eq!(note.updated_at, note.created_at);
    }

    #[test]
    fn validate_rejects_empty_id_and_content() {
        let mut note = Note::new(String::new(), "body", vec![], false, 1);
        assert_eq!(note.validate(), Err(NoteValidationError::EmptyId));

        note.id = "x".to_string();
        note.content.clear();
        assert_eq!(note.validate(), Err(NoteValidationError::EmptyContent));
    }

    #[test]
    fn normalize_content_trims_and_rejects_blank() {
        assert_eq!(normalize_content("  hi \n").unwrap(), "hi");
        assert_eq!(
            normalize_content(" \t\n"),
            Err(NoteValidationError::EmptyContent)
        );
    }

    #[test]
    fn normalize_tags_keeps_first_occurrence_order() {
        let tags = normalize_tags(["home", " errand ", "", "home", "Home"]);
        assert_eq!(tags, vec!["home", "errand", "Home"]);
    }

    #[test]
    fn dedupe_tags_keeps_values_verbatim() {
        let tags = dedupe_tags([" padded ", "", "x", " padded ", "X"]);
        assert_eq!(tags, vec![" padded ", "", "x", "X"]);
    }

    #[test]
    fn generated_ids_are_distinct_hex() {
        let first = generate_note_id();
        let second = generate_note_id();
        assert_ne!(first, second);
        assert_eq!(first.len(), 32);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let note = Note::new("a".to_string(), "body", vec!["t".to_string()], true, 7);
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["isSecret"], true);
        assert_eq!(json["createdAt"], 7);
        assert_eq!(json["updatedAt"], 7);
    }
}
