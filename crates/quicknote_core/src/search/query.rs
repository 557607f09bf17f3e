//! Tag-faceted note filtering.

use crate::model::note::Note;
use std::collections::BTreeSet;

/// Filter inputs for one list render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteQuery {
    /// Every selected tag must be present on a note (AND semantics).
    pub selected_tags: BTreeSet<String>,
    /// Case-insensitive substring matched against content or any tag.
    pub text: String,
}

impl NoteQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.selected_tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Whether any filter is active. Blank text counts as inactive.
    pub fn is_active(&self) -> bool {
        !self.selected_tags.is_empty() || !self.text.trim().is_empty()
    }
}

/// Outcome of filtering a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryResult<'a> {
    /// The collection itself is empty.
    NoNotes,
    /// Notes exist but none pass the active filters.
    NoMatches,
    /// Matching notes in collection order.
    Matches(Vec<&'a Note>),
}

impl<'a> QueryResult<'a> {
    /// Matching notes; empty for both empty outcomes.
    pub fn notes(&self) -> &[&'a Note] {
        match self {
            Self::Matches(notes) => notes,
            Self::NoNotes | Self::NoMatches => &[],
        }
    }

    pub fn into_notes(self) -> Vec<&'a Note> {
        match self {
            Self::Matches(notes) => notes,
            Self::NoNotes | Self::NoMatches => Vec::new(),
        }
    }
}

/// Filters `notes` by tag selection first, then by text query.
pub fn filter_notes<'a>(notes: &'a [Note], query: &NoteQuery) -> QueryResult<'a> {
    if notes.is_empty() {
        return QueryResult::NoNotes;
    }

    let needle = query.text.trim().to_lowercase();
    let matches: Vec<&Note> = notes
        .iter()
        .filter(|note| matches_tags(note, &query.selected_tags))
        .filter(|note| matches_text(note, &needle))
        .collect();

    if matches.is_empty() {
        QueryResult::NoMatches
    } else {
        QueryResult::Matches(matches)
    }
}

/// Whether `note` carries every tag in `selected`.
pub fn matches_tags(note: &Note, selected: &BTreeSet<String>) -> bool {
    selected.iter().all(|tag| note.has_tag(tag))
}

/// Whether lowercase `needle` occurs in the content or in any tag.
///
/// An empty needle matches everything.
fn matches_text(note: &Note, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    note.content.to_lowercase().contains(needle)
        || note
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}
