//! Tag autocomplete for the note editor.
//!
//! Matching is case-insensitive substring search over the tag index.
//! Attached-tag exclusion and idempotent commits compare exact strings.

use super::index::TagIndex;

/// Cap on real (non-synthetic) suggestions.
pub const MAX_TAG_SUGGESTIONS: usize = 8;

/// One entry of the suggestion dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagSuggestion {
    /// An already known tag.
    Existing(String),
    /// Offer to create `q` as a new tag.
    CreateNew(String),
}

impl TagSuggestion {
    /// The tag value a selection of this entry commits.
    pub fn value(&self) -> &str {
        match self {
            Self::Existing(tag) | Self::CreateNew(tag) => tag,
        }
    }
}

/// Computes dropdown entries for a partial tag.
///
/// Returns an empty list when `partial` trims to nothing. Otherwise returns
/// up to [`MAX_TAG_SUGGESTIONS`] existing tags in index order, followed by a
/// `CreateNew` entry when no indexed tag equals the query ignoring case.
pub fn suggest_tags(index: &TagIndex, partial: &str, attached: &[String]) -> Vec<TagSuggestion> {
    let query = partial.trim();
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    let mut suggestions: Vec<TagSuggestion> = index
        .iter()
        .filter(|tag| tag.to_lowercase().contains(&needle))
        .filter(|tag| !attached.iter().any(|value| value == tag))
        .take(MAX_TAG_SUGGESTIONS)
        .map(|tag| TagSuggestion::Existing(tag.to_string()))
        .collect();

    if index.find_ignore_case(query).is_none() {
        suggestions.push(TagSuggestion::CreateNew(query.to_string()));
    }

    suggestions
}

/// Resolves the tag a commit of `partial` should attach.
///
/// Returns the indexed spelling when one matches ignoring case, the trimmed
/// input otherwise, and `None` for blank input.
pub fn resolve_tag(index: &TagIndex, partial: &str) -> Option<String> {
    let query = partial.trim();
    if query.is_empty() {
        return None;
    }
    Some(
        index
            .find_ignore_case(query)
            .unwrap_or(query)
            .to_string(),
    )
}

/// Tag list of a note that is being created or edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDraft {
    tags: Vec<String>,
}

impl TagDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a draft from an existing note's tags.
    pub fn from_tags(tags: &[String]) -> Self {
        let mut draft = Self::new();
        for tag in tags {
            draft.attach(tag.clone());
        }
        draft
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Suggestions for `partial`, excluding tags already in the draft.
    pub fn suggest(&self, index: &TagIndex, partial: &str) -> Vec<TagSuggestion> {
        suggest_tags(index, partial, &self.tags)
    }

    /// Commits typed input ("Enter" in the editor).
    ///
    /// Returns the resolved tag, or `None` for blank input. Committing an
    /// already attached tag leaves the draft unchanged.
    pub fn commit(&mut self, index: &TagIndex, partial: &str) -> Option<String> {
        let tag = resolve_tag(index, partial)?;
        self.attach(tag.clone());
        Some(tag)
    }

    /// Commits a dropdown selection.
    pub fn select(&mut self, suggestion: &TagSuggestion) {
        self.attach(suggestion.value().to_string());
    }

    /// Detaches `tag`; no-op when absent.
    pub fn remove(&mut self, tag: &str) {
        self.tags.retain(|value| value != tag);
    }

    pub fn into_tags(self) -> Vec<String> {
        self.tags
    }

    fn attach(&mut self, tag: String) {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_tag, suggest_tags, TagDraft, TagSuggestion, MAX_TAG_SUGGESTIONS};
    use crate::model::note::Note;
    use crate::tags::index::TagIndex;

    fn index_of(tags: &[&str]) -> TagIndex {
        let note = Note::new(
            "n".to_string(),
            "body",
            tags.iter().map(|tag| tag.to_string()).collect(),
            false,
            1,
        );
        TagIndex::from_notes(&[note])
    }

    #[test]
    fn blank_query_yields_nothing() {
        let index = index_of(&["work"]);
        assert!(suggest_tags(&index, "   ", &[]).is_empty());
        assert_eq!(resolve_tag(&index, " "), None);
    }

    #[test]
    fn exact_match_suppresses_create_entry() {
        let index = index_of(&["Work", "homework"]);
        let suggestions = suggest_tags(&index, "work", &[]);
        assert_eq!(
            suggestions,
            vec![
                TagSuggestion::Existing("Work".to_string()),
                TagSuggestion::Existing("homework".to_string()),
            ]
        );
    }

    #[test]
    fn create_entry_follows_real_candidates() {
        let index = index_of(&["homework"]);
        let suggestions = suggest_tags(&index, " work ", &[]);
        assert_eq!(
            suggestions,
            vec![
                TagSuggestion::Existing("homework".to_string()),
                TagSuggestion::CreateNew("work".to_string()),
            ]
        );
    }

    #[test]
    fn attached_tags_are_excluded_and_list_is_capped() {
        let names: Vec<String> = (0..12).map(|idx| format!("tag{idx:02}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let index = index_of(&refs);

        let attached = vec!["tag00".to_string()];
        let suggestions = suggest_tags(&index, "tag", &attached);
        let existing: Vec<&str> = suggestions
            .iter()
            .filter_map(|entry| match entry {
                TagSuggestion::Existing(tag) => Some(tag.as_str()),
                TagSuggestion::CreateNew(_) => None,
            })
            .collect();
        assert_eq!(existing.len(), MAX_TAG_SUGGESTIONS);
        assert_eq!(existing[0], "tag01");
        assert!(matches!(
            suggestions.last(),
            Some(TagSuggestion::CreateNew(value)) if value == "tag"
        ));
    }

    #[test]
    fn draft_commit_resolves_case_and_is_idempotent() {
        let index = index_of(&["Errand"]);
        let mut draft = TagDraft::new();
        assert_eq!(draft.commit(&index, "errand").as_deref(), Some("Errand"));
        assert_eq!(draft.commit(&index, "ERRAND").as_deref(), Some("Errand"));
        assert_eq!(draft.commit(&index, "new one").as_deref(), Some("new one"));
        assert_eq!(draft.tags(), ["Errand", "new one"]);

        draft.remove("Errand");
        draft.remove("missing");
        assert_eq!(draft.into_tags(), vec!["new one".to_string()]);
    }
}
