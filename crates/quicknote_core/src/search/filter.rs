//! Filter-chip selection state.

use super::query::NoteQuery;
use crate::tags::index::TagIndex;

/// Label shown when no tag is selected.
pub const ALL_FILTER_LABEL: &str = "All";

/// Tags currently selected in the filter-chip bar, in click order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    selected: Vec<String>,
}

impl TagFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles `tag` in or out of the selection.
    pub fn toggle(&mut self, tag: &str) {
        if let Some(position) = self.selected.iter().position(|value| value == tag) {
            self.selected.remove(position);
        } else {
            self.selected.push(tag.to_string());
        }
    }

    /// Clears the selection ("All" chip).
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, tag: &str) -> bool {
        self.selected.iter().any(|value| value == tag)
    }

    /// `"All"` for an empty selection, otherwise tags joined by `" + "`.
    pub fn label(&self) -> String {
        if self.selected.is_empty() {
            ALL_FILTER_LABEL.to_string()
        } else {
            self.selected.join(" + ")
        }
    }

    /// Drops selected tags that disappeared from the index.
    ///
    /// Returns whether the selection changed.
    pub fn retain_known(&mut self, index: &TagIndex) -> bool {
        let before = self.selected.len();
        self.selected.retain(|tag| index.contains(tag));
        before != self.selected.len()
    }

    /// Builds a query from this selection and the search box text.
    pub fn to_query(&self, text: &str) -> NoteQuery {
        NoteQuery::new()
            .with_tags(self.selected.iter().cloned())
            .with_text(text)
    }
}
