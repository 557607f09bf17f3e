//! Derived tag index.

use crate::model::note::Note;
use std::collections::BTreeSet;

/// Sorted set of distinct tags across a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagIndex {
    tags: Vec<String>,
}

impl TagIndex {
    /// Builds the index from scratch.
    ///
    /// Input order does not matter: the result is always the sorted union.
    pub fn from_notes(notes: &[Note]) -> Self {
        let unique: BTreeSet<&str> = notes
            .iter()
            .flat_map(|note| note.tags.iter().map(String::as_str))
            .collect();
        Self {
            tags: unique.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Exact, case-sensitive membership.
    pub fn contains(&self, tag: &str) -> bool {
        self.tags
            .binary_search_by(|probe| probe.as_str().cmp(tag))
            .is_ok()
    }

    /// Returns the first indexed tag equal to `query` ignoring case.
    pub fn find_ignore_case(&self, query: &str) -> Option<&str> {
        let needle = query.to_lowercase();
        self.iter().find(|tag| tag.to_lowercase() == needle)
    }
}

#[cfg(test)]
mod tests {
    use super::TagIndex;
    use crate::model::note::Note;

    fn note(id: &str, tags: &[&str]) -> Note {
        Note::new(
            id.to_string(),
            "body",
            tags.iter().map(|tag| tag.to_string()).collect(),
            false,
            1,
        )
    }

    #[test]
    fn index_is_sorted_distinct_and_case_sensitive() {
        let notes = vec![
            note("a", &["work", "Home"]),
            note("b", &["home", "work"]),
        ];
        let index = TagIndex::from_notes(&notes);
        assert_eq!(index.as_slice(), ["Home", "home", "work"]);
    }

    #[test]
    fn index_of_empty_collection_is_empty() {
        assert!(TagIndex::from_notes(&[]).is_empty());
    }

    #[test]
    fn lookup_helpers() {
        let index = TagIndex::from_notes(&[note("a", &["Rust", "errand"])]);
        assert!(index.contains("Rust"));
        assert!(!index.contains("rust"));
        assert_eq!(index.find_ignore_case("RUST"), Some("Rust"));
        assert_eq!(index.find_ignore_case("go"), None);
    }
}
