//! Id-keyed reconciliation of two collections.

use crate::model::note::Note;
use std::collections::HashMap;

/// Counts describing what a merge changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Incoming notes whose id was not present locally.
    pub added: usize,
    /// Local notes replaced by an incoming record with the same id.
    pub overwritten: usize,
}

/// Merges `incoming` into `existing`; incoming wins on id collision.
///
/// Colliding records are replaced whole, never field-merged. Ids only in
/// `existing` are kept. Result order is `existing` order (with overwritten
/// records in place) followed by incoming-only notes in incoming order.
pub fn merge(existing: &[Note], incoming: &[Note]) -> Vec<Note> {
    merge_with_stats(existing, incoming).0
}

/// Like [`merge`], also reporting added/overwritten counts.
pub fn merge_with_stats(existing: &[Note], incoming: &[Note]) -> (Vec<Note>, MergeStats) {
    let mut merged: Vec<Note> = existing.to_vec();
    let mut positions: HashMap<String, usize> = merged
        .iter()
        .enumerate()
        .map(|(position, note)| (note.id.clone(), position))
        .collect();
    let mut stats = MergeStats::default();

    for note in collapse_duplicate_ids(incoming) {
        match positions.get(&note.id) {
            Some(&position) => {
                if position < existing.len() {
                    stats.overwritten += 1;
                }
                merged[position] = note;
            }
            None => {
                positions.insert(note.id.clone(), merged.len());
                merged.push(note);
                stats.added += 1;
            }
        }
    }

    (merged, stats)
}

/// Replaces the collection wholesale with `incoming`.
///
/// Duplicate ids inside `incoming` collapse the same way as in [`merge`].
pub fn replace(incoming: &[Note]) -> Vec<Note> {
    collapse_duplicate_ids(incoming)
}

/// Collapses repeated ids: the first occurrence fixes the position, the
/// last occurrence supplies the value.
pub fn collapse_duplicate_ids(notes: &[Note]) -> Vec<Note> {
    let mut collapsed: Vec<Note> = Vec::with_capacity(notes.len());
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(notes.len());
    for note in notes {
        match positions.get(note.id.as_str()) {
            Some(&position) => collapsed[position] = note.clone(),
            None => {
                positions.insert(note.id.as_str(), collapsed.len());
                collapsed.push(note.clone());
            }
        }
    }
    collapsed
}

/// Number of distinct incoming ids that already exist in `existing`.
pub fn count_collisions(existing: &[Note], incoming: &[Note]) -> usize {
    collapse_duplicate_ids(incoming)
        .iter()
        .filter(|note| existing.iter().any(|local| local.id == note.id))
        .count()
}

#[cfg(test)]
mod tests {
    use super::{collapse_duplicate_ids, merge_with_stats, replace, MergeStats};
    use crate::model::note::Note;

    fn note(id: &str, content: &str) -> Note {
        Note::new(id.to_string(), content, vec![], false, 1)
    }

    #[test]
    fn stats_count_added_and_overwritten() {
        let existing = vec![note("1", "a"), note("2", "b")];
        let incoming = vec![note("2", "B"), note("3", "c")];
        let (_, stats) = merge_with_stats(&existing, &incoming);
        assert_eq!(
            stats,
            MergeStats {
                added: 1,
                overwritten: 1
            }
        );
    }

    #[test]
    fn duplicate_incoming_ids_keep_first_position_last_value() {
        let incoming = vec![note("x", "first"), note("y", "y"), note("x", "last")];
        let collapsed = collapse_duplicate_ids(&incoming);
        assert_eq!(collapsed.len(), 2);
        assert_eq!(collapsed[0].id, "x");
        assert_eq!(collapsed[0].content, "last");
        assert_eq!(replace(&incoming), collapsed);
    }

    #[test]
    fn duplicate_incoming_ids_count_once_when_added() {
        let (merged, stats) = merge_with_stats(&[], &[note("x", "1"), note("x", "2")]);
        assert_eq!(merged.len(), 1);
        assert_eq!(stats.added, 1);
        assert_eq!(stats.overwritten, 0);
    }
}
