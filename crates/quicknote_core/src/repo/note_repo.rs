//! Note repository over a key-value store.
//!
//! # Responsibility
//! - Own the newest-first note collection and its derived tag index.
//! - Write the whole collection back to the store after every mutation.
//!
//! # Invariants
//! - Note ids are unique within the collection.
//! - `create` prepends; `update` keeps the note's position.
//! - Mutating methods take `&mut self`, so writes are serialized.

use super::{RepoError, RepoResult};
use crate::clock::{Clock, SystemClock};
use crate::model::note::{
    generate_note_id, normalize_content, normalize_tags, Note, NoteId,
};
use crate::store::{single_entry, StoreAdapter, StoreError, NOTES_KEY};
use crate::tags::index::TagIndex;
use crate::transfer::merge::{collapse_duplicate_ids, merge_with_stats, MergeStats};
use log::{debug, error, info, warn};

/// In-memory note collection persisted under [`NOTES_KEY`].
pub struct NoteRepository<S, C = SystemClock> {
    store: S,
    clock: C,
    next_id: fn() -> NoteId,
    notes: Vec<Note>,
    tag_index: TagIndex,
}

impl<S: StoreAdapter> NoteRepository<S> {
    /// Creates an empty repository using wall-clock timestamps.
    ///
    /// Call [`NoteRepository::load`] to read the persisted collection.
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: StoreAdapter, C: Clock> NoteRepository<S, C> {
    /// Creates an empty repository with a caller-provided time source.
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            next_id: generate_note_id,
            notes: Vec::new(),
            tag_index: TagIndex::default(),
        }
    }

    /// Overrides the id generator used by `create`.
    pub fn with_id_generator(mut self, next_id: fn() -> NoteId) -> Self {
        self.next_id = next_id;
        self
    }

    /// Replaces the in-memory collection with the persisted one.
    ///
    /// Adapter failures, a missing key and undecodable data all yield an
    /// empty collection.
    pub fn load(&mut self) -> &[Note] {
        self.notes = match self.read_stored_notes() {
            Ok(notes) => {
                info!(
                    "event=notes_load module=repo status=ok count={}",
                    notes.len()
                );
                notes
            }
            Err(err) => {
                warn!(
                    "event=notes_load module=repo status=fallback reason=store_error error={}",
                    err
                );
                Vec::new()
            }
        };
        self.refresh_index();
        &self.notes
    }

    /// Current collection, newest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Sorted distinct tags across the collection.
    pub fn tag_index(&self) -> &TagIndex {
        &self.tag_index
    }

    pub fn all_tags(&self) -> &[String] {
        self.tag_index.as_slice()
    }

    /// Creates a note at the front of the collection.
    ///
    /// # Errors
    /// - [`RepoError::Validation`] when `content` trims to empty.
    pub fn create(&mut self, content: &str, tags: Vec<String>, is_secret: bool) -> RepoResult<Note> {
        let content = normalize_content(content)?;
        let note = Note::new(
            self.fresh_id(),
            content,
            normalize_tags(tags),
            is_secret,
            self.clock.now_ms(),
        );

        self.notes.insert(0, note.clone());
        self.after_mutation("note_create");
        debug!(
            "event=note_create module=repo status=ok note_id={} tag_count={}",
            note.id,
            note.tags.len()
        );
        Ok(note)
    }

    /// Replaces content, tags and secrecy of an existing note in place.
    ///
    /// `updated_at` always moves forward, even if the clock did not.
    ///
    /// # Errors
    /// - [`RepoError::Validation`] when `content` trims to empty.
    /// - [`RepoError::NotFound`] when no note has `id`.
    pub fn update(
        &mut self,
        id: &str,
        content: &str,
        tags: Vec<String>,
        is_secret: bool,
    ) -> RepoResult<Note> {
        let content = normalize_content(content)?;
        let now = self.clock.now_ms();
        let note = self
            .notes
            .iter_mut()
            .find(|note| note.id == id)
            .ok_or_else(|| RepoError::NotFound(id.to_string()))?;

        note.content = content;
        note.tags = normalize_tags(tags);
        note.is_secret = is_secret;
        note.updated_at = now
            .max(note.updated_at.saturating_add(1))
            .max(note.created_at);
        let updated = note.clone();

        self.after_mutation("note_update");
        debug!(
            "event=note_update module=repo status=ok note_id={} tag_count={}",
            updated.id,
            updated.tags.len()
        );
        Ok(updated)
    }

    /// Removes the note with `id`.
    ///
    /// Returns whether a note was removed; an unknown id is a no-op.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        let removed = self.notes.len() != before;
        if removed {
            self.after_mutation("note_delete");
        } else {
            debug!("event=note_delete module=repo status=noop note_id={id}");
        }
        removed
    }

    /// Removes every note.
    pub fn delete_all(&mut self) {
        let count = self.notes.len();
        self.notes.clear();
        self.after_mutation("notes_delete_all");
        info!("event=notes_delete_all module=repo status=ok removed={count}");
    }

    /// Makes `notes` the new collection, keeping incoming ids and timestamps.
    ///
    /// Repeated ids collapse to one record (first position, last value).
    ///
    /// # Errors
    /// - [`RepoError::InvalidNote`] for the first note with an empty id or
    ///   content; the collection is left untouched.
    pub fn replace_all(&mut self, notes: &[Note]) -> RepoResult<()> {
        check_shapes(notes)?;
        self.notes = collapse_duplicate_ids(notes);
        self.after_mutation("notes_replace");
        Ok(())
    }

    /// Merges `incoming` into the collection; incoming wins on id collision.
    ///
    /// # Errors
    /// - [`RepoError::InvalidNote`] as for [`NoteRepository::replace_all`].
    pub fn merge_in(&mut self, incoming: &[Note]) -> RepoResult<MergeStats> {
        check_shapes(incoming)?;
        let (merged, stats) = merge_with_stats(&self.notes, incoming);
        self.notes = merged;
        self.after_mutation("notes_merge");
        Ok(stats)
    }

    fn fresh_id(&self) -> NoteId {
        loop {
            let candidate = (self.next_id)();
            if !candidate.is_empty() && self.get(&candidate).is_none() {
                return candidate;
            }
            warn!("event=note_id_collision module=repo status=retry");
        }
    }

    fn read_stored_notes(&self) -> Result<Vec<Note>, StoreError> {
        let mut entries = self.store.get(&[NOTES_KEY])?;
        let Some(value) = entries.remove(NOTES_KEY) else {
            return Ok(Vec::new());
        };
        let notes: Vec<Note> = serde_json::from_value(value)?;
        let unique = collapse_duplicate_ids(&notes);
        if unique.len() != notes.len() {
            warn!(
                "event=notes_load module=repo status=repaired duplicate_ids={}",
                notes.len() - unique.len()
            );
        }
        Ok(unique)
    }

    fn after_mutation(&mut self, event: &'static str) {
        self.refresh_index();
        self.persist(event);
    }

    fn refresh_index(&mut self) {
        self.tag_index = TagIndex::from_notes(&self.notes);
    }

    fn persist(&self, event: &'static str) {
        let result = serde_json::to_value(&self.notes)
            .map_err(StoreError::from)
            .and_then(|value| self.store.set(single_entry(NOTES_KEY, value)));
        match result {
            Ok(()) => debug!(
                "event=notes_save module=repo status=ok trigger={} count={}",
                event,
                self.notes.len()
            ),
            Err(err) => error!(
                "event=notes_save module=repo status=error trigger={} count={} error={}",
                event,
                self.notes.len(),
                err
            ),
        }
    }
}

fn check_shapes(notes: &[Note]) -> RepoResult<()> {
    for (index, note) in notes.iter().enumerate() {
        note.validate()
            .map_err(|error| RepoError::InvalidNote { index, error })?;
    }
    Ok(())
}
