//! Domain model for notes and user settings.
//!
//! # Responsibility
//! - Define the canonical records persisted by the core.
//! - Keep field naming aligned with the portable export format.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Notes are hard-deleted; there is no tombstone state.

pub mod note;
pub mod settings;
