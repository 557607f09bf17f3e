//! Repositories owning the in-memory state and its durability.
//!
//! # Responsibility
//! - Hold the canonical note collection and settings record.
//! - Persist every mutation through a `StoreAdapter`.
//!
//! # Invariants
//! - Write paths validate before mutating; a rejected call changes nothing.
//! - Storage failures never reach callers: reads fall back to defaults and
//!   failed writes are logged while the in-memory state stays authoritative.
//! - The tag index is recomputed before any mutating call returns.

use crate::model::note::{NoteId, NoteValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod note_repo;
pub mod settings_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Caller-facing repository error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// Create/update input failed validation.
    Validation(NoteValidationError),
    /// Update referenced an unknown note.
    NotFound(NoteId),
    /// A note in a bulk replacement failed the shape contract.
    InvalidNote {
        index: usize,
        error: NoteValidationError,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::InvalidNote { index, error } => write!(f, "note #{index} is invalid: {error}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::InvalidNote { error, .. } => Some(error),
            Self::NotFound(_) => None,
        }
    }
}

impl From<NoteValidationError> for RepoError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}
