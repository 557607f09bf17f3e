//! Import/export of portable note collections.
//!
//! # Responsibility
//! - Serialize the collection into the versioned export envelope.
//! - Validate untrusted import payloads before any value is used.
//! - Reconcile an incoming collection with the local one.
//!
//! # Invariants
//! - Validation is fail-closed: one bad note rejects the whole payload.
//! - Merge lets the incoming record win outright on id collision.
//! - Merge and replace results never contain duplicate ids.

pub mod export;
pub mod merge;
pub mod payload;

/// User choice gating how a validated payload is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportDecision {
    Replace,
    Merge,
    Cancel,
}

/// What a completed import did to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The collection was replaced by `count` incoming notes.
    Replaced { count: usize },
    /// Incoming notes were merged in.
    Merged { added: usize, overwritten: usize },
    /// The user declined; nothing changed.
    Cancelled,
}

/// Facts about a validated payload shown before the user decides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Distinct incoming notes.
    pub incoming: usize,
    /// Incoming ids that already exist locally.
    pub colliding: usize,
    /// Notes currently in the local collection.
    pub existing: usize,
    /// Envelope version when present.
    pub version: Option<String>,
}
