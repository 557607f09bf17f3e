//! Tag index and interactive tagging helpers.
//!
//! # Responsibility
//! - Derive the sorted distinct tag set from a note collection.
//! - Compute autocomplete candidates and resolve committed tags.
//!
//! # Invariants
//! - `TagIndex` is a pure function of the collection it was built from.
//! - Index order is lexicographic and case-sensitive.
//! - Suggestion lists never exceed `MAX_TAG_SUGGESTIONS` real candidates.

pub mod autocomplete;
pub mod index;
