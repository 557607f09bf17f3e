//! Query engine over the in-memory collection.
//!
//! # Responsibility
//! - Filter notes by required tags and free-text query.
//! - Hold the filter-chip selection state used by list views.
//!
//! # Invariants
//! - Results keep the collection's newest-first order.
//! - "No notes exist" and "no notes match" are distinct outcomes.

pub mod filter;
pub mod query;
