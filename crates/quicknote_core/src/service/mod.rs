//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repositories, query engine and import/export into
//!   use-case level APIs.
//! - Keep presentation layers decoupled from storage details.

pub mod note_service;
pub mod prompt;
