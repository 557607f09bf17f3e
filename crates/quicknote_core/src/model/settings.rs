//! User settings record.

use serde::{Deserialize, Serialize};

/// Persisted user preferences.
///
/// Missing fields fall back to defaults so older stored records still load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Default secrecy flag for newly created notes.
    pub default_secret: bool,
}
