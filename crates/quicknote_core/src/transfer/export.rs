//! Versioned export envelope and import parsing.

use super::payload::{decode_notes, PayloadError};
use crate::model::note::Note;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Format version written into every export.
pub const EXPORT_FORMAT_VERSION: &str = "1.0.0";
/// Suggested file name for exports.
pub const EXPORT_FILE_NAME: &str = "QuickNotes-export.json";

/// Top-level export document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope {
    pub version: String,
    /// RFC 3339 timestamp in UTC.
    pub export_date: String,
    pub notes: Vec<Note>,
}

impl ExportEnvelope {
    pub fn new(notes: &[Note], exported_at: DateTime<Utc>) -> Self {
        Self {
            version: EXPORT_FORMAT_VERSION.to_string(),
            export_date: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            notes: notes.to_vec(),
        }
    }
}

/// Renders `notes` as a pretty-printed export document.
pub fn export_json(notes: &[Note], exported_at: DateTime<Utc>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ExportEnvelope::new(notes, exported_at))
}

/// Import failure. No import error ever mutates the collection.
#[derive(Debug)]
pub enum ImportError {
    /// The file is not JSON.
    Parse(serde_json::Error),
    /// The JSON does not satisfy the import schema.
    Invalid(PayloadError),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "import file is not valid JSON: {err}"),
            Self::Invalid(err) => write!(f, "invalid import file: {err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<PayloadError> for ImportError {
    fn from(value: PayloadError) -> Self {
        Self::Invalid(value)
    }
}

/// A payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedImport {
    /// `version` when present as a string; informational only.
    pub version: Option<String>,
    /// `exportDate` when present as a string; informational only.
    pub export_date: Option<String>,
    pub notes: Vec<Note>,
}

/// Parses and validates an import document.
pub fn parse_import(text: &str) -> Result<ParsedImport, ImportError> {
    let payload: Value = serde_json::from_str(text)?;
    parse_import_value(&payload)
}

/// Validates an already parsed import document.
pub fn parse_import_value(payload: &Value) -> Result<ParsedImport, ImportError> {
    let notes = decode_notes(payload)?;
    let text_field = |name: &str| {
        payload
            .get(name)
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    Ok(ParsedImport {
        version: text_field("version"),
        export_date: text_field("exportDate"),
        notes,
    })
}

#[cfg(test)]
mod tests {
    use super::{export_json, parse_import, ImportError, EXPORT_FORMAT_VERSION};
    use crate::model::note::Note;
    use chrono::{TimeZone, Utc};

    #[test]
    fn export_carries_version_and_date() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let json = export_json(&[], at).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], EXPORT_FORMAT_VERSION);
        assert_eq!(value["exportDate"], "2024-05-01T12:00:00.000Z");
        assert_eq!(value["notes"], serde_json::json!([]));
    }

    #[test]
    fn parse_distinguishes_syntax_from_schema_errors() {
        assert!(matches!(parse_import("{not json"), Err(ImportError::Parse(_))));
        assert!(matches!(
            parse_import(r#"{"notes": [{"id": "x"}]}"#),
            Err(ImportError::Invalid(_))
        ));
    }

    #[test]
    fn version_is_optional() {
        let note = Note::new("a".to_string(), "body", vec![], true, 5);
        let text = serde_json::json!({ "notes": [note.clone()] }).to_string();
        let parsed = parse_import(&text).unwrap();
        assert_eq!(parsed.version, None);
        assert_eq!(parsed.notes, vec![note]);
    }
}
