//! Strict schema check and decoding for import payloads.

use crate::model::note::{dedupe_tags, Note};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// First schema violation found in a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// Top level is not a JSON object.
    NotAnObject,
    /// Top level has no `notes` array.
    MissingNotes,
    /// Element `index` of `notes` is not an object.
    NoteNotAnObject { index: usize },
    /// Element `index` has a missing or mistyped `field`.
    InvalidField { index: usize, field: &'static str },
}

impl Display for PayloadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "payload is not a JSON object"),
            Self::MissingNotes => write!(f, "payload has no `notes` array"),
            Self::NoteNotAnObject { index } => write!(f, "notes[{index}] is not an object"),
            Self::InvalidField { index, field } => {
                write!(f, "notes[{index}].{field} is missing or has the wrong type")
            }
        }
    }
}

impl Error for PayloadError {}

/// Returns whether `payload` is an importable collection.
pub fn validate(payload: &Value) -> bool {
    check_payload(payload).is_ok()
}

/// Checks the import schema and reports the first violation.
///
/// Every element of `notes` needs non-empty string `id` and `content`,
/// boolean `isSecret`, an array of strings `tags`, and numeric
/// `createdAt`/`updatedAt`. Other top-level fields are ignored.
pub fn check_payload(payload: &Value) -> Result<(), PayloadError> {
    notes_array(payload)?
        .iter()
        .enumerate()
        .try_for_each(|(index, note)| check_note(index, note))
}

/// Decodes a checked payload into typed notes.
///
/// Float timestamps are truncated to whole milliseconds and exact duplicate
/// tags within a note are collapsed; tag values are otherwise kept as given.
pub fn decode_notes(payload: &Value) -> Result<Vec<Note>, PayloadError> {
    check_payload(payload)?;
    notes_array(payload)?
        .iter()
        .enumerate()
        .map(|(index, value)| decode_note(index, value))
        .collect()
}

fn notes_array(payload: &Value) -> Result<&Vec<Value>, PayloadError> {
    payload
        .as_object()
        .ok_or(PayloadError::NotAnObject)?
        .get("notes")
        .and_then(Value::as_array)
        .ok_or(PayloadError::MissingNotes)
}

fn check_note(index: usize, value: &Value) -> Result<(), PayloadError> {
    let note = value
        .as_object()
        .ok_or(PayloadError::NoteNotAnObject { index })?;
    non_empty_str(note, index, "id")?;
    non_empty_str(note, index, "content")?;
    field(note, index, "isSecret", Value::as_bool)?;
    tag_list(note, index)?;
    timestamp(note, index, "createdAt")?;
    timestamp(note, index, "updatedAt")?;
    Ok(())
}

fn decode_note(index: usize, value: &Value) -> Result<Note, PayloadError> {
    let note = value
        .as_object()
        .ok_or(PayloadError::NoteNotAnObject { index })?;
    Ok(Note {
        id: non_empty_str(note, index, "id")?.to_string(),
        content: non_empty_str(note, index, "content")?.to_string(),
        tags: dedupe_tags(tag_list(note, index)?),
        is_secret: field(note, index, "isSecret", Value::as_bool)?,
        created_at: timestamp(note, index, "createdAt")?,
        updated_at: timestamp(note, index, "updatedAt")?,
    })
}

fn field<'v, T>(
    note: &'v Map<String, Value>,
    index: usize,
    name: &'static str,
    read: impl Fn(&'v Value) -> Option<T>,
) -> Result<T, PayloadError> {
    note.get(name)
        .and_then(read)
        .ok_or(PayloadError::InvalidField { index, field: name })
}

fn non_empty_str<'v>(
    note: &'v Map<String, Value>,
    index: usize,
    name: &'static str,
) -> Result<&'v str, PayloadError> {
    field(note, index, name, Value::as_str)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or(PayloadError::InvalidField { index, field: name })
}

fn tag_list(note: &Map<String, Value>, index: usize) -> Result<Vec<&str>, PayloadError> {
    let invalid = PayloadError::InvalidField {
        index,
        field: "tags",
    };
    let tags = note
        .get("tags")
        .and_then(Value::as_array)
        .ok_or_else(|| invalid.clone())?;
    tags.iter()
        .map(|tag| tag.as_str().ok_or_else(|| invalid.clone()))
        .collect()
}

fn timestamp(
    note: &Map<String, Value>,
    index: usize,
    name: &'static str,
) -> Result<i64, PayloadError> {
    let number = note
        .get(name)
        .filter(|value| value.is_number())
        .ok_or(PayloadError::InvalidField { index, field: name })?;
    number
        .as_i64()
        .or_else(|| number.as_f64().map(|value| value as i64))
        .ok_or(PayloadError::InvalidField { index, field: name })
}

#[cfg(test)]
mod tests {
    use super::{check_payload, decode_notes, validate, PayloadError};
    use serde_json::json;

    fn valid_note() -> serde_json::Value {
        json!({
            "id": "x",
            "content": "hello",
            "tags": ["a"],
            "isSecret": false,
            "createdAt": 1,
            "updatedAt": 2
        })
    }

    #[test]
    fn rejects_non_object_and_missing_notes() {
        assert_eq!(check_payload(&json!([])), Err(PayloadError::NotAnObject));
        assert_eq!(
            check_payload(&json!({"version": "1.0.0"})),
            Err(PayloadError::MissingNotes)
        );
        assert_eq!(
            check_payload(&json!({"notes": {}})),
            Err(PayloadError::MissingNotes)
        );
    }

    #[test]
    fn reports_first_bad_field() {
        let mut note = valid_note();
        note["isSecret"] = json!("no");
        let payload = json!({"notes": [valid_note(), note]});
        assert_eq!(
            check_payload(&payload),
            Err(PayloadError::InvalidField {
                index: 1,
                field: "isSecret"
            })
        );
    }

    #[test]
    fn empty_strings_and_non_string_tags_are_invalid() {
        let mut empty_content = valid_note();
        empty_content["content"] = json!("");
        assert!(!validate(&json!({"notes": [empty_content]})));

        let mut mixed_tags = valid_note();
        mixed_tags["tags"] = json!(["ok", 3]);
        assert!(!validate(&json!({"notes": [mixed_tags]})));
    }

    #[test]
    fn empty_notes_array_is_valid() {
        assert!(validate(&json!({"notes": []})));
    }

    #[test]
    fn decode_truncates_float_timestamps_and_dedupes_tags() {
        let mut note = valid_note();
        note["createdAt"] = json!(1500.9);
        note["tags"] = json!(["a", "a", "b"]);
        let notes = decode_notes(&json!({"notes": [note]})).unwrap();
        assert_eq!(notes[0].created_at, 1500);
        assert_eq!(notes[0].tags, vec!["a", "b"]);
    }

    #[test]
    fn decode_keeps_untrimmed_and_blank_tags() {
        let mut note = valid_note();
        note["tags"] = json!([" padded ", "", "Work"]);
        let notes = decode_notes(&json!({"notes": [note]})).unwrap();
        assert_eq!(notes[0].tags, vec![" padded ", "", "Work"]);
    }
}
