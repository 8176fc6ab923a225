//! Reading `title`/`content` out of note request bodies.
//!
//! A body is only parsed when it is declared as JSON; anything else, and an
//! empty body, carries no fields. Falsy JSON values (`null`, `false`, `0`,
//! `""`) count as absent. Any other non-string value is kept as
//! [`Field::Invalid`] so the handler can fail it the way the store would.

use axum::http::{HeaderMap, header};
use serde_json::Value;

use crate::error::ApiError;

#[derive(Debug, PartialEq, Eq)]
pub enum Field {
    Absent,
    Text(String),
    Invalid,
}

impl Field {
    fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null | Value::Bool(false)) => Self::Absent,
            Some(Value::String(text)) if text.is_empty() => Self::Absent,
            Some(Value::String(text)) => Self::Text(text.clone()),
            Some(Value::Number(number)) if number.as_f64() == Some(0.0) => Self::Absent,
            Some(_) => Self::Invalid,
        }
    }

    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// `Err(())` for a value no note column can hold.
    pub(super) fn into_text(self) -> Result<Option<String>, ()> {
        match self {
            Self::Absent => Ok(None),
            Self::Text(text) => Ok(Some(text)),
            Self::Invalid => Err(()),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct NoteFields {
    pub title: Field,
    pub content: Field,
}

fn declares_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

/// Fails only when a declared JSON body does not parse.
pub fn note_fields(headers: &HeaderMap, body: &[u8]) -> Result<NoteFields, ApiError> {
    if !declares_json(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(NoteFields {
            title: Field::Absent,
            content: Field::Absent,
        });
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(e.to_string()))?;

    Ok(NoteFields {
        title: Field::from_value(value.get("title")),
        content: Field::from_value(value.get("content")),
    })
}
