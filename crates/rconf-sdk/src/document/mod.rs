//! Structured configuration documents.
//!
//! The host dialect is TOML. A document whose first non-blank character is
//! `{` is read as JSON instead. Either way the result is flattened into leaf
//! entries keyed by dot path, in document order, with each leaf rendered back
//! as TOML value text.

mod flatten;
mod json;

use std::fmt;

use crate::error::BoxError;

pub use flatten::{quote_key_segment, render_value};

/// One resolved leaf of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    /// Dot path of the leaf; segments that are not bare keys are quoted.
    pub key: String,
    /// The leaf value rendered as TOML value text.
    pub raw_value: String,
}

/// A parsed document reduced to its leaf entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    entries: Vec<ConfigEntry>,
}

impl Document {
    pub fn entries(&self) -> &[ConfigEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ConfigEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.raw_value.as_str())
    }
}

/// Underlying cause of a parse failure, with the cause's type name.
#[derive(Debug)]
pub struct Cause {
    pub type_name: &'static str,
    pub error: BoxError,
}

/// Failure to turn text into a [`Document`].
#[derive(Debug)]
pub struct ParseError {
    origin: String,
    message: String,
    cause: Option<Cause>,
}

impl ParseError {
    /// A parse failure the parser cannot attribute to anything deeper.
    pub fn new(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            message: message.into(),
            cause: None,
        }
    }

    /// A parse failure caused by `cause`.
    pub fn with_cause<E>(origin: impl Into<String>, message: impl Into<String>, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            origin: origin.into(),
            message: message.into(),
            cause: Some(Cause {
                type_name: std::any::type_name::<E>(),
                error: Box::new(cause),
            }),
        }
    }

    /// Where the failure was found (source name, plus line/column when known).
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause_type(&self) -> Option<&'static str> {
        self.cause.as_ref().map(|c| c.type_name)
    }

    pub fn into_parts(self) -> (String, String, Option<Cause>) {
        (self.origin, self.message, self.cause)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.origin, self.message)
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|c| c.error.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Parse `text` (named `origin` in errors) into its flattened entries.
///
/// A leading byte order mark is ignored. Blank text is rejected: an empty body
/// is never a usable document.
pub fn parse_document(text: &str, origin: &str) -> Result<Document, ParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return Err(ParseError::new(origin, "document is empty"));
    }

    let table = if trimmed.starts_with('{') {
        json::parse_table(text, origin)?
    } else {
        toml::from_str::<toml::Table>(text).map_err(|e| {
            let origin = match e.span() {
                Some(span) => {
                    let (line, column) = line_column(text, span.start);
                    format!("{}: line {} column {}", origin, line, column)
                }
                None => origin.to_string(),
            };
            ParseError::new(origin, e.message())
        })?
    };

    let mut entries = Vec::new();
    flatten::flatten_table("", &table, &mut entries);
    Ok(Document { entries })
}

/// 1-based line and column of a byte offset.
fn line_column(text: &str, offset: usize) -> (usize, usize) {
    let before = text.get(..offset).unwrap_or(text);
    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
    (line, column)
}
