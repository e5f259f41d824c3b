use serde::{Deserialize, Serialize};
use std::fmt;

/// A field value, typed when the field is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Number(i64),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            FieldValue::Text(_) => None,
            FieldValue::Number(n) => Some(*n),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{n}"),
        }
    }
}

/// One named field of a document plus its storage/indexing policy.
///
/// Policy is fixed by the constructor used; there is no runtime inspection
/// of the value.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    value: FieldValue,
    stored: bool,
    indexed: bool,
}

impl Field {
    /// Tokenized, searchable and retrievable.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: FieldValue::Text(value.into()), stored: true, indexed: true }
    }

    /// Retrievable, and exact-match searchable by its decimal representation.
    pub fn number(name: impl Into<String>, value: i64) -> Self {
        Self { name: name.into(), value: FieldValue::Number(value), stored: true, indexed: true }
    }

    /// Retrievable only; never tokenized or searchable.
    pub fn stored(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: FieldValue::Text(value.into()), stored: true, indexed: false }
    }

    /// Tokenized and searchable; the raw value is discarded after analysis.
    pub fn unstored_text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: FieldValue::Text(value.into()), stored: false, indexed: true }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn value(&self) -> &FieldValue { &self.value }
    pub fn is_stored(&self) -> bool { self.stored }
    pub fn is_indexed(&self) -> bool { self.indexed }
}

/// An ordered collection of fields making up one indexable unit.
///
/// A document has no identity until handed to an
/// [`IndexWriter`](crate::IndexWriter). Duplicate field names are allowed
/// and nothing is validated at construction time.
#[derive(Debug, Clone, Default)]
pub struct Document {
    fields: Vec<Field>,
}

impl Document {
    pub fn new() -> Self { Self::default() }

    pub fn add(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Fields in insertion order.
    pub fn fields(&self) -> &[Field] { &self.fields }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archetype_policies() {
        assert!(Field::text("fileName", "a.txt").is_stored());
        assert!(Field::text("fileName", "a.txt").is_indexed());
        assert!(!Field::stored("filePath", "/tmp/a.txt").is_indexed());
        assert!(!Field::unstored_text("fileContent", "alpha").is_stored());
        assert_eq!(Field::number("fileSize", 42).value().as_number(), Some(42));
    }
}
