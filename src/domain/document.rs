use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::StoreError;

/// A single primitive value stored inside a document
///
/// The store is schemaless, so every field read back is one of these three
/// shapes regardless of what the writer intended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    String(String),
    Null,
}

impl FieldValue {
    /// Reads the value as an `i32`, defaulting to 0 when it is missing,
    /// out of range or not a number
    ///
    /// # Example
    /// ```
    /// use team_registry::domain::document::FieldValue;
    ///
    /// assert_eq!(FieldValue::Integer(1901).as_i32_or_default(), 1901);
    /// assert_eq!(FieldValue::String(" 38 ".into()).as_i32_or_default(), 38);
    /// assert_eq!(FieldValue::String("many".into()).as_i32_or_default(), 0);
    /// assert_eq!(FieldValue::Null.as_i32_or_default(), 0);
    /// ```
    pub fn as_i32_or_default(&self) -> i32 {
        match self {
            FieldValue::Integer(n) => i32::try_from(*n).unwrap_or(0),
            FieldValue::String(s) => s.trim().parse().unwrap_or(0),
            FieldValue::Null => 0,
        }
    }

    /// Reads the value as a string, defaulting to empty for `Null`
    pub fn as_string_or_default(&self) -> String {
        match self {
            FieldValue::String(s) => s.clone(),
            FieldValue::Integer(n) => n.to_string(),
            FieldValue::Null => String::new(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

/// Field map of a document, keyed by field name
pub type Fields = BTreeMap<String, FieldValue>;

/// A document as returned by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Looks up a field, treating a missing field the same as `Null`
    pub fn field(&self, name: &str) -> &FieldValue {
        self.fields.get(name).unwrap_or(&FieldValue::Null)
    }
}

/// Port to a hosted document store
///
/// Documents are grouped into named collections and addressed by string
/// ids. Any backend exposing this capability set can hold teams.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch every document in a collection, in store order
    async fn get_all(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Fetch a single document by id
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Create or fully overwrite the document at `id`
    async fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError>;

    /// Merge `fields` into an existing document
    ///
    /// Fails with `StoreError::NotFound` if the document does not exist.
    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError>;

    /// Insert a new document and return the id the store assigned to it
    async fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;

    /// Remove the document at `id`. Removing a missing document succeeds.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_out_of_i32_range_defaults_to_zero() {
        assert_eq!(FieldValue::Integer(i64::MAX).as_i32_or_default(), 0);
        assert_eq!(FieldValue::Integer(-5).as_i32_or_default(), -5);
    }

    #[test]
    fn test_string_reads_integer_as_text() {
        assert_eq!(FieldValue::Integer(7).as_string_or_default(), "7");
        assert_eq!(FieldValue::Null.as_string_or_default(), "");
    }

    #[test]
    fn test_missing_field_reads_as_null() {
        let doc = Document::new("abc", Fields::new());
        assert_eq!(doc.field("name"), &FieldValue::Null);
    }

    #[test]
    fn test_field_value_json_shape() {
        let mut fields = Fields::new();
        fields.insert("name".into(), "River".into());
        fields.insert("titlesWon".into(), 38.into());
        fields.insert("imageUrl".into(), FieldValue::Null);

        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "River", "titlesWon": 38, "imageUrl": null})
        );

        let back: Fields = serde_json::from_value(json).unwrap();
        assert_eq!(back, fields);
    }
}
