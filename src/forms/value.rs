//! Form value objects

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// Get the text value (returns empty string for flag fields)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Flag(_) => "",
        }
    }

    /// Get the flag value (returns false for text fields)
    pub fn as_flag(&self) -> bool {
        match self {
            FieldValue::Flag(b) => *b,
            FieldValue::Text(_) => false,
        }
    }

    /// Whether the value counts as "not provided"
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Flag(_) => false,
        }
    }

    /// Whether both values are the same variant
    pub fn same_kind(&self, other: &FieldValue) -> bool {
        matches!(
            (self, other),
            (FieldValue::Text(_), FieldValue::Text(_)) | (FieldValue::Flag(_), FieldValue::Flag(_))
        )
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

/// Current values of a form, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues {
    fields: BTreeMap<String, FieldValue>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.fields.insert(name.to_string(), value.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Text value of a field, empty when missing or not text
    pub fn text(&self, name: &str) -> &str {
        self.fields.get(name).map(FieldValue::as_text).unwrap_or("")
    }

    /// Flag value of a field, false when missing or not a flag
    pub fn flag(&self, name: &str) -> bool {
        self.fields.get(name).is_some_and(FieldValue::as_flag)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod field_value {
        use super::*;

        #[test]
        fn test_default_is_empty_text() {
            let value = FieldValue::default();
            assert_eq!(value, FieldValue::Text(String::new()));
            assert!(value.is_empty());
        }

        #[test]
        fn test_as_text_on_flag_is_empty() {
            assert_eq!(FieldValue::Flag(true).as_text(), "");
        }

        #[test]
        fn test_as_flag_on_text_is_false() {
            assert!(!FieldValue::from("true").as_flag());
        }

        #[test]
        fn test_flag_is_never_empty() {
            assert!(!FieldValue::Flag(false).is_empty());
        }

        #[test]
        fn test_same_kind() {
            assert!(FieldValue::from("a").same_kind(&FieldValue::from("b")));
            assert!(FieldValue::from(true).same_kind(&FieldValue::from(false)));
            assert!(!FieldValue::from("a").same_kind(&FieldValue::from(false)));
        }
    }

    mod form_values {
        use super::*;

        #[test]
        fn test_missing_field_defaults() {
            let values = FormValues::new();
            assert_eq!(values.text("email"), "");
            assert!(!values.flag("agreed"));
            assert!(values.get("email").is_none());
        }

        #[test]
        fn test_set_overwrites() {
            let mut values = FormValues::new().with("email", "a@b.com");
            values.set("email", "c@d.com");
            assert_eq!(values.text("email"), "c@d.com");
            assert_eq!(values.len(), 1);
        }

        #[test]
        fn test_names_are_sorted() {
            let values = FormValues::new().with("password", "x").with("email", "y");
            let names: Vec<&str> = values.names().collect();
            assert_eq!(names, vec!["email", "password"]);
        }

        #[test]
        fn test_serializes_as_plain_object() {
            let values = FormValues::new()
                .with("email", "a@b.com")
                .with("rememberMe", true);
            let json = serde_json::to_string(&values).unwrap();
            assert_eq!(json, r#"{"email":"a@b.com","rememberMe":true}"#);

            let parsed: FormValues = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, values);
        }
    }
}
