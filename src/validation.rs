// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Field-level validation of JSON request bodies.
//!
//! Request bodies are read as a JSON object and each field is extracted
//! explicitly, so that every missing or mistyped field is reported at once
//! instead of failing on the first deserialization error.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

pub const REQUIRED: &str = "This field is required.";
pub const NOT_NULL: &str = "This field may not be null.";
pub const NOT_A_STRING: &str = "Not a valid string.";
pub const NOT_AN_INTEGER: &str = "A valid integer is required.";
pub const NOT_A_LIST: &str = "Expected a list of items.";

/// Error messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors holding a single message for one field.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut out = Self::new();
        for (field, field_errors) in errors.field_errors() {
            for err in field_errors {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({}).", err.code));
                out.add(&field, message);
            }
        }
        out
    }
}

/// Message for a reference to a record that does not exist.
pub fn invalid_reference(id: &str) -> String {
    format!("Invalid pk \"{}\" - object does not exist.", id)
}

/// Extracts typed fields from a JSON object, collecting errors as it goes.
pub struct Fields<'a> {
    body: &'a Map<String, Value>,
    errors: FieldErrors,
}

impl<'a> Fields<'a> {
    pub fn new(body: &'a Map<String, Value>) -> Self {
        Self {
            body,
            errors: FieldErrors::new(),
        }
    }

    /// Parse a required field with `parse`, recording its error message on failure.
    pub fn parse<T, F>(&mut self, name: &str, parse: F) -> Option<T>
    where
        F: FnOnce(&Value) -> Result<T, String>,
    {
        match self.body.get(name) {
            None => {
                self.errors.add(name, REQUIRED);
                None
            }
            Some(Value::Null) => {
                self.errors.add(name, NOT_NULL);
                None
            }
            Some(value) => match parse(value) {
                Ok(parsed) => Some(parsed),
                Err(message) => {
                    self.errors.add(name, message);
                    None
                }
            },
        }
    }

    /// A required string field.
    pub fn string(&mut self, name: &str) -> Option<String> {
        self.parse(name, |value| match value {
            Value::String(s) => Ok(s.clone()),
            _ => Err(NOT_A_STRING.to_string()),
        })
    }

    /// A required integer field, given as a JSON integer or a string of digits.
    pub fn integer(&mut self, name: &str) -> Option<i64> {
        self.parse(name, |value| match value {
            Value::Number(n) => n.as_i64().ok_or_else(|| NOT_AN_INTEGER.to_string()),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| NOT_AN_INTEGER.to_string()),
            _ => Err(NOT_AN_INTEGER.to_string()),
        })
    }

    /// An optional list of string ids. Missing means empty; duplicates collapse.
    pub fn id_list(&mut self, name: &str) -> Vec<String> {
        let items = match self.body.get(name) {
            None | Some(Value::Null) => return Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => {
                self.errors.add(name, NOT_A_LIST);
                return Vec::new();
            }
        };

        let mut ids: Vec<String> = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::String(id) => {
                    if !ids.contains(id) {
                        ids.push(id.clone());
                    }
                }
                other => self
                    .errors
                    .add(name, format!("Incorrect type. Expected pk value, received {}.", json_kind(other))),
            }
        }
        ids
    }

    /// Finish extraction, failing if any field was rejected.
    pub fn finish(self) -> Result<(), FieldErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[test]
    fn test_missing_and_null_fields_are_reported() {
        let body = object(json!({ "name": null }));
        let mut fields = Fields::new(&body);

        assert_eq!(fields.string("name"), None);
        assert_eq!(fields.string("description"), None);

        let errors = fields.finish().unwrap_err();
        assert_eq!(errors.get("name"), Some(&[NOT_NULL.to_string()][..]));
        assert_eq!(
            errors.get("description"),
            Some(&[REQUIRED.to_string()][..])
        );
    }

    #[test]
    fn test_integer_accepts_numeric_strings() {
        let body = object(json!({ "a": 200, "b": "42", "c": "abc", "d": 1.5 }));
        let mut fields = Fields::new(&body);

        assert_eq!(fields.integer("a"), Some(200));
        assert_eq!(fields.integer("b"), Some(42));
        assert_eq!(fields.integer("c"), None);
        assert_eq!(fields.integer("d"), None);

        let errors = fields.finish().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["c", "d"]);
    }

    #[test]
    fn test_id_list_dedupes_and_rejects_non_strings() {
        let body = object(json!({ "members": ["a", "b", "a", 7] }));
        let mut fields = Fields::new(&body);

        assert_eq!(fields.id_list("members"), vec!["a", "b"]);
        let errors = fields.finish().unwrap_err();
        assert_eq!(
            errors.get("members"),
            Some(&["Incorrect type. Expected pk value, received number.".to_string()][..])
        );
    }

    #[test]
    fn test_id_list_defaults_to_empty() {
        let body = Map::new();
        let mut fields = Fields::new(&body);
        assert!(fields.id_list("members").is_empty());
        assert!(fields.finish().is_ok());
    }

    #[test]
    fn test_display_joins_messages() {
        let mut errors = FieldErrors::single("score", NOT_AN_INTEGER);
        errors.add("user", REQUIRED);
        assert_eq!(
            errors.to_string(),
            "score: A valid integer is required.; user: This field is required."
        );
    }
}
