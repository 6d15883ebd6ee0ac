//! Format-state snapshots.
//!
//! A [`FormatState`] is produced by the host's text engine and describes the
//! formatting at the current selection: `bold: true`, `heading: 2`,
//! `fontFamily: "Georgia, serif"`, `link: null` and so on. The toolbar only
//! reads it. Values follow JSON, and predicates use JavaScript-style
//! truthiness: `false`, `0`, `""`, `null` and missing keys are all falsy.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A point-in-time description of the formatting at the selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatState {
    attributes: Map<String, Value>,
}

impl FormatState {
    /// An empty snapshot: every attribute is missing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return this snapshot with `key` set to `value`.
    ///
    /// ```
    /// use floatbar::FormatState;
    ///
    /// let state = FormatState::new().with("bold", true).with("heading", 2);
    /// assert!(state.truthy("bold"));
    /// assert_eq!(state.text("heading"), "2");
    /// ```
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Set an attribute in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Parse a snapshot from a JSON object.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The raw value of an attribute.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// JavaScript-style truthiness of an attribute.
    pub fn truthy(&self, key: &str) -> bool {
        match self.attributes.get(key) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_) | Value::Object(_)) => true,
        }
    }

    /// The attribute rendered as text, or `""` when falsy.
    ///
    /// Strings are returned as-is and numbers in their shortest form, so a
    /// `heading` of `2` reads as `"2"`.
    pub fn text(&self, key: &str) -> String {
        if !self.truthy(key) {
            return String::new();
        }
        match self.attributes.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => number_text(n),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }

    /// Whether the attribute is present with a non-null value.
    pub fn is_present_non_null(&self, key: &str) -> bool {
        self.attributes.get(key).is_some_and(|v| !v.is_null())
    }

    /// Whether the attribute is a string equal to `expected`.
    pub fn equals(&self, key: &str, expected: &str) -> bool {
        self.attributes.get(key).and_then(Value::as_str) == Some(expected)
    }

    /// Number of attributes in the snapshot.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the snapshot has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl From<Map<String, Value>> for FormatState {
    fn from(attributes: Map<String, Value>) -> Self {
        Self { attributes }
    }
}

/// Whole-valued floats print without a fraction, so `2.0` reads as `2`.
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if !n.is_i64() && !n.is_u64() && f.fract() == 0.0 && f.abs() < 1e15 => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}
