use std::fmt;
use std::str::FromStr;

use serde_json::Value;

/// A submitted form field that carried a truthy value
///
/// Absent fields, `null`, `false`, `0` and `""` are not accepted. Any other
/// scalar is kept as its textual form, and arrays/objects as their JSON text.
#[derive(Debug, PartialEq, Clone)]
pub struct RequiredText(String);

impl RequiredText {
    /// Convert a raw submitted value, returning `None` if the value is falsy
    pub fn from_value(value: Option<Value>) -> Option<Self> {
        let text = match value? {
            Value::Null | Value::Bool(false) => return None,
            Value::String(s) => s,
            Value::Number(n) => {
                if n.as_f64() == Some(0.0) {
                    return None;
                }
                n.to_string()
            }
            other => other.to_string(),
        };

        text.parse().ok()
    }
}

impl FromStr for RequiredText {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.is_empty() {
            return Err("Field cannot be empty".into());
        }
        Ok(Self(value.to_string()))
    }
}

impl AsRef<str> for RequiredText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequiredText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
