//! Feature Vector and its CSV encoding

use serde::{Deserialize, Serialize};

/// Ordered, schema-aligned values ready for the inference service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: Vec<String>,
}

impl FeatureVector {
    /// Wrap values that are already in schema order
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in schema order
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Value at schema position `idx`
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.values.get(idx).map(String::as_str)
    }

    /// Encode as one CSV row terminated by `\n`, without a header.
    ///
    /// Fields containing a delimiter, quote or line break, starting with
    /// whitespace, or equal to `\.`, are quoted with inner quotes doubled.
    pub fn to_csv_line(&self) -> String {
        let mut line = String::with_capacity(self.values.iter().map(|v| v.len() + 1).sum());
        for (idx, value) in self.values.iter().enumerate() {
            if idx > 0 {
                line.push(',');
            }
            if needs_quotes(value) {
                line.push('"');
                line.push_str(&value.replace('"', "\"\""));
                line.push('"');
            } else {
                line.push_str(value);
            }
        }
        line.push('\n');
        line
    }
}

fn needs_quotes(field: &str) -> bool {
    if field.is_empty() {
        return false;
    }
    field == "\\."
        || field.chars().next().is_some_and(char::is_whitespace)
        || field.contains([',', '"', '\r', '\n'])
}
