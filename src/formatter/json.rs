//! JSON formatting for record-oriented datasets
//!
//! This module provides pretty-printed JSON output with:
//! - Configurable indentation width (4 spaces by default)
//! - Optional color highlighting for terminal display
//! - One stable serialization shared by file export and screen output

use colored_json::prelude::*;
use serde_json::Value;

use crate::error::{ExportError, Result};

/// JSON formatter with configurable indentation.
pub struct JsonFormatter {
    /// Indentation width in spaces
    indent: usize,

    /// Enable colored output for terminal display
    use_colors: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    ///
    /// # Arguments
    /// * `indent` - Indentation width in spaces
    /// * `use_colors` - Enable colored output
    ///
    /// # Returns
    /// * `Self` - New formatter
    pub fn new(indent: usize, use_colors: bool) -> Self {
        Self { indent, use_colors }
    }

    /// Serialize a value to pretty-printed JSON.
    ///
    /// This is the canonical serialization used for both file export and
    /// screen output.
    ///
    /// # Arguments
    /// * `value` - The value to serialize
    ///
    /// # Returns
    /// * `Result<String>` - Pretty JSON string with the configured indent
    pub fn format(&self, value: &Value) -> Result<String> {
        self.to_pretty_string(value)
            .map_err(|e| ExportError::Serialization(e.to_string()).into())
    }

    /// Serialize a value for terminal display.
    ///
    /// Identical to [`JsonFormatter::format`] except that colors are applied
    /// when enabled and the output stream supports them.
    ///
    /// # Arguments
    /// * `value` - The value to serialize
    ///
    /// # Returns
    /// * `Result<String>` - Pretty JSON string, possibly colorized
    pub fn format_for_terminal(&self, value: &Value) -> Result<String> {
        let json_str = self.format(value)?;
        if self.use_colors {
            Ok(json_str.to_colored_json_auto().unwrap_or(json_str))
        } else {
            Ok(json_str)
        }
    }

    /// Convert a value to pretty-printed JSON with custom indentation
    ///
    /// # Arguments
    /// * `value` - The value to serialize
    ///
    /// # Returns
    /// * `Result<String, serde_json::Error>` - Pretty JSON string with custom indent
    fn to_pretty_string<T: serde::Serialize>(
        &self,
        value: &T,
    ) -> std::result::Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let indent = " ".repeat(self.indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut ser)?;
        Ok(String::from_utf8(buf).unwrap())
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new(4, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_four_space_indent() {
        let formatter = JsonFormatter::new(4, false);
        let value = json!([{"a": 1, "b": "x"}]);
        let output = formatter.format(&value).unwrap();

        assert!(output.contains("    \"a\": 1"));
        assert!(output.contains("    \"b\": \"x\""));
        assert!(output.starts_with('['));
        assert!(output.ends_with(']'));
    }

    #[test]
    fn test_indent_is_configurable() {
        let formatter = JsonFormatter::new(2, false);
        let output = formatter.format(&json!({"a": 1})).unwrap();
        assert!(output.contains("  \"a\": 1"));
        assert!(!output.contains("    \"a\""));
    }

    #[test]
    fn test_terminal_output_matches_file_output_without_colors() {
        let formatter = JsonFormatter::new(4, false);
        let value = json!([{"a": 1}, {"a": 2}]);
        assert_eq!(
            formatter.format(&value).unwrap(),
            formatter.format_for_terminal(&value).unwrap()
        );
    }

    #[test]
    fn test_round_trip_preserves_value() {
        let formatter = JsonFormatter::new(4, false);
        let value = json!([{"a": 1, "b": null}, {"a": 2.5, "b": "y"}]);
        let output = formatter.format(&value).unwrap();
        let reparsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(reparsed, value);
    }
}
