//! Terminal output utilities.
//!
//! Renders a result record as an aligned `key  value` table.

use serde::Serialize;
use serde_json::Value;

/// Pad a label to `width` columns, left-aligned. Longer labels are kept whole.
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    format!("{value_str:<width$}")
}

/// Plain text of one record value; sequences are comma-joined.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(format_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

/// One line per record field, labels padded to the longest key.
///
/// A record that serializes to a bare value is printed as that value.
pub fn to_table<T: Serialize>(record: &T) -> Result<String, serde_json::Error> {
    let value = serde_json::to_value(record)?;
    let fields = match &value {
        Value::Object(fields) => fields,
        other => return Ok(format_value(other)),
    };
    let width = fields.keys().map(|k| k.len()).max().unwrap_or(0);
    let lines: Vec<String> = fields
        .iter()
        .map(|(key, value)| format!("{}  {}", format_field(key, width), format_value(value)))
        .collect();
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("test", 10), "test      ");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("long_value", 5), "long_value");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!("10.0.0.1")), "10.0.0.1");
        assert_eq!(format_value(&json!([1, 2, 3])), "1, 2, 3");
        assert_eq!(format_value(&json!(true)), "true");
        assert_eq!(format_value(&json!(null)), "-");
    }

    #[test]
    fn test_to_table() {
        let record = json!({"address": "10.0.0.1", "version": 4});
        let table = to_table(&record).unwrap();
        assert_eq!(table, "address  10.0.0.1\nversion  4");
        assert_eq!(to_table(&"::1").unwrap(), "::1");
    }
}
