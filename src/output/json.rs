//! JSON output of result records.

use serde::Serialize;

/// Compact or indented JSON for a record.
pub fn to_json<T: Serialize>(record: &T, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(record)
    } else {
        serde_json::to_string(record)
    }
}
