//! Output formatting for result records.
//!
//! - [`json`] - compact or indented JSON
//! - [`terminal`] - aligned key/value table

mod json;
mod terminal;

pub use json::to_json;
pub use terminal::{format_field, format_value, to_table};

use crate::config::OutputFormat;
use serde::Serialize;

/// Render a record in the chosen format.
pub fn render<T: Serialize>(record: &T, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => to_json(record, false),
        OutputFormat::Pretty => to_json(record, true),
        OutputFormat::Table => to_table(record),
    }
}
