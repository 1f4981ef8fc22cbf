//! Address list processing logic.
//!
//! - [`address_set`] - Parsing and de-duplication of comma-separated lists

mod address_set;

// Re-export public types
pub use address_set::{AddressSet, SetEntry};
